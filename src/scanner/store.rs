//! 画像ストア
//!
//! 登録した画像をカタログディレクトリの `images/` にコピーして保持する。
//! 同名で内容の異なる画像はハッシュ付きの名前で保存し、上書きしない。

use super::is_image_path;
use crate::error::{GarmentError, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

const IMAGE_DIR_NAME: &str = "images";

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// カタログディレクトリ配下のストア
    pub fn in_catalog(catalog_dir: &Path) -> Self {
        Self::new(catalog_dir.join(IMAGE_DIR_NAME))
    }

    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// 画像をストアにコピーし、保存したファイル名を返す
    pub fn store(&self, source: &Path) -> Result<String> {
        if !source.is_file() {
            return Err(GarmentError::FileNotFound(source.display().to_string()));
        }
        if !is_image_path(source) {
            return Err(GarmentError::UnsupportedImage(source.display().to_string()));
        }

        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| GarmentError::FileNotFound(source.display().to_string()))?;

        std::fs::create_dir_all(&self.root)?;

        let source_hash = compute_file_hash(source)?;
        let mut dest_name = file_name.clone();
        let dest = self.path_of(&dest_name);

        if dest.exists() {
            if compute_file_hash(&dest)? == source_hash {
                tracing::debug!(file = %dest_name, "同一画像が保存済み");
                return Ok(dest_name);
            }
            dest_name = hashed_name(source, &source_hash);
        }

        std::fs::copy(source, self.path_of(&dest_name))?;
        tracing::info!(file = %dest_name, "画像を保存");
        Ok(dest_name)
    }

    /// 画像を削除（存在しなければ false）
    pub fn remove(&self, file_name: &str) -> Result<bool> {
        let path = self.path_of(file_name);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }
}

/// ファイル内容のSHA-256（16進）
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// `<stem>-<hash8>.<ext>`
fn hashed_name(source: &Path, hash: &str) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("{}-{}.{}", stem, &hash[..8], ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_store_copies_image() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("shirt.jpg");
        std::fs::write(&source, b"image-bytes").unwrap();

        let store = ImageStore::new(dir.path().join("store"));
        let name = store.store(&source).unwrap();

        assert_eq!(name, "shirt.jpg");
        assert_eq!(std::fs::read(store.path_of(&name)).unwrap(), b"image-bytes");
    }

    #[test]
    fn test_store_same_content_reuses_file() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("shirt.jpg");
        std::fs::write(&source, b"image-bytes").unwrap();

        let store = ImageStore::new(dir.path().join("store"));
        assert_eq!(store.store(&source).unwrap(), "shirt.jpg");
        assert_eq!(store.store(&source).unwrap(), "shirt.jpg");
    }

    #[test]
    fn test_store_name_collision_gets_hash_suffix() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a").join("shirt.jpg");
        let second = dir.path().join("b").join("shirt.jpg");
        std::fs::create_dir_all(first.parent().unwrap()).unwrap();
        std::fs::create_dir_all(second.parent().unwrap()).unwrap();
        std::fs::write(&first, b"first").unwrap();
        std::fs::write(&second, b"second").unwrap();

        let store = ImageStore::new(dir.path().join("store"));
        assert_eq!(store.store(&first).unwrap(), "shirt.jpg");

        let name = store.store(&second).unwrap();
        assert!(name.starts_with("shirt-"));
        assert!(name.ends_with(".jpg"));
        assert_eq!(std::fs::read(store.path_of("shirt.jpg")).unwrap(), b"first");
    }

    #[test]
    fn test_store_rejects_non_image() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        std::fs::write(&source, b"text").unwrap();

        let store = ImageStore::new(dir.path().join("store"));
        assert!(matches!(store.store(&source), Err(GarmentError::UnsupportedImage(_))));
    }

    #[test]
    fn test_remove() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        std::fs::write(store.path_of("x.png"), b"x").unwrap();

        assert!(store.remove("x.png").unwrap());
        assert!(!store.remove("x.png").unwrap());
    }
}
