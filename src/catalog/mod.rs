//! 衣類カタログ
//!
//! レコードをカタログディレクトリ直下の JSON ファイルに保存する。
//! キャッシュと違いユーザーデータなので、読めないファイルは空扱いにせずエラーとする。

mod search;

pub use search::parse_tag_list;

use crate::error::{GarmentError, Result};
use garment_tagger_common::{GarmentRecord, TagEdit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CATALOG_FILE_NAME: &str = "catalog.json";

/// カタログファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 次に採番するID
    next_id: u64,
    /// ID → レコード
    records: BTreeMap<u64, GarmentRecord>,
}

impl Catalog {
    const CURRENT_VERSION: u32 = 1;

    pub fn catalog_path(dir: &Path) -> PathBuf {
        dir.join(CATALOG_FILE_NAME)
    }

    /// カタログを読み込み（ファイルがなければ空）
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::catalog_path(dir);
        if !path.exists() {
            return Ok(Self::default());
        }

        let reader = BufReader::new(File::open(&path)?);
        let catalog: Catalog = serde_json::from_reader(reader)
            .map_err(|e| GarmentError::CatalogCorrupt(format!("{}: {}", path.display(), e)))?;

        if catalog.version != Self::CURRENT_VERSION {
            return Err(GarmentError::CatalogCorrupt(format!(
                "バージョン不一致 (ファイル: {}, 対応: {})",
                catalog.version,
                Self::CURRENT_VERSION
            )));
        }

        Ok(catalog)
    }

    /// カタログを保存
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let file = File::create(Self::catalog_path(dir))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        tracing::info!(records = self.records.len(), dir = %dir.display(), "カタログを保存");
        Ok(())
    }

    /// レコードを登録してIDを返す
    pub fn insert(&mut self, mut record: GarmentRecord) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        record.id = id;
        self.records.insert(id, record);
        id
    }

    pub fn get(&self, id: u64) -> Option<&GarmentRecord> {
        self.records.get(&id)
    }

    /// 全レコード（新しい順）
    pub fn list(&self) -> Vec<&GarmentRecord> {
        let mut records: Vec<&GarmentRecord> = self.records.values().collect();
        sort_newest_first(&mut records);
        records
    }

    /// 手動編集を適用（値は検証しない）
    pub fn apply_edit(&mut self, id: u64, edit: &TagEdit) -> Result<&GarmentRecord> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(GarmentError::RecordNotFound(id))?;
        record.apply_edit(edit);
        Ok(record)
    }

    /// レコードを削除
    pub fn remove(&mut self, id: u64) -> Result<GarmentRecord> {
        self.records.remove(&id).ok_or(GarmentError::RecordNotFound(id))
    }

    /// 同じ画像ファイルを参照するレコードがあるか
    pub fn references_file(&self, filename: &str) -> bool {
        self.records.values().any(|r| r.filename == filename)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            next_id: 1,
            records: BTreeMap::new(),
        }
    }
}

/// アップロード日時の降順、同時刻はIDの降順
fn sort_newest_first(records: &mut [&GarmentRecord]) {
    records.sort_by(|a, b| {
        b.upload_time
            .cmp(&a.upload_time)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use garment_tagger_common::{extract, GarmentRecord};

    fn record(filename: &str, upload_time: &str, raw: &str) -> GarmentRecord {
        GarmentRecord::from_tags(filename, upload_time, &extract(raw), Some(raw), 0.0)
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut catalog = Catalog::default();
        let a = catalog.insert(record("a.jpg", "2026-01-01T00:00:00Z", "颜色：红色"));
        let b = catalog.insert(record("b.jpg", "2026-01-02T00:00:00Z", "颜色：蓝色"));
        assert_eq!((a, b), (1, 2));
        assert_eq!(catalog.get(b).unwrap().color, "蓝色");
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut catalog = Catalog::default();
        let a = catalog.insert(record("a.jpg", "2026-01-01T00:00:00Z", ""));
        catalog.remove(a).unwrap();
        let b = catalog.insert(record("b.jpg", "2026-01-01T00:00:00Z", ""));
        assert_eq!(b, 2);
    }

    #[test]
    fn test_list_newest_first() {
        let mut catalog = Catalog::default();
        catalog.insert(record("old.jpg", "2026-01-01T00:00:00Z", ""));
        catalog.insert(record("new.jpg", "2026-03-01T00:00:00Z", ""));
        catalog.insert(record("same.jpg", "2026-03-01T00:00:00Z", ""));

        let names: Vec<&str> = catalog.list().iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["same.jpg", "new.jpg", "old.jpg"]);
    }

    #[test]
    fn test_apply_edit_missing_record() {
        let mut catalog = Catalog::default();
        let result = catalog.apply_edit(42, &TagEdit::default());
        assert!(matches!(result, Err(GarmentError::RecordNotFound(42))));
    }

    #[test]
    fn test_references_file() {
        let mut catalog = Catalog::default();
        catalog.insert(record("a.jpg", "2026-01-01T00:00:00Z", ""));
        assert!(catalog.references_file("a.jpg"));
        assert!(!catalog.references_file("b.jpg"));
    }
}
