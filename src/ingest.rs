//! 画像の登録
//!
//! 画像をストアへコピーし、解析結果から "unknown" を補完したレコードを作成してカタログに追加する。

use crate::analyzer::Analysis;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::scanner::ImageStore;
use chrono::{SecondsFormat, Utc};
use garment_tagger_common::GarmentRecord;
use std::path::Path;

/// 現在時刻（RFC 3339、UTC、秒単位）
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// 画像1枚を登録してIDを返す（カタログの保存は呼び出し側）
pub fn ingest_image(
    catalog: &mut Catalog,
    store: &ImageStore,
    image: &Path,
    analysis: Analysis,
) -> Result<u64> {
    let filename = store.store(image)?;
    let record = GarmentRecord::from_tags(
        filename,
        now_timestamp(),
        &analysis.tags,
        analysis.raw.as_deref(),
        analysis.confidence,
    );

    let id = catalog.insert(record);
    tracing::info!(id, tags = analysis.tags.len(), "レコードを登録");
    Ok(id)
}

/// レコードを削除し、他のレコードが参照していなければ画像も削除する
pub fn delete_record(catalog: &mut Catalog, store: &ImageStore, id: u64) -> Result<GarmentRecord> {
    let record = catalog.remove(id)?;
    if !catalog.references_file(&record.filename) {
        store.remove(&record.filename)?;
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use garment_tagger_common::{TagExtractor, UNKNOWN};
    use tempfile::tempdir;

    #[test]
    fn test_now_timestamp_format() {
        let ts = now_timestamp();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2026-01-01T00:00:00Z".len());
    }

    #[test]
    fn test_ingest_image_builds_record() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("dress.jpg");
        std::fs::write(&image, b"img").unwrap();

        let mut catalog = Catalog::default();
        let store = ImageStore::in_catalog(dir.path());
        let analysis = analyze(&TagExtractor::default(), Some("风格：连衣裙，颜色：荧光绿".into()));

        let id = ingest_image(&mut catalog, &store, &image, analysis).unwrap();
        let record = catalog.get(id).unwrap();
        assert_eq!(record.filename, "dress.jpg");
        assert_eq!(record.style, "连衣裙");
        assert_eq!(record.color, "unrecognized");
        assert_eq!(record.collar, UNKNOWN);
        assert_eq!(record.ai_tags, "风格：连衣裙，颜色：荧光绿");
        assert!(store.path_of("dress.jpg").exists());
    }

    #[test]
    fn test_delete_keeps_shared_image() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("coat.png");
        std::fs::write(&image, b"img").unwrap();

        let mut catalog = Catalog::default();
        let store = ImageStore::in_catalog(dir.path());
        let first = ingest_image(&mut catalog, &store, &image, Analysis::default()).unwrap();
        let second = ingest_image(&mut catalog, &store, &image, Analysis::default()).unwrap();

        delete_record(&mut catalog, &store, first).unwrap();
        assert!(store.path_of("coat.png").exists());

        delete_record(&mut catalog, &store, second).unwrap();
        assert!(!store.path_of("coat.png").exists());
        assert!(catalog.is_empty());
    }
}
