//! カタログ検索
//!
//! キーワードはファイル名・13属性・AI生出力に、タグは13属性・AI生出力に部分一致する。
//! 英字の大文字小文字は区別しない。

use super::{sort_newest_first, Catalog};
use garment_tagger_common::GarmentRecord;

impl Catalog {
    /// レコードを検索（新しい順）
    ///
    /// # Arguments
    /// * `query` - キーワード（省略・空文字は条件なし）
    /// * `tags` - すべて一致する必要があるタグ（空要素は無視）
    pub fn search(&self, query: Option<&str>, tags: &[String]) -> Vec<&GarmentRecord> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let tags: Vec<&str> = tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();

        let mut hits: Vec<&GarmentRecord> = self
            .records
            .values()
            .filter(|r| query.map_or(true, |q| matches_query(r, q)))
            .filter(|r| tags.iter().all(|t| matches_tag(r, t)))
            .collect();

        sort_newest_first(&mut hits);
        hits
    }
}

/// カンマ区切りのタグ指定を分解
pub fn parse_tag_list(tags: &str) -> Vec<String> {
    tags.replace('，', ",")
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn matches_query(record: &GarmentRecord, query: &str) -> bool {
    contains_ignore_ascii_case(&record.filename, query) || matches_tag(record, query)
}

fn matches_tag(record: &GarmentRecord, tag: &str) -> bool {
    record.tags().any(|(_, value)| contains_ignore_ascii_case(value, tag))
        || contains_ignore_ascii_case(&record.ai_tags, tag)
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
