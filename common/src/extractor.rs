//! タグ抽出エンジン
//!
//! AIの出力テキストを「属性 → 検証済みタグ」のマップに変換する。
//! 入力が壊れていてもエラーにはせず、空または部分的な結果を返す。
//!
//! ## 処理フロー
//! 1. JSONラッパーの除去
//! 2. 正規表現でペア抽出（0件ならカンマ分割）
//! 3. ラベル → 属性の変換と語彙照合
//! 4. 結果が空で元テキストに全角コロンがあれば、元テキストを再分割

use crate::alias::CONFIDENCE_LABELS;
use crate::library::TagLibrary;
use crate::parser::{extract_pairs, split_pairs, split_pairs_full_width, unwrap_envelope, RawPair};
use crate::vocabulary::Attribute;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 抽出結果（属性 → 語彙の値 または "unrecognized"）
///
/// 見つからなかった属性は含まれない。既定値の補完は呼び出し側の責務。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedTagSet(BTreeMap<Attribute, String>);

impl ExtractedTagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.0.get(&attribute).map(String::as_str)
    }

    /// 値を設定（同じ属性は後勝ち）
    pub fn insert(&mut self, attribute: Attribute, value: String) {
        self.0.insert(attribute, value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &str)> {
        self.0.iter().map(|(a, v)| (*a, v.as_str()))
    }

    /// 属性が見つからない場合は既定値を返す
    pub fn get_or<'a>(&'a self, attribute: Attribute, default: &'a str) -> &'a str {
        self.get(attribute).unwrap_or(default)
    }
}

/// タグ抽出器
///
/// 不変のタグライブラリを借用するだけなので、複数スレッドから同時に使用できる。
#[derive(Debug, Clone, Copy)]
pub struct TagExtractor<'a> {
    library: &'a TagLibrary,
}

impl Default for TagExtractor<'static> {
    fn default() -> Self {
        Self::new(TagLibrary::builtin())
    }
}

impl<'a> TagExtractor<'a> {
    pub fn new(library: &'a TagLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &'a TagLibrary {
        self.library
    }

    /// AI出力からタグを抽出する
    ///
    /// # Examples
    /// ```
    /// use garment_tagger_common::{Attribute, TagExtractor};
    ///
    /// let tags = TagExtractor::default().extract("颜色：红色，袖型：七分");
    /// assert_eq!(tags.get(Attribute::Color), Some("红色"));
    /// assert_eq!(tags.get(Attribute::Sleeve), Some("七分袖"));
    /// ```
    pub fn extract(&self, raw_output: &str) -> ExtractedTagSet {
        let text = unwrap_envelope(raw_output);

        let mut pairs = extract_pairs(text);
        if pairs.is_empty() {
            tracing::debug!("正規表現で抽出できず、カンマ分割を使用");
            pairs = split_pairs(text);
        }

        let mut tags = ExtractedTagSet::new();
        self.apply_pairs(&pairs, &mut tags);

        if tags.is_empty() && raw_output.contains('：') {
            tracing::debug!("予備の分割方法で元テキストを再解析");
            self.apply_pairs(&split_pairs_full_width(raw_output), &mut tags);
        }

        tracing::debug!(count = tags.len(), "タグ抽出完了");
        tags
    }

    fn apply_pairs(&self, pairs: &[RawPair], tags: &mut ExtractedTagSet) {
        for (label, value) in pairs {
            let label = label.trim();
            let value = value.trim();

            match self.library.resolve_label(label) {
                Some(attribute) => {
                    let validated = self.library.validate(attribute.as_str(), value);
                    tracing::debug!(label, value, %attribute, tag = %validated, "タグ照合");
                    tags.insert(attribute, validated);
                }
                None => tracing::debug!(label, value, "未知のラベル"),
            }
        }
    }
}

/// 組み込みライブラリでタグを抽出する
pub fn extract(raw_output: &str) -> ExtractedTagSet {
    TagExtractor::default().extract(raw_output)
}

/// AI出力から信頼度を読み取る
///
/// `置信度`/`可信度`/`confidence` ラベルの数値を 0.0〜1.0 に丸めて返す。
/// `%` 付きは百分率として扱う。見つからない・読めない場合は 0.0。
pub fn extract_confidence(raw_output: &str) -> f64 {
    let text = unwrap_envelope(raw_output);
    let mut pairs = extract_pairs(text);
    if pairs.is_empty() {
        pairs = split_pairs(text);
    }

    pairs
        .iter()
        .rev()
        .find(|(label, _)| CONFIDENCE_LABELS.contains(&label.trim()))
        .and_then(|(_, value)| parse_confidence(value))
        .unwrap_or(0.0)
}

fn parse_confidence(value: &str) -> Option<f64> {
    let value = value.trim();
    let parsed = match value.strip_suffix('%') {
        Some(percent) => percent.trim().parse::<f64>().ok()? / 100.0,
        None => value.parse::<f64>().ok()?,
    };

    if parsed.is_finite() {
        Some(parsed.clamp(0.0, 1.0))
    } else {
        None
    }
}
