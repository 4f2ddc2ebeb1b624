//! AI出力パーサー
//!
//! AIワークフローの出力テキストから「ラベル：値」のペアを取り出す。
//! 出力形式は安定しないため、以下を吸収する:
//! - `{"output":"..."}` 形式のJSONラッパー
//! - 全角/半角のコロン・カンマの混在

use lazy_static::lazy_static;
use regex::Regex;

/// JSONラッパーの先頭
const ENVELOPE_PREFIX: &str = r#"{"output":""#;
/// JSONラッパーの末尾
const ENVELOPE_SUFFIX: &str = r#""}"#;

lazy_static! {
    // ラベルはコロン・カンマを含まない、値はカンマを含まない
    static ref PAIR_RE: Regex = Regex::new(r"([^：:,，]+?)[:：]([^,，]+)").unwrap();
}

/// ラベルと値の組（未トリム）
pub type RawPair = (String, String);

/// `{"output":"..."}` ラッパーを外す
///
/// 先頭がラッパーでなければ入力をそのまま返す。閉じ記号がなければ残り全体を返す。
///
/// # Examples
/// ```
/// use garment_tagger_common::unwrap_envelope;
///
/// assert_eq!(unwrap_envelope(r#"{"output":"颜色：红色"}"#), "颜色：红色");
/// assert_eq!(unwrap_envelope("颜色：红色"), "颜色：红色");
/// ```
pub fn unwrap_envelope(text: &str) -> &str {
    let Some(rest) = text.strip_prefix(ENVELOPE_PREFIX) else {
        return text;
    };

    match rest.rfind(ENVELOPE_SUFFIX) {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// 正規表現でペアを抽出（主戦略）
pub fn extract_pairs(text: &str) -> Vec<RawPair> {
    PAIR_RE
        .captures_iter(text)
        .map(|cap| (cap[1].to_string(), cap[2].to_string()))
        .collect()
}

/// カンマ分割でペアを抽出（代替戦略）
///
/// 各区切りを最初の全角コロン、なければ最初の半角コロンで分割する。
/// コロンのない区切りは捨てる。
pub fn split_pairs(text: &str) -> Vec<RawPair> {
    split_segments(text, &['：', ':'])
}

/// 全角コロンのみでペアを抽出（最終手段）
pub fn split_pairs_full_width(text: &str) -> Vec<RawPair> {
    split_segments(text, &['：'])
}

fn split_segments(text: &str, colons: &[char]) -> Vec<RawPair> {
    text.replace('，', ",")
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            colons
                .iter()
                .find_map(|colon| segment.split_once(*colon))
                .map(|(label, value)| (label.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
