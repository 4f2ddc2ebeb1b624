//! タグライブラリ
//!
//! 標準語彙とエイリアス表をまとめたもの。組み込みライブラリはプロセス全体で共有され、
//! カスタムライブラリは起動時にJSONから読み込んだあと変更しない。

use crate::alias::BUILTIN_ALIASES;
use crate::error::{Error, Result};
use crate::validator::{clean_value, match_vocabulary, UNRECOGNIZED};
use crate::vocabulary::{Attribute, BUILTIN_VOCABULARY};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

lazy_static! {
    static ref BUILTIN: TagLibrary = TagLibrary::build_builtin();
}

/// 語彙 + エイリアス表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagLibrary {
    /// 属性 → 許容値（定義順）
    #[serde(default)]
    pub vocabulary: BTreeMap<Attribute, Vec<String>>,
    /// ラベル → 属性
    #[serde(default)]
    pub aliases: HashMap<String, Attribute>,
}

impl TagLibrary {
    /// 組み込みライブラリ
    pub fn builtin() -> &'static TagLibrary {
        &BUILTIN
    }

    fn build_builtin() -> Self {
        let vocabulary = BUILTIN_VOCABULARY
            .iter()
            .map(|(attribute, values)| {
                (*attribute, values.iter().map(|v| v.to_string()).collect())
            })
            .collect();
        let aliases = BUILTIN_ALIASES
            .iter()
            .map(|(label, attribute)| (label.to_string(), *attribute))
            .collect();
        Self { vocabulary, aliases }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// 空の語彙リストは照合対象がなくなるため設定エラーとする。
    pub fn from_json(json: &str) -> Result<Self> {
        let library: Self = serde_json::from_str(json)?;
        if let Some((attribute, _)) = library.vocabulary.iter().find(|(_, v)| v.is_empty()) {
            return Err(Error::Config(format!("語彙が空です: {}", attribute)));
        }
        Ok(library)
    }

    /// 組み込みライブラリにカスタム定義を重ねたもの
    pub fn builtin_with(custom: &TagLibrary) -> Self {
        let mut library = Self::builtin().clone();
        library.merge(custom);
        library
    }

    /// 設定をマージ（語彙は属性単位で置換、エイリアスは追加・上書き）
    pub fn merge(&mut self, other: &TagLibrary) {
        self.vocabulary.extend(other.vocabulary.clone());
        self.aliases.extend(other.aliases.clone());
    }

    /// ラベルを属性に変換
    pub fn resolve_label(&self, label: &str) -> Option<Attribute> {
        self.aliases.get(label).copied()
    }

    /// 属性の許容値
    pub fn allowed_values(&self, attribute: Attribute) -> Option<&[String]> {
        self.vocabulary.get(&attribute).map(|v| v.as_slice())
    }

    /// 値を検証して標準タグに変換する
    ///
    /// 語彙のない属性名、または一致しない値は `"unrecognized"` を返す。
    pub fn validate(&self, attribute: &str, raw_value: &str) -> String {
        let cleaned = clean_value(raw_value);

        let allowed = match attribute
            .parse::<Attribute>()
            .ok()
            .and_then(|a| self.allowed_values(a))
        {
            Some(allowed) => allowed,
            None => {
                tracing::debug!(attribute, "語彙のない属性");
                return UNRECOGNIZED.to_string();
            }
        };

        match match_vocabulary(allowed, &cleaned) {
            Some(tag) => tag.to_string(),
            None => {
                tracing::debug!(attribute, value = %cleaned, "語彙に一致しない値");
                UNRECOGNIZED.to_string()
            }
        }
    }
}

/// 組み込みライブラリで値を検証する
pub fn validate(attribute: &str, raw_value: &str) -> String {
    TagLibrary::builtin().validate(attribute, raw_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_idempotent_for_all_terms() {
        let library = TagLibrary::builtin();
        for (attribute, values) in &library.vocabulary {
            for value in values {
                assert_eq!(&library.validate(attribute.as_str(), value), value);
            }
        }
    }

    #[test]
    fn test_validate_unknown_attribute() {
        assert_eq!(validate("brand", "红色"), UNRECOGNIZED);
        assert_eq!(validate("", ""), UNRECOGNIZED);
        assert_eq!(validate("Color", "红色"), UNRECOGNIZED);
    }

    #[test]
    fn test_validate_noisy_input() {
        assert_eq!(validate("collar", " 一\u{200B}字 \u{FEFF}领 "), "一字领");
        assert_eq!(validate("season", "四 季 通 用"), "四季通用");
    }

    #[test]
    fn test_validate_unmatched() {
        assert_eq!(validate("color", "荧光绿"), UNRECOGNIZED);
    }

    #[test]
    fn test_resolve_label() {
        let library = TagLibrary::builtin();
        assert_eq!(library.resolve_label("主色调"), Some(Attribute::Color));
        assert_eq!(library.resolve_label("服装风格"), Some(Attribute::StyleType));
        assert_eq!(library.resolve_label("品牌"), None);
    }

    #[test]
    fn test_from_json_and_merge() {
        let json = r#"{
            "vocabulary": {"color": ["藏青色", "米白色"]},
            "aliases": {"配色": "color"}
        }"#;
        let custom = TagLibrary::from_json(json).unwrap();
        let library = TagLibrary::builtin_with(&custom);

        assert_eq!(library.resolve_label("配色"), Some(Attribute::Color));
        assert_eq!(library.resolve_label("颜色"), Some(Attribute::Color));
        assert_eq!(library.validate("color", "藏青"), "藏青色");
        // 語彙は置換されるため旧語彙は一致しない
        assert_eq!(library.validate("color", "红色"), UNRECOGNIZED);
        // 他の属性は組み込みのまま
        assert_eq!(library.validate("sleeve", "短袖"), "短袖");
    }

    #[test]
    fn test_from_json_unknown_attribute() {
        let json = r#"{"vocabulary": {"sleeves": ["长袖"]}}"#;
        assert!(matches!(TagLibrary::from_json(json), Err(Error::Json(_))));
    }

    #[test]
    fn test_from_json_empty_vocabulary() {
        let json = r#"{"vocabulary": {"craft": []}}"#;
        assert!(matches!(TagLibrary::from_json(json), Err(Error::Config(_))));
    }

    #[test]
    fn test_attribute_without_vocabulary_is_unrecognized() {
        let mut library = TagLibrary::builtin().clone();
        library.vocabulary.remove(&Attribute::Craft);
        assert_eq!(library.validate("craft", "拉链"), UNRECOGNIZED);
    }
}
