//! 衣類レコードの型定義
//!
//! - GarmentRecord: アップロード1件ごとのレコード（13属性 + メタデータ）
//! - TagEdit: 手動編集（指定した属性のみ上書き）

use crate::extractor::ExtractedTagSet;
use crate::vocabulary::Attribute;
use serde::{Deserialize, Serialize};

/// 抽出できなかった属性の既定値（"unrecognized" とは区別する）
pub const UNKNOWN: &str = "unknown";

/// AI出力が得られなかった場合に保存する文字列
pub const AI_TAGS_MISSING: &str = "AI标签识别失败";

/// 衣類レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarmentRecord {
    pub id: u64,
    pub filename: String,
    /// アップロード日時（RFC 3339）
    pub upload_time: String,

    pub style: String,
    pub color: String,
    pub tone: String,
    pub collar: String,
    pub sleeve: String,
    pub shape: String,
    pub length: String,
    pub fabric: String,
    pub pattern: String,
    pub craft: String,
    pub occasion: String,
    pub season: String,
    pub style_type: String,

    /// AIの生出力（診断用）
    pub ai_tags: String,
    #[serde(default)]
    pub confidence: f64,
}

impl GarmentRecord {
    /// 抽出結果からレコードを作成（見つからない属性は "unknown"）
    ///
    /// idはカタログ登録時に採番される。
    pub fn from_tags(
        filename: impl Into<String>,
        upload_time: impl Into<String>,
        tags: &ExtractedTagSet,
        ai_tags: Option<&str>,
        confidence: f64,
    ) -> Self {
        let mut record = Self {
            id: 0,
            filename: filename.into(),
            upload_time: upload_time.into(),
            style: String::new(),
            color: String::new(),
            tone: String::new(),
            collar: String::new(),
            sleeve: String::new(),
            shape: String::new(),
            length: String::new(),
            fabric: String::new(),
            pattern: String::new(),
            craft: String::new(),
            occasion: String::new(),
            season: String::new(),
            style_type: String::new(),
            ai_tags: ai_tags
                .filter(|t| !t.is_empty())
                .unwrap_or(AI_TAGS_MISSING)
                .to_string(),
            confidence,
        };

        for attribute in Attribute::ALL {
            *record.field_mut(attribute) = tags.get_or(attribute, UNKNOWN).to_string();
        }

        record
    }

    pub fn field(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Style => &self.style,
            Attribute::Color => &self.color,
            Attribute::Tone => &self.tone,
            Attribute::Collar => &self.collar,
            Attribute::Sleeve => &self.sleeve,
            Attribute::Shape => &self.shape,
            Attribute::Length => &self.length,
            Attribute::Fabric => &self.fabric,
            Attribute::Pattern => &self.pattern,
            Attribute::Craft => &self.craft,
            Attribute::Occasion => &self.occasion,
            Attribute::Season => &self.season,
            Attribute::StyleType => &self.style_type,
        }
    }

    pub fn field_mut(&mut self, attribute: Attribute) -> &mut String {
        match attribute {
            Attribute::Style => &mut self.style,
            Attribute::Color => &mut self.color,
            Attribute::Tone => &mut self.tone,
            Attribute::Collar => &mut self.collar,
            Attribute::Sleeve => &mut self.sleeve,
            Attribute::Shape => &mut self.shape,
            Attribute::Length => &mut self.length,
            Attribute::Fabric => &mut self.fabric,
            Attribute::Pattern => &mut self.pattern,
            Attribute::Craft => &mut self.craft,
            Attribute::Occasion => &mut self.occasion,
            Attribute::Season => &mut self.season,
            Attribute::StyleType => &mut self.style_type,
        }
    }

    /// 13属性を列順に返す
    pub fn tags(&self) -> impl Iterator<Item = (Attribute, &str)> {
        Attribute::ALL.into_iter().map(move |a| (a, self.field(a)))
    }

    /// 手動編集を適用（語彙照合は行わない）
    pub fn apply_edit(&mut self, edit: &TagEdit) {
        for (attribute, value) in edit.iter() {
            *self.field_mut(attribute) = value.to_string();
        }
    }
}

/// 手動編集の内容
///
/// `Some` の属性だけ上書きする。値は自由入力のまま保存される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagEdit {
    pub style: Option<String>,
    pub color: Option<String>,
    pub tone: Option<String>,
    pub collar: Option<String>,
    pub sleeve: Option<String>,
    pub shape: Option<String>,
    pub length: Option<String>,
    pub fabric: Option<String>,
    pub pattern: Option<String>,
    pub craft: Option<String>,
    pub occasion: Option<String>,
    pub season: Option<String>,
    pub style_type: Option<String>,
}

impl TagEdit {
    fn get(&self, attribute: Attribute) -> Option<&str> {
        let value = match attribute {
            Attribute::Style => &self.style,
            Attribute::Color => &self.color,
            Attribute::Tone => &self.tone,
            Attribute::Collar => &self.collar,
            Attribute::Sleeve => &self.sleeve,
            Attribute::Shape => &self.shape,
            Attribute::Length => &self.length,
            Attribute::Fabric => &self.fabric,
            Attribute::Pattern => &self.pattern,
            Attribute::Craft => &self.craft,
            Attribute::Occasion => &self.occasion,
            Attribute::Season => &self.season,
            Attribute::StyleType => &self.style_type,
        };
        value.as_deref()
    }

    /// 指定された属性と値
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &str)> {
        Attribute::ALL
            .into_iter()
            .filter_map(move |a| self.get(a).map(|v| (a, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract;

    #[test]
    fn test_from_tags_defaults_unknown() {
        let raw = "颜色：红色，袖型：喇叭";
        let record =
            GarmentRecord::from_tags("shirt.jpg", "2026-01-01T00:00:00Z", &extract(raw), Some(raw), 0.0);

        assert_eq!(record.color, "红色");
        assert_eq!(record.sleeve, "喇叭袖");
        assert_eq!(record.style, UNKNOWN);
        assert_eq!(record.style_type, UNKNOWN);
        assert_eq!(record.ai_tags, "颜色：红色，袖型：喇叭");
    }

    #[test]
    fn test_from_tags_without_ai_output() {
        let tags = ExtractedTagSet::new();
        let record = GarmentRecord::from_tags("a.png", "2026-01-01T00:00:00Z", &tags, None, 0.0);
        assert_eq!(record.ai_tags, AI_TAGS_MISSING);
        assert!(record.tags().all(|(_, v)| v == UNKNOWN));
    }

    #[test]
    fn test_apply_edit_partial_without_validation() {
        let tags = extract("颜色：红色，领型：圆领");
        let mut record = GarmentRecord::from_tags("a.png", "2026-01-01T00:00:00Z", &tags, None, 0.0);
        let edit = TagEdit {
            color: Some("藏青色".to_string()),
            ..Default::default()
        };
        record.apply_edit(&edit);

        assert_eq!(record.color, "藏青色");
        assert_eq!(record.collar, "圆领");
    }

    #[test]
    fn test_tag_edit_is_empty() {
        assert!(TagEdit::default().is_empty());
        let edit = TagEdit {
            season: Some("秋冬".to_string()),
            ..Default::default()
        };
        assert!(!edit.is_empty());
        assert_eq!(edit.iter().collect::<Vec<_>>(), vec![(Attribute::Season, "秋冬")]);
    }
}
