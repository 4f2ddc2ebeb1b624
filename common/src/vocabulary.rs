//! 属性と標準タグ語彙
//!
//! 衣類を記述する13の属性と、属性ごとの許容値（順序付き）を定義する。
//! 語彙の順序は照合時の優先順位になる。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 正規属性（13次元）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Style,
    Color,
    Tone,
    Collar,
    Sleeve,
    Shape,
    Length,
    Fabric,
    Pattern,
    Craft,
    Occasion,
    Season,
    StyleType,
}

impl Attribute {
    /// 全属性（レコードの列順）
    pub const ALL: [Attribute; 13] = [
        Attribute::Style,
        Attribute::Color,
        Attribute::Tone,
        Attribute::Collar,
        Attribute::Sleeve,
        Attribute::Shape,
        Attribute::Length,
        Attribute::Fabric,
        Attribute::Pattern,
        Attribute::Craft,
        Attribute::Occasion,
        Attribute::Season,
        Attribute::StyleType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Style => "style",
            Attribute::Color => "color",
            Attribute::Tone => "tone",
            Attribute::Collar => "collar",
            Attribute::Sleeve => "sleeve",
            Attribute::Shape => "shape",
            Attribute::Length => "length",
            Attribute::Fabric => "fabric",
            Attribute::Pattern => "pattern",
            Attribute::Craft => "craft",
            Attribute::Occasion => "occasion",
            Attribute::Season => "season",
            Attribute::StyleType => "style_type",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| format!("Unknown attribute: {}", s))
    }
}

/// 組み込み語彙
pub(crate) const BUILTIN_VOCABULARY: &[(Attribute, &[&str])] = &[
    (Attribute::Style, &["衬衫", "T恤", "连衣裙", "裤子", "裙子", "外套", "毛衣"]),
    (
        Attribute::Color,
        &["红色", "蓝色", "白色", "黑色", "灰色", "绿色", "黄色", "紫色", "粉色", "棕色"],
    ),
    (Attribute::Tone, &["浅色调", "深色调", "中性色调", "亮色调"]),
    (
        Attribute::Collar,
        &["圆领", "V领", "高领", "翻领", "立领", "一字领", "方领", "心形领", "无领"],
    ),
    (
        Attribute::Sleeve,
        &["长袖", "短袖", "无袖", "七分袖", "五分袖", "泡泡袖", "喇叭袖", "紧身袖"],
    ),
    (Attribute::Shape, &["修身", "宽松", "直筒", "A字型", "H型", "X型", "合身"]),
    (Attribute::Length, &["超短", "短款", "中长款", "长款", "及膝", "及踝"]),
    (
        Attribute::Fabric,
        &["棉质", "丝质", "麻质", "毛料", "化纤", "混纺", "牛仔", "皮革", "针织"],
    ),
    (Attribute::Pattern, &["纯色", "条纹", "格子", "印花", "刺绣", "蕾丝", "网纱"]),
    // "无" は1文字のため部分一致で多くの入力を拾う（末尾に置いて優先度を下げている）
    (Attribute::Craft, &["拼接", "褶皱", "抽绳", "拉链", "纽扣", "系带", "无"]),
    (
        Attribute::Occasion,
        &["休闲", "正式", "运动", "居家", "派对", "职场", "度假", "万圣节"],
    ),
    (
        Attribute::Season,
        &["春季", "夏季", "秋季", "冬季", "四季通用", "秋冬", "春夏"],
    ),
    (
        Attribute::StyleType,
        &["简约", "复古", "甜美", "帅气", "优雅", "个性", "时尚", "可爱"],
    ),
];
