//! フィールド名エイリアス
//!
//! AIの出力に現れるラベル（同義語を含む）を正規属性へ対応付ける。多対一。

use crate::vocabulary::Attribute;

/// 組み込みエイリアス表
pub(crate) const BUILTIN_ALIASES: &[(&str, Attribute)] = &[
    ("样式名称", Attribute::Style),
    ("样式", Attribute::Style),
    ("类型", Attribute::Style),
    ("风格", Attribute::Style),
    ("款式", Attribute::Style),
    ("颜色", Attribute::Color),
    ("主色调", Attribute::Color),
    ("色调", Attribute::Tone),
    ("色彩", Attribute::Tone),
    ("领", Attribute::Collar),
    ("领型", Attribute::Collar),
    ("领子", Attribute::Collar),
    ("袖", Attribute::Sleeve),
    ("袖型", Attribute::Sleeve),
    ("袖子", Attribute::Sleeve),
    ("版型", Attribute::Shape),
    ("形状", Attribute::Shape),
    ("轮廓", Attribute::Shape),
    ("长度", Attribute::Length),
    ("衣长", Attribute::Length),
    ("面料", Attribute::Fabric),
    ("材质", Attribute::Fabric),
    ("材料", Attribute::Fabric),
    ("图案", Attribute::Pattern),
    ("花纹", Attribute::Pattern),
    ("纹理", Attribute::Pattern),
    ("工艺", Attribute::Craft),
    ("制作工艺", Attribute::Craft),
    ("场合", Attribute::Occasion),
    ("适用场合", Attribute::Occasion),
    ("季节", Attribute::Season),
    ("适用季节", Attribute::Season),
    ("服装风格", Attribute::StyleType),
    ("风格类型", Attribute::StyleType),
];

/// 信頼度を表すラベル（属性ではないため別扱い）
pub(crate) const CONFIDENCE_LABELS: &[&str] = &["置信度", "可信度", "confidence"];
