//! Garment Tagger Common Library
//!
//! AI出力から衣類タグを抽出・検証するコアと、CLIで共有される型

pub mod vocabulary;
pub mod alias;
pub mod library;
pub mod validator;
pub mod parser;
pub mod extractor;
pub mod types;
pub mod error;

pub use vocabulary::Attribute;
pub use library::{validate, TagLibrary};
pub use validator::UNRECOGNIZED;
pub use parser::unwrap_envelope;
pub use extractor::{extract, extract_confidence, ExtractedTagSet, TagExtractor};
pub use types::{GarmentRecord, TagEdit, AI_TAGS_MISSING, UNKNOWN};
pub use error::{Error, Result};
