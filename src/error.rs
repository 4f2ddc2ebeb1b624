use thiserror::Error;

#[derive(Error, Debug)]
pub enum GarmentError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("対応していない画像形式です: {0}")]
    UnsupportedImage(String),

    #[error("レコードが見つかりません: ID {0}")]
    RecordNotFound(u64),

    #[error("カタログファイルが破損しています: {0}")]
    CatalogCorrupt(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] garment_tagger_common::Error),
}

pub type Result<T> = std::result::Result<T, GarmentError>;
