use crate::error::{GarmentError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// カタログ保存先を上書きする環境変数
pub const HOME_ENV: &str = "GARMENT_TAGGER_HOME";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// カタログ（レコードJSONと画像）の保存先
    pub catalog_dir: Option<PathBuf>,
    /// カスタムタグライブラリ（JSON）
    pub library_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GarmentError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("garment-tagger").join("config.json"))
    }

    /// カタログ保存先を決定する
    ///
    /// 優先順位: 環境変数 → 設定ファイル → `~/.local/share/garment-tagger`
    pub fn catalog_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = &self.catalog_dir {
            return Ok(dir.clone());
        }

        let data = dirs::data_dir()
            .ok_or_else(|| GarmentError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join("garment-tagger"))
    }

    pub fn set_catalog_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.catalog_dir = Some(dir);
        self.save()
    }

    pub fn set_library_path(&mut self, path: PathBuf) -> Result<()> {
        if !path.exists() {
            return Err(GarmentError::FileNotFound(path.display().to_string()));
        }
        self.library_path = Some(path);
        self.save()
    }
}
