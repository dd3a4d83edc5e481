use crate::error::{PatrolError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 保存先を上書きする環境変数
pub const STORE_ENV: &str = "SAFETY_PATROL_STORE";

/// ローカルストレージのキー名（保存ファイル名にも使う）
pub const STORE_KEY: &str = "construction-inspection-data";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// 点検データの保存先
    #[serde(default)]
    pub store_path: Option<PathBuf>,
    /// 報告書の出力先
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
    /// 位置情報取得コマンド（"緯度,経度" を標準出力に返すもの）
    #[serde(default)]
    pub geolocation_command: Option<String>,
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
            .ok_or_else(|| PatrolError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("safety-patrol").join("config.json"))
    }

    /// 保存先: 環境変数 > 設定ファイル > データディレクトリ
    pub fn resolved_store_path(&self) -> Result<PathBuf> {
        self.store_path_with_override(std::env::var(STORE_ENV).ok())
    }

    /// 環境変数の値を引数で受け取る版
    pub fn store_path_with_override(&self, env_value: Option<String>) -> Result<PathBuf> {
        if let Some(path) = env_value.filter(|p| !p.trim().is_empty()) {
            return Ok(PathBuf::from(path));
        }

        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }

        let data = dirs::data_dir()
            .ok_or_else(|| PatrolError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join("safety-patrol").join(format!("{}.json", STORE_KEY)))
    }

    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn set_store_path(&mut self, path: PathBuf) -> Result<()> {
        self.store_path = Some(path);
        self.save()
    }

    pub fn set_export_dir(&mut self, path: PathBuf) -> Result<()> {
        self.export_dir = Some(path);
        self.save()
    }

    pub fn set_geolocation_command(&mut self, command: String) -> Result<()> {
        self.geolocation_command = Some(command).filter(|c| !c.trim().is_empty());
        self.save()
    }
}
