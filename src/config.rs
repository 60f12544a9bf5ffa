use crate::error::{ClassifierError, Result};
use road_sign_common::DEFAULT_API_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 接続先URLを上書きする環境変数
pub const API_URL_ENV: &str = "ROAD_SIGN_API_URL";

/// 接続先URLの出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiUrlSource {
    Flag,
    Env,
    File,
    Default,
}

impl ApiUrlSource {
    pub fn label(&self) -> &'static str {
        match self {
            ApiUrlSource::Flag => "--api-url",
            ApiUrlSource::Env => API_URL_ENV,
            ApiUrlSource::File => "config file",
            ApiUrlSource::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ClassifierError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("road-sign").join("config.json"))
    }

    /// 実際に使う接続先URLとその出どころ（`--api-url` → 環境変数 → 設定ファイル → 既定値）
    pub fn resolve_api_url(&self, flag: Option<&str>) -> (String, ApiUrlSource) {
        if let Some(url) = flag.filter(|u| !u.trim().is_empty()) {
            return (url.to_string(), ApiUrlSource::Flag);
        }

        // 環境変数を優先
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                return (url, ApiUrlSource::Env);
            }
        }

        match &self.api_url {
            Some(url) => (url.clone(), ApiUrlSource::File),
            None => (DEFAULT_API_BASE_URL.to_string(), ApiUrlSource::Default),
        }
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClassifierError::Config(format!(
                "API URL must start with http:// or https://: {}",
                url
            )));
        }
        self.api_url = Some(url);
        Ok(())
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(ClassifierError::Config("timeout must be at least 1 second".into()));
        }
        self.timeout_seconds = seconds;
        Ok(())
    }
}
