use crate::error::{ConsoleError, Result};
use pedimento_console_common::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const TOKEN_ENV: &str = "PEDIMENTO_API_TOKEN";
pub const API_URL_ENV: &str = "PEDIMENTO_API_URL";
pub const SERVICE_URL_ENV: &str = "PEDIMENTO_SERVICE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 一覧APIのベースURL
    pub api_base_url: String,
    /// 一覧リソースのパス
    pub resource: String,
    /// 実行マイクロサービスのベースURL
    pub microservice_base_url: String,
    pub page_size: u32,
    pub timeout_seconds: u64,
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".into(),
            resource: "customs/procesamientopedimentos/".into(),
            microservice_base_url: "http://localhost:8001".into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: 30,
            token: None,
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
            config.validate()?;
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
            .ok_or_else(|| ConsoleError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("pedimento-console").join("config.json"))
    }

    /// 環境変数のURL指定を優先した実効設定（トークンはリクエスト時に読む）
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(url) = std::env::var(SERVICE_URL_ENV) {
            if !url.trim().is_empty() {
                self.microservice_base_url = url;
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ConsoleError::Config("page_size は1以上を指定してください".into()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConsoleError::Config("api_base_url が空です".into()));
        }
        if self.microservice_base_url.trim().is_empty() {
            return Err(ConsoleError::Config("microservice_base_url が空です".into()));
        }
        Ok(())
    }

    pub fn set_token(&mut self, token: Option<String>) -> Result<()> {
        self.token = token.filter(|t| !t.trim().is_empty());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            page_size: 25,
            token: Some("abc".into()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.page_size, 25);
        assert_eq!(loaded.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"page_size": 12}"#).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.page_size, 12);
        assert_eq!(loaded.timeout_seconds, 30);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"page_size": 0}"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConsoleError::Config(_))));
    }
}
