use crate::api::DEFAULT_API_URL;
use crate::utils::error::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 실행 설정 (`~/.fingerscanner/config.toml`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub preferences_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub page_size: u32,
    /// 로그 정리 시 남겨 둘 일수
    pub log_retention_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            preferences_file: None,
            log_file: None,
            page_size: Self::DEFAULT_PAGE_SIZE,
            log_retention_days: Self::DEFAULT_LOG_RETENTION_DAYS,
        }
    }
}

impl Config {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const DEFAULT_LOG_RETENTION_DAYS: u32 = 30;
    const CONFIG_ENV: &'static str = "FINGERSCANNER_CONFIG";
    const API_URL_ENV: &'static str = "FINGERSCANNER_API_URL";

    /// 설정 파일 + 환경변수 적용
    pub fn load() -> Result<Self> {
        Self::load_with(|key| env::var(key).ok())
    }

    /// 환경변수 조회를 주입받는 로더 (테스트용 분리)
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = non_empty(lookup(Self::CONFIG_ENV))
            .map(PathBuf::from)
            .or_else(|| app_dir().map(|dir| dir.join("config.toml")));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(url) = non_empty(lookup(Self::API_URL_ENV)) {
            config.api_base_url = url;
        }
        config.normalize();
        Ok(config)
    }

    /// 파일이 없으면 기본값
    pub fn from_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_str(&data)
                .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn from_toml_str(data: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(data)?;
        config.normalize();
        Ok(config)
    }

    fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if self.api_base_url.is_empty() {
            self.api_base_url = DEFAULT_API_URL.to_string();
        }
        self.page_size = self.page_size.max(1);
        self.log_retention_days = self.log_retention_days.max(1);
    }

    pub fn preferences_path(&self) -> Option<PathBuf> {
        self.preferences_file
            .clone()
            .or_else(|| app_dir().map(|dir| dir.join("preferences.toml")))
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| app_dir().map(|dir| dir.join("fingerscanner.log")))
    }
}

/// `~/.fingerscanner`
pub fn app_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fingerscanner"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.page_size, 10);
        assert!(config.preferences_file.is_none());
        assert_eq!(config.log_retention_days, 30);
    }

    #[test]
    fn test_parse_fields() {
        let config = Config::from_toml_str(
            r#"
            api_base_url = "https://scanner.example.com/"
            preferences_file = "/tmp/prefs.toml"
            page_size = 0
            log_retention_days = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://scanner.example.com");
        assert_eq!(
            config.preferences_path(),
            Some(PathBuf::from("/tmp/prefs.toml"))
        );
        assert_eq!(config.page_size, 1);
        assert_eq!(config.log_retention_days, 1);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base_url = \"http://file:5000\"\npage_size = 25\n").unwrap();
        let path_str = path.to_string_lossy().to_string();

        let config = Config::load_with(|key| match key {
            "FINGERSCANNER_CONFIG" => Some(path_str.clone()),
            "FINGERSCANNER_API_URL" => Some("http://env:8080".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.api_base_url, "http://env:8080");
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let path_str = path.to_string_lossy().to_string();

        let config = Config::load_with(|key| {
            (key == "FINGERSCANNER_CONFIG").then(|| path_str.clone())
        })
        .unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = \"ten\"").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
