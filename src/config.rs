//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::expand::ExpandOptions;

/// 설정 파일 경로를 덮어쓰는 환경 변수
pub const CONFIG_ENV: &str = "KWEXPAND_CONFIG";

/// 설정 저장 실패
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("설정 파일 입출력 실패: {0}")]
    Io(#[from] std::io::Error),
    #[error("직렬화 실패: {0}")]
    Json(#[from] serde_json::Error),
}

/// kwexpand 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct AppConfig {
    /// 확장 드라이버 설정
    #[serde(default)]
    pub expand: ExpandOptions,
    /// 자동완성 응답 JSON 파일 (CLI 기본값)
    #[serde(default)]
    pub fixture_path: Option<String>,
}

/// 설정 파일 경로: $KWEXPAND_CONFIG 또는 ~/.config/kwexpand/config.json
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| {
            // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
            PathBuf::from("/var/tmp")
        });
    home.join(".config").join("kwexpand").join("config.json")
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("설정 파일 파싱 실패, 기본값 사용: {}", e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::{Compose, Normalization};

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.expand.delay_ms, 50);
        assert_eq!(config.expand.batch_size, 1);
        assert!(config.fixture_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = AppConfig {
            expand: ExpandOptions::google()
                .with_compose(Compose::Suffix)
                .with_normalization(Normalization::LowercaseNoWhitespace),
            fixture_path: Some("fixture.json".to_string()),
        };
        save_config_to(&config, &path).unwrap();

        assert_eq!(load_config_from(&path), config);
    }

    #[test]
    fn test_backward_compat_missing_field() {
        // 이전 설정 파일에 expand 항목이 일부만 있는 경우 기본값 사용
        let json = r#"{"expand": {"delay_ms": 20}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.expand.delay_ms, 20);
        assert_eq!(config.expand.batch_size, 1);
        assert!(config.fixture_path.is_none());
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_config_from(&path), AppConfig::default());

        assert_eq!(
            load_config_from(&dir.path().join("missing.json")),
            AppConfig::default()
        );
    }
}
