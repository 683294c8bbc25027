//! 触发工具运行配置加载。

use domain::RelayNumber;
use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 单次触发的运行配置。
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub brand: String,
    pub host: String,
    pub port: u16,
    pub relay_number: Option<RelayNumber>,
    pub duration: Option<u32>,
    pub http_timeout_seconds: u64,
}

impl RelayConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let brand = read_required("RELAY_BRAND")?;
        let host = read_required("RELAY_HOST")?;
        let port = read_u16("RELAY_PORT")?;
        let relay_number = match read_optional("RELAY_NUMBER") {
            Some(value) => Some(
                value
                    .parse::<RelayNumber>()
                    .map_err(|_| ConfigError::Invalid("RELAY_NUMBER".to_string(), value))?,
            ),
            None => None,
        };
        let duration = read_optional_u32("RELAY_DURATION")?;
        let http_timeout_seconds = read_u64_with_default("RELAY_HTTP_TIMEOUT_SECONDS", 30)?;
        if http_timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "RELAY_HTTP_TIMEOUT_SECONDS".to_string(),
                "0".to_string(),
            ));
        }

        Ok(Self {
            brand,
            host,
            port,
            relay_number,
            duration,
            http_timeout_seconds,
        })
    }
}

fn read_required(key: &str) -> Result<String, ConfigError> {
    read_optional(key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

/// 读取 u16 类型环境变量。
fn read_u16(key: &str) -> Result<u16, ConfigError> {
    let value = read_required(key)?;
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match read_optional(key) {
        Some(value) => value,
        None => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

fn read_optional_u32(key: &str) -> Result<Option<u32>, ConfigError> {
    match read_optional(key) {
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key.to_string(), value)),
        None => Ok(None),
    }
}
