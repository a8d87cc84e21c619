//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `IMAGEBOT_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `IMAGEBOT_SERVER__PORT=8080`
/// - `IMAGEBOT_GENERATOR__BASE_URL=http://localhost:9000`
/// - `IMAGEBOT_GENERATOR__DEFAULT_MODEL=flux-pro`
/// - `IMAGEBOT_CONVERSION__MAX_INPUT_BYTES=4194304`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("server.max_body_bytes", 16 * 1024 * 1024)?
        .set_default("generator.base_url", "https://image.pollinations.ai")?
        .set_default("generator.timeout_secs", 120)?
        .set_default("generator.width", 1024)?
        .set_default("generator.height", 1024)?
        .set_default("generator.default_model", "flux")?
        .set_default("conversion.max_input_bytes", 8 * 1024 * 1024)?
        .set_default("conversion.max_output_bytes", 10 * 1024 * 1024)?
        .set_default("conversion.frame_duration_ms", 100)?
        .set_default("conversion.loop_count", 0)?
        .set_default("conversion.speed", 10)?
        .set_default("gc.enabled", true)?
        .set_default("gc.interval_secs", 3600)?
        .set_default("gc.session_expire_secs", 86400)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级），变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("IMAGEBOT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.generator.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Generator base URL cannot be empty".to_string(),
        ));
    }

    if config.conversion.max_input_bytes == 0 || config.conversion.max_output_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "Conversion size limits cannot be 0".to_string(),
        ));
    }

    if config.conversion.frame_duration_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Frame duration cannot be 0".to_string(),
        ));
    }

    if !(1..=30).contains(&config.conversion.speed) {
        return Err(ConfigError::ValidationError(format!(
            "GIF speed must be within 1..=30, got {}",
            config.conversion.speed
        )));
    }

    // multipart 开销之外还要能容纳整张输入图
    if (config.server.max_body_bytes as u64) < config.conversion.max_input_bytes {
        return Err(ConfigError::ValidationError(format!(
            "server.max_body_bytes ({}) is smaller than conversion.max_input_bytes ({})",
            config.server.max_body_bytes, config.conversion.max_input_bytes
        )));
    }

    if config.gc.enabled && config.gc.interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "GC interval cannot be 0 when GC is enabled".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Max Body: {} bytes", config.server.max_body_bytes);
    tracing::info!("Generator URL: {}", config.generator.base_url);
    tracing::info!("Generator Timeout: {}s", config.generator.timeout_secs);
    tracing::info!(
        "Generator Size: {}x{}",
        config.generator.width,
        config.generator.height
    );
    tracing::info!("Default Model: {}", config.generator.default_model);
    tracing::info!(
        "Conversion Limits: input {} bytes, output {} bytes",
        config.conversion.max_input_bytes,
        config.conversion.max_output_bytes
    );
    tracing::info!("Frame Duration: {}ms", config.conversion.frame_duration_ms);
    tracing::info!("GC Enabled: {}", config.gc.enabled);
    if config.gc.enabled {
        tracing::info!("GC Interval: {}s", config.gc.interval_secs);
        tracing::info!("Session Expire: {}s", config.gc.session_expire_secs);
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::ImageModel;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_generator_url() {
        let mut config = AppConfig::default();
        config.generator.base_url = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_frame_duration() {
        let mut config = AppConfig::default();
        config.conversion.frame_duration_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_body_limit_below_input_limit() {
        let mut config = AppConfig::default();
        config.server.max_body_bytes = 1024;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[server]
port = 8088

[generator]
base_url = "http://localhost:9000"
default_model = "flux-pro"
timeout_secs = 0

[conversion]
max_input_bytes = 1048576
frame_duration_ms = 250
loop_count = 2
"#,
        );

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.generator.base_url, "http://localhost:9000");
        assert_eq!(config.generator.default_model, ImageModel::FluxPro);
        assert_eq!(config.generator.timeout_secs, 0);
        assert_eq!(config.conversion.max_input_bytes, 1024 * 1024);
        assert_eq!(config.conversion.frame_duration_ms, 250);
        assert_eq!(config.conversion.loop_count, 2);
        // 未写入文件的项保持默认值
        assert_eq!(config.conversion.max_output_bytes, 10 * 1024 * 1024);
        assert_eq!(config.gc.session_expire_secs, 86400);
    }

    #[test]
    fn test_load_rejects_unknown_model() {
        let file = write_config("[generator]\ndefault_model = \"dall-e\"\n");
        assert!(matches!(
            load_config_from_path(Some(file.path())),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let file = write_config("[conversion]\nframe_duration_ms = 0\n");
        assert!(matches!(
            load_config_from_path(Some(file.path())),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
