//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::conversion::LoopCount;
use crate::domain::generation::ImageModel;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 图像生成服务配置
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// 图片转换配置
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// GC 配置
    #[serde(default)]
    pub gc: GcConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体上限（字节），需大于 conversion.max_input_bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 图像生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// 生成服务基础 URL
    #[serde(default = "default_generator_url")]
    pub base_url: String,

    /// 请求超时时间（秒），0 表示不超时
    #[serde(default = "default_generator_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_dimension")]
    pub width: u32,

    #[serde(default = "default_dimension")]
    pub height: u32,

    /// 未指定模型时使用
    /// 可选: flux, flux-pro, flux-cablyai
    #[serde(default)]
    pub default_model: ImageModel,
}

fn default_generator_url() -> String {
    "https://image.pollinations.ai".to_string()
}

fn default_generator_timeout() -> u64 {
    120
}

fn default_dimension() -> u32 {
    1024
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: default_generator_url(),
            timeout_secs: default_generator_timeout(),
            width: default_dimension(),
            height: default_dimension(),
            default_model: ImageModel::default(),
        }
    }
}

/// 图片转换配置
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    /// 输入大小上限（字节）
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,

    /// 输出大小上限（字节）
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: u64,

    /// 每帧显示时长（毫秒）
    #[serde(default = "default_frame_duration")]
    pub frame_duration_ms: u32,

    /// 循环次数，0 表示无限循环
    #[serde(default)]
    pub loop_count: u16,

    /// GIF 量化速度 1-30
    #[serde(default = "default_speed")]
    pub speed: i32,
}

fn default_max_input_bytes() -> u64 {
    8 * 1024 * 1024 // 8 MiB
}

fn default_max_output_bytes() -> u64 {
    10 * 1024 * 1024 // 10 MiB
}

fn default_frame_duration() -> u32 {
    100
}

fn default_speed() -> i32 {
    10
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            max_output_bytes: default_max_output_bytes(),
            frame_duration_ms: default_frame_duration(),
            loop_count: 0,
            speed: default_speed(),
        }
    }
}

impl ConversionConfig {
    pub fn repeat(&self) -> LoopCount {
        LoopCount::from_config(self.loop_count)
    }
}

/// GC（垃圾回收）配置
#[derive(Debug, Clone, Deserialize)]
pub struct GcConfig {
    /// 是否启用自动 GC
    #[serde(default = "default_gc_enabled")]
    pub enabled: bool,

    /// GC 间隔时间（秒）
    #[serde(default = "default_gc_interval")]
    pub interval_secs: u64,

    /// Session 过期时间（秒）
    #[serde(default = "default_session_expire")]
    pub session_expire_secs: u64,
}

fn default_gc_enabled() -> bool {
    true
}

fn default_gc_interval() -> u64 {
    3600 // 1 小时
}

fn default_session_expire() -> u64 {
    86400 // 24 小时
}

impl Default for GcConfig {
    fn default() -> Self {
        Self {
            enabled: default_gc_enabled(),
            interval_secs: default_gc_interval(),
            session_expire_secs: default_session_expire(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
