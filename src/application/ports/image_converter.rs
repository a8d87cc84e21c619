//! Image Converter Port - 图片转 GIF 抽象
//!
//! 定义转换流水线的抽象接口：校验 -> 解码 -> RGBA 归一化 -> 编码 -> 大小检查

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::conversion::ConversionJob;

/// 转换错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unsupported content type: {}", .0.as_deref().unwrap_or("unknown"))]
    UnsupportedContentType(Option<String>),

    #[error("Input too large: {size} bytes (limit {limit} bytes)")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Could not encode GIF: {0}")]
    Encode(String),

    #[error("Output too large: {size} bytes (limit {limit} bytes)")]
    OutputTooLarge { size: u64, limit: u64 },
}

/// 转换结果
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    /// GIF 数据
    pub data: Vec<u8>,
    /// 输出文件名
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
}

/// Image Converter Port
#[async_trait]
pub trait ImageConverterPort: Send + Sync {
    /// 转换单张图片
    async fn convert(&self, job: ConversionJob) -> Result<ConvertedImage, ConversionError>;
}
