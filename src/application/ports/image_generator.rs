//! Image Generator Port - 外部图像生成 API 抽象
//!
//! 定义图像生成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::generation::GenerationRequest;

/// 图像生成错误
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// 上游返回非成功状态码（不解析响应体）
    #[error("API returned status code {status_code}")]
    Api { status_code: u16 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timeout")]
    TimedOut,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Image Generator Port
///
/// 每次调用只发出一次请求，不做重试和缓存
#[async_trait]
pub trait ImageGeneratorPort: Send + Sync {
    /// 执行一次生成，成功时原样返回响应体
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, GenerationError>;
}
