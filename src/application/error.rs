//! 应用层错误定义
//!
//! 统一的命令错误类型，外部渲染层按变体分支生成用户可见消息

use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::{ConversionError, GenerationError, SessionError};
use crate::domain::generation::GenerationDomainError;
use crate::domain::regeneration::RegenerationError;

/// 应用层错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    Validation(String),

    /// 会话不存在（已撤销或进程重启）
    #[error("Result not found: {0}")]
    SessionNotFound(Uuid),

    /// 非结果所有者发起重新生成
    #[error("Actor {actor_id} cannot regenerate a result owned by someone else")]
    Permission { actor_id: u64 },

    /// 重新生成正在进行
    #[error("Already regenerating, please wait")]
    AlreadyInProgress,

    /// 上游返回非成功状态码
    #[error("API returned status code {status_code}")]
    GenerationApi { status_code: u16 },

    /// 无法连接上游
    #[error("Could not reach the image service: {0}")]
    Transport(String),

    /// 上游超时
    #[error("Image service timed out")]
    TimedOut,

    /// 上游响应体读取失败
    #[error("Invalid response from image service: {0}")]
    InvalidResponse(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Input too large: {size} bytes (limit {limit} bytes)")]
    InputTooLarge { size: u64, limit: u64 },

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Could not encode GIF: {0}")]
    Encode(String),

    #[error("Output too large: {size} bytes (limit {limit} bytes)")]
    OutputTooLarge { size: u64, limit: u64 },
}

impl From<GenerationError> for ApplicationError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Api { status_code } => Self::GenerationApi { status_code },
            GenerationError::Transport(msg) => Self::Transport(msg),
            GenerationError::TimedOut => Self::TimedOut,
            GenerationError::InvalidResponse(msg) => Self::InvalidResponse(msg),
        }
    }
}

impl From<RegenerationError> for ApplicationError {
    fn from(err: RegenerationError) -> Self {
        match err {
            RegenerationError::Permission { actor_id } => Self::Permission { actor_id },
            RegenerationError::AlreadyInProgress(_) => Self::AlreadyInProgress,
        }
    }
}

impl From<ConversionError> for ApplicationError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnsupportedContentType(ct) => {
                Self::UnsupportedContentType(ct.unwrap_or_else(|| "unknown".to_string()))
            }
            ConversionError::InputTooLarge { size, limit } => Self::InputTooLarge { size, limit },
            ConversionError::Decode(msg) => Self::Decode(msg),
            ConversionError::Encode(msg) => Self::Encode(msg),
            ConversionError::OutputTooLarge { size, limit } => Self::OutputTooLarge { size, limit },
        }
    }
}

impl From<SessionError> for ApplicationError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => Self::SessionNotFound(id),
            SessionError::AlreadyExists(id) => {
                Self::Validation(format!("Result already registered: {}", id))
            }
        }
    }
}

impl From<GenerationDomainError> for ApplicationError {
    fn from(err: GenerationDomainError) -> Self {
        Self::Validation(err.to_string())
    }
}
