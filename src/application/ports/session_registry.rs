//! Session Registry Port - 重新生成会话的生命周期管理
//!
//! 进程内 result-id -> RegenerationSession 映射，具体实现在 infrastructure/memory 层。
//! 会话不持久化，进程重启后全部丢失。

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::regeneration::RegenerationSession;

/// Session Registry 错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),

    #[error("Session already exists: {0}")]
    AlreadyExists(Uuid),
}

/// Session Registry Port
pub trait SessionRegistryPort: Send + Sync {
    /// 注册新会话
    fn create(&self, session: RegenerationSession) -> Result<Arc<RegenerationSession>, SessionError>;

    /// 获取会话
    fn get(&self, id: Uuid) -> Result<Arc<RegenerationSession>, SessionError>;

    /// 撤销会话（重新生成入口被移除时调用）
    fn retire(&self, id: Uuid) -> Result<(), SessionError>;

    /// 获取空闲超过指定时长且不在 InFlight 的会话
    fn expired(&self, idle_timeout_secs: u64) -> Vec<Uuid>;

    /// 当前会话数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
