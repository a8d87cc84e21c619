//! Application State

use std::sync::Arc;

use crate::application::CommandOrchestrator;

/// 默认转换输入上限（字节），与 conversion.max_input_bytes 默认值一致
const DEFAULT_MAX_INPUT_BYTES: u64 = 8 * 1024 * 1024;

/// 应用状态
pub struct AppState {
    pub orchestrator: Arc<CommandOrchestrator>,
    /// 转换输入上限，用于在读取附件前拒绝声明过大的上传
    pub max_input_bytes: u64,
}

impl AppState {
    pub fn new(orchestrator: Arc<CommandOrchestrator>) -> Self {
        Self {
            orchestrator,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: u64) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }
}
