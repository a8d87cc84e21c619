//! Generation Commands - 生成/重新生成相关命令

use uuid::Uuid;

use crate::domain::generation::{ImageModel, Seed};

/// 生成图像命令
#[derive(Debug, Clone)]
pub struct GenerateImageCommand {
    pub prompt: String,
    /// 未指定时使用配置的默认模型
    pub model: Option<ImageModel>,
    pub requester_id: u64,
}

/// 重新生成命令
#[derive(Debug, Clone)]
pub struct RegenerateImageCommand {
    pub result_id: Uuid,
    pub actor_id: u64,
}

/// 撤销结果命令（重新生成入口被移除）
#[derive(Debug, Clone)]
pub struct RetireResultCommand {
    pub result_id: Uuid,
}

/// 生成结果
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// 会话 ID，后续重新生成使用
    pub result_id: Uuid,
    /// 原始图像数据
    pub data: Vec<u8>,
    pub prompt: String,
    pub model: ImageModel,
    pub seed: Seed,
    /// 上游耗时（毫秒）
    pub elapsed_ms: u64,
    pub regenerated: bool,
}
