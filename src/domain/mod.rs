//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Generation Context: 模型、种子、prompt
//! - Regeneration Context: 每个结果的重新生成会话
//! - Conversion Context: 图片转 GIF 任务

pub mod conversion;
pub mod generation;
pub mod regeneration;
