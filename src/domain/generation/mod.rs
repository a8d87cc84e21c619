//! Generation Context - 图像生成限界上下文
//!
//! 职责:
//! - 模型枚举
//! - 种子抽取
//! - Prompt 校验

mod errors;
mod value_objects;

pub use errors::GenerationDomainError;
pub use value_objects::{
    GenerationRequest, ImageModel, Prompt, Seed, MAX_PROMPT_CHARS, MAX_SEED,
};
