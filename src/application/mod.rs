//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ImageGenerator、ImageConverter、SessionRegistry）
//! - commands: 命令及处理器
//! - orchestrator: 外部触发的统一入口
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod orchestrator;
pub mod ports;

// Re-exports
pub use commands::{
    ConvertImageCommand, GenerateImageCommand, GeneratedImage, RegenerateImageCommand,
    RetireResultCommand,
    // Handlers
    handlers::{ConvertImageHandler, GenerateImageHandler, RegenerateImageHandler, RetireResultHandler},
};

pub use error::ApplicationError;
pub use orchestrator::{CommandOrchestrator, OrchestratorConfig};

pub use ports::{
    // Image converter
    ConversionError,
    ConvertedImage,
    ImageConverterPort,
    // Image generator
    GenerationError,
    ImageGeneratorPort,
    // Session registry
    SessionError,
    SessionRegistryPort,
};
