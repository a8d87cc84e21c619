//! Command Orchestrator - 外部触发的统一入口
//!
//! 组合各 CommandHandler，把 generate / regenerate / convert / retire 触发
//! 转换为类型化结果，交给外部渲染层。本层不渲染、不重试。

use std::sync::Arc;

use crate::application::commands::handlers::{
    ConvertImageHandler, GenerateImageHandler, RegenerateImageHandler, RetireResultHandler,
};
use crate::application::commands::{
    ConvertImageCommand, GenerateImageCommand, GeneratedImage, RegenerateImageCommand,
    RetireResultCommand,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ConvertedImage, ImageConverterPort, ImageGeneratorPort, SessionRegistryPort,
};
use crate::domain::conversion::LoopCount;
use crate::domain::generation::ImageModel;

/// 编排器参数
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// 未指定模型时使用
    pub default_model: ImageModel,
    /// 每帧显示时长（毫秒）
    pub frame_duration_ms: u32,
    /// 循环次数
    pub repeat: LoopCount,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_model: ImageModel::Flux,
            frame_duration_ms: 100,
            repeat: LoopCount::Infinite,
        }
    }
}

/// 命令编排器
pub struct CommandOrchestrator {
    sessions: Arc<dyn SessionRegistryPort>,
    generate_handler: GenerateImageHandler,
    regenerate_handler: RegenerateImageHandler,
    retire_handler: RetireResultHandler,
    convert_handler: ConvertImageHandler,
}

impl CommandOrchestrator {
    pub fn new(
        config: OrchestratorConfig,
        generator: Arc<dyn ImageGeneratorPort>,
        converter: Arc<dyn ImageConverterPort>,
        sessions: Arc<dyn SessionRegistryPort>,
    ) -> Self {
        Self {
            sessions: sessions.clone(),
            generate_handler: GenerateImageHandler::new(
                generator.clone(),
                sessions.clone(),
                config.default_model,
            ),
            regenerate_handler: RegenerateImageHandler::new(generator, sessions.clone()),
            retire_handler: RetireResultHandler::new(sessions),
            convert_handler: ConvertImageHandler::new(
                converter,
                config.frame_duration_ms,
                config.repeat,
            ),
        }
    }

    /// 首次生成，成功时创建会话
    pub async fn on_generate(&self, cmd: GenerateImageCommand) -> Result<GeneratedImage, ApplicationError> {
        self.generate_handler.handle(cmd).await
    }

    /// 重新生成，受会话单飞守卫保护
    pub async fn on_regenerate(
        &self,
        cmd: RegenerateImageCommand,
    ) -> Result<GeneratedImage, ApplicationError> {
        self.regenerate_handler.handle(cmd).await
    }

    /// 图片转 GIF
    pub async fn on_convert(&self, cmd: ConvertImageCommand) -> Result<ConvertedImage, ApplicationError> {
        self.convert_handler.handle(cmd).await
    }

    /// 移除重新生成入口
    pub fn on_retire(&self, cmd: RetireResultCommand) -> Result<(), ApplicationError> {
        self.retire_handler.handle(cmd)
    }

    pub fn sessions(&self) -> &Arc<dyn SessionRegistryPort> {
        &self.sessions
    }
}
