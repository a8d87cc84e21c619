//! Conversion Command Handlers

use std::sync::Arc;

use crate::application::commands::convert_commands::ConvertImageCommand;
use crate::application::error::ApplicationError;
use crate::application::ports::{ConvertedImage, ImageConverterPort};
use crate::domain::conversion::{ConversionJob, LoopCount};

/// ConvertImage Handler - 用配置的帧时长和循环次数构造转换任务
pub struct ConvertImageHandler {
    converter: Arc<dyn ImageConverterPort>,
    frame_duration_ms: u32,
    repeat: LoopCount,
}

impl ConvertImageHandler {
    pub fn new(
        converter: Arc<dyn ImageConverterPort>,
        frame_duration_ms: u32,
        repeat: LoopCount,
    ) -> Self {
        Self {
            converter,
            frame_duration_ms,
            repeat,
        }
    }

    pub async fn handle(&self, cmd: ConvertImageCommand) -> Result<ConvertedImage, ApplicationError> {
        tracing::info!(
            file_name = %cmd.file_name,
            content_type = ?cmd.content_type,
            declared_size = cmd.declared_size,
            "Converting image to GIF"
        );

        let job = ConversionJob::new(cmd.data, cmd.content_type, cmd.declared_size, cmd.file_name)
            .with_frame_duration(self.frame_duration_ms)
            .with_repeat(self.repeat);

        let converted = self.converter.convert(job).await.map_err(|e| {
            tracing::warn!(error = %e, "GIF conversion failed");
            e
        })?;

        tracing::info!(
            file_name = %converted.file_name,
            size = converted.data.len(),
            width = converted.width,
            height = converted.height,
            "Image converted"
        );

        Ok(converted)
    }
}
