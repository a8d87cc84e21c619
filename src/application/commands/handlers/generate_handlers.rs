//! Generation Command Handlers

use std::sync::Arc;
use std::time::Instant;

use crate::application::commands::generate_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{ImageGeneratorPort, SessionRegistryPort};
use crate::domain::generation::{GenerationRequest, ImageModel, Prompt};
use crate::domain::regeneration::RegenerationSession;

/// GenerateImage Handler - 首次生成，成功后创建会话
pub struct GenerateImageHandler {
    generator: Arc<dyn ImageGeneratorPort>,
    sessions: Arc<dyn SessionRegistryPort>,
    default_model: ImageModel,
}

impl GenerateImageHandler {
    pub fn new(
        generator: Arc<dyn ImageGeneratorPort>,
        sessions: Arc<dyn SessionRegistryPort>,
        default_model: ImageModel,
    ) -> Self {
        Self {
            generator,
            sessions,
            default_model,
        }
    }

    pub async fn handle(&self, cmd: GenerateImageCommand) -> Result<GeneratedImage, ApplicationError> {
        let prompt = Prompt::new(cmd.prompt)?;
        let model = cmd.model.unwrap_or(self.default_model);
        let request = GenerationRequest::new(prompt.clone(), model);

        tracing::info!(
            requester_id = cmd.requester_id,
            model = %model,
            seed = %request.seed,
            "Generating image"
        );

        let started = Instant::now();
        let data = self.generator.generate(&request).await.map_err(|e| {
            tracing::warn!(requester_id = cmd.requester_id, error = %e, "Image generation failed");
            e
        })?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        // 只有成功的生成才提供重新生成入口
        let session = self
            .sessions
            .create(RegenerationSession::new(prompt, model, cmd.requester_id))?;

        tracing::info!(
            result_id = %session.id(),
            size = data.len(),
            elapsed_ms = elapsed_ms,
            "Image generated"
        );

        Ok(GeneratedImage {
            result_id: session.id(),
            data,
            prompt: session.prompt().to_string(),
            model,
            seed: request.seed,
            elapsed_ms,
            regenerated: false,
        })
    }
}

/// RegenerateImage Handler - 在会话守卫下重新调用生成
pub struct RegenerateImageHandler {
    generator: Arc<dyn ImageGeneratorPort>,
    sessions: Arc<dyn SessionRegistryPort>,
}

impl RegenerateImageHandler {
    pub fn new(
        generator: Arc<dyn ImageGeneratorPort>,
        sessions: Arc<dyn SessionRegistryPort>,
    ) -> Self {
        Self {
            generator,
            sessions,
        }
    }

    pub async fn handle(&self, cmd: RegenerateImageCommand) -> Result<GeneratedImage, ApplicationError> {
        let session = self.sessions.get(cmd.result_id)?;
        let guard = session.request(cmd.actor_id)?;

        let request = GenerationRequest::new(session.prompt().clone(), session.model());
        tracing::info!(
            result_id = %cmd.result_id,
            attempt = session.attempts(),
            seed = %request.seed,
            "Regenerating image"
        );

        let started = Instant::now();
        let result = self.generator.generate(&request).await;
        guard.complete(result.is_ok());

        let data = result.map_err(|e| {
            tracing::warn!(result_id = %cmd.result_id, error = %e, "Regeneration failed");
            e
        })?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            result_id = %cmd.result_id,
            size = data.len(),
            elapsed_ms = elapsed_ms,
            "Image regenerated"
        );

        Ok(GeneratedImage {
            result_id: session.id(),
            data,
            prompt: session.prompt().to_string(),
            model: session.model(),
            seed: request.seed,
            elapsed_ms,
            regenerated: true,
        })
    }
}

/// RetireResult Handler - 移除会话
pub struct RetireResultHandler {
    sessions: Arc<dyn SessionRegistryPort>,
}

impl RetireResultHandler {
    pub fn new(sessions: Arc<dyn SessionRegistryPort>) -> Self {
        Self { sessions }
    }

    pub fn handle(&self, cmd: RetireResultCommand) -> Result<(), ApplicationError> {
        self.sessions.retire(cmd.result_id)?;
        Ok(())
    }
}
