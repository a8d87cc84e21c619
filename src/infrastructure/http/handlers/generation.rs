//! Generation Handlers
//!
//! 成功时直接返回图像字节，元数据放在响应头中；失败时返回统一错误 JSON

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{
    GenerateImageCommand, GeneratedImage, RegenerateImageCommand, RetireResultCommand,
};
use crate::domain::generation::ImageModel;
use crate::infrastructure::http::dto::{headers, ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub model: Option<ImageModel>,
    pub requester_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct RegenerateRequest {
    pub result_id: Uuid,
    pub actor_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct RetireRequest {
    pub result_id: Uuid,
}

// ============================================================================
// Handlers
// ============================================================================

/// 生成图像
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Response, ApiError> {
    let cmd = GenerateImageCommand {
        prompt: req.prompt,
        model: req.model,
        requester_id: req.requester_id,
    };

    let generated = state.orchestrator.on_generate(cmd).await?;
    image_response(generated)
}

/// 重新生成
pub async fn regenerate_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegenerateRequest>,
) -> Result<Response, ApiError> {
    let cmd = RegenerateImageCommand {
        result_id: req.result_id,
        actor_id: req.actor_id,
    };

    let generated = state.orchestrator.on_regenerate(cmd).await?;
    image_response(generated)
}

/// 移除重新生成入口
pub async fn retire_result(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RetireRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state.orchestrator.on_retire(RetireResultCommand {
        result_id: req.result_id,
    })?;
    Ok(Json(ApiResponse::ok()))
}

fn image_response(generated: GeneratedImage) -> Result<Response, ApiError> {
    let format = image::guess_format(&generated.data).ok();
    let content_type = format
        .map(|f| f.to_mime_type())
        .unwrap_or("application/octet-stream");
    let extension = format
        .and_then(|f| f.extensions_str().first().copied())
        .unwrap_or("png");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, generated.data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"generated_image.{}\"", extension),
        )
        .header(headers::RESULT_ID, generated.result_id.to_string())
        .header(headers::SEED, generated.seed.to_string())
        .header(headers::MODEL, generated.model.as_str())
        .header(headers::ELAPSED_MS, generated.elapsed_ms)
        .header(headers::REGENERATED, generated.regenerated.to_string())
        .body(Body::from(generated.data))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}
