//! HTTP Routes
//!
//! 聊天平台网关调用的触发接口
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查
//! - /api/image/generate     POST  生成图像（成功时创建会话）
//! - /api/image/regenerate   POST  重新生成（单飞守卫）
//! - /api/image/retire       POST  移除重新生成入口
//! - /api/image/convert      POST  图片转 GIF（multipart）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/image", image_routes())
}

/// Image 路由
fn image_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate", post(handlers::generate_image))
        .route("/regenerate", post(handlers::regenerate_image))
        .route("/retire", post(handlers::retire_result))
        .route("/convert", post(handlers::convert_image))
}
