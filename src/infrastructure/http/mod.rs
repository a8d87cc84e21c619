//! HTTP Layer - 触发接口
//!
//! 生成 / 重新生成 / 移除 / 转换，均由外部聊天网关调用

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
