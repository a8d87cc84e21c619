//! Data Transfer Objects

use serde::Serialize;

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self::success(Empty {})
    }
}

/// 图像响应附带的元数据头
pub mod headers {
    pub const RESULT_ID: &str = "x-result-id";
    pub const SEED: &str = "x-seed";
    pub const MODEL: &str = "x-model";
    pub const ELAPSED_MS: &str = "x-elapsed-ms";
    pub const REGENERATED: &str = "x-regenerated";
}
