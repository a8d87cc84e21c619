//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const FORBIDDEN: i32 = 403;
    pub const NOT_FOUND: i32 = 404;
    pub const CONFLICT: i32 = 409;
    pub const PAYLOAD_TOO_LARGE: i32 = 413;
    pub const UNSUPPORTED_MEDIA_TYPE: i32 = 415;
    pub const UNPROCESSABLE: i32 = 422;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const BAD_GATEWAY: i32 = 502;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
    pub const GATEWAY_TIMEOUT: i32 = 504;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    PayloadTooLarge(String),
    UnsupportedMediaType(String),
    Unprocessable(String),
    Internal(String),
    BadGateway(String),
    ServiceUnavailable(String),
    GatewayTimeout(String),
}

impl ApiError {
    fn errno(&self) -> i32 {
        match self {
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::Forbidden(_) => errno::FORBIDDEN,
            ApiError::NotFound(_) => errno::NOT_FOUND,
            ApiError::Conflict(_) => errno::CONFLICT,
            ApiError::PayloadTooLarge(_) => errno::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMediaType(_) => errno::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Unprocessable(_) => errno::UNPROCESSABLE,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::BadGateway(_) => errno::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
            ApiError::GatewayTimeout(_) => errno::GATEWAY_TIMEOUT,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::UnsupportedMediaType(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::Internal(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::GatewayTimeout(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errno = self.errno();
        let message = self.message().to_string();

        if errno >= errno::INTERNAL_ERROR {
            tracing::error!(errno = errno, error = %message, "Request failed");
        } else {
            tracing::warn!(errno = errno, error = %message, "Request rejected");
        }

        (StatusCode::OK, Json(ErrorResponse::new(errno, message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        let msg = e.to_string();
        match e {
            ApplicationError::Validation(_) => ApiError::BadRequest(msg),
            ApplicationError::SessionNotFound(_) => ApiError::NotFound(msg),
            ApplicationError::Permission { .. } => ApiError::Forbidden(msg),
            ApplicationError::AlreadyInProgress => ApiError::Conflict(msg),
            ApplicationError::GenerationApi { .. } | ApplicationError::InvalidResponse(_) => {
                ApiError::BadGateway(msg)
            }
            ApplicationError::Transport(_) => ApiError::ServiceUnavailable(msg),
            ApplicationError::TimedOut => ApiError::GatewayTimeout(msg),
            ApplicationError::UnsupportedContentType(_) => ApiError::UnsupportedMediaType(msg),
            ApplicationError::InputTooLarge { .. } | ApplicationError::OutputTooLarge { .. } => {
                ApiError::PayloadTooLarge(msg)
            }
            ApplicationError::Decode(_) => ApiError::Unprocessable(msg),
            ApplicationError::Encode(_) => ApiError::Internal(msg),
        }
    }
}
