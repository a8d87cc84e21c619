//! Conversion Handlers

use axum::{
    body::Body,
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::application::{ApplicationError, ConvertImageCommand};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 图片转 GIF
///
/// multipart 字段:
/// - `file`: 附件内容（文件名与 content type 取自该字段）
/// - `size`: 可选，附件声明的大小；缺省时使用实际字节数。
///   超过输入上限时立即拒绝，`size` 在 `file` 之前时不会读取附件
pub async fn convert_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut declared_size: Option<u64> = None;

    let limit = state.max_input_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit, "Failed to read multipart field"))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, limit, "Failed to read file"))?
                    .to_vec();
                file = Some((file_name, content_type, data));
            }
            "size" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, limit, "Failed to read size"))?;
                let size: u64 = text.trim().parse().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid size: {}", text.trim()))
                })?;
                if size > limit {
                    return Err(ApplicationError::InputTooLarge { size, limit }.into());
                }
                declared_size = Some(size);
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| ApiError::BadRequest("Image file is required".to_string()))?;
    let declared_size = declared_size.unwrap_or(data.len() as u64);

    let converted = state
        .orchestrator
        .on_convert(ConvertImageCommand {
            file_name,
            content_type,
            declared_size,
            data,
        })
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/gif")
        .header(header::CONTENT_LENGTH, converted.data.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                header_safe_file_name(&converted.file_name)
            ),
        )
        .body(Body::from(converted.data))
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

/// 超出请求体上限时 multipart 读取失败，状态码为 413
fn multipart_error(err: MultipartError, limit: u64, context: &str) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!(
            "Upload too large (limit {} bytes): {}",
            limit,
            err.body_text()
        ))
    } else {
        ApiError::BadRequest(format!("{}: {}", context, err.body_text()))
    }
}

/// 响应头只能携带可见 ASCII，其余字符替换为 `_`
fn header_safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if (c.is_ascii_graphic() && c != '"') || c == ' ' { c } else { '_' })
        .collect()
}
