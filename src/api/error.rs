use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::models::OptionError;

/// 统一的API错误类型
#[derive(Debug)]
pub enum ApiError {
    /// 未找到资源
    NotFound(String),
    /// 请求参数错误
    BadRequest(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// 选项在边界处被拒绝
impl From<OptionError> for ApiError {
    fn from(err: OptionError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(ref msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(ref msg) => {
                tracing::warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;
