use thiserror::Error;

/// 目录请求失败
///
/// 网络错误、非 2xx 状态码、响应格式不符都归为这一类；
/// 视图层只保留它的文字描述。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FetchFailure {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status code {0}")]
    HttpStatus(u16),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchFailure::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchFailure::HttpStatus(status.as_u16())
        } else {
            FetchFailure::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchFailure {
    fn from(err: serde_json::Error) -> Self {
        FetchFailure::Decode(err.to_string())
    }
}
