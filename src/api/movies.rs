use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use super::error::{ApiError, ApiResult};
use super::response::ApiResponse;
use super::AppState;
use crate::models::{OptionChange, OptionError};

/// 修改单个查询参数的请求体
#[derive(Debug, Deserialize)]
pub struct SetOptionRequest {
    pub name: String,
    pub value: Value,
}

impl SetOptionRequest {
    /// 数值和布尔值统一转成字符串后再解析
    pub fn into_change(self) -> Result<OptionChange, OptionError> {
        let value = match self.value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        OptionChange::parse(&self.name, &value)
    }
}

/// 当前视图
pub async fn get_movies(State(state): State<AppState>) -> impl IntoResponse {
    ApiResponse::ok(state.view.render().await)
}

/// 修改查询参数，等待请求完成后返回新的视图
pub async fn set_option(
    State(state): State<AppState>,
    payload: Result<Json<SetOptionRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let change = request.into_change()?;

    state.view.set_option(change).await.settled().await;

    Ok(ApiResponse::ok(state.view.render().await))
}

pub async fn previous_page(State(state): State<AppState>) -> impl IntoResponse {
    state.view.previous_page().await.settled().await;
    ApiResponse::ok(state.view.render().await)
}

pub async fn next_page(State(state): State<AppState>) -> impl IntoResponse {
    state.view.next_page().await.settled().await;
    ApiResponse::ok(state.view.render().await)
}

/// 跳转到指定页
pub async fn goto_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let change = OptionChange::parse("page", &page)?;

    state.view.set_option(change).await.settled().await;

    Ok(ApiResponse::ok(state.view.render().await))
}

pub async fn refresh_genres(State(state): State<AppState>) -> impl IntoResponse {
    state.view.refresh_genres().await.settled().await;

    let genres = state.view.snapshot().await.genres.len();
    ApiResponse::ok(state.view.render().await).with_message(format!("{} genres loaded", genres))
}

pub async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
