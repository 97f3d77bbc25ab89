use axum::{extract::State, response::IntoResponse};
use serde_json::json;

use super::response::ApiResponse;
use super::AppState;

/// 健康检查端点
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.view.snapshot().await;

    ApiResponse::ok(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_url": state.view.source().describe(),
        "movies_generation": snapshot.movies_generation(),
        "genres_generation": snapshot.genres_generation(),
    }))
}
