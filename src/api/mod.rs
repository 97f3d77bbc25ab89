pub mod error;
pub mod health;
pub mod movies;
pub mod response;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::view::MovieListView;

#[derive(Clone)]
pub struct AppState {
    pub view: MovieListView,
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Sparrow Movies API v0.1" }))
        .route("/api/health", get(health::health_check))
        // Movie list view
        .route("/api/movies", get(movies::get_movies))
        .route("/api/movies/options", put(movies::set_option))
        .route("/api/movies/page/previous", post(movies::previous_page))
        .route("/api/movies/page/next", post(movies::next_page))
        .route("/api/movies/pages/:page", post(movies::goto_page))
        .route("/api/genres/refresh", post(movies::refresh_genres))
        .fallback(movies::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
