use std::sync::Arc;

use sparrow_movies::{api, config::AppConfig, external::YtsClient, view::MovieListView};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    // Initialize catalog client and mount the view
    let client = YtsClient::new(config.catalog_url.clone());
    let view = MovieListView::new(Arc::new(client));
    let initial = view.mount().await;
    tracing::info!("📽 Movie list mounted ({} fetches in flight)", initial.len());
    tokio::spawn(initial.settled());

    let app = api::router(api::AppState { view });

    let addr = config.socket_addr()?;
    tracing::info!("🚀 Server listening on {}", addr);
    tracing::info!("Catalog endpoint: {}/list_movies.json", config.catalog_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
