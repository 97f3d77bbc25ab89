pub mod error;
pub mod yts;

use async_trait::async_trait;

pub use error::FetchFailure;
pub use yts::YtsClient;

use crate::models::{Movie, QueryOptions};

/// 电影目录数据源
///
/// `options` 为 `None` 时发送不带参数的请求。
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_movies(&self, options: Option<&QueryOptions>) -> Result<Vec<Movie>, FetchFailure>;

    /// 日志和健康检查里显示的地址
    fn describe(&self) -> String;
}

#[async_trait]
impl CatalogSource for YtsClient {
    async fn list_movies(&self, options: Option<&QueryOptions>) -> Result<Vec<Movie>, FetchFailure> {
        let response = match options {
            Some(options) => YtsClient::list_movies(self, options).await?,
            None => self.list_movies_unfiltered().await?,
        };

        if let Some(ref message) = response.status_message {
            tracing::debug!("Catalog responded: {}", message);
        }

        Ok(response.into_movies())
    }

    fn describe(&self) -> String {
        self.list_movies_url()
    }
}
