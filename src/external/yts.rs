use reqwest::Client;
use url::Url;

use super::error::FetchFailure;
use crate::models::{ListMoviesResponse, QueryOptions};

pub const DEFAULT_BASE_URL: &str = "https://yts.mx/api/v2";

/// YTS 目录 API 客户端
///
/// 不重试、不设超时。
#[derive(Clone, Debug)]
pub struct YtsClient {
    client: Client,
    base_url: String,
}

impl YtsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 列表接口地址
    pub fn list_movies_url(&self) -> String {
        format!("{}/list_movies.json", self.base_url)
    }

    /// 按当前查询参数获取电影列表
    pub async fn list_movies(&self, options: &QueryOptions) -> Result<ListMoviesResponse, FetchFailure> {
        let url = self.list_movies_url();
        tracing::debug!("GET {} page={} genre={:?}", url, options.page, options.genre);

        let response = self.client
            .get(&url)
            .query(&options.to_query_pairs())
            .send()
            .await?;

        Self::decode(response).await
    }

    /// 不带任何参数获取电影列表（用于汇总类型）
    pub async fn list_movies_unfiltered(&self) -> Result<ListMoviesResponse, FetchFailure> {
        let url = self.list_movies_url();
        tracing::debug!("GET {} (unfiltered)", url);

        let response = self.client.get(&url).send().await?;

        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<ListMoviesResponse, FetchFailure> {
        if !response.status().is_success() {
            return Err(FetchFailure::HttpStatus(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: ListMoviesResponse = serde_json::from_slice(&body)?;
        Ok(parsed)
    }
}

impl Default for YtsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// 校验基础地址
pub fn parse_base_url(raw: &str) -> Result<String, url::ParseError> {
    let url = Url::parse(raw)?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_movies_url() {
        let client = YtsClient::new("https://yts.mx/api/v2/");
        assert_eq!(client.list_movies_url(), "https://yts.mx/api/v2/list_movies.json");
        assert_eq!(YtsClient::default().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_base_url() {
        assert_eq!(
            parse_base_url("http://127.0.0.1:8080/api/v2/").unwrap(),
            "http://127.0.0.1:8080/api/v2"
        );
        assert!(parse_base_url("not a url").is_err());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        // 端口 9 通常无人监听
        let client = YtsClient::new("http://127.0.0.1:9");
        let err = client.list_movies_unfiltered().await.unwrap_err();
        assert!(matches!(err, FetchFailure::Network(_)));
    }
}
