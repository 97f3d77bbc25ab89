use std::net::SocketAddr;

use crate::external::yts::{parse_base_url, DEFAULT_BASE_URL};

/// 运行配置（从环境变量读取，缺省值与本地开发一致）
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub catalog_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            catalog_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过查找函数读取配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port: u16 = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let catalog_url = match lookup("YTS_API_URL") {
            Some(raw) => parse_base_url(&raw)
                .map_err(|e| anyhow::anyhow!("Invalid YTS_API_URL {}: {}", raw, e))?,
            None => defaults.catalog_url,
        };

        Ok(Self {
            host,
            port,
            catalog_url,
        })
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
