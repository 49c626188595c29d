use anyhow::Result;
use async_trait::async_trait;

use crate::http::HttpClient;

use super::types::{SearchResponse, ServiceIndex};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn service_index(&self, url: &str) -> Result<ServiceIndex>;
    async fn search(&self, url: &str) -> Result<SearchResponse>;
}

/// Feed client backed by HTTP.
pub struct HttpFeed {
    http: HttpClient,
}

impl HttpFeed {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl FeedClient for HttpFeed {
    #[tracing::instrument(skip(self))]
    async fn service_index(&self, url: &str) -> Result<ServiceIndex> {
        self.http.get_json(url).await
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, url: &str) -> Result<SearchResponse> {
        self.http.get_json(url).await
    }
}
