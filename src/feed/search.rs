use anyhow::Result;
use log::debug;

use super::SEARCH_PAGE_SIZE;
use super::client::FeedClient;
use super::types::SearchResponse;

/// Query client bound to a discovered search endpoint.
pub struct SearchClient<'a, F: FeedClient> {
    feed: &'a F,
    endpoint: String,
}

impl<'a, F: FeedClient> SearchClient<'a, F> {
    pub fn new(feed: &'a F, endpoint: impl Into<String>) -> Self {
        Self {
            feed,
            endpoint: endpoint.into(),
        }
    }

    /// Builds the query URI for a search term.
    ///
    /// Pure string construction; the term is passed through as-is.
    pub fn query_uri(&self, term: &str) -> String {
        format!("{}?q={}&take={}", self.endpoint, term, SEARCH_PAGE_SIZE)
    }

    /// Fetches the packages matching a search term, in feed order.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<SearchResponse> {
        let uri = self.query_uri(term);
        debug!("Searching packages via {}...", uri);
        self.feed.search(&uri).await
    }
}
