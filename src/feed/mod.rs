//! NuGet v3 feed access: endpoint discovery and package search.
//!
//! The feed is reached in two stages. The service index (a small discovery
//! document) is fetched from a fixed root URL and maps logical service
//! types to concrete base URIs; the search endpoint extracted from it is
//! then queried per search term.

mod client;
mod locator;
mod search;
mod types;

pub use client::{FeedClient, HttpFeed};
pub use locator::{FeedEndpoints, discover};
pub use search::SearchClient;
pub use types::{PackageSummary, SearchResponse, ServiceIndex, ServiceResource, VersionRecord};

#[cfg(test)]
pub use client::MockFeedClient;

/// Default service index of the public nuget.org feed.
pub const DEFAULT_FEED_URL: &str = "https://api.nuget.org/v3/index.json";

/// Resource type of the search endpoint in the service index.
pub const SEARCH_QUERY_SERVICE: &str = "SearchQueryService";

/// Number of results requested per search.
pub const SEARCH_PAGE_SIZE: usize = 20;
