use anyhow::Result;
use log::debug;

use crate::error::ManagerError;

use super::SEARCH_QUERY_SERVICE;
use super::client::FeedClient;

/// Base URIs of the typed services discovered from the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEndpoints {
    pub search_query: String,
}

/// Resolves the service index into typed endpoints.
///
/// Fails with [`ManagerError::Discovery`] when the index cannot be fetched
/// or contains no search resource.
#[tracing::instrument(skip(feed))]
pub async fn discover<F: FeedClient>(feed: &F, index_url: &str) -> Result<FeedEndpoints> {
    debug!("Discovering feed endpoints from {}...", index_url);

    let index = feed
        .service_index(index_url)
        .await
        .map_err(|e| ManagerError::Discovery(format!("{:#}", e)))?;

    let resource = index
        .resources
        .iter()
        .find(|r| r.resource_type == SEARCH_QUERY_SERVICE)
        .ok_or_else(|| {
            ManagerError::Discovery(format!(
                "service index has no {} resource",
                SEARCH_QUERY_SERVICE
            ))
        })?;

    debug!("Search endpoint: {}", resource.id);

    Ok(FeedEndpoints {
        search_query: resource.id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::client::MockFeedClient;
    use crate::feed::types::{ServiceIndex, ServiceResource};
    use mockall::predicate::eq;

    fn index_with(resources: Vec<ServiceResource>) -> ServiceIndex {
        ServiceIndex {
            version: "3.0.0".to_string(),
            resources,
        }
    }

    #[tokio::test]
    async fn test_discover_extracts_search_endpoint() {
        let mut feed = MockFeedClient::new();
        feed.expect_service_index()
            .with(eq("https://feed.example/index.json"))
            .returning(|_| {
                Ok(index_with(vec![
                    ServiceResource {
                        id: "https://content.example/flat2".to_string(),
                        resource_type: "PackageBaseAddress/3.0.0".to_string(),
                        comment: None,
                    },
                    ServiceResource {
                        id: "https://search.example/query".to_string(),
                        resource_type: "SearchQueryService".to_string(),
                        comment: Some("Query endpoint".to_string()),
                    },
                ]))
            });

        let endpoints = discover(&feed, "https://feed.example/index.json")
            .await
            .unwrap();

        assert_eq!(endpoints.search_query, "https://search.example/query");
    }

    #[tokio::test]
    async fn test_discover_requires_exact_type_match() {
        let mut feed = MockFeedClient::new();
        feed.expect_service_index().returning(|_| {
            Ok(index_with(vec![ServiceResource {
                id: "https://search.example/query".to_string(),
                resource_type: "SearchQueryService/3.5.0".to_string(),
                comment: None,
            }]))
        });

        let result = discover(&feed, "https://feed.example/index.json").await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManagerError>(),
            Some(ManagerError::Discovery(_))
        ));
    }

    #[tokio::test]
    async fn test_discover_missing_resource() {
        let mut feed = MockFeedClient::new();
        feed.expect_service_index()
            .returning(|_| Ok(index_with(vec![])));

        let result = discover(&feed, "https://feed.example/index.json").await;

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManagerError>(),
            Some(ManagerError::Discovery(_))
        ));
    }

    #[tokio::test]
    async fn test_discover_fetch_failure() {
        let mut feed = MockFeedClient::new();
        feed.expect_service_index()
            .returning(|_| Err(anyhow::anyhow!("connection refused")));

        let result = discover(&feed, "https://feed.example/index.json").await;

        let err = result.unwrap_err();
        match err.downcast_ref::<ManagerError>() {
            Some(ManagerError::Discovery(msg)) => assert!(msg.contains("connection refused")),
            other => panic!("Expected Discovery error, got {:?}", other),
        }
    }
}
