//! Package manager orchestration.
//!
//! Ties feed discovery, search, and manifest mutation together. Search is
//! fail-soft: any upstream failure degrades to an empty result. Manifest
//! mutations are fail-hard: locate/read/parse failures surface to the
//! caller as typed errors.
//!
//! Each mutation is an independent locate/read/mutate/write cycle; no lock
//! is held across operations. Concurrent mutations of the same manifest in
//! one process are a caller error (last write wins, no merge).

use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::path::PathBuf;
use tokio::sync::OnceCell;

use crate::error::ManagerError;
use crate::feed::{
    self, DEFAULT_FEED_URL, FeedClient, FeedEndpoints, HttpFeed, PackageSummary, SearchClient,
};
use crate::http::HttpClient;
use crate::manifest::{self, Manifest};
use crate::runtime::Runtime;

/// A dependency entry: feed-unique id plus a version string.
///
/// An empty version means "any/unspecified". Versions are compared
/// textually; ids are opaque strings.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageReference {
    pub id: String,
    pub version: String,
}

impl PackageReference {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for PackageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} {}", self.id, self.version)
        }
    }
}

/// Construction options for [`PackageManager`].
#[derive(Debug, Default, Clone)]
pub struct ManagerOptions {
    /// Service index URL (defaults to the public nuget.org feed)
    pub feed_url: Option<String>,
    /// Project root holding the manifest (defaults to the current directory)
    pub project_root: Option<PathBuf>,
    /// Skip all network access; searches resolve empty
    pub offline: bool,
}

/// Orchestrates feed queries and manifest mutations for one project.
///
/// Feed endpoints are discovered lazily and memoized for the lifetime of
/// the instance, including a failed discovery: a fresh instance is needed
/// to retry.
pub struct PackageManager<'a, R: Runtime, F: FeedClient> {
    runtime: &'a R,
    feed: F,
    feed_url: String,
    project_root: PathBuf,
    offline: bool,
    endpoints: OnceCell<Result<FeedEndpoints, ManagerError>>,
}

impl<'a, R: Runtime> PackageManager<'a, R, HttpFeed> {
    /// Creates a manager backed by the HTTP feed.
    ///
    /// If the NUPM_FEED_TOKEN environment variable is set, it is sent as a
    /// bearer token on every feed request.
    pub fn new(runtime: &'a R, options: ManagerOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("NUPM_FEED_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using NUPM_FEED_TOKEN for feed authentication");
        }

        let client = Client::builder()
            .user_agent("nupm-cli")
            .default_headers(headers)
            .build()?;

        let feed = HttpFeed::new(HttpClient::new(client));
        Self::with_feed(runtime, feed, options)
    }
}

impl<'a, R: Runtime, F: FeedClient> PackageManager<'a, R, F> {
    /// Creates a manager over an arbitrary feed client.
    pub fn with_feed(runtime: &'a R, feed: F, options: ManagerOptions) -> Result<Self> {
        let project_root = match options.project_root {
            Some(root) => root,
            None => runtime.current_dir()?,
        };

        Ok(Self {
            runtime,
            feed,
            feed_url: options.feed_url.unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            project_root,
            offline: options.offline,
            endpoints: OnceCell::new(),
        })
    }

    /// Resolves the feed endpoints, issuing the discovery request at most
    /// once per instance. Concurrent first callers share the in-flight
    /// discovery; the outcome (success or failure) is cached.
    async fn endpoints(&self) -> Result<&FeedEndpoints> {
        let outcome = self
            .endpoints
            .get_or_init(|| async {
                feed::discover(&self.feed, &self.feed_url)
                    .await
                    .map_err(|e| match e.downcast::<ManagerError>() {
                        Ok(err) => err,
                        Err(other) => ManagerError::Discovery(format!("{:#}", other)),
                    })
            })
            .await;

        match outcome {
            Ok(endpoints) => Ok(endpoints),
            Err(e) => Err(e.clone().into()),
        }
    }

    /// Searches the feed for packages matching a term, in feed order.
    ///
    /// Never fails: offline mode, a failed discovery, or any fetch/parse
    /// problem resolves to an empty list. Search is advisory.
    #[tracing::instrument(skip(self))]
    pub async fn search_packages(&self, term: &str) -> Vec<PackageSummary> {
        if self.offline {
            debug!("Offline mode, skipping search for '{}'", term);
            return Vec::new();
        }

        let endpoints = match self.endpoints().await {
            Ok(endpoints) => endpoints,
            Err(e) => {
                debug!("Search for '{}' degraded to empty: {}", term, e);
                return Vec::new();
            }
        };

        let client = SearchClient::new(&self.feed, endpoints.search_query.clone());
        match client.search(term).await {
            Ok(response) => response.data,
            Err(e) => {
                debug!("Search for '{}' degraded to empty: {}", term, e);
                Vec::new()
            }
        }
    }

    /// Records a dependency in the manifest, overwriting any previous
    /// version for the same id (last write wins).
    #[tracing::instrument(skip(self, reference))]
    pub async fn add_package(&self, reference: &PackageReference) -> Result<()> {
        if reference.id.is_empty() {
            anyhow::bail!("Package id must not be empty");
        }

        debug!("Adding {} to the manifest", reference);

        let path = manifest::locate(self.runtime, &self.project_root)?;
        let mut manifest = Manifest::load(self.runtime, &path)?;
        manifest.set_dependency(&reference.id, &reference.version)?;
        manifest.save(self.runtime, &path)
    }

    /// Deletes a dependency from the manifest.
    ///
    /// Removing an id that is not declared fails with
    /// [`crate::error::ManagerError::PackageNotFound`]; a second removal of
    /// the same id is therefore an error, not a no-op.
    #[tracing::instrument(skip(self, reference))]
    pub async fn remove_package(&self, reference: &PackageReference) -> Result<()> {
        debug!("Removing {} from the manifest", reference.id);

        let path = manifest::locate(self.runtime, &self.project_root)?;
        let mut manifest = Manifest::load(self.runtime, &path)?;

        if !manifest.remove_dependency(&reference.id) {
            return Err(ManagerError::PackageNotFound(reference.id.clone()).into());
        }

        manifest.save(self.runtime, &path)
    }

    /// Lists the dependencies currently declared in the manifest.
    #[tracing::instrument(skip(self))]
    pub fn installed_packages(&self) -> Result<Vec<PackageReference>> {
        let path = manifest::locate(self.runtime, &self.project_root)?;
        let manifest = Manifest::load(self.runtime, &path)?;

        Ok(manifest
            .dependencies()
            .into_iter()
            .map(|(id, version)| PackageReference::new(id, version))
            .collect())
    }
}
