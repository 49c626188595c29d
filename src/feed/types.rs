use serde::{Deserialize, Serialize};

/// Discovery document at the feed root, mapping service types to base URIs.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServiceIndex {
    pub version: String,
    pub resources: Vec<ServiceResource>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServiceResource {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub resource_type: String,
    pub comment: Option<String>,
}

/// Response of the search endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    #[serde(rename = "totalHits", default)]
    pub total_hits: u64,
    #[serde(default)]
    pub data: Vec<PackageSummary>,
}

/// One package as reported by the feed.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct PackageSummary {
    pub id: String,
    pub version: String,
    pub description: Option<String>,
    #[serde(default)]
    pub versions: Vec<VersionRecord>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct VersionRecord {
    pub version: String,
    #[serde(default)]
    pub downloads: u64,
}
