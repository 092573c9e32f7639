//! Wire types for the container and document feeds.

use serde::{Deserialize, Serialize};

/// Partition key definition of a container.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PartitionKeyDefinition {
    /// Partition key paths; Cosmos currently allows exactly one.
    pub paths: Vec<String>,
    /// Partitioning kind, `Hash` for all containers this tool creates.
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

fn default_kind() -> String {
    "Hash".to_string()
}

impl PartitionKeyDefinition {
    /// Hash partitioning over a single path.
    pub fn hash(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
            kind: default_kind(),
            version: None,
        }
    }
}

/// Properties of a container, as returned by the store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContainerProperties {
    /// Container name.
    pub id: String,
    #[serde(rename = "partitionKey", skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<PartitionKeyDefinition>,
    #[serde(rename = "indexingPolicy", skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<serde_json::Value>,
    #[serde(rename = "_rid", default, skip_serializing)]
    pub rid: Option<String>,
    #[serde(rename = "_etag", default, skip_serializing)]
    pub etag: Option<String>,
    #[serde(rename = "_ts", default, skip_serializing)]
    pub timestamp: Option<i64>,
}

/// The collections feed: response of listing containers in a database.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerFeed {
    #[serde(rename = "DocumentCollections", default)]
    pub document_collections: Vec<ContainerProperties>,
    #[serde(rename = "_count", default)]
    pub count: u64,
}

/// The documents feed: one page of items from a read or query.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentFeed<T> {
    #[serde(rename = "Documents", default = "Vec::new")]
    pub documents: Vec<T>,
    #[serde(rename = "_count", default)]
    pub count: u64,
}
