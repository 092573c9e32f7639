//! Database-scoped data-plane client.
//!
//! `CosmosDatabaseClient` wraps a signed [`CosmosClient`] and a database
//! name, and provides container lifecycle, item CRUD, and query
//! execution. Operation groups live in sibling modules.

use orbit_cosmos_client::{ClientConfig, CosmosClient};

use crate::error::{Error, Result};

mod containers;
mod items;
mod query;

/// Data-plane client scoped to one database.
///
/// # Example
///
/// ```rust,ignore
/// use orbit_cosmos_data::CosmosDatabaseClient;
///
/// let client = CosmosDatabaseClient::new(
///     "https://localhost:8081",
///     "account_key_here",
///     "orbit",
/// )?;
///
/// let containers = client.list_containers().await?;
/// ```
#[derive(Debug, Clone)]
pub struct CosmosDatabaseClient {
    client: CosmosClient,
    database: String,
}

impl CosmosDatabaseClient {
    /// Create a new client for the given endpoint, key, and database.
    pub fn new(
        endpoint: impl Into<String>,
        key: impl Into<String>,
        database: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(endpoint, key, database, ClientConfig::default())
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(
        endpoint: impl Into<String>,
        key: impl Into<String>,
        database: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let database = database.into();
        if database.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "database name cannot be empty".to_string(),
            ));
        }
        let client = CosmosClient::with_config(endpoint, key, config)?;
        Ok(Self { client, database })
    }

    /// Create a client from an existing CosmosClient.
    pub fn from_client(client: CosmosClient, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    /// Get the underlying account client.
    pub fn inner(&self) -> &CosmosClient {
        &self.client
    }

    /// Get the database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    pub(crate) fn client(&self) -> &CosmosClient {
        &self.client
    }

    /// Resource link of the database: `dbs/{db}`.
    pub(crate) fn database_link(&self) -> String {
        format!("dbs/{}", self.database)
    }

    /// Resource link of a container: `dbs/{db}/colls/{name}`.
    pub(crate) fn collection_link(&self, name: &str) -> String {
        format!("dbs/{}/colls/{}", self.database, name)
    }

    /// Resource link of a document: `dbs/{db}/colls/{name}/docs/{id}`.
    pub(crate) fn document_link(&self, container: &str, id: &str) -> String {
        format!("dbs/{}/colls/{}/docs/{}", self.database, container, id)
    }
}

/// Container name rules: alphanumeric and hyphens, 1-255 characters.
pub(crate) fn validate_container_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 255
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(Error::InvalidArgument(format!(
            "invalid container name '{name}': must be alphanumeric with hyphens, max 255 characters"
        )));
    }
    Ok(())
}

/// Partition key paths must start with `/`.
pub(crate) fn validate_partition_key_path(path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(Error::InvalidPartitionKey(path.to_string()));
    }
    Ok(())
}
