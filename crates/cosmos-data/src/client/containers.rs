//! Container lifecycle operations.

use serde_json::json;
use tracing::{info, instrument};

use orbit_cosmos_client::{ErrorKind as StoreErrorKind, RequestMethod, ResourceType};

use crate::error::{Error, Result};
use crate::models::{ContainerFeed, ContainerProperties};
use crate::DEFAULT_THROUGHPUT;

use super::{validate_container_name, validate_partition_key_path};

impl super::CosmosDatabaseClient {
    /// List all containers in the database.
    #[instrument(skip(self))]
    pub async fn list_containers(&self) -> Result<Vec<ContainerProperties>> {
        let request = self.client().feed_request(
            RequestMethod::Get,
            ResourceType::Collections,
            &self.database_link(),
        )?;

        let response = match self.client().execute(request).await {
            Ok(response) => response,
            Err(err) => {
                return Err(match err.kind {
                    StoreErrorKind::NotFound(_) => {
                        Error::ResourceNotFound(self.database().to_string())
                    }
                    _ => err.into(),
                })
            }
        };

        let feed: ContainerFeed = response.json().await?;
        info!(count = feed.document_collections.len(), "Listed containers");
        Ok(feed.document_collections)
    }

    /// Create a container with the given partition key path.
    ///
    /// `throughput` is provisioned RU/s; `None` uses the minimum manual
    /// throughput of 400.
    #[instrument(skip(self))]
    pub async fn create_container(
        &self,
        name: &str,
        partition_key_path: &str,
        throughput: Option<i32>,
    ) -> Result<ContainerProperties> {
        validate_container_name(name)?;
        validate_partition_key_path(partition_key_path)?;
        let throughput = throughput.unwrap_or(DEFAULT_THROUGHPUT);
        if throughput < 1 {
            return Err(Error::InvalidArgument(format!(
                "throughput must be a positive integer, got {throughput}"
            )));
        }

        let body = json!({
            "id": name,
            "partitionKey": {
                "paths": [partition_key_path],
                "kind": "Hash"
            }
        });

        let request = self
            .client()
            .feed_request(
                RequestMethod::Post,
                ResourceType::Collections,
                &self.database_link(),
            )?
            .offer_throughput(throughput)
            .json(&body)?;

        let response = match self.client().execute(request).await {
            Ok(response) => response,
            Err(err) => {
                return Err(match err.kind {
                    StoreErrorKind::Conflict(_) => Error::ResourceExists(name.to_string()),
                    StoreErrorKind::NotFound(_) => {
                        Error::ResourceNotFound(self.database().to_string())
                    }
                    _ => err.into(),
                })
            }
        };

        let properties: ContainerProperties = response.json().await?;
        info!(
            container = name,
            partition_key = partition_key_path,
            throughput,
            "Created container"
        );
        Ok(properties)
    }

    /// Delete a container by name. Idempotent: deleting an absent container
    /// succeeds.
    #[instrument(skip(self))]
    pub async fn delete_container(&self, name: &str) -> Result<()> {
        validate_container_name(name)?;

        let request = self.client().resource_request(
            RequestMethod::Delete,
            ResourceType::Collections,
            &self.collection_link(name),
        )?;

        match self.client().execute(request).await {
            Ok(_) => {
                info!(container = name, "Deleted container");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                info!(container = name, "Container absent during delete");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Read a container's properties.
    #[instrument(skip(self))]
    pub async fn container_properties(&self, name: &str) -> Result<ContainerProperties> {
        validate_container_name(name)?;

        let request = self.client().resource_request(
            RequestMethod::Get,
            ResourceType::Collections,
            &self.collection_link(name),
        )?;

        let response = match self.client().execute(request).await {
            Ok(response) => response,
            Err(err) => {
                return Err(match err.kind {
                    StoreErrorKind::NotFound(_) => Error::ResourceNotFound(name.to_string()),
                    _ => err.into(),
                })
            }
        };

        response.json().await.map_err(Into::into)
    }
}
