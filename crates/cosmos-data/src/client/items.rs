//! Item CRUD operations.
//!
//! Items are opaque JSON objects; the only field this layer inspects is
//! `id`. Partition key values are passed as headers, never embedded in
//! URLs.

use serde_json::Value;
use tracing::{info, instrument};

use orbit_cosmos_client::{ErrorKind as StoreErrorKind, RequestMethod, ResourceType};

use crate::error::{Error, Result};
use crate::query::QueryRequest;

fn item_id(item: &Value) -> Result<&str> {
    item.as_object()
        .and_then(|obj| obj.get("id"))
        .and_then(|id| id.as_str())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            Error::InvalidArgument("item must be a JSON object with an 'id' field".to_string())
        })
}

impl super::CosmosDatabaseClient {
    /// Create a new item in the container.
    #[instrument(skip(self, item))]
    pub async fn create_item(
        &self,
        container: &str,
        item: &Value,
        partition_key: &str,
    ) -> Result<Value> {
        if container.is_empty() {
            return Err(Error::InvalidArgument(
                "container name cannot be empty".to_string(),
            ));
        }
        if partition_key.is_empty() {
            return Err(Error::InvalidArgument(
                "partition key value cannot be empty".to_string(),
            ));
        }
        let id = item_id(item)?.to_string();

        let request = self
            .client()
            .feed_request(
                RequestMethod::Post,
                ResourceType::Documents,
                &self.collection_link(container),
            )?
            .partition_key(partition_key)
            .json(item)?;

        let response = match self.client().execute(request).await {
            Ok(response) => response,
            Err(err) => {
                return Err(match err.kind {
                    StoreErrorKind::Conflict(_) => Error::DuplicateItem(id),
                    StoreErrorKind::NotFound(_) => {
                        Error::ResourceNotFound(container.to_string())
                    }
                    _ => err.into(),
                })
            }
        };

        let created: Value = response.json().await?;
        info!(item = %id, container, "Created item");
        Ok(created)
    }

    /// Read a single item by id and partition key.
    #[instrument(skip(self))]
    pub async fn read_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<Value> {
        let request = self
            .client()
            .resource_request(
                RequestMethod::Get,
                ResourceType::Documents,
                &self.document_link(container, id),
            )?
            .partition_key(partition_key);

        let response = match self.client().execute(request).await {
            Ok(response) => response,
            Err(err) => {
                return Err(match err.kind {
                    StoreErrorKind::NotFound(_) => Error::ItemNotFound {
                        id: id.to_string(),
                        container: container.to_string(),
                    },
                    _ => err.into(),
                })
            }
        };

        response.json().await.map_err(Into::into)
    }

    /// Upsert an item: replace if present, create otherwise.
    ///
    /// The item's `id` field must match the `id` parameter.
    #[instrument(skip(self, item))]
    pub async fn upsert_item(
        &self,
        container: &str,
        id: &str,
        item: &Value,
        partition_key: &str,
    ) -> Result<Value> {
        if item_id(item)? != id {
            return Err(Error::InvalidArgument(format!(
                "item 'id' field must match the id parameter '{id}'"
            )));
        }

        let request = self
            .client()
            .feed_request(
                RequestMethod::Post,
                ResourceType::Documents,
                &self.collection_link(container),
            )?
            .partition_key(partition_key)
            .is_upsert()
            .json(item)?;

        let response = match self.client().execute(request).await {
            Ok(response) => response,
            Err(err) => {
                return Err(match err.kind {
                    StoreErrorKind::NotFound(_) => {
                        Error::ResourceNotFound(container.to_string())
                    }
                    _ => err.into(),
                })
            }
        };

        let updated: Value = response.json().await?;
        info!(item = id, container, "Upserted item");
        Ok(updated)
    }

    /// Delete an item by id and partition key. Idempotent: deleting an
    /// absent item succeeds.
    #[instrument(skip(self))]
    pub async fn delete_item(
        &self,
        container: &str,
        id: &str,
        partition_key: &str,
    ) -> Result<()> {
        let request = self
            .client()
            .resource_request(
                RequestMethod::Delete,
                ResourceType::Documents,
                &self.document_link(container, id),
            )?
            .partition_key(partition_key);

        match self.client().execute(request).await {
            Ok(_) => {
                info!(item = id, container, "Deleted item");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                info!(item = id, container, "Item absent during delete");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// List items in a container, up to `max_count`.
    ///
    /// Runs `SELECT * FROM c` through the query core with `max_count` as
    /// both page size and item cap, so at most one page is fetched.
    #[instrument(skip(self))]
    pub async fn list_items(&self, container: &str, max_count: usize) -> Result<Vec<Value>> {
        let request = QueryRequest::new(container, "SELECT * FROM c")
            .with_cross_partition(true)
            .with_page_size(max_count.min(i32::MAX as usize) as i32)
            .with_max_items(max_count);

        let stream = self.query_items::<Value>(request)?;
        let (items, _charge) = stream.collect_all().await?;
        info!(count = items.len(), container, "Listed items");
        Ok(items)
    }
}
