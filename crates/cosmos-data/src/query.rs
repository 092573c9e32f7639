//! Query execution: continuation-driven pagination with request-unit
//! accounting.
//!
//! A query runs as a [`QueryStream`]: a lazy, forward-only sequence of
//! items. Pages are fetched one at a time, only when the consumer asks for
//! an item the buffer cannot satisfy, and never past the configured item
//! cap. The running request-charge total covers exactly the pages fetched
//! so far and is readable at any point of consumption.
//!
//! There is no retry: the first failed page fetch is yielded as the
//! stream's final element. Items already yielded stay valid.

use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use orbit_cosmos_client::{
    CosmosClient, ErrorKind as StoreErrorKind, RequestMethod, ResourceType,
};

use crate::error::{Error, Result};
use crate::models::DocumentFeed;

/// Default page size and item cap.
pub const DEFAULT_PAGE_SIZE: i32 = 100;
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// A query against one container.
///
/// `page_size` caps how many items the store returns per page;
/// `max_items` caps how many items the stream yields in total. Both
/// default to 100 and must be positive.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    container: String,
    text: String,
    cross_partition: bool,
    partition_key: Option<String>,
    page_size: i32,
    max_items: usize,
}

impl QueryRequest {
    /// Create a query request with default pagination settings.
    pub fn new(container: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            text: text.into(),
            cross_partition: false,
            partition_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    /// Opt in to queries that fan out across partitions.
    pub fn with_cross_partition(mut self, enabled: bool) -> Self {
        self.cross_partition = enabled;
        self
    }

    /// Scope the query to one partition key value.
    pub fn with_partition_key(mut self, value: impl Into<String>) -> Self {
        self.partition_key = Some(value.into());
        self
    }

    /// Set the per-page item cap.
    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the total item cap.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// The target container name.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// The query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check the request before any network round trip is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.container.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "container name cannot be empty".to_string(),
            ));
        }
        if self.text.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "query text cannot be empty".to_string(),
            ));
        }
        if self.page_size < 1 {
            return Err(Error::InvalidArgument(format!(
                "page size must be a positive integer, got {}",
                self.page_size
            )));
        }
        if self.max_items < 1 {
            return Err(Error::InvalidArgument(
                "max items must be a positive integer, got 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Query wire body: the SQL text plus named parameters.
#[derive(Debug, Clone, Serialize)]
pub struct QueryBody {
    pub query: String,
    pub parameters: Vec<QueryParameter>,
}

/// A named query parameter (`@name`).
#[derive(Debug, Clone, Serialize)]
pub struct QueryParameter {
    pub name: String,
    pub value: serde_json::Value,
}

/// Lazy, forward-only stream of query results.
///
/// Created by [`CosmosDatabaseClient::query_items`]; consumed exactly once.
/// Dropping the stream abandons it: no further page is fetched.
///
/// [`CosmosDatabaseClient::query_items`]: crate::CosmosDatabaseClient::query_items
pub struct QueryStream<T> {
    client: CosmosClient,
    collection_link: String,
    container: String,
    body: QueryBody,
    cross_partition: bool,
    partition_key: Option<String>,
    page_size: i32,
    max_items: usize,

    buffer: VecDeque<T>,
    continuation: Option<String>,
    started: bool,
    finished: bool,
    yielded: usize,
    pages_fetched: usize,
    charge: f64,
}

impl<T: DeserializeOwned> QueryStream<T> {
    pub(crate) fn new(
        client: CosmosClient,
        collection_link: String,
        request: QueryRequest,
    ) -> Self {
        Self {
            client,
            collection_link,
            container: request.container,
            body: QueryBody {
                query: request.text,
                parameters: Vec::new(),
            },
            cross_partition: request.cross_partition,
            partition_key: request.partition_key,
            page_size: request.page_size,
            max_items: request.max_items,
            buffer: VecDeque::new(),
            continuation: None,
            started: false,
            finished: false,
            yielded: 0,
            pages_fetched: 0,
            charge: 0.0,
        }
    }

    /// Pull the next item.
    ///
    /// Returns `None` once the stream is exhausted, capped, or failed. A
    /// page fetch happens only inside this call, and only when the
    /// buffered page is drained.
    pub async fn next(&mut self) -> Option<Result<T>> {
        loop {
            if self.finished || self.yielded >= self.max_items {
                self.finished = true;
                return None;
            }

            if let Some(item) = self.buffer.pop_front() {
                self.yielded += 1;
                return Some(Ok(item));
            }

            // Buffer drained: stop if the store reported no more pages.
            if self.started && self.continuation.is_none() {
                self.finished = true;
                return None;
            }

            if let Err(err) = self.fetch_page().await {
                self.finished = true;
                return Some(Err(err));
            }
        }
    }

    /// Collect up to the item cap into a vector, stopping at the first
    /// error.
    pub async fn collect_all(mut self) -> Result<(Vec<T>, f64)> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok((items, self.charge))
    }

    /// Running request-charge total, covering exactly the pages fetched so
    /// far.
    pub fn request_charge(&self) -> f64 {
        self.charge
    }

    /// Number of items yielded so far.
    pub fn items_yielded(&self) -> usize {
        self.yielded
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let mut request = self
            .client
            .feed_request(
                RequestMethod::Post,
                ResourceType::Documents,
                &self.collection_link,
            )?
            .query_json(&self.body)?
            .max_item_count(self.page_size);

        if let Some(ref value) = self.partition_key {
            request = request.partition_key(value);
        }
        if self.cross_partition {
            request = request.enable_cross_partition();
        }
        if let Some(ref token) = self.continuation {
            request = request.continuation(token);
        }

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                // A 404 on the documents feed means the container (or its
                // database) is absent; name it for the caller.
                return Err(match err.kind {
                    StoreErrorKind::NotFound(_) => {
                        Error::ResourceNotFound(self.container.clone())
                    }
                    _ => err.into(),
                });
            }
        };

        let page_charge = response.request_charge();
        self.charge += page_charge;
        self.continuation = response.continuation();
        self.started = true;
        self.pages_fetched += 1;

        let feed: DocumentFeed<T> = response.json().await?;
        debug!(
            container = %self.container,
            page = self.pages_fetched,
            items = feed.documents.len(),
            charge = page_charge,
            has_more = self.continuation.is_some(),
            "Fetched query page"
        );
        self.buffer.extend(feed.documents);
        Ok(())
    }
}

impl<T> std::fmt::Debug for QueryStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryStream")
            .field("container", &self.container)
            .field("yielded", &self.yielded)
            .field("pages_fetched", &self.pages_fetched)
            .field("charge", &self.charge)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
