//! # cosmos-data
//!
//! Cosmos DB data-plane client: container lifecycle, item CRUD, and paged
//! query execution with request-unit accounting.
//!
//! ## Features
//!
//! - **Container lifecycle** - list, create, delete, read properties
//! - **Item CRUD** - create, read, upsert, delete individual documents
//! - **Queries** - SQL-dialect queries as a lazy [`QueryStream`]: pages are
//!   fetched on demand via continuation tokens, request-unit cost is
//!   aggregated across exactly the pages fetched, and consumption stops at
//!   the configured item cap without fetching further pages
//!
//! ## Example
//!
//! ```rust,ignore
//! use orbit_cosmos_data::{CosmosDatabaseClient, QueryRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), orbit_cosmos_data::Error> {
//!     let client = CosmosDatabaseClient::new(
//!         "https://localhost:8081",
//!         "account_key_here",
//!         "orbit",
//!     )?;
//!
//!     let request = QueryRequest::new("orders", "SELECT * FROM c")
//!         .with_page_size(100)
//!         .with_max_items(100);
//!
//!     let mut stream = client.query_items::<serde_json::Value>(request)?;
//!     while let Some(item) = stream.next().await {
//!         println!("{}", item?);
//!     }
//!     println!("cost: {} RU", stream.request_charge());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
mod query;

pub use client::CosmosDatabaseClient;
pub use error::{Error, Result};
pub use models::{
    ContainerFeed, ContainerProperties, DocumentFeed, PartitionKeyDefinition,
};
pub use query::{QueryBody, QueryParameter, QueryRequest, QueryStream};

// Re-export the wire-level error kind so callers can match passthrough
// failures without depending on the client crate directly.
pub use orbit_cosmos_client::ErrorKind as StoreErrorKind;

/// Default throughput for new containers, in RU/s (the minimum manual
/// throughput).
pub const DEFAULT_THROUGHPUT: i32 = 400;
