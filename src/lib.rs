//! # orbit
//!
//! A command-line client and client library for Azure Cosmos DB.
//!
//! This facade crate re-exports the workspace members so applications can
//! depend on a single crate:
//!
//! - **orbit-cosmos-client** - Core HTTP client infrastructure: master-key
//!   request signing, error mapping, request-charge headers
//! - **orbit-cosmos-auth** - Credentials: connection-string parsing,
//!   environment loading, emulator detection
//! - **orbit-cosmos-data** - Data plane: container lifecycle, item CRUD,
//!   and paged query execution with request-unit accounting
//!
//! The `orbit` binary (the CLI) lives in the `orbit-cli` crate.
//!
//! ## Security
//!
//! - Account keys are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages pass through a sanitizer that strips key material
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orbit::auth::CosmosCredentials;
//! use orbit::data::{CosmosDatabaseClient, QueryRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = CosmosCredentials::from_env()?;
//!     let client = CosmosDatabaseClient::new(
//!         creds.endpoint(),
//!         creds.key(),
//!         "orbit",
//!     )?;
//!
//!     let request = QueryRequest::new("orders", "SELECT * FROM c")
//!         .with_partition_key("electronics")
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

#[cfg(feature = "client")]
pub use orbit_cosmos_client as client;

#[cfg(feature = "auth")]
pub use orbit_cosmos_auth as auth;

#[cfg(feature = "data")]
pub use orbit_cosmos_data as data;

// Convenience re-exports of the types most callers need.
#[cfg(feature = "auth")]
pub use orbit_cosmos_auth::CosmosCredentials;

#[cfg(feature = "data")]
pub use orbit_cosmos_data::{CosmosDatabaseClient, QueryRequest, QueryStream};
