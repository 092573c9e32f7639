//! # cosmos-auth
//!
//! Credential handling for Azure Cosmos DB accounts.
//!
//! This crate owns everything that touches account secrets before a request
//! is signed:
//! - Connection-string parsing (`AccountEndpoint=...;AccountKey=...;`)
//! - Environment-variable loading with ambiguity detection
//! - Well-known emulator credentials and emulator endpoint detection
//!
//! ## Security
//!
//! Account keys are redacted in Debug output, and error messages produced by
//! this crate never echo key material.
//!
//! ## Example
//!
//! ```rust,ignore
//! use orbit_cosmos_auth::CosmosCredentials;
//!
//! let creds = CosmosCredentials::from_env()?;
//! println!("endpoint: {}", creds.endpoint());
//! ```

mod credentials;
mod emulator;
mod error;

pub use credentials::CosmosCredentials;
pub use emulator::{is_emulator, EMULATOR_ENDPOINT, EMULATOR_KEY};
pub use error::{Error, ErrorKind, Result};

/// Environment variable holding a full connection string.
pub const CONNECTION_STRING_ENV: &str = "ORBIT_COSMOS_CONNECTION_STRING";

/// Environment variable holding the account endpoint URL.
pub const ENDPOINT_ENV: &str = "ORBIT_COSMOS_ENDPOINT";

/// Environment variable holding the account master key.
pub const KEY_ENV: &str = "ORBIT_COSMOS_KEY";
