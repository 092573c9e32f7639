//! Domain errors for data-plane operations.
//!
//! Wire-level failures arrive as `orbit_cosmos_client::Error`; call sites
//! translate the ones whose meaning depends on the operation (404 on a
//! container read vs. an item read, 409 on a container create vs. an item
//! create) into variants that carry the resource identity. Everything else
//! passes through transparently.

use orbit_cosmos_client::ErrorKind as StoreErrorKind;

/// Result type alias for data-plane operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for data-plane operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller misuse detected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The target container (or its database) does not exist.
    #[error("Container '{0}' not found")]
    ResourceNotFound(String),

    /// The requested item does not exist.
    #[error("Item '{id}' not found in container '{container}'")]
    ItemNotFound { id: String, container: String },

    /// A container with this name already exists.
    #[error("Container '{0}' already exists")]
    ResourceExists(String),

    /// An item with this id already exists in the partition.
    #[error("Item with id '{0}' already exists in partition")]
    DuplicateItem(String),

    /// A partition key path failed local validation.
    #[error("Invalid partition key path '{0}': must start with '/'")]
    InvalidPartitionKey(String),

    /// Any failure reported by the store or transport, already mapped onto
    /// the wire-level taxonomy (query syntax, cross-partition policy,
    /// timeout, connection, quota, ...).
    #[error(transparent)]
    Store(#[from] orbit_cosmos_client::Error),
}

impl Error {
    /// Returns true if the query text was rejected by the store's dialect.
    pub fn is_query_syntax(&self) -> bool {
        matches!(self, Error::Store(e) if matches!(e.kind, StoreErrorKind::QuerySyntax(_)))
    }

    /// Returns true if a multi-partition query was issued without opt-in.
    pub fn is_cross_partition_disallowed(&self) -> bool {
        matches!(
            self,
            Error::Store(e) if matches!(e.kind, StoreErrorKind::CrossPartitionDisallowed(_))
        )
    }

    /// Returns true if the store or transport gave up before completing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Store(e) if e.is_timeout())
    }

    /// Returns true if the partition key was rejected by the store.
    pub fn is_partition_key_mismatch(&self) -> bool {
        matches!(
            self,
            Error::Store(e) if matches!(e.kind, StoreErrorKind::PartitionKeyMismatch(_))
        )
    }

    /// Returns true if the request-unit quota or rate limit was exceeded.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Error::Store(e) if matches!(e.kind, StoreErrorKind::QuotaExceeded(_)))
    }
}
