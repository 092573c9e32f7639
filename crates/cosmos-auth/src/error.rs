//! Error types for cosmos-auth.

/// Result type alias for cosmos-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for credential loading and parsing.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }
}

/// The kind of credential error that occurred.
///
/// Messages name the variable or segment at fault; they never contain key
/// material.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// No usable credentials were found.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// A connection string could not be parsed.
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// More than one credential source was supplied.
    #[error("Ambiguous configuration: {0}")]
    AmbiguousConfiguration(String),

    /// The endpoint is not a valid URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
