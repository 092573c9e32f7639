//! Error types for cosmos-client.

/// Result type alias for cosmos-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for cosmos-client operations.
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

    /// Returns true if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout(_))
    }

    /// Returns true if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication(_))
    }

    /// Returns true if the target resource was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }
}

/// The kind of error that occurred.
///
/// This is the wire-level taxonomy: statuses and transport failures as the
/// store reports them. The data-plane crate translates `NotFound` and
/// `Conflict` into operation-specific errors that carry the resource
/// identity.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Caller misuse detected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Authentication error (HTTP 401).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authorization error (HTTP 403).
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists (HTTP 409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Partition key rejected by the store (HTTP 400).
    #[error("Partition key mismatch: {0}")]
    PartitionKeyMismatch(String),

    /// The query text was rejected by the store's SQL dialect (HTTP 400).
    #[error("Query syntax error: {0}")]
    QuerySyntax(String),

    /// A multi-partition query was issued without cross-partition opt-in.
    #[error("Cross-partition query is disabled: {0}")]
    CrossPartitionDisallowed(String),

    /// Request-unit quota or rate limit exceeded (HTTP 429).
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The store or transport gave up before the request completed
    /// (HTTP 408 or client-side deadline).
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Transport-level failure reaching the store.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unmapped HTTP failure.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout(
                "deadline exceeded; narrow the request or raise the timeout".to_string(),
            )
        } else if err.is_connect() {
            ErrorKind::Connection(sanitize_error_message(&err.to_string()))
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: sanitize_error_message(&err.to_string()),
            }
        } else {
            ErrorKind::Connection(sanitize_error_message(&err.to_string()))
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}

/// Sanitize an error message so it can never leak credential material.
///
/// - Redacts `AccountKey=...` connection-string segments
/// - Redacts `sig=...` signature parameters (both raw and URL-encoded)
/// - Truncates messages longer than 500 characters
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    let key_pattern = regex_lite::Regex::new(r"AccountKey=[^;\s]+").unwrap();
    sanitized = key_pattern
        .replace_all(&sanitized, "AccountKey=[REDACTED]")
        .to_string();

    let sig_pattern = regex_lite::Regex::new(r"sig(=|%3[Dd])[A-Za-z0-9+/%]+={0,2}").unwrap();
    sanitized = sig_pattern.replace_all(&sanitized, "sig=[REDACTED]").to_string();

    if sanitized.len() > MAX_LENGTH {
        sanitized.truncate(MAX_LENGTH);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
