//! Account credentials and connection-string parsing.
//!
//! All credential types implement custom Debug to redact sensitive data.

use crate::error::{Error, ErrorKind, Result};
use crate::{CONNECTION_STRING_ENV, ENDPOINT_ENV, KEY_ENV};

/// Credentials for a Cosmos DB account: endpoint URL plus master key.
///
/// The key is redacted in Debug output to prevent accidental exposure in
/// logs.
///
/// # Example
///
/// ```rust
/// use orbit_cosmos_auth::CosmosCredentials;
///
/// let creds = CosmosCredentials::from_connection_string(
///     "AccountEndpoint=https://myaccount.documents.azure.com:443/;AccountKey=c2VjcmV0;",
/// ).unwrap();
/// assert_eq!(creds.endpoint(), "https://myaccount.documents.azure.com:443");
/// ```
#[derive(Clone)]
pub struct CosmosCredentials {
    endpoint: String,
    key: String,
}

impl std::fmt::Debug for CosmosCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosCredentials")
            .field("endpoint", &self.endpoint)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl CosmosCredentials {
    /// Create credentials from an explicit endpoint and key.
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let key = key.into();

        if endpoint.is_empty() {
            return Err(Error::new(ErrorKind::MissingCredentials(
                "endpoint cannot be empty".to_string(),
            )));
        }
        if key.is_empty() {
            return Err(Error::new(ErrorKind::MissingCredentials(
                "account key cannot be empty".to_string(),
            )));
        }
        url::Url::parse(&endpoint)
            .map_err(|e| Error::with_source(ErrorKind::InvalidEndpoint(e.to_string()), e))?;

        Ok(Self { endpoint, key })
    }

    /// Parse credentials from an `AccountEndpoint=...;AccountKey=...;`
    /// connection string.
    ///
    /// Segment order is free and a trailing semicolon is optional. Unknown
    /// segments are ignored. Parse failures name the missing segment and
    /// never echo key material.
    pub fn from_connection_string(connection_string: &str) -> Result<Self> {
        let mut endpoint = None;
        let mut key = None;

        for segment in connection_string.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let Some((name, value)) = segment.split_once('=') else {
                return Err(Error::new(ErrorKind::InvalidConnectionString(
                    "expected semicolon-separated Name=Value segments".to_string(),
                )));
            };
            match name.trim() {
                "AccountEndpoint" => endpoint = Some(value.trim().to_string()),
                // Base64 keys contain '=' padding; split_once keeps it in value.
                "AccountKey" => key = Some(value.trim().to_string()),
                _ => {}
            }
        }

        let endpoint = endpoint.ok_or_else(|| {
            Error::new(ErrorKind::InvalidConnectionString(
                "AccountEndpoint segment not found".to_string(),
            ))
        })?;
        let key = key.ok_or_else(|| {
            Error::new(ErrorKind::InvalidConnectionString(
                "AccountKey segment not found".to_string(),
            ))
        })?;

        Self::new(endpoint, key)
    }

    /// Load credentials from environment variables.
    ///
    /// Reads `ORBIT_COSMOS_CONNECTION_STRING`, or the
    /// `ORBIT_COSMOS_ENDPOINT` + `ORBIT_COSMOS_KEY` pair. Supplying both
    /// forms is ambiguous and fails rather than silently preferring one.
    pub fn from_env() -> Result<Self> {
        let connection_string = non_empty_env(CONNECTION_STRING_ENV);
        let endpoint = non_empty_env(ENDPOINT_ENV);
        let key = non_empty_env(KEY_ENV);

        match (connection_string, endpoint, key) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                Err(Error::new(ErrorKind::AmbiguousConfiguration(format!(
                    "provide either {CONNECTION_STRING_ENV} or the \
                     {ENDPOINT_ENV}/{KEY_ENV} pair, not both"
                ))))
            }
            (Some(cs), None, None) => {
                tracing::info!("Using connection string credentials");
                Self::from_connection_string(&cs)
            }
            (None, Some(endpoint), Some(key)) => {
                tracing::info!("Using endpoint/key credentials");
                Self::new(endpoint, key)
            }
            (None, Some(_), None) => Err(Error::new(ErrorKind::MissingCredentials(format!(
                "{ENDPOINT_ENV} is set but {KEY_ENV} is not"
            )))),
            (None, None, Some(_)) => Err(Error::new(ErrorKind::MissingCredentials(format!(
                "{KEY_ENV} is set but {ENDPOINT_ENV} is not"
            )))),
            (None, None, None) => Err(Error::new(ErrorKind::MissingCredentials(format!(
                "set {CONNECTION_STRING_ENV} with your Cosmos DB connection string"
            )))),
        }
    }

    /// Well-known local emulator credentials.
    ///
    /// The emulator ships with a fixed, publicly documented key.
    pub fn emulator() -> Self {
        Self {
            endpoint: crate::EMULATOR_ENDPOINT.trim_end_matches('/').to_string(),
            key: crate::EMULATOR_KEY.to_string(),
        }
    }

    /// Get the account endpoint URL (no trailing slash).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the account master key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns true if the credentials appear to be usable (non-empty).
    pub fn is_valid(&self) -> bool {
        !self.endpoint.is_empty() && !self.key.is_empty()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
