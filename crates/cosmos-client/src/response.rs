//! HTTP response handling with Cosmos-specific extensions.
//!
//! Besides body access, the wrapper exposes the headers the pagination and
//! cost-accounting layer depends on: `x-ms-request-charge` and
//! `x-ms-continuation`.

use serde::de::DeserializeOwned;

use crate::error::{sanitize_error_message, Error, ErrorKind, Result};

/// Wrapper around an HTTP response with Cosmos header accessors.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    /// Create a new Response from a reqwest::Response.
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// The request charge of this response, in request units.
    ///
    /// Absent or unparseable header reads as zero; a missing charge must
    /// not sink the whole page.
    pub fn request_charge(&self) -> f64 {
        self.header("x-ms-request-charge")
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    /// The continuation token for the next page, if more results exist.
    pub fn continuation(&self) -> Option<String> {
        self.header("x-ms-continuation").map(|s| s.to_string())
    }

    /// The server-assigned activity id, useful in support tickets.
    pub fn activity_id(&self) -> Option<&str> {
        self.header("x-ms-activity-id")
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.inner.json().await.map_err(Into::into)
    }

    /// Check for a Cosmos error response and convert it to the error
    /// taxonomy, consuming the response.
    pub async fn check_cosmos_error(self) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let body = self.inner.text().await.unwrap_or_default();
        Err(parse_error_response(status, &body))
    }
}

/// Cosmos error response body.
#[derive(Debug, serde::Deserialize)]
struct CosmosErrorResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Map a non-success status and error body onto the error taxonomy.
///
/// 400 responses are classified by body content: the gateway's
/// cross-partition rejection, query dialect errors, and partition-key
/// mismatches all arrive as BadRequest and are told apart by their
/// messages. Every message is sanitized before it enters an error value.
pub fn parse_error_response(status: u16, body: &str) -> Error {
    let (code, message) = match serde_json::from_str::<CosmosErrorResponse>(body) {
        Ok(err) => (err.code, sanitize_error_message(&err.message)),
        Err(_) => (String::new(), sanitize_error_message(body)),
    };

    let kind = match status {
        400 => classify_bad_request(&code, &message),
        401 => ErrorKind::Authentication(message),
        403 => ErrorKind::Authorization(message),
        404 => ErrorKind::NotFound(message),
        408 => ErrorKind::Timeout(format!(
            "{message}; narrow the query scope or raise the request deadline"
        )),
        409 => ErrorKind::Conflict(message),
        429 => ErrorKind::QuotaExceeded(message),
        _ => ErrorKind::Http { status, message },
    };

    Error::new(kind)
}

fn classify_bad_request(code: &str, message: &str) -> ErrorKind {
    let lowered = message.to_lowercase();

    // Ordering: the cross-partition rejection mentions "partition" too, so
    // it must be recognized before the generic partition-key check.
    if lowered.contains("cross partition") || lowered.contains("cross-partition") {
        return ErrorKind::CrossPartitionDisallowed(format!(
            "{message}; enable cross-partition mode or supply a partition key value"
        ));
    }
    if lowered.contains("syntax error") || message.contains("\"code\":\"SC") {
        return ErrorKind::QuerySyntax(message.to_string());
    }
    // The store spells this both "partition key" and "PartitionKey".
    if lowered.contains("partition key") || lowered.contains("partitionkey") {
        return ErrorKind::PartitionKeyMismatch(message.to_string());
    }

    ErrorKind::Http {
        status: 400,
        message: format!("{code}: {message}"),
    }
}
