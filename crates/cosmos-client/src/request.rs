//! HTTP request building with Cosmos-specific headers.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// The verb as it enters the signature string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

/// Builder for HTTP requests with Cosmos-specific options.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<RequestBody>,
}

/// Request body content.
#[derive(Debug)]
pub enum RequestBody {
    /// A JSON document body (`application/json`).
    Json(serde_json::Value),
    /// A query body (`application/query+json`).
    Query(serde_json::Value),
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Json(value));
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// Set a query body and mark the request as a query.
    ///
    /// Queries use the `application/query+json` content type and the
    /// `x-ms-documentdb-isquery` marker header.
    pub fn query_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.body = Some(RequestBody::Query(value));
        self.headers.insert(
            "Content-Type".to_string(),
            "application/query+json".to_string(),
        );
        self.headers
            .insert("x-ms-documentdb-isquery".to_string(), "True".to_string());
        Ok(self)
    }

    /// Cap the number of items the store may return in one page.
    pub fn max_item_count(mut self, count: i32) -> Self {
        self.headers
            .insert("x-ms-max-item-count".to_string(), count.to_string());
        self
    }

    /// Resume a paged read from a continuation token.
    ///
    /// The token is passed back verbatim, as required by the store.
    pub fn continuation(mut self, token: impl Into<String>) -> Self {
        self.headers
            .insert("x-ms-continuation".to_string(), token.into());
        self
    }

    /// Scope the request to one partition key value.
    ///
    /// The header carries the value as a JSON array.
    pub fn partition_key(mut self, value: &str) -> Self {
        let encoded = serde_json::json!([value]).to_string();
        self.headers
            .insert("x-ms-documentdb-partitionkey".to_string(), encoded);
        self
    }

    /// Opt in to queries that fan out across partitions.
    pub fn enable_cross_partition(mut self) -> Self {
        self.headers.insert(
            "x-ms-documentdb-query-enablecrosspartition".to_string(),
            "True".to_string(),
        );
        self
    }

    /// Turn a document create into an upsert.
    pub fn is_upsert(mut self) -> Self {
        self.headers
            .insert("x-ms-documentdb-is-upsert".to_string(), "True".to_string());
        self
    }

    /// Provision manual throughput on a container create.
    pub fn offer_throughput(mut self, request_units: i32) -> Self {
        self.headers
            .insert("x-ms-offer-throughput".to_string(), request_units.to_string());
        self
    }
}
