//! High-level Cosmos client with signed, typed HTTP methods.
//!
//! `CosmosClient` combines account credentials with the HTTP client and
//! signs every outgoing request. Resource links follow the REST layout:
//! `dbs/{db}`, `dbs/{db}/colls/{coll}`, `dbs/{db}/colls/{coll}/docs/{id}`.
//!
//! ## Security
//!
//! The master key is redacted in Debug output and never appears in URLs,
//! logs, or error messages.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use crate::auth;
use crate::client::CosmosHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::Response;
use crate::API_VERSION;

/// REST resource type, as it appears in URLs and signature strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    Databases,
    Collections,
    Documents,
}

impl ResourceType {
    /// The path/signature segment for this resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Databases => "dbs",
            ResourceType::Collections => "colls",
            ResourceType::Documents => "docs",
        }
    }
}

/// High-level Cosmos DB account client.
///
/// Designed to be wrapped by the data-plane crate, which layers container
/// and item operations on top of the signed request primitives here.
#[derive(Clone)]
pub struct CosmosClient {
    http: CosmosHttpClient,
    endpoint: String,
    key: String,
    api_version: String,
}

impl std::fmt::Debug for CosmosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosClient")
            .field("endpoint", &self.endpoint)
            .field("key", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl CosmosClient {
    /// Create a new client for the given account endpoint and master key.
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        Self::with_config(endpoint, key, ClientConfig::default())
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(
        endpoint: impl Into<String>,
        key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = CosmosHttpClient::new(config)?;
        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            key: key.into(),
            api_version: API_VERSION.to_string(),
        })
    }

    /// Get the account endpoint (no trailing slash).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the REST API version sent with every request.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the full URL for a resource link, percent-encoding each
    /// segment. The signature string uses the raw link; only the URL is
    /// encoded.
    pub fn url(&self, link: &str) -> String {
        let encoded: Vec<String> = link
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.endpoint, encoded.join("/"))
    }

    /// Signed request addressing a single resource: the URL path and the
    /// signature resource link are the same.
    pub fn resource_request(
        &self,
        method: RequestMethod,
        resource_type: ResourceType,
        resource_link: &str,
    ) -> Result<RequestBuilder> {
        self.signed(method, resource_type, resource_link, resource_link)
    }

    /// Signed request addressing a feed (list, create, query): the URL
    /// gains a trailing type segment while the signature uses the parent
    /// link.
    pub fn feed_request(
        &self,
        method: RequestMethod,
        resource_type: ResourceType,
        parent_link: &str,
    ) -> Result<RequestBuilder> {
        let path = format!("{}/{}", parent_link, resource_type.as_str());
        self.signed(method, resource_type, parent_link, &path)
    }

    fn signed(
        &self,
        method: RequestMethod,
        resource_type: ResourceType,
        resource_link: &str,
        url_path: &str,
    ) -> Result<RequestBuilder> {
        let date = auth::request_date(chrono::Utc::now());
        let token = auth::authorization_token(
            method.as_str(),
            resource_type.as_str(),
            resource_link,
            &date,
            &self.key,
        )?;

        Ok(RequestBuilder::new(method, self.url(url_path))
            .header("authorization", token)
            .header("x-ms-date", date)
            .header("x-ms-version", &self.api_version))
    }

    /// Execute a prepared request.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(request).await
    }

    /// Signed GET with JSON response deserialization.
    #[instrument(skip(self), fields(link = %resource_link))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        resource_type: ResourceType,
        resource_link: &str,
    ) -> Result<T> {
        let request = self.resource_request(RequestMethod::Get, resource_type, resource_link)?;
        let response = self.execute(request).await?;
        response.json().await
    }

    /// Signed POST to a feed with JSON body and response.
    #[instrument(skip(self, body), fields(link = %parent_link))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        resource_type: ResourceType,
        parent_link: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .feed_request(RequestMethod::Post, resource_type, parent_link)?
            .json(body)?;
        let response = self.execute(request).await?;
        response.json().await
    }

    /// Signed DELETE of a single resource. Success is a 204 with no body.
    #[instrument(skip(self), fields(link = %resource_link))]
    pub async fn delete_resource(
        &self,
        resource_type: ResourceType,
        resource_link: &str,
    ) -> Result<()> {
        let request = self.resource_request(RequestMethod::Delete, resource_type, resource_link)?;
        self.execute(request).await?;
        Ok(())
    }
}
