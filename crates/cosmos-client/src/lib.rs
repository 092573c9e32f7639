//! # cosmos-client
//!
//! Core HTTP client infrastructure for the Cosmos DB REST API.
//!
//! This crate provides the foundational HTTP client with:
//! - Per-request master-key signatures (HMAC-SHA256 over the canonical
//!   verb/resource/date string)
//! - Cosmos error-body parsing and status mapping
//! - Request-charge and continuation-token header accessors
//! - Connection pooling and per-request deadlines
//! - Request/response tracing
//!
//! There is deliberately no retry layer: a failed request is a terminal
//! failure surfaced to the caller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (cosmos-data, cli)                                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CosmosClient                            │
//! │  - Holds endpoint + master key                              │
//! │  - Signs every request (authorization, x-ms-date, version)  │
//! │  - Provides typed JSON methods (get_json, post_json, ...)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   CosmosHttpClient                          │
//! │  - Raw HTTP with pooling and deadlines                      │
//! │  - Request building with Cosmos headers                     │
//! │  - Error-body parsing and status mapping                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security
//!
//! The master key is redacted in Debug output, tracing spans skip
//! credential parameters, and every error message passes through a
//! sanitizer that strips `AccountKey=...` and `sig=...` material.

pub mod auth;
mod client;
mod config;
mod cosmos_client;
mod error;
mod request;
mod response;

pub use client::CosmosHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use cosmos_client::{CosmosClient, ResourceType};
pub use error::{sanitize_error_message, Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::{parse_error_response, Response};

/// REST API version sent as `x-ms-version` on every request.
pub const API_VERSION: &str = "2018-12-31";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("orbit/", env!("CARGO_PKG_VERSION"));
