//! Master-key request signatures.
//!
//! Every data-plane request carries an `authorization` header of the form
//! `type=master&ver=1.0&sig=<base64 HMAC-SHA256>`, URL-encoded. The
//! signature covers the lowercased verb, the resource type, the resource
//! link, and the lowercased `x-ms-date` value, each terminated by a
//! newline, with an empty trailing line:
//!
//! ```text
//! {verb}\n{resource_type}\n{resource_link}\n{x-ms-date}\n\n
//! ```
//!
//! The HMAC key is the base64-decoded account master key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, ErrorKind, Result};

type HmacSha256 = Hmac<Sha256>;

/// Compute the URL-encoded authorization token for one request.
///
/// `verb` is the HTTP method (any case), `resource_type` the REST resource
/// segment (`dbs`, `colls`, `docs`), and `resource_link` the link of the
/// resource being addressed (e.g. `dbs/orbit/colls/orders`; empty for the
/// account root). `date` must be the exact `x-ms-date` header value.
pub fn authorization_token(
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
    key: &str,
) -> Result<String> {
    let decoded_key = BASE64.decode(key).map_err(|e| {
        Error::with_source(
            ErrorKind::Config("account key is not valid base64".to_string()),
            e,
        )
    })?;

    let string_to_sign = format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_type,
        resource_link,
        date.to_lowercase()
    );

    let mut mac = HmacSha256::new_from_slice(&decoded_key).map_err(|e| {
        Error::with_source(ErrorKind::Config("account key rejected by HMAC".to_string()), e)
    })?;
    mac.update(string_to_sign.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    let token = format!("type=master&ver=1.0&sig={signature}");
    Ok(urlencoding::encode(&token).into_owned())
}

/// Format a timestamp as the lowercased RFC 1123 value Cosmos expects in
/// `x-ms-date`.
pub fn request_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
        .to_lowercase()
}
