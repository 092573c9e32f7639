//! Shared fixtures for the integration suite.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use orbit::data::CosmosDatabaseClient;

/// A base64 string shaped like an account key; not a real credential.
pub const TEST_KEY: &str = "dGhpcy1pcy1ub3QtYS1yZWFsLWtleQ==";

/// The database every test targets.
pub const TEST_DATABASE: &str = "orbit";

pub fn client(uri: &str) -> CosmosDatabaseClient {
    CosmosDatabaseClient::new(uri, TEST_KEY, TEST_DATABASE).unwrap()
}

/// Items `item-0..item-n` with a category field.
pub fn documents(range: std::ops::Range<usize>) -> Vec<Value> {
    range
        .map(|i| json!({"id": format!("item-{i}"), "category": "a"}))
        .collect()
}

/// Matches requests that do NOT carry the given header. wiremock only
/// ships positive matchers, and the first page of a paged read is
/// distinguished precisely by the absence of `x-ms-continuation`.
pub struct MissingHeader(pub &'static str);

impl wiremock::Match for MissingHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key(self.0)
    }
}

/// One page of a paged query fixture.
pub struct Page {
    pub items: Vec<Value>,
    pub charge: f64,
}

/// Mount a sequence of query pages for `container`. Page `i` is served
/// when the request carries continuation token `page-{i}` (no token for
/// the first page); every page except the last hands out the next token.
pub async fn mount_paged_query(server: &MockServer, container: &str, pages: &[Page]) {
    let docs_path = format!("/dbs/{TEST_DATABASE}/colls/{container}/docs");

    for (i, page) in pages.iter().enumerate() {
        let mut template = ResponseTemplate::new(200)
            .insert_header("x-ms-request-charge", page.charge.to_string().as_str())
            .set_body_json(json!({
                "Documents": page.items,
                "_count": page.items.len()
            }));
        if i + 1 < pages.len() {
            template = template.insert_header("x-ms-continuation", format!("page-{}", i + 1).as_str());
        }

        let mock = Mock::given(method("POST")).and(path(docs_path.as_str()));
        let mock = if i == 0 {
            mock.and(MissingHeader("x-ms-continuation"))
        } else {
            mock.and(header("x-ms-continuation", format!("page-{i}").as_str()))
        };
        mock.respond_with(template).mount(server).await;
    }
}
