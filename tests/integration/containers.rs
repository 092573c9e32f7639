//! Container lifecycle through the facade crate.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orbit::data::Error;

use super::common::client;

#[tokio::test]
async fn test_list_and_show_roundtrip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dbs/orbit/colls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "DocumentCollections": [
                {"id": "orders", "partitionKey": {"paths": ["/category"], "kind": "Hash"}}
            ],
            "_count": 1
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dbs/orbit/colls/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "orders",
            "partitionKey": {"paths": ["/category"], "kind": "Hash"}
        })))
        .mount(&server)
        .await;

    let client = client(&server.uri());

    let containers = client.list_containers().await.unwrap();
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].id, "orders");

    let properties = client.container_properties("orders").await.unwrap();
    assert_eq!(
        properties.partition_key.unwrap().paths,
        vec!["/category".to_string()]
    );
}

#[tokio::test]
async fn test_create_sends_partition_key_definition() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls"))
        .and(header("x-ms-offer-throughput", "500"))
        .and(wiremock::matchers::body_json(json!({
            "id": "orders",
            "partitionKey": {"paths": ["/category"], "kind": "Hash"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "orders",
            "partitionKey": {"paths": ["/category"], "kind": "Hash"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server.uri())
        .create_container("orders", "/category", Some(500))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_quota_exceeded_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "code": "TooManyRequests",
            "message": "Request rate is large. More Request Units may be needed."
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .create_container("orders", "/category", None)
        .await
        .unwrap_err();
    assert!(err.is_quota_exceeded(), "{err}");
}

#[tokio::test]
async fn test_delete_absent_container_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/dbs/orbit/colls/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "NotFound",
            "message": "Resource Not Found"
        })))
        .mount(&server)
        .await;

    client(&server.uri()).delete_container("gone").await.unwrap();
}

#[tokio::test]
async fn test_invalid_names_fail_without_network() {
    let client = client("http://127.0.0.1:9");

    let err = client
        .create_container("no spaces allowed", "/pk", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = client
        .create_container("orders", "missing-slash", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPartitionKey(_)));
}
