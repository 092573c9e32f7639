//! Item CRUD through the facade crate.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orbit::data::Error;

use super::common::client;

#[tokio::test]
async fn test_create_then_read_roundtrip() {
    let server = MockServer::start().await;
    let item = json!({"id": "order-1", "category": "electronics", "total": 129.99});

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .and(header("x-ms-documentdb-partitionkey", "[\"electronics\"]"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&item))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dbs/orbit/colls/orders/docs/order-1"))
        .and(header("x-ms-documentdb-partitionkey", "[\"electronics\"]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&item))
        .mount(&server)
        .await;

    let client = client(&server.uri());

    let created = client
        .create_item("orders", &item, "electronics")
        .await
        .unwrap();
    assert_eq!(created["id"], "order-1");

    let read = client
        .read_item("orders", "order-1", "electronics")
        .await
        .unwrap();
    assert_eq!(read["total"], 129.99);
}

#[tokio::test]
async fn test_duplicate_create_names_item() {
    let server = MockServer::start().await;
    let item = json!({"id": "order-1"});

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "Conflict",
            "message": "Entity with the specified id already exists in the system"
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .create_item("orders", &item, "a")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateItem(ref id) if id == "order-1"));
}

#[tokio::test]
async fn test_partition_key_mismatch_surfaces() {
    let server = MockServer::start().await;
    let item = json!({"id": "order-1", "category": "b"});

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "BadRequest",
            "message": "PartitionKey extracted from document doesn't match the one specified in the header"
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .create_item("orders", &item, "a")
        .await
        .unwrap_err();
    assert!(err.is_partition_key_mismatch(), "{err}");
}

#[tokio::test]
async fn test_item_validation_fails_without_network() {
    let client = client("http://127.0.0.1:9");

    // Missing id field.
    let err = client
        .create_item("orders", &json!({"category": "a"}), "a")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    // Empty partition key.
    let err = client
        .create_item("orders", &json!({"id": "x"}), "")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    // Mismatched id on upsert.
    let err = client
        .upsert_item("orders", "order-1", &json!({"id": "order-2"}), "a")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}
