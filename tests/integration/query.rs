//! End-to-end pagination, cost-accounting, and policy behavior.

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use orbit::data::{Error, QueryRequest};

use super::common::{client, documents, mount_paged_query, MissingHeader, Page, TEST_KEY};

/// 250 matching items, cap 100, page size 100: the stream yields exactly
/// 100 items from one page and never asks for the second.
#[tokio::test]
async fn test_cap_satisfied_by_first_page_fetches_nothing_more() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .and(MissingHeader("x-ms-continuation"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ms-request-charge", "5.75")
                .insert_header("x-ms-continuation", "page-1")
                .set_body_json(json!({"Documents": documents(0..100), "_count": 100})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // The continuation page exists upstream but must never be requested.
    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .and(header("x-ms-continuation", "page-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ms-request-charge", "5.75")
                .set_body_json(json!({"Documents": documents(100..250), "_count": 150})),
        )
        .expect(0)
        .mount(&server)
        .await;

    let request = QueryRequest::new("orders", "SELECT * FROM c")
        .with_partition_key("a")
        .with_page_size(100)
        .with_max_items(100);
    let mut stream = client(&server.uri()).query_items::<Value>(request).unwrap();

    let mut count = 0;
    while let Some(item) = stream.next().await {
        item.unwrap();
        count += 1;
    }

    assert_eq!(count, 100);
    assert_eq!(stream.pages_fetched(), 1);
    assert!((stream.request_charge() - 5.75).abs() < 1e-9);
}

/// Fewer matching items than the cap: the stream yields what exists and
/// terminates without error.
#[tokio::test]
async fn test_short_result_set_terminates_cleanly() {
    let server = MockServer::start().await;
    mount_paged_query(
        &server,
        "orders",
        &[Page {
            items: documents(0..10),
            charge: 2.25,
        }],
    )
    .await;

    let request = QueryRequest::new("orders", "SELECT * FROM c")
        .with_partition_key("a")
        .with_max_items(100);
    let mut stream = client(&server.uri()).query_items::<Value>(request).unwrap();

    let mut ids = Vec::new();
    while let Some(item) = stream.next().await {
        ids.push(item.unwrap()["id"].as_str().unwrap().to_string());
    }

    assert_eq!(ids.len(), 10);
    assert_eq!(ids[0], "item-0");
    assert_eq!(ids[9], "item-9");
    assert_eq!(stream.pages_fetched(), 1);
}

/// The running total equals the sum of per-page charges for exactly the
/// pages fetched.
#[tokio::test]
async fn test_charge_is_sum_of_fetched_pages() {
    let server = MockServer::start().await;
    mount_paged_query(
        &server,
        "orders",
        &[
            Page {
                items: documents(0..40),
                charge: 2.5,
            },
            Page {
                items: documents(40..80),
                charge: 3.25,
            },
            Page {
                items: documents(80..120),
                charge: 1.5,
            },
        ],
    )
    .await;

    let request = QueryRequest::new("orders", "SELECT * FROM c")
        .with_partition_key("a")
        .with_page_size(40)
        .with_max_items(120);
    let mut stream = client(&server.uri()).query_items::<Value>(request).unwrap();

    // The total is readable mid-consumption and reflects only fetched pages.
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first["id"], "item-0");
    assert!((stream.request_charge() - 2.5).abs() < 1e-9);

    let mut count = 1;
    while let Some(item) = stream.next().await {
        item.unwrap();
        count += 1;
    }

    assert_eq!(count, 120);
    assert_eq!(stream.pages_fetched(), 3);
    assert!((stream.request_charge() - 7.25).abs() < 1e-9);
}

/// Replaying the identical request against an unchanged store yields the
/// same items in the same order with the same total cost.
#[tokio::test]
async fn test_identical_request_is_idempotent() {
    let server = MockServer::start().await;
    mount_paged_query(
        &server,
        "orders",
        &[
            Page {
                items: documents(0..3),
                charge: 2.0,
            },
            Page {
                items: documents(3..6),
                charge: 2.0,
            },
        ],
    )
    .await;

    let run = || async {
        let request = QueryRequest::new("orders", "SELECT * FROM c")
            .with_partition_key("a")
            .with_page_size(3)
            .with_max_items(10);
        let stream = client(&server.uri()).query_items::<Value>(request).unwrap();
        stream.collect_all().await.unwrap()
    };

    let (first_items, first_charge) = run().await;
    let (second_items, second_charge) = run().await;

    assert_eq!(first_items, second_items);
    assert_eq!(first_charge, second_charge);
}

/// A page size of 1 returns the same items in the same order as a page
/// size of 100; only the fetch count and charge granularity differ.
#[tokio::test]
async fn test_page_size_does_not_change_content() {
    let server = MockServer::start().await;

    // "orders-small": five pages of one item, 1 RU each.
    let single_pages: Vec<Page> = (0..5)
        .map(|i| Page {
            items: documents(i..i + 1),
            charge: 1.0,
        })
        .collect();
    mount_paged_query(&server, "orders-small", &single_pages).await;

    // "orders-big": one page with all five items.
    mount_paged_query(
        &server,
        "orders-big",
        &[Page {
            items: documents(0..5),
            charge: 5.0,
        }],
    )
    .await;

    let ids = |container: &str, page_size: i32| {
        let uri = server.uri();
        let container = container.to_string();
        async move {
            let request = QueryRequest::new(&container, "SELECT * FROM c")
                .with_partition_key("a")
                .with_page_size(page_size)
                .with_max_items(100);
            let mut stream = client(&uri).query_items::<Value>(request).unwrap();
            let mut ids = Vec::new();
            while let Some(item) = stream.next().await {
                ids.push(item.unwrap()["id"].as_str().unwrap().to_string());
            }
            (ids, stream.pages_fetched())
        }
    };

    let (small_ids, small_pages) = ids("orders-small", 1).await;
    let (big_ids, big_pages) = ids("orders-big", 100).await;

    assert_eq!(small_ids, big_ids);
    assert_eq!(small_pages, 5);
    assert_eq!(big_pages, 1);
}

/// Cross-partition policy: no opt-in, no partition key, multi-partition
/// query. The failure names both remedies and no page is fetched.
#[tokio::test]
async fn test_cross_partition_rejection_incurs_no_cost() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .and(MissingHeader("x-ms-documentdb-query-enablecrosspartition"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "BadRequest",
            "message": "The provided cross partition query can not be directly served by the gateway."
        })))
        .mount(&server)
        .await;

    let request = QueryRequest::new("orders", "SELECT * FROM c");
    let mut stream = client(&server.uri()).query_items::<Value>(request).unwrap();

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(err.is_cross_partition_disallowed(), "{err}");
    let message = err.to_string();
    assert!(message.contains("cross-partition mode"), "{message}");
    assert!(message.contains("partition key"), "{message}");

    assert_eq!(stream.pages_fetched(), 0);
    assert_eq!(stream.request_charge(), 0.0);
    assert!(stream.next().await.is_none());
}

/// The same query with opt-in succeeds.
#[tokio::test]
async fn test_cross_partition_opt_in_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .and(header("x-ms-documentdb-query-enablecrosspartition", "True"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ms-request-charge", "9.8")
                .set_body_json(json!({"Documents": documents(0..4), "_count": 4})),
        )
        .mount(&server)
        .await;

    let request = QueryRequest::new("orders", "SELECT * FROM c").with_cross_partition(true);
    let stream = client(&server.uri()).query_items::<Value>(request).unwrap();
    let (items, charge) = stream.collect_all().await.unwrap();

    assert_eq!(items.len(), 4);
    assert!((charge - 9.8).abs() < 1e-9);
}

/// A typo'd query fails with the dialect's own message before any page is
/// fetched.
#[tokio::test]
async fn test_syntax_error_before_any_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "BadRequest",
            "message": "Syntax error, incorrect syntax near 'SELCT'."
        })))
        .mount(&server)
        .await;

    let request = QueryRequest::new("orders", "SELCT * FROM c").with_partition_key("a");
    let mut stream = client(&server.uri()).query_items::<Value>(request).unwrap();

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(err.is_query_syntax(), "{err}");
    assert!(err.to_string().contains("SELCT"));
    assert_eq!(stream.request_charge(), 0.0);
    assert_eq!(stream.pages_fetched(), 0);
}

/// Querying a missing collection names the collection in the failure.
#[tokio::test]
async fn test_missing_collection_is_named() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/missing/docs"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "NotFound",
            "message": "Resource Not Found"
        })))
        .mount(&server)
        .await;

    let request = QueryRequest::new("missing", "SELECT * FROM c").with_partition_key("a");
    let mut stream = client(&server.uri()).query_items::<Value>(request).unwrap();

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, Error::ResourceNotFound(ref name) if name == "missing"));
    assert!(err.to_string().contains("missing"));
    assert_eq!(stream.request_charge(), 0.0);
}

/// Reading 5 items of a 250-item result and abandoning the stream fetches
/// exactly one page and charges exactly that page.
#[tokio::test]
async fn test_abandoned_stream_stops_fetching() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .and(MissingHeader("x-ms-continuation"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ms-request-charge", "5.75")
                .insert_header("x-ms-continuation", "page-1")
                .set_body_json(json!({"Documents": documents(0..100), "_count": 100})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .and(header("x-ms-continuation", "page-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Documents": [], "_count": 0})))
        .expect(0)
        .mount(&server)
        .await;

    let request = QueryRequest::new("orders", "SELECT * FROM c")
        .with_partition_key("a")
        .with_page_size(100)
        .with_max_items(100);
    let mut stream = client(&server.uri()).query_items::<Value>(request).unwrap();

    for _ in 0..5 {
        stream.next().await.unwrap().unwrap();
    }

    assert_eq!(stream.items_yielded(), 5);
    assert_eq!(stream.pages_fetched(), 1);
    assert!((stream.request_charge() - 5.75).abs() < 1e-9);
    drop(stream);

    // Mock expectations assert on server drop: the second page was never
    // requested.
}

/// A store-side timeout propagates with guidance and is not retried.
#[tokio::test]
async fn test_store_timeout_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .respond_with(ResponseTemplate::new(408).set_body_json(json!({
            "code": "RequestTimeout",
            "message": "The request did not complete within the allotted time"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = QueryRequest::new("orders", "SELECT * FROM c").with_partition_key("a");
    let mut stream = client(&server.uri()).query_items::<Value>(request).unwrap();

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(err.is_timeout(), "{err}");
    assert!(err.to_string().contains("narrow the query scope"));
    assert!(stream.next().await.is_none());
}

/// A failed second page leaves the already-yielded first page valid: the
/// error arrives only on the pull that needed the bad page.
#[tokio::test]
async fn test_partial_results_survive_later_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .and(MissingHeader("x-ms-continuation"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-ms-request-charge", "3.0")
                .insert_header("x-ms-continuation", "page-1")
                .set_body_json(json!({"Documents": documents(0..3), "_count": 3})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dbs/orbit/colls/orders/docs"))
        .and(header("x-ms-continuation", "page-1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "code": "ServiceUnavailable",
            "message": "Service is currently unavailable"
        })))
        .mount(&server)
        .await;

    let request = QueryRequest::new("orders", "SELECT * FROM c")
        .with_partition_key("a")
        .with_page_size(3)
        .with_max_items(10);
    let mut stream = client(&server.uri()).query_items::<Value>(request).unwrap();

    let mut yielded = Vec::new();
    let mut failure = None;
    while let Some(item) = stream.next().await {
        match item {
            Ok(value) => yielded.push(value),
            Err(err) => failure = Some(err),
        }
    }

    // All of page one arrived before the failure.
    assert_eq!(yielded.len(), 3);
    assert!(failure.is_some());
    // Only the successful page was charged.
    assert!((stream.request_charge() - 3.0).abs() < 1e-9);
}

/// Transport failures never leak credential material into the message.
#[tokio::test]
async fn test_connection_failure_is_secret_free() {
    // Nothing listens on this port.
    let bad_client = client("http://127.0.0.1:9");
    let request = QueryRequest::new("orders", "SELECT * FROM c").with_partition_key("a");
    let mut stream = bad_client.query_items::<Value>(request).unwrap();

    let err = stream.next().await.unwrap().unwrap_err();
    let message = err.to_string();
    assert!(!message.contains(TEST_KEY), "{message}");
    assert_eq!(stream.request_charge(), 0.0);
}
