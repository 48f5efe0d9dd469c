//! Integration tests for the HTTP client functionality.
//!
//! These tests verify the client configuration, request building,
//! response parsing, and retry behavior.

use serde_json::json;
use shopify_bulk::clients::{DataType, HttpClient, HttpMethod, HttpRequest, HttpResponse};
use shopify_bulk::{HostUrl, HttpError, Session, ShopDomain, ShopifyConfig};
use std::collections::HashMap;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test session with the given shop domain.
fn create_test_session(shop: &str, access_token: &str) -> Session {
    Session::new(ShopDomain::new(shop).unwrap(), access_token)
}

fn mock_config(server: &MockServer) -> ShopifyConfig {
    ShopifyConfig::builder()
        .host(HostUrl::new(server.uri()).unwrap())
        .user_agent_prefix("TestApp/1.0")
        .build()
        .unwrap()
}

// ============================================================================
// Integration Tests
// ============================================================================

#[tokio::test]
async fn test_full_workflow_session_to_client_to_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/api/2025-10/shop.json"))
        .and(query_param("fields", "name"))
        .and(header("X-Shopify-Access-Token", "test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "req-1")
                .set_body_json(json!({ "shop": { "name": "Test" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = create_test_session("test-shop", "test-token");
    let client = HttpClient::new("/admin/api/2025-10", &session, Some(&mock_config(&server)));

    let request = HttpRequest::builder(HttpMethod::Get, "shop.json")
        .query_param("fields", "name")
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.request_id(), Some("req-1"));
    assert_eq!(response.body["shop"]["name"], "Test");
}

#[tokio::test]
async fn test_server_errors_are_retried_until_max_tries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&server)
        .await;

    let session = create_test_session("test-shop", "test-token");
    let client = HttpClient::new("/admin/api/2025-10", &session, Some(&mock_config(&server)));

    let request = HttpRequest::builder(HttpMethod::Post, "graphql.json")
        .body(json!({ "query": "{ shop { name } }" }))
        .body_type(DataType::Json)
        .tries(2)
        .build()
        .unwrap();
    let err = client.request(request).await.unwrap_err();

    match err {
        HttpError::MaxRetries(e) => {
            assert_eq!(e.code, 429);
            assert_eq!(e.tries, 2);
        }
        other => panic!("expected max retries error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": "Not Found" })))
        .expect(1)
        .mount(&server)
        .await;

    let session = create_test_session("test-shop", "test-token");
    let client = HttpClient::new("/admin/api/2025-10", &session, Some(&mock_config(&server)));

    let request = HttpRequest::builder(HttpMethod::Get, "missing.json")
        .tries(3)
        .build()
        .unwrap();
    let err = client.request(request).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("Not Found"));
}

#[tokio::test]
async fn test_invalid_request_produces_correct_error() {
    let result = HttpRequest::builder(HttpMethod::Post, "graphql.json").build();

    assert!(matches!(
        result,
        Err(shopify_bulk::InvalidHttpRequestError::MissingBody { .. })
    ));

    let request = HttpRequest {
        http_method: HttpMethod::Get,
        path: "test".to_string(),
        body: Some(json!({"key": "value"})),
        body_type: None,
        query: None,
        extra_headers: None,
        tries: 1,
    };

    assert!(matches!(
        request.verify(),
        Err(shopify_bulk::InvalidHttpRequestError::MissingBodyType)
    ));
}

#[tokio::test]
async fn test_multi_tenant_multiple_clients_with_different_sessions() {
    let session1 = create_test_session("shop-one", "token-1");
    let session2 = create_test_session("shop-two", "token-2");

    let client1 = HttpClient::new("/admin/api/2025-10", &session1, None);
    let client2 = HttpClient::new("/admin/api/2025-10", &session2, None);

    assert_eq!(client1.base_uri(), "https://shop-one.myshopify.com");
    assert_eq!(client2.base_uri(), "https://shop-two.myshopify.com");

    assert_eq!(
        client1.default_headers().get("X-Shopify-Access-Token"),
        Some(&"token-1".to_string())
    );
    assert_eq!(
        client2.default_headers().get("X-Shopify-Access-Token"),
        Some(&"token-2".to_string())
    );
}

#[tokio::test]
async fn test_request_with_all_options() {
    let mut extra_headers = HashMap::new();
    extra_headers.insert("X-Custom-Header".to_string(), "custom-value".to_string());

    let request = HttpRequest::builder(HttpMethod::Post, "graphql.json")
        .body(json!({ "query": "{ shop { name } }" }))
        .body_type(DataType::Json)
        .query_param("debug", "true")
        .extra_headers(extra_headers)
        .tries(3)
        .build()
        .unwrap();

    assert_eq!(request.http_method, HttpMethod::Post);
    assert_eq!(request.path, "graphql.json");
    assert_eq!(request.body_type, Some(DataType::Json));
    assert!(request.query.as_ref().unwrap().contains_key("debug"));
    assert!(request
        .extra_headers
        .as_ref()
        .unwrap()
        .contains_key("X-Custom-Header"));
    assert_eq!(request.tries, 3);
}

#[test]
fn test_response_parsing_query_cost() {
    let mut headers = HashMap::new();
    headers.insert("x-request-id".to_string(), vec!["req-12345".to_string()]);

    let response = HttpResponse::new(
        200,
        headers,
        json!({
            "data": {},
            "extensions": { "cost": {
                "requestedQueryCost": 12,
                "actualQueryCost": 10,
                "throttleStatus": {
                    "maximumAvailable": 2000.0,
                    "currentlyAvailable": 1990.0,
                    "restoreRate": 100.0
                }
            }}
        }),
    );

    let cost = response.query_cost().unwrap();
    assert_eq!(response.request_id(), Some("req-12345"));
    assert!((cost.requested_query_cost - 12.0).abs() < f64::EPSILON);
    assert!((cost.throttle_status.restore_rate - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_client_default_headers() {
    let session = create_test_session("my-shop", "my-token");
    let config = ShopifyConfig::builder()
        .user_agent_prefix("MyApp/2.0")
        .build()
        .unwrap();
    let client = HttpClient::new("/admin/api/2025-10", &session, Some(&config));

    let headers = client.default_headers();

    let user_agent = headers.get("User-Agent").unwrap();
    assert!(user_agent.starts_with("MyApp/2.0 | "));
    assert!(user_agent.contains("Shopify Bulk Client"));
    assert!(user_agent.contains("Rust"));

    assert_eq!(headers.get("Accept"), Some(&"application/json".to_string()));
    assert!(!headers.contains_key("Host"));
}

#[tokio::test]
async fn test_client_without_access_token() {
    let session = Session::new(ShopDomain::new("my-shop").unwrap(), "");
    let client = HttpClient::new("/admin/api/2025-10", &session, None);

    assert!(!client
        .default_headers()
        .contains_key("X-Shopify-Access-Token"));
}
