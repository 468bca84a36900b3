//! Integration tests for the request/response pipeline
//!
//! Drives the reqwest transport against a local wiremock server.

use serde_json::json;
use std::time::Duration;
use tvdb_client::{
    ClientConfig, LoginCredentials, Method, TransportError, TvdbClient, TvdbError,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TvdbClient {
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build();
    TvdbClient::new(config).unwrap()
}

#[tokio::test]
async fn test_headers_sent_to_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/series/80379"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 80379}})))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.set_token("test-token");
    client.set_version("2.2.0").unwrap();
    client.set_accepted_languages(["nl", "en"]).unwrap();

    let data = client
        .perform_api_call_with_json_response(Method::GET, "/series/80379")
        .await
        .unwrap();
    assert_eq!(data, json!({"id": 80379}));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert_eq!(headers.get("authorization").unwrap(), "Bearer test-token");
    assert_eq!(headers.get("accept").unwrap(), "application/vnd.thetvdb.v2.2.0");
    assert_eq!(headers.get("accept-language").unwrap(), "nl, en");
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
}

#[tokio::test]
async fn test_raw_body_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ABC"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let response = client.perform_api_call(Method::GET, "/raw").await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.text(), "ABC");

    let err = client
        .perform_api_call_with_json_response(Method::GET, "/raw")
        .await
        .unwrap_err();
    assert!(matches!(err, TvdbError::Parse { .. }));
}

#[tokio::test]
async fn test_status_classification() {
    let server = MockServer::start().await;

    Mock::given(path("/unauthorized"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"Error": "Not authorized"})))
        .mount(&server)
        .await;
    Mock::given(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert!(matches!(
        client.request_headers(Method::GET, "/unauthorized").await,
        Err(TvdbError::Unauthorized { .. })
    ));
    assert!(matches!(
        client.perform_api_call_with_json_response(Method::GET, "/missing").await,
        Err(TvdbError::ResourceNotFound { .. })
    ));

    let err = client.perform_api_call(Method::GET, "/broken").await.unwrap_err();
    assert!(matches!(
        err,
        TvdbError::Transport(TransportError::Status { status: 500, .. })
    ));
    assert_eq!(err.status_code(), Some(500));

    // One request per call, nothing retried
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_response_headers_exposed() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/series/80379"))
        .respond_with(ResponseTemplate::new(200).insert_header("Last-Modified", "Mon, 01 Jan 2018 00:00:00 GMT"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let headers = client.request_headers(Method::HEAD, "/series/80379").await.unwrap();
    assert_eq!(
        headers.get("last-modified").unwrap(),
        "Mon, 01 Jan 2018 00:00:00 GMT"
    );
}

#[tokio::test]
async fn test_connection_failure_propagates() {
    // Reserve a free port, then release it so connections are refused
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let config = ClientConfig::builder().base_url(uri).timeout(Duration::from_secs(2)).build();
    let client = TvdbClient::new(config).unwrap();

    let err = client.perform_api_call(Method::GET, "/languages").await.unwrap_err();
    assert!(matches!(err, TvdbError::Transport(TransportError::Request(_))));
}

#[tokio::test]
async fn test_login_then_paginated_query() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"apikey": "API-KEY"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "jwt-token"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/series/80379/episodes"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": {"first": 1, "last": 3, "next": 3, "prev": 1},
            "data": [{"id": 1}, {"id": 2}],
            "errors": {"invalidLanguage": "Some translations are not available in the language"}
        })))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.login(&LoginCredentials::new("API-KEY")).await.unwrap();
    assert_eq!(client.token(), Some("jwt-token"));

    let envelope = client
        .fetch_envelope_with_options(
            Method::GET,
            "/series/80379/episodes",
            tvdb_client::RequestOptions::new().query("page", "2"),
        )
        .await
        .unwrap();

    assert_eq!(envelope.payload, json!([{"id": 1}, {"id": 2}]));
    assert_eq!(envelope.link("next"), Some(3));
    assert_eq!(client.last_links().len(), 4);
    assert_eq!(client.last_json_errors().len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[1].headers.get("authorization").unwrap(), "Bearer jwt-token");
}
