//! Retry behaviour against a local mock server.

use std::time::Duration;

use resilient_http::{HeaderMap, HttpError, Method, ResilientClient, RetryPolicy};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client() -> ResilientClient {
    ResilientClient::new().with_policy(RetryPolicy {
        max_attempts: 6,
        base_delay: Duration::from_millis(1),
    })
}

/// Mounts `failures` failing responses followed by one success.
async fn flaky_server(failures: u64) -> MockServer {
    let server = MockServer::start().await;

    if failures > 0 {
        Mock::given(method("GET"))
            .and(path("/members"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .up_to_n_times(failures)
            .expect(failures)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/members"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn succeeds_after_each_possible_number_of_failures() {
    let client = fast_client();

    for failures in 0..6 {
        let server = flaky_server(failures).await;
        let url = format!("{}/members", server.uri());

        let body = assert_ok!(client.call(Method::GET, &url, &HeaderMap::new(), None).await);

        assert_eq!(&body[..], b"[]");
        // failures + 1 requests in total
        server.verify().await;
    }
}

#[tokio::test]
async fn six_failures_surface_terminal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(6)
        .mount(&server)
        .await;

    let url = format!("{}/members", server.uri());
    let err = assert_err!(
        fast_client()
            .call(Method::GET, &url, &HeaderMap::new(), None)
            .await
    );

    match err {
        HttpError::ExhaustedRetries {
            attempts,
            last_error,
            ..
        } => {
            assert_eq!(attempts, 6);
            assert!(last_error.contains("500"));
            assert!(last_error.contains("boom"));
        }
    }
}

#[tokio::test]
async fn client_errors_are_retried_like_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let client = ResilientClient::new().with_policy(RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::ZERO,
    });

    let result = client
        .call(Method::GET, &server.uri(), &HeaderMap::new(), None)
        .await;

    assert!(matches!(
        result,
        Err(HttpError::ExhaustedRetries { attempts: 3, .. })
    ));
}

#[tokio::test]
async fn network_errors_are_retried() {
    // nothing listens on port 1
    let uri = "http://127.0.0.1:1/members";

    let client = ResilientClient::new().with_policy(RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::ZERO,
    });

    let err = assert_err!(client.call(Method::GET, uri, &HeaderMap::new(), None).await);

    assert!(err.to_string().contains("after 2 attempts"));
}

#[tokio::test]
async fn forwards_headers_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/members/abcde"))
        .and(header("Authorization", "token-123"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(r#"{"pronouns":"they/them"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("Authorization", "token-123".parse().unwrap());
    headers.insert("Content-Type", "application/json".parse().unwrap());

    let url = format!("{}/members/abcde", server.uri());
    let body: &[u8] = br#"{"pronouns":"they/them"}"#;

    assert_ok!(
        fast_client()
            .call(Method::PATCH, &url, &headers, Some(body))
            .await
    );
}

#[tokio::test]
async fn empty_success_body_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let body = assert_ok!(
        fast_client()
            .call(Method::GET, &server.uri(), &HeaderMap::new(), None)
            .await
    );

    assert!(body.is_empty());
}
