//! PluralKit client against a mock server.

use std::time::{Duration, Instant};

use pluralkit_client::{MemberPatch, PluralKitClient, PluralKitError};
use resilient_http::RetryPolicy;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PluralKitClient {
    PluralKitClient::new("pk-token")
        .with_base_url(server.uri())
        .with_pacing(Duration::ZERO)
        .with_retry_policy(RetryPolicy {
            max_attempts: 2,
            base_delay: Duration::ZERO,
        })
}

fn member_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "uuid": format!("uuid-{}", id),
        "name": name,
        "display_name": null,
        "pronouns": null,
        "avatar_url": null,
        "description": null,
        "color": null
    })
}

#[tokio::test]
async fn roster_is_fetched_once_and_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/@me/members"))
        .and(header("Authorization", "pk-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([member_json("aaaaa", "Alex"), member_json("bbbbb", "Sam")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert_ok!(client.list_members().await);
    let members = assert_ok!(client.list_members().await);

    assert_eq!(members.len(), 2);
    assert_eq!(members[1].uuid(), "uuid-bbbbb");
}

#[tokio::test]
async fn fronters_preserve_reported_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/@me/fronters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "switch-1",
            "timestamp": "2024-01-01T00:00:00Z",
            "members": [member_json("bbbbb", "Sam"), member_json("aaaaa", "Alex")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fronters = assert_ok!(client_for(&server).list_current_fronters().await);

    assert_eq!(fronters, vec!["bbbbb", "aaaaa"]);
}

#[tokio::test]
async fn no_switch_means_no_fronters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/@me/fronters"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let fronters = assert_ok!(client_for(&server).list_current_fronters().await);

    assert!(fronters.is_empty());
}

#[tokio::test]
async fn null_fronters_body_means_no_fronters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/@me/fronters"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let fronters = assert_ok!(client_for(&server).list_current_fronters().await);

    assert!(fronters.is_empty());
}

#[tokio::test]
async fn update_member_patches_by_short_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/members/aaaaa"))
        .and(body_json(json!({
            "id": "aaaaa",
            "uuid": "uuid-aaaaa",
            "color": "112233",
            "keep_proxy": false,
            "pronouns": "they/them"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(member_json("aaaaa", "Alex")))
        .expect(1)
        .mount(&server)
        .await;

    let patch = MemberPatch {
        id: "aaaaa".into(),
        uuid: "uuid-aaaaa".into(),
        color: Some("112233".into()),
        pronouns: Some("they/them".into()),
        ..Default::default()
    };

    assert_ok!(client_for(&server).update_member(&patch).await);
}

#[tokio::test]
async fn set_fronters_posts_ordered_switch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/systems/@me/switches"))
        .and(body_json(json!({"members": ["bbbbb", "aaaaa"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "switch-2"})))
        .expect(1)
        .mount(&server)
        .await;

    let lineup = vec!["bbbbb".to_string(), "aaaaa".to_string()];

    assert_ok!(client_for(&server).set_fronters(&lineup).await);
}

#[tokio::test]
async fn every_request_is_paced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/@me/fronters"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).with_pacing(Duration::from_millis(50));

    let started = Instant::now();
    assert_ok!(client.list_current_fronters().await);
    assert_ok!(client.list_current_fronters().await);

    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn failed_write_surfaces_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2)
        .mount(&server)
        .await;

    let result = client_for(&server).set_fronters(&[]).await;

    assert!(matches!(result, Err(PluralKitError::Http(_))));
}
