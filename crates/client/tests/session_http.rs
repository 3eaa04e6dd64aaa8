//! End-to-end tests over a real HTTP boundary.
//!
//! The answer service is played by a request-intercepting mock server, the
//! same role the dev-mode interception layer fills for the UI, so these
//! tests exercise the full path: sanitize, cache probe, wire request,
//! populate, sync.

use spotlight_client::{AnswerClient, AnswerConfig, AnswerError, AnswerService, Session, SyncError};
use spotlight_core::CacheDb;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn session_against(server: &MockServer) -> (Session, CacheDb) {
    let config = AnswerConfig { base_url: server.uri(), ..Default::default() };
    let client = AnswerClient::new(config).unwrap();
    let cache = CacheDb::open_in_memory().await.unwrap();
    (Session::new(cache.clone(), Arc::new(client)), cache)
}

#[tokio::test]
async fn send_fetches_once_then_hits_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/spotlight"))
        .and(query_param("q", "cats"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"query": "cats", "snippet_ids": [0]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (session, cache) = session_against(&server).await;

    let first = session.send("cats").await.unwrap();
    assert_eq!(first.query(), "cats");
    assert_eq!(first.snippet_ids(), &[0]);
    assert!(cache.get_answer("cats").await.unwrap().is_some());

    // second call never reaches the server (expect(1) verifies on drop)
    let second = session.send("cats").await.unwrap();
    assert_eq!(second, first);
}

#[tokio::test]
async fn sanitized_query_goes_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/spotlight"))
        .and(query_param("q", "find cats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"query": "find cats", "snippet_ids": [3, 1]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (session, cache) = session_against(&server).await;

    let answer = session.send("<script>evil()</script>find cats").await.unwrap();
    assert_eq!(answer.query(), "find cats");
    assert_eq!(answer.snippet_ids(), &[3, 1]);

    // cached under the stripped text, not the raw input
    assert!(cache.get_answer("find cats").await.unwrap().is_some());
}

#[tokio::test]
async fn non_2xx_reply_propagates_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/spotlight"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (session, cache) = session_against(&server).await;

    let result = session.send("cats").await;
    assert!(matches!(result, Err(AnswerError::HttpStatus { status: 500 })));

    // nothing was fabricated from the error reply
    assert_eq!(cache.count_answers().await.unwrap(), 0);
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/spotlight"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let (session, _) = session_against(&server).await;

    let result = session.send("cats").await;
    assert!(matches!(result, Err(AnswerError::Parse(_))));
}

#[tokio::test]
async fn sync_clears_cache_and_notifies_remote() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/spotlight"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"query": "cats", "snippet_ids": [0]})),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let (session, cache) = session_against(&server).await;

    session.send("cats").await.unwrap();
    session.sync().await.unwrap();
    assert_eq!(cache.count_answers().await.unwrap(), 0);

    // cache is cold again, so the same query refetches
    session.send("cats").await.unwrap();
}

#[tokio::test]
async fn sync_reports_failure_when_remote_rejects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/spotlight"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"query": "cats", "snippet_ids": [0]})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sync"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (session, cache) = session_against(&server).await;

    session.send("cats").await.unwrap();
    let result = session.sync().await;

    assert!(matches!(result, Err(SyncError::Notify(AnswerError::HttpStatus { status: 503 }))));
    // the local cache still cleared before the notify stage failed
    assert_eq!(cache.count_answers().await.unwrap(), 0);
}

#[tokio::test]
async fn health_probe_round_trips() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "OK"})))
        .mount(&server)
        .await;

    let client = AnswerClient::new(AnswerConfig { base_url: server.uri(), ..Default::default() }).unwrap();
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "OK");
    assert!(health.details.is_none());
}
