//! `/api/leetcode` against a mocked stats API.

mod common;

use axum::http::{header, StatusCode};
use common::{config, get, json, router};
use folio_common_config::ExecutionMode;
use folio_server::services::LeetCodeStats;
use folio_test_utils::ContentFixture;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fallback_json() -> serde_json::Value {
    serde_json::to_value(LeetCodeStats::fallback()).unwrap()
}

#[tokio::test]
async fn test_live_stats_are_normalised() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "totalSolved": 412,
            "totalQuestions": 3100,
            "acceptanceRate": 67.456,
            "ranking": 120034,
            "easySolved": 200,
            "mediumSolved": 180,
            "hardSolved": 32
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let fixture = ContentFixture::complete();
    let mut config = config(fixture.path(), ExecutionMode::Production);
    config.leetcode.base_url = upstream.uri();
    config.leetcode.username = "octocat".to_string();
    let (router, state) = router(config);

    let response = get(&router, "/api/leetcode").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json(response).await,
        json!({
            "totalSolved": 412,
            "totalQuestions": 3100,
            "acceptanceRate": "67.46%",
            "ranking": 120034,
            "contributionPoints": 0,
            "reputation": 0,
            "easySolved": 200,
            "mediumSolved": 180,
            "hardSolved": 32
        })
    );
    assert!(state.metrics.snapshot().errors.by_type.is_empty());
}

#[tokio::test]
async fn test_upstream_error_serves_fallback() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let fixture = ContentFixture::complete();
    let mut config = config(fixture.path(), ExecutionMode::Development);
    config.leetcode.base_url = upstream.uri();
    config.leetcode.username = "octocat".to_string();
    let (router, state) = router(config);

    let response = get(&router, "/api/leetcode").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CACHE_CONTROL).is_some());
    assert_eq!(json(response).await, fallback_json());
    assert_eq!(
        state.metrics.snapshot().errors.by_type["upstream_unavailable"],
        1
    );
}

#[tokio::test]
async fn test_undecodable_body_serves_fallback() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&upstream)
        .await;

    let fixture = ContentFixture::complete();
    let mut config = config(fixture.path(), ExecutionMode::Production);
    config.leetcode.base_url = upstream.uri();
    config.leetcode.username = "octocat".to_string();
    let (router, _) = router(config);

    let response = get(&router, "/api/leetcode").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await, fallback_json());
}

#[tokio::test]
async fn test_slow_upstream_times_out_to_fallback() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "totalSolved": 1 }))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&upstream)
        .await;

    let fixture = ContentFixture::complete();
    let mut config = config(fixture.path(), ExecutionMode::Production);
    config.leetcode.base_url = upstream.uri();
    config.leetcode.username = "octocat".to_string();
    config.leetcode.timeout_ms = 100;
    let (router, _) = router(config);

    let response = get(&router, "/api/leetcode").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await, fallback_json());
}

#[tokio::test]
async fn test_unreachable_upstream_serves_fallback() {
    // Bind then drop a listener so the port is closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let fixture = ContentFixture::complete();
    let mut config = config(fixture.path(), ExecutionMode::Production);
    config.leetcode.base_url = format!("http://127.0.0.1:{port}");
    config.leetcode.username = "octocat".to_string();
    let (router, _) = router(config);

    let response = get(&router, "/api/leetcode").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await, fallback_json());
}

#[tokio::test]
async fn test_no_username_serves_fallback_without_counting_errors() {
    let fixture = ContentFixture::complete();
    let (router, state) = router(config(fixture.path(), ExecutionMode::Production));

    for _ in 0..3 {
        let response = get(&router, "/api/leetcode").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
        assert_eq!(json(response).await, fallback_json());
    }

    let errors = state.metrics.snapshot().errors;
    assert!(errors.by_type.is_empty());
    assert_eq!(errors.total, 0);
}
