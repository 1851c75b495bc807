//! Router tests driven through `tower::ServiceExt::oneshot`.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{config, get, json, router, send};
use folio_common_config::ExecutionMode;
use folio_server::response::NO_CACHE;
use folio_test_utils::ContentFixture;
use serde_json::json;

#[tokio::test]
async fn test_bundle_in_development_is_uncacheable() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Development));

    let response = get(&router, "/api/content").await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::CACHE_CONTROL], NO_CACHE);
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers[header::EXPIRES], "0");

    let body = json(response).await;
    assert_eq!(body["hero"], json!({ "title": "hero" }));
    assert_eq!(body["resumeChat"], json!({ "title": "resume-chat" }));
    assert_eq!(body.as_object().unwrap().len(), 12);
}

#[tokio::test]
async fn test_bundle_in_production_omits_cache_headers() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Production));

    let response = get(&router, "/api/content").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    assert!(response.headers().get(header::PRAGMA).is_none());
}

#[tokio::test]
async fn test_bundle_reflects_edits_without_restart() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Development));

    let before = json(get(&router, "/api/content").await).await;
    assert_eq!(before["about"]["title"], "about");

    fixture.write("about.yml", "title: rewritten\n");

    let after = json(get(&router, "/api/content").await).await;
    assert_eq!(after["about"]["title"], "rewritten");
}

#[tokio::test]
async fn test_broken_section_is_null_and_counted() {
    let fixture = ContentFixture::complete();
    fixture.write("projects.yml", "items: [oops\n");
    fixture.remove("footer.yml");
    let (router, state) = router(config(fixture.path(), ExecutionMode::Production));

    let response = get(&router, "/api/content").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json(response).await;
    assert!(body["projects"].is_null());
    assert!(body["footer"].is_null());
    assert_eq!(body["hero"]["title"], "hero");

    let errors = state.metrics.snapshot().errors;
    assert_eq!(errors.by_type["parse_failure"], 1);
    assert_eq!(errors.by_type["source_unavailable"], 1);
}

#[tokio::test]
async fn test_missing_content_dir_is_server_error() {
    let fixture = ContentFixture::empty();
    let missing = fixture.path().join("gone");
    let (router, state) = router(config(&missing, ExecutionMode::Production));

    let response = get(&router, "/api/content").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[header::CACHE_CONTROL], NO_CACHE);
    assert_eq!(json(response).await, json!({ "error": "Failed to load content" }));
    assert_eq!(state.metrics.snapshot().errors.by_type["http_500"], 1);
}

#[tokio::test]
async fn test_single_section_by_key_and_stem() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Development));

    let by_key = get(&router, "/api/content/pagePreviews").await;
    assert_eq!(by_key.status(), StatusCode::OK);
    assert_eq!(by_key.headers()[header::CACHE_CONTROL], NO_CACHE);
    assert_eq!(json(by_key).await, json!({ "title": "page-previews" }));

    let by_stem = get(&router, "/api/content/page-previews").await;
    assert_eq!(by_stem.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_section_is_not_found() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Production));

    let response = get(&router, "/api/content/blog").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["code"], "unknown_section");
}

#[tokio::test]
async fn test_failed_section_reports_its_kind() {
    let fixture = ContentFixture::complete();
    fixture.write("demos.yml", "- just\n- a list\n");
    let (router, _) = router(config(fixture.path(), ExecutionMode::Production));

    let response = get(&router, "/api/content/demos").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["code"], "schema_mismatch");
}

#[tokio::test]
async fn test_health_payload() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Production));

    let response = get(&router, "/api/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    // Health is never cached, whatever the mode.
    assert_eq!(response.headers()[header::CACHE_CONTROL], NO_CACHE);

    let body = json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "production");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["pid"], std::process::id());
    assert!(body["uptime"].is_f64());
    assert!(body["memory"]["used"].is_u64());
    assert!(body["memory"].get("rss").is_none());
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_metrics_count_previous_requests() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Development));

    get(&router, "/api/content").await;
    get(&router, "/nowhere").await;

    let response = get(&router, "/api/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], NO_CACHE);

    let body = json(response).await;
    assert_eq!(body["environment"], "development");
    assert_eq!(body["requests"]["total"], 2);
    assert_eq!(body["requests"]["successful"], 1);
    assert_eq!(body["requests"]["failed"], 1);
    assert_eq!(body["requests"]["successRate"], 50);
    assert_eq!(body["performance"]["responseTime"]["count"], 2);
    assert!(body["performance"]["responseTime"]["average"].is_u64());
    assert!(body["performance"]["memory"]["system"]["rss"].is_u64());
    assert_eq!(body["errors"]["total"], 1);
    assert_eq!(body["errors"]["byType"]["http_404"], 1);
    assert_eq!(body["system"]["platform"], std::env::consts::OS);
    assert_eq!(body["system"]["arch"], std::env::consts::ARCH);
    assert!(!body["system"]["runtimeVersion"].as_str().unwrap().is_empty());
    assert!(body["uptime"]["formatted"].as_str().unwrap().ends_with('s'));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Production));

    let response = get(&router, "/does/not/exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json(response).await,
        json!({ "error": "not_found", "message": "The requested resource was not found" })
    );
}

#[tokio::test]
async fn test_preflight_is_answered_with_cors_headers() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Production));

    let response = send(&router, Method::OPTIONS, "/api/content").await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://folio.example");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, Authorization"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
}

#[tokio::test]
async fn test_cors_headers_only_under_api() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Production));

    let api = get(&router, "/api/health").await;
    assert_eq!(
        api.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://folio.example"
    );

    let other = get(&router, "/elsewhere").await;
    assert!(other.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_security_headers() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Production));

    let response = get(&router, "/api/content").await;
    let headers = response.headers();

    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-xss-protection"], "1; mode=block");
    assert_eq!(headers["referrer-policy"], "origin-when-cross-origin");
    assert_eq!(
        headers["permissions-policy"],
        "camera=(), microphone=(), geolocation=()"
    );
    assert_eq!(headers["x-dns-prefetch-control"], "on");
}

#[tokio::test]
async fn test_security_headers_can_be_disabled() {
    let fixture = ContentFixture::complete();
    let mut config = config(fixture.path(), ExecutionMode::Production);
    config.security.secure_headers = false;
    let (router, _) = router(config);

    let response = get(&router, "/api/content").await;

    assert!(response.headers().get("x-frame-options").is_none());
    assert_eq!(response.headers()["x-dns-prefetch-control"], "on");
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let fixture = ContentFixture::complete();
    let (router, _) = router(config(fixture.path(), ExecutionMode::Production));

    let generated = get(&router, "/api/health").await;
    let id = generated.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());

    let request = axum::http::Request::builder()
        .uri("/api/health")
        .header("x-request-id", "client-supplied")
        .body(axum::body::Body::empty())
        .unwrap();
    let echoed = tower::ServiceExt::oneshot(router.clone(), request).await.unwrap();
    assert_eq!(echoed.headers()["x-request-id"], "client-supplied");
}
