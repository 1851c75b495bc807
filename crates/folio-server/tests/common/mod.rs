//! Shared helpers for router tests.

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use folio_common_config::ExecutionMode;
use folio_server::{AppState, ServerConfig, Server};
use serde_json::Value;
use std::path::Path;
use tower::ServiceExt;

/// Config pointing at `content_dir`, with LeetCode disabled unless set.
pub fn config(content_dir: &Path, mode: ExecutionMode) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.content.dir = content_dir.to_path_buf();
    config.app.mode = mode;
    config.app.public_url = "https://folio.example".to_string();
    config.leetcode.username = String::new();
    config
}

pub fn server(config: ServerConfig) -> Server {
    Server::new(config).unwrap()
}

pub fn router(config: ServerConfig) -> (Router, AppState) {
    let server = server(config);
    (server.router(), server.state().clone())
}

pub async fn send(router: &Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    send(router, Method::GET, uri).await
}

pub async fn json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
