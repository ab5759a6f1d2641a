#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use sitesmith::config::Config;
use sitesmith::seed;
use sitesmith::server::{create_router, AppState};
use sitesmith::storage::{InMemoryStorage, Storage};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "test-password";

pub fn test_config(upload_dir: &str) -> Config {
    toml::from_str(&format!(
        r#"
        [server]
        port = 0
        [media]
        upload_dir = "{}"
        [admin]
        email = "{}"
        password = "{}"
        "#,
        upload_dir.replace('\\', "/"),
        ADMIN_EMAIL,
        ADMIN_PASSWORD,
    ))
    .unwrap()
}

pub fn test_config_with_upload_limit(upload_dir: &str, max_upload_bytes: usize) -> Config {
    let mut config = test_config(upload_dir);
    config.media.max_upload_bytes = max_upload_bytes;
    config
}

/// Seeded app plus a handle on the storage for direct assertions.
pub async fn seeded_app(upload_dir: &str) -> (Router, Arc<dyn Storage>) {
    seeded_app_with_config(test_config(upload_dir)).await
}

pub async fn seeded_app_with_config(config: Config) -> (Router, Arc<dyn Storage>) {
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
    seed::seed(storage.as_ref(), &config).await.unwrap();
    let app = create_router(AppState::new(storage.clone(), config));
    (app, storage)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Log in through the API and return the session cookie value to attach to
/// subsequent requests.
pub async fn login(app: &Router) -> String {
    let body = serde_json::json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD});
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/api/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_success(), "login failed");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login set no cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    request("GET", uri, cookie, None)
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    request("POST", uri, cookie, Some(body))
}

pub fn put_json(uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    request("PUT", uri, cookie, Some(body))
}

fn request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
