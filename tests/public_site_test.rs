mod common;

use axum::http::StatusCode;
use serde_json::json;
use tempfile::tempdir;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn home_page_renders_seeded_sections() {
    let dir = tempdir().unwrap();
    let (app, _storage) = seeded_app(dir.path().to_str().unwrap()).await;

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("section-hero"));
    assert!(html.contains("section-services"));
    // Seeded services are injected into the services section
    assert!(html.contains("Brand identity"));
    // Seeded testimonial appears
    assert!(html.contains("Dana Reeve"));
    // Navigation from the main menu
    assert!(html.contains("href=\"/p/about\""));
}

#[tokio::test]
async fn hidden_sections_are_excluded_from_public_render() {
    let dir = tempdir().unwrap();
    let (app, storage) = seeded_app(dir.path().to_str().unwrap()).await;
    let cookie = login(&app).await;

    let page = storage.get_page_by_slug("home").await.unwrap().unwrap();
    let page_id = page.id.unwrap().to_string();
    let hero_id = page
        .sections
        .iter()
        .find(|s| s.section_type == "hero")
        .unwrap()
        .id
        .to_string();

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/admin/api/pages/{}/sections/{}", page_id, hero_id),
            Some(&cookie),
            json!({"is_visible": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    let html = body_text(response).await;
    assert!(!html.contains("section-hero"));
    assert!(html.contains("section-services"));
}

#[tokio::test]
async fn draft_pages_are_not_served_publicly() {
    let dir = tempdir().unwrap();
    let (app, _storage) = seeded_app(dir.path().to_str().unwrap()).await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/admin/api/pages",
            Some(&cookie),
            json!({"title": "Unfinished", "page_type": "custom"}),
        ))
        .await
        .unwrap();
    let page = body_json(response).await;
    assert_eq!(page["status"], "draft");

    let response = app
        .clone()
        .oneshot(get("/p/unfinished", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Publishing makes it visible
    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/admin/api/pages/{}", page["id"].as_str().unwrap()),
            Some(&cookie),
            json!({"status": "published"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/p/unfinished", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_component_renders_placeholder_not_error() {
    let dir = tempdir().unwrap();
    let (app, storage) = seeded_app(dir.path().to_str().unwrap()).await;

    // Corrupt a stored component name directly, as a registry/data drift would
    let mut page = storage.get_page_by_slug("home").await.unwrap().unwrap();
    page.sections[0].component_name = "RetiredComponent".to_string();
    storage.update_page(&page).await.unwrap();

    let response = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("cms-missing"));
    assert!(html.contains("RetiredComponent"));
}

#[tokio::test]
async fn unknown_page_slug_is_404() {
    let dir = tempdir().unwrap();
    let (app, _storage) = seeded_app(dir.path().to_str().unwrap()).await;

    let response = app
        .clone()
        .oneshot(get("/p/no-such-page", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn content_api_serves_active_records_only() {
    let dir = tempdir().unwrap();
    let (app, _storage) = seeded_app(dir.path().to_str().unwrap()).await;
    let cookie = login(&app).await;

    // Create one inactive service
    let response = app
        .clone()
        .oneshot(post_json(
            "/admin/api/services",
            Some(&cookie),
            json!({"title": "Retired offering", "is_active": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/services", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let services = body_json(response).await;
    let titles: Vec<&str> = services
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Brand identity"));
    assert!(!titles.contains(&"Retired offering"));
}

#[tokio::test]
async fn menu_api_returns_visible_items_in_order() {
    let dir = tempdir().unwrap();
    let (app, _storage) = seeded_app(dir.path().to_str().unwrap()).await;

    let response = app.clone().oneshot(get("/api/menus/main", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let menu = body_json(response).await;
    let labels: Vec<&str> = menu["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Home", "About", "Contact"]);

    let response = app
        .clone()
        .oneshot(get("/api/menus/footer", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_and_metrics_endpoints_respond() {
    let dir = tempdir().unwrap();
    let (app, _storage) = seeded_app(dir.path().to_str().unwrap()).await;

    let response = app.clone().oneshot(get("/healthz", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");

    let response = app.clone().oneshot(get("/metrics", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
