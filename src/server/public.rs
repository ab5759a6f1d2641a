//! Public surface: server-rendered pages and the read-only content API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::AppState;
use crate::constants;
use crate::domain::{Page, PageStatus};
use crate::error::{CmsError, Result};
use crate::metrics;
use crate::render;
use crate::storage::Storage;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/p/:slug", get(page_by_slug))
        .route("/api/menus/:slug", get(menu_by_slug))
        .route("/api/services", get(active_services))
        .route("/api/portfolio", get(active_portfolio))
        .route("/api/testimonials", get(active_testimonials))
        .route("/api/posts", get(published_posts))
        .route("/api/posts/:slug", get(published_post))
}

async fn home_page(State(state): State<AppState>) -> Response {
    render_public_page(&state, "home").await
}

async fn page_by_slug(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    render_public_page(&state, &slug).await
}

async fn render_public_page(state: &AppState, slug: &str) -> Response {
    match published_page(state, slug).await {
        Ok(Some(mut page)) => {
            if let Err(e) = enrich_sections(&mut page, state.storage.as_ref()).await {
                tracing::error!(error = %e, slug = %slug, "Failed to load section content");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            let settings = match state.storage.get_settings().await {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load settings");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            };
            let menu = state
                .storage
                .get_menu_by_slug(constants::MAIN_MENU_SLUG)
                .await
                .unwrap_or(None);

            metrics::record_page_render(true);
            let html =
                render::render_page(&page, &settings, menu.as_ref(), render::default_dispatch());
            Html(html).into_response()
        }
        Ok(None) => {
            metrics::record_page_render(false);
            (StatusCode::NOT_FOUND, Html("<h1>Page not found</h1>".to_string())).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, slug = %slug, "Failed to load page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Published pages only; drafts and archived pages are invisible to the
/// public routes.
async fn published_page(state: &AppState, slug: &str) -> Result<Option<Page>> {
    let page = state.storage.get_page_by_slug(slug).await?;
    Ok(page.filter(|p| p.status == PageStatus::Published))
}

/// Collection-backed sections (services, portfolio, testimonials) render
/// from an `items` array the server injects into the stored payload. The
/// stored document itself stays untouched.
async fn enrich_sections(page: &mut Page, storage: &dyn Storage) -> Result<()> {
    for section in &mut page.sections {
        if !section.is_visible {
            continue;
        }
        match section.section_type.as_str() {
            constants::SECTION_SERVICES => {
                let featured_only = section
                    .data
                    .get("show_featured_only")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let services = storage.list_services(true).await?;
                let items: Vec<Value> = services
                    .iter()
                    .filter(|s| !featured_only || s.featured)
                    .map(|s| json!({"title": s.title, "description": s.description}))
                    .collect();
                inject_items(&mut section.data, items);
            }
            constants::SECTION_PORTFOLIO => {
                let tag = section
                    .data
                    .get("tag_filter")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string();
                let portfolio = storage.list_portfolio_items(true).await?;
                let items: Vec<Value> = portfolio
                    .iter()
                    .filter(|p| tag.is_empty() || p.tags.iter().any(|t| t == &tag))
                    .map(|p| {
                        json!({
                            "title": p.title,
                            "image_url": p.image_url.clone().unwrap_or_default(),
                        })
                    })
                    .collect();
                inject_items(&mut section.data, items);
            }
            constants::SECTION_TESTIMONIALS => {
                let testimonials = storage.list_testimonials(true).await?;
                let items: Vec<Value> = testimonials
                    .iter()
                    .map(|t| json!({"quote": t.quote, "author_name": t.author_name}))
                    .collect();
                inject_items(&mut section.data, items);
            }
            _ => {}
        }
    }
    Ok(())
}

fn inject_items(data: &mut Value, items: Vec<Value>) {
    if let Value::Object(map) = data {
        map.insert("items".to_string(), Value::Array(items));
    }
}

// ---- read-only JSON API ----

async fn menu_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>> {
    let menu = state
        .storage
        .get_menu_by_slug(&slug)
        .await?
        .ok_or_else(|| CmsError::not_found("menu", slug))?;

    let items: Vec<Value> = menu
        .visible_top_level()
        .iter()
        .map(|i| json!({"label": i.label, "url": i.url, "open_in_new_tab": i.open_in_new_tab}))
        .collect();
    Ok(Json(json!({"name": menu.name, "slug": menu.slug, "items": items})))
}

async fn active_services(State(state): State<AppState>) -> Result<Json<Value>> {
    let services = state.storage.list_services(true).await?;
    Ok(Json(serde_json::to_value(services)?))
}

async fn active_portfolio(State(state): State<AppState>) -> Result<Json<Value>> {
    let items = state.storage.list_portfolio_items(true).await?;
    Ok(Json(serde_json::to_value(items)?))
}

async fn active_testimonials(State(state): State<AppState>) -> Result<Json<Value>> {
    let testimonials = state.storage.list_testimonials(true).await?;
    Ok(Json(serde_json::to_value(testimonials)?))
}

async fn published_posts(State(state): State<AppState>) -> Result<Json<Value>> {
    let posts = state.storage.list_posts(true).await?;
    Ok(Json(serde_json::to_value(posts)?))
}

async fn published_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>> {
    let post = state
        .storage
        .get_post_by_slug(&slug)
        .await?
        .filter(|p| p.status == PageStatus::Published)
        .ok_or_else(|| CmsError::not_found("post", slug))?;
    Ok(Json(serde_json::to_value(post)?))
}
