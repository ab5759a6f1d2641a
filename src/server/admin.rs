//! Admin JSON API. Every route except login requires a valid session
//! cookie, enforced through the [`AdminUser`] extractor.

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::{uploads, AdminUser, AppState};
use crate::constants;
use crate::domain::*;
use crate::error::{CmsError, Result};
use crate::metrics;
use crate::sections::registry;

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/section-definitions", get(section_definitions))
        .route("/pages", get(list_pages).post(create_page))
        .route(
            "/pages/:id",
            get(get_page).put(update_page).delete(delete_page),
        )
        .route("/pages/:id/sections", post(add_section))
        .route("/pages/:id/sections/reorder", post(reorder_sections))
        .route(
            "/pages/:id/sections/:section_id",
            put(update_section).delete(delete_section),
        )
        .route("/services", get(list_services).post(create_service))
        .route("/services/:id", put(update_service).delete(delete_service))
        .route("/portfolio", get(list_portfolio).post(create_portfolio))
        .route(
            "/portfolio/:id",
            put(update_portfolio).delete(delete_portfolio),
        )
        .route(
            "/testimonials",
            get(list_testimonials).post(create_testimonial),
        )
        .route(
            "/testimonials/:id",
            put(update_testimonial).delete(delete_testimonial),
        )
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", put(update_post).delete(delete_post))
        .route("/menus", get(list_menus).post(create_menu))
        .route("/menus/:id", put(update_menu).delete(delete_menu))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/media", get(list_media))
        // The framework's default body cap sits below the configured file
        // limit; raise it here so the handler's own size check decides.
        .route(
            "/uploads",
            post(uploads::upload).layer(DefaultBodyLimit::max(
                max_upload_bytes + uploads::MULTIPART_OVERHEAD_BYTES,
            )),
        )
}

// ---- auth ----

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response> {
    let user = state
        .storage
        .get_user_by_email(&body.email)
        .await?
        .filter(|u| u.is_active);

    let Some(user) = user else {
        metrics::record_login(false);
        return Err(CmsError::InvalidCredentials);
    };
    if !crate::auth::verify_password(&body.password, &user.password_hash) {
        metrics::record_login(false);
        return Err(CmsError::InvalidCredentials);
    }

    let user_id = user.id.ok_or(CmsError::Unauthorized)?;
    let token = state.sessions.create(user_id);
    metrics::record_login(true);
    info!(email = %user.email, "Admin login");

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        constants::SESSION_COOKIE,
        token
    );
    let body = Json(serde_json::json!({
        "email": user.email,
        "display_name": user.display_name,
    }));
    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}

async fn logout(State(state): State<AppState>, request: axum::extract::Request) -> Response {
    // Revoke whatever session the cookie names; logout is idempotent
    if let Some(cookies) = request
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
    {
        for pair in cookies.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == constants::SESSION_COOKIE {
                    state.sessions.revoke(value);
                }
            }
        }
    }
    let cookie = format!(
        "{}=; Path=/; HttpOnly; Max-Age=0",
        constants::SESSION_COOKIE
    );
    ([(header::SET_COOKIE, cookie)], Json(serde_json::json!({"ok": true}))).into_response()
}

async fn me(admin: AdminUser, State(state): State<AppState>) -> Result<Json<Value>> {
    let user = state
        .storage
        .get_user(admin.user_id)
        .await?
        .ok_or(CmsError::Unauthorized)?;
    Ok(Json(serde_json::json!({
        "email": user.email,
        "display_name": user.display_name,
    })))
}

// ---- section definitions ----

/// Serialized registry the editor generates its forms from.
async fn section_definitions(_admin: AdminUser) -> Json<Value> {
    let definitions = registry().list();
    Json(serde_json::to_value(definitions).unwrap_or(Value::Null))
}

// ---- pages ----

#[derive(Deserialize)]
struct CreatePageRequest {
    title: String,
    slug: Option<String>,
    page_type: PageType,
}

async fn list_pages(_admin: AdminUser, State(state): State<AppState>) -> Result<Json<Vec<Page>>> {
    Ok(Json(state.storage.list_pages().await?))
}

async fn create_page(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<CreatePageRequest>,
) -> Result<Json<Page>> {
    if body.title.trim().is_empty() {
        return Err(CmsError::Validation("Page title must not be empty".into()));
    }
    let slug = body.slug.unwrap_or_else(|| slugify(&body.title));
    if slug.is_empty() {
        return Err(CmsError::Validation("Page slug must not be empty".into()));
    }

    let mut page = Page::new(body.title.trim(), slug, body.page_type);
    page.author_id = Some(admin.user_id);
    state.storage.create_page(&mut page).await?;
    metrics::record_admin_write(constants::PAGES);
    Ok(Json(page))
}

async fn get_page(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Page>> {
    let page = state
        .storage
        .get_page(id)
        .await?
        .ok_or_else(|| CmsError::not_found("page", id.to_string()))?;
    Ok(Json(page))
}

#[derive(Deserialize)]
struct UpdatePageRequest {
    title: Option<String>,
    slug: Option<String>,
    status: Option<PageStatus>,
    page_type: Option<PageType>,
    seo: Option<SeoMetadata>,
}

async fn update_page(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePageRequest>,
) -> Result<Json<Page>> {
    let mut page = state
        .storage
        .get_page(id)
        .await?
        .ok_or_else(|| CmsError::not_found("page", id.to_string()))?;

    if let Some(title) = body.title {
        if title.trim().is_empty() {
            return Err(CmsError::Validation("Page title must not be empty".into()));
        }
        page.title = title.trim().to_string();
    }
    if let Some(slug) = body.slug {
        if slug.is_empty() {
            return Err(CmsError::Validation("Page slug must not be empty".into()));
        }
        page.slug = slug;
    }
    if let Some(status) = body.status {
        page.status = status;
    }
    if let Some(page_type) = body.page_type {
        page.page_type = page_type;
    }
    if let Some(seo) = body.seo {
        page.seo = seo;
    }
    page.updated_at = Utc::now();

    state.storage.update_page(&page).await?;
    metrics::record_admin_write(constants::PAGES);
    Ok(Json(page))
}

async fn delete_page(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>> {
    state.storage.delete_page(id).await?;
    metrics::record_admin_write(constants::PAGES);
    Ok(Json(serde_json::json!({"ok": true})))
}

// ---- page sections ----

#[derive(Deserialize)]
struct AddSectionRequest {
    section_type: String,
    variant: Option<String>,
}

async fn add_section(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddSectionRequest>,
) -> Result<Json<Page>> {
    let mut page = state
        .storage
        .get_page(id)
        .await?
        .ok_or_else(|| CmsError::not_found("page", id.to_string()))?;

    let section = registry().instantiate(
        &body.section_type,
        body.variant.as_deref(),
        page.next_order(),
    )?;
    page.sections.push(section);
    page.updated_at = Utc::now();

    state.storage.update_page(&page).await?;
    metrics::record_admin_write(constants::PAGES);
    Ok(Json(page))
}

#[derive(Deserialize)]
struct UpdateSectionRequest {
    data: Option<Value>,
    variant: Option<String>,
    is_visible: Option<bool>,
}

async fn update_section(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateSectionRequest>,
) -> Result<Json<Page>> {
    let mut page = state
        .storage
        .get_page(id)
        .await?
        .ok_or_else(|| CmsError::not_found("page", id.to_string()))?;

    // Resolve the new component name outside the borrow on the section
    let new_component = match &body.variant {
        Some(variant) => {
            let section = page
                .sections
                .iter()
                .find(|s| s.id == section_id)
                .ok_or_else(|| CmsError::not_found("section", section_id.to_string()))?;
            Some(registry().component_for(&section.section_type, variant)?)
        }
        None => None,
    };

    let section = page
        .section_mut(section_id)
        .ok_or_else(|| CmsError::not_found("section", section_id.to_string()))?;
    if let Some(data) = body.data {
        section.data = data;
    }
    if let Some(component) = new_component {
        section.component_name = component.to_string();
    }
    if let Some(visible) = body.is_visible {
        section.is_visible = visible;
    }
    page.updated_at = Utc::now();

    state.storage.update_page(&page).await?;
    metrics::record_admin_write(constants::PAGES);
    Ok(Json(page))
}

#[derive(Deserialize)]
struct ReorderRequest {
    ordered_ids: Vec<Uuid>,
}

async fn reorder_sections(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ReorderRequest>,
) -> Result<Json<Page>> {
    let mut page = state
        .storage
        .get_page(id)
        .await?
        .ok_or_else(|| CmsError::not_found("page", id.to_string()))?;

    page.reorder_sections(&body.ordered_ids)?;
    state.storage.update_page(&page).await?;
    metrics::record_admin_write(constants::PAGES);
    Ok(Json(page))
}

async fn delete_section(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path((id, section_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Page>> {
    let mut page = state
        .storage
        .get_page(id)
        .await?
        .ok_or_else(|| CmsError::not_found("page", id.to_string()))?;

    page.remove_section(section_id)?;
    state.storage.update_page(&page).await?;
    metrics::record_admin_write(constants::PAGES);
    Ok(Json(page))
}

// ---- services ----

#[derive(Deserialize)]
struct ServicePayload {
    title: String,
    slug: Option<String>,
    #[serde(default)]
    description: String,
    icon: Option<String>,
    image_url: Option<String>,
    #[serde(default)]
    featured: bool,
    #[serde(default)]
    display_order: i32,
    #[serde(default = "default_true")]
    is_active: bool,
}

fn default_true() -> bool {
    true
}

async fn list_services(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Service>>> {
    Ok(Json(state.storage.list_services(false).await?))
}

async fn create_service(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<ServicePayload>,
) -> Result<Json<Service>> {
    let mut service = Service {
        id: None,
        slug: body.slug.unwrap_or_else(|| slugify(&body.title)),
        title: body.title,
        description: body.description,
        icon: body.icon,
        image_url: body.image_url,
        featured: body.featured,
        display_order: body.display_order,
        is_active: body.is_active,
        created_at: Utc::now(),
    };
    state.storage.create_service(&mut service).await?;
    metrics::record_admin_write(constants::SERVICES);
    Ok(Json(service))
}

async fn update_service(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ServicePayload>,
) -> Result<Json<Service>> {
    let existing = state
        .storage
        .get_service(id)
        .await?
        .ok_or_else(|| CmsError::not_found("service", id.to_string()))?;

    let service = Service {
        id: existing.id,
        slug: body.slug.unwrap_or(existing.slug),
        title: body.title,
        description: body.description,
        icon: body.icon,
        image_url: body.image_url,
        featured: body.featured,
        display_order: body.display_order,
        is_active: body.is_active,
        created_at: existing.created_at,
    };
    state.storage.update_service(&service).await?;
    metrics::record_admin_write(constants::SERVICES);
    Ok(Json(service))
}

async fn delete_service(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>> {
    state.storage.delete_service(id).await?;
    metrics::record_admin_write(constants::SERVICES);
    Ok(Json(serde_json::json!({"ok": true})))
}

// ---- portfolio ----

#[derive(Deserialize)]
struct PortfolioPayload {
    title: String,
    slug: Option<String>,
    #[serde(default)]
    summary: String,
    client: Option<String>,
    image_url: Option<String>,
    #[serde(default)]
    gallery: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    display_order: i32,
    #[serde(default = "default_true")]
    is_active: bool,
}

async fn list_portfolio(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PortfolioItem>>> {
    Ok(Json(state.storage.list_portfolio_items(false).await?))
}

async fn create_portfolio(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<PortfolioPayload>,
) -> Result<Json<PortfolioItem>> {
    let mut item = PortfolioItem {
        id: None,
        slug: body.slug.unwrap_or_else(|| slugify(&body.title)),
        title: body.title,
        summary: body.summary,
        client: body.client,
        image_url: body.image_url,
        gallery: body.gallery,
        tags: body.tags,
        display_order: body.display_order,
        is_active: body.is_active,
        created_at: Utc::now(),
    };
    state.storage.create_portfolio_item(&mut item).await?;
    metrics::record_admin_write(constants::PORTFOLIO);
    Ok(Json(item))
}

async fn update_portfolio(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PortfolioPayload>,
) -> Result<Json<PortfolioItem>> {
    let existing = state
        .storage
        .get_portfolio_item(id)
        .await?
        .ok_or_else(|| CmsError::not_found("portfolio item", id.to_string()))?;

    let item = PortfolioItem {
        id: existing.id,
        slug: body.slug.unwrap_or(existing.slug),
        title: body.title,
        summary: body.summary,
        client: body.client,
        image_url: body.image_url,
        gallery: body.gallery,
        tags: body.tags,
        display_order: body.display_order,
        is_active: body.is_active,
        created_at: existing.created_at,
    };
    state.storage.update_portfolio_item(&item).await?;
    metrics::record_admin_write(constants::PORTFOLIO);
    Ok(Json(item))
}

async fn delete_portfolio(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>> {
    state.storage.delete_portfolio_item(id).await?;
    metrics::record_admin_write(constants::PORTFOLIO);
    Ok(Json(serde_json::json!({"ok": true})))
}

// ---- testimonials ----

#[derive(Deserialize)]
struct TestimonialPayload {
    author_name: String,
    author_role: Option<String>,
    company: Option<String>,
    quote: String,
    avatar_url: Option<String>,
    rating: Option<u8>,
    #[serde(default)]
    display_order: i32,
    #[serde(default = "default_true")]
    is_active: bool,
}

async fn list_testimonials(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>> {
    Ok(Json(state.storage.list_testimonials(false).await?))
}

async fn create_testimonial(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<TestimonialPayload>,
) -> Result<Json<Testimonial>> {
    if let Some(rating) = body.rating {
        if !(1..=5).contains(&rating) {
            return Err(CmsError::Validation("Rating must be 1-5".into()));
        }
    }
    let mut testimonial = Testimonial {
        id: None,
        author_name: body.author_name,
        author_role: body.author_role,
        company: body.company,
        quote: body.quote,
        avatar_url: body.avatar_url,
        rating: body.rating,
        display_order: body.display_order,
        is_active: body.is_active,
        created_at: Utc::now(),
    };
    state.storage.create_testimonial(&mut testimonial).await?;
    metrics::record_admin_write(constants::TESTIMONIALS);
    Ok(Json(testimonial))
}

async fn update_testimonial(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TestimonialPayload>,
) -> Result<Json<Testimonial>> {
    let existing = state
        .storage
        .get_testimonial(id)
        .await?
        .ok_or_else(|| CmsError::not_found("testimonial", id.to_string()))?;

    let testimonial = Testimonial {
        id: existing.id,
        author_name: body.author_name,
        author_role: body.author_role,
        company: body.company,
        quote: body.quote,
        avatar_url: body.avatar_url,
        rating: body.rating,
        display_order: body.display_order,
        is_active: body.is_active,
        created_at: existing.created_at,
    };
    state.storage.update_testimonial(&testimonial).await?;
    metrics::record_admin_write(constants::TESTIMONIALS);
    Ok(Json(testimonial))
}

async fn delete_testimonial(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>> {
    state.storage.delete_testimonial(id).await?;
    metrics::record_admin_write(constants::TESTIMONIALS);
    Ok(Json(serde_json::json!({"ok": true})))
}

// ---- blog posts ----

#[derive(Deserialize)]
struct PostPayload {
    title: String,
    slug: Option<String>,
    excerpt: Option<String>,
    #[serde(default)]
    body: String,
    cover_image_url: Option<String>,
    status: Option<PageStatus>,
}

async fn list_posts(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPost>>> {
    Ok(Json(state.storage.list_posts(false).await?))
}

async fn create_post(
    admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<PostPayload>,
) -> Result<Json<BlogPost>> {
    let now = Utc::now();
    let status = body.status.unwrap_or(PageStatus::Draft);
    let mut post = BlogPost {
        id: None,
        slug: body.slug.unwrap_or_else(|| slugify(&body.title)),
        title: body.title,
        excerpt: body.excerpt,
        body: body.body,
        cover_image_url: body.cover_image_url,
        status,
        published_at: (status == PageStatus::Published).then_some(now),
        author_id: Some(admin.user_id),
        created_at: now,
        updated_at: now,
    };
    state.storage.create_post(&mut post).await?;
    metrics::record_admin_write(constants::POSTS);
    Ok(Json(post))
}

async fn update_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PostPayload>,
) -> Result<Json<BlogPost>> {
    let existing = state
        .storage
        .get_post(id)
        .await?
        .ok_or_else(|| CmsError::not_found("post", id.to_string()))?;

    let now = Utc::now();
    let status = body.status.unwrap_or(existing.status);
    let published_at = match (existing.published_at, status) {
        (Some(at), PageStatus::Published) => Some(at),
        (None, PageStatus::Published) => Some(now),
        _ => existing.published_at,
    };
    let post = BlogPost {
        id: existing.id,
        slug: body.slug.unwrap_or(existing.slug),
        title: body.title,
        excerpt: body.excerpt,
        body: body.body,
        cover_image_url: body.cover_image_url,
        status,
        published_at,
        author_id: existing.author_id,
        created_at: existing.created_at,
        updated_at: now,
    };
    state.storage.update_post(&post).await?;
    metrics::record_admin_write(constants::POSTS);
    Ok(Json(post))
}

async fn delete_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>> {
    state.storage.delete_post(id).await?;
    metrics::record_admin_write(constants::POSTS);
    Ok(Json(serde_json::json!({"ok": true})))
}

// ---- menus ----

#[derive(Deserialize)]
struct MenuItemPayload {
    id: Option<Uuid>,
    label: String,
    url: String,
    parent_id: Option<Uuid>,
    #[serde(default)]
    open_in_new_tab: bool,
    #[serde(default)]
    display_order: i32,
    #[serde(default = "default_true")]
    is_visible: bool,
}

#[derive(Deserialize)]
struct MenuPayload {
    name: String,
    slug: Option<String>,
    #[serde(default)]
    items: Vec<MenuItemPayload>,
}

fn menu_items_from(payload: Vec<MenuItemPayload>) -> Vec<MenuItem> {
    payload
        .into_iter()
        .map(|item| MenuItem {
            id: item.id.unwrap_or_else(Uuid::new_v4),
            label: item.label,
            url: item.url,
            parent_id: item.parent_id,
            open_in_new_tab: item.open_in_new_tab,
            display_order: item.display_order,
            is_visible: item.is_visible,
        })
        .collect()
}

async fn list_menus(_admin: AdminUser, State(state): State<AppState>) -> Result<Json<Vec<Menu>>> {
    Ok(Json(state.storage.list_menus().await?))
}

async fn create_menu(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(body): Json<MenuPayload>,
) -> Result<Json<Menu>> {
    let mut menu = Menu {
        id: None,
        slug: body.slug.unwrap_or_else(|| slugify(&body.name)),
        name: body.name,
        items: menu_items_from(body.items),
        created_at: Utc::now(),
    };
    state.storage.create_menu(&mut menu).await?;
    metrics::record_admin_write(constants::MENUS);
    Ok(Json(menu))
}

async fn update_menu(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MenuPayload>,
) -> Result<Json<Menu>> {
    let existing = state
        .storage
        .list_menus()
        .await?
        .into_iter()
        .find(|m| m.id == Some(id))
        .ok_or_else(|| CmsError::not_found("menu", id.to_string()))?;

    // Menu items are replaced wholesale; the editor sends the full list
    let menu = Menu {
        id: existing.id,
        slug: body.slug.unwrap_or(existing.slug),
        name: body.name,
        items: menu_items_from(body.items),
        created_at: existing.created_at,
    };
    state.storage.update_menu(&menu).await?;
    metrics::record_admin_write(constants::MENUS);
    Ok(Json(menu))
}

async fn delete_menu(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>> {
    state.storage.delete_menu(id).await?;
    metrics::record_admin_write(constants::MENUS);
    Ok(Json(serde_json::json!({"ok": true})))
}

// ---- settings ----

async fn get_settings(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<SiteSettings>> {
    Ok(Json(state.storage.get_settings().await?))
}

async fn update_settings(
    _admin: AdminUser,
    State(state): State<AppState>,
    Json(mut body): Json<SiteSettings>,
) -> Result<Json<SiteSettings>> {
    body.updated_at = Utc::now();
    state.storage.update_settings(&body).await?;
    metrics::record_admin_write("settings");
    Ok(Json(body))
}

// ---- media ----

async fn list_media(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MediaAsset>>> {
    Ok(Json(state.storage.list_media_assets().await?))
}
