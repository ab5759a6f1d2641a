//! HTTP surface: admin JSON API (session-authenticated), public rendered
//! pages and read-only content API, media uploads and static serving.

mod admin;
mod public;
mod state;
mod uploads;

pub use state::AppState;

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::constants;
use crate::error::CmsError;
use crate::storage::Storage;

impl IntoResponse for CmsError {
    fn into_response(self) -> Response {
        let status = match &self {
            CmsError::NotFound { .. } => StatusCode::NOT_FOUND,
            CmsError::DuplicateSlug { .. } => StatusCode::CONFLICT,
            CmsError::Unauthorized | CmsError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            CmsError::Validation(_)
            | CmsError::UnknownSectionType(_)
            | CmsError::UnknownVariant { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CmsError::Json(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Extractor that authenticates the admin session cookie. Handlers taking
/// an `AdminUser` argument reject unauthenticated requests with 401.
pub struct AdminUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = CmsError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(CmsError::Unauthorized)?;
        let user_id = state
            .sessions
            .resolve(&token)
            .ok_or(CmsError::Unauthorized)?;
        Ok(AdminUser { user_id })
    }
}

/// Pull the session token out of the Cookie header, if present.
fn session_token(parts: &Parts) -> Option<String> {
    let cookies = parts.headers.get(header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            if name == constants::SESSION_COOKIE {
                return Some(value.to_string());
            }
        }
    }
    None
}

async fn health() -> impl IntoResponse {
    "OK"
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics.render()
}

/// Assemble the full application router.
pub fn create_router(state: AppState) -> Router {
    let upload_dir = state.config.media.upload_dir.clone();

    Router::new()
        .route("/healthz", get(health))
        .route("/metrics", get(metrics_endpoint))
        .nest(
            "/admin/api",
            admin::router(state.config.media.max_upload_bytes),
        )
        .merge(public::router())
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn start_server(storage: Arc<dyn Storage>, config: Config) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState::new(storage, config);
    let app = create_router(state);

    info!("CMS server listening on http://{}", addr);
    println!("🚀 CMS server running on http://{}", addr);
    println!("💚 Health check: http://{}/healthz", addr);
    println!("🛠  Admin API:    http://{}/admin/api", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
