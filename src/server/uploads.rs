//! Media upload endpoint: multipart file in, stored file + public URL out.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use super::{AdminUser, AppState};
use crate::domain::MediaAsset;
use crate::error::{CmsError, Result};
use crate::metrics;

/// Slack added on top of the configured file limit when sizing the route's
/// body cap, covering multipart boundary and header framing. Files between
/// the configured limit and limit + overhead still get the explicit
/// rejection below rather than a framework-level refusal.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Accept the first file field of a multipart request, write it under the
/// configured media directory with a collision-free name, and return the
/// URL the editor stores inline in content fields.
pub async fn upload(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| CmsError::Validation(format!("Malformed multipart request: {}", e)))?
        .ok_or_else(|| CmsError::Validation("Upload request contained no file".into()))?;

    let original_name = field.file_name().unwrap_or("upload.bin").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| CmsError::Validation(format!("Failed to read upload body: {}", e)))?;

    if bytes.is_empty() {
        return Err(CmsError::Validation("Uploaded file is empty".into()));
    }
    if bytes.len() > state.config.media.max_upload_bytes {
        return Err(CmsError::Validation(format!(
            "Upload exceeds the {} byte limit",
            state.config.media.max_upload_bytes
        )));
    }

    let stored_name = stored_file_name(&original_name);
    let dir = std::path::Path::new(&state.config.media.upload_dir);
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&stored_name), &bytes).await?;

    let url = format!("/uploads/{}", stored_name);
    let mut asset = MediaAsset {
        id: None,
        file_name: original_name,
        url: url.clone(),
        content_type,
        size_bytes: bytes.len() as u64,
        uploaded_at: Utc::now(),
    };
    state.storage.create_media_asset(&mut asset).await?;
    metrics::record_upload();
    info!(file = %asset.file_name, size = asset.size_bytes, "Stored upload");

    Ok(Json(json!({"url": url, "id": asset.id})))
}

/// Unique on-disk name: uuid prefix plus a sanitized extension.
fn stored_file_name(original: &str) -> String {
    let extension = std::path::Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("bin");
    format!("{}.{}", Uuid::new_v4(), extension.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_names_keep_safe_extensions_only() {
        assert!(stored_file_name("photo.PNG").ends_with(".png"));
        assert!(stored_file_name("archive.tar.gz").ends_with(".gz"));
        assert!(stored_file_name("no_extension").ends_with(".bin"));
        assert!(stored_file_name("weird.p?g").ends_with(".bin"));
    }
}
