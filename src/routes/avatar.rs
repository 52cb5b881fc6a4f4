// SPDX-License-Identifier: MIT

//! Avatar upload.
//!
//! Upload is two remote writes: the image goes to object storage, then
//! the resolved public URL is written into the profile row. The client
//! may preview the image locally before calling this endpoint; only a
//! 200 from here means the avatar is committed. A failure between the
//! two writes leaves an orphaned object but never a dangling URL.

use crate::error::{AppError, Result};
use crate::middleware::auth::Session;
use crate::services::storage::avatar_object_path;
use crate::AppState;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Upload cap; avatar images are small.
const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/avatar", post(upload_avatar))
        .layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + 1024))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AvatarResponse {
    /// Committed public URL, already written into the profile row
    pub avatar_url: String,
}

/// Selected file pulled out of the multipart body.
struct UploadedFile {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Upload an avatar image and attach it to the current user's profile.
async fn upload_avatar(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    multipart: Multipart,
) -> Result<Json<AvatarResponse>> {
    let file = read_file_field(multipart).await?;

    let path = avatar_object_path(&session.user_id, &file.filename);
    tracing::debug!(
        user_id = %session.user_id,
        path = %path,
        size = file.bytes.len(),
        "Uploading avatar"
    );

    state
        .storage
        .upload(&session.token, &path, file.bytes, &file.content_type)
        .await?;

    let avatar_url = state.storage.public_url(&path)?;

    state
        .db
        .set_avatar_url(
            &session.token,
            &session.user_id,
            &avatar_url,
            &chrono::Utc::now().to_rfc3339(),
        )
        .await?;

    tracing::info!(user_id = %session.user_id, avatar_url = %avatar_url, "Avatar committed");

    Ok(Json(AvatarResponse { avatar_url }))
}

/// Extract the `file` field from the multipart body.
async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
            .to_vec();

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(AppError::BadRequest(format!(
                "Avatar exceeds {} byte limit",
                MAX_AVATAR_BYTES
            )));
        }

        return Ok(UploadedFile {
            filename,
            content_type,
            bytes,
        });
    }

    Err(AppError::BadRequest(
        "Multipart body is missing a 'file' field".to_string(),
    ))
}
