// SPDX-License-Identifier: MIT

//! Profile load and save.

use crate::db::tables::ProfilePatch;
use crate::error::Result;
use crate::middleware::auth::Session;
use crate::models::profile::{truncate_bio, Profile};
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/profile", get(get_profile).put(save_profile))
}

/// Profile fields as the frontend sees them.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileResponse {
    pub name: String,
    pub location: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            name: profile.name,
            location: profile.location,
            bio: profile.bio,
            avatar_url: profile.avatar_url,
            updated_at: profile.updated_at,
        }
    }
}

/// Load the current user's profile.
///
/// A user with no row yet (profile rows are created lazily) gets empty
/// fields rather than a 404; the form renders blank and the first save
/// fills the row in.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .db
        .get_profile(&session.token, &session.user_id)
        .await?
        .unwrap_or_else(|| {
            tracing::debug!(user_id = %session.user_id, "No profile row yet, returning empty fields");
            Profile::empty(&session.user_id)
        });

    Ok(Json(ProfileResponse::from(profile)))
}

/// Buffered profile fields submitted on save.
#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Save the current user's profile.
///
/// Overwrites the full record (name, location, bio, avatar URL) and
/// stamps `updated_at`. The response echoes the applied buffer; there is
/// no re-fetch after a successful save.
async fn save_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(request): Json<SaveProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    let patch = build_patch(request, chrono::Utc::now().to_rfc3339());

    state
        .db
        .update_profile(&session.token, &session.user_id, &patch)
        .await?;

    tracing::info!(user_id = %session.user_id, "Profile saved");

    Ok(Json(ProfileResponse {
        name: patch.name,
        location: patch.location,
        bio: patch.bio,
        avatar_url: patch.avatar_url,
        updated_at: Some(patch.updated_at),
    }))
}

/// Turn a save request into the patch written to the table store.
///
/// Bio truncation happens here, at the boundary, so over-long input is
/// clipped rather than rejected.
fn build_patch(request: SaveProfileRequest, updated_at: String) -> ProfilePatch {
    ProfilePatch {
        name: request.name,
        location: request.location,
        bio: truncate_bio(&request.bio),
        avatar_url: request.avatar_url,
        updated_at,
    }
}
