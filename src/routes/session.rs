// SPDX-License-Identifier: MIT

//! Session routes: login, current session, logout.
//!
//! Credential handling itself belongs to the provider; login is a plain
//! proxy of the password grant with one piece of local behavior, the
//! rewrite of the known invalid-credentials error into user-facing copy
//! (see `services::auth`).

use crate::error::Result;
use crate::middleware::auth::Session;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Routes that work without a session.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/login", post(login))
}

/// Routes that require a session (gate applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/logout", post(logout))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user_id: String,
}

/// Exchange credentials for a provider session.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let tokens = state
        .auth
        .sign_in(&request.email, &request.password)
        .await?;

    tracing::info!(user_id = %tokens.user.id, "User signed in");

    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user_id: tokens.user.id,
    }))
}

// ─── Current Session ─────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub user_id: String,
    /// Unix timestamp the session expires at
    pub expires_at: usize,
}

/// Current session, as proven by the verified token.
///
/// The frontend calls this on mount; a 401 from the gate is its signal
/// to redirect to the login view.
async fn get_session(Extension(session): Extension<Session>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user_id: session.user_id,
        expires_at: session.expires_at,
    })
}

// ─── Logout ──────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogoutResponse {
    pub signed_out: bool,
}

/// Revoke the session with the provider.
///
/// A provider failure here is logged but not surfaced; the client
/// discards its token either way, so the user is signed out locally
/// regardless.
async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Json<LogoutResponse> {
    if let Err(e) = state.auth.sign_out(&session.token).await {
        tracing::warn!(user_id = %session.user_id, error = %e, "Provider sign-out failed");
    } else {
        tracing::info!(user_id = %session.user_id, "User signed out");
    }

    Json(LogoutResponse { signed_out: true })
}
