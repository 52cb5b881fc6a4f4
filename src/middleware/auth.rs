// SPDX-License-Identifier: MIT

//! Session gate middleware.
//!
//! Every request to a protected route re-evaluates the session: the
//! provider-issued JWT is verified locally against the provider's
//! signing secret. No session (or an expired one) yields 401, which the
//! frontend treats as "redirect to login". Mutations therefore can never
//! run without a user id attached.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie the frontend may store the session token in.
pub const SESSION_COOKIE: &str = "pr_session";

/// Claims carried by the provider's session JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (provider user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Authenticated session extracted from a verified JWT.
///
/// The raw token rides along because downstream provider calls are made
/// as the user, not as the service.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub token: String,
    pub expires_at: usize,
}

/// Middleware that requires a valid provider session.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(SESSION_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header {
            Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
            _ => return Err(StatusCode::UNAUTHORIZED),
        }
    };

    let session =
        verify_session(&token, &state.config.jwt_secret).ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

/// Verify a session token and extract the session it proves.
///
/// Returns `None` for anything other than a well-formed, unexpired
/// token with a non-empty subject.
pub fn verify_session(token: &str, jwt_secret: &[u8]) -> Option<Session> {
    let key = DecodingKey::from_secret(jwt_secret);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).ok()?;

    if token_data.claims.sub.is_empty() {
        return None;
    }

    Some(Session {
        user_id: token_data.claims.sub,
        token: token.to_string(),
        expires_at: token_data.claims.exp,
    })
}
