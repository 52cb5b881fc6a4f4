// SPDX-License-Identifier: MIT

//! Auth provider client (session issue and teardown).
//!
//! The provider owns the whole credential flow; this client only proxies
//! the password grant, resolves the current session, and signs out. The
//! one piece of local logic is rewriting the provider's known
//! invalid-credentials error into user-facing copy.

use crate::config::Config;
use crate::error::AppError;
use serde::Deserialize;

/// Auth provider client.
#[derive(Clone)]
pub struct AuthClient {
    inner: Option<AuthCtx>,
}

#[derive(Clone)]
struct AuthCtx {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// Session payload returned by a successful sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires
    pub expires_in: u64,
    pub user: ProviderUser,
}

/// User identity as the provider reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthClient {
    /// Create a new auth client from config.
    pub fn new(config: &Config) -> Self {
        Self {
            inner: Some(AuthCtx {
                http: reqwest::Client::new(),
                base_url: config.provider_url.clone(),
                anon_key: config.provider_anon_key.clone(),
            }),
        }
    }

    /// Create a mock client for testing (offline mode).
    pub fn new_mock() -> Self {
        Self { inner: None }
    }

    fn ctx(&self) -> Result<&AuthCtx, AppError> {
        self.inner.as_ref().ok_or_else(|| {
            AppError::AuthProvider("Auth provider not connected (offline mode)".to_string())
        })
    }

    /// Exchange email and password for a provider session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionTokens, AppError> {
        let ctx = self.ctx()?;
        let url = format!("{}/auth/v1/token?grant_type=password", ctx.base_url);

        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = ctx
            .http
            .post(&url)
            .header("apikey", &ctx.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AuthProvider(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(map_sign_in_error(status.as_u16(), &text));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::AuthProvider(e.to_string()))
    }

    /// Resolve the user behind a session token.
    ///
    /// A rejected token maps to `InvalidToken` so callers can treat it
    /// as an expired session rather than a provider outage.
    pub async fn get_user(&self, token: &str) -> Result<ProviderUser, AppError> {
        let ctx = self.ctx()?;
        let url = format!("{}/auth/v1/user", ctx.base_url);

        let response = ctx
            .http
            .get(&url)
            .header("apikey", &ctx.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::AuthProvider(e.to_string()))?;

        if response.status().as_u16() == 401 {
            return Err(AppError::InvalidToken);
        }

        let response = response
            .error_for_status()
            .map_err(|e| AppError::AuthProvider(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| AppError::AuthProvider(e.to_string()))
    }

    /// Revoke a session on the provider side.
    ///
    /// A 401 means the session was already gone, which is the state the
    /// caller wanted, so it counts as success.
    pub async fn sign_out(&self, token: &str) -> Result<(), AppError> {
        let ctx = self.ctx()?;
        let url = format!("{}/auth/v1/logout", ctx.base_url);

        let response = ctx
            .http
            .post(&url)
            .header("apikey", &ctx.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::AuthProvider(e.to_string()))?;

        let status = response.status();
        if status.is_success() || status.as_u16() == 401 {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::AuthProvider(format!("HTTP {}: {}", status, body)))
    }
}

/// Provider error strings that mean "wrong email or password".
const INVALID_CREDENTIAL_MARKERS: [&str; 2] = ["invalid_grant", "Invalid login credentials"];

/// Map a failed sign-in response to an application error.
///
/// The known invalid-credentials case becomes `InvalidCredentials` so
/// the login form shows friendly copy; everything else surfaces as a
/// provider error.
fn map_sign_in_error(status: u16, body: &str) -> AppError {
    if (status == 400 || status == 401)
        && INVALID_CREDENTIAL_MARKERS.iter().any(|m| body.contains(m))
    {
        return AppError::InvalidCredentials;
    }

    AppError::AuthProvider(format!("HTTP {}: {}", status, body))
}
