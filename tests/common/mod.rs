// SPDX-License-Identifier: MIT

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use pr_tracker::config::Config;
use pr_tracker::db::TableStore;
use pr_tracker::routes::create_router;
use pr_tracker::services::{AuthClient, StorageClient};
use pr_tracker::AppState;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Check if a real provider is reachable via environment variables.
#[allow(dead_code)]
pub fn provider_available() -> bool {
    std::env::var("PROVIDER_URL").is_ok() && std::env::var("PROVIDER_ANON_KEY").is_ok()
}

/// Skip test with message if no provider is configured.
#[macro_export]
macro_rules! require_provider {
    () => {
        if !crate::common::provider_available() {
            eprintln!("⚠️  Skipping: PROVIDER_URL / PROVIDER_ANON_KEY not set");
            return;
        }
    };
}

/// Create a test app with offline mock provider clients.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();

    let state = Arc::new(AppState {
        db: TableStore::new_mock(),
        auth: AuthClient::new_mock(),
        storage: StorageClient::new_mock(),
        config,
    });

    (create_router(state.clone()), state)
}

/// Create a session JWT signed with the test secret.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: usize,
    }

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 86400,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .unwrap()
}
