// SPDX-License-Identifier: MIT

//! Integration tests against a real provider instance.
//!
//! Skipped unless PROVIDER_URL and PROVIDER_ANON_KEY are set (a local
//! provider stack works). The end-to-end tests additionally need
//! TEST_USER_EMAIL / TEST_USER_PASSWORD for an existing account.

use pr_tracker::config::Config;
use pr_tracker::db::tables::ProfilePatch;
use pr_tracker::db::TableStore;
use pr_tracker::services::AuthClient;

mod common;

fn test_credentials() -> Option<(String, String)> {
    let email = std::env::var("TEST_USER_EMAIL").ok()?;
    let password = std::env::var("TEST_USER_PASSWORD").ok()?;
    Some((email, password))
}

#[tokio::test]
async fn test_sign_in_and_load_profile() {
    require_provider!();
    let Some((email, password)) = test_credentials() else {
        eprintln!("⚠️  Skipping: TEST_USER_EMAIL / TEST_USER_PASSWORD not set");
        return;
    };

    let config = Config::from_env().expect("provider config");
    let auth = AuthClient::new(&config);
    let db = TableStore::new(&config);

    let tokens = auth.sign_in(&email, &password).await.expect("sign in");
    assert!(!tokens.access_token.is_empty());

    // Profile may or may not have a row yet; both are valid states
    let profile = db
        .get_profile(&tokens.access_token, &tokens.user.id)
        .await
        .expect("profile load");

    if let Some(profile) = profile {
        assert_eq!(profile.id, tokens.user.id);
    }
}

#[tokio::test]
async fn test_profile_save_round_trip() {
    require_provider!();
    let Some((email, password)) = test_credentials() else {
        eprintln!("⚠️  Skipping: TEST_USER_EMAIL / TEST_USER_PASSWORD not set");
        return;
    };

    let config = Config::from_env().expect("provider config");
    let auth = AuthClient::new(&config);
    let db = TableStore::new(&config);

    let tokens = auth.sign_in(&email, &password).await.expect("sign in");

    let patch = ProfilePatch {
        name: "Integration Runner".to_string(),
        location: "Test City".to_string(),
        bio: "round trip".to_string(),
        avatar_url: None,
        updated_at: chrono::Utc::now().to_rfc3339(),
    };

    db.update_profile(&tokens.access_token, &tokens.user.id, &patch)
        .await
        .expect("profile save");

    let profile = db
        .get_profile(&tokens.access_token, &tokens.user.id)
        .await
        .expect("profile reload")
        .expect("row exists after save");

    assert_eq!(profile.name, "Integration Runner");
    assert_eq!(profile.location, "Test City");
}

#[tokio::test]
async fn test_sign_in_wrong_password_maps_to_invalid_credentials() {
    require_provider!();
    let Some((email, _)) = test_credentials() else {
        eprintln!("⚠️  Skipping: TEST_USER_EMAIL / TEST_USER_PASSWORD not set");
        return;
    };

    let config = Config::from_env().expect("provider config");
    let auth = AuthClient::new(&config);

    let err = auth
        .sign_in(&email, "definitely-not-the-password")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        pr_tracker::error::AppError::InvalidCredentials
    ));
}
