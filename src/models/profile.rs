//! Runner profile model for storage and API.

use serde::{Deserialize, Serialize};

/// Maximum bio length in characters. Longer input is truncated at the
/// boundary, not rejected.
pub const BIO_MAX_CHARS: usize = 150;

/// Runner profile row in the `profiles` table.
///
/// One row per user; `id` equals the provider's user id. The row is
/// created implicitly at account creation, so reads may legitimately
/// find nothing for a brand-new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Provider user id (also the row key)
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Free-text bio, at most [`BIO_MAX_CHARS`] characters
    #[serde(default)]
    pub bio: String,
    /// Public URL of the uploaded avatar image
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Last modification timestamp (RFC 3339)
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Profile {
    /// Empty profile for a user with no row yet.
    pub fn empty(user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            ..Default::default()
        }
    }
}

/// Truncate a bio to [`BIO_MAX_CHARS`] characters.
///
/// Counts characters rather than bytes so multi-byte input never splits
/// a code point.
pub fn truncate_bio(bio: &str) -> String {
    bio.chars().take(BIO_MAX_CHARS).collect()
}
