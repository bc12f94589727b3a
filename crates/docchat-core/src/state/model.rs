//! Cached authentication state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::DeriveQueryable as Queryable;

use crate::user::User;

/// The signed-in user as cached between runs.
///
/// # File Location
///
/// - Linux: `~/.config/docchat/auth_state.json`
/// - macOS: `~/Library/Application Support/docchat/auth_state.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, Queryable)]
#[queryable(entity = "auth_state")]
pub struct StoredAuth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// When the cached sign-in stops being honoured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredAuth {
    /// Caches `user` until `now + lifetime`, saturating at the latest
    /// representable instant.
    pub fn signed_in(user: User, now: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            user: Some(user),
            expires_at: Some(
                now.checked_add_signed(lifetime)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            ),
        }
    }

    /// A record with no user or a passed expiry is not usable.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match (&self.user, self.expires_at) {
            (Some(_), Some(expires_at)) => now >= expires_at,
            _ => true,
        }
    }

    /// The cached user if the record is still valid at `now`.
    pub fn active_user(&self, now: DateTime<Utc>) -> Option<&User> {
        if self.is_expired(now) {
            None
        } else {
            self.user.as_ref()
        }
    }
}
