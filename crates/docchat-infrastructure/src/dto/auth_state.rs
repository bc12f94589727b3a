//! AuthState DTOs and migrations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use docchat_core::state::StoredAuth;
use docchat_core::user::User;

/// Cached user as stored by V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedUserV1_0 {
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    #[serde(default)]
    pub role_id: Option<i64>,
}

/// Auth state V1.0.0 (initial version, expiry kept as an ISO-8601 string).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct AuthStateV1_0 {
    #[serde(default)]
    pub user: Option<CachedUserV1_0>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

/// Cached user as stored by V1.1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedUserV1_1 {
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
}

/// Auth state V1.1.0 (added bearer token, typed expiry).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct AuthStateV1_1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<CachedUserV1_1>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Type alias for the latest AuthState version.
pub type AuthStateDTO = AuthStateV1_1;

// ============================================================================
// Migration implementations
// ============================================================================

/// Migration from AuthStateV1_0 to AuthStateV1_1.
///
/// An unparsable expiry becomes `None`, which reads as expired.
impl MigratesTo<AuthStateV1_1> for AuthStateV1_0 {
    fn migrate(self) -> AuthStateV1_1 {
        let expires_at = self
            .expiry_date
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        AuthStateV1_1 {
            user: self.user.map(|u| CachedUserV1_1 {
                user_id: u.user_id,
                user_name: u.user_name,
                user_email: u.user_email,
                token: None,
                role_id: u.role_id,
            }),
            expires_at,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<CachedUserV1_1> for User {
    fn from(dto: CachedUserV1_1) -> Self {
        User {
            user_id: dto.user_id,
            user_name: dto.user_name,
            user_email: dto.user_email,
            token: dto.token,
            role_id: dto.role_id,
        }
    }
}

impl From<User> for CachedUserV1_1 {
    fn from(user: User) -> Self {
        CachedUserV1_1 {
            user_id: user.user_id,
            user_name: user.user_name,
            user_email: user.user_email,
            token: user.token,
            role_id: user.role_id,
        }
    }
}

/// Convert AuthStateV1_1 DTO to domain model.
impl IntoDomain<StoredAuth> for AuthStateV1_1 {
    fn into_domain(self) -> StoredAuth {
        StoredAuth {
            user: self.user.map(User::from),
            expires_at: self.expires_at,
        }
    }
}

/// Convert domain model to AuthStateV1_1 DTO (for version-migrate save support)
impl FromDomain<StoredAuth> for AuthStateV1_1 {
    fn from_domain(state: StoredAuth) -> Self {
        AuthStateV1_1 {
            user: state.user.map(CachedUserV1_1::from),
            expires_at: state.expires_at,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for auth state.
///
/// # Migration Path
///
/// - V1.0 → V1.1: Parses `expiry_date` into `expires_at`, user gains an empty `token`
/// - V1.1 → StoredAuth: Converts DTO to domain model
pub fn create_auth_state_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let auth_state_path = version_migrate::Migrator::define("auth_state")
        .from::<AuthStateV1_0>()
        .step::<AuthStateV1_1>()
        .into_with_save::<StoredAuth>();

    migrator
        .register(auth_state_path)
        .expect("Failed to register auth_state migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_v1_0_migrates_expiry_string() {
        let v1_0 = AuthStateV1_0 {
            user: Some(CachedUserV1_0 {
                user_id: 3,
                user_name: "bob".to_string(),
                user_email: "bob@example.com".to_string(),
                role_id: Some(1),
            }),
            expiry_date: Some("2026-01-02T03:04:05Z".to_string()),
        };

        let v1_1: AuthStateV1_1 = v1_0.migrate();
        assert_eq!(
            v1_1.expires_at,
            Some(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
        );
        let user = v1_1.user.unwrap();
        assert_eq!(user.user_id, 3);
        assert!(user.token.is_none());
    }

    #[test]
    fn test_v1_0_bad_expiry_becomes_none() {
        let v1_0 = AuthStateV1_0 {
            user: None,
            expiry_date: Some("next tuesday".to_string()),
        };
        let v1_1: AuthStateV1_1 = v1_0.migrate();
        assert!(v1_1.expires_at.is_none());
    }

    #[test]
    fn test_migrator_loads_flat_v1_0() {
        let migrator = create_auth_state_migrator();
        let value = serde_json::json!({
            "version": "1.0.0",
            "user": {
                "user_id": 9,
                "user_name": "carol",
                "user_email": "carol@example.com"
            },
            "expiry_date": "2030-06-01T00:00:00+00:00"
        });

        let state: StoredAuth = migrator.load_flat_from("auth_state", value).unwrap();
        assert_eq!(state.user.unwrap().user_name, "carol");
        assert!(state.expires_at.is_some());
    }
}
