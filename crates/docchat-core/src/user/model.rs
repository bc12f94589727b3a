//! User domain models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier assigned to a user by the auth API.
pub type UserId = i64;

/// `role_id` value the auth API uses for administrators.
pub const ADMIN_ROLE_ID: i64 = 1;

/// Role derived from the user's `role_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, Default)]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

/// The signed-in user as returned by the auth API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    /// Bearer token, when the auth API issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
}

impl User {
    pub fn role(&self) -> UserRole {
        if self.role_id == Some(ADMIN_ROLE_ID) {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == UserRole::Admin
    }
}

/// Credentials for sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninRequest {
    pub user_email: String,
    pub user_pwd: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Registration payload for sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub user_name: String,
    pub user_email: String,
    pub user_pwd: String,
    pub user_mobile: String,
    pub gender: Gender,
    pub is_active: bool,
}

/// A user record as seen by the admin user-management screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedUser {
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub user_mobile: String,
    pub gender: Gender,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn user(role_id: Option<i64>) -> User {
        User {
            user_id: 1,
            user_name: "Ada".to_string(),
            user_email: "ada@example.com".to_string(),
            token: None,
            role_id,
        }
    }

    #[test]
    fn test_role_from_role_id() {
        assert_eq!(user(Some(1)).role(), UserRole::Admin);
        assert_eq!(user(Some(2)).role(), UserRole::User);
        assert_eq!(user(None).role(), UserRole::User);
    }

    #[test]
    fn test_gender_wire_format() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"FEMALE\"");
        assert_eq!(Gender::from_str("other").unwrap(), Gender::Other);
    }
}
