//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of locally persisted state and
//! are private to the infrastructure layer.
//!
//! ### AuthState Version History
//! - **1.0.0**: User record without bearer token, `expiry_date` as an ISO string
//! - **1.1.0**: Bearer token on the user record, typed `expires_at`

mod auth_state;

pub use auth_state::{
    AuthStateDTO, AuthStateV1_0, AuthStateV1_1, CachedUserV1_0, CachedUserV1_1,
    create_auth_state_migrator,
};
