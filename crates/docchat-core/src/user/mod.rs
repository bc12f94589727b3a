//! User domain module.

pub mod api;
pub mod model;

pub use api::AuthApi;
pub use model::{
    Gender, ManagedUser, SigninRequest, SignupRequest, User, UserId, UserRole, ADMIN_ROLE_ID,
};
