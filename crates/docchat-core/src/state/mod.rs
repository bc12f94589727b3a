//! Persisted client state.

pub mod model;
pub mod repository;

pub use model::StoredAuth;
pub use repository::AuthStateRepository;
