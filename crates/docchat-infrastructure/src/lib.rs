pub mod auth_state_repository;
pub mod config_service;
pub mod dto;
pub mod paths;

pub use crate::auth_state_repository::FileAuthStateRepository;
pub use crate::config_service::ConfigService;
pub use crate::paths::DocchatPaths;
