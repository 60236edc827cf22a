//! Business logic services

pub mod auth;
pub mod catalog;
pub mod lending;
pub mod users;

use crate::{config::SessionsConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub lending: lending::LendingService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, sessions_config: SessionsConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), sessions_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            lending: lending::LendingService::new(repository.clone()),
            users: users::UsersService::new(repository),
        }
    }
}
