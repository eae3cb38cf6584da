//! Application state shared across handlers

use crate::{
    jwt::JwtService,
    repositories::{HootRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub hoot_repository: HootRepository,
}
