use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod dto;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod repo;
pub mod repo_types;

pub use claims::Identity;
pub use repo_types::Role;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
