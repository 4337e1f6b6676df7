use crate::state::AppState;
use axum::Router;

pub mod client;
pub mod handlers;
pub mod prompt;
pub mod service;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
