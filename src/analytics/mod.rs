use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod patterns;
pub mod repo;
pub mod stats;
pub mod study_data;
pub mod summary;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
