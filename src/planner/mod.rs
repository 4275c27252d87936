pub mod dto;
pub mod handlers;
mod prompts;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::planner_routes()
}
