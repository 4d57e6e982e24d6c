pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::parse::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/parse", post(handlers::handle_parse))
        .with_state(state)
}
