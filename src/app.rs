use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/toggle/:task", post(handlers::toggle_form))
        .route("/api/habits", get(handlers::get_habits))
        .route("/api/toggle", post(handlers::toggle))
        .with_state(state)
}
