use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::today_page))
        .route("/history", get(handlers::history_page))
        .route("/tasks/:task/toggle", post(handlers::toggle_task))
        .route("/history/reset", post(handlers::reset_form))
        .route("/api/today", get(handlers::get_today))
        .route("/api/tasks", post(handlers::update_tasks))
        .route("/api/history", get(handlers::get_history))
        .route("/api/reset", post(handlers::reset))
        .with_state(state)
}
