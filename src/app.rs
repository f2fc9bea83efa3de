use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/season/daily", get(handlers::get_season_daily))
        .route("/api/season/hourly", get(handlers::get_season_hourly))
        .route("/api/workday/daily", get(handlers::get_workday_daily))
        .route("/api/workday/hourly", get(handlers::get_workday_hourly))
        .with_state(state)
}
