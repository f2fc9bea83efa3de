use crate::aggregate::{
    summarize_season_daily, summarize_season_hourly, summarize_workday_daily,
    summarize_workday_hourly,
};
use crate::errors::AppError;
use crate::models::{
    Dashboard, SeasonDailySummary, SeasonHourlySummary, WorkdayDailySummary,
    WorkdayHourlySummary,
};
use crate::report::build_dashboard;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let dashboard = build_dashboard(&state.data)?;
    Ok(Html(render_index(&dashboard)))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<Dashboard>, AppError> {
    Ok(Json(build_dashboard(&state.data)?))
}

pub async fn get_season_daily(
    State(state): State<AppState>,
) -> Result<Json<Vec<SeasonDailySummary>>, AppError> {
    Ok(Json(summarize_season_daily(&state.data.days)?))
}

pub async fn get_season_hourly(
    State(state): State<AppState>,
) -> Result<Json<Vec<SeasonHourlySummary>>, AppError> {
    Ok(Json(summarize_season_hourly(&state.data.hours)?))
}

pub async fn get_workday_daily(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkdayDailySummary>>, AppError> {
    Ok(Json(summarize_workday_daily(&state.data.days)?))
}

pub async fn get_workday_hourly(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkdayHourlySummary>>, AppError> {
    Ok(Json(summarize_workday_hourly(&state.data.hours)?))
}
