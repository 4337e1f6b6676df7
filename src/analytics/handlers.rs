use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    analytics::{
        patterns::{detect_patterns, PatternCard},
        repo::{DashboardTotals, UserData},
        study_data::{build_study_data, StudyData},
        summary::{build_summary, AnalyticsSummary},
    },
    auth::AuthUser,
    error::ApiError,
    sessions::{dto::SessionResponse, repo::StudySession},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/analytics/summary", get(summary))
        .route("/analytics/patterns", get(patterns))
        .route("/analytics/study-data", get(study_data))
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub recent_sessions: Vec<SessionResponse>,
    pub total_sessions: i64,
    pub total_hours: f64,
    pub avg_focus: f64,
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let recent = StudySession::list_by_user(&state.db, user_id, 5, 0).await?;
    let totals = DashboardTotals::for_user(&state.db, user_id).await?;

    Ok(Json(DashboardResponse {
        recent_sessions: recent.into_iter().map(Into::into).collect(),
        total_sessions: totals.total_sessions,
        total_hours: (totals.total_minutes as f64 / 60.0 * 10.0).round() / 10.0,
        avg_focus: (totals.avg_focus.unwrap_or(0.0) * 10.0).round() / 10.0,
    }))
}

#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<AnalyticsSummary>, ApiError> {
    let data = UserData::fetch(&state.db, user_id).await?;
    Ok(Json(build_summary(&data.sessions, &data.records, &data.entries)))
}

#[instrument(skip(state))]
pub async fn patterns(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<PatternCard>>, ApiError> {
    let data = UserData::fetch(&state.db, user_id).await?;
    Ok(Json(detect_patterns(&data.sessions, &data.entries)))
}

#[instrument(skip(state))]
pub async fn study_data(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<StudyData>, ApiError> {
    let sessions = StudySession::all_for_user(&state.db, user_id).await?;
    let today = time::OffsetDateTime::now_utc().date();
    Ok(Json(build_study_data(&sessions, today)))
}
