use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    analytics::{repo::UserData, summary::build_summary},
    auth::AuthUser,
    error::ApiError,
    insights::service::coach_text,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/insights", post(generate_insight))
}

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub insight: String,
    pub data_points: usize,
}

/// Builds the analytics summary, renders it into the coach prompt and asks
/// the external endpoint. Always answers 200: endpoint trouble surfaces as
/// fallback text, not an error.
#[instrument(skip(state))]
pub async fn generate_insight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<InsightResponse>, ApiError> {
    let data = UserData::fetch(&state.db, user_id).await?;
    let summary = build_summary(&data.sessions, &data.records, &data.entries);

    let insight = coach_text(state.insight.as_ref(), &summary, data.sessions.len()).await;

    Ok(Json(InsightResponse {
        insight,
        data_points: data.data_points(),
    }))
}
