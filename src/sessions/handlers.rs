use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    pagination::Pagination,
    sessions::{
        dto::{SessionRequest, SessionResponse},
        repo::StudySession,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(list_sessions).post(create_session))
        .route(
            "/sessions/:id",
            get(get_session).put(update_session).delete(delete_session),
        )
}

#[instrument(skip(state))]
pub async fn list_sessions(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let (limit, offset) = p.clamped();
    let sessions = StudySession::list_by_user(&state.db, user_id, limit, offset).await?;
    Ok(Json(sessions.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = StudySession::find(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Study session not found"))?;
    Ok(Json(session.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<SessionRequest>,
) -> Result<(StatusCode, HeaderMap, Json<SessionResponse>), ApiError> {
    let new = payload.into_new()?;
    let session = StudySession::create(&state.db, user_id, &new).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/sessions/{}", session.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }

    info!(user_id = %user_id, session_id = %session.id, subject = %session.subject, "study session logged");
    Ok((StatusCode::CREATED, headers, Json(session.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let new = payload.into_new()?;
    let session = StudySession::update(&state.db, user_id, id, &new)
        .await?
        .ok_or_else(|| ApiError::not_found("Study session not found"))?;
    Ok(Json(session.into()))
}

#[instrument(skip(state))]
pub async fn delete_session(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !StudySession::delete(&state.db, user_id, id).await? {
        return Err(ApiError::not_found("Study session not found"));
    }
    info!(user_id = %user_id, session_id = %id, "study session deleted");
    Ok(StatusCode::NO_CONTENT)
}
