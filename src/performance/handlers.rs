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
    performance::{
        dto::{RecordRequest, RecordResponse},
        repo::PerformanceRecord,
    },
    pagination::Pagination,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/performance", get(list_records).post(create_record))
        .route(
            "/performance/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
}

#[instrument(skip(state))]
pub async fn list_records(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<RecordResponse>>, ApiError> {
    let (limit, offset) = p.clamped();
    let records = PerformanceRecord::list_by_user(&state.db, user_id, limit, offset).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RecordResponse>, ApiError> {
    let record = PerformanceRecord::find(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Performance record not found"))?;
    Ok(Json(record.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<RecordRequest>,
) -> Result<(StatusCode, HeaderMap, Json<RecordResponse>), ApiError> {
    let new = payload.into_new()?;
    let record = PerformanceRecord::create(&state.db, user_id, &new).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/performance/{}", record.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }

    info!(user_id = %user_id, record_id = %record.id, subject = %record.subject, "performance record added");
    Ok((StatusCode::CREATED, headers, Json(record.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordRequest>,
) -> Result<Json<RecordResponse>, ApiError> {
    let new = payload.into_new()?;
    let record = PerformanceRecord::update(&state.db, user_id, id, &new)
        .await?
        .ok_or_else(|| ApiError::not_found("Performance record not found"))?;
    Ok(Json(record.into()))
}

#[instrument(skip(state))]
pub async fn delete_record(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !PerformanceRecord::delete(&state.db, user_id, id).await? {
        return Err(ApiError::not_found("Performance record not found"));
    }
    info!(user_id = %user_id, record_id = %id, "performance record deleted");
    Ok(StatusCode::NO_CONTENT)
}
