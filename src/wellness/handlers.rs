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
    state::AppState,
    wellness::{
        dto::{EntryRequest, EntryResponse},
        repo::WellnessEntry,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wellness", get(list_entries).post(create_entry))
        .route(
            "/wellness/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

#[instrument(skip(state))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<EntryResponse>>, ApiError> {
    let (limit, offset) = p.clamped();
    let entries = WellnessEntry::list_by_user(&state.db, user_id, limit, offset).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<EntryResponse>, ApiError> {
    let entry = WellnessEntry::find(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Wellness entry not found"))?;
    Ok(Json(entry.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<EntryRequest>,
) -> Result<(StatusCode, HeaderMap, Json<EntryResponse>), ApiError> {
    let new = payload.into_new()?;
    let entry = WellnessEntry::create(&state.db, user_id, &new).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/wellness/{}", entry.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }

    info!(user_id = %user_id, entry_id = %entry.id, "wellness entry logged");
    Ok((StatusCode::CREATED, headers, Json(entry.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EntryRequest>,
) -> Result<Json<EntryResponse>, ApiError> {
    let new = payload.into_new()?;
    let entry = WellnessEntry::update(&state.db, user_id, id, &new)
        .await?
        .ok_or_else(|| ApiError::not_found("Wellness entry not found"))?;
    Ok(Json(entry.into()))
}

#[instrument(skip(state))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !WellnessEntry::delete(&state.db, user_id, id).await? {
        return Err(ApiError::not_found("Wellness entry not found"));
    }
    info!(user_id = %user_id, entry_id = %id, "wellness entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
