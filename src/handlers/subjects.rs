use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::{non_empty_trimmed, NewSubject, Subject};
use crate::AppState;

/// GET /api/subjects - every subject, insertion order
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// POST /api/subjects - create a subject with an empty file list
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<NewSubject>,
) -> Result<impl IntoResponse, ApiError> {
    let name = non_empty_trimmed(body.name.as_deref())
        .ok_or_else(|| ApiError::bad_request("name is required"))?;

    let subject = state.store.create(&name).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// GET /api/subjects/:id - single subject by id
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Subject>, ApiError> {
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("subject not found"))
}

/// PUT /api/subjects/:id - rename, returns the updated subject
pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<NewSubject>,
) -> Result<Json<Subject>, ApiError> {
    let name = non_empty_trimmed(body.name.as_deref())
        .ok_or_else(|| ApiError::bad_request("name is required"))?;

    if !state.store.rename(id, &name).await? {
        return Err(ApiError::not_found("subject not found"));
    }

    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("subject not found"))
}

/// DELETE /api/subjects/:id - idempotent, cascades away contained files
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
