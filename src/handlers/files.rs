use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::model::{generate_file_id, non_empty_trimmed, NewFile, StoredFile};
use crate::AppState;

/// POST /api/subjects/:id/files - append a file with a generated id
pub async fn create(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<NewFile>,
) -> Result<impl IntoResponse, ApiError> {
    let name = non_empty_trimmed(body.name.as_deref())
        .ok_or_else(|| ApiError::bad_request("name is required"))?;
    let content = body
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("content is required"))?;

    let file = StoredFile { id: generate_file_id(), name, content };

    if !state.store.append_file(id, &file).await? {
        return Err(ApiError::not_found("subject not found"));
    }

    Ok((StatusCode::CREATED, Json(file)))
}

/// DELETE /api/subjects/:id/files/:file_id - remove one file by id
pub async fn remove(
    State(state): State<AppState>,
    Path((id, file_id)): Path<(Uuid, String)>,
) -> Result<Json<Value>, ApiError> {
    let subject = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("subject not found"))?;

    if !subject.files.iter().any(|f| f.id == file_id) {
        return Err(ApiError::not_found("file not found"));
    }

    // The subject can vanish between the check above and the mutation
    if !state.store.remove_file(id, &file_id).await? {
        return Err(ApiError::not_found("subject not found"));
    }

    Ok(Json(json!({ "message": "file deleted" })))
}
