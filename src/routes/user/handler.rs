use axum::{
    Json,
    extract::{OriginalUri, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    cache::{CachedUsers, get_or_fetch, keys::request_key},
    database::UserEntity,
    error::{AppError, ValidationError},
};

use super::model::{BatchInsertRequest, BatchInsertResponse, BatchInsertResult};

#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserEntity>>, AppError> {
    let users = state.users.list_users().await?;
    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn batch_insert_users(
    State(state): State<AppState>,
    payload: Result<Json<BatchInsertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let users = req.validate()?;

    let ids = state.users.batch_insert(&users).await?;

    Ok((
        StatusCode::CREATED,
        Json(BatchInsertResponse {
            message: "Batch insert successful".to_string(),
            result: BatchInsertResult {
                inserted: ids.len(),
                ids,
            },
        }),
    ))
}

#[axum::debug_handler]
pub async fn cached_data(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<CachedUsers>, AppError> {
    let key = request_key(&uri);
    let users = state.users.clone();

    let fetch = || async move {
        let users = users.list_users().await?;
        Ok::<_, AppError>(CachedUsers { users })
    };
    let payload = get_or_fetch(state.cache.as_ref(), &key, state.config.cache_ttl(), fetch).await?;

    Ok(Json(payload))
}
