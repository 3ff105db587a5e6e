use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 请求数据校验失败，在访问数据库和缓存之前返回
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("users must be a non-empty array")]
    EmptyBatch,
    #[error("users[{index}] is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// 数据库访问失败
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to begin transaction: {0}")]
    Begin(#[source] sqlx::Error),
    #[error("failed to insert users[{index}]: {source}")]
    Insert {
        index: usize,
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to commit transaction: {0}")]
    Commit(#[source] sqlx::Error),
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// 缓存访问失败，只在缓存层内部使用，不会返回给客户端
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("cache payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("cache operation timed out")]
    Timeout,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Store(e) => {
                // 具体原因只写日志，不返回给客户端
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
