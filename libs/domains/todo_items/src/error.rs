use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoItemError {
    #[error("Todo item not found: {0}")]
    NotFound(i64),

    #[error("Path id {path} does not match body id {body}")]
    IdMismatch { path: i64, body: i64 },

    /// An update or delete matched no row
    #[error("Concurrency conflict on todo item {0}")]
    Conflict(i64),

    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type TodoItemResult<T> = Result<T, TodoItemError>;

/// Convert TodoItemError to AppError for standardized error responses
///
/// Handlers never reach the `NotFound` and `IdMismatch` arms, since
/// `IntoResponse` below answers those with a bare status. They serve callers
/// that compose this domain into an `AppError`-returning handler.
impl From<TodoItemError> for AppError {
    fn from(err: TodoItemError) -> Self {
        match err {
            TodoItemError::NotFound(id) => AppError::NotFound(format!("Todo item {} not found", id)),
            TodoItemError::IdMismatch { path, body } => AppError::InvalidId(format!(
                "path id {} does not match body id {}",
                path, body
            )),
            TodoItemError::Conflict(id) => {
                AppError::ConcurrencyConflict(format!("todo item {}", id))
            }
            TodoItemError::Database(e) => AppError::Database(e),
        }
    }
}

// Not-found and id mismatch are answered with a bare status code; every
// other failure carries the standard JSON error body.
impl IntoResponse for TodoItemError {
    fn into_response(self) -> Response {
        match self {
            TodoItemError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            TodoItemError::IdMismatch { .. } => StatusCode::BAD_REQUEST.into_response(),
            other => AppError::from(other).into_response(),
        }
    }
}
