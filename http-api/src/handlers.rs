//! Route handlers
//!
//! Each handler is a thin adapter: decode the request, call one store
//! operation, encode the result. Failures flow through [`ApiError`].

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use todo_core::{NewTodo, Todo, TodoStore, TodoValidator};
use tracing::{debug, warn};

use crate::{error::ApiError, server::AppState};

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /todos`
pub async fn list_todos<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.get_all().await?;
    debug!(count = todos.len(), "Listed todos");
    Ok(Json(todos))
}

/// `GET /todo/:id`
pub async fn get_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.store.get_by_id(&id).await?;
    Ok(Json(todo))
}

/// `POST /todo`
///
/// The body is decoded from raw bytes, so a missing or unusual
/// `Content-Type` header is accepted as long as the payload is
/// `{"task": "<non-blank string>"}`.
pub async fn create_todo<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let new_todo = parse_new_todo(&body)?;
    let todo = state.store.create(new_todo).await?;
    debug!(id = %todo.id, "Created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// `PATCH /todo/:id`
pub async fn mark_todo_done<S: TodoStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let todo = state.store.mark_done(&id).await?;
    debug!(id = %todo.id, "Marked todo done");
    Ok(Json(todo))
}

/// `GET /health`
pub async fn health_handler<S: TodoStore + 'static>(State(state): State<AppState<S>>) -> Response {
    match state.store.health_check().await {
        Ok(()) => Json(HealthResponse { status: "ok" }).into_response(),
        Err(err) => {
            warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                }),
            )
                .into_response()
        }
    }
}

fn parse_new_todo(body: &[u8]) -> Result<NewTodo, ApiError> {
    let new_todo: NewTodo =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    TodoValidator::validate_new_todo(&new_todo)?;
    Ok(new_todo)
}
