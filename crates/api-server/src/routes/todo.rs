//! Todo API endpoints
//!
//! RESTful API over the todo service.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use todo_core::todo::{Todo, TodoId};
use todo_core::Error;

use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub id: TodoId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(e: Error) -> ApiError {
    let status = match &e {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!("todo storage failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

fn path_rejection(rejection: PathRejection) -> ApiError {
    (
        rejection.status(),
        Json(ErrorResponse {
            error: rejection.body_text(),
        }),
    )
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    (
        rejection.status(),
        Json(ErrorResponse {
            error: rejection.body_text(),
        }),
    )
}

/// Parse the direction segment of `PUT /api/todo/{advance}`
fn parse_advance(raw: &str) -> Option<bool> {
    match raw {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/todo - List all todos
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.todo_service().list_all().await.map_err(api_error)?;
    Ok(Json(todos))
}

/// GET /api/todo/{id} - Get a single todo
async fn get_todo(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Path(id) = id.map_err(path_rejection)?;
    let todo = state.todo_service().get_by_id(id).await.map_err(api_error)?;
    Ok(Json(todo))
}

/// GET /api/todo/query/{query} - Search titles and descriptions
async fn search_todos(
    State(state): State<AppState>,
    query: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let Path(query) = query.map_err(path_rejection)?;
    let todos = state
        .todo_service()
        .search(&query)
        .await
        .map_err(api_error)?;
    Ok(Json(todos))
}

/// POST /api/todo - Create a new todo
async fn create_todo(
    State(state): State<AppState>,
    req: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(req) = req.map_err(json_rejection)?;
    let created = state
        .todo_service()
        .create(&req.title, &req.description)
        .await
        .map_err(api_error)?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/todo - Replace title and description of a todo
async fn update_content(
    State(state): State<AppState>,
    req: Result<Json<UpdateContentRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(req) = req.map_err(json_rejection)?;
    let updated = state
        .todo_service()
        .update_content(req.id, &req.title, &req.description)
        .await
        .map_err(api_error)?;
    Ok(Json(updated))
}

/// PUT /api/todo/{advance} - Move todos one column forward (1) or back (0)
async fn update_status(
    State(state): State<AppState>,
    advance: Result<Path<String>, PathRejection>,
    ids: Result<Json<Vec<TodoId>>, JsonRejection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let Path(advance) = advance.map_err(path_rejection)?;
    let advance = parse_advance(&advance).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid direction '{}', expected 0 or 1", advance),
            }),
        )
    })?;
    let Json(ids) = ids.map_err(json_rejection)?;

    let updated = state
        .todo_service()
        .update_status(&ids, advance)
        .await
        .map_err(api_error)?;
    Ok(Json(updated))
}

/// DELETE /api/todo - Delete a batch of todos
async fn delete_todos(
    State(state): State<AppState>,
    ids: Result<Json<Vec<TodoId>>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(ids) = ids.map_err(json_rejection)?;
    state
        .todo_service()
        .delete_many(&ids)
        .await
        .map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/todo/{id} - Delete a single todo
async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(path_rejection)?;
    state
        .todo_service()
        .delete_many(&[id])
        .await
        .map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/todo",
            get(list_todos)
                .post(create_todo)
                .put(update_content)
                .delete(delete_todos),
        )
        .route(
            "/api/todo/{id}",
            get(get_todo).put(update_status).delete(delete_todo),
        )
        .route("/api/todo/query/{query}", get(search_todos))
}
