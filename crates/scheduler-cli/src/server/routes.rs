//! HTTP route handlers for the task API.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};

use scheduler_core::date::{format_date, parse_date};
use scheduler_core::error::CoreError;
use scheduler_core::models::{parse_task_id, NewTaskData, Task, UpdateTaskData};
use scheduler_core::recurrence::next_date;

use super::error::ApiError;
use super::AppState;

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/nextdate", get(next_date_handler))
        .route(
            "/task",
            post(create_task)
                .get(get_task)
                .put(update_task)
                .delete(delete_task),
        )
        .route("/task/done", post(complete_task))
        .route("/tasks", get(list_tasks))
}

#[derive(Debug, Deserialize)]
pub struct NextDateQuery {
    now: Option<String>,
    #[serde(default)]
    date: String,
    #[serde(default)]
    repeat: String,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    limit: Option<String>,
}

/// Body of `PUT /api/task`: a full task whose id travels as a string.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TaskPayload {
    id: String,
    date: Option<String>,
    title: String,
    comment: String,
    repeat: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct IdResponse {
    id: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Empty {}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    tasks: Vec<Task>,
}

/// GET /api/nextdate - next occurrence as plain `YYYYMMDD` text.
///
/// `now` defaults to the server's today.
async fn next_date_handler(
    State(state): State<AppState>,
    Query(query): Query<NextDateQuery>,
) -> Result<String, ApiError> {
    let now = match query.now.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => parse_date(raw)?,
        None => state.lifecycle.today(),
    };
    let base = parse_date(&query.date)?;
    let next = next_date(now, base, &query.repeat).map_err(CoreError::from)?;
    Ok(format_date(next))
}

/// POST /api/task - create a task.
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTaskData>, JsonRejection>,
) -> Result<Json<IdResponse>, ApiError> {
    let Json(data) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let id = state.lifecycle.create_task(data).await?;
    Ok(Json(IdResponse { id: id.to_string() }))
}

/// GET /api/task?id= - a single task.
async fn get_task(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&query.id)?;
    Ok(Json(state.lifecycle.get_task(id).await?))
}

/// PUT /api/task - replace every editable field of a task.
async fn update_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskPayload>, JsonRejection>,
) -> Result<Json<Empty>, ApiError> {
    let Json(payload) =
        payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let update = UpdateTaskData {
        id: parse_task_id(&payload.id)?,
        date: payload.date,
        title: payload.title,
        comment: payload.comment,
        repeat: payload.repeat,
    };
    state.lifecycle.edit_task(update).await?;
    Ok(Json(Empty {}))
}

/// DELETE /api/task?id=
async fn delete_task(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Empty>, ApiError> {
    let id = parse_task_id(&query.id)?;
    state.lifecycle.delete_task(id).await?;
    Ok(Json(Empty {}))
}

/// POST /api/task/done?id= - complete a task.
async fn complete_task(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Empty>, ApiError> {
    let id = parse_task_id(&query.id)?;
    state.lifecycle.complete_task(id).await?;
    Ok(Json(Empty {}))
}

/// GET /api/tasks?limit= - upcoming tasks. A non-numeric limit is ignored.
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TasksResponse>, ApiError> {
    let limit = query.limit.and_then(|raw| raw.trim().parse::<i64>().ok());
    let tasks = state.lifecycle.list_tasks(limit).await?;
    Ok(Json(TasksResponse { tasks }))
}
