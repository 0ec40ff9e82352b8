// Task routes
// Endpoints: GET/POST /v1/tasks, GET/PATCH /v1/tasks/{id},
//            POST /v1/tasks/{id}/work-logs
// Tasks are never hard-deleted, so there is no DELETE route.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::models::{
    CreateTaskRequest, GetTasksQuery, LogWorkRequest, PropertyTask, UpdateTaskRequest, WorkLog,
};
use crate::AppState;

/// GET /v1/tasks - List tasks with optional status/category/component filters
async fn get_tasks(
    State(state): State<AppState>,
    Query(query): Query<GetTasksQuery>,
) -> Json<Vec<PropertyTask>> {
    tracing::info!(
        "Listing tasks with status={:?}, category={:?}, component_id={:?}",
        query.status,
        query.category,
        query.component_id
    );

    let mut tasks = state.store.tasks().await;
    if let Some(status) = query.status {
        tasks.retain(|t| t.status == status);
    }
    if let Some(category) = &query.category {
        tasks.retain(|t| &t.category == category);
    }
    if let Some(component_id) = &query.component_id {
        tasks.retain(|t| t.components.iter().any(|c| c == component_id));
    }
    Json(tasks)
}

/// POST /v1/tasks - Create a task
async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<PropertyTask>, StatusCode> {
    if request.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    tracing::info!("Creating task '{}'", request.title.trim());
    match state.store.add_task(request).await {
        Ok(task) => Ok(Json(task)),
        Err(e) => {
            tracing::error!("Failed to create task: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /v1/tasks/{id} - Get a single task
async fn get_task_by_id(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Json<PropertyTask>, StatusCode> {
    match state.store.get_task(&task_id).await {
        Some(task) => Ok(Json(task)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// PATCH /v1/tasks/{id} - Update a task; any status may replace any other
async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<PropertyTask>, StatusCode> {
    tracing::info!("Updating task {}", task_id);

    match state.store.update_task(&task_id, request).await {
        Ok(Some(task)) => Ok(Json(task)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update task {}: {}", task_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /v1/tasks/{id}/work-logs - Record completed work against a task
async fn add_work_log(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(request): Json<LogWorkRequest>,
) -> Result<Json<WorkLog>, StatusCode> {
    tracing::info!(
        "Logging work on task {} (cost {}, complete_task={})",
        task_id,
        request.cost,
        request.complete_task
    );

    match state.store.add_work_log(&task_id, request).await {
        Ok(Some(log)) => Ok(Json(log)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to log work on task {}: {}", task_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn tasks_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tasks", get(get_tasks).post(create_task))
        .route("/v1/tasks/:id", get(get_task_by_id).patch(update_task))
        .route("/v1/tasks/:id/work-logs", post(add_work_log))
}
