// Project routes - projects plus their embedded CRM sub-entities and the
// email parse/store/accept workflow.
// Endpoints:
//   GET/POST /v1/projects, GET/PATCH /v1/projects/{id}
//   POST /v1/projects/{id}/tasks, PATCH .../tasks/{task_id}
//   POST /v1/projects/{id}/quotes, PATCH/DELETE .../quotes/{quote_id}
//   GET /v1/projects/{id}/quote-totals
//   POST/DELETE contacts, visits, follow-ups (+ PATCH completed flags)
//   POST /v1/email-parse (preview only)
//   GET/POST /v1/projects/{id}/emails, POST .../emails/{email_id}/accept

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};

use crate::analytics::{aggregate_quotes_by_company, CompanyQuoteTotal};
use crate::models::{
    AcceptExtractedRequest, AcceptExtractedResponse, CreateContactRequest, CreateFollowUpRequest,
    CreateProjectRequest, CreateProjectTaskRequest, CreateQuoteRequest, CreateVisitRequest,
    EmailParseResponse, ParseEmailRequest, ProjectEmail, ProjectTask, PropertyProject,
    SetCompletedRequest, StatusResponse, TaskContact, TaskFollowUp, TaskQuote,
    TaskScheduledVisit, UpdateProjectRequest, UpdateQuoteRequest,
};
use crate::AppState;

/// GET /v1/projects - List projects
async fn get_projects(State(state): State<AppState>) -> Json<Vec<PropertyProject>> {
    Json(state.store.projects().await)
}

/// POST /v1/projects - Create a project
async fn create_project(
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<PropertyProject>, StatusCode> {
    if request.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    tracing::info!("Creating project '{}'", request.title.trim());
    match state.store.add_project(request).await {
        Ok(project) => Ok(Json(project)),
        Err(e) => {
            tracing::error!("Failed to create project: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /v1/projects/{id} - Get a single project with all sub-entities
async fn get_project_by_id(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<PropertyProject>, StatusCode> {
    match state.store.get_project(&project_id).await {
        Some(project) => Ok(Json(project)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// PATCH /v1/projects/{id} - Update project fields
async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<PropertyProject>, StatusCode> {
    tracing::info!("Updating project {}", project_id);

    match state.store.update_project(&project_id, request).await {
        Ok(Some(project)) => Ok(Json(project)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update project {}: {}", project_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// ============================================================================
// PROJECT TASKS
// ============================================================================

/// POST /v1/projects/{id}/tasks - Add a checklist item to a project
async fn add_project_task(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<CreateProjectTaskRequest>,
) -> Result<Json<ProjectTask>, StatusCode> {
    if request.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    match state.store.add_project_task(&project_id, request).await {
        Ok(Some(task)) => Ok(Json(task)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to add task to project {}: {}", project_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PATCH /v1/projects/{id}/tasks/{task_id} - Tick a checklist item on or off
async fn set_project_task_completed(
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(String, String)>,
    Json(request): Json<SetCompletedRequest>,
) -> Result<Json<ProjectTask>, StatusCode> {
    match state
        .store
        .set_project_task_completed(&project_id, &task_id, request.completed)
        .await
    {
        Ok(Some(task)) => Ok(Json(task)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update project task {}: {}", task_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// ============================================================================
// QUOTES
// ============================================================================

/// POST /v1/projects/{id}/quotes - Add a quote; the amount must be positive
async fn add_quote(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<Json<TaskQuote>, StatusCode> {
    if request.amount <= 0.0 {
        return Err(StatusCode::BAD_REQUEST);
    }

    tracing::info!(
        "Adding quote of {} to project {}",
        request.amount,
        project_id
    );
    match state.store.add_quote(&project_id, request).await {
        Ok(Some(quote)) => Ok(Json(quote)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to add quote to project {}: {}", project_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PATCH /v1/projects/{id}/quotes/{quote_id} - Accept or reject a quote
async fn update_quote(
    State(state): State<AppState>,
    Path((project_id, quote_id)): Path<(String, String)>,
    Json(request): Json<UpdateQuoteRequest>,
) -> Result<Json<TaskQuote>, StatusCode> {
    match state
        .store
        .update_quote_status(&project_id, &quote_id, request.status)
        .await
    {
        Ok(Some(quote)) => Ok(Json(quote)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update quote {}: {}", quote_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /v1/projects/{id}/quotes/{quote_id}
async fn delete_quote(
    State(state): State<AppState>,
    Path((project_id, quote_id)): Path<(String, String)>,
) -> Result<Json<StatusResponse>, StatusCode> {
    match state.store.delete_quote(&project_id, &quote_id).await {
        Ok(Some(())) => Ok(Json(StatusResponse::ok())),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete quote {}: {}", quote_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /v1/projects/{id}/quote-totals - Quote totals grouped by company
async fn get_quote_totals(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<CompanyQuoteTotal>>, StatusCode> {
    match state.store.get_project(&project_id).await {
        Some(project) => Ok(Json(aggregate_quotes_by_company(&project.quotes))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

// ============================================================================
// CONTACTS / VISITS / FOLLOW-UPS
// ============================================================================

/// POST /v1/projects/{id}/contacts
async fn add_contact(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<CreateContactRequest>,
) -> Result<Json<TaskContact>, StatusCode> {
    if request.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    match state.store.add_contact(&project_id, request).await {
        Ok(Some(contact)) => Ok(Json(contact)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to add contact to project {}: {}", project_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /v1/projects/{id}/contacts/{contact_id}
async fn delete_contact(
    State(state): State<AppState>,
    Path((project_id, contact_id)): Path<(String, String)>,
) -> Result<Json<StatusResponse>, StatusCode> {
    match state.store.delete_contact(&project_id, &contact_id).await {
        Ok(Some(())) => Ok(Json(StatusResponse::ok())),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete contact {}: {}", contact_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /v1/projects/{id}/visits
async fn add_visit(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<CreateVisitRequest>,
) -> Result<Json<TaskScheduledVisit>, StatusCode> {
    match state.store.add_visit(&project_id, request).await {
        Ok(Some(visit)) => Ok(Json(visit)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to add visit to project {}: {}", project_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PATCH /v1/projects/{id}/visits/{visit_id} - Mark a visit done/undone
async fn set_visit_completed(
    State(state): State<AppState>,
    Path((project_id, visit_id)): Path<(String, String)>,
    Json(request): Json<SetCompletedRequest>,
) -> Result<Json<TaskScheduledVisit>, StatusCode> {
    match state
        .store
        .set_visit_completed(&project_id, &visit_id, request.completed)
        .await
    {
        Ok(Some(visit)) => Ok(Json(visit)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update visit {}: {}", visit_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /v1/projects/{id}/visits/{visit_id}
async fn delete_visit(
    State(state): State<AppState>,
    Path((project_id, visit_id)): Path<(String, String)>,
) -> Result<Json<StatusResponse>, StatusCode> {
    match state.store.delete_visit(&project_id, &visit_id).await {
        Ok(Some(())) => Ok(Json(StatusResponse::ok())),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete visit {}: {}", visit_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /v1/projects/{id}/follow-ups
async fn add_follow_up(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<CreateFollowUpRequest>,
) -> Result<Json<TaskFollowUp>, StatusCode> {
    if request.description.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    match state.store.add_follow_up(&project_id, request).await {
        Ok(Some(follow_up)) => Ok(Json(follow_up)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to add follow-up to project {}: {}", project_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PATCH /v1/projects/{id}/follow-ups/{follow_up_id}
async fn set_follow_up_completed(
    State(state): State<AppState>,
    Path((project_id, follow_up_id)): Path<(String, String)>,
    Json(request): Json<SetCompletedRequest>,
) -> Result<Json<TaskFollowUp>, StatusCode> {
    match state
        .store
        .set_follow_up_completed(&project_id, &follow_up_id, request.completed)
        .await
    {
        Ok(Some(follow_up)) => Ok(Json(follow_up)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update follow-up {}: {}", follow_up_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /v1/projects/{id}/follow-ups/{follow_up_id}
async fn delete_follow_up(
    State(state): State<AppState>,
    Path((project_id, follow_up_id)): Path<(String, String)>,
) -> Result<Json<StatusResponse>, StatusCode> {
    match state
        .store
        .delete_follow_up(&project_id, &follow_up_id)
        .await
    {
        Ok(Some(())) => Ok(Json(StatusResponse::ok())),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete follow-up {}: {}", follow_up_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// ============================================================================
// EMAIL PARSING
// ============================================================================

/// POST /v1/email-parse - Parse an email without storing anything
async fn parse_email_preview(
    State(state): State<AppState>,
    Json(request): Json<ParseEmailRequest>,
) -> Result<Json<EmailParseResponse>, StatusCode> {
    if request.email_content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    tracing::info!(
        "Parsing email preview, subject='{}', {} chars",
        request.subject,
        request.email_content.len()
    );
    let (extracted_data, method) = state
        .extract
        .extract(&request.email_content, &request.subject, &request.sender)
        .await;

    Ok(Json(EmailParseResponse {
        success: true,
        extracted_data,
        method: method.to_string(),
    }))
}

/// GET /v1/projects/{id}/emails - List a project's stored emails
async fn get_project_emails(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<Vec<ProjectEmail>>, StatusCode> {
    match state.store.get_project(&project_id).await {
        Some(project) => Ok(Json(project.emails)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// POST /v1/projects/{id}/emails - Parse an email and store it against the
/// project. Identical raw content maps to the same record.
async fn add_project_email(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<ParseEmailRequest>,
) -> Result<Json<ProjectEmail>, StatusCode> {
    if request.email_content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let (extracted, method) = state
        .extract
        .extract(&request.email_content, &request.subject, &request.sender)
        .await;
    tracing::info!(
        "Storing parsed email on project {} (method={})",
        project_id,
        method
    );

    match state
        .store
        .add_project_email(&project_id, &request, extracted)
        .await
    {
        Ok(Some(email)) => Ok(Json(email)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to store email on project {}: {}", project_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /v1/projects/{id}/emails/{email_id}/accept - Materialize selected
/// extracted items into the project's CRM lists
async fn accept_extracted(
    State(state): State<AppState>,
    Path((project_id, email_id)): Path<(String, String)>,
    Json(request): Json<AcceptExtractedRequest>,
) -> Result<Json<AcceptExtractedResponse>, StatusCode> {
    tracing::info!(
        "Accepting extracted items from email {} on project {}",
        email_id,
        project_id
    );

    match state
        .store
        .accept_extracted(&project_id, &email_id, &request)
        .await
    {
        Ok(Some(response)) => Ok(Json(response)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to accept extracted items: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn projects_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/projects", get(get_projects).post(create_project))
        .route(
            "/v1/projects/:id",
            get(get_project_by_id).patch(update_project),
        )
        .route("/v1/projects/:id/tasks", post(add_project_task))
        .route(
            "/v1/projects/:id/tasks/:task_id",
            patch(set_project_task_completed),
        )
        .route("/v1/projects/:id/quotes", post(add_quote))
        .route(
            "/v1/projects/:id/quotes/:quote_id",
            patch(update_quote).delete(delete_quote),
        )
        .route("/v1/projects/:id/quote-totals", get(get_quote_totals))
        .route("/v1/projects/:id/contacts", post(add_contact))
        .route(
            "/v1/projects/:id/contacts/:contact_id",
            axum::routing::delete(delete_contact),
        )
        .route("/v1/projects/:id/visits", post(add_visit))
        .route(
            "/v1/projects/:id/visits/:visit_id",
            patch(set_visit_completed).delete(delete_visit),
        )
        .route("/v1/projects/:id/follow-ups", post(add_follow_up))
        .route(
            "/v1/projects/:id/follow-ups/:follow_up_id",
            patch(set_follow_up_completed).delete(delete_follow_up),
        )
        .route("/v1/email-parse", post(parse_email_preview))
        .route(
            "/v1/projects/:id/emails",
            get(get_project_emails).post(add_project_email),
        )
        .route(
            "/v1/projects/:id/emails/:email_id/accept",
            post(accept_extracted),
        )
}
