// Profile routes - baseline facts, value history, components, contractors.
// Endpoints: GET/PUT /v1/profile, GET/POST /v1/property-values,
//            GET/POST /v1/components, GET/POST /v1/contractors

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::models::{
    Contractor, CreateComponentRequest, CreateContractorRequest, CreateValueEntryRequest,
    PropertyBaseline, PropertyComponent, PropertyValueEntry, UpdateProfileRequest,
};
use crate::AppState;

/// GET /v1/profile - The property's baseline facts
async fn get_profile(State(state): State<AppState>) -> Json<PropertyBaseline> {
    Json(state.store.baseline().await)
}

/// PUT /v1/profile - Replace the baseline facts
async fn put_profile(
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<PropertyBaseline>, StatusCode> {
    tracing::info!("Updating baseline profile, postcode='{}'", request.postcode);
    match state.store.set_baseline(request).await {
        Ok(baseline) => Ok(Json(baseline)),
        Err(e) => {
            tracing::error!("Failed to update profile: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /v1/property-values - Recorded valuation points
async fn get_property_values(State(state): State<AppState>) -> Json<Vec<PropertyValueEntry>> {
    Json(state.store.property_values().await)
}

/// POST /v1/property-values - Record a valuation point
async fn add_property_value(
    State(state): State<AppState>,
    Json(request): Json<CreateValueEntryRequest>,
) -> Result<Json<PropertyValueEntry>, StatusCode> {
    if request.value <= 0.0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    match state.store.add_value_entry(request).await {
        Ok(entry) => Ok(Json(entry)),
        Err(e) => {
            tracing::error!("Failed to record property value: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /v1/components - Structural components
async fn get_components(State(state): State<AppState>) -> Json<Vec<PropertyComponent>> {
    Json(state.store.components().await)
}

/// POST /v1/components - Register a component
async fn add_component(
    State(state): State<AppState>,
    Json(request): Json<CreateComponentRequest>,
) -> Result<Json<PropertyComponent>, StatusCode> {
    if request.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    match state.store.add_component(request).await {
        Ok(component) => Ok(Json(component)),
        Err(e) => {
            tracing::error!("Failed to add component: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /v1/contractors - Known contractors
async fn get_contractors(State(state): State<AppState>) -> Json<Vec<Contractor>> {
    Json(state.store.contractors().await)
}

/// POST /v1/contractors - Register a contractor
async fn add_contractor(
    State(state): State<AppState>,
    Json(request): Json<CreateContractorRequest>,
) -> Result<Json<Contractor>, StatusCode> {
    if request.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    match state.store.add_contractor(request).await {
        Ok(contractor) => Ok(Json(contractor)),
        Err(e) => {
            tracing::error!("Failed to add contractor: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/profile", get(get_profile).put(put_profile))
        .route(
            "/v1/property-values",
            get(get_property_values).post(add_property_value),
        )
        .route("/v1/components", get(get_components).post(add_component))
        .route("/v1/contractors", get(get_contractors).post(add_contractor))
}
