// Shopping list routes
// Endpoints: GET/POST /v1/shopping, PATCH/DELETE /v1/shopping/{id}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::models::{
    CreateShoppingItemRequest, ShoppingItem, StatusResponse, UpdateShoppingItemRequest,
};
use crate::AppState;

/// GET /v1/shopping - The shopping list
async fn get_shopping_items(State(state): State<AppState>) -> Json<Vec<ShoppingItem>> {
    Json(state.store.shopping_items().await)
}

/// POST /v1/shopping - Add an item
async fn add_shopping_item(
    State(state): State<AppState>,
    Json(request): Json<CreateShoppingItemRequest>,
) -> Result<Json<ShoppingItem>, StatusCode> {
    if request.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    match state.store.add_shopping_item(request).await {
        Ok(item) => Ok(Json(item)),
        Err(e) => {
            tracing::error!("Failed to add shopping item: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// PATCH /v1/shopping/{id} - Update an item (rename, tick off, requantify)
async fn update_shopping_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(request): Json<UpdateShoppingItemRequest>,
) -> Result<Json<ShoppingItem>, StatusCode> {
    match state.store.update_shopping_item(&item_id, request).await {
        Ok(Some(item)) => Ok(Json(item)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to update shopping item {}: {}", item_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /v1/shopping/{id}
async fn delete_shopping_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<StatusResponse>, StatusCode> {
    match state.store.delete_shopping_item(&item_id).await {
        Ok(Some(())) => Ok(Json(StatusResponse::ok())),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to delete shopping item {}: {}", item_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub fn shopping_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/shopping",
            get(get_shopping_items).post(add_shopping_item),
        )
        .route(
            "/v1/shopping/:id",
            axum::routing::patch(update_shopping_item).delete(delete_shopping_item),
        )
}
