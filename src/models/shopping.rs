// Shopping list models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One item on the household shopping list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub purchased: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_quantity() -> u32 {
    1
}

/// Request body for adding a shopping item
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShoppingItemRequest {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub note: String,
}

/// Request body for updating a shopping item; only supplied fields change
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShoppingItemRequest {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub note: Option<String>,
    pub purchased: Option<bool>,
}
