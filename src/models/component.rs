// Structural component models - named elements of the property (roof,
// boiler, ...) referenced by tasks for filtering and visualization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named structural element tagged with a floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyComponent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub floor: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for registering a component
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComponentRequest {
    pub name: String,
    #[serde(default)]
    pub floor: String,
}
