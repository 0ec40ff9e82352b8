// Valuation and awareness models - the property's baseline facts, its value
// history, and the response shapes of the external lookup endpoints.
// Upstream payloads are decoded tolerantly; absent fields default.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The property's baseline facts, inputs to the growth projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyBaseline {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub nearby_streets: Vec<String>,
}

/// A dated valuation point in the property's value history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyValueEntry {
    pub id: String,
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for replacing the baseline profile
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub property_type: String,
    pub purchase_price: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub nearby_streets: Vec<String>,
}

/// Request body for recording a valuation point
#[derive(Debug, Clone, Deserialize)]
pub struct CreateValueEntryRequest {
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub notes: String,
}

// ---------------------------------------------------------------------------
// External endpoint response shapes (defined by the upstream services)
// ---------------------------------------------------------------------------

/// Comparable-sales statistics for the postcode area
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaStatistics {
    #[serde(default)]
    pub median_price: Option<f64>,
    #[serde(default)]
    pub average_price: Option<f64>,
    #[serde(default)]
    pub sample_size: i64,
    #[serde(default)]
    pub period: String,
}

/// A single comparable sale returned by the valuation endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparableSale {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub property_type: String,
}

/// GET /valuation response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationApiResponse {
    #[serde(default)]
    pub area_statistics: Option<AreaStatistics>,
    /// The upstream model's own estimate
    #[serde(default)]
    pub estimated_value: Option<f64>,
    #[serde(default)]
    pub estimate_breakdown: Option<serde_json::Value>,
    #[serde(default)]
    pub comparable_sales: Vec<ComparableSale>,
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub comparable_scope: String,
    #[serde(default)]
    pub streets_used: Vec<String>,
}

/// One council news item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouncilNewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub published: String,
}

/// GET /council-news response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouncilNewsResponse {
    #[serde(default)]
    pub news: Vec<CouncilNewsItem>,
}

/// One upcoming bin collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinCollection {
    #[serde(default)]
    pub bin_type: String,
    #[serde(default)]
    pub date: String,
}

/// GET /bin-collection response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinCollectionResponse {
    #[serde(default)]
    pub collections: Vec<BinCollection>,
    #[serde(default)]
    pub council: String,
    #[serde(default)]
    pub lookup_url: String,
}

/// One local-area insight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyInsight {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub category: String,
}

/// GET /insights response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyInsightsResponse {
    #[serde(default)]
    pub insights: Vec<PropertyInsight>,
}
