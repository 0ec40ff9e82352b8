// Awareness routes - one aggregate view over the external property lookups.
// The four upstream fetches run concurrently and fail independently; a
// section error never blocks the others. Repeat requests for the same
// postcode+address are served from the last aggregate.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::analytics::{blend_estimates, ValuationBlend};
use crate::models::{
    BinCollectionResponse, CouncilNewsResponse, PropertyInsightsResponse, ValuationApiResponse,
};
use crate::AppState;

/// Last-lookup cache shared through AppState: the aggregate is refetched only
/// when the postcode+address key changes
pub type AwarenessCache = Arc<RwLock<Option<(String, AwarenessResponse)>>>;

#[derive(Debug, Deserialize)]
struct AwarenessQuery {
    /// Defaults to the baseline profile's postcode
    postcode: Option<String>,
    /// Defaults to the baseline profile's address
    address: Option<String>,
}

/// One independently-fetched section of the aggregate
#[derive(Debug, Clone, Serialize)]
pub struct Section<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> Section<T> {
    fn from_result(result: Result<T, Box<dyn std::error::Error + Send + Sync>>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                error: None,
            },
            Err(e) => Self {
                data: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// GET /v1/awareness response
#[derive(Debug, Clone, Serialize)]
pub struct AwarenessResponse {
    lookup_key: String,
    valuation: Section<ValuationApiResponse>,
    council_news: Section<CouncilNewsResponse>,
    bin_collection: Section<BinCollectionResponse>,
    insights: Section<PropertyInsightsResponse>,
    estimate: ValuationBlend,
}

/// GET /v1/awareness - Aggregate valuation, council news, bin collection and
/// insights for the property, plus the blended value estimate
async fn get_awareness(
    State(state): State<AppState>,
    Query(query): Query<AwarenessQuery>,
) -> Json<AwarenessResponse> {
    let baseline = state.store.baseline().await;
    let postcode = query
        .postcode
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| baseline.postcode.clone());
    let address = query
        .address
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| baseline.address.clone());
    let lookup_key = format!("{}|{}", postcode, address);

    // Same lookup key as last time: reuse the previous aggregate instead of
    // refetching all four sections.
    {
        let cache = state.awareness_cache.read().await;
        if let Some((key, cached)) = cache.as_ref() {
            if *key == lookup_key {
                tracing::info!("Awareness lookup unchanged ({}), serving cached", lookup_key);
                return Json(cached.clone());
            }
        }
    }

    tracing::info!("Awareness lookup for {}", lookup_key);

    let (valuation, council_news, bin_collection, insights) = futures::join!(
        state.lookup.fetch_valuation(&postcode, &address, &baseline),
        state.lookup.fetch_council_news(&postcode),
        state.lookup.fetch_bin_collection(&postcode, &address),
        state.lookup.fetch_insights(&postcode, &address),
    );

    let valuation = Section::from_result(valuation);
    if let Some(error) = &valuation.error {
        tracing::warn!("Valuation lookup failed: {}", error);
    }

    let model_estimate = valuation.data.as_ref().and_then(|v| v.estimated_value);
    let area_median = valuation
        .data
        .as_ref()
        .and_then(|v| v.area_statistics.as_ref())
        .and_then(|s| s.median_price);
    let estimate = blend_estimates(
        model_estimate,
        area_median,
        &baseline,
        Utc::now().date_naive(),
    );

    let response = AwarenessResponse {
        lookup_key: lookup_key.clone(),
        valuation,
        council_news: Section::from_result(council_news),
        bin_collection: Section::from_result(bin_collection),
        insights: Section::from_result(insights),
        estimate,
    };

    {
        let mut cache = state.awareness_cache.write().await;
        *cache = Some((lookup_key, response.clone()));
    }

    Json(response)
}

pub fn awareness_routes() -> Router<AppState> {
    Router::new().route("/v1/awareness", get(get_awareness))
}
