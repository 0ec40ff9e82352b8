// Dashboard routes - derived metrics over the task snapshot.
// Endpoints: GET /v1/dashboard/overview, /v1/dashboard/costs,
//            /v1/dashboard/groups, /v1/dashboard/trends

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    aggregate_costs_by_category, classify_tasks, group_tasks, monthly_completion_series,
    overall_totals, value_history_series, BucketCounts, CategoryCost, GroupKey,
    MonthlyCompletionPoint, TaskBuckets, TaskGroup, ValueHistoryPoint,
};
use crate::AppState;

/// GET /v1/dashboard/overview response
#[derive(Debug, Serialize)]
struct OverviewResponse {
    counts: BucketCounts,
    buckets: TaskBuckets,
}

/// GET /v1/dashboard/overview - Classifier views against today's date
async fn get_overview(State(state): State<AppState>) -> Json<OverviewResponse> {
    let tasks = state.store.tasks().await;
    let buckets = classify_tasks(&tasks, Utc::now().date_naive());
    tracing::info!(
        "Dashboard overview over {} tasks: {} outstanding, {} overdue",
        tasks.len(),
        buckets.outstanding.len(),
        buckets.overdue.len()
    );
    Json(OverviewResponse {
        counts: buckets.counts(),
        buckets,
    })
}

#[derive(Debug, Deserialize)]
struct CostsQuery {
    /// Chart truncation only; totals always cover every category
    #[serde(default = "default_top")]
    top: usize,
}

fn default_top() -> usize {
    10
}

/// GET /v1/dashboard/costs response
#[derive(Debug, Serialize)]
struct CostsResponse {
    /// Top categories for the chart, per the `top` query parameter
    categories: Vec<CategoryCost>,
    /// Number of categories before truncation
    category_count: usize,
    total_spent: f64,
    total_estimated: f64,
}

/// GET /v1/dashboard/costs - Spent vs estimated per category
async fn get_costs(
    State(state): State<AppState>,
    Query(query): Query<CostsQuery>,
) -> Json<CostsResponse> {
    let tasks = state.store.tasks().await;
    let categories = aggregate_costs_by_category(&tasks);
    let (total_spent, total_estimated) = overall_totals(&categories);
    let category_count = categories.len();

    Json(CostsResponse {
        categories: categories.into_iter().take(query.top.max(1)).collect(),
        category_count,
        total_spent,
        total_estimated,
    })
}

#[derive(Debug, Deserialize)]
struct GroupsQuery {
    by: GroupKey,
}

/// GET /v1/dashboard/groups?by=category|priority|status - Ordered board groups
async fn get_groups(
    State(state): State<AppState>,
    Query(query): Query<GroupsQuery>,
) -> Json<Vec<TaskGroup>> {
    let tasks = state.store.tasks().await;
    Json(group_tasks(&tasks, query.by))
}

/// GET /v1/dashboard/trends response
#[derive(Debug, Serialize)]
struct TrendsResponse {
    completions: Vec<MonthlyCompletionPoint>,
    value_history: Vec<ValueHistoryPoint>,
}

/// GET /v1/dashboard/trends - Monthly completion and value-history series
async fn get_trends(State(state): State<AppState>) -> Json<TrendsResponse> {
    let tasks = state.store.tasks().await;
    let completion_dates: Vec<chrono::NaiveDate> = tasks
        .iter()
        .flat_map(|t| t.work_logs.iter().map(|log| log.completed_date))
        .collect();

    let values = state.store.property_values().await;
    let baseline = state.store.baseline().await;

    Json(TrendsResponse {
        completions: monthly_completion_series(&completion_dates),
        value_history: value_history_series(&values, &baseline),
    })
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/dashboard/overview", get(get_overview))
        .route("/v1/dashboard/costs", get(get_costs))
        .route("/v1/dashboard/groups", get(get_groups))
        .route("/v1/dashboard/trends", get(get_trends))
}
