// Analytics module - pure derived-metric functions over store snapshots.
// Everything here is synchronous, side-effect free and recomputed per call.

pub mod classifier;
pub mod costs;
pub mod grouping;
pub mod series;
pub mod valuation;

pub use classifier::{classify_tasks, BucketCounts, TaskBuckets, DUE_SOON_WINDOW_DAYS};
pub use costs::{
    aggregate_costs_by_category, aggregate_quotes_by_company, overall_totals, CategoryCost,
    CompanyQuoteTotal,
};
pub use grouping::{group_tasks, GroupKey, TaskGroup, PRIORITY_ORDER, STATUS_ORDER};
pub use series::{
    monthly_completion_series, value_history_series, MonthlyCompletionPoint, ValueHistoryPoint,
};
pub use valuation::{
    blend_estimates, growth_estimate, EstimateSource, ValuationBlend, ANNUAL_GROWTH_RATE,
};
