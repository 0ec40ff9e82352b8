// Time-windowed series - calendar-month buckets for the trend charts.
// Events are sorted ascending before bucketing so month keys appear in
// chronological first-appearance order.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{PropertyBaseline, PropertyValueEntry};

/// One month's completions plus the running total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCompletionPoint {
    /// Bucket key, "YYYY-MM"
    pub month_label: String,
    pub completed_this_month: usize,
    pub cumulative_completed: usize,
}

/// Bucket completion dates into calendar months with a cumulative count.
pub fn monthly_completion_series(dates: &[NaiveDate]) -> Vec<MonthlyCompletionPoint> {
    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort();

    let mut points: Vec<MonthlyCompletionPoint> = Vec::new();
    let mut cumulative = 0usize;

    for date in sorted {
        let label = date.format("%Y-%m").to_string();
        cumulative += 1;
        match points.last_mut() {
            Some(last) if last.month_label == label => {
                last.completed_this_month += 1;
                last.cumulative_completed = cumulative;
            }
            _ => points.push(MonthlyCompletionPoint {
                month_label: label,
                completed_this_month: 1,
                cumulative_completed: cumulative,
            }),
        }
    }

    points
}

/// One point on the value-history chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueHistoryPoint {
    /// Display label, month name + 2-digit year ("Mar 24")
    pub label: String,
    pub date: NaiveDate,
    pub value: f64,
    /// True for the synthetic purchase-price point used when no valuations
    /// have been recorded yet
    pub is_purchase: bool,
}

/// Value entries as chart points sorted ascending by date. When the list is
/// empty and the baseline carries a purchase price and date, the purchase
/// itself becomes the sole point.
pub fn value_history_series(
    entries: &[PropertyValueEntry],
    baseline: &PropertyBaseline,
) -> Vec<ValueHistoryPoint> {
    if entries.is_empty() {
        if let (Some(price), Some(date)) = (baseline.purchase_price, baseline.purchase_date) {
            return vec![ValueHistoryPoint {
                label: date.format("%b %y").to_string(),
                date,
                value: price,
                is_purchase: true,
            }];
        }
        return vec![];
    }

    let mut sorted: Vec<&PropertyValueEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted
        .into_iter()
        .map(|entry| ValueHistoryPoint {
            label: entry.date.format("%b %y").to_string(),
            date: entry.date,
            value: entry.value,
            is_purchase: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(date: NaiveDate, value: f64) -> PropertyValueEntry {
        PropertyValueEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            value,
            source: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cumulative_is_non_decreasing_and_ends_at_n() {
        let dates = vec![
            day(2025, 3, 10),
            day(2025, 1, 5),
            day(2025, 1, 20),
            day(2025, 2, 1),
            day(2025, 3, 2),
        ];
        let series = monthly_completion_series(&dates);
        let labels: Vec<&str> = series.iter().map(|p| p.month_label.as_str()).collect();
        assert_eq!(labels, vec!["2025-01", "2025-02", "2025-03"]);
        let mut previous = 0;
        for point in &series {
            assert!(point.cumulative_completed >= previous);
            previous = point.cumulative_completed;
        }
        assert_eq!(series.last().unwrap().cumulative_completed, dates.len());
    }

    #[test]
    fn test_month_labels_zero_padded() {
        let series = monthly_completion_series(&[day(2024, 9, 30)]);
        assert_eq!(series[0].month_label, "2024-09");
    }

    #[test]
    fn test_unsorted_input_still_buckets_chronologically() {
        let dates = vec![day(2025, 5, 1), day(2024, 12, 25), day(2025, 5, 2)];
        let series = monthly_completion_series(&dates);
        assert_eq!(series[0].month_label, "2024-12");
        assert_eq!(series[1].month_label, "2025-05");
        assert_eq!(series[1].completed_this_month, 2);
    }

    #[test]
    fn test_empty_values_fall_back_to_purchase_point() {
        let baseline = PropertyBaseline {
            purchase_price: Some(250000.0),
            purchase_date: Some(day(2021, 3, 15)),
            ..Default::default()
        };
        let series = value_history_series(&[], &baseline);
        assert_eq!(series.len(), 1);
        assert!(series[0].is_purchase);
        assert_eq!(series[0].value, 250000.0);
        assert_eq!(series[0].label, "Mar 21");
    }

    #[test]
    fn test_no_values_and_no_purchase_yields_empty() {
        let series = value_history_series(&[], &PropertyBaseline::default());
        assert!(series.is_empty());
    }

    #[test]
    fn test_value_points_sorted_ascending() {
        let entries = vec![
            entry(day(2025, 6, 1), 300000.0),
            entry(day(2024, 6, 1), 280000.0),
        ];
        let baseline = PropertyBaseline::default();
        let series = value_history_series(&entries, &baseline);
        assert_eq!(series[0].value, 280000.0);
        assert_eq!(series[0].label, "Jun 24");
        assert_eq!(series[1].value, 300000.0);
    }
}
