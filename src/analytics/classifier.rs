// Task classifier - partitions a task snapshot into the dashboard's views.
// Pure function over a snapshot and a reference date; recomputed per request.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{PropertyTask, TaskStatus};

/// Days ahead a due date still counts as "due soon". The window is closed on
/// both ends: today and exactly 14 days out both qualify.
pub const DUE_SOON_WINDOW_DAYS: i64 = 14;

/// The classifier's five views over a task snapshot. Views may overlap
/// (a task with spend can also be overdue); completed tasks never appear in
/// the date-driven views.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskBuckets {
    pub outstanding: Vec<PropertyTask>,
    pub due_soon: Vec<PropertyTask>,
    pub overdue: Vec<PropertyTask>,
    pub with_spend: Vec<PropertyTask>,
    pub with_evidence: Vec<PropertyTask>,
}

impl TaskBuckets {
    pub fn counts(&self) -> BucketCounts {
        BucketCounts {
            outstanding: self.outstanding.len(),
            due_soon: self.due_soon.len(),
            overdue: self.overdue.len(),
            with_spend: self.with_spend.len(),
            with_evidence: self.with_evidence.len(),
        }
    }
}

/// Headline counts for the dashboard tiles
#[derive(Debug, Clone, Serialize)]
pub struct BucketCounts {
    pub outstanding: usize,
    pub due_soon: usize,
    pub overdue: usize,
    pub with_spend: usize,
    pub with_evidence: usize,
}

/// Classify a task snapshot against a reference date.
///
/// A task with no due date is excluded from both due_soon and overdue
/// regardless of status, and a completed task is excluded from both even if
/// its due date falls in the window.
pub fn classify_tasks(tasks: &[PropertyTask], today: NaiveDate) -> TaskBuckets {
    let window_end = today + Duration::days(DUE_SOON_WINDOW_DAYS);
    let mut buckets = TaskBuckets::default();

    for task in tasks {
        if task.status == TaskStatus::Outstanding {
            buckets.outstanding.push(task.clone());
        }

        if task.status != TaskStatus::Completed {
            if let Some(due) = task.next_due_date {
                if due < today {
                    buckets.overdue.push(task.clone());
                } else if due <= window_end {
                    buckets.due_soon.push(task.clone());
                }
            }
        }

        if task.has_spend() {
            buckets.with_spend.push(task.clone());
        }
        if task.has_evidence() {
            buckets.with_evidence.push(task.clone());
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, TaskPriority, WorkLog};
    use chrono::Utc;

    fn task(id: &str, status: TaskStatus, due: Option<NaiveDate>) -> PropertyTask {
        PropertyTask {
            id: id.to_string(),
            title: format!("task {}", id),
            category: "General".to_string(),
            condition_rating: 2,
            priority: TaskPriority::Medium,
            status,
            impact: String::new(),
            next_due_date: due,
            default_cost_range: None,
            recurrence: None,
            components: vec![],
            attachments: vec![],
            work_logs: vec![],
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_completed_never_due_soon_or_overdue() {
        let today = day(2025, 6, 1);
        let tasks = vec![
            task("a", TaskStatus::Completed, Some(day(2025, 5, 1))),
            task("b", TaskStatus::Completed, Some(day(2025, 6, 5))),
        ];
        let buckets = classify_tasks(&tasks, today);
        assert!(buckets.overdue.is_empty());
        assert!(buckets.due_soon.is_empty());
    }

    #[test]
    fn test_due_soon_window_closed_at_fourteen_days() {
        let today = day(2025, 6, 1);
        let tasks = vec![
            task("edge", TaskStatus::Outstanding, Some(today + Duration::days(14))),
            task("past_edge", TaskStatus::Outstanding, Some(today + Duration::days(15))),
            task("today", TaskStatus::Outstanding, Some(today)),
        ];
        let buckets = classify_tasks(&tasks, today);
        let ids: Vec<&str> = buckets.due_soon.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["edge", "today"]);
    }

    #[test]
    fn test_no_due_date_excluded_from_date_views() {
        let today = day(2025, 6, 1);
        let tasks = vec![task("a", TaskStatus::Blocked, None)];
        let buckets = classify_tasks(&tasks, today);
        assert!(buckets.due_soon.is_empty());
        assert!(buckets.overdue.is_empty());
    }

    #[test]
    fn test_overdue_is_strictly_before_today() {
        let today = day(2025, 6, 1);
        let tasks = vec![
            task("late", TaskStatus::InProgress, Some(day(2025, 5, 31))),
            task("on_time", TaskStatus::InProgress, Some(today)),
        ];
        let buckets = classify_tasks(&tasks, today);
        assert_eq!(buckets.overdue.len(), 1);
        assert_eq!(buckets.overdue[0].id, "late");
        assert_eq!(buckets.due_soon.len(), 1);
        assert_eq!(buckets.due_soon[0].id, "on_time");
    }

    #[test]
    fn test_spend_and_evidence_views() {
        let today = day(2025, 6, 1);
        let mut with_spend = task("spend", TaskStatus::Completed, None);
        with_spend.work_logs.push(WorkLog {
            id: "w1".to_string(),
            task_id: "spend".to_string(),
            completed_date: day(2025, 5, 20),
            completed_by: String::new(),
            cost: 120.0,
            cost_includes_vat: true,
            warranty_end_date: None,
            notes: String::new(),
            attachments: vec![],
        });
        let mut with_evidence = task("evidence", TaskStatus::Outstanding, None);
        with_evidence.attachments.push(Attachment {
            filename: "invoice.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size: 1024,
        });

        let buckets = classify_tasks(&[with_spend, with_evidence], today);
        assert_eq!(buckets.with_spend.len(), 1);
        assert_eq!(buckets.with_spend[0].id, "spend");
        assert_eq!(buckets.with_evidence.len(), 1);
        assert_eq!(buckets.with_evidence[0].id, "evidence");
    }

    #[test]
    fn test_empty_input_yields_empty_views() {
        let buckets = classify_tasks(&[], day(2025, 6, 1));
        assert_eq!(buckets.counts().outstanding, 0);
        assert_eq!(buckets.counts().due_soon, 0);
        assert_eq!(buckets.counts().overdue, 0);
        assert_eq!(buckets.counts().with_spend, 0);
        assert_eq!(buckets.counts().with_evidence, 0);
    }
}
