// Property task models - maintenance/improvement items and their work logs
// Tasks are never hard-deleted; status moves freely between any two states.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fallback bucket for tasks created without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Task urgency band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Urgent,
    Short,
    Medium,
    Long,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Urgent => "urgent",
            TaskPriority::Short => "short",
            TaskPriority::Medium => "medium",
            TaskPriority::Long => "long",
        }
    }
}

/// Task workflow status - transitions are unconstrained, any status may be
/// set to any other via a direct update
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Outstanding,
    InProgress,
    Blocked,
    Verify,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Outstanding
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Outstanding => "outstanding",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Verify => "verify",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Estimated cost band for a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostRange {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

pub fn default_currency() -> String {
    "GBP".to_string()
}

/// Recurrence interval unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    Month,
    Year,
}

/// How often a task comes back around after completion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recurrence {
    pub interval: u32,
    pub unit: RecurrenceUnit,
}

/// Attachment metadata (photos, invoices, certificates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: i64,
}

/// A record of completed work against a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkLog {
    /// Record ID
    pub id: String,
    /// Owning task
    pub task_id: String,
    /// When the work was done
    pub completed_date: NaiveDate,
    /// Who did the work (householder, contractor name)
    #[serde(default)]
    pub completed_by: String,
    /// What it cost; 0 when the work was free or cost is unknown
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub cost_includes_vat: bool,
    /// Warranty expiry for the work, if any
    #[serde(default)]
    pub warranty_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// A maintenance/improvement item tracked against the property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTask {
    /// Task ID
    pub id: String,
    pub title: String,
    /// Free-text category; empty input is coerced to "Uncategorized" on create
    #[serde(default = "default_category")]
    pub category: String,
    /// Condition of the affected element, 1 (poor) to 3 (good)
    #[serde(default = "default_condition")]
    pub condition_rating: u8,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    /// What happens if the task is neglected
    #[serde(default)]
    pub impact: String,
    /// Next date the task is due, drives due-soon/overdue flags
    #[serde(default)]
    pub next_due_date: Option<NaiveDate>,
    /// Expected cost band before any quotes come in
    #[serde(default)]
    pub default_cost_range: Option<CostRange>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    /// Structural components this task affects, by id
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub work_logs: Vec<WorkLog>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

fn default_condition() -> u8 {
    2
}

impl PropertyTask {
    /// True when at least one work log carries a non-zero cost
    pub fn has_spend(&self) -> bool {
        self.work_logs.iter().any(|log| log.cost > 0.0)
    }

    /// True when the task or any of its work logs carries an attachment
    pub fn has_evidence(&self) -> bool {
        !self.attachments.is_empty()
            || self.work_logs.iter().any(|log| !log.attachments.is_empty())
    }

    /// Total of all logged costs for the task
    pub fn total_spent(&self) -> f64 {
        self.work_logs.iter().map(|log| log.cost).sum()
    }
}

/// Trim a user-supplied category, falling back to the shared sentinel bucket
pub fn normalize_category(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

/// Request body for creating a task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (required, non-empty)
    pub title: String,
    pub category: Option<String>,
    pub condition_rating: Option<u8>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub impact: Option<String>,
    pub next_due_date: Option<NaiveDate>,
    pub default_cost_range: Option<CostRange>,
    pub recurrence: Option<Recurrence>,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Request body for updating a task; only supplied fields change
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub condition_rating: Option<u8>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub impact: Option<String>,
    pub next_due_date: Option<NaiveDate>,
    pub default_cost_range: Option<CostRange>,
    pub recurrence: Option<Recurrence>,
    pub components: Option<Vec<String>>,
}

/// Request body for logging completed work against a task
#[derive(Debug, Clone, Deserialize)]
pub struct LogWorkRequest {
    pub completed_date: NaiveDate,
    #[serde(default)]
    pub completed_by: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub cost_includes_vat: bool,
    pub warranty_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Also move the task to completed as part of logging the work
    #[serde(default)]
    pub complete_task: bool,
}

/// Query parameters for listing tasks
#[derive(Debug, Clone, Deserialize)]
pub struct GetTasksQuery {
    pub status: Option<TaskStatus>,
    pub category: Option<String>,
    /// Filter to tasks referencing this component
    pub component_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category_falls_back_to_sentinel() {
        assert_eq!(normalize_category(None), UNCATEGORIZED);
        assert_eq!(normalize_category(Some("")), UNCATEGORIZED);
        assert_eq!(normalize_category(Some("   ")), UNCATEGORIZED);
        assert_eq!(normalize_category(Some(" Roofing ")), "Roofing");
    }

    #[test]
    fn test_has_spend_requires_nonzero_cost() {
        let mut task = PropertyTask {
            id: "t1".to_string(),
            title: "Service boiler".to_string(),
            category: "Heating".to_string(),
            condition_rating: 2,
            priority: TaskPriority::Medium,
            status: TaskStatus::Outstanding,
            impact: String::new(),
            next_due_date: None,
            default_cost_range: None,
            recurrence: None,
            components: vec![],
            attachments: vec![],
            work_logs: vec![WorkLog {
                id: "w1".to_string(),
                task_id: "t1".to_string(),
                completed_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                completed_by: String::new(),
                cost: 0.0,
                cost_includes_vat: false,
                warranty_end_date: None,
                notes: String::new(),
                attachments: vec![],
            }],
            created_at: Utc::now(),
            updated_at: None,
        };
        assert!(!task.has_spend());
        task.work_logs[0].cost = 80.0;
        assert!(task.has_spend());
    }
}
