// Project models - renovation initiatives and their CRM sub-entities
// Projects own quotes, contacts, visits, follow-ups and parsed emails by
// embedding; there are no cross-table references to resolve.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::quote::{TaskContact, TaskFollowUp, TaskQuote, TaskScheduledVisit};
use super::task::{default_currency, Attachment};

/// Project lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Scheduled,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Planning
    }
}

/// Trade category of a project
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    General,
    Plumbing,
    Electrical,
    Roofing,
    Decorating,
    Landscaping,
    Heating,
    Windows,
    Extension,
}

impl Default for ProjectCategory {
    fn default() -> Self {
        ProjectCategory::General
    }
}

/// A dated project milestone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

/// A checklist item scoped to one project, separate from the property-wide
/// task list. Never hard-deleted, only ticked off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for adding a project task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectTaskRequest {
    pub title: String,
}

/// A renovation/improvement project aggregating CRM-style sub-entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyProject {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub category: ProjectCategory,
    #[serde(default)]
    pub budget_min: f64,
    #[serde(default)]
    pub budget_max: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub target_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub emails: Vec<ProjectEmail>,
    #[serde(default)]
    pub tasks: Vec<ProjectTask>,
    #[serde(default)]
    pub contacts: Vec<TaskContact>,
    #[serde(default)]
    pub quotes: Vec<TaskQuote>,
    #[serde(default)]
    pub scheduled_visits: Vec<TaskScheduledVisit>,
    #[serde(default)]
    pub follow_ups: Vec<TaskFollowUp>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Contact details pulled out of an email
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// A money amount spotted in an email, with surrounding context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedPrice {
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub context: String,
}

/// A date spotted in an email, with what it seems to refer to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDate {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub context: String,
}

/// A follow-up suggestion pulled out of an email
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedFollowUp {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Structured data extracted from a raw email body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedEmailData {
    #[serde(default)]
    pub contacts: Vec<ExtractedContact>,
    #[serde(default)]
    pub prices: Vec<ExtractedPrice>,
    #[serde(default)]
    pub dates: Vec<ExtractedDate>,
    #[serde(default)]
    pub follow_ups: Vec<ExtractedFollowUp>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

/// A parsed/stored email linked to a project. Immutable after creation except
/// for the provenance lists appended when extracted items are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEmail {
    /// Derived from a hash of the raw content, so re-submitting the same
    /// email lands on the same record
    pub id: String,
    pub project_id: String,
    pub raw_content: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub received_date: Option<DateTime<Utc>>,
    pub parsed_at: DateTime<Utc>,
    #[serde(default)]
    pub extracted_data: ExtractedEmailData,
    #[serde(default)]
    pub contacts_created: Vec<String>,
    #[serde(default)]
    pub quotes_created: Vec<String>,
    #[serde(default)]
    pub visits_created: Vec<String>,
    #[serde(default)]
    pub follow_ups_created: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a project
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<ProjectStatus>,
    pub category: Option<ProjectCategory>,
    #[serde(default)]
    pub budget_min: f64,
    #[serde(default)]
    pub budget_max: f64,
    pub currency: Option<String>,
    pub target_start_date: Option<NaiveDate>,
    pub target_completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// Request body for updating a project; only supplied fields change
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub category: Option<ProjectCategory>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub currency: Option<String>,
    pub target_start_date: Option<NaiveDate>,
    pub target_completion_date: Option<NaiveDate>,
    pub milestones: Option<Vec<Milestone>>,
}

/// Request body for parsing an email (preview or store)
#[derive(Debug, Clone, Deserialize)]
pub struct ParseEmailRequest {
    pub email_content: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub sender: String,
    pub received_date: Option<DateTime<Utc>>,
}

/// Response for a parse-only call
#[derive(Debug, Clone, Serialize)]
pub struct EmailParseResponse {
    pub success: bool,
    pub extracted_data: ExtractedEmailData,
    /// "llm" or "heuristic"
    pub method: String,
}

/// Request body for materializing accepted extraction items into the project.
/// Indexes refer to positions in the stored email's extracted_data lists.
#[derive(Debug, Clone, Deserialize)]
pub struct AcceptExtractedRequest {
    #[serde(default)]
    pub contact_indexes: Vec<usize>,
    /// Prices to turn into pending quotes
    #[serde(default)]
    pub price_indexes: Vec<usize>,
    /// Dates to turn into scheduled visits
    #[serde(default)]
    pub date_indexes: Vec<usize>,
    #[serde(default)]
    pub follow_up_indexes: Vec<usize>,
}

/// Response after accepting extracted items
#[derive(Debug, Clone, Serialize)]
pub struct AcceptExtractedResponse {
    pub contacts_created: Vec<String>,
    pub quotes_created: Vec<String>,
    pub visits_created: Vec<String>,
    pub follow_ups_created: Vec<String>,
}
