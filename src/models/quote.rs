// Quote and CRM sub-entity models - owned by a project, deletable
// Quotes come in by hand or from email/PDF extraction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::task::default_currency;

/// Quote acceptance state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Rejected,
}

impl Default for QuoteStatus {
    fn default() -> Self {
        QuoteStatus::Pending
    }
}

/// One row of a manually-entered quote breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualLineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labour: f64,
    #[serde(default)]
    pub materials: f64,
    #[serde(default)]
    pub amount: f64,
}

/// A contractor quotation, manually entered or extracted from a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskQuote {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub contractor_name: String,
    /// Trading/company name; grouping falls back to contractor_name when absent
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Quoted amount; must be > 0 at submission
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub terms: String,
    #[serde(default)]
    pub includes_vat: bool,
    #[serde(default)]
    pub manual_line_items: Vec<ManualLineItem>,
    #[serde(default)]
    pub status: QuoteStatus,
    /// Full structured extraction when the quote came from a document
    #[serde(default)]
    pub extracted_quote_data: Option<serde_json::Value>,
    /// Soft link to a known contractor, resolved by lookup at render time
    #[serde(default)]
    pub contractor_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A person attached to a task or project (plumber, surveyor, neighbour)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskContact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// A booked site visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskScheduledVisit {
    pub id: String,
    pub visit_date: NaiveDate,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A follow-up reminder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFollowUp {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// A known tradesperson/company, link target of TaskQuote.contractor_id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contractor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub trade: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for adding a quote to a project
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub contractor_name: String,
    pub company: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub amount: f64,
    pub currency: Option<String>,
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub terms: String,
    #[serde(default)]
    pub includes_vat: bool,
    #[serde(default)]
    pub manual_line_items: Vec<ManualLineItem>,
    pub extracted_quote_data: Option<serde_json::Value>,
    pub contractor_id: Option<String>,
}

/// Request body for changing a quote's acceptance state
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuoteRequest {
    pub status: QuoteStatus,
}

/// Request body for adding a contact
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
}

/// Request body for booking a visit
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVisitRequest {
    pub visit_date: NaiveDate,
    #[serde(default)]
    pub purpose: String,
}

/// Request body for adding a follow-up
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFollowUpRequest {
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

/// Request body for marking a visit or follow-up done/undone
#[derive(Debug, Clone, Deserialize)]
pub struct SetCompletedRequest {
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

/// Request body for registering a contractor
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContractorRequest {
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub trade: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}
