// Models module

use serde::Serialize;

pub mod component;
pub mod project;
pub mod quote;
pub mod shopping;
pub mod task;
pub mod valuation;

pub use component::{CreateComponentRequest, PropertyComponent};
pub use project::{
    AcceptExtractedRequest, AcceptExtractedResponse, CreateProjectRequest,
    CreateProjectTaskRequest, EmailParseResponse, ExtractedContact, ExtractedDate,
    ExtractedEmailData, ExtractedFollowUp, ExtractedPrice, Milestone, ParseEmailRequest,
    ProjectCategory, ProjectEmail, ProjectStatus, ProjectTask, PropertyProject,
    UpdateProjectRequest,
};
pub use quote::{
    Contractor, CreateContactRequest, CreateContractorRequest, CreateFollowUpRequest,
    CreateQuoteRequest, CreateVisitRequest, ManualLineItem, QuoteStatus, SetCompletedRequest,
    TaskContact, TaskFollowUp, TaskQuote, TaskScheduledVisit, UpdateQuoteRequest,
};
pub use shopping::{CreateShoppingItemRequest, ShoppingItem, UpdateShoppingItemRequest};
pub use task::{
    normalize_category, Attachment, CostRange, CreateTaskRequest, GetTasksQuery, LogWorkRequest,
    PropertyTask, Recurrence, RecurrenceUnit, TaskPriority, TaskStatus, UpdateTaskRequest,
    WorkLog, UNCATEGORIZED,
};
pub use valuation::{
    AreaStatistics, BinCollection, BinCollectionResponse, ComparableSale, CouncilNewsItem,
    CouncilNewsResponse, CreateValueEntryRequest, PropertyBaseline, PropertyInsight,
    PropertyInsightsResponse, PropertyValueEntry, UpdateProfileRequest, ValuationApiResponse,
};

/// Generic acknowledgment for delete/status operations
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
