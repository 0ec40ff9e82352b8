// Property store - the application's single state container.
// Reads hand out cloned snapshots; writes are explicit command methods that
// mutate under the write lock and persist the whole tree to a JSON file.
// Single writer, no transactions.

use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::models::{
    AcceptExtractedRequest, AcceptExtractedResponse, Contractor, CreateComponentRequest,
    CreateContactRequest, CreateContractorRequest, CreateFollowUpRequest, CreateProjectRequest,
    CreateProjectTaskRequest, CreateQuoteRequest, CreateShoppingItemRequest, CreateTaskRequest,
    CreateValueEntryRequest, CreateVisitRequest, ExtractedEmailData, LogWorkRequest,
    ParseEmailRequest, ProjectEmail, ProjectTask, PropertyBaseline, PropertyComponent,
    PropertyProject, PropertyTask, PropertyValueEntry, QuoteStatus, ShoppingItem, TaskContact,
    TaskFollowUp, TaskQuote, TaskScheduledVisit, TaskStatus, UpdateProjectRequest,
    UpdateProfileRequest, UpdateShoppingItemRequest, UpdateTaskRequest, WorkLog,
    normalize_category,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Generate a stable record ID from a seed string using a SHA256 hash.
/// Used for parsed emails so re-submitting identical raw content lands on
/// the same record.
pub fn id_from_seed(seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..10])
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Everything the store owns, persisted as one JSON tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    tasks: Vec<PropertyTask>,
    #[serde(default)]
    projects: Vec<PropertyProject>,
    #[serde(default)]
    components: Vec<PropertyComponent>,
    #[serde(default)]
    contractors: Vec<Contractor>,
    #[serde(default)]
    property_values: Vec<PropertyValueEntry>,
    #[serde(default)]
    baseline: PropertyBaseline,
    #[serde(default)]
    shopping_items: Vec<ShoppingItem>,
}

/// The dependency-injected state container behind all routes
pub struct PropertyStore {
    data: RwLock<StoreData>,
    persist_path: Option<PathBuf>,
}

impl PropertyStore {
    /// Open the store, loading an existing snapshot file when one exists.
    /// A missing file starts the store empty; a corrupt one is an error.
    pub fn open(persist_path: Option<PathBuf>) -> Result<Self, BoxError> {
        let data = match &persist_path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read store file {}: {}", path.display(), e))?;
                serde_json::from_str(&raw)
                    .map_err(|e| format!("Failed to parse store file {}: {}", path.display(), e))?
            }
            _ => StoreData::default(),
        };
        Ok(Self {
            data: RwLock::new(data),
            persist_path,
        })
    }

    /// In-memory store for tests
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
            persist_path: None,
        }
    }

    async fn persist(&self, data: &StoreData) -> Result<(), BoxError> {
        if let Some(path) = &self.persist_path {
            let json = serde_json::to_string_pretty(data)?;
            tokio::fs::write(path, json)
                .await
                .map_err(|e| format!("Failed to write store file {}: {}", path.display(), e))?;
        }
        Ok(())
    }

    // ========================================================================
    // TASKS
    // ========================================================================

    /// Snapshot of all tasks
    pub async fn tasks(&self) -> Vec<PropertyTask> {
        self.data.read().await.tasks.clone()
    }

    pub async fn get_task(&self, task_id: &str) -> Option<PropertyTask> {
        self.data
            .read()
            .await
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
    }

    pub async fn add_task(&self, request: CreateTaskRequest) -> Result<PropertyTask, BoxError> {
        let task = PropertyTask {
            id: new_id(),
            title: request.title.trim().to_string(),
            category: normalize_category(request.category.as_deref()),
            condition_rating: request.condition_rating.unwrap_or(2).clamp(1, 3),
            priority: request.priority.unwrap_or_default(),
            status: request.status.unwrap_or_default(),
            impact: request.impact.unwrap_or_default(),
            next_due_date: request.next_due_date,
            default_cost_range: request.default_cost_range,
            recurrence: request.recurrence,
            components: request.components,
            attachments: request.attachments,
            work_logs: vec![],
            created_at: Utc::now(),
            updated_at: None,
        };

        let mut data = self.data.write().await;
        data.tasks.push(task.clone());
        self.persist(&data).await?;
        Ok(task)
    }

    /// Apply a partial update. Status moves freely; there is no state machine.
    pub async fn update_task(
        &self,
        task_id: &str,
        request: UpdateTaskRequest,
    ) -> Result<Option<PropertyTask>, BoxError> {
        let mut data = self.data.write().await;
        let Some(task) = data.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(None);
        };

        if let Some(title) = request.title {
            task.title = title.trim().to_string();
        }
        if let Some(category) = request.category {
            task.category = normalize_category(Some(&category));
        }
        if let Some(rating) = request.condition_rating {
            task.condition_rating = rating.clamp(1, 3);
        }
        if let Some(priority) = request.priority {
            task.priority = priority;
        }
        if let Some(status) = request.status {
            task.status = status;
        }
        if let Some(impact) = request.impact {
            task.impact = impact;
        }
        if let Some(due) = request.next_due_date {
            task.next_due_date = Some(due);
        }
        if let Some(range) = request.default_cost_range {
            task.default_cost_range = Some(range);
        }
        if let Some(recurrence) = request.recurrence {
            task.recurrence = Some(recurrence);
        }
        if let Some(components) = request.components {
            task.components = components;
        }
        task.updated_at = Some(Utc::now());

        let updated = task.clone();
        self.persist(&data).await?;
        Ok(Some(updated))
    }

    /// Record completed work; optionally moves the task to completed.
    pub async fn add_work_log(
        &self,
        task_id: &str,
        request: LogWorkRequest,
    ) -> Result<Option<WorkLog>, BoxError> {
        let mut data = self.data.write().await;
        let Some(task) = data.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(None);
        };

        let log = WorkLog {
            id: new_id(),
            task_id: task_id.to_string(),
            completed_date: request.completed_date,
            completed_by: request.completed_by,
            cost: request.cost.max(0.0),
            cost_includes_vat: request.cost_includes_vat,
            warranty_end_date: request.warranty_end_date,
            notes: request.notes,
            attachments: request.attachments,
        };
        task.work_logs.push(log.clone());
        if request.complete_task {
            task.status = TaskStatus::Completed;
        }
        task.updated_at = Some(Utc::now());

        self.persist(&data).await?;
        Ok(Some(log))
    }

    // ========================================================================
    // PROJECTS
    // ========================================================================

    pub async fn projects(&self) -> Vec<PropertyProject> {
        self.data.read().await.projects.clone()
    }

    pub async fn get_project(&self, project_id: &str) -> Option<PropertyProject> {
        self.data
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
    }

    pub async fn add_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<PropertyProject, BoxError> {
        let project = PropertyProject {
            id: new_id(),
            title: request.title.trim().to_string(),
            description: request.description,
            status: request.status.unwrap_or_default(),
            category: request.category.unwrap_or_default(),
            budget_min: request.budget_min,
            budget_max: request.budget_max,
            currency: request
                .currency
                .unwrap_or_else(crate::models::task::default_currency),
            target_start_date: request.target_start_date,
            target_completion_date: request.target_completion_date,
            milestones: request.milestones,
            emails: vec![],
            tasks: vec![],
            contacts: vec![],
            quotes: vec![],
            scheduled_visits: vec![],
            follow_ups: vec![],
            attachments: vec![],
            created_at: Utc::now(),
            updated_at: None,
        };

        let mut data = self.data.write().await;
        data.projects.push(project.clone());
        self.persist(&data).await?;
        Ok(project)
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        request: UpdateProjectRequest,
    ) -> Result<Option<PropertyProject>, BoxError> {
        let mut data = self.data.write().await;
        let Some(project) = data.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };

        if let Some(title) = request.title {
            project.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            project.description = description;
        }
        if let Some(status) = request.status {
            project.status = status;
        }
        if let Some(category) = request.category {
            project.category = category;
        }
        if let Some(min) = request.budget_min {
            project.budget_min = min;
        }
        if let Some(max) = request.budget_max {
            project.budget_max = max;
        }
        if let Some(currency) = request.currency {
            project.currency = currency;
        }
        if let Some(start) = request.target_start_date {
            project.target_start_date = Some(start);
        }
        if let Some(completion) = request.target_completion_date {
            project.target_completion_date = Some(completion);
        }
        if let Some(milestones) = request.milestones {
            project.milestones = milestones;
        }
        project.updated_at = Some(Utc::now());

        let updated = project.clone();
        self.persist(&data).await?;
        Ok(Some(updated))
    }

    /// Run a closure against one project under the write lock, persist, and
    /// return its result. Shared plumbing for the embedded CRM collections.
    async fn with_project<T>(
        &self,
        project_id: &str,
        mutate: impl FnOnce(&mut PropertyProject) -> Option<T>,
    ) -> Result<Option<T>, BoxError> {
        let mut data = self.data.write().await;
        let Some(project) = data.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(None);
        };
        let result = mutate(project);
        if result.is_some() {
            project.updated_at = Some(Utc::now());
            self.persist(&data).await?;
        }
        Ok(result)
    }

    pub async fn add_quote(
        &self,
        project_id: &str,
        request: CreateQuoteRequest,
    ) -> Result<Option<TaskQuote>, BoxError> {
        let quote = TaskQuote {
            id: new_id(),
            title: request.title,
            contractor_name: request.contractor_name,
            company: request.company,
            phone: request.phone,
            email: request.email,
            amount: request.amount,
            currency: request
                .currency
                .unwrap_or_else(crate::models::task::default_currency),
            valid_until: request.valid_until,
            notes: request.notes,
            terms: request.terms,
            includes_vat: request.includes_vat,
            manual_line_items: request.manual_line_items,
            status: QuoteStatus::Pending,
            extracted_quote_data: request.extracted_quote_data,
            contractor_id: request.contractor_id,
            created_at: Utc::now(),
        };
        self.with_project(project_id, move |project| {
            project.quotes.push(quote.clone());
            Some(quote)
        })
        .await
    }

    pub async fn update_quote_status(
        &self,
        project_id: &str,
        quote_id: &str,
        status: QuoteStatus,
    ) -> Result<Option<TaskQuote>, BoxError> {
        let quote_id = quote_id.to_string();
        self.with_project(project_id, move |project| {
            let quote = project.quotes.iter_mut().find(|q| q.id == quote_id)?;
            quote.status = status;
            Some(quote.clone())
        })
        .await
    }

    pub async fn delete_quote(
        &self,
        project_id: &str,
        quote_id: &str,
    ) -> Result<Option<()>, BoxError> {
        let quote_id = quote_id.to_string();
        self.with_project(project_id, move |project| {
            let before = project.quotes.len();
            project.quotes.retain(|q| q.id != quote_id);
            (project.quotes.len() < before).then_some(())
        })
        .await
    }

    /// Add a checklist item to a project. Like property tasks, these are
    /// never hard-deleted.
    pub async fn add_project_task(
        &self,
        project_id: &str,
        request: CreateProjectTaskRequest,
    ) -> Result<Option<ProjectTask>, BoxError> {
        let task = ProjectTask {
            id: new_id(),
            title: request.title.trim().to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        self.with_project(project_id, move |project| {
            project.tasks.push(task.clone());
            Some(task)
        })
        .await
    }

    pub async fn set_project_task_completed(
        &self,
        project_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<Option<ProjectTask>, BoxError> {
        let task_id = task_id.to_string();
        self.with_project(project_id, move |project| {
            let task = project.tasks.iter_mut().find(|t| t.id == task_id)?;
            task.completed = completed;
            Some(task.clone())
        })
        .await
    }

    pub async fn add_contact(
        &self,
        project_id: &str,
        request: CreateContactRequest,
    ) -> Result<Option<TaskContact>, BoxError> {
        let contact = TaskContact {
            id: new_id(),
            name: request.name,
            company: request.company,
            phone: request.phone,
            email: request.email,
            notes: request.notes,
            created_at: Utc::now(),
        };
        self.with_project(project_id, move |project| {
            project.contacts.push(contact.clone());
            Some(contact)
        })
        .await
    }

    pub async fn delete_contact(
        &self,
        project_id: &str,
        contact_id: &str,
    ) -> Result<Option<()>, BoxError> {
        let contact_id = contact_id.to_string();
        self.with_project(project_id, move |project| {
            let before = project.contacts.len();
            project.contacts.retain(|c| c.id != contact_id);
            (project.contacts.len() < before).then_some(())
        })
        .await
    }

    pub async fn add_visit(
        &self,
        project_id: &str,
        request: CreateVisitRequest,
    ) -> Result<Option<TaskScheduledVisit>, BoxError> {
        let visit = TaskScheduledVisit {
            id: new_id(),
            visit_date: request.visit_date,
            purpose: request.purpose,
            completed: false,
            created_at: Utc::now(),
        };
        self.with_project(project_id, move |project| {
            project.scheduled_visits.push(visit.clone());
            Some(visit)
        })
        .await
    }

    pub async fn set_visit_completed(
        &self,
        project_id: &str,
        visit_id: &str,
        completed: bool,
    ) -> Result<Option<TaskScheduledVisit>, BoxError> {
        let visit_id = visit_id.to_string();
        self.with_project(project_id, move |project| {
            let visit = project
                .scheduled_visits
                .iter_mut()
                .find(|v| v.id == visit_id)?;
            visit.completed = completed;
            Some(visit.clone())
        })
        .await
    }

    pub async fn delete_visit(
        &self,
        project_id: &str,
        visit_id: &str,
    ) -> Result<Option<()>, BoxError> {
        let visit_id = visit_id.to_string();
        self.with_project(project_id, move |project| {
            let before = project.scheduled_visits.len();
            project.scheduled_visits.retain(|v| v.id != visit_id);
            (project.scheduled_visits.len() < before).then_some(())
        })
        .await
    }

    pub async fn add_follow_up(
        &self,
        project_id: &str,
        request: CreateFollowUpRequest,
    ) -> Result<Option<TaskFollowUp>, BoxError> {
        let follow_up = TaskFollowUp {
            id: new_id(),
            description: request.description,
            due_date: request.due_date,
            completed: false,
            created_at: Utc::now(),
        };
        self.with_project(project_id, move |project| {
            project.follow_ups.push(follow_up.clone());
            Some(follow_up)
        })
        .await
    }

    pub async fn set_follow_up_completed(
        &self,
        project_id: &str,
        follow_up_id: &str,
        completed: bool,
    ) -> Result<Option<TaskFollowUp>, BoxError> {
        let follow_up_id = follow_up_id.to_string();
        self.with_project(project_id, move |project| {
            let follow_up = project
                .follow_ups
                .iter_mut()
                .find(|f| f.id == follow_up_id)?;
            follow_up.completed = completed;
            Some(follow_up.clone())
        })
        .await
    }

    pub async fn delete_follow_up(
        &self,
        project_id: &str,
        follow_up_id: &str,
    ) -> Result<Option<()>, BoxError> {
        let follow_up_id = follow_up_id.to_string();
        self.with_project(project_id, move |project| {
            let before = project.follow_ups.len();
            project.follow_ups.retain(|f| f.id != follow_up_id);
            (project.follow_ups.len() < before).then_some(())
        })
        .await
    }

    // ========================================================================
    // PROJECT EMAILS
    // ========================================================================

    /// Store a parsed email against a project. The record ID derives from the
    /// raw content, so storing the same email twice returns the original.
    pub async fn add_project_email(
        &self,
        project_id: &str,
        request: &ParseEmailRequest,
        extracted: ExtractedEmailData,
    ) -> Result<Option<ProjectEmail>, BoxError> {
        let email = ProjectEmail {
            id: id_from_seed(&request.email_content),
            project_id: project_id.to_string(),
            raw_content: request.email_content.clone(),
            subject: request.subject.clone(),
            sender: request.sender.clone(),
            received_date: request.received_date,
            parsed_at: Utc::now(),
            extracted_data: extracted,
            contacts_created: vec![],
            quotes_created: vec![],
            visits_created: vec![],
            follow_ups_created: vec![],
            created_at: Utc::now(),
        };
        self.with_project(project_id, move |project| {
            if let Some(existing) = project.emails.iter().find(|e| e.id == email.id) {
                return Some(existing.clone());
            }
            project.emails.push(email.clone());
            Some(email)
        })
        .await
    }

    /// Materialize accepted extraction items into the project's CRM lists and
    /// record their IDs on the email's provenance lists.
    pub async fn accept_extracted(
        &self,
        project_id: &str,
        email_id: &str,
        request: &AcceptExtractedRequest,
    ) -> Result<Option<AcceptExtractedResponse>, BoxError> {
        let email_id = email_id.to_string();
        let request = request.clone();
        self.with_project(project_id, move |project| {
            let email_index = project.emails.iter().position(|e| e.id == email_id)?;
            let extracted = project.emails[email_index].extracted_data.clone();
            let now = Utc::now();

            let mut response = AcceptExtractedResponse {
                contacts_created: vec![],
                quotes_created: vec![],
                visits_created: vec![],
                follow_ups_created: vec![],
            };

            for &index in &request.contact_indexes {
                let Some(found) = extracted.contacts.get(index) else {
                    continue;
                };
                let contact = TaskContact {
                    id: new_id(),
                    name: found.name.clone(),
                    company: found.company.clone(),
                    phone: found.phone.clone(),
                    email: found.email.clone(),
                    notes: String::new(),
                    created_at: now,
                };
                response.contacts_created.push(contact.id.clone());
                project.contacts.push(contact);
            }

            for &index in &request.price_indexes {
                let Some(price) = extracted.prices.get(index) else {
                    continue;
                };
                if price.amount <= 0.0 {
                    continue;
                }
                let contact = extracted.contacts.first();
                let quote = TaskQuote {
                    id: new_id(),
                    title: price.context.clone(),
                    contractor_name: contact.map(|c| c.name.clone()).unwrap_or_default(),
                    company: contact
                        .map(|c| c.company.clone())
                        .filter(|c| !c.is_empty()),
                    phone: String::new(),
                    email: String::new(),
                    amount: price.amount,
                    currency: price.currency.clone(),
                    valid_until: None,
                    notes: String::new(),
                    terms: String::new(),
                    includes_vat: false,
                    manual_line_items: vec![],
                    status: QuoteStatus::Pending,
                    extracted_quote_data: None,
                    contractor_id: None,
                    created_at: now,
                };
                response.quotes_created.push(quote.id.clone());
                project.quotes.push(quote);
            }

            for &index in &request.date_indexes {
                let Some(found) = extracted.dates.get(index) else {
                    continue;
                };
                let Some(date) = found.date else {
                    continue;
                };
                let visit = TaskScheduledVisit {
                    id: new_id(),
                    visit_date: date,
                    purpose: found.context.clone(),
                    completed: false,
                    created_at: now,
                };
                response.visits_created.push(visit.id.clone());
                project.scheduled_visits.push(visit);
            }

            for &index in &request.follow_up_indexes {
                let Some(found) = extracted.follow_ups.get(index) else {
                    continue;
                };
                let follow_up = TaskFollowUp {
                    id: new_id(),
                    description: found.description.clone(),
                    due_date: found.due_date,
                    completed: false,
                    created_at: now,
                };
                response.follow_ups_created.push(follow_up.id.clone());
                project.follow_ups.push(follow_up);
            }

            let email = &mut project.emails[email_index];
            email
                .contacts_created
                .extend(response.contacts_created.iter().cloned());
            email
                .quotes_created
                .extend(response.quotes_created.iter().cloned());
            email
                .visits_created
                .extend(response.visits_created.iter().cloned());
            email
                .follow_ups_created
                .extend(response.follow_ups_created.iter().cloned());

            Some(response)
        })
        .await
    }

    // ========================================================================
    // COMPONENTS / CONTRACTORS
    // ========================================================================

    pub async fn components(&self) -> Vec<PropertyComponent> {
        self.data.read().await.components.clone()
    }

    pub async fn add_component(
        &self,
        request: CreateComponentRequest,
    ) -> Result<PropertyComponent, BoxError> {
        let component = PropertyComponent {
            id: new_id(),
            name: request.name.trim().to_string(),
            floor: request.floor,
            created_at: Utc::now(),
        };
        let mut data = self.data.write().await;
        data.components.push(component.clone());
        self.persist(&data).await?;
        Ok(component)
    }

    pub async fn contractors(&self) -> Vec<Contractor> {
        self.data.read().await.contractors.clone()
    }

    pub async fn add_contractor(
        &self,
        request: CreateContractorRequest,
    ) -> Result<Contractor, BoxError> {
        let contractor = Contractor {
            id: new_id(),
            name: request.name.trim().to_string(),
            company: request.company,
            trade: request.trade,
            phone: request.phone,
            email: request.email,
            created_at: Utc::now(),
        };
        let mut data = self.data.write().await;
        data.contractors.push(contractor.clone());
        self.persist(&data).await?;
        Ok(contractor)
    }

    // ========================================================================
    // BASELINE / VALUE HISTORY
    // ========================================================================

    pub async fn baseline(&self) -> PropertyBaseline {
        self.data.read().await.baseline.clone()
    }

    pub async fn set_baseline(
        &self,
        request: UpdateProfileRequest,
    ) -> Result<PropertyBaseline, BoxError> {
        let baseline = PropertyBaseline {
            address: request.address,
            postcode: request.postcode,
            property_type: request.property_type,
            purchase_price: request.purchase_price,
            purchase_date: request.purchase_date,
            street: request.street,
            nearby_streets: request.nearby_streets,
        };
        let mut data = self.data.write().await;
        data.baseline = baseline.clone();
        self.persist(&data).await?;
        Ok(baseline)
    }

    pub async fn property_values(&self) -> Vec<PropertyValueEntry> {
        self.data.read().await.property_values.clone()
    }

    pub async fn add_value_entry(
        &self,
        request: CreateValueEntryRequest,
    ) -> Result<PropertyValueEntry, BoxError> {
        let entry = PropertyValueEntry {
            id: new_id(),
            date: request.date,
            value: request.value,
            source: request.source,
            notes: request.notes,
            created_at: Utc::now(),
        };
        let mut data = self.data.write().await;
        data.property_values.push(entry.clone());
        self.persist(&data).await?;
        Ok(entry)
    }

    // ========================================================================
    // SHOPPING LIST
    // ========================================================================

    pub async fn shopping_items(&self) -> Vec<ShoppingItem> {
        self.data.read().await.shopping_items.clone()
    }

    pub async fn add_shopping_item(
        &self,
        request: CreateShoppingItemRequest,
    ) -> Result<ShoppingItem, BoxError> {
        let item = ShoppingItem {
            id: new_id(),
            name: request.name.trim().to_string(),
            quantity: request.quantity.max(1),
            note: request.note,
            purchased: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        let mut data = self.data.write().await;
        data.shopping_items.push(item.clone());
        self.persist(&data).await?;
        Ok(item)
    }

    pub async fn update_shopping_item(
        &self,
        item_id: &str,
        request: UpdateShoppingItemRequest,
    ) -> Result<Option<ShoppingItem>, BoxError> {
        let mut data = self.data.write().await;
        let Some(item) = data.shopping_items.iter_mut().find(|i| i.id == item_id) else {
            return Ok(None);
        };
        if let Some(name) = request.name {
            item.name = name.trim().to_string();
        }
        if let Some(quantity) = request.quantity {
            item.quantity = quantity.max(1);
        }
        if let Some(note) = request.note {
            item.note = note;
        }
        if let Some(purchased) = request.purchased {
            item.purchased = purchased;
        }
        item.updated_at = Some(Utc::now());

        let updated = item.clone();
        self.persist(&data).await?;
        Ok(Some(updated))
    }

    pub async fn delete_shopping_item(&self, item_id: &str) -> Result<Option<()>, BoxError> {
        let mut data = self.data.write().await;
        let before = data.shopping_items.len();
        data.shopping_items.retain(|i| i.id != item_id);
        if data.shopping_items.len() == before {
            return Ok(None);
        }
        self.persist(&data).await?;
        Ok(Some(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;

    #[test]
    fn test_id_from_seed_is_stable() {
        let id = id_from_seed("quote email body");
        assert_eq!(id.len(), 20);
        assert_eq!(id, id_from_seed("quote email body"));
        assert_ne!(id, id_from_seed("different body"));
    }

    #[tokio::test]
    async fn test_add_task_normalizes_category_and_condition() {
        let store = PropertyStore::in_memory();
        let task = store
            .add_task(CreateTaskRequest {
                title: "  Fix gutter  ".to_string(),
                category: Some("   ".to_string()),
                condition_rating: Some(7),
                priority: Some(TaskPriority::Urgent),
                status: None,
                impact: None,
                next_due_date: None,
                default_cost_range: None,
                recurrence: None,
                components: vec![],
                attachments: vec![],
            })
            .await
            .unwrap();
        assert_eq!(task.title, "Fix gutter");
        assert_eq!(task.category, "Uncategorized");
        assert_eq!(task.condition_rating, 3);
        assert_eq!(task.status, TaskStatus::Outstanding);
    }

    #[tokio::test]
    async fn test_work_log_can_complete_task() {
        let store = PropertyStore::in_memory();
        let task = store
            .add_task(CreateTaskRequest {
                title: "Service boiler".to_string(),
                category: Some("Heating".to_string()),
                condition_rating: None,
                priority: None,
                status: None,
                impact: None,
                next_due_date: None,
                default_cost_range: None,
                recurrence: None,
                components: vec![],
                attachments: vec![],
            })
            .await
            .unwrap();

        let log = store
            .add_work_log(
                &task.id,
                LogWorkRequest {
                    completed_date: chrono::NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
                    completed_by: "Gas engineer".to_string(),
                    cost: 95.0,
                    cost_includes_vat: true,
                    warranty_end_date: None,
                    notes: String::new(),
                    attachments: vec![],
                    complete_task: true,
                },
            )
            .await
            .unwrap()
            .expect("task exists");
        assert_eq!(log.cost, 95.0);

        let task = store.get_task(&task.id).await.unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.work_logs.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_ids_return_none() {
        let store = PropertyStore::in_memory();
        let updated = store
            .update_shopping_item(
                "missing",
                UpdateShoppingItemRequest {
                    name: None,
                    quantity: None,
                    note: None,
                    purchased: Some(true),
                },
            )
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(store.delete_shopping_item("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_round_trips_through_snapshot_file() {
        let path = std::env::temp_dir().join(format!("property-desk-{}.json", uuid::Uuid::new_v4()));
        {
            let store = PropertyStore::open(Some(path.clone())).unwrap();
            store
                .add_shopping_item(CreateShoppingItemRequest {
                    name: "Wood filler".to_string(),
                    quantity: 2,
                    note: String::new(),
                })
                .await
                .unwrap();
        }
        let reopened = PropertyStore::open(Some(path.clone())).unwrap();
        let items = reopened.shopping_items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Wood filler");
        assert_eq!(items[0].quantity, 2);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn test_project_task_can_be_ticked_off() {
        let store = PropertyStore::in_memory();
        let project = store
            .add_project(CreateProjectRequest {
                title: "Loft conversion".to_string(),
                description: String::new(),
                status: None,
                category: None,
                budget_min: 0.0,
                budget_max: 0.0,
                currency: None,
                target_start_date: None,
                target_completion_date: None,
                milestones: vec![],
            })
            .await
            .unwrap();

        let task = store
            .add_project_task(
                &project.id,
                CreateProjectTaskRequest {
                    title: "Order steel beams".to_string(),
                },
            )
            .await
            .unwrap()
            .expect("project exists");
        assert!(!task.completed);

        let task = store
            .set_project_task_completed(&project.id, &task.id, true)
            .await
            .unwrap()
            .expect("task exists");
        assert!(task.completed);

        let missing = store
            .set_project_task_completed(&project.id, "missing", true)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_same_email_content_lands_on_same_record() {
        let store = PropertyStore::in_memory();
        let project = store
            .add_project(CreateProjectRequest {
                title: "Bathroom".to_string(),
                description: String::new(),
                status: None,
                category: None,
                budget_min: 0.0,
                budget_max: 0.0,
                currency: None,
                target_start_date: None,
                target_completion_date: None,
                milestones: vec![],
            })
            .await
            .unwrap();

        let request = ParseEmailRequest {
            email_content: "Hi, the quote is £1,200 for the tiling.".to_string(),
            subject: "Tiling quote".to_string(),
            sender: "tiler@example.com".to_string(),
            received_date: None,
        };
        let first = store
            .add_project_email(&project.id, &request, ExtractedEmailData::default())
            .await
            .unwrap()
            .unwrap();
        let second = store
            .add_project_email(&project.id, &request, ExtractedEmailData::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.id, second.id);

        let project = store.get_project(&project.id).await.unwrap();
        assert_eq!(project.emails.len(), 1);
    }
}
