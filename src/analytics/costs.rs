// Cost aggregation - spent vs estimated per category, and quote totals per
// company. Returns full totals; any top-N truncation for charts belongs to
// the caller.

use serde::Serialize;

use crate::models::{PropertyTask, QuoteStatus, TaskQuote, TaskStatus};

/// Spent and forward-looking estimated cost for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCost {
    pub category: String,
    /// Sum of all work-log costs, regardless of task status
    pub spent: f64,
    /// Sum of default_cost_range.max over non-completed tasks only
    pub estimated: f64,
}

/// Per-category cost totals, sorted descending by spent+estimated.
/// Categories where both figures are zero are dropped.
pub fn aggregate_costs_by_category(tasks: &[PropertyTask]) -> Vec<CategoryCost> {
    let mut totals: Vec<CategoryCost> = Vec::new();

    for task in tasks {
        let spent = task.total_spent();
        let estimated = match (&task.default_cost_range, task.status) {
            (Some(range), status) if status != TaskStatus::Completed => range.max,
            _ => 0.0,
        };

        match totals.iter_mut().find(|c| c.category == task.category) {
            Some(entry) => {
                entry.spent += spent;
                entry.estimated += estimated;
            }
            None => totals.push(CategoryCost {
                category: task.category.clone(),
                spent,
                estimated,
            }),
        }
    }

    totals.retain(|c| c.spent != 0.0 || c.estimated != 0.0);
    totals.sort_by(|a, b| {
        let lhs = b.spent + b.estimated;
        let rhs = a.spent + a.estimated;
        lhs.partial_cmp(&rhs)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    totals
}

/// Grand totals across every category, independent of any chart truncation
pub fn overall_totals(categories: &[CategoryCost]) -> (f64, f64) {
    categories
        .iter()
        .fold((0.0, 0.0), |(spent, estimated), c| {
            (spent + c.spent, estimated + c.estimated)
        })
}

/// Quote totals for one contractor/company
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyQuoteTotal {
    pub company: String,
    pub total: f64,
    pub count: usize,
    pub accepted: usize,
}

/// Group quotes by company, falling back to the contractor's name when no
/// company is recorded. Keys are trimmed but case-preserved. Sorted
/// descending by total amount.
pub fn aggregate_quotes_by_company(quotes: &[TaskQuote]) -> Vec<CompanyQuoteTotal> {
    let mut totals: Vec<CompanyQuoteTotal> = Vec::new();

    for quote in quotes {
        let key = quote
            .company
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(&quote.contractor_name)
            .trim()
            .to_string();

        let accepted = usize::from(quote.status == QuoteStatus::Accepted);
        match totals.iter_mut().find(|t| t.company == key) {
            Some(entry) => {
                entry.total += quote.amount;
                entry.count += 1;
                entry.accepted += accepted;
            }
            None => totals.push(CompanyQuoteTotal {
                company: key,
                total: quote.amount,
                count: 1,
                accepted,
            }),
        }
    }

    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.company.cmp(&b.company))
    });
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostRange, PropertyTask, TaskPriority, WorkLog};
    use chrono::{NaiveDate, Utc};

    fn task(category: &str, status: TaskStatus, logged: &[f64], range_max: Option<f64>) -> PropertyTask {
        PropertyTask {
            id: uuid::Uuid::new_v4().to_string(),
            title: "t".to_string(),
            category: category.to_string(),
            condition_rating: 2,
            priority: TaskPriority::Medium,
            status,
            impact: String::new(),
            next_due_date: None,
            default_cost_range: range_max.map(|max| CostRange {
                min: 0.0,
                max,
                currency: "GBP".to_string(),
            }),
            recurrence: None,
            components: vec![],
            attachments: vec![],
            work_logs: logged
                .iter()
                .map(|&cost| WorkLog {
                    id: uuid::Uuid::new_v4().to_string(),
                    task_id: "t".to_string(),
                    completed_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                    completed_by: String::new(),
                    cost,
                    cost_includes_vat: false,
                    warranty_end_date: None,
                    notes: String::new(),
                    attachments: vec![],
                })
                .collect(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn quote(company: Option<&str>, contractor: &str, amount: f64, status: QuoteStatus) -> TaskQuote {
        TaskQuote {
            id: uuid::Uuid::new_v4().to_string(),
            title: String::new(),
            contractor_name: contractor.to_string(),
            company: company.map(|c| c.to_string()),
            phone: String::new(),
            email: String::new(),
            amount,
            currency: "GBP".to_string(),
            valid_until: None,
            notes: String::new(),
            terms: String::new(),
            includes_vat: false,
            manual_line_items: vec![],
            status,
            extracted_quote_data: None,
            contractor_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_completed_task_contributes_spend_but_no_estimate() {
        let tasks = vec![task("Roofing", TaskStatus::Completed, &[500.0], Some(900.0))];
        let totals = aggregate_costs_by_category(&tasks);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].spent, 500.0);
        assert_eq!(totals[0].estimated, 0.0);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let tasks = vec![
            task("Roofing", TaskStatus::Outstanding, &[100.0], Some(400.0)),
            task("Heating", TaskStatus::Completed, &[250.0], None),
        ];
        let first = aggregate_costs_by_category(&tasks);
        let second = aggregate_costs_by_category(&tasks);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_categories_dropped() {
        let tasks = vec![
            task("Empty", TaskStatus::Outstanding, &[], None),
            task("Heating", TaskStatus::Outstanding, &[], Some(300.0)),
        ];
        let totals = aggregate_costs_by_category(&tasks);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].category, "Heating");
    }

    #[test]
    fn test_sorted_descending_by_combined_total() {
        let tasks = vec![
            task("Small", TaskStatus::Outstanding, &[10.0], None),
            task("Big", TaskStatus::Outstanding, &[500.0], Some(500.0)),
            task("Mid", TaskStatus::Outstanding, &[], Some(300.0)),
        ];
        let totals = aggregate_costs_by_category(&tasks);
        let order: Vec<&str> = totals.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Big", "Mid", "Small"]);
        let (spent, estimated) = overall_totals(&totals);
        assert_eq!(spent, 510.0);
        assert_eq!(estimated, 800.0);
    }

    #[test]
    fn test_quotes_group_by_company_with_contractor_fallback() {
        let quotes = vec![
            quote(Some("Smith Roofing Ltd"), "John Smith", 2000.0, QuoteStatus::Accepted),
            quote(None, "Jane Doe", 1500.0, QuoteStatus::Pending),
            quote(Some("  Smith Roofing Ltd  "), "J Smith", 500.0, QuoteStatus::Pending),
        ];
        let totals = aggregate_quotes_by_company(&quotes);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].company, "Smith Roofing Ltd");
        assert_eq!(totals[0].total, 2500.0);
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[0].accepted, 1);
        assert_eq!(totals[1].company, "Jane Doe");
    }
}
