// Grouping engine - ordered task groups for the board views.
// Priority and status use fixed orderings; categories sort by raw code-point
// order, matching the front-of-house string comparison. Item order within a
// group is input order.

use serde::{Deserialize, Serialize};

use crate::models::{PropertyTask, TaskPriority, TaskStatus};

/// Fixed display order of priority groups
pub const PRIORITY_ORDER: [TaskPriority; 4] = [
    TaskPriority::Urgent,
    TaskPriority::Short,
    TaskPriority::Medium,
    TaskPriority::Long,
];

/// Fixed display order of status groups
pub const STATUS_ORDER: [TaskStatus; 5] = [
    TaskStatus::Outstanding,
    TaskStatus::InProgress,
    TaskStatus::Blocked,
    TaskStatus::Verify,
    TaskStatus::Completed,
];

/// Which field to group by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    Category,
    Priority,
    Status,
}

/// One ordered group of tasks
#[derive(Debug, Clone, Serialize)]
pub struct TaskGroup {
    pub key: String,
    pub tasks: Vec<PropertyTask>,
}

/// Group a task snapshot by the given key. Groups with no members are
/// omitted, never inserted empty; no task is ever dropped (categories are
/// normalized to a concrete string at the model boundary).
pub fn group_tasks(tasks: &[PropertyTask], key: GroupKey) -> Vec<TaskGroup> {
    match key {
        GroupKey::Priority => PRIORITY_ORDER
            .iter()
            .filter_map(|priority| {
                collect_group(tasks, priority.as_str(), |t| t.priority == *priority)
            })
            .collect(),
        GroupKey::Status => STATUS_ORDER
            .iter()
            .filter_map(|status| collect_group(tasks, status.as_str(), |t| t.status == *status))
            .collect(),
        GroupKey::Category => {
            // First-appearance accumulation, then keys sorted ascending.
            let mut groups: Vec<TaskGroup> = Vec::new();
            for task in tasks {
                match groups.iter_mut().find(|g| g.key == task.category) {
                    Some(group) => group.tasks.push(task.clone()),
                    None => groups.push(TaskGroup {
                        key: task.category.clone(),
                        tasks: vec![task.clone()],
                    }),
                }
            }
            groups.sort_by(|a, b| a.key.cmp(&b.key));
            groups
        }
    }
}

fn collect_group(
    tasks: &[PropertyTask],
    key: &str,
    matches: impl Fn(&PropertyTask) -> bool,
) -> Option<TaskGroup> {
    let members: Vec<PropertyTask> = tasks.iter().filter(|t| matches(t)).cloned().collect();
    if members.is_empty() {
        None
    } else {
        Some(TaskGroup {
            key: key.to_string(),
            tasks: members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: &str, category: &str, priority: TaskPriority, status: TaskStatus) -> PropertyTask {
        PropertyTask {
            id: id.to_string(),
            title: id.to_string(),
            category: category.to_string(),
            condition_rating: 2,
            priority,
            status,
            impact: String::new(),
            next_due_date: None,
            default_cost_range: None,
            recurrence: None,
            components: vec![],
            attachments: vec![],
            work_logs: vec![],
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_priority_groups_follow_fixed_order() {
        // medium-priority tasks come first in the input; urgent must still
        // lead the output
        let tasks = vec![
            task("m1", "General", TaskPriority::Medium, TaskStatus::Outstanding),
            task("m2", "General", TaskPriority::Medium, TaskStatus::Outstanding),
            task("u1", "General", TaskPriority::Urgent, TaskStatus::Outstanding),
        ];
        let groups = group_tasks(&tasks, GroupKey::Priority);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["urgent", "medium"]);
    }

    #[test]
    fn test_absent_groups_are_omitted() {
        let tasks = vec![task("a", "General", TaskPriority::Long, TaskStatus::Verify)];
        let by_priority = group_tasks(&tasks, GroupKey::Priority);
        assert_eq!(by_priority.len(), 1);
        assert_eq!(by_priority[0].key, "long");
        let by_status = group_tasks(&tasks, GroupKey::Status);
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].key, "verify");
    }

    #[test]
    fn test_status_groups_follow_fixed_order() {
        let tasks = vec![
            task("c", "General", TaskPriority::Medium, TaskStatus::Completed),
            task("b", "General", TaskPriority::Medium, TaskStatus::Blocked),
            task("o", "General", TaskPriority::Medium, TaskStatus::Outstanding),
        ];
        let groups = group_tasks(&tasks, GroupKey::Status);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["outstanding", "blocked", "completed"]);
    }

    #[test]
    fn test_category_groups_sort_by_code_point() {
        // Uppercase sorts before lowercase in code-point order
        let tasks = vec![
            task("1", "garden", TaskPriority::Medium, TaskStatus::Outstanding),
            task("2", "Roofing", TaskPriority::Medium, TaskStatus::Outstanding),
            task("3", "Heating", TaskPriority::Medium, TaskStatus::Outstanding),
        ];
        let groups = group_tasks(&tasks, GroupKey::Category);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Heating", "Roofing", "garden"]);
    }

    #[test]
    fn test_insertion_order_preserved_within_group() {
        let tasks = vec![
            task("first", "Heating", TaskPriority::Medium, TaskStatus::Outstanding),
            task("other", "Roofing", TaskPriority::Medium, TaskStatus::Outstanding),
            task("second", "Heating", TaskPriority::Medium, TaskStatus::Outstanding),
        ];
        let groups = group_tasks(&tasks, GroupKey::Category);
        let heating = groups.iter().find(|g| g.key == "Heating").unwrap();
        let ids: Vec<&str> = heating.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }
}
