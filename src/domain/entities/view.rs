use std::collections::HashMap;

use crate::domain::entities::records::TaskStatus;
use crate::domain::table::natural_cmp;

/// One row of the site / equipment / requirement / task join view.
///
/// There is one row per equipment-requirement mapping without tasks, or one
/// per task when the mapping has tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRow {
    pub site_id: String,
    pub site_name: String,
    pub client_name: String,
    pub equipment_id: String,
    pub asset_tag: String,
    pub equipment_description: String,
    pub equipment_site_id: String,
    pub requirement_id: String,
    pub citation: String,
    pub requirement_summary: String,
    pub task_id: Option<String>,
    pub task_template_id: Option<String>,
    pub task_name: Option<String>,
    pub task_status: Option<String>,
    pub due_date: Option<String>,
    pub assigned_to_user_id: Option<String>,
}

impl ViewRow {
    /// True when the row carries a task that is not closed, approved or
    /// rejected. Unrecognised statuses count as open.
    pub fn has_unfinished_task(&self) -> bool {
        match self.task_status.as_deref() {
            None | Some("") => false,
            Some(status) => !TaskStatus::parse(status).is_some_and(TaskStatus::is_terminal),
        }
    }

    /// True when the row's task belongs on the open task board.
    pub fn has_open_task(&self) -> bool {
        self.task_id.is_some()
            && self
                .task_status
                .as_deref()
                .and_then(TaskStatus::parse)
                .is_some_and(TaskStatus::is_open)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentSummary {
    pub equipment_id: String,
    pub asset_tag: String,
    pub equipment_description: String,
    pub equipment_type: Option<String>,
    pub process_unit: Option<String>,
    pub requirements: Vec<String>,
    pub open_task_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedTask {
    pub task_id: String,
    pub task_name: Option<String>,
    pub task_status: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementGroup {
    pub requirement_id: String,
    pub citation: String,
    pub requirement_summary: String,
    pub tasks: Vec<GroupedTask>,
}

/// Collapses view rows into one summary per equipment, ordered by asset tag.
pub fn equipment_summaries(rows: &[ViewRow]) -> Vec<EquipmentSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut by_equipment: HashMap<String, EquipmentSummary> = HashMap::new();

    for row in rows {
        if row.equipment_id.is_empty() {
            continue;
        }
        let is_open = row.has_unfinished_task();
        let entry = by_equipment
            .entry(row.equipment_id.clone())
            .or_insert_with(|| {
                order.push(row.equipment_id.clone());
                EquipmentSummary {
                    equipment_id: row.equipment_id.clone(),
                    asset_tag: row.asset_tag.clone(),
                    equipment_description: row.equipment_description.clone(),
                    equipment_type: None,
                    process_unit: None,
                    requirements: Vec::new(),
                    open_task_count: 0,
                }
            });
        if is_open {
            entry.open_task_count += 1;
        }
        if !row.citation.is_empty() && !entry.requirements.contains(&row.citation) {
            entry.requirements.push(row.citation.clone());
        }
    }

    let mut summaries: Vec<EquipmentSummary> = order
        .into_iter()
        .filter_map(|id| by_equipment.remove(&id))
        .collect();
    summaries.sort_by(|a, b| natural_cmp(&a.asset_tag, &b.asset_tag));
    log::debug!("shaped {} view rows into {} equipment", rows.len(), summaries.len());
    summaries
}

/// Groups the rows of a single equipment by requirement, de-duplicating
/// tasks. Groups and tasks keep first-seen order.
pub fn requirement_groups(rows: &[ViewRow]) -> Vec<RequirementGroup> {
    let mut groups: Vec<RequirementGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        if row.requirement_id.is_empty() {
            continue;
        }
        let slot = *index.entry(row.requirement_id.clone()).or_insert_with(|| {
            groups.push(RequirementGroup {
                requirement_id: row.requirement_id.clone(),
                citation: row.citation.clone(),
                requirement_summary: row.requirement_summary.clone(),
                tasks: Vec::new(),
            });
            groups.len() - 1
        });
        let Some(task_id) = &row.task_id else {
            continue;
        };
        let group = &mut groups[slot];
        if group.tasks.iter().any(|task| &task.task_id == task_id) {
            continue;
        }
        group.tasks.push(GroupedTask {
            task_id: task_id.clone(),
            task_name: row.task_name.clone(),
            task_status: row.task_status.clone(),
            due_date: row.due_date.clone(),
        });
    }

    groups
}

/// Rows carrying an open task, one per task id, in first-seen order.
pub fn open_tasks(rows: &[ViewRow]) -> Vec<ViewRow> {
    let mut seen: Vec<&str> = Vec::new();
    let mut tasks = Vec::new();
    for row in rows.iter().filter(|row| row.has_open_task()) {
        let Some(task_id) = row.task_id.as_deref() else {
            continue;
        };
        if seen.contains(&task_id) {
            continue;
        }
        seen.push(task_id);
        tasks.push(row.clone());
    }
    tasks
}

pub fn open_task_count(rows: &[ViewRow]) -> usize {
    rows.iter().filter(|row| row.has_unfinished_task()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_row(equipment: &str, tag: &str, requirement: &str, citation: &str) -> ViewRow {
        ViewRow {
            site_id: "site-1".to_string(),
            site_name: "Refinery".to_string(),
            equipment_id: equipment.to_string(),
            asset_tag: tag.to_string(),
            equipment_site_id: "site-1".to_string(),
            requirement_id: requirement.to_string(),
            citation: citation.to_string(),
            requirement_summary: format!("{citation} summary"),
            ..ViewRow::default()
        }
    }

    fn with_task(mut row: ViewRow, task: &str, status: &str) -> ViewRow {
        row.task_id = Some(task.to_string());
        row.task_name = Some(format!("{task} name"));
        row.task_status = Some(status.to_string());
        row
    }

    #[test]
    fn equipment_summaries_group_and_count_open_tasks() {
        let rows = vec![
            with_task(view_row("e1", "P-10", "r1", "40 CFR 60"), "t1", "open"),
            with_task(view_row("e1", "P-10", "r1", "40 CFR 60"), "t2", "approved"),
            with_task(view_row("e1", "P-10", "r2", "40 CFR 63"), "t3", "submitted"),
            view_row("e2", "P-2", "r1", "40 CFR 60"),
        ];

        let summaries = equipment_summaries(&rows);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].asset_tag, "P-2");
        assert_eq!(summaries[0].open_task_count, 0);
        assert_eq!(summaries[1].asset_tag, "P-10");
        assert_eq!(summaries[1].open_task_count, 2);
        assert_eq!(summaries[1].requirements, vec!["40 CFR 60", "40 CFR 63"]);
    }

    #[test]
    fn unknown_status_counts_as_unfinished() {
        let rows = vec![with_task(view_row("e1", "A", "r1", "c"), "t1", "in review")];

        assert_eq!(open_task_count(&rows), 1);
        assert!(open_tasks(&rows).is_empty());
    }

    #[test]
    fn requirement_groups_deduplicate_tasks() {
        let rows = vec![
            with_task(view_row("e1", "A", "r1", "c1"), "t1", "open"),
            with_task(view_row("e1", "A", "r1", "c1"), "t1", "open"),
            view_row("e1", "A", "r2", "c2"),
            view_row("e1", "A", "", ""),
        ];

        let groups = requirement_groups(&rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].requirement_id, "r1");
        assert_eq!(groups[0].tasks.len(), 1);
        assert!(groups[1].tasks.is_empty());
    }

    #[test]
    fn open_tasks_keep_first_row_per_task() {
        let rows = vec![
            with_task(view_row("e1", "A", "r1", "c1"), "t1", "assigned"),
            with_task(view_row("e1", "A", "r2", "c2"), "t1", "assigned"),
            with_task(view_row("e2", "B", "r1", "c1"), "t2", "closed"),
            view_row("e3", "C", "r1", "c1"),
        ];

        let tasks = open_tasks(&rows);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].citation, "c1");
    }
}
