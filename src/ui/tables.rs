//! Column layouts for every list in the app.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::entities::records::{
    EquipmentListItem, RequirementWithSite, Site, TaskTemplateWithRequirement, User,
};
use crate::domain::entities::view::{EquipmentSummary, ViewRow};
use crate::domain::table::{CellValue, Column, TableSpec, EMPTY_CELL};

const NOWRAP: &str = "white-space: nowrap;";
const EMPHASIS: &str = "white-space: nowrap; font-weight: 600; color: #111;";

/// Renders an ISO date as e.g. `Mar 4, 2025`; other text is shown as-is.
pub fn display_date(value: Option<&str>) -> String {
    match value {
        None | Some("") => EMPTY_CELL.to_string(),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|date| date.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

fn active_label(active: bool) -> String {
    if active { "Active" } else { "Inactive" }.to_string()
}

pub fn sites_table() -> TableSpec<Site> {
    TableSpec::new(
        vec![
            Column::new("name", "Site", |s: &Site| CellValue::from(&s.name))
                .filterable()
                .cell_style(EMPHASIS),
            Column::new("client_name", "Client", |s: &Site| CellValue::from(&s.client_name))
                .filterable(),
            Column::new("created_at", "Created", |s: &Site| CellValue::from(&s.created_at))
                .cell(|s| display_date(s.created_at.get(..10)))
                .cell_style(NOWRAP),
        ],
        |s| s.id.clone(),
    )
    .empty_message("No sites yet. Add one below.")
    .searchable("Search sites...")
}

pub fn equipment_table(sites: &[Site]) -> TableSpec<EquipmentListItem> {
    let site_names: HashMap<String, String> = sites
        .iter()
        .map(|site| (site.id.clone(), site.name.clone()))
        .collect();

    TableSpec::new(
        vec![
            Column::new("asset_tag", "Asset Tag", |e: &EquipmentListItem| {
                CellValue::from(&e.asset_tag)
            })
            .filterable()
            .cell_style(EMPHASIS),
            Column::new("description", "Description", |e: &EquipmentListItem| {
                CellValue::from(&e.equipment_description)
            })
            .filterable(),
            Column::new("site", "Site", move |e: &EquipmentListItem| {
                site_names.get(&e.equipment_site_id).cloned().into()
            })
            .filterable(),
            Column::new("equipment_type", "Type", |e: &EquipmentListItem| {
                e.equipment_type.clone().into()
            })
            .filterable(),
            Column::new("process_unit", "Process Unit", |e: &EquipmentListItem| {
                e.process_unit.clone().into()
            })
            .filterable(),
            Column::new("requirements", "Requirements", |e: &EquipmentListItem| {
                if e.requirements.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::from(e.requirements.join(", "))
                }
            })
            .filterable()
            .unsortable(),
        ],
        |e| e.equipment_id.clone(),
    )
    .empty_message("No equipment found.")
    .searchable("Search equipment...")
}

pub fn equipment_summary_table() -> TableSpec<EquipmentSummary> {
    TableSpec::new(
        vec![
            Column::new("asset_tag", "Asset Tag", |e: &EquipmentSummary| {
                CellValue::from(&e.asset_tag)
            })
            .filterable()
            .cell_style(EMPHASIS),
            Column::new("description", "Description", |e: &EquipmentSummary| {
                CellValue::from(&e.equipment_description)
            })
            .filterable(),
            Column::new("equipment_type", "Type", |e: &EquipmentSummary| {
                e.equipment_type.clone().into()
            }),
            Column::new("requirements", "Requirements", |e: &EquipmentSummary| {
                CellValue::from(e.requirements.join(", "))
            })
            .filterable(),
            Column::new("open_task_count", "Open Tasks", |e: &EquipmentSummary| {
                CellValue::from(e.open_task_count)
            }),
        ],
        |e| e.equipment_id.clone(),
    )
    .empty_message("No equipment at this site.")
}

pub fn requirements_table() -> TableSpec<RequirementWithSite> {
    TableSpec::new(
        vec![
            Column::new("citation", "Citation", |r: &RequirementWithSite| {
                CellValue::from(&r.requirement.citation)
            })
            .filterable()
            .cell_style(EMPHASIS),
            Column::new("regulation_name", "Regulation", |r: &RequirementWithSite| {
                r.requirement.regulation_name.clone().into()
            })
            .filterable(),
            Column::new("summary", "Summary", |r: &RequirementWithSite| {
                CellValue::from(&r.requirement.requirement_summary)
            })
            .filterable(),
            Column::new("site", "Site", |r: &RequirementWithSite| {
                CellValue::from(&r.site_name)
            })
            .filterable(),
            Column::new("is_active", "Status", |r: &RequirementWithSite| {
                CellValue::from(active_label(r.requirement.is_active))
            })
            .filterable(),
        ],
        |r| r.requirement.id.clone(),
    )
    .empty_message("No requirements found.")
    .searchable("Search requirements...")
}

pub fn task_templates_table() -> TableSpec<TaskTemplateWithRequirement> {
    TableSpec::new(
        vec![
            Column::new("task_name", "Task", |t: &TaskTemplateWithRequirement| {
                CellValue::from(&t.template.task_name)
            })
            .filterable()
            .cell_style(EMPHASIS),
            Column::new("citation", "Citation", |t: &TaskTemplateWithRequirement| {
                CellValue::from(&t.citation)
            })
            .filterable()
            .cell_style(NOWRAP),
            Column::new("requirement", "Requirement", |t: &TaskTemplateWithRequirement| {
                CellValue::from(&t.requirement_summary)
            })
            .filterable(),
            Column::new("frequency", "Frequency", |t: &TaskTemplateWithRequirement| {
                CellValue::from(&t.template.frequency)
            })
            .filterable(),
            Column::new("active", "Status", |t: &TaskTemplateWithRequirement| {
                CellValue::from(active_label(t.template.active))
            })
            .filterable(),
        ],
        |t| t.template.id.clone(),
    )
    .empty_message("No task templates found.")
    .searchable("Search task templates...")
}

/// Open task board. The assignee column resolves user ids to names.
pub fn tasks_table(users: &[User]) -> TableSpec<ViewRow> {
    let user_names: HashMap<String, String> = users
        .iter()
        .map(|user| (user.id.clone(), user.name.clone()))
        .collect();

    TableSpec::new(
        vec![
            Column::new("asset_tag", "Asset Tag", |r: &ViewRow| CellValue::from(&r.asset_tag))
                .filterable()
                .cell_style(EMPHASIS),
            Column::new("task_name", "Task", |r: &ViewRow| r.task_name.clone().into())
                .filterable(),
            Column::new("citation", "Citation", |r: &ViewRow| CellValue::from(&r.citation))
                .filterable()
                .cell_style(NOWRAP),
            Column::new("requirement_summary", "Requirement", |r: &ViewRow| {
                CellValue::from(&r.requirement_summary)
            })
            .filterable(),
            Column::new("due_date", "Due Date", |r: &ViewRow| r.due_date.clone().into())
                .filterable()
                .cell(|r| display_date(r.due_date.as_deref()))
                .header_style(NOWRAP)
                .cell_style(NOWRAP),
            Column::new("assigned_to", "Assigned To", move |r: &ViewRow| {
                r.assigned_to_user_id
                    .as_ref()
                    .and_then(|id| user_names.get(id))
                    .cloned()
                    .into()
            })
            .filterable(),
            Column::new("task_status", "Status", |r: &ViewRow| r.task_status.clone().into())
                .filterable(),
        ],
        |r| r.task_id.clone().unwrap_or_default(),
    )
    .empty_message("No open tasks found. Adjust filters or add tasks.")
    .searchable("Search tasks...")
}

pub fn users_table(sites: &[Site]) -> TableSpec<User> {
    let site_names: HashMap<String, String> = sites
        .iter()
        .map(|site| (site.id.clone(), site.name.clone()))
        .collect();

    TableSpec::new(
        vec![
            Column::new("name", "Name", |u: &User| CellValue::from(&u.name))
                .filterable()
                .cell_style(EMPHASIS),
            Column::new("email", "Email", |u: &User| CellValue::from(&u.email)).filterable(),
            Column::new("role", "Role", |u: &User| CellValue::from(&u.role)).filterable(),
            Column::new("site", "Site", move |u: &User| {
                u.site_id
                    .as_ref()
                    .and_then(|id| site_names.get(id))
                    .cloned()
                    .into()
            })
            .filterable(),
        ],
        |u| u.id.clone(),
    )
    .empty_message("No users found.")
    .searchable("Search users...")
}
