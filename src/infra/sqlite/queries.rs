use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::domain::entities::records::{
    Equipment, EquipmentListItem, EquipmentPatch, NewEquipment, NewRequirement, NewSite, NewTask,
    NewTaskTemplate, NewUser, Requirement, RequirementPatch, RequirementWithSite, Site, Task,
    TaskStatus, TaskTemplate, TaskTemplatePatch, TaskTemplateWithRequirement, TaskUpdate, User,
};
use crate::domain::entities::view::ViewRow;
use crate::infra::sqlite::schema::{open_connection, VIEW_NAME};
use crate::usecase::ports::store::ViewFilter;

const SITE_COLUMNS: &str = "id, name, client_name, is_active, created_at";
const EQUIPMENT_COLUMNS: &str = "id, asset_tag, description, equipment_site_id, \
     sap_equipment_number, functional_loc, location_description, equipment_type, \
     equipment_subtype, process_unit, area_location, regulation_name, is_active, created_at";
const REQUIREMENT_COLUMNS: &str =
    "id, citation, regulation_name, requirement_summary, requirement_text, site_id, is_active";
const TEMPLATE_COLUMNS: &str =
    "id, requirement_id, task_name, task_description, frequency, active";
const TASK_COLUMNS: &str = "id, task_template_id, equipment_id, due_date, status, \
     assigned_to_user_id, submitted_at, approved_by_user_id, rejection_reason, created_at";
const USER_COLUMNS: &str = "id, name, email, role, site_id, is_active, created_at";

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn text(value: String) -> Value {
    Value::Text(value)
}

/// Blank text is stored as NULL.
fn optional_text(value: Option<String>) -> Value {
    match value {
        Some(value) if !value.trim().is_empty() => Value::Text(value.trim().to_string()),
        _ => Value::Null,
    }
}

fn flag(value: bool) -> Value {
    Value::Integer(if value { 1 } else { 0 })
}

fn read_flag(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(row.get::<_, i64>(idx)? != 0)
}

fn read_status(row: &Row<'_>, idx: usize) -> rusqlite::Result<TaskStatus> {
    let raw: String = row.get(idx)?;
    TaskStatus::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown task status: {raw}").into(),
        )
    })
}

fn site_from_row(row: &Row<'_>) -> rusqlite::Result<Site> {
    Ok(Site {
        id: row.get(0)?,
        name: row.get(1)?,
        client_name: row.get(2)?,
        is_active: read_flag(row, 3)?,
        created_at: row.get(4)?,
    })
}

fn equipment_from_row(row: &Row<'_>) -> rusqlite::Result<Equipment> {
    Ok(Equipment {
        id: row.get(0)?,
        asset_tag: row.get(1)?,
        description: row.get(2)?,
        equipment_site_id: row.get(3)?,
        sap_equipment_number: row.get(4)?,
        functional_loc: row.get(5)?,
        location_description: row.get(6)?,
        equipment_type: row.get(7)?,
        equipment_subtype: row.get(8)?,
        process_unit: row.get(9)?,
        area_location: row.get(10)?,
        regulation_name: row.get(11)?,
        is_active: read_flag(row, 12)?,
        created_at: row.get(13)?,
    })
}

fn requirement_from_row(row: &Row<'_>) -> rusqlite::Result<Requirement> {
    Ok(Requirement {
        id: row.get(0)?,
        citation: row.get(1)?,
        regulation_name: row.get(2)?,
        requirement_summary: row.get(3)?,
        requirement_text: row.get(4)?,
        site_id: row.get(5)?,
        is_active: read_flag(row, 6)?,
    })
}

fn template_from_row(row: &Row<'_>) -> rusqlite::Result<TaskTemplate> {
    Ok(TaskTemplate {
        id: row.get(0)?,
        requirement_id: row.get(1)?,
        task_name: row.get(2)?,
        task_description: row.get(3)?,
        frequency: row.get(4)?,
        active: read_flag(row, 5)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        task_template_id: row.get(1)?,
        equipment_id: row.get(2)?,
        due_date: row.get(3)?,
        status: read_status(row, 4)?,
        assigned_to_user_id: row.get(5)?,
        submitted_at: row.get(6)?,
        approved_by_user_id: row.get(7)?,
        rejection_reason: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: row.get(3)?,
        site_id: row.get(4)?,
        is_active: read_flag(row, 5)?,
        created_at: row.get(6)?,
    })
}

/// Runs `UPDATE <table> SET .. WHERE id = ?` for the given column changes and
/// returns the number of affected rows.
fn apply_update(
    conn: &Connection,
    table: &str,
    id: &str,
    changes: Vec<(&'static str, Value)>,
) -> Result<usize> {
    if changes.is_empty() {
        return Ok(0);
    }

    let assignments = changes
        .iter()
        .enumerate()
        .map(|(idx, (column, _))| format!("{column} = ?{}", idx + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE {table} SET {assignments} WHERE id = ?{}",
        changes.len() + 1
    );

    let mut values: Vec<Value> = changes.into_iter().map(|(_, value)| value).collect();
    values.push(Value::Text(id.to_string()));

    conn.execute(&sql, params_from_iter(values))
        .with_context(|| format!("failed to update {table} #{id}"))
}

pub fn list_sites(db_path: &Path) -> Result<Vec<Site>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SITE_COLUMNS} FROM sites WHERE is_active = 1 ORDER BY name ASC"
        ))
        .context("failed to prepare sites query")?;

    let sites = stmt
        .query_map([], site_from_row)
        .context("failed to query sites")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect sites")?;

    Ok(sites)
}

pub fn get_site(db_path: &Path, id: &str) -> Result<Option<Site>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        &format!("SELECT {SITE_COLUMNS} FROM sites WHERE id = ?1"),
        [id],
        site_from_row,
    )
    .optional()
    .with_context(|| format!("failed to load site #{id}"))
}

pub fn create_site(db_path: &Path, input: &NewSite) -> Result<Site> {
    let conn = open_connection(db_path)?;
    let site = Site {
        id: new_id(),
        name: input.name.clone(),
        client_name: input.client_name.clone(),
        is_active: true,
        created_at: now_timestamp(),
    };
    conn.execute(
        "INSERT INTO sites(id, name, client_name, is_active, created_at)
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![site.id, site.name, site.client_name, site.created_at],
    )
    .context("failed to insert site")?;
    Ok(site)
}

fn citations_by_equipment(
    conn: &Connection,
    equipment_ids: &[String],
) -> Result<HashMap<String, Vec<String>>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    if equipment_ids.is_empty() {
        return Ok(map);
    }

    let mut stmt = conn
        .prepare(
            "SELECT er.equipment_id, r.citation
             FROM equipment_requirements er
             JOIN requirements r ON r.id = er.requirement_id
             ORDER BY er.equipment_id, r.citation",
        )
        .context("failed to prepare equipment requirements query")?;

    let pairs = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .context("failed to query equipment requirements")?;

    for pair in pairs {
        let (equipment_id, citation) = pair.context("failed to read equipment requirement")?;
        if !equipment_ids.contains(&equipment_id) {
            continue;
        }
        let citations = map.entry(equipment_id).or_default();
        if !citations.contains(&citation) {
            citations.push(citation);
        }
    }

    Ok(map)
}

pub fn list_equipment(db_path: &Path, site_id: Option<&str>) -> Result<Vec<EquipmentListItem>> {
    let conn = open_connection(db_path)?;
    let site_filter = if site_id.is_some() {
        "AND equipment_site_id = ?1"
    } else {
        ""
    };
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id, asset_tag, description, equipment_site_id, equipment_type, process_unit
             FROM equipment
             WHERE is_active = 1 {site_filter}
             ORDER BY asset_tag ASC"
        ))
        .context("failed to prepare equipment query")?;

    let map_row = |row: &Row<'_>| -> rusqlite::Result<EquipmentListItem> {
        Ok(EquipmentListItem {
            equipment_id: row.get(0)?,
            asset_tag: row.get(1)?,
            equipment_description: row.get(2)?,
            equipment_site_id: row.get(3)?,
            equipment_type: row.get(4)?,
            process_unit: row.get(5)?,
            requirements: Vec::new(),
        })
    };
    let mut items = match site_id {
        Some(site_id) => stmt.query_map([site_id], map_row),
        None => stmt.query_map([], map_row),
    }
    .context("failed to query equipment")?
    .collect::<rusqlite::Result<Vec<_>>>()
    .context("failed to collect equipment")?;
    drop(stmt);

    let ids: Vec<String> = items.iter().map(|item| item.equipment_id.clone()).collect();
    let mut citations = citations_by_equipment(&conn, &ids)?;
    for item in &mut items {
        item.requirements = citations.remove(&item.equipment_id).unwrap_or_default();
    }

    Ok(items)
}

pub fn get_equipment(db_path: &Path, id: &str) -> Result<Option<Equipment>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        &format!("SELECT {EQUIPMENT_COLUMNS} FROM equipment WHERE id = ?1"),
        [id],
        equipment_from_row,
    )
    .optional()
    .with_context(|| format!("failed to load equipment #{id}"))
}

pub fn create_equipment(db_path: &Path, input: &NewEquipment) -> Result<String> {
    let conn = open_connection(db_path)?;
    let id = new_id();
    let values = vec![
        text(id.clone()),
        text(input.asset_tag.clone()),
        text(input.description.clone()),
        text(input.equipment_site_id.clone()),
        optional_text(input.sap_equipment_number.clone()),
        optional_text(input.functional_loc.clone()),
        optional_text(input.location_description.clone()),
        optional_text(input.equipment_type.clone()),
        optional_text(input.equipment_subtype.clone()),
        optional_text(input.process_unit.clone()),
        optional_text(input.area_location.clone()),
        optional_text(input.regulation_name.clone()),
        flag(true),
        text(now_timestamp()),
    ];
    conn.execute(
        &format!(
            "INSERT INTO equipment({EQUIPMENT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
        ),
        params_from_iter(values),
    )
    .with_context(|| format!("failed to insert equipment {}", input.asset_tag))?;
    Ok(id)
}

pub fn update_equipment(db_path: &Path, id: &str, patch: &EquipmentPatch) -> Result<usize> {
    let conn = open_connection(db_path)?;
    let mut changes: Vec<(&'static str, Value)> = Vec::new();
    if let Some(asset_tag) = &patch.asset_tag {
        changes.push(("asset_tag", text(asset_tag.clone())));
    }
    if let Some(description) = &patch.description {
        changes.push(("description", text(description.clone())));
    }
    let optional_fields = [
        ("sap_equipment_number", &patch.sap_equipment_number),
        ("functional_loc", &patch.functional_loc),
        ("location_description", &patch.location_description),
        ("equipment_type", &patch.equipment_type),
        ("equipment_subtype", &patch.equipment_subtype),
        ("process_unit", &patch.process_unit),
        ("area_location", &patch.area_location),
        ("regulation_name", &patch.regulation_name),
    ];
    for (column, value) in optional_fields {
        if value.is_some() {
            changes.push((column, optional_text(value.clone())));
        }
    }
    if let Some(is_active) = patch.is_active {
        changes.push(("is_active", flag(is_active)));
    }
    apply_update(&conn, "equipment", id, changes)
}

pub fn list_requirements(db_path: &Path) -> Result<Vec<RequirementWithSite>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT r.id, r.citation, r.regulation_name, r.requirement_summary,
                    r.requirement_text, r.site_id, r.is_active, COALESCE(s.name, '—')
             FROM requirements r
             LEFT JOIN sites s ON s.id = r.site_id
             ORDER BY r.citation ASC",
        )
        .context("failed to prepare requirements query")?;

    let requirements = stmt
        .query_map([], |row| {
            Ok(RequirementWithSite {
                requirement: requirement_from_row(row)?,
                site_name: row.get(7)?,
            })
        })
        .context("failed to query requirements")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect requirements")?;

    Ok(requirements)
}

pub fn get_requirement(db_path: &Path, id: &str) -> Result<Option<Requirement>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        &format!("SELECT {REQUIREMENT_COLUMNS} FROM requirements WHERE id = ?1"),
        [id],
        requirement_from_row,
    )
    .optional()
    .with_context(|| format!("failed to load requirement #{id}"))
}

pub fn create_requirement(db_path: &Path, input: &NewRequirement) -> Result<String> {
    let conn = open_connection(db_path)?;
    let id = new_id();
    conn.execute(
        &format!(
            "INSERT INTO requirements({REQUIREMENT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
        ),
        params_from_iter([
            text(id.clone()),
            text(input.citation.clone()),
            optional_text(input.regulation_name.clone()),
            text(input.requirement_summary.clone()),
            optional_text(input.requirement_text.clone()),
            text(input.site_id.clone()),
            flag(input.is_active),
        ]),
    )
    .with_context(|| format!("failed to insert requirement {}", input.citation))?;
    Ok(id)
}

pub fn update_requirement(db_path: &Path, id: &str, patch: &RequirementPatch) -> Result<usize> {
    let conn = open_connection(db_path)?;
    let mut changes: Vec<(&'static str, Value)> = Vec::new();
    if let Some(citation) = &patch.citation {
        changes.push(("citation", text(citation.clone())));
    }
    if patch.regulation_name.is_some() {
        changes.push(("regulation_name", optional_text(patch.regulation_name.clone())));
    }
    if let Some(summary) = &patch.requirement_summary {
        changes.push(("requirement_summary", text(summary.clone())));
    }
    if patch.requirement_text.is_some() {
        changes.push((
            "requirement_text",
            optional_text(patch.requirement_text.clone()),
        ));
    }
    if let Some(site_id) = &patch.site_id {
        changes.push(("site_id", text(site_id.clone())));
    }
    if let Some(is_active) = patch.is_active {
        changes.push(("is_active", flag(is_active)));
    }
    apply_update(&conn, "requirements", id, changes)
}

pub fn delete_requirement(db_path: &Path, id: &str) -> Result<usize> {
    let conn = open_connection(db_path)?;
    conn.execute("DELETE FROM requirements WHERE id = ?1", [id])
        .with_context(|| format!("failed to delete requirement #{id}"))
}

pub fn list_task_templates(db_path: &Path) -> Result<Vec<TaskTemplateWithRequirement>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT t.id, t.requirement_id, t.task_name, t.task_description, t.frequency,
                    t.active, COALESCE(r.citation, ''), COALESCE(r.requirement_summary, '')
             FROM task_templates t
             LEFT JOIN requirements r ON r.id = t.requirement_id
             ORDER BY t.requirement_id ASC, t.task_name ASC",
        )
        .context("failed to prepare task templates query")?;

    let templates = stmt
        .query_map([], |row| {
            Ok(TaskTemplateWithRequirement {
                template: template_from_row(row)?,
                citation: row.get(6)?,
                requirement_summary: row.get(7)?,
            })
        })
        .context("failed to query task templates")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect task templates")?;

    Ok(templates)
}

pub fn get_task_template(db_path: &Path, id: &str) -> Result<Option<TaskTemplate>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        &format!("SELECT {TEMPLATE_COLUMNS} FROM task_templates WHERE id = ?1"),
        [id],
        template_from_row,
    )
    .optional()
    .with_context(|| format!("failed to load task template #{id}"))
}

pub fn create_task_template(db_path: &Path, input: &NewTaskTemplate) -> Result<String> {
    let conn = open_connection(db_path)?;
    let id = new_id();
    conn.execute(
        &format!("INSERT INTO task_templates({TEMPLATE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        params_from_iter([
            text(id.clone()),
            text(input.requirement_id.clone()),
            text(input.task_name.clone()),
            text(input.task_description.clone()),
            text(input.frequency.clone()),
            flag(input.active),
        ]),
    )
    .with_context(|| format!("failed to insert task template {}", input.task_name))?;
    Ok(id)
}

pub fn update_task_template(db_path: &Path, id: &str, patch: &TaskTemplatePatch) -> Result<usize> {
    let conn = open_connection(db_path)?;
    let mut changes: Vec<(&'static str, Value)> = Vec::new();
    let text_fields = [
        ("requirement_id", &patch.requirement_id),
        ("task_name", &patch.task_name),
        ("task_description", &patch.task_description),
        ("frequency", &patch.frequency),
    ];
    for (column, value) in text_fields {
        if let Some(value) = value {
            changes.push((column, text(value.clone())));
        }
    }
    if let Some(active) = patch.active {
        changes.push(("active", flag(active)));
    }
    apply_update(&conn, "task_templates", id, changes)
}

pub fn delete_task_template(db_path: &Path, id: &str) -> Result<usize> {
    let conn = open_connection(db_path)?;
    conn.execute("DELETE FROM task_templates WHERE id = ?1", [id])
        .with_context(|| format!("failed to delete task template #{id}"))
}

/// Inserts the equipment/requirement mapping unless it already exists.
/// Returns whether a row was inserted.
pub fn ensure_equipment_requirement(
    db_path: &Path,
    equipment_id: &str,
    requirement_id: &str,
) -> Result<bool> {
    let conn = open_connection(db_path)?;
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO equipment_requirements(id, equipment_id, requirement_id, applicability)
             VALUES (?1, ?2, ?3, 'applicable')",
            params![new_id(), equipment_id, requirement_id],
        )
        .with_context(|| {
            format!("failed to map requirement #{requirement_id} to equipment #{equipment_id}")
        })?;
    Ok(inserted > 0)
}

pub fn get_task(db_path: &Path, id: &str) -> Result<Option<Task>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        [id],
        task_from_row,
    )
    .optional()
    .with_context(|| format!("failed to load task #{id}"))
}

pub fn create_task(db_path: &Path, input: &NewTask) -> Result<String> {
    let conn = open_connection(db_path)?;
    let id = new_id();
    let status = input.status.unwrap_or(TaskStatus::Open);
    conn.execute(
        "INSERT INTO tasks(id, task_template_id, equipment_id, due_date, status,
                           assigned_to_user_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params_from_iter([
            text(id.clone()),
            text(input.task_template_id.clone()),
            text(input.equipment_id.clone()),
            text(input.due_date.clone()),
            text(status.as_str().to_string()),
            optional_text(input.assigned_to_user_id.clone()),
            text(now_timestamp()),
        ]),
    )
    .context("failed to insert task")?;
    Ok(id)
}

pub fn update_task(db_path: &Path, id: &str, update: &TaskUpdate) -> Result<usize> {
    let conn = open_connection(db_path)?;
    let mut changes: Vec<(&'static str, Value)> =
        vec![("status", text(update.status.as_str().to_string()))];
    if update.rejection_reason.is_some() {
        changes.push((
            "rejection_reason",
            optional_text(update.rejection_reason.clone()),
        ));
    }
    if let Some(assignee) = &update.assigned_to_user_id {
        changes.push(("assigned_to_user_id", optional_text(assignee.clone())));
    }
    if update.status == TaskStatus::Submitted {
        changes.push(("submitted_at", text(now_timestamp())));
    }
    apply_update(&conn, "tasks", id, changes)
}

pub fn list_users(db_path: &Path, site_id: Option<&str>) -> Result<Vec<User>> {
    let conn = open_connection(db_path)?;
    let site_filter = if site_id.is_some() {
        "AND site_id = ?1"
    } else {
        ""
    };
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_active = 1 {site_filter} ORDER BY name ASC"
        ))
        .context("failed to prepare users query")?;

    let users = match site_id {
        Some(site_id) => stmt.query_map([site_id], user_from_row),
        None => stmt.query_map([], user_from_row),
    }
    .context("failed to query users")?
    .collect::<rusqlite::Result<Vec<_>>>()
    .context("failed to collect users")?;

    Ok(users)
}

pub fn create_user(db_path: &Path, input: &NewUser) -> Result<User> {
    let conn = open_connection(db_path)?;
    let user = User {
        id: new_id(),
        name: input.name.clone(),
        email: input.email.clone(),
        role: input.role.clone(),
        site_id: input.site_id.clone(),
        is_active: true,
        created_at: now_timestamp(),
    };
    conn.execute(
        "INSERT INTO users(id, name, email, role, site_id, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)",
        params![
            user.id,
            user.name,
            user.email,
            user.role,
            user.site_id,
            user.created_at
        ],
    )
    .with_context(|| format!("failed to insert user {}", input.email))?;
    Ok(user)
}

pub fn view_rows(db_path: &Path, filter: &ViewFilter) -> Result<Vec<ViewRow>> {
    let conn = open_connection(db_path)?;

    let mut clauses: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    let conditions = [
        ("site_id", &filter.site_id),
        ("equipment_id", &filter.equipment_id),
        ("task_status", &filter.task_status),
        ("assigned_to_user_id", &filter.assigned_to_user_id),
    ];
    for (column, value) in conditions {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            values.push(text(value.to_string()));
            clauses.push(format!("{column} = ?{}", values.len()));
        }
    }
    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    let mut stmt = conn
        .prepare(&format!(
            "SELECT site_id, site_name, client_name, equipment_id, asset_tag,
                    equipment_description, equipment_site_id, requirement_id, citation,
                    requirement_summary, task_id, task_template_id, task_name, task_status,
                    due_date, assigned_to_user_id
             FROM {VIEW_NAME}
             {where_clause}"
        ))
        .with_context(|| format!("failed to prepare {VIEW_NAME} query"))?;

    let rows = stmt
        .query_map(params_from_iter(values), |row| {
            Ok(ViewRow {
                site_id: row.get(0)?,
                site_name: row.get(1)?,
                client_name: row.get(2)?,
                equipment_id: row.get(3)?,
                asset_tag: row.get(4)?,
                equipment_description: row.get(5)?,
                equipment_site_id: row.get(6)?,
                requirement_id: row.get(7)?,
                citation: row.get(8)?,
                requirement_summary: row.get(9)?,
                task_id: row.get(10)?,
                task_template_id: row.get(11)?,
                task_name: row.get(12)?,
                task_status: row.get(13)?,
                due_date: row.get(14)?,
                assigned_to_user_id: row.get(15)?,
            })
        })
        .with_context(|| format!("failed to query {VIEW_NAME}"))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("failed to collect {VIEW_NAME} rows"))?;

    Ok(rows)
}
