use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;

use crate::config::ensure_webview_data_dir;
use crate::domain::entities::records::{
    EquipmentPatch, FirstTask, NewEquipment, NewRequirement, NewSite, NewTask, NewTaskTemplate, NewUser,
    Requirement, Site, TaskStatus, TaskTemplate,
};
use crate::domain::table::{TableModel, TableState};
use crate::infra::sqlite::queries;
use crate::infra::sqlite::repo::SqliteStore;
use crate::infra::sqlite::schema::{init_db, VIEW_NAME};
use crate::ui::tables::tasks_table;
use crate::usecase::ports::store::{DataStore, StoreError, ViewFilter};
use crate::usecase::services::edit_service::EditService;
use crate::usecase::services::query_service::QueryService;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("compliance-{prefix}-{nanos}"))
}

struct Fixture {
    dir: PathBuf,
    store: Arc<SqliteStore>,
    query: QueryService,
    edit: EditService,
}

impl Fixture {
    fn new(prefix: &str) -> Self {
        let dir = unique_test_dir(prefix);
        fs::create_dir_all(&dir).expect("should create temp dir");
        let store = Arc::new(SqliteStore::new(dir.join("compliance.sqlite")));
        store.init().expect("init should succeed");
        Self {
            dir,
            query: QueryService::new(store.clone()),
            edit: EditService::new(store.clone()),
            store,
        }
    }

    fn site(&self, name: &str) -> Site {
        self.edit
            .create_site(NewSite {
                name: name.to_string(),
                client_name: "Acme".to_string(),
            })
            .expect("site should be created")
    }

    fn equipment(&self, site: &Site, tag: &str) -> String {
        self.edit
            .create_equipment(NewEquipment {
                asset_tag: tag.to_string(),
                description: format!("{tag} pump"),
                equipment_site_id: site.id.clone(),
                equipment_type: Some("Pump".to_string()),
                ..NewEquipment::default()
            })
            .expect("equipment should be created")
            .id
    }

    fn requirement(&self, site: &Site, citation: &str) -> Requirement {
        self.edit
            .create_requirement(NewRequirement {
                citation: citation.to_string(),
                regulation_name: Some("NSPS".to_string()),
                requirement_summary: format!("{citation} summary"),
                requirement_text: None,
                site_id: site.id.clone(),
                is_active: true,
            })
            .expect("requirement should be created")
    }

    fn template(&self, requirement: &Requirement, name: &str) -> TaskTemplate {
        self.edit
            .create_task_template(NewTaskTemplate {
                requirement_id: requirement.id.clone(),
                task_name: name.to_string(),
                task_description: String::new(),
                frequency: "Monthly".to_string(),
                active: true,
            })
            .expect("template should be created")
    }

    fn task(&self, template: &TaskTemplate, equipment_id: &str, due: &str) -> String {
        self.edit
            .create_task(NewTask {
                task_template_id: template.id.clone(),
                requirement_id: template.requirement_id.clone(),
                equipment_id: equipment_id.to_string(),
                due_date: due.to_string(),
                status: None,
                assigned_to_user_id: None,
            })
            .expect("task should be created")
            .id
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn init_db_creates_required_tables_and_view() {
    let temp_dir = unique_test_dir("init-db");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("app.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
             ('sites','equipment','requirements','equipment_requirements','task_templates','tasks','users')",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    let view_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'view' AND name = ?1",
            [VIEW_NAME],
            |row| row.get(0),
        )
        .expect("view count query should succeed");

    assert_eq!(table_count, 7, "required tables should exist");
    assert_eq!(view_count, 1, "join view should exist");

    init_db(&db_path).expect("init_db should be idempotent");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn sites_are_listed_by_name_and_inactive_ones_hidden() {
    let fx = Fixture::new("sites");
    let zeta = fx.site("Zeta");
    fx.site("alpha");
    fx.site("Beta");

    let conn = Connection::open(&fx.store.db_path).expect("should open sqlite db");
    conn.execute("UPDATE sites SET is_active = 0 WHERE id = ?1", [&zeta.id])
        .expect("should deactivate site");

    let names: Vec<String> = fx
        .query
        .list_sites()
        .expect("sites should load")
        .into_iter()
        .map(|site| site.name)
        .collect();

    assert_eq!(names, vec!["Beta", "alpha"]);
}

#[test]
fn missing_rows_are_reported_as_not_found() {
    let fx = Fixture::new("not-found");

    let err = fx.store.get_site("nope").expect_err("lookup should fail");
    assert_eq!(err, StoreError::NotFound("site #nope".to_string()));

    let err = fx
        .query
        .equipment_detail("nope")
        .expect_err("detail should fail");
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn blank_required_fields_are_rejected() {
    let fx = Fixture::new("validation");
    let site = fx.site("North");

    let err = fx
        .edit
        .create_site(NewSite {
            name: "   ".to_string(),
            client_name: "Acme".to_string(),
        })
        .expect_err("blank name should be rejected");
    assert!(matches!(err, StoreError::Invalid(_)));

    let err = fx
        .edit
        .create_user(NewUser {
            name: "Dana".to_string(),
            email: "dana.example.com".to_string(),
            role: "technician".to_string(),
            site_id: None,
        })
        .expect_err("email without @ should be rejected");
    assert!(matches!(err, StoreError::Invalid(_)));

    let requirement = fx.requirement(&site, "40 CFR 60.482");
    let template = fx.template(&requirement, "LDAR survey");
    let equipment_id = fx.equipment(&site, "P-1");
    let err = fx
        .edit
        .create_task(NewTask {
            task_template_id: template.id.clone(),
            requirement_id: requirement.id.clone(),
            equipment_id,
            due_date: "next tuesday".to_string(),
            status: None,
            assigned_to_user_id: None,
        })
        .expect_err("bad due date should be rejected");
    assert!(matches!(err, StoreError::Invalid(_)));
}

#[test]
fn creating_a_task_maps_its_requirement_to_the_equipment() {
    let fx = Fixture::new("create-task");
    let site = fx.site("North");
    let equipment_id = fx.equipment(&site, "P-1");
    let requirement = fx.requirement(&site, "40 CFR 60.482");
    let template = fx.template(&requirement, "LDAR survey");

    let task_id = fx.task(&template, &equipment_id, "2025-03-01");
    let again = fx.task(&template, &equipment_id, "2025-04-01");

    let rows = fx
        .store
        .view_rows(&ViewFilter {
            equipment_id: Some(equipment_id.clone()),
            ..ViewFilter::default()
        })
        .expect("view should load");
    let mut task_ids: Vec<String> = rows.iter().filter_map(|row| row.task_id.clone()).collect();
    task_ids.sort();
    let mut expected = vec![task_id.clone(), again];
    expected.sort();

    assert_eq!(task_ids, expected);
    assert!(rows.iter().all(|row| row.citation == "40 CFR 60.482"));
    assert_eq!(
        rows.iter()
            .find(|row| row.task_id.as_deref() == Some(task_id.as_str()))
            .and_then(|row| row.task_status.clone()),
        Some("open".to_string())
    );

    let listed = fx.query.list_equipment(Some(&site.id)).expect("equipment should load");
    assert_eq!(listed[0].requirements, vec!["40 CFR 60.482"]);
}

#[test]
fn assigning_a_task_updates_status_and_assignee() {
    let fx = Fixture::new("assign-task");
    let site = fx.site("North");
    let equipment_id = fx.equipment(&site, "P-1");
    let requirement = fx.requirement(&site, "40 CFR 63");
    let template = fx.template(&requirement, "Inspect seals");
    let task_id = fx.task(&template, &equipment_id, "2025-03-01");
    let user = fx
        .edit
        .create_user(NewUser {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            role: "technician".to_string(),
            site_id: Some(site.id.clone()),
        })
        .expect("user should be created");

    let assigned = fx
        .edit
        .assign_task(&task_id, Some(user.id.clone()))
        .expect("assign should succeed");
    assert_eq!(assigned.status, TaskStatus::Assigned);
    assert_eq!(assigned.assigned_to_user_id, Some(user.id.clone()));

    let reopened = fx.edit.assign_task(&task_id, None).expect("unassign should succeed");
    assert_eq!(reopened.status, TaskStatus::Open);
    assert_eq!(reopened.assigned_to_user_id, None);

    let submitted = fx
        .edit
        .update_task_status(&task_id, TaskStatus::Submitted, None)
        .expect("submit should succeed");
    assert!(submitted.submitted_at.is_some());
}

#[test]
fn view_filter_requires_every_set_field_to_match() {
    let fx = Fixture::new("view-filter");
    let site = fx.site("North");
    let first = fx.equipment(&site, "P-1");
    let second = fx.equipment(&site, "P-2");
    let requirement = fx.requirement(&site, "40 CFR 60");
    let template = fx.template(&requirement, "Inspect");
    let open_task = fx.task(&template, &first, "2025-01-01");
    let closed_task = fx.task(&template, &second, "2025-01-02");
    fx.edit
        .update_task_status(&closed_task, TaskStatus::Closed, None)
        .expect("close should succeed");

    let rows = fx
        .store
        .view_rows(&ViewFilter {
            site_id: Some(site.id.clone()),
            task_status: Some("open".to_string()),
            ..ViewFilter::default()
        })
        .expect("view should load");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].task_id.as_deref(), Some(open_task.as_str()));

    let rows = fx
        .store
        .view_rows(&ViewFilter {
            equipment_id: Some(first),
            task_status: Some("closed".to_string()),
            ..ViewFilter::default()
        })
        .expect("view should load");
    assert!(rows.is_empty());

    let open = fx
        .query
        .open_tasks(&ViewFilter::default())
        .expect("open tasks should load");
    assert_eq!(open.len(), 1);
}

#[test]
fn deleting_a_requirement_cascades_to_templates_and_tasks() {
    let fx = Fixture::new("cascade");
    let site = fx.site("North");
    let equipment_id = fx.equipment(&site, "P-1");
    let requirement = fx.requirement(&site, "40 CFR 60");
    let template = fx.template(&requirement, "Inspect");
    let task_id = fx.task(&template, &equipment_id, "2025-01-01");

    fx.edit
        .delete_requirement(&requirement.id)
        .expect("delete should succeed");

    assert!(fx.query.list_requirements().expect("should load").is_empty());
    assert!(fx.query.list_task_templates().expect("should load").is_empty());
    assert_eq!(
        queries::get_task(&fx.store.db_path, &task_id).expect("query should succeed"),
        None
    );
    assert!(fx
        .store
        .view_rows(&ViewFilter::default())
        .expect("view should load")
        .is_empty());

    fx.edit
        .delete_requirement(&requirement.id)
        .expect("deleting a missing requirement is not an error");
}

#[test]
fn site_dashboard_counts_unfinished_tasks() {
    let fx = Fixture::new("dashboard");
    let site = fx.site("North");
    let pump = fx.equipment(&site, "P-10");
    let valve = fx.equipment(&site, "P-2");
    let requirement = fx.requirement(&site, "40 CFR 60");
    let template = fx.template(&requirement, "Inspect");
    fx.task(&template, &pump, "2025-01-01");
    let done = fx.task(&template, &pump, "2025-02-01");
    fx.task(&template, &valve, "2025-03-01");
    fx.edit
        .update_task_status(&done, TaskStatus::Approved, None)
        .expect("approve should succeed");

    let dashboard = fx.query.site_dashboard(&site.id).expect("dashboard should load");

    assert_eq!(dashboard.site.name, "North");
    assert_eq!(dashboard.open_task_count, 2);
    let tags: Vec<&str> = dashboard
        .equipment
        .iter()
        .map(|summary| summary.asset_tag.as_str())
        .collect();
    assert_eq!(tags, vec!["P-2", "P-10"]);
    assert_eq!(dashboard.equipment[1].open_task_count, 1);
    assert_eq!(dashboard.equipment[1].equipment_type.as_deref(), Some("Pump"));
}

#[test]
fn equipment_for_site_falls_back_to_equipment_table() {
    let fx = Fixture::new("fallback");
    let site = fx.site("North");
    fx.equipment(&site, "B-1");
    fx.equipment(&site, "A-1");

    let summaries = fx
        .query
        .equipment_for_site(&site.id)
        .expect("summaries should load");

    let tags: Vec<&str> = summaries.iter().map(|s| s.asset_tag.as_str()).collect();
    assert_eq!(tags, vec!["A-1", "B-1"]);
    assert!(summaries.iter().all(|s| s.requirements.is_empty()));
    assert!(summaries.iter().all(|s| s.open_task_count == 0));
}

#[test]
fn task_templates_for_site_only_offers_active_site_templates() {
    let fx = Fixture::new("site-templates");
    let north = fx.site("North");
    let south = fx.site("South");
    let north_req = fx.requirement(&north, "40 CFR 60");
    let south_req = fx.requirement(&south, "40 CFR 63");
    fx.template(&north_req, "Weekly walk");
    fx.template(&north_req, "Annual test");
    let retired = fx.template(&north_req, "Retired check");
    fx.template(&south_req, "South only");
    fx.edit
        .update_task_template(
            &retired.id,
            crate::domain::entities::records::TaskTemplatePatch {
                active: Some(false),
                ..Default::default()
            },
        )
        .expect("deactivate should succeed");

    let options = fx
        .query
        .task_templates_for_site(&north.id)
        .expect("options should load");

    let names: Vec<&str> = options.iter().map(|o| o.task_name.as_str()).collect();
    assert_eq!(names, vec!["Annual test", "Weekly walk"]);
    assert!(options.iter().all(|o| o.citation == "40 CFR 60"));
}

#[test]
fn regulation_names_are_distinct_and_sorted() {
    let fx = Fixture::new("regulations");
    let site = fx.site("North");
    for (citation, regulation) in [("a", " NSPS "), ("b", "MACT"), ("c", "NSPS"), ("d", "")] {
        fx.edit
            .create_requirement(NewRequirement {
                citation: citation.to_string(),
                regulation_name: Some(regulation.to_string()),
                requirement_summary: "summary".to_string(),
                requirement_text: None,
                site_id: site.id.clone(),
                is_active: true,
            })
            .expect("requirement should be created");
    }

    let names = fx.query.regulation_names().expect("names should load");

    assert_eq!(names, vec!["MACT", "NSPS"]);
}

#[test]
fn update_equipment_applies_patch_and_hides_inactive() {
    let fx = Fixture::new("update-equipment");
    let site = fx.site("North");
    let equipment_id = fx.equipment(&site, "P-1");

    let updated = fx
        .edit
        .update_equipment(
            &equipment_id,
            EquipmentPatch {
                process_unit: Some(" Unit 4 ".to_string()),
                equipment_type: Some(String::new()),
                ..EquipmentPatch::default()
            },
        )
        .expect("update should succeed");
    assert_eq!(updated.process_unit.as_deref(), Some("Unit 4"));
    assert_eq!(updated.equipment_type, None);
    assert_eq!(updated.asset_tag, "P-1");

    let unchanged = fx
        .edit
        .update_equipment(&equipment_id, EquipmentPatch::default())
        .expect("empty patch should succeed");
    assert_eq!(unchanged, updated);

    fx.edit
        .update_equipment(
            &equipment_id,
            EquipmentPatch {
                is_active: Some(false),
                ..EquipmentPatch::default()
            },
        )
        .expect("deactivate should succeed");
    assert!(fx
        .query
        .list_equipment(None)
        .expect("equipment should load")
        .is_empty());
}

#[test]
fn open_task_board_sorts_and_filters_loaded_rows() {
    let fx = Fixture::new("task-board");
    let site = fx.site("North");
    let first = fx.equipment(&site, "P-10");
    let second = fx.equipment(&site, "P-9");
    let requirement = fx.requirement(&site, "40 CFR 60");
    let template = fx.template(&requirement, "Inspect");
    fx.task(&template, &first, "2025-05-01");
    fx.task(&template, &second, "2025-01-01");
    let users = fx.query.list_users(None).expect("users should load");
    let rows = fx
        .query
        .open_tasks(&ViewFilter::default())
        .expect("open tasks should load");

    let spec = tasks_table(&users);
    let mut state = TableState::new();
    state.toggle_sort("asset_tag");
    let model = TableModel::build(&spec, &state, &rows);
    let tags: Vec<&str> = model.rows.iter().map(|r| r.cells[0].text.as_str()).collect();
    assert_eq!(tags, vec!["P-9", "P-10"]);

    state.set_column_filter("due_date", "2025-05");
    let model = TableModel::build(&spec, &state, &rows);
    assert_eq!(model.rows.len(), 1);
    assert_eq!(model.rows[0].cells[4].text, "May 1, 2025");
}

#[test]
fn new_equipment_can_start_with_an_open_task() {
    let fx = Fixture::new("equipment-first-task");
    let site = fx.site("North");
    let requirement = fx.requirement(&site, "40 CFR 60.482");
    let template = fx.template(&requirement, "Leak check");

    let (equipment, task) = fx
        .edit
        .create_equipment_with_task(
            NewEquipment {
                asset_tag: "V-7".to_string(),
                description: "Valve".to_string(),
                equipment_site_id: site.id.clone(),
                ..NewEquipment::default()
            },
            Some(FirstTask {
                task_template_id: template.id.clone(),
                requirement_id: requirement.id.clone(),
                due_date: "2025-06-30".to_string(),
            }),
        )
        .expect("equipment with task should be created");
    let task = task.expect("first task should be created");
    assert_eq!(task.status, TaskStatus::Open);

    let rows = fx
        .store
        .view_rows(&ViewFilter {
            equipment_id: Some(equipment.id.clone()),
            ..ViewFilter::default()
        })
        .expect("view should load");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].asset_tag, "V-7");
    assert_eq!(rows[0].task_id.as_deref(), Some(task.id.as_str()));
    assert_eq!(rows[0].task_status.as_deref(), Some("open"));
    assert_eq!(rows[0].due_date.as_deref(), Some("2025-06-30"));

    let (_, no_task) = fx
        .edit
        .create_equipment_with_task(
            NewEquipment {
                asset_tag: "V-8".to_string(),
                equipment_site_id: site.id.clone(),
                ..NewEquipment::default()
            },
            None,
        )
        .expect("equipment without task should be created");
    assert!(no_task.is_none());
}

#[test]
fn rejected_equipment_with_task_writes_nothing() {
    let fx = Fixture::new("equipment-first-task-invalid");
    let site = fx.site("North");
    let requirement = fx.requirement(&site, "40 CFR 60.482");
    let template = fx.template(&requirement, "Leak check");
    let input = NewEquipment {
        asset_tag: "V-7".to_string(),
        equipment_site_id: site.id.clone(),
        ..NewEquipment::default()
    };

    let missing_due = fx.edit.create_equipment_with_task(
        input.clone(),
        Some(FirstTask {
            task_template_id: template.id.clone(),
            requirement_id: requirement.id.clone(),
            due_date: "  ".to_string(),
        }),
    );
    assert!(matches!(missing_due, Err(StoreError::Invalid(_))));

    let blank_tag = fx.edit.create_equipment_with_task(
        NewEquipment {
            asset_tag: " ".to_string(),
            ..input
        },
        None,
    );
    assert!(matches!(blank_tag, Err(StoreError::Invalid(_))));

    assert!(fx
        .query
        .list_equipment(Some(&site.id))
        .expect("equipment should load")
        .is_empty());
}

#[test]
fn open_tasks_narrow_by_assignee_and_status() {
    let fx = Fixture::new("task-board-filters");
    let site = fx.site("North");
    let first = fx.equipment(&site, "P-1");
    let second = fx.equipment(&site, "P-2");
    let requirement = fx.requirement(&site, "40 CFR 60");
    let template = fx.template(&requirement, "Inspect");
    let assigned_task = fx.task(&template, &first, "2025-01-01");
    let open_task = fx.task(&template, &second, "2025-02-01");
    let user = fx
        .edit
        .create_user(NewUser {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            role: "technician".to_string(),
            site_id: Some(site.id.clone()),
        })
        .expect("user should be created");
    fx.edit
        .assign_task(&assigned_task, Some(user.id.clone()))
        .expect("assign should succeed");

    let by_user = fx
        .query
        .open_tasks(&ViewFilter {
            site_id: Some(site.id.clone()),
            assigned_to_user_id: Some(user.id.clone()),
            ..ViewFilter::default()
        })
        .expect("open tasks should load");
    assert_eq!(by_user.len(), 1);
    assert_eq!(by_user[0].task_id.as_deref(), Some(assigned_task.as_str()));

    let by_status = fx
        .query
        .open_tasks(&ViewFilter {
            task_status: Some("open".to_string()),
            ..ViewFilter::default()
        })
        .expect("open tasks should load");
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].task_id.as_deref(), Some(open_task.as_str()));

    let both = fx
        .query
        .open_tasks(&ViewFilter {
            task_status: Some("open".to_string()),
            assigned_to_user_id: Some(user.id),
            ..ViewFilter::default()
        })
        .expect("open tasks should load");
    assert!(both.is_empty());
}

#[test]
fn webview_data_dir_is_created_under_base() {
    let temp_dir = unique_test_dir("webview");

    let dir = ensure_webview_data_dir(&temp_dir).expect("should create webview dir");

    assert!(dir.starts_with(&temp_dir));
    assert!(dir.is_dir());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}
