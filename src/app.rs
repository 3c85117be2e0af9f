use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use crate::config::AppConfig;
use crate::domain::entities::records::{
    EquipmentPatch, FirstTask, NewEquipment, NewRequirement, NewSite, NewTask, NewTaskTemplate,
    NewUser, RequirementPatch, TaskStatus, TaskTemplatePatch,
};
use crate::domain::table::{TableModel, TableState};
use crate::infra::sqlite::repo::SqliteStore;
use crate::ui::components::{form_optional, form_value, AddForm, DataTable, FormField};
use crate::ui::state::{AppState, Tab};
use crate::ui::tables::{
    display_date, equipment_summary_table, equipment_table, requirements_table, sites_table,
    task_templates_table, tasks_table, users_table,
};
use crate::usecase::ports::store::{DataStore, StoreError, ViewFilter};
use crate::usecase::services::edit_service::EditService;
use crate::usecase::services::query_service::QueryService;

const PANEL_STYLE: &str =
    "border: 1px solid #ddd; border-radius: 8px; padding: 12px 16px; margin-top: 16px; background: #fafafa;";
const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";

#[derive(Clone)]
struct Services {
    query: Arc<QueryService>,
    edit: Arc<EditService>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.query, &other.query) && Arc::ptr_eq(&self.edit, &other.edit)
    }
}

fn open_services() -> Result<Services> {
    let config = AppConfig::resolve()?;
    let store: Arc<dyn DataStore> = Arc::new(SqliteStore::new(config.db_path.clone()));
    store
        .init()
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    log::info!("database ready at {}", config.db_path.display());
    Ok(Services {
        query: Arc::new(QueryService::new(store.clone())),
        edit: Arc::new(EditService::new(store)),
    })
}

/// Fetches everything the active tab shows. Reads go through the signals so
/// the calling effect re-runs when any of them change.
fn load_tab(services: &Services, mut state: AppState) -> Result<(), StoreError> {
    let tab = (state.active_tab)();
    let site_filter = (state.site_filter)();
    let site = if tab.filters_by_site() {
        site_filter.as_deref()
    } else {
        None
    };

    state.sites.set(services.query.list_sites()?);

    match tab {
        Tab::Sites => {
            let dashboard = match (state.selected_site)() {
                Some(site_id) => Some(services.query.site_dashboard(&site_id)?),
                None => None,
            };
            state.dashboard.set(dashboard);
        }
        Tab::Equipment => {
            state.equipment.set(services.query.list_equipment(site)?);
            state.users.set(services.query.list_users(None)?);
            state.regulation_names.set(services.query.regulation_names()?);
            let site_templates = match site {
                Some(site_id) => services.query.task_templates_for_site(site_id)?,
                None => Vec::new(),
            };
            state.site_templates.set(site_templates);
            let detail = match (state.selected_equipment)() {
                Some(equipment_id) => Some(services.query.equipment_detail(&equipment_id)?),
                None => None,
            };
            state.equipment_detail.set(detail);
        }
        Tab::Requirements => {
            state.requirements.set(services.query.list_requirements()?);
        }
        Tab::TaskTemplates => {
            state.requirements.set(services.query.list_requirements()?);
            state.templates.set(services.query.list_task_templates()?);
        }
        Tab::Tasks => {
            let filter = ViewFilter {
                site_id: site.map(str::to_string),
                task_status: (state.status_filter)(),
                assigned_to_user_id: (state.assignee_filter)(),
                ..ViewFilter::default()
            };
            state.tasks.set(services.query.open_tasks(&filter)?);
            state.users.set(services.query.list_users(None)?);
        }
        Tab::Users => {
            state.users.set(services.query.list_users(site)?);
        }
    }
    Ok(())
}

/// Runs one write against the store, reporting the outcome on the status line
/// and reloading the lists on success.
fn run_mutation<T>(
    mut state: AppState,
    label: &str,
    action: impl FnOnce() -> Result<T, StoreError>,
) -> Option<T> {
    match action() {
        Ok(value) => {
            state.status.set(format!("{label}: done"));
            state.invalidate();
            Some(value)
        }
        Err(err) => {
            log::warn!("{label} failed: {err}");
            state.status.set(format!("{label} failed: {err}"));
            None
        }
    }
}

fn confirm_delete(what: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Delete")
        .set_description(format!("Delete this {what}? This cannot be undone."))
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

fn site_options(state: &AppState) -> Vec<(String, String)> {
    state
        .sites
        .read()
        .iter()
        .map(|site| (site.id.clone(), site.name.clone()))
        .collect()
}

fn user_options(state: &AppState) -> Vec<(String, String)> {
    state
        .users
        .read()
        .iter()
        .map(|user| (user.id.clone(), user.name.clone()))
        .collect()
}

fn open_status_options() -> Vec<(String, String)> {
    TaskStatus::ALL
        .into_iter()
        .filter(|status| status.is_open())
        .map(|status| (status.as_str().to_string(), status.as_str().to_string()))
        .collect()
}

fn yes_no_options() -> Vec<(String, String)> {
    vec![
        ("yes".to_string(), "Yes".to_string()),
        ("no".to_string(), "No".to_string()),
    ]
}

#[component]
pub fn App() -> Element {
    let mut state = AppState::new();
    let services = use_hook(|| open_services().map_err(|err| format!("{err:#}")));
    let services = match services {
        Ok(services) => services,
        Err(err) => {
            return rsx! {
                div {
                    p { "Unable to open the compliance database: {err}" }
                }
            };
        }
    };

    let services_for_load = services.clone();
    use_effect(move || {
        let _ = (state.reload)();
        if let Err(err) = load_tab(&services_for_load, state) {
            log::error!("failed to load {}: {err}", state.active_tab.peek().label());
            state.status.set(format!("Failed to load data: {err}"));
        }
    });

    let active = (state.active_tab)();
    let site_filter = (state.site_filter)().unwrap_or_default();
    let assignee_filter = (state.assignee_filter)().unwrap_or_default();
    let status_filter = (state.status_filter)().unwrap_or_default();

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 16px; color: #222;",
            h2 { style: "margin: 0 0 12px 0;", "Compliance Tracker" }
            nav {
                style: "display: flex; gap: 6px; border-bottom: 1px solid #ddd; padding-bottom: 8px;",
                {Tab::ALL.into_iter().map(|tab| {
                    let label = tab.label();
                    let weight = if tab == active { "600" } else { "400" };
                    let background = if tab == active { "#eef4ff" } else { "#fff" };
                    rsx!(
                        button {
                            key: "{label}",
                            style: "{BUTTON_STYLE} font-weight: {weight}; background: {background};",
                            onclick: move |_| state.open_tab(tab),
                            "{label}"
                        }
                    )
                })}
            }
            div {
                style: "display: flex; align-items: center; gap: 12px; margin-top: 8px; min-height: 32px;",
                if active.filters_by_site() {
                    label { style: "font-size: 13px; color: #555;",
                        "Site "
                        select {
                            value: "{site_filter}",
                            onchange: move |event| {
                                let value = event.value();
                                state.site_filter.set(Some(value).filter(|v| !v.is_empty()));
                                state.table.set(TableState::new());
                            },
                            option { value: "", "All sites" }
                            {site_options(&state).into_iter().map(|(id, name)| {
                                let selected = id == site_filter;
                                rsx!(option { value: "{id}", selected: selected, "{name}" })
                            })}
                        }
                    }
                }
                if active == Tab::Tasks {
                    label { style: "font-size: 13px; color: #555;",
                        "Assigned to "
                        select {
                            value: "{assignee_filter}",
                            onchange: move |event| {
                                let value = event.value();
                                state.assignee_filter.set(Some(value).filter(|v| !v.is_empty()));
                                state.table.set(TableState::new());
                            },
                            option { value: "", "All users" }
                            {user_options(&state).into_iter().map(|(id, name)| {
                                let selected = id == assignee_filter;
                                rsx!(option { value: "{id}", selected: selected, "{name}" })
                            })}
                        }
                    }
                    label { style: "font-size: 13px; color: #555;",
                        "Status "
                        select {
                            value: "{status_filter}",
                            onchange: move |event| {
                                let value = event.value();
                                state.status_filter.set(Some(value).filter(|v| !v.is_empty()));
                                state.table.set(TableState::new());
                            },
                            option { value: "", "All statuses" }
                            {open_status_options().into_iter().map(|(value, label)| {
                                let selected = value == status_filter;
                                rsx!(option { value: "{value}", selected: selected, "{label}" })
                            })}
                        }
                    }
                }
                span { style: "font-size: 13px; color: #666;", "{state.status}" }
            }
            match active {
                Tab::Sites => rsx!(SitesTab { services: services.clone(), state }),
                Tab::Equipment => rsx!(EquipmentTab { services: services.clone(), state }),
                Tab::Requirements => rsx!(RequirementsTab { services: services.clone(), state }),
                Tab::TaskTemplates => rsx!(TaskTemplatesTab { services: services.clone(), state }),
                Tab::Tasks => rsx!(TasksTab { services: services.clone(), state }),
                Tab::Users => rsx!(UsersTab { services: services.clone(), state }),
            }
        }
    }
}

/// A [`DataTable`] wired to a table-state signal.
#[component]
fn TableView(
    model: TableModel,
    mut table: Signal<TableState>,
    #[props(default)] actions: Vec<String>,
    on_action: EventHandler<(String, String)>,
) -> Element {
    rsx! {
        DataTable {
            model,
            on_sort: move |column_id: String| table.write().toggle_sort(&column_id),
            on_filter: move |(column_id, text): (String, String)| {
                table.write().set_column_filter(&column_id, &text)
            },
            on_search: move |text: String| table.write().set_global_search(&text),
            actions,
            on_action,
        }
    }
}

#[component]
fn SitesTab(services: Services, mut state: AppState) -> Element {
    let model = use_memo(move || {
        TableModel::build(&sites_table(), &state.table.read(), &state.sites.read())
    });
    let dashboard_model = use_memo(move || {
        let rows = state
            .dashboard
            .read()
            .as_ref()
            .map(|dashboard| dashboard.equipment.clone())
            .unwrap_or_default();
        TableModel::build(&equipment_summary_table(), &state.detail_table.read(), &rows)
    });
    let edit = services.edit.clone();

    rsx! {
        TableView {
            model: model(),
            table: state.table,
            actions: vec!["Open".to_string()],
            on_action: move |(_, site_id): (String, String)| {
                state.detail_table.set(TableState::new());
                state.selected_site.set(Some(site_id));
            },
        }
        if let Some(dashboard) = (state.dashboard)() {
            div { style: PANEL_STYLE,
                div { style: "display: flex; justify-content: space-between; align-items: center;",
                    h3 { style: "margin: 0;", "{dashboard.site.name}" }
                    button {
                        style: BUTTON_STYLE,
                        onclick: move |_| state.selected_site.set(None),
                        "Close"
                    }
                }
                p { style: "margin: 4px 0; color: #555;",
                    "Client: {dashboard.site.client_name} · Open tasks: {dashboard.open_task_count}"
                }
                TableView {
                    model: dashboard_model(),
                    table: state.detail_table,
                    on_action: move |_| {},
                }
            }
        }
        AddForm {
            title: "Add site".to_string(),
            fields: vec![
                FormField::text("name", "Name"),
                FormField::text("client_name", "Client"),
            ],
            submit_label: "Add".to_string(),
            on_submit: move |values: HashMap<String, String>| {
                run_mutation(state, "Add site", || {
                    edit.create_site(NewSite {
                        name: form_value(&values, "name"),
                        client_name: form_value(&values, "client_name"),
                    })
                })
                .is_some()
            },
        }
    }
}

#[component]
fn EquipmentTab(services: Services, mut state: AppState) -> Element {
    let model = use_memo(move || {
        TableModel::build(
            &equipment_table(&state.sites.read()),
            &state.table.read(),
            &state.equipment.read(),
        )
    });
    let edit = services.edit.clone();
    let regulations: Vec<(String, String)> = state
        .regulation_names
        .read()
        .iter()
        .map(|name| (name.clone(), name.clone()))
        .collect();
    let site_filter = (state.site_filter)();
    let site_key = site_filter.clone().unwrap_or_default();
    let site_templates = state.site_templates.read().clone();
    let detail_regulations = regulations.clone();

    // With a site selected above, new equipment goes to that site and may
    // start with an open task from one of its templates.
    let mut add_fields = vec![
        FormField::text("asset_tag", "Asset tag"),
        FormField::text("description", "Description"),
    ];
    if site_filter.is_none() {
        add_fields.push(FormField::select("site", "Site", site_options(&state)));
    }
    add_fields.extend([
        FormField::text("equipment_type", "Type"),
        FormField::text("process_unit", "Process unit"),
        FormField::select("regulation_name", "Regulation", regulations),
    ]);
    if !site_templates.is_empty() {
        let template_options = site_templates
            .iter()
            .map(|t| (t.id.clone(), format!("{} ({})", t.task_name, t.citation)))
            .collect();
        add_fields.push(FormField::select("first_template", "First task", template_options));
        add_fields.push(FormField::date("first_due_date", "First task due"));
    }

    rsx! {
        TableView {
            model: model(),
            table: state.table,
            actions: vec!["Details".to_string()],
            on_action: move |(_, equipment_id): (String, String)| {
                state.selected_equipment.set(Some(equipment_id));
            },
        }
        if let Some(detail) = (state.equipment_detail)() {
            EquipmentDetailPanel {
                key: "{detail.equipment.id}",
                services: services.clone(),
                state,
                regulations: detail_regulations,
            }
        }
        AddForm {
            key: "{site_key}",
            title: "Add equipment".to_string(),
            fields: add_fields,
            submit_label: "Add".to_string(),
            on_submit: move |values: HashMap<String, String>| {
                let equipment_site_id = site_filter
                    .clone()
                    .unwrap_or_else(|| form_value(&values, "site"));
                let first_task = form_optional(&values, "first_template").map(|template_id| {
                    let requirement_id = site_templates
                        .iter()
                        .find(|t| t.id == template_id)
                        .map(|t| t.requirement_id.clone())
                        .unwrap_or_default();
                    FirstTask {
                        task_template_id: template_id,
                        requirement_id,
                        due_date: form_value(&values, "first_due_date"),
                    }
                });
                run_mutation(state, "Add equipment", || {
                    edit.create_equipment_with_task(
                        NewEquipment {
                            asset_tag: form_value(&values, "asset_tag"),
                            description: form_value(&values, "description"),
                            equipment_site_id,
                            equipment_type: form_optional(&values, "equipment_type"),
                            process_unit: form_optional(&values, "process_unit"),
                            regulation_name: form_optional(&values, "regulation_name"),
                            ..NewEquipment::default()
                        },
                        first_task,
                    )
                })
                .is_some()
            },
        }
    }
}

#[component]
fn EquipmentDetailPanel(
    services: Services,
    mut state: AppState,
    regulations: Vec<(String, String)>,
) -> Element {
    let Some(detail) = (state.equipment_detail)() else {
        return rsx! {};
    };
    let equipment = detail.equipment.clone();
    let equipment_id = equipment.id.clone();
    let templates = detail.task_templates.clone();
    let edit_for_task = services.edit.clone();
    let edit_for_update = services.edit.clone();

    let template_options: Vec<(String, String)> = templates
        .iter()
        .map(|t| (t.id.clone(), format!("{} ({})", t.task_name, t.citation)))
        .collect();
    let initial = HashMap::from([
        ("asset_tag".to_string(), equipment.asset_tag.clone()),
        ("description".to_string(), equipment.description.clone()),
        (
            "equipment_type".to_string(),
            equipment.equipment_type.clone().unwrap_or_default(),
        ),
        (
            "process_unit".to_string(),
            equipment.process_unit.clone().unwrap_or_default(),
        ),
        (
            "regulation_name".to_string(),
            equipment.regulation_name.clone().unwrap_or_default(),
        ),
        (
            "active".to_string(),
            if equipment.is_active { "yes" } else { "no" }.to_string(),
        ),
    ]);
    let task_equipment_id = equipment_id.clone();

    rsx! {
        div { style: PANEL_STYLE,
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h3 { style: "margin: 0;", "{equipment.asset_tag} · {equipment.description}" }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| state.selected_equipment.set(None),
                    "Close"
                }
            }
            if detail.requirements.is_empty() {
                p { style: "color: #666;", "No requirements mapped to this equipment." }
            }
            {detail.requirements.iter().map(|group| rsx!(
                div { key: "{group.requirement_id}", style: "margin-top: 10px;",
                    div { style: "font-weight: 600;", "{group.citation}" }
                    div { style: "color: #555; font-size: 13px;", "{group.requirement_summary}" }
                    ul { style: "margin: 4px 0 0 0;",
                        if group.tasks.is_empty() {
                            li { style: "color: #888;", "No tasks" }
                        }
                        {group.tasks.iter().map(|task| {
                            let name = task.task_name.clone().unwrap_or_default();
                            let status = task.task_status.clone().unwrap_or_default();
                            let due = display_date(task.due_date.as_deref());
                            rsx!(li { key: "{task.task_id}", "{name} · {status} · due {due}" })
                        })}
                    }
                }
            ))}
            AddForm {
                title: "Add task".to_string(),
                fields: vec![
                    FormField::select("template", "Task template", template_options),
                    FormField::date("due_date", "Due date"),
                    FormField::select("assignee", "Assign to", user_options(&state)),
                ],
                submit_label: "Add task".to_string(),
                on_submit: move |values: HashMap<String, String>| {
                    let template_id = form_value(&values, "template");
                    let requirement_id = templates
                        .iter()
                        .find(|t| t.id == template_id)
                        .map(|t| t.requirement_id.clone())
                        .unwrap_or_default();
                    run_mutation(state, "Add task", || {
                        edit_for_task.create_task(NewTask {
                            task_template_id: template_id.clone(),
                            requirement_id,
                            equipment_id: task_equipment_id.clone(),
                            due_date: form_value(&values, "due_date"),
                            status: None,
                            assigned_to_user_id: form_optional(&values, "assignee"),
                        })
                    })
                    .is_some()
                },
            }
            AddForm {
                title: "Edit equipment".to_string(),
                fields: vec![
                    FormField::text("asset_tag", "Asset tag"),
                    FormField::text("description", "Description"),
                    FormField::text("equipment_type", "Type"),
                    FormField::text("process_unit", "Process unit"),
                    FormField::select("regulation_name", "Regulation", regulations),
                    FormField::select("active", "Active", yes_no_options()),
                ],
                initial,
                on_submit: move |values: HashMap<String, String>| {
                    let patch = EquipmentPatch {
                        asset_tag: Some(form_value(&values, "asset_tag")),
                        description: Some(form_value(&values, "description")),
                        equipment_type: Some(form_value(&values, "equipment_type")),
                        process_unit: Some(form_value(&values, "process_unit")),
                        regulation_name: Some(form_value(&values, "regulation_name")),
                        is_active: form_optional(&values, "active").map(|v| v == "yes"),
                        ..EquipmentPatch::default()
                    };
                    run_mutation(state, "Update equipment", || {
                        edit_for_update.update_equipment(&equipment_id, patch)
                    })
                    .is_some()
                },
            }
        }
    }
}

#[component]
fn RequirementsTab(services: Services, state: AppState) -> Element {
    let model = use_memo(move || {
        TableModel::build(
            &requirements_table(),
            &state.table.read(),
            &state.requirements.read(),
        )
    });
    let edit_for_action = services.edit.clone();
    let edit_for_add = services.edit.clone();

    rsx! {
        TableView {
            model: model(),
            table: state.table,
            actions: vec!["Toggle active".to_string(), "Delete".to_string()],
            on_action: move |(action, requirement_id): (String, String)| {
                if action == "Delete" {
                    if !confirm_delete("requirement") {
                        return;
                    }
                    run_mutation(state, "Delete requirement", || {
                        edit_for_action.delete_requirement(&requirement_id)
                    });
                    return;
                }
                let is_active = state
                    .requirements
                    .read()
                    .iter()
                    .find(|r| r.requirement.id == requirement_id)
                    .map(|r| r.requirement.is_active);
                let Some(is_active) = is_active else {
                    return;
                };
                run_mutation(state, "Update requirement", || {
                    edit_for_action.update_requirement(
                        &requirement_id,
                        RequirementPatch {
                            is_active: Some(!is_active),
                            ..RequirementPatch::default()
                        },
                    )
                });
            },
        }
        AddForm {
            title: "Add requirement".to_string(),
            fields: vec![
                FormField::text("citation", "Citation"),
                FormField::text("regulation_name", "Regulation"),
                FormField::text("requirement_summary", "Summary"),
                FormField::text("requirement_text", "Full text"),
                FormField::select("site", "Site", site_options(&state)),
            ],
            submit_label: "Add".to_string(),
            on_submit: move |values: HashMap<String, String>| {
                run_mutation(state, "Add requirement", || {
                    edit_for_add.create_requirement(NewRequirement {
                        citation: form_value(&values, "citation"),
                        regulation_name: form_optional(&values, "regulation_name"),
                        requirement_summary: form_value(&values, "requirement_summary"),
                        requirement_text: form_optional(&values, "requirement_text"),
                        site_id: form_value(&values, "site"),
                        is_active: true,
                    })
                })
                .is_some()
            },
        }
    }
}

#[component]
fn TaskTemplatesTab(services: Services, state: AppState) -> Element {
    let model = use_memo(move || {
        TableModel::build(
            &task_templates_table(),
            &state.table.read(),
            &state.templates.read(),
        )
    });
    let edit_for_action = services.edit.clone();
    let edit_for_add = services.edit.clone();
    let requirement_options: Vec<(String, String)> = state
        .requirements
        .read()
        .iter()
        .filter(|r| r.requirement.is_active)
        .map(|r| {
            (
                r.requirement.id.clone(),
                format!("{} · {}", r.requirement.citation, r.site_name),
            )
        })
        .collect();

    rsx! {
        TableView {
            model: model(),
            table: state.table,
            actions: vec!["Toggle active".to_string(), "Delete".to_string()],
            on_action: move |(action, template_id): (String, String)| {
                if action == "Delete" {
                    if !confirm_delete("task template") {
                        return;
                    }
                    run_mutation(state, "Delete task template", || {
                        edit_for_action.delete_task_template(&template_id)
                    });
                    return;
                }
                let active = state
                    .templates
                    .read()
                    .iter()
                    .find(|t| t.template.id == template_id)
                    .map(|t| t.template.active);
                let Some(active) = active else {
                    return;
                };
                run_mutation(state, "Update task template", || {
                    edit_for_action.update_task_template(
                        &template_id,
                        TaskTemplatePatch {
                            active: Some(!active),
                            ..TaskTemplatePatch::default()
                        },
                    )
                });
            },
        }
        AddForm {
            title: "Add task template".to_string(),
            fields: vec![
                FormField::select("requirement", "Requirement", requirement_options),
                FormField::text("task_name", "Task name"),
                FormField::text("task_description", "Description"),
                FormField::text("frequency", "Frequency"),
            ],
            submit_label: "Add".to_string(),
            on_submit: move |values: HashMap<String, String>| {
                run_mutation(state, "Add task template", || {
                    edit_for_add.create_task_template(NewTaskTemplate {
                        requirement_id: form_value(&values, "requirement"),
                        task_name: form_value(&values, "task_name"),
                        task_description: form_value(&values, "task_description"),
                        frequency: form_value(&values, "frequency"),
                        active: true,
                    })
                })
                .is_some()
            },
        }
    }
}

#[component]
fn TasksTab(services: Services, state: AppState) -> Element {
    let model = use_memo(move || {
        TableModel::build(
            &tasks_table(&state.users.read()),
            &state.table.read(),
            &state.tasks.read(),
        )
    });
    let edit_for_action = services.edit.clone();
    let edit_for_assign = services.edit.clone();
    let edit_for_reject = services.edit.clone();
    let task_options: Vec<(String, String)> = state
        .tasks
        .read()
        .iter()
        .filter_map(|row| {
            let id = row.task_id.clone()?;
            let name = row.task_name.clone().unwrap_or_default();
            Some((id, format!("{} · {name}", row.asset_tag)))
        })
        .collect();

    rsx! {
        TableView {
            model: model(),
            table: state.table,
            actions: vec![
                "Submit".to_string(),
                "Approve".to_string(),
                "Close".to_string(),
            ],
            on_action: move |(action, task_id): (String, String)| {
                let status = match action.as_str() {
                    "Submit" => TaskStatus::Submitted,
                    "Approve" => TaskStatus::Approved,
                    _ => TaskStatus::Closed,
                };
                run_mutation(state, &format!("{action} task"), || {
                    edit_for_action.update_task_status(&task_id, status, None)
                });
            },
        }
        AddForm {
            title: "Assign task".to_string(),
            fields: vec![
                FormField::select("task", "Task", task_options.clone()),
                FormField::select("user", "User", user_options(&state)),
            ],
            submit_label: "Assign".to_string(),
            on_submit: move |values: HashMap<String, String>| {
                run_mutation(state, "Assign task", || {
                    edit_for_assign.assign_task(
                        &form_value(&values, "task"),
                        form_optional(&values, "user"),
                    )
                })
                .is_some()
            },
        }
        AddForm {
            title: "Reject task".to_string(),
            fields: vec![
                FormField::select("task", "Task", task_options),
                FormField::text("reason", "Reason"),
            ],
            submit_label: "Reject".to_string(),
            on_submit: move |values: HashMap<String, String>| {
                run_mutation(state, "Reject task", || {
                    edit_for_reject.update_task_status(
                        &form_value(&values, "task"),
                        TaskStatus::Rejected,
                        form_optional(&values, "reason"),
                    )
                })
                .is_some()
            },
        }
    }
}

#[component]
fn UsersTab(services: Services, state: AppState) -> Element {
    let model = use_memo(move || {
        TableModel::build(
            &users_table(&state.sites.read()),
            &state.table.read(),
            &state.users.read(),
        )
    });
    let edit = services.edit.clone();

    rsx! {
        TableView {
            model: model(),
            table: state.table,
            on_action: move |_| {},
        }
        AddForm {
            title: "Add user".to_string(),
            fields: vec![
                FormField::text("name", "Name"),
                FormField::text("email", "Email"),
                FormField::text("role", "Role"),
                FormField::select("site", "Site", site_options(&state)),
            ],
            submit_label: "Add".to_string(),
            on_submit: move |values: HashMap<String, String>| {
                run_mutation(state, "Add user", || {
                    edit.create_user(NewUser {
                        name: form_value(&values, "name"),
                        email: form_value(&values, "email"),
                        role: form_value(&values, "role"),
                        site_id: form_optional(&values, "site"),
                    })
                })
                .is_some()
            },
        }
    }
}
