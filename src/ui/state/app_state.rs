use dioxus::prelude::{use_signal, ReadableExt, Signal, WritableExt};

use crate::domain::entities::records::{
    EquipmentListItem, RequirementWithSite, Site, TaskTemplateOption, TaskTemplateWithRequirement,
    User,
};
use crate::domain::entities::view::ViewRow;
use crate::domain::table::TableState;
use crate::usecase::services::query_service::{EquipmentDetail, SiteDashboard};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Sites,
    Equipment,
    Requirements,
    TaskTemplates,
    Tasks,
    Users,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Sites,
        Tab::Equipment,
        Tab::Requirements,
        Tab::TaskTemplates,
        Tab::Tasks,
        Tab::Users,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Sites => "Sites",
            Tab::Equipment => "Equipment",
            Tab::Requirements => "Requirements",
            Tab::TaskTemplates => "Task templates",
            Tab::Tasks => "Open tasks",
            Tab::Users => "Users",
        }
    }

    /// Whether the list on this tab can be narrowed to one site.
    pub fn filters_by_site(self) -> bool {
        matches!(self, Tab::Equipment | Tab::Tasks | Tab::Users)
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct AppState {
    pub active_tab: Signal<Tab>,
    pub site_filter: Signal<Option<String>>,
    /// Open-task board only.
    pub assignee_filter: Signal<Option<String>>,
    pub status_filter: Signal<Option<String>>,
    pub status: Signal<String>,
    pub reload: Signal<u64>,
    pub table: Signal<TableState>,
    pub detail_table: Signal<TableState>,
    pub sites: Signal<Vec<Site>>,
    pub equipment: Signal<Vec<EquipmentListItem>>,
    pub requirements: Signal<Vec<RequirementWithSite>>,
    pub templates: Signal<Vec<TaskTemplateWithRequirement>>,
    /// Templates offered for the first task of new equipment at the
    /// filtered site.
    pub site_templates: Signal<Vec<TaskTemplateOption>>,
    pub tasks: Signal<Vec<ViewRow>>,
    pub users: Signal<Vec<User>>,
    pub regulation_names: Signal<Vec<String>>,
    pub selected_site: Signal<Option<String>>,
    pub dashboard: Signal<Option<SiteDashboard>>,
    pub selected_equipment: Signal<Option<String>>,
    pub equipment_detail: Signal<Option<EquipmentDetail>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: use_signal(|| Tab::Sites),
            site_filter: use_signal(|| None::<String>),
            assignee_filter: use_signal(|| None::<String>),
            status_filter: use_signal(|| None::<String>),
            status: use_signal(|| "Ready".to_string()),
            reload: use_signal(|| 0_u64),
            table: use_signal(TableState::new),
            detail_table: use_signal(TableState::new),
            sites: use_signal(Vec::<Site>::new),
            equipment: use_signal(Vec::<EquipmentListItem>::new),
            requirements: use_signal(Vec::<RequirementWithSite>::new),
            templates: use_signal(Vec::<TaskTemplateWithRequirement>::new),
            site_templates: use_signal(Vec::<TaskTemplateOption>::new),
            tasks: use_signal(Vec::<ViewRow>::new),
            users: use_signal(Vec::<User>::new),
            regulation_names: use_signal(Vec::<String>::new),
            selected_site: use_signal(|| None::<String>),
            dashboard: use_signal(|| None::<SiteDashboard>),
            selected_equipment: use_signal(|| None::<String>),
            equipment_detail: use_signal(|| None::<EquipmentDetail>),
        }
    }

    /// Switches tab and drops the transient table state of the previous one.
    pub fn open_tab(&mut self, tab: Tab) {
        self.active_tab.set(tab);
        self.table.set(TableState::new());
        self.detail_table.set(TableState::new());
        self.assignee_filter.set(None);
        self.status_filter.set(None);
        self.selected_site.set(None);
        self.dashboard.set(None);
        self.selected_equipment.set(None);
        self.equipment_detail.set(None);
    }

    /// Marks cached lists stale so the loader effect fetches them again.
    pub fn invalidate(&mut self) {
        let next = *self.reload.peek() + 1;
        self.reload.set(next);
    }
}
