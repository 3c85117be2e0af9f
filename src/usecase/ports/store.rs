use crate::domain::entities::records::{
    Equipment, EquipmentListItem, EquipmentPatch, NewEquipment, NewRequirement, NewSite, NewTask,
    NewTaskTemplate, NewUser, Requirement, RequirementPatch, RequirementWithSite, Site, Task,
    TaskTemplate, TaskTemplatePatch, TaskTemplateWithRequirement, TaskUpdate, User,
};
use crate::domain::entities::view::ViewRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(String),
    Invalid(String),
    Message(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(what) => write!(f, "{what} not found"),
            StoreError::Invalid(message) => write!(f, "invalid input: {message}"),
            StoreError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Equality filters on the join view; all set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub site_id: Option<String>,
    pub equipment_id: Option<String>,
    pub task_status: Option<String>,
    pub assigned_to_user_id: Option<String>,
}

pub trait DataStore: Send + Sync {
    fn init(&self) -> Result<(), StoreError>;

    fn list_sites(&self) -> Result<Vec<Site>, StoreError>;
    fn get_site(&self, id: &str) -> Result<Site, StoreError>;
    fn create_site(&self, input: NewSite) -> Result<Site, StoreError>;

    fn list_equipment(&self, site_id: Option<&str>) -> Result<Vec<EquipmentListItem>, StoreError>;
    fn get_equipment(&self, id: &str) -> Result<Equipment, StoreError>;
    fn create_equipment(&self, input: NewEquipment) -> Result<Equipment, StoreError>;
    fn update_equipment(&self, id: &str, patch: EquipmentPatch) -> Result<Equipment, StoreError>;

    fn list_requirements(&self) -> Result<Vec<RequirementWithSite>, StoreError>;
    fn create_requirement(&self, input: NewRequirement) -> Result<Requirement, StoreError>;
    fn update_requirement(
        &self,
        id: &str,
        patch: RequirementPatch,
    ) -> Result<Requirement, StoreError>;
    fn delete_requirement(&self, id: &str) -> Result<(), StoreError>;

    fn list_task_templates(&self) -> Result<Vec<TaskTemplateWithRequirement>, StoreError>;
    fn create_task_template(&self, input: NewTaskTemplate) -> Result<TaskTemplate, StoreError>;
    fn update_task_template(
        &self,
        id: &str,
        patch: TaskTemplatePatch,
    ) -> Result<TaskTemplate, StoreError>;
    fn delete_task_template(&self, id: &str) -> Result<(), StoreError>;

    fn ensure_equipment_requirement(
        &self,
        equipment_id: &str,
        requirement_id: &str,
    ) -> Result<(), StoreError>;

    fn get_task(&self, id: &str) -> Result<Task, StoreError>;
    fn create_task(&self, input: NewTask) -> Result<Task, StoreError>;
    fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Task, StoreError>;

    fn list_users(&self, site_id: Option<&str>) -> Result<Vec<User>, StoreError>;
    fn create_user(&self, input: NewUser) -> Result<User, StoreError>;

    fn view_rows(&self, filter: &ViewFilter) -> Result<Vec<ViewRow>, StoreError>;
}
