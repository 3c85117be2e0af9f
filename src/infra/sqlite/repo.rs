use std::path::PathBuf;

use crate::domain::entities::records::{
    Equipment, EquipmentListItem, EquipmentPatch, NewEquipment, NewRequirement, NewSite, NewTask,
    NewTaskTemplate, NewUser, Requirement, RequirementPatch, RequirementWithSite, Site, Task,
    TaskTemplate, TaskTemplatePatch, TaskTemplateWithRequirement, TaskUpdate, User,
};
use crate::domain::entities::view::ViewRow;
use crate::infra::sqlite::queries;
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::store::{DataStore, StoreError, ViewFilter};

pub struct SqliteStore {
    pub db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

fn store_error(err: anyhow::Error) -> StoreError {
    log::error!("data store failure: {err:#}");
    StoreError::Message(format!("{err:#}"))
}

fn found<T>(value: Option<T>, what: &str, id: &str) -> Result<T, StoreError> {
    value.ok_or_else(|| StoreError::NotFound(format!("{what} #{id}")))
}

impl DataStore for SqliteStore {
    fn init(&self) -> Result<(), StoreError> {
        init_db(&self.db_path).map_err(store_error)
    }

    fn list_sites(&self) -> Result<Vec<Site>, StoreError> {
        queries::list_sites(&self.db_path).map_err(store_error)
    }

    fn get_site(&self, id: &str) -> Result<Site, StoreError> {
        let site = queries::get_site(&self.db_path, id).map_err(store_error)?;
        found(site, "site", id)
    }

    fn create_site(&self, input: NewSite) -> Result<Site, StoreError> {
        queries::create_site(&self.db_path, &input).map_err(store_error)
    }

    fn list_equipment(&self, site_id: Option<&str>) -> Result<Vec<EquipmentListItem>, StoreError> {
        queries::list_equipment(&self.db_path, site_id).map_err(store_error)
    }

    fn get_equipment(&self, id: &str) -> Result<Equipment, StoreError> {
        let equipment = queries::get_equipment(&self.db_path, id).map_err(store_error)?;
        found(equipment, "equipment", id)
    }

    fn create_equipment(&self, input: NewEquipment) -> Result<Equipment, StoreError> {
        let id = queries::create_equipment(&self.db_path, &input).map_err(store_error)?;
        self.get_equipment(&id)
    }

    fn update_equipment(&self, id: &str, patch: EquipmentPatch) -> Result<Equipment, StoreError> {
        queries::update_equipment(&self.db_path, id, &patch).map_err(store_error)?;
        self.get_equipment(id)
    }

    fn list_requirements(&self) -> Result<Vec<RequirementWithSite>, StoreError> {
        queries::list_requirements(&self.db_path).map_err(store_error)
    }

    fn create_requirement(&self, input: NewRequirement) -> Result<Requirement, StoreError> {
        let id = queries::create_requirement(&self.db_path, &input).map_err(store_error)?;
        let requirement = queries::get_requirement(&self.db_path, &id).map_err(store_error)?;
        found(requirement, "requirement", &id)
    }

    fn update_requirement(
        &self,
        id: &str,
        patch: RequirementPatch,
    ) -> Result<Requirement, StoreError> {
        queries::update_requirement(&self.db_path, id, &patch).map_err(store_error)?;
        let requirement = queries::get_requirement(&self.db_path, id).map_err(store_error)?;
        found(requirement, "requirement", id)
    }

    fn delete_requirement(&self, id: &str) -> Result<(), StoreError> {
        queries::delete_requirement(&self.db_path, id).map_err(store_error)?;
        Ok(())
    }

    fn list_task_templates(&self) -> Result<Vec<TaskTemplateWithRequirement>, StoreError> {
        queries::list_task_templates(&self.db_path).map_err(store_error)
    }

    fn create_task_template(&self, input: NewTaskTemplate) -> Result<TaskTemplate, StoreError> {
        let id = queries::create_task_template(&self.db_path, &input).map_err(store_error)?;
        let template = queries::get_task_template(&self.db_path, &id).map_err(store_error)?;
        found(template, "task template", &id)
    }

    fn update_task_template(
        &self,
        id: &str,
        patch: TaskTemplatePatch,
    ) -> Result<TaskTemplate, StoreError> {
        queries::update_task_template(&self.db_path, id, &patch).map_err(store_error)?;
        let template = queries::get_task_template(&self.db_path, id).map_err(store_error)?;
        found(template, "task template", id)
    }

    fn delete_task_template(&self, id: &str) -> Result<(), StoreError> {
        queries::delete_task_template(&self.db_path, id).map_err(store_error)?;
        Ok(())
    }

    fn ensure_equipment_requirement(
        &self,
        equipment_id: &str,
        requirement_id: &str,
    ) -> Result<(), StoreError> {
        let inserted =
            queries::ensure_equipment_requirement(&self.db_path, equipment_id, requirement_id)
                .map_err(store_error)?;
        if inserted {
            log::info!("mapped requirement #{requirement_id} to equipment #{equipment_id}");
        }
        Ok(())
    }

    fn get_task(&self, id: &str) -> Result<Task, StoreError> {
        let task = queries::get_task(&self.db_path, id).map_err(store_error)?;
        found(task, "task", id)
    }

    fn create_task(&self, input: NewTask) -> Result<Task, StoreError> {
        let id = queries::create_task(&self.db_path, &input).map_err(store_error)?;
        self.get_task(&id)
    }

    fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Task, StoreError> {
        queries::update_task(&self.db_path, id, &update).map_err(store_error)?;
        self.get_task(id)
    }

    fn list_users(&self, site_id: Option<&str>) -> Result<Vec<User>, StoreError> {
        queries::list_users(&self.db_path, site_id).map_err(store_error)
    }

    fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        queries::create_user(&self.db_path, &input).map_err(store_error)
    }

    fn view_rows(&self, filter: &ViewFilter) -> Result<Vec<ViewRow>, StoreError> {
        queries::view_rows(&self.db_path, filter).map_err(store_error)
    }
}
