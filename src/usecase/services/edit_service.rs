use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::records::{
    Equipment, EquipmentPatch, FirstTask, NewEquipment, NewRequirement, NewSite, NewTask, NewTaskTemplate,
    NewUser, Requirement, RequirementPatch, Site, Task, TaskStatus, TaskTemplate,
    TaskTemplatePatch, TaskUpdate, User,
};
use crate::usecase::ports::store::{DataStore, StoreError};

fn required(field: &str, value: &str) -> Result<String, StoreError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(StoreError::Invalid(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Trims a patch field while keeping "present but blank" distinct from
/// "absent".
fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string())
}

fn required_patch(field: &str, value: Option<String>) -> Result<Option<String>, StoreError> {
    value.map(|value| required(field, &value)).transpose()
}

fn due_date(value: &str) -> Result<String, StoreError> {
    let value = required("due date", value)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| StoreError::Invalid(format!("due date must be YYYY-MM-DD, got {value}")))?;
    Ok(value)
}

pub struct EditService {
    store: Arc<dyn DataStore>,
}

impl EditService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub fn create_site(&self, input: NewSite) -> Result<Site, StoreError> {
        let site = self.store.create_site(NewSite {
            name: required("site name", &input.name)?,
            client_name: required("client name", &input.client_name)?,
        })?;
        log::info!("created site {} ({})", site.name, site.id);
        Ok(site)
    }

    pub fn create_user(&self, input: NewUser) -> Result<User, StoreError> {
        let email = required("email", &input.email)?;
        if !email.contains('@') {
            return Err(StoreError::Invalid(format!("email looks invalid: {email}")));
        }
        let user = self.store.create_user(NewUser {
            name: required("name", &input.name)?,
            email,
            role: required("role", &input.role)?,
            site_id: optional(input.site_id),
        })?;
        log::info!("created user {} ({})", user.email, user.id);
        Ok(user)
    }

    pub fn create_equipment(&self, input: NewEquipment) -> Result<Equipment, StoreError> {
        let equipment = self.store.create_equipment(NewEquipment {
            asset_tag: required("asset tag", &input.asset_tag)?,
            description: input.description.trim().to_string(),
            equipment_site_id: required("site", &input.equipment_site_id)?,
            sap_equipment_number: optional(input.sap_equipment_number),
            functional_loc: optional(input.functional_loc),
            location_description: optional(input.location_description),
            equipment_type: optional(input.equipment_type),
            equipment_subtype: optional(input.equipment_subtype),
            process_unit: optional(input.process_unit),
            area_location: optional(input.area_location),
            regulation_name: optional(input.regulation_name),
        })?;
        log::info!("created equipment {} ({})", equipment.asset_tag, equipment.id);
        Ok(equipment)
    }

    /// Creates equipment and, when a template is picked, its first open task.
    /// The due date is checked before anything is written.
    pub fn create_equipment_with_task(
        &self,
        input: NewEquipment,
        first_task: Option<FirstTask>,
    ) -> Result<(Equipment, Option<Task>), StoreError> {
        let first_task = match first_task {
            Some(task) => {
                if task.due_date.trim().is_empty() {
                    return Err(StoreError::Invalid(
                        "due date is required when assigning a task".to_string(),
                    ));
                }
                Some(FirstTask {
                    task_template_id: required("task template", &task.task_template_id)?,
                    requirement_id: required("requirement", &task.requirement_id)?,
                    due_date: due_date(&task.due_date)?,
                })
            }
            None => None,
        };

        let equipment = self.create_equipment(input)?;
        let task = match first_task {
            Some(task) => Some(self.create_task(NewTask {
                task_template_id: task.task_template_id,
                requirement_id: task.requirement_id,
                equipment_id: equipment.id.clone(),
                due_date: task.due_date,
                status: Some(TaskStatus::Open),
                assigned_to_user_id: None,
            })?),
            None => None,
        };
        Ok((equipment, task))
    }

    pub fn update_equipment(
        &self,
        equipment_id: &str,
        patch: EquipmentPatch,
    ) -> Result<Equipment, StoreError> {
        if patch.is_empty() {
            return self.store.get_equipment(equipment_id);
        }
        let patch = EquipmentPatch {
            asset_tag: required_patch("asset tag", patch.asset_tag)?,
            description: trimmed(patch.description),
            sap_equipment_number: trimmed(patch.sap_equipment_number),
            functional_loc: trimmed(patch.functional_loc),
            location_description: trimmed(patch.location_description),
            equipment_type: trimmed(patch.equipment_type),
            equipment_subtype: trimmed(patch.equipment_subtype),
            process_unit: trimmed(patch.process_unit),
            area_location: trimmed(patch.area_location),
            regulation_name: trimmed(patch.regulation_name),
            is_active: patch.is_active,
        };
        let equipment = self.store.update_equipment(equipment_id, patch)?;
        log::info!("updated equipment {}", equipment.id);
        Ok(equipment)
    }

    pub fn create_requirement(&self, input: NewRequirement) -> Result<Requirement, StoreError> {
        let requirement = self.store.create_requirement(NewRequirement {
            citation: required("citation", &input.citation)?,
            regulation_name: optional(input.regulation_name),
            requirement_summary: required("requirement summary", &input.requirement_summary)?,
            requirement_text: optional(input.requirement_text),
            site_id: required("site", &input.site_id)?,
            is_active: input.is_active,
        })?;
        log::info!("created requirement {} ({})", requirement.citation, requirement.id);
        Ok(requirement)
    }

    pub fn update_requirement(
        &self,
        requirement_id: &str,
        patch: RequirementPatch,
    ) -> Result<Requirement, StoreError> {
        let patch = RequirementPatch {
            citation: required_patch("citation", patch.citation)?,
            regulation_name: trimmed(patch.regulation_name),
            requirement_summary: required_patch("requirement summary", patch.requirement_summary)?,
            requirement_text: trimmed(patch.requirement_text),
            site_id: required_patch("site", patch.site_id)?,
            is_active: patch.is_active,
        };
        let requirement = self.store.update_requirement(requirement_id, patch)?;
        log::info!("updated requirement {}", requirement.id);
        Ok(requirement)
    }

    pub fn delete_requirement(&self, requirement_id: &str) -> Result<(), StoreError> {
        self.store.delete_requirement(requirement_id)?;
        log::info!("deleted requirement {requirement_id}");
        Ok(())
    }

    pub fn create_task_template(&self, input: NewTaskTemplate) -> Result<TaskTemplate, StoreError> {
        let template = self.store.create_task_template(NewTaskTemplate {
            requirement_id: required("requirement", &input.requirement_id)?,
            task_name: required("task name", &input.task_name)?,
            task_description: input.task_description.trim().to_string(),
            frequency: required("frequency", &input.frequency)?,
            active: input.active,
        })?;
        log::info!("created task template {} ({})", template.task_name, template.id);
        Ok(template)
    }

    pub fn update_task_template(
        &self,
        template_id: &str,
        patch: TaskTemplatePatch,
    ) -> Result<TaskTemplate, StoreError> {
        let patch = TaskTemplatePatch {
            requirement_id: required_patch("requirement", patch.requirement_id)?,
            task_name: required_patch("task name", patch.task_name)?,
            task_description: trimmed(patch.task_description),
            frequency: required_patch("frequency", patch.frequency)?,
            active: patch.active,
        };
        let template = self.store.update_task_template(template_id, patch)?;
        log::info!("updated task template {}", template.id);
        Ok(template)
    }

    pub fn delete_task_template(&self, template_id: &str) -> Result<(), StoreError> {
        self.store.delete_task_template(template_id)?;
        log::info!("deleted task template {template_id}");
        Ok(())
    }

    /// Creates a task, first mapping its requirement to the equipment so the
    /// task shows up in the join view.
    pub fn create_task(&self, input: NewTask) -> Result<Task, StoreError> {
        let input = NewTask {
            task_template_id: required("task template", &input.task_template_id)?,
            requirement_id: required("requirement", &input.requirement_id)?,
            equipment_id: required("equipment", &input.equipment_id)?,
            due_date: due_date(&input.due_date)?,
            status: Some(input.status.unwrap_or(TaskStatus::Open)),
            assigned_to_user_id: optional(input.assigned_to_user_id),
        };
        self.store
            .ensure_equipment_requirement(&input.equipment_id, &input.requirement_id)?;
        let task = self.store.create_task(input)?;
        log::info!("created task {} due {}", task.id, task.due_date);
        Ok(task)
    }

    /// Assigns a task to a user, or reopens it when `user_id` is `None`.
    pub fn assign_task(&self, task_id: &str, user_id: Option<String>) -> Result<Task, StoreError> {
        let user_id = optional(user_id);
        let status = if user_id.is_some() {
            TaskStatus::Assigned
        } else {
            TaskStatus::Open
        };
        let task = self.store.update_task(
            task_id,
            TaskUpdate {
                status,
                rejection_reason: None,
                assigned_to_user_id: Some(user_id),
            },
        )?;
        log::info!("task {} is now {}", task.id, task.status);
        Ok(task)
    }

    pub fn update_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
        rejection_reason: Option<String>,
    ) -> Result<Task, StoreError> {
        let task = self.store.update_task(
            task_id,
            TaskUpdate {
                status,
                rejection_reason: optional(rejection_reason),
                assigned_to_user_id: None,
            },
        )?;
        log::info!("task {} is now {}", task.id, task.status);
        Ok(task)
    }
}
