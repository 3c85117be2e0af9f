use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::records::{
    Equipment, EquipmentListItem, RequirementWithSite, Site, TaskTemplateOption,
    TaskTemplateWithRequirement, User,
};
use crate::domain::entities::view::{
    equipment_summaries, open_task_count, open_tasks, requirement_groups, EquipmentSummary,
    RequirementGroup, ViewRow,
};
use crate::usecase::ports::store::{DataStore, StoreError, ViewFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteDashboard {
    pub site: Site,
    pub equipment: Vec<EquipmentSummary>,
    pub open_task_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentDetail {
    pub equipment: Equipment,
    pub requirements: Vec<RequirementGroup>,
    pub task_templates: Vec<TaskTemplateOption>,
}

pub struct QueryService {
    store: Arc<dyn DataStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub fn list_sites(&self) -> Result<Vec<Site>, StoreError> {
        self.store.list_sites()
    }

    pub fn site_dashboard(&self, site_id: &str) -> Result<SiteDashboard, StoreError> {
        let site = self.store.get_site(site_id)?;
        let equipment = self.equipment_for_site(site_id)?;
        let rows = self.store.view_rows(&ViewFilter {
            site_id: Some(site_id.to_string()),
            ..ViewFilter::default()
        })?;

        Ok(SiteDashboard {
            site,
            equipment,
            open_task_count: open_task_count(&rows),
        })
    }

    /// Equipment of a site summarised from the join view, enriched with
    /// type and process unit from the equipment table. Falls back to the
    /// equipment table alone when the view fails or has no rows.
    pub fn equipment_for_site(&self, site_id: &str) -> Result<Vec<EquipmentSummary>, StoreError> {
        let filter = ViewFilter {
            site_id: Some(site_id.to_string()),
            ..ViewFilter::default()
        };
        let rows = match self.store.view_rows(&filter) {
            Ok(rows) => rows,
            Err(err) => {
                log::warn!("view failed for site #{site_id}, using equipment table: {err}");
                Vec::new()
            }
        };

        let listed = self.store.list_equipment(Some(site_id))?;
        let mut summaries = equipment_summaries(&rows);
        if summaries.is_empty() {
            return Ok(listed.into_iter().map(summary_from_listing).collect());
        }

        for summary in &mut summaries {
            let Some(item) = listed
                .iter()
                .find(|item| item.equipment_id == summary.equipment_id)
            else {
                continue;
            };
            summary.equipment_type = item.equipment_type.clone();
            summary.process_unit = item.process_unit.clone();
            if !item.requirements.is_empty() {
                summary.requirements = item.requirements.clone();
            }
        }
        Ok(summaries)
    }

    pub fn list_equipment(&self, site_id: Option<&str>) -> Result<Vec<EquipmentListItem>, StoreError> {
        self.store.list_equipment(site_id)
    }

    pub fn equipment_detail(&self, equipment_id: &str) -> Result<EquipmentDetail, StoreError> {
        let equipment = self.store.get_equipment(equipment_id)?;
        let rows = self
            .store
            .view_rows(&ViewFilter {
                equipment_id: Some(equipment_id.to_string()),
                ..ViewFilter::default()
            })
            .unwrap_or_else(|err| {
                log::warn!("view failed for equipment #{equipment_id}: {err}");
                Vec::new()
            });
        let task_templates = self.task_templates_for_site(&equipment.equipment_site_id)?;

        Ok(EquipmentDetail {
            equipment,
            requirements: requirement_groups(&rows),
            task_templates,
        })
    }

    /// Active templates whose requirement is active and belongs to the site,
    /// ordered by task name.
    pub fn task_templates_for_site(
        &self,
        site_id: &str,
    ) -> Result<Vec<TaskTemplateOption>, StoreError> {
        let requirement_ids: BTreeSet<String> = self
            .store
            .list_requirements()?
            .into_iter()
            .filter(|entry| entry.requirement.site_id == site_id && entry.requirement.is_active)
            .map(|entry| entry.requirement.id)
            .collect();
        if requirement_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut options: Vec<TaskTemplateOption> = self
            .store
            .list_task_templates()?
            .into_iter()
            .filter(|entry| {
                entry.template.active && requirement_ids.contains(&entry.template.requirement_id)
            })
            .map(|entry| TaskTemplateOption {
                id: entry.template.id,
                task_name: entry.template.task_name,
                requirement_id: entry.template.requirement_id,
                citation: entry.citation,
            })
            .collect();
        options.sort_by(|a, b| a.task_name.cmp(&b.task_name));
        Ok(options)
    }

    /// Open tasks from the join view, one row per task.
    pub fn open_tasks(&self, filter: &ViewFilter) -> Result<Vec<ViewRow>, StoreError> {
        let rows = self.store.view_rows(filter)?;
        Ok(open_tasks(&rows))
    }

    pub fn list_users(&self, site_id: Option<&str>) -> Result<Vec<User>, StoreError> {
        self.store.list_users(site_id)
    }

    pub fn list_requirements(&self) -> Result<Vec<RequirementWithSite>, StoreError> {
        self.store.list_requirements()
    }

    pub fn list_task_templates(&self) -> Result<Vec<TaskTemplateWithRequirement>, StoreError> {
        self.store.list_task_templates()
    }

    /// Distinct, trimmed, sorted regulation names across requirements.
    pub fn regulation_names(&self) -> Result<Vec<String>, StoreError> {
        let names: BTreeSet<String> = self
            .store
            .list_requirements()?
            .into_iter()
            .filter_map(|entry| entry.requirement.regulation_name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Ok(names.into_iter().collect())
    }
}

fn summary_from_listing(item: EquipmentListItem) -> EquipmentSummary {
    EquipmentSummary {
        equipment_id: item.equipment_id,
        asset_tag: item.asset_tag,
        equipment_description: item.equipment_description,
        equipment_type: item.equipment_type,
        process_unit: item.process_unit,
        requirements: item.requirements,
        open_task_count: 0,
    }
}
