#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Open,
    Assigned,
    Pending,
    Submitted,
    Closed,
    Approved,
    Rejected,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 7] = [
        TaskStatus::Open,
        TaskStatus::Assigned,
        TaskStatus::Pending,
        TaskStatus::Submitted,
        TaskStatus::Closed,
        TaskStatus::Approved,
        TaskStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Assigned => "assigned",
            TaskStatus::Pending => "pending",
            TaskStatus::Submitted => "submitted",
            TaskStatus::Closed => "closed",
            TaskStatus::Approved => "approved",
            TaskStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Statuses listed on the open task board.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            TaskStatus::Open | TaskStatus::Assigned | TaskStatus::Pending | TaskStatus::Submitted
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskStatus::Closed | TaskStatus::Approved | TaskStatus::Rejected
        )
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub client_name: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    pub id: String,
    pub asset_tag: String,
    pub description: String,
    pub equipment_site_id: String,
    pub sap_equipment_number: Option<String>,
    pub functional_loc: Option<String>,
    pub location_description: Option<String>,
    pub equipment_type: Option<String>,
    pub equipment_subtype: Option<String>,
    pub process_unit: Option<String>,
    pub area_location: Option<String>,
    pub regulation_name: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub id: String,
    pub citation: String,
    pub regulation_name: Option<String>,
    pub requirement_summary: String,
    pub requirement_text: Option<String>,
    pub site_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTemplate {
    pub id: String,
    pub requirement_id: String,
    pub task_name: String,
    pub task_description: String,
    pub frequency: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub task_template_id: String,
    pub equipment_id: String,
    pub due_date: String,
    pub status: TaskStatus,
    pub assigned_to_user_id: Option<String>,
    pub submitted_at: Option<String>,
    pub approved_by_user_id: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub site_id: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
    pub name: String,
    pub client_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEquipment {
    pub asset_tag: String,
    pub description: String,
    pub equipment_site_id: String,
    pub sap_equipment_number: Option<String>,
    pub functional_loc: Option<String>,
    pub location_description: Option<String>,
    pub equipment_type: Option<String>,
    pub equipment_subtype: Option<String>,
    pub process_unit: Option<String>,
    pub area_location: Option<String>,
    pub regulation_name: Option<String>,
}

/// Partial equipment update. `None` leaves a field untouched; a blank string
/// clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentPatch {
    pub asset_tag: Option<String>,
    pub description: Option<String>,
    pub sap_equipment_number: Option<String>,
    pub functional_loc: Option<String>,
    pub location_description: Option<String>,
    pub equipment_type: Option<String>,
    pub equipment_subtype: Option<String>,
    pub process_unit: Option<String>,
    pub area_location: Option<String>,
    pub regulation_name: Option<String>,
    pub is_active: Option<bool>,
}

impl EquipmentPatch {
    pub fn is_empty(&self) -> bool {
        self == &EquipmentPatch::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRequirement {
    pub citation: String,
    pub regulation_name: Option<String>,
    pub requirement_summary: String,
    pub requirement_text: Option<String>,
    pub site_id: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementPatch {
    pub citation: Option<String>,
    pub regulation_name: Option<String>,
    pub requirement_summary: Option<String>,
    pub requirement_text: Option<String>,
    pub site_id: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskTemplate {
    pub requirement_id: String,
    pub task_name: String,
    pub task_description: String,
    pub frequency: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTemplatePatch {
    pub requirement_id: Option<String>,
    pub task_name: Option<String>,
    pub task_description: Option<String>,
    pub frequency: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub task_template_id: String,
    pub requirement_id: String,
    pub equipment_id: String,
    pub due_date: String,
    pub status: Option<TaskStatus>,
    pub assigned_to_user_id: Option<String>,
}

/// Optional open task created together with new equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstTask {
    pub task_template_id: String,
    pub requirement_id: String,
    pub due_date: String,
}

/// Status change for a task. `assigned_to_user_id: Some(None)` unassigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    pub status: TaskStatus,
    pub rejection_reason: Option<String>,
    pub assigned_to_user_id: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub site_id: Option<String>,
}

/// Equipment row for list views, with the citations of its mapped
/// requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentListItem {
    pub equipment_id: String,
    pub asset_tag: String,
    pub equipment_description: String,
    pub equipment_site_id: String,
    pub equipment_type: Option<String>,
    pub process_unit: Option<String>,
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementWithSite {
    pub requirement: Requirement,
    pub site_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTemplateWithRequirement {
    pub template: TaskTemplate,
    pub citation: String,
    pub requirement_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTemplateOption {
    pub id: String,
    pub task_name: String,
    pub requirement_id: String,
    pub citation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_parses_case_insensitively() {
        assert_eq!(TaskStatus::parse(" Assigned "), Some(TaskStatus::Assigned));
        assert_eq!(TaskStatus::parse("unknown"), None);
    }

    #[test]
    fn open_and_terminal_statuses_do_not_overlap() {
        for status in TaskStatus::ALL {
            assert_ne!(status.is_open(), status.is_terminal(), "{status}");
        }
    }

    #[test]
    fn empty_equipment_patch_is_detected() {
        assert!(EquipmentPatch::default().is_empty());
        assert!(!EquipmentPatch {
            is_active: Some(false),
            ..EquipmentPatch::default()
        }
        .is_empty());
    }
}
