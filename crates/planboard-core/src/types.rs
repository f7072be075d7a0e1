use serde::{Deserialize, Serialize};

use crate::status::{TaskStatus, UnrecognizedEnumValue};
use crate::wire::{PhaseRecord, TaskRecord};

pub type ProjectId = i64;
pub type PhaseId = i64;
pub type TaskId = i64;

/// Static background palette for project cards. Search results always get
/// the first entry.
pub const BACKGROUND_PALETTE: &[&str] = &[
    "/backgrounds/aurora.jpg",
    "/backgrounds/dunes.jpg",
    "/backgrounds/forest.jpg",
    "/backgrounds/harbor.jpg",
    "/backgrounds/meadow.jpg",
    "/backgrounds/summit.jpg",
];

/// Background assigned to every project in a search result set.
pub fn default_background() -> &'static str {
    BACKGROUND_PALETTE[0]
}

// ── Projects ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub title: String,
    pub background_asset: String,
}

// ── Phases & tasks ──

/// A phase with its task previews inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSummary {
    pub id: PhaseId,
    pub title: String,
    /// Ordering key within the project, taken from the backend as-is.
    pub position: i32,
    pub description: String,
    pub task_previews: Vec<TaskPreview>,
}

impl PhaseSummary {
    pub fn from_record(record: PhaseRecord, task_previews: Vec<TaskPreview>) -> Self {
        Self {
            id: record.id,
            title: record.phase_name,
            position: record.order_index,
            description: record.description.unwrap_or_default(),
            task_previews,
        }
    }
}

/// Member chip shown on a task card. Always empty on the phase listing path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMember {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPreview {
    pub id: TaskId,
    pub title: String,
    /// Ordering key within the phase, taken from the backend as-is.
    pub position: i32,
    pub status: TaskStatus,
    pub due_date: Option<String>,
    pub has_description: bool,
    pub task_members: Vec<TaskMember>,
}

impl TaskPreview {
    pub fn from_record(record: TaskRecord) -> Result<Self, UnrecognizedEnumValue> {
        let status = TaskStatus::convert(&record.status)?;
        let has_description = record
            .description
            .as_deref()
            .is_some_and(|d| !d.is_empty());
        Ok(Self {
            id: record.id,
            title: record.task_name,
            position: record.order_index,
            status,
            due_date: record.due_date,
            has_description,
            task_members: Vec::new(),
        })
    }
}

// ── Search ──

/// Minimal `{id, title}` pointer to a parent entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseLink {
    pub id: PhaseId,
    pub title: String,
    pub project: EntityRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLink {
    pub id: TaskId,
    pub title: String,
    pub project: EntityRef,
    pub phase: EntityRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub projects: Vec<ProjectSummary>,
    pub phases: Vec<PhaseLink>,
    pub tasks: Vec<TaskLink>,
}

impl SearchResultSet {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.phases.is_empty() && self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.projects.len() + self.phases.len() + self.tasks.len()
    }
}

// ── Markers ──

/// Acknowledgement for operations that return no entity (delete, move).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Success {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(description: Option<&str>) -> TaskRecord {
        TaskRecord {
            id: 11,
            task_name: "Wireframes".into(),
            description: description.map(str::to_string),
            status: "IN_PROGRESS".into(),
            due_date: Some("2026-03-01".into()),
            order_index: 4,
            phase_id: Some(2),
        }
    }

    #[test]
    fn task_preview_maps_fields() {
        let preview = TaskPreview::from_record(task(Some("details"))).unwrap();
        assert_eq!(preview.id, 11);
        assert_eq!(preview.title, "Wireframes");
        assert_eq!(preview.position, 4);
        assert_eq!(preview.status, TaskStatus::InProgress);
        assert_eq!(preview.due_date.as_deref(), Some("2026-03-01"));
        assert!(preview.has_description);
        assert!(preview.task_members.is_empty());
    }

    #[test]
    fn empty_or_missing_description_is_not_a_description() {
        assert!(!TaskPreview::from_record(task(Some(""))).unwrap().has_description);
        assert!(!TaskPreview::from_record(task(None)).unwrap().has_description);
    }

    #[test]
    fn task_preview_rejects_unknown_status() {
        let mut rec = task(None);
        rec.status = "ARCHIVED".into();
        assert!(TaskPreview::from_record(rec).is_err());
    }

    #[test]
    fn phase_summary_renames_fields() {
        let rec = PhaseRecord {
            id: 2,
            phase_name: "Design".into(),
            description: None,
            order_index: 1,
            status: None,
            start_date: None,
            end_date: None,
            project_id: Some(1),
        };
        let summary = PhaseSummary::from_record(rec, Vec::new());
        assert_eq!(summary.title, "Design");
        assert_eq!(summary.position, 1);
        assert_eq!(summary.description, "");
        assert!(summary.task_previews.is_empty());
    }

    #[test]
    fn view_models_serialize_camel_case() {
        let preview = TaskPreview::from_record(task(None)).unwrap();
        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["hasDescription"], false);
        assert_eq!(json["dueDate"], "2026-03-01");
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["taskMembers"], serde_json::json!([]));

        let project = ProjectSummary {
            id: 1,
            title: "Foo".into(),
            background_asset: default_background().into(),
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["backgroundAsset"], BACKGROUND_PALETTE[0]);
    }

    #[test]
    fn default_result_set_is_empty() {
        let set = SearchResultSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            serde_json::json!({"projects": [], "phases": [], "tasks": []})
        );
    }
}
