//! Backend wire shapes: the response envelope, records, and request bodies.

use serde::{Deserialize, Serialize};

use crate::status::PhaseStatus;
use crate::types::{PhaseId, ProjectId, TaskId};

// ── Envelope ──

/// Uniform response wrapper. Services only look at `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_status")]
    pub status: String,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

fn default_status() -> String {
    "success".to_string()
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Successful response with a null payload.
    pub fn empty() -> Self {
        Self {
            status: "success".to_string(),
            data: None,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

// ── Records ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord {
    pub id: PhaseId,
    pub phase_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub order_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: TaskId,
    pub task_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
    #[serde(default)]
    pub due_date: Option<String>,
    pub order_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<PhaseId>,
}

/// `{id, title}` reference as embedded in search hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefRecord {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProjectRecord {
    pub id: ProjectId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPhaseRecord {
    pub id: PhaseId,
    pub title: String,
    pub project: RefRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchTaskRecord {
    pub id: TaskId,
    pub title: String,
    pub project: RefRecord,
    pub phase: RefRecord,
}

/// Grouped search hits. A category the backend omits is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRecords {
    #[serde(default)]
    pub projects: Vec<SearchProjectRecord>,
    #[serde(default)]
    pub phases: Vec<SearchPhaseRecord>,
    #[serde(default)]
    pub tasks: Vec<SearchTaskRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub message: String,
}

// ── Request bodies ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhaseRequest {
    pub phase_name: String,
    pub description: String,
    pub order_index: i32,
    pub status: PhaseStatus,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub project_id: ProjectId,
}

/// Partial update; fields left as `None` are omitted from the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhaseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    pub project_id: ProjectId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePhaseRequest {
    pub new_position: i32,
}
