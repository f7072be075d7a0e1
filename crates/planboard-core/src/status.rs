//! Backend enum literals → internal status values.
//!
//! Conversion is strict: a literal outside the declared backend domain is an
//! `UnrecognizedEnumValue` error, never a silent fallback. Matching is exact
//! (case-sensitive, no trimming).

use serde::{Deserialize, Serialize};

/// A backend enum literal that is not part of the declared domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} value: {value:?}")]
pub struct UnrecognizedEnumValue {
    pub kind: &'static str,
    pub value: String,
}

// ── Task status ──

/// Task status as the presentation layer sees it. Serializes as the UI code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    OnHold,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
        TaskStatus::OnHold,
    ];

    /// Map a backend task status literal to its internal value.
    pub fn convert(backend: &str) -> Result<Self, UnrecognizedEnumValue> {
        match backend {
            "NOT_STARTED" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Done),
            "ON_HOLD" => Ok(TaskStatus::OnHold),
            other => Err(UnrecognizedEnumValue {
                kind: "task status",
                value: other.to_string(),
            }),
        }
    }

    /// The literal the backend uses for this status.
    pub fn backend_literal(self) -> &'static str {
        match self {
            TaskStatus::Todo => "NOT_STARTED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "COMPLETED",
            TaskStatus::OnHold => "ON_HOLD",
        }
    }

    /// UI status code.
    pub fn as_code(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
            TaskStatus::OnHold => "on-hold",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

// ── Phase status ──

/// Phase status submitted when creating a phase. Serializes as the backend literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl PhaseStatus {
    pub fn convert(backend: &str) -> Result<Self, UnrecognizedEnumValue> {
        match backend {
            "NOT_STARTED" => Ok(PhaseStatus::NotStarted),
            "IN_PROGRESS" => Ok(PhaseStatus::InProgress),
            "COMPLETED" => Ok(PhaseStatus::Completed),
            other => Err(UnrecognizedEnumValue {
                kind: "phase status",
                value: other.to_string(),
            }),
        }
    }

    pub fn backend_literal(self) -> &'static str {
        match self {
            PhaseStatus::NotStarted => "NOT_STARTED",
            PhaseStatus::InProgress => "IN_PROGRESS",
            PhaseStatus::Completed => "COMPLETED",
        }
    }
}

impl std::str::FromStr for PhaseStatus {
    type Err = UnrecognizedEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PhaseStatus::convert(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_declared_task_status_converts() {
        assert_eq!(TaskStatus::convert("NOT_STARTED").unwrap(), TaskStatus::Todo);
        assert_eq!(
            TaskStatus::convert("IN_PROGRESS").unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(TaskStatus::convert("COMPLETED").unwrap(), TaskStatus::Done);
        assert_eq!(TaskStatus::convert("ON_HOLD").unwrap(), TaskStatus::OnHold);
    }

    #[test]
    fn backend_literal_converts_back() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::convert(status.backend_literal()).unwrap(), status);
        }
    }

    #[test]
    fn conversion_is_deterministic() {
        for status in TaskStatus::ALL {
            let lit = status.backend_literal();
            assert_eq!(TaskStatus::convert(lit), TaskStatus::convert(lit));
        }
    }

    #[test]
    fn unknown_task_status_is_rejected() {
        let err = TaskStatus::convert("ARCHIVED").unwrap_err();
        assert_eq!(err.kind, "task status");
        assert_eq!(err.value, "ARCHIVED");
        assert_eq!(err.to_string(), "unrecognized task status value: \"ARCHIVED\"");
    }

    #[test]
    fn matching_is_exact() {
        assert!(TaskStatus::convert("completed").is_err());
        assert!(TaskStatus::convert(" COMPLETED").is_err());
        assert!(TaskStatus::convert("").is_err());
    }

    #[test]
    fn task_status_serializes_as_ui_code() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(TaskStatus::OnHold.to_string(), "on-hold");
    }

    #[test]
    fn phase_status_serializes_as_backend_literal() {
        let json = serde_json::to_string(&PhaseStatus::NotStarted).unwrap();
        assert_eq!(json, "\"NOT_STARTED\"");
        assert_eq!("IN_PROGRESS".parse::<PhaseStatus>().unwrap(), PhaseStatus::InProgress);
        assert!("DONE".parse::<PhaseStatus>().is_err());
    }
}
