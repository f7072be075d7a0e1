use planboard_core::{PhaseId, ProjectId, UnrecognizedEnumValue};
use planboard_gateway::GatewayError;

/// Errors surfaced by the services.
///
/// Missing-data variants are raised here; gateway errors pass through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("no phases found for project {project_id}")]
    NoPhasesFound { project_id: ProjectId },

    #[error("no tasks found for phase {phase_id}")]
    NoTasksFound { phase_id: PhaseId },

    /// A write succeeded at the transport level but carried no record.
    #[error("{operation} returned no data")]
    EmptyResponse { operation: &'static str },

    #[error(transparent)]
    Status(#[from] UnrecognizedEnumValue),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ServiceError {
    /// True for the hard missing-data failures raised by the aggregation path.
    pub fn is_missing_data(&self) -> bool {
        matches!(
            self,
            ServiceError::NoPhasesFound { .. }
                | ServiceError::NoTasksFound { .. }
                | ServiceError::EmptyResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_errors_display_unchanged() {
        let inner = GatewayError::Http {
            status: 503,
            message: "unavailable".into(),
        };
        let err = ServiceError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert!(!err.is_missing_data());
    }

    #[test]
    fn missing_data_messages() {
        let err = ServiceError::NoTasksFound { phase_id: 4 };
        assert_eq!(err.to_string(), "no tasks found for phase 4");
        assert!(err.is_missing_data());
        assert!(ServiceError::NoPhasesFound { project_id: 1 }.is_missing_data());
    }
}
