use futures::stream::{self, StreamExt, TryStreamExt};

use planboard_core::wire::{CreatePhaseRequest, MovePhaseRequest, PhaseRecord, UpdatePhaseRequest};
use planboard_core::{
    now_rfc3339, PhaseId, PhaseStatus, PhaseSummary, ProjectId, Success, TaskPreview,
};
use planboard_gateway::Gateway;

use crate::error::ServiceError;

/// Upper bound on task listings in flight during one `list_phases` call.
pub const DEFAULT_TASK_FETCH_CONCURRENCY: usize = 4;

/// Fields for a new phase. `description` and `start_date` are defaulted on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhase {
    pub phase_name: String,
    pub description: Option<String>,
    pub order_index: i32,
    pub status: PhaseStatus,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl NewPhase {
    pub fn named(phase_name: impl Into<String>) -> Self {
        Self {
            phase_name: phase_name.into(),
            description: None,
            order_index: 0,
            status: PhaseStatus::NotStarted,
            start_date: None,
            end_date: None,
        }
    }

    fn into_request(self, project_id: ProjectId) -> CreatePhaseRequest {
        CreatePhaseRequest {
            phase_name: self.phase_name,
            description: self.description.unwrap_or_default(),
            order_index: self.order_index,
            status: self.status,
            start_date: self.start_date.unwrap_or_else(now_rfc3339),
            end_date: self.end_date,
            project_id,
        }
    }
}

/// Partial phase update in view-model terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<i32>,
}

impl PhaseUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.position.is_none()
    }

    fn into_request(self, project_id: ProjectId) -> UpdatePhaseRequest {
        UpdatePhaseRequest {
            phase_name: self.title,
            description: self.description,
            order_index: self.position,
            project_id,
        }
    }
}

/// Builds phase-with-task-preview views and performs phase writes.
pub struct PhaseService<'a, G: Gateway + ?Sized> {
    gateway: &'a G,
    concurrency: usize,
}

impl<'a, G: Gateway + ?Sized> PhaseService<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self {
            gateway,
            concurrency: DEFAULT_TASK_FETCH_CONCURRENCY,
        }
    }

    /// Bound the per-phase task fan-out. Values below 1 are treated as 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// All phases of a project, each with its task previews.
    ///
    /// Task listings run concurrently on the caller's task, at most
    /// `concurrency` at a time. The first failure aborts the whole call and
    /// drops the listings still in flight; phase and task order follow the
    /// backend.
    pub async fn list_phases(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<PhaseSummary>, ServiceError> {
        let phases = self
            .gateway
            .list_phases(project_id)
            .await?
            .into_data()
            .ok_or_else(|| {
                tracing::warn!(project_id, "phase listing returned no data");
                ServiceError::NoPhasesFound { project_id }
            })?;

        tracing::debug!(project_id, phases = phases.len(), "assembling phases");
        let mut slots: Vec<Option<PhaseSummary>> = (0..phases.len()).map(|_| None).collect();
        let mut assembled = stream::iter(phases.into_iter().enumerate())
            .map(|(i, record)| async move { self.assemble(record).await.map(|s| (i, s)) })
            .buffer_unordered(self.concurrency);

        while let Some((i, summary)) = assembled.try_next().await? {
            slots[i] = Some(summary);
        }
        Ok(slots.into_iter().flatten().collect())
    }

    async fn assemble(&self, record: PhaseRecord) -> Result<PhaseSummary, ServiceError> {
        let phase_id = record.id;
        let tasks = self
            .gateway
            .list_tasks(phase_id)
            .await?
            .into_data()
            .ok_or_else(|| {
                tracing::warn!(phase_id, "task listing returned no data");
                ServiceError::NoTasksFound { phase_id }
            })?;
        let previews = tasks
            .into_iter()
            .map(TaskPreview::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PhaseSummary::from_record(record, previews))
    }

    /// Create a phase. The result has no task previews; a new phase has no tasks.
    pub async fn create_phase(
        &self,
        project_id: ProjectId,
        input: NewPhase,
    ) -> Result<PhaseSummary, ServiceError> {
        let body = input.into_request(project_id);
        tracing::debug!(project_id, phase = %body.phase_name, "creating phase");
        let record = self
            .gateway
            .create_phase(project_id, &body)
            .await?
            .into_data()
            .ok_or(ServiceError::EmptyResponse {
                operation: "create phase",
            })?;
        Ok(PhaseSummary::from_record(record, Vec::new()))
    }

    /// Same request as [`create_phase`](Self::create_phase); tasks are not copied.
    pub async fn copy_phase(
        &self,
        project_id: ProjectId,
        input: NewPhase,
    ) -> Result<PhaseSummary, ServiceError> {
        self.create_phase(project_id, input).await
    }

    /// Submit only the fields present in `update`. Task previews are not
    /// re-fetched, so the result carries none.
    pub async fn update_phase(
        &self,
        phase_id: PhaseId,
        update: PhaseUpdate,
        project_id: ProjectId,
    ) -> Result<PhaseSummary, ServiceError> {
        let body = update.into_request(project_id);
        tracing::debug!(phase_id, project_id, "updating phase");
        let record = self
            .gateway
            .update_phase(phase_id, &body)
            .await?
            .into_data()
            .ok_or(ServiceError::EmptyResponse {
                operation: "update phase",
            })?;
        Ok(PhaseSummary::from_record(record, Vec::new()))
    }

    pub async fn delete_phase(&self, phase_id: PhaseId) -> Result<Success, ServiceError> {
        tracing::debug!(phase_id, "deleting phase");
        let env = self.gateway.delete_phase(phase_id).await?;
        Ok(Success {
            message: env.into_data().map(|m| m.message).unwrap_or_default(),
        })
    }

    /// Move a phase to an absolute position; the backend reorders siblings.
    pub async fn move_phase(
        &self,
        phase_id: PhaseId,
        new_position: i32,
    ) -> Result<Success, ServiceError> {
        tracing::debug!(phase_id, new_position, "moving phase");
        let env = self
            .gateway
            .move_phase(phase_id, &MovePhaseRequest { new_position })
            .await?;
        Ok(Success {
            message: env.into_data().map(|m| m.message).unwrap_or_default(),
        })
    }
}
