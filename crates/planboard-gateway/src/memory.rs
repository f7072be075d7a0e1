use std::collections::HashMap;
use std::sync::Mutex;

use planboard_core::wire::{
    CreatePhaseRequest, Envelope, MessagePayload, MovePhaseRequest, PhaseRecord, SearchRecords,
    TaskRecord, UpdatePhaseRequest,
};
use planboard_core::{PhaseId, ProjectId};

use crate::{Gateway, GatewayError};

/// A request as seen by [`MemoryGateway`], in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    ListPhases(ProjectId),
    ListTasks(PhaseId),
    CreatePhase(ProjectId, CreatePhaseRequest),
    UpdatePhase(PhaseId, UpdatePhaseRequest),
    DeletePhase(PhaseId),
    MovePhase(PhaseId, MovePhaseRequest),
    Search(String),
}

#[derive(Default)]
struct Script {
    phases: HashMap<ProjectId, Vec<PhaseRecord>>,
    tasks: HashMap<PhaseId, Vec<TaskRecord>>,
    search: HashMap<String, SearchRecords>,
    failing_tasks: HashMap<PhaseId, GatewayError>,
    failing_writes: Option<GatewayError>,
    failing_search: Option<GatewayError>,
    next_id: PhaseId,
    calls: Vec<RecordedCall>,
}

/// Scripted in-memory gateway.
///
/// Lookups for anything not scripted answer with a null-data envelope, the
/// same signal a backend gives for "nothing here". Writes echo the submitted
/// fields back as a record.
pub struct MemoryGateway {
    script: Mutex<Script>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(Script {
                next_id: 1000,
                ..Script::default()
            }),
        }
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_phases(&self, project_id: ProjectId, phases: Vec<PhaseRecord>) {
        self.script().phases.insert(project_id, phases);
    }

    pub fn set_tasks(&self, phase_id: PhaseId, tasks: Vec<TaskRecord>) {
        self.script().tasks.insert(phase_id, tasks);
    }

    pub fn set_search(&self, keyword: &str, records: SearchRecords) {
        self.script().search.insert(keyword.to_string(), records);
    }

    /// Make the task listing for `phase_id` fail with `err`.
    pub fn fail_tasks(&self, phase_id: PhaseId, err: GatewayError) {
        self.script().failing_tasks.insert(phase_id, err);
    }

    /// Make every create/update/delete/move fail with `err`.
    pub fn fail_writes(&self, err: GatewayError) {
        self.script().failing_writes = Some(err);
    }

    /// Make every search fail with `err`.
    pub fn fail_search(&self, err: GatewayError) {
        self.script().failing_search = Some(err);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.script().calls.clone()
    }

    fn record(&self, call: RecordedCall) {
        self.script().calls.push(call);
    }

    fn write_guard(&self) -> Result<(), GatewayError> {
        match &self.script().failing_writes {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Gateway for MemoryGateway {
    async fn list_phases(
        &self,
        project_id: ProjectId,
    ) -> Result<Envelope<Vec<PhaseRecord>>, GatewayError> {
        self.record(RecordedCall::ListPhases(project_id));
        Ok(match self.script().phases.get(&project_id) {
            Some(phases) => Envelope::success(phases.clone()),
            None => Envelope::empty(),
        })
    }

    async fn list_tasks(
        &self,
        phase_id: PhaseId,
    ) -> Result<Envelope<Vec<TaskRecord>>, GatewayError> {
        self.record(RecordedCall::ListTasks(phase_id));
        let script = self.script();
        if let Some(err) = script.failing_tasks.get(&phase_id) {
            return Err(err.clone());
        }
        Ok(match script.tasks.get(&phase_id) {
            Some(tasks) => Envelope::success(tasks.clone()),
            None => Envelope::empty(),
        })
    }

    async fn create_phase(
        &self,
        project_id: ProjectId,
        body: &CreatePhaseRequest,
    ) -> Result<Envelope<PhaseRecord>, GatewayError> {
        self.record(RecordedCall::CreatePhase(project_id, body.clone()));
        self.write_guard()?;
        let mut script = self.script();
        script.next_id += 1;
        let record = PhaseRecord {
            id: script.next_id,
            phase_name: body.phase_name.clone(),
            description: Some(body.description.clone()),
            order_index: body.order_index,
            status: Some(body.status.backend_literal().to_string()),
            start_date: Some(body.start_date.clone()),
            end_date: body.end_date.clone(),
            project_id: Some(project_id),
        };
        script
            .phases
            .entry(project_id)
            .or_default()
            .push(record.clone());
        Ok(Envelope::success(record))
    }

    async fn update_phase(
        &self,
        phase_id: PhaseId,
        body: &UpdatePhaseRequest,
    ) -> Result<Envelope<PhaseRecord>, GatewayError> {
        self.record(RecordedCall::UpdatePhase(phase_id, body.clone()));
        self.write_guard()?;
        let mut script = self.script();
        let existing = script
            .phases
            .get_mut(&body.project_id)
            .and_then(|phases| phases.iter_mut().find(|p| p.id == phase_id));
        let Some(record) = existing else {
            return Ok(Envelope::empty());
        };
        if let Some(name) = &body.phase_name {
            record.phase_name = name.clone();
        }
        if let Some(description) = &body.description {
            record.description = Some(description.clone());
        }
        if let Some(order_index) = body.order_index {
            record.order_index = order_index;
        }
        Ok(Envelope::success(record.clone()))
    }

    async fn delete_phase(
        &self,
        phase_id: PhaseId,
    ) -> Result<Envelope<MessagePayload>, GatewayError> {
        self.record(RecordedCall::DeletePhase(phase_id));
        self.write_guard()?;
        for phases in self.script().phases.values_mut() {
            phases.retain(|p| p.id != phase_id);
        }
        Ok(Envelope::success(MessagePayload {
            message: format!("phase {phase_id} deleted"),
        }))
    }

    async fn move_phase(
        &self,
        phase_id: PhaseId,
        body: &MovePhaseRequest,
    ) -> Result<Envelope<MessagePayload>, GatewayError> {
        self.record(RecordedCall::MovePhase(phase_id, *body));
        self.write_guard()?;
        Ok(Envelope::success(MessagePayload {
            message: format!("phase {phase_id} moved to {}", body.new_position),
        }))
    }

    async fn search(&self, keyword: &str) -> Result<Envelope<SearchRecords>, GatewayError> {
        self.record(RecordedCall::Search(keyword.to_string()));
        let script = self.script();
        if let Some(err) = &script.failing_search {
            return Err(err.clone());
        }
        Ok(match script.search.get(keyword) {
            Some(records) => Envelope::success(records.clone()),
            None => Envelope::empty(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard_core::PhaseStatus;

    fn phase(id: PhaseId, name: &str) -> PhaseRecord {
        PhaseRecord {
            id,
            phase_name: name.into(),
            description: None,
            order_index: 0,
            status: None,
            start_date: None,
            end_date: None,
            project_id: Some(1),
        }
    }

    #[tokio::test]
    async fn unscripted_lookups_are_null() {
        let gw = MemoryGateway::new();
        assert!(gw.list_phases(1).await.unwrap().data.is_none());
        assert!(gw.list_tasks(1).await.unwrap().data.is_none());
        assert!(gw.search("x").await.unwrap().data.is_none());
        assert_eq!(
            gw.calls(),
            vec![
                RecordedCall::ListPhases(1),
                RecordedCall::ListTasks(1),
                RecordedCall::Search("x".into()),
            ]
        );
    }

    #[tokio::test]
    async fn create_then_update_round_trips() {
        let gw = MemoryGateway::new();
        let created = gw
            .create_phase(
                1,
                &CreatePhaseRequest {
                    phase_name: "Design".into(),
                    description: String::new(),
                    order_index: 0,
                    status: PhaseStatus::NotStarted,
                    start_date: "2026-01-01T00:00:00Z".into(),
                    end_date: None,
                    project_id: 1,
                },
            )
            .await
            .unwrap()
            .data
            .unwrap();

        let updated = gw
            .update_phase(
                created.id,
                &UpdatePhaseRequest {
                    phase_name: Some("Discovery".into()),
                    description: None,
                    order_index: None,
                    project_id: 1,
                },
            )
            .await
            .unwrap()
            .data
            .unwrap();
        assert_eq!(updated.phase_name, "Discovery");
        assert_eq!(gw.list_phases(1).await.unwrap().data.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn scripted_failures_are_returned() {
        let gw = MemoryGateway::new();
        gw.set_phases(1, vec![phase(5, "Design")]);
        gw.fail_tasks(5, GatewayError::Transport("reset".into()));
        assert_eq!(
            gw.list_tasks(5).await.unwrap_err(),
            GatewayError::Transport("reset".into())
        );

        gw.fail_writes(GatewayError::Http {
            status: 422,
            message: "invalid".into(),
        });
        assert_eq!(gw.delete_phase(5).await.unwrap_err().status(), Some(422));
        // the failed delete left the phase in place
        assert_eq!(gw.list_phases(1).await.unwrap().data.unwrap().len(), 1);
    }
}
