//! One method per backend endpoint, returning the raw envelope.
//!
//! Gateways never transform payloads. `HttpGateway` talks to the real REST
//! backend; `MemoryGateway` serves scripted envelopes for tests and dry runs.

pub mod config;
pub mod http;
pub mod memory;

pub use config::GatewayConfig;
pub use http::HttpGateway;
pub use memory::{MemoryGateway, RecordedCall};

use planboard_core::wire::{
    CreatePhaseRequest, Envelope, MessagePayload, MovePhaseRequest, PhaseRecord, SearchRecords,
    TaskRecord, UpdatePhaseRequest,
};
use planboard_core::{PhaseId, ProjectId};

/// Failure below the service layer: network, HTTP status, or body decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    /// HTTP status code, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Endpoint contract consumed by the services.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn list_phases(
        &self,
        project_id: ProjectId,
    ) -> Result<Envelope<Vec<PhaseRecord>>, GatewayError>;

    async fn list_tasks(&self, phase_id: PhaseId)
        -> Result<Envelope<Vec<TaskRecord>>, GatewayError>;

    async fn create_phase(
        &self,
        project_id: ProjectId,
        body: &CreatePhaseRequest,
    ) -> Result<Envelope<PhaseRecord>, GatewayError>;

    async fn update_phase(
        &self,
        phase_id: PhaseId,
        body: &UpdatePhaseRequest,
    ) -> Result<Envelope<PhaseRecord>, GatewayError>;

    async fn delete_phase(&self, phase_id: PhaseId)
        -> Result<Envelope<MessagePayload>, GatewayError>;

    async fn move_phase(
        &self,
        phase_id: PhaseId,
        body: &MovePhaseRequest,
    ) -> Result<Envelope<MessagePayload>, GatewayError>;

    async fn search(&self, keyword: &str) -> Result<Envelope<SearchRecords>, GatewayError>;
}
