//! Aggregation and normalization between the backend's wire shapes and the
//! view models the presentation layer renders.
//!
//! Both services are stateless: they borrow a [`Gateway`] for the duration of
//! a call and build a fresh snapshot every time.

pub mod error;
pub mod phase;
pub mod search;

pub use error::ServiceError;
pub use phase::{NewPhase, PhaseService, PhaseUpdate, DEFAULT_TASK_FETCH_CONCURRENCY};
pub use search::SearchService;

pub use planboard_gateway::Gateway;
