pub mod status;
pub mod types;
pub mod wire;

pub use status::{PhaseStatus, TaskStatus, UnrecognizedEnumValue};
pub use types::*;

/// Current UTC time as an RFC 3339 string (the backend's date format).
pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
