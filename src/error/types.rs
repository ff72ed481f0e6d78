use thiserror::Error;

/// Unified result type for the SCORM driver crate.
pub type Result<T> = std::result::Result<T, ScormError>;

/// Hard failures surfaced by the session facade.
///
/// Everything else in the driver degrades to a boolean/empty-string return
/// plus a structured log entry, because the SCORM wire protocol reports
/// failures in-band. The one exception is invoking a domain operation when
/// no LMS session was ever established; proceeding would silently corrupt
/// session semantics, so that surfaces as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScormError {
    #[error("SCORM_NOT_CONNECTED: no LMS session is available")]
    NotConnected,
}
