//! SCORM session driver for e-learning content.
//!
//! The crate bridges a content player to a host Learning Management System
//! speaking SCORM 1.2 or SCORM 2004. It locates the host-provided API object
//! somewhere in the window/frame hierarchy, negotiates the connection
//! lifecycle (initialize → read/write → terminate), translates the host's
//! string-typed wire values into a typed session model, and verifies every
//! host call against the out-of-band error-code channel. UI concerns live in
//! downstream consumers of [`ScormSession`].

pub mod coerce;
pub mod driver;
pub mod error;
pub mod host;
pub mod locator;
pub mod logging;
pub mod metrics;
pub mod reporter;
pub mod session;
pub mod version;

#[cfg(test)]
pub(crate) mod test_utils;

pub use coerce::{HostValue, to_boolean};
pub use driver::{ConnectionState, DriverConfig, ScormDriver, SessionData};
pub use error::{Result, ScormError};
pub use host::{ApiHandle, HostEnvironment, HostFrame, ScormApi};
pub use locator::{ApiLocator, DEFAULT_FIND_ATTEMPT_LIMIT};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, SessionMetrics};
pub use reporter::ErrorReporter;
pub use session::{ScormSession, Student};
pub use version::{
    ApiCall, ProtocolVersion, STUDENT_NAME_FIELD, SUSPEND_DATA_FIELD, SUSPEND_EXIT_VALUE,
    USER_LANGUAGE_FIELD,
};
