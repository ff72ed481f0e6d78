//! Domain facade over the driver.
//!
//! A [`ScormSession`] is constructed once per embedding: it resolves the
//! host API, runs the initialize handshake, and snapshots the learner
//! identity. Domain operations refuse to run without an established
//! session (the one hard failure in the crate) while the raw
//! channel pass-throughs keep the driver's soft-failure semantics.

use std::sync::Arc;

use serde_json::json;

use crate::driver::{DriverConfig, ScormDriver};
use crate::error::{Result, ScormError};
use crate::host::HostEnvironment;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::version::{
    ProtocolVersion, STUDENT_NAME_FIELD, SUSPEND_DATA_FIELD, USER_LANGUAGE_FIELD,
};

const TARGET: &str = "scorm::session";

/// Read-once learner snapshot, populated right after a successful
/// initialize and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub language: String,
    pub name: String,
}

pub struct ScormSession {
    driver: ScormDriver,
    available: bool,
    student: Option<Student>,
    logger: Option<Logger>,
}

impl ScormSession {
    /// Resolve the host API and establish the session. Discovery or
    /// handshake failure is not an error here; it surfaces through
    /// [`ScormSession::is_available`] and later as
    /// [`ScormError::NotConnected`] from the domain operations.
    pub fn connect(env: Arc<dyn HostEnvironment>, config: DriverConfig) -> Self {
        let logger = config.logger.clone();
        let mut driver = ScormDriver::new(env, config);
        let available = driver.initialize();

        let student = available.then(|| Student {
            language: driver.get(USER_LANGUAGE_FIELD),
            name: driver.get(STUDENT_NAME_FIELD),
        });

        Self {
            driver,
            available,
            student,
            logger,
        }
    }

    /// Whether an API was found and the initialize handshake succeeded.
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn student(&self) -> Option<&Student> {
        self.student.as_ref()
    }

    pub fn version(&self) -> Option<ProtocolVersion> {
        self.driver.version()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.driver.has_unsaved_changes()
    }

    /// True iff the completion status reads exactly `completed` or `passed`.
    pub fn is_lesson_complete(&mut self) -> Result<bool> {
        self.ensure_connected()?;
        let status = self.driver.completion_status();
        Ok(status == "completed" || status == "passed")
    }

    /// Mark the lesson complete (or clear the status). Returns whether the
    /// host accepted the write.
    pub fn set_lesson_complete(&mut self, complete: bool) -> Result<bool> {
        self.ensure_connected()?;
        let status = if complete { "completed" } else { "" };
        let success = self.driver.set_completion_status(status);
        if !success {
            self.log_error(
                "lesson_status_rejected",
                [json_kv("status", json!(status))],
            );
        }
        Ok(success)
    }

    /// The raw suspend-data blob; the caller owns its format.
    pub fn progress(&mut self) -> Result<String> {
        self.ensure_connected()?;
        Ok(self.driver.get(SUSPEND_DATA_FIELD))
    }

    /// Store the suspend-data blob. Returns whether the host accepted it.
    pub fn set_progress(&mut self, blob: &str) -> Result<bool> {
        self.ensure_connected()?;
        let success = self.driver.set(SUSPEND_DATA_FIELD, blob);
        if !success {
            self.log_error(
                "progress_rejected",
                [json_kv(
                    "value_hash",
                    json!(blake3::hash(blob.as_bytes()).to_hex().as_str()),
                )],
            );
        }
        Ok(success)
    }

    /// Raw channel read, soft-failing like the driver.
    pub fn get(&mut self, element: &str) -> String {
        self.driver.get(element)
    }

    /// Raw channel write, soft-failing like the driver.
    pub fn set(&mut self, element: &str, value: &str) -> bool {
        self.driver.set(element, value)
    }

    /// Flush pending writes to the host.
    pub fn save(&mut self) -> bool {
        self.driver.save()
    }

    /// Close the session, flushing first. See [`ScormDriver::terminate`].
    pub fn disconnect(&mut self) -> bool {
        self.driver.terminate()
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(ScormError::NotConnected)
        }
    }

    fn log_error<I>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(LogLevel::Error, TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
