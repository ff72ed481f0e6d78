//! The session driver: connection lifecycle plus the typed data channel.
//!
//! [`ScormDriver`] owns the locator, the connection state machine and the
//! cached session data. The lifecycle operations live in [`connection`], the
//! per-field read/write/commit operations in [`data`].

use std::sync::{Arc, Mutex};

use crate::locator::{ApiLocator, DEFAULT_FIND_ATTEMPT_LIMIT};
use crate::host::HostEnvironment;
use crate::logging::{LogLevel, Logger, event_with_fields};
use crate::metrics::SessionMetrics;
use crate::reporter::ErrorReporter;
use crate::version::{ApiCall, ProtocolVersion};

pub mod connection;
pub mod data;

/// Construction-time knobs for a driver. Read-only afterwards.
#[derive(Clone)]
pub struct DriverConfig {
    /// Restrict discovery to one API shape instead of auto-detecting.
    pub forced_version: Option<ProtocolVersion>,
    /// Rewrite a fresh launch's `"not attempted"`/`"unknown"` status to
    /// `"incomplete"` right after initialize.
    pub auto_handle_completion_status: bool,
    /// Write an exit status at terminate when the client never set one.
    pub auto_handle_exit_mode: bool,
    /// Bound on parent-chain hops during discovery.
    pub find_attempt_limit: usize,
    /// Optional structured logger for diagnostics.
    pub logger: Option<Logger>,
    /// Optional shared metrics accumulator.
    pub metrics: Option<Arc<Mutex<SessionMetrics>>>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            forced_version: None,
            auto_handle_completion_status: true,
            auto_handle_exit_mode: true,
            find_attempt_limit: DEFAULT_FIND_ATTEMPT_LIMIT,
            logger: None,
            metrics: None,
        }
    }
}

impl DriverConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(SessionMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<SessionMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Connection lifecycle state. Mutated only by initialize/terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Inactive,
    Active,
}

/// Cached subset of host state, kept so terminate can choose exit semantics
/// without another round of host reads.
#[derive(Debug, Default, Clone)]
pub struct SessionData {
    pub completion_status: Option<String>,
    pub exit_status: Option<String>,
    unsaved_changes: bool,
}

pub struct ScormDriver {
    pub(crate) config: DriverConfig,
    pub(crate) locator: ApiLocator,
    pub(crate) state: ConnectionState,
    pub(crate) data: SessionData,
}

impl ScormDriver {
    pub fn new(env: Arc<dyn HostEnvironment>, config: DriverConfig) -> Self {
        let locator = ApiLocator::new(
            env,
            config.forced_version,
            config.find_attempt_limit,
            config.logger.clone(),
        );
        Self {
            config,
            locator,
            state: ConnectionState::Inactive,
            data: SessionData::default(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ConnectionState::Active
    }

    pub fn version(&self) -> Option<ProtocolVersion> {
        self.locator.version()
    }

    pub fn session_data(&self) -> &SessionData {
        &self.data
    }

    /// True when a write succeeded after the last successful commit.
    pub fn has_unsaved_changes(&self) -> bool {
        self.data.unsaved_changes
    }

    pub(crate) fn reporter(&mut self) -> ErrorReporter {
        ErrorReporter::new(
            self.locator.handle(),
            self.locator.version(),
            self.config.logger.clone(),
        )
    }

    pub(crate) fn call_name(&self, call: ApiCall) -> &'static str {
        self.version()
            .map(|version| call.primitive_name(version))
            .unwrap_or("unknown")
    }

    pub(crate) fn log<I>(&self, level: LogLevel, target: &str, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, target, message, fields);
            let _ = logger.log_event(event);
        }
    }

    pub(crate) fn record_metric(&self, record: impl FnOnce(&mut SessionMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref()
            && let Ok(mut guard) = metrics.lock()
        {
            record(&mut guard);
        }
    }
}
