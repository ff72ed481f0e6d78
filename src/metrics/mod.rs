use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated over the lifetime of a session. Shared with the
/// driver through an `Arc<Mutex<_>>` handle on [`crate::DriverConfig`].
#[derive(Debug, Default, Clone)]
pub struct SessionMetrics {
    host_calls: u64,
    reads: u64,
    writes: u64,
    commits: u64,
    host_errors: u64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_host_call(&mut self) {
        self.host_calls = self.host_calls.saturating_add(1);
    }

    pub fn record_read(&mut self) {
        self.reads = self.reads.saturating_add(1);
    }

    pub fn record_write(&mut self) {
        self.writes = self.writes.saturating_add(1);
    }

    pub fn record_commit(&mut self) {
        self.commits = self.commits.saturating_add(1);
    }

    pub fn record_host_error(&mut self) {
        self.host_errors = self.host_errors.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            host_calls: self.host_calls,
            reads: self.reads,
            writes: self.writes,
            commits: self.commits,
            host_errors: self.host_errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub host_calls: u64,
    pub reads: u64,
    pub writes: u64,
    pub commits: u64,
    pub host_errors: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("host_calls".to_string(), json!(self.host_calls));
        map.insert("reads".to_string(), json!(self.reads));
        map.insert("writes".to_string(), json!(self.writes));
        map.insert("commits".to_string(), json!(self.commits));
        map.insert("host_errors".to_string(), json!(self.host_errors));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "session_metrics", self.as_fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_counters() {
        let mut metrics = SessionMetrics::new();
        metrics.record_host_call();
        metrics.record_host_call();
        metrics.record_read();
        metrics.record_host_error();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.host_calls, 2);
        assert_eq!(snapshot.reads, 1);
        assert_eq!(snapshot.writes, 0);
        assert_eq!(snapshot.host_errors, 1);
    }

    #[test]
    fn snapshot_converts_to_log_fields() {
        let snapshot = SessionMetrics::new().snapshot();
        let fields = snapshot.as_fields();
        assert_eq!(fields.get("commits"), Some(&json!(0)));
    }
}
