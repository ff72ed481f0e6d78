//! Typed data channel: per-field reads and writes against the negotiated
//! API handle, each validated through the error channel.

use serde_json::json;

use crate::coerce::to_boolean;
use crate::logging::{LogLevel, json_kv};
use crate::version::{ApiCall, SUSPEND_DATA_FIELD};

use super::ScormDriver;

const TARGET: &str = "scorm::data";

impl ScormDriver {
    /// Read a data-model element, returning its stringified value.
    ///
    /// The host's get primitive answers an empty string both for a genuinely
    /// empty field and for a failed read; only the error code tells the two
    /// apart. Preconditions (Active state, non-null handle) fail soft with
    /// an empty string and a diagnostic.
    pub fn get(&mut self, element: &str) -> String {
        if !self.is_active() {
            self.log(
                LogLevel::Debug,
                TARGET,
                "get_failed",
                [
                    json_kv("element", json!(element)),
                    json_kv("reason", json!("connection is inactive")),
                ],
            );
            return String::new();
        }

        let Some(api) = self.locator.handle() else {
            self.log(
                LogLevel::Debug,
                TARGET,
                "get_failed",
                [
                    json_kv("element", json!(element)),
                    json_kv("reason", json!("api is null")),
                ],
            );
            return String::new();
        };

        self.record_metric(|metrics| {
            metrics.record_host_call();
            metrics.record_read();
        });
        let value = api.get_value(element).as_text();
        let code = self.reporter().code();

        if !value.is_empty() || code == 0 {
            self.cache_read(element, &value);
        } else {
            let info = self.reporter().info(code);
            self.record_metric(|metrics| metrics.record_host_error());
            let name = self.call_name(ApiCall::GetValue);
            self.log(
                LogLevel::Debug,
                TARGET,
                "get_failed",
                [
                    json_kv("element", json!(element)),
                    json_kv("call", json!(name)),
                    json_kv("code", json!(code)),
                    json_kv("info", json!(info)),
                ],
            );
        }

        value
    }

    /// Write a data-model element. Returns whether the host accepted it.
    pub fn set(&mut self, element: &str, value: &str) -> bool {
        if !self.is_active() {
            self.log(
                LogLevel::Debug,
                TARGET,
                "set_failed",
                [
                    json_kv("element", json!(element)),
                    json_kv("reason", json!("connection is inactive")),
                ],
            );
            return false;
        }

        let Some(api) = self.locator.handle() else {
            self.log(
                LogLevel::Debug,
                TARGET,
                "set_failed",
                [
                    json_kv("element", json!(element)),
                    json_kv("reason", json!("api is null")),
                ],
            );
            return false;
        };

        self.record_metric(|metrics| {
            metrics.record_host_call();
            metrics.record_write();
        });
        let success = to_boolean(&api.set_value(element, value)).unwrap_or(false);

        if success {
            if let Some(version) = self.version()
                && element == version.completion_status_field()
            {
                self.data.completion_status = Some(value.to_string());
            }
            self.data.unsaved_changes = true;
            self.log(
                LogLevel::Debug,
                TARGET,
                "set_applied",
                [
                    json_kv("element", json!(element)),
                    // Suspend data is an opaque, possibly large blob; log a
                    // fingerprint instead of the payload.
                    if element == SUSPEND_DATA_FIELD {
                        json_kv(
                            "value_hash",
                            json!(blake3::hash(value.as_bytes()).to_hex().as_str()),
                        )
                    } else {
                        json_kv("value", json!(value))
                    },
                ],
            );
        } else {
            let code = self.reporter().code();
            self.log_host_failure(TARGET, "set_failed", ApiCall::SetValue, code);
        }

        success
    }

    /// Ask the host to persist everything written so far.
    pub fn save(&mut self) -> bool {
        if !self.is_active() {
            self.log(
                LogLevel::Debug,
                TARGET,
                "save_failed",
                [json_kv("reason", json!("connection is inactive"))],
            );
            return false;
        }

        let Some(api) = self.locator.handle() else {
            self.log(
                LogLevel::Debug,
                TARGET,
                "save_failed",
                [json_kv("reason", json!("api is null"))],
            );
            return false;
        };

        self.record_metric(|metrics| {
            metrics.record_host_call();
            metrics.record_commit();
        });
        let success = to_boolean(&api.commit("")).unwrap_or(false);

        if success {
            self.data.unsaved_changes = false;
        } else {
            let code = self.reporter().code();
            self.log_host_failure(TARGET, "save_failed", ApiCall::Commit, code);
        }

        success
    }

    /// Read the version-appropriate lesson/completion status.
    pub fn completion_status(&mut self) -> String {
        let Some(version) = self.version() else {
            self.log(
                LogLevel::Debug,
                TARGET,
                "status_unavailable",
                [json_kv("reason", json!("no negotiated version"))],
            );
            return String::new();
        };
        self.get(version.completion_status_field())
    }

    /// Write the version-appropriate lesson/completion status.
    pub fn set_completion_status(&mut self, status: &str) -> bool {
        let Some(version) = self.version() else {
            self.log(
                LogLevel::Debug,
                TARGET,
                "status_unavailable",
                [json_kv("reason", json!("no negotiated version"))],
            );
            return false;
        };
        self.set(version.completion_status_field(), status)
    }

    /// Completion and exit statuses read back from the host are cached so
    /// terminate can choose exit semantics without another read.
    fn cache_read(&mut self, element: &str, value: &str) {
        let Some(version) = self.version() else {
            return;
        };
        if element == version.completion_status_field() {
            self.data.completion_status = Some(value.to_string());
        } else if element == version.exit_field() {
            self.data.exit_status = Some(value.to_string());
        }
    }
}
