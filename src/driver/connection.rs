//! Connection lifecycle: Inactive → Active → Inactive.

use serde_json::json;

use crate::coerce::to_boolean;
use crate::logging::{LogLevel, json_kv};
use crate::version::{ApiCall, SUSPEND_EXIT_VALUE};

use super::{ConnectionState, ScormDriver};

const TARGET: &str = "scorm::connection";

impl ScormDriver {
    /// Establish the communication session.
    ///
    /// A truthy return from the host's initialize primitive is not believed
    /// on its own: the error channel is re-checked and only a clean code 0
    /// completes the transition to Active. Returns false (never errors) on
    /// any failure.
    pub fn initialize(&mut self) -> bool {
        if self.is_active() {
            self.log(
                LogLevel::Debug,
                TARGET,
                "initialize_aborted",
                [json_kv("reason", json!("connection already active"))],
            );
            return false;
        }

        let Some(api) = self.locator.handle() else {
            self.log(
                LogLevel::Debug,
                TARGET,
                "initialize_failed",
                [json_kv("reason", json!("api is null"))],
            );
            return false;
        };

        self.record_metric(|metrics| metrics.record_host_call());
        let claimed = to_boolean(&api.initialize(""));

        if claimed == Some(true) {
            let code = self.reporter().code();
            if code != 0 {
                self.log_host_failure(TARGET, "initialize_failed", ApiCall::Initialize, code);
                return false;
            }

            self.state = ConnectionState::Active;
            if self.config.auto_handle_completion_status {
                self.normalize_completion_status();
            }
            let version = self
                .version()
                .map(|version| version.label())
                .unwrap_or("");
            self.log(
                LogLevel::Info,
                TARGET,
                "initialized",
                [json_kv("version", json!(version))],
            );
            return true;
        }

        let code = self.reporter().code();
        if code != 0 {
            self.log_host_failure(TARGET, "initialize_failed", ApiCall::Initialize, code);
        } else {
            self.log(
                LogLevel::Debug,
                TARGET,
                "initialize_failed",
                [json_kv("reason", json!("no response from server"))],
            );
        }
        false
    }

    /// Close the communication session.
    ///
    /// Pending data is always flushed first; a failed flush aborts the whole
    /// termination so the host never loses the session's writes. The exit
    /// status is filled in automatically when enabled and the client never
    /// set one: `suspend` for unfinished lessons, the version's normal exit
    /// value otherwise.
    pub fn terminate(&mut self) -> bool {
        if !self.is_active() {
            self.log(
                LogLevel::Debug,
                TARGET,
                "terminate_aborted",
                [json_kv("reason", json!("connection already terminated"))],
            );
            return false;
        }

        let Some(api) = self.locator.handle() else {
            self.log(
                LogLevel::Debug,
                TARGET,
                "terminate_failed",
                [json_kv("reason", json!("api is null"))],
            );
            return false;
        };

        // An exit status read back as the empty string counts as unset, the
        // same as never having read one.
        let exit_unset = self.data.exit_status.as_deref().is_none_or(str::is_empty);
        if self.config.auto_handle_exit_mode
            && exit_unset
            && let Some(version) = self.version()
        {
            let finished = matches!(
                self.data.completion_status.as_deref(),
                Some("completed") | Some("passed")
            );
            let exit_value = if finished {
                version.normal_exit_value()
            } else {
                SUSPEND_EXIT_VALUE
            };
            self.set(version.exit_field(), exit_value);
        }

        if !self.save() {
            self.log(
                LogLevel::Debug,
                TARGET,
                "terminate_failed",
                [json_kv("reason", json!("flush failed"))],
            );
            return false;
        }

        self.record_metric(|metrics| metrics.record_host_call());
        let success = to_boolean(&api.terminate("")).unwrap_or(false);
        if success {
            self.state = ConnectionState::Inactive;
            self.log(LogLevel::Info, TARGET, "terminated", std::iter::empty());
        } else {
            let code = self.reporter().code();
            self.log_host_failure(TARGET, "terminate_failed", ApiCall::Terminate, code);
        }
        success
    }

    /// Fresh launches report `"not attempted"` (1.2) or `"unknown"` (2004)
    /// depending on the host; both are rewritten to `"incomplete"` so every
    /// launch starts from the same state. Any other status is left alone.
    fn normalize_completion_status(&mut self) {
        let status = self.completion_status();
        if status == "not attempted" || status == "unknown" {
            self.set_completion_status("incomplete");
        }
    }

    pub(crate) fn log_host_failure(&mut self, target: &str, message: &str, call: ApiCall, code: i32) {
        let info = self.reporter().info(code);
        self.record_metric(|metrics| metrics.record_host_error());
        let name = self.call_name(call);
        self.log(
            LogLevel::Debug,
            target,
            message,
            [
                json_kv("call", json!(name)),
                json_kv("code", json!(code)),
                json_kv("info", json!(info)),
            ],
        );
    }
}
