//! Out-of-band error channel.
//!
//! SCORM primitives report failure through a separate "get last error" call
//! rather than their own return value, and the return value of a primitive
//! may claim success while the error channel disagrees. Every component
//! consults this reporter right after a host call.

use serde_json::json;

use crate::host::ApiHandle;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::version::{ApiCall, ProtocolVersion};

const TARGET: &str = "scorm::reporter";

/// Stateless view over the negotiated handle; constructed per query.
pub struct ErrorReporter {
    handle: Option<ApiHandle>,
    version: Option<ProtocolVersion>,
    logger: Option<Logger>,
}

impl ErrorReporter {
    pub fn new(
        handle: Option<ApiHandle>,
        version: Option<ProtocolVersion>,
        logger: Option<Logger>,
    ) -> Self {
        Self {
            handle,
            version,
            logger,
        }
    }

    /// The host's last error code; 0 means no error.
    ///
    /// Without a handle this reads 0; callers must independently ensure a
    /// handle exists before trusting the result as a real signal.
    pub fn code(&self) -> i32 {
        let Some(api) = self.handle.as_ref() else {
            self.log_no_handle(ApiCall::GetLastError);
            return 0;
        };
        parse_error_code(&api.last_error().as_text())
    }

    /// Human-readable description for `code`; empty without a handle.
    pub fn info(&self, code: i32) -> String {
        let Some(api) = self.handle.as_ref() else {
            self.log_no_handle(ApiCall::GetErrorString);
            return String::new();
        };
        api.error_string(&code.to_string()).as_text()
    }

    /// Host-specific extended diagnostics for `code`; empty without a handle.
    pub fn diagnostic_info(&self, code: i32) -> String {
        let Some(api) = self.handle.as_ref() else {
            self.log_no_handle(ApiCall::GetDiagnostic);
            return String::new();
        };
        api.diagnostic(&code.to_string()).as_text()
    }

    fn log_no_handle(&self, call: ApiCall) {
        if let Some(logger) = self.logger.as_ref() {
            let name = self
                .version
                .map(|version| call.primitive_name(version))
                .unwrap_or("unknown");
            let event = event_with_fields(
                LogLevel::Debug,
                TARGET,
                "call_skipped",
                [
                    json_kv("call", json!(name)),
                    json_kv("reason", json!("api is null")),
                ],
            );
            let _ = logger.log_event(event);
        }
    }
}

/// Parse a host error code as a leading base-10 integer: optional sign, then
/// digits, trailing text ignored. A host that answers with something
/// unparseable is treated as erroring (-1), never as clean.
pub(crate) fn parse_error_code(text: &str) -> i32 {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1i64, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .as_bytes()
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if end == 0 {
        return -1;
    }

    match digits[..end].parse::<i64>() {
        Ok(value) => (sign * value).clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        Err(_) => -1,
    }
}
