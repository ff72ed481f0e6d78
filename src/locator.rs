//! Discovery of the host API object across the frame hierarchy.
//!
//! The API may live in any ancestor frame, in the opener window, or off the
//! opener's document, and may not exist at all. Discovery runs once per
//! session; a missing API is recorded, not raised, and surfaces downstream
//! as an unavailable session.

use std::sync::Arc;

use serde_json::json;

use crate::host::{ApiHandle, HostEnvironment, HostFrame};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::version::ProtocolVersion;

/// Bound on parent-chain hops. Malformed hosts have produced cyclic frame
/// graphs; the guard matters, the exact number is historical.
pub const DEFAULT_FIND_ATTEMPT_LIMIT: usize = 500;

const TARGET: &str = "scorm::locator";

/// Finds and memoizes the host API handle, negotiating the protocol version
/// from whichever API shape turned up.
pub struct ApiLocator {
    env: Arc<dyn HostEnvironment>,
    forced_version: Option<ProtocolVersion>,
    version: Option<ProtocolVersion>,
    handle: Option<ApiHandle>,
    attempted: bool,
    find_attempt_limit: usize,
    logger: Option<Logger>,
}

impl ApiLocator {
    pub fn new(
        env: Arc<dyn HostEnvironment>,
        forced_version: Option<ProtocolVersion>,
        find_attempt_limit: usize,
        logger: Option<Logger>,
    ) -> Self {
        Self {
            env,
            forced_version,
            version: forced_version,
            handle: None,
            attempted: false,
            find_attempt_limit,
            logger,
        }
    }

    /// The negotiated (or forced) protocol version. `None` until an API
    /// shape has been found or a version was configured up front.
    pub fn version(&self) -> Option<ProtocolVersion> {
        self.version
    }

    pub fn is_found(&self) -> bool {
        self.handle.is_some()
    }

    /// Memoizing accessor: runs discovery on the first call only, even when
    /// that first attempt comes up empty. Repeating a full frame-graph walk
    /// on every host call would be pointless and expensive.
    pub fn handle(&mut self) -> Option<ApiHandle> {
        if !self.attempted {
            self.attempted = true;
            self.handle = self.get();
        }
        self.handle.clone()
    }

    /// One full discovery pass: the current frame's ancestry, then the
    /// opener window, then the opener's document.
    pub fn get(&mut self) -> Option<ApiHandle> {
        let current = self.env.current();

        let mut api = current.parent().and_then(|parent| self.find(parent));

        if api.is_none()
            && let Some(opener) = self.env.opener()
        {
            api = self.find(opener);
        }

        if api.is_none()
            && let Some(document) = self.env.opener_document()
        {
            api = self.find(document);
        }

        if api.is_none() {
            self.log(LogLevel::Debug, "api_not_found", []);
        }

        api
    }

    /// Ascend the parent chain from `start` until a frame exposes either API
    /// shape, the root is reached, or the hop limit trips.
    pub fn find(&mut self, start: Arc<dyn HostFrame>) -> Option<ApiHandle> {
        let mut frame = start;
        let mut attempts = 0usize;

        while frame.api_2004().is_none() && frame.api_scorm12().is_none() {
            let Some(parent) = frame.parent() else { break };
            if attempts >= self.find_attempt_limit {
                break;
            }
            attempts += 1;
            frame = parent;
        }

        let api = match self.forced_version {
            Some(ProtocolVersion::Scorm2004) => {
                let api = frame.api_2004();
                if api.is_none() {
                    self.log(
                        LogLevel::Debug,
                        "forced_version_missing",
                        [json_kv("version", json!("2004"))],
                    );
                }
                api
            }
            Some(ProtocolVersion::Scorm12) => {
                let api = frame.api_scorm12();
                if api.is_none() {
                    self.log(
                        LogLevel::Debug,
                        "forced_version_missing",
                        [json_kv("version", json!("1.2"))],
                    );
                }
                api
            }
            None => {
                if let Some(api) = frame.api_2004() {
                    self.version = Some(ProtocolVersion::Scorm2004);
                    Some(api)
                } else if let Some(api) = frame.api_scorm12() {
                    self.version = Some(ProtocolVersion::Scorm12);
                    Some(api)
                } else {
                    None
                }
            }
        };

        if api.is_some() {
            let label = self.version.map(ProtocolVersion::label).unwrap_or("");
            self.log(
                LogLevel::Debug,
                "api_found",
                [
                    json_kv("version", json!(label)),
                    json_kv("find_attempts", json!(attempts)),
                ],
            );
        } else {
            self.log(
                LogLevel::Debug,
                "find_exhausted",
                [
                    json_kv("find_attempts", json!(attempts)),
                    json_kv("find_attempt_limit", json!(self.find_attempt_limit)),
                ],
            );
        }

        api
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
