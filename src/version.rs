//! Protocol version negotiation tables.
//!
//! Both SCORM generations expose the same eight primitives and the same
//! handful of well-known data-model elements under different names. Keeping
//! the 1.2/2004 mapping in exhaustive matches on [`ProtocolVersion`] makes
//! the dispatch auditable in one place instead of scattering branches.

use std::fmt;

/// The SCORM generation negotiated for a session. Determined once by the
/// locator (or forced via configuration) and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVersion {
    Scorm12,
    Scorm2004,
}

impl ProtocolVersion {
    pub fn label(self) -> &'static str {
        match self {
            Self::Scorm12 => "1.2",
            Self::Scorm2004 => "2004",
        }
    }

    /// Data-model element holding the lesson/completion status.
    pub fn completion_status_field(self) -> &'static str {
        match self {
            Self::Scorm12 => "cmi.core.lesson_status",
            Self::Scorm2004 => "cmi.completion_status",
        }
    }

    /// Data-model element holding the exit status.
    pub fn exit_field(self) -> &'static str {
        match self {
            Self::Scorm12 => "cmi.core.exit",
            Self::Scorm2004 => "cmi.exit",
        }
    }

    /// Exit value written when the learner finished the lesson.
    pub fn normal_exit_value(self) -> &'static str {
        match self {
            Self::Scorm12 => "logout",
            Self::Scorm2004 => "normal",
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque serialized progress blob; the caller owns the format.
pub const SUSPEND_DATA_FIELD: &str = "cmi.suspend_data";
/// Learner name, read once right after a successful initialize.
pub const STUDENT_NAME_FIELD: &str = "cmi.core.student_name";
/// Learner language preference, read once right after a successful initialize.
pub const USER_LANGUAGE_FIELD: &str = "cmi.core.user_language_preference";
/// Exit value written when the learner leaves an unfinished lesson.
pub const SUSPEND_EXIT_VALUE: &str = "suspend";

/// The eight host primitives. Diagnostics name the wire-level primitive so
/// log entries stay meaningful to whoever reads the LMS side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCall {
    Initialize,
    Terminate,
    GetValue,
    SetValue,
    Commit,
    GetLastError,
    GetErrorString,
    GetDiagnostic,
}

impl ApiCall {
    pub fn primitive_name(self, version: ProtocolVersion) -> &'static str {
        match (version, self) {
            (ProtocolVersion::Scorm12, Self::Initialize) => "LMSInitialize",
            (ProtocolVersion::Scorm12, Self::Terminate) => "LMSFinish",
            (ProtocolVersion::Scorm12, Self::GetValue) => "LMSGetValue",
            (ProtocolVersion::Scorm12, Self::SetValue) => "LMSSetValue",
            (ProtocolVersion::Scorm12, Self::Commit) => "LMSCommit",
            (ProtocolVersion::Scorm12, Self::GetLastError) => "LMSGetLastError",
            (ProtocolVersion::Scorm12, Self::GetErrorString) => "LMSGetErrorString",
            (ProtocolVersion::Scorm12, Self::GetDiagnostic) => "LMSGetDiagnostic",
            (ProtocolVersion::Scorm2004, Self::Initialize) => "Initialize",
            (ProtocolVersion::Scorm2004, Self::Terminate) => "Terminate",
            (ProtocolVersion::Scorm2004, Self::GetValue) => "GetValue",
            (ProtocolVersion::Scorm2004, Self::SetValue) => "SetValue",
            (ProtocolVersion::Scorm2004, Self::Commit) => "Commit",
            (ProtocolVersion::Scorm2004, Self::GetLastError) => "GetLastError",
            (ProtocolVersion::Scorm2004, Self::GetErrorString) => "GetErrorString",
            (ProtocolVersion::Scorm2004, Self::GetDiagnostic) => "GetDiagnostic",
        }
    }
}
