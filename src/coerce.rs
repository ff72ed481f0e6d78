//! Coercion of the host's loosely-typed wire values.
//!
//! SCORM hosts answer API calls with strings (`"true"`, `"0"`, …), numbers,
//! booleans, or nothing at all. [`to_boolean`] classifies them into a strict
//! boolean, keeping "the call returned nothing" distinguishable from "the
//! call explicitly returned false".

/// A value produced by a host API call.
///
/// `Str` also covers string-like host objects (a wrapped string reports the
/// same text). `Undefined` models a call that produced no meaningful result.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Str(String),
    Number(f64),
    Bool(bool),
    Undefined,
}

impl HostValue {
    pub fn str(text: impl Into<String>) -> Self {
        Self::Str(text.into())
    }

    /// Stringify the value. The data channel never hands the host's native
    /// type to callers.
    pub fn as_text(&self) -> String {
        match self {
            Self::Str(text) => text.clone(),
            Self::Number(n) => format!("{n}"),
            Self::Bool(true) => "true".to_string(),
            Self::Bool(false) => "false".to_string(),
            Self::Undefined => String::new(),
        }
    }
}

/// Convert a host value into a strict boolean.
///
/// Strings are truthy iff they contain `true` or `1` anywhere,
/// case-insensitively (hosts have been seen returning `"true "`, `"TRUE"`,
/// or `"1"`). Numbers are truthy iff nonzero. Booleans pass through.
/// `Undefined` yields `None`: an absent result is not a false result.
pub fn to_boolean(value: &HostValue) -> Option<bool> {
    match value {
        HostValue::Str(text) => Some(is_truthy_text(text)),
        HostValue::Number(n) => Some(*n != 0.0),
        HostValue::Bool(b) => Some(*b),
        HostValue::Undefined => None,
    }
}

fn is_truthy_text(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.contains("true") || lower.contains('1')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_strings() {
        assert_eq!(to_boolean(&HostValue::str("true")), Some(true));
        assert_eq!(to_boolean(&HostValue::str("TRUE")), Some(true));
        assert_eq!(to_boolean(&HostValue::str("1")), Some(true));
        assert_eq!(to_boolean(&HostValue::str(" True ")), Some(true));
        assert_eq!(to_boolean(&HostValue::str("error 1")), Some(true));
    }

    #[test]
    fn falsy_strings() {
        assert_eq!(to_boolean(&HostValue::str("false")), Some(false));
        assert_eq!(to_boolean(&HostValue::str("")), Some(false));
        assert_eq!(to_boolean(&HostValue::str("no")), Some(false));
        assert_eq!(to_boolean(&HostValue::str("0")), Some(false));
    }

    #[test]
    fn numbers_truthy_iff_nonzero() {
        assert_eq!(to_boolean(&HostValue::Number(1.0)), Some(true));
        assert_eq!(to_boolean(&HostValue::Number(-3.5)), Some(true));
        assert_eq!(to_boolean(&HostValue::Number(0.0)), Some(false));
    }

    #[test]
    fn booleans_pass_through() {
        assert_eq!(to_boolean(&HostValue::Bool(true)), Some(true));
        assert_eq!(to_boolean(&HostValue::Bool(false)), Some(false));
    }

    #[test]
    fn undefined_is_unknown_not_false() {
        assert_eq!(to_boolean(&HostValue::Undefined), None);
    }

    #[test]
    fn as_text_stringifies() {
        assert_eq!(HostValue::str("abc").as_text(), "abc");
        assert_eq!(HostValue::Number(3.0).as_text(), "3");
        assert_eq!(HostValue::Number(3.5).as_text(), "3.5");
        assert_eq!(HostValue::Bool(true).as_text(), "true");
        assert_eq!(HostValue::Undefined.as_text(), "");
    }
}
