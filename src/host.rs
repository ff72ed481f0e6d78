//! Capability traits over the host browsing context.
//!
//! The driver never touches a real window object; it sees the host through
//! these minimal seams so the core logic runs (and tests) without a browser.
//! A real embedding implements them over whatever frame graph it lives in
//! and maps the version-specific primitive names (`LMSGetValue` vs
//! `GetValue`) onto [`ScormApi`].

use std::sync::Arc;

use crate::coerce::HostValue;

/// The host-provided API object, version shape already resolved.
///
/// All calls execute synchronously and report failure through their return
/// value plus the out-of-band [`ScormApi::last_error`] channel; none of them
/// may be trusted in isolation.
pub trait ScormApi {
    fn initialize(&self, parameter: &str) -> HostValue;
    fn terminate(&self, parameter: &str) -> HostValue;
    fn get_value(&self, element: &str) -> HostValue;
    fn set_value(&self, element: &str, value: &str) -> HostValue;
    fn commit(&self, parameter: &str) -> HostValue;
    fn last_error(&self) -> HostValue;
    fn error_string(&self, code: &str) -> HostValue;
    fn diagnostic(&self, code: &str) -> HostValue;
}

/// Shared reference to the negotiated API object. The locator owns discovery;
/// every other component looks the handle up through it.
pub type ApiHandle = Arc<dyn ScormApi>;

/// One node in the window/frame ancestry.
pub trait HostFrame {
    /// The parent frame, or `None` at the root (`window === window.parent`).
    fn parent(&self) -> Option<Arc<dyn HostFrame>>;

    /// The SCORM 2004 API shape (`API_1484_11`), if this frame exposes one.
    fn api_2004(&self) -> Option<ApiHandle>;

    /// The SCORM 1.2 API shape (`API`), if this frame exposes one.
    fn api_scorm12(&self) -> Option<ApiHandle>;
}

/// Entry points into the host object graph.
pub trait HostEnvironment {
    /// The frame the content is running in.
    fn current(&self) -> Arc<dyn HostFrame>;

    /// The top window's opener, when the content was launched in a popup.
    fn opener(&self) -> Option<Arc<dyn HostFrame>> {
        None
    }

    /// The opener's document. Some hosts (Plateau among them) hang the API
    /// off the document instead of the window.
    fn opener_document(&self) -> Option<Arc<dyn HostFrame>> {
        None
    }
}
