//! Scripted host doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use crate::coerce::HostValue;
use crate::host::{ApiHandle, HostEnvironment, HostFrame, ScormApi};

/// A programmable host API. Responses are fixed per primitive; every call is
/// recorded so tests can assert on what reached the host and in which order.
pub struct ScriptedApi {
    pub initialize_result: HostValue,
    pub terminate_result: HostValue,
    pub set_result: HostValue,
    pub commit_result: HostValue,
    pub last_error: RefCell<HostValue>,
    values: RefCell<HashMap<String, String>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedApi {
    /// A host that accepts everything and reports no errors.
    pub fn conformant() -> Self {
        Self {
            initialize_result: HostValue::str("true"),
            terminate_result: HostValue::str("true"),
            set_result: HostValue::str("true"),
            commit_result: HostValue::str("true"),
            last_error: RefCell::new(HostValue::str("0")),
            values: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_value(self, element: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(element.to_string(), value.to_string());
        self
    }

    pub fn with_last_error(self, code: &str) -> Self {
        *self.last_error.borrow_mut() = HostValue::str(code);
        self
    }

    pub fn set_last_error(&self, code: &str) {
        *self.last_error.borrow_mut() = HostValue::str(code);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.as_str() == name || call.starts_with(&format!("{name}(")))
            .count()
    }

    pub fn stored_value(&self, element: &str) -> Option<String> {
        self.values.borrow().get(element).cloned()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl ScormApi for ScriptedApi {
    fn initialize(&self, _parameter: &str) -> HostValue {
        self.record("Initialize".to_string());
        self.initialize_result.clone()
    }

    fn terminate(&self, _parameter: &str) -> HostValue {
        self.record("Terminate".to_string());
        self.terminate_result.clone()
    }

    fn get_value(&self, element: &str) -> HostValue {
        self.record(format!("GetValue({element})"));
        match self.values.borrow().get(element) {
            Some(value) => HostValue::str(value.clone()),
            None => HostValue::str(""),
        }
    }

    fn set_value(&self, element: &str, value: &str) -> HostValue {
        self.record(format!("SetValue({element})"));
        if crate::coerce::to_boolean(&self.set_result) == Some(true) {
            self.values
                .borrow_mut()
                .insert(element.to_string(), value.to_string());
        }
        self.set_result.clone()
    }

    fn commit(&self, _parameter: &str) -> HostValue {
        self.record("Commit".to_string());
        self.commit_result.clone()
    }

    fn last_error(&self) -> HostValue {
        self.record("GetLastError".to_string());
        self.last_error.borrow().clone()
    }

    fn error_string(&self, code: &str) -> HostValue {
        self.record(format!("GetErrorString({code})"));
        HostValue::str(format!("error {code}"))
    }

    fn diagnostic(&self, code: &str) -> HostValue {
        self.record(format!("GetDiagnostic({code})"));
        HostValue::str(format!("diagnostic {code}"))
    }
}

/// One frame in a scripted ancestry chain.
pub struct FrameNode {
    parent: Option<Arc<FrameNode>>,
    api_2004: Option<ApiHandle>,
    api_scorm12: Option<ApiHandle>,
}

impl FrameNode {
    pub fn root() -> Arc<Self> {
        Arc::new(Self {
            parent: None,
            api_2004: None,
            api_scorm12: None,
        })
    }

    pub fn root_with_2004(api: ApiHandle) -> Arc<Self> {
        Arc::new(Self {
            parent: None,
            api_2004: Some(api),
            api_scorm12: None,
        })
    }

    pub fn root_with_scorm12(api: ApiHandle) -> Arc<Self> {
        Arc::new(Self {
            parent: None,
            api_2004: None,
            api_scorm12: Some(api),
        })
    }

    pub fn root_with_both(api_2004: ApiHandle, api_scorm12: ApiHandle) -> Arc<Self> {
        Arc::new(Self {
            parent: None,
            api_2004: Some(api_2004),
            api_scorm12: Some(api_scorm12),
        })
    }

    pub fn child_of(parent: Arc<FrameNode>) -> Arc<Self> {
        Arc::new(Self {
            parent: Some(parent),
            api_2004: None,
            api_scorm12: None,
        })
    }

    /// A bare chain of `depth` frames below `root`, returning the leaf.
    pub fn chain_below(root: Arc<FrameNode>, depth: usize) -> Arc<Self> {
        let mut frame = root;
        for _ in 0..depth {
            frame = Self::child_of(frame);
        }
        frame
    }
}

impl HostFrame for FrameNode {
    fn parent(&self) -> Option<Arc<dyn HostFrame>> {
        self.parent
            .clone()
            .map(|parent| parent as Arc<dyn HostFrame>)
    }

    fn api_2004(&self) -> Option<ApiHandle> {
        self.api_2004.clone()
    }

    fn api_scorm12(&self) -> Option<ApiHandle> {
        self.api_scorm12.clone()
    }
}

/// Fixed view of the host object graph.
pub struct StaticEnvironment {
    pub current: Arc<FrameNode>,
    pub opener: Option<Arc<FrameNode>>,
    pub opener_document: Option<Arc<FrameNode>>,
}

impl StaticEnvironment {
    pub fn frames_only(current: Arc<FrameNode>) -> Self {
        Self {
            current,
            opener: None,
            opener_document: None,
        }
    }
}

impl HostEnvironment for StaticEnvironment {
    fn current(&self) -> Arc<dyn HostFrame> {
        self.current.clone()
    }

    fn opener(&self) -> Option<Arc<dyn HostFrame>> {
        self.opener
            .clone()
            .map(|frame| frame as Arc<dyn HostFrame>)
    }

    fn opener_document(&self) -> Option<Arc<dyn HostFrame>> {
        self.opener_document
            .clone()
            .map(|frame| frame as Arc<dyn HostFrame>)
    }
}

/// An environment whose parent chain carries a conformant 2004 host at the
/// immediate parent. Returns the environment and the API for assertions.
pub fn parent_hosted_2004() -> (Arc<StaticEnvironment>, Arc<ScriptedApi>) {
    parent_hosted(ScriptedApi::conformant(), true)
}

pub fn parent_hosted(api: ScriptedApi, scorm_2004: bool) -> (Arc<StaticEnvironment>, Arc<ScriptedApi>) {
    let api = Arc::new(api);
    let handle: ApiHandle = api.clone();
    let root = if scorm_2004 {
        FrameNode::root_with_2004(handle)
    } else {
        FrameNode::root_with_scorm12(handle)
    };
    let leaf = FrameNode::child_of(root);
    (Arc::new(StaticEnvironment::frames_only(leaf)), api)
}
