//! Error module orchestrator; the implementation lives in the private
//! `types` module.

mod types;

pub use types::{Result, ScormError};
