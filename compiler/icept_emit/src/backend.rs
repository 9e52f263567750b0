//! The seam between the emitter and whatever produces interceptor code.

use icept_registry::RequestGroup;
use thiserror::Error;

/// Turns one request group into one interceptor unit.
///
/// A backend either produces a complete artifact for the group or fails for
/// that group as a whole. It is called once per group, in plan order.
pub trait EmissionBackend {
    /// What a successfully emitted unit looks like (class bytes, a listing,
    /// a handle to a written file, ...).
    type Artifact;

    fn emit_unit(&mut self, group: &RequestGroup) -> Result<Self::Artifact, BackendError>;
}

/// A backend could not produce a unit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        BackendError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
