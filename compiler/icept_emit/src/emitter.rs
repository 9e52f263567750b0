//! Plan-order, fail-fast emission.

use icept_diagnostic::{Diagnostic, ErrorCode};
use icept_model::TypeRef;
use icept_registry::GenerationPlan;
use thiserror::Error;

use crate::{BackendError, EmissionBackend};

/// The backend failed on one group; emission stopped there.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("failed to emit interceptor unit for `{owner}`: {source}")]
pub struct EmissionFailure {
    owner: TypeRef,
    /// Position of the failing group in the plan.
    index: usize,
    total: usize,
    #[source]
    source: BackendError,
}

impl EmissionFailure {
    pub fn owner(&self) -> &TypeRef {
        &self.owner
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn backend_error(&self) -> &BackendError {
        &self.source
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::E3001)
            .with_message(self.to_string())
            .with_note(format!(
                "emission stopped at unit {} of {}; artifacts from earlier units were discarded",
                self.index + 1,
                self.total
            ))
    }
}

/// Emit every group of `plan`, in order.
///
/// Returns one artifact per group, in plan order. The first backend failure
/// aborts the rest of the plan and everything emitted so far is dropped.
pub fn emit_plan<B: EmissionBackend>(
    plan: &GenerationPlan,
    backend: &mut B,
) -> Result<Vec<B::Artifact>, EmissionFailure> {
    let total = plan.groups().len();
    let _span = tracing::debug_span!("emit_plan", units = total).entered();

    let mut artifacts = Vec::with_capacity(total);
    for (index, group) in plan.groups().iter().enumerate() {
        tracing::trace!(owner = %group.owner(), members = group.len(), "emitting unit");
        match backend.emit_unit(group) {
            Ok(artifact) => artifacts.push(artifact),
            Err(source) => {
                tracing::debug!(owner = %group.owner(), index, error = %source, "emission failed");
                return Err(EmissionFailure {
                    owner: group.owner().clone(),
                    index,
                    total,
                    source,
                });
            }
        }
    }

    tracing::debug!(units = artifacts.len(), "emission finished");
    Ok(artifacts)
}
