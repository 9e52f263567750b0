//! Generation plan emission.
//!
//! Walks a [`GenerationPlan`](icept_registry::GenerationPlan) group by group
//! and hands each group to an [`EmissionBackend`], which turns it into one
//! interceptor unit. The emitter performs no validation of its own; the plan
//! it receives is already merged, conflict-free and ordered.
//!
//! ```text
//! GenerationPlan ──► emit_plan ──► backend.emit_unit(group) ──► artifacts
//!                        │
//!                        └─ first failure aborts; no partial artifact set
//! ```

mod backend;
mod emitter;
mod listing;

pub use backend::{BackendError, EmissionBackend};
pub use emitter::{emit_plan, EmissionFailure};
pub use listing::{ListingBackend, UnitListing};
