//! Request registry and generation plan.
//!
//! Collects [`InterceptionRequest`]s in whatever order scanning produces
//! them and turns them into a [`GenerationPlan`]:
//!
//! ```text
//! scanner workers ──RequestSink──► collector ──► RequestRegistry
//!                                                   │ into_plan()
//!                                                   ▼
//!        merge duplicates, reject conflicts, group by target owner, sort
//!                                                   │
//!                                                   ▼
//!                                            GenerationPlan
//! ```
//!
//! The plan depends only on the *set* of requests. Arrival order, worker
//! scheduling and hash map iteration order never reach the output: groups
//! are sorted by owner, members by canonical signature, and duplicate
//! extras are concatenated in discovery-site order.
//!
//! [`InterceptionRequest`]: icept_model::InterceptionRequest

mod discovery;
mod error;
mod merge;
mod plan;
mod registry;

pub use discovery::{collect, RequestSink, Scanner};
pub use error::{CollectError, Competitor, ConflictingInterception, PlanError, PlanErrors};
pub use plan::{GenerationPlan, PlanStats, PlannedInterception, RequestGroup};
pub use registry::RequestRegistry;
