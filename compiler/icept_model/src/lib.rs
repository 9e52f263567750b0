//! Interception request model.
//!
//! Value types describing one "redirect this callable to that implementation"
//! fact, as discovered by a scanner:
//!
//! ```text
//! RawDiscovery ──validate──► InterceptionRequest
//!                              ├── CallableSignature   (the call being intercepted)
//!                              ├── RedirectionTarget   (where calls go instead)
//!                              ├── ExtrasContainer     (ordered metadata)
//!                              └── DiscoverySite       (where it was declared)
//! ```
//!
//! Everything here is immutable once constructed. Requests are handed to the
//! registry by value, which is what freezes them: once moved, no producer can
//! reach the request or its extras again.
//!
//! # Canonical forms
//!
//! [`TypeRef`], [`TypeDescriptor`], [`CallableSignature`] and
//! [`RedirectionTarget`] each expose a canonical string. Equality, hashing
//! and ordering agree with that string, so the registry can sort on it and
//! get the same order on every run.

mod descriptor;
mod error;
mod extras;
mod request;
mod signature;
mod target;
mod type_ref;

pub use descriptor::{FieldType, ReturnType, TypeDescriptor, MAX_ARRAY_DIMENSIONS};
pub use error::{InvalidRequest, ModelError};
pub use extras::{BinaryCompatibility, ExtraItem, ExtraKind, ExtrasContainer, ItemsOfKind};
pub use request::{DiscoverySite, InterceptionRequest, RawCallable, RawDiscovery};
pub use signature::{CallableKind, CallableSignature};
pub use target::RedirectionTarget;
pub use type_ref::TypeRef;
