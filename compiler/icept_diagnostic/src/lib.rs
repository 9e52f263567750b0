//! Diagnostic system for interception pipeline errors.
//!
//! Every fatal problem the pipeline can hit (malformed discovery, conflicting
//! redirections, backend failures) is reported as a [`Diagnostic`]:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary label (which discovery site)
//! - Secondary labels (the other sites involved)
//! - Notes and help lines
//!
//! Locations are plain strings. The pipeline has no source text, only
//! discovery sites reported by the scanner, so there are no spans to render.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
