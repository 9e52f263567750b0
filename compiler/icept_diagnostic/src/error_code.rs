//! Error codes for all pipeline diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the pipeline phase that raised it.

use std::fmt;

/// Error codes for all pipeline diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Request construction (discovery validation)
/// - E2xxx: Registry (merge and conflict detection)
/// - E3xxx: Emission backend
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Request Errors (E1xxx)
    /// Invalid type reference
    E1001,
    /// Malformed method descriptor
    E1002,
    /// Invalid intercepted callable signature
    E1003,
    /// Invalid redirection target
    E1004,

    // Registry Errors (E2xxx)
    /// Conflicting interception of the same callable
    E2001,

    // Emission Errors (E3xxx)
    /// Emission backend failed to materialize a unit
    E3001,

    // Internal Errors (E9xxx)
    /// Internal pipeline error
    E9001,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
