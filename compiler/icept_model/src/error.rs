//! Construction errors for model values.

use icept_diagnostic::{Diagnostic, ErrorCode};
use thiserror::Error;

use crate::DiscoverySite;

/// A model value could not be constructed from its textual parts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid type reference `{name}`: {reason}")]
    InvalidTypeRef { name: String, reason: &'static str },

    #[error("malformed descriptor `{descriptor}`: {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },

    #[error("invalid signature `{callable}`: {reason}")]
    InvalidSignature { callable: String, reason: String },

    #[error("invalid redirection target `{callable}`: {reason}")]
    InvalidTarget { callable: String, reason: String },
}

impl ModelError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ModelError::InvalidTypeRef { .. } => ErrorCode::E1001,
            ModelError::InvalidDescriptor { .. } => ErrorCode::E1002,
            ModelError::InvalidSignature { .. } => ErrorCode::E1003,
            ModelError::InvalidTarget { .. } => ErrorCode::E1004,
        }
    }
}

/// A discovery tuple that failed validation, tied to where it was found.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid interception request at {site}: {error}")]
pub struct InvalidRequest {
    site: DiscoverySite,
    #[source]
    error: ModelError,
}

impl InvalidRequest {
    pub fn new(site: DiscoverySite, error: ModelError) -> Self {
        InvalidRequest { site, error }
    }

    pub fn site(&self) -> &DiscoverySite {
        &self.site
    }

    pub fn error(&self) -> &ModelError {
        &self.error
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.error.code())
            .with_message(self.error.to_string())
            .with_label(self.site.to_string(), "interception declared here")
    }
}
