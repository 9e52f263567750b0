//! Fatal registry errors.

use std::fmt;

use icept_diagnostic::{Diagnostic, ErrorCode};
use icept_model::{CallableSignature, DiscoverySite, InvalidRequest, RedirectionTarget};
use thiserror::Error;

/// One of the targets competing for a single intercepted callable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Competitor {
    pub target: RedirectionTarget,
    /// Every site that declared this target, in site order.
    pub sites: Vec<DiscoverySite>,
}

/// Two or more distinct targets claim the same call site.
///
/// Competitors are sorted by target, so the error is identical no matter
/// which declaration was scanned first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictingInterception {
    signature: CallableSignature,
    competitors: Vec<Competitor>,
}

impl ConflictingInterception {
    pub(crate) fn new(signature: CallableSignature, competitors: Vec<Competitor>) -> Self {
        debug_assert!(competitors.len() >= 2, "a conflict needs two competitors");
        ConflictingInterception {
            signature,
            competitors,
        }
    }

    pub fn signature(&self) -> &CallableSignature {
        &self.signature
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    pub fn targets(&self) -> impl Iterator<Item = &RedirectionTarget> {
        self.competitors.iter().map(|c| &c.target)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(ErrorCode::E2001).with_message(self.to_string());
        let mut primary = true;
        for competitor in &self.competitors {
            let message = format!("redirected to `{}` here", competitor.target);
            for site in &competitor.sites {
                diag = if primary {
                    primary = false;
                    diag.with_label(site.to_string(), message.clone())
                } else {
                    diag.with_secondary_label(site.to_string(), message.clone())
                };
            }
        }
        diag.with_note(format!(
            "`{}` is owned by `{}`; a callable may only be redirected to one implementation",
            self.signature,
            self.signature.owner()
        ))
        .with_suggestion("remove all but one declaration, or make them agree on the implementation")
    }
}

impl fmt::Display for ConflictingInterception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conflicting interception of `{}`: redirected to ", self.signature)?;
        let last = self.competitors.len().saturating_sub(1);
        for (i, competitor) in self.competitors.iter().enumerate() {
            if i > 0 {
                f.write_str(if i == last { " and " } else { ", " })?;
            }
            write!(f, "`{}`", competitor.target)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConflictingInterception {}

/// A problem that prevents the plan from being built.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),

    #[error(transparent)]
    ConflictingInterception(#[from] ConflictingInterception),
}

impl PlanError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PlanError::InvalidRequest(err) => err.to_diagnostic(),
            PlanError::ConflictingInterception(err) => err.to_diagnostic(),
        }
    }

    /// Invalid requests first (by site), then conflicts (by signature).
    pub(crate) fn sort_key(&self) -> (u8, String) {
        match self {
            PlanError::InvalidRequest(err) => (0, err.site().to_string()),
            PlanError::ConflictingInterception(err) => (1, err.signature().canonical().to_owned()),
        }
    }
}

/// Every problem found while building a plan. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("generation plan rejected with {} error(s)", .errors.len())]
pub struct PlanErrors {
    errors: Vec<PlanError>,
}

impl PlanErrors {
    pub(crate) fn new(mut errors: Vec<PlanError>) -> Self {
        debug_assert!(!errors.is_empty());
        errors.sort_by_cached_key(PlanError::sort_key);
        PlanErrors { errors }
    }

    pub fn errors(&self) -> &[PlanError] {
        &self.errors
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &ConflictingInterception> {
        self.errors.iter().filter_map(|err| match err {
            PlanError::ConflictingInterception(conflict) => Some(conflict),
            PlanError::InvalidRequest(_) => None,
        })
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(PlanError::to_diagnostic).collect()
    }
}

/// Discovery could not run at all.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to start discovery worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CollectError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::E9001).with_message(self.to_string())
    }
}
