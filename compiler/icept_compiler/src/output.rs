//! Result types for the pipeline driver.

use icept_diagnostic::emitter::ColorMode;
use icept_diagnostic::Diagnostic;
use icept_registry::PlanStats;

use crate::render_diagnostics;

/// Which phase stopped the run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorPhase {
    /// The worker pool could not start, or a discovery failed validation.
    Discovery,
    /// Conflicting interceptions.
    Plan,
    /// The backend rejected a unit.
    Emission,
}

/// Result of one pipeline run.
#[derive(Clone, Debug)]
pub struct GenerateOutput<A> {
    /// Whether every phase completed.
    pub success: bool,
    /// One artifact per request group, in plan order. Empty on failure.
    pub artifacts: Vec<A>,
    /// Plan statistics, once a plan was built.
    pub stats: Option<PlanStats>,
    pub diagnostics: Vec<Diagnostic>,
    pub error_phase: Option<ErrorPhase>,
    /// `diagnostics` rendered for humans (empty on success).
    pub report: String,
}

impl<A> GenerateOutput<A> {
    pub(crate) fn succeeded(artifacts: Vec<A>, stats: PlanStats) -> Self {
        GenerateOutput {
            success: true,
            artifacts,
            stats: Some(stats),
            diagnostics: Vec::new(),
            error_phase: None,
            report: String::new(),
        }
    }

    pub(crate) fn failed(
        phase: ErrorPhase,
        diagnostics: Vec<Diagnostic>,
        stats: Option<PlanStats>,
        color: ColorMode,
    ) -> Self {
        let report = render_diagnostics(&diagnostics, color);
        GenerateOutput {
            success: false,
            artifacts: Vec::new(),
            stats,
            diagnostics,
            error_phase: Some(phase),
            report,
        }
    }
}
