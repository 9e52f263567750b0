use icept_diagnostic::emitter::ColorMode;
use icept_diagnostic::{Diagnostic, ErrorCode};
use icept_emit::{BackendError, EmissionBackend, ListingBackend};
use icept_model::{CallableKind, DiscoverySite, RawCallable, RawDiscovery};
use icept_registry::{RequestGroup, RequestSink, Scanner};
use pretty_assertions::assert_eq;

use crate::{render_diagnostics, run_pipeline, ErrorPhase, PipelineConfig};

/// Each unit is a list of `(method, target owner)` pairs declared on `Src`.
struct PairScanner;

impl Scanner for PairScanner {
    type Unit = Vec<(&'static str, &'static str)>;

    fn scan(&self, unit: &Self::Unit, sink: &mut RequestSink) {
        for (method, target_owner) in unit {
            sink.submit(RawDiscovery {
                site: DiscoverySite::new(format!("{method}.java"), *method),
                callable: RawCallable::new("Src", *method, "()V"),
                kind: CallableKind::Static,
                target: RawCallable::new(*target_owner, *method, "()V"),
                extras: Vec::new(),
            });
        }
    }
}

struct FailingBackend;

impl EmissionBackend for FailingBackend {
    type Artifact = ();

    fn emit_unit(&mut self, _group: &RequestGroup) -> Result<(), BackendError> {
        Err(BackendError::new("disk full"))
    }
}

fn config() -> PipelineConfig {
    PipelineConfig {
        num_threads: 2,
        color: ColorMode::Never,
    }
}

#[test]
fn default_config_uses_global_pool() {
    let config = PipelineConfig::default();
    assert_eq!(config.num_threads, 0);
    assert_eq!(config.color, ColorMode::Auto);
}

#[test]
fn run_success_reports_stats() {
    let units = vec![vec![("a", "X"), ("b", "Y")], vec![("a", "X")]];
    let output = run_pipeline(&PairScanner, &units, &mut ListingBackend::new(), &config());

    assert!(
        output.success,
        "expected success, got phase={:?}, diagnostics={:?}",
        output.error_phase, output.diagnostics
    );
    assert_eq!(output.artifacts.len(), 2);
    assert!(output.diagnostics.is_empty());
    assert!(output.report.is_empty());

    let stats = output.stats.unwrap_or_default();
    assert_eq!(stats.requests, 3);
    assert_eq!(stats.duplicates_merged, 1);
}

#[test]
fn run_conflict_reports_plan_phase() {
    let units = vec![vec![("a", "X")], vec![("a", "Y")]];
    let output = run_pipeline(&PairScanner, &units, &mut ListingBackend::new(), &config());

    assert!(!output.success);
    assert_eq!(output.error_phase, Some(ErrorPhase::Plan));
    assert!(output.artifacts.is_empty());
    assert!(output.stats.is_none());
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].code, ErrorCode::E2001);
    assert!(output.report.starts_with("error[E2001]: conflicting interception"));
    assert!(output.report.ends_with("error: aborting due to previous error\n"));
}

#[test]
fn run_invalid_discovery_reports_discovery_phase() {
    let units = vec![vec![("<clinit>", "X")]];
    let output = run_pipeline(&PairScanner, &units, &mut ListingBackend::new(), &config());

    assert!(!output.success);
    assert_eq!(output.error_phase, Some(ErrorPhase::Discovery));
    assert_eq!(output.diagnostics[0].code, ErrorCode::E1003);
}

#[test]
fn run_backend_failure_reports_emission_phase() {
    let units = vec![vec![("a", "X")]];
    let output = run_pipeline(&PairScanner, &units, &mut FailingBackend, &config());

    assert!(!output.success);
    assert_eq!(output.error_phase, Some(ErrorPhase::Emission));
    assert!(output.artifacts.is_empty());
    assert_eq!(output.stats.map(|s| s.interceptions), Some(1));
    assert_eq!(output.diagnostics[0].code, ErrorCode::E3001);
}

#[test]
fn render_diagnostics_plain() {
    let diagnostics = vec![Diagnostic::error(ErrorCode::E3001)
        .with_message("failed to emit interceptor unit for `X`: disk full")];
    let rendered = render_diagnostics(&diagnostics, ColorMode::Never);
    assert_eq!(
        rendered,
        [
            "error[E3001]: failed to emit interceptor unit for `X`: disk full",
            "",
            "error: aborting due to previous error",
            "",
        ]
        .join("\n")
    );
}

#[test]
fn render_diagnostics_empty() {
    assert_eq!(render_diagnostics(&[], ColorMode::Always), "");
}
