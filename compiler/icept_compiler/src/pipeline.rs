//! Core pipeline: discover → plan → emit.

use icept_diagnostic::emitter::ColorMode;
use icept_emit::{emit_plan, EmissionBackend};
use icept_registry::{collect, PlanError, Scanner};

use crate::output::{ErrorPhase, GenerateOutput};

/// Configuration for a pipeline run.
#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    /// Discovery worker count. `0` uses rayon's global pool.
    pub num_threads: usize,
    /// Color mode for [`GenerateOutput::report`].
    pub color: ColorMode,
}

/// Scan `units`, build the generation plan and emit it through `backend`.
///
/// Every problem found while planning is reported, not just the first. On
/// failure `error_phase` names the earliest phase with a problem and no
/// artifacts are returned.
pub fn run_pipeline<S, B>(
    scanner: &S,
    units: &[S::Unit],
    backend: &mut B,
    config: &PipelineConfig,
) -> GenerateOutput<B::Artifact>
where
    S: Scanner,
    B: EmissionBackend,
{
    let _span = tracing::debug_span!("run_pipeline", units = units.len()).entered();

    // Discover
    let registry = match collect(scanner, units, config.num_threads) {
        Ok(registry) => registry,
        Err(err) => {
            return GenerateOutput::failed(
                ErrorPhase::Discovery,
                vec![err.to_diagnostic()],
                None,
                config.color,
            );
        }
    };

    // Plan
    let plan = match registry.into_plan() {
        Ok(plan) => plan,
        Err(errors) => {
            let phase = if errors
                .errors()
                .iter()
                .any(|e| matches!(e, PlanError::InvalidRequest(_)))
            {
                ErrorPhase::Discovery
            } else {
                ErrorPhase::Plan
            };
            return GenerateOutput::failed(phase, errors.to_diagnostics(), None, config.color);
        }
    };
    let stats = plan.stats();

    // Emit
    match emit_plan(&plan, backend) {
        Ok(artifacts) => {
            tracing::debug!(
                units = artifacts.len(),
                requests = stats.requests,
                "pipeline finished"
            );
            GenerateOutput::succeeded(artifacts, stats)
        }
        Err(failure) => GenerateOutput::failed(
            ErrorPhase::Emission,
            vec![failure.to_diagnostic()],
            Some(stats),
            config.color,
        ),
    }
}
