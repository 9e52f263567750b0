//! Portable icept pipeline driver.
//!
//! Runs discovery, planning and emission end to end for embedding in build
//! tools and test harnesses. No filesystem access: source units come in
//! through a [`Scanner`](icept_registry::Scanner), artifacts go out through an
//! [`EmissionBackend`](icept_emit::EmissionBackend).
//!
//! # Usage
//!
//! ```ignore
//! use icept_compiler::{run_pipeline, PipelineConfig};
//! use icept_emit::ListingBackend;
//!
//! let output = run_pipeline(&scanner, &units, &mut ListingBackend::new(), &PipelineConfig::default());
//! if !output.success {
//!     eprint!("{}", output.report);
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! icept_model ─► icept_registry ─► icept_emit
//!                        ↓              ↓
//!                  icept_compiler  ← this crate
//! ```

mod output;
mod pipeline;

pub use output::{ErrorPhase, GenerateOutput};
pub use pipeline::{run_pipeline, PipelineConfig};

use std::sync::Once;

use icept_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use icept_diagnostic::Diagnostic;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging the pipeline.
///
/// Does nothing unless `RUST_LOG` is set. With `ICEPT_LOG_TREE=1` spans are
/// printed as an indented tree instead of flat lines.
///
/// Example: `RUST_LOG=icept_registry=debug cargo test`
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let tree = std::env::var_os("ICEPT_LOG_TREE").is_some_and(|v| v == "1");
            let flat_layer = (!tree).then(|| fmt::layer().with_target(true).with_level(true));
            let tree_layer = tree.then(|| {
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_indent_lines(true)
            });
            tracing_subscriber::registry()
                .with(flat_layer)
                .with(tree_layer)
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Render diagnostics to a string, followed by an error summary line.
///
/// Never treats the output as a terminal, so `ColorMode::Auto` renders
/// without colors.
pub fn render_diagnostics(diagnostics: &[Diagnostic], color: ColorMode) -> String {
    let mut buf = Vec::new();
    {
        let mut emitter = TerminalEmitter::with_color_mode(&mut buf, color, false);
        emitter.emit_all(diagnostics);
        emitter.emit_summary(diagnostics.len());
        emitter.flush();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests;
