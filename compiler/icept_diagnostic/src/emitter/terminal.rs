//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.

use std::io::Write;

use crate::Diagnostic;

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// `is_tty` is only consulted in `Auto` mode.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_code(&mut self, code: &str) {
        self.write_colored(&format!("[{code}]"), colors::BOLD);
    }

    fn write_trailer(&mut self, kind: &str, color: &str, text: &str) {
        let _ = write!(self.writer, "  = ");
        self.write_colored(kind, color);
        let _ = writeln!(self.writer, ": {text}");
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        self.write_colored("error", colors::ERROR);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            let _ = write!(self.writer, "  {marker} ");
            self.write_colored(&label.location, colors::BOLD);
            let _ = write!(self.writer, ": ");
            if label.is_primary {
                self.write_colored(&label.message, colors::ERROR);
            } else {
                self.write_colored(&label.message, colors::SECONDARY);
            }
            let _ = writeln!(self.writer);
        }

        for note in &diagnostic.notes {
            self.write_trailer("note", colors::BOLD, note);
        }

        for suggestion in &diagnostic.suggestions {
            self.write_trailer("help", colors::HELP, suggestion);
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        if error_count == 0 {
            return;
        }
        self.write_colored("error", colors::ERROR);
        if error_count == 1 {
            let _ = writeln!(self.writer, ": aborting due to previous error");
        } else {
            let _ = writeln!(self.writer, ": aborting due to {error_count} previous errors");
        }
    }
}
