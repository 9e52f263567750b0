//! Core diagnostic types for structured error reporting.
//!
//! Defines [`Diagnostic`] and [`Label`], the building blocks every pipeline
//! phase uses to report fatal problems. Every diagnostic is an error.

use std::fmt;

use crate::ErrorCode;

/// A labeled location with a message.
///
/// The location is whatever the scanner used to identify a discovery site,
/// typically `unit: element`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    /// The location this label points at.
    pub location: String,
    /// The label text explaining this location.
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(location: impl Into<String>, message: impl Into<String>) -> Self {
        Label {
            location: location.into(),
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(location: impl Into<String>, message: impl Into<String>) -> Self {
        Label {
            location: location.into(),
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic with all context needed to locate the problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Main error message.
    pub message: String,
    /// Labeled locations showing where the error occurred.
    pub labels: Vec<Label>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
    /// Text suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, location: impl Into<String>, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(location, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(
        mut self,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.labels.push(Label::secondary(location, message));
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Get the primary location (first primary label's location).
    pub fn primary_location(&self) -> Option<&str> {
        self.labels
            .iter()
            .find(|l| l.is_primary)
            .map(|l| l.location.as_str())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error [{}]: {}", self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {marker} {}: {}", label.location, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
