//! Diagnostic and error types
//!
//! Validation never panics and never raises for ordinary misuse. A failed
//! check is reported as a [`Diagnostic`]: readable text plus the category
//! that tells "the value is bad" apart from "the options are bad".

use thiserror::Error;

// ============================================================================
// Verdict
// ============================================================================

/// Outcome of a single validation call
///
/// `Ok(())` is the valid sentinel; a failure always carries non-empty text.
pub type Verdict = Result<(), Diagnostic>;

// ============================================================================
// Diagnostic
// ============================================================================

/// Classification of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagnosticKind {
    /// The value fails a constraint
    ValueInvalid,
    /// A constraint option is malformed, so the value could not be checked
    OptionsInvalid,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValueInvalid => write!(f, "value_invalid"),
            Self::OptionsInvalid => write!(f, "options_invalid"),
        }
    }
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{message}")]
pub struct Diagnostic {
    /// Failure category
    pub kind: DiagnosticKind,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create a value-invalid diagnostic
    pub fn value(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::ValueInvalid,
            message: message.into(),
        }
    }

    /// Create an options-invalid diagnostic
    pub fn options(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::OptionsInvalid,
            message: message.into(),
        }
    }

    /// Message text
    pub fn as_str(&self) -> &str {
        &self.message
    }

    /// Whether the options, not the value, were at fault
    pub fn is_options_invalid(&self) -> bool {
        self.kind == DiagnosticKind::OptionsInvalid
    }
}

impl From<Diagnostic> for String {
    fn from(diagnostic: Diagnostic) -> Self {
        diagnostic.message
    }
}

// ============================================================================
// FailureReport
// ============================================================================

/// Every failure collected by a group of narrowed validators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_report(.diagnostics))]
pub struct FailureReport {
    /// Failures in call order
    pub diagnostics: Vec<Diagnostic>,
}

fn render_report(diagnostics: &[Diagnostic]) -> String {
    let joined = diagnostics
        .iter()
        .map(Diagnostic::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    format!("{} validation failure(s): {}", diagnostics.len(), joined)
}

// ============================================================================
// OptionsError
// ============================================================================

/// Structural error while building `Options` from a dynamic record
///
/// Only shape problems that leave no way to represent the options are
/// reported here. Malformed option values (a string `gte`, an unknown type
/// tag inside `types`) are kept and reported as options-invalid diagnostics
/// when a validator runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("options must be a record, got {0}")]
    NotARecord(String),

    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("`{path}` must be {expected}, got {found}")]
    WrongShape {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("'{0}' is not a known type tag")]
    UnknownTypeTag(String),

    #[cfg(feature = "serde")]
    #[error("invalid JSON: {0}")]
    Json(String),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for OptionsError {
    fn from(err: serde_json::Error) -> Self {
        OptionsError::Json(err.to_string())
    }
}
