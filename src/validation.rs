//! Reported (never thrown) validation outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What went wrong with a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Variant name not in the table and matching no dynamic pattern
    InvalidVariant,
    /// Responsive variant written after a state variant
    VariantOrderError,
    /// Bracket syntax not recognized
    InvalidArbitrarySyntax,
    /// Prefix that does not accept arbitrary values
    InvalidArbitraryPrefix,
    /// `prefix-[]` or blank bracket content
    EmptyArbitraryValue,
    /// Not present in the project's class universe
    UnknownClass,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::InvalidVariant => "invalid-variant",
            DiagnosticKind::VariantOrderError => "variant-order",
            DiagnosticKind::InvalidArbitrarySyntax => "invalid-arbitrary-syntax",
            DiagnosticKind::InvalidArbitraryPrefix => "invalid-arbitrary-prefix",
            DiagnosticKind::EmptyArbitraryValue => "empty-arbitrary-value",
            DiagnosticKind::UnknownClass => "unknown-class",
        };
        f.write_str(name)
    }
}

/// A single reported problem with best-effort suggestions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub reason: String,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, reason: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            suggestions,
        }
    }

    pub(crate) fn invalid_variant(variant: &str, suggestions: Vec<String>) -> Self {
        Self::new(
            DiagnosticKind::InvalidVariant,
            format!("Unknown variant '{}'", variant),
            suggestions,
        )
    }

    pub(crate) fn variant_order(responsive: &str, state: &str) -> Self {
        Self::new(
            DiagnosticKind::VariantOrderError,
            format!(
                "Responsive variant '{}' must come before state variant '{}'",
                responsive, state
            ),
            Vec::new(),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.reason)?;
        if !self.suggestions.is_empty() {
            write!(f, " (did you mean: {})", self.suggestions.join(", "))?;
        }
        Ok(())
    }
}

/// Outcome of validating a class or arbitrary value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationResult {
    Valid,
    Invalid {
        kind: DiagnosticKind,
        reason: String,
        suggestions: Vec<String>,
    },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn invalid(kind: DiagnosticKind, reason: impl Into<String>, suggestions: Vec<String>) -> Self {
        ValidationResult::Invalid {
            kind,
            reason: reason.into(),
            suggestions,
        }
    }

    /// The diagnostic carried by an `Invalid` result
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid { kind, reason, suggestions } => {
                Some(Diagnostic::new(*kind, reason.clone(), suggestions.clone()))
            }
        }
    }
}

impl From<Diagnostic> for ValidationResult {
    fn from(diagnostic: Diagnostic) -> Self {
        ValidationResult::Invalid {
            kind: diagnostic.kind,
            reason: diagnostic.reason,
            suggestions: diagnostic.suggestions,
        }
    }
}
