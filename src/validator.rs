//! Full validation of single raw classes.
//!
//! Runs the variant chain checks, the arbitrary-value parser and, when a class
//! universe is loaded, an existence check. Results are memoized in the
//! [`ClassCache`] handed in by the caller; swapping the universe means the
//! caller must call [`ClassCache::invalidate_validation`].

use crate::arbitrary::parse_arbitrary_with;
use crate::cache::ClassCache;
use crate::config::{ClassKitConfig, VariantConfig};
use crate::tokenizer::tokenize;
use crate::universe::ClassUniverse;
use crate::validation::{Diagnostic, DiagnosticKind, ValidationResult};
use crate::variant::decompose_with;

#[derive(Debug, Clone, Default)]
pub struct ClassValidator {
    variants: VariantConfig,
    extra_prefixes: Vec<String>,
    universe: Option<ClassUniverse>,
}

impl ClassValidator {
    pub fn new(config: &ClassKitConfig) -> Self {
        Self {
            variants: config.variants.clone(),
            extra_prefixes: config.arbitrary.extra_prefixes.clone(),
            universe: None,
        }
    }

    pub fn with_universe(mut self, universe: ClassUniverse) -> Self {
        self.universe = Some(universe);
        self
    }

    pub fn universe(&self) -> Option<&ClassUniverse> {
        self.universe.as_ref()
    }

    /// First problem with `raw`, or `Valid`
    pub fn validate(&self, raw: &str, cache: &ClassCache) -> ValidationResult {
        if let Some(hit) = cache.validations.get(raw) {
            return hit;
        }

        let result = self
            .diagnostics(raw, cache)
            .into_iter()
            .next()
            .map(ValidationResult::from)
            .unwrap_or(ValidationResult::Valid);

        cache.validations.insert(raw.to_string(), result.clone());
        result
    }

    /// Every problem with `raw`, variant chain first
    pub fn diagnostics(&self, raw: &str, cache: &ClassCache) -> Vec<Diagnostic> {
        let decomposition = decompose_with(raw, &self.variants);
        let mut diagnostics = decomposition.diagnostics;
        let base = decomposition.base.as_str();

        // Arbitrary properties are generated on demand and never listed
        if base.is_empty() || base.starts_with('[') {
            return diagnostics;
        }

        if looks_arbitrary(base) {
            if let Some(diagnostic) = parse_arbitrary_with(base, &self.extra_prefixes).diagnostic() {
                diagnostics.push(diagnostic);
            }
            return diagnostics;
        }

        if let Some(universe) = &self.universe {
            let unmarked = base.trim_matches('!');
            if !universe.contains(base) && !universe.contains(unmarked) {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnknownClass,
                    format!("Class '{}' is not defined in this project", unmarked),
                    self.suggestions(unmarked, universe, cache),
                ));
            }
        }

        diagnostics
    }

    /// Validate every class of an attribute value, in order
    pub fn validate_all(&self, class_string: &str, cache: &ClassCache) -> Vec<(String, ValidationResult)> {
        tokenize(class_string)
            .into_iter()
            .map(|raw| (raw.text.to_string(), self.validate(raw.text, cache)))
            .collect()
    }

    fn suggestions(&self, base: &str, universe: &ClassUniverse, cache: &ClassCache) -> Vec<String> {
        if let Some(hit) = cache.suggestions.get(base) {
            return hit;
        }
        let nearest = universe.nearest(base);
        cache.suggestions.insert(base.to_string(), nearest.clone());
        nearest
    }
}

/// `prefix-[...]`, including malformed bracket syntax the parser should report
fn looks_arbitrary(base: &str) -> bool {
    base.contains("-[")
}
