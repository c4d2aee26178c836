//! Syntax-level validation of JIT arbitrary values (`prefix-[value]`).
//!
//! Values themselves are never checked: `w-[banana]` is valid here.

use crate::category::normalize_base;
use crate::validation::{DiagnosticKind, ValidationResult};
use once_cell::sync::Lazy;
use regex::Regex;

static ARBITRARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z-]+)-\[([^\]]*)\]").expect("arbitrary value regex"));

/// Prefixes that accept an arbitrary value
pub const ARBITRARY_PREFIXES: &[&str] = &[
    "w", "h", "min-w", "min-h", "max-w", "max-h",
    "p", "px", "py", "pt", "pr", "pb", "pl",
    "m", "mx", "my", "mt", "mr", "mb", "ml",
    "top", "right", "bottom", "left", "inset",
    "gap", "gap-x", "gap-y",
    "text", "leading", "tracking",
    "rounded", "bg", "border",
];

/// True when `base` uses `prefix-[...]` syntax, regardless of the prefix
pub fn is_arbitrary(base: &str) -> bool {
    ARBITRARY_RE.is_match(normalize_base(base))
}

/// Validate against the built-in whitelist
pub fn parse_arbitrary(base: &str) -> ValidationResult {
    parse_arbitrary_with(base, &[])
}

/// Validate against the built-in whitelist plus `extra_prefixes`
pub fn parse_arbitrary_with(base: &str, extra_prefixes: &[String]) -> ValidationResult {
    let candidate = normalize_base(base);
    let Some(captures) = ARBITRARY_RE.captures(candidate) else {
        return ValidationResult::invalid(
            DiagnosticKind::InvalidArbitrarySyntax,
            "Invalid arbitrary value syntax",
            Vec::new(),
        );
    };

    let prefix = &captures[1];
    let value = &captures[2];

    let known = ARBITRARY_PREFIXES.contains(&prefix) || extra_prefixes.iter().any(|p| p == prefix);
    if !known {
        return ValidationResult::invalid(
            DiagnosticKind::InvalidArbitraryPrefix,
            format!("Prefix '{}' does not support arbitrary values", prefix),
            suggest_prefixes(prefix, extra_prefixes),
        );
    }

    if value.trim().is_empty() {
        return ValidationResult::invalid(
            DiagnosticKind::EmptyArbitraryValue,
            format!("Arbitrary value for '{}' is empty", prefix),
            Vec::new(),
        );
    }

    ValidationResult::Valid
}

/// Whitelisted prefixes that are a prefix or suffix match of `rejected`
fn suggest_prefixes(rejected: &str, extra_prefixes: &[String]) -> Vec<String> {
    ARBITRARY_PREFIXES
        .iter()
        .copied()
        .chain(extra_prefixes.iter().map(String::as_str))
        .filter(|known| {
            known.starts_with(rejected)
                || rejected.starts_with(known)
                || known.ends_with(rejected)
                || rejected.ends_with(known)
        })
        .map(str::to_string)
        .collect()
}
