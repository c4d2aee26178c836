//! Variant chain decomposition and validation.
//!
//! A raw class such as `md:hover:bg-red-500` is split into its variant chain
//! (`["md", "hover"]`) and base utility (`bg-red-500`). Colons nested inside
//! `[...]` or `(...)` never split, so arbitrary variants like `[&:hover]` and
//! arbitrary properties like `[display:flex]` survive intact.

use crate::config::VariantConfig;
use crate::validation::Diagnostic;
use serde::{Deserialize, Serialize};

/// How a variant scopes the utility it prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantKind {
    /// Breakpoint variants (`sm` .. `2xl`)
    Responsive,
    /// Pseudo-class style state variants (`hover`, `focus`, ...)
    State,
    /// Everything else (`dark`, `print`, pseudo-elements, ...)
    Other,
}

/// Static rule for a known variant name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantRule {
    pub kind: VariantKind,
    pub rank: u16,
}

const fn rule(kind: VariantKind, rank: u16) -> VariantRule {
    VariantRule { kind, rank }
}

use VariantKind::{Other, Responsive, State};

/// Breakpoints in increasing width; the index is the breakpoint rank.
pub const BREAKPOINTS: &[&str] = &["sm", "md", "lg", "xl", "2xl"];

static VARIANT_RULES: &[(&str, VariantRule)] = &[
    ("sm", rule(Responsive, 0)),
    ("md", rule(Responsive, 1)),
    ("lg", rule(Responsive, 2)),
    ("xl", rule(Responsive, 3)),
    ("2xl", rule(Responsive, 4)),
    // Interaction
    ("hover", rule(State, 10)),
    ("focus", rule(State, 11)),
    ("focus-within", rule(State, 12)),
    ("focus-visible", rule(State, 13)),
    ("active", rule(State, 14)),
    ("visited", rule(State, 15)),
    ("target", rule(State, 16)),
    // Form state
    ("disabled", rule(State, 20)),
    ("enabled", rule(State, 21)),
    ("checked", rule(State, 22)),
    ("indeterminate", rule(State, 23)),
    ("default", rule(State, 24)),
    ("required", rule(State, 25)),
    ("optional", rule(State, 26)),
    ("valid", rule(State, 27)),
    ("invalid", rule(State, 28)),
    ("user-valid", rule(State, 29)),
    ("user-invalid", rule(State, 30)),
    ("in-range", rule(State, 31)),
    ("out-of-range", rule(State, 32)),
    ("placeholder-shown", rule(State, 33)),
    ("autofill", rule(State, 34)),
    ("read-only", rule(State, 35)),
    ("open", rule(State, 36)),
    ("inert", rule(State, 37)),
    // Structural
    ("first", rule(State, 40)),
    ("last", rule(State, 41)),
    ("only", rule(State, 42)),
    ("odd", rule(State, 43)),
    ("even", rule(State, 44)),
    ("first-of-type", rule(State, 45)),
    ("last-of-type", rule(State, 46)),
    ("only-of-type", rule(State, 47)),
    ("empty", rule(State, 48)),
    // Media and environment
    ("dark", rule(Other, 60)),
    ("print", rule(Other, 61)),
    ("motion-safe", rule(Other, 62)),
    ("motion-reduce", rule(Other, 63)),
    ("contrast-more", rule(Other, 64)),
    ("contrast-less", rule(Other, 65)),
    ("forced-colors", rule(Other, 66)),
    ("portrait", rule(Other, 67)),
    ("landscape", rule(Other, 68)),
    ("rtl", rule(Other, 69)),
    ("ltr", rule(Other, 70)),
    ("starting", rule(Other, 71)),
    // Pseudo-elements
    ("before", rule(Other, 80)),
    ("after", rule(Other, 81)),
    ("placeholder", rule(Other, 82)),
    ("file", rule(Other, 83)),
    ("marker", rule(Other, 84)),
    ("selection", rule(Other, 85)),
    ("first-line", rule(Other, 86)),
    ("first-letter", rule(Other, 87)),
    ("backdrop", rule(Other, 88)),
    // Group/peer containers
    ("group", rule(Other, 90)),
    ("peer", rule(Other, 91)),
    ("*", rule(Other, 92)),
];

/// Look up the static rule for a variant name (ASCII case-insensitive)
pub fn variant_rule(name: &str) -> Option<VariantRule> {
    VARIANT_RULES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, rule)| *rule)
}

/// Breakpoint index for a responsive variant
pub fn breakpoint_rank(name: &str) -> Option<u16> {
    match variant_rule(name) {
        Some(VariantRule { kind: Responsive, rank }) => Some(rank),
        _ => None,
    }
}

/// Resolve the kind of a variant, including the dynamic patterns.
///
/// Returns `None` for names that are neither in the table, in `extra`, nor
/// match a dynamic pattern.
pub fn variant_kind(name: &str, extra: &VariantConfig) -> Option<VariantKind> {
    if let Some(rule) = variant_rule(name) {
        return Some(rule.kind);
    }
    if extra.extra_state.iter().any(|v| v == name) {
        return Some(State);
    }
    if extra.extra.iter().any(|v| v == name) {
        return Some(Other);
    }
    dynamic_variant_kind(name)
}

fn dynamic_variant_kind(name: &str) -> Option<VariantKind> {
    if is_bracketed(name) {
        return Some(Other);
    }
    if let Some(rest) = name.strip_prefix("data-").or_else(|| name.strip_prefix("aria-")) {
        return (!rest.is_empty()).then_some(Other);
    }
    for container in ["group-", "peer-"] {
        if let Some(rest) = name.strip_prefix(container) {
            // group-hover, group-hover/name, group-[.is-open]
            let state = rest.split('/').next().unwrap_or(rest);
            if is_bracketed(state) || matches!(variant_rule(state), Some(r) if r.kind == State) {
                return Some(State);
            }
            return None;
        }
    }
    if let Some(rest) = name.strip_prefix("not-") {
        return matches!(variant_rule(rest), Some(r) if r.kind == State)
            .then_some(State)
            .or_else(|| is_bracketed(rest).then_some(State));
    }
    if let Some(rest) = name.strip_prefix("max-") {
        if BREAKPOINTS.contains(&rest) || is_bracketed(rest) {
            return Some(Other);
        }
        return None;
    }
    for prefix in ["min-", "supports-", "has-", "in-", "nth-last-", "nth-"] {
        if let Some(rest) = name.strip_prefix(prefix) {
            return is_bracketed(rest).then_some(Other);
        }
    }
    None
}

fn is_bracketed(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('[') && s.ends_with(']')
}

/// A raw class split into variant chain and base utility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Variant chain in written order
    pub variants: Vec<String>,

    /// Utility with variants stripped
    pub base: String,

    /// Problems found in the variant chain
    pub diagnostics: Vec<Diagnostic>,
}

impl Decomposition {
    /// True when the chain produced no diagnostics
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Largest breakpoint rank present in the chain
    pub fn responsive_rank(&self) -> Option<u16> {
        self.variants.iter().filter_map(|v| breakpoint_rank(v)).max()
    }
}

/// Split `raw` on top-level colons.
///
/// Every segment except the last is a variant; the last is the base.
/// Colons inside `[...]` or `(...)` are not split points.
pub fn split_variants(raw: &str) -> (Vec<&str>, &str) {
    let mut variants = Vec::new();
    let mut depth = 0usize;
    let mut segment_start = 0;

    for (idx, ch) in raw.char_indices() {
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                variants.push(&raw[segment_start..idx]);
                segment_start = idx + 1;
            }
            _ => {}
        }
    }

    (variants, &raw[segment_start..])
}

/// Decompose using only the built-in variant table
pub fn decompose(raw: &str) -> Decomposition {
    decompose_with(raw, &VariantConfig::default())
}

/// Decompose a raw class, validating each variant against the table plus `extra`
pub fn decompose_with(raw: &str, extra: &VariantConfig) -> Decomposition {
    let (variants, base) = split_variants(raw);
    let mut diagnostics = Vec::new();
    let mut seen_state: Option<&str> = None;

    for &variant in &variants {
        match variant_kind(variant, extra) {
            Some(State) => {
                seen_state.get_or_insert(variant);
            }
            Some(Responsive) => {
                if let Some(state) = seen_state {
                    diagnostics.push(Diagnostic::variant_order(variant, state));
                }
            }
            Some(Other) => {}
            None => {
                diagnostics.push(Diagnostic::invalid_variant(variant, suggest_variants(variant, extra)));
            }
        }
    }

    Decomposition {
        variants: variants.into_iter().map(str::to_string).collect(),
        base: base.to_string(),
        diagnostics,
    }
}

/// Best-effort nearest variant names for an unknown one
pub fn suggest_variants(name: &str, extra: &VariantConfig) -> Vec<String> {
    if name.is_empty() {
        return Vec::new();
    }
    let lowered = name.to_ascii_lowercase();
    let mut scored: Vec<(f64, &str)> = VARIANT_RULES
        .iter()
        .map(|(key, _)| *key)
        .chain(extra.extra.iter().map(String::as_str))
        .chain(extra.extra_state.iter().map(String::as_str))
        .map(|candidate| (strsim::jaro_winkler(&lowered, candidate), candidate))
        .filter(|(score, _)| *score >= 0.8)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(3).map(|(_, c)| c.to_string()).collect()
}
