//! Semantic conflict detection within one class attribute.
//!
//! Classes are only compared against others carrying the identical variant
//! chain: `p-4` and `hover:px-2` never conflict.

use crate::category::normalize_base;
use crate::token::ClassToken;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    Padding,
    Margin,
    Sizing,
    Display,
    Position,
}

impl ConflictKind {
    pub fn message(self) -> &'static str {
        match self {
            ConflictKind::Padding => "General padding is combined with directional padding",
            ConflictKind::Margin => "General margin is combined with directional margin",
            ConflictKind::Sizing => "Width or height values contradict each other",
            ConflictKind::Display => "Multiple display utilities are applied",
            ConflictKind::Position => "Multiple position utilities are applied",
        }
    }

    pub fn suggestion(self) -> &'static str {
        match self {
            ConflictKind::Padding => "Use either p-* or the directional px/py/pt/pr/pb/pl utilities",
            ConflictKind::Margin => "Use either m-* or the directional mx/my/mt/mr/mb/ml utilities",
            ConflictKind::Sizing => "Keep a single width or height utility",
            ConflictKind::Display => "Keep only one display utility",
            ConflictKind::Position => "Keep only one position utility",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConflictKind::Padding => "padding",
            ConflictKind::Margin => "margin",
            ConflictKind::Sizing => "sizing",
            ConflictKind::Display => "display",
            ConflictKind::Position => "position",
        };
        f.write_str(name)
    }
}

/// A detected contradiction between two or more tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,

    /// Shared variant chain of the bucket the conflict was found in
    pub variants: Vec<String>,

    /// Involved tokens in order of appearance
    pub tokens: Vec<ClassToken>,

    pub message: String,
    pub suggestion: String,
}

impl Conflict {
    fn new(kind: ConflictKind, variants: &[String], tokens: Vec<ClassToken>) -> Self {
        Self {
            kind,
            variants: variants.to_vec(),
            tokens,
            message: kind.message().to_string(),
            suggestion: kind.suggestion().to_string(),
        }
    }

    /// Raw class names of the involved tokens
    pub fn classes(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.raw.as_str()).collect()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.kind, self.message, self.classes().join(", "))
    }
}

const DISPLAY_VALUES: &[&str] = &[
    "block", "inline", "inline-block", "flex", "inline-flex", "grid", "inline-grid", "table",
    "inline-table", "hidden",
];

const POSITION_VALUES: &[&str] = &["static", "fixed", "absolute", "relative", "sticky"];

type Check = fn(&[&ClassToken]) -> Option<(ConflictKind, Vec<ClassToken>)>;

/// Checks in reporting order
const CHECKS: &[Check] = &[padding_conflict, margin_conflict, display_conflict, position_conflict, sizing_conflict];

/// Find conflicts, bucket by bucket, in the fixed check order
pub fn detect_conflicts(tokens: &[ClassToken]) -> Vec<Conflict> {
    let mut buckets: IndexMap<&[String], Vec<&ClassToken>> = IndexMap::new();
    for token in tokens {
        buckets.entry(token.variants.as_slice()).or_default().push(token);
    }

    let mut conflicts = Vec::new();
    for (variants, bucket) in &buckets {
        for check in CHECKS {
            if let Some((kind, involved)) = check(bucket) {
                conflicts.push(Conflict::new(kind, variants, involved));
            }
        }
    }

    if !conflicts.is_empty() {
        log::debug!("found {} conflict(s) across {} bucket(s)", conflicts.len(), buckets.len());
    }
    conflicts
}

fn padding_conflict(tokens: &[&ClassToken]) -> Option<(ConflictKind, Vec<ClassToken>)> {
    spacing_conflict(tokens, 'p').map(|involved| (ConflictKind::Padding, involved))
}

fn margin_conflict(tokens: &[&ClassToken]) -> Option<(ConflictKind, Vec<ClassToken>)> {
    spacing_conflict(tokens, 'm').map(|involved| (ConflictKind::Margin, involved))
}

fn display_conflict(tokens: &[&ClassToken]) -> Option<(ConflictKind, Vec<ClassToken>)> {
    keyword_conflict(tokens, DISPLAY_VALUES).map(|involved| (ConflictKind::Display, involved))
}

fn position_conflict(tokens: &[&ClassToken]) -> Option<(ConflictKind, Vec<ClassToken>)> {
    keyword_conflict(tokens, POSITION_VALUES).map(|involved| (ConflictKind::Position, involved))
}

/// `p-*` together with `p[xyltrb]-*` (or the `m` equivalents)
fn spacing_conflict(tokens: &[&ClassToken], axis: char) -> Option<Vec<ClassToken>> {
    let involved: Vec<(bool, &ClassToken)> = tokens
        .iter()
        .filter_map(|token| {
            let base = normalize_base(&token.base);
            let rest = base.strip_prefix(axis)?;
            if rest.starts_with('-') {
                return Some((true, *token));
            }
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some('x' | 'y' | 'l' | 't' | 'r' | 'b'), Some('-')) => Some((false, *token)),
                _ => None,
            }
        })
        .collect();

    let has_general = involved.iter().any(|(general, _)| *general);
    let has_directional = involved.iter().any(|(general, _)| !*general);
    (has_general && has_directional).then(|| involved.into_iter().map(|(_, t)| t.clone()).collect())
}

fn keyword_conflict(tokens: &[&ClassToken], keywords: &[&str]) -> Option<Vec<ClassToken>> {
    let involved: Vec<ClassToken> = tokens
        .iter()
        .filter(|token| keywords.contains(&normalize_base(&token.base)))
        .map(|token| (*token).clone())
        .collect();
    (involved.len() >= 2).then_some(involved)
}

/// Numeric width/height contradictions are not evaluated; flagging without
/// comparing scale values would produce false positives.
fn sizing_conflict(_tokens: &[&ClassToken]) -> Option<(ConflictKind, Vec<ClassToken>)> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::parse_class_tokens;

    fn conflicts(input: &str) -> Vec<Conflict> {
        detect_conflicts(&parse_class_tokens(input))
    }

    #[test]
    fn test_padding_conflict() {
        let found = conflicts("p-4 px-2");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ConflictKind::Padding);
        assert_eq!(found[0].classes(), vec!["p-4", "px-2"]);
        assert_eq!(found[0].message, ConflictKind::Padding.message());
    }

    #[test]
    fn test_padding_lists_every_directional_token() {
        let found = conflicts("pt-1 p-4 text-sm pb-2 pl-3");
        assert_eq!(found[0].classes(), vec!["pt-1", "p-4", "pb-2", "pl-3"]);
    }

    #[test]
    fn test_different_variant_chains_do_not_conflict() {
        assert!(conflicts("hover:p-4 px-2").is_empty());
        assert!(conflicts("md:flex hidden").is_empty());
    }

    #[test]
    fn test_same_variant_chain_conflicts() {
        let found = conflicts("md:hover:p-4 md:hover:py-1 md:p-2");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].variants, vec!["md", "hover"]);
    }

    #[test]
    fn test_directional_only_is_fine() {
        assert!(conflicts("px-4 py-2").is_empty());
        assert!(conflicts("p-4 p-2").is_empty());
    }

    #[test]
    fn test_margin_conflict_with_negative_values() {
        let found = conflicts("-m-2 mt-4");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, ConflictKind::Margin);
    }

    #[test]
    fn test_display_and_position_conflicts() {
        let found = conflicts("flex hidden absolute relative block");
        let kinds: Vec<ConflictKind> = found.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ConflictKind::Display, ConflictKind::Position]);
        assert_eq!(found[0].classes(), vec!["flex", "hidden", "block"]);
    }

    #[test]
    fn test_check_order_is_fixed() {
        let found = conflicts("absolute fixed block grid m-1 mx-1 p-1 py-1");
        let kinds: Vec<ConflictKind> = found.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ConflictKind::Padding, ConflictKind::Margin, ConflictKind::Display, ConflictKind::Position]
        );
    }

    #[test]
    fn test_sizing_never_flags() {
        assert!(conflicts("w-4 w-8 h-2 h-full").is_empty());
    }

    #[test]
    fn test_similar_prefixes_are_not_spacing() {
        assert!(conflicts("p-4 place-items-center pointer-events-none").is_empty());
        assert!(conflicts("m-2 max-w-sm mix-blend-multiply").is_empty());
    }
}
