use crate::arbitrary::is_arbitrary;
use crate::cache::ClassCache;
use crate::category::Category;
use crate::classifier::{Classifier, CssDeclaration};
use crate::config::VariantConfig;
use crate::tokenizer::{tokenize, RawToken};
use crate::validation::Diagnostic;
use crate::variant::{decompose_with, Decomposition};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One classified utility-class occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassToken {
    /// Exact substring as typed
    pub raw: String,

    /// Variant chain in written order
    pub variants: Vec<String>,

    /// Utility with variants stripped
    pub base: String,

    pub is_arbitrary: bool,

    pub category: Category,

    /// Concrete CSS when known
    pub property: Option<CssDeclaration>,

    /// Byte range of `raw` in the source string
    pub span: Range<usize>,

    /// Variant-chain problems found while decomposing
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl ClassToken {
    /// Build a token from a raw occurrence; `None` when the base is empty.
    pub fn from_raw(
        raw: &RawToken<'_>,
        classifier: &Classifier,
        variants: &VariantConfig,
        cache: Option<&ClassCache>,
    ) -> Option<Self> {
        let Decomposition { variants, base, diagnostics } = decompose_with(raw.text, variants);
        if base.is_empty() {
            log::debug!("dropping '{}': empty base utility", raw.text);
            return None;
        }

        let classification = match cache {
            Some(cache) => classifier.classify_cached(&base, cache),
            None => classifier.classify(&base),
        };

        Some(Self {
            raw: raw.text.to_string(),
            is_arbitrary: is_arbitrary(&base),
            category: classification.category,
            property: classification.declaration,
            variants,
            base,
            span: raw.span(),
            diagnostics,
        })
    }

    /// Parse a single class with the built-in tables
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = RawToken { text: raw, start: 0 };
        Self::from_raw(&raw, &Classifier::default(), &VariantConfig::default(), None)
    }

    /// `variants.join(":")` followed by the base
    pub fn reconstruct(&self) -> String {
        if self.variants.is_empty() {
            self.base.clone()
        } else {
            format!("{}:{}", self.variants.join(":"), self.base)
        }
    }
}

/// Tokenize and classify a whole attribute value with the built-in tables
pub fn parse_class_tokens(input: &str) -> Vec<ClassToken> {
    let classifier = Classifier::default();
    let variants = VariantConfig::default();
    tokenize(input)
        .iter()
        .filter_map(|raw| ClassToken::from_raw(raw, &classifier, &variants, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::SpacingKind;

    #[test]
    fn test_parse_single() {
        let token = ClassToken::parse("md:hover:bg-red-500").unwrap();
        assert_eq!(token.variants, vec!["md", "hover"]);
        assert_eq!(token.base, "bg-red-500");
        assert_eq!(token.category, Category::Background);
        assert_eq!(token.property.unwrap().value, "#ef4444");
        assert!(!token.is_arbitrary);
    }

    #[test]
    fn test_round_trip() {
        for raw in ["p-4", "md:hover:bg-red-500", "[&:hover]:underline", "dark:w-[calc(100%_-_1rem)]"] {
            let token = ClassToken::parse(raw).unwrap();
            assert_eq!(token.reconstruct(), raw);
            assert_eq!(token.raw, raw);
        }
    }

    #[test]
    fn test_empty_base_is_dropped() {
        assert!(ClassToken::parse("hover:").is_none());
        assert!(ClassToken::parse("").is_none());
    }

    #[test]
    fn test_arbitrary_flag() {
        let token = ClassToken::parse("w-[100px]").unwrap();
        assert!(token.is_arbitrary);
        assert_eq!(token.category, Category::Sizing);
    }

    #[test]
    fn test_parse_attribute_keeps_spans() {
        let input = "p-4  hover: px-2";
        let tokens = parse_class_tokens(input);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].category, Category::Spacing(SpacingKind::Padding));
        assert_eq!(&input[tokens[1].span.clone()], "px-2");
    }

    #[test]
    fn test_diagnostics_are_attached() {
        let token = ClassToken::parse("hover:md:flex").unwrap();
        assert_eq!(token.diagnostics.len(), 1);
    }
}
