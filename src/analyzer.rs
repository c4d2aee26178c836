use crate::cache::ClassCache;
use crate::classifier::Classifier;
use crate::config::ClassKitConfig;
use crate::conflict::{detect_conflicts, Conflict};
use crate::errors::Result;
use crate::sorter;
use crate::token::ClassToken;
use crate::tokenizer::tokenize;
use crate::universe::{ClassUniverse, ClassUniverseProvider};
use crate::validation::Diagnostic;
use crate::validator::ClassValidator;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

/// A diagnostic tied to the class occurrence it was found on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDiagnostic {
    /// Raw class as typed
    pub class: String,

    /// Byte range of the class in the analyzed string
    pub span: Range<usize>,

    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

/// Everything the model knows about one class attribute value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// The analyzed string, unchanged
    pub input: String,

    /// Canonical ordering of `input`
    pub sorted: String,

    /// Classified tokens in written order; empty-base tokens are omitted
    pub tokens: Vec<ClassToken>,

    pub conflicts: Vec<Conflict>,

    pub diagnostics: Vec<ClassDiagnostic>,
}

impl Analysis {
    /// True when there are conflicts or diagnostics
    pub fn has_issues(&self) -> bool {
        !self.conflicts.is_empty() || !self.diagnostics.is_empty()
    }

    /// True when sorting would change the class order
    pub fn needs_sorting(&self) -> bool {
        tokenize(&self.input)
            .iter()
            .map(|raw| raw.text)
            .ne(tokenize(&self.sorted).iter().map(|raw| raw.text))
    }
}

/// Facade tying the classifier, validator, conflict detector and sorter to one
/// configuration
#[derive(Debug, Clone, Default)]
pub struct ClassAnalyzer {
    config: ClassKitConfig,
    classifier: Classifier,
    validator: ClassValidator,
}

impl ClassAnalyzer {
    pub fn new(config: ClassKitConfig) -> Self {
        Self {
            classifier: Classifier::new(config.theme.extend.clone()),
            validator: ClassValidator::new(&config),
            config,
        }
    }

    /// Load configuration from a file and create an analyzer
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = ClassKitConfig::from_file(path)?;
        Ok(Self::new(config))
    }

    /// Check class existence against `universe` as well
    pub fn with_universe(mut self, universe: ClassUniverse) -> Self {
        self.validator = self.validator.with_universe(universe);
        self
    }

    /// Load the universe for `project_root` from `provider`
    pub fn with_universe_from(self, provider: &dyn ClassUniverseProvider, project_root: &Path) -> Result<Self> {
        let universe = provider.load(project_root)?;
        Ok(self.with_universe(universe))
    }

    pub fn config(&self) -> &ClassKitConfig {
        &self.config
    }

    /// A cache sized by this analyzer's configuration
    pub fn new_cache(&self) -> ClassCache {
        ClassCache::new(&self.config.cache)
    }

    /// Tokenize, classify, validate and conflict-check one attribute value
    pub fn analyze(&self, class_string: &str, cache: &ClassCache) -> Analysis {
        let raw_tokens = tokenize(class_string);
        log::debug!("analyzing {} raw class(es)", raw_tokens.len());

        let mut tokens = Vec::with_capacity(raw_tokens.len());
        let mut diagnostics = Vec::new();

        for raw in &raw_tokens {
            diagnostics.extend(self.validator.diagnostics(raw.text, cache).into_iter().map(|diagnostic| {
                ClassDiagnostic {
                    class: raw.text.to_string(),
                    span: raw.span(),
                    diagnostic,
                }
            }));

            if let Some(token) = ClassToken::from_raw(raw, &self.classifier, &self.config.variants, Some(cache)) {
                tokens.push(token);
            }
        }

        let conflicts = detect_conflicts(&tokens);

        Analysis {
            input: class_string.to_string(),
            sorted: self.sort(class_string),
            tokens,
            conflicts,
            diagnostics,
        }
    }

    pub fn sort(&self, class_string: &str) -> String {
        sorter::sort(class_string)
    }

    /// Analyze many attribute values in parallel, keeping input order
    pub fn analyze_batch<S>(&self, inputs: &[S], cache: &ClassCache) -> Vec<Analysis>
    where
        S: AsRef<str> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.analyze(input.as_ref(), cache))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::conflict::ConflictKind;
    use crate::validation::DiagnosticKind;

    #[test]
    fn test_analyze_collects_everything() {
        let analyzer = ClassAnalyzer::default();
        let cache = analyzer.new_cache();
        let analysis = analyzer.analyze("text-white p-4 px-2 hovr:flex bg-blue-500", &cache);

        assert_eq!(analysis.tokens.len(), 5);
        assert_eq!(analysis.sorted, "hovr:flex p-4 px-2 bg-blue-500 text-white");
        assert_eq!(analysis.conflicts.len(), 1);
        assert_eq!(analysis.conflicts[0].kind, ConflictKind::Padding);
        assert_eq!(analysis.diagnostics.len(), 1);
        assert_eq!(analysis.diagnostics[0].class, "hovr:flex");
        assert_eq!(analysis.diagnostics[0].diagnostic.kind, DiagnosticKind::InvalidVariant);
        assert!(analysis.has_issues());
        assert!(analysis.needs_sorting());
    }

    #[test]
    fn test_clean_input() {
        let analyzer = ClassAnalyzer::default();
        let cache = analyzer.new_cache();
        let analysis = analyzer.analyze("flex p-4 bg-blue-500 text-white", &cache);
        assert!(!analysis.has_issues());
        assert!(!analysis.needs_sorting());
    }

    #[test]
    fn test_spaced_arbitrary_value_in_canonical_order() {
        let analyzer = ClassAnalyzer::default();
        let cache = analyzer.new_cache();
        let input = "flex grid-cols-[repeat(auto-fit, minmax(250px,1fr))]";
        let analysis = analyzer.analyze(input, &cache);
        assert_eq!(analysis.sorted, input);
        assert!(!analysis.needs_sorting());

        let analysis = analyzer.analyze("grid-cols-[repeat(auto-fit, minmax(250px,1fr))] flex", &cache);
        assert!(analysis.needs_sorting());
    }

    #[test]
    fn test_diagnostic_spans_point_into_input() {
        let analyzer = ClassAnalyzer::default();
        let cache = analyzer.new_cache();
        let input = "flex  foo-[1px]";
        let analysis = analyzer.analyze(input, &cache);
        let diag = &analysis.diagnostics[0];
        assert_eq!(&input[diag.span.clone()], "foo-[1px]");
        assert_eq!(diag.diagnostic.kind, DiagnosticKind::InvalidArbitraryPrefix);
    }

    #[test]
    fn test_theme_colors_flow_into_tokens() {
        let mut config = ClassKitConfig::default();
        config.theme.extend.colors.insert("brand".to_string(), "#0066cc".to_string());
        let analyzer = ClassAnalyzer::new(config);
        let cache = analyzer.new_cache();

        let analysis = analyzer.analyze("bg-brand", &cache);
        assert_eq!(analysis.tokens[0].category, Category::Background);
        assert_eq!(analysis.tokens[0].property.as_ref().map(|p| p.value.as_str()), Some("#0066cc"));
        assert!(cache.classifications.contains("bg-brand"));
    }

    #[test]
    fn test_universe_reports_unknown_classes() {
        let analyzer = ClassAnalyzer::default().with_universe(ClassUniverse::new(["flex", "p-4"]));
        let cache = analyzer.new_cache();
        let analysis = analyzer.analyze("flex p-4 p-44", &cache);
        assert_eq!(analysis.diagnostics.len(), 1);
        assert_eq!(analysis.diagnostics[0].diagnostic.kind, DiagnosticKind::UnknownClass);
        assert_eq!(analysis.diagnostics[0].diagnostic.suggestions, vec!["p-4".to_string()]);
    }

    #[test]
    fn test_batch_keeps_order() {
        let analyzer = ClassAnalyzer::default();
        let cache = analyzer.new_cache();
        let inputs: Vec<String> = (0..50).map(|i| format!("m-{} flex mt-1", i)).collect();
        let results = analyzer.analyze_batch(&inputs, &cache);

        assert_eq!(results.len(), 50);
        for (input, analysis) in inputs.iter().zip(&results) {
            assert_eq!(&analysis.input, input);
            assert_eq!(analysis.conflicts[0].kind, ConflictKind::Margin);
        }
    }
}
