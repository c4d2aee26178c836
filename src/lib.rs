//! Semantic model of Tailwind CSS class strings.
//!
//! A class attribute value goes through the tokenizer, the variant decomposer
//! and the category classifier; the conflict detector and the sorter work on
//! the resulting tokens. All of these are pure functions. [`ClassAnalyzer`]
//! bundles them with configuration, validation and a [`ClassCache`].

pub mod analyzer;
pub mod arbitrary;
pub mod cache;
pub mod category;
pub mod classifier;
pub mod config;
pub mod conflict;
pub mod errors;
pub mod palette;
pub mod report;
pub mod sorter;
pub mod token;
pub mod tokenizer;
pub mod universe;
pub mod validation;
pub mod validator;
pub mod variant;

#[cfg(feature = "cli")]
pub mod args;

pub use analyzer::{Analysis, ClassAnalyzer, ClassDiagnostic};
pub use arbitrary::{is_arbitrary, parse_arbitrary, parse_arbitrary_with};
pub use cache::{BoundedCache, ClassCache};
pub use category::{Category, SpacingKind};
pub use classifier::{classify, Classification, Classifier, CssDeclaration};
pub use config::{ClassKitConfig, CacheConfig, ThemeExtend, VariantConfig};
pub use conflict::{detect_conflicts, Conflict, ConflictKind};
pub use errors::{ClassKitError, Result};
pub use report::{LintReport, LintReportBuilder};
pub use sorter::{sort, sort_preserving_edges};
pub use token::{parse_class_tokens, ClassToken};
pub use tokenizer::{tokenize, RawToken};
pub use universe::{ClassUniverse, ClassUniverseProvider, JsonClassUniverse};
pub use validation::{Diagnostic, DiagnosticKind, ValidationResult};
pub use validator::ClassValidator;
pub use variant::{decompose, decompose_with, Decomposition, VariantKind};

#[cfg(feature = "cli")]
pub use args::{ClassifyArgs, Cli, Commands, LintArgs, SortArgs};

#[cfg(feature = "cli")]
mod commands {
    use super::*;
    use std::io::{BufRead, Write};
    use std::path::Path;

    /// The class strings given on the command line, or one per stdin line
    pub fn collect_inputs(classes: &[String]) -> Result<Vec<String>> {
        if !classes.is_empty() {
            return Ok(classes.to_vec());
        }
        let stdin = std::io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().split(b'\n') {
            let bytes = line?;
            let text = String::from_utf8_lossy(&bytes);
            lines.push(text.strip_suffix('\r').unwrap_or(&*text).to_string());
        }
        log::debug!("read {} line(s) from stdin", lines.len());
        Ok(lines)
    }

    fn load_config(path: Option<&Path>) -> Result<ClassKitConfig> {
        match path {
            Some(path) => ClassKitConfig::from_file(path),
            None => Ok(ClassKitConfig::default()),
        }
    }

    /// Write one sorted line per input
    pub fn handle_sort_command(args: &SortArgs, inputs: &[String], out: &mut impl Write) -> Result<()> {
        for input in inputs {
            let sorted = if args.preserve_edges {
                sort_preserving_edges(input)
            } else {
                sort(input)
            };
            writeln!(out, "{}", sorted)?;
        }
        Ok(())
    }

    /// Analyze every input and print the report; the caller decides the exit code
    pub fn handle_lint_command(args: &LintArgs, inputs: &[String], out: &mut impl Write) -> Result<LintReport> {
        args.validate().map_err(ClassKitError::InvalidInput)?;

        if let Some(jobs) = args.jobs {
            // Only the first configuration of the global pool takes effect
            let _ = rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global();
        }

        let mut analyzer = ClassAnalyzer::new(load_config(args.config.as_deref())?);
        if let Some(path) = &args.universe {
            analyzer = analyzer.with_universe_from(&JsonClassUniverse::new(path), Path::new("."))?;
        }

        let cache = analyzer.new_cache();
        let analyses = analyzer.analyze_batch(inputs, &cache);
        let source = if args.classes.is_empty() { "stdin" } else { "args" };
        let report = LintReportBuilder::new().with_source(source).build(&analyses);

        if args.json {
            writeln!(out, "{}", report.to_pretty_json()?)?;
        } else {
            write_lint_text(&analyses, out)?;
        }

        log::info!(
            "linted {} class string(s), {} with issues",
            report.metadata.inputs_processed,
            report.metadata.inputs_with_issues
        );
        Ok(report)
    }

    fn write_lint_text(analyses: &[Analysis], out: &mut impl Write) -> Result<()> {
        for analysis in analyses.iter().filter(|a| a.has_issues()) {
            writeln!(out, "{}", analysis.input.trim())?;
            for conflict in &analysis.conflicts {
                writeln!(out, "  conflict {}", conflict)?;
                writeln!(out, "    suggestion: {}", conflict.suggestion)?;
            }
            for diagnostic in &analysis.diagnostics {
                writeln!(out, "  {}: {}", diagnostic.class, diagnostic.diagnostic)?;
            }
        }
        Ok(())
    }

    /// One row (or JSON array) of classified tokens per input
    pub fn handle_classify_command(args: &ClassifyArgs, inputs: &[String], out: &mut impl Write) -> Result<()> {
        let config = load_config(args.config.as_deref())?;
        let classifier = Classifier::new(config.theme.extend.clone());

        for input in inputs {
            let tokens: Vec<ClassToken> = tokenize(input)
                .iter()
                .filter_map(|raw| ClassToken::from_raw(raw, &classifier, &config.variants, None))
                .collect();

            if args.json {
                writeln!(out, "{}", serde_json::to_string(&tokens)?)?;
                continue;
            }
            for token in &tokens {
                let declaration = token.property.as_ref().map(ToString::to_string).unwrap_or_default();
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    token.raw,
                    token.variants.join(":"),
                    token.category,
                    declaration
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use commands::{collect_inputs, handle_classify_command, handle_lint_command, handle_sort_command};
