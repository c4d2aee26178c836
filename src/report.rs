use crate::analyzer::{Analysis, ClassDiagnostic};
use crate::conflict::{Conflict, ConflictKind};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata for a lint run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Version of the report format
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: DateTime<Utc>,

    /// Number of class strings analyzed
    pub inputs_processed: usize,

    /// Number of class strings with at least one conflict or diagnostic
    pub inputs_with_issues: usize,

    /// Where the class strings came from, e.g. `stdin` or `args`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
}

/// A conflict reduced to what a reader needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictSummary {
    pub kind: ConflictKind,
    pub classes: Vec<String>,
    pub message: String,
    pub suggestion: String,
}

impl From<&Conflict> for ConflictSummary {
    fn from(conflict: &Conflict) -> Self {
        Self {
            kind: conflict.kind,
            classes: conflict.classes().into_iter().map(str::to_string).collect(),
            message: conflict.message.clone(),
            suggestion: conflict.suggestion.clone(),
        }
    }
}

/// Findings for one class string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub input: String,
    pub sorted: String,
    pub needs_sorting: bool,
    pub conflicts: Vec<ConflictSummary>,
    pub diagnostics: Vec<ClassDiagnostic>,
}

/// Totals across all entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStatistics {
    pub classes_analyzed: usize,

    /// Token count per category name, most frequent first
    pub classes_by_category: IndexMap<String, usize>,

    pub conflicts_by_kind: IndexMap<String, usize>,

    pub diagnostics_by_kind: IndexMap<String, usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

/// Complete lint report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintReport {
    pub metadata: ReportMetadata,

    pub entries: Vec<ReportEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ReportStatistics>,
}

impl LintReport {
    pub fn new() -> Self {
        Self {
            metadata: ReportMetadata {
                version: "1.0.0".to_string(),
                generated_at: Utc::now(),
                inputs_processed: 0,
                inputs_with_issues: 0,
                source: None,
                tool_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
            entries: Vec::new(),
            statistics: None,
        }
    }

    /// Record one analysis. Clean inputs are counted but get no entry
    /// unless `keep_clean` is set.
    pub fn add_analysis(&mut self, analysis: &Analysis, keep_clean: bool) {
        self.metadata.inputs_processed += 1;
        let has_issues = analysis.has_issues();
        if has_issues {
            self.metadata.inputs_with_issues += 1;
        }
        if !has_issues && !keep_clean {
            return;
        }

        self.entries.push(ReportEntry {
            input: analysis.input.clone(),
            sorted: analysis.sorted.clone(),
            needs_sorting: analysis.needs_sorting(),
            conflicts: analysis.conflicts.iter().map(ConflictSummary::from).collect(),
            diagnostics: analysis.diagnostics.clone(),
        });
    }

    /// True when any analyzed input had a conflict or diagnostic
    pub fn has_issues(&self) -> bool {
        self.metadata.inputs_with_issues > 0
    }

    /// Compute totals over `analyses`
    pub fn calculate_statistics(&mut self, analyses: &[Analysis], processing_time_ms: Option<u64>) {
        let mut classes_by_category: IndexMap<String, usize> = IndexMap::new();
        let mut conflicts_by_kind: IndexMap<String, usize> = IndexMap::new();
        let mut diagnostics_by_kind: IndexMap<String, usize> = IndexMap::new();
        let mut classes_analyzed = 0;

        for analysis in analyses {
            classes_analyzed += analysis.tokens.len();
            for token in &analysis.tokens {
                *classes_by_category.entry(token.category.name().to_string()).or_default() += 1;
            }
            for conflict in &analysis.conflicts {
                *conflicts_by_kind.entry(conflict.kind.to_string()).or_default() += 1;
            }
            for diagnostic in &analysis.diagnostics {
                *diagnostics_by_kind.entry(diagnostic.diagnostic.kind.to_string()).or_default() += 1;
            }
        }

        classes_by_category.sort_by(|_, a, _, b| b.cmp(a));

        self.statistics = Some(ReportStatistics {
            classes_analyzed,
            classes_by_category,
            conflicts_by_kind,
            diagnostics_by_kind,
            processing_time_ms,
        });
    }

    /// Convert report to JSON value
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_compact_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Default for LintReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder pattern for creating lint reports
pub struct LintReportBuilder {
    report: LintReport,
    keep_clean: bool,
    start_time: Option<std::time::Instant>,
}

impl LintReportBuilder {
    pub fn new() -> Self {
        Self {
            report: LintReport::new(),
            keep_clean: false,
            start_time: Some(std::time::Instant::now()),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.report.metadata.source = Some(source.into());
        self
    }

    /// Also emit entries for inputs without findings
    pub fn keep_clean_entries(mut self, keep: bool) -> Self {
        self.keep_clean = keep;
        self
    }

    /// Build the final report with statistics over `analyses`
    pub fn build(mut self, analyses: &[Analysis]) -> LintReport {
        for analysis in analyses {
            self.report.add_analysis(analysis, self.keep_clean);
        }
        let processing_time = self.start_time.map(|t| t.elapsed().as_millis() as u64);
        self.report.calculate_statistics(analyses, processing_time);
        self.report
    }
}

impl Default for LintReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
