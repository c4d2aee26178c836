use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Tailwind class string toolkit - sorts, classifies and lints class attribute values
#[derive(Parser, Debug)]
#[command(name = "tw-classkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase log verbosity (repeatable)"
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sort class strings into canonical order
    Sort(SortArgs),
    /// Report conflicts and invalid classes
    Lint(LintArgs),
    /// Show the category and CSS of each class
    Classify(ClassifyArgs),
}

/// Arguments for the sort command
#[derive(Parser, Debug, Clone)]
pub struct SortArgs {
    /// Class strings; each stdin line is one class string when omitted
    #[arg(value_name = "CLASSES", num_args = 0..)]
    pub classes: Vec<String>,

    /// Keep leading and trailing whitespace of each class string
    #[arg(
        long = "preserve-edges",
        default_value_t = false,
        help = "Keep leading and trailing whitespace around the sorted classes"
    )]
    pub preserve_edges: bool,
}

/// Arguments for the lint command
#[derive(Parser, Debug, Clone)]
pub struct LintArgs {
    /// Class strings; each stdin line is one class string when omitted
    #[arg(value_name = "CLASSES", num_args = 0..)]
    pub classes: Vec<String>,

    /// Configuration file path (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        env = "TW_CLASSKIT_CONFIG",
        help = "Path to configuration file (YAML or JSON format)"
    )]
    pub config: Option<PathBuf>,

    /// Exported class list used for existence checks
    #[arg(
        short = 'u',
        long = "universe",
        value_name = "PATH",
        help = "JSON class list (array or {\"classes\": [...]}) to check class existence against"
    )]
    pub universe: Option<PathBuf>,

    /// Emit a JSON report
    #[arg(
        long = "json",
        default_value_t = false,
        help = "Print a JSON lint report instead of text"
    )]
    pub json: bool,

    /// Number of parallel threads to use
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "NUM",
        help = "Number of parallel threads to use (defaults to number of CPU cores)"
    )]
    pub jobs: Option<usize>,
}

/// Arguments for the classify command
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Class strings; each stdin line is one class string when omitted
    #[arg(value_name = "CLASSES", num_args = 0..)]
    pub classes: Vec<String>,

    /// Configuration file path (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        env = "TW_CLASSKIT_CONFIG",
        help = "Path to configuration file (YAML or JSON format)"
    )]
    pub config: Option<PathBuf>,

    /// Emit JSON
    #[arg(
        long = "json",
        default_value_t = false,
        help = "Print classified tokens as JSON"
    )]
    pub json: bool,
}

impl LintArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> Result<(), String> {
        if let Some(jobs) = self.jobs {
            if jobs == 0 {
                return Err("Number of jobs must be at least 1".to_string());
            }
        }

        if let (Some(config), Some(universe)) = (&self.config, &self.universe) {
            if config == universe {
                return Err("Config and universe paths must be different".to_string());
            }
        }

        if let Some(universe) = &self.universe {
            if universe.extension().and_then(|e| e.to_str()) != Some("json") {
                return Err(format!("Class universe must be a .json file: {}", universe.display()));
            }
        }

        Ok(())
    }
}
