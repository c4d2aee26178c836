use anyhow::Context;
use clap::Parser;
use tailwind_classkit::{
    collect_inputs, handle_classify_command, handle_lint_command, handle_sort_command, Cli, Commands,
};

fn setup_logging(verbose_count: u8) {
    let log_level = match verbose_count {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Sort(args) => {
            let inputs = collect_inputs(&args.classes).context("Failed to read class strings")?;
            handle_sort_command(&args, &inputs, &mut out).context("Failed to write sorted classes")?;
        }
        Commands::Lint(args) => {
            let inputs = collect_inputs(&args.classes).context("Failed to read class strings")?;
            let report = handle_lint_command(&args, &inputs, &mut out).context("Lint failed")?;
            if report.has_issues() {
                drop(out);
                std::process::exit(1);
            }
        }
        Commands::Classify(args) => {
            let inputs = collect_inputs(&args.classes).context("Failed to read class strings")?;
            handle_classify_command(&args, &inputs, &mut out).context("Failed to classify classes")?;
        }
    }

    Ok(())
}
