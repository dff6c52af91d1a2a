use anyhow::{bail, Context, Result};
use clap::Parser;
use reconcile_core::PeriodKey;
use reconcile_ingest::provider_for;
use reconcile_ledger::{period_summary, review_lines, write_csv_file, Pipeline, RuleTables};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod clipboard;
mod config;
mod state;

use clipboard::{ClipboardSink, SystemClipboard};
use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "reconcile",
    version,
    about = "Turn a bank statement into classified ledger journal entries"
)]
struct Cli {
    /// Statement to process (PDF, or text already extracted from one)
    input: PathBuf,

    /// Output CSV path (default: <MM-YYYY>.csv named after the statement period)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Don't copy the statement period to the clipboard
    #[arg(long)]
    no_clipboard: bool,

    /// Rules file replacing the built-in vendor and account tables
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Config file (default: ~/.reconcile/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting");

    reconcile(&cli)
}

fn reconcile(cli: &Cli) -> Result<ExitCode> {
    if !cli.input.is_file() {
        bail!("Statement not found: {}", cli.input.display());
    }

    let cfg = config::load_config(cli.config.as_deref())?;
    let tables = load_rules(cli, &cfg)?;
    let pipeline = Pipeline::new(&tables)?;

    println!("Processing {}...", cli.input.display());
    let today = chrono::Local::now().date_naive();
    let run = pipeline.process_document(provider_for(&cli.input).as_ref(), &cli.input, today);

    if let Some(err) = &run.acquisition_error {
        eprintln!("Could not read {}: {}", cli.input.display(), err);
    }

    if !run.has_transactions() {
        println!("No transactions found in {}", cli.input.display());
        return Ok(ExitCode::FAILURE);
    }

    println!(
        "Found {} transactions ({} unrecognized lines skipped)",
        run.entries.len(),
        run.stats.unparsed
    );

    let output = output_path(
        cli.output.as_deref(),
        cfg.output.directory.as_deref(),
        &run.period,
    );

    let exported = match write_csv_file(&run.entries, &output) {
        Ok(()) => {
            println!("Exported {} entries to {}", run.entries.len(), output.display());
            true
        }
        Err(e) => {
            tracing::warn!(path = %output.display(), error = %e, "export failed");
            eprintln!("Warning: export failed: {}", e);
            false
        }
    };

    if !cli.no_clipboard && cfg.clipboard.enabled {
        if let Some(summary) = period_summary(&run.entries) {
            let sink = match &cfg.clipboard.command {
                Some(argv) => SystemClipboard::with_command(argv.clone()),
                None => SystemClipboard::for_platform(),
            };
            copy_summary(&sink, &summary);
        }
    }

    let review = review_lines(&run.entries);
    if review.is_empty() {
        println!("All transactions classified.");
    } else {
        println!("{} transactions need manual review:", review.len());
        for line in &review {
            println!("  {}", line);
        }
    }

    if exported {
        println!("{}", saved_message(&output));
    }

    Ok(ExitCode::SUCCESS)
}

/// `--rules` wins over the config file; otherwise the built-in tables.
fn load_rules(cli: &Cli, cfg: &Config) -> Result<RuleTables> {
    let path = cli.rules.as_deref().or(cfg.rules.file.as_deref());
    match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading rules");
            RuleTables::from_file(p).with_context(|| format!("load rules from {}", p.display()))
        }
        None => Ok(RuleTables::builtin()?),
    }
}

fn output_path(explicit: Option<&Path>, directory: Option<&Path>, period: &PeriodKey) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let name = format!("{}.csv", period.file_stem());
    match directory {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn saved_message(output: &Path) -> String {
    let abs = std::path::absolute(output).unwrap_or_else(|_| output.to_path_buf());
    format!("Complete! File saved as: {}", abs.display())
}

fn copy_summary(sink: &dyn ClipboardSink, summary: &str) {
    match sink.copy(summary) {
        Ok(()) => println!("Copied to clipboard: {}", summary),
        Err(e) => {
            tracing::warn!(error = %e, "clipboard copy failed");
            println!("Could not copy to clipboard: {:#}", e);
        }
    }
}
