//! logsweep - delete rotated log files past their retention window.
//!
//! Usage:
//!   logsweep --dir /var/log/app --match '^app-(?P<date>\d{8})\.log$' \
//!            --layout 20060102 --keep 7 [--dry]
//!   logsweep --config /etc/logsweep.toml
//!   logsweep --help

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use color_eyre::eyre::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use logsweep_core::{ConfigError, FileConfig, SweepConfig};
use logsweep_ops::{SweepSummary, Sweeper};

#[derive(Parser, Debug)]
#[command(
    name = "logsweep",
    version,
    about = "Delete log files whose filename date is older than a retention window",
    long_about = "logsweep walks a directory tree, extracts the date embedded in each \
                  file name with a regular expression, and deletes files older than \
                  the retention window.\n\n\
                  The --match pattern must contain a named capture group for the date, \
                  e.g. '^app-(?P<date>\\d{8})\\.log$'. The --layout is either strftime \
                  ('%Y%m%d') or the reference date 'Mon Jan 2 15:04:05 -0700 MST 2006' \
                  written in the expected shape ('20060102')."
)]
struct Cli {
    /// Directory to sweep recursively (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// File name pattern with a named date capture group
    #[arg(long = "match", value_name = "REGEX")]
    pattern: Option<String>,

    /// Layout of the captured date
    #[arg(long, value_name = "LAYOUT")]
    layout: Option<String>,

    /// Number of days to keep
    #[arg(long, value_name = "DAYS", allow_negative_numbers = true)]
    keep: Option<i64>,

    /// Only log what would be deleted
    #[arg(long)]
    dry: bool,

    /// Name of the date capture group
    #[arg(long, value_name = "NAME")]
    date_group: Option<String>,

    /// Maximum directory depth to descend
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_links: bool,

    /// TOML file with default settings; flags override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    exit_with(color_eyre::install().and_then(|()| run(&cli)))
}

/// Log the final status line and map the result to an exit code.
fn exit_with(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => {
            info!("exited");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("exited with error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;

    info!(
        root = %config.effective_root().display(),
        pattern = %config.pattern,
        layout = %config.layout,
        keep_days = config.keep_days,
        dry_run = config.dry_run,
        "starting sweep"
    );

    let summary = Sweeper::run(&config)?;
    log_summary(&summary, config.dry_run);

    Ok(())
}

/// Merge the config file (if any) with command-line flags.
fn build_config(cli: &Cli) -> Result<SweepConfig, ConfigError> {
    let mut builder = SweepConfig::builder();

    if let Some(ref path) = cli.config {
        FileConfig::load(path)?.apply(&mut builder);
    }

    if let Some(ref dir) = cli.dir {
        builder.root(dir.clone());
    }
    if let Some(ref pattern) = cli.pattern {
        builder.pattern(pattern.clone());
    }
    if let Some(ref layout) = cli.layout {
        builder.layout(layout.clone());
    }
    if let Some(keep) = cli.keep {
        builder.keep_days(keep);
    }
    if cli.dry {
        builder.dry_run(true);
    }
    if let Some(ref group) = cli.date_group {
        builder.date_group(group.clone());
    }
    if let Some(depth) = cli.max_depth {
        builder.max_depth(depth);
    }
    if cli.follow_links {
        builder.follow_links(true);
    }

    builder.build()
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn log_summary(summary: &SweepSummary, dry_run: bool) {
    if dry_run {
        info!(
            scanned = summary.scanned,
            would_delete = summary.would_delete,
            kept = summary.kept,
            unmatched = summary.unmatched,
            unparsable = summary.unparsable,
            "dry run complete"
        );
    } else {
        info!(
            scanned = summary.scanned,
            deleted = summary.deleted,
            failed = summary.failed,
            kept = summary.kept,
            unmatched = summary.unmatched,
            unparsable = summary.unparsable,
            reclaimed = %format_size(summary.bytes_reclaimed),
            "sweep complete"
        );
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
