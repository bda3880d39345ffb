//! CLI command definitions and handlers

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::engine::analyze_repository;
use crate::error::ScanError;
use crate::formatter::detect_auto_formatting;
use crate::git::GitHistory;
use crate::models::SourceFile;
use crate::reporters;
use crate::temporal::{CommitInfo, CommitSource, NoDetails};

/// Files above this size are skipped; bundles and lockfiles only
/// drown the per-line signals.
const MAX_FILE_BYTES: u64 = 512 * 1024;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Vibescan - heuristic AI-authorship estimator
///
/// 100% LOCAL - No account needed. No data leaves your machine.
#[derive(Parser, Debug)]
#[command(name = "vibescan")]
#[command(
    version,
    about = "Estimate how much of a codebase was machine-generated, from text and git-history heuristics",
    long_about = "Vibescan scores every source file on six independent evidence dimensions \
(structural entropy, model fingerprints, cognitive shape, dead references, stylistic \
patterns, and human chaos), reads the git log for machine cadence, and fuses \
everything into one repository-level verdict.\n\n\
100% LOCAL - No account needed. No data leaves your machine.\n\n\
Run without a subcommand to scan the current directory:\n  \
vibescan .",
    after_help = "\
Examples:
  vibescan .                           Scan current directory
  vibescan scan . --format json        JSON output for scripting
  vibescan scan . --no-history         Skip the git-log analysis
  vibescan scan . --fail-above 65      Exit code 1 when suspicious (CI mode)
  vibescan init                        Write a vibescan.toml with the default thresholds"
)]
pub struct Cli {
    /// Path to repository (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64)
    #[arg(long, global = true, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a vibescan.toml config file with the default thresholds
    Init,

    /// Score the repository (default when no subcommand is given)
    Scan {
        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Skip git-history (temporal) analysis
        #[arg(long)]
        no_history: bool,

        /// Commits read from the log for temporal analysis
        #[arg(long, default_value = "100")]
        max_commits: usize,

        /// Config file with threshold overrides (default: <path>/vibescan.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Exit with code 1 when the global score reaches this value
        #[arg(long)]
        fail_above: Option<f64>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.workers)
        .build_global()
        .ok();

    match cli.command {
        Some(Commands::Init) => init(&cli.path),
        Some(Commands::Scan {
            format,
            output,
            no_history,
            max_commits,
            config,
            fail_above,
        }) => scan(
            &cli.path,
            &format,
            output.as_deref(),
            no_history,
            max_commits,
            config.as_deref(),
            fail_above,
        ),
        None => scan(&cli.path, "text", None, false, 100, None, None),
    }
}

fn scan(
    path: &Path,
    format: &str,
    output: Option<&Path>,
    no_history: bool,
    max_commits: usize,
    config_path: Option<&Path>,
    fail_above: Option<f64>,
) -> Result<()> {
    let config = AnalyzerConfig::load(path, config_path)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    spinner.set_message("walking files...");
    let (files, all_paths) = collect_files(path, &config)?;
    if files.is_empty() {
        spinner.finish_and_clear();
        return Err(ScanError::NoFiles {
            path: path.display().to_string(),
        }
        .into());
    }
    let formatter = detect_auto_formatting(&all_paths, &config);

    spinner.set_message("reading git log...");
    let history = if no_history {
        None
    } else {
        GitHistory::discover(path)
    };
    let commits: Vec<CommitInfo> = match &history {
        Some(h) => h.recent_commits(max_commits).unwrap_or_else(|err| {
            warn!(error = %err, "git log unavailable, skipping temporal analysis");
            Vec::new()
        }),
        None => Vec::new(),
    };
    let source: &dyn CommitSource = match &history {
        Some(h) => h,
        None => &NoDetails,
    };

    spinner.set_message(format!("scoring {} files...", files.len()));
    let report = analyze_repository(&files, &commits, source, &formatter, &config);
    spinner.finish_and_clear();

    let rendered = reporters::report(&report, format)?;
    match output {
        Some(out_path) => {
            fs::write(out_path, &rendered)
                .with_context(|| format!("writing report to {}", out_path.display()))?;
            eprintln!("{}", style(format!("Report written to {}", out_path.display())).dim());
        }
        None => println!("{rendered}"),
    }

    if let Some(threshold) = fail_above {
        if report.score >= threshold {
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Walk the tree honoring .gitignore; returns the analyzable sources
/// plus every visited path (for formatter-config detection).
fn collect_files(root: &Path, config: &AnalyzerConfig) -> Result<(Vec<SourceFile>, Vec<String>)> {
    let mut files = Vec::new();
    let mut all_paths = Vec::new();

    let walker = ignore::WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .build();

    for entry in walker.filter_map(|e| e.ok()) {
        let entry_path = entry.path();
        if !entry_path.is_file() {
            continue;
        }
        // Never descend into the object database
        if entry_path.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }
        let relative = entry_path
            .strip_prefix(root)
            .unwrap_or(entry_path)
            .to_string_lossy()
            .replace('\\', "/");
        all_paths.push(relative.clone());

        if config.language_for(&relative).is_none() {
            continue;
        }
        if let Ok(meta) = entry_path.metadata() {
            if meta.len() > MAX_FILE_BYTES {
                debug!(path = %relative, bytes = meta.len(), "skipping oversized file");
                continue;
            }
        }
        match fs::read_to_string(entry_path) {
            Ok(content) => files.push(SourceFile::new(relative, content)),
            // Binary or non-UTF-8 content is not analyzable text
            Err(err) => debug!(path = %relative, error = %err, "skipping unreadable file"),
        }
    }

    Ok((files, all_paths))
}

fn init(path: &Path) -> Result<()> {
    let target = path.join("vibescan.toml");
    if target.exists() {
        anyhow::bail!("{} already exists", target.display());
    }
    let sample = "\
# Vibescan configuration. Every key is optional; unset keys keep the
# built-in defaults.

# Multiplier for formatting-sensitive pattern weights when an
# auto-formatter config (.prettierrc, rustfmt.toml, ...) is present.
# formatting_discount = 0.3

# Markers that exclude a file as machine-generated when found in the
# first 20 lines.
# generated_markers = [\"@generated\", \"DO NOT EDIT\"]

# Score bands for the per-file report.
# suspicious_min = 65.0
# questionable_min = 30.0

# Global-score weights; must be tuned together.
# temporal_weight = 0.30
# crossfile_weight = 0.15
# files_weight = 0.55

# Commits required before the temporal analysis runs.
# min_commits = 5
";
    fs::write(&target, sample).with_context(|| format!("writing {}", target.display()))?;
    println!(
        "{} {}",
        style("Created").green().bold(),
        target.display()
    );
    Ok(())
}

/// Create spinner progress style
fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap()
}
