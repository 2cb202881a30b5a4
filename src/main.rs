//! Insights: Customer Feedback Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use insights::analyzer::{BaselineAnalyzer, ModelAnalyzer};
use insights::config::{default_config_json, load_config, EffectiveConfig, CONFIG_FILENAME};
use insights::loader::{self, FeedbackFormat, MaxRows};
use insights::pipeline::ComparisonPipeline;
use insights::reporter::{ConsoleReporter, JsonReporter};
use insights::service::AzureOpenAiClient;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Insights: compare rule-based and model-based customer feedback analysis
#[derive(Parser, Debug)]
#[command(name = "insights")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Feedback file to analyze: .csv, .txt or .json (omit when using a subcommand)
    #[arg(required = true)]
    path: Option<PathBuf>,

    #[command(flatten)]
    input: InputArgs,

    /// Output the full batch report as JSON
    #[arg(long, short)]
    json: bool,

    /// Directory for the exported result file (default: config outputDir or current dir)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Do not write the analysis_results_<BATCH>.json export
    #[arg(long)]
    no_export: bool,
}

/// Options shared by the full run and the baseline-only run
#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Input format override: csv, txt or json (default: from file extension)
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Max feedback items to analyze (1-20)
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u8).range(1..=20))]
    max_rows: Option<u8>,

    /// Path to config file (default: search .insightsrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quiet mode (minimal output)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (full result JSON per record)
    #[arg(long, short)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .insightsrc.json with sensible defaults
    Init {
        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Run only the rule-based baseline (no service credentials needed)
    Baseline {
        /// Feedback file to analyze
        path: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        /// Output baseline results as JSON
        #[arg(long, short)]
        json: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    if let Some(cmd) = args.command {
        match cmd {
            Commands::Init { dir } => {
                return run_init(dir.as_deref());
            }
            Commands::Baseline { path, input, json } => {
                init_tracing(input.quiet, input.verbose)?;
                return run_baseline(&path, &input, json);
            }
        }
    }

    init_tracing(args.input.quiet, args.input.verbose)?;

    let path = args
        .path
        .clone()
        .context("a feedback file is required when not using a subcommand")?;
    let config = resolve_config(&path, &args.input, args.output_dir.clone())?;
    let records = load_records(&path, &args.input, &config)?;

    if records.is_empty() {
        eprintln!("{}: No feedback records found in {}", "Warning".yellow(), path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let client = AzureOpenAiClient::from_env()?;
    let pipeline = ComparisonPipeline::new(ModelAnalyzer::new(client).with_pricing(config.pricing));

    let console = console_reporter(&args.input);
    let interactive = !args.json && !args.input.quiet;
    if interactive {
        eprintln!(
            "{}: Analyzing {} feedback item(s) from {}",
            "Info".blue(),
            records.len(),
            path.display()
        );
    }

    let batch = pipeline.run(&records, |progress| {
        if interactive {
            console.report_progress(progress);
        }
    })?;

    if !args.no_export {
        let export_path = JsonReporter::write_export(&batch, &config.output_dir)?;
        if !args.input.quiet {
            eprintln!(
                "{}: Results exported to {}",
                "Info".blue(),
                export_path.display()
            );
        }
    }

    if args.json {
        println!("{}", JsonReporter::new().pretty().report(&batch));
    } else if args.input.quiet {
        console.report_quiet(&batch);
    } else {
        console.report_summary(&batch);
    }

    Ok(ExitCode::SUCCESS)
}

/// Offline run: baseline analyzer only, printed or emitted as JSON
fn run_baseline(path: &Path, input: &InputArgs, json: bool) -> Result<ExitCode> {
    let config = resolve_config(path, input, None)?;
    let records = load_records(path, input, &config)?;

    if records.is_empty() {
        eprintln!("{}: No feedback records found in {}", "Warning".yellow(), path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let analyzer = BaselineAnalyzer::new();
    let console = console_reporter(input);
    let mut results = Vec::with_capacity(records.len());

    for record in &records {
        let result = analyzer.analyze(&record.text);
        if !json && !input.quiet {
            console.report_baseline(record.id, &record.text, &result);
        }
        results.push(serde_json::json!({
            "id": record.id,
            "text": record.text,
            "baseline": result,
        }));
    }

    if json {
        let output = serde_json::to_string_pretty(&results)
            .context("Failed to serialize baseline results")?;
        println!("{}", output);
    }

    Ok(ExitCode::SUCCESS)
}

/// Load config relative to the input file and apply CLI overrides
fn resolve_config(
    path: &Path,
    input: &InputArgs,
    output_dir: Option<PathBuf>,
) -> Result<EffectiveConfig> {
    let work_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let custom = match input.config {
        Some(ref p) if p.is_relative() => Some(
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(p),
        ),
        ref other => other.clone(),
    };
    let config = load_config(work_dir, custom.as_deref())?;
    Ok(config.merge_with_cli(input.max_rows.and_then(MaxRows::new), output_dir))
}

fn load_records(
    path: &Path,
    input: &InputArgs,
    config: &EffectiveConfig,
) -> Result<Vec<insights::FeedbackRecord>> {
    let format = input
        .format
        .as_deref()
        .map(str::parse::<FeedbackFormat>)
        .transpose()?;
    loader::load_file(path, format, config.max_rows)
}

fn console_reporter(input: &InputArgs) -> ConsoleReporter {
    let mut reporter = ConsoleReporter::new();
    if input.no_color {
        colored::control::set_override(false);
        reporter = reporter.without_colors();
    }
    if input.verbose {
        reporter = reporter.verbose();
    }
    reporter
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("INSIGHTS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn run_init(dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let json = default_config_json();
    std::fs::write(&config_path, json)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    eprintln!("{}: Created {}", "Info".blue(), config_path.display());
    Ok(ExitCode::SUCCESS)
}
