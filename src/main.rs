use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use configuration::{Config, LogFormat};
use core_types::{CompanyRecord, RiskLevel};
use events::{DashboardEvent, EventBus, NoticeLevel, run_listener};
use indicatif::{ProgressBar, ProgressStyle};
use ingest::Uploader;
use screener::{Choice, FilterConfig, Screener, SortKey};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use store::RecordStore;

mod display;
mod logging;

/// The main entry point for the Meridian portfolio dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load MERIDIAN__* overrides from a .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = logging::init(&config.logging, cli.log_format)?;

    // Execute the appropriate command
    match cli.command {
        Commands::List(args) => handle_list(args, &config),
        Commands::Insights(args) => handle_insights(args, &config),
        Commands::Analytics(args) => handle_analytics(args),
        Commands::Template(args) => handle_template(args).await,
        Commands::Upload(args) => handle_upload(args, &config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A portfolio monitoring dashboard for venture-backed companies.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./meridian.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured console log format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List companies, filtered and sorted.
    List(ListArgs),
    /// Show the insights panel: alerts, top performers and the watchlist.
    Insights(InsightsArgs),
    /// Show the data series behind the analytics charts.
    Analytics(AnalyticsArgs),
    /// Write the CSV upload template.
    Template(TemplateArgs),
    /// Upload a CSV file, replacing the portfolio data.
    Upload(UploadArgs),
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args)]
struct SourceArgs {
    /// Read the portfolio from this CSV file instead of the built-in sample data.
    #[arg(long)]
    data: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Case-insensitive substring of the company name.
    #[arg(long)]
    search: Option<String>,

    /// Sector to show, or "all".
    #[arg(long, default_value = screener::ALL)]
    sector: String,

    /// Stage to show, or "all".
    #[arg(long, default_value = screener::ALL)]
    stage: String,

    /// Risk level to show (low, medium, high), or "all".
    #[arg(long, default_value = screener::ALL)]
    risk: Choice<RiskLevel>,

    /// Sort key: name, arr, runway, risk or growth. Unknown keys sort by name.
    #[arg(long, default_value = "name")]
    sort: String,
}

#[derive(Args)]
struct InsightsArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct AnalyticsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Restrict every chart to one sector, or "all".
    #[arg(long, default_value = screener::ALL)]
    sector: String,
}

#[derive(Args)]
struct TemplateArgs {
    /// Where to write the template; "-" prints it to stdout.
    #[arg(long, short, default_value = ingest::TEMPLATE_FILE_NAME)]
    output: PathBuf,
}

#[derive(Args)]
struct UploadArgs {
    /// The CSV file to upload.
    file: PathBuf,

    #[command(flatten)]
    source: SourceArgs,
}

// ==============================================================================
// Shared Helpers
// ==============================================================================

/// Builds the starting record store from `--data`, or the sample portfolio.
fn load_store(source: &SourceArgs) -> anyhow::Result<RecordStore> {
    let records = match &source.data {
        Some(path) => ingest::load_file(path)
            .with_context(|| format!("Failed to load portfolio data from {}", path.display()))?,
        None => store::sample_portfolio(),
    };
    let store = RecordStore::new(records).context("Portfolio data is invalid")?;
    tracing::debug!(companies = store.len(), "Record store ready.");
    Ok(store)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_list(args: ListArgs, config: &Config) -> anyhow::Result<()> {
    let store = load_store(&args.source)?;
    let records = store.records();

    let mut filter = FilterConfig::new().sector(&args.sector).stage(&args.stage);
    filter.risk_level = args.risk;
    if let Some(term) = args.search {
        filter = filter.search(term);
    }
    let screener = Screener::new(filter, SortKey::from_name(&args.sort));
    let companies = screener.run(records);

    // Summary cards are always taken over the full set.
    let risk = analytics::risk_counts(records);

    match args.source.format {
        OutputFormat::Json => print_json(&json!({
            "summary": {
                "totalCompanies": records.len(),
                "riskCounts": risk,
            },
            "sort": screener.sort,
            "companies": companies,
        })),
        OutputFormat::Table => {
            println!("Portfolio Dashboard ({})", config.dashboard.quarter_label);
            println!("{}", display::summary_table(&risk));
            if companies.is_empty() {
                println!("No companies found matching your filters.");
            } else {
                println!("{}", display::company_table(&companies));
                for line in display::alert_lines(&companies) {
                    println!("{line}");
                }
            }
            Ok(())
        }
    }
}

fn handle_insights(args: InsightsArgs, config: &Config) -> anyhow::Result<()> {
    let store = load_store(&args.source)?;
    let engine = analytics::InsightEngine::new(config.insights.clone());
    let report = engine.calculate(store.records());

    match args.source.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            println!("{}", display::render_insights(&report));
            Ok(())
        }
    }
}

fn handle_analytics(args: AnalyticsArgs) -> anyhow::Result<()> {
    let store = load_store(&args.source)?;
    let sector = Choice::from_text(&args.sector);
    let records: Vec<CompanyRecord> = store
        .records()
        .iter()
        .filter(|r| sector.matches(&r.sector))
        .cloned()
        .collect();
    let report = analytics::AnalyticsReport::build(&records);

    match args.source.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Table => {
            if records.is_empty() {
                println!("No companies in sector '{}'.", args.sector);
            }
            println!("{}", display::render_analytics(&report));
            Ok(())
        }
    }
}

async fn handle_template(args: TemplateArgs) -> anyhow::Result<()> {
    if args.output == Path::new("-") {
        println!("{}", ingest::render_template());
        return Ok(());
    }
    ingest::write_template(&args.output).await?;
    println!("Template written to {}", args.output.display());
    Ok(())
}

async fn handle_upload(args: UploadArgs, config: &Config) -> anyhow::Result<()> {
    let mut store = load_store(&args.source)?;
    let previous = store.len();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}")?);
    spinner.set_message(format!("Processing {}...", args.file.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    // Notices are printed to stderr by a listener task, as they arrive.
    // Stdout is reserved for the result, so `--format json` stays parseable.
    let bus = EventBus::new();
    let listener_spinner = spinner.clone();
    let listener = tokio::spawn(run_listener(bus.subscribe(), move |event| {
        match event.to_json() {
            Ok(json) => tracing::debug!(event = %json, "Upload event."),
            Err(e) => tracing::warn!(error = %e, "Could not serialize upload event."),
        }
        if let DashboardEvent::Notice(notice) = event {
            let mark = match notice.level {
                NoticeLevel::Error => '✘',
                _ => '✔',
            };
            listener_spinner.suspend(|| eprintln!("{mark} {}: {}", notice.title, notice.description));
        }
    }));

    let uploader = Uploader::new(config.upload.clone(), bus);
    let outcome = uploader.upload(&args.file, &mut store).await;

    // Dropping the only sender closes the channel and ends the listener.
    drop(uploader);
    listener.await?;
    spinner.finish_and_clear();

    let receipt = outcome?;
    let risk = analytics::risk_counts(store.records());

    match args.source.format {
        OutputFormat::Json => print_json(&json!({
            "file": receipt.file_name,
            "previousCount": previous,
            "recordCount": receipt.record_count,
            "riskCounts": risk,
        })),
        OutputFormat::Table => {
            println!(
                "Replaced {} companies with {} from {}.",
                previous, receipt.record_count, receipt.file_name
            );
            println!("{}", display::summary_table(&risk));
            Ok(())
        }
    }
}
