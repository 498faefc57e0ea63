mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::performance::{AdviceArgs, AnalyzeArgs, MetricsArgs};

/// Day-over-day business performance metrics and advice
#[derive(Parser)]
#[command(
    name = "pulse",
    version,
    about = "Day-over-day business performance metrics and advice",
    long_about = "Computes profit, revenue and cost change, and customer acquisition \
                  cost from today's and yesterday's business figures, then derives \
                  recommendations and alerts from fixed threshold rules."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: validate, compute metrics, generate advice
    Analyze(AnalyzeArgs),
    /// Validate input and compute derived metrics only
    Metrics(MetricsArgs),
    /// Generate advice from an already computed metrics record
    Advice(AdviceArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::performance::run_analyze(args),
        Commands::Metrics(args) => commands::performance::run_metrics(args),
        Commands::Advice(args) => commands::performance::run_advice(args),
        Commands::Version => {
            println!("pulse {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
