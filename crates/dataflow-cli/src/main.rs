//! dataflow CLI - copy database tables between systems over ODBC.

use clap::Parser;
use dataflow::{FlowError, Orchestrator, PipelineConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "dataflow")]
#[command(about = "Copy database tables from a source system into a target database")]
#[command(version)]
struct Cli {
    /// Path to the pipeline configuration file
    #[arg(short, long, default_value = "pipeline-config.json", env = "DF_CONFIG_FILE")]
    config: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run() -> Result<(), FlowError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format);

    let config = PipelineConfig::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    let orchestrator = Orchestrator::new(config)?;
    let result = orchestrator.run()?;

    if cli.output_json {
        println!("{}", result.to_json()?);
    } else {
        println!("\nCopy completed!");
        println!("  Tables: {}", result.tables_copied);
        println!("  Rows: {}", result.rows_copied);
        println!("  Duration: {:.2}s", result.duration_seconds);
        println!("  Throughput: {} rows/sec", result.rows_per_second);
    }

    info!("All done");
    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
