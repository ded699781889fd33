use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use care_allowance_engine::api::{AppState, CalculationRequest, ENGINE_VERSION, create_router};
use care_allowance_engine::calculation::calculate;
use care_allowance_engine::config::ConfigLoader;
use care_allowance_engine::models::{AllowanceResult, DisplayTotals};
use care_allowance_engine::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "care-allowance-engine",
    about = "Calculate care allowances from the command line or over HTTP",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Calculate the allowance for a request file and print it as JSON
    Calculate(CalculateArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Host address to bind to
    #[arg(long, env = "CARE_ALLOWANCE_HOST", default_value = "0.0.0.0")]
    host: String,
    /// Port to listen on
    #[arg(long, env = "CARE_ALLOWANCE_PORT", default_value_t = 3000)]
    port: u16,
    /// Directory holding scheme.yaml and rates.yaml
    #[arg(long, env = "CARE_ALLOWANCE_CONFIG_DIR", default_value = "./config/default")]
    config_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[arg(long, env = "CARE_ALLOWANCE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// Path to a calculation request JSON file
    #[arg(long)]
    input: PathBuf,
    /// Directory holding scheme.yaml and rates.yaml
    #[arg(long, env = "CARE_ALLOWANCE_CONFIG_DIR", default_value = "./config/default")]
    config_dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct CalculateOutput {
    result: AllowanceResult,
    display: DisplayTotals,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve(args)) => serve(args).await,
        Some(Command::Calculate(args)) => run_calculate(args),
        None => serve(cli.serve).await,
    }
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init(&args.log_level)?;

    let config = ConfigLoader::load(&args.config_dir)?;
    info!(
        version = ENGINE_VERSION,
        scheme = %config.scheme().code,
        scheme_version = %config.scheme().version,
        config_dir = %args.config_dir.display(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    info!(address = %listener.local_addr()?, "Care allowance engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}

fn run_calculate(args: CalculateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load(&args.config_dir)?;
    let request: CalculationRequest = serde_json::from_str(&fs::read_to_string(&args.input)?)?;

    let rate_table = request
        .rate_table
        .as_ref()
        .unwrap_or_else(|| config.rate_table());
    let result = calculate(&request.dependents, &request.carer, Some(rate_table))?;

    let output = CalculateOutput {
        display: result.display_totals(),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
