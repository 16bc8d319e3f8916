use clap::{Parser, Subcommand};
use serde_json::Value;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use backend_api::config::Settings;
use backend_api::database::{ensure_ready, PostgresOpener, ProbeTimeouts};

#[derive(Parser)]
#[command(name = "backend-cli")]
#[command(about = "Operator CLI for the Backend API service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the service health endpoint
    Health,
    /// Show the service's (masked) database configuration
    DbConfig,
    /// Run the database readiness probe from this machine's environment
    CheckDb {
        /// Connect timeout in seconds
        #[arg(long, default_value_t = 5)]
        connect_timeout: u64,

        /// Overall probe timeout in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await
        }
        Commands::DbConfig => {
            let res = client.get(format!("{}/database/config", cli.url)).send().await?;
            print_response(res).await
        }
        Commands::CheckDb { connect_timeout, timeout } => {
            let settings = Settings::from_env();
            let timeouts = ProbeTimeouts {
                connect: Duration::from_secs(connect_timeout),
                overall: Duration::from_secs(timeout),
            };

            println!("Checking {}", settings.masked_connection_string());
            match ensure_ready(Arc::new(PostgresOpener), &settings.connection_string(), timeouts).await {
                Ok(()) => {
                    println!("Database is ready");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("Error: {}: {}", e, e.failure());
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(ExitCode::FAILURE);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(ExitCode::SUCCESS)
}
