use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;

use doaas::catalog::inspect_dir;
use doaas::lifecycle::load_service_config;
use doaas::moderation::{moderate, scan_dirs, GateLimits, ModerationClient};
use doaas::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "doaas-cli")]
#[command(about = "Tooling for the DevOps-as-a-Service catalog", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every endpoint data file in a directory
    Validate {
        #[arg(short, long, default_value = "endpoints")]
        dir: PathBuf,
    },
    /// Run new strings between two catalog directories through the moderation API
    Moderate {
        /// Catalog as it was before the change
        #[arg(long)]
        base: PathBuf,
        /// Catalog with the change applied
        #[arg(long)]
        head: PathBuf,
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: String,
    },
    /// Fetch a path from a running server
    Fetch {
        /// Endpoint path, e.g. `blame` or `/random`
        path: String,
        #[arg(short, long, default_value = "http://localhost:8787")]
        url: String,
        #[arg(short, long)]
        mode: Option<String>,
        #[arg(short, long)]
        format: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_service_config(cli.config.as_deref())?;
    init_logging(&config.observability);

    match cli.command {
        Commands::Validate { dir } => {
            let mut failed = 0;
            for report in inspect_dir(&dir)? {
                match report.result {
                    Ok(endpoint) => println!(
                        "ok      {} ({} examples)",
                        report.path.display(),
                        endpoint.example_count()
                    ),
                    Err(e) => {
                        failed += 1;
                        println!("invalid {}: {}", report.path.display(), e);
                    }
                }
            }
            if failed > 0 {
                eprintln!("{} invalid endpoint file(s)", failed);
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Moderate { base, head, api_key } => {
            let scan = scan_dirs(&base, &head)?;
            let client = ModerationClient::new(&config.moderation, api_key)?;
            let report = moderate(&client, scan, GateLimits::from(&config.moderation)).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.passed() {
                eprintln!("Moderation failed: {} flagged string(s)", report.flagged.len());
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Fetch {
            path,
            url,
            mode,
            format,
        } => {
            let client = reqwest::Client::new();
            let mut query = Vec::new();
            if let Some(mode) = mode {
                query.push(("mode", mode));
            }
            if let Some(format) = format {
                query.push(("format", format));
            }
            let res = client
                .get(format!("{}/{}", url.trim_end_matches('/'), path.trim_start_matches('/')))
                .query(&query)
                .send()
                .await?;
            return print_response(res).await;
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(ExitCode::FAILURE);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(ExitCode::SUCCESS)
}
