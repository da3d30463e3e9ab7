//! `cotizer` command-line client.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cotizer::config::{self, Profile};
use cotizer::observability::logging;
use cotizer::session::{ProductCatalog, RefreshStatus, ScanResult, Scanner};
use cotizer::storefront::{Credentials, StorefrontClient, StorefrontError};

#[derive(Parser)]
#[command(name = "cotizer")]
#[command(about = "Storefront and inventory lookup client", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./cotizer.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Endpoint profile to use.
    #[arg(short, long, env = "COTIZER_PROFILE")]
    profile: Option<Profile>,

    /// Per-attempt timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the backend
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short = 'P', long, env = "COTIZER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List products, optionally filtered by code or name
    Products {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Look up inventory for a scanned code
    Scan { code: String },
    /// Show inventory, prices and costs for a product code
    Detail { code: String },
    /// Print the endpoint lists of the active profile
    Endpoints,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let overrides = config::Overrides {
        profile: cli.profile,
        request_secs: cli.timeout_secs,
    };
    let loaded = config::load_or_default(cli.config.as_deref())?;
    let config = config::apply_overrides(loaded, &overrides)?;

    logging::init(&config.observability);
    tracing::info!(profile = %config.profile, "cotizer v{} starting", env!("CARGO_PKG_VERSION"));

    if let Commands::Endpoints = cli.command {
        for (api, urls) in config.active_endpoints().apis() {
            println!("{}:", api);
            for url in urls {
                println!("  {}", url);
            }
        }
        return Ok(());
    }

    let client = StorefrontClient::from_config(&config)?;

    match cli.command {
        Commands::Login { username, password } => {
            let credentials = Credentials::new(&username, &password).map_err(user_facing)?;
            let receipt = client.login(&credentials).await.map_err(user_facing)?;
            println!(
                "{}",
                receipt.message.as_deref().unwrap_or("Login successful")
            );
        }
        Commands::Products { search } => {
            let mut catalog = ProductCatalog::new();
            catalog.set_search(search);
            match catalog.refresh(&client).await {
                RefreshStatus::Loaded(_) => {}
                RefreshStatus::FailedKeptPrevious | RefreshStatus::FailedEmpty => {
                    return Err(catalog
                        .error()
                        .unwrap_or("Could not load products")
                        .into());
                }
            }
            let visible = catalog.visible();
            if visible.is_empty() {
                println!("{}", catalog.empty_message());
            }
            for product in visible {
                println!(
                    "{:<16} {:<40} Cost: ${}",
                    product.code,
                    product.name,
                    product.display_cost()
                );
            }
        }
        Commands::Scan { code } => {
            let mut scanner = Scanner::new();
            match scanner.scan(&client, &code).await {
                ScanResult::Found(records) => {
                    println!("Scanned code: {}", scanner.last_code().unwrap_or(&code));
                    for record in records {
                        println!("{:<16} {:<40} {}", record.code, record.name, record.total);
                    }
                }
                ScanResult::Failed(message) => return Err(message.into()),
                ScanResult::Ignored => {}
            }
        }
        Commands::Detail { code } => {
            let detail = client.product_detail(&code).await.map_err(user_facing)?;
            println!("{} {}", detail.code, detail.name().unwrap_or(""));
            println!("Stock: {}", detail.total_stock());
            for record in &detail.inventory {
                println!("  {:<40} {}", record.name, record.total);
            }
            for price in &detail.prices {
                println!("  Price {:<34} ${:.2}", price.list, price.price);
            }
            for cost in &detail.costs {
                println!(
                    "  Cost standard ${:.2} average ${:.2}",
                    cost.standard_cost.unwrap_or(0.0),
                    cost.average_cost.unwrap_or(0.0)
                );
            }
            for section in &detail.unavailable {
                println!("  ({} unavailable)", section.as_str());
            }
        }
        Commands::Endpoints => {}
    }

    Ok(())
}

fn user_facing(e: StorefrontError) -> Box<dyn std::error::Error> {
    tracing::debug!(error = %e, "Command failed");
    e.user_message().into()
}
