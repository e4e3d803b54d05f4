use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use api_gateway::{ApiGateway, ApiGatewayConfig};
use runtime::{AppConfig, CliArgs};
use user_directory::domain::service::{Service, ServiceConfig};
use user_directory::infra::storage::memory::InMemoryUserStore;

/// Staffdir Server - user directory service
#[derive(Parser)]
#[command(name = "staffdir-server")]
#[command(about = "Staffdir Server - user directory service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Staffdir Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing user directory");

    let store = Arc::new(InMemoryUserStore::new());
    let service = Arc::new(Service::new(store, ServiceConfig::default()));
    let api = user_directory::api::rest::routes::register_routes(Router::new(), service);

    let tokens = config.auth.tokens.clone();
    if tokens.is_empty() {
        tracing::warn!("No auth tokens configured; every API request will be rejected");
    }

    let gateway_config = ApiGatewayConfig {
        bind_addr: format!("{}:{}", config.server.host, config.server.port),
        request_timeout_sec: match config.server.timeout_sec {
            0 => ApiGatewayConfig::default().request_timeout_sec,
            secs => secs,
        },
        ..Default::default()
    };
    let gateway = ApiGateway::new(gateway_config, tokens);
    let router = gateway.build_router(api);

    // Cancel the server on SIGINT/SIGTERM
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if api_gateway::shutdown::wait_for_shutdown().await.is_ok() {
                tracing::info!("Shutdown signal received");
                cancel.cancel();
            }
        });
    }

    gateway.serve(router, cancel).await
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // AppConfig::load_* already normalized & created home_dir
    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}
