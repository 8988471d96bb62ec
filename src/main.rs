//! DevOps pipeline demo service entry point.

use std::net::IpAddr;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devops_pipeline_demo::api::{create_router, AppState};
use devops_pipeline_demo::config::Config;
use devops_pipeline_demo::metrics;
use devops_pipeline_demo::server;
use devops_pipeline_demo::utils::shutdown_signal;

/// Environment-aware demo HTTP service.
#[derive(Parser, Debug)]
#[command(name = "devops-pipeline-demo")]
#[command(about = "Serves environment-labelled status endpoints for a deployment pipeline")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Interface to bind (overrides APP_HOST).
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to bind (overrides APP_PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

impl Args {
    /// Host/port overrides, preferring the `serve` subcommand's own flags.
    fn overrides(&self) -> (Option<IpAddr>, Option<u16>) {
        match &self.command {
            Some(Command::Serve { host, port }) => {
                (host.or(self.host), port.or(self.port))
            }
            _ => (self.host, self.port),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Interface to bind (overrides APP_HOST).
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to bind (overrides APP_PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the resolved configuration and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration; logging comes up first so a bad config is logged too
    let loaded = Config::load();
    let log_json = loaded.as_ref().map(|c| c.log_json).unwrap_or(false);

    // Initialize logging
    init_tracing(log_json, args.verbose);

    let mut config = loaded.map_err(config_error)?;
    let (host, port) = args.overrides();
    apply_overrides(&mut config, host, port);

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve { .. }) | None => cmd_serve(config).await,
    }
}

fn init_tracing(log_json: bool, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("devops_pipeline_demo=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn config_error(e: envy::Error) -> anyhow::Error {
    error!("Failed to load configuration: {}", e);
    anyhow::Error::new(e).context("failed to load configuration")
}

fn apply_overrides(config: &mut Config, host: Option<IpAddr>, port: Option<u16>) {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
}

/// Print the resolved configuration.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DEVOPS PIPELINE DEMO - CONFIGURATION CHECK");
    println!("======================================================================");
    println!("  Environment: {}", config.app_env);
    println!("  Listen Address: {}", config.socket_addr());
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!(
        "  Log Filter: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    );
    println!("  Log Format: {}", if config.log_json { "json" } else { "text" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    let environment = config.environment();
    info!(environment = %environment, "Starting service");

    let metrics_handle = if config.metrics_enabled {
        Some(metrics::install_recorder()?)
    } else {
        None
    };
    let upkeep = metrics_handle
        .clone()
        .map(|handle| metrics::spawn_upkeep(handle, metrics::UPKEEP_INTERVAL));

    let router = create_router(AppState::new(environment), metrics_handle);

    let listener = server::bind(config.socket_addr()).await?;

    let result = server::run(listener, router, shutdown_signal()).await;
    if let Some(task) = upkeep {
        task.abort();
    }

    if let Err(e) = result {
        error!("Server exited with error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
