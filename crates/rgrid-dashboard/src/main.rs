use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rgrid_dashboard::console::run_console;
use rgrid_dashboard::{ConfigOverrides, Dashboard, DashboardConfig};

/// ResilienceGrid swarm dashboard.
#[derive(Debug, Parser)]
#[command(name = "rgrid", version, about)]
struct Cli {
    /// Config file (default: <config_dir>/resiliencegrid/dashboard.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Swarm status stream URL
    #[arg(long, env = "RGRID_WS_URL")]
    ws_url: Option<String>,

    /// REST API base URL
    #[arg(long, env = "RGRID_API_URL")]
    api_url: Option<String>,

    /// Populate a mock swarm on activation and simulate throughput
    #[arg(long, env = "RGRID_SIMULATION")]
    simulation: bool,

    /// Run without the console, logging a status line periodically
    #[arg(long)]
    headless: bool,

    /// Request swarm activation at startup
    #[arg(long)]
    activate: bool,

    /// Seconds between headless status lines
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    status_interval: u64,

    /// Log file for console mode (default: <data_local_dir>/resiliencegrid/dashboard.log)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    config.apply_overrides(ConfigOverrides {
        ws_url: cli.ws_url.clone(),
        api_url: cli.api_url.clone(),
        simulation_mode: cli.simulation.then_some(true),
    });

    let mut dashboard = Dashboard::start(&config).await;
    if cli.activate {
        dashboard.activate_swarm().await;
    }

    let result = if cli.headless {
        run_headless(&dashboard, Duration::from_secs(cli.status_interval.max(1))).await
    } else {
        run_console(&mut dashboard).await
    };

    dashboard.shutdown().await;
    result
}

async fn run_headless(dashboard: &Dashboard, every: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(every);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tracing::info!(status = %dashboard.status_line().await, "Dashboard status");
            }
            signal = tokio::signal::ctrl_c() => {
                signal.context("listening for Ctrl-C")?;
                tracing::info!("Shutting down");
                return Ok(());
            }
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if cli.headless {
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e));
    }

    // The console owns the terminal, so logs go to a file.
    let path = match &cli.log_file {
        Some(path) => path.clone(),
        None => dirs::data_local_dir()
            .map(|dir| dir.join("resiliencegrid").join("dashboard.log"))
            .context("no local data directory; pass --log-file")?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
