//! Gauss daemon: serves the poll API and imports season data.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use gauss_rpc::RpcServer;
use gauss_service::{
    PollService, SeasonData, ServiceConfig, ServiceMetrics, ShutdownController, Stores,
};
use gauss_store_lmdb::LmdbEnvironment;
use gauss_types::SystemClock;
use gauss_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "gauss-daemon", about = "Dr Gauss tournament poll service")]
struct Cli {
    /// Data directory for the LMDB environment.
    #[arg(long, env = "GAUSS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Address to bind the HTTP server to.
    #[arg(long, env = "GAUSS_BIND_ADDRESS")]
    bind_address: Option<String>,

    /// HTTP port.
    #[arg(long, env = "GAUSS_PORT")]
    port: Option<u16>,

    /// Log format: "human" or "json".
    #[arg(long, env = "GAUSS_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GAUSS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable the Prometheus metrics endpoint.
    #[arg(long, env = "GAUSS_ENABLE_METRICS")]
    metrics: bool,

    /// Allow cross-origin requests from any origin.
    #[arg(long, env = "GAUSS_CORS_ALLOW_ANY")]
    cors_allow_any: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "GAUSS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Serve the HTTP API until SIGINT/SIGTERM.
    Serve,
    /// Load matches, ad-hoc polls, settlements and picks from a TOML file.
    Import {
        /// Season file with [[matches]], [[adhoc_polls]], [[settlements]], [[picks]].
        file: PathBuf,
    },
}

impl Cli {
    /// Overlay flags and env vars on top of the file (or default) config.
    fn merge_into(&self, base: ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            data_dir: self.data_dir.clone().unwrap_or(base.data_dir),
            bind_address: self.bind_address.clone().unwrap_or(base.bind_address),
            port: self.port.unwrap_or(base.port),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            enable_metrics: self.metrics || base.enable_metrics,
            cors_allow_any: self.cors_allow_any || base.cors_allow_any,
            ..base
        }
    }
}

fn lmdb_stores(env: &LmdbEnvironment) -> Stores {
    Stores {
        votes: Arc::new(env.vote_ledger()),
        matches: Arc::new(env.match_store()),
        adhoc: Arc::new(env.adhoc_store()),
        settlements: Arc::new(env.settlement_store()),
        picks: Arc::new(env.pick_store()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => ServiceConfig::from_toml_file(&path.to_string_lossy())
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ServiceConfig::default(),
    };
    let config = cli.merge_into(base);

    init_logging(config.log_format, &config.log_level).context("installing log subscriber")?;
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let env = LmdbEnvironment::open_default(&config.data_dir)
        .with_context(|| format!("opening store at {}", config.data_dir.display()))?;
    let mut service = PollService::new(lmdb_stores(&env), Arc::new(SystemClock));

    match cli.command {
        Command::Import { file } => {
            let season = SeasonData::from_toml_file(&file.to_string_lossy())
                .with_context(|| format!("reading season file {}", file.display()))?;
            let summary = service.import(&season)?;
            tracing::info!(
                "Imported {} matches, {} ad-hoc options, {} settlements, {} picks",
                summary.matches,
                summary.adhoc_options,
                summary.settlements,
                summary.picks
            );
        }
        Command::Serve => {
            if config.enable_metrics {
                service = service.with_metrics(Arc::new(ServiceMetrics::new()));
            }
            tracing::info!(
                "Starting Gauss poll service on {} (data: {}, metrics: {})",
                config.listen_addr(),
                config.data_dir.display(),
                if config.enable_metrics { "on" } else { "off" },
            );

            let shutdown = ShutdownController::new();
            let signals = shutdown.clone();
            tokio::spawn(async move { signals.wait_for_signal().await });

            RpcServer::new(&config, Arc::new(service))
                .start(shutdown.signalled())
                .await?;

            tracing::info!("Gauss daemon exited cleanly");
        }
    }

    Ok(())
}
