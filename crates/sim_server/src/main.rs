//! Decision Sim Server
//!
//! HTTP simulation endpoint and MCP tool surface for the decision engine.

use clap::Parser;
use sim_server::config::{build_config, env_vars, CliArgs as ConfigCliArgs, Environment};
use sim_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Decision Sim Server - Monte Carlo simulation over HTTP and MCP
#[derive(Parser, Debug)]
#[command(name = "sim_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = env_vars::HOST)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = env_vars::PORT)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = env_vars::LOG_LEVEL)]
    log_level: Option<String>,

    /// Remote simulation endpoint for MCP tool calls
    #[arg(long, env = env_vars::ENGINE_URL)]
    engine_url: Option<String>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            engine_url: args.engine_url.filter(|url| !url.trim().is_empty()),
        }
    }
}

fn init_tracing(log_level: &str, environment: Environment) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if environment.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    init_tracing(config.log_level.as_filter_str(), config.environment);

    tracing::info!("Decision Sim Server v{}", sim_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        service = %config.service_name,
        engine_url = config.engine_url.as_deref().unwrap_or("in-process"),
        engine_timeout_secs = config.engine_timeout_secs,
        "Server configuration loaded"
    );

    let server = Server::new(config);
    server.run().await?;

    Ok(())
}
