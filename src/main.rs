//! cutools-proxy server binary.
//!
//! Configuration precedence, lowest to highest: built-in defaults, the
//! `--config` TOML file, the `PORT` environment variable, `--port`.

use std::path::PathBuf;

use clap::Parser;

use cutools_proxy::config::loader::{self, ConfigError, PORT_ENV};
use cutools_proxy::config::validation::validate_config;
use cutools_proxy::lifecycle::startup;
use cutools_proxy::observability::logging;
use cutools_proxy::ProxyConfig;

#[derive(Parser)]
#[command(name = "cutools-proxy")]
#[command(about = "JSON proxy for the cutoolsfree.fun feeds", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (overrides the config file and PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

fn load(cli: &Cli) -> Result<ProxyConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => loader::read_config(path)?,
        None => ProxyConfig::default(),
    };

    let port_env = std::env::var(PORT_ENV).ok();
    loader::apply_port_env(&mut config, port_env.as_deref())?;
    if let Some(port) = cli.port {
        loader::override_port(&mut config, port);
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        probe_timeout_secs = config.timeouts.probe_secs,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
