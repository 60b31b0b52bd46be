use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::io::IsTerminal;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cube_terminal::config::{GatewayConfig, ShellConfig};
use cube_terminal::gateway::Aggregator;
use cube_terminal::shell::client::GatewayClient;
use cube_terminal::shell::{runner, Shell};
use cube_terminal::web::{server, AppState};

#[derive(Parser)]
#[command(name = "cube-terminal", version, about = "Solana token query console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the aggregation gateway
    Serve {
        /// Overrides API_PORT
        #[arg(long, env = "API_PORT")]
        port: Option<u16>,
    },
    /// Start the interactive shell against a running gateway
    Shell {
        /// Overrides GATEWAY_URL
        #[arg(long, env = "GATEWAY_URL")]
        gateway_url: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            init_tracing("info", false)?;
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?
                .block_on(serve(port))
        }
        Commands::Shell { gateway_url } => {
            // stdout belongs to the shell display
            init_tracing("warn", true)?;
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?
                .block_on(shell(gateway_url))
        }
    }
}

fn init_tracing(default_level: &str, to_stderr: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if to_stderr {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

async fn serve(port: Option<u16>) -> Result<()> {
    let mut config = GatewayConfig::load()?;
    if let Some(port) = port {
        config.api_port = port;
    }
    info!("Configuration loaded successfully");

    let aggregator = Aggregator::new(&config).context("Failed to initialize upstream clients")?;
    info!("Upstream clients initialized (chain: {})", config.dextools_chain);

    server::start_server(AppState::new(Arc::new(aggregator), Arc::new(config))).await
}

async fn shell(gateway_url: Option<String>) -> Result<()> {
    let mut config = ShellConfig::load()?;
    if let Some(url) = gateway_url {
        config.gateway_url = url;
    }

    let client = GatewayClient::new(&config.gateway_url, config.request_timeout())
        .context("Failed to create gateway client")?;
    info!("Shell using gateway at {}", config.gateway_url);

    let ansi = std::io::stdout().is_terminal();
    runner::run(
        Shell::new(config.holder_display_limit),
        Arc::new(client),
        &config,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        ansi,
    )
    .await?;

    Ok(())
}
