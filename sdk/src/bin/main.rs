// CLI tool for the Vyper tranche protocol
//
// Thin command-line front end over the SDK client: inspect tranches, update
// their configuration, refresh fair values and drive the plugin programs.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vyper")]
#[command(about = "Vyper tranche protocol CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file (defaults to the ANCHOR_* environment)
    #[arg(long)]
    config: Option<String>,

    /// RPC URL to connect to
    #[arg(long)]
    rpc_url: Option<String>,

    /// Path to wallet keypair file
    #[arg(long)]
    wallet: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and manage tranche configurations
    Tranche(commands::tranche::TrancheCmd),

    /// Drive the rate mock plugin
    RateMock(commands::rate_mock::RateMockCmd),

    /// Drive the redeem logic lending plugin
    RedeemLogic(commands::redeem_logic::RedeemLogicCmd),

    /// Write the effective configuration to a TOML file
    InitConfig {
        /// Output path
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "vyper_sdk=debug,vyper=debug"
    } else {
        "vyper_sdk=info,vyper=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = commands::utils::resolve_config(
        cli.config.as_deref(),
        cli.rpc_url.clone(),
        cli.wallet.clone(),
    )?;

    match cli.command {
        Commands::Tranche(cmd) => commands::tranche::execute(cmd, &config).await,
        Commands::RateMock(cmd) => commands::rate_mock::execute(cmd, &config).await,
        Commands::RedeemLogic(cmd) => commands::redeem_logic::execute(cmd, &config).await,
        Commands::InitConfig { path } => {
            config.save(&path)?;
            commands::utils::success(&format!("Configuration written to {}", path));
            Ok(())
        }
    }
}
