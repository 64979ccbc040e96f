// Utility functions for CLI commands

use std::sync::Arc;

use anyhow::{Context, Result};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use vyper_sdk::{BaseClient, SdkConfig};

/// Config file if given, else the environment, then flag overrides
pub fn resolve_config(
    path: Option<&str>,
    rpc_url: Option<String>,
    wallet: Option<String>,
) -> Result<SdkConfig> {
    let mut config = match path {
        Some(path) => SdkConfig::load(path)?,
        None => SdkConfig::from_env()?,
    };
    if let Some(url) = rpc_url {
        config = config.with_rpc_url(url);
    }
    if let Some(wallet) = wallet {
        config = config.with_wallet(wallet);
    }
    Ok(config)
}

/// Connect to the cluster with the configured wallet
pub fn connect(config: &SdkConfig) -> Result<Arc<BaseClient>> {
    let base = BaseClient::from_config(config).context("Failed to create client")?;
    info(&format!("RPC: {} / payer: {}", base.rpc_url(), base.payer_pubkey()));
    Ok(Arc::new(base))
}

/// Parse a pubkey from string
pub fn parse_pubkey(s: &str) -> Result<Pubkey> {
    Pubkey::from_str(s).with_context(|| format!("Invalid public key: {}", s))
}

/// Print success message with checkmark
pub fn success(msg: &str) {
    println!("[OK] {}", msg);
}

/// Print info message
pub fn info(msg: &str) {
    println!("[INFO] {}", msg);
}
