// Rate mock plugin commands

use anyhow::Result;
use clap::{Args, Subcommand};
use vyper_sdk::{RateMockPlugin, SdkConfig};

use super::utils::{connect, info, parse_pubkey, success};

#[derive(Args)]
pub struct RateMockCmd {
    #[command(subcommand)]
    command: RateMockSubcommand,
}

#[derive(Subcommand)]
enum RateMockSubcommand {
    /// Create a new rate state account
    Init,

    /// Set the mocked reserve fair value
    SetFairValue {
        /// Rate state address
        state: String,

        /// Fair value in basis points (10000 = 1.0)
        value: u32,
    },

    /// Show a rate state account
    Show {
        /// Rate state address
        state: String,
    },
}

pub async fn execute(cmd: RateMockCmd, config: &SdkConfig) -> Result<()> {
    let base = connect(config)?;
    let plugin = RateMockPlugin::create(base, config.programs.rate_mock);

    match cmd.command {
        RateMockSubcommand::Init => {
            let mut plugin = plugin;
            let state = plugin.initialize().await?;
            success(&format!("Rate state created: {}", state));
        }

        RateMockSubcommand::SetFairValue { state, value } => {
            let plugin = plugin.with_state_id(parse_pubkey(&state)?);
            let signature = plugin.set_fair_value(value).await?;
            success(&format!("Fair value set to {}: {}", value, signature));
        }

        RateMockSubcommand::Show { state } => {
            let plugin = plugin.with_state_id(parse_pubkey(&state)?);
            let rate = plugin.get_state().await?;
            info(&format!("Refreshed at slot {}", rate.refreshed_slot));
            println!("fair_value={:?}", rate.fair_value);
        }
    }

    Ok(())
}
