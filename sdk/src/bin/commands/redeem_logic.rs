// Redeem logic lending plugin commands

use anyhow::Result;
use clap::{Args, Subcommand};
use vyper_sdk::{RedeemLogicLendingPlugin, SdkConfig};

use super::utils::{connect, parse_pubkey, success};

#[derive(Args)]
pub struct RedeemLogicCmd {
    #[command(subcommand)]
    command: RedeemLogicSubcommand,
}

#[derive(Subcommand)]
enum RedeemLogicSubcommand {
    /// Create a new lending config owned by the wallet
    Init {
        /// Senior share of the interest in basis points
        #[arg(long, default_value = "5000")]
        interest_split: u32,

        /// Fixed fee charged per tranche
        #[arg(long, default_value = "0")]
        fixed_fee_per_tranche: u64,
    },

    /// Change interest split and fee of an existing config (owner only)
    Update {
        /// Config address
        state: String,

        #[arg(long)]
        interest_split: u32,

        #[arg(long, default_value = "0")]
        fixed_fee_per_tranche: u64,
    },

    /// Show a lending config
    Show {
        /// Config address
        state: String,
    },
}

pub async fn execute(cmd: RedeemLogicCmd, config: &SdkConfig) -> Result<()> {
    let base = connect(config)?;
    let plugin = RedeemLogicLendingPlugin::create(base, config.programs.redeem_logic_lending);

    match cmd.command {
        RedeemLogicSubcommand::Init {
            interest_split,
            fixed_fee_per_tranche,
        } => {
            let mut plugin = plugin;
            let state = plugin
                .initialize(interest_split, fixed_fee_per_tranche)
                .await?;
            success(&format!("Redeem logic config created: {}", state));
        }

        RedeemLogicSubcommand::Update {
            state,
            interest_split,
            fixed_fee_per_tranche,
        } => {
            let plugin = plugin.with_state_id(parse_pubkey(&state)?);
            let signature = plugin
                .update(interest_split, fixed_fee_per_tranche)
                .await?;
            success(&format!("Redeem logic config updated: {}", signature));
        }

        RedeemLogicSubcommand::Show { state } => {
            let plugin = plugin.with_state_id(parse_pubkey(&state)?);
            let state = plugin.get_state().await?;
            println!("interest_split={}", state.interest_split);
            println!("fixed_fee_per_tranche={}", state.fixed_fee_per_tranche);
            println!("owner={}", state.owner);
        }
    }

    Ok(())
}
