// Tranche configuration commands

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use vyper_sdk::{
    instructions::UpdateTrancheConfigParams, HaltFlags, RateMockPlugin,
    RedeemLogicLendingPlugin, SdkConfig, TrancheConfig, TrancheData, UpdateTrancheConfigFlags,
    Vyper,
};

use super::utils::{connect, info, parse_pubkey, success};

#[derive(Args)]
pub struct TrancheCmd {
    #[command(subcommand)]
    command: TrancheSubcommand,
}

#[derive(Subcommand)]
enum TrancheSubcommand {
    /// List every tranche configuration owned by the core program
    List,

    /// Show a tranche configuration
    Show {
        /// Tranche configuration address
        tranche: String,
    },

    /// Update halt flags and stale slot thresholds (owner only)
    Update {
        /// Tranche configuration address
        tranche: String,

        /// Comma separated halt flags: deposits, refreshes, redeems, all or none
        #[arg(long)]
        halt_flags: Option<String>,

        /// Reserve fair value stale slot threshold
        #[arg(long)]
        reserve_stale_slots: Option<u64>,

        /// Tranche fair value stale slot threshold
        #[arg(long)]
        tranche_stale_slots: Option<u64>,
    },

    /// Refresh the tranche fair value from its rate and redeem logic plugins
    Refresh {
        /// Tranche configuration address
        tranche: String,

        /// Skip the rate mock refresh pre-instruction
        #[arg(long)]
        no_rate_refresh: bool,
    },
}

pub async fn execute(cmd: TrancheCmd, config: &SdkConfig) -> Result<()> {
    let base = connect(config)?;
    let vyper = Vyper::create(base.clone(), config.programs.core);

    match cmd.command {
        TrancheSubcommand::List => {
            let tranches = vyper.find_tranche_configs().await?;
            if tranches.is_empty() {
                info("No tranche configurations found");
                return Ok(());
            }
            for (address, tranche) in tranches {
                println!(
                    "{}  reserve_mint={}  halt={:?}  deposited={:?}",
                    address,
                    tranche.reserve_mint,
                    tranche.tranche_data.halt_flags(),
                    tranche.tranche_data.deposited_quantity
                );
            }
        }

        TrancheSubcommand::Show { tranche } => {
            let vyper = vyper.with_tranche_id(parse_pubkey(&tranche)?);
            let tranche_config = vyper.get_tranche_configuration().await?;
            let view = tranche_view(&vyper.tranche_id()?, &tranche_config);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }

        TrancheSubcommand::Update {
            tranche,
            halt_flags,
            reserve_stale_slots,
            tranche_stale_slots,
        } => {
            let vyper = vyper.with_tranche_id(parse_pubkey(&tranche)?);
            let current = vyper.get_tranche_configuration().await?;
            let params = update_params(
                halt_flags.as_deref(),
                reserve_stale_slots,
                tranche_stale_slots,
                &current.tranche_data,
            )?;
            let signature = vyper.update_tranche_config(&params).await?;
            success(&format!("Tranche updated: {}", signature));
        }

        TrancheSubcommand::Refresh {
            tranche,
            no_rate_refresh,
        } => {
            let tranche_id = parse_pubkey(&tranche)?;
            let tranche_config = base.get_state::<TrancheConfig>(&tranche_id).await?;

            let mut vyper = vyper.with_tranche_id(tranche_id).with_redeem_logic_plugin(
                RedeemLogicLendingPlugin::create(base.clone(), tranche_config.redeem_logic_program)
                    .with_state_id(tranche_config.redeem_logic_program_state),
            );
            if !no_rate_refresh {
                if tranche_config.rate_program == config.programs.rate_mock {
                    vyper = vyper.with_rate_plugin(
                        RateMockPlugin::create(base.clone(), tranche_config.rate_program)
                            .with_state_id(tranche_config.rate_program_state),
                    );
                } else {
                    info("Rate program is not the rate mock, refreshing tranche only");
                }
            }

            let signature = vyper.refresh_tranche_fair_value().await?;
            let refreshed = vyper.get_tranche_configuration().await?;
            success(&format!("Fair value refreshed: {}", signature));
            println!(
                "reserve={:?} tranche={:?}",
                refreshed.tranche_data.reserve_fair_value.value,
                refreshed.tranche_data.tranche_fair_value.value
            );
        }
    }

    Ok(())
}

/// Build the update from the flags given; at least one is required.
///
/// The program writes both stale slot thresholds when the reserve bit is
/// set, so thresholds are always sent as a pair and a missing one keeps its
/// current value.
fn update_params(
    halt_flags: Option<&str>,
    reserve_stale_slots: Option<u64>,
    tranche_stale_slots: Option<u64>,
    current: &TrancheData,
) -> Result<UpdateTrancheConfigParams> {
    let mut params = UpdateTrancheConfigParams {
        bitmask: UpdateTrancheConfigFlags::empty(),
        halt_flags: current.halt_flags(),
        reserve_fair_value_stale_slot_threshold: current
            .reserve_fair_value
            .slot_tracking
            .stale_slot_threshold,
        tranche_fair_value_stale_slot_threshold: current
            .tranche_fair_value
            .slot_tracking
            .stale_slot_threshold,
    };

    if let Some(list) = halt_flags {
        let Some(flags) = HaltFlags::parse_list(list) else {
            bail!("Invalid halt flags: {}", list);
        };
        params.bitmask |= UpdateTrancheConfigFlags::HALT_FLAGS;
        params.halt_flags = flags;
    }
    if reserve_stale_slots.is_some() || tranche_stale_slots.is_some() {
        params.bitmask |= UpdateTrancheConfigFlags::RESERVE_FAIR_VALUE_STALE_SLOT_THRESHOLD
            | UpdateTrancheConfigFlags::TRANCHE_FAIR_VALUE_STALE_SLOT_THRESHOLD;
    }
    if let Some(slots) = reserve_stale_slots {
        params.reserve_fair_value_stale_slot_threshold = slots;
    }
    if let Some(slots) = tranche_stale_slots {
        params.tranche_fair_value_stale_slot_threshold = slots;
    }

    if params.bitmask.is_empty() {
        bail!("Nothing to update: pass --halt-flags, --reserve-stale-slots or --tranche-stale-slots");
    }
    Ok(params)
}

fn tranche_view(address: &Pubkey, tranche: &TrancheConfig) -> serde_json::Value {
    let data = &tranche.tranche_data;
    json!({
        "address": address.to_string(),
        "version": tranche.version_string(),
        "owner": tranche.owner.to_string(),
        "reserve_mint": tranche.reserve_mint.to_string(),
        "reserve": tranche.reserve.to_string(),
        "senior_tranche_mint": tranche.senior_tranche_mint.to_string(),
        "junior_tranche_mint": tranche.junior_tranche_mint.to_string(),
        "tranche_authority": tranche.tranche_authority.to_string(),
        "rate_program": tranche.rate_program.to_string(),
        "rate_program_state": tranche.rate_program_state.to_string(),
        "redeem_logic_program": tranche.redeem_logic_program.to_string(),
        "redeem_logic_program_state": tranche.redeem_logic_program_state.to_string(),
        "created_at": tranche.created_at,
        "halt_flags": format!("{:?}", data.halt_flags()),
        "owner_restricted_ix": format!("{:?}", data.owner_restricted_ix()),
        "deposited_quantity": data.deposited_quantity,
        "reserve_fair_value": {
            "value": data.reserve_fair_value.value,
            "last_update_slot": data.reserve_fair_value.slot_tracking.last_update.slot,
            "stale_slot_threshold": data.reserve_fair_value.slot_tracking.stale_slot_threshold,
        },
        "tranche_fair_value": {
            "value": data.tranche_fair_value.value,
            "last_update_slot": data.tranche_fair_value.slot_tracking.last_update.slot,
            "stale_slot_threshold": data.tranche_fair_value.slot_tracking.stale_slot_threshold,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(reserve_threshold: u64, tranche_threshold: u64) -> TrancheData {
        let mut data = TrancheData {
            halt_flags: HaltFlags::HALT_REFRESHES.bits(),
            ..Default::default()
        };
        data.reserve_fair_value.slot_tracking.stale_slot_threshold = reserve_threshold;
        data.tranche_fair_value.slot_tracking.stale_slot_threshold = tranche_threshold;
        data
    }

    #[test]
    fn test_update_params_from_flags() {
        let params = update_params(Some("deposits,redeems"), None, Some(4), &current(2, 2)).unwrap();
        assert_eq!(params.bitmask, UpdateTrancheConfigFlags::all());
        assert_eq!(
            params.halt_flags,
            HaltFlags::HALT_DEPOSITS | HaltFlags::HALT_REDEEMS
        );
        assert_eq!(params.reserve_fair_value_stale_slot_threshold, 2);
        assert_eq!(params.tranche_fair_value_stale_slot_threshold, 4);
    }

    #[test]
    fn test_reserve_only_update_keeps_tranche_threshold() {
        let params = update_params(None, Some(5), None, &current(2, 3)).unwrap();
        assert_eq!(
            params.bitmask,
            UpdateTrancheConfigFlags::RESERVE_FAIR_VALUE_STALE_SLOT_THRESHOLD
                | UpdateTrancheConfigFlags::TRANCHE_FAIR_VALUE_STALE_SLOT_THRESHOLD
        );

        let input = params.to_input().unwrap();
        assert_eq!(input.reserve_fair_value_stale_slot_threshold, 5);
        assert_eq!(input.tranche_fair_value_stale_slot_threshold, 3);
    }

    #[test]
    fn test_tranche_only_update_sends_reserve_bit() {
        let params = update_params(None, None, Some(7), &current(2, 3)).unwrap();
        assert!(params
            .bitmask
            .contains(UpdateTrancheConfigFlags::RESERVE_FAIR_VALUE_STALE_SLOT_THRESHOLD));
        assert_eq!(params.reserve_fair_value_stale_slot_threshold, 2);
        assert_eq!(params.tranche_fair_value_stale_slot_threshold, 7);
    }

    #[test]
    fn test_update_params_rejects_empty() {
        assert!(update_params(None, None, None, &current(2, 2)).is_err());
        assert!(update_params(Some("sideways"), None, None, &current(2, 2)).is_err());
    }
}
