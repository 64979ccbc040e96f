//! Basic usage example for the Vyper SDK
//!
//! Picks the first tranche on the configured cluster, prints it and refreshes
//! its fair value through the rate mock plugin.

use std::sync::Arc;

use vyper_sdk::{BaseClient, RateMockPlugin, RedeemLogicLendingPlugin, SdkConfig, Vyper};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== Vyper SDK Basic Usage ===\n");

    // 1. Configuration from ANCHOR_PROVIDER_URL / ANCHOR_WALLET
    let config = SdkConfig::from_env()?;
    println!("RPC URL: {}", config.rpc_url);
    println!("Core program: {}", config.programs.core);

    let base = Arc::new(BaseClient::from_config(&config)?);

    // 2. Find a tranche
    let vyper = Vyper::create(base.clone(), config.programs.core);
    let tranches = vyper.find_tranche_configs().await?;
    let Some((tranche_id, tranche)) = tranches.into_iter().next() else {
        println!("No tranche configuration deployed");
        return Ok(());
    };

    println!("\nTranche {}", tranche_id);
    println!("  version:       {}", tranche.version_string());
    println!("  halt flags:    {:?}", tranche.tranche_data.halt_flags());
    println!("  deposited:     {:?}", tranche.tranche_data.deposited_quantity);
    println!("  reserve value: {:?}", tranche.tranche_data.reserve_fair_value.value);
    println!("  tranche value: {:?}", tranche.tranche_data.tranche_fair_value.value);

    if tranche.rate_program != config.programs.rate_mock {
        println!("\nTranche does not use the rate mock, stopping here");
        return Ok(());
    }

    // 3. Attach plugins and refresh
    let rate_mock = RateMockPlugin::create(base.clone(), tranche.rate_program)
        .with_state_id(tranche.rate_program_state);
    let redeem_logic = RedeemLogicLendingPlugin::create(base.clone(), tranche.redeem_logic_program)
        .with_state_id(tranche.redeem_logic_program_state);

    let vyper = vyper
        .with_tranche_id(tranche_id)
        .with_rate_plugin(rate_mock)
        .with_redeem_logic_plugin(redeem_logic);

    let signature = vyper.refresh_tranche_fair_value().await?;
    println!("\nRefreshed: {}", signature);

    let tranche = vyper.get_tranche_configuration().await?;
    println!("  reserve value: {:?}", tranche.tranche_data.reserve_fair_value.value);
    println!("  tranche value: {:?}", tranche.tranche_data.tranche_fair_value.value);

    Ok(())
}
