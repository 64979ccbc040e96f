//! Public API behaviour that needs no validator

use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use vyper_sdk::{
    instructions::{RateMockInstructionBuilder, TrancheInstructionBuilder, UpdateTrancheConfigParams},
    state::AccountState,
    BaseClient, HaltFlags, RateMockPlugin, SdkConfig, SdkError, TrancheConfig, Vyper,
};

fn sample_tranche() -> TrancheConfig {
    let mut tranche = TrancheConfig {
        reserve_mint: Pubkey::new_unique(),
        reserve: Pubkey::new_unique(),
        senior_tranche_mint: Pubkey::new_unique(),
        junior_tranche_mint: Pubkey::new_unique(),
        owner: Pubkey::new_unique(),
        rate_program: vyper_sdk::core::RATE_MOCK_PROGRAM_ID,
        rate_program_state: Pubkey::new_unique(),
        redeem_logic_program: vyper_sdk::core::REDEEM_LOGIC_LENDING_PROGRAM_ID,
        redeem_logic_program_state: Pubkey::new_unique(),
        version: [0, 3, 1],
        created_at: 1_660_000_000,
        ..Default::default()
    };
    tranche.tranche_data.halt_flags = HaltFlags::HALT_REDEEMS.bits();
    tranche.tranche_data.reserve_fair_value.value = [10_000; 10];
    tranche.tranche_data.tranche_fair_value.value = [10_000; 2];
    tranche
}

fn unreachable_base() -> Arc<BaseClient> {
    let rpc = RpcClient::new("http://127.0.0.1:1".to_string());
    Arc::new(BaseClient::new(Arc::new(rpc), Arc::new(Keypair::new())))
}

#[test]
fn test_refresh_ix_uses_decoded_account() {
    let tranche = sample_tranche();
    let mut data = tranche.to_account_data().unwrap();
    // allocation padding after the body
    data.extend_from_slice(&[0u8; 64]);

    let decoded = TrancheConfig::try_from_account_data(&data).unwrap();
    assert_eq!(decoded, tranche);
    assert_eq!(decoded.tranche_data.halt_flags(), HaltFlags::HALT_REDEEMS);

    let signer = Pubkey::new_unique();
    let tranche_id = Pubkey::new_unique();
    let ix = TrancheInstructionBuilder::new(vyper_sdk::core::VYPER_CORE_PROGRAM_ID)
        .refresh_tranche_fair_value(signer, tranche_id, &decoded)
        .unwrap();

    let keys: Vec<Pubkey> = ix.accounts.iter().map(|a| a.pubkey).collect();
    assert_eq!(
        keys,
        vec![
            signer,
            tranche_id,
            tranche.senior_tranche_mint,
            tranche.junior_tranche_mint,
            tranche.rate_program_state,
            tranche.redeem_logic_program,
            tranche.redeem_logic_program_state,
        ]
    );
    assert!(ix.accounts[1].is_writable);
    assert_eq!(ix.data.len(), 8);
}

#[test]
fn test_rate_mock_state_is_not_a_tranche() {
    let ix = RateMockInstructionBuilder::new(vyper_sdk::core::RATE_MOCK_PROGRAM_ID)
        .set_fair_value(Pubkey::new_unique(), Pubkey::new_unique(), 1500)
        .unwrap();
    assert_eq!(&ix.data[8..], &1500u32.to_le_bytes());

    let rate = vyper_sdk::RateState {
        fair_value: [1500; 10],
        refreshed_slot: 42,
    };
    let data = rate.to_account_data().unwrap();
    assert!(matches!(
        TrancheConfig::try_from_account_data(&data),
        Err(SdkError::InvalidDiscriminator { .. })
    ));
}

#[test]
fn test_config_file_overrides_defaults() {
    let core = Pubkey::new_unique();
    let config = SdkConfig::from_toml(&format!(
        "rpc_url = \"http://localhost:8899\"\ncommitment = \"finalized\"\n\n[programs]\ncore = \"{}\"\n",
        core
    ))
    .unwrap();

    assert_eq!(config.rpc_url, "http://localhost:8899");
    assert_eq!(config.programs.core, core);
    assert_eq!(
        config.programs.rate_mock,
        vyper_sdk::core::RATE_MOCK_PROGRAM_ID
    );
    assert!(SdkConfig::from_toml("commitment = \"eventually\"").is_err());
}

#[test]
fn test_empty_update_rejected_before_sending() {
    let vyper = Vyper::create(unreachable_base(), Pubkey::new_unique())
        .with_tranche_id(Pubkey::new_unique());

    let mut params = UpdateTrancheConfigParams::halt(HaltFlags::HALT_ALL);
    params.bitmask = vyper_sdk::UpdateTrancheConfigFlags::empty();
    assert!(matches!(
        vyper.get_update_tranche_config_ix(&params),
        Err(SdkError::InvalidParameters(_))
    ));
}

#[tokio::test]
async fn test_refresh_without_tranche_fails_fast() {
    let base = unreachable_base();
    let plugin = RateMockPlugin::create(base.clone(), vyper_sdk::core::RATE_MOCK_PROGRAM_ID)
        .with_state_id(Pubkey::new_unique());
    let vyper = Vyper::create(base, vyper_sdk::core::VYPER_CORE_PROGRAM_ID).with_rate_plugin(plugin);

    assert!(matches!(
        vyper.refresh_tranche_fair_value().await,
        Err(SdkError::TrancheNotSet)
    ));
    assert!(matches!(
        vyper.get_refresh_tranche_fair_value_ix().await,
        Err(SdkError::TrancheNotSet)
    ));
}

#[tokio::test]
async fn test_unreachable_rpc_surfaces_rpc_error() {
    let base = unreachable_base();
    let payer = base.payer().pubkey();
    let vyper = Vyper::create(base, Pubkey::new_unique()).with_tranche_id(payer);

    assert!(matches!(
        vyper.get_tranche_configuration().await,
        Err(SdkError::RpcError(_))
    ));
}
