use std::sync::Arc;

use crate::prelude::*;
use solana_sdk::signature::{Keypair, Signature, Signer};
use tracing::info;

use crate::{
    client::BaseClient,
    core::{SdkError, SdkResult},
    instructions::{
        InitializeRedeemLogicParams, RedeemLogicLendingInstructionBuilder, UpdateRedeemLogicParams,
    },
    state::RedeemLogicConfig,
};

use super::RedeemLogicPlugin;

/// Lending redeem logic: senior tranche earns a fixed share of the interest
pub struct RedeemLogicLendingPlugin {
    base: Arc<BaseClient>,
    program_id: Pubkey,
    builder: RedeemLogicLendingInstructionBuilder,
    /// Config account this plugin reads and writes
    pub redeem_lending_state_id: Option<Pubkey>,
}

impl RedeemLogicLendingPlugin {
    pub fn create(base: Arc<BaseClient>, program_id: Pubkey) -> Self {
        Self {
            base,
            program_id,
            builder: RedeemLogicLendingInstructionBuilder::new(program_id),
            redeem_lending_state_id: None,
        }
    }

    pub fn with_state_id(mut self, state_id: Pubkey) -> Self {
        self.redeem_lending_state_id = Some(state_id);
        self
    }

    /// Create a new config owned by the payer and select it
    pub async fn initialize(
        &mut self,
        interest_split: u32,
        fixed_fee_per_tranche: u64,
    ) -> SdkResult<Pubkey> {
        let config = Keypair::new();
        let payer = self.base.payer_pubkey();
        let ix = self.builder.initialize(
            config.pubkey(),
            payer,
            payer,
            InitializeRedeemLogicParams {
                interest_split,
                fixed_fee_per_tranche,
            },
        )?;
        self.base.send_transaction(&[ix], &[&config]).await?;

        info!("Initialized redeem logic lending config {}", config.pubkey());
        self.redeem_lending_state_id = Some(config.pubkey());
        Ok(config.pubkey())
    }

    /// Change interest split and fee; the payer must own the config
    pub async fn update(
        &self,
        interest_split: u32,
        fixed_fee_per_tranche: u64,
    ) -> SdkResult<Signature> {
        let ix = self.builder.update(
            self.state_id()?,
            self.base.payer_pubkey(),
            UpdateRedeemLogicParams {
                interest_split,
                fixed_fee_per_tranche,
            },
        )?;
        self.base.send_transaction(&[ix], &[]).await
    }

    /// Fetch and decode the selected config
    pub async fn get_state(&self) -> SdkResult<RedeemLogicConfig> {
        self.base
            .get_state::<RedeemLogicConfig>(&self.state_id()?)
            .await
    }
}

impl RedeemLogicPlugin for RedeemLogicLendingPlugin {
    fn program_id(&self) -> Pubkey {
        self.program_id
    }

    fn state_id(&self) -> SdkResult<Pubkey> {
        self.redeem_lending_state_id
            .ok_or(SdkError::PluginStateNotSet("redeem logic lending"))
    }
}
