use std::sync::Arc;

use crate::prelude::*;
use solana_program::program_pack::Pack;
use solana_sdk::{instruction::Instruction, signature::Signature};
use tracing::{debug, info};

use crate::{
    core::{SdkError, SdkResult, TRANCHE_COUNT},
    instructions::{TrancheInstructionBuilder, UpdateTrancheConfigParams},
    plugins::{RatePlugin, RedeemLogicPlugin},
    protocol::PdaBuilder,
    state::TrancheConfig,
};

use super::BaseClient;

/// Client for a single tranche of the Vyper core program.
///
/// Optional rate and redeem logic plugins let fair value refreshes run the
/// plugin's own pre-instructions in the same transaction.
pub struct Vyper {
    base: Arc<BaseClient>,
    program_id: Pubkey,
    pda: PdaBuilder,
    builder: TrancheInstructionBuilder,
    tranche_id: Option<Pubkey>,
    rate_plugin: Option<Box<dyn RatePlugin>>,
    redeem_logic_plugin: Option<Box<dyn RedeemLogicPlugin>>,
}

impl Vyper {
    /// Create a client without a selected tranche or plugins
    pub fn create(base: Arc<BaseClient>, program_id: Pubkey) -> Self {
        Self {
            base,
            program_id,
            pda: PdaBuilder::new(program_id),
            builder: TrancheInstructionBuilder::new(program_id),
            tranche_id: None,
            rate_plugin: None,
            redeem_logic_plugin: None,
        }
    }

    pub fn with_rate_plugin<P: RatePlugin + 'static>(mut self, plugin: P) -> Self {
        self.rate_plugin = Some(Box::new(plugin));
        self
    }

    pub fn with_redeem_logic_plugin<P: RedeemLogicPlugin + 'static>(mut self, plugin: P) -> Self {
        self.redeem_logic_plugin = Some(Box::new(plugin));
        self
    }

    pub fn with_tranche_id(mut self, tranche_id: Pubkey) -> Self {
        self.tranche_id = Some(tranche_id);
        self
    }

    /// Select the tranche configuration under management
    pub fn set_tranche_id(&mut self, tranche_id: Pubkey) {
        self.tranche_id = Some(tranche_id);
    }

    /// Selected tranche configuration
    pub fn tranche_id(&self) -> SdkResult<Pubkey> {
        self.tranche_id.ok_or(SdkError::TrancheNotSet)
    }

    /// Get the program ID
    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn base(&self) -> &BaseClient {
        &self.base
    }

    /// Every tranche configuration owned by the core program
    pub async fn find_tranche_configs(&self) -> SdkResult<Vec<(Pubkey, TrancheConfig)>> {
        self.base
            .get_program_states::<TrancheConfig>(&self.program_id)
            .await
    }

    /// Fetch and decode the selected tranche configuration
    pub async fn get_tranche_configuration(&self) -> SdkResult<TrancheConfig> {
        let tranche_id = self.tranche_id()?;
        self.base.get_state::<TrancheConfig>(&tranche_id).await
    }

    /// Build the owner-signed configuration update; the payer acts as owner
    pub fn get_update_tranche_config_ix(
        &self,
        params: &UpdateTrancheConfigParams,
    ) -> SdkResult<Instruction> {
        self.builder
            .update_tranche_data(self.base.payer_pubkey(), self.tranche_id()?, params)
    }

    /// Update halt flags and/or stale slot thresholds of the selected tranche
    pub async fn update_tranche_config(
        &self,
        params: &UpdateTrancheConfigParams,
    ) -> SdkResult<Signature> {
        let ix = self.get_update_tranche_config_ix(params)?;
        info!(
            "Updating tranche {} (bitmask {:?})",
            self.tranche_id()?,
            params.bitmask
        );
        self.base.send_transaction(&[ix], &[]).await
    }

    /// Build the refresh instruction alone, for callers assembling their own
    /// transaction. Rate plugin pre-instructions are not included.
    pub async fn get_refresh_tranche_fair_value_ix(&self) -> SdkResult<Instruction> {
        let tranche_id = self.tranche_id()?;
        let config = self.get_tranche_configuration().await?;
        self.builder
            .refresh_tranche_fair_value(self.base.payer_pubkey(), tranche_id, &config)
    }

    /// Refresh the tranche fair value, preceded by the rate plugin refresh
    /// when a plugin is attached
    pub async fn refresh_tranche_fair_value(&self) -> SdkResult<Signature> {
        let tranche_id = self.tranche_id()?;
        let config = self.get_tranche_configuration().await?;
        self.check_plugins(&config)?;

        let signer = self.base.payer_pubkey();
        let mut instructions = Vec::with_capacity(2);
        if let Some(plugin) = &self.rate_plugin {
            if let Some(ix) = plugin.refresh_ix(signer)? {
                debug!("Prepending rate plugin refresh for {}", plugin.state_id()?);
                instructions.push(ix);
            }
        }
        instructions.push(
            self.builder
                .refresh_tranche_fair_value(signer, tranche_id, &config)?,
        );

        info!("Refreshing fair value of tranche {}", tranche_id);
        self.base.send_transaction(&instructions, &[]).await
    }

    /// Tranche authority PDA of the selected tranche
    pub fn get_tranche_authority(&self) -> SdkResult<(Pubkey, u8)> {
        Ok(self.pda.tranche_authority(&self.tranche_id()?))
    }

    /// Current supply of the senior and junior tranche mints
    pub async fn get_tranche_mint_supplies(&self) -> SdkResult<[u64; TRANCHE_COUNT]> {
        let config = self.get_tranche_configuration().await?;
        let mints = [config.senior_tranche_mint, config.junior_tranche_mint];
        let accounts = self.base.get_multiple_accounts(&mints).await?;

        let mut supplies = [0u64; TRANCHE_COUNT];
        for (i, (mint, account)) in mints.iter().zip(accounts).enumerate() {
            let account = account.ok_or(SdkError::AccountNotFound(*mint))?;
            let state = spl_token::state::Mint::unpack(&account.data).map_err(|e| {
                SdkError::DeserializationError {
                    account: format!("Mint {}", mint),
                    reason: e.to_string(),
                }
            })?;
            supplies[i] = state.supply;
        }
        Ok(supplies)
    }

    /// Attached plugins must point at the state accounts the tranche was
    /// configured with, otherwise the program rejects the refresh
    fn check_plugins(&self, config: &TrancheConfig) -> SdkResult<()> {
        if let Some(plugin) = &self.rate_plugin {
            check_plugin("rate", config.rate_program, plugin.program_id())?;
            check_plugin("rate", config.rate_program_state, plugin.state_id()?)?;
        }
        if let Some(plugin) = &self.redeem_logic_plugin {
            check_plugin(
                "redeem logic",
                config.redeem_logic_program,
                plugin.program_id(),
            )?;
            check_plugin(
                "redeem logic",
                config.redeem_logic_program_state,
                plugin.state_id()?,
            )?;
        }
        Ok(())
    }
}

fn check_plugin(plugin: &'static str, expected: Pubkey, actual: Pubkey) -> SdkResult<()> {
    if expected != actual {
        return Err(SdkError::PluginMismatch {
            plugin,
            expected,
            actual,
        });
    }
    Ok(())
}
