use std::sync::Arc;

use crate::prelude::*;
use solana_sdk::{
    instruction::Instruction,
    signature::{Keypair, Signature, Signer},
};
use tracing::info;

use crate::{
    client::BaseClient,
    core::{SdkError, SdkResult},
    instructions::RateMockInstructionBuilder,
    state::RateState,
};

use super::RatePlugin;

/// Rate source whose fair value is set by hand, for tests and devnet
pub struct RateMockPlugin {
    base: Arc<BaseClient>,
    program_id: Pubkey,
    builder: RateMockInstructionBuilder,
    /// State account this plugin reads and writes
    pub rate_mock_state_id: Option<Pubkey>,
}

impl RateMockPlugin {
    pub fn create(base: Arc<BaseClient>, program_id: Pubkey) -> Self {
        Self {
            base,
            program_id,
            builder: RateMockInstructionBuilder::new(program_id),
            rate_mock_state_id: None,
        }
    }

    pub fn with_state_id(mut self, state_id: Pubkey) -> Self {
        self.rate_mock_state_id = Some(state_id);
        self
    }

    /// Create a new rate state account and select it
    pub async fn initialize(&mut self) -> SdkResult<Pubkey> {
        let rate_data = Keypair::new();
        let ix = self
            .builder
            .initialize(self.base.payer_pubkey(), rate_data.pubkey())?;
        self.base.send_transaction(&[ix], &[&rate_data]).await?;

        info!("Initialized rate mock state {}", rate_data.pubkey());
        self.rate_mock_state_id = Some(rate_data.pubkey());
        Ok(rate_data.pubkey())
    }

    /// Build the set fair value instruction
    pub fn get_set_fair_value_ix(&self, fair_value: u32) -> SdkResult<Instruction> {
        self.builder
            .set_fair_value(self.base.payer_pubkey(), self.state_id()?, fair_value)
    }

    /// Overwrite the mocked reserve fair value
    pub async fn set_fair_value(&self, fair_value: u32) -> SdkResult<Signature> {
        let ix = self.get_set_fair_value_ix(fair_value)?;
        info!("Setting mocked fair value to {}", fair_value);
        self.base.send_transaction(&[ix], &[]).await
    }

    /// Fetch and decode the selected rate state
    pub async fn get_state(&self) -> SdkResult<RateState> {
        self.base.get_state::<RateState>(&self.state_id()?).await
    }
}

impl RatePlugin for RateMockPlugin {
    fn program_id(&self) -> Pubkey {
        self.program_id
    }

    fn state_id(&self) -> SdkResult<Pubkey> {
        self.rate_mock_state_id
            .ok_or(SdkError::PluginStateNotSet("rate mock"))
    }

    fn refresh_ix(&self, signer: Pubkey) -> SdkResult<Option<Instruction>> {
        Ok(Some(self.builder.refresh(signer, self.state_id()?)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::nonblocking::rpc_client::RpcClient;

    fn plugin() -> RateMockPlugin {
        let rpc = RpcClient::new("http://127.0.0.1:1".to_string());
        let base = Arc::new(BaseClient::new(Arc::new(rpc), Arc::new(Keypair::new())));
        RateMockPlugin::create(base, Pubkey::new_unique())
    }

    #[test]
    fn test_state_required() {
        let plugin = plugin();
        assert!(matches!(
            plugin.state_id(),
            Err(SdkError::PluginStateNotSet(_))
        ));
        assert!(plugin.get_set_fair_value_ix(1500).is_err());
        assert!(plugin.refresh_ix(Pubkey::new_unique()).is_err());
    }

    #[test]
    fn test_refresh_targets_selected_state() {
        let state = Pubkey::new_unique();
        let plugin = plugin().with_state_id(state);
        let signer = Pubkey::new_unique();

        let ix = plugin.refresh_ix(signer).unwrap().unwrap();
        assert_eq!(ix.program_id, RatePlugin::program_id(&plugin));
        assert_eq!(ix.accounts[0].pubkey, signer);
        assert_eq!(ix.accounts[1].pubkey, state);
    }
}
