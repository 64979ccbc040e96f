use std::sync::Arc;

use crate::prelude::*;
use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{
    account::Account,
    instruction::Instruction,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use tracing::{debug, info};

use crate::{
    config::SdkConfig,
    core::{SdkError, SdkResult},
    state::AccountState,
};

/// Base RPC client wrapper: connection plus the wallet that pays and signs
pub struct BaseClient {
    rpc: Arc<RpcClient>,
    payer: Arc<Keypair>,
}

impl BaseClient {
    pub fn new(rpc: Arc<RpcClient>, payer: Arc<Keypair>) -> Self {
        Self { rpc, payer }
    }

    /// Connect using an SDK configuration, loading the payer from its wallet path
    pub fn from_config(config: &SdkConfig) -> SdkResult<Self> {
        let rpc = RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment_config()?);
        let payer = config.load_payer()?;
        Ok(Self::new(Arc::new(rpc), Arc::new(payer)))
    }

    /// Get the RPC client
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// Get the payer keypair
    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    /// Get the payer public key
    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Get the RPC endpoint URL
    pub fn rpc_url(&self) -> String {
        self.rpc.url()
    }

    /// Fetch an account
    pub async fn get_account(&self, address: &Pubkey) -> SdkResult<Account> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.rpc.commitment())
            .await?;
        response.value.ok_or(SdkError::AccountNotFound(*address))
    }

    /// Fetch and decode an anchor account
    pub async fn get_state<T: AccountState>(&self, address: &Pubkey) -> SdkResult<T> {
        debug!("Fetching {} {}", T::NAME, address);
        let account = self.get_account(address).await?;
        T::try_from_account_data(&account.data)
    }

    /// Fetch and decode every account of type `T` owned by `program_id`
    pub async fn get_program_states<T: AccountState>(
        &self,
        program_id: &Pubkey,
    ) -> SdkResult<Vec<(Pubkey, T)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                0,
                &T::DISCRIMINATOR,
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(program_id, config)
            .await?;
        debug!("Found {} {} accounts", accounts.len(), T::NAME);

        accounts
            .into_iter()
            .map(|(address, account)| Ok((address, T::try_from_account_data(&account.data)?)))
            .collect()
    }

    /// Fetch multiple accounts
    pub async fn get_multiple_accounts(
        &self,
        addresses: &[Pubkey],
    ) -> SdkResult<Vec<Option<Account>>> {
        Ok(self.rpc.get_multiple_accounts(addresses).await?)
    }

    /// Sign with the payer plus `extra_signers`, send and confirm
    pub async fn send_transaction(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> SdkResult<Signature> {
        let tx = self.build_transaction(instructions, extra_signers).await?;
        let signature = self.rpc.send_and_confirm_transaction(&tx).await?;
        info!("Transaction confirmed: {}", signature);
        Ok(signature)
    }

    /// Simulate a transaction without sending it
    pub async fn simulate_transaction(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> SdkResult<Vec<String>> {
        let tx = self.build_transaction(instructions, extra_signers).await?;
        let result = self.rpc.simulate_transaction(&tx).await?;

        if let Some(err) = result.value.err {
            return Err(SdkError::SimulationFailed(format!("{:?}", err)));
        }

        Ok(result.value.logs.unwrap_or_default())
    }

    async fn build_transaction(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> SdkResult<Transaction> {
        let recent_blockhash = self.rpc.get_latest_blockhash().await?;

        let mut signers: Vec<&Keypair> = vec![&self.payer];
        signers.extend(
            extra_signers
                .iter()
                .copied()
                .filter(|s| s.pubkey() != self.payer.pubkey()),
        );

        let mut tx = Transaction::new_with_payer(instructions, Some(&self.payer.pubkey()));
        tx.try_sign(&signers, recent_blockhash)
            .map_err(|e| SdkError::InvalidParameters(format!("Failed to sign transaction: {}", e)))?;
        Ok(tx)
    }

    /// Get current slot
    pub async fn get_slot(&self) -> SdkResult<u64> {
        Ok(self.rpc.get_slot().await?)
    }

    /// Get account balance
    pub async fn get_balance(&self, pubkey: &Pubkey) -> SdkResult<u64> {
        Ok(self.rpc.get_balance(pubkey).await?)
    }
}
