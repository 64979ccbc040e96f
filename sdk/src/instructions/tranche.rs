use crate::prelude::*;
use solana_sdk::instruction::Instruction;

use crate::{
    core::{HaltFlags, SdkError, SdkResult, UpdateTrancheConfigFlags},
    impl_instruction,
    instructions::{InstructionBuilder, VyperInstructionBuilder},
    state::TrancheConfig,
};

// Instruction discriminators
const UPDATE_TRANCHE_DATA_DISCRIMINATOR: [u8; 8] = [108, 16, 56, 49, 142, 51, 86, 183];
const REFRESH_TRANCHE_FAIR_VALUE_DISCRIMINATOR: [u8; 8] = [75, 79, 79, 20, 54, 220, 54, 153];

/// On-chain argument of `update_tranche_data`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateTrancheDataInput {
    pub bitmask: u16,
    pub halt_flags: u16,
    pub reserve_fair_value_stale_slot_threshold: u64,
    pub tranche_fair_value_stale_slot_threshold: u64,
}

impl_instruction!(UpdateTrancheDataInput, UPDATE_TRANCHE_DATA_DISCRIMINATOR);

/// Parameters for refreshing the tranche fair value (no params)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RefreshTrancheFairValueParams {}

impl_instruction!(
    RefreshTrancheFairValueParams,
    REFRESH_TRANCHE_FAIR_VALUE_DISCRIMINATOR
);

/// Typed tranche configuration update.
///
/// Only the fields selected by `bitmask` are applied by the program, the
/// others are sent but ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateTrancheConfigParams {
    pub bitmask: UpdateTrancheConfigFlags,
    pub halt_flags: HaltFlags,
    pub reserve_fair_value_stale_slot_threshold: u64,
    pub tranche_fair_value_stale_slot_threshold: u64,
}

impl UpdateTrancheConfigParams {
    /// Update only the halt flags
    pub fn halt(halt_flags: HaltFlags) -> Self {
        Self {
            bitmask: UpdateTrancheConfigFlags::HALT_FLAGS,
            halt_flags,
            reserve_fair_value_stale_slot_threshold: 0,
            tranche_fair_value_stale_slot_threshold: 0,
        }
    }

    /// Update both stale slot thresholds
    pub fn stale_slot_thresholds(reserve: u64, tranche: u64) -> Self {
        Self {
            bitmask: UpdateTrancheConfigFlags::RESERVE_FAIR_VALUE_STALE_SLOT_THRESHOLD
                | UpdateTrancheConfigFlags::TRANCHE_FAIR_VALUE_STALE_SLOT_THRESHOLD,
            halt_flags: HaltFlags::empty(),
            reserve_fair_value_stale_slot_threshold: reserve,
            tranche_fair_value_stale_slot_threshold: tranche,
        }
    }

    /// Validate and convert to the wire representation
    pub fn to_input(&self) -> SdkResult<UpdateTrancheDataInput> {
        if self.bitmask.is_empty() {
            return Err(SdkError::InvalidParameters(
                "update bitmask selects no field".to_string(),
            ));
        }

        Ok(UpdateTrancheDataInput {
            bitmask: self.bitmask.bits(),
            halt_flags: self.halt_flags.bits(),
            reserve_fair_value_stale_slot_threshold: self.reserve_fair_value_stale_slot_threshold,
            tranche_fair_value_stale_slot_threshold: self.tranche_fair_value_stale_slot_threshold,
        })
    }
}

/// Vyper core instruction builder
pub struct TrancheInstructionBuilder {
    program_id: Pubkey,
}

impl TrancheInstructionBuilder {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Build update tranche data instruction, signed by the tranche owner
    pub fn update_tranche_data(
        &self,
        owner: Pubkey,
        tranche_config: Pubkey,
        params: &UpdateTrancheConfigParams,
    ) -> SdkResult<Instruction> {
        Ok(VyperInstructionBuilder::new(self.program_id)
            .add_readonly_signer(owner)
            .add_writable(tranche_config)
            .with_data(params.to_input()?.build_data()?)
            .build())
    }

    /// Build refresh tranche fair value instruction from the accounts the
    /// configuration references
    pub fn refresh_tranche_fair_value(
        &self,
        signer: Pubkey,
        tranche_config_id: Pubkey,
        config: &TrancheConfig,
    ) -> SdkResult<Instruction> {
        Ok(VyperInstructionBuilder::new(self.program_id)
            .add_readonly_signer(signer)
            .add_writable(tranche_config_id)
            .add_readonly(config.senior_tranche_mint)
            .add_readonly(config.junior_tranche_mint)
            .add_readonly(config.rate_program_state)
            .add_readonly(config.redeem_logic_program)
            .add_readonly(config.redeem_logic_program_state)
            .with_data(RefreshTrancheFairValueParams {}.build_data()?)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::builder::instruction_discriminator;

    #[test]
    fn test_discriminators() {
        assert_eq!(
            UPDATE_TRANCHE_DATA_DISCRIMINATOR,
            instruction_discriminator("update_tranche_data")
        );
        assert_eq!(
            REFRESH_TRANCHE_FAIR_VALUE_DISCRIMINATOR,
            instruction_discriminator("refresh_tranche_fair_value")
        );
    }

    #[test]
    fn test_update_data_encoding() {
        let params = UpdateTrancheConfigParams {
            bitmask: UpdateTrancheConfigFlags::HALT_FLAGS,
            halt_flags: HaltFlags::HALT_ALL,
            reserve_fair_value_stale_slot_threshold: 2,
            tranche_fair_value_stale_slot_threshold: 3,
        };
        let data = params.to_input().unwrap().build_data().unwrap();

        assert_eq!(data.len(), 8 + 2 + 2 + 8 + 8);
        assert_eq!(&data[..8], &UPDATE_TRANCHE_DATA_DISCRIMINATOR);
        assert_eq!(&data[8..10], &1u16.to_le_bytes());
        assert_eq!(&data[10..12], &7u16.to_le_bytes());
        assert_eq!(&data[12..20], &2u64.to_le_bytes());
        assert_eq!(&data[20..28], &3u64.to_le_bytes());
    }

    #[test]
    fn test_empty_bitmask_rejected() {
        let params = UpdateTrancheConfigParams {
            bitmask: UpdateTrancheConfigFlags::empty(),
            ..UpdateTrancheConfigParams::halt(HaltFlags::HALT_ALL)
        };
        assert!(matches!(
            params.to_input(),
            Err(SdkError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_update_accounts() {
        let program_id = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let tranche = Pubkey::new_unique();
        let ix = TrancheInstructionBuilder::new(program_id)
            .update_tranche_data(owner, tranche, &UpdateTrancheConfigParams::halt(HaltFlags::HALT_DEPOSITS))
            .unwrap();

        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[0].pubkey, owner);
        assert!(ix.accounts[0].is_signer);
        assert!(!ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, tranche);
        assert!(ix.accounts[1].is_writable);
        assert!(!ix.accounts[1].is_signer);
    }

    #[test]
    fn test_refresh_accounts_follow_config() {
        let config = TrancheConfig {
            senior_tranche_mint: Pubkey::new_unique(),
            junior_tranche_mint: Pubkey::new_unique(),
            rate_program_state: Pubkey::new_unique(),
            redeem_logic_program: Pubkey::new_unique(),
            redeem_logic_program_state: Pubkey::new_unique(),
            ..Default::default()
        };
        let signer = Pubkey::new_unique();
        let tranche = Pubkey::new_unique();
        let ix = TrancheInstructionBuilder::new(Pubkey::new_unique())
            .refresh_tranche_fair_value(signer, tranche, &config)
            .unwrap();

        let keys: Vec<Pubkey> = ix.accounts.iter().map(|m| m.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                signer,
                tranche,
                config.senior_tranche_mint,
                config.junior_tranche_mint,
                config.rate_program_state,
                config.redeem_logic_program,
                config.redeem_logic_program_state,
            ]
        );
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts[1].is_writable);
        assert!(ix.accounts[2..].iter().all(|m| !m.is_writable && !m.is_signer));
        assert_eq!(ix.data, REFRESH_TRANCHE_FAIR_VALUE_DISCRIMINATOR.to_vec());
    }
}
