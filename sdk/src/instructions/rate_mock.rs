use crate::prelude::*;
use solana_sdk::{instruction::Instruction, system_program};

use crate::{
    core::SdkResult,
    impl_instruction,
    instructions::{InstructionBuilder, VyperInstructionBuilder},
};

// Instruction discriminators
const INITIALIZE_DISCRIMINATOR: [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];
const SET_FAIR_VALUE_DISCRIMINATOR: [u8; 8] = [187, 92, 75, 94, 172, 13, 241, 14];
const REFRESH_DISCRIMINATOR: [u8; 8] = [170, 155, 22, 254, 147, 181, 49, 161];

/// Parameters for initializing rate mock state (no params)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeRateMockParams {}

impl_instruction!(InitializeRateMockParams, INITIALIZE_DISCRIMINATOR);

/// Parameters for setting the mocked fair value
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct SetFairValueParams {
    pub fair_value: u32,
}

impl_instruction!(SetFairValueParams, SET_FAIR_VALUE_DISCRIMINATOR);

/// Parameters for refreshing rate mock state (no params)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct RefreshRateMockParams {}

impl_instruction!(RefreshRateMockParams, REFRESH_DISCRIMINATOR);

/// Rate mock instruction builder
pub struct RateMockInstructionBuilder {
    program_id: Pubkey,
}

impl RateMockInstructionBuilder {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Build initialize instruction; `rate_data` is a fresh keypair that signs
    pub fn initialize(&self, signer: Pubkey, rate_data: Pubkey) -> SdkResult<Instruction> {
        Ok(VyperInstructionBuilder::new(self.program_id)
            .add_signer(signer)
            .add_signer(rate_data)
            .add_readonly(system_program::id())
            .with_data(InitializeRateMockParams {}.build_data()?)
            .build())
    }

    /// Build set fair value instruction
    pub fn set_fair_value(
        &self,
        signer: Pubkey,
        rate_data: Pubkey,
        fair_value: u32,
    ) -> SdkResult<Instruction> {
        Ok(VyperInstructionBuilder::new(self.program_id)
            .add_readonly_signer(signer)
            .add_writable(rate_data)
            .with_data(SetFairValueParams { fair_value }.build_data()?)
            .build())
    }

    /// Build refresh instruction
    pub fn refresh(&self, signer: Pubkey, rate_data: Pubkey) -> SdkResult<Instruction> {
        Ok(VyperInstructionBuilder::new(self.program_id)
            .add_readonly_signer(signer)
            .add_writable(rate_data)
            .with_data(RefreshRateMockParams {}.build_data()?)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::builder::instruction_discriminator;

    #[test]
    fn test_discriminators() {
        assert_eq!(INITIALIZE_DISCRIMINATOR, instruction_discriminator("initialize"));
        assert_eq!(SET_FAIR_VALUE_DISCRIMINATOR, instruction_discriminator("set_fair_value"));
        assert_eq!(REFRESH_DISCRIMINATOR, instruction_discriminator("refresh"));
    }

    #[test]
    fn test_set_fair_value() {
        let builder = RateMockInstructionBuilder::new(Pubkey::new_unique());
        let signer = Pubkey::new_unique();
        let state = Pubkey::new_unique();
        let ix = builder.set_fair_value(signer, state, 1500).unwrap();

        assert_eq!(&ix.data[..8], &SET_FAIR_VALUE_DISCRIMINATOR);
        assert_eq!(&ix.data[8..], &1500u32.to_le_bytes());
        assert_eq!(ix.accounts[0].pubkey, signer);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[1].pubkey, state);
        assert!(ix.accounts[1].is_writable);
    }

    #[test]
    fn test_initialize_requires_state_signature() {
        let builder = RateMockInstructionBuilder::new(Pubkey::new_unique());
        let state = Pubkey::new_unique();
        let ix = builder.initialize(Pubkey::new_unique(), state).unwrap();

        assert_eq!(ix.accounts.len(), 3);
        assert!(ix.accounts[1].is_signer && ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[2].pubkey, system_program::id());
    }
}
