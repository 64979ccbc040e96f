use crate::prelude::*;
use solana_sdk::{instruction::Instruction, system_program};

use crate::{
    core::SdkResult,
    impl_instruction,
    instructions::{InstructionBuilder, VyperInstructionBuilder},
};

// Instruction discriminators
const INITIALIZE_DISCRIMINATOR: [u8; 8] = [175, 175, 109, 31, 13, 152, 155, 237];
const UPDATE_DISCRIMINATOR: [u8; 8] = [219, 200, 88, 176, 158, 63, 253, 127];

/// Parameters for initializing the lending redeem logic
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeRedeemLogicParams {
    pub interest_split: u32,
    pub fixed_fee_per_tranche: u64,
}

impl_instruction!(InitializeRedeemLogicParams, INITIALIZE_DISCRIMINATOR);

/// Parameters for updating the lending redeem logic
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpdateRedeemLogicParams {
    pub interest_split: u32,
    pub fixed_fee_per_tranche: u64,
}

impl_instruction!(UpdateRedeemLogicParams, UPDATE_DISCRIMINATOR);

/// Redeem logic lending instruction builder
pub struct RedeemLogicLendingInstructionBuilder {
    program_id: Pubkey,
}

impl RedeemLogicLendingInstructionBuilder {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    /// Build initialize instruction; `redeem_logic_config` is a fresh keypair that signs
    pub fn initialize(
        &self,
        redeem_logic_config: Pubkey,
        owner: Pubkey,
        payer: Pubkey,
        params: InitializeRedeemLogicParams,
    ) -> SdkResult<Instruction> {
        Ok(VyperInstructionBuilder::new(self.program_id)
            .add_signer(redeem_logic_config)
            .add_readonly(owner)
            .add_signer(payer)
            .add_readonly(system_program::id())
            .with_data(params.build_data()?)
            .build())
    }

    /// Build update instruction, signed by the config owner
    pub fn update(
        &self,
        redeem_logic_config: Pubkey,
        owner: Pubkey,
        params: UpdateRedeemLogicParams,
    ) -> SdkResult<Instruction> {
        Ok(VyperInstructionBuilder::new(self.program_id)
            .add_writable(redeem_logic_config)
            .add_readonly_signer(owner)
            .with_data(params.build_data()?)
            .build())
    }
}
