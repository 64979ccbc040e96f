use crate::{
    core::{
        discriminators, HaltFlags, OwnerRestrictedIxFlags, RESERVE_FAIR_VALUE_LEN, TRANCHE_COUNT,
    },
    prelude::*,
};

use super::AccountState;

/// Slot of the most recent fair value update
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LastUpdate {
    pub slot: u64,
}

/// Update tracking for a fair value record
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlotTracking {
    pub last_update: LastUpdate,
    /// Number of slots after which the value is considered stale
    pub stale_slot_threshold: u64,
}

/// Fair value of the reserve, as reported by the rate plugin
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReserveFairValue {
    pub value: [u32; RESERVE_FAIR_VALUE_LEN],
    pub slot_tracking: SlotTracking,
}

/// Fair value of each tranche (senior, junior), as computed by the redeem logic
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrancheFairValue {
    pub value: [u32; TRANCHE_COUNT],
    pub slot_tracking: SlotTracking,
}

/// Mutable tranche state
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrancheData {
    /// Reserve quantity deposited in each tranche (senior, junior)
    pub deposited_quantity: [u64; TRANCHE_COUNT],
    pub reserve_fair_value: ReserveFairValue,
    pub tranche_fair_value: TrancheFairValue,
    /// Raw `HaltFlags` bits
    pub halt_flags: u16,
    /// Raw `OwnerRestrictedIxFlags` bits
    pub owner_restricted_ix: u16,
}

impl TrancheData {
    pub fn halt_flags(&self) -> HaltFlags {
        HaltFlags::from_bits_truncate(self.halt_flags)
    }

    pub fn owner_restricted_ix(&self) -> OwnerRestrictedIxFlags {
        OwnerRestrictedIxFlags::from_bits_truncate(self.owner_restricted_ix)
    }

    /// Total reserve quantity deposited across both tranches
    pub fn total_deposited_quantity(&self) -> u64 {
        self.deposited_quantity.iter().fold(0u64, |acc, q| acc.saturating_add(*q))
    }
}

/// Tranche configuration account owned by the Vyper core program
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrancheConfig {
    pub reserve_mint: Pubkey,
    pub reserve: Pubkey,
    pub tranche_data: TrancheData,
    pub senior_tranche_mint: Pubkey,
    pub junior_tranche_mint: Pubkey,
    pub tranche_authority: Pubkey,
    pub authority_seed: Pubkey,
    pub authority_bump: [u8; 1],
    pub owner: Pubkey,
    pub rate_program: Pubkey,
    pub rate_program_state: Pubkey,
    pub redeem_logic_program: Pubkey,
    pub redeem_logic_program_state: Pubkey,
    /// Semantic version of the program that created the account
    pub version: [u8; 3],
    /// Unix timestamp
    pub created_at: i64,
}

impl AccountState for TrancheConfig {
    const NAME: &'static str = "TrancheConfig";
    const DISCRIMINATOR: [u8; 8] = discriminators::TRANCHE_CONFIG;
}

impl TrancheConfig {
    /// Version formatted as `major.minor.patch`
    pub fn version_string(&self) -> String {
        format!("{}.{}.{}", self.version[0], self.version[1], self.version[2])
    }
}
