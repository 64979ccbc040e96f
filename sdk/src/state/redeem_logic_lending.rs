use crate::{core::discriminators, prelude::*};

use super::AccountState;

/// Redeem logic lending plugin configuration
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedeemLogicConfig {
    /// Share of the interest routed to the junior tranche (bps)
    pub interest_split: u32,
    /// Fixed fee charged on each tranche redemption
    pub fixed_fee_per_tranche: u64,
    pub owner: Pubkey,
}

impl AccountState for RedeemLogicConfig {
    const NAME: &'static str = "RedeemLogicConfig";
    const DISCRIMINATOR: [u8; 8] = discriminators::REDEEM_LOGIC_CONFIG;
}
