use crate::{
    core::{discriminators, RESERVE_FAIR_VALUE_LEN},
    prelude::*,
};

use super::AccountState;

/// Rate mock plugin state: a manually set reserve fair value
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RateState {
    pub fair_value: [u32; RESERVE_FAIR_VALUE_LEN],
    pub refreshed_slot: u64,
}

impl AccountState for RateState {
    const NAME: &'static str = "RateState";
    const DISCRIMINATOR: [u8; 8] = discriminators::RATE_STATE;
}
