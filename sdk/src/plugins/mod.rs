//! Companion programs a tranche delegates to: a rate source that reports the
//! reserve fair value, and redeem logic that splits it between tranches.

pub mod rate_mock;
pub mod redeem_logic_lending;

pub use rate_mock::RateMockPlugin;
pub use redeem_logic_lending::RedeemLogicLendingPlugin;

use crate::{core::SdkResult, prelude::*};
use solana_sdk::instruction::Instruction;

/// Rate plugin attached to a tranche
pub trait RatePlugin: Send + Sync {
    fn program_id(&self) -> Pubkey;

    /// State account the tranche reads the reserve fair value from
    fn state_id(&self) -> SdkResult<Pubkey>;

    /// Instruction that must run before the tranche refresh, if any
    fn refresh_ix(&self, signer: Pubkey) -> SdkResult<Option<Instruction>>;
}

/// Redeem logic plugin attached to a tranche
pub trait RedeemLogicPlugin: Send + Sync {
    fn program_id(&self) -> Pubkey;

    fn state_id(&self) -> SdkResult<Pubkey>;
}
