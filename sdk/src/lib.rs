/// Vyper Protocol SDK
///
/// Client-side bindings for the Vyper tranche program and its plugins.
/// Provides:
/// - Tranche configuration fetching and decoding
/// - Owner-signed configuration updates
/// - Fair value refreshes, sent directly or as raw instructions
/// - Rate mock and redeem logic lending plugin clients
pub mod client;
pub mod config;
pub mod core;
pub mod instructions;
pub mod plugins;
pub mod prelude;
pub mod protocol;
pub mod state;

pub use client::{BaseClient, Vyper};
pub use config::SdkConfig;
pub use core::{
    HaltFlags, OwnerRestrictedIxFlags, SdkError, SdkResult, UpdateTrancheConfigFlags,
};
pub use plugins::{RateMockPlugin, RatePlugin, RedeemLogicLendingPlugin, RedeemLogicPlugin};
pub use state::{RateState, RedeemLogicConfig, TrancheConfig, TrancheData};
