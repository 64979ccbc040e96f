//! Prelude module for common imports
//!
//! Anchor is only used for its serialization traits, everything else comes
//! from solana-sdk.

pub use anchor_lang::{AnchorDeserialize, AnchorSerialize};

pub use solana_sdk::{pubkey::Pubkey, sysvar};
