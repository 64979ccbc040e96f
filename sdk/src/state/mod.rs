//! Client-side mirrors of the accounts owned by the Vyper programs
//!
//! Every account is stored as an 8 byte anchor discriminator followed by the
//! borsh encoding of its fields. Accounts may carry trailing zero padding
//! from their allocation, so decoding never requires the buffer to be fully
//! consumed.

pub mod rate_mock;
pub mod redeem_logic_lending;
pub mod tranche_config;

pub use rate_mock::*;
pub use redeem_logic_lending::*;
pub use tranche_config::*;

use crate::{
    core::{SdkError, SdkResult, DISCRIMINATOR_LEN},
    prelude::*,
};

/// An anchor account that can be decoded from raw account data
pub trait AccountState: AnchorSerialize + AnchorDeserialize + Sized {
    /// Account type name, used in error messages
    const NAME: &'static str;

    /// The 8-byte account discriminator
    const DISCRIMINATOR: [u8; 8];

    /// Decode from raw account data (discriminator + borsh body)
    fn try_from_account_data(data: &[u8]) -> SdkResult<Self> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(SdkError::DeserializationError {
                account: Self::NAME.to_string(),
                reason: format!("account data too short: {} bytes", data.len()),
            });
        }

        let (discriminator, mut body) = data.split_at(DISCRIMINATOR_LEN);
        if discriminator != Self::DISCRIMINATOR {
            return Err(SdkError::InvalidDiscriminator {
                account: Self::NAME.to_string(),
                expected: Self::DISCRIMINATOR,
                found: discriminator.to_vec(),
            });
        }

        Self::deserialize(&mut body).map_err(|e| SdkError::DeserializationError {
            account: Self::NAME.to_string(),
            reason: e.to_string(),
        })
    }

    /// Encode to raw account data, the inverse of `try_from_account_data`
    fn to_account_data(&self) -> SdkResult<Vec<u8>> {
        let mut data = Self::DISCRIMINATOR.to_vec();
        self.serialize(&mut data)
            .map_err(|e| SdkError::SerializationError(e.to_string()))?;
        Ok(data)
    }
}
