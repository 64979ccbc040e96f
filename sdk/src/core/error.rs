//! SDK error types

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// RPC error
    #[error("RPC error: {0}")]
    RpcError(#[from] solana_client::client_error::ClientError),

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    /// Account exists but belongs to another program or type
    #[error("Invalid discriminator for {account}: expected {expected:?}, found {found:?}")]
    InvalidDiscriminator {
        account: String,
        expected: [u8; 8],
        found: Vec<u8>,
    },

    /// Deserialization error
    #[error("Failed to deserialize {account}: {reason}")]
    DeserializationError { account: String, reason: String },

    /// Serialization error
    #[error("Failed to serialize data: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Keypair could not be loaded
    #[error("Failed to load keypair from {path}: {reason}")]
    Keypair { path: String, reason: String },

    /// No tranche selected on the client
    #[error("No tranche selected, call set_tranche_id first")]
    TrancheNotSet,

    /// Plugin state not selected
    #[error("Plugin state not set: {0}")]
    PluginStateNotSet(&'static str),

    /// Attached plugin does not match the tranche configuration
    #[error("{plugin} plugin state {actual} does not match tranche configuration ({expected})")]
    PluginMismatch {
        plugin: &'static str,
        expected: Pubkey,
        actual: Pubkey,
    },

    /// Invalid parameters
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Simulation failed
    #[error("Simulation failed: {0}")]
    SimulationFailed(String),
}

impl From<std::io::Error> for SdkError {
    fn from(err: std::io::Error) -> Self {
        SdkError::SerializationError(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
