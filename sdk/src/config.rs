use serde::{Deserialize, Serialize};
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
};
use std::{fs, path::PathBuf, str::FromStr};

use crate::core::{
    SdkError, SdkResult, RATE_MOCK_PROGRAM_ID, REDEEM_LOGIC_LENDING_PROGRAM_ID,
    VYPER_CORE_PROGRAM_ID,
};

pub const ENV_PROVIDER_URL: &str = "ANCHOR_PROVIDER_URL";
pub const ENV_WALLET: &str = "ANCHOR_WALLET";
pub const ENV_COMMITMENT: &str = "VYPER_COMMITMENT";
pub const ENV_CORE_PROGRAM_ID: &str = "VYPER_CORE_PROGRAM_ID";
pub const ENV_RATE_MOCK_PROGRAM_ID: &str = "VYPER_RATE_MOCK_PROGRAM_ID";
pub const ENV_REDEEM_LOGIC_LENDING_PROGRAM_ID: &str = "VYPER_REDEEM_LOGIC_LENDING_PROGRAM_ID";

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";
const DEFAULT_WALLET: &str = "~/.config/solana/id.json";
const DEFAULT_COMMITMENT: &str = "confirmed";

/// Program ids of the Vyper core program and its plugins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProgramIds {
    #[serde(with = "pubkey_serde")]
    pub core: Pubkey,

    #[serde(with = "pubkey_serde")]
    pub rate_mock: Pubkey,

    #[serde(with = "pubkey_serde")]
    pub redeem_logic_lending: Pubkey,
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            core: VYPER_CORE_PROGRAM_ID,
            rate_mock: RATE_MOCK_PROGRAM_ID,
            redeem_logic_lending: REDEEM_LOGIC_LENDING_PROGRAM_ID,
        }
    }
}

/// SDK configuration for connecting to the Vyper programs.
///
/// Mirrors an anchor provider: an RPC endpoint, a wallet that pays for and
/// signs transactions, and a commitment level.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SdkConfig {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Path to the payer keypair file, `~` expands to `$HOME`
    #[serde(default = "default_wallet")]
    pub wallet: String,

    /// Transaction commitment level (processed, confirmed, finalized)
    #[serde(default = "default_commitment")]
    pub commitment: String,

    #[serde(default)]
    pub programs: ProgramIds,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_wallet() -> String {
    DEFAULT_WALLET.to_string()
}

fn default_commitment() -> String {
    DEFAULT_COMMITMENT.to_string()
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            wallet: default_wallet(),
            commitment: default_commitment(),
            programs: ProgramIds::default(),
        }
    }
}

impl SdkConfig {
    /// Build from the process environment, falling back to localnet defaults
    pub fn from_env() -> SdkResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> SdkResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_PROVIDER_URL) {
            config.rpc_url = url;
        }
        if let Some(wallet) = lookup(ENV_WALLET) {
            config.wallet = wallet;
        }
        if let Some(commitment) = lookup(ENV_COMMITMENT) {
            config.commitment = commitment;
        }
        if let Some(id) = lookup(ENV_CORE_PROGRAM_ID) {
            config.programs.core = parse_program_id(ENV_CORE_PROGRAM_ID, &id)?;
        }
        if let Some(id) = lookup(ENV_RATE_MOCK_PROGRAM_ID) {
            config.programs.rate_mock = parse_program_id(ENV_RATE_MOCK_PROGRAM_ID, &id)?;
        }
        if let Some(id) = lookup(ENV_REDEEM_LOGIC_LENDING_PROGRAM_ID) {
            config.programs.redeem_logic_lending =
                parse_program_id(ENV_REDEEM_LOGIC_LENDING_PROGRAM_ID, &id)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &str) -> SdkResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("Failed to read config file {}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> SdkResult<Self> {
        let config: SdkConfig = toml::from_str(content)
            .map_err(|e| SdkError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &str) -> SdkResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SdkError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| SdkError::Config(format!("Failed to write config file {}: {}", path, e)))
    }

    fn validate(&self) -> SdkResult<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(SdkError::Config("rpc_url must not be empty".to_string()));
        }
        if self.wallet.trim().is_empty() {
            return Err(SdkError::Config("wallet must not be empty".to_string()));
        }
        self.commitment_config()?;
        Ok(())
    }

    pub fn with_rpc_url(mut self, url: String) -> Self {
        self.rpc_url = url;
        self
    }

    pub fn with_wallet(mut self, wallet: String) -> Self {
        self.wallet = wallet;
        self
    }

    pub fn with_core_program_id(mut self, program_id: Pubkey) -> Self {
        self.programs.core = program_id;
        self
    }

    /// Parsed commitment
    pub fn commitment_config(&self) -> SdkResult<CommitmentConfig> {
        let commitment = CommitmentLevel::from_str(&self.commitment).map_err(|_| {
            SdkError::Config(format!("Unknown commitment level: {}", self.commitment))
        })?;
        Ok(CommitmentConfig { commitment })
    }

    /// Wallet path with `~` expanded
    pub fn wallet_path(&self) -> SdkResult<PathBuf> {
        expand_home(&self.wallet)
    }

    /// Read the payer keypair from the wallet path
    pub fn load_payer(&self) -> SdkResult<Keypair> {
        let path = self.wallet_path()?;
        read_keypair_file(&path).map_err(|e| SdkError::Keypair {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

fn parse_program_id(name: &str, value: &str) -> SdkResult<Pubkey> {
    Pubkey::from_str(value.trim())
        .map_err(|e| SdkError::Config(format!("Invalid {}: {} ({})", name, value, e)))
}

fn expand_home(path: &str) -> SdkResult<PathBuf> {
    match path.strip_prefix('~') {
        Some(rest) => {
            let home = std::env::var("HOME")
                .map_err(|_| SdkError::Config("HOME environment variable not set".to_string()))?;
            Ok(PathBuf::from(format!("{}{}", home, rest)))
        }
        None => Ok(PathBuf::from(path)),
    }
}

// Custom serde module for Pubkey
mod pubkey_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&pubkey.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}
