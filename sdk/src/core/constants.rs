use solana_sdk::{pubkey, pubkey::Pubkey};

/// Vyper core program (tranche configuration owner)
pub const VYPER_CORE_PROGRAM_ID: Pubkey = pubkey!("mb9NrZKiC3ZYUutgGhXwwkAL6Jkvmu5WLDbxWRZ8L9U");

/// Rate mock plugin program
pub const RATE_MOCK_PROGRAM_ID: Pubkey = pubkey!("FB7HErqohbgaVV21BRiiMTuiBpeUYT8Yw7Z6EdEL7FAG");

/// Redeem logic lending plugin program
pub const REDEEM_LOGIC_LENDING_PROGRAM_ID: Pubkey =
    pubkey!("Gc2ZKNuCpdNKhAzEGS2G9rBSiz4z8MULuC3M3t8EqdWA");

/// Seeds for common PDAs
pub mod seeds {
    pub const TRANCHE_AUTHORITY: &[u8] = b"authority";
}

/// Anchor account discriminators, `sha256("account:<Name>")[..8]`
pub mod discriminators {
    pub const TRANCHE_CONFIG: [u8; 8] = [132, 228, 43, 251, 224, 23, 48, 65];
    pub const RATE_STATE: [u8; 8] = [252, 65, 187, 229, 155, 30, 161, 149];
    pub const REDEEM_LOGIC_CONFIG: [u8; 8] = [247, 199, 52, 122, 221, 104, 107, 103];
}

/// Length of an anchor discriminator
pub const DISCRIMINATOR_LEN: usize = 8;

/// Number of slots in the reserve fair value array
pub const RESERVE_FAIR_VALUE_LEN: usize = 10;

/// Number of tranches (senior, junior)
pub const TRANCHE_COUNT: usize = 2;

/// Fair value a freshly created tranche starts from (1.0 in bps)
pub const NEUTRAL_FAIR_VALUE: u32 = 10_000;
