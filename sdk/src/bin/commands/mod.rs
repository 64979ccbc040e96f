// Command modules for vyper CLI

pub mod rate_mock;
pub mod redeem_logic;
pub mod tranche;
pub mod utils;
