pub mod builder;
pub mod rate_mock;
pub mod redeem_logic_lending;
pub mod tranche;

pub use builder::*;
pub use rate_mock::*;
pub use redeem_logic_lending::*;
pub use tranche::*;
