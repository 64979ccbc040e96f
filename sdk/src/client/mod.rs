pub mod base;
pub mod vyper;

pub use base::BaseClient;
pub use vyper::Vyper;
