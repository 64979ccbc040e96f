//! Bitmask types stored in, or sent to, the tranche configuration

use bitflags::bitflags;

bitflags! {
    /// Operations halted on a tranche
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HaltFlags: u16 {
        const HALT_DEPOSITS = 1 << 0;
        const HALT_REFRESHES = 1 << 1;
        const HALT_REDEEMS = 1 << 2;

        const HALT_ALL = Self::HALT_DEPOSITS.bits()
            | Self::HALT_REFRESHES.bits()
            | Self::HALT_REDEEMS.bits();
    }
}

bitflags! {
    /// Instructions only the tranche owner may call
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OwnerRestrictedIxFlags: u16 {
        const DEPOSITS = 1 << 0;
        const REFRESHES = 1 << 1;
        const REDEEMS = 1 << 2;

        const ALL = Self::DEPOSITS.bits() | Self::REFRESHES.bits() | Self::REDEEMS.bits();
    }
}

impl OwnerRestrictedIxFlags {
    pub const NONE: Self = Self::empty();
}

bitflags! {
    /// Selects which fields an `update_tranche_data` call touches
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UpdateTrancheConfigFlags: u16 {
        const HALT_FLAGS = 1 << 0;
        const RESERVE_FAIR_VALUE_STALE_SLOT_THRESHOLD = 1 << 1;
        const TRANCHE_FAIR_VALUE_STALE_SLOT_THRESHOLD = 1 << 2;
    }
}

impl HaltFlags {
    /// Parse a comma separated list such as `deposits,redeems` or `all`.
    /// An empty string or `none` clears every flag.
    pub fn parse_list(list: &str) -> Option<Self> {
        let mut flags = Self::empty();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            flags |= match name.to_ascii_lowercase().as_str() {
                "none" => Self::empty(),
                "deposits" => Self::HALT_DEPOSITS,
                "refreshes" => Self::HALT_REFRESHES,
                "redeems" => Self::HALT_REDEEMS,
                "all" => Self::HALT_ALL,
                _ => return None,
            };
        }
        Some(flags)
    }
}
