use crate::prelude::*;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::core::seeds;

/// PDA cache to avoid recomputing addresses
pub struct PdaCache {
    cache: RwLock<HashMap<String, (Pubkey, u8)>>,
}

impl PdaCache {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> (Pubkey, u8)
    where
        F: FnOnce() -> (Pubkey, u8),
    {
        if let Some(cached) = self.cache.read().ok().and_then(|c| c.get(key).copied()) {
            return cached;
        }

        let result = compute();
        // a poisoned cache only costs a recomputation
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key.to_string(), result);
        }
        result
    }
}

impl Default for PdaCache {
    fn default() -> Self {
        Self::new()
    }
}

/// PDA builder for the Vyper core program
pub struct PdaBuilder {
    cache: PdaCache,
    pub program_id: Pubkey,
}

impl PdaBuilder {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            cache: PdaCache::new(),
            program_id,
        }
    }

    /// Authority that owns the reserve and tranche mints of a tranche
    pub fn tranche_authority(&self, tranche_config: &Pubkey) -> (Pubkey, u8) {
        let key = format!("tranche_authority:{}", tranche_config);
        self.cache.get_or_compute(&key, || {
            Pubkey::find_program_address(
                &[tranche_config.as_ref(), seeds::TRANCHE_AUTHORITY],
                &self.program_id,
            )
        })
    }
}

/// Convenience function for one-off PDA derivations
pub fn find_tranche_authority_address(program_id: &Pubkey, tranche_config: &Pubkey) -> (Pubkey, u8) {
    PdaBuilder::new(*program_id).tranche_authority(tranche_config)
}
