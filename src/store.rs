//! Persisted slot-word state store.
//!
//! One shared mapping from storage key to a 128-bit word models the
//! executor's ledger. Each variant carves out its own key space: the basic
//! variant spreads an address over three independent slots, the optimized
//! variant packs everything into one, and the minimal variant persists only
//! the consent slot. Slots are materialized lazily on first write and never
//! deleted; an absent slot reads as zero.

use std::collections::HashMap;

use crate::types::Address;

/// Key into the shared slot map. Variants never share keys for the same
/// address, so one store can host any single registry instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Consent flag (0 or 1) for the basic and minimal variants.
    Consent(Address),
    /// Basic variant access-request counter.
    AccessCount(Address),
    /// Basic variant deletion-request counter.
    DeletionCount(Address),
    /// Optimized variant packed record.
    Packed(Address),
}

/// The one shared mutable resource: the registry's persisted state.
///
/// Reachable only through the defined operation surface; mutating writes go
/// through a [`CallFrame`](crate::executor::CallFrame) so they commit
/// atomically and get metered.
#[derive(Debug, Default)]
pub struct StateStore {
    slots: HashMap<StorageKey, u128>,
}

impl StateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a slot; absent slots read as the implicit zero default.
    pub fn get(&self, key: StorageKey) -> u128 {
        self.slots.get(&key).copied().unwrap_or(0)
    }

    /// Whether the slot has ever been written.
    pub fn contains(&self, key: StorageKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// Number of materialized slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether any slot has been materialized.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Apply a committed write. Only the executor's commit path calls this.
    pub(crate) fn apply(&mut self, key: StorageKey, value: u128) {
        self.slots.insert(key, value);
    }
}
