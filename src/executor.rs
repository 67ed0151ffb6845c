//! Metered sequential executor.
//!
//! A single executor totally orders all state-mutating calls. Every mutating
//! call runs inside a [`CallFrame`] that buffers slot writes and pending
//! events while charging the cost schedule; on success the frame commits
//! atomically, on error it is dropped with zero observable effect. Partial
//! application of a batch is never observable even though processing is a
//! loop over addresses.

use crate::error::Result;
use crate::event::{EventLog, RegistryEvent};
use crate::meter::{CostSchedule, GasMeter};
use crate::store::{StateStore, StorageKey};
use crate::types::Receipt;

/// Owns the persisted state, the event log, and the cost schedule. The one
/// serialization point for every mutating call.
#[derive(Debug)]
pub struct Executor {
    store: StateStore,
    events: EventLog,
    schedule: CostSchedule,
}

impl Executor {
    /// Create an executor with the default cost schedule.
    pub fn new() -> Self {
        Self::with_schedule(CostSchedule::default())
    }

    /// Create an executor charging a custom schedule.
    pub fn with_schedule(schedule: CostSchedule) -> Self {
        Self {
            store: StateStore::new(),
            events: EventLog::new(),
            schedule,
        }
    }

    /// The committed state. Read queries observe the latest finalized state
    /// through this, free of charge.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// The append-only event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The active cost schedule.
    pub fn schedule(&self) -> &CostSchedule {
        &self.schedule
    }

    /// Run one atomic mutating call.
    ///
    /// The closure operates on a buffered frame. If it returns `Ok`, every
    /// buffered write and event commits and the call's metered cost is
    /// returned in the [`Receipt`]. If it returns `Err`, nothing commits and
    /// nothing is charged.
    pub fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut CallFrame<'_>) -> Result<T>,
    ) -> Result<(T, Receipt)> {
        let mut frame = CallFrame::new(&self.store, &self.schedule);
        frame.meter.charge(self.schedule.call_base);
        let out = f(&mut frame)?;

        let (writes, events, gas_used) = frame.into_parts();
        for (key, value) in writes {
            self.store.apply(key, value);
        }
        for event in events {
            self.events.append(event);
        }
        Ok((out, Receipt { gas_used }))
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

/// In-flight view of one mutating call: buffered writes, pending events, and
/// the running gas meter.
pub struct CallFrame<'a> {
    store: &'a StateStore,
    schedule: &'a CostSchedule,
    meter: GasMeter,
    writes: Vec<(StorageKey, u128)>,
    events: Vec<RegistryEvent>,
}

impl<'a> CallFrame<'a> {
    fn new(store: &'a StateStore, schedule: &'a CostSchedule) -> Self {
        Self {
            store,
            schedule,
            meter: GasMeter::new(),
            writes: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Read a slot within the call, observing the frame's own pending writes
    /// before the committed store.
    pub fn sload(&mut self, key: StorageKey) -> u128 {
        self.meter.charge(self.schedule.slot_read);
        self.writes
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or_else(|| self.store.get(key))
    }

    /// Buffer a slot write, charging the new-slot premium when neither the
    /// committed store nor the frame has touched the slot before.
    pub fn sstore(&mut self, key: StorageKey, value: u128) {
        let exists = self.store.contains(key) || self.writes.iter().any(|(k, _)| *k == key);
        self.meter.charge(if exists {
            self.schedule.slot_write_update
        } else {
            self.schedule.slot_write_new
        });
        self.writes.push((key, value));
    }

    /// Buffer an event emission.
    pub fn emit(&mut self, event: RegistryEvent) {
        self.meter.charge(
            self.schedule
                .event_base
                .saturating_add(self.schedule.event_word.saturating_mul(event.payload_words())),
        );
        self.events.push(event);
    }

    /// Units charged so far within this frame.
    pub fn gas_used(&self) -> u64 {
        self.meter.consumed()
    }

    fn into_parts(self) -> (Vec<(StorageKey, u128)>, Vec<RegistryEvent>, u64) {
        let gas = self.meter.consumed();
        (self.writes, self.events, gas)
    }
}
