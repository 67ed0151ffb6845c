//! Resource cost schedule and per-call gas metering.

use serde::Serialize;

/// Flat per-primitive resource prices charged by the execution environment.
///
/// The defaults follow the schedule of the ledger executor the registry
/// designs target: a fixed base price per mutating call, a premium for
/// materializing a fresh slot over updating an existing one, and a
/// per-payload-word price for event emission. Absolute figures only matter
/// relative to each other; tests and benches may substitute their own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CostSchedule {
    /// Base price charged once per mutating call.
    pub call_base: u64,
    /// Writing a slot that has never been written.
    pub slot_write_new: u64,
    /// Overwriting an already-materialized slot.
    pub slot_write_update: u64,
    /// Reading a slot inside a mutating call. External queries are free.
    pub slot_read: u64,
    /// Appending an event to the external log.
    pub event_base: u64,
    /// Per 32-byte payload word of an emitted event.
    pub event_word: u64,
}

impl Default for CostSchedule {
    fn default() -> Self {
        Self {
            call_base: 21_000,
            slot_write_new: 20_000,
            slot_write_update: 5_000,
            slot_read: 2_100,
            event_base: 750,
            event_word: 256,
        }
    }
}

impl CostSchedule {
    /// A schedule charging one unit per primitive. Handy for tests that
    /// reason about operation counts rather than absolute prices.
    pub fn uniform() -> Self {
        Self {
            call_base: 1,
            slot_write_new: 1,
            slot_write_update: 1,
            slot_read: 1,
            event_base: 1,
            event_word: 1,
        }
    }
}

/// Accumulates the resource units charged within one call.
#[derive(Debug, Default)]
pub struct GasMeter {
    consumed: u64,
}

impl GasMeter {
    /// Create a meter with nothing consumed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Charge an amount against the meter.
    pub fn charge(&mut self, amount: u64) {
        self.consumed = self.consumed.saturating_add(amount);
    }

    /// Total units consumed so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}
