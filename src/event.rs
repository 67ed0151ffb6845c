//! Registry events and the append-only event log.
//!
//! Events are the externally observable audit trail. The registries write to
//! the log and never read it back; queryable state is never derived from
//! emitted events. For the minimal variant the log is the *only* record of
//! access and deletion intent.

use serde::Serialize;

use crate::types::Address;

/// Events emitted by the registry variants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RegistryEvent {
    /// Basic/optimized consent change.
    ConsentUpdated { subject: Address, consent: bool },
    /// Basic per-call access request with the post-increment count.
    AccessRequested { subject: Address, count: u64 },
    /// Basic per-call deletion request with the post-increment count.
    DeletionRequested { subject: Address, count: u64 },
    /// Optimized aggregate event: one per access batch, carrying the number
    /// of list entries processed (repeats included).
    AccessBatch { operator: Address, processed: u64 },
    /// Optimized aggregate event for a deletion batch.
    DeletionBatch { operator: Address, processed: u64 },
    /// Minimal variant consent change.
    Consent { subject: Address, consent: bool },
    /// Minimal variant access intent; never persisted as state.
    Access { subject: Address },
    /// Minimal variant deletion intent; never persisted as state.
    Deletion { subject: Address },
}

impl RegistryEvent {
    /// Number of 32-byte payload words the event occupies in the log, used
    /// for metering emission cost.
    pub fn payload_words(&self) -> u64 {
        match self {
            Self::ConsentUpdated { .. }
            | Self::AccessRequested { .. }
            | Self::DeletionRequested { .. }
            | Self::AccessBatch { .. }
            | Self::DeletionBatch { .. }
            | Self::Consent { .. } => 2,
            Self::Access { .. } | Self::Deletion { .. } => 1,
        }
    }
}

/// Append-only external sink for registry events.
#[derive(Debug, Default)]
pub struct EventLog {
    entries: Vec<RegistryEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event. There is no removal or mutation path.
    pub(crate) fn append(&mut self, event: RegistryEvent) {
        self.entries.push(event);
    }

    /// All emitted events in emission order.
    pub fn entries(&self) -> &[RegistryEvent] {
        &self.entries
    }

    /// Number of events emitted so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether anything has been emitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
