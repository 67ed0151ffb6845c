//! Injectable capability predicate gating mutating operations.
//!
//! The observed registry designs place no restriction on who may invoke
//! batch or event-emission operations. That behavior is reproduced
//! faithfully by the allow-all default, but the predicate is injectable so a
//! stricter rule can be substituted without touching any call site.

use core::fmt;

use crate::error::{RegistryError, Result};
use crate::types::Address;

/// Classes of mutating operations a policy can gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperationKind {
    SetConsent,
    RecordAccess,
    RecordDeletion,
    BatchRecordAccess,
    BatchRecordDeletion,
}

impl OperationKind {
    /// Stable name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetConsent => "set_consent",
            Self::RecordAccess => "record_access",
            Self::RecordDeletion => "record_deletion",
            Self::BatchRecordAccess => "batch_record_access",
            Self::BatchRecordDeletion => "batch_record_deletion",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability predicate consulted before any mutation or charge.
pub struct CallPolicy {
    check: Box<dyn Fn(Address, OperationKind) -> bool + Send + Sync>,
}

impl CallPolicy {
    /// Build a policy from an arbitrary predicate.
    pub fn new(check: impl Fn(Address, OperationKind) -> bool + Send + Sync + 'static) -> Self {
        Self {
            check: Box::new(check),
        }
    }

    /// The unrestricted-caller policy every variant ships with.
    pub fn allow_all() -> Self {
        Self::new(|_, _| true)
    }

    /// Check the predicate, mapping a denial to [`RegistryError::Unauthorized`].
    pub fn authorize(&self, caller: Address, operation: OperationKind) -> Result<()> {
        if (self.check)(caller, operation) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized { caller, operation })
        }
    }
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl fmt::Debug for CallPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallPolicy(..)")
    }
}
