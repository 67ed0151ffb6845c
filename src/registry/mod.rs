//! Registry variants and their shared operation surface.
//!
//! Three mutually independent state/event designs track the same per-subject
//! compliance signals at different cost points:
//!
//! - [`BasicRegistry`]: one slot per field, one event per call.
//! - [`OptimizedRegistry`]: one packed slot per subject, batched
//!   multi-address operations with a single aggregate event.
//! - [`MinimalEventRegistry`]: persisted consent flag only; access and
//!   deletion intents live solely in the event log.
//!
//! The harness drives all of them through the [`ConsentRegistry`] trait.

pub mod basic;
pub mod minimal;
pub mod optimized;

pub use basic::BasicRegistry;
pub use minimal::MinimalEventRegistry;
pub use optimized::OptimizedRegistry;

use crate::error::{RegistryError, Result};
use crate::executor::Executor;
use crate::types::{Address, Receipt, VariantKind};

/// Ceiling on batch list length. A list this large is malformed input, not a
/// workload.
pub const MAX_BATCH_LEN: usize = 10_000;

/// Shared operation surface over the three variants.
///
/// Mutating operations are keyed by an explicitly supplied caller identity;
/// state lives in the [`Executor`]'s store, passed by reference into every
/// operation. Variants without a persisted counter answer count queries with
/// zero; variants without batching reject the batch entry points.
pub trait ConsentRegistry {
    /// Which state/event design this registry implements.
    fn kind(&self) -> VariantKind;

    /// Whether the batch entry points are native to this variant.
    fn supports_batching(&self) -> bool {
        false
    }

    /// Set the caller's own consent flag.
    fn set_consent(&self, env: &mut Executor, caller: Address, value: bool) -> Result<Receipt>;

    /// Record one access request for the caller.
    fn record_access(&self, env: &mut Executor, caller: Address) -> Result<Receipt>;

    /// Record one deletion request for the caller.
    fn record_deletion(&self, env: &mut Executor, caller: Address) -> Result<Receipt>;

    /// Record an access request for every listed subject, atomically.
    fn batch_record_access(
        &self,
        env: &mut Executor,
        operator: Address,
        subjects: &[Address],
    ) -> Result<Receipt> {
        let _ = (env, operator, subjects);
        Err(unsupported(self.kind(), "batch_record_access"))
    }

    /// Record a deletion request for every listed subject, atomically.
    fn batch_record_deletion(
        &self,
        env: &mut Executor,
        operator: Address,
        subjects: &[Address],
    ) -> Result<Receipt> {
        let _ = (env, operator, subjects);
        Err(unsupported(self.kind(), "batch_record_deletion"))
    }

    /// Whether the subject has opted in. Free committed-state read.
    fn has_consented(&self, env: &Executor, subject: Address) -> bool;

    /// Persisted access-request count; zero for variants that keep none.
    fn access_request_count(&self, env: &Executor, subject: Address) -> u64;

    /// Persisted deletion-request count; zero for variants that keep none.
    fn deletion_request_count(&self, env: &Executor, subject: Address) -> u64;
}

/// Validate a batch list before any mutation or charge.
pub(crate) fn check_batch_len(subjects: &[Address]) -> Result<()> {
    if subjects.len() > MAX_BATCH_LEN {
        return Err(RegistryError::InvalidInput {
            reason: format!(
                "batch of {} subjects exceeds the ceiling of {MAX_BATCH_LEN}",
                subjects.len()
            ),
        });
    }
    Ok(())
}

fn unsupported(kind: VariantKind, operation: &str) -> RegistryError {
    RegistryError::ExecutionReverted {
        reason: format!("{operation} is not supported by the {kind} variant"),
    }
}
