//! Optimized registry: packed per-subject record, batched operations.
//!
//! All three logical fields share one storage word, so every touch of a
//! subject costs one slot write instead of up to three. Batch operations
//! process the input list in order, repeats included, and emit exactly one
//! aggregate event for the whole batch. The trade is granularity: there is
//! no per-subject request event to replay.

use crate::error::Result;
use crate::event::RegistryEvent;
use crate::executor::{CallFrame, Executor};
use crate::policy::{CallPolicy, OperationKind};
use crate::registry::{check_batch_len, ConsentRegistry};
use crate::store::StorageKey;
use crate::types::{Address, PackedUserRecord, Receipt, VariantKind};

/// Which packed counter a batch touches.
#[derive(Copy, Clone)]
enum BatchField {
    Access,
    Deletion,
}

/// The packed-record, batch-capable registry design.
#[derive(Debug, Default)]
pub struct OptimizedRegistry {
    policy: CallPolicy,
}

impl OptimizedRegistry {
    /// Create a registry with the unrestricted-caller policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry gated by a custom capability predicate.
    pub fn with_policy(policy: CallPolicy) -> Self {
        Self { policy }
    }

    /// Unpack the subject's committed record. Free read; untouched subjects
    /// yield the all-default record.
    pub fn get_user_state(&self, env: &Executor, subject: Address) -> PackedUserRecord {
        PackedUserRecord::from_word(env.store().get(StorageKey::Packed(subject)))
    }

    /// Increment the access field of every listed subject, then emit one
    /// `AccessBatch(operator, subjects.len())`. An empty list mutates
    /// nothing but still emits the aggregate event with count 0.
    pub fn batch_record_access(
        &self,
        env: &mut Executor,
        operator: Address,
        subjects: &[Address],
    ) -> Result<Receipt> {
        self.policy
            .authorize(operator, OperationKind::BatchRecordAccess)?;
        check_batch_len(subjects)?;
        let ((), receipt) = env.transact(|frame| {
            Self::apply_batch(frame, operator, subjects, BatchField::Access);
            Ok(())
        })?;
        Ok(receipt)
    }

    /// Symmetric to [`Self::batch_record_access`] over the deletion field,
    /// emitting one `DeletionBatch` aggregate event.
    pub fn batch_record_deletion(
        &self,
        env: &mut Executor,
        operator: Address,
        subjects: &[Address],
    ) -> Result<Receipt> {
        self.policy
            .authorize(operator, OperationKind::BatchRecordDeletion)?;
        check_batch_len(subjects)?;
        let ((), receipt) = env.transact(|frame| {
            Self::apply_batch(frame, operator, subjects, BatchField::Deletion);
            Ok(())
        })?;
        Ok(receipt)
    }

    fn apply_batch(
        frame: &mut CallFrame<'_>,
        operator: Address,
        subjects: &[Address],
        field: BatchField,
    ) {
        // In list order, no deduplication: a repeated subject is bumped once
        // per occurrence.
        for subject in subjects {
            let key = StorageKey::Packed(*subject);
            let mut record = PackedUserRecord::from_word(frame.sload(key));
            match field {
                BatchField::Access => {
                    record.access_count = record.access_count.wrapping_add(1);
                }
                BatchField::Deletion => {
                    record.deletion_count = record.deletion_count.wrapping_add(1);
                }
            }
            frame.sstore(key, record.to_word());
        }
        let processed = subjects.len() as u64;
        frame.emit(match field {
            BatchField::Access => RegistryEvent::AccessBatch {
                operator,
                processed,
            },
            BatchField::Deletion => RegistryEvent::DeletionBatch {
                operator,
                processed,
            },
        });
    }
}

impl ConsentRegistry for OptimizedRegistry {
    fn kind(&self) -> VariantKind {
        VariantKind::Optimized
    }

    fn supports_batching(&self) -> bool {
        true
    }

    /// Read-modify-write of the caller's packed record, touching only the
    /// consent bit; emits `ConsentUpdated`.
    fn set_consent(&self, env: &mut Executor, caller: Address, value: bool) -> Result<Receipt> {
        self.policy.authorize(caller, OperationKind::SetConsent)?;
        let ((), receipt) = env.transact(|frame| {
            let key = StorageKey::Packed(caller);
            let mut record = PackedUserRecord::from_word(frame.sload(key));
            record.consent = value;
            frame.sstore(key, record.to_word());
            frame.emit(RegistryEvent::ConsentUpdated {
                subject: caller,
                consent: value,
            });
            Ok(())
        })?;
        Ok(receipt)
    }

    // This variant has no per-subject request operation; a single record is
    // a batch of one, aggregate event included.
    fn record_access(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.batch_record_access(env, caller, &[caller])
    }

    fn record_deletion(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.batch_record_deletion(env, caller, &[caller])
    }

    fn batch_record_access(
        &self,
        env: &mut Executor,
        operator: Address,
        subjects: &[Address],
    ) -> Result<Receipt> {
        OptimizedRegistry::batch_record_access(self, env, operator, subjects)
    }

    fn batch_record_deletion(
        &self,
        env: &mut Executor,
        operator: Address,
        subjects: &[Address],
    ) -> Result<Receipt> {
        OptimizedRegistry::batch_record_deletion(self, env, operator, subjects)
    }

    fn has_consented(&self, env: &Executor, subject: Address) -> bool {
        self.get_user_state(env, subject).consent
    }

    fn access_request_count(&self, env: &Executor, subject: Address) -> u64 {
        u64::from(self.get_user_state(env, subject).access_count)
    }

    fn deletion_request_count(&self, env: &Executor, subject: Address) -> u64 {
        u64::from(self.get_user_state(env, subject).deletion_count)
    }
}
