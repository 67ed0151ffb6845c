//! MinimalEvent registry: the cost floor for record-of-intent semantics.
//!
//! Only the consent flag is ever persisted. Access and deletion intents are
//! pure event emissions; the compliance trail is reconstructed off-store by
//! replaying the event log, never by querying state. Any caller may emit
//! intents, any number of times, without changing queryable state.

use crate::error::Result;
use crate::event::RegistryEvent;
use crate::executor::Executor;
use crate::policy::{CallPolicy, OperationKind};
use crate::registry::ConsentRegistry;
use crate::store::StorageKey;
use crate::types::{Address, Receipt, VariantKind};

/// The event-only registry design.
#[derive(Debug, Default)]
pub struct MinimalEventRegistry {
    policy: CallPolicy,
}

impl MinimalEventRegistry {
    /// Create a registry with the unrestricted-caller policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry gated by a custom capability predicate.
    pub fn with_policy(policy: CallPolicy) -> Self {
        Self { policy }
    }

    /// Emit an access intent for the caller. No persisted counter exists.
    pub fn emit_access(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.policy.authorize(caller, OperationKind::RecordAccess)?;
        let ((), receipt) = env.transact(|frame| {
            frame.emit(RegistryEvent::Access { subject: caller });
            Ok(())
        })?;
        Ok(receipt)
    }

    /// Emit a deletion intent for the caller. No persisted counter exists.
    pub fn emit_deletion(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.policy.authorize(caller, OperationKind::RecordDeletion)?;
        let ((), receipt) = env.transact(|frame| {
            frame.emit(RegistryEvent::Deletion { subject: caller });
            Ok(())
        })?;
        Ok(receipt)
    }
}

impl ConsentRegistry for MinimalEventRegistry {
    fn kind(&self) -> VariantKind {
        VariantKind::MinimalEvent
    }

    /// Persist the consent flag, the variant's only stored field, and emit
    /// `Consent(caller, value)`.
    fn set_consent(&self, env: &mut Executor, caller: Address, value: bool) -> Result<Receipt> {
        self.policy.authorize(caller, OperationKind::SetConsent)?;
        let ((), receipt) = env.transact(|frame| {
            frame.sstore(StorageKey::Consent(caller), u128::from(value));
            frame.emit(RegistryEvent::Consent {
                subject: caller,
                consent: value,
            });
            Ok(())
        })?;
        Ok(receipt)
    }

    fn record_access(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.emit_access(env, caller)
    }

    fn record_deletion(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.emit_deletion(env, caller)
    }

    fn has_consented(&self, env: &Executor, subject: Address) -> bool {
        env.store().get(StorageKey::Consent(subject)) != 0
    }

    fn access_request_count(&self, _env: &Executor, _subject: Address) -> u64 {
        0
    }

    fn deletion_request_count(&self, _env: &Executor, _subject: Address) -> u64 {
        0
    }
}
