//! Basic registry: independent slots, one event per call.
//!
//! Each subject owns three independent slots (consent flag plus two
//! monotonic counters) and every operation touches exactly one of them. Cost
//! scales linearly with call count; there is no batch support.

use crate::error::Result;
use crate::event::RegistryEvent;
use crate::executor::Executor;
use crate::policy::{CallPolicy, OperationKind};
use crate::registry::ConsentRegistry;
use crate::store::StorageKey;
use crate::types::{Address, Receipt, VariantKind};

/// The per-field, per-call registry design.
#[derive(Debug, Default)]
pub struct BasicRegistry {
    policy: CallPolicy,
}

impl BasicRegistry {
    /// Create a registry with the unrestricted-caller policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry gated by a custom capability predicate.
    pub fn with_policy(policy: CallPolicy) -> Self {
        Self { policy }
    }

    /// Set the caller's consent flag to true; emits `ConsentUpdated`.
    pub fn give_consent(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.write_consent(env, caller, true)
    }

    /// Set the caller's consent flag to false; emits `ConsentUpdated`.
    pub fn revoke_consent(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.write_consent(env, caller, false)
    }

    /// Increment the caller's access-request counter; emits
    /// `AccessRequested` with the new count.
    pub fn request_data_access(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.policy.authorize(caller, OperationKind::RecordAccess)?;
        let ((), receipt) = env.transact(|frame| {
            let key = StorageKey::AccessCount(caller);
            let count = (frame.sload(key) as u64).wrapping_add(1);
            frame.sstore(key, u128::from(count));
            frame.emit(RegistryEvent::AccessRequested {
                subject: caller,
                count,
            });
            Ok(())
        })?;
        Ok(receipt)
    }

    /// Increment the caller's deletion-request counter; emits
    /// `DeletionRequested` with the new count. A logged intent, never an
    /// erasure of stored state.
    pub fn request_deletion(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.policy.authorize(caller, OperationKind::RecordDeletion)?;
        let ((), receipt) = env.transact(|frame| {
            let key = StorageKey::DeletionCount(caller);
            let count = (frame.sload(key) as u64).wrapping_add(1);
            frame.sstore(key, u128::from(count));
            frame.emit(RegistryEvent::DeletionRequested {
                subject: caller,
                count,
            });
            Ok(())
        })?;
        Ok(receipt)
    }

    fn write_consent(&self, env: &mut Executor, caller: Address, value: bool) -> Result<Receipt> {
        self.policy.authorize(caller, OperationKind::SetConsent)?;
        let ((), receipt) = env.transact(|frame| {
            frame.sstore(StorageKey::Consent(caller), u128::from(value));
            frame.emit(RegistryEvent::ConsentUpdated {
                subject: caller,
                consent: value,
            });
            Ok(())
        })?;
        Ok(receipt)
    }
}

impl ConsentRegistry for BasicRegistry {
    fn kind(&self) -> VariantKind {
        VariantKind::Basic
    }

    fn set_consent(&self, env: &mut Executor, caller: Address, value: bool) -> Result<Receipt> {
        if value {
            self.give_consent(env, caller)
        } else {
            self.revoke_consent(env, caller)
        }
    }

    fn record_access(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.request_data_access(env, caller)
    }

    fn record_deletion(&self, env: &mut Executor, caller: Address) -> Result<Receipt> {
        self.request_deletion(env, caller)
    }

    fn has_consented(&self, env: &Executor, subject: Address) -> bool {
        env.store().get(StorageKey::Consent(subject)) != 0
    }

    fn access_request_count(&self, env: &Executor, subject: Address) -> u64 {
        env.store().get(StorageKey::AccessCount(subject)) as u64
    }

    fn deletion_request_count(&self, env: &Executor, subject: Address) -> u64 {
        env.store().get(StorageKey::DeletionCount(subject)) as u64
    }
}
