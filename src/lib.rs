//! # Consent Meter
//!
//! Per-subject compliance state (consent, access requests, deletion
//! requests) tracked under a metered execution environment that charges a
//! resource cost per state mutation, with three alternative state/event
//! designs trading storage footprint, batch throughput, and audit
//! granularity against that cost.
//!
//! ## Features
//!
//! - **Basic registry**: one slot per field, one event per call
//! - **Optimized registry**: packed per-subject record, atomic batches with
//!   one aggregate event
//! - **MinimalEvent registry**: persisted consent only; intents live in the
//!   event log
//! - **Benchmark harness**: deterministic workloads with per-operation cost
//!   reports
//!
//! ## Quick Start
//!
//! ```rust
//! use consent_meter::{Address, BasicRegistry, ConsentRegistry, Executor};
//!
//! let mut env = Executor::new();
//! let registry = BasicRegistry::new();
//! let alice = Address::derive("alice");
//!
//! let receipt = registry.give_consent(&mut env, alice).unwrap();
//! assert!(receipt.gas_used > 0);
//! assert!(registry.has_consented(&env, alice));
//!
//! registry.request_data_access(&mut env, alice).unwrap();
//! assert_eq!(registry.access_request_count(&env, alice), 1);
//! ```
//!
//! ## Atomicity
//!
//! Every mutating call, including a batch touching many addresses, is a
//! single atomic unit: fully applied or fully reverted with zero effect.
//! The executor is the single serialization point; read queries observe the
//! latest committed state for free.

// Module declarations
pub mod error;
pub mod event;
pub mod executor;
pub mod harness;
pub mod meter;
pub mod policy;
pub mod registry;
pub mod store;
pub mod types;

// Re-export the operation surface
pub use error::{RegistryError, Result};
pub use event::{EventLog, RegistryEvent};
pub use executor::{CallFrame, Executor};
pub use harness::{run_benchmark, BenchmarkConfig, BenchmarkReport};
pub use meter::{CostSchedule, GasMeter};
pub use policy::{CallPolicy, OperationKind};
pub use registry::{
    BasicRegistry, ConsentRegistry, MinimalEventRegistry, OptimizedRegistry, MAX_BATCH_LEN,
};
pub use store::{StateStore, StorageKey};
pub use types::{Address, PackedUserRecord, Receipt, VariantKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
