//! Benchmark harness: drives a canonical workload against one variant and
//! reports the resource cost charged per operation.
//!
//! The harness is a cost-measurement driver only. It asserts nothing about
//! correctness, submits strictly one call at a time, and treats any
//! operation failure as fatal for the run. Identical configuration produces
//! an identical ordered call sequence and identical state transitions.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Result;
use crate::executor::Executor;
use crate::meter::CostSchedule;
use crate::registry::{
    BasicRegistry, ConsentRegistry, MinimalEventRegistry, OptimizedRegistry,
};
use crate::types::{Address, VariantKind};

/// External parameters of one benchmark run.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkConfig {
    /// Which state/event design to measure.
    pub variant: VariantKind,
    /// Size of the synthetic subject population.
    pub population: usize,
    /// Label the signer and subject addresses are derived from.
    pub seed_label: String,
    /// Schedule the executor charges during the run.
    pub schedule: CostSchedule,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            variant: VariantKind::Basic,
            population: 100,
            seed_label: "bench".to_string(),
            schedule: CostSchedule::default(),
        }
    }
}

/// Structured result of one benchmark run: one key per measured operation,
/// each holding the total cost of that single call. For batched operations
/// the batch's whole cost is one unit; per-address normalization is left to
/// the caller.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub variant: VariantKind,
    pub deployed_at: Address,
    pub gas: BTreeMap<&'static str, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
}

/// Derive a deterministic subject population from the seed label.
pub fn derive_subjects(seed_label: &str, population: usize) -> Vec<Address> {
    (0..population)
        .map(|i| Address::derive(&format!("{seed_label}/subject/{i}")))
        .collect()
}

/// Deploy the selected variant, execute its canonical operation sequence,
/// and collect the per-operation cost.
pub fn run_benchmark(config: &BenchmarkConfig) -> Result<BenchmarkReport> {
    let mut env = Executor::with_schedule(config.schedule);
    let signer = Address::derive(&format!("{}/signer", config.seed_label));
    let deployed_at = Address::derive(&format!(
        "{}/registry/{}",
        config.seed_label, config.variant
    ));
    let subjects = derive_subjects(&config.seed_label, config.population);

    let mut gas = BTreeMap::new();
    let mut batch_size = None;

    match config.variant {
        VariantKind::Basic => {
            let registry = BasicRegistry::new();
            gas.insert("consent", registry.give_consent(&mut env, signer)?.gas_used);
            gas.insert(
                "access",
                registry.request_data_access(&mut env, signer)?.gas_used,
            );
            gas.insert(
                "deletion",
                registry.request_deletion(&mut env, signer)?.gas_used,
            );
        }
        VariantKind::Optimized => {
            let registry = OptimizedRegistry::new();
            gas.insert(
                "consent",
                registry.set_consent(&mut env, signer, true)?.gas_used,
            );
            gas.insert(
                "access_batch",
                registry
                    .batch_record_access(&mut env, signer, &subjects)?
                    .gas_used,
            );
            gas.insert(
                "deletion_batch",
                registry
                    .batch_record_deletion(&mut env, signer, &subjects)?
                    .gas_used,
            );
            batch_size = Some(subjects.len());
        }
        VariantKind::MinimalEvent => {
            let registry = MinimalEventRegistry::new();
            gas.insert(
                "consent",
                registry.set_consent(&mut env, signer, true)?.gas_used,
            );
            gas.insert("access", registry.emit_access(&mut env, signer)?.gas_used);
            gas.insert(
                "deletion",
                registry.emit_deletion(&mut env, signer)?.gas_used,
            );
        }
    }

    Ok(BenchmarkReport {
        variant: config.variant,
        deployed_at,
        gas,
        batch_size,
    })
}
