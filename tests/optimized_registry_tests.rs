use consent_meter::{
    Address, ConsentRegistry, CostSchedule, Executor, OptimizedRegistry, RegistryError,
    RegistryEvent, MAX_BATCH_LEN,
};

fn setup() -> (Executor, OptimizedRegistry) {
    (Executor::new(), OptimizedRegistry::new())
}

#[test]
fn untouched_address_reads_default_record() {
    let (env, registry) = setup();
    let a = Address::derive("nobody");

    let state = registry.get_user_state(&env, a);
    assert!(!state.consent);
    assert_eq!(state.access_count, 0);
    assert_eq!(state.deletion_count, 0);
}

#[test]
fn set_consent_touches_only_the_consent_bit() {
    let (mut env, registry) = setup();
    let operator = Address::derive("operator");
    let a = Address::derive("user1");

    registry.batch_record_access(&mut env, operator, &[a]).unwrap();
    registry.set_consent(&mut env, a, true).unwrap();

    let state = registry.get_user_state(&env, a);
    assert!(state.consent);
    assert_eq!(state.access_count, 1);
    assert_eq!(state.deletion_count, 0);
    assert_eq!(
        env.events().entries().last(),
        Some(&RegistryEvent::ConsentUpdated {
            subject: a,
            consent: true
        })
    );

    registry.set_consent(&mut env, a, false).unwrap();
    let state = registry.get_user_state(&env, a);
    assert!(!state.consent);
    assert_eq!(state.access_count, 1);
}

#[test]
fn batch_access_processes_repeats_in_order() {
    let (mut env, registry) = setup();
    let operator = Address::derive("operator");
    let a = Address::derive("user-a");
    let b = Address::derive("user-b");

    registry
        .batch_record_access(&mut env, operator, &[a, a, b])
        .unwrap();

    assert_eq!(registry.get_user_state(&env, a).access_count, 2);
    assert_eq!(registry.get_user_state(&env, b).access_count, 1);
    // Exactly one aggregate event, no per-address events.
    assert_eq!(
        env.events().entries(),
        &[RegistryEvent::AccessBatch {
            operator,
            processed: 3
        }]
    );
}

#[test]
fn empty_batch_mutates_nothing_but_emits() {
    let (mut env, registry) = setup();
    let operator = Address::derive("operator");

    registry.batch_record_access(&mut env, operator, &[]).unwrap();

    assert!(env.store().is_empty());
    assert_eq!(
        env.events().entries(),
        &[RegistryEvent::AccessBatch {
            operator,
            processed: 0
        }]
    );
}

#[test]
fn deletion_batch_is_symmetric() {
    let (mut env, registry) = setup();
    let operator = Address::derive("operator");
    let a = Address::derive("user-a");
    let b = Address::derive("user-b");

    registry
        .batch_record_deletion(&mut env, operator, &[b, a, b])
        .unwrap();

    assert_eq!(registry.get_user_state(&env, a).deletion_count, 1);
    assert_eq!(registry.get_user_state(&env, b).deletion_count, 2);
    assert_eq!(registry.get_user_state(&env, a).access_count, 0);
    assert_eq!(
        env.events().entries(),
        &[RegistryEvent::DeletionBatch {
            operator,
            processed: 3
        }]
    );
}

#[test]
fn oversized_batch_is_rejected_without_effect() {
    let (mut env, registry) = setup();
    let operator = Address::derive("operator");
    let subjects = vec![Address::derive("user"); MAX_BATCH_LEN + 1];

    let err = registry
        .batch_record_access(&mut env, operator, &subjects)
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidInput { .. }));
    assert!(env.store().is_empty());
    assert!(env.events().is_empty());
}

#[test]
fn cross_address_independence() {
    let (mut env, registry) = setup();
    let operator = Address::derive("operator");
    let a = Address::derive("user-a");
    let b = Address::derive("user-b");

    registry.set_consent(&mut env, a, true).unwrap();
    registry.batch_record_access(&mut env, operator, &[a]).unwrap();

    let other = registry.get_user_state(&env, b);
    assert!(!other.consent);
    assert_eq!(other.access_count, 0);
    assert_eq!(other.deletion_count, 0);
}

#[test]
fn trait_record_access_is_a_batch_of_one() {
    let (mut env, registry) = setup();
    let a = Address::derive("user-a");

    ConsentRegistry::record_access(&registry, &mut env, a).unwrap();

    assert_eq!(registry.get_user_state(&env, a).access_count, 1);
    assert_eq!(
        env.events().entries(),
        &[RegistryEvent::AccessBatch {
            operator: a,
            processed: 1
        }]
    );
}

#[test]
fn end_to_end_scenario() {
    let (mut env, registry) = setup();
    let operator = Address::derive("operator");
    let a = Address::derive("user-a");
    let b = Address::derive("user-b");

    registry
        .batch_record_access(&mut env, operator, &[a, b, a])
        .unwrap();

    assert_eq!(registry.get_user_state(&env, a).access_count, 2);
    assert_eq!(registry.get_user_state(&env, b).access_count, 1);
    let batches: Vec<_> = env
        .events()
        .entries()
        .iter()
        .filter(|e| matches!(e, RegistryEvent::AccessBatch { .. }))
        .collect();
    assert_eq!(
        batches,
        vec![&RegistryEvent::AccessBatch {
            operator,
            processed: 3
        }]
    );
}

#[test]
fn batch_of_n_costs_less_than_n_single_calls() {
    let schedule = CostSchedule::default();
    let operator = Address::derive("operator");
    let subjects: Vec<Address> = (0..50)
        .map(|i| Address::derive(&format!("user/{i}")))
        .collect();

    let mut batched_env = Executor::with_schedule(schedule);
    let registry = OptimizedRegistry::new();
    let batched = registry
        .batch_record_access(&mut batched_env, operator, &subjects)
        .unwrap();

    let mut single_env = Executor::with_schedule(schedule);
    let mut single_total = 0u64;
    for subject in &subjects {
        single_total += ConsentRegistry::record_access(&registry, &mut single_env, *subject)
            .unwrap()
            .gas_used;
    }

    // One shared call base and one aggregate event versus fifty of each.
    assert!(batched.gas_used < single_total);
}
