use consent_meter::{
    Address, BasicRegistry, CallPolicy, ConsentRegistry, Executor, OperationKind, RegistryError,
    RegistryEvent,
};

fn setup() -> (Executor, BasicRegistry) {
    (Executor::new(), BasicRegistry::new())
}

#[test]
fn untouched_address_reads_defaults() {
    let (env, registry) = setup();
    let a = Address::derive("nobody");

    assert!(!registry.has_consented(&env, a));
    assert_eq!(registry.access_request_count(&env, a), 0);
    assert_eq!(registry.deletion_request_count(&env, a), 0);
}

#[test]
fn give_consent_sets_flag_and_emits() {
    let (mut env, registry) = setup();
    let a = Address::derive("user1");

    registry.give_consent(&mut env, a).unwrap();

    assert!(registry.has_consented(&env, a));
    assert_eq!(
        env.events().entries(),
        &[RegistryEvent::ConsentUpdated {
            subject: a,
            consent: true
        }]
    );
}

#[test]
fn revoke_consent_clears_flag_and_emits() {
    let (mut env, registry) = setup();
    let a = Address::derive("user1");

    registry.give_consent(&mut env, a).unwrap();
    registry.revoke_consent(&mut env, a).unwrap();

    assert!(!registry.has_consented(&env, a));
    assert_eq!(
        env.events().entries().last(),
        Some(&RegistryEvent::ConsentUpdated {
            subject: a,
            consent: false
        })
    );
}

#[test]
fn repeated_consent_is_result_idempotent_but_still_emits() {
    let (mut env, registry) = setup();
    let a = Address::derive("user1");

    let first = registry.give_consent(&mut env, a).unwrap();
    let second = registry.give_consent(&mut env, a).unwrap();

    assert!(registry.has_consented(&env, a));
    // One update event per call, even when the value repeats.
    assert_eq!(env.events().len(), 2);
    // The repeat touches an existing slot, so it is cheaper, not free.
    assert!(second.gas_used > 0);
    assert!(second.gas_used < first.gas_used);
}

#[test]
fn sequential_access_requests_count_up() {
    let (mut env, registry) = setup();
    let a = Address::derive("user1");
    let k = 5;

    for i in 1..=k {
        registry.request_data_access(&mut env, a).unwrap();
        assert_eq!(registry.access_request_count(&env, a), i);
        // The i-th call emits the post-increment count.
        assert_eq!(
            env.events().entries().last(),
            Some(&RegistryEvent::AccessRequested {
                subject: a,
                count: i
            })
        );
    }
}

#[test]
fn deletion_requests_count_independently() {
    let (mut env, registry) = setup();
    let a = Address::derive("user1");

    registry.request_deletion(&mut env, a).unwrap();
    registry.request_deletion(&mut env, a).unwrap();

    assert_eq!(registry.deletion_request_count(&env, a), 2);
    assert_eq!(registry.access_request_count(&env, a), 0);
    assert_eq!(
        env.events().entries().last(),
        Some(&RegistryEvent::DeletionRequested {
            subject: a,
            count: 2
        })
    );
}

#[test]
fn operations_on_one_address_leave_others_untouched() {
    let (mut env, registry) = setup();
    let a = Address::derive("user1");
    let b = Address::derive("user2");

    registry.give_consent(&mut env, a).unwrap();
    registry.request_data_access(&mut env, a).unwrap();
    registry.request_deletion(&mut env, a).unwrap();

    assert!(!registry.has_consented(&env, b));
    assert_eq!(registry.access_request_count(&env, b), 0);
    assert_eq!(registry.deletion_request_count(&env, b), 0);
}

#[test]
fn end_to_end_scenario() {
    let (mut env, registry) = setup();
    let a = Address::derive("user1");

    registry.set_consent(&mut env, a, true).unwrap();
    assert!(registry.has_consented(&env, a));

    registry.request_data_access(&mut env, a).unwrap();
    registry.request_data_access(&mut env, a).unwrap();
    assert_eq!(registry.access_request_count(&env, a), 2);

    registry.request_deletion(&mut env, a).unwrap();
    assert_eq!(registry.deletion_request_count(&env, a), 1);

    registry.revoke_consent(&mut env, a).unwrap();
    assert!(!registry.has_consented(&env, a));
    // A deletion request is a logged intent, never an erasure: both
    // counters survive the revocation.
    assert_eq!(registry.access_request_count(&env, a), 2);
    assert_eq!(registry.deletion_request_count(&env, a), 1);
}

#[test]
fn batch_entry_points_revert() {
    let (mut env, registry) = setup();
    let operator = Address::derive("operator");
    let a = Address::derive("user1");

    let err = registry
        .batch_record_access(&mut env, operator, &[a])
        .unwrap_err();
    assert!(matches!(err, RegistryError::ExecutionReverted { .. }));
    assert_eq!(registry.access_request_count(&env, a), 0);
    assert!(env.events().is_empty());
}

#[test]
fn denied_caller_leaves_zero_trace() {
    let blocked = Address::derive("blocked");
    let registry =
        BasicRegistry::with_policy(CallPolicy::new(move |caller, _| caller != blocked));
    let mut env = Executor::new();

    let err = registry.give_consent(&mut env, blocked).unwrap_err();
    assert_eq!(
        err,
        RegistryError::Unauthorized {
            caller: blocked,
            operation: OperationKind::SetConsent,
        }
    );
    assert!(env.store().is_empty());
    assert!(env.events().is_empty());
}
