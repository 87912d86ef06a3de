use super::*;

#[test]
fn test_vip_complaint_weighs_double() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let filer = vip(&engine, "alice", 10.0);
    let chef = staff.chefs[0].id;

    let filing = complain(
        &engine,
        ActorRef::Customer(filer.id),
        ActorRef::Employee(chef),
        ReputationKind::Complaint,
    );
    assert_eq!(filing.weight_applied, 2);
    assert_eq!(filing.complaint.weight, 2);
    assert_eq!(filing.complaint.status, ComplaintStatus::Pending);
    assert_eq!(filing.target_counts.complaints, 2);
    assert_eq!(engine.employee(chef).unwrap().complaints_count, 2);
}

#[test]
fn test_compliment_cancels_complaint_weight() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = funded_member(&engine, "alice", 10.0);
    let bob = vip(&engine, "bob", 10.0);
    let chef = ActorRef::Employee(staff.chefs[0].id);

    complain(&engine, ActorRef::Customer(alice.id), chef, ReputationKind::Complaint);
    let filing = complain(&engine, ActorRef::Customer(bob.id), chef, ReputationKind::Compliment);

    assert_eq!(filing.weight_applied, 2);
    assert_eq!(filing.target_counts.complaints, 0);
    assert_eq!(filing.target_counts.compliments, 2);
}

#[test]
fn test_compliment_reduces_complaints_by_its_weight() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let bob = vip(&engine, "bob", 10.0);
    let chef = staff.chefs[0].id;
    update_employee(&engine, chef, |e| e.complaints_count = 3);

    let filing = complain(
        &engine,
        ActorRef::Customer(bob.id),
        ActorRef::Employee(chef),
        ReputationKind::Compliment,
    );

    assert_eq!(filing.target_counts.complaints, 1);
    assert_eq!(filing.target_counts.compliments, 2);
    let after = engine.employee(chef).unwrap();
    assert_eq!(after.complaints_count, 1);
    assert_eq!(after.compliments_count, 2);
}

#[test]
fn test_weight_is_fixed_when_vip_filer_is_downgraded() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = vip(&engine, "alice", 10.0);
    let filer = ActorRef::Customer(alice.id);
    let chef = staff.chefs[0].id;
    update_employee(&engine, chef, |e| e.complaints_count = 1);

    let filing = complain(&engine, filer, ActorRef::Employee(chef), ReputationKind::Complaint);
    assert_eq!(filing.complaint.weight, 2);
    assert_eq!(engine.employee(chef).unwrap().complaints_count, 3);

    for _ in 0..2 {
        engine.add_warning(filer, WarningReason::InsufficientBalance).unwrap();
    }
    assert_eq!(engine.customer(alice.id).unwrap().role, CustomerRole::Registered);

    let outcome = engine
        .resolve_complaint(filing.complaint.id, Resolution::Dismissed)
        .unwrap();
    assert_eq!(outcome.target_counts.complaints, 1);
    assert_eq!(engine.employee(chef).unwrap().complaints_count, 1);
    assert_eq!(engine.complaint(filing.complaint.id).unwrap().weight, 2);
}

#[test]
fn test_weight_is_fixed_when_filer_is_promoted() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = funded_member(&engine, "alice", 10.0);
    let chef = staff.chefs[0].id;
    update_employee(&engine, chef, |e| e.complaints_count = 1);

    let filing = complain(
        &engine,
        ActorRef::Customer(alice.id),
        ActorRef::Employee(chef),
        ReputationKind::Complaint,
    );
    assert_eq!(filing.complaint.weight, 1);
    assert_eq!(engine.employee(chef).unwrap().complaints_count, 2);

    update_customer(&engine, alice.id, |c| c.total_spent = 150.0);
    assert!(engine.evaluate_promotion(alice.id).unwrap().promoted);

    let outcome = engine
        .resolve_complaint(filing.complaint.id, Resolution::Dismissed)
        .unwrap();
    assert_eq!(outcome.target_counts.complaints, 1);
    assert_eq!(engine.employee(chef).unwrap().complaints_count, 1);
    assert_eq!(engine.complaint(filing.complaint.id).unwrap().weight, 1);
}

#[test]
fn test_target_must_be_active() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = funded_member(&engine, "alice", 10.0);
    let filer = ActorRef::Customer(alice.id);
    let driver = ActorRef::Employee(staff.drivers[0].id);
    let visitor = engine.register_customer("bob", "").unwrap();
    let banned = funded_member(&engine, "carol", 10.0);
    update_customer(&engine, banned.id, |c| c.blacklisted = true);
    let fired = staff.chefs[1].id;
    update_employee(&engine, fired, |e| e.is_active = false);

    let targets = [
        (filer, ActorRef::Employee(fired)),
        (driver, ActorRef::Customer(visitor.id)),
        (driver, ActorRef::Customer(banned.id)),
    ];
    for (filer, target) in targets {
        let err = engine
            .file_reputation_event(filer, target, ReputationKind::Complaint, "rude", "")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    assert_eq!(engine.employee(fired).unwrap().complaints_count, 0);
    assert_eq!(engine.customer(visitor.id).unwrap().complaints_count, 0);
    assert_eq!(engine.customer(banned.id).unwrap().complaints_count, 0);
}

#[test]
fn test_filer_rules() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = funded_member(&engine, "alice", 10.0);
    let visitor = engine.register_customer("bob", "").unwrap();
    let chef = ActorRef::Employee(staff.chefs[0].id);
    let driver = ActorRef::Employee(staff.drivers[0].id);

    let err = engine
        .file_reputation_event(
            ActorRef::Customer(alice.id),
            ActorRef::Customer(alice.id),
            ReputationKind::Complaint,
            "rude",
            "",
        )
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SelfComplaint);

    let err = engine
        .file_reputation_event(
            ActorRef::Customer(visitor.id),
            chef,
            ReputationKind::Complaint,
            "cold food",
            "",
        )
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CustomerNotApproved);

    // delivery staff may complain about customers only
    let err = engine
        .file_reputation_event(driver, chef, ReputationKind::Complaint, "late", "")
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PermissionDenied);

    let err = engine
        .file_reputation_event(chef, ActorRef::Customer(alice.id), ReputationKind::Complaint, "rude", "")
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::WrongEmployeeRole);

    let err = engine
        .file_reputation_event(ActorRef::Customer(alice.id), chef, ReputationKind::Complaint, " ", "")
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::RequiredField);

    let err = engine
        .file_reputation_event(
            ActorRef::Customer(alice.id),
            ActorRef::Employee(999),
            ReputationKind::Complaint,
            "late",
            "",
        )
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::EmployeeNotFound);

    let ok = complain(&engine, driver, ActorRef::Customer(alice.id), ReputationKind::Complaint);
    assert_eq!(ok.weight_applied, 1);
    assert_eq!(engine.complaints_against(ActorRef::Customer(alice.id)).unwrap().len(), 1);
}

#[test]
fn test_dispute_by_target_only() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = funded_member(&engine, "alice", 10.0);
    let chef = ActorRef::Employee(staff.chefs[0].id);

    let filing = complain(&engine, ActorRef::Customer(alice.id), chef, ReputationKind::Complaint);
    let id = filing.complaint.id;

    let err = engine
        .dispute_complaint(id, ActorRef::Customer(alice.id))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let disputed = engine.dispute_complaint(id, chef).unwrap();
    assert_eq!(disputed.status, ComplaintStatus::Disputed);

    let err = engine.dispute_complaint(id, chef).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);

    // disputed complaints are still resolvable
    let outcome = engine.resolve_complaint(id, Resolution::Upheld).unwrap();
    assert_eq!(outcome.complaint.status, ComplaintStatus::Upheld);

    let err = engine.dispute_complaint(id, chef).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ComplaintAlreadyResolved);
}

#[test]
fn test_upheld_against_customer_warns_customer() {
    let engine = create_test_engine();
    let mut rx = engine.subscribe();
    let staff = hire_staff(&engine);
    let alice = funded_member(&engine, "alice", 10.0);
    let driver = ActorRef::Employee(staff.drivers[0].id);
    let target = ActorRef::Customer(alice.id);

    let filing = complain(&engine, driver, target, ReputationKind::Complaint);
    let outcome = engine
        .resolve_complaint(filing.complaint.id, Resolution::Upheld)
        .unwrap();

    let (warned, warning) = outcome.warning.unwrap();
    assert_eq!(warned, target);
    assert_eq!(warning.new_warning_count, 1);
    assert!(outcome.performance.is_none());
    assert_eq!(outcome.target_counts.complaints, 1);
    assert!(outcome.complaint.resolved_at.is_some());

    let after = engine.customer(alice.id).unwrap();
    assert_eq!(after.upheld_complaints, 1);
    assert_eq!(after.warnings, 1);

    assert!(drain(&mut rx).contains(&StandingEvent::ComplaintResolved {
        complaint_id: filing.complaint.id,
        resolution: Resolution::Upheld,
    }));
}

#[test]
fn test_dismissed_removes_weight_and_warns_filer() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = vip(&engine, "alice", 10.0);
    let chef = staff.chefs[0].id;

    let filing = complain(
        &engine,
        ActorRef::Customer(alice.id),
        ActorRef::Employee(chef),
        ReputationKind::Complaint,
    );
    let outcome = engine
        .resolve_complaint(filing.complaint.id, Resolution::Dismissed)
        .unwrap();

    assert_eq!(outcome.complaint.status, ComplaintStatus::Dismissed);
    assert_eq!(outcome.target_counts.complaints, 0);
    let (warned, warning) = outcome.warning.unwrap();
    assert_eq!(warned, ActorRef::Customer(alice.id));
    assert_eq!(warning.new_warning_count, 1);
    assert!(outcome.performance.is_some());

    assert_eq!(engine.employee(chef).unwrap().complaints_count, 0);
    assert_eq!(engine.customer(alice.id).unwrap().warnings, 1);
}

#[test]
fn test_resolve_twice_fails_without_side_effects() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = funded_member(&engine, "alice", 10.0);
    let chef = ActorRef::Employee(staff.chefs[0].id);

    let filing = complain(&engine, ActorRef::Customer(alice.id), chef, ReputationKind::Complaint);
    engine
        .resolve_complaint(filing.complaint.id, Resolution::Dismissed)
        .unwrap();

    let err = engine
        .resolve_complaint(filing.complaint.id, Resolution::Dismissed)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ComplaintAlreadyResolved);
    assert_eq!(err.kind(), ErrorKind::State);
    assert_eq!(engine.customer(alice.id).unwrap().warnings, 1);
}

#[test]
fn test_compliments_cannot_be_resolved() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = funded_member(&engine, "alice", 10.0);
    let chef = ActorRef::Employee(staff.chefs[0].id);

    let filing = complain(&engine, ActorRef::Customer(alice.id), chef, ReputationKind::Compliment);
    let err = engine
        .resolve_complaint(filing.complaint.id, Resolution::Upheld)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = engine.dispute_complaint(filing.complaint.id, chef).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(
        engine.complaint(filing.complaint.id).unwrap().status,
        ComplaintStatus::Pending
    );
}

#[test]
fn test_concurrent_filings_are_serialized() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let chef = ActorRef::Employee(staff.chefs[0].id);
    let filers: Vec<Customer> = (0..4)
        .map(|i| funded_member(&engine, &format!("user{i}"), 10.0))
        .collect();

    std::thread::scope(|scope| {
        for filer in &filers {
            let engine = &engine;
            scope.spawn(move || {
                for _ in 0..5 {
                    engine
                        .file_reputation_event(
                            ActorRef::Customer(filer.id),
                            chef,
                            ReputationKind::Complaint,
                            "slow",
                            "",
                        )
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(engine.employee(staff.chefs[0].id).unwrap().complaints_count, 20);
    assert_eq!(engine.complaints_against(chef).unwrap().len(), 20);
}

#[test]
fn test_upheld_complaint_downgrades_warned_vip() {
    let engine = create_test_engine();
    let staff = hire_staff(&engine);
    let alice = vip(&engine, "alice", 30.0);
    let target = ActorRef::Customer(alice.id);
    engine
        .add_warning(target, WarningReason::InsufficientBalance)
        .unwrap();

    let filing = complain(
        &engine,
        ActorRef::Employee(staff.drivers[0].id),
        target,
        ReputationKind::Complaint,
    );
    let outcome = engine
        .resolve_complaint(filing.complaint.id, Resolution::Upheld)
        .unwrap();

    let (_, warning) = outcome.warning.unwrap();
    assert_eq!(warning.new_warning_count, 2);
    assert_eq!(warning.role_transition, RoleTransition::Downgraded);

    let after = engine.customer(alice.id).unwrap();
    assert_eq!(after.role, CustomerRole::Registered);
    assert_eq!(after.warnings, 2);
    assert!(!after.blacklisted);
}
