use std::sync::Arc;

use windpike_txn::{
    errors::{CommandError, Error},
    policy::{TxnPolicy, WritePolicy},
    Bin, Bins, Key, Namespace, RecordEnlistment, ResultCode, Statement, TxnCoordinator, TxnState,
};

mod common;

#[test]
fn read_write_and_unseen_keys() {
    let (ns, txn, _) = common::coordinator(1);
    let read = common::key(1);
    let written = common::key(2);
    let unseen = common::key(3);
    ns.seed(&read, &[("balance", 10)], 7);

    let record = txn.get(&read, Bins::All).unwrap();
    assert_eq!(record.generation, 7);
    txn.put(&written, &[Bin::new("balance", 20)]).unwrap();

    assert_eq!(
        txn.record_state(&read),
        RecordEnlistment::ReadOnly { generation: 7 }
    );
    assert_eq!(txn.record_state(&written), RecordEnlistment::Updated);
    assert_eq!(txn.record_state(&unseen), RecordEnlistment::NotEnlisted);
}

#[test]
fn write_after_read_reports_updated() {
    let (ns, txn, _) = common::coordinator(1);
    let key = common::key(1);
    ns.seed(&key, &[("balance", 10)], 3);

    txn.get(&key, ["balance"]).unwrap();
    txn.put(&key, &[Bin::new("balance", 11)]).unwrap();
    txn.get(&key, Bins::All).unwrap();

    assert_eq!(txn.record_state(&key), RecordEnlistment::Updated);
    assert_eq!(txn.txn().read_generation(&key), Some(3));
}

#[test]
fn every_command_carries_the_txn() {
    let (ns, txn, _) = common::coordinator(1);
    let key = common::key(1);
    ns.seed(&key, &[("balance", 10)], 1);

    txn.get(&key, Bins::All).unwrap();
    txn.put(&key, &[Bin::new("balance", 11)]).unwrap();
    txn.touch(&key).unwrap();
    txn.query(&Statement::new(common::NAMESPACE, common::SET, Bins::All))
        .unwrap();
    txn.scan(common::SET, Bins::All).unwrap();
    assert!(txn.delete(&key).unwrap());

    let id = Some(txn.txn_id());
    assert_eq!(ns.command_txns(), vec![id; 6]);
    assert!(ns.default_write_policy().base_policy.txn.is_none());
}

#[test]
fn txn_id_comes_from_the_namespace() {
    let ns = common::MemoryNamespace::new();
    let first = TxnCoordinator::new(Arc::clone(&ns), &TxnPolicy::default());
    let second = TxnCoordinator::new(Arc::clone(&ns), &TxnPolicy::default());

    assert_eq!(first.txn_id(), 1000);
    assert_eq!(second.txn_id(), 1001);
    assert_eq!(first.txn().timeout(), 10);
}

#[test]
fn monitor_clock_starts_on_first_command() {
    let (_, txn, _) = common::coordinator(1);
    assert!(txn.txn().first_command_at().is_none());

    txn.put(&common::key(1), &[Bin::new("balance", 1)]).unwrap();
    assert!(txn.txn().first_command_at().is_some());
    assert!(txn.txn().deadline().is_some());
}

#[test]
fn keys_from_another_namespace_are_rejected() {
    let (ns, txn, _) = common::coordinator(1);
    txn.put(&common::key(1), &[Bin::new("balance", 1)]).unwrap();

    let foreign = Key::new("other", common::SET, 1);
    let err = txn.put(&foreign, &[Bin::new("balance", 1)]).unwrap_err();
    assert!(matches!(err, Error::NamespaceMismatch { .. }));
    assert_eq!(txn.record_state(&foreign), RecordEnlistment::NotEnlisted);
    assert_eq!(ns.command_txns().len(), 1);
}

#[test]
fn namespace_is_fixed_by_the_accessor() {
    let (ns, txn, _) = common::coordinator(1);
    assert_eq!(txn.txn().namespace().as_deref(), Some(common::NAMESPACE));

    let foreign = Key::new("other", common::SET, 1);
    let err = txn.put(&foreign, &[Bin::new("balance", 1)]).unwrap_err();
    assert!(matches!(
        err,
        Error::NamespaceMismatch { ref expected, ref got }
            if expected == common::NAMESPACE && got == "other"
    ));
    assert!(matches!(
        txn.query(&Statement::new("other", common::SET, Bins::All))
            .unwrap_err(),
        Error::NamespaceMismatch { .. }
    ));
    assert!(ns.command_txns().is_empty());
    assert!(txn.txn().first_command_at().is_none());
    assert_eq!(txn.txn().namespace().as_deref(), Some(common::NAMESPACE));

    txn.scan(common::SET, Bins::All).unwrap();
    assert_eq!(ns.command_txns().len(), 1);
}

#[test]
fn in_doubt_write_is_enlisted() {
    let (ns, txn, _) = common::coordinator(1);
    let key = common::key(1);
    ns.fail_next_write(common::in_doubt());

    assert!(txn.put(&key, &[Bin::new("balance", 1)]).is_err());
    assert_eq!(txn.record_state(&key), RecordEnlistment::Updated);
}

#[test]
fn failed_write_is_not_enlisted() {
    let (ns, txn, _) = common::coordinator(1);
    let key = common::key(1);
    ns.fail_next_write(CommandError::server(ResultCode::KeyExistsError));

    let err = txn.put(&key, &[Bin::new("balance", 1)]).unwrap_err();
    assert_eq!(err.result_code(), Some(ResultCode::KeyExistsError));
    assert_eq!(txn.record_state(&key), RecordEnlistment::NotEnlisted);
}

#[test]
fn exists_enlists_only_existing_records() {
    let (ns, txn, _) = common::coordinator(1);
    let present = common::key(1);
    let missing = common::key(2);
    ns.seed(&present, &[("balance", 1)], 4);

    assert!(txn.exists(&present).unwrap());
    assert!(!txn.exists(&missing).unwrap());
    assert_eq!(
        txn.record_state(&present),
        RecordEnlistment::ReadOnly { generation: 4 }
    );
    assert_eq!(txn.record_state(&missing), RecordEnlistment::NotEnlisted);
}

#[test]
fn query_and_scan_results_are_read() {
    let (ns, txn, _) = common::coordinator(1);
    ns.seed(&common::key(1), &[("balance", 1)], 2);
    ns.seed(&common::key(2), &[("balance", 2)], 5);

    let records = txn
        .query(&Statement::new(common::NAMESPACE, common::SET, Bins::from(["balance"])))
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(
        txn.record_state(&common::key(1)),
        RecordEnlistment::ReadOnly { generation: 2 }
    );

    let (ns, txn, _) = common::coordinator(1);
    ns.seed(&common::key(3), &[("balance", 3)], 9);
    assert_eq!(txn.scan(common::SET, Bins::None).unwrap().len(), 1);
    assert_eq!(
        txn.record_state(&common::key(3)),
        RecordEnlistment::ReadOnly { generation: 9 }
    );
}

#[test]
fn commands_after_commit_are_rejected() {
    let (ns, mut txn, _) = common::coordinator(1);
    txn.commit().unwrap();

    let err = txn.get(&common::key(1), Bins::All).unwrap_err();
    assert!(matches!(
        err,
        Error::NotActive {
            state: TxnState::Committed,
            ..
        }
    ));
    assert!(ns.command_txns().is_empty());
}

#[test]
fn clone_shares_the_transaction() {
    let (ns, txn, _) = common::coordinator(1);
    let key = common::key(1);
    txn.put(&key, &[Bin::new("balance", 1)]).unwrap();

    let mut policy = WritePolicy::default();
    policy.durable_delete = true;
    let clone = txn.clone_with(None, Some(policy), None, None);

    assert_eq!(clone.txn_id(), txn.txn_id());
    assert!(Arc::ptr_eq(clone.txn(), txn.txn()));
    assert!(clone.write_policy().durable_delete);
    assert_eq!(
        clone.write_policy().base_policy.txn.as_ref().map(|t| t.id()),
        Some(txn.txn_id())
    );
    assert_eq!(clone.state(), TxnState::Active);
    assert_eq!(clone.record_state(&key), RecordEnlistment::Updated);

    let other = common::key(2);
    clone.put(&other, &[Bin::new("balance", 2)]).unwrap();
    assert_eq!(txn.record_state(&other), RecordEnlistment::Updated);
    assert_eq!(ns.command_txns(), vec![Some(txn.txn_id()); 2]);
}

#[test]
fn clone_commit_then_original_sees_already_committed() {
    let (ns, txn, _) = common::coordinator(1);
    let mut clone = txn.clone_with(None, None, None, None);
    let mut txn = txn;

    assert_eq!(
        clone.commit().unwrap(),
        windpike_txn::CommitOutcome::Completed
    );
    ns.script_commit(Ok(windpike_txn::CommitStatus::AlreadyCommitted));
    assert_eq!(
        txn.commit().unwrap(),
        windpike_txn::CommitOutcome::AlreadyCommitted
    );
    assert_eq!(ns.commit_calls(), vec![txn.txn_id(); 2]);
}

#[test]
fn coordinators_run_on_separate_threads() {
    let ns = common::MemoryNamespace::new();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ns = Arc::clone(&ns);
            std::thread::spawn(move || {
                let mut txn = TxnCoordinator::new(ns, &common::txn_policy(0));
                txn.put(&common::key(i), &[Bin::new("balance", i)]).unwrap();
                txn.commit().unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_successful());
    }
    assert_eq!(ns.commit_calls().len(), 4);
}
