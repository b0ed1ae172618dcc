use rolegraph_catalog::{Privileges, RightTarget};

use crate::{Database, DatabaseConfig, StorageError};

#[test]
fn test_commit_keeps_changes() {
    let mut db = Database::new();
    db.begin_transaction().unwrap();
    db.catalog.create_role("r1", false).unwrap();
    db.commit_transaction().unwrap();

    assert!(!db.in_transaction());
    assert!(db.catalog.role_exists("r1"));
}

#[test]
fn test_rollback_restores_catalog() {
    let mut db = Database::new();
    db.catalog.create_role("keep", false).unwrap();

    db.begin_transaction().unwrap();
    db.catalog.create_role("discard", false).unwrap();
    db.catalog.drop_role("keep").unwrap();
    db.rollback_transaction().unwrap();

    assert!(db.catalog.role_exists("keep"));
    assert!(!db.catalog.role_exists("discard"));
}

#[test]
fn test_rollback_keeps_id_counter() {
    let mut db = Database::new();
    db.begin_transaction().unwrap();
    let discarded = db.catalog.create_role("temp", false).unwrap();
    db.rollback_transaction().unwrap();

    let fresh = db.catalog.create_role("other", false).unwrap();

    assert!(fresh > discarded);
    assert!(db.catalog.grantee(discarded).is_none());
}

#[test]
fn test_rollback_to_savepoint_keeps_id_counter() {
    let mut db = Database::new();
    db.begin_transaction().unwrap();
    db.create_savepoint("sp".to_string()).unwrap();
    let discarded = db.catalog.create_table("t").unwrap();
    db.rollback_to_savepoint("sp").unwrap();

    let fresh = db.catalog.create_table("t").unwrap();
    db.commit_transaction().unwrap();

    assert!(fresh > discarded);
    assert!(db.catalog.schema_object(discarded).is_none());
}

#[test]
fn test_nested_begin_is_refused() {
    let mut db = Database::new();
    db.begin_transaction().unwrap();
    assert_eq!(
        db.begin_transaction(),
        Err(StorageError::TransactionError("Transaction already active".to_string()))
    );
}

#[test]
fn test_commit_without_transaction() {
    let mut db = Database::new();
    assert!(matches!(db.commit_transaction(), Err(StorageError::TransactionError(_))));
    assert!(matches!(db.rollback_transaction(), Err(StorageError::TransactionError(_))));
}

#[test]
fn test_transaction_ids_increase() {
    let mut db = Database::new();
    assert_eq!(db.transaction_id(), None);
    db.begin_transaction().unwrap();
    let first = db.transaction_id().unwrap();
    db.commit_transaction().unwrap();
    db.begin_transaction().unwrap();
    assert!(db.transaction_id().unwrap() > first);
}

#[test]
fn test_savepoint_rollback_keeps_earlier_work() {
    let mut db = Database::new();
    let user = db.catalog.create_user("alice", None, false, false).unwrap();
    let table = db.catalog.create_table("orders").unwrap();

    db.begin_transaction().unwrap();
    db.catalog.grant_right(user, RightTarget::Object(table), Privileges::SELECT).unwrap();
    db.create_savepoint("sp1".to_string()).unwrap();
    db.catalog.grant_right(user, RightTarget::Object(table), Privileges::DELETE).unwrap();
    db.rollback_to_savepoint("sp1").unwrap();
    db.commit_transaction().unwrap();

    let right = db.catalog.right_for_target(user, RightTarget::Object(table)).unwrap();
    assert_eq!(right.privileges(), Privileges::SELECT);
}

#[test]
fn test_release_savepoint() {
    let mut db = Database::new();
    db.begin_transaction().unwrap();
    db.create_savepoint("sp1".to_string()).unwrap();
    db.release_savepoint("sp1").unwrap();
    assert!(matches!(db.rollback_to_savepoint("sp1"), Err(StorageError::TransactionError(_))));
}

#[test]
fn test_savepoint_requires_transaction() {
    let mut db = Database::new();
    assert!(matches!(db.create_savepoint("sp".to_string()), Err(StorageError::TransactionError(_))));
}

#[test]
fn test_config_is_applied() {
    let config = DatabaseConfig {
        case_sensitive_identifiers: true,
        security_enabled: true,
        current_user: Some("SA".to_string()),
    };
    let db = Database::with_config(&config);
    assert!(db.catalog.is_case_sensitive_identifiers());
    assert!(db.is_security_enabled());
    assert_eq!(db.current_user(), Some("SA"));
}

#[test]
fn test_reset_keeps_case_mode() {
    let mut db = Database::new();
    db.catalog.set_case_sensitive_identifiers(true);
    db.catalog.create_role("Ops", false).unwrap();
    db.begin_transaction().unwrap();

    db.reset();

    assert!(!db.in_transaction());
    assert!(!db.catalog.role_exists("Ops"));
    assert!(db.catalog.is_case_sensitive_identifiers());
}
