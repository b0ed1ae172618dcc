//! DROP ROLE must be all-or-nothing under the enclosing transaction

use rolegraph_catalog::{CatalogError, ObjectId, Privileges, Right, RightTarget};
use rolegraph_storage::{Database, Session, StorageError};

/// User A and role R2 are members of R; R holds SELECT on T.
fn setup() -> (Database, ObjectId) {
    let mut db = Database::new();
    let catalog = &mut db.catalog;
    let a = catalog.create_user("a", None, false, false).unwrap();
    let r = catalog.create_role("r", false).unwrap();
    let r2 = catalog.create_role("r2", false).unwrap();
    let t = catalog.create_table("t").unwrap();
    catalog.grant_role(a, r).unwrap();
    catalog.grant_role(r2, r).unwrap();
    catalog.grant_right(r, RightTarget::Object(t), Privileges::SELECT).unwrap();
    (db, r)
}

fn rights_snapshot(db: &Database) -> Vec<Right> {
    db.catalog.all_rights().into_iter().cloned().collect()
}

#[test]
fn test_abort_after_membership_removal_restores_everything() {
    let (mut db, r) = setup();
    let before = rights_snapshot(&db);

    db.begin_transaction().unwrap();
    // Steps 1 and 2 of the cascade, then the transaction is aborted
    let memberships: Vec<ObjectId> =
        db.catalog.rights_on_target(RightTarget::Role(r)).iter().map(|right| right.id()).collect();
    assert_eq!(memberships.len(), 2);
    for right in memberships {
        assert!(db.catalog.remove_database_object(right).unwrap());
    }
    assert!(db.catalog.rights_on_target(RightTarget::Role(r)).is_empty());
    db.rollback_transaction().unwrap();

    let role = db.catalog.grantee(r).unwrap();
    assert!(role.is_valid());
    assert!(db.catalog.all_roles().iter().any(|g| g.id() == r));
    assert_eq!(rights_snapshot(&db), before);
    let a = db.catalog.find_user("a").unwrap().id();
    assert!(db.catalog.right_for_role(a, r).is_some());
}

#[test]
fn test_rolled_back_drop_leaves_role_valid() {
    let (mut db, r) = setup();
    let before = rights_snapshot(&db);

    db.begin_transaction().unwrap();
    let tombstone = db.catalog.drop_role("r").unwrap();
    assert!(!tombstone.is_valid());
    db.rollback_transaction().unwrap();

    assert!(db.catalog.grantee(r).unwrap().is_valid());
    assert_eq!(rights_snapshot(&db), before);
}

#[test]
fn test_failed_statement_in_session_changes_nothing() {
    let (db, r) = setup();
    let before = rights_snapshot(&db);
    let session = Session::open(db, None);

    let result: Result<(), StorageError> = session.transaction(|db| {
        let memberships: Vec<ObjectId> =
            db.catalog.rights_on_target(RightTarget::Role(r)).iter().map(|right| right.id()).collect();
        for right in memberships {
            db.catalog.remove_database_object(right)?;
        }
        Err(StorageError::TransactionError("aborted".to_string()))
    });
    assert!(result.is_err());

    let db = session.database();
    let db = db.lock();
    assert!(db.catalog.role_exists("r"));
    assert_eq!(rights_snapshot(&db), before);
    assert!(!db.in_transaction());
}

#[test]
fn test_committed_drop_in_session() {
    let (db, r) = setup();
    let session = Session::open(db, None);

    let dropped = session
        .transaction(|db| db.catalog.drop_role("r").map_err(StorageError::from))
        .unwrap();

    assert_eq!(dropped.id(), r);
    let db = session.database();
    let db = db.lock();
    assert!(!db.catalog.role_exists("r"));
    assert!(db.catalog.all_rights().iter().all(|right| right.grantee() != r && !right.target().refers_to(r)));
}

#[test]
fn test_missing_role_fails_before_transaction_work() {
    let (db, _) = setup();
    let before = rights_snapshot(&db);
    let session = Session::open(db, None);

    let result = session.transaction(|db| db.catalog.drop_role("missing").map_err(StorageError::from));

    assert_eq!(result.unwrap_err(), StorageError::Catalog(CatalogError::RoleNotFound("MISSING".to_string())));
    let db = session.database();
    assert_eq!(rights_snapshot(&db.lock()), before);
}
