//! Sharing one database between sessions

use std::thread;

use rolegraph_storage::{Database, Session, StorageError};

#[test]
fn test_sessions_see_each_others_commits() {
    let first = Session::open(Database::new(), Some("SA".to_string()));
    let second = first.connect(Some("ALICE".to_string()));

    first
        .transaction(|db| db.catalog.create_role("r1", false).map_err(StorageError::from))
        .unwrap();

    let exists = second.with_database(|db| Ok::<_, StorageError>(db.catalog.role_exists("r1"))).unwrap();
    assert!(exists);
}

#[test]
fn test_session_user_is_applied() {
    let first = Session::open(Database::new(), Some("SA".to_string()));
    let second = first.connect(Some("ALICE".to_string()));

    let user = second
        .with_database(|db| Ok::<_, StorageError>(db.current_user().map(str::to_string)))
        .unwrap();
    assert_eq!(user.as_deref(), Some("ALICE"));
}

#[test]
fn test_open_transaction_blocks_other_sessions() {
    let first = Session::open(Database::new(), None);
    let second = first.connect(None);

    first.begin().unwrap();
    let result = second.transaction(|db| db.catalog.create_role("r1", false).map_err(StorageError::from));
    assert!(matches!(result, Err(StorageError::TransactionError(_))));

    first.commit().unwrap();
    assert!(second
        .transaction(|db| db.catalog.create_role("r1", false).map_err(StorageError::from))
        .is_ok());
}

#[test]
fn test_statement_failure_inside_explicit_transaction() {
    let session = Session::open(Database::new(), None);
    session.begin().unwrap();
    session
        .transaction(|db| db.catalog.create_role("kept", false).map_err(StorageError::from))
        .unwrap();

    let failed = session.transaction(|db| {
        db.catalog.create_role("undone", false)?;
        db.catalog.create_role("kept", false)?;
        Ok::<_, StorageError>(())
    });
    assert!(failed.is_err());

    let (kept, undone, open) = session
        .with_database(|db| {
            Ok::<_, StorageError>((
                db.catalog.role_exists("kept"),
                db.catalog.role_exists("undone"),
                db.in_transaction(),
            ))
        })
        .unwrap();
    assert!(kept);
    assert!(!undone);
    assert!(open);
    session.commit().unwrap();
}

#[test]
fn test_dropping_session_rolls_back_its_transaction() {
    let first = Session::open(Database::new(), None);
    let second = first.connect(None);

    second.begin().unwrap();
    second
        .transaction(|db| db.catalog.create_role("temp", false).map_err(StorageError::from))
        .unwrap();
    drop(second);

    let (exists, open) = first
        .with_database(|db| Ok::<_, StorageError>((db.catalog.role_exists("temp"), db.in_transaction())))
        .unwrap();
    assert!(!exists);
    assert!(!open);
}

#[test]
fn test_concurrent_sessions_serialize_ddl() {
    let root = Session::open(Database::new(), None);
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let session = root.connect(None);
            thread::spawn(move || {
                session
                    .transaction(|db| {
                        db.catalog.create_role(&format!("role_{}", i), false).map_err(StorageError::from)
                    })
                    .unwrap()
            })
        })
        .collect();

    let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);

    let roles = root.with_database(|db| Ok::<_, StorageError>(db.catalog.list_roles().len())).unwrap();
    // 8 created plus PUBLIC
    assert_eq!(roles, 9);
}
