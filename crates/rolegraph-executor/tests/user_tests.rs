//! Tests for user management

use rolegraph_ast::{AlterUserRenameStmt, CreateRoleStmt, CreateUserStmt, DropUserStmt};
use rolegraph_catalog::{verify_password, CatalogError};
use rolegraph_executor::{ExecutorError, RoleExecutor, UserExecutor};
use rolegraph_storage::Database;

fn create_user(db: &mut Database, name: &str, admin: bool) {
    let stmt = CreateUserStmt { user_name: name.to_string(), password: None, admin, if_not_exists: false };
    UserExecutor::execute_create_user(&stmt, db).unwrap();
}

#[test]
fn test_create_user_hashes_password() {
    let mut db = Database::new();
    let stmt = CreateUserStmt {
        user_name: "alice".to_string(),
        password: Some("s3cret".to_string()),
        admin: false,
        if_not_exists: false,
    };

    UserExecutor::execute_create_user(&stmt, &mut db).unwrap();

    let hash = db.catalog.find_user("alice").unwrap().password_hash().unwrap().to_string();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password(&hash, "s3cret"));
    assert!(!verify_password(&hash, "wrong"));
}

#[test]
fn test_create_user_name_taken_by_role() {
    let mut db = Database::new();
    let role = CreateRoleStmt { role_name: "ops".to_string(), if_not_exists: false };
    RoleExecutor::execute_create_role(&role, &mut db).unwrap();

    let stmt = CreateUserStmt { user_name: "ops".to_string(), password: None, admin: false, if_not_exists: true };
    assert_eq!(
        UserExecutor::execute_create_user(&stmt, &mut db),
        Err(ExecutorError::Catalog(CatalogError::GranteeNameInUse("OPS".to_string())))
    );
}

#[test]
fn test_drop_user() {
    let mut db = Database::new();
    create_user(&mut db, "alice", false);

    let stmt = DropUserStmt { user_name: "alice".to_string(), if_exists: false };
    assert_eq!(UserExecutor::execute_drop_user(&stmt, &mut db).unwrap(), "User 'ALICE' dropped");
    assert!(!db.catalog.user_exists("alice"));

    let stmt = DropUserStmt { user_name: "alice".to_string(), if_exists: true };
    assert!(UserExecutor::execute_drop_user(&stmt, &mut db).is_ok());
}

#[test]
fn test_cannot_drop_current_user() {
    let mut db = Database::new();
    create_user(&mut db, "sa", true);
    create_user(&mut db, "root", true);
    db.set_current_user(Some("sa".to_string()));

    let stmt = DropUserStmt { user_name: "SA".to_string(), if_exists: false };
    assert_eq!(
        UserExecutor::execute_drop_user(&stmt, &mut db),
        Err(ExecutorError::CannotDropSelf("SA".to_string()))
    );
}

#[test]
fn test_cannot_drop_last_admin() {
    let mut db = Database::new();
    create_user(&mut db, "sa", true);
    create_user(&mut db, "root", true);

    let stmt = DropUserStmt { user_name: "sa".to_string(), if_exists: false };
    UserExecutor::execute_drop_user(&stmt, &mut db).unwrap();

    let stmt = DropUserStmt { user_name: "root".to_string(), if_exists: false };
    assert_eq!(
        UserExecutor::execute_drop_user(&stmt, &mut db),
        Err(ExecutorError::CannotDropLastAdmin("ROOT".to_string()))
    );
}

#[test]
fn test_rename_current_user_follows_session() {
    let mut db = Database::new();
    create_user(&mut db, "sa", true);
    db.set_current_user(Some("sa".to_string()));

    let stmt = AlterUserRenameStmt { user_name: "sa".to_string(), new_name: "admin".to_string() };
    UserExecutor::execute_alter_user_rename(&stmt, &mut db).unwrap();

    assert_eq!(db.current_user(), Some("ADMIN"));
    assert!(db.catalog.find_user("admin").unwrap().is_admin());
}
