//! User DDL executor

use rolegraph_ast::{AlterUserRenameStmt, CreateUserStmt, DropUserStmt};
use rolegraph_catalog::{hash_password, CatalogError};
use rolegraph_storage::Database;

use crate::{errors::ExecutorError, privilege_checker::PrivilegeChecker};

/// Executor for user DDL statements
pub struct UserExecutor;

impl UserExecutor {
    /// Execute CREATE USER
    ///
    /// The password is hashed with Argon2 before it reaches the catalog.
    pub fn execute_create_user(
        stmt: &CreateUserStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "create users")?;
        let name = database.catalog.normalize_identifier(&stmt.user_name);
        if stmt.if_not_exists && database.catalog.user_exists(&name) {
            return Ok(format!("User '{}' already exists, skipped", name));
        }

        let password_hash = stmt.password.as_deref().map(hash_password).transpose()?;
        database.catalog.create_user(&name, password_hash, stmt.admin, stmt.if_not_exists)?;
        Ok(format!("User '{}' created", name))
    }

    /// Execute DROP USER
    ///
    /// Refuses to drop the current user, and the last remaining admin.
    pub fn execute_drop_user(
        stmt: &DropUserStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "drop users")?;
        let name = database.catalog.normalize_identifier(&stmt.user_name);
        let Some(user) = database.catalog.find_user(&name) else {
            if stmt.if_exists {
                return Ok(format!("User '{}' does not exist, skipped", name));
            }
            return Err(CatalogError::UserNotFound(name).into());
        };

        let current = database.current_user().map(|u| database.catalog.normalize_identifier(u));
        if current.as_deref() == Some(user.name()) {
            return Err(ExecutorError::CannotDropSelf(name));
        }
        if user.is_admin() && database.catalog.admin_count() == 1 {
            return Err(ExecutorError::CannotDropLastAdmin(name));
        }

        database.catalog.drop_user(&name)?;
        Ok(format!("User '{}' dropped", name))
    }

    /// Execute ALTER USER ... RENAME TO
    pub fn execute_alter_user_rename(
        stmt: &AlterUserRenameStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "alter users")?;
        let old_name = database.catalog.normalize_identifier(&stmt.user_name);
        let new_name = database.catalog.normalize_identifier(&stmt.new_name);
        let id = database
            .catalog
            .find_user(&old_name)
            .map(|u| u.id())
            .ok_or_else(|| CatalogError::UserNotFound(old_name.clone()))?;
        database.catalog.rename_grantee(id, &new_name)?;

        // Keep acting as the same user after renaming it
        let renamed_self =
            database.current_user().map(|u| database.catalog.normalize_identifier(u)) == Some(old_name.clone());
        if renamed_self {
            database.set_current_user(Some(new_name.clone()));
        }
        Ok(format!("User '{}' renamed to '{}'", old_name, new_name))
    }
}
