//! Role DDL executor

use rolegraph_ast::{AlterRoleRenameStmt, CreateRoleStmt, DropRoleStmt};
use rolegraph_catalog::CatalogError;
use rolegraph_storage::Database;

use crate::{errors::ExecutorError, privilege_checker::PrivilegeChecker, target::resolve_role};

/// Executor for role DDL statements
pub struct RoleExecutor;

impl RoleExecutor {
    /// Execute CREATE ROLE
    pub fn execute_create_role(
        stmt: &CreateRoleStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "create roles")?;
        let name = database.catalog.normalize_identifier(&stmt.role_name);
        let existed = database.catalog.role_exists(&name);
        database.catalog.create_role(&name, stmt.if_not_exists)?;
        if existed {
            return Ok(format!("Role '{}' already exists, skipped", name));
        }
        Ok(format!("Role '{}' created", name))
    }

    /// Execute DROP ROLE
    ///
    /// Every right that references the role, as holder or as target, is
    /// revoked before the role itself is removed.
    pub fn execute_drop_role(
        stmt: &DropRoleStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "drop roles")?;
        let name = database.catalog.normalize_identifier(&stmt.role_name);
        match database.catalog.drop_role(&name) {
            Ok(_) => Ok(format!("Role '{}' dropped", name)),
            Err(CatalogError::RoleNotFound(_)) if stmt.if_exists => {
                Ok(format!("Role '{}' does not exist, skipped", name))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Execute ALTER ROLE ... RENAME TO
    pub fn execute_alter_role_rename(
        stmt: &AlterRoleRenameStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "alter roles")?;
        let id = resolve_role(database, &stmt.role_name)?;
        database.catalog.rename_grantee(id, &stmt.new_name)?;
        Ok(format!(
            "Role '{}' renamed to '{}'",
            database.catalog.normalize_identifier(&stmt.role_name),
            database.catalog.normalize_identifier(&stmt.new_name)
        ))
    }
}
