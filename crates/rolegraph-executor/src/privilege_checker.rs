use rolegraph_catalog::{Privileges, RightTarget};
use rolegraph_storage::Database;

use crate::errors::ExecutorError;

/// Centralized permission checks for statement execution
pub struct PrivilegeChecker;

impl PrivilegeChecker {
    /// Require the current user to be an admin before running DDL.
    ///
    /// Passes unconditionally while security is disabled.
    pub fn check_admin(db: &Database, action: &str) -> Result<(), ExecutorError> {
        if !db.is_security_enabled() {
            return Ok(());
        }

        let Some(name) = db.current_user() else {
            return Err(ExecutorError::PermissionDenied {
                user: "<anonymous>".to_string(),
                action: action.to_string(),
            });
        };
        match db.catalog.find_user(name) {
            Some(user) if user.is_admin() => Ok(()),
            _ => Err(ExecutorError::PermissionDenied { user: name.to_string(), action: action.to_string() }),
        }
    }

    /// Whether `grantee` may exercise `privileges` on `table`, directly or
    /// through the roles it holds.
    pub fn has_table_privilege(
        db: &Database,
        grantee: &str,
        table: &str,
        privileges: Privileges,
    ) -> Result<bool, ExecutorError> {
        let holder = db
            .catalog
            .find_grantee(grantee)
            .ok_or_else(|| ExecutorError::GranteeNotFound(db.catalog.normalize_identifier(grantee)))?;
        let object = db.catalog.find_table(table).ok_or_else(|| {
            ExecutorError::Catalog(rolegraph_catalog::CatalogError::TableNotFound(table.to_string()))
        })?;
        Ok(db.catalog.has_privilege(holder.id(), RightTarget::Object(object.id()), privileges))
    }
}
