//! REVOKE statement executor

use rolegraph_ast::{RevokeRoleStmt, RevokeStmt};
use rolegraph_storage::Database;

use crate::{
    errors::ExecutorError,
    grant::normalized_list,
    privilege_checker::PrivilegeChecker,
    target::{privilege_mask, resolve_grantee, resolve_role, resolve_target},
};

/// Executor for REVOKE statements
pub struct RevokeExecutor;

impl RevokeExecutor {
    /// Execute REVOKE <privileges> [ON <object>] FROM <grantees>
    ///
    /// Revoking what a grantee does not hold is a no-op. A right whose mask
    /// becomes empty is removed.
    pub fn execute_revoke(stmt: &RevokeStmt, database: &mut Database) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "revoke privileges")?;
        let mask = privilege_mask(&stmt.privileges, stmt.object_type)?;
        let target = resolve_target(database, stmt.object_type, &stmt.object_name)?;
        let grantees = stmt
            .grantees
            .iter()
            .map(|name| resolve_grantee(database, name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut changed = 0;
        for grantee in grantees {
            if database.catalog.revoke_privileges(grantee, target, mask)? {
                changed += 1;
            }
        }

        Ok(format!(
            "Revoked {} on {} from {} ({} right(s) changed)",
            mask,
            database.catalog.describe_target(target),
            normalized_list(database, &stmt.grantees),
            changed
        ))
    }

    /// Execute REVOKE <roles> FROM <grantees>
    pub fn execute_revoke_role(
        stmt: &RevokeRoleStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "revoke roles")?;
        let roles =
            stmt.roles.iter().map(|name| resolve_role(database, name)).collect::<Result<Vec<_>, _>>()?;
        let grantees = stmt
            .grantees
            .iter()
            .map(|name| resolve_grantee(database, name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut removed = 0;
        for &grantee in &grantees {
            for &role in &roles {
                if database.catalog.revoke_role(grantee, role)? {
                    removed += 1;
                }
            }
        }

        Ok(format!(
            "Revoked role(s) {} from {} ({} membership(s) removed)",
            normalized_list(database, &stmt.roles),
            normalized_list(database, &stmt.grantees),
            removed
        ))
    }
}
