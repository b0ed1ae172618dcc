//! GRANT statement executor

use rolegraph_ast::{GrantRoleStmt, GrantStmt};
use rolegraph_storage::Database;

use crate::{
    errors::ExecutorError,
    privilege_checker::PrivilegeChecker,
    target::{privilege_mask, resolve_grantee, resolve_role, resolve_target},
};

/// Executor for GRANT statements
pub struct GrantExecutor;

impl GrantExecutor {
    /// Execute GRANT <privileges> [ON <object>] TO <grantees>
    ///
    /// Granting to a grantee that already holds a right on the object widens
    /// that right instead of adding a second one.
    pub fn execute_grant(stmt: &GrantStmt, database: &mut Database) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "grant privileges")?;
        let mask = privilege_mask(&stmt.privileges, stmt.object_type)?;
        let target = resolve_target(database, stmt.object_type, &stmt.object_name)?;

        // Resolve every grantee before changing anything
        let grantees = stmt
            .grantees
            .iter()
            .map(|name| resolve_grantee(database, name))
            .collect::<Result<Vec<_>, _>>()?;
        for grantee in grantees {
            database.catalog.grant_right(grantee, target, mask)?;
        }

        Ok(format!(
            "Granted {} on {} to {}",
            mask,
            database.catalog.describe_target(target),
            normalized_list(database, &stmt.grantees)
        ))
    }

    /// Execute GRANT <roles> TO <grantees>
    pub fn execute_grant_role(
        stmt: &GrantRoleStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "grant roles")?;
        let roles =
            stmt.roles.iter().map(|name| resolve_role(database, name)).collect::<Result<Vec<_>, _>>()?;
        let grantees = stmt
            .grantees
            .iter()
            .map(|name| resolve_grantee(database, name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut created = 0;
        for &grantee in &grantees {
            for &role in &roles {
                if database.catalog.grant_role(grantee, role)?.is_some() {
                    created += 1;
                }
            }
        }

        Ok(format!(
            "Granted role(s) {} to {} ({} new membership(s))",
            normalized_list(database, &stmt.roles),
            normalized_list(database, &stmt.grantees),
            created
        ))
    }
}

pub(crate) fn normalized_list(database: &Database, names: &[String]) -> String {
    names.iter().map(|n| database.catalog.normalize_identifier(n)).collect::<Vec<_>>().join(", ")
}
