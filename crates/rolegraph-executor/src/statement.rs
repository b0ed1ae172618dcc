//! Statement dispatch and statement-level atomicity

use rolegraph_ast::Statement;
use rolegraph_storage::{Database, Session};

use crate::{
    errors::ExecutorError, GrantExecutor, RevokeExecutor, RoleExecutor, SchemaObjectExecutor,
    UserExecutor,
};

const STATEMENT_SAVEPOINT: &str = "rolegraph_statement";

/// Runs any [`Statement`] as one atomic unit
pub struct StatementExecutor;

impl StatementExecutor {
    /// Execute `stmt` against `database`.
    ///
    /// Outside a transaction the statement runs in its own one: committed on
    /// success, rolled back on any error. Inside an open transaction it joins
    /// it, and a failure rolls back to the state before the statement.
    pub fn execute(stmt: &Statement, database: &mut Database) -> Result<String, ExecutorError> {
        let result = if database.in_transaction() {
            database.create_savepoint(STATEMENT_SAVEPOINT.to_string())?;
            let result = Self::dispatch(stmt, database);
            if result.is_err() {
                database.rollback_to_savepoint(STATEMENT_SAVEPOINT)?;
            }
            database.release_savepoint(STATEMENT_SAVEPOINT)?;
            result
        } else {
            database.begin_transaction()?;
            match Self::dispatch(stmt, database) {
                Ok(status) => {
                    database.commit_transaction()?;
                    Ok(status)
                }
                Err(e) => {
                    database.rollback_transaction()?;
                    Err(e)
                }
            }
        };
        Self::log_outcome(stmt, &result);
        result
    }

    /// Execute `stmt` through a shared session, as the session's user.
    pub fn execute_in_session(stmt: &Statement, session: &Session) -> Result<String, ExecutorError> {
        let result = session.transaction(|db| Self::dispatch(stmt, db));
        Self::log_outcome(stmt, &result);
        result
    }

    /// Execute statements in order, stopping at the first failure.
    ///
    /// Statements before the failure stay applied.
    pub fn execute_all(
        statements: &[Statement],
        database: &mut Database,
    ) -> Result<Vec<String>, ExecutorError> {
        statements.iter().map(|stmt| Self::execute(stmt, database)).collect()
    }

    fn dispatch(stmt: &Statement, database: &mut Database) -> Result<String, ExecutorError> {
        log::debug!("Executing {}", stmt.statement_type());
        match stmt {
            Statement::CreateRole(s) => RoleExecutor::execute_create_role(s, database),
            Statement::DropRole(s) => RoleExecutor::execute_drop_role(s, database),
            Statement::AlterRoleRename(s) => RoleExecutor::execute_alter_role_rename(s, database),
            Statement::CreateUser(s) => UserExecutor::execute_create_user(s, database),
            Statement::DropUser(s) => UserExecutor::execute_drop_user(s, database),
            Statement::AlterUserRename(s) => UserExecutor::execute_alter_user_rename(s, database),
            Statement::CreateTable(s) => SchemaObjectExecutor::execute_create_table(s, database),
            Statement::DropTable(s) => SchemaObjectExecutor::execute_drop_table(s, database),
            Statement::CreateSchema(s) => SchemaObjectExecutor::execute_create_schema(s, database),
            Statement::DropSchema(s) => SchemaObjectExecutor::execute_drop_schema(s, database),
            Statement::Grant(s) => GrantExecutor::execute_grant(s, database),
            Statement::GrantRole(s) => GrantExecutor::execute_grant_role(s, database),
            Statement::Revoke(s) => RevokeExecutor::execute_revoke(s, database),
            Statement::RevokeRole(s) => RevokeExecutor::execute_revoke_role(s, database),
        }
    }

    fn log_outcome(stmt: &Statement, result: &Result<String, ExecutorError>) {
        match result {
            Ok(status) => log::info!("{}", status),
            Err(ExecutorError::Internal(msg)) => {
                log::error!("{} failed with an internal error: {}", stmt.statement_type(), msg)
            }
            Err(e) => log::debug!("{} failed: {}", stmt.statement_type(), e),
        }
    }
}
