use crate::{
    AlterRoleRenameStmt, AlterUserRenameStmt, CreateRoleStmt, CreateSchemaStmt, CreateTableStmt,
    CreateUserStmt, DropRoleStmt, DropSchemaStmt, DropTableStmt, DropUserStmt, GrantRoleStmt,
    GrantStmt, RevokeRoleStmt, RevokeStmt,
};

/// A complete authorization statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateRole(CreateRoleStmt),
    DropRole(DropRoleStmt),
    AlterRoleRename(AlterRoleRenameStmt),
    CreateUser(CreateUserStmt),
    DropUser(DropUserStmt),
    AlterUserRename(AlterUserRenameStmt),
    CreateTable(CreateTableStmt),
    DropTable(DropTableStmt),
    CreateSchema(CreateSchemaStmt),
    DropSchema(DropSchemaStmt),
    Grant(GrantStmt),
    GrantRole(GrantRoleStmt),
    Revoke(RevokeStmt),
    RevokeRole(RevokeRoleStmt),
}

impl Statement {
    /// Statement tag used in logs and status messages
    pub fn statement_type(&self) -> &'static str {
        match self {
            Statement::CreateRole(_) => "CREATE ROLE",
            Statement::DropRole(_) => "DROP ROLE",
            Statement::AlterRoleRename(_) => "ALTER ROLE",
            Statement::CreateUser(_) => "CREATE USER",
            Statement::DropUser(_) => "DROP USER",
            Statement::AlterUserRename(_) => "ALTER USER",
            Statement::CreateTable(_) => "CREATE TABLE",
            Statement::DropTable(_) => "DROP TABLE",
            Statement::CreateSchema(_) => "CREATE SCHEMA",
            Statement::DropSchema(_) => "DROP SCHEMA",
            Statement::Grant(_) | Statement::GrantRole(_) => "GRANT",
            Statement::Revoke(_) | Statement::RevokeRole(_) => "REVOKE",
        }
    }
}
