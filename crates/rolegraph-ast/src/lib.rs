//! Abstract Syntax Tree (AST) for the authorization DDL surface
//!
//! These structures are the contract between an SQL parser and the
//! engine: a parser produces them, the executor consumes them. Names are
//! carried exactly as written; case folding happens in the catalog.

mod ddl;
mod grant;
mod revoke;
mod statement;

pub use ddl::{
    AlterRoleRenameStmt, AlterUserRenameStmt, CreateRoleStmt, CreateSchemaStmt, CreateTableStmt,
    CreateUserStmt, DropRoleStmt, DropSchemaStmt, DropTableStmt, DropUserStmt,
};
pub use grant::{GrantRoleStmt, GrantStmt, ObjectType, PrivilegeType};
pub use revoke::{RevokeRoleStmt, RevokeStmt};
pub use statement::Statement;
