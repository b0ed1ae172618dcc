//! Executor - runs authorization statements against a database
//!
//! Each statement family has a unit-struct executor whose methods take the
//! statement and a `&mut Database` and return a status string.
//! [`StatementExecutor`] dispatches a [`rolegraph_ast::Statement`] and makes
//! it atomic.

pub mod errors;
mod grant;
mod privilege_checker;
mod revoke;
mod role_ddl;
mod schema_ddl;
mod statement;
mod target;
mod user_ddl;

pub use errors::ExecutorError;
pub use grant::GrantExecutor;
pub use privilege_checker::PrivilegeChecker;
pub use revoke::RevokeExecutor;
pub use role_ddl::RoleExecutor;
pub use schema_ddl::SchemaObjectExecutor;
pub use statement::StatementExecutor;
pub use user_ddl::UserExecutor;
