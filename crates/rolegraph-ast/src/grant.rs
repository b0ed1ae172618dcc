//! GRANT statement AST structures
//!
//! This module defines AST structures for GRANT statements that assign
//! privileges on objects, or role membership, to users and roles.

/// Privilege types that can be granted on database objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeType {
    /// SELECT privilege (read access)
    Select,
    /// INSERT privilege (write access)
    Insert,
    /// UPDATE privilege (modify access)
    Update,
    /// DELETE privilege (delete access)
    Delete,
    /// ALTER ANY SCHEMA (database-wide, no object)
    AlterAnySchema,
    /// ALL PRIVILEGES (SELECT, INSERT, UPDATE, DELETE)
    AllPrivileges,
}

/// Types of database objects that can have privileges granted on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// Table object
    Table,
    /// Schema object
    Schema,
    /// The database itself; only valid for ALTER ANY SCHEMA
    Database,
}

/// GRANT statement - assigns privileges to roles/users.
///
/// Example SQL:
/// ```sql
/// GRANT SELECT ON TABLE users TO manager;
/// GRANT INSERT, UPDATE ON TABLE orders TO clerk;
/// GRANT ALTER ANY SCHEMA TO dba;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GrantStmt {
    /// List of privileges being granted
    pub privileges: Vec<PrivilegeType>,
    /// Type of object (TABLE, SCHEMA, or the database)
    pub object_type: ObjectType,
    /// Name of the object - supports qualified names like "schema.table".
    /// Ignored for [`ObjectType::Database`].
    pub object_name: String,
    /// List of roles/users receiving the privileges
    pub grantees: Vec<String>,
}

/// GRANT role statement - makes grantees members of roles.
///
/// Example SQL:
/// ```sql
/// GRANT manager, auditor TO alice, ops;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GrantRoleStmt {
    pub roles: Vec<String>,
    pub grantees: Vec<String>,
}
