//! REVOKE statement AST structures

use crate::grant::{ObjectType, PrivilegeType};

/// REVOKE statement - removes privileges from roles/users.
///
/// Example SQL:
/// ```sql
/// REVOKE SELECT ON TABLE users FROM manager;
/// REVOKE ALL PRIVILEGES ON TABLE products FROM admin;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RevokeStmt {
    pub privileges: Vec<PrivilegeType>,
    pub object_type: ObjectType,
    pub object_name: String,
    pub grantees: Vec<String>,
}

/// REVOKE role statement - ends role membership.
#[derive(Debug, Clone, PartialEq)]
pub struct RevokeRoleStmt {
    pub roles: Vec<String>,
    pub grantees: Vec<String>,
}
