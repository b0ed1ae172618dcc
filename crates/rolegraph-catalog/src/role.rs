//! Role-specific behavior.
//!
//! Roles can be granted to users and to other roles, and may themselves
//! hold rights on schema objects and on other roles.

use crate::{sql, ObjectId, SqlFlags};

/// Id of the built-in PUBLIC role, created at catalog bootstrap.
pub const PUBLIC_ROLE_ID: ObjectId = ObjectId(0);

pub const PUBLIC_ROLE_NAME: &str = "PUBLIC";

/// Render `CREATE ROLE [IF NOT EXISTS] <name>`; system roles have no DDL.
pub(crate) fn create_sql(name: &str, system: bool, if_not_exists: bool) -> Option<String> {
    if system {
        return None;
    }
    let mut builder = String::from("CREATE ROLE ");
    if if_not_exists {
        builder.push_str("IF NOT EXISTS ");
    }
    builder.push_str(&sql::quote_identifier(name, SqlFlags::DEFAULT));
    Some(builder)
}
