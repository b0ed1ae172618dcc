//! DDL statements for grantees and the schema objects rights can target.

/// CREATE ROLE statement
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRoleStmt {
    pub role_name: String,
    pub if_not_exists: bool,
}

/// DROP ROLE statement
#[derive(Debug, Clone, PartialEq)]
pub struct DropRoleStmt {
    pub role_name: String,
    pub if_exists: bool,
}

/// ALTER ROLE ... RENAME TO statement
#[derive(Debug, Clone, PartialEq)]
pub struct AlterRoleRenameStmt {
    pub role_name: String,
    pub new_name: String,
}

/// CREATE USER statement
///
/// Example SQL:
/// ```sql
/// CREATE USER IF NOT EXISTS alice PASSWORD 'secret' ADMIN;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserStmt {
    pub user_name: String,
    /// Cleartext password as written; hashed before it reaches the catalog
    pub password: Option<String>,
    pub admin: bool,
    pub if_not_exists: bool,
}

/// DROP USER statement
#[derive(Debug, Clone, PartialEq)]
pub struct DropUserStmt {
    pub user_name: String,
    pub if_exists: bool,
}

/// ALTER USER ... RENAME TO statement
#[derive(Debug, Clone, PartialEq)]
pub struct AlterUserRenameStmt {
    pub user_name: String,
    pub new_name: String,
}

/// CREATE TABLE statement (name only; column metadata lives elsewhere)
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStmt {
    /// Optionally qualified name like "schema.table"
    pub table_name: String,
}

/// DROP TABLE statement
#[derive(Debug, Clone, PartialEq)]
pub struct DropTableStmt {
    pub table_name: String,
    pub if_exists: bool,
}

/// CREATE SCHEMA statement
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSchemaStmt {
    pub schema_name: String,
}

/// DROP SCHEMA statement
#[derive(Debug, Clone, PartialEq)]
pub struct DropSchemaStmt {
    pub schema_name: String,
    pub if_exists: bool,
}
