//! Table and schema stub DDL executor

use rolegraph_ast::{CreateSchemaStmt, CreateTableStmt, DropSchemaStmt, DropTableStmt};
use rolegraph_catalog::CatalogError;
use rolegraph_storage::Database;

use crate::{errors::ExecutorError, privilege_checker::PrivilegeChecker};

/// Executor for the schema objects rights can target
pub struct SchemaObjectExecutor;

impl SchemaObjectExecutor {
    /// Execute CREATE TABLE
    pub fn execute_create_table(
        stmt: &CreateTableStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "create tables")?;
        let id = database.catalog.create_table(&stmt.table_name)?;
        Ok(format!("Table '{}' created", qualified(database, id)))
    }

    /// Execute DROP TABLE; rights on the table are revoked first
    pub fn execute_drop_table(
        stmt: &DropTableStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "drop tables")?;
        match database.catalog.drop_table(&stmt.table_name) {
            Ok(table) => Ok(format!("Table '{}' dropped", table.qualified_name())),
            Err(CatalogError::TableNotFound(name)) if stmt.if_exists => {
                Ok(format!("Table '{}' does not exist, skipped", name))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Execute CREATE SCHEMA
    pub fn execute_create_schema(
        stmt: &CreateSchemaStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "create schemas")?;
        let id = database.catalog.create_schema(&stmt.schema_name)?;
        Ok(format!("Schema '{}' created", qualified(database, id)))
    }

    /// Execute DROP SCHEMA; only empty schemas can be dropped
    pub fn execute_drop_schema(
        stmt: &DropSchemaStmt,
        database: &mut Database,
    ) -> Result<String, ExecutorError> {
        PrivilegeChecker::check_admin(database, "drop schemas")?;
        match database.catalog.drop_schema(&stmt.schema_name) {
            Ok(schema) => Ok(format!("Schema '{}' dropped", schema.name())),
            Err(CatalogError::SchemaNotFound(name)) if stmt.if_exists => {
                Ok(format!("Schema '{}' does not exist, skipped", name))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn qualified(database: &Database, id: rolegraph_catalog::ObjectId) -> String {
    database.catalog.schema_object(id).map(|o| o.qualified_name()).unwrap_or_else(|| id.to_string())
}
