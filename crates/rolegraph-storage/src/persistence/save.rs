// ============================================================================
// SQL Script Generation (Save Operations)
// ============================================================================
//
// Writes statements that rebuild an equivalent catalog:
// - Schemas and tables
// - Users and roles
// - Role grants, then privilege grants

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use rolegraph_catalog::{sql, ObjectKind, SqlFlags, PUBLIC_SCHEMA_ID};

use crate::{Database, StorageError};

impl Database {
    /// Save the catalog as a SQL script
    ///
    /// # Example
    /// ```no_run
    /// # use rolegraph_storage::Database;
    /// let db = Database::new();
    /// db.save_sql_script("catalog.sql").unwrap();
    /// ```
    pub fn save_sql_script<P: AsRef<Path>>(&self, path: P) -> Result<(), StorageError> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        for line in self.sql_script()? {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        log::info!("Wrote SQL script to {}", path.as_ref().display());
        Ok(())
    }

    /// The SQL script as lines, header comments included
    pub fn sql_script(&self) -> Result<Vec<String>, StorageError> {
        let mut lines = vec![
            "-- rolegraph catalog script".to_string(),
            format!("-- Generated: {}", chrono::Utc::now()),
            "--".to_string(),
            String::new(),
        ];

        // Schema objects are stubs owned by the table layer; only their
        // identity is needed for the grants to replay.
        lines.push("-- Schemas and tables".to_string());
        for object in self.catalog.all_schema_objects() {
            if object.id() == PUBLIC_SCHEMA_ID {
                continue;
            }
            let statement = match object.type_tag() {
                ObjectKind::Schema => format!(
                    "CREATE SCHEMA {};",
                    sql::quote_identifier(object.name(), SqlFlags::DEFAULT)
                ),
                _ => format!("CREATE TABLE {};", object.grant_target_sql()),
            };
            lines.push(statement);
        }
        lines.push(String::new());

        lines.push("-- Users, roles and grants".to_string());
        for statement in self.catalog.script()? {
            lines.push(format!("{};", statement));
        }
        Ok(lines)
    }
}
