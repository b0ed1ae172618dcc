//! Stubs for the schema objects rights can target.
//!
//! Column and storage metadata is owned elsewhere; the catalog only needs
//! identity and a renderable name.

use crate::{sql, ObjectId, ObjectKind, SqlFlags};

/// Id of the PUBLIC schema, created at catalog bootstrap.
pub const PUBLIC_SCHEMA_ID: ObjectId = ObjectId(1);

pub const PUBLIC_SCHEMA_NAME: &str = "PUBLIC";

/// A table or schema registered with the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject {
    id: ObjectId,
    kind: ObjectKind,
    /// Owning schema for tables; `None` for schemas
    schema: Option<String>,
    name: String,
}

impl SchemaObject {
    pub(crate) fn new_table(id: ObjectId, schema: String, name: String) -> Self {
        SchemaObject { id, kind: ObjectKind::Table, schema: Some(schema), name }
    }

    pub(crate) fn new_schema(id: ObjectId, name: String) -> Self {
        SchemaObject { id, kind: ObjectKind::Schema, schema: None, name }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn type_tag(&self) -> ObjectKind {
        self.kind
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup key: "SCHEMA.TABLE" for tables, the bare name for schemas
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Target clause of a GRANT: `"S"."T"` or `SCHEMA "S"`
    pub fn grant_target_sql(&self) -> String {
        match (&self.kind, &self.schema) {
            (ObjectKind::Schema, _) => {
                format!("SCHEMA {}", sql::quote_identifier(&self.name, SqlFlags::DEFAULT))
            }
            (_, Some(schema)) => format!(
                "{}.{}",
                sql::quote_identifier(schema, SqlFlags::DEFAULT),
                sql::quote_identifier(&self.name, SqlFlags::DEFAULT)
            ),
            (_, None) => sql::quote_identifier(&self.name, SqlFlags::DEFAULT),
        }
    }
}
