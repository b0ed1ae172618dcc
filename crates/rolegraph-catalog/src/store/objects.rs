//! Table and schema stubs.
//!
//! Only identity is tracked here; columns and storage belong to the
//! engine's table metadata.

use crate::{
    errors::CatalogError,
    object::{ObjectId, ObjectKind},
    schema_object::{SchemaObject, PUBLIC_SCHEMA_NAME},
};

impl super::Catalog {
    /// Create a new schema.
    pub fn create_schema(&mut self, name: &str) -> Result<ObjectId, CatalogError> {
        let name = self.normalize_identifier(name);
        let key = (ObjectKind::Schema, name.clone());
        if self.object_names.contains_key(&key) {
            return Err(CatalogError::SchemaAlreadyExists(name));
        }
        let id = self.allocate_id()?;
        self.object_names.insert(key, id);
        self.objects.insert(id, SchemaObject::new_schema(id, name));
        Ok(id)
    }

    /// Register a table; unqualified names land in the PUBLIC schema.
    pub fn create_table(&mut self, name: &str) -> Result<ObjectId, CatalogError> {
        let (schema, table) = self.split_qualified_name(name);
        if self.find_schema(&schema).is_none() {
            return Err(CatalogError::SchemaNotFound(schema));
        }
        let key = (ObjectKind::Table, format!("{}.{}", schema, table));
        if self.object_names.contains_key(&key) {
            return Err(CatalogError::TableAlreadyExists(key.1));
        }
        let id = self.allocate_id()?;
        self.object_names.insert(key, id);
        self.objects.insert(id, SchemaObject::new_table(id, schema, table));
        Ok(id)
    }

    pub fn find_schema(&self, name: &str) -> Option<&SchemaObject> {
        let key = (ObjectKind::Schema, self.normalize_identifier(name));
        self.object_names.get(&key).and_then(|id| self.objects.get(id))
    }

    pub fn find_table(&self, name: &str) -> Option<&SchemaObject> {
        let (schema, table) = self.split_qualified_name(name);
        let key = (ObjectKind::Table, format!("{}.{}", schema, table));
        self.object_names.get(&key).and_then(|id| self.objects.get(id))
    }

    /// Check if table exists.
    pub fn table_exists(&self, name: &str) -> bool {
        self.find_table(name).is_some()
    }

    /// Check if schema exists.
    pub fn schema_exists(&self, name: &str) -> bool {
        self.find_schema(name).is_some()
    }

    pub fn schema_object(&self, id: ObjectId) -> Option<&SchemaObject> {
        self.objects.get(&id)
    }

    /// Every table and schema, ordered by id.
    pub fn all_schema_objects(&self) -> Vec<&SchemaObject> {
        self.objects.values().collect()
    }

    /// Drop a table and the rights on it.
    pub fn drop_table(&mut self, name: &str) -> Result<SchemaObject, CatalogError> {
        let id = match self.find_table(name) {
            Some(table) => table.id(),
            None => {
                let (schema, table) = self.split_qualified_name(name);
                return Err(CatalogError::TableNotFound(format!("{}.{}", schema, table)));
            }
        };
        self.drop_schema_object(id)
    }

    /// Drop an empty schema and the rights on it.
    pub fn drop_schema(&mut self, name: &str) -> Result<SchemaObject, CatalogError> {
        let id = self
            .find_schema(name)
            .map(|s| s.id())
            .ok_or_else(|| CatalogError::SchemaNotFound(self.normalize_identifier(name)))?;
        self.drop_schema_object(id)
    }

    /// Split "schema.table" into normalized parts, defaulting to PUBLIC.
    fn split_qualified_name(&self, name: &str) -> (String, String) {
        match name.split_once('.') {
            Some((schema, table)) => {
                (self.normalize_identifier(schema), self.normalize_identifier(table))
            }
            None => (PUBLIC_SCHEMA_NAME.to_string(), self.normalize_identifier(name)),
        }
    }
}
