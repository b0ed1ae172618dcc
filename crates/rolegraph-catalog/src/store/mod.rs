//! Catalog store - the registry of every grantee, right and schema object.
//!
//! This module provides the main `Catalog` struct and is organized into
//! submodules by responsibility:
//!
//! - `grantees` - user and role creation, lookup, enumeration, rename
//! - `rights` - grants, revokes and privilege resolution
//! - `objects` - table and schema stubs
//! - `cascade` - drop cascades and the removal primitives they use
//! - `script` - DDL rendering of catalog contents
//! - `restore` - rebuilding a catalog from persisted entries

use std::collections::{BTreeMap, HashMap};

use crate::{
    errors::CatalogError,
    grantee::Grantee,
    object::{ObjectId, ObjectKind},
    right::Right,
    role::{PUBLIC_ROLE_ID, PUBLIC_ROLE_NAME},
    schema_object::{SchemaObject, PUBLIC_SCHEMA_ID, PUBLIC_SCHEMA_NAME},
};

// Submodules - each handles a specific area of catalog operations
mod cascade;
mod grantees;
mod objects;
mod restore;
mod rights;
mod script;

/// Authorization catalog.
///
/// Grantees are keyed by id; their right maps index the rights they hold
/// by target, and the rights themselves are keyed by id here. Everything
/// is ordered by id so enumeration is deterministic.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) grantees: BTreeMap<ObjectId, Grantee>,
    /// Normalized grantee name -> id (users and roles share one namespace)
    pub(crate) grantee_names: HashMap<String, ObjectId>,
    pub(crate) rights: BTreeMap<ObjectId, Right>,
    pub(crate) objects: BTreeMap<ObjectId, SchemaObject>,
    /// (kind, qualified name) -> id
    pub(crate) object_names: HashMap<(ObjectKind, String), ObjectId>,
    pub(crate) next_id: u32,
    /// When true, identifier lookups are case-sensitive.
    /// When false (default), names are folded to upper case.
    pub(crate) case_sensitive_identifiers: bool,
}

impl Catalog {
    /// Create a catalog holding only the PUBLIC role and the PUBLIC schema.
    pub fn new() -> Self {
        let mut catalog = Catalog {
            grantees: BTreeMap::new(),
            grantee_names: HashMap::new(),
            rights: BTreeMap::new(),
            objects: BTreeMap::new(),
            object_names: HashMap::new(),
            next_id: PUBLIC_SCHEMA_ID.0 + 1,
            case_sensitive_identifiers: false,
        };

        catalog.grantees.insert(
            PUBLIC_ROLE_ID,
            Grantee::new_role(PUBLIC_ROLE_ID, PUBLIC_ROLE_NAME.to_string(), true),
        );
        catalog.grantee_names.insert(PUBLIC_ROLE_NAME.to_string(), PUBLIC_ROLE_ID);

        let public_schema = SchemaObject::new_schema(PUBLIC_SCHEMA_ID, PUBLIC_SCHEMA_NAME.to_string());
        catalog
            .object_names
            .insert((ObjectKind::Schema, PUBLIC_SCHEMA_NAME.to_string()), PUBLIC_SCHEMA_ID);
        catalog.objects.insert(PUBLIC_SCHEMA_ID, public_schema);

        catalog
    }

    /// Set whether identifier lookups should be case-sensitive
    pub fn set_case_sensitive_identifiers(&mut self, case_sensitive: bool) {
        self.case_sensitive_identifiers = case_sensitive;
    }

    /// Check if identifier lookups are case-sensitive
    pub fn is_case_sensitive_identifiers(&self) -> bool {
        self.case_sensitive_identifiers
    }

    /// Normalize an identifier for lookup (applies case folding if case-insensitive mode)
    pub fn normalize_identifier(&self, identifier: &str) -> String {
        if self.case_sensitive_identifiers {
            identifier.to_string()
        } else {
            identifier.to_uppercase()
        }
    }

    /// The id the next created object will receive
    pub fn next_object_id(&self) -> u32 {
        self.next_id
    }

    pub(crate) fn allocate_id(&mut self) -> Result<ObjectId, CatalogError> {
        let id = ObjectId(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or(CatalogError::ObjectIdsExhausted)?;
        Ok(id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
