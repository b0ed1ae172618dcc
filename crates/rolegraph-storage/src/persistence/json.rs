// ============================================================================
// JSON Format Support (Save/Load Operations)
// ============================================================================

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use rolegraph_catalog::{
    Catalog, ObjectId, ObjectKind, Privileges, RightTarget, PUBLIC_SCHEMA_ID,
};
use serde::{Deserialize, Serialize};

use crate::{Database, StorageError};

pub const FORMAT_VERSION: &str = "1.0";

// ============================================================================
// JSON Schema Structures
// ============================================================================

/// Root JSON document structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonCatalog {
    /// Metadata about the format
    pub rolegraph: JsonMetadata,
    #[serde(default)]
    pub case_sensitive_identifiers: bool,
    /// Next id the catalog will allocate
    pub next_object_id: u32,
    /// Schemas (excluding PUBLIC, which is implicit)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemas: Vec<JsonSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<JsonTable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<JsonUser>,
    /// Roles (excluding system roles)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<JsonRole>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rights: Vec<JsonRight>,
}

/// Format metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonMetadata {
    /// Format version (for future compatibility)
    pub version: String,
    /// Timestamp when exported
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSchema {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonTable {
    pub id: u32,
    pub schema: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonUser {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub admin: bool,
    /// Argon2 PHC string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRole {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRight {
    pub id: u32,
    pub grantee: u32,
    pub target: JsonRightTarget,
    /// Privilege bits
    pub privileges: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum JsonRightTarget {
    Database,
    Object { id: u32 },
    Role { id: u32 },
}

impl From<RightTarget> for JsonRightTarget {
    fn from(target: RightTarget) -> Self {
        match target {
            RightTarget::Database => JsonRightTarget::Database,
            RightTarget::Object(id) => JsonRightTarget::Object { id: id.0 },
            RightTarget::Role(id) => JsonRightTarget::Role { id: id.0 },
        }
    }
}

impl From<JsonRightTarget> for RightTarget {
    fn from(target: JsonRightTarget) -> Self {
        match target {
            JsonRightTarget::Database => RightTarget::Database,
            JsonRightTarget::Object { id } => RightTarget::Object(ObjectId(id)),
            JsonRightTarget::Role { id } => RightTarget::Role(ObjectId(id)),
        }
    }
}

// ============================================================================
// Options for JSON serialization
// ============================================================================

/// Configuration options for JSON export
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Pretty-print the JSON (true) or minified (false)
    pub pretty: bool,
    /// Stamp the export time (false writes the epoch, for reproducible files)
    pub include_timestamp: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions { pretty: true, include_timestamp: true }
    }
}

// ============================================================================
// Database save_json / load_json implementation
// ============================================================================

impl Database {
    /// Save the catalog in JSON format with default options
    ///
    /// # Example
    /// ```no_run
    /// # use rolegraph_storage::Database;
    /// let db = Database::new();
    /// db.save_json("catalog.json").unwrap();
    /// ```
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), StorageError> {
        self.save_json_with_options(path, JsonOptions::default())
    }

    /// Save the catalog in JSON format with custom options
    pub fn save_json_with_options<P: AsRef<Path>>(
        &self,
        path: P,
        options: JsonOptions,
    ) -> Result<(), StorageError> {
        let path = path.as_ref();
        if self.in_transaction() {
            log::warn!(
                "Saving {} while a transaction is open; uncommitted changes are included",
                path.display()
            );
        }
        let json_catalog = catalog_to_json(&self.catalog, options.include_timestamp);

        let json_str = if options.pretty {
            serde_json::to_string_pretty(&json_catalog)
        } else {
            serde_json::to_string(&json_catalog)
        }
        .map_err(|e| StorageError::SerializationError(format!("JSON serialization failed: {}", e)))?;

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(json_str.as_bytes())?;
        writer.flush()?;

        log::info!(
            "Saved catalog to {} ({} users, {} roles, {} rights)",
            path.display(),
            json_catalog.users.len(),
            json_catalog.roles.len(),
            json_catalog.rights.len()
        );
        Ok(())
    }

    /// Load a catalog saved by [`Database::save_json`]
    ///
    /// # Example
    /// ```no_run
    /// # use rolegraph_storage::Database;
    /// let db = Database::load_json("catalog.json").unwrap();
    /// ```
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let json_catalog: JsonCatalog = serde_json::from_reader(reader).map_err(|e| {
            StorageError::SerializationError(format!("JSON deserialization failed: {}", e))
        })?;

        let mut db = Database::new();
        db.catalog = json_to_catalog(json_catalog)?;
        Ok(db)
    }
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Convert a catalog to its JSON representation
pub fn catalog_to_json(catalog: &Catalog, include_timestamp: bool) -> JsonCatalog {
    let timestamp = if include_timestamp {
        chrono::Utc::now()
    } else {
        chrono::DateTime::<chrono::Utc>::default()
    };

    let mut schemas = Vec::new();
    let mut tables = Vec::new();
    for object in catalog.all_schema_objects() {
        match (object.type_tag(), object.schema()) {
            (ObjectKind::Schema, _) if object.id() == PUBLIC_SCHEMA_ID => {}
            (ObjectKind::Schema, _) => {
                schemas.push(JsonSchema { id: object.id().0, name: object.name().to_string() })
            }
            (_, Some(schema)) => tables.push(JsonTable {
                id: object.id().0,
                schema: schema.to_string(),
                name: object.name().to_string(),
            }),
            (_, None) => log::warn!("Skipping table {} without a schema", object.name()),
        }
    }

    let users = catalog
        .all_users()
        .into_iter()
        .map(|user| JsonUser {
            id: user.id().0,
            name: user.name().to_string(),
            admin: user.is_admin(),
            password_hash: user.password_hash().map(str::to_string),
        })
        .collect();

    let roles = catalog
        .all_roles()
        .into_iter()
        .filter(|role| !role.is_system_role())
        .map(|role| JsonRole { id: role.id().0, name: role.name().to_string() })
        .collect();

    let rights = catalog
        .all_rights()
        .into_iter()
        .map(|right| JsonRight {
            id: right.id().0,
            grantee: right.grantee().0,
            target: right.target().into(),
            privileges: right.privileges().bits(),
        })
        .collect();

    JsonCatalog {
        rolegraph: JsonMetadata { version: FORMAT_VERSION.to_string(), timestamp },
        case_sensitive_identifiers: catalog.is_case_sensitive_identifiers(),
        next_object_id: catalog.next_object_id(),
        schemas,
        tables,
        users,
        roles,
        rights,
    }
}

/// Rebuild a catalog from its JSON representation
pub fn json_to_catalog(json: JsonCatalog) -> Result<Catalog, StorageError> {
    if json.rolegraph.version != FORMAT_VERSION {
        return Err(StorageError::CorruptCatalog(format!(
            "unsupported format version {}",
            json.rolegraph.version
        )));
    }

    let mut catalog = Catalog::new();
    catalog.set_case_sensitive_identifiers(json.case_sensitive_identifiers);

    // Holders and targets first, rights last
    for schema in json.schemas {
        catalog.restore_schema(ObjectId(schema.id), schema.name).map_err(corrupt)?;
    }
    for table in json.tables {
        catalog.restore_table(ObjectId(table.id), table.schema, table.name).map_err(corrupt)?;
    }
    for user in json.users {
        catalog
            .restore_user(ObjectId(user.id), user.name, user.admin, user.password_hash)
            .map_err(corrupt)?;
    }
    for role in json.roles {
        catalog.restore_role(ObjectId(role.id), role.name).map_err(corrupt)?;
    }
    for right in json.rights {
        let privileges = Privileges::from_bits(right.privileges).ok_or_else(|| {
            StorageError::CorruptCatalog(format!(
                "right {} has unknown privilege bits {:#x}",
                right.id, right.privileges
            ))
        })?;
        catalog
            .restore_right(ObjectId(right.id), ObjectId(right.grantee), right.target.into(), privileges)
            .map_err(corrupt)?;
    }
    catalog.set_next_object_id(json.next_object_id);

    log::debug!("Restored catalog with {} rights", catalog.all_rights().len());
    Ok(catalog)
}

fn corrupt(e: rolegraph_catalog::CatalogError) -> StorageError {
    StorageError::CorruptCatalog(e.to_string())
}
