//! Name resolution shared by GRANT and REVOKE.

use rolegraph_ast::{ObjectType, PrivilegeType};
use rolegraph_catalog::{CatalogError, ObjectId, Privileges, RightTarget};
use rolegraph_storage::Database;

use crate::errors::ExecutorError;

/// Resolve the object a GRANT/REVOKE names.
pub(crate) fn resolve_target(
    db: &Database,
    object_type: ObjectType,
    object_name: &str,
) -> Result<RightTarget, ExecutorError> {
    match object_type {
        ObjectType::Database => Ok(RightTarget::Database),
        ObjectType::Table => db
            .catalog
            .find_table(object_name)
            .map(|t| RightTarget::Object(t.id()))
            .ok_or_else(|| CatalogError::TableNotFound(object_name.to_string()).into()),
        ObjectType::Schema => db
            .catalog
            .find_schema(object_name)
            .map(|s| RightTarget::Object(s.id()))
            .ok_or_else(|| {
                CatalogError::SchemaNotFound(db.catalog.normalize_identifier(object_name)).into()
            }),
    }
}

/// Fold the statement's privilege list into a mask valid for `object_type`.
pub(crate) fn privilege_mask(
    privileges: &[PrivilegeType],
    object_type: ObjectType,
) -> Result<Privileges, ExecutorError> {
    let mut mask = Privileges::empty();
    for privilege in privileges {
        let bits = match (privilege, object_type) {
            (PrivilegeType::AlterAnySchema, ObjectType::Database) => Privileges::ALTER_ANY_SCHEMA,
            (PrivilegeType::AlterAnySchema, _) => {
                return Err(ExecutorError::InvalidStatement(
                    "ALTER ANY SCHEMA is granted on the database, not on an object".to_string(),
                ))
            }
            (_, ObjectType::Database) => {
                return Err(ExecutorError::InvalidStatement(format!(
                    "{:?} needs a table or schema",
                    privilege
                )))
            }
            (PrivilegeType::Select, _) => Privileges::SELECT,
            (PrivilegeType::Insert, _) => Privileges::INSERT,
            (PrivilegeType::Update, _) => Privileges::UPDATE,
            (PrivilegeType::Delete, _) => Privileges::DELETE,
            (PrivilegeType::AllPrivileges, _) => Privileges::ALL,
        };
        mask |= bits;
    }
    if mask.is_empty() {
        return Err(CatalogError::EmptyPrivileges.into());
    }
    Ok(mask)
}

/// Resolve a user or role by name.
pub(crate) fn resolve_grantee(db: &Database, name: &str) -> Result<ObjectId, ExecutorError> {
    db.catalog
        .find_grantee(name)
        .map(|g| g.id())
        .ok_or_else(|| ExecutorError::GranteeNotFound(db.catalog.normalize_identifier(name)))
}

/// Resolve a role by name.
pub(crate) fn resolve_role(db: &Database, name: &str) -> Result<ObjectId, ExecutorError> {
    db.catalog
        .find_role(name)
        .map(|r| r.id())
        .ok_or_else(|| CatalogError::RoleNotFound(db.catalog.normalize_identifier(name)).into())
}
