//! Rebuilding a catalog from persisted entries.
//!
//! Restored entries keep their ids. Each call validates what it can so a
//! damaged file surfaces as [`CatalogError::Inconsistent`] instead of a
//! catalog that violates its own invariants.

use crate::{
    errors::CatalogError,
    grantee::Grantee,
    object::{ObjectId, ObjectKind},
    privilege::Privileges,
    right::{Right, RightTarget},
    schema_object::SchemaObject,
};

impl super::Catalog {
    pub fn restore_role(&mut self, id: ObjectId, name: String) -> Result<(), CatalogError> {
        self.restore_grantee(Grantee::new_role(id, name, false))
    }

    pub fn restore_user(
        &mut self,
        id: ObjectId,
        name: String,
        admin: bool,
        password_hash: Option<String>,
    ) -> Result<(), CatalogError> {
        self.restore_grantee(Grantee::new_user(id, name, admin, password_hash))
    }

    pub fn restore_schema(&mut self, id: ObjectId, name: String) -> Result<(), CatalogError> {
        self.restore_object(SchemaObject::new_schema(id, name))
    }

    pub fn restore_table(&mut self, id: ObjectId, schema: String, name: String) -> Result<(), CatalogError> {
        self.restore_object(SchemaObject::new_table(id, schema, name))
    }

    /// Restore a right. Holder and target must already be restored.
    pub fn restore_right(
        &mut self,
        id: ObjectId,
        grantee: ObjectId,
        target: RightTarget,
        privileges: Privileges,
    ) -> Result<(), CatalogError> {
        self.check_unused(id)?;
        if privileges.is_empty() {
            return Err(CatalogError::Inconsistent(format!("right {} has an empty mask", id)));
        }
        self.check_target(target, privileges).map_err(|e| {
            CatalogError::Inconsistent(format!("right {} on {}: {}", id, target, e))
        })?;
        let holder = self.grantees.get_mut(&grantee).ok_or_else(|| {
            CatalogError::Inconsistent(format!("right {} is held by unknown grantee {}", id, grantee))
        })?;
        if holder.right_for_target(&target).is_some() {
            return Err(CatalogError::Inconsistent(format!(
                "{} holds more than one right on {}",
                holder.name(),
                target
            )));
        }
        holder.grant_right(target, id)?;
        self.rights.insert(id, Right::new(id, grantee, target, privileges));
        self.bump_next_id(id)
    }

    /// Restore the id counter; it never moves backwards.
    pub fn set_next_object_id(&mut self, next: u32) {
        self.next_id = self.next_id.max(next);
    }

    fn restore_grantee(&mut self, grantee: Grantee) -> Result<(), CatalogError> {
        let id = grantee.id();
        self.check_unused(id)?;
        self.check_normalized(grantee.name())?;
        if self.grantee_names.contains_key(grantee.name()) {
            return Err(CatalogError::Inconsistent(format!("duplicate grantee name {}", grantee.name())));
        }
        self.grantee_names.insert(grantee.name().to_string(), id);
        self.grantees.insert(id, grantee);
        self.bump_next_id(id)
    }

    fn restore_object(&mut self, object: SchemaObject) -> Result<(), CatalogError> {
        let id = object.id();
        self.check_unused(id)?;
        self.check_normalized(object.name())?;
        if let Some(schema) = object.schema() {
            if !self.object_names.contains_key(&(ObjectKind::Schema, schema.to_string())) {
                return Err(CatalogError::Inconsistent(format!(
                    "table {} belongs to unknown schema {}",
                    object.qualified_name(),
                    schema
                )));
            }
        }
        let key = (object.type_tag(), object.qualified_name());
        if self.object_names.contains_key(&key) {
            return Err(CatalogError::Inconsistent(format!("duplicate object {}", key.1)));
        }
        self.object_names.insert(key, id);
        self.objects.insert(id, object);
        self.bump_next_id(id)
    }

    fn check_unused(&self, id: ObjectId) -> Result<(), CatalogError> {
        if self.grantees.contains_key(&id) || self.rights.contains_key(&id) || self.objects.contains_key(&id) {
            return Err(CatalogError::Inconsistent(format!("id {} is used twice", id)));
        }
        Ok(())
    }

    /// Names are stored folded; anything else could never be looked up.
    fn check_normalized(&self, name: &str) -> Result<(), CatalogError> {
        if self.normalize_identifier(name) != name {
            return Err(CatalogError::Inconsistent(format!("name {} is not normalized", name)));
        }
        Ok(())
    }

    fn bump_next_id(&mut self, id: ObjectId) -> Result<(), CatalogError> {
        let next = id
            .0
            .checked_add(1)
            .ok_or_else(|| CatalogError::Inconsistent(format!("id {} leaves no room for new objects", id)))?;
        self.next_id = self.next_id.max(next);
        Ok(())
    }
}
