//! Drop cascades and the removal primitives they are built from.
//!
//! Every drop removes the edges that reference the dropped object before
//! the object itself is deregistered, so no enumeration can ever observe a
//! right pointing at something that is gone. Atomicity across the steps is
//! the caller's transaction's job; a failed step returns an error and
//! leaves the rollback to it.

use crate::{
    errors::CatalogError,
    grantee::Grantee,
    object::{ObjectId, ObjectKind},
    right::RightTarget,
    schema_object::{SchemaObject, PUBLIC_SCHEMA_ID},
};

impl super::Catalog {
    /// Drop a role and every right that references it.
    ///
    /// Returns the invalidated role. A missing role is reported before
    /// anything changes, as is an attempt to drop a system role.
    pub fn drop_role(&mut self, name: &str) -> Result<Grantee, CatalogError> {
        let role = self
            .find_role(name)
            .ok_or_else(|| CatalogError::RoleNotFound(self.normalize_identifier(name)))?;
        if role.is_system_role() {
            return Err(CatalogError::CannotDropSystemRole(role.name().to_string()));
        }
        let id = role.id();
        self.remove_children_and_resources(id)
    }

    /// Drop a user and every right it holds.
    pub fn drop_user(&mut self, name: &str) -> Result<Grantee, CatalogError> {
        let id = self
            .find_user(name)
            .map(|u| u.id())
            .ok_or_else(|| CatalogError::UserNotFound(self.normalize_identifier(name)))?;
        self.remove_children_and_resources(id)
    }

    /// Cascade entry point for dropping a grantee.
    ///
    /// 1. membership rights users hold on it
    /// 2. membership rights roles hold on it
    /// 3. rights it holds itself
    /// 4. its own catalog entry
    /// 5. invalidation of the removed value
    ///
    /// Steps 1 and 2 only find anything for roles; users are never targets.
    pub fn remove_children_and_resources(&mut self, id: ObjectId) -> Result<Grantee, CatalogError> {
        let grantee = self.grantees.get(&id).ok_or(CatalogError::ObjectNotFound(id))?;
        grantee.ensure_valid()?;
        if grantee.is_system_role() {
            return Err(CatalogError::CannotDropSystemRole(grantee.name().to_string()));
        }
        let name = grantee.name().to_string();
        log::debug!("Dropping {} {} ({})", grantee.type_tag(), name, id);

        let user_edges: Vec<ObjectId> = self
            .all_users()
            .iter()
            .filter_map(|user| user.right_for_role(id))
            .collect();
        for right in &user_edges {
            self.remove_database_object(*right)?;
        }
        log::debug!("{}: removed {} user membership right(s)", name, user_edges.len());

        // A role never holds itself: grant_role refuses cycles.
        debug_assert!(self.right_for_role(id, id).is_none(), "{} holds itself", name);
        let role_edges: Vec<ObjectId> = self
            .all_roles()
            .iter()
            .filter_map(|role| role.right_for_role(id))
            .collect();
        for right in &role_edges {
            self.remove_database_object(*right)?;
        }
        log::debug!("{}: removed {} role membership right(s)", name, role_edges.len());

        let held: Vec<ObjectId> = self
            .all_rights()
            .iter()
            .filter(|right| right.grantee() == id)
            .map(|right| right.id())
            .collect();
        for right in &held {
            self.remove_database_object(*right)?;
        }
        log::debug!("{}: removed {} held right(s)", name, held.len());

        let mut removed = self.remove_meta(id)?;
        removed.invalidate();
        log::info!("Dropped {} {}", removed.type_tag(), name);
        Ok(removed)
    }

    /// Remove a right, or a schema object together with the rights on it.
    ///
    /// Removing a right also detaches it from its holder's right map.
    /// Returns `Ok(false)` when nothing with that id exists, so repeated
    /// calls within one cascade are harmless. Grantees must go through
    /// [`Self::remove_children_and_resources`].
    pub fn remove_database_object(&mut self, id: ObjectId) -> Result<bool, CatalogError> {
        if let Some(right) = self.rights.get(&id) {
            let holder_id = right.grantee();
            let target = right.target();
            let holder = self.grantees.get_mut(&holder_id).ok_or_else(|| {
                CatalogError::Inconsistent(format!(
                    "right {} is held by unknown grantee {}",
                    id, holder_id
                ))
            })?;
            match holder.revoke_right(&target)? {
                Some(detached) if detached == id => {}
                other => {
                    return Err(CatalogError::Inconsistent(format!(
                        "{} maps {} to {:?}, expected right {}",
                        holder.name(),
                        target,
                        other,
                        id
                    )))
                }
            }
            self.rights.remove(&id);
            log::debug!("Removed right {} ({} on {})", id, holder_id, target);
            return Ok(true);
        }

        if self.objects.contains_key(&id) {
            self.drop_schema_object(id)?;
            return Ok(true);
        }

        if self.grantees.contains_key(&id) {
            return Err(CatalogError::Internal(format!(
                "grantee {} must be dropped through its cascade",
                id
            )));
        }
        Ok(false)
    }

    /// Deregister a grantee by id and hand back the removed value.
    ///
    /// Refuses while any right still references the grantee; the cascade
    /// must have removed them first.
    pub fn remove_meta(&mut self, id: ObjectId) -> Result<Grantee, CatalogError> {
        let dangling = self
            .rights
            .values()
            .filter(|r| r.grantee() == id || r.target().refers_to(id))
            .count();
        if dangling > 0 {
            return Err(CatalogError::Internal(format!(
                "{} right(s) still reference {} at deregistration",
                dangling, id
            )));
        }

        let grantee = self.grantees.remove(&id).ok_or(CatalogError::ObjectNotFound(id))?;
        self.grantee_names.remove(grantee.name());
        Ok(grantee)
    }

    /// Drop a table or schema after removing every right that targets it.
    pub fn drop_schema_object(&mut self, id: ObjectId) -> Result<SchemaObject, CatalogError> {
        let object = self.objects.get(&id).ok_or(CatalogError::ObjectNotFound(id))?;
        if id == PUBLIC_SCHEMA_ID {
            return Err(CatalogError::CannotDropSystemSchema(object.name().to_string()));
        }
        if object.type_tag() == ObjectKind::Schema {
            let schema_name = object.name().to_string();
            if self.objects.values().any(|o| o.schema() == Some(schema_name.as_str())) {
                return Err(CatalogError::SchemaNotEmpty(schema_name));
            }
        }

        let dependent: Vec<ObjectId> =
            self.rights_on_target(RightTarget::Object(id)).iter().map(|r| r.id()).collect();
        for right in &dependent {
            self.remove_database_object(*right)?;
        }

        let object = self.objects.remove(&id).ok_or(CatalogError::ObjectNotFound(id))?;
        self.object_names.remove(&(object.type_tag(), object.qualified_name()));
        log::info!(
            "Dropped {} {} and {} right(s) on it",
            object.type_tag(),
            object.qualified_name(),
            dependent.len()
        );
        Ok(object)
    }
}
