//! Grant, revoke and privilege resolution operations for the catalog.
//!
//! At most one right exists per (grantee, target) pair. Granting again
//! widens the existing right's mask; revoking narrows it and removes the
//! right once nothing is left.

use std::collections::{HashSet, VecDeque};

use crate::{
    errors::CatalogError,
    object::ObjectId,
    privilege::Privileges,
    right::{Right, RightTarget},
    role::PUBLIC_ROLE_ID,
};

impl super::Catalog {
    pub fn right(&self, id: ObjectId) -> Option<&Right> {
        self.rights.get(&id)
    }

    /// Every right, ordered by id.
    pub fn all_rights(&self) -> Vec<&Right> {
        self.rights.values().collect()
    }

    /// Every right whose target is `target`.
    pub fn rights_on_target(&self, target: RightTarget) -> Vec<&Right> {
        self.rights.values().filter(|r| r.target() == target).collect()
    }

    /// The right `grantee` holds on `target`, if any.
    pub fn right_for_target(&self, grantee: ObjectId, target: RightTarget) -> Option<&Right> {
        self.grantees
            .get(&grantee)
            .and_then(|g| g.right_for_target(&target))
            .and_then(|id| self.rights.get(&id))
    }

    /// The membership right `grantee` holds on `role`, if any.
    pub fn right_for_role(&self, grantee: ObjectId, role: ObjectId) -> Option<&Right> {
        self.right_for_target(grantee, RightTarget::Role(role))
    }

    /// Grant `privileges` on `target` to `grantee`, merging with any existing
    /// right for the pair. Returns the id of the (possibly pre-existing) right.
    pub fn grant_right(
        &mut self,
        grantee: ObjectId,
        target: RightTarget,
        privileges: Privileges,
    ) -> Result<ObjectId, CatalogError> {
        if privileges.is_empty() {
            return Err(CatalogError::EmptyPrivileges);
        }
        let holder = self.grantees.get(&grantee).ok_or(CatalogError::ObjectNotFound(grantee))?;
        holder.ensure_valid()?;
        self.check_target(target, privileges)?;

        if let Some(right_id) = holder.right_for_target(&target) {
            let right = self.rights.get_mut(&right_id).ok_or_else(|| {
                CatalogError::Inconsistent(format!(
                    "grantee {} maps {} to missing right {}",
                    grantee, target, right_id
                ))
            })?;
            right.set_privileges(right.privileges() | privileges);
            log::debug!("Merged {} into right {} on {}", privileges, right_id, target);
            return Ok(right_id);
        }

        let id = self.allocate_id()?;
        self.grantee_mut(grantee)?.grant_right(target, id)?;
        self.rights.insert(id, Right::new(id, grantee, target, privileges));
        log::debug!("Granted {} on {} to {} as right {}", privileges, target, grantee, id);
        Ok(id)
    }

    /// Remove the right `grantee` holds on `target`.
    ///
    /// Returns `Ok(false)` when there was nothing to revoke.
    pub fn revoke_right(&mut self, grantee: ObjectId, target: RightTarget) -> Result<bool, CatalogError> {
        let holder = self.grantees.get(&grantee).ok_or(CatalogError::ObjectNotFound(grantee))?;
        holder.ensure_valid()?;
        match holder.right_for_target(&target) {
            Some(right_id) => self.remove_database_object(right_id),
            None => {
                log::warn!("{} holds no right on {}, nothing to revoke", holder.name(), target);
                Ok(false)
            }
        }
    }

    /// Remove `privileges` from the right `grantee` holds on `target`,
    /// dropping the right when its mask becomes empty.
    pub fn revoke_privileges(
        &mut self,
        grantee: ObjectId,
        target: RightTarget,
        privileges: Privileges,
    ) -> Result<bool, CatalogError> {
        let Some(existing) = self.right_for_target(grantee, target) else {
            return self.revoke_right(grantee, target);
        };
        let right_id = existing.id();
        let remaining = existing.privileges().difference(privileges);
        if remaining == existing.privileges() {
            return Ok(false);
        }
        if remaining.is_empty() {
            return self.remove_database_object(right_id);
        }
        if let Some(right) = self.rights.get_mut(&right_id) {
            right.set_privileges(remaining);
        }
        Ok(true)
    }

    /// Make `grantee` a member of `role`.
    ///
    /// Returns `Ok(None)` when the role is already held, directly or through
    /// another role. Grants that would make the membership graph cyclic are
    /// refused, which also rules out a role holding itself.
    pub fn grant_role(&mut self, grantee: ObjectId, role: ObjectId) -> Result<Option<ObjectId>, CatalogError> {
        if role == PUBLIC_ROLE_ID {
            return Err(CatalogError::CannotGrantPublic);
        }
        let holder = self.grantees.get(&grantee).ok_or(CatalogError::ObjectNotFound(grantee))?;
        let granted = self.grantees.get(&role).ok_or(CatalogError::ObjectNotFound(role))?;
        if !granted.is_role() {
            return Err(CatalogError::RoleNotFound(granted.name().to_string()));
        }
        holder.ensure_valid()?;
        granted.ensure_valid()?;

        if grantee != role && self.is_role_granted(grantee, role) {
            log::debug!("{} already holds role {}", holder.name(), granted.name());
            return Ok(None);
        }
        if holder.is_role() && self.is_role_granted(role, grantee) {
            return Err(CatalogError::RoleCycle {
                role: granted.name().to_string(),
                grantee: holder.name().to_string(),
            });
        }

        self.grant_right(grantee, RightTarget::Role(role), Privileges::ROLE_MEMBERSHIP).map(Some)
    }

    /// End `grantee`'s direct membership in `role`.
    pub fn revoke_role(&mut self, grantee: ObjectId, role: ObjectId) -> Result<bool, CatalogError> {
        self.revoke_right(grantee, RightTarget::Role(role))
    }

    /// True if `grantee` is `role`, or holds it directly or transitively.
    /// Every grantee holds PUBLIC.
    pub fn is_role_granted(&self, grantee: ObjectId, role: ObjectId) -> bool {
        if grantee == role || role == PUBLIC_ROLE_ID {
            return true;
        }
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([grantee]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(holder) = self.grantees.get(&current) else {
                continue;
            };
            for (target, _) in holder.rights() {
                if let RightTarget::Role(held) = target {
                    if held == role {
                        return true;
                    }
                    queue.push_back(held);
                }
            }
        }
        false
    }

    /// True if `grantee` may exercise all of `privileges` on `target`.
    ///
    /// Admin users pass unconditionally. Otherwise some single right held by
    /// the grantee, by a role it holds, or by PUBLIC must cover the mask.
    pub fn has_privilege(&self, grantee: ObjectId, target: RightTarget, privileges: Privileges) -> bool {
        let Some(holder) = self.grantees.get(&grantee) else {
            return false;
        };
        if holder.is_admin() {
            return true;
        }

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([grantee, PUBLIC_ROLE_ID]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            let Some(holder) = self.grantees.get(&current) else {
                continue;
            };
            if let Some(right) = holder.right_for_target(&target).and_then(|id| self.rights.get(&id)) {
                if right.privileges().contains(privileges) {
                    return true;
                }
            }
            for (held, _) in holder.rights() {
                if let RightTarget::Role(role) = held {
                    queue.push_back(role);
                }
            }
        }
        false
    }

    pub(super) fn check_target(&self, target: RightTarget, privileges: Privileges) -> Result<(), CatalogError> {
        let allowed = match target {
            RightTarget::Database => Privileges::ALTER_ANY_SCHEMA,
            RightTarget::Object(id) => {
                if !self.objects.contains_key(&id) {
                    return Err(CatalogError::ObjectNotFound(id));
                }
                Privileges::OBJECT_PRIVILEGES
            }
            RightTarget::Role(id) => {
                let role = self.grantees.get(&id).ok_or(CatalogError::ObjectNotFound(id))?;
                if !role.is_role() {
                    return Err(CatalogError::RoleNotFound(role.name().to_string()));
                }
                role.ensure_valid()?;
                if privileges != Privileges::ROLE_MEMBERSHIP {
                    return Err(CatalogError::InvalidPrivileges {
                        privileges: privileges.to_string(),
                        target: format!("role {}", role.name()),
                    });
                }
                return Ok(());
            }
        };

        if allowed.contains(privileges) {
            Ok(())
        } else {
            Err(CatalogError::InvalidPrivileges {
                privileges: privileges.to_string(),
                target: self.describe_target(target),
            })
        }
    }

    /// Human-readable target name for messages
    pub fn describe_target(&self, target: RightTarget) -> String {
        match target {
            RightTarget::Database => "DATABASE".to_string(),
            RightTarget::Object(id) => self
                .objects
                .get(&id)
                .map(|o| format!("{} {}", o.type_tag(), o.qualified_name()))
                .unwrap_or_else(|| target.to_string()),
            RightTarget::Role(id) => self
                .grantees
                .get(&id)
                .map(|g| format!("ROLE {}", g.name()))
                .unwrap_or_else(|| target.to_string()),
        }
    }
}
