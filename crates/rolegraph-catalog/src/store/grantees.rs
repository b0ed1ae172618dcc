//! User and role management operations for the catalog.

use crate::{errors::CatalogError, grantee::Grantee, object::ObjectId, role::PUBLIC_ROLE_ID};

impl super::Catalog {
    /// Create a new role.
    ///
    /// With `if_not_exists`, an existing role of that name is returned
    /// unchanged. A user holding the name is always an error.
    pub fn create_role(&mut self, name: &str, if_not_exists: bool) -> Result<ObjectId, CatalogError> {
        let name = self.normalize_identifier(name);
        if let Some(existing) = self.find_grantee(&name) {
            if existing.is_user() {
                return Err(CatalogError::GranteeNameInUse(name));
            }
            if if_not_exists {
                return Ok(existing.id());
            }
            return Err(CatalogError::RoleAlreadyExists(name));
        }

        let id = self.allocate_id()?;
        self.grantee_names.insert(name.clone(), id);
        self.grantees.insert(id, Grantee::new_role(id, name.clone(), false));
        log::info!("Created role {} ({})", name, id);
        Ok(id)
    }

    /// Create a new user. `password_hash` must already be hashed.
    pub fn create_user(
        &mut self,
        name: &str,
        password_hash: Option<String>,
        admin: bool,
        if_not_exists: bool,
    ) -> Result<ObjectId, CatalogError> {
        let name = self.normalize_identifier(name);
        if let Some(existing) = self.find_grantee(&name) {
            if existing.is_role() {
                return Err(CatalogError::GranteeNameInUse(name));
            }
            if if_not_exists {
                return Ok(existing.id());
            }
            return Err(CatalogError::UserAlreadyExists(name));
        }

        let id = self.allocate_id()?;
        self.grantee_names.insert(name.clone(), id);
        self.grantees.insert(id, Grantee::new_user(id, name.clone(), admin, password_hash));
        log::info!("Created user {} ({}, admin={})", name, id, admin);
        Ok(id)
    }

    /// Look up a user or role by name.
    pub fn find_grantee(&self, name: &str) -> Option<&Grantee> {
        let name = self.normalize_identifier(name);
        self.grantee_names.get(&name).and_then(|id| self.grantees.get(id))
    }

    pub fn find_role(&self, name: &str) -> Option<&Grantee> {
        self.find_grantee(name).filter(|g| g.is_role())
    }

    pub fn find_user(&self, name: &str) -> Option<&Grantee> {
        self.find_grantee(name).filter(|g| g.is_user())
    }

    /// Check if a role exists.
    pub fn role_exists(&self, name: &str) -> bool {
        self.find_role(name).is_some()
    }

    /// Check if a user exists.
    pub fn user_exists(&self, name: &str) -> bool {
        self.find_user(name).is_some()
    }

    pub fn grantee(&self, id: ObjectId) -> Option<&Grantee> {
        self.grantees.get(&id)
    }

    pub(crate) fn grantee_mut(&mut self, id: ObjectId) -> Result<&mut Grantee, CatalogError> {
        self.grantees.get_mut(&id).ok_or(CatalogError::ObjectNotFound(id))
    }

    /// Every user, ordered by id.
    pub fn all_users(&self) -> Vec<&Grantee> {
        self.grantees.values().filter(|g| g.is_user()).collect()
    }

    /// Every role including system roles, ordered by id.
    pub fn all_roles(&self) -> Vec<&Grantee> {
        self.grantees.values().filter(|g| g.is_role()).collect()
    }

    /// List all role names.
    pub fn list_roles(&self) -> Vec<String> {
        self.all_roles().iter().map(|r| r.name().to_string()).collect()
    }

    /// List all user names.
    pub fn list_users(&self) -> Vec<String> {
        self.all_users().iter().map(|u| u.name().to_string()).collect()
    }

    /// Number of users holding the admin flag.
    pub fn admin_count(&self) -> usize {
        self.grantees.values().filter(|g| g.is_admin()).count()
    }

    /// Rename a user or role.
    ///
    /// Rights refer to grantees by id, so no right is touched.
    pub fn rename_grantee(&mut self, id: ObjectId, new_name: &str) -> Result<(), CatalogError> {
        let new_name = self.normalize_identifier(new_name);
        let grantee = self.grantees.get(&id).ok_or(CatalogError::ObjectNotFound(id))?;
        if grantee.is_system_role() || id == PUBLIC_ROLE_ID {
            return Err(CatalogError::CannotAlterSystemRole(grantee.name().to_string()));
        }
        let old_name = grantee.name().to_string();
        if old_name == new_name {
            return Ok(());
        }
        if self.grantee_names.contains_key(&new_name) {
            return Err(CatalogError::GranteeNameInUse(new_name));
        }

        self.grantee_mut(id)?.rename(new_name.clone())?;
        self.grantee_names.remove(&old_name);
        self.grantee_names.insert(new_name.clone(), id);
        log::info!("Renamed {} to {}", old_name, new_name);
        Ok(())
    }
}
