//! Grantees: the users and roles that can hold rights.

use std::collections::HashMap;

use crate::{role, user, CatalogError, ObjectId, ObjectKind, RightTarget, SqlFlags};

/// Variant-specific data of a grantee.
#[derive(Debug, Clone, PartialEq)]
pub enum GranteeKind {
    User {
        admin: bool,
        /// Argon2 PHC string; `None` means the user cannot log in with a password
        password_hash: Option<String>,
    },
    Role {
        /// Built-in role (PUBLIC); never persisted as DDL and never dropped
        system: bool,
    },
}

/// A user or role.
///
/// The grantee's right map holds at most one right id per target; the
/// rights themselves live in the catalog. Once [`Grantee::invalidate`] has
/// run the value is a tombstone and every mutation fails with
/// [`CatalogError::InvalidState`].
#[derive(Debug, Clone, PartialEq)]
pub struct Grantee {
    id: ObjectId,
    name: String,
    kind: GranteeKind,
    rights: HashMap<RightTarget, ObjectId>,
    valid: bool,
}

impl Grantee {
    pub(crate) fn new_user(
        id: ObjectId,
        name: String,
        admin: bool,
        password_hash: Option<String>,
    ) -> Self {
        Grantee {
            id,
            name,
            kind: GranteeKind::User { admin, password_hash },
            rights: HashMap::new(),
            valid: true,
        }
    }

    pub(crate) fn new_role(id: ObjectId, name: String, system: bool) -> Self {
        Grantee { id, name, kind: GranteeKind::Role { system }, rights: HashMap::new(), valid: true }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &GranteeKind {
        &self.kind
    }

    pub fn is_role(&self) -> bool {
        matches!(self.kind, GranteeKind::Role { .. })
    }

    pub fn is_user(&self) -> bool {
        matches!(self.kind, GranteeKind::User { .. })
    }

    pub fn is_system_role(&self) -> bool {
        matches!(self.kind, GranteeKind::Role { system: true })
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.kind, GranteeKind::User { admin: true, .. })
    }

    pub fn password_hash(&self) -> Option<&str> {
        match &self.kind {
            GranteeKind::User { password_hash, .. } => password_hash.as_deref(),
            GranteeKind::Role { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Catalog object-kind discriminator
    pub fn type_tag(&self) -> ObjectKind {
        match self.kind {
            GranteeKind::User { .. } => ObjectKind::User,
            GranteeKind::Role { .. } => ObjectKind::Role,
        }
    }

    /// Id of the right this grantee holds on `target`, if any
    pub fn right_for_target(&self, target: &RightTarget) -> Option<ObjectId> {
        self.rights.get(target).copied()
    }

    /// Id of the membership right this grantee holds on `role`, if any
    pub fn right_for_role(&self, role: ObjectId) -> Option<ObjectId> {
        self.right_for_target(&RightTarget::Role(role))
    }

    /// Targets and right ids directly held by this grantee
    pub fn rights(&self) -> impl Iterator<Item = (RightTarget, ObjectId)> + '_ {
        self.rights.iter().map(|(target, id)| (*target, *id))
    }

    pub fn right_count(&self) -> usize {
        self.rights.len()
    }

    /// Record that this grantee holds right `right` on `target`.
    ///
    /// Re-recording the same pair is a no-op. A second, different right for
    /// the same target would be a duplicate edge and is refused.
    pub fn grant_right(&mut self, target: RightTarget, right: ObjectId) -> Result<(), CatalogError> {
        self.ensure_valid()?;
        match self.rights.get(&target) {
            Some(existing) if *existing == right => Ok(()),
            Some(existing) => Err(CatalogError::Internal(format!(
                "'{}' already holds right {} on {}, refusing duplicate {}",
                self.name, existing, target, right
            ))),
            None => {
                self.rights.insert(target, right);
                Ok(())
            }
        }
    }

    /// Forget the right held on `target`. Absent rights are not an error.
    pub fn revoke_right(&mut self, target: &RightTarget) -> Result<Option<ObjectId>, CatalogError> {
        self.ensure_valid()?;
        Ok(self.rights.remove(target))
    }

    pub(crate) fn rename(&mut self, new_name: String) -> Result<(), CatalogError> {
        self.ensure_valid()?;
        self.name = new_name;
        Ok(())
    }

    /// Turn this grantee into a tombstone. Called once, at the end of a drop.
    pub fn invalidate(&mut self) {
        self.valid = false;
        self.rights.clear();
    }

    pub fn ensure_valid(&self) -> Result<(), CatalogError> {
        if self.valid {
            Ok(())
        } else {
            Err(CatalogError::InvalidState(self.name.clone()))
        }
    }

    /// CREATE statement for this grantee, `None` for system roles.
    pub fn create_sql(&self, if_not_exists: bool) -> Option<String> {
        match &self.kind {
            GranteeKind::Role { system } => role::create_sql(&self.name, *system, if_not_exists),
            GranteeKind::User { admin, password_hash } => Some(user::create_sql(
                &self.name,
                *admin,
                password_hash.as_deref(),
                if_not_exists,
            )),
        }
    }

    /// Grantees cannot be copied like a table's structure; reaching this is
    /// a caller bug.
    pub fn create_sql_for_copy(&self, table: &str, quoted_name: &str) -> Result<String, CatalogError> {
        Err(CatalogError::Internal(format!(
            "cannot render copy DDL of {} {} for table {} as {}",
            self.type_tag(),
            self.sql_name(),
            table,
            quoted_name
        )))
    }

    /// Quoted name under the default rendering flags
    pub fn sql_name(&self) -> String {
        crate::sql::quote_identifier(&self.name, SqlFlags::DEFAULT)
    }
}
