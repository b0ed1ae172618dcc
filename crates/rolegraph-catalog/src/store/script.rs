//! DDL rendering of catalog contents.

use crate::{
    errors::CatalogError,
    object::ObjectId,
    right::{Right, RightTarget},
    sql::{self, SqlFlags},
};

impl super::Catalog {
    /// CREATE/GRANT statement for any catalog object.
    ///
    /// `Ok(None)` for system roles and for schema objects, whose DDL is
    /// owned by the table metadata layer.
    pub fn create_sql(&self, id: ObjectId) -> Result<Option<String>, CatalogError> {
        if let Some(grantee) = self.grantees.get(&id) {
            return Ok(grantee.create_sql(false));
        }
        if let Some(right) = self.rights.get(&id) {
            return self.right_create_sql(right).map(Some);
        }
        if self.objects.contains_key(&id) {
            return Ok(None);
        }
        Err(CatalogError::ObjectNotFound(id))
    }

    /// Render the GRANT statement that recreates `right`.
    pub fn right_create_sql(&self, right: &Right) -> Result<String, CatalogError> {
        let grantee = self.grantees.get(&right.grantee()).ok_or_else(|| {
            CatalogError::Inconsistent(format!(
                "right {} is held by unknown grantee {}",
                right.id(),
                right.grantee()
            ))
        })?;

        let mut builder = String::from("GRANT ");
        match right.target() {
            RightTarget::Database => {
                builder.push_str(&right.privileges().to_string());
            }
            RightTarget::Object(id) => {
                let object = self.objects.get(&id).ok_or_else(|| {
                    CatalogError::Inconsistent(format!("right {} targets unknown object {}", right.id(), id))
                })?;
                builder.push_str(&right.privileges().to_string());
                builder.push_str(" ON ");
                builder.push_str(&object.grant_target_sql());
            }
            RightTarget::Role(id) => {
                let role = self.grantees.get(&id).ok_or_else(|| {
                    CatalogError::Inconsistent(format!("right {} targets unknown role {}", right.id(), id))
                })?;
                builder.push_str(&sql::quote_identifier(role.name(), SqlFlags::DEFAULT));
            }
        }
        builder.push_str(" TO ");
        builder.push_str(&sql::quote_identifier(grantee.name(), SqlFlags::DEFAULT));
        Ok(builder)
    }

    /// The catalog as an ordered script: users, roles, then rights.
    ///
    /// Membership rights come before object rights so that replaying the
    /// script never references a role before it is granted.
    pub fn script(&self) -> Result<Vec<String>, CatalogError> {
        let mut statements: Vec<String> = self
            .all_users()
            .iter()
            .chain(self.all_roles().iter())
            .filter_map(|g| g.create_sql(false))
            .collect();

        let (memberships, others): (Vec<&Right>, Vec<&Right>) =
            self.rights.values().partition(|r| r.is_membership());
        for right in memberships.into_iter().chain(others) {
            statements.push(self.right_create_sql(right)?);
        }
        Ok(statements)
    }
}
