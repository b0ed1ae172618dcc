use crate::ObjectId;

/// Errors returned by catalog operations.
///
/// `InvalidState`, `Internal` and `Inconsistent` indicate a caller bug or a
/// damaged catalog rather than a condition a user can fix with different SQL.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Role '{0}' already exists")]
    RoleAlreadyExists(String),
    #[error("Role '{0}' not found")]
    RoleNotFound(String),
    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),
    #[error("User '{0}' not found")]
    UserNotFound(String),
    #[error("Name '{0}' is already used by another user or role")]
    GranteeNameInUse(String),
    #[error("Object with id {0} not found")]
    ObjectNotFound(ObjectId),
    #[error("Table '{0}' already exists")]
    TableAlreadyExists(String),
    #[error("Table '{0}' not found")]
    TableNotFound(String),
    #[error("Schema '{0}' already exists")]
    SchemaAlreadyExists(String),
    #[error("Schema '{0}' not found")]
    SchemaNotFound(String),
    #[error("Schema '{0}' is not empty")]
    SchemaNotEmpty(String),
    #[error("Cannot drop system schema '{0}'")]
    CannotDropSystemSchema(String),
    #[error("Cannot drop system role '{0}'")]
    CannotDropSystemRole(String),
    #[error("Cannot alter system role '{0}'")]
    CannotAlterSystemRole(String),
    #[error("Role PUBLIC is held implicitly by every grantee and cannot be granted")]
    CannotGrantPublic,
    #[error("Granting role '{role}' to '{grantee}' would create a cycle")]
    RoleCycle { role: String, grantee: String },
    #[error("Privilege set must not be empty")]
    EmptyPrivileges,
    #[error("Privileges {privileges} cannot be granted on {target}")]
    InvalidPrivileges { privileges: String, target: String },
    #[error("'{0}' has been dropped and can no longer be used")]
    InvalidState(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Catalog is inconsistent: {0}")]
    Inconsistent(String),
    #[error("Object id space is exhausted")]
    ObjectIdsExhausted,
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl CatalogError {
    /// True for errors that signal a programming error or catalog damage.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidState(_) | CatalogError::Internal(_) | CatalogError::Inconsistent(_)
        )
    }
}
