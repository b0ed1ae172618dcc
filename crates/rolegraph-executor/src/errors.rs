use rolegraph_catalog::CatalogError;
use rolegraph_storage::StorageError;

/// Errors returned by statement execution.
///
/// Catalog errors a user can act on pass through as [`ExecutorError::Catalog`];
/// the catalog's bug-level errors become [`ExecutorError::Internal`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExecutorError {
    #[error(transparent)]
    Catalog(CatalogError),
    #[error(transparent)]
    Storage(StorageError),
    #[error("User or role '{0}' not found")]
    GranteeNotFound(String),
    #[error("Permission denied: {user} cannot {action}")]
    PermissionDenied { user: String, action: String },
    #[error("Cannot drop the current user '{0}'")]
    CannotDropSelf(String),
    #[error("Cannot drop '{0}': it is the last admin user")]
    CannotDropLastAdmin(String),
    #[error("{0}")]
    InvalidStatement(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ExecutorError {
    pub fn is_internal(&self) -> bool {
        matches!(self, ExecutorError::Internal(_))
    }
}

impl From<CatalogError> for ExecutorError {
    fn from(e: CatalogError) -> Self {
        if e.is_internal() {
            ExecutorError::Internal(e.to_string())
        } else {
            ExecutorError::Catalog(e)
        }
    }
}

impl From<StorageError> for ExecutorError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Catalog(inner) => inner.into(),
            other => ExecutorError::Storage(other),
        }
    }
}
