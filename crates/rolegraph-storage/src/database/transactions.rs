// ============================================================================
// Transaction Management
// ============================================================================

use rolegraph_catalog::Catalog;

use crate::StorageError;

/// A savepoint within a transaction
#[derive(Debug, Clone)]
pub struct Savepoint {
    pub name: String,
    /// Catalog as it was when the savepoint was created
    catalog: Catalog,
}

/// Transaction state
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum TransactionState {
    /// No active transaction
    None,
    /// Transaction is active
    Active {
        /// Transaction ID for debugging
        id: u64,
        /// Session that opened the transaction, if any
        owner: Option<u64>,
        /// Original catalog snapshot for full rollback
        original_catalog: Catalog,
        /// Stack of savepoints (newest at end)
        savepoints: Vec<Savepoint>,
    },
}

/// Transaction manager - handles transaction lifecycle and savepoint operations
///
/// Catalog changes are applied in place; rollback swaps the snapshot taken at
/// `begin_transaction` (or at a savepoint) back in. A role invalidated inside
/// a rolled-back transaction is therefore valid again, since the snapshot
/// still holds the untouched value. The id counter is the one thing rollback
/// never rewinds.
#[derive(Debug, Clone)]
pub struct TransactionManager {
    /// Current transaction state
    transaction_state: TransactionState,
    /// Next transaction ID
    next_transaction_id: u64,
}

impl TransactionManager {
    /// Create a new transaction manager
    pub fn new() -> Self {
        TransactionManager { transaction_state: TransactionState::None, next_transaction_id: 1 }
    }

    /// Begin a new transaction
    pub fn begin_transaction(&mut self, catalog: &Catalog, owner: Option<u64>) -> Result<(), StorageError> {
        match self.transaction_state {
            TransactionState::None => {
                let transaction_id = self.next_transaction_id;
                self.next_transaction_id += 1;

                self.transaction_state = TransactionState::Active {
                    id: transaction_id,
                    owner,
                    original_catalog: catalog.clone(),
                    savepoints: Vec::new(),
                };
                log::debug!("Began transaction {}", transaction_id);
                Ok(())
            }
            TransactionState::Active { .. } => {
                Err(StorageError::TransactionError("Transaction already active".to_string()))
            }
        }
    }

    /// Commit the current transaction
    pub fn commit_transaction(&mut self) -> Result<(), StorageError> {
        match self.transaction_state {
            TransactionState::None => {
                Err(StorageError::TransactionError("No active transaction to commit".to_string()))
            }
            TransactionState::Active { id, .. } => {
                // Changes are already in the catalog
                self.transaction_state = TransactionState::None;
                log::debug!("Committed transaction {}", id);
                Ok(())
            }
        }
    }

    /// Rollback the current transaction
    pub fn rollback_transaction(&mut self, catalog: &mut Catalog) -> Result<(), StorageError> {
        let state = std::mem::replace(&mut self.transaction_state, TransactionState::None);
        match state {
            TransactionState::None => {
                Err(StorageError::TransactionError("No active transaction to rollback".to_string()))
            }
            TransactionState::Active { id, original_catalog, .. } => {
                restore_snapshot(catalog, original_catalog);
                log::debug!("Rolled back transaction {}", id);
                Ok(())
            }
        }
    }

    /// Check if we're currently in a transaction
    pub fn in_transaction(&self) -> bool {
        matches!(self.transaction_state, TransactionState::Active { .. })
    }

    /// Get current transaction ID (for debugging)
    pub fn transaction_id(&self) -> Option<u64> {
        match &self.transaction_state {
            TransactionState::Active { id, .. } => Some(*id),
            TransactionState::None => None,
        }
    }

    /// Session that owns the current transaction
    pub fn transaction_owner(&self) -> Option<u64> {
        match &self.transaction_state {
            TransactionState::Active { owner, .. } => *owner,
            TransactionState::None => None,
        }
    }

    /// Create a savepoint within the current transaction
    pub fn create_savepoint(&mut self, name: String, catalog: &Catalog) -> Result<(), StorageError> {
        match &mut self.transaction_state {
            TransactionState::None => {
                Err(StorageError::TransactionError("No active transaction".to_string()))
            }
            TransactionState::Active { savepoints, .. } => {
                savepoints.push(Savepoint { name, catalog: catalog.clone() });
                Ok(())
            }
        }
    }

    /// Rollback to a named savepoint, keeping the savepoint itself
    pub fn rollback_to_savepoint(&mut self, name: &str, catalog: &mut Catalog) -> Result<(), StorageError> {
        match &mut self.transaction_state {
            TransactionState::None => {
                Err(StorageError::TransactionError("No active transaction".to_string()))
            }
            TransactionState::Active { savepoints, .. } => {
                let savepoint_idx = savepoints.iter().rposition(|sp| sp.name == name).ok_or_else(|| {
                    StorageError::TransactionError(format!("Savepoint '{}' not found", name))
                })?;

                // Destroy later savepoints
                savepoints.truncate(savepoint_idx + 1);
                restore_snapshot(catalog, savepoints[savepoint_idx].catalog.clone());
                Ok(())
            }
        }
    }

    /// Release (destroy) a named savepoint and every later one
    pub fn release_savepoint(&mut self, name: &str) -> Result<(), StorageError> {
        match &mut self.transaction_state {
            TransactionState::None => {
                Err(StorageError::TransactionError("No active transaction".to_string()))
            }
            TransactionState::Active { savepoints, .. } => {
                let savepoint_idx = savepoints.iter().rposition(|sp| sp.name == name).ok_or_else(|| {
                    StorageError::TransactionError(format!("Savepoint '{}' not found", name))
                })?;
                savepoints.truncate(savepoint_idx);
                Ok(())
            }
        }
    }
}

/// Swap `snapshot` in, keeping the live id counter so ids handed out since
/// the snapshot are never reused.
fn restore_snapshot(catalog: &mut Catalog, snapshot: Catalog) {
    let next_id = catalog.next_object_id();
    *catalog = snapshot;
    catalog.set_next_object_id(next_id);
}

impl Default for TransactionManager {
    fn default() -> Self {
        Self::new()
    }
}
