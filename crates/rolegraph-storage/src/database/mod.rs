// ============================================================================
// Database - catalog plus transaction and session state
// ============================================================================

mod session;
mod transactions;

#[cfg(test)]
mod tests;

pub use session::Session;
pub use transactions::{Savepoint, TransactionManager, TransactionState};

use rolegraph_catalog::Catalog;

use crate::{DatabaseConfig, StorageError};

/// In-memory authorization database
#[derive(Debug, Clone)]
pub struct Database {
    /// Public catalog access
    pub catalog: Catalog,
    transaction_manager: TransactionManager,
    current_user: Option<String>,
    security_enabled: bool,
}

impl Database {
    /// Create a new database holding only the built-in catalog entries
    ///
    /// Note: Security is disabled by default. Call `enable_security()` to turn
    /// on admin checks for DDL.
    pub fn new() -> Self {
        Database {
            catalog: Catalog::new(),
            transaction_manager: TransactionManager::new(),
            current_user: None,
            security_enabled: false,
        }
    }

    pub fn with_config(config: &DatabaseConfig) -> Self {
        let mut db = Database::new();
        db.apply_config(config);
        db
    }

    /// Apply session-level options; the catalog contents are left alone.
    pub fn apply_config(&mut self, config: &DatabaseConfig) {
        self.catalog.set_case_sensitive_identifiers(config.case_sensitive_identifiers);
        self.security_enabled = config.security_enabled;
        self.current_user = config.current_user.clone();
    }

    /// Reset the database to empty state.
    ///
    /// Clears the catalog back to its built-in entries and drops any open
    /// transaction. Identifier case mode and security settings are kept.
    pub fn reset(&mut self) {
        let case_sensitive = self.catalog.is_case_sensitive_identifiers();
        self.catalog = Catalog::new();
        self.catalog.set_case_sensitive_identifiers(case_sensitive);
        self.transaction_manager = TransactionManager::new();
    }

    // ============================================================================
    // Transaction Management
    // ============================================================================

    /// Begin a new transaction
    pub fn begin_transaction(&mut self) -> Result<(), StorageError> {
        self.transaction_manager.begin_transaction(&self.catalog, None)
    }

    /// Begin a transaction on behalf of a session
    pub fn begin_session_transaction(&mut self, session_id: u64) -> Result<(), StorageError> {
        self.transaction_manager.begin_transaction(&self.catalog, Some(session_id))
    }

    /// Commit the current transaction
    pub fn commit_transaction(&mut self) -> Result<(), StorageError> {
        self.transaction_manager.commit_transaction()
    }

    /// Rollback the current transaction
    pub fn rollback_transaction(&mut self) -> Result<(), StorageError> {
        self.transaction_manager.rollback_transaction(&mut self.catalog)
    }

    /// Check if we're currently in a transaction
    pub fn in_transaction(&self) -> bool {
        self.transaction_manager.in_transaction()
    }

    /// Get current transaction ID (for debugging)
    pub fn transaction_id(&self) -> Option<u64> {
        self.transaction_manager.transaction_id()
    }

    /// Session that opened the current transaction, if any
    pub fn transaction_owner(&self) -> Option<u64> {
        self.transaction_manager.transaction_owner()
    }

    /// Create a savepoint within the current transaction
    pub fn create_savepoint(&mut self, name: String) -> Result<(), StorageError> {
        self.transaction_manager.create_savepoint(name, &self.catalog)
    }

    /// Rollback to a named savepoint
    pub fn rollback_to_savepoint(&mut self, name: &str) -> Result<(), StorageError> {
        self.transaction_manager.rollback_to_savepoint(name, &mut self.catalog)
    }

    /// Release a named savepoint
    pub fn release_savepoint(&mut self, name: &str) -> Result<(), StorageError> {
        self.transaction_manager.release_savepoint(name)
    }

    // ============================================================================
    // Security
    // ============================================================================

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn set_current_user(&mut self, user: Option<String>) {
        self.current_user = user;
    }

    pub fn is_security_enabled(&self) -> bool {
        self.security_enabled
    }

    pub fn enable_security(&mut self) {
        self.security_enabled = true;
    }

    pub fn disable_security(&mut self) {
        self.security_enabled = false;
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
