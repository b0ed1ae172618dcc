//! Database construction options.

/// Options applied when a [`crate::Database`] is created or loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Keep identifier case instead of folding names to upper case
    pub case_sensitive_identifiers: bool,
    /// Enforce admin checks on DDL
    pub security_enabled: bool,
    /// User the database acts as when no session overrides it
    pub current_user: Option<String>,
}
