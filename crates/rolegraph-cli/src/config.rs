use std::{fs, path::PathBuf};

use rolegraph_storage::DatabaseConfig;
use serde::{Deserialize, Serialize};

/// rolegraph configuration loaded from ~/.rolegraphrc
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file used when --catalog is not given
    #[serde(default = "default_catalog_path")]
    pub path: String,

    /// Keep identifier case for newly created catalogs
    #[serde(default)]
    pub case_sensitive_identifiers: bool,

    /// User to act as when --user is not given
    #[serde(default)]
    pub admin_user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecurityConfig {
    /// Require an admin user for every DDL statement
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_catalog_path() -> String {
    "rolegraph.json".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig { path: default_catalog_path(), case_sensitive_identifiers: false, admin_user: None }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: default_log_level() }
    }
}

impl Config {
    /// Load configuration from ~/.rolegraphrc
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            // No config file, use defaults
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    /// Get the configuration file path (~/.rolegraphrc)
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(home.join(".rolegraphrc"))
    }

    /// Database options, with `user` overriding the configured admin user
    pub fn database_config(&self, user: Option<String>) -> DatabaseConfig {
        DatabaseConfig {
            case_sensitive_identifiers: self.catalog.case_sensitive_identifiers,
            security_enabled: self.security.enabled,
            current_user: user.or_else(|| self.catalog.admin_user.clone()),
        }
    }
}
