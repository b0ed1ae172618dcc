//! User-specific behavior: DDL rendering and password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{sql, CatalogError, SqlFlags};

/// Hash a cleartext password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, CatalogError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CatalogError::PasswordHash(e.to_string()))
}

/// Check a cleartext password against a stored PHC string.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            log::warn!("Stored password hash is not a valid PHC string: {}", e);
            false
        }
    }
}

pub(crate) fn create_sql(
    name: &str,
    admin: bool,
    password_hash: Option<&str>,
    if_not_exists: bool,
) -> String {
    let mut builder = String::from("CREATE USER ");
    if if_not_exists {
        builder.push_str("IF NOT EXISTS ");
    }
    builder.push_str(&sql::quote_identifier(name, SqlFlags::DEFAULT));
    if let Some(hash) = password_hash {
        builder.push_str(" HASH ");
        builder.push_str(&sql::quote_string(hash));
    }
    if admin {
        builder.push_str(" ADMIN");
    }
    builder
}
