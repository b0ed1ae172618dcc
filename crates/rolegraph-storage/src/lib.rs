//! Storage - Transactional Catalog Database
//!
//! This crate wraps the authorization catalog in a [`Database`] that adds
//! snapshot transactions and savepoints, shares one database between
//! [`Session`]s, and persists the catalog as JSON or as a SQL script.

pub mod config;
pub mod database;
pub mod error;
pub mod persistence;

pub use config::DatabaseConfig;
pub use database::{Database, Session, TransactionManager, TransactionState};
pub use error::StorageError;
