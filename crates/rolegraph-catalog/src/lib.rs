//! Catalog - Authorization Object Graph
//!
//! Tracks the grantees of a database (users and roles), the rights that
//! connect them to schema objects and to each other, and the schema object
//! stubs those rights target. The [`Catalog`] is the only authority that may
//! add or remove catalog entries; dropping a grantee or an object cascades
//! through every right that references it before the object itself goes.

pub mod errors;
mod grantee;
mod object;
mod privilege;
mod right;
mod role;
mod schema_object;
pub mod sql;
mod store;
mod user;

pub use errors::CatalogError;
pub use grantee::{Grantee, GranteeKind};
pub use object::{ObjectId, ObjectKind};
pub use privilege::Privileges;
pub use right::{Right, RightTarget};
pub use role::{PUBLIC_ROLE_ID, PUBLIC_ROLE_NAME};
pub use schema_object::{SchemaObject, PUBLIC_SCHEMA_ID, PUBLIC_SCHEMA_NAME};
pub use sql::SqlFlags;
pub use store::Catalog;
pub use user::{hash_password, verify_password};

#[cfg(test)]
mod tests;
