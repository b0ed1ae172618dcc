//! Object identity shared by every catalog entry.

use std::fmt;

/// Catalog-wide object identifier.
///
/// Allocated from a monotonically increasing counter and never reused while
/// the catalog lives, so a stale id can only ever resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Catalog object-kind discriminator (the "type tag").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    User,
    Role,
    Right,
    Table,
    Schema,
}

impl ObjectKind {
    /// Name used in catalog listings
    pub fn catalog_name(&self) -> &'static str {
        match self {
            ObjectKind::User => "USER",
            ObjectKind::Role => "ROLE",
            ObjectKind::Right => "RIGHT",
            ObjectKind::Table => "TABLE",
            ObjectKind::Schema => "SCHEMA",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog_name())
    }
}
