//! Privilege masks carried by rights.

use std::fmt;

bitflags::bitflags! {
    /// Set of privileges held through one right.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Privileges: u32 {
        const SELECT = 1;
        const DELETE = 1 << 1;
        const INSERT = 1 << 2;
        const UPDATE = 1 << 3;
        const ALTER_ANY_SCHEMA = 1 << 4;
        const SCHEMA_OWNER = 1 << 5;
        /// Membership in the target role. Never combined with other bits.
        const ROLE_MEMBERSHIP = 1 << 6;

        const ALL = Self::SELECT.bits()
            | Self::DELETE.bits()
            | Self::INSERT.bits()
            | Self::UPDATE.bits();
    }
}

impl Privileges {
    /// Privileges that make sense on a table or schema.
    pub const OBJECT_PRIVILEGES: Privileges = Privileges::ALL.union(Privileges::SCHEMA_OWNER);
}

impl fmt::Display for Privileges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.contains(Privileges::ALL) {
            parts.push("ALL");
        } else {
            if self.contains(Privileges::SELECT) {
                parts.push("SELECT");
            }
            if self.contains(Privileges::DELETE) {
                parts.push("DELETE");
            }
            if self.contains(Privileges::INSERT) {
                parts.push("INSERT");
            }
            if self.contains(Privileges::UPDATE) {
                parts.push("UPDATE");
            }
        }
        if self.contains(Privileges::ALTER_ANY_SCHEMA) {
            parts.push("ALTER ANY SCHEMA");
        }
        if self.contains(Privileges::SCHEMA_OWNER) {
            parts.push("SCHEMA OWNER");
        }
        if self.contains(Privileges::ROLE_MEMBERSHIP) {
            parts.push("ROLE MEMBERSHIP");
        }
        if parts.is_empty() {
            parts.push("NONE");
        }
        f.write_str(&parts.join(", "))
    }
}
