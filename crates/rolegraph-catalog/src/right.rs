//! Rights: directed permission edges from a grantee to a target.

use std::fmt;

use crate::{ObjectId, ObjectKind, Privileges};

/// What a right points at.
///
/// Targets are weak references: a right names its target by id and is
/// removed by the drop cascade of that target, never by ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RightTarget {
    /// Database-wide right (ALTER ANY SCHEMA)
    Database,
    /// A table or schema
    Object(ObjectId),
    /// Membership in a role
    Role(ObjectId),
}

impl RightTarget {
    /// Id of the referenced object, if any
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            RightTarget::Database => None,
            RightTarget::Object(id) | RightTarget::Role(id) => Some(*id),
        }
    }

    /// True if this target refers to `id`, whatever its kind
    pub fn refers_to(&self, id: ObjectId) -> bool {
        self.object_id() == Some(id)
    }
}

impl fmt::Display for RightTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RightTarget::Database => f.write_str("DATABASE"),
            RightTarget::Object(id) => write!(f, "object {}", id),
            RightTarget::Role(id) => write!(f, "role {}", id),
        }
    }
}

/// A permission edge held by a grantee.
#[derive(Debug, Clone, PartialEq)]
pub struct Right {
    id: ObjectId,
    grantee: ObjectId,
    target: RightTarget,
    privileges: Privileges,
}

impl Right {
    pub(crate) fn new(
        id: ObjectId,
        grantee: ObjectId,
        target: RightTarget,
        privileges: Privileges,
    ) -> Self {
        Right { id, grantee, target, privileges }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The holder of this right
    pub fn grantee(&self) -> ObjectId {
        self.grantee
    }

    pub fn target(&self) -> RightTarget {
        self.target
    }

    pub fn privileges(&self) -> Privileges {
        self.privileges
    }

    pub fn type_tag(&self) -> ObjectKind {
        ObjectKind::Right
    }

    /// True if this right is a role-membership edge
    pub fn is_membership(&self) -> bool {
        matches!(self.target, RightTarget::Role(_))
    }

    pub(crate) fn set_privileges(&mut self, privileges: Privileges) {
        self.privileges = privileges;
    }
}
