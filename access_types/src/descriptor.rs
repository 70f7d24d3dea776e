/* Member descriptors and codec plans - resolved structural metadata
 * about the accessible members of a composite type */

use crate::introspect::{Introspect, MemberEntry};
use crate::value::ValueKind;
use serde_derive::Serialize;
use std::any::TypeId;

/* Whether a member is reachable through the owning type's public surface */
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Accessibility {
    Public,
    NonPublic,
}

/* Runtime identity of an owning type. The TypeId half only exists in
 * process and is skipped when the token is serialized. */
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeToken {
    pub name: String,
    #[serde(skip)]
    pub id: TypeId,
}

impl TypeToken {
    pub fn of<T: Introspect>() -> Self {
        Self {
            name: T::type_name().to_string(),
            id: TypeId::of::<T>(),
        }
    }
}

/* Resolved metadata for one member of a composite type.
 *
 * A descriptor is immutable once resolved and, together with a
 * synthesis kind, uniquely identifies a synthesis target. The embedded
 * entry is the raw access surface donated by the owning type's schema;
 * synthesis is a pure function of the descriptor alone. */
#[derive(Serialize, Debug, Clone)]
pub struct MemberDescriptor {
    pub owner: TypeToken,
    pub name: String,
    pub kind: ValueKind,
    pub has_getter: bool,
    pub has_setter: bool,
    pub accessibility: Accessibility,
    #[serde(skip)]
    pub entry: &'static MemberEntry,
}

/* Equality is over the resolved metadata; the entry is the capability
 * backing it, not part of the identity. */
impl PartialEq for MemberDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner
            && self.name == other.name
            && self.kind == other.kind
            && self.has_getter == other.has_getter
            && self.has_setter == other.has_setter
            && self.accessibility == other.accessibility
    }
}

/* Ordered sequence of members of one owning type, used to synthesize a
 * whole-object write/read pair. Order is declaration order at
 * resolution time; the write plan and the read plan that decodes its
 * output must be identical because plan order is the only framing of
 * the wire format. */
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CodecPlan {
    pub owner: TypeToken,
    pub members: Vec<MemberDescriptor>,
}

impl CodecPlan {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
