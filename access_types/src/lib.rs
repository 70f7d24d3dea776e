//! Member Access Type Definitions
//!
//! This crate contains the core data structures for describing accessible
//! members of composite types: member descriptors, the universal value
//! representation used by untyped accessors, and the schema-as-data
//! introspection contract through which owning types donate raw member
//! access. It carries no synthesis logic.

pub mod descriptor;
pub mod introspect;
mod macros;
pub mod value;

pub use descriptor::{Accessibility, CodecPlan, MemberDescriptor, TypeToken};
pub use introspect::{
    resolve_member, resolve_plan, AccessFilter, Introspect, MemberEntry, ResolveError,
    ResolveResult, TypedMember,
};
pub use value::{MemberValue, Value, ValueKind};

/* Re-exported for the member_enum! expansion */
pub use num_enum;
