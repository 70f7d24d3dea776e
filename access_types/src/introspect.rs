/* Schema-as-data introspection contract.
 *
 * Rust has no ambient reflection, so an owning type donates its member
 * table explicitly: per member, the resolved metadata plus raw erased
 * accessors and an optional statically-typed accessor pair. Because the
 * table is built inside the owning type's scope, non-public members are
 * reachable exactly as far as the schema author permits. */

use crate::descriptor::{Accessibility, CodecPlan, MemberDescriptor, TypeToken};
use crate::value::{Value, ValueKind};
use std::any::Any;
use std::fmt;
use thiserror::Error;

/// Result alias for member resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors produced while resolving members against a type's schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No member with the requested name and accessibility exists.
    #[error("member '{member}' not found on type '{type_name}'")]
    MemberNotFound { type_name: String, member: String },
}

/* Statically-typed accessor pair for one member of T. Stored behind an
 * erased reference in the member table and recovered by downcast when
 * the typed synthesis strategy is requested. */
pub struct TypedMember<T, V> {
    pub get: Option<fn(&T) -> V>,
    pub set: Option<fn(&mut T, V)>,
}

/* One row of a type's member table */
pub struct MemberEntry {
    pub name: &'static str,
    pub kind: ValueKind,
    pub accessibility: Accessibility,
    /* Reads the member, wrapping the result into the universal
     * representation (the boxing step for value-typed members) */
    pub get: Option<fn(&dyn Any) -> Value>,
    /* Unwraps a universal value and assigns it to the member */
    pub set: Option<fn(&mut dyn Any, Value)>,
    /* TypedMember<T, V> for the statically-typed strategy */
    pub typed: Option<&'static (dyn Any + Send + Sync)>,
}

impl fmt::Debug for MemberEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberEntry")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("accessibility", &self.accessibility)
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .field("typed", &self.typed.is_some())
            .finish()
    }
}

/* Implemented by composite types that expose their members for
 * accessor and codec synthesis; usually written via introspect! */
pub trait Introspect: 'static {
    /* Name used in descriptors and diagnostics */
    fn type_name() -> &'static str;

    /* Member table in declaration order */
    fn members() -> &'static [MemberEntry];
}

/* Accessibility mask applied during member resolution */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessFilter {
    Public,
    NonPublic,
    Any,
}

impl AccessFilter {
    fn admits(self, accessibility: Accessibility) -> bool {
        match self {
            AccessFilter::Public => accessibility == Accessibility::Public,
            AccessFilter::NonPublic => accessibility == Accessibility::NonPublic,
            AccessFilter::Any => true,
        }
    }
}

/* Resolve one member of T by name under an accessibility mask */
pub fn resolve_member<T: Introspect>(
    name: &str,
    filter: AccessFilter,
) -> ResolveResult<MemberDescriptor> {
    T::members()
        .iter()
        .find(|entry| entry.name == name && filter.admits(entry.accessibility))
        .map(descriptor_for::<T>)
        .ok_or_else(|| ResolveError::MemberNotFound {
            type_name: T::type_name().to_string(),
            member: name.to_string(),
        })
}

/* Batch form: the ordered public members of T, the type's canonical
 * codec plan */
pub fn resolve_plan<T: Introspect>() -> CodecPlan {
    CodecPlan {
        owner: TypeToken::of::<T>(),
        members: T::members()
            .iter()
            .filter(|entry| entry.accessibility == Accessibility::Public)
            .map(descriptor_for::<T>)
            .collect(),
    }
}

fn descriptor_for<T: Introspect>(entry: &'static MemberEntry) -> MemberDescriptor {
    MemberDescriptor {
        owner: TypeToken::of::<T>(),
        name: entry.name.to_string(),
        kind: entry.kind,
        has_getter: entry.get.is_some(),
        has_setter: entry.set.is_some(),
        accessibility: entry.accessibility,
        entry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Probe {
        label: String,
        hidden: i64,
        level: u8,
    }

    introspect! {
        Probe as "Probe" {
            pub label: String,
            priv hidden: i64,
            pub level: u8,
        }
    }

    #[test]
    fn resolves_public_member() {
        let descriptor =
            resolve_member::<Probe>("label", AccessFilter::Public).expect("member resolves");
        assert_eq!(descriptor.name, "label");
        assert_eq!(descriptor.kind, ValueKind::Str);
        assert_eq!(descriptor.accessibility, Accessibility::Public);
        assert!(descriptor.has_getter);
        assert!(descriptor.has_setter);
        assert_eq!(descriptor.owner.name, "Probe");
    }

    #[test]
    fn accessibility_mask_is_honored() {
        assert!(resolve_member::<Probe>("hidden", AccessFilter::Public).is_err());

        let descriptor = resolve_member::<Probe>("hidden", AccessFilter::NonPublic)
            .expect("non-public member resolves under the matching mask");
        assert_eq!(descriptor.accessibility, Accessibility::NonPublic);

        let descriptor =
            resolve_member::<Probe>("hidden", AccessFilter::Any).expect("any mask admits");
        assert_eq!(descriptor.kind, ValueKind::I64);
    }

    #[test]
    fn missing_member_is_member_not_found() {
        let err = resolve_member::<Probe>("absent", AccessFilter::Any)
            .expect_err("unknown member is rejected");
        assert_eq!(
            err,
            ResolveError::MemberNotFound {
                type_name: "Probe".to_string(),
                member: "absent".to_string(),
            }
        );
    }

    #[test]
    fn plan_keeps_declaration_order_and_drops_non_public() {
        let plan = resolve_plan::<Probe>();
        let names: Vec<&str> = plan.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["label", "level"]);
        assert_eq!(plan.owner.name, "Probe");
    }

    #[test]
    fn raw_accessors_round_trip_through_the_table() {
        let mut probe = Probe::default();
        let entry = Probe::members()
            .iter()
            .find(|entry| entry.name == "level")
            .expect("entry present");

        let set = entry.set.expect("setter donated");
        let get = entry.get.expect("getter donated");

        set(&mut probe, Value::U8(9));
        assert_eq!(get(&probe), Value::U8(9));
        assert_eq!(probe.level, 9);
    }

    #[test]
    fn descriptor_serializes_without_runtime_identity() {
        let descriptor =
            resolve_member::<Probe>("label", AccessFilter::Public).expect("member resolves");
        let json = serde_json::to_value(&descriptor).expect("descriptor serializes");
        assert_eq!(json["name"], "label");
        assert_eq!(json["kind"], "str");
        assert_eq!(json["owner"]["name"], "Probe");
        assert!(json["owner"].get("id").is_none());
        assert!(json.get("entry").is_none());
    }
}
