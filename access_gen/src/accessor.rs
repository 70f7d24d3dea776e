/* Accessor synthesis - builds get/set functions for a member
 * descriptor in three interchangeable strategies: untyped (instance
 * and value erased to the universal representation), typed
 * (compile-time specialization per owner/value type pair), and direct
 * (a hand-written accessor wrapped into the untyped shape as the
 * reference baseline). */

use crate::errors::{SynthError, SynthResult};
use access_types::{Introspect, MemberDescriptor, MemberValue, TypedMember, Value};
use log::debug;
use std::any::Any;
use std::sync::Arc;

pub type UntypedGetter = Arc<dyn Fn(&dyn Any) -> Value + Send + Sync>;
pub type UntypedSetter = Arc<dyn Fn(&mut dyn Any, Value) + Send + Sync>;

fn missing(descriptor: &MemberDescriptor, op: &'static str) -> SynthError {
    SynthError::UnsupportedMemberAccess {
        type_name: descriptor.owner.name.clone(),
        member: descriptor.name.clone(),
        op,
    }
}

/* Untyped getter: the result is wrapped into the universal
 * representation, the equivalent of boxing a value-typed member. */
pub fn synthesize_getter(descriptor: &MemberDescriptor) -> SynthResult<UntypedGetter> {
    if !descriptor.has_getter {
        return Err(missing(descriptor, "getter"));
    }
    let get = descriptor.entry.get.ok_or_else(|| missing(descriptor, "getter"))?;
    debug!(
        "synthesized untyped getter for {}::{}",
        descriptor.owner.name, descriptor.name
    );
    Ok(Arc::new(get))
}

/* Untyped setter: the incoming universal value is unwrapped to the
 * member's exact value type before assignment. Passing a value of a
 * different kind is a caller programming error and panics inside the
 * donated accessor. */
pub fn synthesize_setter(descriptor: &MemberDescriptor) -> SynthResult<UntypedSetter> {
    if !descriptor.has_setter {
        return Err(missing(descriptor, "setter"));
    }
    let set = descriptor.entry.set.ok_or_else(|| missing(descriptor, "setter"))?;
    debug!(
        "synthesized untyped setter for {}::{}",
        descriptor.owner.name, descriptor.name
    );
    Ok(Arc::new(set))
}

fn typed_member<T: Introspect, V: MemberValue>(
    descriptor: &MemberDescriptor,
) -> SynthResult<&'static TypedMember<T, V>> {
    descriptor
        .entry
        .typed
        .and_then(|any| any.downcast_ref::<TypedMember<T, V>>())
        .ok_or_else(|| missing(descriptor, "typed accessor"))
}

/* Typed getter: no universal-representation round-trip; both the
 * owner and the value type are fixed at the call site. */
pub fn typed_getter<T: Introspect, V: MemberValue>(
    descriptor: &MemberDescriptor,
) -> SynthResult<fn(&T) -> V> {
    if !descriptor.has_getter {
        return Err(missing(descriptor, "getter"));
    }
    typed_member::<T, V>(descriptor)?
        .get
        .ok_or_else(|| missing(descriptor, "getter"))
}

pub fn typed_setter<T: Introspect, V: MemberValue>(
    descriptor: &MemberDescriptor,
) -> SynthResult<fn(&mut T, V)> {
    if !descriptor.has_setter {
        return Err(missing(descriptor, "setter"));
    }
    typed_member::<T, V>(descriptor)?
        .set
        .ok_or_else(|| missing(descriptor, "setter"))
}

/* Direct baseline: lifts a hand-written accessor into the untyped
 * shape so callers can compare synthesized dispatch against it. */
pub fn direct_getter<T, V, F>(get: F) -> UntypedGetter
where
    T: Introspect,
    V: MemberValue,
    F: Fn(&T) -> V + Send + Sync + 'static,
{
    Arc::new(move |instance: &dyn Any| {
        let owner = match instance.downcast_ref::<T>() {
            Some(owner) => owner,
            None => panic!("instance is not a {}", T::type_name()),
        };
        get(owner).into_value()
    })
}

pub fn direct_setter<T, V, F>(set: F) -> UntypedSetter
where
    T: Introspect,
    V: MemberValue,
    F: Fn(&mut T, V) + Send + Sync + 'static,
{
    Arc::new(move |instance: &mut dyn Any, value: Value| {
        let owner = match instance.downcast_mut::<T>() {
            Some(owner) => owner,
            None => panic!("instance is not a {}", T::type_name()),
        };
        set(owner, V::from_value(value));
    })
}
