/* Process-wide memoization of synthesized functions.
 *
 * Each distinct (owning type, member, synthesis kind) is synthesized at
 * most conceptually once; later requests reuse the stored function.
 * Concurrent first-time requests for the same key may synthesize
 * redundantly - the store is insert-or-keep-existing under a write
 * lock that is never held across synthesis, so every caller ends up
 * with the first stored function. Entries live for the process
 * lifetime; there is no eviction and failures are never cached. */

use crate::accessor::{
    synthesize_getter, synthesize_setter, typed_getter, typed_setter, UntypedGetter, UntypedSetter,
};
use crate::codec::{
    synthesize_plan_read, synthesize_plan_write, synthesize_read, synthesize_write, ReadFn, WriteFn,
};
use crate::errors::SynthResult;
use access_types::{resolve_plan, Introspect, MemberDescriptor, MemberValue};
use log::debug;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/* Discriminant half of the cache key */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynthesisKind {
    UntypedGet,
    UntypedSet,
    TypedGet,
    TypedSet,
    Write,
    Read,
    PlanWrite,
    PlanRead,
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    owner: TypeId,
    /* None for whole-plan entries, which are keyed by type alone */
    member: Option<String>,
    kind: SynthesisKind,
}

/* Shared handle to one cached function. The cache owns every entry;
 * callers only ever hold these clones. */
#[derive(Clone)]
pub enum SynthesizedFn {
    Get(UntypedGetter),
    Set(UntypedSetter),
    Write(WriteFn),
    Read(ReadFn),
    /* Typed entries are fn pointers erased behind Any; recovered by
     * downcast in typed_getter_for/typed_setter_for */
    Typed(Arc<dyn Any + Send + Sync>),
}

pub struct SynthCache {
    entries: RwLock<HashMap<CacheKey, SynthesizedFn>>,
}

impl SynthCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /* The process-wide instance */
    pub fn global() -> &'static SynthCache {
        static GLOBAL: OnceLock<SynthCache> = OnceLock::new();
        GLOBAL.get_or_init(SynthCache::new)
    }

    /* Lazily build and memoize the function for (descriptor, kind).
     *
     * Covers the descriptor-only kinds. Typed kinds need concrete type
     * parameters and plan kinds are keyed by owning type, so asking for
     * them here is a programming error; use the dedicated methods. */
    pub fn get_or_synthesize(
        &self,
        descriptor: &MemberDescriptor,
        kind: SynthesisKind,
    ) -> SynthResult<SynthesizedFn> {
        let key = member_key(descriptor, kind);
        if let Some(hit) = self.lookup(&key) {
            return Ok(hit);
        }
        debug!(
            "cache miss: {:?} for {}::{}",
            kind, descriptor.owner.name, descriptor.name
        );
        let candidate = match kind {
            SynthesisKind::UntypedGet => SynthesizedFn::Get(synthesize_getter(descriptor)?),
            SynthesisKind::UntypedSet => SynthesizedFn::Set(synthesize_setter(descriptor)?),
            SynthesisKind::Write => SynthesizedFn::Write(synthesize_write(descriptor)?),
            SynthesisKind::Read => SynthesizedFn::Read(synthesize_read(descriptor)?),
            SynthesisKind::TypedGet | SynthesisKind::TypedSet => {
                panic!("typed synthesis needs type parameters; use typed_getter_for/typed_setter_for")
            }
            SynthesisKind::PlanWrite | SynthesisKind::PlanRead => {
                panic!("plan synthesis is keyed by owning type; use plan_write_for/plan_read_for")
            }
        };
        Ok(self.store(key, candidate))
    }

    pub fn getter_for(&self, descriptor: &MemberDescriptor) -> SynthResult<UntypedGetter> {
        match self.get_or_synthesize(descriptor, SynthesisKind::UntypedGet)? {
            SynthesizedFn::Get(get) => Ok(get),
            _ => unreachable!("cache entry kind mismatch"),
        }
    }

    pub fn setter_for(&self, descriptor: &MemberDescriptor) -> SynthResult<UntypedSetter> {
        match self.get_or_synthesize(descriptor, SynthesisKind::UntypedSet)? {
            SynthesizedFn::Set(set) => Ok(set),
            _ => unreachable!("cache entry kind mismatch"),
        }
    }

    pub fn write_for(&self, descriptor: &MemberDescriptor) -> SynthResult<WriteFn> {
        match self.get_or_synthesize(descriptor, SynthesisKind::Write)? {
            SynthesizedFn::Write(write) => Ok(write),
            _ => unreachable!("cache entry kind mismatch"),
        }
    }

    pub fn read_for(&self, descriptor: &MemberDescriptor) -> SynthResult<ReadFn> {
        match self.get_or_synthesize(descriptor, SynthesisKind::Read)? {
            SynthesizedFn::Read(read) => Ok(read),
            _ => unreachable!("cache entry kind mismatch"),
        }
    }

    pub fn typed_getter_for<T: Introspect, V: MemberValue>(
        &self,
        descriptor: &MemberDescriptor,
    ) -> SynthResult<fn(&T) -> V> {
        let key = member_key(descriptor, SynthesisKind::TypedGet);
        if let Some(SynthesizedFn::Typed(any)) = self.lookup(&key) {
            if let Some(get) = any.downcast_ref::<fn(&T) -> V>() {
                return Ok(*get);
            }
        }
        let get = typed_getter::<T, V>(descriptor)?;
        match self.store(key, SynthesizedFn::Typed(Arc::new(get))) {
            SynthesizedFn::Typed(any) => match any.downcast_ref::<fn(&T) -> V>() {
                Some(get) => Ok(*get),
                None => Ok(get),
            },
            _ => unreachable!("cache entry kind mismatch"),
        }
    }

    pub fn typed_setter_for<T: Introspect, V: MemberValue>(
        &self,
        descriptor: &MemberDescriptor,
    ) -> SynthResult<fn(&mut T, V)> {
        let key = member_key(descriptor, SynthesisKind::TypedSet);
        if let Some(SynthesizedFn::Typed(any)) = self.lookup(&key) {
            if let Some(set) = any.downcast_ref::<fn(&mut T, V)>() {
                return Ok(*set);
            }
        }
        let set = typed_setter::<T, V>(descriptor)?;
        match self.store(key, SynthesizedFn::Typed(Arc::new(set))) {
            SynthesizedFn::Typed(any) => match any.downcast_ref::<fn(&mut T, V)>() {
                Some(set) => Ok(*set),
                None => Ok(set),
            },
            _ => unreachable!("cache entry kind mismatch"),
        }
    }

    /* Whole-plan functions for the canonical public plan of T */
    pub fn plan_write_for<T: Introspect>(&self) -> SynthResult<WriteFn> {
        let key = plan_key::<T>(SynthesisKind::PlanWrite);
        if let Some(SynthesizedFn::Write(write)) = self.lookup(&key) {
            return Ok(write);
        }
        debug!("cache miss: plan write for {}", T::type_name());
        let write = synthesize_plan_write(&resolve_plan::<T>())?;
        match self.store(key, SynthesizedFn::Write(write)) {
            SynthesizedFn::Write(write) => Ok(write),
            _ => unreachable!("cache entry kind mismatch"),
        }
    }

    pub fn plan_read_for<T: Introspect>(&self) -> SynthResult<ReadFn> {
        let key = plan_key::<T>(SynthesisKind::PlanRead);
        if let Some(SynthesizedFn::Read(read)) = self.lookup(&key) {
            return Ok(read);
        }
        debug!("cache miss: plan read for {}", T::type_name());
        let read = synthesize_plan_read(&resolve_plan::<T>())?;
        match self.store(key, SynthesizedFn::Read(read)) {
            SynthesizedFn::Read(read) => Ok(read),
            _ => unreachable!("cache entry kind mismatch"),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("synthesis cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &CacheKey) -> Option<SynthesizedFn> {
        self.entries
            .read()
            .expect("synthesis cache lock poisoned")
            .get(key)
            .cloned()
    }

    /* Insert-or-keep-existing: the first stored function wins */
    fn store(&self, key: CacheKey, candidate: SynthesizedFn) -> SynthesizedFn {
        let mut entries = self.entries.write().expect("synthesis cache lock poisoned");
        entries.entry(key).or_insert(candidate).clone()
    }
}

impl Default for SynthCache {
    fn default() -> Self {
        Self::new()
    }
}

fn member_key(descriptor: &MemberDescriptor, kind: SynthesisKind) -> CacheKey {
    CacheKey {
        owner: descriptor.owner.id,
        member: Some(descriptor.name.clone()),
        kind,
    }
}

fn plan_key<T: Introspect>(kind: SynthesisKind) -> CacheKey {
    CacheKey {
        owner: TypeId::of::<T>(),
        member: None,
        kind,
    }
}
