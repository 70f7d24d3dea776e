/* Accessor and Codec Synthesis Runtime
 *
 * Builds specialized get/set and binary write/read functions from the
 * member metadata declared through access_types, memoizing every
 * synthesized function for the process lifetime. Untyped accessors go
 * through a closed dispatch over the universal value representation;
 * typed accessors recover the statically-specialized pair donated by
 * the owning type's schema.
 */

pub mod accessor;
pub mod cache;
pub mod codec;
pub mod errors;
pub mod formatter;
pub mod table;

pub use accessor::{
    direct_getter, direct_setter, synthesize_getter, synthesize_setter, typed_getter,
    typed_setter, UntypedGetter, UntypedSetter,
};
pub use cache::{SynthCache, SynthesisKind, SynthesizedFn};
pub use codec::{
    synthesize_plan_read, synthesize_plan_write, synthesize_read, synthesize_write, ReadFn,
    WriteFn,
};
pub use errors::{SynthError, SynthResult};
pub use formatter::{describe_plan, describe_type};
pub use table::{codec_for, read_varint, write_varint, PrimitiveCodec};
