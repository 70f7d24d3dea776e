/* Codec synthesis - builds write/read functions that serialize one
 * member, or an ordered plan of members, against a byte stream. Each
 * step composes the member's untyped accessor with the primitive codec
 * table entry for its value kind. */

use crate::accessor::{synthesize_getter, synthesize_setter, UntypedGetter, UntypedSetter};
use crate::errors::SynthResult;
use crate::table::{codec_for, PrimitiveCodec};
use access_types::{CodecPlan, MemberDescriptor, Value, ValueKind};
use log::debug;
use std::any::Any;
use std::io::{self, Read, Write};
use std::slice;
use std::sync::Arc;

pub type WriteFn = Arc<dyn Fn(&dyn Any, &mut dyn Write) -> io::Result<()> + Send + Sync>;
pub type ReadFn = Arc<dyn Fn(&mut dyn Any, &mut dyn Read) -> io::Result<()> + Send + Sync>;

struct WriteStep {
    get: UntypedGetter,
    codec: &'static PrimitiveCodec,
    kind: ValueKind,
}

struct ReadStep {
    set: UntypedSetter,
    codec: &'static PrimitiveCodec,
    kind: ValueKind,
}

/* Every step is validated before any function is built; a member with
 * no codec table entry aborts the whole synthesis and no partial
 * function is ever returned. */
fn write_steps(members: &[MemberDescriptor]) -> SynthResult<Vec<WriteStep>> {
    members
        .iter()
        .map(|descriptor| {
            let get = synthesize_getter(descriptor)?;
            let codec = codec_for(descriptor.kind)?;
            Ok(WriteStep {
                get,
                codec,
                kind: descriptor.kind,
            })
        })
        .collect()
}

fn read_steps(members: &[MemberDescriptor]) -> SynthResult<Vec<ReadStep>> {
    members
        .iter()
        .map(|descriptor| {
            let set = synthesize_setter(descriptor)?;
            let codec = codec_for(descriptor.kind)?;
            Ok(ReadStep {
                set,
                codec,
                kind: descriptor.kind,
            })
        })
        .collect()
}

fn run_write(steps: &[WriteStep], instance: &dyn Any, sink: &mut dyn Write) -> io::Result<()> {
    for step in steps {
        /* Enum members ride the i32 pair as their underlying tag */
        let value = match step.kind {
            ValueKind::Enum => Value::I32((step.get)(instance).expect_enum()),
            _ => (step.get)(instance),
        };
        (step.codec.write)(&value, sink)?;
    }
    Ok(())
}

fn run_read(steps: &[ReadStep], instance: &mut dyn Any, source: &mut dyn Read) -> io::Result<()> {
    for step in steps {
        let value = (step.codec.read)(source)?;
        /* Restore the enum representation before assignment */
        let value = match step.kind {
            ValueKind::Enum => Value::Enum(value.expect_i32()),
            _ => value,
        };
        (step.set)(instance, value);
    }
    Ok(())
}

/* One member's write function: getter, then the table write operation */
pub fn synthesize_write(descriptor: &MemberDescriptor) -> SynthResult<WriteFn> {
    let steps = write_steps(slice::from_ref(descriptor))?;
    debug!(
        "synthesized write for {}::{}",
        descriptor.owner.name, descriptor.name
    );
    Ok(Arc::new(move |instance, sink| {
        run_write(&steps, instance, sink)
    }))
}

/* One member's read function: the table read operation, then the setter */
pub fn synthesize_read(descriptor: &MemberDescriptor) -> SynthResult<ReadFn> {
    let steps = read_steps(slice::from_ref(descriptor))?;
    debug!(
        "synthesized read for {}::{}",
        descriptor.owner.name, descriptor.name
    );
    Ok(Arc::new(move |instance, source| {
        run_read(&steps, instance, source)
    }))
}

/* Batch form: one function performing each member's write in plan
 * order, sequentially. Plan order is the only framing of the stream;
 * the matching read plan must be identical. */
pub fn synthesize_plan_write(plan: &CodecPlan) -> SynthResult<WriteFn> {
    let steps = write_steps(&plan.members)?;
    debug!(
        "synthesized plan write for {} ({} members)",
        plan.owner.name,
        steps.len()
    );
    Ok(Arc::new(move |instance, sink| {
        run_write(&steps, instance, sink)
    }))
}

pub fn synthesize_plan_read(plan: &CodecPlan) -> SynthResult<ReadFn> {
    let steps = read_steps(&plan.members)?;
    debug!(
        "synthesized plan read for {} ({} members)",
        plan.owner.name,
        steps.len()
    );
    Ok(Arc::new(move |instance, source| {
        run_read(&steps, instance, source)
    }))
}
