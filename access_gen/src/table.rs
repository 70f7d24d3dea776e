/* Primitive codec table - the fixed mapping from a member's value kind
 * to a paired write/read operation over a byte stream.
 *
 * Wire conventions: integers and doubles are little-endian, bool is one
 * byte (zero decodes to false, anything else to true), strings carry a
 * ULEB128 byte-count prefix followed by UTF-8 bytes, and enum members
 * ride on the 32-bit signed pair as their underlying tag. */

use crate::errors::{SynthError, SynthResult};
use access_types::{Value, ValueKind};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

pub type WriteOp = fn(&Value, &mut dyn Write) -> io::Result<()>;
pub type ReadOp = fn(&mut dyn Read) -> io::Result<Value>;

/* Paired operations for one supported value kind */
pub struct PrimitiveCodec {
    pub write: WriteOp,
    pub read: ReadOp,
}

static STR_CODEC: PrimitiveCodec = PrimitiveCodec {
    write: write_str,
    read: read_str,
};
static I32_CODEC: PrimitiveCodec = PrimitiveCodec {
    write: write_i32,
    read: read_i32,
};
static I64_CODEC: PrimitiveCodec = PrimitiveCodec {
    write: write_i64,
    read: read_i64,
};
static F64_CODEC: PrimitiveCodec = PrimitiveCodec {
    write: write_f64,
    read: read_f64,
};
static U8_CODEC: PrimitiveCodec = PrimitiveCodec {
    write: write_u8,
    read: read_u8,
};
static BOOL_CODEC: PrimitiveCodec = PrimitiveCodec {
    write: write_bool,
    read: read_bool,
};

/* Table lookup by value kind. Absence of an entry is the single
 * failure mode; enum resolves to the 32-bit signed pair. */
pub fn codec_for(kind: ValueKind) -> SynthResult<&'static PrimitiveCodec> {
    match kind {
        ValueKind::Str => Ok(&STR_CODEC),
        ValueKind::I32 | ValueKind::Enum => Ok(&I32_CODEC),
        ValueKind::I64 => Ok(&I64_CODEC),
        ValueKind::F64 => Ok(&F64_CODEC),
        ValueKind::U8 => Ok(&U8_CODEC),
        ValueKind::Bool => Ok(&BOOL_CODEC),
        other => Err(SynthError::UnsupportedSerializationType { kind: other }),
    }
}

fn write_i32(value: &Value, sink: &mut dyn Write) -> io::Result<()> {
    sink.write_i32::<LittleEndian>(value.expect_i32())
}

fn read_i32(source: &mut dyn Read) -> io::Result<Value> {
    source.read_i32::<LittleEndian>().map(Value::I32)
}

fn write_i64(value: &Value, sink: &mut dyn Write) -> io::Result<()> {
    sink.write_i64::<LittleEndian>(value.expect_i64())
}

fn read_i64(source: &mut dyn Read) -> io::Result<Value> {
    source.read_i64::<LittleEndian>().map(Value::I64)
}

fn write_f64(value: &Value, sink: &mut dyn Write) -> io::Result<()> {
    sink.write_f64::<LittleEndian>(value.expect_f64())
}

fn read_f64(source: &mut dyn Read) -> io::Result<Value> {
    source.read_f64::<LittleEndian>().map(Value::F64)
}

fn write_u8(value: &Value, sink: &mut dyn Write) -> io::Result<()> {
    sink.write_u8(value.expect_u8())
}

fn read_u8(source: &mut dyn Read) -> io::Result<Value> {
    source.read_u8().map(Value::U8)
}

fn write_bool(value: &Value, sink: &mut dyn Write) -> io::Result<()> {
    sink.write_u8(u8::from(value.expect_bool()))
}

fn read_bool(source: &mut dyn Read) -> io::Result<Value> {
    source.read_u8().map(|byte| Value::Bool(byte != 0))
}

fn write_str(value: &Value, sink: &mut dyn Write) -> io::Result<()> {
    let text = value.expect_str();
    write_varint(sink, text.len() as u64)?;
    sink.write_all(text.as_bytes())
}

fn read_str(source: &mut dyn Read) -> io::Result<Value> {
    let len = read_varint(source)? as usize;
    let mut buf = vec![0u8; len];
    source.read_exact(&mut buf)?;
    let text = String::from_utf8(buf)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(Value::Str(text))
}

/* ULEB128: seven payload bits per byte, high bit marks continuation */
pub fn write_varint(sink: &mut dyn Write, mut value: u64) -> io::Result<()> {
    loop {
        let mut byte = (value & 0x7f) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        sink.write_u8(byte)?;
        if value == 0 {
            return Ok(());
        }
    }
}

pub fn read_varint(source: &mut dyn Read) -> io::Result<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = source.read_u8()?;
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
        if shift >= 64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "varint length prefix overflows u64",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn varint_round_trip(value: u64) -> (u64, usize) {
        let mut buf = Vec::new();
        write_varint(&mut buf, value).expect("varint writes");
        let len = buf.len();
        let decoded = read_varint(&mut Cursor::new(buf)).expect("varint reads");
        (decoded, len)
    }

    #[test]
    fn varint_round_trips_boundary_values() {
        assert_eq!(varint_round_trip(0), (0, 1));
        assert_eq!(varint_round_trip(1), (1, 1));
        assert_eq!(varint_round_trip(127), (127, 1));
        assert_eq!(varint_round_trip(128), (128, 2));
        assert_eq!(varint_round_trip(300), (300, 2));
        assert_eq!(varint_round_trip(u64::MAX), (u64::MAX, 10));
    }

    #[test]
    fn varint_rejects_unterminated_prefix() {
        let bytes = [0xffu8; 11];
        let err = read_varint(&mut Cursor::new(bytes.to_vec())).expect_err("overflow detected");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn i32_is_four_little_endian_bytes() {
        let codec = codec_for(ValueKind::I32).expect("entry present");
        let mut buf = Vec::new();
        (codec.write)(&Value::I32(42), &mut buf).expect("write succeeds");
        assert_eq!(buf, vec![0x2a, 0x00, 0x00, 0x00]);
        let decoded = (codec.read)(&mut Cursor::new(buf)).expect("read succeeds");
        assert_eq!(decoded, Value::I32(42));
    }

    #[test]
    fn negative_i64_round_trips() {
        let codec = codec_for(ValueKind::I64).expect("entry present");
        let mut buf = Vec::new();
        (codec.write)(&Value::I64(-1), &mut buf).expect("write succeeds");
        assert_eq!(buf.len(), 8);
        let decoded = (codec.read)(&mut Cursor::new(buf)).expect("read succeeds");
        assert_eq!(decoded, Value::I64(-1));
    }

    #[test]
    fn bool_decodes_any_nonzero_byte_as_true() {
        let codec = codec_for(ValueKind::Bool).expect("entry present");
        let mut buf = Vec::new();
        (codec.write)(&Value::Bool(true), &mut buf).expect("write succeeds");
        assert_eq!(buf, vec![0x01]);

        let decoded = (codec.read)(&mut Cursor::new(vec![0x02])).expect("read succeeds");
        assert_eq!(decoded, Value::Bool(true));
        let decoded = (codec.read)(&mut Cursor::new(vec![0x00])).expect("read succeeds");
        assert_eq!(decoded, Value::Bool(false));
    }

    #[test]
    fn string_carries_byte_count_prefix() {
        let codec = codec_for(ValueKind::Str).expect("entry present");
        let mut buf = Vec::new();
        (codec.write)(&Value::Str("Hello, world!".to_string()), &mut buf)
            .expect("write succeeds");
        assert_eq!(buf.len(), 14);
        assert_eq!(buf[0], 13);

        let decoded = (codec.read)(&mut Cursor::new(buf)).expect("read succeeds");
        assert_eq!(decoded, Value::Str("Hello, world!".to_string()));
    }

    #[test]
    fn empty_and_multibyte_strings_round_trip() {
        let codec = codec_for(ValueKind::Str).expect("entry present");
        for text in ["", "héllo", "日本語"] {
            let mut buf = Vec::new();
            (codec.write)(&Value::Str(text.to_string()), &mut buf).expect("write succeeds");
            let decoded = (codec.read)(&mut Cursor::new(buf)).expect("read succeeds");
            assert_eq!(decoded, Value::Str(text.to_string()));
        }
    }

    #[test]
    fn enum_kind_resolves_to_the_i32_pair() {
        let enum_codec = codec_for(ValueKind::Enum).expect("entry present");
        let i32_codec = codec_for(ValueKind::I32).expect("entry present");
        assert!(std::ptr::eq(enum_codec, i32_codec));
    }

    #[test]
    fn kinds_outside_the_table_are_rejected() {
        for kind in [ValueKind::F32, ValueKind::U64, ValueKind::Char] {
            match codec_for(kind) {
                Err(err) => assert_eq!(err, SynthError::UnsupportedSerializationType { kind }),
                Ok(_) => panic!("kind {kind} unexpectedly supported"),
            }
        }
    }

    #[test]
    fn truncated_source_surfaces_the_stream_error() {
        let codec = codec_for(ValueKind::I32).expect("entry present");
        let err = (codec.read)(&mut Cursor::new(vec![0x2a, 0x00]))
            .expect_err("short read fails");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
