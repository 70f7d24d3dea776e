/* Universal value representation - the boxed form carried by untyped
 * accessors and by the codec operations */

use serde_derive::{Deserialize, Serialize};
use std::fmt;

/* Identity of a member's declared value type */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Str,
    I32,
    I64,
    F64,
    U8,
    Bool,
    /* Enum backed by a 32-bit signed tag */
    Enum,
    /* Kinds below are accessible but have no codec table entry */
    F32,
    U64,
    Char,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Str => "string",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::F64 => "f64",
            ValueKind::U8 => "u8",
            ValueKind::Bool => "bool",
            ValueKind::Enum => "enum",
            ValueKind::F32 => "f32",
            ValueKind::U64 => "u64",
            ValueKind::Char => "char",
        };
        f.write_str(name)
    }
}

/* One variant per ValueKind. Wrapping a member's concrete value into
 * this enum is the equivalent of boxing it; unwrapping with a kind the
 * value does not carry is a caller programming error and panics. */
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    I32(i32),
    I64(i64),
    F64(f64),
    U8(u8),
    Bool(bool),
    Enum(i32),
    F32(f32),
    U64(u64),
    Char(char),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::F64(_) => ValueKind::F64,
            Value::U8(_) => ValueKind::U8,
            Value::Bool(_) => ValueKind::Bool,
            Value::Enum(_) => ValueKind::Enum,
            Value::F32(_) => ValueKind::F32,
            Value::U64(_) => ValueKind::U64,
            Value::Char(_) => ValueKind::Char,
        }
    }

    pub fn expect_str(&self) -> &str {
        match self {
            Value::Str(v) => v,
            other => mismatch(ValueKind::Str, other),
        }
    }

    pub fn expect_i32(&self) -> i32 {
        match self {
            Value::I32(v) => *v,
            other => mismatch(ValueKind::I32, other),
        }
    }

    pub fn expect_i64(&self) -> i64 {
        match self {
            Value::I64(v) => *v,
            other => mismatch(ValueKind::I64, other),
        }
    }

    pub fn expect_f64(&self) -> f64 {
        match self {
            Value::F64(v) => *v,
            other => mismatch(ValueKind::F64, other),
        }
    }

    pub fn expect_u8(&self) -> u8 {
        match self {
            Value::U8(v) => *v,
            other => mismatch(ValueKind::U8, other),
        }
    }

    pub fn expect_bool(&self) -> bool {
        match self {
            Value::Bool(v) => *v,
            other => mismatch(ValueKind::Bool, other),
        }
    }

    /* Underlying 32-bit tag of an enum-kinded value */
    pub fn expect_enum(&self) -> i32 {
        match self {
            Value::Enum(v) => *v,
            other => mismatch(ValueKind::Enum, other),
        }
    }

    pub fn expect_f32(&self) -> f32 {
        match self {
            Value::F32(v) => *v,
            other => mismatch(ValueKind::F32, other),
        }
    }

    pub fn expect_u64(&self) -> u64 {
        match self {
            Value::U64(v) => *v,
            other => mismatch(ValueKind::U64, other),
        }
    }

    pub fn expect_char(&self) -> char {
        match self {
            Value::Char(v) => *v,
            other => mismatch(ValueKind::Char, other),
        }
    }
}

fn mismatch(expected: ValueKind, found: &Value) -> ! {
    panic!(
        "value kind mismatch: expected {}, found {}",
        expected,
        found.kind()
    )
}

/* Concrete member value types that can cross the universal
 * representation boundary. Enum member types implement this through
 * the member_enum! macro. */
pub trait MemberValue: Sized + 'static {
    const KIND: ValueKind;

    fn into_value(self) -> Value;

    /* Unwraps a universal value back into the concrete type; a value of
     * a different kind is a caller programming error and panics. */
    fn from_value(value: Value) -> Self;
}

impl MemberValue for String {
    const KIND: ValueKind = ValueKind::Str;

    fn into_value(self) -> Value {
        Value::Str(self)
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Str(v) => v,
            other => mismatch(ValueKind::Str, &other),
        }
    }
}

impl MemberValue for i32 {
    const KIND: ValueKind = ValueKind::I32;

    fn into_value(self) -> Value {
        Value::I32(self)
    }

    fn from_value(value: Value) -> Self {
        value.expect_i32()
    }
}

impl MemberValue for i64 {
    const KIND: ValueKind = ValueKind::I64;

    fn into_value(self) -> Value {
        Value::I64(self)
    }

    fn from_value(value: Value) -> Self {
        value.expect_i64()
    }
}

impl MemberValue for f64 {
    const KIND: ValueKind = ValueKind::F64;

    fn into_value(self) -> Value {
        Value::F64(self)
    }

    fn from_value(value: Value) -> Self {
        value.expect_f64()
    }
}

impl MemberValue for u8 {
    const KIND: ValueKind = ValueKind::U8;

    fn into_value(self) -> Value {
        Value::U8(self)
    }

    fn from_value(value: Value) -> Self {
        value.expect_u8()
    }
}

impl MemberValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Self {
        value.expect_bool()
    }
}

impl MemberValue for f32 {
    const KIND: ValueKind = ValueKind::F32;

    fn into_value(self) -> Value {
        Value::F32(self)
    }

    fn from_value(value: Value) -> Self {
        value.expect_f32()
    }
}

impl MemberValue for u64 {
    const KIND: ValueKind = ValueKind::U64;

    fn into_value(self) -> Value {
        Value::U64(self)
    }

    fn from_value(value: Value) -> Self {
        value.expect_u64()
    }
}

impl MemberValue for char {
    const KIND: ValueKind = ValueKind::Char;

    fn into_value(self) -> Value {
        Value::Char(self)
    }

    fn from_value(value: Value) -> Self {
        value.expect_char()
    }
}
