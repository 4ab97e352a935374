//! Memo Key Module
//!
//! Derives structural cache keys from ordered argument sequences.

use std::fmt;

use serde::ser::{self, Serialize, Serializer as _};
use serde_json::value::Serializer as ValueSerializer;
use serde_json::{Map, Value};

use crate::error::Result;

// == Memo Key ==
/// Structural key: one canonical JSON rendering per argument, in order.
///
/// Parts are kept separate rather than joined, so `("a|b",)` and `("a", "b")`
/// never collide. Object keys are sorted while rendering, so two maps holding
/// the same entries produce the same part regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoKey {
    /// Canonical text of each argument
    parts: Vec<String>,
}

impl MemoKey {
    // == Constructor ==
    /// Derives a key from an argument sequence.
    ///
    /// `()` is the empty argument list, tuples and sequences contribute one
    /// part per element, and any other value (including `None` and unit
    /// structs) is a single argument.
    ///
    /// Non-finite floats render as `null`, the same as `None`; `-0.0` renders
    /// as `0.0`.
    ///
    /// # Errors
    /// Returns `MemoError::KeyDerivation` if an argument cannot be represented as
    /// JSON (for example a map with non-string keys).
    pub fn from_args<A>(args: &A) -> Result<Self>
    where
        A: Serialize + ?Sized,
    {
        let mut no_args = false;
        let value = args.serialize(ArgsSerializer {
            no_args: &mut no_args,
        })?;

        let parts = match value {
            _ if no_args => Vec::new(),
            Value::Array(items) => items
                .into_iter()
                .map(canonical_text)
                .collect::<Result<Vec<_>>>()?,
            single => vec![canonical_text(single)?],
        };

        Ok(Self { parts })
    }

    /// Returns the canonical text of each argument.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Returns the number of arguments the key was derived from.
    pub fn arity(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if the key was derived from an empty argument list.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl fmt::Display for MemoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.parts.join(", "))
    }
}

fn canonical_text(value: Value) -> Result<String> {
    Ok(serde_json::to_string(&canonicalize(value))?)
}

// Rebuilds objects in sorted key order so the rendering does not depend on
// whether serde_json preserves insertion order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut fields: Vec<(String, Value)> = map.into_iter().collect();
            fields.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, canonicalize(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        Value::Number(n) if n.is_f64() && n.as_f64() == Some(0.0) => Value::from(0.0),
        other => other,
    }
}

// == Args Serializer ==
/// Top-level serializer that builds a JSON value and notes whether the
/// arguments were `()`.
///
/// Only the outermost unit is the empty argument list; everything else is
/// handed to serde_json unchanged.
struct ArgsSerializer<'a> {
    no_args: &'a mut bool,
}

type Compound = <ValueSerializer as ser::Serializer>::SerializeSeq;
type CompoundTuple = <ValueSerializer as ser::Serializer>::SerializeTuple;
type CompoundTupleStruct = <ValueSerializer as ser::Serializer>::SerializeTupleStruct;
type CompoundTupleVariant = <ValueSerializer as ser::Serializer>::SerializeTupleVariant;
type CompoundMap = <ValueSerializer as ser::Serializer>::SerializeMap;
type CompoundStruct = <ValueSerializer as ser::Serializer>::SerializeStruct;
type CompoundStructVariant = <ValueSerializer as ser::Serializer>::SerializeStructVariant;

impl ser::Serializer for ArgsSerializer<'_> {
    type Ok = Value;
    type Error = serde_json::Error;

    type SerializeSeq = Compound;
    type SerializeTuple = CompoundTuple;
    type SerializeTupleStruct = CompoundTupleStruct;
    type SerializeTupleVariant = CompoundTupleVariant;
    type SerializeMap = CompoundMap;
    type SerializeStruct = CompoundStruct;
    type SerializeStructVariant = CompoundStructVariant;

    fn serialize_unit(self) -> serde_json::Result<Value> {
        *self.no_args = true;
        Ok(Value::Null)
    }

    fn serialize_bool(self, v: bool) -> serde_json::Result<Value> {
        ValueSerializer.serialize_bool(v)
    }

    fn serialize_i8(self, v: i8) -> serde_json::Result<Value> {
        ValueSerializer.serialize_i8(v)
    }

    fn serialize_i16(self, v: i16) -> serde_json::Result<Value> {
        ValueSerializer.serialize_i16(v)
    }

    fn serialize_i32(self, v: i32) -> serde_json::Result<Value> {
        ValueSerializer.serialize_i32(v)
    }

    fn serialize_i64(self, v: i64) -> serde_json::Result<Value> {
        ValueSerializer.serialize_i64(v)
    }

    fn serialize_i128(self, v: i128) -> serde_json::Result<Value> {
        ValueSerializer.serialize_i128(v)
    }

    fn serialize_u8(self, v: u8) -> serde_json::Result<Value> {
        ValueSerializer.serialize_u8(v)
    }

    fn serialize_u16(self, v: u16) -> serde_json::Result<Value> {
        ValueSerializer.serialize_u16(v)
    }

    fn serialize_u32(self, v: u32) -> serde_json::Result<Value> {
        ValueSerializer.serialize_u32(v)
    }

    fn serialize_u64(self, v: u64) -> serde_json::Result<Value> {
        ValueSerializer.serialize_u64(v)
    }

    fn serialize_u128(self, v: u128) -> serde_json::Result<Value> {
        ValueSerializer.serialize_u128(v)
    }

    fn serialize_f32(self, v: f32) -> serde_json::Result<Value> {
        ValueSerializer.serialize_f32(v)
    }

    fn serialize_f64(self, v: f64) -> serde_json::Result<Value> {
        ValueSerializer.serialize_f64(v)
    }

    fn serialize_char(self, v: char) -> serde_json::Result<Value> {
        ValueSerializer.serialize_char(v)
    }

    fn serialize_str(self, v: &str) -> serde_json::Result<Value> {
        ValueSerializer.serialize_str(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> serde_json::Result<Value> {
        ValueSerializer.serialize_bytes(v)
    }

    fn serialize_none(self) -> serde_json::Result<Value> {
        ValueSerializer.serialize_none()
    }

    fn serialize_some<T>(self, value: &T) -> serde_json::Result<Value>
    where
        T: ?Sized + Serialize,
    {
        ValueSerializer.serialize_some(value)
    }

    fn serialize_unit_struct(self, name: &'static str) -> serde_json::Result<Value> {
        ValueSerializer.serialize_unit_struct(name)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
    ) -> serde_json::Result<Value> {
        ValueSerializer.serialize_unit_variant(name, variant_index, variant)
    }

    fn serialize_newtype_struct<T>(
        self,
        name: &'static str,
        value: &T,
    ) -> serde_json::Result<Value>
    where
        T: ?Sized + Serialize,
    {
        ValueSerializer.serialize_newtype_struct(name, value)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> serde_json::Result<Value>
    where
        T: ?Sized + Serialize,
    {
        ValueSerializer.serialize_newtype_variant(name, variant_index, variant, value)
    }

    fn serialize_seq(self, len: Option<usize>) -> serde_json::Result<Compound> {
        ValueSerializer.serialize_seq(len)
    }

    fn serialize_tuple(self, len: usize) -> serde_json::Result<CompoundTuple> {
        ValueSerializer.serialize_tuple(len)
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> serde_json::Result<CompoundTupleStruct> {
        ValueSerializer.serialize_tuple_struct(name, len)
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> serde_json::Result<CompoundTupleVariant> {
        ValueSerializer.serialize_tuple_variant(name, variant_index, variant, len)
    }

    fn serialize_map(self, len: Option<usize>) -> serde_json::Result<CompoundMap> {
        ValueSerializer.serialize_map(len)
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> serde_json::Result<CompoundStruct> {
        ValueSerializer.serialize_struct(name, len)
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> serde_json::Result<CompoundStructVariant> {
        ValueSerializer.serialize_struct_variant(name, variant_index, variant, len)
    }
}
