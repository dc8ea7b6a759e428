//! Canonical frozen values for composite parameters.
//!
//! Composite parameter values (mappings, sequences, tuples) participate in
//! task identity: they are hashed, compared, and used as lookup keys by the
//! surrounding scheduler. A plain `serde_json::Value` is not hashable and a
//! plain `HashMap` forgets insertion order, so composites are canonicalized
//! into [`FrozenValue`]: an immutable tree whose mappings preserve insertion
//! order for serialization while comparing and hashing as entry sets.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Runtime shape of a [`FrozenValue`], used by type-mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// JSON `null`.
    Null,
    /// Boolean scalar.
    Bool,
    /// Integer scalar.
    Int,
    /// Floating-point scalar.
    Float,
    /// Text scalar.
    Text,
    /// Ordered sequence of frozen values.
    Sequence,
    /// Insertion-ordered mapping of frozen values.
    Mapping,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        };
        formatter.write_str(label)
    }
}

/// An immutable, hashable, insertion-order-preserving value tree.
///
/// Equality and hashing of mappings are entry-set based: two mappings with
/// the same entries compare equal and hash identically regardless of
/// insertion order. Iteration and serialization, by contrast, always follow
/// insertion order, which is what keeps identity serialization stable.
///
/// Floats compare and hash bitwise, keeping the `Eq`/`Hash` contract lawful
/// (`NaN` is self-equal; `-0.0` and `0.0` are distinct).
#[derive(Debug, Clone)]
pub enum FrozenValue {
    /// Absent/null member of a composite document.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Text scalar.
    Text(String),
    /// Ordered sequence of frozen elements.
    Sequence(Vec<FrozenValue>),
    /// Insertion-ordered mapping of frozen values.
    Mapping(IndexMap<String, FrozenValue>),
}

impl FrozenValue {
    /// Runtime kind tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FrozenValue::Null => ValueKind::Null,
            FrozenValue::Bool(_) => ValueKind::Bool,
            FrozenValue::Int(_) => ValueKind::Int,
            FrozenValue::Float(_) => ValueKind::Float,
            FrozenValue::Text(_) => ValueKind::Text,
            FrozenValue::Sequence(_) => ValueKind::Sequence,
            FrozenValue::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Borrow the sequence elements, if this value is a sequence.
    pub fn as_sequence(&self) -> Option<&[FrozenValue]> {
        match self {
            FrozenValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the mapping entries, if this value is a mapping.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, FrozenValue>> {
        match self {
            FrozenValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a mapping entry by key. Returns `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&FrozenValue> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }
}

/// Recursively converts a JSON document into its frozen form.
///
/// Scalars pass through unchanged, arrays freeze element-wise in order, and
/// objects freeze into insertion-order-preserving mappings. Freezing an
/// already-frozen structure is the identity, so the operation is idempotent.
///
/// ```rust
/// use railyard_types::freeze;
///
/// let document = serde_json::json!({"role": "web", "env": "staging"});
/// let frozen = freeze(document);
/// let keys: Vec<&String> = frozen.as_mapping().unwrap().keys().collect();
/// assert_eq!(keys, ["role", "env"]);
/// ```
pub fn freeze(value: serde_json::Value) -> FrozenValue {
    match value {
        serde_json::Value::Null => FrozenValue::Null,
        serde_json::Value::Bool(flag) => FrozenValue::Bool(flag),
        serde_json::Value::Number(number) => freeze_number(&number),
        serde_json::Value::String(text) => FrozenValue::Text(text),
        serde_json::Value::Array(items) => FrozenValue::Sequence(items.into_iter().map(freeze).collect()),
        serde_json::Value::Object(entries) => {
            FrozenValue::Mapping(entries.into_iter().map(|(key, value)| (key, freeze(value))).collect())
        }
    }
}

fn freeze_number(number: &serde_json::Number) -> FrozenValue {
    if let Some(integer) = number.as_i64() {
        FrozenValue::Int(integer)
    } else if let Some(float) = number.as_f64() {
        FrozenValue::Float(float)
    } else {
        FrozenValue::Null
    }
}

impl PartialEq for FrozenValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FrozenValue::Null, FrozenValue::Null) => true,
            (FrozenValue::Bool(left), FrozenValue::Bool(right)) => left == right,
            (FrozenValue::Int(left), FrozenValue::Int(right)) => left == right,
            (FrozenValue::Float(left), FrozenValue::Float(right)) => left.to_bits() == right.to_bits(),
            (FrozenValue::Text(left), FrozenValue::Text(right)) => left == right,
            (FrozenValue::Sequence(left), FrozenValue::Sequence(right)) => left == right,
            (FrozenValue::Mapping(left), FrozenValue::Mapping(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for FrozenValue {}

impl Hash for FrozenValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            FrozenValue::Null => state.write_u8(0),
            FrozenValue::Bool(flag) => {
                state.write_u8(1);
                flag.hash(state);
            }
            FrozenValue::Int(integer) => {
                state.write_u8(2);
                integer.hash(state);
            }
            FrozenValue::Float(float) => {
                state.write_u8(3);
                float.to_bits().hash(state);
            }
            FrozenValue::Text(text) => {
                state.write_u8(4);
                text.hash(state);
            }
            FrozenValue::Sequence(items) => {
                state.write_u8(5);
                items.hash(state);
            }
            FrozenValue::Mapping(entries) => {
                state.write_u8(6);
                // Entry-set hash: XOR of per-entry hashes, so mappings that
                // compare equal under IndexMap's order-insensitive equality
                // also hash equal.
                let mut combined: u64 = 0;
                for (key, value) in entries {
                    let mut entry_hasher = std::collections::hash_map::DefaultHasher::new();
                    key.hash(&mut entry_hasher);
                    value.hash(&mut entry_hasher);
                    combined ^= entry_hasher.finish();
                }
                state.write_u64(combined);
            }
        }
    }
}

impl Serialize for FrozenValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FrozenValue::Null => serializer.serialize_unit(),
            FrozenValue::Bool(flag) => serializer.serialize_bool(*flag),
            FrozenValue::Int(integer) => serializer.serialize_i64(*integer),
            FrozenValue::Float(float) => serializer.serialize_f64(*float),
            FrozenValue::Text(text) => serializer.serialize_str(text),
            FrozenValue::Sequence(items) => items.serialize(serializer),
            FrozenValue::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for FrozenValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FrozenVisitor;

        impl<'de> Visitor<'de> for FrozenVisitor {
            type Value = FrozenValue;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(FrozenValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(FrozenValue::Null)
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
                FrozenValue::deserialize(deserializer)
            }

            fn visit_bool<E: de::Error>(self, flag: bool) -> Result<Self::Value, E> {
                Ok(FrozenValue::Bool(flag))
            }

            fn visit_i64<E: de::Error>(self, integer: i64) -> Result<Self::Value, E> {
                Ok(FrozenValue::Int(integer))
            }

            fn visit_u64<E: de::Error>(self, integer: u64) -> Result<Self::Value, E> {
                if let Ok(signed) = i64::try_from(integer) {
                    Ok(FrozenValue::Int(signed))
                } else {
                    Ok(FrozenValue::Float(integer as f64))
                }
            }

            fn visit_f64<E: de::Error>(self, float: f64) -> Result<Self::Value, E> {
                Ok(FrozenValue::Float(float))
            }

            fn visit_str<E: de::Error>(self, text: &str) -> Result<Self::Value, E> {
                Ok(FrozenValue::Text(text.to_string()))
            }

            fn visit_string<E: de::Error>(self, text: String) -> Result<Self::Value, E> {
                Ok(FrozenValue::Text(text))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(item) = access.next_element()? {
                    items.push(item);
                }
                Ok(FrozenValue::Sequence(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, FrozenValue>()? {
                    entries.insert(key, value);
                }
                Ok(FrozenValue::Mapping(entries))
            }
        }

        deserializer.deserialize_any(FrozenVisitor)
    }
}
