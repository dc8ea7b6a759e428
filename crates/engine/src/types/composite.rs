//! Composite parameters: mappings, sequences, and tuples.
//!
//! Composite values are decoded from structured text and canonicalized into
//! [`FrozenValue`] so they can participate in task identity. Mapping text is
//! any JSON document; sequence text is a JSON array. Tuple text is accepted
//! in two forms, because a tuple serializes differently from a decoded
//! list: JSON (`[[1, 2], [3, 4]]`) is tried first, then the restricted
//! literal grammar (`((1,2),(3,4))`).

use railyard_types::{FrozenValue, ValueKind};
use tracing::warn;

use crate::errors::ParameterError;
use crate::types::contract::{ParameterKind, ParameterType};

fn warn_kind_mismatch(name: &str, expected: ValueKind, value: &FrozenValue) {
    if value.kind() != expected {
        warn!(
            parameter = name,
            expected = %expected,
            actual = %value.kind(),
            "resolved value does not have the declared shape"
        );
    }
}

/// Parameter whose value is a JSON-decoded mapping.
///
/// The decoded document is frozen so the value is hashable and its key
/// order is exactly the document's key order; a `HashMap` here would make
/// task identity depend on incidental iteration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictParameter;

impl DictParameter {
    /// Creates the mapping type.
    pub fn new() -> Self {
        Self
    }
}

impl ParameterType for DictParameter {
    type Value = FrozenValue;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        serde_json::from_str(raw).map_err(|_| ParameterError::invalid(raw, "a JSON document"))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        serde_json::to_string(value).expect("frozen value serialization cannot fail")
    }

    // Values are frozen on parse; normalizing again is the identity.

    fn kind(&self) -> ParameterKind {
        ParameterKind::Mapping
    }

    fn warn_on_wrong_type(&self, name: &str, value: &Self::Value) {
        warn_kind_mismatch(name, ValueKind::Mapping, value);
    }
}

/// Parameter whose value is a JSON-decoded sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListParameter;

impl ListParameter {
    /// Creates the sequence type.
    pub fn new() -> Self {
        Self
    }
}

impl ParameterType for ListParameter {
    type Value = FrozenValue;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        match serde_json::from_str::<FrozenValue>(raw) {
            Ok(value @ FrozenValue::Sequence(_)) => Ok(value),
            _ => Err(ParameterError::invalid(raw, "a JSON array")),
        }
    }

    fn serialize(&self, value: &Self::Value) -> String {
        serde_json::to_string(value).expect("frozen value serialization cannot fail")
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Sequence
    }

    fn warn_on_wrong_type(&self, name: &str, value: &Self::Value) {
        warn_kind_mismatch(name, ValueKind::Sequence, value);
    }
}

/// Parameter whose value is a tuple (or tuple of tuples).
///
/// JSON decoding is attempted first; any failure falls through to the
/// literal grammar. Both paths reject anything that is not a sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct TupleParameter;

impl TupleParameter {
    /// Creates the tuple type.
    pub fn new() -> Self {
        Self
    }
}

impl ParameterType for TupleParameter {
    type Value = FrozenValue;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        if let Ok(value @ FrozenValue::Sequence(_)) = serde_json::from_str::<FrozenValue>(raw) {
            return Ok(value);
        }
        match railyard_util::parse_literal(raw) {
            Ok(value @ FrozenValue::Sequence(_)) => Ok(value),
            _ => Err(ParameterError::invalid(
                raw,
                "a JSON array or a tuple literal like ((1,2),(3,4))",
            )),
        }
    }

    fn serialize(&self, value: &Self::Value) -> String {
        serde_json::to_string(value).expect("frozen value serialization cannot fail")
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Tuple
    }

    fn warn_on_wrong_type(&self, name: &str, value: &Self::Value) {
        warn_kind_mismatch(name, ValueKind::Sequence, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dict_parses_and_preserves_key_order() {
        let ty = DictParameter::new();
        let value = ty.parse(r#"{"role": "web", "env": "staging"}"#).unwrap();
        let keys: Vec<&String> = value.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["role", "env"]);
        assert_eq!(ty.serialize(&value), r#"{"role":"web","env":"staging"}"#);
    }

    #[test]
    fn dict_round_trips_through_serialize() {
        let ty = DictParameter::new();
        let value = ty.parse(r#"{"a": {"b": [1, 2]}}"#).unwrap();
        assert_eq!(ty.parse(&ty.serialize(&value)).unwrap(), value);
    }

    #[test]
    fn dict_rejects_malformed_json() {
        let ty = DictParameter::new();
        assert!(matches!(ty.parse("{not json"), Err(ParameterError::InvalidValue { .. })));
    }

    #[test]
    fn normalize_is_idempotent_on_frozen_values() {
        let ty = DictParameter::new();
        let value = ty.parse(r#"{"a": [1, {"b": 2}]}"#).unwrap();
        let once = ty.normalize(value.clone()).unwrap();
        assert_eq!(once, value);
        assert_eq!(ty.normalize(once.clone()).unwrap(), once);
    }

    #[test]
    fn list_requires_an_array() {
        let ty = ListParameter::new();
        let value = ty.parse("[100, 70]").unwrap();
        assert_eq!(
            value.as_sequence().unwrap(),
            &[FrozenValue::Int(100), FrozenValue::Int(70)]
        );
        assert!(ty.parse(r#"{"a": 1}"#).is_err());
        assert!(ty.parse("5").is_err());
    }

    #[test]
    fn tuple_accepts_json_and_tuple_literals() {
        let ty = TupleParameter::new();
        let from_json = ty.parse("[[1, 2], [3, 4]]").unwrap();
        let from_literal = ty.parse("((1,2),(3,4))").unwrap();
        assert_eq!(from_json, from_literal);
    }

    #[test]
    fn tuple_accepts_flat_forms_through_the_fallback() {
        let ty = TupleParameter::new();
        assert_eq!(
            ty.parse("(1, 2)").unwrap(),
            FrozenValue::Sequence(vec![FrozenValue::Int(1), FrozenValue::Int(2)])
        );
        assert_eq!(ty.parse("[1, 2]").unwrap(), ty.parse("(1, 2)").unwrap());
    }

    #[test]
    fn tuple_rejects_scalars_on_both_paths() {
        let ty = TupleParameter::new();
        assert!(ty.parse("5").is_err());
        assert!(ty.parse("'text'").is_err());
        assert!(ty.parse("1 + 2").is_err());
    }
}
