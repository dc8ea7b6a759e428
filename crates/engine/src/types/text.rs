//! Plain text parameters.

use crate::errors::ParameterError;
use crate::types::contract::{ParameterKind, ParameterType};

/// Parameter whose value is plain text; the base variant every other type
/// specializes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParameter;

impl TextParameter {
    /// Creates the text type.
    pub fn new() -> Self {
        Self
    }
}

impl ParameterType for TextParameter {
    type Value = String;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        Ok(raw.to_string())
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.clone()
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_identity() {
        let ty = TextParameter::new();
        assert_eq!(ty.parse("hello").unwrap(), "hello");
        assert_eq!(ty.serialize(&"hello".to_string()), "hello");
        assert_eq!(ty.normalize("hello".to_string()).unwrap(), "hello");
    }
}
