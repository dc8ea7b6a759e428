//! The optional wrapper, composable with any parameter type.

use crate::errors::ParameterError;
use crate::types::contract::{CliAction, ParameterKind, ParameterType};

/// Makes any parameter type optional, treating empty text as absent.
///
/// `parse` turns the empty string into `None` and delegates everything else
/// to the wrapped type; `serialize` renders `None` as the empty string;
/// `normalize` passes `None` through untouched. Type-mismatch diagnostics
/// fire only for present values and are delegated to the wrapped type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optional<P: ParameterType> {
    inner: P,
}

impl<P: ParameterType> Optional<P> {
    /// Wraps a parameter type.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// The wrapped type.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: ParameterType> ParameterType for Optional<P> {
    type Value = Option<P::Value>;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        if raw.is_empty() {
            Ok(None)
        } else {
            self.inner.parse(raw).map(Some)
        }
    }

    fn serialize(&self, value: &Self::Value) -> String {
        match value {
            None => String::new(),
            Some(inner_value) => self.inner.serialize(inner_value),
        }
    }

    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        match value {
            None => Ok(None),
            Some(inner_value) => self.inner.normalize(inner_value).map(Some),
        }
    }

    fn next_in_enumeration(&self, value: &Self::Value) -> Option<Self::Value> {
        value
            .as_ref()
            .and_then(|inner_value| self.inner.next_in_enumeration(inner_value))
            .map(Some)
    }

    fn kind(&self) -> ParameterKind {
        self.inner.kind()
    }

    fn warn_on_wrong_type(&self, name: &str, value: &Self::Value) {
        if let Some(inner_value) = value {
            self.inner.warn_on_wrong_type(name, inner_value);
        }
    }

    fn cli_action(&self) -> CliAction {
        self.inner.cli_action()
    }

    fn describe_domain(&self) -> Option<String> {
        self.inner.describe_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::numeric::IntParameter;
    use crate::types::text::TextParameter;

    #[test]
    fn empty_text_parses_to_none() {
        let ty = Optional::new(IntParameter::new());
        assert_eq!(ty.parse("").unwrap(), None);
        assert_eq!(ty.parse("3").unwrap(), Some(3));
    }

    #[test]
    fn none_serializes_to_empty_text() {
        let ty = Optional::new(TextParameter::new());
        assert_eq!(ty.serialize(&None), "");
        assert_eq!(ty.serialize(&Some("x".to_string())), "x");
    }

    #[test]
    fn normalize_passes_none_through() {
        let ty = Optional::new(IntParameter::new());
        assert_eq!(ty.normalize(None).unwrap(), None);
        assert_eq!(ty.normalize(Some(4)).unwrap(), Some(4));
    }

    #[test]
    fn inner_parse_errors_still_surface() {
        let ty = Optional::new(IntParameter::new());
        assert!(matches!(ty.parse("abc"), Err(ParameterError::InvalidValue { .. })));
    }

    #[test]
    fn enumeration_steps_inside_the_option() {
        let ty = Optional::new(IntParameter::new());
        assert_eq!(ty.next_in_enumeration(&Some(1)), Some(Some(2)));
        assert_eq!(ty.next_in_enumeration(&None), None);
    }
}
