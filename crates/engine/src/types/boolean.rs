//! Boolean parameters with implicit and explicit CLI parsing modes.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::errors::ParameterError;
use crate::types::contract::{CliAction, ParameterKind, ParameterType};

/// Process-wide default parsing mode, overridable via
/// [`BoolParameter::set_default_parsing`].
static DEFAULT_PARSING: AtomicU8 = AtomicU8::new(0);

/// CLI parsing mode for boolean parameters.
///
/// With *implicit* parsing the flag's presence alone means `true` and its
/// absence means `false`. With *explicit* parsing the flag accepts trailing
/// `true`/`false` text, and a bare occurrence still counts as `true`; use
/// it when the declared default is `true` and the flag must be able to turn
/// the value off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolParsing {
    /// Presence alone means `true`.
    Implicit,
    /// Accepts trailing `true`/`false` text.
    Explicit,
}

impl BoolParsing {
    fn as_u8(self) -> u8 {
        match self {
            BoolParsing::Implicit => 0,
            BoolParsing::Explicit => 1,
        }
    }

    fn from_u8(value: u8) -> Self {
        if value == 1 { BoolParsing::Explicit } else { BoolParsing::Implicit }
    }
}

/// Parameter whose value is a `bool`.
///
/// Declarations without an explicit default get an implicit default of
/// `false`, so an implicit flag that is simply absent resolves cleanly.
#[derive(Debug, Clone, Copy)]
pub struct BoolParameter {
    parsing: BoolParsing,
}

impl BoolParameter {
    /// Creates a boolean type using the process-wide default parsing mode.
    pub fn new() -> Self {
        Self {
            parsing: Self::default_parsing(),
        }
    }

    /// Creates a boolean type with a per-instance parsing mode.
    pub fn with_parsing(parsing: BoolParsing) -> Self {
        Self { parsing }
    }

    /// This instance's parsing mode.
    pub fn parsing(&self) -> BoolParsing {
        self.parsing
    }

    /// Overrides the parsing mode for every instance created afterwards.
    pub fn set_default_parsing(parsing: BoolParsing) {
        DEFAULT_PARSING.store(parsing.as_u8(), Ordering::Relaxed);
    }

    /// The current process-wide default parsing mode.
    pub fn default_parsing() -> BoolParsing {
        BoolParsing::from_u8(DEFAULT_PARSING.load(Ordering::Relaxed))
    }

    /// Lenient companion to `parse`: unparseable text is "no opinion"
    /// (`None`) instead of an error.
    pub fn parse_lenient(&self, raw: &str) -> Option<bool> {
        self.parse(raw).ok()
    }
}

impl Default for BoolParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterType for BoolParameter {
    type Value = bool;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ParameterError::invalid(raw, "'true' or 'false'")),
        }
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Bool
    }

    fn cli_action(&self) -> CliAction {
        match self.parsing {
            BoolParsing::Implicit => CliAction::SetTrue,
            BoolParsing::Explicit => CliAction::OptionalValue,
        }
    }

    fn implicit_default(&self) -> Option<Self::Value> {
        Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_true_false_case_insensitively() {
        let ty = BoolParameter::new();
        assert_eq!(ty.parse("true").unwrap(), true);
        assert_eq!(ty.parse("FALSE").unwrap(), false);
        assert_eq!(ty.parse("True").unwrap(), true);
    }

    #[test]
    fn unparseable_text_errors_from_parse_but_is_no_opinion_leniently() {
        let ty = BoolParameter::new();
        assert!(matches!(ty.parse("yes"), Err(ParameterError::InvalidValue { .. })));
        assert_eq!(ty.parse_lenient("yes"), None);
        assert_eq!(ty.parse_lenient("false"), Some(false));
    }

    #[test]
    fn parsing_mode_drives_cli_action() {
        assert_eq!(BoolParameter::with_parsing(BoolParsing::Implicit).cli_action(), CliAction::SetTrue);
        assert_eq!(
            BoolParameter::with_parsing(BoolParsing::Explicit).cli_action(),
            CliAction::OptionalValue
        );
    }

    #[test]
    fn carries_an_implicit_false_default() {
        assert_eq!(BoolParameter::new().implicit_default(), Some(false));
    }

    #[test]
    fn normalize_is_identity_on_typed_values() {
        let ty = BoolParameter::new();
        assert_eq!(ty.normalize(true).unwrap(), true);
        assert_eq!(ty.normalize(ty.normalize(true).unwrap()).unwrap(), true);
    }
}
