//! The shared contract every parameter type implements.

use std::fmt;

use crate::errors::ParameterError;

/// Declared kind tag for a parameter type.
///
/// Diagnostics compare these tags instead of inspecting runtime types; the
/// tag also tells CLI front ends what they are registering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Plain text.
    Text,
    /// Boolean flag.
    Bool,
    /// Integer.
    Int,
    /// Floating-point number.
    Float,
    /// Ranged numeric value.
    Numeric,
    /// Calendar date (day, month, or year granularity).
    Date,
    /// Date and time-of-day.
    DateTime,
    /// Elapsed-time duration.
    Duration,
    /// Named enumeration constant.
    Enum,
    /// Comma-separated list of enumeration constants.
    EnumList,
    /// JSON-decoded mapping.
    Mapping,
    /// JSON-decoded sequence.
    Sequence,
    /// Tuple (sequence accepted in both JSON and tuple-literal text).
    Tuple,
    /// Filesystem path.
    Path,
    /// Value restricted to a finite choice set.
    Choice,
    /// Reference to a registered task family.
    TaskFamily,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ParameterKind::Text => "text",
            ParameterKind::Bool => "bool",
            ParameterKind::Int => "int",
            ParameterKind::Float => "float",
            ParameterKind::Numeric => "numeric",
            ParameterKind::Date => "date",
            ParameterKind::DateTime => "datetime",
            ParameterKind::Duration => "duration",
            ParameterKind::Enum => "enum",
            ParameterKind::EnumList => "enum list",
            ParameterKind::Mapping => "mapping",
            ParameterKind::Sequence => "sequence",
            ParameterKind::Tuple => "tuple",
            ParameterKind::Path => "path",
            ParameterKind::Choice => "choice",
            ParameterKind::TaskFamily => "task family",
        };
        formatter.write_str(label)
    }
}

/// How a CLI front end should register a parameter's argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CliAction {
    /// Store the following raw text.
    #[default]
    Store,
    /// Presence alone stores `true` (implicit boolean parsing).
    SetTrue,
    /// Optional trailing text; a bare occurrence stores `true` (explicit
    /// boolean parsing).
    OptionalValue,
}

/// Parse/serialize/normalize contract shared by the closed variant set.
///
/// `parse` turns raw source text into the typed value, `serialize` is its
/// inverse, and `normalize` clamps or validates a parsed value into
/// canonical form. Normalization must be idempotent, and
/// `parse(serialize(x))` must reproduce `x` up to normalization.
pub trait ParameterType {
    /// The in-memory value a task sees for this parameter.
    type Value: Clone + fmt::Debug + PartialEq;

    /// Parses an individual raw text value from a source.
    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError>;

    /// Renders the value back to its canonical text form.
    fn serialize(&self, value: &Self::Value) -> String;

    /// Clamps or validates a parsed value. The default is the identity.
    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        Ok(value)
    }

    /// The next value in this type's enumeration order, when one exists.
    /// Used for pretty-printing runs of adjacent task instances.
    fn next_in_enumeration(&self, _value: &Self::Value) -> Option<Self::Value> {
        None
    }

    /// Declared kind tag for this type.
    fn kind(&self) -> ParameterKind;

    /// Emits a non-fatal notice when a resolved value's runtime shape
    /// disagrees with the declared kind. Only dynamically shaped values
    /// (frozen composites) can disagree, so the default is a no-op.
    fn warn_on_wrong_type(&self, _name: &str, _value: &Self::Value) {}

    /// How a CLI front end should register this parameter's argument.
    fn cli_action(&self) -> CliAction {
        CliAction::Store
    }

    /// Human-readable description of the accepted domain, appended to help
    /// text (choice sets, permitted ranges).
    fn describe_domain(&self) -> Option<String> {
        None
    }

    /// Default value implied by the type when a declaration carries none.
    fn implicit_default(&self) -> Option<Self::Value> {
        None
    }
}
