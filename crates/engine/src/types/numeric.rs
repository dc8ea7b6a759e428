//! Integer, float, and ranged numeric parameters.

use std::fmt;
use std::str::FromStr;

use crate::errors::ParameterError;
use crate::types::contract::{ParameterKind, ParameterType};

/// Parameter whose value is an `i64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntParameter;

impl IntParameter {
    /// Creates the integer type.
    pub fn new() -> Self {
        Self
    }
}

impl ParameterType for IntParameter {
    type Value = i64;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        raw.trim().parse().map_err(|_| ParameterError::invalid(raw, "an integer"))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn next_in_enumeration(&self, value: &Self::Value) -> Option<Self::Value> {
        value.checked_add(1)
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Int
    }
}

/// Parameter whose value is an `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatParameter;

impl FloatParameter {
    /// Creates the float type.
    pub fn new() -> Self {
        Self
    }
}

impl ParameterType for FloatParameter {
    type Value = f64;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        raw.trim().parse().map_err(|_| ParameterError::invalid(raw, "a number"))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Float
    }
}

/// Whether a range endpoint includes its boundary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    /// The boundary value is permitted.
    Inclusive,
    /// The boundary value is excluded.
    Exclusive,
}

/// Parameter whose value is a number restricted to a range.
///
/// The default bounds are `min ≤ x < max`; both endpoints can be flipped
/// independently. Violations render the permitted interval with brackets
/// and parentheses reflecting inclusivity, e.g. `i64 in [-3, 7)`.
#[derive(Debug, Clone, Copy)]
pub struct NumericalParameter<T> {
    min_value: T,
    max_value: T,
    lower: RangeBound,
    upper: RangeBound,
}

impl<T> NumericalParameter<T>
where
    T: Copy + PartialOrd + FromStr + fmt::Display + fmt::Debug,
{
    /// Creates a range with the default `min ≤ x < max` bounds.
    pub fn new(min_value: T, max_value: T) -> Self {
        Self::with_bounds(min_value, max_value, RangeBound::Inclusive, RangeBound::Exclusive)
    }

    /// Creates a range with explicit endpoint inclusivity.
    pub fn with_bounds(min_value: T, max_value: T, lower: RangeBound, upper: RangeBound) -> Self {
        Self {
            min_value,
            max_value,
            lower,
            upper,
        }
    }

    fn admits(&self, value: T) -> bool {
        let lower_ok = match self.lower {
            RangeBound::Inclusive => self.min_value <= value,
            RangeBound::Exclusive => self.min_value < value,
        };
        let upper_ok = match self.upper {
            RangeBound::Inclusive => value <= self.max_value,
            RangeBound::Exclusive => value < self.max_value,
        };
        lower_ok && upper_ok
    }

    fn permitted_range(&self) -> String {
        format!(
            "{} in {}{}, {}{}",
            type_label::<T>(),
            if self.lower == RangeBound::Inclusive { "[" } else { "(" },
            self.min_value,
            self.max_value,
            if self.upper == RangeBound::Inclusive { "]" } else { ")" },
        )
    }
}

fn type_label<T>() -> &'static str {
    std::any::type_name::<T>().rsplit("::").next().unwrap_or("value")
}

impl<T> ParameterType for NumericalParameter<T>
where
    T: Copy + PartialOrd + FromStr + fmt::Display + fmt::Debug,
{
    type Value = T;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        let value: T = raw
            .trim()
            .parse()
            .map_err(|_| ParameterError::invalid(raw, self.permitted_range()))?;
        if self.admits(value) {
            Ok(value)
        } else {
            Err(ParameterError::invalid(raw, self.permitted_range()))
        }
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Numeric
    }

    fn describe_domain(&self) -> Option<String> {
        Some(format!("permitted values: {}", self.permitted_range()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_parses_and_enumerates() {
        let ty = IntParameter::new();
        assert_eq!(ty.parse("42").unwrap(), 42);
        assert_eq!(ty.parse(" -5 ").unwrap(), -5);
        assert!(ty.parse("4.2").is_err());
        assert_eq!(ty.next_in_enumeration(&41), Some(42));
        assert_eq!(ty.next_in_enumeration(&i64::MAX), None);
    }

    #[test]
    fn float_round_trips() {
        let ty = FloatParameter::new();
        let value = ty.parse("2.5").unwrap();
        assert_eq!(value, 2.5);
        assert_eq!(ty.parse(&ty.serialize(&value)).unwrap(), value);
    }

    #[test]
    fn default_bounds_are_half_open() {
        let ty: NumericalParameter<i64> = NumericalParameter::new(-3, 7);
        assert_eq!(ty.parse("-3").unwrap(), -3);
        assert_eq!(ty.parse("6").unwrap(), 6);
        assert!(matches!(ty.parse("7"), Err(ParameterError::InvalidValue { .. })));
        assert!(matches!(ty.parse("-4"), Err(ParameterError::InvalidValue { .. })));
    }

    #[test]
    fn violation_message_renders_inclusivity() {
        let ty: NumericalParameter<i64> = NumericalParameter::new(-3, 7);
        let error = ty.parse("7").unwrap_err();
        assert!(error.to_string().contains("i64 in [-3, 7)"), "unexpected message: {error}");

        let closed: NumericalParameter<i64> =
            NumericalParameter::with_bounds(-3, 7, RangeBound::Exclusive, RangeBound::Inclusive);
        assert_eq!(closed.parse("7").unwrap(), 7);
        assert!(closed.parse("-3").unwrap_err().to_string().contains("(-3, 7]"));
    }

    #[test]
    fn float_ranges_work() {
        let ty: NumericalParameter<f64> = NumericalParameter::new(0.0, 1.0);
        assert_eq!(ty.parse("0.25").unwrap(), 0.25);
        assert!(ty.parse("1.0").is_err());
    }
}
