//! Choice parameters: values restricted to a finite set of one type.

use std::fmt;
use std::str::FromStr;

use crate::errors::ParameterError;
use crate::types::contract::{ParameterKind, ParameterType};

/// Parameter whose value must be a member of a declared choice set.
///
/// All choices share the declared value type; that homogeneity is enforced
/// by the signature. Membership is validated by `normalize`, so values
/// arriving from any direction (parse, default, batch) hit the same check.
/// Prefer an enumerated parameter when the constants deserve names; a
/// choice set keeps the raw values transparent on the command line.
#[derive(Debug, Clone)]
pub struct ChoiceParameter<T> {
    choices: Vec<T>,
}

impl<T> ChoiceParameter<T>
where
    T: Clone + PartialEq + FromStr + fmt::Display + fmt::Debug,
{
    /// Creates a choice set. Declaration order is kept for help text.
    pub fn new(choices: impl IntoIterator<Item = T>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    fn rendered_choices(&self) -> String {
        self.choices.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}

impl<T> ParameterType for ChoiceParameter<T>
where
    T: Clone + PartialEq + FromStr + fmt::Display + fmt::Debug,
{
    type Value = T;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        let value: T = raw
            .trim()
            .parse()
            .map_err(|_| ParameterError::invalid(raw, format!("one of {{{}}}", self.rendered_choices())))?;
        self.normalize(value)
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.to_string()
    }

    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        if self.choices.contains(&value) {
            Ok(value)
        } else {
            Err(ParameterError::invalid(
                value.to_string(),
                format!("one of {{{}}}", self.rendered_choices()),
            ))
        }
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Choice
    }

    fn describe_domain(&self) -> Option<String> {
        Some(format!("Choices: {{{}}}", self.rendered_choices()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_parse_and_round_trip() {
        let ty = ChoiceParameter::new([0.1_f64, 0.2, 0.3]);
        let value = ty.parse("0.2").unwrap();
        assert_eq!(value, 0.2);
        assert_eq!(ty.parse(&ty.serialize(&value)).unwrap(), value);
    }

    #[test]
    fn non_members_are_invalid() {
        let ty = ChoiceParameter::new(["red".to_string(), "green".to_string()]);
        let error = ty.parse("blue").unwrap_err();
        assert!(error.to_string().contains("red, green"));
    }

    #[test]
    fn normalize_validates_membership_directly() {
        let ty = ChoiceParameter::new([1_i64, 2, 3]);
        assert_eq!(ty.normalize(2).unwrap(), 2);
        assert!(matches!(ty.normalize(9), Err(ParameterError::InvalidValue { .. })));
    }

    #[test]
    fn domain_description_lists_choices() {
        let ty = ChoiceParameter::new([1_i64, 2]);
        assert_eq!(ty.describe_domain().unwrap(), "Choices: {1, 2}");
    }
}
