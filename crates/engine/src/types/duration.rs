//! Elapsed-time parameters.

use chrono::TimeDelta;

use crate::errors::ParameterError;
use crate::types::contract::{ParameterKind, ParameterType};

/// Parameter whose value is a [`TimeDelta`].
///
/// Accepts bare seconds, ISO 8601 durations (`P1DT2H`, `P1W`), and the
/// natural short form (`"1 week 2 days"`); see `railyard_util::duration`
/// for the grammars. Serialization always renders all five units in
/// descending order, zeros included.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeDeltaParameter;

impl TimeDeltaParameter {
    /// Creates the duration type.
    pub fn new() -> Self {
        Self
    }
}

impl ParameterType for TimeDeltaParameter {
    type Value = TimeDelta;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        railyard_util::parse_duration(raw)
            .map_err(|_| ParameterError::invalid(raw, "seconds, an ISO 8601 duration, or 'n w n d n h n m n s'"))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        railyard_util::render_wdhms(*value)
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_form_round_trips_through_canonical_rendering() {
        let ty = TimeDeltaParameter::new();
        let parsed = ty.parse("1 week 2 days").unwrap();
        assert_eq!(ty.serialize(&parsed), "1 w 2 d 0 h 0 m 0 s");
        assert_eq!(ty.parse(&ty.serialize(&parsed)).unwrap(), parsed);
    }

    #[test]
    fn iso_weeks_equal_plain_days() {
        let ty = TimeDeltaParameter::new();
        assert_eq!(ty.parse("P1W").unwrap(), ty.parse("7 d").unwrap());
    }

    #[test]
    fn unparseable_text_is_invalid() {
        let ty = TimeDeltaParameter::new();
        assert!(matches!(ty.parse("eventually"), Err(ParameterError::InvalidValue { .. })));
    }
}
