//! The typed variant family.
//!
//! Every parameter type implements the shared [`ParameterType`] contract
//! (parse, serialize, normalize, enumeration stepping, and diagnostics) as a
//! member of a closed set. The resolution algorithm and the optional wrapper
//! operate generically over the contract and never inspect concrete types.

mod boolean;
mod choice;
mod composite;
mod contract;
mod date;
mod datetime;
mod duration;
mod enumeration;
mod numeric;
mod optional;
mod path;
mod task;
mod text;

pub use boolean::{BoolParameter, BoolParsing};
pub use choice::ChoiceParameter;
pub use composite::{DictParameter, ListParameter, TupleParameter};
pub use contract::{CliAction, ParameterKind, ParameterType};
pub use date::{DateParameter, MonthParameter, YearParameter};
pub use datetime::{DateHourParameter, DateMinuteParameter, DateSecondParameter};
pub use duration::TimeDeltaParameter;
pub use enumeration::{EnumListParameter, EnumParameter, NamedEnum};
pub use numeric::{FloatParameter, IntParameter, NumericalParameter, RangeBound};
pub use optional::Optional;
pub use path::PathParameter;
pub use task::TaskParameter;
pub use text::TextParameter;
