//! Text-format helpers shared across the Railyard crates.
//!
//! These routines have no knowledge of parameter declarations or resolution;
//! they turn wire/config text into values and back. The engine crate builds
//! its typed variants on top of them.

pub mod duration;
pub mod literal;

pub use duration::{DurationParseError, parse_duration, render_wdhms};
pub use literal::{LiteralParseError, parse_literal};
