//! Shared value types for the Railyard parameter core.
//!
//! The models defined here are consumed by the resolution engine and by any
//! embedding scheduler or CLI: the canonical frozen value used for task
//! identity derivation, the runtime kind tags used by non-fatal type
//! diagnostics, and the parameter visibility levels. They intentionally
//! preserve insertion order (via `IndexMap`) so identity serialization is
//! deterministic across runs and process restarts.

pub mod frozen;
pub mod visibility;

pub use frozen::{FrozenValue, ValueKind, freeze};
pub use visibility::ParameterVisibility;
