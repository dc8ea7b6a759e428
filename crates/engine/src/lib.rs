//! # Railyard Engine
//!
//! The Railyard engine resolves and type-checks the declarative parameters
//! attached to units of work in a workflow definition. Every parameter is
//! declared once on a task definition, then resolved per instance from a
//! strictly prioritized set of sources (the active CLI session, the config
//! file, a deprecated legacy config location, and finally the declared
//! default), and the winning raw text is parsed, normalized, and handed to
//! the task as a stable, hashable value.
//!
//! ## Key pieces
//!
//! - **`parameter`**: declarations, the resolution algorithm, batch
//!   composition, and CLI-registration metadata
//! - **`types`**: the closed typed variant family behind the shared
//!   [`ParameterType`] contract, plus the [`Optional`] wrapper
//! - **`sources`**: the CLI/config source boundary and in-memory
//!   implementations
//! - **`registry`**: the task-registry boundary used by task-reference
//!   parameters
//!
//! ## Usage
//!
//! ```rust
//! use railyard_engine::{MemoryConfig, Parameter, ResolutionContext};
//! use railyard_engine::types::IntParameter;
//!
//! let retries = Parameter::builder(IntParameter::new()).default_value(3).build();
//!
//! let mut config = MemoryConfig::new();
//! config.set("nightly_report", "retries", "5");
//! let context = ResolutionContext::new().with_config(&config);
//!
//! assert_eq!(retries.require(&context, "nightly_report", "retries")?, 5);
//! # Ok::<(), railyard_engine::ParameterError>(())
//! ```
//!
//! Fatal conditions surface as [`ParameterError`]; deprecated input paths
//! and type mismatches are reported as non-fatal `tracing` warnings and
//! execution continues with the resolved value.

pub mod errors;
pub mod parameter;
pub mod registry;
pub mod sources;
pub mod types;

pub use errors::ParameterError;
pub use parameter::{
    BatchCombinator, CliRegistration, ConfigLocation, DeclarationCounter, Parameter, ParameterBuilder, cli_destination,
    process_declaration_counter,
};
pub use registry::{MemoryTaskRegistry, TaskHandle, TaskRegistry};
pub use sources::{CliSession, CliSource, ConfigSource, MemoryConfig, ResolutionContext};
pub use types::{CliAction, Optional, ParameterKind, ParameterType};

// The shared value types live in `railyard-types`; re-export the ones that
// appear in this crate's public signatures.
pub use railyard_types::{FrozenValue, ParameterVisibility, ValueKind, freeze};
