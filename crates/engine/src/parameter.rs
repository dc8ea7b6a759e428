//! Parameter declarations and the resolution algorithm.
//!
//! A [`Parameter`] pairs declaration metadata (default, significance,
//! visibility, ordering, legacy config pointer) with one member of the typed
//! variant family. Resolution walks a strictly ordered candidate list (CLI
//! session, config file, deprecated config location, declared default) and
//! the first present value wins. Declarations are immutable after
//! construction and freely shareable across task instances.

use std::sync::atomic::{AtomicU64, Ordering};

use railyard_types::ParameterVisibility;
use tracing::warn;

use crate::errors::ParameterError;
use crate::sources::ResolutionContext;
use crate::types::{CliAction, ParameterType};

/// Monotonic source of declaration ordinals.
///
/// Ordinals preserve declaration order for display and CLI ordering. They
/// are unique and monotonic under concurrent declaration, but not
/// necessarily gap-free.
#[derive(Debug, Default)]
pub struct DeclarationCounter(AtomicU64);

impl DeclarationCounter {
    /// Creates a counter starting at zero.
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Claims the next ordinal.
    pub fn next_ordinal(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// The process-wide counter used when no counter is injected.
pub fn process_declaration_counter() -> &'static DeclarationCounter {
    static COUNTER: DeclarationCounter = DeclarationCounter::new();
    &COUNTER
}

/// A deprecated `(section, name)` config location a parameter may still be
/// read from. Both fields are mandatory by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// Config file section.
    pub section: String,
    /// Option name within the section.
    pub name: String,
}

impl ConfigLocation {
    /// Creates a config location.
    pub fn new(section: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            name: name.into(),
        }
    }
}

/// Reduction combinator merging many parsed values into one. Declared on
/// parameters whose semantics allow it (unions, sums, maxima).
pub type BatchCombinator<V> = fn(Vec<V>) -> V;

/// Computes the global CLI destination key for a parameter.
///
/// With a family the key is `family_paramname`; without one (the root task
/// on a command line) it is the bare parameter name.
pub fn cli_destination(family: Option<&str>, name: &str) -> String {
    match family {
        Some(family) => format!("{family}_{name}"),
        None => name.to_string(),
    }
}

/// Everything a CLI front end needs to register one parameter's argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliRegistration {
    /// Global destination key the raw value will be stored under.
    pub destination: String,
    /// Whether the argument may be supplied positionally.
    pub positional: bool,
    /// How the argument consumes text.
    pub action: CliAction,
    /// Whether the argument appears in `--help` output.
    pub visible_in_help: bool,
    /// Help text: the description plus the variant's domain description.
    pub help: Option<String>,
    /// Declaration ordinal, for stable argument ordering.
    pub ordinal: u64,
}

/// A declared, typed parameter on a task definition.
///
/// Construction goes through [`Parameter::builder`]; the result is
/// immutable. The type parameter `P` selects the variant and with it the
/// value type tasks receive.
#[derive(Debug, Clone)]
pub struct Parameter<P: ParameterType> {
    ty: P,
    default: Option<P::Value>,
    significant: bool,
    positional: bool,
    visibility: ParameterVisibility,
    description: Option<String>,
    always_in_help: bool,
    legacy_location: Option<ConfigLocation>,
    batch_combinator: Option<BatchCombinator<P::Value>>,
    ordinal: u64,
}

impl<P: ParameterType> Parameter<P> {
    /// Declares a parameter with all defaults.
    pub fn new(ty: P) -> Self {
        Self::builder(ty).build()
    }

    /// Starts a declaration.
    pub fn builder(ty: P) -> ParameterBuilder<P> {
        ParameterBuilder::new(ty)
    }

    /// The underlying variant.
    pub fn ty(&self) -> &P {
        &self.ty
    }

    /// The declared (or type-implied) default, if any.
    pub fn default(&self) -> Option<&P::Value> {
        self.default.as_ref()
    }

    /// Whether this parameter participates in task identity.
    pub fn significant(&self) -> bool {
        self.significant
    }

    /// Whether this parameter may be supplied positionally.
    pub fn positional(&self) -> bool {
        self.positional
    }

    /// Where this parameter's value may be shown.
    pub fn visibility(&self) -> ParameterVisibility {
        self.visibility
    }

    /// Human-readable purpose of the parameter.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the parameter is always listed in help output.
    pub fn always_in_help(&self) -> bool {
        self.always_in_help
    }

    /// Declaration ordinal.
    pub fn ordinal(&self) -> u64 {
        self.ordinal
    }

    /// Parses one raw text value.
    pub fn parse(&self, raw: &str) -> Result<P::Value, ParameterError> {
        self.ty.parse(raw)
    }

    /// Renders a value back to text.
    pub fn serialize(&self, value: &P::Value) -> String {
        self.ty.serialize(value)
    }

    /// Clamps/validates a parsed value.
    pub fn normalize(&self, value: P::Value) -> Result<P::Value, ParameterError> {
        self.ty.normalize(value)
    }

    /// The next value in the variant's enumeration order, when one exists.
    pub fn next_in_enumeration(&self, value: &P::Value) -> Option<P::Value> {
        self.ty.next_in_enumeration(value)
    }

    /// Whether a batch combinator was declared.
    pub fn is_batchable(&self) -> bool {
        self.batch_combinator.is_some()
    }

    /// Parses a batch of raw values and reduces them into one.
    ///
    /// Fails with [`ParameterError::Misconfigured`] when no combinator was
    /// declared and with [`ParameterError::EmptyBatch`] on empty input.
    pub fn parse_batch<S: AsRef<str>>(&self, raws: &[S]) -> Result<P::Value, ParameterError> {
        let combine = self.batch_combinator.ok_or_else(|| ParameterError::Misconfigured {
            reason: "no batch combinator declared".to_string(),
        })?;
        if raws.is_empty() {
            return Err(ParameterError::EmptyBatch);
        }
        let parsed = raws.iter().map(|raw| self.ty.parse(raw.as_ref())).collect::<Result<Vec<_>, _>>()?;
        Ok(combine(parsed))
    }

    /// Resolves the first present value for `(family, name)`.
    ///
    /// Candidates are tried strictly in order and evaluation stops at the
    /// first hit:
    ///
    /// 1. the active CLI session, under the global destination key; empty
    ///    raw text counts as absent;
    /// 2. the config file at `(family, name)`;
    /// 3. the config file at the declared legacy location (deprecated;
    ///    emits a notice naming the old and new locations);
    /// 4. the declared default.
    ///
    /// The winning raw text goes through `parse`; the result is not
    /// normalized here, since presence checks must not validate.
    pub fn resolve(&self, context: &ResolutionContext<'_>, family: &str, name: &str) -> Result<Option<P::Value>, ParameterError> {
        if let Some(cli) = context.cli() {
            let destination = cli_destination(Some(family), name);
            if let Some(raw) = cli.value_of(&destination)
                && !raw.is_empty()
            {
                return self.ty.parse(&raw).map(Some);
            }
        }
        if let Some(config) = context.config() {
            if let Some(raw) = config.value_of(family, name) {
                return self.ty.parse(&raw).map(Some);
            }
            // Deprecated compatibility branch: the legacy (section, name)
            // location still resolves, with a notice.
            if let Some(location) = &self.legacy_location
                && let Some(raw) = config.value_of(&location.section, &location.name)
            {
                warn!(
                    old_section = %location.section,
                    old_name = %location.name,
                    new_section = %family,
                    new_name = %name,
                    "configuration location is deprecated; move the value to its current location"
                );
                return self.ty.parse(&raw).map(Some);
            }
        }
        Ok(self.default.clone())
    }

    /// Whether any candidate source yields a value.
    pub fn has_value(&self, context: &ResolutionContext<'_>, family: &str, name: &str) -> Result<bool, ParameterError> {
        Ok(self.resolve(context, family, name)?.is_some())
    }

    /// Resolves and normalizes the value, failing when every candidate is
    /// absent.
    pub fn require(&self, context: &ResolutionContext<'_>, family: &str, name: &str) -> Result<P::Value, ParameterError> {
        let resolved = self
            .resolve(context, family, name)?
            .ok_or_else(|| ParameterError::MissingValue { name: name.to_string() })?;
        let normalized = self.ty.normalize(resolved)?;
        self.ty.warn_on_wrong_type(name, &normalized);
        Ok(normalized)
    }

    /// Registration metadata for a CLI front end.
    pub fn cli_registration(&self, family: Option<&str>, name: &str) -> CliRegistration {
        let help = match (self.description.clone(), self.ty.describe_domain()) {
            (Some(description), Some(domain)) => Some(format!("{description} {domain}")),
            (None, Some(domain)) => Some(domain),
            (description, None) => description,
        };
        CliRegistration {
            destination: cli_destination(family, name),
            positional: self.positional,
            action: self.ty.cli_action(),
            visible_in_help: self.visibility.is_public() || self.always_in_help,
            help,
            ordinal: self.ordinal,
        }
    }
}

/// Builder for [`Parameter`] declarations.
#[derive(Debug)]
pub struct ParameterBuilder<P: ParameterType> {
    ty: P,
    default: Option<P::Value>,
    significant: bool,
    positional: bool,
    visibility: ParameterVisibility,
    description: Option<String>,
    always_in_help: bool,
    legacy_location: Option<ConfigLocation>,
    batch_combinator: Option<BatchCombinator<P::Value>>,
}

impl<P: ParameterType> ParameterBuilder<P> {
    fn new(ty: P) -> Self {
        Self {
            ty,
            default: None,
            significant: true,
            positional: true,
            visibility: ParameterVisibility::Public,
            description: None,
            always_in_help: false,
            legacy_location: None,
            batch_combinator: None,
        }
    }

    /// Declares the default value.
    pub fn default_value(mut self, value: P::Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Excludes the parameter from task identity when `false` (passwords
    /// and other values that must not differentiate otherwise equal tasks).
    pub fn significant(mut self, significant: bool) -> Self {
        self.significant = significant;
        self
    }

    /// Allows or forbids positional supply on the command line.
    pub fn positional(mut self, positional: bool) -> Self {
        self.positional = positional;
        self
    }

    /// Sets the visibility level.
    pub fn visibility(mut self, visibility: ParameterVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Sets the human-readable description used as CLI help.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Always lists the parameter in help output, regardless of visibility.
    pub fn always_in_help(mut self, always_in_help: bool) -> Self {
        self.always_in_help = always_in_help;
        self
    }

    /// Declares a deprecated legacy config location the value may still be
    /// read from.
    pub fn legacy_location(mut self, section: impl Into<String>, name: impl Into<String>) -> Self {
        self.legacy_location = Some(ConfigLocation::new(section, name));
        self
    }

    /// Declares the batch combinator enabling batch composition.
    pub fn batch_combinator(mut self, combinator: BatchCombinator<P::Value>) -> Self {
        self.batch_combinator = Some(combinator);
        self
    }

    /// Deprecated compatibility flag; forces `positional = false`.
    pub fn is_global(mut self, is_global: bool) -> Self {
        if is_global {
            warn!("is_global support is removed; assuming positional = false");
            self.positional = false;
        }
        self
    }

    /// Finishes the declaration using the process-wide ordinal counter.
    pub fn build(self) -> Parameter<P> {
        self.build_with_counter(process_declaration_counter())
    }

    /// Finishes the declaration drawing the ordinal from an injected
    /// counter (deterministic ordinals for tests).
    pub fn build_with_counter(self, counter: &DeclarationCounter) -> Parameter<P> {
        let ordinal = counter.next_ordinal();
        let default = self.default.or_else(|| self.ty.implicit_default());
        Parameter {
            ty: self.ty,
            default,
            significant: self.significant,
            positional: self.positional,
            visibility: self.visibility,
            description: self.description,
            always_in_help: self.always_in_help,
            legacy_location: self.legacy_location,
            batch_combinator: self.batch_combinator,
            ordinal,
        }
    }
}
