//! Value sources consulted during resolution.
//!
//! The command-line parser and the configuration-file backend live outside
//! this crate; resolution only sees them through the two traits below, which
//! return raw text or "not present". Missing sections, options, and keys all
//! collapse to `None`. The in-memory implementations back tests and
//! embedders that assemble values programmatically.

use std::collections::HashMap;

/// Raw values captured from an active command-line session, keyed by the
/// computed destination name (`family_paramname`).
pub trait CliSource {
    /// Returns the raw text supplied for `destination`, if any.
    fn value_of(&self, destination: &str) -> Option<String>;
}

/// Raw values from the configuration-file backend, keyed by section and
/// option.
pub trait ConfigSource {
    /// Returns the raw text at `(section, option)`, if present.
    fn value_of(&self, section: &str, option: &str) -> Option<String>;
}

/// In-memory CLI session values.
#[derive(Debug, Default, Clone)]
pub struct CliSession {
    values: HashMap<String, String>,
}

impl CliSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raw value under a destination key.
    pub fn set(&mut self, destination: impl Into<String>, raw: impl Into<String>) {
        self.values.insert(destination.into(), raw.into());
    }
}

impl CliSource for CliSession {
    fn value_of(&self, destination: &str) -> Option<String> {
        self.values.get(destination).cloned()
    }
}

/// In-memory configuration store.
#[derive(Debug, Default, Clone)]
pub struct MemoryConfig {
    sections: HashMap<String, HashMap<String, String>>,
}

impl MemoryConfig {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raw value at `(section, option)`.
    pub fn set(&mut self, section: impl Into<String>, option: impl Into<String>, raw: impl Into<String>) {
        self.sections.entry(section.into()).or_default().insert(option.into(), raw.into());
    }
}

impl ConfigSource for MemoryConfig {
    fn value_of(&self, section: &str, option: &str) -> Option<String> {
        self.sections.get(section).and_then(|options| options.get(option)).cloned()
    }
}

/// Bundles the sources consulted by one resolution pass.
///
/// A CLI session is considered active exactly when one is attached; the
/// config source is likewise optional so callers can resolve against
/// defaults alone.
#[derive(Clone, Copy, Default)]
pub struct ResolutionContext<'a> {
    cli: Option<&'a dyn CliSource>,
    config: Option<&'a dyn ConfigSource>,
}

impl<'a> ResolutionContext<'a> {
    /// Context with no sources attached; only defaults can resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches an active CLI session.
    pub fn with_cli(mut self, cli: &'a dyn CliSource) -> Self {
        self.cli = Some(cli);
        self
    }

    /// Attaches the configuration backend.
    pub fn with_config(mut self, config: &'a dyn ConfigSource) -> Self {
        self.config = Some(config);
        self
    }

    /// The active CLI session, if any.
    pub fn cli(&self) -> Option<&'a dyn CliSource> {
        self.cli
    }

    /// The configuration backend, if any.
    pub fn config(&self) -> Option<&'a dyn ConfigSource> {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_section_and_option_collapse_to_none() {
        let mut config = MemoryConfig::new();
        config.set("trains", "line", "blue");

        assert_eq!(config.value_of("trains", "line").as_deref(), Some("blue"));
        assert_eq!(config.value_of("trains", "color"), None);
        assert_eq!(config.value_of("boats", "line"), None);
    }

    #[test]
    fn cli_session_returns_recorded_values() {
        let mut session = CliSession::new();
        session.set("trains_line", "red");

        assert_eq!(session.value_of("trains_line").as_deref(), Some("red"));
        assert_eq!(session.value_of("trains_color"), None);
    }
}
