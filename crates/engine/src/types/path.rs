//! Filesystem path parameters.

use std::path::PathBuf;

use crate::errors::ParameterError;
use crate::types::contract::{ParameterKind, ParameterType};

/// Parameter whose value is a filesystem path.
///
/// Options control normalization: `absolute` resolves the value against the
/// current directory, and `exists` makes normalization fail for paths that
/// are not present on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParameter {
    absolute: bool,
    exists: bool,
}

impl PathParameter {
    /// Creates the path type with no extra validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve values to absolute paths during normalization.
    pub fn absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    /// Require the path to exist during normalization.
    pub fn exists(mut self, exists: bool) -> Self {
        self.exists = exists;
        self
    }
}

impl ParameterType for PathParameter {
    type Value = PathBuf;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        Ok(PathBuf::from(raw))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.display().to_string()
    }

    fn normalize(&self, value: Self::Value) -> Result<Self::Value, ParameterError> {
        let path = if self.absolute {
            std::path::absolute(&value)
                .map_err(|_| ParameterError::invalid(value.display().to_string(), "a resolvable path"))?
        } else {
            value
        };
        if self.exists && !path.exists() {
            return Err(ParameterError::invalid(path.display().to_string(), "an existing path"));
        }
        Ok(path)
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::Path
    }
}
