//! Task-reference parameters.

use std::sync::Arc;

use crate::errors::ParameterError;
use crate::registry::{TaskHandle, TaskRegistry};
use crate::types::contract::{ParameterKind, ParameterType};

/// Parameter whose value is a handle to another registered task class.
///
/// Raw text is a task family name; the injected registry turns it into a
/// handle. Serialization goes back to the family name.
#[derive(Debug, Clone)]
pub struct TaskParameter {
    registry: Arc<dyn TaskRegistry>,
}

impl TaskParameter {
    /// Creates the task-reference type over a registry.
    pub fn new(registry: Arc<dyn TaskRegistry>) -> Self {
        Self { registry }
    }
}

impl ParameterType for TaskParameter {
    type Value = TaskHandle;

    fn parse(&self, raw: &str) -> Result<Self::Value, ParameterError> {
        self.registry
            .task_family(raw)
            .ok_or_else(|| ParameterError::invalid(raw, "a registered task family"))
    }

    fn serialize(&self, value: &Self::Value) -> String {
        value.family().to_string()
    }

    fn kind(&self) -> ParameterKind {
        ParameterKind::TaskFamily
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryTaskRegistry;

    #[test]
    fn resolves_registered_families() {
        let registry = Arc::new(MemoryTaskRegistry::new());
        registry.register("daily_ingest");
        let ty = TaskParameter::new(registry);

        let handle = ty.parse("daily_ingest").unwrap();
        assert_eq!(handle.family(), "daily_ingest");
        assert_eq!(ty.serialize(&handle), "daily_ingest");
    }

    #[test]
    fn unknown_families_are_invalid() {
        let ty = TaskParameter::new(Arc::new(MemoryTaskRegistry::new()));
        assert!(matches!(ty.parse("ghost_task"), Err(ParameterError::InvalidValue { .. })));
    }
}
