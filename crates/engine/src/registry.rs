//! Task registry boundary.
//!
//! The registry that maps family names to task classes belongs to the
//! surrounding scheduler; the task-reference parameter only needs to turn a
//! family-name string into an opaque handle and back.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::RwLock;

/// Handle to a registered task class, resolvable from its family name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    family: String,
}

impl TaskHandle {
    /// Creates a handle for a family name.
    pub fn new(family: impl Into<String>) -> Self {
        Self { family: family.into() }
    }

    /// The task family name this handle refers to.
    pub fn family(&self) -> &str {
        &self.family
    }
}

/// Lookup interface implemented by the surrounding scheduler's registry.
pub trait TaskRegistry: Send + Sync + fmt::Debug {
    /// Resolves a family name to a handle, or `None` when unregistered.
    fn task_family(&self, family: &str) -> Option<TaskHandle>;
}

/// In-memory registry for tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryTaskRegistry {
    families: RwLock<BTreeSet<String>>,
}

impl MemoryTaskRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a task family name.
    pub fn register(&self, family: impl Into<String>) {
        self.families.write().expect("registry lock poisoned").insert(family.into());
    }
}

impl TaskRegistry for MemoryTaskRegistry {
    fn task_family(&self, family: &str) -> Option<TaskHandle> {
        let families = self.families.read().expect("registry lock poisoned");
        families.contains(family).then(|| TaskHandle::new(family))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_families_resolve_to_handles() {
        let registry = MemoryTaskRegistry::new();
        registry.register("nightly_report");

        let handle = registry.task_family("nightly_report").unwrap();
        assert_eq!(handle.family(), "nightly_report");
        assert_eq!(registry.task_family("unknown"), None);
    }
}
