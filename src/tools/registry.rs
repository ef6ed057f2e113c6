//! Tool registry: name → descriptor + handler.
//!
//! Populated once at startup, immutable afterward. The absence of runtime
//! mutation is what lets in-flight dispatches share the registry through a
//! plain `Arc` with no locking.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{BridgeError, Result};

use super::tool::Tool;

#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Names must be unique.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(BridgeError::DuplicateTool(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Find a tool by name.
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// All tools in registration order, for advertisement via `tools/list`.
    pub fn list(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::schema::ToolSchema;
    use crate::tools::tool::BridgeTool;
    use serde_json::json;

    fn stub(name: &str) -> Arc<dyn Tool> {
        Arc::new(BridgeTool::new(name, "stub", ToolSchema::empty(), |_| async {
            Ok(json!({ "success": true }))
        }))
    }

    #[test]
    fn lookup_finds_registered_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(stub("list_projects")).unwrap();

        assert!(registry.lookup("list_projects").is_some());
        assert!(registry.lookup("unknown_tool").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(stub("list_projects")).unwrap();

        let err = registry.register(stub("list_projects")).unwrap_err();
        assert!(matches!(err, BridgeError::DuplicateTool(name) if name == "list_projects"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn list_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["create_project", "list_projects", "delete_project"] {
            registry.register(stub(name)).unwrap();
        }

        let names: Vec<_> = registry.list().iter().map(|t| t.name()).collect();
        assert_eq!(names, ["create_project", "list_projects", "delete_project"]);
    }
}
