//! Tool definitions and the registry they live in.
//!
//! Tools are grouped by the backend resource they manipulate, mirroring the
//! REST surface: projects, nodes, links, templates.

pub mod arguments;
pub mod link;
pub mod node;
pub mod project;
pub mod registry;
pub mod schema;
pub mod template;
pub mod tool;
pub mod validation;

use std::sync::Arc;

pub use arguments::ToolArguments;
pub use registry::ToolRegistry;
pub use schema::{SchemaBuilder, ToolSchema};
pub use tool::{BridgeTool, Tool};

use crate::client::GnsClient;
use crate::error::Result;

/// Build the full tool registry. Runs once before the transport loop starts
/// accepting requests; the registry is never mutated afterward.
pub fn build_registry(client: Arc<GnsClient>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    project::register(&mut registry, &client)?;
    node::register(&mut registry, &client)?;
    link::register(&mut registry, &client)?;
    template::register(&mut registry, &client)?;
    Ok(registry)
}
