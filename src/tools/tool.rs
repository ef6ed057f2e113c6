//! Tool trait and closure-based tool wrapper.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::arguments::ToolArguments;
use super::schema::ToolSchema;
use crate::error::Result;

/// A named, schema-described operation the bridge exposes over MCP.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema for the accepted arguments.
    fn schema(&self) -> &ToolSchema;

    /// Execute the tool. Domain failures come back as `BridgeError`; the
    /// dispatcher turns them into `{success: false, error}` results.
    async fn execute(&self, args: ToolArguments) -> Result<serde_json::Value>;
}

type Handler = dyn Fn(ToolArguments) -> BoxFuture<'static, Result<serde_json::Value>> + Send + Sync;

/// Closure-backed tool; all bridge tools are built this way.
pub struct BridgeTool {
    name: String,
    description: String,
    schema: ToolSchema,
    handler: Arc<Handler>,
}

impl BridgeTool {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ToolSchema,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            schema,
            handler: Arc::new(move |args| Box::pin(handler(args))),
        }
    }
}

#[async_trait]
impl Tool for BridgeTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    async fn execute(&self, args: ToolArguments) -> Result<serde_json::Value> {
        (self.handler)(args).await
    }
}

impl std::fmt::Debug for BridgeTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}
