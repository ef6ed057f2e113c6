//! Template tools.

use std::sync::Arc;

use serde_json::json;

use crate::client::GnsClient;
use crate::error::Result;

use super::registry::ToolRegistry;
use super::schema::ToolSchema;
use super::tool::BridgeTool;

pub fn register(registry: &mut ToolRegistry, gns: &Arc<GnsClient>) -> Result<()> {
    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "list_templates",
        "List all available node templates in GNS3",
        ToolSchema::empty(),
        move |_args| {
            let client = Arc::clone(&client);
            async move {
                let templates = client.list_templates().await?;
                Ok(json!({
                    "success": true,
                    "count": templates.len(),
                    "templates": templates,
                }))
            }
        },
    )))?;

    Ok(())
}
