//! Link lifecycle tools.

use std::sync::Arc;

use serde_json::json;

use crate::client::types::LinkEndpoint;
use crate::client::GnsClient;
use crate::error::Result;

use super::registry::ToolRegistry;
use super::schema::SchemaBuilder;
use super::tool::BridgeTool;

pub fn register(registry: &mut ToolRegistry, gns: &Arc<GnsClient>) -> Result<()> {
    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "list_links",
        "List all links in a GNS3 project",
        SchemaBuilder::object()
            .string("project_id", "UUID of the project", true)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let links = client.list_links(args.require_str("project_id")?).await?;
                Ok(json!({
                    "success": true,
                    "count": links.len(),
                    "links": links,
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "create_link",
        "Create a link between two nodes in a GNS3 project",
        SchemaBuilder::object()
            .string("project_id", "UUID of the project", true)
            .string("node_a_id", "UUID of the first node", true)
            .integer("node_a_port", "Port number on the first node", true)
            .string("node_b_id", "UUID of the second node", true)
            .integer("node_b_port", "Port number on the second node", true)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                let a = LinkEndpoint::new(
                    args.require_str("node_a_id")?,
                    args.require_u32("node_a_port")?,
                );
                let b = LinkEndpoint::new(
                    args.require_str("node_b_id")?,
                    args.require_u32("node_b_port")?,
                );
                let link = client.create_link(&project_id, a, b).await?;
                Ok(json!({
                    "success": true,
                    "link": link,
                    "message": "Link created successfully",
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "delete_link",
        "Delete a link from a GNS3 project",
        SchemaBuilder::object()
            .string("project_id", "UUID of the project", true)
            .string("link_id", "UUID of the link to delete", true)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                let link_id = args.require_str("link_id")?.to_string();
                client.delete_link(&project_id, &link_id).await?;
                Ok(json!({
                    "success": true,
                    "message": format!("Link {link_id} deleted successfully"),
                }))
            }
        },
    )))?;

    Ok(())
}
