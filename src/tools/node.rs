//! Node lifecycle tools, including the topology-wide start/stop pair.

use std::sync::Arc;

use serde_json::json;

use crate::client::types::NodeSpec;
use crate::client::GnsClient;
use crate::error::Result;

use super::registry::ToolRegistry;
use super::schema::SchemaBuilder;
use super::tool::BridgeTool;

fn node_id_schema() -> super::schema::ToolSchema {
    SchemaBuilder::object()
        .string("project_id", "UUID of the project", true)
        .string("node_id", "UUID of the node", true)
        .build()
}

fn project_id_schema() -> super::schema::ToolSchema {
    SchemaBuilder::object()
        .string("project_id", "UUID of the project", true)
        .build()
}

pub fn register(registry: &mut ToolRegistry, gns: &Arc<GnsClient>) -> Result<()> {
    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "list_nodes",
        "List all nodes in a GNS3 project",
        project_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let nodes = client.list_nodes(args.require_str("project_id")?).await?;
                Ok(json!({
                    "success": true,
                    "count": nodes.len(),
                    "nodes": nodes,
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "create_node",
        "Create a new node in a GNS3 project",
        SchemaBuilder::object()
            .string("project_id", "UUID of the project", true)
            .string("name", "Name for the node", true)
            .string(
                "node_type",
                "Type of node (qemu, vpcs, docker, dynamips, iou)",
                true,
            )
            .string("template_id", "Optional UUID of a template to use", false)
            .integer("x", "X position in the topology (default 0)", false)
            .integer("y", "Y position in the topology (default 0)", false)
            .object_prop(
                "properties",
                "Optional node-type-specific properties, forwarded verbatim",
                false,
            )
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                let name = args.require_str("name")?.to_string();
                let node_type = args.require_str("node_type")?;
                let x = args.i64_or("x", 0)?;
                let y = args.i64_or("y", 0)?;

                let mut spec = NodeSpec::new(name.as_str(), node_type, x, y);
                if let Some(template_id) = args.opt_str("template_id") {
                    spec = spec.with_template(template_id);
                }
                if let Some(properties) = args.opt_object("properties") {
                    spec = spec.with_properties(properties.clone());
                }

                let node = client.create_node(&project_id, &spec).await?;
                Ok(json!({
                    "success": true,
                    "node": node,
                    "message": format!("Node '{name}' created successfully"),
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "delete_node",
        "Delete a node from a GNS3 project",
        node_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                let node_id = args.require_str("node_id")?.to_string();
                client.delete_node(&project_id, &node_id).await?;
                Ok(json!({
                    "success": true,
                    "message": format!("Node {node_id} deleted successfully"),
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "start_node",
        "Start a node in a GNS3 project",
        node_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                let node_id = args.require_str("node_id")?.to_string();
                let node = client.start_node(&project_id, &node_id).await?;
                Ok(json!({
                    "success": true,
                    "node": node,
                    "message": format!("Node {node_id} started successfully"),
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "stop_node",
        "Stop a node in a GNS3 project",
        node_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                let node_id = args.require_str("node_id")?.to_string();
                let node = client.stop_node(&project_id, &node_id).await?;
                Ok(json!({
                    "success": true,
                    "node": node,
                    "message": format!("Node {node_id} stopped successfully"),
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "start_all_nodes",
        "Start all nodes in a GNS3 project",
        project_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                client.start_all_nodes(&project_id).await?;
                let nodes = client.list_nodes(&project_id).await?;
                Ok(json!({
                    "success": true,
                    "message": "All nodes started successfully",
                    "nodes": nodes,
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "stop_all_nodes",
        "Stop all nodes in a GNS3 project",
        project_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                client.stop_all_nodes(&project_id).await?;
                let nodes = client.list_nodes(&project_id).await?;
                Ok(json!({
                    "success": true,
                    "message": "All nodes stopped successfully",
                    "nodes": nodes,
                }))
            }
        },
    )))?;

    Ok(())
}
