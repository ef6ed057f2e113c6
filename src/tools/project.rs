//! Project lifecycle tools.

use std::sync::Arc;

use serde_json::json;

use crate::client::GnsClient;
use crate::error::Result;

use super::registry::ToolRegistry;
use super::schema::{SchemaBuilder, ToolSchema};
use super::tool::BridgeTool;

fn project_id_schema() -> ToolSchema {
    SchemaBuilder::object()
        .string("project_id", "UUID of the project", true)
        .build()
}

pub fn register(registry: &mut ToolRegistry, gns: &Arc<GnsClient>) -> Result<()> {
    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "create_project",
        "Create a new GNS3 project",
        SchemaBuilder::object()
            .string("name", "Name for the new project", true)
            .string("path", "Optional custom directory path for the project", false)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let name = args.require_str("name")?.to_string();
                let path = args.opt_str("path").map(str::to_string);
                let project = client.create_project(&name, path.as_deref()).await?;
                Ok(json!({
                    "success": true,
                    "project": project,
                    "message": format!("Project '{name}' created successfully"),
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "list_projects",
        "List all GNS3 projects",
        ToolSchema::empty(),
        move |_args| {
            let client = Arc::clone(&client);
            async move {
                let projects = client.list_projects().await?;
                Ok(json!({
                    "success": true,
                    "count": projects.len(),
                    "projects": projects,
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "get_project",
        "Get details of a specific GNS3 project",
        project_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project = client.get_project(args.require_str("project_id")?).await?;
                Ok(json!({
                    "success": true,
                    "project": project,
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "open_project",
        "Open a GNS3 project",
        project_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                let project = client.open_project(&project_id).await?;
                Ok(json!({
                    "success": true,
                    "project": project,
                    "message": format!("Project {project_id} opened successfully"),
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "close_project",
        "Close a GNS3 project",
        project_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                client.close_project(&project_id).await?;
                Ok(json!({
                    "success": true,
                    "message": format!("Project {project_id} closed successfully"),
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "delete_project",
        "Delete a GNS3 project permanently",
        project_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let project_id = args.require_str("project_id")?.to_string();
                client.delete_project(&project_id).await?;
                Ok(json!({
                    "success": true,
                    "message": format!("Project {project_id} deleted successfully"),
                }))
            }
        },
    )))?;

    let client = Arc::clone(gns);
    registry.register(Arc::new(BridgeTool::new(
        "get_project_stats",
        "Get node, link, and status statistics for a GNS3 project",
        project_id_schema(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let stats = client
                    .get_project_stats(args.require_str("project_id")?)
                    .await?;
                Ok(json!({
                    "success": true,
                    "stats": stats,
                }))
            }
        },
    )))?;

    Ok(())
}
