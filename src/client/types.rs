//! Typed views over GNS3 resources.
//!
//! The bridge treats backend records as opaque: each view names only the
//! fields the bridge itself reads (identifiers for path construction,
//! name/status for stats) and carries everything else through a flattened
//! map so records reach the caller unmodified.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub node_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub link_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request payload for node creation.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSpec {
    pub name: String,
    pub node_type: String,
    pub x: i64,
    pub y: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

impl NodeSpec {
    pub fn new(
        name: impl Into<String>,
        node_type: impl Into<String>,
        x: i64,
        y: i64,
    ) -> Self {
        Self {
            name: name.into(),
            node_type: node_type.into(),
            x,
            y,
            compute_id: None,
            template_id: None,
            properties: None,
        }
    }

    /// Instantiate from a template; template-based nodes land on the local
    /// compute.
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.compute_id = Some("local".to_string());
        self.template_id = Some(template_id.into());
        self
    }

    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = Some(properties);
        self
    }
}

/// One side of a link. GNS3 addresses ports as (adapter, port); the bridge
/// always wires adapter 0.
#[derive(Debug, Clone, Serialize)]
pub struct LinkEndpoint {
    pub node_id: String,
    pub adapter_number: u32,
    pub port_number: u32,
}

impl LinkEndpoint {
    pub fn new(node_id: impl Into<String>, port_number: u32) -> Self {
        Self {
            node_id: node_id.into(),
            adapter_number: 0,
            port_number,
        }
    }
}

/// Aggregated view computed by the bridge from project + nodes + links.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStats {
    pub project_id: String,
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub total_nodes: usize,
    pub total_links: usize,
    pub node_status: BTreeMap<String, usize>,
}
