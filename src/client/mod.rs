//! GNS3 REST API client.
//!
//! One strongly-typed operation per backend capability. The client is built
//! once at startup from the immutable [`BridgeConfig`] and shared across
//! concurrent tool handlers; per-call state never outlives the call, so no
//! synchronization is needed beyond the `reqwest` connection pool's own.

pub mod types;

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use types::{Link, LinkEndpoint, Node, NodeSpec, Project, ProjectStats, Template};

/// Async client for the GNS3 REST API v2.
pub struct GnsClient {
    http: reqwest::Client,
    base_url: String,
    auth: Option<(String, String)>,
    timeout_secs: u64,
}

impl GnsClient {
    /// Build a client from the resolved configuration.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers);
        if !config.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder
            .build()
            .map_err(|e| BridgeError::Configuration(format!("cannot build HTTP client: {e}")))?;

        let auth = if config.auth_required {
            match (&config.username, &config.password) {
                (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
                _ => {
                    return Err(BridgeError::Configuration(
                        "auth_required is set but credentials are missing".into(),
                    ))
                }
            }
        } else {
            None
        };

        Ok(Self {
            http,
            base_url: config.base_url(),
            auth,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Issue one request and normalize every failure into a [`BridgeError`].
    ///
    /// A 204 or empty body decodes to an empty object so action endpoints
    /// that return no payload still yield a value.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        operation: &'static str,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, path, operation, "GNS3 request");

        let mut request = self.http.request(method, &url);
        if let Some((user, pass)) = &self.auth {
            request = request.basic_auth(user, Some(pass));
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(operation, &e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(operation, &e))?;

        if !status.is_success() {
            return Err(BridgeError::rejected(
                status.as_u16(),
                backend_message(&bytes),
            ));
        }

        if bytes.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_slice(&bytes).map_err(|e| BridgeError::malformed(operation, e.to_string()))
    }

    fn transport_error(&self, operation: &'static str, error: &reqwest::Error) -> BridgeError {
        if error.is_timeout() {
            BridgeError::timeout(operation, self.timeout_secs)
        } else {
            BridgeError::network(operation, error.to_string())
        }
    }

    // Projects

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let value = self
            .request(Method::GET, "/projects", None, "list_projects")
            .await?;
        decode(value, "list_projects")
    }

    pub async fn create_project(&self, name: &str, path: Option<&str>) -> Result<Project> {
        let mut body = json!({ "name": name });
        if let Some(path) = path {
            body["path"] = json!(path);
        }
        let value = self
            .request(Method::POST, "/projects", Some(body), "create_project")
            .await?;
        decode(value, "create_project")
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        let value = self
            .request(
                Method::GET,
                &format!("/projects/{project_id}"),
                None,
                "get_project",
            )
            .await?;
        decode(value, "get_project")
    }

    pub async fn open_project(&self, project_id: &str) -> Result<Project> {
        let value = self
            .request(
                Method::POST,
                &format!("/projects/{project_id}/open"),
                None,
                "open_project",
            )
            .await?;
        decode(value, "open_project")
    }

    pub async fn close_project(&self, project_id: &str) -> Result<()> {
        self.request(
            Method::POST,
            &format!("/projects/{project_id}/close"),
            None,
            "close_project",
        )
        .await?;
        Ok(())
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        self.request(
            Method::DELETE,
            &format!("/projects/{project_id}"),
            None,
            "delete_project",
        )
        .await?;
        Ok(())
    }

    // Nodes

    pub async fn list_nodes(&self, project_id: &str) -> Result<Vec<Node>> {
        let value = self
            .request(
                Method::GET,
                &format!("/projects/{project_id}/nodes"),
                None,
                "list_nodes",
            )
            .await?;
        decode(value, "list_nodes")
    }

    pub async fn create_node(&self, project_id: &str, spec: &NodeSpec) -> Result<Node> {
        let value = self
            .request(
                Method::POST,
                &format!("/projects/{project_id}/nodes"),
                Some(serde_json::to_value(spec)?),
                "create_node",
            )
            .await?;
        decode(value, "create_node")
    }

    pub async fn delete_node(&self, project_id: &str, node_id: &str) -> Result<()> {
        self.request(
            Method::DELETE,
            &format!("/projects/{project_id}/nodes/{node_id}"),
            None,
            "delete_node",
        )
        .await?;
        Ok(())
    }

    pub async fn start_node(&self, project_id: &str, node_id: &str) -> Result<Node> {
        let value = self
            .request(
                Method::POST,
                &format!("/projects/{project_id}/nodes/{node_id}/start"),
                None,
                "start_node",
            )
            .await?;
        decode(value, "start_node")
    }

    pub async fn stop_node(&self, project_id: &str, node_id: &str) -> Result<Node> {
        let value = self
            .request(
                Method::POST,
                &format!("/projects/{project_id}/nodes/{node_id}/stop"),
                None,
                "stop_node",
            )
            .await?;
        decode(value, "stop_node")
    }

    pub async fn start_all_nodes(&self, project_id: &str) -> Result<()> {
        self.request(
            Method::POST,
            &format!("/projects/{project_id}/nodes/start"),
            None,
            "start_all_nodes",
        )
        .await?;
        Ok(())
    }

    pub async fn stop_all_nodes(&self, project_id: &str) -> Result<()> {
        self.request(
            Method::POST,
            &format!("/projects/{project_id}/nodes/stop"),
            None,
            "stop_all_nodes",
        )
        .await?;
        Ok(())
    }

    // Links

    pub async fn list_links(&self, project_id: &str) -> Result<Vec<Link>> {
        let value = self
            .request(
                Method::GET,
                &format!("/projects/{project_id}/links"),
                None,
                "list_links",
            )
            .await?;
        decode(value, "list_links")
    }

    /// Create a link between two nodes.
    ///
    /// Both endpoint nodes must already exist in the project; the check runs
    /// up front so the caller gets a readable argument error instead of the
    /// backend's link-level rejection.
    pub async fn create_link(
        &self,
        project_id: &str,
        a: LinkEndpoint,
        b: LinkEndpoint,
    ) -> Result<Link> {
        let nodes = self.list_nodes(project_id).await?;
        for endpoint in [&a, &b] {
            if !nodes.iter().any(|n| n.node_id == endpoint.node_id) {
                return Err(BridgeError::Validation(format!(
                    "node {} not found in project {project_id}",
                    endpoint.node_id
                )));
            }
        }

        let body = json!({ "nodes": [a, b] });
        let value = self
            .request(
                Method::POST,
                &format!("/projects/{project_id}/links"),
                Some(body),
                "create_link",
            )
            .await?;
        decode(value, "create_link")
    }

    pub async fn delete_link(&self, project_id: &str, link_id: &str) -> Result<()> {
        self.request(
            Method::DELETE,
            &format!("/projects/{project_id}/links/{link_id}"),
            None,
            "delete_link",
        )
        .await?;
        Ok(())
    }

    // Templates

    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        let value = self
            .request(Method::GET, "/templates", None, "list_templates")
            .await?;
        decode(value, "list_templates")
    }

    // Composite

    /// Aggregate project, node, and link state into one stats record.
    ///
    /// The three reads are independent, so they run concurrently.
    pub async fn get_project_stats(&self, project_id: &str) -> Result<ProjectStats> {
        let (project, nodes, links) = tokio::try_join!(
            self.get_project(project_id),
            self.list_nodes(project_id),
            self.list_links(project_id),
        )?;

        let mut node_status: BTreeMap<String, usize> = BTreeMap::new();
        for node in &nodes {
            let status = node.status.clone().unwrap_or_else(|| "unknown".to_string());
            *node_status.entry(status).or_insert(0) += 1;
        }

        Ok(ProjectStats {
            project_id: project.project_id,
            project_name: project.name,
            status: project.status,
            total_nodes: nodes.len(),
            total_links: links.len(),
            node_status,
        })
    }
}

impl std::fmt::Debug for GnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GnsClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.as_ref().map(|(user, _)| user))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn decode<T: DeserializeOwned>(value: Value, operation: &'static str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| BridgeError::malformed(operation, e.to_string()))
}

/// Pull the backend's own `message` field out of an error body when the body
/// is JSON, otherwise fall back to the raw text.
fn backend_message(bytes: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(bytes) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
        return value.to_string();
    }
    String::from_utf8_lossy(bytes).to_string()
}
