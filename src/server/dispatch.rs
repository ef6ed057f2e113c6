//! Request dispatch: handshake gate, tool listing, tool invocation.
//!
//! Failures are two-tier. Protocol faults (unknown method or tool, bad
//! params, calls before `initialize`) become JSON-RPC error objects the host
//! handles. Domain faults (validation, backend errors) become
//! `{success: false, error}` results: readable content the calling model can
//! act on when it retries with corrected arguments.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::tools::{validation, ToolArguments, ToolRegistry};

use super::rpc::{self, RpcRequest, RpcResponse};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    server_name: &'static str,
    server_version: &'static str,
    initialized: AtomicBool,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            server_name: env!("CARGO_PKG_NAME"),
            server_version: env!("CARGO_PKG_VERSION"),
            initialized: AtomicBool::new(false),
        }
    }

    /// Route one decoded request. Notifications are consumed and yield no
    /// response.
    ///
    /// Requests other than `initialize` arriving before the handshake are
    /// rejected with `NOT_INITIALIZED` rather than queued; the client owns
    /// handshake sequencing, and rejection keeps the dispatcher stateless.
    pub async fn dispatch(&self, request: RpcRequest) -> Option<RpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification consumed");
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(RpcResponse::error(
                id,
                rpc::INVALID_REQUEST,
                format!("unsupported protocol marker: {:?}", request.jsonrpc),
            ));
        }

        if request.method == "initialize" {
            self.initialized.store(true, Ordering::SeqCst);
            return Some(RpcResponse::success(id, self.handshake()));
        }

        if !self.initialized.load(Ordering::SeqCst) {
            return Some(RpcResponse::error(
                id,
                rpc::NOT_INITIALIZED,
                "server not initialized",
            ));
        }

        match request.method.as_str() {
            "tools/list" => Some(RpcResponse::success(id, self.render_tools())),
            "tools/call" => Some(self.call_tool(id, request.params).await),
            other => Some(RpcResponse::error(
                id,
                rpc::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            )),
        }
    }

    fn handshake(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": self.server_name,
                "version": self.server_version,
            },
        })
    }

    fn render_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .list()
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.schema().as_value(),
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> RpcResponse {
        let Some(params) = params else {
            return RpcResponse::error(id, rpc::INVALID_PARAMS, "missing params");
        };
        let Some(name) = params.get("name").and_then(|v| v.as_str()) else {
            return RpcResponse::error(id, rpc::INVALID_PARAMS, "missing tool name");
        };
        let arguments = params
            .get("arguments")
            .cloned()
            .unwrap_or_else(|| json!({}));

        let Some(tool) = self.registry.lookup(name) else {
            return RpcResponse::error(
                id,
                rpc::METHOD_NOT_FOUND,
                format!("Unknown tool: {name}"),
            );
        };

        if let Err(message) = validation::validate_arguments(&arguments, tool.schema().as_value())
        {
            return RpcResponse::success(id, failure(message));
        }

        debug!(tool = name, "invoking tool");
        match tool.execute(ToolArguments::new(arguments)).await {
            Ok(result) => RpcResponse::success(id, result),
            Err(err) => {
                warn!(tool = name, error = %err, "tool call failed");
                RpcResponse::success(id, failure(err.to_string()))
            }
        }
    }
}

fn failure(message: impl Into<String>) -> Value {
    let message: String = message.into();
    json!({ "success": false, "error": message })
}
