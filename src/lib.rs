//! GNS3 MCP bridge.
//!
//! An MCP (Model Context Protocol) server that lets an AI assistant manage
//! GNS3 network topologies: projects, nodes, links, and templates. The
//! bridge speaks line-delimited JSON-RPC 2.0 over stdio on one side and the
//! GNS3 REST API v2 on the other, translating data models and error
//! semantics between the two.
//!
//! Independent tool calls run concurrently; responses are correlated by
//! request id, never by arrival order. Each call is an independent unit of
//! work and the bridge holds no backend state between calls.

pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;
