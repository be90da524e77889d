//! Model Context Protocol (MCP) server.
//!
//! Exposes footprint generation as tools to AI assistants over
//! newline-delimited JSON-RPC 2.0 on stdio.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  Transport  │───▶│   Server    │───▶│    Tools    │───▶│  footprint  │
//! │   (stdio)   │    │ (lifecycle) │    │ (handlers)  │    │  + kicad    │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use server::{McpServer, ServerState};
pub use tools::{ToolCallResult, ToolHandler};
pub use transport::{StdioTransport, Transport};
