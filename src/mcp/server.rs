//! MCP server lifecycle.
//!
//! 1. **Initialisation**: `initialize` request, then the
//!    `notifications/initialized` notification
//! 2. **Operation**: `tools/list`, `tools/call` and `ping`
//! 3. **Shutdown**: end of input, SIGINT/SIGTERM, or Ctrl+C on Windows

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, info};

use crate::footprint::DrawingStyle;
use crate::mcp::protocol::{
    parse_message, IncomingMessage, JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    RequestId, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::tools::{ToolCallParams, ToolHandler};
use crate::mcp::transport::{StdioTransport, Transport};

/// Server state in the MCP lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Waiting for `initialize`.
    AwaitingInit,
    /// `initialize` answered, waiting for `notifications/initialized`.
    Initialising,
    /// Serving tool calls.
    Running,
    /// Stopping.
    ShuttingDown,
}

/// Server information for the `initialize` reply.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: &'static str,
    /// Server version.
    pub version: &'static str,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Client information sent with `initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    /// Client name.
    pub name: String,
    /// Client version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Parameters of the `initialize` request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version requested by the client.
    pub protocol_version: String,
    /// Client capabilities (unused).
    #[serde(default)]
    pub capabilities: Value,
    /// Client information.
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

/// The footprint generation MCP server.
pub struct McpServer<R, W> {
    state: ServerState,
    transport: Transport<R, W>,
    tools: ToolHandler,
}

impl McpServer<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Creates a server on stdin/stdout.
    #[must_use]
    pub fn new(allowed_paths: Vec<PathBuf>, style: DrawingStyle) -> Self {
        Self::with_transport(StdioTransport::stdio(), ToolHandler::new(allowed_paths, style))
    }
}

impl<R, W> McpServer<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a server on an arbitrary transport.
    pub const fn with_transport(transport: Transport<R, W>, tools: ToolHandler) -> Self {
        Self {
            state: ServerState::AwaitingInit,
            transport,
            tools,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ServerState {
        self.state
    }

    /// Consumes the server, returning the transport.
    pub fn into_transport(self) -> Transport<R, W> {
        self.transport
    }

    /// Serves requests until input ends or a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    #[cfg(unix)]
    pub async fn run(&mut self) -> io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        while self.state != ServerState::ShuttingDown {
            tokio::select! {
                _ = sigint.recv() => self.shut_down("SIGINT"),
                _ = sigterm.recv() => self.shut_down("SIGTERM"),
                line = self.transport.read_line() => self.handle_input(line?).await?,
            }
        }
        Ok(())
    }

    /// Serves requests until input ends or Ctrl+C is pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    #[cfg(windows)]
    pub async fn run(&mut self) -> io::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        while self.state != ServerState::ShuttingDown {
            tokio::select! {
                _ = &mut ctrl_c => self.shut_down("Ctrl+C"),
                line = self.transport.read_line() => self.handle_input(line?).await?,
            }
        }
        Ok(())
    }

    fn shut_down(&mut self, cause: &str) {
        info!(cause, "shutting down");
        self.state = ServerState::ShuttingDown;
    }

    async fn handle_input(&mut self, line: Option<String>) -> io::Result<()> {
        let Some(line) = line else {
            self.shut_down("end of input");
            return Ok(());
        };

        if line.trim().is_empty() {
            return Ok(());
        }

        match parse_message(&line) {
            Ok(IncomingMessage::Request(req)) => self.handle_request(req).await,
            Ok(IncomingMessage::Notification(notif)) => {
                self.handle_notification(&notif);
                Ok(())
            }
            Err(error) => self.transport.write_message(&error).await,
        }
    }

    async fn handle_request(&mut self, req: JsonRpcRequest) -> io::Result<()> {
        debug!(id = %req.id, method = %req.method, "request");

        let response = match req.method.as_str() {
            "initialize" => self.handle_initialize(&req),
            "tools/list" => self.handle_tools_list(&req),
            "tools/call" => self.handle_tools_call(&req).await,
            "ping" => Ok(JsonRpcResponse::success(req.id.clone(), json!({}))),
            _ => Err(JsonRpcError::method_not_found(req.id.clone(), &req.method)),
        };

        match response {
            Ok(resp) => self.transport.write_message(&resp).await,
            Err(error) => self.transport.write_message(&error).await,
        }
    }

    fn handle_notification(&mut self, notif: &JsonRpcNotification) {
        if notif.method == "notifications/initialized" && self.state == ServerState::Initialising {
            info!("client initialised, serving tools");
            self.state = ServerState::Running;
        }
    }

    fn handle_initialize(&mut self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        if self.state != ServerState::AwaitingInit {
            return Err(JsonRpcError::invalid_request(Some(req.id.clone()), "Server already initialised"));
        }

        let params: InitializeParams = req.parse_params("initialize")?;
        info!(
            client = params.client_info.as_ref().map_or("unknown", |c| c.name.as_str()),
            requested_version = %params.protocol_version,
            "initialize"
        );

        self.state = ServerState::Initialising;

        Ok(JsonRpcResponse::success(
            req.id.clone(),
            json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": ServerInfo::default(),
            }),
        ))
    }

    fn handle_tools_list(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;
        Ok(JsonRpcResponse::success(
            req.id.clone(),
            json!({ "tools": ToolHandler::definitions() }),
        ))
    }

    async fn handle_tools_call(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let params: ToolCallParams = req.parse_params("tool call")?;
        let result = self.tools.call(&params.name, &params.arguments).await;

        let value = serde_json::to_value(&result).map_err(|e| {
            tracing::error!(error = %e, "failed to serialise tool call result");
            JsonRpcError::internal_error(req.id.clone(), "Internal error: failed to serialise result")
        })?;

        Ok(JsonRpcResponse::success(req.id.clone(), value))
    }

    fn require_running(&self, id: &RequestId) -> Result<(), JsonRpcError> {
        if self.state == ServerState::Running {
            Ok(())
        } else {
            Err(JsonRpcError::invalid_request(Some(id.clone()), "Server not initialised"))
        }
    }
}
