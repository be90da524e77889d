//! Tool definitions and handlers exposed over MCP.
//!
//! | Tool | Effect |
//! |------|--------|
//! | `list_package_families` | Families and their parameter keys |
//! | `generate_footprint` | Footprint as JSON, optionally with `.kicad_mod` text |
//! | `write_footprint` | Writes a `.kicad_mod` file inside an allowed directory |
//!
//! Tool failures (bad parameters, denied paths, I/O) are reported as tool
//! results with `isError: true` so the client can show them to the user;
//! only malformed JSON-RPC is a protocol error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::footprint::{self, DrawingStyle, Footprint, GenerateError, PackageFamily, RawParams};
use crate::kicad::{self, OutputError};

/// A tool advertised in `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Tool name.
    pub name: &'static str,
    /// What the tool does.
    pub description: &'static str,
    /// JSON Schema for the arguments.
    pub input_schema: Value,
}

/// Parameters of a `tools/call` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Tool name.
    pub name: String,
    /// Tool arguments.
    #[serde(default)]
    pub arguments: Value,
}

/// One content item of a tool result.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Plain text (JSON documents are sent pretty-printed as text).
    Text {
        /// The text.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Returned content.
    pub content: Vec<ToolContent>,
    /// Whether the call failed.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // skip_serializing_if passes &T
const fn is_false(b: &bool) -> bool {
    !*b
}

impl ToolCallResult {
    /// Successful result carrying a JSON document.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self::from_text(pretty(value), false)
    }

    /// Failed result carrying a JSON document.
    #[must_use]
    pub fn json_error(value: &Value) -> Self {
        Self::from_text(pretty(value), true)
    }

    /// Failed result with a plain message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::from_text(message.into(), true)
    }

    fn from_text(text: String, is_error: bool) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
            is_error,
        }
    }

    /// Text of the first content item.
    #[must_use]
    pub fn text(&self) -> &str {
        self.content.first().map_or("", |c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Arguments shared by the generating tools.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GenerateArgs {
    family: String,
    name: String,
    parameters: serde_json::Map<String, Value>,
    #[serde(default)]
    include_kicad: bool,
    #[serde(default)]
    filepath: Option<String>,
}

impl GenerateArgs {
    fn parse(arguments: &Value) -> Result<Self, ToolCallResult> {
        serde_json::from_value(arguments.clone())
            .map_err(|e| ToolCallResult::error(format!("Invalid arguments: {e}")))
    }

    fn raw_params(&self) -> Result<RawParams, ToolCallResult> {
        footprint::raw_params_from_json(&self.parameters).map_err(|e| {
            ToolCallResult::json_error(&json!({
                "status": "error",
                "error": e.to_string(),
                "field": e.field,
                "reason": e.reason.to_string(),
            }))
        })
    }
}

/// Executes tool calls against a fixed style and set of writable
/// directories.
#[derive(Debug, Clone, Default)]
pub struct ToolHandler {
    allowed_paths: Vec<PathBuf>,
    style: DrawingStyle,
}

impl ToolHandler {
    /// Creates a handler. An empty `allowed_paths` permits writing anywhere.
    #[must_use]
    pub const fn new(allowed_paths: Vec<PathBuf>, style: DrawingStyle) -> Self {
        Self { allowed_paths, style }
    }

    /// Every tool this handler serves.
    #[must_use]
    pub fn definitions() -> Vec<ToolDefinition> {
        let generate_properties = json!({
            "family": {
                "type": "string",
                "enum": PackageFamily::ALL.iter().map(|f| f.tag()).collect::<Vec<_>>(),
                "description": "Package family tag (case-insensitive)"
            },
            "name": {
                "type": "string",
                "description": "Footprint library name, also used as the value text"
            },
            "parameters": {
                "type": "object",
                "additionalProperties": { "type": ["string", "number"] },
                "description": "Datasheet parameters keyed by name; see list_package_families for accepted keys"
            }
        });

        let mut generate_schema = generate_properties.clone();
        generate_schema["include_kicad"] = json!({
            "type": "boolean",
            "description": "Also return the .kicad_mod text"
        });

        let mut write_schema = generate_properties;
        write_schema["filepath"] = json!({
            "type": "string",
            "description": "Destination .kicad_mod path inside an allowed directory"
        });

        vec![
            ToolDefinition {
                name: "list_package_families",
                description: "List the supported package families with the parameter keys each one \
                              accepts (primary key first, then legacy aliases) and whether each is required.",
                input_schema: json!({ "type": "object", "properties": {} }),
            },
            ToolDefinition {
                name: "generate_footprint",
                description: "Generate a surface-mount footprint from datasheet parameters. Returns pads, \
                              silkscreen/fabrication/courtyard drawings and text anchors as JSON. \
                              All dimensions are in millimetres; +y points down.",
                input_schema: json!({
                    "type": "object",
                    "properties": generate_schema,
                    "required": ["family", "name", "parameters"]
                }),
            },
            ToolDefinition {
                name: "write_footprint",
                description: "Generate a footprint and write it as a KiCad .kicad_mod file.",
                input_schema: json!({
                    "type": "object",
                    "properties": write_schema,
                    "required": ["family", "name", "parameters", "filepath"]
                }),
            },
        ]
    }

    /// Runs the named tool.
    pub async fn call(&self, name: &str, arguments: &Value) -> ToolCallResult {
        let result = match name {
            "list_package_families" => Ok(Self::list_package_families()),
            "generate_footprint" => self.generate(arguments),
            "write_footprint" => self.write(arguments).await,
            _ => Err(ToolCallResult::error(format!("Unknown tool: {name}"))),
        };

        result.unwrap_or_else(|failure| {
            warn!(tool = name, error = failure.text(), "tool call failed");
            failure
        })
    }

    fn list_package_families() -> ToolCallResult {
        let families: Vec<Value> = PackageFamily::ALL
            .iter()
            .map(|family| {
                json!({
                    "family": family,
                    "description": family.summary(),
                    "keywords": family.keywords(),
                    "parameters": family.fields(),
                })
            })
            .collect();

        ToolCallResult::json(&json!({ "families": families }))
    }

    fn generate(&self, arguments: &Value) -> Result<ToolCallResult, ToolCallResult> {
        let args = GenerateArgs::parse(arguments)?;
        let footprint = self.build(&args)?;

        let mut result = json!({
            "status": "success",
            "footprint": to_json(&footprint)?,
        });
        if args.include_kicad {
            result["kicad_mod"] = Value::String(kicad::to_kicad_mod(&footprint));
        }
        Ok(ToolCallResult::json(&result))
    }

    async fn write(&self, arguments: &Value) -> Result<ToolCallResult, ToolCallResult> {
        let args = GenerateArgs::parse(arguments)?;
        let filepath = args
            .filepath
            .as_deref()
            .ok_or_else(|| ToolCallResult::error("Missing required parameter: filepath"))?;
        let path = self.validate_path(filepath).map_err(ToolCallResult::error)?;

        let footprint = self.build(&args)?;
        tokio::fs::write(&path, kicad::to_kicad_mod(&footprint))
            .await
            .map_err(|e| output_failure(&OutputError::file_write(&path, e)))?;

        info!(path = %path.display(), name = %footprint.name, "wrote footprint");
        Ok(ToolCallResult::json(&json!({
            "status": "success",
            "filepath": filepath,
            "name": footprint.name,
            "pad_count": footprint.pads.len(),
        })))
    }

    fn build(&self, args: &GenerateArgs) -> Result<Footprint, ToolCallResult> {
        let raw = args.raw_params()?;
        footprint::generate_footprint_with_style(&args.family, &args.name, &raw, &self.style)
            .map_err(|e| generation_failure(&e))
    }

    /// Resolves `filepath` and checks it lies inside an allowed directory.
    fn validate_path(&self, filepath: &str) -> Result<PathBuf, String> {
        let path = Path::new(filepath);
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| format!("Invalid path '{}': no filename specified", path.display()))?;
        let canonical_parent = parent.canonicalize().map_err(|e| {
            format!(
                "Parent directory '{}' does not exist or is inaccessible: {e}",
                parent.display()
            )
        })?;
        let resolved = canonical_parent.join(file_name);

        if self.allowed_paths.is_empty() {
            return Ok(resolved);
        }

        let allowed = self
            .allowed_paths
            .iter()
            .filter_map(|dir| dir.canonicalize().ok())
            .any(|dir| resolved.starts_with(dir));

        if allowed {
            Ok(resolved)
        } else {
            Err("Access denied: path is outside the configured allowed directories".to_string())
        }
    }
}

fn to_json(footprint: &Footprint) -> Result<Value, ToolCallResult> {
    serde_json::to_value(footprint)
        .map_err(|e| ToolCallResult::error(format!("Failed to serialise footprint: {e}")))
}

fn generation_failure(error: &GenerateError) -> ToolCallResult {
    let mut body = json!({
        "status": "error",
        "error": error.to_string(),
    });
    if let Some(validation) = error.validation_error() {
        body["field"] = Value::String(validation.field.clone());
        body["reason"] = Value::String(validation.reason.to_string());
    }
    ToolCallResult::json_error(&body)
}

fn output_failure(error: &OutputError) -> ToolCallResult {
    let cause = std::error::Error::source(error).map(ToString::to_string);
    ToolCallResult::json_error(&json!({
        "status": "error",
        "error": error.to_string(),
        "cause": cause,
    }))
}
