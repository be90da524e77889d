//! footprint-synth: parametric footprint generation for surface-mount packages
//!
//! Given a package family (SOIC or QFN) and the dimensions scraped from a
//! datasheet, this library produces a complete footprint: numbered pads,
//! a silkscreen outline clipped around the copper, a courtyard, a
//! fabrication outline with pin-1 chamfer, and reference/value text.
//!
//! # Architecture
//!
//! The geometry engine is a pure library; everything that talks to the
//! outside world is a thin adapter over it:
//!
//! - **Footprint generation**: parameter validation, pad layout, outlines
//! - **KiCad export**: `.kicad_mod` S-expression writer
//! - **MCP server**: generation exposed as tools over JSON-RPC on stdio
//!
//! # Modules
//!
//! - [`config`]: Configuration loading and validation
//! - [`error`]: Configuration and CLI error types
//! - [`footprint`]: Parameter validation and footprint geometry
//! - [`kicad`]: KiCad footprint writer
//! - [`mcp`]: MCP protocol implementation

pub mod config;
pub mod error;
pub mod footprint;
pub mod kicad;
pub mod mcp;
