//! KiCad footprint export.
//!
//! Renders a [`Footprint`] as a KiCad 6 `.kicad_mod` S-expression:
//!
//! - Header with `descr`, `tags` and `attr smd`
//! - `fp_text` reference and value
//! - `fp_line`, `fp_circle` and `fp_rect` drawings on `F.SilkS`, `F.Fab`
//!   and `F.CrtYd`
//! - One `pad ... smd rect` per pad on `F.Cu`, `F.Paste` and `F.Mask`

pub mod error;
pub mod writer;

use std::path::Path;

use tracing::debug;

use crate::footprint::Footprint;

pub use error::{OutputError, OutputResult};
pub use writer::KicadMod;

/// Renders `footprint` as `.kicad_mod` text.
#[must_use]
pub fn to_kicad_mod(footprint: &Footprint) -> String {
    KicadMod(footprint).to_string()
}

/// Writes `footprint` to `path` as a `.kicad_mod` file.
///
/// # Errors
///
/// Returns [`OutputError::FileWrite`] if the file cannot be written.
pub fn write_kicad_mod(footprint: &Footprint, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    std::fs::write(path, to_kicad_mod(footprint)).map_err(|e| OutputError::file_write(path, e))?;
    debug!(path = %path.display(), name = %footprint.name, "wrote footprint");
    Ok(())
}
