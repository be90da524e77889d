//! Parametric footprint generation.
//!
//! Turns a package family tag and a map of datasheet parameters into a
//! complete surface-mount footprint:
//!
//! - Pads in family-specific numbering order
//! - Silkscreen outline clipped around the pads, with a pin-1 dot
//! - Courtyard rectangle
//! - Fabrication outline with pin-1 chamfer
//! - Reference and value text anchors
//!
//! Generation is pure: nothing is cached and the same inputs always give
//! the same footprint.
//!
//! # Supported families
//!
//! | Family | Pads | Thermal pad |
//! |--------|------|-------------|
//! | SOIC | Two rows, numbered down the left and up the right | No |
//! | QFN | Four sides, counter-clockwise from the pin-1 corner | Optional |
//!
//! # Example
//!
//! ```
//! use footprint_synth::footprint::{generate_footprint, raw_params};
//!
//! let raw = raw_params([
//!     ("Pin Count", "8"),
//!     ("Pitch", "1.27"),
//!     ("Pad Width", "0.45"),
//!     ("Pad Length", "0.6"),
//!     ("Overall Width", "6.0"),
//!     ("Package Body Length", "4.9"),
//!     ("Package Body Width", "3.9"),
//! ]);
//! let fp = generate_footprint("SOIC", "SOIC-8", &raw).unwrap();
//! assert_eq!(fp.pads.len(), 8);
//! ```

pub mod assembler;
pub mod error;
pub mod geometry;
pub mod model;
pub mod outline;
pub mod packages;
pub mod params;
pub mod style;

pub use assembler::assemble;
pub use error::{GenerateError, GenerateResult, Reason, ValidationError};
pub use geometry::{Point, Rect, Size};
pub use model::{Drawing, Footprint, Justify, Layer, Orientation, Pad, PadLayers, PadShape, TextAnchor};
pub use packages::{PackageFamily, ParameterRecord, Pin1Location};
pub use params::{raw_params, raw_params_from_json, ParamField, RawParams};
pub use style::DrawingStyle;

/// Generates a footprint with the default drawing style.
///
/// `family` is matched case-insensitively; `name` becomes the library name
/// and the value text.
///
/// # Errors
///
/// Fails on an unknown family or on the first invalid parameter.
pub fn generate_footprint(family: &str, name: &str, raw: &RawParams) -> GenerateResult<Footprint> {
    assembler::generate(family, name, raw, &DrawingStyle::default())
}

/// Generates a footprint with a custom drawing style.
///
/// # Errors
///
/// Fails on an unknown family or on the first invalid parameter.
pub fn generate_footprint_with_style(
    family: &str,
    name: &str,
    raw: &RawParams,
    style: &DrawingStyle,
) -> GenerateResult<Footprint> {
    assembler::generate(family, name, raw, style)
}
