//! Drawing style: stroke widths, clearances and margins.
//!
//! The defaults are the house style every generated footprint uses unless
//! the configuration file overrides them. All values in millimetres.

use serde::{Deserialize, Serialize};

/// Stroke widths, clearances and marker sizes for outline generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DrawingStyle {
    /// Silkscreen stroke width.
    pub silkscreen_line_width: f64,

    /// Gap kept between silkscreen and pad copper.
    pub silkscreen_pad_clearance: f64,

    /// Extra silkscreen gap reserved next to the pin-1 corner (four-side
    /// packages only).
    pub pin1_corner_clearance: f64,

    /// Radius of the silkscreen pin-1 dot.
    pub pin1_dot_radius: f64,

    /// Diagonal offset of the pin-1 dot centre from the body corner.
    pub pin1_dot_offset: f64,

    /// Fabrication layer stroke width.
    pub fabrication_line_width: f64,

    /// Leg length of the fabrication pin-1 chamfer.
    pub chamfer: f64,

    /// Courtyard stroke width.
    pub courtyard_line_width: f64,

    /// Courtyard margin beyond body and pads.
    pub courtyard_margin: f64,

    /// Distance from body edge to the text anchors.
    pub text_offset: f64,

    /// Text character height.
    pub text_size: f64,

    /// Text stroke thickness.
    pub text_thickness: f64,
}

impl Default for DrawingStyle {
    fn default() -> Self {
        Self {
            silkscreen_line_width: 0.12,
            silkscreen_pad_clearance: 0.15,
            pin1_corner_clearance: 0.5,
            pin1_dot_radius: 0.2,
            pin1_dot_offset: 0.4,
            fabrication_line_width: 0.10,
            chamfer: 0.5,
            courtyard_line_width: 0.05,
            courtyard_margin: 0.25,
            text_offset: 1.0,
            text_size: 1.0,
            text_thickness: 0.15,
        }
    }
}

impl DrawingStyle {
    /// Names and values of every field, for validation and reporting.
    #[must_use]
    pub const fn fields(&self) -> [(&'static str, f64); 12] {
        [
            ("silkscreen_line_width", self.silkscreen_line_width),
            ("silkscreen_pad_clearance", self.silkscreen_pad_clearance),
            ("pin1_corner_clearance", self.pin1_corner_clearance),
            ("pin1_dot_radius", self.pin1_dot_radius),
            ("pin1_dot_offset", self.pin1_dot_offset),
            ("fabrication_line_width", self.fabrication_line_width),
            ("chamfer", self.chamfer),
            ("courtyard_line_width", self.courtyard_line_width),
            ("courtyard_margin", self.courtyard_margin),
            ("text_offset", self.text_offset),
            ("text_size", self.text_size),
            ("text_thickness", self.text_thickness),
        ]
    }
}
