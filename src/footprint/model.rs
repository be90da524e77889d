//! Footprint entity types.
//!
//! These types represent the elements that make up a generated footprint:
//! pads, drawing primitives (segments, circles, rectangles) and the
//! reference/value text anchors.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::footprint::geometry::{Point, Rect, Size};

bitflags! {
    /// Functional layers a pad occupies.
    ///
    /// Paste and mask openings use the same outline as the copper.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PadLayers: u8 {
        /// Front copper.
        const COPPER = 0b0001;
        /// Front solder paste.
        const PASTE = 0b0010;
        /// Front solder mask opening.
        const MASK = 0b0100;
        /// Standard SMD stack: copper, paste and mask.
        const SMD = Self::COPPER.bits() | Self::PASTE.bits() | Self::MASK.bits();
    }
}

impl Default for PadLayers {
    fn default() -> Self {
        Self::SMD
    }
}

/// Pad shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PadShape {
    /// Rectangular pad.
    #[default]
    Rectangle,
}

/// Pad rotation about its centre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Unrotated.
    #[default]
    #[serde(rename = "0")]
    Deg0,
    /// Quarter turn: the X and Y extents trade places.
    #[serde(rename = "90")]
    Deg90,
}

impl Orientation {
    /// Rotation in degrees.
    #[must_use]
    pub const fn degrees(self) -> f64 {
        match self {
            Self::Deg0 => 0.0,
            Self::Deg90 => 90.0,
        }
    }
}

/// A placed SMD pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    /// Pad number ("1", "2", ...), unique within a footprint.
    pub number: String,

    /// Pad centre (mm).
    pub position: Point,

    /// Pad size before rotation (mm).
    pub size: Size,

    /// Pad shape.
    #[serde(default)]
    pub shape: PadShape,

    /// Rotation about the centre.
    #[serde(default)]
    pub orientation: Orientation,

    /// Layers occupied by the pad.
    #[serde(default)]
    pub layers: PadLayers,
}

impl Pad {
    /// Creates a new unrotated rectangular SMD pad.
    #[must_use]
    pub fn smd(number: impl Into<String>, x: f64, y: f64, size: Size) -> Self {
        Self {
            number: number.into(),
            position: Point::new(x, y),
            size,
            shape: PadShape::Rectangle,
            orientation: Orientation::Deg0,
            layers: PadLayers::SMD,
        }
    }

    /// Axis-aligned bounding box of the pad, honouring its orientation.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        let size = match self.orientation {
            Orientation::Deg0 => self.size,
            Orientation::Deg90 => self.size.swapped(),
        };
        Rect::centred_on(self.position, size)
    }
}

/// Drawing layers used by generated footprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Front silkscreen (cosmetic outline, pin-1 dot, reference text).
    Silkscreen,
    /// Front fabrication (true body outline, chamfer, value text).
    Fabrication,
    /// Front courtyard (placement keep-out).
    Courtyard,
}

/// A drawing primitive on a non-copper layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drawing {
    /// Straight line segment.
    Segment {
        /// Start point.
        start: Point,
        /// End point.
        end: Point,
        /// Layer.
        layer: Layer,
        /// Stroke width (mm).
        width: f64,
    },
    /// Unfilled circle.
    Circle {
        /// Centre point.
        centre: Point,
        /// Radius (mm).
        radius: f64,
        /// Layer.
        layer: Layer,
        /// Stroke width (mm).
        width: f64,
    },
    /// Unfilled axis-aligned rectangle given by two opposite corners.
    Rectangle {
        /// First corner.
        start: Point,
        /// Opposite corner.
        end: Point,
        /// Layer.
        layer: Layer,
        /// Stroke width (mm).
        width: f64,
    },
}

impl Drawing {
    /// Creates a segment.
    #[must_use]
    pub const fn segment(start: Point, end: Point, layer: Layer, width: f64) -> Self {
        Self::Segment {
            start,
            end,
            layer,
            width,
        }
    }

    /// Creates a circle.
    #[must_use]
    pub const fn circle(centre: Point, radius: f64, layer: Layer, width: f64) -> Self {
        Self::Circle {
            centre,
            radius,
            layer,
            width,
        }
    }

    /// Creates a rectangle outline from a [`Rect`].
    #[must_use]
    pub const fn rectangle(rect: &Rect, layer: Layer, width: f64) -> Self {
        Self::Rectangle {
            start: rect.start(),
            end: rect.end(),
            layer,
            width,
        }
    }

    /// The layer this primitive is drawn on.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        match self {
            Self::Segment { layer, .. } | Self::Circle { layer, .. } | Self::Rectangle { layer, .. } => {
                *layer
            }
        }
    }
}

/// Horizontal text justification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justify {
    /// Centred on the anchor.
    #[default]
    Centre,
}

/// A reference or value text anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnchor {
    /// Text content.
    pub text: String,
    /// Anchor position (mm).
    pub position: Point,
    /// Layer.
    pub layer: Layer,
    /// Character height and width (mm).
    pub size: f64,
    /// Stroke thickness (mm).
    pub thickness: f64,
    /// Horizontal justification.
    #[serde(default)]
    pub justify: Justify,
}

/// A generated footprint, ready for placement by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Library name (the package name).
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Keyword tags.
    pub keywords: Vec<String>,

    /// Pads in generation order.
    pub pads: Vec<Pad>,

    /// Silkscreen, fabrication and courtyard primitives.
    pub drawings: Vec<Drawing>,

    /// Reference designator anchor.
    pub reference: TextAnchor,

    /// Value anchor.
    pub value: TextAnchor,
}

impl Footprint {
    /// Looks up a pad by number.
    #[must_use]
    pub fn pad(&self, number: &str) -> Option<&Pad> {
        self.pads.iter().find(|p| p.number == number)
    }

    /// Iterates over drawings on one layer.
    pub fn drawings_on(&self, layer: Layer) -> impl Iterator<Item = &Drawing> {
        self.drawings.iter().filter(move |d| d.layer() == layer)
    }

    /// Returns the courtyard rectangle, if one was drawn.
    #[must_use]
    pub fn courtyard(&self) -> Option<Rect> {
        self.drawings_on(Layer::Courtyard).find_map(|d| match d {
            Drawing::Rectangle { start, end, .. } => Some(Rect {
                min_x: start.x.min(end.x),
                min_y: start.y.min(end.y),
                max_x: start.x.max(end.x),
                max_y: start.y.max(end.y),
            }),
            _ => None,
        })
    }

    /// Bounding box of all pads, or `None` for a footprint without pads.
    #[must_use]
    pub fn pad_extents(&self) -> Option<Rect> {
        self.pads
            .iter()
            .map(Pad::bounding_box)
            .reduce(Rect::union)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smd_layers_cover_copper_paste_mask() {
        let layers = PadLayers::default();
        assert!(layers.contains(PadLayers::COPPER));
        assert!(layers.contains(PadLayers::PASTE));
        assert!(layers.contains(PadLayers::MASK));
    }

    #[test]
    fn rotated_pad_bounding_box_swaps_axes() {
        let mut pad = Pad::smd("1", 1.0, 2.0, Size::new(0.6, 0.3));
        let bbox = pad.bounding_box();
        assert!((bbox.width() - 0.6).abs() < 1e-9);
        assert!((bbox.height() - 0.3).abs() < 1e-9);

        pad.orientation = Orientation::Deg90;
        let bbox = pad.bounding_box();
        assert!((bbox.width() - 0.3).abs() < 1e-9);
        assert!((bbox.height() - 0.6).abs() < 1e-9);
        assert!((bbox.min_x - 0.85).abs() < 1e-9);
    }

    #[test]
    fn drawing_reports_layer() {
        let d = Drawing::circle(Point::default(), 0.2, Layer::Silkscreen, 0.12);
        assert_eq!(d.layer(), Layer::Silkscreen);
        let r = Drawing::rectangle(&Rect::from_half_extents(1.0, 1.0), Layer::Courtyard, 0.05);
        assert_eq!(r.layer(), Layer::Courtyard);
    }

    #[test]
    fn pad_serialises_layers_and_orientation() {
        let pad = Pad::smd("7", 0.0, 0.0, Size::new(1.0, 0.5));
        let json = serde_json::to_value(&pad).unwrap();
        assert_eq!(json["number"], "7");
        assert_eq!(json["orientation"], "0");
        assert_eq!(json["shape"], "rectangle");
    }
}
