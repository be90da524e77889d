//! Outline and marking primitives shared by every package family.
//!
//! - Silkscreen body outline, clipped around pad copper
//! - Silkscreen pin-1 dot
//! - Courtyard rectangle
//! - Fabrication body outline with pin-1 chamfer
//! - Reference and value text anchors

use crate::footprint::geometry::{subtract_span, Point, Rect, Span};
use crate::footprint::model::{Drawing, Justify, Layer, Pad, TextAnchor};
use crate::footprint::packages::Pin1Location;
use crate::footprint::style::DrawingStyle;

/// Reference designator placeholder the host replaces on placement.
pub const REFERENCE_PLACEHOLDER: &str = "REF**";

/// One side of a rectangular body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Negative-x side.
    Left,
    /// Positive-y side (south).
    Bottom,
    /// Positive-x side.
    Right,
    /// Negative-y side (north).
    Top,
}

impl Edge {
    /// Drawing order for silkscreen edges.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    const fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Coordinate of the edge line on its fixed axis.
    fn line(self, body: &Rect) -> f64 {
        match self {
            Self::Left => body.min_x,
            Self::Right => body.max_x,
            Self::Top => body.min_y,
            Self::Bottom => body.max_y,
        }
    }

    /// Extent of the edge along its free axis.
    fn span(self, body: &Rect) -> Span {
        if self.is_vertical() {
            Span::new(body.min_y, body.max_y)
        } else {
            Span::new(body.min_x, body.max_x)
        }
    }

    fn point(self, body: &Rect, along: f64) -> Point {
        let line = self.line(body);
        if self.is_vertical() {
            Point::new(line, along)
        } else {
            Point::new(along, line)
        }
    }
}

impl Pin1Location {
    /// Unit direction from the body centre towards this corner.
    #[must_use]
    pub const fn signs(self) -> (f64, f64) {
        match self {
            Self::UpperLeft => (-1.0, -1.0),
            Self::LowerLeft => (-1.0, 1.0),
            Self::LowerRight => (1.0, 1.0),
            Self::UpperRight => (1.0, -1.0),
        }
    }

    /// The corner point of `body`.
    #[must_use]
    pub fn corner_of(self, body: &Rect) -> Point {
        let (sx, sy) = self.signs();
        Point::new(
            if sx < 0.0 { body.min_x } else { body.max_x },
            if sy < 0.0 { body.min_y } else { body.max_y },
        )
    }

    /// Whether `edge` ends at this corner, and if so at which end of its span
    /// (`false` = low end, `true` = high end).
    const fn touches(self, edge: Edge) -> Option<bool> {
        let (left, upper) = match self {
            Self::UpperLeft => (true, true),
            Self::LowerLeft => (true, false),
            Self::LowerRight => (false, false),
            Self::UpperRight => (false, true),
        };
        match edge {
            Edge::Left if left => Some(!upper),
            Edge::Right if !left => Some(!upper),
            Edge::Top if upper => Some(!left),
            Edge::Bottom if !upper => Some(!left),
            _ => None,
        }
    }
}

/// Span of `edge` blocked by pad copper plus `clearance`.
///
/// Only pads whose inflated bounding box crosses the edge line contribute;
/// the gap is the hull of their extents along the edge.
pub fn edge_gap<'a>(
    edge: Edge,
    body: &Rect,
    pads: impl IntoIterator<Item = &'a Pad>,
    clearance: f64,
) -> Option<Span> {
    let line = edge.line(body);

    pads.into_iter()
        .map(|pad| pad.bounding_box().inflate(clearance))
        .filter_map(|bbox| {
            if edge.is_vertical() {
                (bbox.min_x <= line && line <= bbox.max_x).then(|| Span::new(bbox.min_y, bbox.max_y))
            } else {
                (bbox.min_y <= line && line <= bbox.max_y).then(|| Span::new(bbox.min_x, bbox.max_x))
            }
        })
        .reduce(Span::hull)
}

/// Silkscreen body outline, one or two segments per edge.
///
/// `gap_for` supplies the blocked span of each edge. `corner_reserve` is
/// trimmed off both edges meeting at the pin-1 corner.
pub fn silkscreen_outline(
    body: &Rect,
    gap_for: impl Fn(Edge) -> Option<Span>,
    pin1: Pin1Location,
    corner_reserve: f64,
    style: &DrawingStyle,
) -> Vec<Drawing> {
    let mut drawings = Vec::new();

    for edge in Edge::ALL {
        let mut span = edge.span(body);
        match pin1.touches(edge) {
            Some(false) => span.lo += corner_reserve,
            Some(true) => span.hi -= corner_reserve,
            None => {}
        }

        for piece in subtract_span(span, gap_for(edge)) {
            drawings.push(Drawing::segment(
                edge.point(body, piece.lo),
                edge.point(body, piece.hi),
                Layer::Silkscreen,
                style.silkscreen_line_width,
            ));
        }
    }

    drawings
}

/// Silkscreen dot just outside the pin-1 corner of the body.
#[must_use]
pub fn pin1_dot(body: &Rect, pin1: Pin1Location, style: &DrawingStyle) -> Drawing {
    let (sx, sy) = pin1.signs();
    let corner = pin1.corner_of(body);
    let centre = Point::new(
        sx.mul_add(style.pin1_dot_offset, corner.x),
        sy.mul_add(style.pin1_dot_offset, corner.y),
    );
    Drawing::circle(
        centre,
        style.pin1_dot_radius,
        Layer::Silkscreen,
        style.silkscreen_line_width,
    )
}

/// Courtyard rectangle.
///
/// `half_x`/`half_y` are the family's nominal extents; each is widened if
/// needed so every pad keeps the full margin.
#[must_use]
pub fn courtyard(half_x: f64, half_y: f64, pads: &[Pad], style: &DrawingStyle) -> Drawing {
    let (pad_x, pad_y) = pads
        .iter()
        .map(Pad::bounding_box)
        .fold((0.0_f64, 0.0_f64), |(x, y), b| {
            (
                x.max(b.min_x.abs()).max(b.max_x.abs()),
                y.max(b.min_y.abs()).max(b.max_y.abs()),
            )
        });

    let rect = Rect::from_half_extents(
        half_x.max(pad_x) + style.courtyard_margin,
        half_y.max(pad_y) + style.courtyard_margin,
    );
    Drawing::rectangle(&rect, Layer::Courtyard, style.courtyard_line_width)
}

/// Fabrication body rectangle plus the pin-1 chamfer.
///
/// The chamfer is only drawn when both body dimensions are at least
/// `min_body_for_chamfer`.
#[must_use]
pub fn fabrication_outline(
    body: &Rect,
    pin1: Pin1Location,
    min_body_for_chamfer: f64,
    style: &DrawingStyle,
) -> Vec<Drawing> {
    let width = style.fabrication_line_width;
    let mut drawings = vec![Drawing::rectangle(body, Layer::Fabrication, width)];

    if body.width() >= min_body_for_chamfer && body.height() >= min_body_for_chamfer {
        let (sx, sy) = pin1.signs();
        let corner = pin1.corner_of(body);
        let chamfer = style.chamfer;
        drawings.push(Drawing::segment(
            Point::new(corner.x, (-sy).mul_add(chamfer, corner.y)),
            Point::new((-sx).mul_add(chamfer, corner.x), corner.y),
            Layer::Fabrication,
            width,
        ));
    }

    drawings
}

/// Reference (south of the body, silkscreen) and value (north, fabrication)
/// anchors.
#[must_use]
pub fn text_anchors(value: &str, body_half_y: f64, style: &DrawingStyle) -> (TextAnchor, TextAnchor) {
    let offset = body_half_y + style.text_offset;
    let anchor = |text: &str, y: f64, layer: Layer| TextAnchor {
        text: text.to_string(),
        position: Point::new(0.0, y),
        layer,
        size: style.text_size,
        thickness: style.text_thickness,
        justify: Justify::Centre,
    };

    (
        anchor(REFERENCE_PLACEHOLDER, offset, Layer::Silkscreen),
        anchor(value, -offset, Layer::Fabrication),
    )
}
