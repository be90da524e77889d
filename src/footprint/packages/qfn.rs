//! QFN (quad flat no-lead) land patterns.
//!
//! Perimeter pads on all four sides, numbered in one counter-clockwise sweep
//! that starts at the pin-1 corner, plus an optional thermal pad in the
//! centre numbered after the perimeter.
//!
//! Pad sizes are stored in board axes: side pads are `pad_length` wide in x,
//! top and bottom pads are `pad_length` tall in y.

use serde::Serialize;

use crate::footprint::error::{Reason, ValidationError};
use crate::footprint::geometry::{centred_positions, Point, Rect, Size};
use crate::footprint::model::{Drawing, Layer, Pad};
use crate::footprint::outline::{self, Edge};
use crate::footprint::packages::{PackageFamily, PackageLayout, Pin1Location};
use crate::footprint::params::{ParamField, RawParams};
use crate::footprint::style::DrawingStyle;

const PIN_COUNT_X: ParamField = ParamField::required("Pin Count X", &["PinCountX"]);
const PIN_COUNT_Y: ParamField = ParamField::required("Pin Count Y", &["PinCountY"]);
const PAD_WIDTH: ParamField = ParamField::required("Pad Width", &["PadWidth"]);
const PAD_LENGTH: ParamField = ParamField::required("Pad Length", &["PadLength"]);
const PITCH_X: ParamField = ParamField::required("Lead Pitch X", &["LeadPitchX"]);
const PITCH_Y: ParamField = ParamField::required("Lead Pitch Y", &["LeadPitchY"]);
const BODY_X: ParamField = ParamField::required("Package Body Size X", &["PackageBodySizeX"]);
const BODY_Y: ParamField = ParamField::required("Package Body Size Y", &["PackageBodySizeY"]);
const EP_SIZE_X: ParamField = ParamField::optional("Exposed Pad Size X", &["ExposedPadSizeX"]);
const EP_SIZE_Y: ParamField = ParamField::optional("Exposed Pad Size Y", &["ExposedPadSizeY"]);
const EP_LAND_X: ParamField = ParamField::optional("Exposed Pad Land Size X", &["ExposedPadLandSizeX"]);
const EP_LAND_Y: ParamField = ParamField::optional("Exposed Pad Land Size Y", &["ExposedPadLandSizeY"]);
const PIN1_LOCATION: ParamField = ParamField::optional("Pin 1 Visual Location", &["Pin1Location"]);

/// QFN parameter table, in validation order.
pub const FIELDS: &[ParamField] = &[
    PIN_COUNT_X,
    PIN_COUNT_Y,
    PAD_WIDTH,
    PAD_LENGTH,
    PITCH_X,
    PITCH_Y,
    BODY_X,
    BODY_Y,
    EP_SIZE_X,
    EP_SIZE_Y,
    EP_LAND_X,
    EP_LAND_Y,
    PIN1_LOCATION,
];

/// Largest pad count accepted on one edge.
pub const MAX_PINS_PER_EDGE: u32 = 1024;

/// Validated QFN dimensions (mm).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QfnParams {
    /// Pads on each of the top and bottom edges.
    pub pin_count_x: u32,
    /// Pads on each of the left and right edges.
    pub pin_count_y: u32,
    /// Pitch along the top and bottom edges.
    pub pitch_x: f64,
    /// Pitch along the left and right edges.
    pub pitch_y: f64,
    /// Pad extent along its edge.
    pub pad_width: f64,
    /// Pad extent away from the body.
    pub pad_length: f64,
    /// Body extent in x.
    pub body_x: f64,
    /// Body extent in y.
    pub body_y: f64,
    /// Exposed pad as drawn on the package, if any.
    pub exposed_pad: Option<Size>,
    /// Thermal pad land, if any.
    pub thermal_land: Option<Size>,
    /// Corner nearest pin 1.
    pub pin1_location: Pin1Location,
}

impl QfnParams {
    /// Reads and checks QFN parameters.
    ///
    /// # Errors
    ///
    /// Returns the first failing field. The exposed-pad fields may be absent
    /// or zero but not negative; the pin-1 location must name a corner.
    pub fn from_raw(raw: &RawParams) -> Result<Self, ValidationError> {
        let pin_count_x = PIN_COUNT_X.count(raw, 1, MAX_PINS_PER_EDGE)?;
        let pin_count_y = PIN_COUNT_Y.count(raw, 1, MAX_PINS_PER_EDGE)?;
        let pad_width = PAD_WIDTH.dimension(raw)?;
        let pad_length = PAD_LENGTH.dimension(raw)?;
        let pitch_x = PITCH_X.dimension(raw)?;
        let pitch_y = PITCH_Y.dimension(raw)?;
        let body_x = BODY_X.dimension(raw)?;
        let body_y = BODY_Y.dimension(raw)?;
        let exposed_pad = both_positive(EP_SIZE_X.optional_dimension(raw)?, EP_SIZE_Y.optional_dimension(raw)?);
        let thermal_land = both_positive(EP_LAND_X.optional_dimension(raw)?, EP_LAND_Y.optional_dimension(raw)?);

        let pin1_location = match PIN1_LOCATION.lookup(raw) {
            None => Pin1Location::default(),
            Some(text) => Pin1Location::parse(text).ok_or_else(|| {
                ValidationError::new(
                    PIN1_LOCATION.key,
                    Reason::UnsupportedPin1Location {
                        value: text.to_string(),
                    },
                )
            })?,
        };

        Ok(Self {
            pin_count_x,
            pin_count_y,
            pitch_x,
            pitch_y,
            pad_width,
            pad_length,
            body_x,
            body_y,
            exposed_pad,
            thermal_land,
            pin1_location,
        })
    }

    /// Number of perimeter pads.
    #[must_use]
    pub const fn perimeter_count(&self) -> u32 {
        2 * (self.pin_count_x + self.pin_count_y)
    }

    fn body(&self) -> Rect {
        Rect::from_half_extents(self.body_x / 2.0, self.body_y / 2.0)
    }

    /// Edges in sweep order, starting with the one that holds pin 1.
    const fn sweep(&self) -> [Edge; 4] {
        match self.pin1_location {
            Pin1Location::UpperLeft => [Edge::Left, Edge::Bottom, Edge::Right, Edge::Top],
            Pin1Location::LowerLeft => [Edge::Bottom, Edge::Right, Edge::Top, Edge::Left],
            Pin1Location::LowerRight => [Edge::Right, Edge::Top, Edge::Left, Edge::Bottom],
            Pin1Location::UpperRight => [Edge::Top, Edge::Left, Edge::Bottom, Edge::Right],
        }
    }

    /// Pad centres and size for one edge, in counter-clockwise order.
    fn edge_sites(&self, edge: Edge) -> (Vec<Point>, Size) {
        let off_x = self.body_x / 2.0 + self.pad_length / 2.0;
        let off_y = self.body_y / 2.0 + self.pad_length / 2.0;
        let side = Size::new(self.pad_length, self.pad_width);
        let end = Size::new(self.pad_width, self.pad_length);

        let ys = centred_positions(self.pin_count_y, self.pitch_y);
        let xs = centred_positions(self.pin_count_x, self.pitch_x);

        match edge {
            Edge::Left => (ys.into_iter().map(|y| Point::new(-off_x, y)).collect(), side),
            Edge::Bottom => (xs.into_iter().map(|x| Point::new(x, off_y)).collect(), end),
            Edge::Right => (ys.into_iter().rev().map(|y| Point::new(off_x, y)).collect(), side),
            Edge::Top => (xs.into_iter().rev().map(|x| Point::new(x, -off_y)).collect(), end),
        }
    }

    /// Perimeter pads tagged with the edge they sit on.
    fn perimeter(&self) -> Vec<(Edge, Pad)> {
        let mut number = 0_u32;
        let mut pads = Vec::with_capacity(self.perimeter_count() as usize);

        for edge in self.sweep() {
            let (sites, size) = self.edge_sites(edge);
            for site in sites {
                number += 1;
                pads.push((edge, Pad::smd(number.to_string(), site.x, site.y, size)));
            }
        }
        pads
    }
}

impl PackageLayout for QfnParams {
    fn family(&self) -> PackageFamily {
        PackageFamily::Qfn
    }

    fn layout_pads(&self) -> Vec<Pad> {
        let mut pads: Vec<Pad> = self.perimeter().into_iter().map(|(_, pad)| pad).collect();

        if let Some(land) = self.thermal_land {
            pads.push(Pad::smd((self.perimeter_count() + 1).to_string(), 0.0, 0.0, land));
        }
        pads
    }

    fn build_drawings(&self, style: &DrawingStyle) -> Vec<Drawing> {
        let body = self.body();
        let perimeter = self.perimeter();

        let gap_for = |edge: Edge| {
            let own = perimeter.iter().filter(|(e, _)| *e == edge).map(|(_, pad)| pad);
            outline::edge_gap(edge, &body, own, style.silkscreen_pad_clearance)
        };

        let mut drawings = outline::silkscreen_outline(
            &body,
            gap_for,
            self.pin1_location,
            style.pin1_corner_clearance,
            style,
        );
        drawings.push(outline::pin1_dot(&body, self.pin1_location, style));
        drawings.push(outline::courtyard(
            self.body_x / 2.0 + self.pad_length,
            self.body_y / 2.0 + self.pad_length,
            &self.layout_pads(),
            style,
        ));
        drawings.extend(outline::fabrication_outline(
            &body,
            self.pin1_location,
            2.0 * style.chamfer,
            style,
        ));

        if let Some(ep) = self.exposed_pad {
            drawings.push(Drawing::rectangle(
                &Rect::centred_on(Point::default(), ep),
                Layer::Fabrication,
                style.fabrication_line_width,
            ));
        }
        drawings
    }

    fn description(&self) -> String {
        format!(
            "QFN, {} Pin ({}x{}), pitch {}mm x {}mm, body size {}x{}mm",
            self.perimeter_count(),
            self.pin_count_x,
            self.pin_count_y,
            self.pitch_x,
            self.pitch_y,
            self.body_x,
            self.body_y
        )
    }

    fn body_half_y(&self) -> f64 {
        self.body_y / 2.0
    }
}

fn both_positive(x: f64, y: f64) -> Option<Size> {
    (x > 0.0 && y > 0.0).then(|| Size::new(x, y))
}
