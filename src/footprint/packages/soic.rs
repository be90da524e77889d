//! SOIC (small-outline IC) land patterns.
//!
//! Two columns of pads, one per lead row. Pins are numbered down the left
//! column and back up the right column, so pin 1 sits at the top left and
//! pin N opposite it at the top right.
//!
//! The lead direction is x: `overall_width` is the toe-to-toe span across
//! both rows and `body_width` the plastic body in the same direction, while
//! `body_length` runs along the rows.

use serde::Serialize;

use crate::footprint::error::{Reason, ValidationError};
use crate::footprint::geometry::{centred_positions, Rect, Size};
use crate::footprint::model::{Drawing, Pad};
use crate::footprint::outline::{self, Edge};
use crate::footprint::packages::{PackageFamily, PackageLayout, Pin1Location};
use crate::footprint::params::{ParamField, RawParams};
use crate::footprint::style::DrawingStyle;

const PIN_COUNT: ParamField = ParamField::required("Pin Count", &["PinCount"]);
const PITCH: ParamField = ParamField::required("Pitch", &[]);
const PAD_WIDTH: ParamField = ParamField::required("Pad Width", &["Lead Width", "LeadWidth"]);
const PAD_LENGTH: ParamField = ParamField::required("Pad Length", &["Foot Length", "FootLength"]);
const OVERALL_WIDTH: ParamField = ParamField::required("Overall Width", &["OverallWidth"]);
const BODY_LENGTH: ParamField = ParamField::required("Package Body Length", &["PackageBodyLength"]);
const BODY_WIDTH: ParamField = ParamField::required("Package Body Width", &["PackageBodyWidth"]);

/// Largest total pin count accepted.
pub const MAX_PIN_COUNT: u32 = 2048;

/// SOIC parameter table, in validation order.
pub const FIELDS: &[ParamField] = &[
    PIN_COUNT,
    PITCH,
    PAD_WIDTH,
    PAD_LENGTH,
    OVERALL_WIDTH,
    BODY_LENGTH,
    BODY_WIDTH,
];

/// Validated SOIC dimensions (mm).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoicParams {
    /// Total pin count (even).
    pub pin_count: u32,
    /// Lead pitch along a row.
    pub pitch: f64,
    /// Pad extent along the row.
    pub pad_width: f64,
    /// Pad extent in the lead direction.
    pub pad_length: f64,
    /// Toe-to-toe span across both rows.
    pub overall_width: f64,
    /// Body extent along the rows.
    pub body_length: f64,
    /// Body extent in the lead direction.
    pub body_width: f64,
}

impl SoicParams {
    /// Reads and checks SOIC parameters.
    ///
    /// # Errors
    ///
    /// Returns the first failing field, then the cross-field checks: an odd
    /// pin count, or pads long enough to meet in the middle.
    pub fn from_raw(raw: &RawParams) -> Result<Self, ValidationError> {
        let params = Self {
            pin_count: PIN_COUNT.count(raw, 1, MAX_PIN_COUNT)?,
            pitch: PITCH.dimension(raw)?,
            pad_width: PAD_WIDTH.dimension(raw)?,
            pad_length: PAD_LENGTH.dimension(raw)?,
            overall_width: OVERALL_WIDTH.dimension(raw)?,
            body_length: BODY_LENGTH.dimension(raw)?,
            body_width: BODY_WIDTH.dimension(raw)?,
        };

        if params.pin_count % 2 != 0 {
            return Err(ValidationError::new(
                PIN_COUNT.key,
                Reason::OddPinCount {
                    count: params.pin_count,
                },
            ));
        }

        if params.pad_length >= params.overall_width {
            return Err(ValidationError::new(
                PAD_LENGTH.key,
                Reason::PadLengthNotLessThanOverallWidth {
                    pad_length: params.pad_length,
                    overall_width: params.overall_width,
                },
            ));
        }

        Ok(params)
    }

    /// Pins in each row.
    #[must_use]
    pub const fn pins_per_side(&self) -> u32 {
        self.pin_count / 2
    }

    /// Centre-to-centre distance between the two pad columns.
    #[must_use]
    pub fn row_spacing(&self) -> f64 {
        self.overall_width - self.pad_length
    }

    fn body(&self) -> Rect {
        Rect::from_half_extents(self.body_width / 2.0, self.body_length / 2.0)
    }
}

impl PackageLayout for SoicParams {
    fn family(&self) -> PackageFamily {
        PackageFamily::Soic
    }

    fn layout_pads(&self) -> Vec<Pad> {
        let size = Size::new(self.pad_length, self.pad_width);
        let x = self.row_spacing() / 2.0;

        centred_positions(self.pins_per_side(), self.pitch)
            .into_iter()
            .zip(0..)
            .flat_map(|(y, i)| {
                [
                    Pad::smd((i + 1).to_string(), -x, y, size),
                    Pad::smd((self.pin_count - i).to_string(), x, y, size),
                ]
            })
            .collect()
    }

    fn build_drawings(&self, style: &DrawingStyle) -> Vec<Drawing> {
        let body = self.body();
        let pads = self.layout_pads();

        let mut drawings = outline::silkscreen_outline(
            &body,
            |edge: Edge| outline::edge_gap(edge, &body, &pads, style.silkscreen_pad_clearance),
            Pin1Location::UpperLeft,
            0.0,
            style,
        );
        drawings.push(outline::pin1_dot(&body, Pin1Location::UpperLeft, style));
        drawings.push(outline::courtyard(
            self.overall_width / 2.0,
            self.body_length / 2.0,
            &pads,
            style,
        ));
        drawings.extend(outline::fabrication_outline(
            &body,
            Pin1Location::UpperLeft,
            style.chamfer,
            style,
        ));
        drawings
    }

    fn description(&self) -> String {
        format!("SOIC, {} Pin, pitch {}mm", self.pin_count, self.pitch)
    }

    fn body_half_y(&self) -> f64 {
        self.body_length / 2.0
    }
}
