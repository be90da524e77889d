//! Package family implementations.
//!
//! Each family (SOIC, QFN) has its own module holding its parameter table,
//! validation rules, pad layout and outline drawings.

pub mod qfn;
pub mod soic;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::footprint::error::{GenerateError, ValidationError};
use crate::footprint::model::{Drawing, Pad};
use crate::footprint::params::{ParamField, RawParams};
use crate::footprint::style::DrawingStyle;

pub use qfn::QfnParams;
pub use soic::SoicParams;

/// Supported package families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageFamily {
    /// Small-outline IC: two rows of gull-wing leads.
    Soic,
    /// Quad flat no-lead: perimeter pads on four sides, optional thermal pad.
    Qfn,
}

impl PackageFamily {
    /// Every supported family.
    pub const ALL: [Self; 2] = [Self::Soic, Self::Qfn];

    /// Tag used in requests and descriptions.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Soic => "SOIC",
            Self::Qfn => "QFN",
        }
    }

    /// Short human description of the family.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Soic => "Two-side leaded small-outline package",
            Self::Qfn => "Four-side no-lead package with optional centre thermal pad",
        }
    }

    /// Parameter table: every field with its accepted keys.
    #[must_use]
    pub const fn fields(self) -> &'static [ParamField] {
        match self {
            Self::Soic => soic::FIELDS,
            Self::Qfn => qfn::FIELDS,
        }
    }

    /// Keyword tags attached to generated footprints.
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Soic => &["SOIC", "SO"],
            Self::Qfn => &["QFN", "DFN"],
        }
    }
}

impl fmt::Display for PackageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PackageFamily {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|family| family.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| GenerateError::unsupported_family(s))
    }
}

/// Body corner nearest pin 1, as seen from above.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pin1Location {
    /// North-west corner.
    #[default]
    UpperLeft,
    /// South-west corner.
    LowerLeft,
    /// South-east corner.
    LowerRight,
    /// North-east corner.
    UpperRight,
}

impl Pin1Location {
    /// Every corner, in counter-clockwise order from the upper left.
    pub const ALL: [Self; 4] = [Self::UpperLeft, Self::LowerLeft, Self::LowerRight, Self::UpperRight];

    /// Canonical label as it appears in datasheet parameters.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpperLeft => "UPPER LEFT",
            Self::LowerLeft => "LOWER LEFT",
            Self::LowerRight => "LOWER RIGHT",
            Self::UpperRight => "UPPER RIGHT",
        }
    }

    /// Parses a label, ignoring case and accepting space, `_` or `-` between
    /// the words.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let normalised: String = text
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c.to_ascii_uppercase() })
            .collect();
        let normalised = normalised.split_whitespace().collect::<Vec<_>>().join(" ");

        Self::ALL.into_iter().find(|loc| loc.label() == normalised)
    }
}

impl fmt::Display for Pin1Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Layout behaviour shared by every family's validated parameters.
pub trait PackageLayout {
    /// Family these parameters describe.
    fn family(&self) -> PackageFamily;

    /// Pads in numbering order.
    fn layout_pads(&self) -> Vec<Pad>;

    /// Silkscreen, courtyard and fabrication primitives.
    fn build_drawings(&self, style: &DrawingStyle) -> Vec<Drawing>;

    /// One-line description for the footprint library.
    fn description(&self) -> String;

    /// Half body extent along y, used to place the text anchors.
    fn body_half_y(&self) -> f64;
}

/// Validated parameters for one footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "family", rename_all = "UPPERCASE")]
pub enum ParameterRecord {
    /// SOIC parameters.
    Soic(SoicParams),
    /// QFN parameters.
    Qfn(QfnParams),
}

impl ParameterRecord {
    /// Coerces and checks `raw` against the parameter table of `family`.
    ///
    /// # Errors
    ///
    /// Returns the first field that is missing, malformed or out of range,
    /// or the first failed cross-field check.
    pub fn validate(family: PackageFamily, raw: &RawParams) -> Result<Self, ValidationError> {
        match family {
            PackageFamily::Soic => SoicParams::from_raw(raw).map(Self::Soic),
            PackageFamily::Qfn => QfnParams::from_raw(raw).map(Self::Qfn),
        }
    }

    /// Family of this record.
    #[must_use]
    pub fn family(&self) -> PackageFamily {
        self.layout().family()
    }

    fn layout(&self) -> &dyn PackageLayout {
        match self {
            Self::Soic(p) => p,
            Self::Qfn(p) => p,
        }
    }

    /// Pads in numbering order.
    #[must_use]
    pub fn layout_pads(&self) -> Vec<Pad> {
        self.layout().layout_pads()
    }

    /// Outline and marking primitives.
    #[must_use]
    pub fn build_drawings(&self, style: &DrawingStyle) -> Vec<Drawing> {
        self.layout().build_drawings(style)
    }

    /// Library description.
    #[must_use]
    pub fn description(&self) -> String {
        self.layout().description()
    }

    /// Half body extent along y.
    #[must_use]
    pub fn body_half_y(&self) -> f64 {
        self.layout().body_half_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_tag_is_case_insensitive() {
        assert_eq!("soic".parse::<PackageFamily>().unwrap(), PackageFamily::Soic);
        assert_eq!(" Qfn ".parse::<PackageFamily>().unwrap(), PackageFamily::Qfn);
    }

    #[test]
    fn unknown_family_rejected() {
        let err = "BGA".parse::<PackageFamily>().unwrap_err();
        assert_eq!(err.to_string(), "unsupported package family: BGA");
    }

    #[test]
    fn family_display_matches_tag() {
        assert_eq!(PackageFamily::Soic.to_string(), "SOIC");
        assert_eq!(PackageFamily::Qfn.to_string(), "QFN");
    }

    #[test]
    fn pin1_location_spellings() {
        assert_eq!(Pin1Location::parse("UPPER LEFT"), Some(Pin1Location::UpperLeft));
        assert_eq!(Pin1Location::parse("lower_left"), Some(Pin1Location::LowerLeft));
        assert_eq!(Pin1Location::parse("Lower-Right"), Some(Pin1Location::LowerRight));
        assert_eq!(Pin1Location::parse("  upper   right "), Some(Pin1Location::UpperRight));
        assert_eq!(Pin1Location::parse("CENTRE"), None);
    }

    #[test]
    fn every_family_has_fields() {
        for family in PackageFamily::ALL {
            assert!(!family.fields().is_empty());
            assert!(family.fields().iter().any(|f| f.required));
        }
    }
}
