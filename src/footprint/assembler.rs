//! Composes validated parameters, pads, drawings and text into a footprint.

use tracing::debug;

use crate::footprint::error::{GenerateError, GenerateResult, Reason, ValidationError};
use crate::footprint::model::Footprint;
use crate::footprint::outline;
use crate::footprint::packages::{PackageFamily, ParameterRecord};
use crate::footprint::params::RawParams;
use crate::footprint::style::DrawingStyle;

/// Builds a footprint from an already validated record.
#[must_use]
pub fn assemble(name: &str, record: &ParameterRecord, style: &DrawingStyle) -> Footprint {
    let family = record.family();
    let pads = record.layout_pads();
    let drawings = record.build_drawings(style);
    let (reference, value) = outline::text_anchors(name, record.body_half_y(), style);

    debug!(
        family = %family,
        name,
        pads = pads.len(),
        drawings = drawings.len(),
        "assembled footprint"
    );

    Footprint {
        name: name.to_string(),
        description: record.description(),
        keywords: family.keywords().iter().map(|k| (*k).to_string()).collect(),
        pads,
        drawings,
        reference,
        value,
    }
}

/// Validates `raw` for `family` and assembles the footprint.
///
/// # Errors
///
/// Returns [`GenerateError::UnsupportedFamily`] for an unknown tag, or
/// [`GenerateError::Assembly`] wrapping the first validation failure.
pub fn generate(family: &str, name: &str, raw: &RawParams, style: &DrawingStyle) -> GenerateResult<Footprint> {
    let family: PackageFamily = family.parse()?;

    let name = name.trim();
    if name.is_empty() {
        return Err(GenerateError::assembly(
            family,
            ValidationError::new("name", Reason::EmptyName),
        ));
    }

    let record = ParameterRecord::validate(family, raw).map_err(|source| {
        debug!(family = %family, name, field = %source.field, "parameters rejected");
        GenerateError::assembly(family, source)
    })?;

    Ok(assemble(name, &record, style))
}
