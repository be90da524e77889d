//! `.kicad_mod` S-expression rendering.

use std::fmt::{self, Display, Formatter};

use crate::footprint::{Drawing, Footprint, Layer, Orientation, Pad, PadLayers, TextAnchor};

/// File format version written in the header (KiCad 6).
pub const FORMAT_VERSION: u32 = 20_211_014;

/// Generator tag written in the header.
pub const GENERATOR: &str = "footprint_synth";

/// Display adapter rendering a footprint as a `.kicad_mod` document.
#[derive(Debug, Clone, Copy)]
pub struct KicadMod<'a>(pub &'a Footprint);

impl Display for KicadMod<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let fp = self.0;

        writeln!(f, "(footprint {}", quote(&fp.name))?;
        writeln!(f, "  (version {FORMAT_VERSION})")?;
        writeln!(f, "  (generator {GENERATOR})")?;
        writeln!(f, "  (layer \"F.Cu\")")?;
        writeln!(f, "  (descr {})", quote(&fp.description))?;
        writeln!(f, "  (tags {})", quote(&fp.keywords.join(" ")))?;
        writeln!(f, "  (attr smd)")?;

        write_text(f, "reference", &fp.reference)?;
        write_text(f, "value", &fp.value)?;

        for drawing in &fp.drawings {
            write_drawing(f, drawing)?;
        }
        for pad in &fp.pads {
            write_pad(f, pad)?;
        }

        writeln!(f, ")")
    }
}

/// KiCad layer name for a drawing layer.
#[must_use]
pub const fn layer_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Silkscreen => "F.SilkS",
        Layer::Fabrication => "F.Fab",
        Layer::Courtyard => "F.CrtYd",
    }
}

fn write_text(f: &mut Formatter<'_>, kind: &str, text: &TextAnchor) -> fmt::Result {
    writeln!(
        f,
        "  (fp_text {kind} {} (at {} {}) (layer \"{}\")",
        quote(&text.text),
        num(text.position.x),
        num(text.position.y),
        layer_name(text.layer)
    )?;
    writeln!(
        f,
        "    (effects (font (size {size} {size}) (thickness {})))",
        num(text.thickness),
        size = num(text.size)
    )?;
    writeln!(f, "  )")
}

fn write_drawing(f: &mut Formatter<'_>, drawing: &Drawing) -> fmt::Result {
    match drawing {
        Drawing::Segment {
            start,
            end,
            layer,
            width,
        } => writeln!(
            f,
            "  (fp_line (start {} {}) (end {} {}) (layer \"{}\") (width {}))",
            num(start.x),
            num(start.y),
            num(end.x),
            num(end.y),
            layer_name(*layer),
            num(*width)
        ),
        Drawing::Circle {
            centre,
            radius,
            layer,
            width,
        } => writeln!(
            f,
            "  (fp_circle (center {} {}) (end {} {}) (layer \"{}\") (width {}))",
            num(centre.x),
            num(centre.y),
            num(centre.x + radius),
            num(centre.y),
            layer_name(*layer),
            num(*width)
        ),
        Drawing::Rectangle {
            start,
            end,
            layer,
            width,
        } => writeln!(
            f,
            "  (fp_rect (start {} {}) (end {} {}) (layer \"{}\") (width {}))",
            num(start.x),
            num(start.y),
            num(end.x),
            num(end.y),
            layer_name(*layer),
            num(*width)
        ),
    }
}

fn write_pad(f: &mut Formatter<'_>, pad: &Pad) -> fmt::Result {
    let rotation = match pad.orientation {
        Orientation::Deg0 => String::new(),
        Orientation::Deg90 => format!(" {}", num(pad.orientation.degrees())),
    };

    writeln!(
        f,
        "  (pad {} smd rect (at {} {}{rotation}) (size {} {}) (layers {}))",
        quote(&pad.number),
        num(pad.position.x),
        num(pad.position.y),
        num(pad.size.x),
        num(pad.size.y),
        pad_layers(pad.layers)
    )
}

fn pad_layers(layers: PadLayers) -> String {
    [
        (PadLayers::COPPER, "\"F.Cu\""),
        (PadLayers::PASTE, "\"F.Paste\""),
        (PadLayers::MASK, "\"F.Mask\""),
    ]
    .into_iter()
    .filter(|(flag, _)| layers.contains(*flag))
    .map(|(_, name)| name)
    .collect::<Vec<_>>()
    .join(" ")
}

/// Formats a coordinate with at most six decimals and no trailing zeros.
#[must_use]
pub fn num(value: f64) -> String {
    let value = if value.abs() < 5e-7 { 0.0 } else { value };
    let s = format!("{value:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Quotes a string, escaping backslashes and double quotes.
#[must_use]
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
