//! Geometric guarantees that hold across a range of realistic packages.

use std::collections::HashSet;

use footprint_synth::footprint::{
    generate_footprint, raw_params, Drawing, DrawingStyle, Footprint, Layer, Pin1Location, Rect,
};

const EPS: f64 = 1e-9;

fn soic_cases() -> Vec<Footprint> {
    let mut out = Vec::new();
    for pins in [8_u32, 14, 16, 20] {
        for (pitch, pad_width) in [(1.27, 0.6), (0.65, 0.4)] {
            for pad_length in [0.6, 1.5] {
                let body_length = f64::from(pins / 2) * pitch + 0.5;
                let raw = raw_params([
                    ("Pin Count", pins.to_string()),
                    ("Pitch", pitch.to_string()),
                    ("Pad Width", pad_width.to_string()),
                    ("Pad Length", pad_length.to_string()),
                    ("Overall Width", "6.0".to_string()),
                    ("Package Body Length", body_length.to_string()),
                    ("Package Body Width", "3.9".to_string()),
                ]);
                out.push(generate_footprint("SOIC", &format!("SOIC-{pins}"), &raw).unwrap());
            }
        }
    }
    out
}

fn qfn_cases() -> Vec<Footprint> {
    let mut out = Vec::new();
    for (nx, ny) in [(3_u32, 3_u32), (4, 6), (8, 8)] {
        for pitch in [0.5, 0.4] {
            for location in Pin1Location::ALL {
                let body_x = f64::from(nx) * pitch + 1.0;
                let body_y = f64::from(ny) * pitch + 1.0;
                let raw = raw_params([
                    ("Pin Count X", nx.to_string()),
                    ("Pin Count Y", ny.to_string()),
                    ("Pad Width", (pitch / 2.0).to_string()),
                    ("Pad Length", "0.7".to_string()),
                    ("Lead Pitch X", pitch.to_string()),
                    ("Lead Pitch Y", pitch.to_string()),
                    ("Package Body Size X", body_x.to_string()),
                    ("Package Body Size Y", body_y.to_string()),
                    ("Exposed Pad Land Size X", (body_x - 1.6).to_string()),
                    ("Exposed Pad Land Size Y", (body_y - 1.6).to_string()),
                    ("Pin 1 Visual Location", location.label().to_string()),
                ]);
                out.push(generate_footprint("QFN", &format!("QFN-{nx}x{ny}"), &raw).unwrap());
            }
        }
    }
    out
}

fn all_cases() -> Vec<Footprint> {
    let mut cases = soic_cases();
    cases.extend(qfn_cases());
    cases
}

fn rect_distance(a: &Rect, b: &Rect) -> f64 {
    let dx = (a.min_x - b.max_x).max(b.min_x - a.max_x).max(0.0);
    let dy = (a.min_y - b.max_y).max(b.min_y - a.max_y).max(0.0);
    dx.hypot(dy)
}

#[test]
fn courtyard_encloses_every_pad_with_margin() {
    let margin = DrawingStyle::default().courtyard_margin;

    for fp in all_cases() {
        let court = fp.courtyard().expect("courtyard");
        let pads = fp.pad_extents().expect("pads");
        assert!(pads.min_x - court.min_x >= margin - EPS, "{}", fp.name);
        assert!(court.max_x - pads.max_x >= margin - EPS, "{}", fp.name);
        assert!(pads.min_y - court.min_y >= margin - EPS, "{}", fp.name);
        assert!(court.max_y - pads.max_y >= margin - EPS, "{}", fp.name);
    }
}

#[test]
fn silkscreen_keeps_clear_of_copper() {
    let clearance = DrawingStyle::default().silkscreen_pad_clearance;

    for fp in all_cases() {
        for d in fp.drawings_on(Layer::Silkscreen) {
            let Drawing::Segment { start, end, .. } = d else {
                continue;
            };
            let line = Rect {
                min_x: start.x.min(end.x),
                min_y: start.y.min(end.y),
                max_x: start.x.max(end.x),
                max_y: start.y.max(end.y),
            };
            for pad in &fp.pads {
                let gap = rect_distance(&line, &pad.bounding_box());
                assert!(gap >= clearance - EPS, "{} pad {} gap {gap}", fp.name, pad.number);
            }
        }
    }
}

#[test]
fn pad_numbers_are_unique_and_dense() {
    for fp in all_cases() {
        let numbers: HashSet<u32> = fp.pads.iter().map(|p| p.number.parse().unwrap()).collect();
        assert_eq!(numbers.len(), fp.pads.len(), "{}", fp.name);
        let expected: HashSet<u32> = (1..=u32::try_from(fp.pads.len()).unwrap()).collect();
        assert_eq!(numbers, expected, "{}", fp.name);
    }
}

#[test]
fn pads_do_not_overlap() {
    for fp in all_cases() {
        for (i, a) in fp.pads.iter().enumerate() {
            for b in &fp.pads[i + 1..] {
                assert!(
                    rect_distance(&a.bounding_box(), &b.bounding_box()) > EPS,
                    "{} pads {} and {}",
                    fp.name,
                    a.number,
                    b.number
                );
            }
        }
    }
}

#[test]
fn text_sits_outside_the_body() {
    for fp in all_cases() {
        let fab_body = fp
            .drawings_on(Layer::Fabrication)
            .find_map(|d| match d {
                Drawing::Rectangle { start, end, .. } => Some(start.y.abs().max(end.y.abs())),
                _ => None,
            })
            .unwrap();
        assert!(fp.reference.position.y > fab_body, "{}", fp.name);
        assert!(fp.value.position.y < -fab_body, "{}", fp.name);
    }
}

#[test]
fn generation_is_deterministic() {
    assert_eq!(all_cases(), all_cases());
}
