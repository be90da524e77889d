//! QFN generation through the public API.

use footprint_synth::footprint::{
    generate_footprint, raw_params, Drawing, Layer, Pad, Pin1Location, RawParams, Reason,
};

const EPS: f64 = 1e-9;

fn qfn24() -> RawParams {
    raw_params([
        ("Pin Count X", "6"),
        ("Pin Count Y", "6"),
        ("Pad Width", "0.25"),
        ("Pad Length", "0.8"),
        ("Lead Pitch X", "0.5"),
        ("Lead Pitch Y", "0.5"),
        ("Package Body Size X", "4.0"),
        ("Package Body Size Y", "4.0"),
        ("Exposed Pad Size X", "2.6"),
        ("Exposed Pad Size Y", "2.6"),
        ("Exposed Pad Land Size X", "2.7"),
        ("Exposed Pad Land Size Y", "2.7"),
    ])
}

fn centre_angle(pad: &Pad) -> f64 {
    // Angle measured with +y pointing up, so increasing angle is counter-clockwise on screen.
    (-pad.position.y).atan2(pad.position.x)
}

#[test]
fn qfn24_perimeter_and_thermal_pad() {
    let fp = generate_footprint("QFN", "QFN-24-1EP_4x4mm_P0.5mm", &qfn24()).unwrap();
    assert_eq!(fp.pads.len(), 25);

    let numbers: Vec<&str> = fp.pads.iter().map(|p| p.number.as_str()).collect();
    let expected: Vec<String> = (1..=25).map(|n| n.to_string()).collect();
    assert_eq!(numbers, expected);

    let thermal = fp.pad("25").unwrap();
    assert!(thermal.position.x.abs() < EPS && thermal.position.y.abs() < EPS);
    assert!((thermal.size.x - 2.7).abs() < EPS);

    assert_eq!(
        fp.description,
        "QFN, 24 Pin (6x6), pitch 0.5mm x 0.5mm, body size 4x4mm"
    );
}

#[test]
fn qfn24_numbering_is_counter_clockwise() {
    let fp = generate_footprint("QFN", "QFN-24", &qfn24()).unwrap();
    let perimeter = &fp.pads[..24];

    // Walking the perimeter the angle only ever turns one way; unwrap and
    // check that it increases monotonically through one full turn.
    let mut total = 0.0;
    for pair in perimeter.windows(2) {
        let mut step = centre_angle(&pair[1]) - centre_angle(&pair[0]);
        if step > std::f64::consts::PI {
            step -= std::f64::consts::TAU;
        } else if step < -std::f64::consts::PI {
            step += std::f64::consts::TAU;
        }
        assert!(step > 0.0, "pad {} to {}", pair[0].number, pair[1].number);
        total += step;
    }
    assert!(total < std::f64::consts::TAU);
}

#[test]
fn pin1_defaults_to_upper_left() {
    let fp = generate_footprint("QFN", "QFN-24", &qfn24()).unwrap();
    let pin1 = fp.pad("1").unwrap();
    assert!(pin1.position.x < -2.0);
    assert!((pin1.position.y + 1.25).abs() < EPS);
}

#[test]
fn pin1_location_moves_first_pad() {
    let expected = [
        (Pin1Location::UpperLeft, -1.0, -1.0),
        (Pin1Location::LowerLeft, -1.0, 1.0),
        (Pin1Location::LowerRight, 1.0, 1.0),
        (Pin1Location::UpperRight, 1.0, -1.0),
    ];

    for (location, sx, sy) in expected {
        let mut raw = qfn24();
        raw.insert("Pin 1 Visual Location".into(), location.label().to_lowercase());
        let fp = generate_footprint("QFN", "QFN-24", &raw).unwrap();

        let pin1 = fp.pad("1").unwrap();
        assert_eq!(pin1.position.x.signum(), sx, "{location}");
        assert_eq!(pin1.position.y.signum(), sy, "{location}");
        assert_eq!(fp.pads.len(), 25);
    }
}

#[test]
fn exposed_pad_drawn_on_fabrication() {
    let fp = generate_footprint("QFN", "QFN-24", &qfn24()).unwrap();
    let ghost = fp.drawings_on(Layer::Fabrication).any(|d| match d {
        Drawing::Rectangle { start, end, .. } => {
            (start.x + 1.3).abs() < EPS && (end.x - 1.3).abs() < EPS
        }
        _ => false,
    });
    assert!(ghost);
}

#[test]
fn no_thermal_pad_without_land() {
    let mut raw = qfn24();
    raw.shift_remove("Exposed Pad Land Size X");
    raw.shift_remove("Exposed Pad Land Size Y");

    let fp = generate_footprint("QFN", "QFN-24", &raw).unwrap();
    assert_eq!(fp.pads.len(), 24);
    assert!(fp.pad("25").is_none());
}

#[test]
fn silkscreen_split_around_pads() {
    let fp = generate_footprint("QFN", "QFN-24", &qfn24()).unwrap();
    let body_half = 2.0;

    for d in fp.drawings_on(Layer::Silkscreen) {
        let Drawing::Segment { start, end, .. } = d else {
            continue;
        };
        // Every silkscreen segment lies on the body outline and stays clear
        // of the pad rows, which span ±1.25 plus half a pad width.
        let on_vertical = (start.x.abs() - body_half).abs() < EPS && (start.x - end.x).abs() < EPS;
        let on_horizontal = (start.y.abs() - body_half).abs() < EPS && (start.y - end.y).abs() < EPS;
        assert!(on_vertical || on_horizontal);

        let (lo, hi) = if on_vertical {
            (start.y.min(end.y), start.y.max(end.y))
        } else {
            (start.x.min(end.x), start.x.max(end.x))
        };
        assert!(lo >= 1.375 + 0.15 - EPS || hi <= -(1.375 + 0.15) + EPS);
    }
}

#[test]
fn rectangular_body_uses_both_pitches() {
    let raw = raw_params([
        ("PinCountX", "2"),
        ("PinCountY", "4"),
        ("PadWidth", "0.3"),
        ("PadLength", "0.6"),
        ("LeadPitchX", "0.65"),
        ("LeadPitchY", "0.5"),
        ("PackageBodySizeX", "2.0"),
        ("PackageBodySizeY", "3.0"),
    ]);
    let fp = generate_footprint("qfn", "QFN-12_2x3mm", &raw).unwrap();
    assert_eq!(fp.pads.len(), 12);

    // Left column at x = -(1.0 + 0.3), rows 0.5 apart.
    let left: Vec<&Pad> = fp.pads[..4].iter().collect();
    assert!(left.iter().all(|p| (p.position.x + 1.3).abs() < EPS));
    assert!((left[1].position.y - left[0].position.y - 0.5).abs() < EPS);

    // Bottom row at y = 1.5 + 0.3, columns 0.65 apart.
    let bottom: Vec<&Pad> = fp.pads[4..6].iter().collect();
    assert!(bottom.iter().all(|p| (p.position.y - 1.8).abs() < EPS));
    assert!((bottom[1].position.x - bottom[0].position.x - 0.65).abs() < EPS);
}

#[test]
fn bad_pin1_location_rejected() {
    let mut raw = qfn24();
    raw.insert("Pin 1 Visual Location".into(), "MIDDLE".into());

    let err = generate_footprint("QFN", "QFN-24", &raw).unwrap_err();
    let v = err.validation_error().unwrap();
    assert_eq!(v.field, "Pin 1 Visual Location");
    assert!(matches!(v.reason, Reason::UnsupportedPin1Location { .. }));
}

#[test]
fn zero_pin_count_rejected() {
    let mut raw = qfn24();
    raw.insert("Pin Count Y".into(), "0".into());

    let err = generate_footprint("QFN", "QFN-24", &raw).unwrap_err();
    let v = err.validation_error().unwrap();
    assert_eq!(v.field, "Pin Count Y");
    assert!(matches!(v.reason, Reason::BelowMinimum { .. }));
}

#[test]
fn huge_pin_count_is_a_validation_error() {
    let mut raw = qfn24();
    raw.insert("Pin Count X".into(), "2147483648".into());
    raw.insert("Pin Count Y".into(), "1".into());

    let err = generate_footprint("QFN", "QFN-X", &raw).unwrap_err();
    let v = err.validation_error().unwrap();
    assert_eq!(v.field, "Pin Count X");
    assert!(matches!(v.reason, Reason::AboveMaximum { .. }));
}
