//! KiCad `.kicad_mod` export of generated footprints.

use footprint_synth::footprint::{generate_footprint, raw_params, Footprint};
use footprint_synth::kicad::{to_kicad_mod, write_kicad_mod, OutputError};

fn soic8() -> Footprint {
    let raw = raw_params([
        ("Pin Count", "8"),
        ("Pitch", "1.27"),
        ("Pad Width", "0.45"),
        ("Pad Length", "0.6"),
        ("Overall Width", "6.0"),
        ("Package Body Length", "4.9"),
        ("Package Body Width", "3.9"),
    ]);
    generate_footprint("SOIC", "SOIC-8_3.9x4.9mm_P1.27mm", &raw).unwrap()
}

fn qfn16_rotated() -> Footprint {
    let raw = raw_params([
        ("Pin Count X", "4"),
        ("Pin Count Y", "4"),
        ("Pad Width", "0.25"),
        ("Pad Length", "0.6"),
        ("Lead Pitch X", "0.5"),
        ("Lead Pitch Y", "0.5"),
        ("Package Body Size X", "3.0"),
        ("Package Body Size Y", "3.0"),
        ("Exposed Pad Land Size X", "1.7"),
        ("Exposed Pad Land Size Y", "1.7"),
        ("Pin 1 Visual Location", "LOWER RIGHT"),
    ]);
    generate_footprint("QFN", "QFN-16-1EP_3x3mm", &raw).unwrap()
}

fn balanced(text: &str) -> bool {
    let mut depth = 0_i32;
    let mut in_string = false;
    let mut escaped = false;
    for c in text.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0 && !in_string
}

#[test]
fn soic8_document_structure() {
    let fp = soic8();
    let text = to_kicad_mod(&fp);

    assert!(text.starts_with("(footprint \"SOIC-8_3.9x4.9mm_P1.27mm\"\n"));
    assert!(balanced(&text));
    assert!(text.contains("(descr \"SOIC, 8 Pin, pitch 1.27mm\")"));
    assert!(text.contains("(tags \"SOIC SO\")"));
    assert!(text.contains("(attr smd)"));
    assert!(text.contains("(fp_text reference \"REF**\""));
    assert!(text.contains("(fp_text value \"SOIC-8_3.9x4.9mm_P1.27mm\""));

    let pad_lines = text.lines().filter(|l| l.trim_start().starts_with("(pad ")).count();
    assert_eq!(pad_lines, fp.pads.len());
    assert!(text.contains("(pad \"1\" smd rect (at -2.7 -1.905) (size 0.6 0.45)"));
    assert!(text.contains("(layer \"F.CrtYd\")"));
}

#[test]
fn qfn_thermal_pad_and_layers() {
    let fp = qfn16_rotated();
    let text = to_kicad_mod(&fp);

    assert!(balanced(&text));
    assert!(text.contains("(pad \"17\" smd rect (at 0 0) (size 1.7 1.7)"));
    assert!(text.contains("(layers \"F.Cu\" \"F.Paste\" \"F.Mask\")"));
    assert!(text.contains("(layer \"F.SilkS\")"));
    assert!(text.contains("(layer \"F.Fab\")"));
    assert!(text.contains("(fp_circle "));
}

#[test]
fn write_then_read_back() {
    let fp = qfn16_rotated();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("QFN-16.kicad_mod");

    write_kicad_mod(&fp, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, to_kicad_mod(&fp));
}

#[test]
fn write_into_missing_directory_fails() {
    let fp = soic8();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("SOIC-8.kicad_mod");

    let err = write_kicad_mod(&fp, &path).unwrap_err();
    let OutputError::FileWrite { path: reported, .. } = &err;
    assert_eq!(reported, &path);
    assert!(err.to_string().contains("SOIC-8.kicad_mod"));
}

#[test]
fn export_is_deterministic() {
    assert_eq!(to_kicad_mod(&soic8()), to_kicad_mod(&soic8()));
}
