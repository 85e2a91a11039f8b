//! Metadata report rendering
//!
//! Two renderings of the same record: a plain text file written next to the input,
//! and an ANSI-colored listing for the terminal.

use std::fmt::Write;

use crate::image_pipeline::camera::CameraMetadata;
use crate::image_pipeline::raw::RawMetadata;

const UNKNOWN: &str = "unknown";

const HEADING: &str = "\x1b[1;36m";
const LABEL: &str = "\x1b[1;34m";
const RESET: &str = "\x1b[0m";

/// Sensor and camera metadata for a single RAW file
#[derive(Debug, Clone)]
pub struct MetadataReport {
    pub raw: RawMetadata,
    pub camera: CameraMetadata,
}

impl MetadataReport {
    pub fn new(raw: RawMetadata, camera: CameraMetadata) -> Self {
        Self { raw, camera }
    }

    fn raw_fields(&self) -> [(&'static str, &'static str, String); 7] {
        let raw = &self.raw;
        [
            ("Size", "Image size", format!("(H: {}, W: {})", raw.height, raw.width)),
            ("Type", "RAW image type", raw.sample_type.to_string()),
            ("Color", "Color description", raw.color.to_string()),
            ("Pattern", "CFA pattern", raw.pattern.to_string()),
            ("White_level", "White level", format!("{:?}", raw.white_levels)),
            ("Black_level", "Black level", format!("{:?}", raw.black_levels)),
            ("Color_matrix", "Color matrix", format_matrix(&raw.color_matrix)),
        ]
    }

    /// EXIF model, or the decoder's make and model when EXIF has none.
    fn camera_model(&self) -> &str {
        if let Some(model) = self.camera.model.as_deref() {
            return model;
        }
        if self.raw.model.is_empty() {
            UNKNOWN
        } else {
            &self.raw.model
        }
    }

    fn camera_fields(&self) -> [(&'static str, &'static str, &str); 6] {
        let camera = &self.camera;
        fn show(value: &Option<String>) -> &str {
            value.as_deref().unwrap_or(UNKNOWN)
        }
        [
            ("Camera_model", "Camera model", self.camera_model()),
            ("ISO", "ISO", show(&camera.iso)),
            ("Shutter_speed", "Shutter speed", show(&camera.shutter)),
            ("Aperture", "Aperture", show(&camera.aperture)),
            ("Focal_length", "Focal length", show(&camera.focal)),
            ("Shooting_date", "Shooting date", show(&camera.date)),
        ]
    }

    /// Contents of the `.txt` report, one `- Key: value` line per field.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("RAW image information:\n");
        for (key, _, value) in self.raw_fields() {
            let _ = writeln!(out, "- {key}: {value}");
        }
        out.push('\n');
        out.push_str("Camera information:\n");
        for (key, _, value) in self.camera_fields() {
            let _ = writeln!(out, "- {key}: {value}");
        }
        out.push('\n');
        out
    }

    /// Colored listing for stdout, label and value on separate lines.
    pub fn render_terminal(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{HEADING}RAW image information:{RESET}");
        for (_, label, value) in self.raw_fields() {
            let _ = writeln!(out, "{LABEL}- {label}:{RESET}\n{value}");
        }
        out.push('\n');
        let _ = writeln!(out, "{HEADING}Camera information:{RESET}");
        for (_, label, value) in self.camera_fields() {
            let _ = writeln!(out, "{LABEL}- {label}:{RESET}\n{value}");
        }
        out.push('\n');
        out
    }
}

fn format_matrix(matrix: &[[f32; 3]; 4]) -> String {
    let rows: Vec<String> = matrix
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:.4}")).collect();
            format!("[{}]", cells.join(" "))
        })
        .collect();
    format!("[{}]", rows.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::raw::{CfaGrid, ColorDescriptor};

    fn sample_report() -> MetadataReport {
        let raw = RawMetadata {
            model: "Nikon D750".into(),
            width: 6032,
            height: 4032,
            bits_per_sample: 14,
            sample_type: "uint16",
            color: ColorDescriptor::Tag(b"RGBG".to_vec()),
            pattern: CfaGrid::from_rows(&[[0, 1], [1, 2]]).unwrap(),
            white_levels: [15520; 4],
            black_levels: [600, 600, 600, 600],
            color_matrix: [[1.0, 0.5, -0.25], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0; 3]],
        };
        let camera = CameraMetadata {
            model: Some("NIKON D750".into()),
            iso: Some("400".into()),
            shutter: Some("1/250 s".into()),
            aperture: None,
            focal: Some("50 mm".into()),
            date: Some("2023:05:01 10:20:30".into()),
        };
        MetadataReport::new(raw, camera)
    }

    #[test]
    fn test_text_report_layout() {
        let text = sample_report().render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "RAW image information:");
        assert_eq!(lines[1], "- Size: (H: 4032, W: 6032)");
        assert_eq!(lines[2], "- Type: uint16");
        assert_eq!(lines[3], "- Color: b'RGBG'");
        assert_eq!(lines[4], "- Pattern: [[0 1] [1 2]]");
        assert_eq!(lines[5], "- White_level: [15520, 15520, 15520, 15520]");
        assert_eq!(lines[6], "- Black_level: [600, 600, 600, 600]");
        assert!(lines[7].starts_with("- Color_matrix: [[1.0000 0.5000 -0.2500] [0.0000"));
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "Camera information:");
        assert_eq!(lines[10], "- Camera_model: NIKON D750");
        assert_eq!(lines[11], "- ISO: 400");
        assert_eq!(lines[12], "- Shutter_speed: 1/250 s");
        assert_eq!(lines[13], "- Aperture: unknown");
        assert_eq!(lines[14], "- Focal_length: 50 mm");
        assert_eq!(lines[15], "- Shooting_date: 2023:05:01 10:20:30");
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_camera_model_falls_back_to_decoder() {
        let mut report = sample_report();
        report.camera.model = None;
        assert!(report.render_text().contains("- Camera_model: Nikon D750\n"));

        report.raw.model.clear();
        assert!(report.render_text().contains("- Camera_model: unknown\n"));
    }

    #[test]
    fn test_terminal_report_uses_labels() {
        let text = sample_report().render_terminal();
        assert!(text.starts_with("\x1b[1;36mRAW image information:\x1b[0m\n"));
        assert!(text.contains("\x1b[1;34m- CFA pattern:\x1b[0m\n[[0 1] [1 2]]\n"));
        assert!(text.contains("\x1b[1;34m- Shooting date:\x1b[0m\n2023:05:01 10:20:30\n"));
    }
}
