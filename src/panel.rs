// src/panel.rs - Info panel content for the measurement tools and the color picker

use std::fmt;

use serde::Serialize;

use crate::color::ColorSample;
use crate::style::{FontSpec, PanelPalette, StylePolicy};
use crate::tools::{AngleReport, DistanceReport};

/// One labelled value in an info panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    pub section: String,
    pub value: String,
    pub font: FontSpec,
}

/// Panel content ready for a host widget to lay out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub title: String,
    pub title_font: FontSpec,
    pub section_font: FontSpec,
    pub palette: PanelPalette,
    pub rows: Vec<PanelRow>,
}

impl InfoPanel {
    fn new(title: &str, style: &StylePolicy) -> Self {
        Self {
            title: title.to_string(),
            title_font: style.title_font(),
            section_font: style.section_font(),
            palette: style.panel_palette(),
            rows: Vec::new(),
        }
    }

    fn row(mut self, section: &str, value: String, font: FontSpec) -> Self {
        self.rows.push(PanelRow { section: section.to_string(), value, font });
        self
    }

    /// Distance measurement panel
    pub fn distance(report: &DistanceReport, unit: &str, style: &StylePolicy) -> Self {
        Self::new("Distance Measurement", style)
            .row("Distance", format!("{:.2}{}", report.distance, unit), style.emphasis_font())
            .row("Start", report.start.to_string(), style.content_font())
            .row("End", report.end.to_string(), style.content_font())
            .row(
                "Delta",
                format!("Δx: {:.1}, Δy: {:.1}", report.dx, report.dy),
                style.content_font(),
            )
    }

    /// Angle measurement panel
    pub fn angle(report: &AngleReport, style: &StylePolicy) -> Self {
        Self::new("Angle Measurement", style)
            .row("Angle", format!("{:.2}°", report.angle), style.emphasis_font())
            .row("Vertex", report.vertex.to_string(), style.content_font())
            .row("Ray 1", format!("{:.1}°", report.ray1_angle), style.content_font())
            .row("Ray 2", format!("{:.1}°", report.ray2_angle), style.content_font())
    }

    /// Color picker panel. Without a sample every value shows a dash.
    pub fn color(sample: Option<&ColorSample>, style: &StylePolicy) -> Self {
        let content = style.content_font();
        let panel = Self::new("Color Picker", style);

        let Some(s) = sample else {
            return ["HEX", "RGB", "HSV", "HSV (device)", "Lab", "Position"]
                .iter()
                .fold(panel, |panel, section| panel.row(section, "-".to_string(), content));
        };

        let position = s
            .position
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());

        panel
            .row("HEX", s.hex.clone(), style.emphasis_font())
            .row("RGB", s.rgb.to_string(), content)
            .row("HSV", s.display_hsv.to_string(), content)
            .row("HSV (device)", s.device_hsv.to_string(), content)
            .row("Lab", s.lab.to_string(), content)
            .row("Position", position, content)
    }

    /// Value of the first row with the given section name
    pub fn value(&self, section: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.section == section)
            .map(|row| row.value.as_str())
    }
}

impl fmt::Display for InfoPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let width = self.rows.iter().map(|r| r.section.chars().count()).max().unwrap_or(0);
        for row in &self.rows {
            writeln!(f, "  {:<width$}  {}", row.section, row.value, width = width)?;
        }
        Ok(())
    }
}
