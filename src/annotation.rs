// src/annotation.rs - Drawable descriptors emitted by the measurement tools
//
// Tools never draw. They describe what should be on screen in content
// coordinates and let the host renderer turn that into pixels.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::Rgb;
use crate::geometry::Point2D;

/// Base sizes (in screen pixels at scale 1.0) and their content-space floors.
///
/// At view scale `s` a size becomes `max(base / s, floor)`, which keeps
/// overlays roughly constant on screen until the floor kicks in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmeticsConfig {
    pub stroke_width: f64,
    pub stroke_width_min: f64,
    pub font_size: f64,
    pub font_size_min: f64,
    pub label_offset: f64,
    pub label_offset_min: f64,
    pub arc_radius: f64,
    pub arc_radius_min: f64,
    /// Angle label distance from the vertex, as a multiple of the arc radius
    pub label_radius_factor: f64,
}

impl Default for CosmeticsConfig {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            stroke_width_min: 1.0,
            font_size: 10.0,
            font_size_min: 6.0,
            label_offset: 25.0,
            label_offset_min: 15.0,
            arc_radius: 40.0,
            arc_radius_min: 20.0,
            label_radius_factor: 1.5,
        }
    }
}

impl CosmeticsConfig {
    /// Resolve all sizes for the given view scale
    pub fn resolve(&self, scale: f64) -> Cosmetics {
        let s = effective_scale(scale);
        let arc_radius = scale_down(self.arc_radius, self.arc_radius_min, s);
        Cosmetics {
            stroke_width: scale_down(self.stroke_width, self.stroke_width_min, s),
            font_size: scale_down(self.font_size, self.font_size_min, s),
            label_offset: scale_down(self.label_offset, self.label_offset_min, s),
            arc_radius,
            label_radius: arc_radius * self.label_radius_factor,
        }
    }
}

/// Scale used for cosmetics. Non-positive or non-finite scales fall back to 1.0.
pub fn effective_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        warn!("⚠️ Invalid view scale {}, using 1.0", scale);
        1.0
    }
}

#[inline]
fn scale_down(base: f64, floor: f64, scale: f64) -> f64 {
    (base / scale).max(floor)
}

/// Resolved overlay sizes in content units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cosmetics {
    pub stroke_width: f64,
    pub font_size: f64,
    pub label_offset: f64,
    pub arc_radius: f64,
    pub label_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePattern {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgb,
    pub width: f64,
    pub pattern: LinePattern,
    /// Round line caps (used by the angle arc)
    pub round_cap: bool,
}

impl StrokeStyle {
    pub fn solid(color: Rgb, width: f64) -> Self {
        Self { color, width, pattern: LinePattern::Solid, round_cap: false }
    }

    pub fn dashed(color: Rgb, width: f64) -> Self {
        Self { color, width, pattern: LinePattern::Dashed, round_cap: false }
    }

    pub fn with_round_cap(mut self) -> Self {
        self.round_cap = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: Point2D,
    pub to: Point2D,
    pub stroke: StrokeStyle,
}

/// Text anchored at `position` (content coordinates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub text: String,
    pub position: Point2D,
    pub font_size: f64,
    pub bold: bool,
    pub color: Rgb,
}

/// Circular arc around `center`, starting at `start_degrees` and sweeping
/// `sweep_degrees` in the direction of increasing ray angle.
///
/// Hosts draw it as a wedge: center, along the arc, back to center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcPath {
    pub center: Point2D,
    pub radius: f64,
    pub start_degrees: f64,
    pub sweep_degrees: f64,
    pub stroke: StrokeStyle,
}

impl ArcPath {
    pub fn end_degrees(&self) -> f64 {
        self.start_degrees + self.sweep_degrees
    }

    /// Closed wedge outline with `segments` straight pieces along the arc
    pub fn points(&self, segments: usize) -> Vec<Point2D> {
        let segments = segments.max(1);
        let mut points = Vec::with_capacity(segments + 3);
        points.push(self.center);
        for i in 0..=segments {
            let t = i as f64 / segments as f64;
            let degrees = self.start_degrees + self.sweep_degrees * t;
            points.push(self.center.polar_offset(self.radius, degrees));
        }
        points.push(self.center);
        points
    }
}

/// Distance overlay: one line and its length label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceAnnotation {
    pub line: LineSegment,
    pub label: TextLabel,
    pub distance: f64,
}

/// Angle overlay: two rays from a shared vertex plus the arc between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleAnnotation {
    pub first_ray: LineSegment,
    pub second_ray: LineSegment,
    /// Present once both ray directions are fixed or tracked
    pub arc: Option<ArcPath>,
    pub label: TextLabel,
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Annotation {
    Distance(DistanceAnnotation),
    Angle(AngleAnnotation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosmetics_shrink_with_zoom() {
        let config = CosmeticsConfig::default();

        let zoomed_in = config.resolve(50.0);
        assert_eq!(zoomed_in.stroke_width, 1.0);
        assert_eq!(zoomed_in.font_size, 6.0);
        assert_eq!(zoomed_in.label_offset, 15.0);
        assert_eq!(zoomed_in.arc_radius, 20.0);
        assert_eq!(zoomed_in.label_radius, 30.0);

        let zoomed_out = config.resolve(0.1);
        assert!((zoomed_out.stroke_width - 20.0).abs() < 1e-9);
        assert!((zoomed_out.arc_radius - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosmetics_at_unit_scale() {
        let c = CosmeticsConfig::default().resolve(1.0);
        assert_eq!(c.stroke_width, 2.0);
        assert_eq!(c.font_size, 10.0);
        assert_eq!(c.label_offset, 25.0);
        assert_eq!(c.arc_radius, 40.0);
        assert_eq!(c.label_radius, 60.0);
    }

    #[test]
    fn test_invalid_scale_uses_unit() {
        let config = CosmeticsConfig::default();
        assert_eq!(config.resolve(0.0), config.resolve(1.0));
        assert_eq!(config.resolve(-3.0), config.resolve(1.0));
        assert_eq!(config.resolve(f64::NAN), config.resolve(1.0));
    }

    #[test]
    fn test_arc_points_form_closed_wedge() {
        let arc = ArcPath {
            center: Point2D::new(10.0, 10.0),
            radius: 5.0,
            start_degrees: 0.0,
            sweep_degrees: 90.0,
            stroke: StrokeStyle::solid(Rgb::RED, 1.0),
        };

        let points = arc.points(4);
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], arc.center);
        assert_eq!(*points.last().unwrap(), arc.center);
        assert!((points[1].x - 15.0).abs() < 1e-9);
        assert!((points[5].y - 15.0).abs() < 1e-9);
        assert_eq!(arc.end_degrees(), 90.0);
    }

    #[test]
    fn test_annotation_json_is_tagged() {
        let annotation = Annotation::Distance(DistanceAnnotation {
            line: LineSegment {
                from: Point2D::origin(),
                to: Point2D::new(3.0, 4.0),
                stroke: StrokeStyle::solid(Rgb::RED, 2.0),
            },
            label: TextLabel {
                text: "5.00 px".into(),
                position: Point2D::new(1.5, -23.0),
                font_size: 10.0,
                bold: true,
                color: Rgb::RED,
            },
            distance: 5.0,
        });

        let json = serde_json::to_value(&annotation).unwrap();
        assert_eq!(json["kind"], "distance");
        assert_eq!(json["line"]["stroke"]["pattern"], "solid");
    }
}
