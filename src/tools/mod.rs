// src/tools/mod.rs - Interactive measurement tools

use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;
use crate::geometry::Point2D;

pub mod angle;
pub mod measure;

pub use angle::{AngleReport, AngleState, AngleTool};
pub use measure::{DistanceReport, DistanceTool, MeasurementState};

/// Tools the host can activate. At most one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Distance,
    Angle,
    ColorPicker,
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolKind::Distance => write!(f, "distance"),
            ToolKind::Angle => write!(f, "angle"),
            ToolKind::ColorPicker => write!(f, "color picker"),
        }
    }
}

/// Input forwarded by the host view, positions in content coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolEvent {
    PointerDown(Point2D),
    PointerMove(Point2D),
    PointerUp(Point2D),
    /// Shift key pressed or released
    ModifierChanged(bool),
    /// Continuous view zoom; affects overlay cosmetics only
    ScaleChanged(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorShape {
    Arrow,
    Crosshair,
}

/// Cursor and panning behavior the host view should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewAffordance {
    pub cursor: CursorShape,
    pub panning: bool,
}

impl ViewAffordance {
    /// Crosshair without panning while a tool owns the pointer, default otherwise
    pub fn for_mode(enabled: bool) -> Self {
        if enabled {
            Self { cursor: CursorShape::Crosshair, panning: false }
        } else {
            Self { cursor: CursorShape::Arrow, panning: true }
        }
    }
}

impl Default for ViewAffordance {
    fn default() -> Self {
        Self::for_mode(false)
    }
}

/// Common surface of the click-driven measurement tools
pub trait AnnotationTool {
    fn kind(&self) -> ToolKind;

    /// Enable or disable the tool. Both directions discard any geometry.
    fn set_mode_enabled(&mut self, enabled: bool);

    fn is_mode_enabled(&self) -> bool;

    /// Apply one input event. Returns `true` if the tool's state changed.
    fn handle_event(&mut self, event: ToolEvent) -> bool;

    /// Discard geometry without leaving the mode
    fn clear(&mut self);

    /// Descriptor for the current geometry, `None` when there is nothing to draw
    fn annotation(&self) -> Option<Annotation>;

    fn affordance(&self) -> ViewAffordance {
        ViewAffordance::for_mode(self.is_mode_enabled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affordance_for_mode() {
        assert_eq!(
            ViewAffordance::for_mode(true),
            ViewAffordance { cursor: CursorShape::Crosshair, panning: false }
        );
        assert_eq!(ViewAffordance::default().cursor, CursorShape::Arrow);
        assert!(ViewAffordance::default().panning);
    }

    #[test]
    fn test_tool_kind_display() {
        assert_eq!(ToolKind::ColorPicker.to_string(), "color picker");
        assert_eq!(serde_json::to_string(&ToolKind::ColorPicker).unwrap(), "\"color_picker\"");
    }
}
