// src/tools/measure.rs - Two-click distance measurement

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::{AnnotationTool, ToolEvent, ToolKind};
use crate::annotation::{
    effective_scale, Annotation, CosmeticsConfig, DistanceAnnotation, LineSegment, StrokeStyle,
    TextLabel,
};
use crate::config::ToolkitConfig;
use crate::geometry::{axis_lock, distance, Point2D};
use crate::signal::Signal;
use crate::style::StylePolicy;

/// Distance tool geometry.
///
/// `active` means a start point exists. While active and not completed,
/// `end` follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementState {
    pub start: Point2D,
    pub end: Point2D,
    pub completed: bool,
    pub active: bool,
}

/// Values shown in the distance info panel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DistanceReport {
    pub distance: f64,
    pub start: Point2D,
    pub end: Point2D,
    pub dx: f64,
    pub dy: f64,
}

/// Click A fixes the start, click B fixes the end, click C starts over
#[derive(Debug)]
pub struct DistanceTool {
    enabled: bool,
    state: MeasurementState,
    modifier_held: bool,
    last_pointer: Option<Point2D>,
    scale: f64,
    cosmetics: CosmeticsConfig,
    style: StylePolicy,
    unit: String,
    mode_changed: Signal<bool>,
    redraw: Signal<Option<Annotation>>,
}

impl DistanceTool {
    /// Create a new distance tool
    pub fn new(config: &ToolkitConfig, style: StylePolicy) -> Self {
        Self {
            enabled: false,
            state: MeasurementState::default(),
            modifier_held: false,
            last_pointer: None,
            scale: 1.0,
            cosmetics: config.cosmetics.clone(),
            style,
            unit: config.distance_unit.clone(),
            mode_changed: Signal::new(),
            redraw: Signal::new(),
        }
    }

    pub fn state(&self) -> &MeasurementState {
        &self.state
    }

    pub fn is_modifier_held(&self) -> bool {
        self.modifier_held
    }

    pub fn on_mode_changed<F>(&mut self, slot: F)
    where
        F: FnMut(&bool) + 'static,
    {
        self.mode_changed.connect(slot);
    }

    /// Subscribe to redraw requests. `None` means the overlay should be removed.
    pub fn on_redraw<F>(&mut self, slot: F)
    where
        F: FnMut(&Option<Annotation>) + 'static,
    {
        self.redraw.connect(slot);
    }

    pub fn on_pointer_down(&mut self, pos: Point2D) -> bool {
        if !self.enabled {
            return false;
        }
        self.last_pointer = Some(pos);

        if !self.state.active {
            self.state = MeasurementState { start: pos, end: pos, completed: false, active: true };
            debug!("📏 Distance start at {}", pos);
        } else if !self.state.completed {
            self.state.end = self.constrain(pos);
            self.state.completed = true;
            debug!(
                "📏 Distance completed: {:.2} from {} to {}",
                distance(self.state.start, self.state.end),
                self.state.start,
                self.state.end
            );
        } else {
            self.state = MeasurementState::default();
            debug!("📏 Distance cleared by click");
        }

        self.request_redraw();
        true
    }

    pub fn on_pointer_move(&mut self, pos: Point2D) -> bool {
        if !self.enabled {
            return false;
        }
        self.last_pointer = Some(pos);

        if !self.state.active || self.state.completed {
            return false;
        }

        self.state.end = self.constrain(pos);
        trace!("📏 Distance preview end {}", self.state.end);
        self.request_redraw();
        true
    }

    /// Store the modifier state and re-apply it to an in-progress line
    pub fn set_modifier_held(&mut self, held: bool) -> bool {
        self.modifier_held = held;

        if !self.enabled || !self.state.active || self.state.completed {
            return false;
        }
        let Some(pointer) = self.last_pointer else {
            return false;
        };

        self.state.end = self.constrain(pointer);
        self.request_redraw();
        true
    }

    /// Scale the cosmetics are currently resolved at
    pub fn view_scale(&self) -> f64 {
        self.scale
    }

    /// Update cosmetics for a new view scale. Geometry is untouched.
    pub fn on_view_scale_changed(&mut self, scale: f64) -> bool {
        self.scale = effective_scale(scale);
        if !self.state.active {
            return false;
        }
        self.request_redraw();
        true
    }

    pub fn report(&self) -> DistanceReport {
        if !self.state.active {
            return DistanceReport::default();
        }
        let MeasurementState { start, end, .. } = self.state;
        DistanceReport {
            distance: distance(start, end),
            start,
            end,
            dx: end.x - start.x,
            dy: end.y - start.y,
        }
    }

    fn constrain(&self, pos: Point2D) -> Point2D {
        if self.modifier_held {
            axis_lock(self.state.start, pos)
        } else {
            pos
        }
    }

    fn request_redraw(&mut self) {
        let annotation = self.annotation();
        self.redraw.emit(&annotation);
    }
}

impl Default for DistanceTool {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default(), StylePolicy::default())
    }
}

impl AnnotationTool for DistanceTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Distance
    }

    fn set_mode_enabled(&mut self, enabled: bool) {
        let was_drawing = self.state.active;
        self.state = MeasurementState::default();
        self.last_pointer = None;

        if self.enabled != enabled {
            self.enabled = enabled;
            info!("📏 Distance tool {}", if enabled { "enabled" } else { "disabled" });
            self.mode_changed.emit(&enabled);
        }
        if was_drawing {
            self.request_redraw();
        }
    }

    fn is_mode_enabled(&self) -> bool {
        self.enabled
    }

    fn handle_event(&mut self, event: ToolEvent) -> bool {
        match event {
            ToolEvent::PointerDown(pos) => self.on_pointer_down(pos),
            ToolEvent::PointerMove(pos) => self.on_pointer_move(pos),
            ToolEvent::PointerUp(_) => false,
            ToolEvent::ModifierChanged(held) => self.set_modifier_held(held),
            ToolEvent::ScaleChanged(scale) => self.on_view_scale_changed(scale),
        }
    }

    fn clear(&mut self) {
        if !self.state.active {
            return;
        }
        self.state = MeasurementState::default();
        debug!("📏 Distance cleared");
        self.request_redraw();
    }

    fn annotation(&self) -> Option<Annotation> {
        if !self.state.active {
            return None;
        }

        let c = self.cosmetics.resolve(self.scale);
        let MeasurementState { start, end, .. } = self.state;
        let length = distance(start, end);
        let label_position = start.midpoint(end).offset(0.0, -c.label_offset);

        Some(Annotation::Distance(DistanceAnnotation {
            line: LineSegment {
                from: start,
                to: end,
                stroke: StrokeStyle::solid(self.style.distance_line(), c.stroke_width),
            },
            label: TextLabel {
                text: format!("{:.2}{}", length, self.unit),
                position: label_position,
                font_size: c.font_size,
                bold: true,
                color: self.style.distance_label(),
            },
            distance: length,
        }))
    }
}
