// src/tools/angle.rs - Three-click angle measurement

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::{AnnotationTool, ToolEvent, ToolKind};
use crate::annotation::{
    effective_scale, AngleAnnotation, Annotation, ArcPath, Cosmetics, CosmeticsConfig,
    LineSegment, StrokeStyle, TextLabel,
};
use crate::config::ToolkitConfig;
use crate::geometry::{angle_of_ray, angle_snap, angular_difference, Point2D};
use crate::signal::Signal;
use crate::style::StylePolicy;

/// Angle tool geometry.
///
/// * `click_count == 0`: nothing exists
/// * `click_count == 1`: vertex fixed, both rays follow the pointer
/// * `click_count == 2`: first ray fixed, second ray follows the pointer
/// * `click_count == 3`: both rays fixed, `completed`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AngleState {
    pub vertex: Point2D,
    pub ray1_end: Point2D,
    pub ray2_end: Point2D,
    pub click_count: u8,
    pub completed: bool,
}

impl AngleState {
    pub fn ray1_angle(&self) -> f64 {
        angle_of_ray(self.vertex, self.ray1_end)
    }

    pub fn ray2_angle(&self) -> f64 {
        angle_of_ray(self.vertex, self.ray2_end)
    }

    /// Non-reflex angle between the rays, 0 until the first ray is fixed
    pub fn angle(&self) -> f64 {
        if self.click_count < 2 {
            return 0.0;
        }
        angular_difference(self.ray1_angle(), self.ray2_angle())
    }
}

/// Values shown in the angle info panel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AngleReport {
    pub angle: f64,
    pub vertex: Point2D,
    pub ray1_angle: f64,
    pub ray2_angle: f64,
}

/// Start and sweep of the arc spanning the smaller angle between two rays
pub fn arc_span(angle1: f64, angle2: f64) -> (f64, f64) {
    let low = angle1.min(angle2);
    let high = angle1.max(angle2);

    if high - low > 180.0 {
        (high, low + 360.0 - high)
    } else {
        (low, high - low)
    }
}

/// Bisector of the arc span, normalized to `[0, 360)`
fn bisector(start: f64, sweep: f64) -> f64 {
    let mid = start + sweep / 2.0;
    if mid >= 360.0 {
        mid - 360.0
    } else {
        mid
    }
}

#[derive(Debug)]
pub struct AngleTool {
    enabled: bool,
    state: AngleState,
    modifier_held: bool,
    last_pointer: Option<Point2D>,
    snap_step: f64,
    scale: f64,
    cosmetics: CosmeticsConfig,
    style: StylePolicy,
    mode_changed: Signal<bool>,
    redraw: Signal<Option<Annotation>>,
}

impl AngleTool {
    /// Create a new angle tool
    pub fn new(config: &ToolkitConfig, style: StylePolicy) -> Self {
        Self {
            enabled: false,
            state: AngleState::default(),
            modifier_held: false,
            last_pointer: None,
            snap_step: config.snap_step_degrees,
            scale: 1.0,
            cosmetics: config.cosmetics.clone(),
            style,
            mode_changed: Signal::new(),
            redraw: Signal::new(),
        }
    }

    pub fn state(&self) -> &AngleState {
        &self.state
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

        match self.state.click_count {
            0 => {
                self.state = AngleState {
                    vertex: pos,
                    ray1_end: pos,
                    ray2_end: pos,
                    click_count: 1,
                    completed: false,
                };
                debug!("📐 Angle vertex at {}", pos);
            }
            1 => {
                let end = self.constrain(pos);
                self.state.ray1_end = end;
                self.state.ray2_end = end;
                self.state.click_count = 2;
                debug!("📐 First ray fixed at {:.2}°", self.state.ray1_angle());
            }
            2 => {
                self.state.ray2_end = self.constrain(pos);
                self.state.click_count = 3;
                self.state.completed = true;
                debug!("📐 Angle completed: {:.2}°", self.state.angle());
            }
            _ => {
                self.state = AngleState::default();
                debug!("📐 Angle cleared by click");
            }
        }

        self.request_redraw();
        true
    }

    pub fn on_pointer_move(&mut self, pos: Point2D) -> bool {
        if !self.enabled {
            return false;
        }
        self.last_pointer = Some(pos);

        if !self.track(pos) {
            return false;
        }
        trace!("📐 Angle preview {:.2}°", self.state.angle());
        self.request_redraw();
        true
    }

    /// Store the modifier state and re-apply it to the tracking ray
    pub fn set_modifier_held(&mut self, held: bool) -> bool {
        self.modifier_held = held;

        if !self.enabled {
            return false;
        }
        let Some(pointer) = self.last_pointer else {
            return false;
        };
        if !self.track(pointer) {
            return false;
        }
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
        if self.state.click_count == 0 {
            return false;
        }
        self.request_redraw();
        true
    }

    pub fn report(&self) -> AngleReport {
        let s = &self.state;
        if s.click_count == 0 {
            return AngleReport::default();
        }
        AngleReport {
            angle: s.angle(),
            vertex: s.vertex,
            // Rays follow the pointer from the click that starts them
            ray1_angle: s.ray1_angle(),
            ray2_angle: if s.click_count >= 2 { s.ray2_angle() } else { 0.0 },
        }
    }

    /// Move the ray(s) that follow the pointer in the current stage
    fn track(&mut self, pos: Point2D) -> bool {
        match self.state.click_count {
            1 => {
                let end = self.constrain(pos);
                self.state.ray1_end = end;
                self.state.ray2_end = end;
                true
            }
            2 => {
                self.state.ray2_end = self.constrain(pos);
                true
            }
            _ => false,
        }
    }

    fn constrain(&self, pos: Point2D) -> Point2D {
        if self.modifier_held {
            angle_snap(self.state.vertex, pos, self.snap_step)
        } else {
            pos
        }
    }

    fn label(&self, c: &Cosmetics, span: Option<(f64, f64)>) -> TextLabel {
        let vertex = self.state.vertex;
        let (text, position) = match span {
            Some((start, sweep)) => (
                format!("{:.2}°", self.state.angle()),
                vertex.polar_offset(c.label_radius, bisector(start, sweep)),
            ),
            None => (String::new(), vertex.offset(c.label_offset, -c.label_offset)),
        };

        TextLabel {
            text,
            position,
            font_size: c.font_size,
            bold: true,
            color: self.style.angle_label(),
        }
    }

    fn request_redraw(&mut self) {
        let annotation = self.annotation();
        self.redraw.emit(&annotation);
    }
}

impl Default for AngleTool {
    fn default() -> Self {
        Self::new(&ToolkitConfig::default(), StylePolicy::default())
    }
}

impl AnnotationTool for AngleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Angle
    }

    fn set_mode_enabled(&mut self, enabled: bool) {
        let was_drawing = self.state.click_count > 0;
        self.state = AngleState::default();
        self.last_pointer = None;

        if self.enabled != enabled {
            self.enabled = enabled;
            info!("📐 Angle tool {}", if enabled { "enabled" } else { "disabled" });
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
        if self.state.click_count == 0 {
            return;
        }
        self.state = AngleState::default();
        debug!("📐 Angle cleared");
        self.request_redraw();
    }

    fn annotation(&self) -> Option<Annotation> {
        let s = self.state;
        if s.click_count == 0 {
            return None;
        }

        let c = self.cosmetics.resolve(self.scale);
        let span = (s.click_count >= 2).then(|| arc_span(s.ray1_angle(), s.ray2_angle()));

        let arc = span.map(|(start, sweep)| ArcPath {
            center: s.vertex,
            radius: c.arc_radius,
            start_degrees: start,
            sweep_degrees: sweep,
            stroke: StrokeStyle::solid(self.style.angle_arc(), c.stroke_width).with_round_cap(),
        });

        Some(Annotation::Angle(AngleAnnotation {
            first_ray: LineSegment {
                from: s.vertex,
                to: s.ray1_end,
                stroke: StrokeStyle::dashed(self.style.first_ray(), c.stroke_width),
            },
            second_ray: LineSegment {
                from: s.vertex,
                to: s.ray2_end,
                stroke: StrokeStyle::dashed(self.style.second_ray(), c.stroke_width),
            },
            arc,
            label: self.label(&c, span),
            angle: s.angle(),
        }))
    }
}
