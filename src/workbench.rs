// src/workbench.rs - Routes host input to the active tool and owns the image/view lifecycle

use image::RgbaImage;
use tracing::{debug, info};

use crate::annotation::{effective_scale, Annotation};
use crate::color::ColorSampler;
use crate::config::ToolkitConfig;
use crate::panel::InfoPanel;
use crate::style::StylePolicy;
use crate::tools::{AngleTool, AnnotationTool, DistanceTool, ToolEvent, ToolKind, ViewAffordance};

/// Discrete view transforms issued by the viewer (menu actions, shortcuts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChange {
    ZoomIn,
    ZoomOut,
    FitToWindow,
    OriginalSize,
    RotateLeft,
    RotateRight,
    FlipHorizontal,
    FlipVertical,
}

/// Host-side state: the displayed image, the view scale and the three
/// mutually exclusive tools
pub struct Workbench {
    config: ToolkitConfig,
    style: StylePolicy,
    distance: DistanceTool,
    angle: AngleTool,
    sampler: ColorSampler,
    active: Option<ToolKind>,
    image: Option<RgbaImage>,
    view_scale: f64,
}

impl Workbench {
    /// Create a new workbench with no image and no active tool
    pub fn new(config: ToolkitConfig) -> Self {
        let style = StylePolicy::new(config.theme);
        Self {
            distance: DistanceTool::new(&config, style.clone()),
            angle: AngleTool::new(&config, style.clone()),
            sampler: ColorSampler::new(),
            style,
            config,
            active: None,
            image: None,
            view_scale: 1.0,
        }
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    pub fn style(&self) -> &StylePolicy {
        &self.style
    }

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.active
    }

    pub fn view_scale(&self) -> f64 {
        self.view_scale
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn distance_tool(&self) -> &DistanceTool {
        &self.distance
    }

    pub fn distance_tool_mut(&mut self) -> &mut DistanceTool {
        &mut self.distance
    }

    pub fn angle_tool(&self) -> &AngleTool {
        &self.angle
    }

    pub fn angle_tool_mut(&mut self) -> &mut AngleTool {
        &mut self.angle
    }

    pub fn sampler(&self) -> &ColorSampler {
        &self.sampler
    }

    pub fn sampler_mut(&mut self) -> &mut ColorSampler {
        &mut self.sampler
    }

    /// Enable exactly one tool, or none. Others are disabled first.
    pub fn activate(&mut self, kind: Option<ToolKind>) {
        if self.active == kind {
            return;
        }

        // Disable before enabling so two tools are never live at once
        if kind != Some(ToolKind::Distance) {
            self.distance.set_mode_enabled(false);
        }
        if kind != Some(ToolKind::Angle) {
            self.angle.set_mode_enabled(false);
        }
        if kind != Some(ToolKind::ColorPicker) {
            self.sampler.set_mode_enabled(false);
        }

        match kind {
            Some(ToolKind::Distance) => self.distance.set_mode_enabled(true),
            Some(ToolKind::Angle) => self.angle.set_mode_enabled(true),
            Some(ToolKind::ColorPicker) => self.sampler.set_mode_enabled(true),
            None => {}
        }

        self.active = kind;
        info!(
            "🛠️ Active tool: {}",
            kind.map(|k| k.to_string()).unwrap_or_else(|| "none".to_string())
        );
    }

    /// Route one input event. Returns `true` if any state changed.
    pub fn dispatch(&mut self, event: ToolEvent) -> bool {
        match event {
            ToolEvent::ScaleChanged(scale) => {
                self.view_scale = effective_scale(scale);
                let event = ToolEvent::ScaleChanged(self.view_scale);
                let distance = self.distance.handle_event(event);
                let angle = self.angle.handle_event(event);
                distance || angle
            }
            // Every tool keeps the key state so switching tools mid-press stays consistent
            ToolEvent::ModifierChanged(_) => {
                let distance = self.distance.handle_event(event);
                let angle = self.angle.handle_event(event);
                distance || angle
            }
            ToolEvent::PointerMove(pos) if self.active == Some(ToolKind::ColorPicker) => {
                match self.image.as_ref() {
                    Some(image) => self.sampler.sample_at(pos, image),
                    None => false,
                }
            }
            _ => match self.active {
                Some(ToolKind::Distance) => self.distance.handle_event(event),
                Some(ToolKind::Angle) => self.angle.handle_event(event),
                Some(ToolKind::ColorPicker) | None => false,
            },
        }
    }

    /// Replace the displayed image. Measurements and the color sample are cleared.
    pub fn load_image(&mut self, image: RgbaImage) {
        info!("🖼️ Image loaded: {}x{}", image.width(), image.height());
        self.image = Some(image);
        self.clear_measurements();
        self.sampler.clear();
    }

    /// Apply a discrete view transform. Measurements are cleared, then the
    /// new scale is applied to overlay cosmetics.
    pub fn apply_view_change(&mut self, change: ViewChange, scale: f64) {
        debug!("🔍 View change {:?} -> scale {:.3}", change, scale);
        self.clear_measurements();
        self.dispatch(ToolEvent::ScaleChanged(scale));
    }

    pub fn clear_measurements(&mut self) {
        self.distance.clear();
        self.angle.clear();
    }

    /// Descriptors for everything currently on screen
    pub fn annotations(&self) -> Vec<Annotation> {
        [self.distance.annotation(), self.angle.annotation()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Cursor and panning for the view
    pub fn affordance(&self) -> ViewAffordance {
        ViewAffordance::for_mode(self.active.is_some())
    }

    /// Info panel for the active tool
    pub fn info_panel(&self) -> Option<InfoPanel> {
        match self.active? {
            ToolKind::Distance => Some(InfoPanel::distance(
                &self.distance.report(),
                &self.config.distance_unit,
                &self.style,
            )),
            ToolKind::Angle => Some(InfoPanel::angle(&self.angle.report(), &self.style)),
            ToolKind::ColorPicker => Some(InfoPanel::color(self.sampler.sample(), &self.style)),
        }
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(ToolkitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::geometry::Point2D;
    use crate::tools::CursorShape;

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(8, 8, |x, y| image::Rgba([(x * 30) as u8, (y * 30) as u8, 0, 255]))
    }

    #[test]
    fn test_activation_is_mutually_exclusive() {
        let mut bench = Workbench::default();

        bench.activate(Some(ToolKind::Distance));
        assert!(bench.distance_tool().is_mode_enabled());

        bench.activate(Some(ToolKind::Angle));
        assert!(!bench.distance_tool().is_mode_enabled());
        assert!(bench.angle_tool().is_mode_enabled());

        bench.activate(Some(ToolKind::ColorPicker));
        assert!(!bench.angle_tool().is_mode_enabled());
        assert!(bench.sampler().is_mode_enabled());

        bench.activate(None);
        assert!(!bench.sampler().is_mode_enabled());
        assert_eq!(bench.affordance().cursor, CursorShape::Arrow);
    }

    #[test]
    fn test_switching_tools_discards_geometry() {
        let mut bench = Workbench::default();
        bench.activate(Some(ToolKind::Distance));
        bench.dispatch(ToolEvent::PointerDown(Point2D::new(1.0, 1.0)));
        assert_eq!(bench.annotations().len(), 1);

        bench.activate(Some(ToolKind::Angle));
        assert!(bench.annotations().is_empty());
    }

    #[test]
    fn test_pointer_routed_to_active_tool_only() {
        let mut bench = Workbench::default();
        bench.activate(Some(ToolKind::Angle));

        bench.dispatch(ToolEvent::PointerDown(Point2D::origin()));
        assert_eq!(bench.angle_tool().state().click_count, 1);
        assert!(!bench.distance_tool().state().active);
    }

    #[test]
    fn test_color_mode_samples_on_move() {
        let mut bench = Workbench::default();
        bench.activate(Some(ToolKind::ColorPicker));
        assert!(!bench.dispatch(ToolEvent::PointerMove(Point2D::new(1.0, 1.0))));

        bench.load_image(gradient());
        assert!(bench.dispatch(ToolEvent::PointerMove(Point2D::new(2.5, 3.5))));
        assert_eq!(bench.sampler().sample().unwrap().rgb, Rgb::new(60, 90, 0));

        assert!(!bench.dispatch(ToolEvent::PointerMove(Point2D::new(8.0, 0.0))));
        assert_eq!(bench.sampler().sample().unwrap().rgb, Rgb::new(60, 90, 0));
    }

    #[test]
    fn test_view_change_clears_but_scale_event_does_not() {
        let mut bench = Workbench::default();
        bench.activate(Some(ToolKind::Distance));
        bench.dispatch(ToolEvent::PointerDown(Point2D::origin()));
        bench.dispatch(ToolEvent::PointerDown(Point2D::new(10.0, 0.0)));

        bench.dispatch(ToolEvent::ScaleChanged(2.0));
        assert!(bench.distance_tool().state().completed);
        assert_eq!(bench.view_scale(), 2.0);

        bench.apply_view_change(ViewChange::ZoomIn, 3.0);
        assert!(!bench.distance_tool().state().active);
        assert_eq!(bench.view_scale(), 3.0);
        assert!(bench.distance_tool().is_mode_enabled());
    }

    #[test]
    fn test_image_load_clears_everything() {
        let mut bench = Workbench::default();
        bench.load_image(gradient());
        bench.activate(Some(ToolKind::ColorPicker));
        bench.dispatch(ToolEvent::PointerMove(Point2D::new(1.0, 1.0)));
        assert!(bench.sampler().sample().is_some());

        bench.load_image(gradient());
        assert!(bench.sampler().sample().is_none());
    }

    #[test]
    fn test_invalid_scale_is_substituted() {
        let mut bench = Workbench::default();
        bench.dispatch(ToolEvent::ScaleChanged(0.0));
        assert_eq!(bench.view_scale(), 1.0);
        assert_eq!(bench.distance_tool().view_scale(), 1.0);
        assert_eq!(bench.angle_tool().view_scale(), 1.0);
    }

    #[test]
    fn test_info_panel_follows_active_tool() {
        let mut bench = Workbench::default();
        assert!(bench.info_panel().is_none());

        bench.activate(Some(ToolKind::Angle));
        assert_eq!(bench.info_panel().unwrap().title, "Angle Measurement");
    }
}
