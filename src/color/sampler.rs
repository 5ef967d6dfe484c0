// src/color/sampler.rs - Pointer-driven color sampling with multi-representation editing

use tracing::{debug, info, trace};

use super::{
    check_range, device_hsv_to_rgb, display_hsv_to_rgb, lab_to_rgb, parse_hex, ColorInputError,
    ColorSample, DeviceHsv, DisplayHsv, Lab, PixelPosition, Rgb,
};
use crate::geometry::Point2D;
use crate::image_source::PixelSource;
use crate::signal::Signal;

/// A manual edit in one of the exposed representations.
///
/// Integer fields are carried as `i32` so that out-of-range input from a text
/// or spin field can be rejected instead of silently wrapped.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorEdit {
    Rgb { r: i32, g: i32, b: i32 },
    DisplayHsv { h: i32, s: i32, v: i32 },
    DeviceHsv { h: i32, s: i32, v: i32 },
    Lab { l: f64, a: f64, b: f64 },
    Hex(String),
}

impl ColorEdit {
    /// Validate the edit and convert it to canonical sRGB
    pub fn resolve(&self) -> Result<Rgb, ColorInputError> {
        match self {
            ColorEdit::Rgb { r, g, b } => Ok(Rgb::new(
                int_in("R", *r, 255)?,
                int_in("G", *g, 255)?,
                int_in("B", *b, 255)?,
            )),
            ColorEdit::DisplayHsv { h, s, v } => {
                let h = check_range("H", *h as f64, 0.0, 360.0)? as u16;
                let hsv = DisplayHsv::new(h, int_in("S", *s, 100)?, int_in("V", *v, 100)?);
                Ok(display_hsv_to_rgb(hsv))
            }
            ColorEdit::DeviceHsv { h, s, v } => {
                let hsv = DeviceHsv::new(
                    int_in("H (device)", *h, 180)?,
                    int_in("S (device)", *s, 255)?,
                    int_in("V (device)", *v, 255)?,
                );
                Ok(device_hsv_to_rgb(hsv))
            }
            ColorEdit::Lab { l, a, b } => {
                let lab = Lab::new(
                    check_range("L", *l, 0.0, 100.0)?,
                    check_range("a", *a, -128.0, 128.0)?,
                    check_range("b", *b, -128.0, 128.0)?,
                );
                Ok(lab_to_rgb(lab))
            }
            ColorEdit::Hex(text) => parse_hex(text),
        }
    }
}

fn int_in(field: &'static str, value: i32, max: i32) -> Result<u8, ColorInputError> {
    check_range(field, value as f64, 0.0, max as f64).map(|v| v as u8)
}

/// Single editable component, used by per-field inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Value,
    DeviceHue,
    DeviceSaturation,
    DeviceValue,
    LabL,
    LabA,
    LabB,
}

impl ColorField {
    /// Build the full edit that results from replacing this component of `current`
    fn edit(self, current: &ColorSample, value: f64) -> Result<ColorEdit, ColorInputError> {
        if !value.is_finite() {
            return Err(ColorInputError::NonFinite { field: self.label() });
        }
        let int = value.round() as i32;
        let rgb = current.rgb;
        let hsv = current.display_hsv;
        let dev = current.device_hsv;
        let lab = current.lab;

        Ok(match self {
            ColorField::Red => ColorEdit::Rgb { r: int, g: rgb.g as i32, b: rgb.b as i32 },
            ColorField::Green => ColorEdit::Rgb { r: rgb.r as i32, g: int, b: rgb.b as i32 },
            ColorField::Blue => ColorEdit::Rgb { r: rgb.r as i32, g: rgb.g as i32, b: int },
            ColorField::Hue => ColorEdit::DisplayHsv { h: int, s: hsv.s as i32, v: hsv.v as i32 },
            ColorField::Saturation => {
                ColorEdit::DisplayHsv { h: hsv.h as i32, s: int, v: hsv.v as i32 }
            }
            ColorField::Value => ColorEdit::DisplayHsv { h: hsv.h as i32, s: hsv.s as i32, v: int },
            ColorField::DeviceHue => {
                ColorEdit::DeviceHsv { h: int, s: dev.s as i32, v: dev.v as i32 }
            }
            ColorField::DeviceSaturation => {
                ColorEdit::DeviceHsv { h: dev.h as i32, s: int, v: dev.v as i32 }
            }
            ColorField::DeviceValue => {
                ColorEdit::DeviceHsv { h: dev.h as i32, s: dev.s as i32, v: int }
            }
            ColorField::LabL => ColorEdit::Lab { l: value, a: lab.a, b: lab.b },
            ColorField::LabA => ColorEdit::Lab { l: lab.l, a: value, b: lab.b },
            ColorField::LabB => ColorEdit::Lab { l: lab.l, a: lab.a, b: value },
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorField::Red => "R",
            ColorField::Green => "G",
            ColorField::Blue => "B",
            ColorField::Hue => "H",
            ColorField::Saturation => "S",
            ColorField::Value => "V",
            ColorField::DeviceHue => "H (device)",
            ColorField::DeviceSaturation => "S (device)",
            ColorField::DeviceValue => "V (device)",
            ColorField::LabL => "L",
            ColorField::LabA => "a",
            ColorField::LabB => "b",
        }
    }
}

/// Color picker state: the current sample and its subscribers.
///
/// Every accepted change replaces the canonical RGB, recomputes all other
/// representations from it, and fires `color_changed` exactly once. Slots only
/// see `&ColorSample` while the sampler is mutably borrowed, so a notification
/// cannot feed another edit back into the sampler.
#[derive(Debug, Default)]
pub struct ColorSampler {
    mode_enabled: bool,
    sample: Option<ColorSample>,
    color_changed: Signal<ColorSample>,
    mode_changed: Signal<bool>,
}

impl ColorSampler {
    /// Create a new sampler with picking disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter or leave pick mode. Leaving discards the current sample.
    pub fn set_mode_enabled(&mut self, enabled: bool) {
        if self.mode_enabled == enabled {
            return;
        }
        self.mode_enabled = enabled;
        if !enabled {
            self.sample = None;
        }
        info!("🎨 Color picker {}", if enabled { "enabled" } else { "disabled" });
        self.mode_changed.emit(&enabled);
    }

    pub fn is_mode_enabled(&self) -> bool {
        self.mode_enabled
    }

    /// Current sample, if any
    pub fn sample(&self) -> Option<&ColorSample> {
        self.sample.as_ref()
    }

    /// Subscribe to accepted color changes
    pub fn on_color_changed<F>(&mut self, slot: F)
    where
        F: FnMut(&ColorSample) + 'static,
    {
        self.color_changed.connect(slot);
    }

    /// Subscribe to pick mode toggles
    pub fn on_mode_changed<F>(&mut self, slot: F)
    where
        F: FnMut(&bool) + 'static,
    {
        self.mode_changed.connect(slot);
    }

    /// Sample the pixel under `pos` (content coordinates).
    ///
    /// Coordinates are floored to the containing pixel. Returns `false` and
    /// leaves the sample untouched when pick mode is off or `pos` is outside
    /// the image.
    pub fn sample_at<S>(&mut self, pos: Point2D, source: &S) -> bool
    where
        S: PixelSource + ?Sized,
    {
        if !self.mode_enabled {
            return false;
        }

        let Some(position) = pixel_under(pos, source.dimensions()) else {
            trace!("🎯 Pointer {} outside image", pos);
            return false;
        };
        let Some(rgb) = source.rgb_at(position.x, position.y) else {
            return false;
        };

        self.commit(rgb, Some(position))
    }

    /// Apply an edit from any representation. Invalid input is ignored.
    pub fn apply_edit(&mut self, edit: ColorEdit) -> bool {
        match edit.resolve() {
            Ok(rgb) => self.commit(rgb, None),
            Err(e) => {
                debug!("🎨 Ignoring color edit: {}", e);
                false
            }
        }
    }

    /// Replace one component of the current color.
    ///
    /// Without a current sample the other components start from black.
    pub fn set_field(&mut self, field: ColorField, value: f64) -> bool {
        let base = self
            .sample
            .clone()
            .unwrap_or_else(|| ColorSample::from_rgb(Rgb::BLACK));

        match field.edit(&base, value) {
            Ok(edit) => self.apply_edit(edit),
            Err(e) => {
                debug!("🎨 Ignoring {} edit: {}", field.label(), e);
                false
            }
        }
    }

    /// Discard the current sample
    pub fn clear(&mut self) {
        self.sample = None;
    }

    fn commit(&mut self, rgb: Rgb, position: Option<PixelPosition>) -> bool {
        self.sample = Some(ColorSample::from_rgb(rgb).with_position(position));

        if let Some(sample) = self.sample.as_ref() {
            trace!("🎨 Color {} at {:?}", sample.hex, sample.position);
            self.color_changed.emit(sample);
        }
        true
    }
}

/// Pixel containing `pos`, or `None` outside `0..width` x `0..height`
pub fn pixel_under(pos: Point2D, (width, height): (u32, u32)) -> Option<PixelPosition> {
    if !pos.x.is_finite() || !pos.y.is_finite() {
        return None;
    }
    let x = pos.x.floor();
    let y = pos.y.floor();
    if x < 0.0 || y < 0.0 || x >= width as f64 || y >= height as f64 {
        return None;
    }
    Some(PixelPosition { x: x as u32, y: y as u32 })
}
