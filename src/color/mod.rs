// src/color/mod.rs - Color value types shared by the converter and the sampler

pub mod convert;
pub mod hex;
pub mod sampler;

pub use convert::{
    device_hsv_to_display, device_hsv_to_rgb, display_hsv_to_device, display_hsv_to_rgb,
    lab_to_rgb, lab_to_xyz, rgb_to_device_hsv, rgb_to_display_hsv, rgb_to_lab, rgb_to_xyz,
    xyz_to_lab, xyz_to_rgb, Xyz,
};
pub use hex::{format_hex, parse_hex};
pub use sampler::{ColorEdit, ColorField, ColorSampler};

use std::fmt;

use serde::{Deserialize, Serialize};

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array in R, G, B order
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

/// HSV in the display convention: H in 0-360 degrees, S and V in 0-100 percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayHsv {
    pub h: u16,
    pub s: u8,
    pub v: u8,
}

impl DisplayHsv {
    pub const fn new(h: u16, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl fmt::Display for DisplayHsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°, {}%, {}%", self.h, self.s, self.v)
    }
}

/// HSV in the image-processing convention: H in 0-180, S and V in 0-255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceHsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl DeviceHsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl fmt::Display for DeviceHsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.h, self.s, self.v)
    }
}

/// CIE L*a*b* relative to the D65 white point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

impl fmt::Display for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}, {:.2}, {:.2}", self.l, self.a, self.b)
    }
}

/// Pixel coordinate a sample was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for PixelPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One color in every representation the sampler exposes.
///
/// All fields are derived from `rgb`, so they stay mutually consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    pub rgb: Rgb,
    pub display_hsv: DisplayHsv,
    pub device_hsv: DeviceHsv,
    pub lab: Lab,
    pub hex: String,
    /// Source pixel for pointer samples, `None` for manual edits
    pub position: Option<PixelPosition>,
}

impl ColorSample {
    /// Derive every representation from a canonical sRGB value
    pub fn from_rgb(rgb: Rgb) -> Self {
        let device_hsv = rgb_to_device_hsv(rgb);
        Self {
            rgb,
            display_hsv: device_hsv_to_display(device_hsv),
            device_hsv,
            lab: rgb_to_lab(rgb),
            hex: format_hex(rgb),
            position: None,
        }
    }

    /// Attach the pixel coordinate the color came from
    pub fn with_position(mut self, position: Option<PixelPosition>) -> Self {
        self.position = position;
        self
    }
}

/// Rejected color input. The sampler treats all of these as silent no-ops.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorInputError {
    #[error("malformed hex color \"{0}\" (expected #RRGGBB)")]
    MalformedHex(String),

    #[error("{field} value {value} outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} value is not a finite number")]
    NonFinite { field: &'static str },
}

/// Validate a numeric field against its inclusive range
pub(crate) fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, ColorInputError> {
    if !value.is_finite() {
        return Err(ColorInputError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(ColorInputError::OutOfRange { field, value, min, max });
    }
    Ok(value)
}
