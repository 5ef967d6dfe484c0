// src/color/convert.rs - sRGB <-> HSV (display/device) <-> CIE XYZ <-> CIE L*a*b*
//
// All conversions are pure and total. Outputs are clamped into their valid
// ranges; nothing here can fail.

use super::{DeviceHsv, DisplayHsv, Lab, Rgb};

/// D65 reference white
pub const D65_WHITE: Xyz = Xyz { x: 0.95047, y: 1.0, z: 1.08883 };

/// Linear sRGB -> XYZ (D65)
const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

/// XYZ (D65) -> linear sRGB
const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// Lab companding threshold, 6/29
const LAB_DELTA: f64 = 6.0 / 29.0;

/// CIE XYZ tristimulus values (Y normalized to 1.0 for reference white)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

// =============================================================================
// sRGB <-> HSV
// =============================================================================

/// sRGB -> device HSV (H 0-180, S/V 0-255)
pub fn rgb_to_device_hsv(rgb: Rgb) -> DeviceHsv {
    let r = rgb.r as f64;
    let g = rgb.g as f64;
    let b = rgb.b as f64;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = max - min;

    let s = if max > 0.0 { (255.0 * diff / max).round() } else { 0.0 };

    let hue_degrees = if diff == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / diff
    } else if max == g {
        60.0 * (b - r) / diff + 120.0
    } else {
        60.0 * (r - g) / diff + 240.0
    };
    let hue_degrees = if hue_degrees < 0.0 { hue_degrees + 360.0 } else { hue_degrees };

    // 359.x degrees rounds to 180, which is the same hue as 0
    let mut h = (hue_degrees / 2.0).round();
    if h >= 180.0 {
        h -= 180.0;
    }

    DeviceHsv::new(h as u8, s.clamp(0.0, 255.0) as u8, max as u8)
}

/// Device HSV -> display HSV, truncating integer rescale
pub fn device_hsv_to_display(hsv: DeviceHsv) -> DisplayHsv {
    let h = hsv.h.min(180) as u16;
    DisplayHsv::new(
        h * 2,
        (hsv.s as u32 * 100 / 255) as u8,
        (hsv.v as u32 * 100 / 255) as u8,
    )
}

/// Display HSV -> device HSV, truncating integer rescale
pub fn display_hsv_to_device(hsv: DisplayHsv) -> DeviceHsv {
    let h = hsv.h.min(360);
    let s = hsv.s.min(100) as u32;
    let v = hsv.v.min(100) as u32;
    DeviceHsv::new((h / 2) as u8, (s * 255 / 100) as u8, (v * 255 / 100) as u8)
}

/// Device HSV -> sRGB using the standard six-sector formula
pub fn device_hsv_to_rgb(hsv: DeviceHsv) -> Rgb {
    let h = (hsv.h.min(180) as f64 * 2.0) % 360.0;
    let s = hsv.s as f64 / 255.0;
    let v = hsv.v as f64 / 255.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb::new(unit_to_u8(r + m), unit_to_u8(g + m), unit_to_u8(b + m))
}

/// sRGB -> display HSV
pub fn rgb_to_display_hsv(rgb: Rgb) -> DisplayHsv {
    device_hsv_to_display(rgb_to_device_hsv(rgb))
}

/// Display HSV -> sRGB
pub fn display_hsv_to_rgb(hsv: DisplayHsv) -> Rgb {
    device_hsv_to_rgb(display_hsv_to_device(hsv))
}

#[inline]
fn unit_to_u8(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

// =============================================================================
// sRGB <-> XYZ <-> Lab
// =============================================================================

/// sRGB companded value in [0, 1] -> linear light
#[inline]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// Linear light -> sRGB companded value
#[inline]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c > 0.0031308 {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * c
    }
}

/// sRGB -> CIE XYZ (D65)
pub fn rgb_to_xyz(rgb: Rgb) -> Xyz {
    let r = srgb_to_linear(rgb.r as f64 / 255.0);
    let g = srgb_to_linear(rgb.g as f64 / 255.0);
    let b = srgb_to_linear(rgb.b as f64 / 255.0);

    let [row_x, row_y, row_z] = RGB_TO_XYZ;
    Xyz {
        x: row_x[0] * r + row_x[1] * g + row_x[2] * b,
        y: row_y[0] * r + row_y[1] * g + row_y[2] * b,
        z: row_z[0] * r + row_z[1] * g + row_z[2] * b,
    }
}

/// CIE XYZ (D65) -> sRGB, channels clamped with round-half-up
pub fn xyz_to_rgb(xyz: Xyz) -> Rgb {
    let [row_r, row_g, row_b] = XYZ_TO_RGB;
    let r = row_r[0] * xyz.x + row_r[1] * xyz.y + row_r[2] * xyz.z;
    let g = row_g[0] * xyz.x + row_g[1] * xyz.y + row_g[2] * xyz.z;
    let b = row_b[0] * xyz.x + row_b[1] * xyz.y + row_b[2] * xyz.z;

    let to_channel = |linear: f64| -> u8 {
        let value = (linear_to_srgb(linear) * 255.0 + 0.5).floor();
        if value.is_nan() {
            0
        } else {
            value.clamp(0.0, 255.0) as u8
        }
    };

    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_DELTA * LAB_DELTA * LAB_DELTA {
        t.cbrt()
    } else {
        t / (3.0 * LAB_DELTA * LAB_DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    if t > LAB_DELTA {
        t * t * t
    } else {
        3.0 * LAB_DELTA * LAB_DELTA * (t - 4.0 / 29.0)
    }
}

/// CIE XYZ -> CIE L*a*b* relative to D65
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = lab_f(xyz.x / D65_WHITE.x);
    let fy = lab_f(xyz.y / D65_WHITE.y);
    let fz = lab_f(xyz.z / D65_WHITE.z);

    Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// CIE L*a*b* -> CIE XYZ relative to D65
pub fn lab_to_xyz(lab: Lab) -> Xyz {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    Xyz {
        x: D65_WHITE.x * lab_f_inv(fx),
        y: D65_WHITE.y * lab_f_inv(fy),
        z: D65_WHITE.z * lab_f_inv(fz),
    }
}

/// sRGB -> CIE L*a*b*
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    xyz_to_lab(rgb_to_xyz(rgb))
}

/// CIE L*a*b* -> sRGB. Out-of-gamut input clamps to the nearest channel values.
pub fn lab_to_rgb(lab: Lab) -> Rgb {
    xyz_to_rgb(lab_to_xyz(lab))
}
