// tests/color_conversions.rs - Conversion properties over the full sRGB cube

use pixscope::color::{
    device_hsv_to_display, device_hsv_to_rgb, display_hsv_to_device, display_hsv_to_rgb,
    format_hex, lab_to_rgb, parse_hex, rgb_to_device_hsv, rgb_to_display_hsv, rgb_to_lab,
    ColorSample, DeviceHsv, Rgb,
};

fn max_channel_error(a: Rgb, b: Rgb) -> i16 {
    a.channels()
        .iter()
        .zip(b.channels().iter())
        .map(|(x, y)| (*x as i16 - *y as i16).abs())
        .max()
        .unwrap_or(0)
}

#[test]
fn lab_round_trip_full_cube_within_one() {
    let mut worst = 0;
    for r in (0..=255u16).step_by(3) {
        for g in (0..=255u16).step_by(3) {
            for b in (0..=255u16).step_by(3) {
                let rgb = Rgb::new(r as u8, g as u8, b as u8);
                worst = worst.max(max_channel_error(lab_to_rgb(rgb_to_lab(rgb)), rgb));
            }
        }
    }
    assert!(worst <= 1, "worst Lab round-trip error {}", worst);
}

// Percent truncation of S and V costs up to 7 levels per channel; the device
// scale alone costs up to 4 through hue quantization.
#[test]
fn hsv_round_trip_error_is_bounded() {
    let mut worst_display = 0;
    let mut worst_device = 0;
    for r in 0..=255u16 {
        for g in (0..=255u16).step_by(3) {
            for b in (0..=255u16).step_by(3) {
                let rgb = Rgb::new(r as u8, g as u8, b as u8);
                let display = display_hsv_to_rgb(rgb_to_display_hsv(rgb));
                let device = device_hsv_to_rgb(rgb_to_device_hsv(rgb));
                worst_display = worst_display.max(max_channel_error(display, rgb));
                worst_device = worst_device.max(max_channel_error(device, rgb));
            }
        }
    }
    assert_eq!(worst_display, 7, "display HSV round-trip bound changed");
    assert_eq!(worst_device, 4, "device HSV round-trip bound changed");
}

#[test]
fn device_hsv_stays_in_range() {
    for r in (0..=255u16).step_by(15) {
        for g in (0..=255u16).step_by(15) {
            for b in (0..=255u16).step_by(15) {
                let hsv = rgb_to_device_hsv(Rgb::new(r as u8, g as u8, b as u8));
                assert!(hsv.h < 180);
                let display = device_hsv_to_display(hsv);
                assert!(display.h < 360 && display.s <= 100 && display.v <= 100);
            }
        }
    }
}

#[test]
fn display_device_rescale_never_overflows() {
    for h in 0..=180u8 {
        let display = device_hsv_to_display(DeviceHsv::new(h, 255, 255));
        let back = display_hsv_to_device(display);
        assert_eq!(back.h, h);
        assert_eq!(back.s, 255);
    }
}

#[test]
fn hex_and_sample_agree() {
    for rgb in [Rgb::BLACK, Rgb::WHITE, Rgb::new(1, 171, 205)] {
        let sample = ColorSample::from_rgb(rgb);
        assert_eq!(sample.hex, format_hex(rgb));
        assert_eq!(parse_hex(&sample.hex.to_lowercase()).unwrap(), rgb);
    }
}
