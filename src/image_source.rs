// src/image_source.rs - Pixel access for the color sampler and image loading

use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage};
use tracing::info;

use crate::color::Rgb;
use crate::error::{ResultExt, ToolkitResult};

/// Read-only access to decoded pixels in content coordinates
pub trait PixelSource {
    /// `(width, height)` in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Color at `(x, y)`, or `None` outside the image. Alpha is ignored.
    fn rgb_at(&self, x: u32, y: u32) -> Option<Rgb>;
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> Option<Rgb> {
        self.get_pixel_checked(x, y).map(|p| Rgb::new(p[0], p[1], p[2]))
    }
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> Option<Rgb> {
        self.get_pixel_checked(x, y).map(|p| Rgb::new(p[0], p[1], p[2]))
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> Option<Rgb> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let p = self.get_pixel(x, y);
        Some(Rgb::new(p[0], p[1], p[2]))
    }
}

/// Decode an image file into RGBA8
pub fn load_image(path: impl AsRef<Path>) -> ToolkitResult<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path).with_context_lazy(|| format!("opening {}", path.display()))?;
    let rgba = image.to_rgba8();

    info!("🖼️ Loaded {} ({}x{})", path.display(), rgba.width(), rgba.height());
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_source_ignores_alpha() {
        let image = RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 0]));
        assert_eq!(PixelSource::dimensions(&image), (2, 2));
        assert_eq!(image.rgb_at(1, 1), Some(Rgb::new(10, 20, 30)));
        assert_eq!(image.rgb_at(2, 0), None);
    }

    #[test]
    fn test_dynamic_source_bounds() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 1, image::Rgb([1, 2, 3])));
        assert_eq!(PixelSource::dimensions(&image), (3, 1));
        assert_eq!(image.rgb_at(2, 0), Some(Rgb::new(1, 2, 3)));
        assert_eq!(image.rgb_at(0, 1), None);
    }

    #[test]
    fn test_load_missing_file_fails_with_context() {
        let err = load_image("/definitely/not/here.png").unwrap_err();
        assert!(err.to_string().contains("opening"));
    }

    #[test]
    fn test_load_round_trip_png() {
        let path = std::env::temp_dir().join(format!("pixscope-load-{}.png", std::process::id()));
        let image = RgbImage::from_pixel(2, 1, image::Rgb([200, 100, 50]));
        image.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.rgb_at(1, 0), Some(Rgb::new(200, 100, 50)));

        let _ = std::fs::remove_file(&path);
    }
}
