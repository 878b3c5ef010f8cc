use image::{DynamicImage, imageops::FilterType};

use crate::error::TextureError;
use crate::framebuffer::pack_rgb;

/// Side length every wall texture is resampled to.
pub const TEXTURE_SIZE: u32 = 64;

/// Read-only wall texture, row-major `0x00RRGGBB` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Texture {
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        if pixels.len() != width * height {
            return Err(TextureError::SizeMismatch {
                expected: width * height,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Resample a decoded image to `size` x `size` and pack it.
    pub fn from_image(img: &DynamicImage, size: u32) -> Result<Self, TextureError> {
        if img.width() == 0 || img.height() == 0 || size == 0 {
            return Err(TextureError::Empty);
        }
        let rgb = img.resize_exact(size, size, FilterType::Triangle).to_rgb8();
        let pixels = rgb
            .pixels()
            .map(|p| pack_rgb(p[0], p[1], p[2]))
            .collect();
        Self::from_pixels(size as usize, size as usize, pixels)
    }

    /// Procedural brick pattern used when no texture file is given.
    pub fn bricks(width: usize, height: usize) -> Result<Self, TextureError> {
        let brick_h = (height / 8).max(2);
        let brick_w = (width / 4).max(2);
        let mortar = pack_rgb(90, 86, 80);

        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let course = y / brick_h;
            // Every other course is offset by half a brick.
            let shift = if course % 2 == 0 { 0 } else { brick_w / 2 };
            for x in 0..width {
                let bx = (x + shift) % brick_w;
                if y % brick_h == 0 || bx == 0 {
                    pixels.push(mortar);
                    continue;
                }
                // Cheap per-brick shade so neighbouring bricks differ.
                let brick = ((x + shift) / brick_w) * 7 + course * 13;
                let tint = (brick % 5) as u8 * 8;
                pixels.push(pack_rgb(150 + tint, 60 + tint / 2, 45));
            }
        }
        Self::from_pixels(width, height, pixels)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`; callers keep coordinates in range.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn rejects_degenerate_buffers() {
        assert_eq!(Texture::from_pixels(0, 4, vec![]), Err(TextureError::Empty));
        assert_eq!(
            Texture::from_pixels(2, 2, vec![0; 3]),
            Err(TextureError::SizeMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn pixels_are_row_major() {
        let tex = Texture::from_pixels(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(tex.pixel(1, 0), 2);
        assert_eq!(tex.pixel(0, 2), 5);
    }

    #[test]
    fn image_is_resampled_to_square() {
        let img = RgbImage::from_pixel(16, 8, Rgb([255, 0, 0]));
        let tex = Texture::from_image(&DynamicImage::ImageRgb8(img), TEXTURE_SIZE).unwrap();
        assert_eq!((tex.width(), tex.height()), (64, 64));
        assert_eq!(tex.pixel(10, 10), pack_rgb(255, 0, 0));
    }

    #[test]
    fn bricks_have_mortar_lines() {
        let tex = Texture::bricks(64, 64).unwrap();
        assert_eq!(tex.pixel(5, 0), pack_rgb(90, 86, 80));
        assert_ne!(tex.pixel(5, 3), pack_rgb(90, 86, 80));
    }
}
