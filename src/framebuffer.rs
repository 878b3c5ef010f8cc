use std::convert::Infallible;

use embedded_graphics::Pixel;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, OriginDimensions, Size};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::primitives::Rectangle;

use crate::texture::Texture;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // softbuffer expects 0RGB in a u32
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Packed 0RGB pixel as an embedded-graphics colour.
#[inline]
pub fn to_rgb888(color: u32) -> Rgb888 {
    Rgb888::new((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// Axis-aligned rectangle in pixels. Fractional edges are rounded when drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Fixed-size software render target.
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Clip the rounded edges of `rect` to the buffer. `None` when nothing
    /// of it is visible.
    fn clip(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        if !(rect.w > 0.0 && rect.h > 0.0) {
            return None;
        }
        let x0 = rect.x.round().max(0.0);
        let y0 = rect.y.round().max(0.0);
        let x1 = (rect.x + rect.w).round().min(self.width as f32);
        let y1 = (rect.y + rect.h).round().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    /// Copy the `src` region of `texture` onto `dst`, stretched with nearest
    /// sampling. `dst` may extend past the buffer; only the visible part is
    /// drawn.
    pub fn blit_scaled(&mut self, texture: &Texture, src: Rect, dst: Rect) {
        if !(src.w > 0.0 && src.h > 0.0) {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(dst) else {
            return;
        };

        let sx_scale = src.w / dst.w;
        let sy_scale = src.h / dst.h;
        let max_u = texture.width() - 1;
        let max_v = texture.height() - 1;

        for y in y0..y1 {
            // Sample at the pixel centre.
            let v = src.y + ((y as f32 + 0.5) - dst.y) * sy_scale;
            let v = (v.max(0.0) as usize).min(max_v);
            let row = y * self.width;
            for x in x0..x1 {
                let u = src.x + ((x as f32 + 0.5) - dst.x) * sx_scale;
                let u = (u.max(0.0) as usize).min(max_u);
                self.pixels[row + x] = texture.pixel(u, v);
            }
        }
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as usize) < self.width
                && (coord.y as usize) < self.height
            {
                self.pixels[coord.y as usize * self.width + coord.x as usize] =
                    pack_rgb(color.r(), color.g(), color.b());
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };
        let packed = pack_rgb(color.r(), color.g(), color.b());
        let (x0, x1) = (area.top_left.x as usize, bottom_right.x as usize + 1);
        for y in area.top_left.y as usize..=bottom_right.y as usize {
            let row = y * self.width;
            self.pixels[row + x0..row + x1].fill(packed);
        }
        Ok(())
    }
}
