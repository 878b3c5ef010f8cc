use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};

use crate::framebuffer::{Framebuffer, Rect, to_rgb888};
use crate::world::Grid;

pub const WALL_COLOR: u32 = 0x00FF_FFFF;
pub const EMPTY_COLOR: u32 = 0x0000_0000;
pub const PLAYER_COLOR: u32 = 0x0000_00FF;

/// Radius of the player marker in pixels.
pub const PLAYER_RADIUS: f32 = 5.0;
/// Stroke of the facing line in pixels.
pub const FACING_LINE_WIDTH: u32 = 2;

/// Overlay shape in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawPrimitive {
    FillRect { rect: Rect, color: u32 },
    FillCircle { center: [f32; 2], radius: f32, color: u32 },
    Line {
        from: [f32; 2],
        to: [f32; 2],
        width: u32,
        color: u32,
    },
}

/// Top-down view of `grid` at `scale` pixels per cell with the player marker
/// and a one-cell facing line.
pub fn draw_minimap(
    grid: &Grid,
    player_x: f32,
    player_y: f32,
    player_angle: f32,
    scale: f32,
) -> Vec<DrawPrimitive> {
    let mut prims = Vec::with_capacity(grid.cols() * grid.rows() + 2);

    for (col, row, code) in grid.iter() {
        let color = if code > 0 { WALL_COLOR } else { EMPTY_COLOR };
        prims.push(DrawPrimitive::FillRect {
            rect: Rect::new(col as f32 * scale, row as f32 * scale, scale, scale),
            color,
        });
    }

    let center = [player_x * scale, player_y * scale];
    prims.push(DrawPrimitive::FillCircle {
        center,
        radius: PLAYER_RADIUS,
        color: PLAYER_COLOR,
    });
    prims.push(DrawPrimitive::Line {
        from: center,
        to: [
            (player_x + player_angle.cos()) * scale,
            (player_y + player_angle.sin()) * scale,
        ],
        width: FACING_LINE_WIDTH,
        color: PLAYER_COLOR,
    });

    prims
}

#[inline]
fn point(p: [f32; 2]) -> Point {
    Point::new(p[0].round() as i32, p[1].round() as i32)
}

/// Integer rectangle covering the rounded edges of `rect`.
fn rectangle(rect: Rect) -> Rectangle {
    let top_left = point([rect.x, rect.y]);
    let bottom_right = point([rect.x + rect.w, rect.y + rect.h]);
    let w = (bottom_right.x - top_left.x).max(0) as u32;
    let h = (bottom_right.y - top_left.y).max(0) as u32;
    Rectangle::new(top_left, Size::new(w, h))
}

pub fn rasterize(buf: &mut Framebuffer, prims: &[DrawPrimitive]) {
    for prim in prims {
        // Drawing into a Framebuffer cannot fail.
        let _ = match *prim {
            DrawPrimitive::FillRect { rect, color } => rectangle(rect)
                .into_styled(PrimitiveStyle::with_fill(to_rgb888(color)))
                .draw(buf),
            DrawPrimitive::FillCircle {
                center,
                radius,
                color,
            } => {
                let r = radius.round().max(0.0) as u32;
                Circle::with_center(point(center), 2 * r + 1)
                    .into_styled(PrimitiveStyle::with_fill(to_rgb888(color)))
                    .draw(buf)
            }
            DrawPrimitive::Line {
                from,
                to,
                width,
                color,
            } => Line::new(point(from), point(to))
                .into_styled(PrimitiveStyle::with_stroke(to_rgb888(color), width))
                .draw(buf),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::pack_rgb;

    #[test]
    fn cells_take_occupancy_color() {
        let grid = Grid::default_room();
        let prims = draw_minimap(&grid, 2.5, 2.5, 0.0, 10.0);
        assert_eq!(prims.len(), 8 * 7 + 2);

        // Row-major: index = row * cols + col.
        assert_eq!(
            prims[0],
            DrawPrimitive::FillRect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                color: WALL_COLOR
            }
        );
        assert_eq!(
            prims[2 * 8 + 3],
            DrawPrimitive::FillRect {
                rect: Rect::new(30.0, 20.0, 10.0, 10.0),
                color: EMPTY_COLOR
            }
        );
    }

    #[test]
    fn marker_sits_at_scaled_position() {
        let grid = Grid::default_room();
        let (x, y, scale) = (3.3, 4.7, 12.0);
        let prims = draw_minimap(&grid, x, y, 0.0, scale);
        match prims[prims.len() - 2] {
            DrawPrimitive::FillCircle { center, .. } => assert_eq!(center, [x * scale, y * scale]),
            other => panic!("expected marker, got {other:?}"),
        }
        match prims[prims.len() - 1] {
            DrawPrimitive::Line { from, to, width, .. } => {
                assert_eq!(width, FACING_LINE_WIDTH);
                assert_eq!(from, [x * scale, y * scale]);
                assert!((to[0] - (x + 1.0) * scale).abs() < 1e-4);
                assert!((to[1] - y * scale).abs() < 1e-4);
            }
            other => panic!("expected facing line, got {other:?}"),
        }
    }

    #[test]
    fn rasterized_minimap_shows_walls_and_player() {
        let grid = Grid::default_room();
        let mut fb = Framebuffer::new(100, 100);
        fb.clear(pack_rgb(1, 2, 3));
        rasterize(&mut fb, &draw_minimap(&grid, 2.5, 2.5, 0.0, 10.0));
        assert_eq!(fb.pixel(5, 5), WALL_COLOR);
        assert_eq!(fb.pixel(15, 45), EMPTY_COLOR);
        assert_eq!(fb.pixel(25, 25), PLAYER_COLOR);
        // Facing line runs one cell east of the player, two pixels thick.
        assert_eq!(fb.pixel(33, 25), PLAYER_COLOR);
        let thickness = (0..100).filter(|&y| fb.pixel(33, y) == PLAYER_COLOR).count();
        assert_eq!(thickness, FACING_LINE_WIDTH as usize);
        // Outside the map area.
        assert_eq!(fb.pixel(90, 90), pack_rgb(1, 2, 3));
    }
}
