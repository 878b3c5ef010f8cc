use crate::caster::{RayHit, cast_rays};
use crate::config::Config;
use crate::framebuffer::{Framebuffer, Rect};
use crate::hud;
use crate::minimap;
use crate::sim::Simulation;
use crate::texture::Texture;

/// Keeps the height finite when a ray hits at distance 0.
const EPSILON: f32 = 1e-4;

/// Behind the walls; columns whose ray missed stay this colour.
pub const BACKGROUND: u32 = 0x0000_0000;

/// One textured wall strip, ready for a scaled blit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub dst: Rect,
    /// Full-height, one pixel wide region of the texture; `src.x` is the
    /// texture column.
    pub src: Rect,
}

/// Perspective height of a wall strip.
///
/// The variant id multiplies the height, so variant 2 walls stand twice as
/// tall as variant 1 at the same distance.
#[inline]
pub fn wall_height(distance: f32, wall: u8, screen_height: usize) -> f32 {
    screen_height as f32 / (distance + EPSILON) * wall as f32
}

/// Texture column for an in-cell offset, always in `[0, texture_width)`.
#[inline]
pub fn texture_column(frac: f32, texture_width: usize) -> usize {
    let col = (frac * texture_width as f32).floor() as i64;
    col.rem_euclid(texture_width as i64) as usize
}

/// Turn ray `ray_index`'s hit into a screen strip. Misses draw nothing.
///
/// The destination is centred vertically and is not clipped; a wall right in
/// front of the player is far taller than the screen.
pub fn project(
    ray_index: usize,
    hit: &RayHit,
    screen_width: usize,
    screen_height: usize,
    num_rays: usize,
    texture_width: usize,
    texture_height: usize,
) -> Option<DrawCommand> {
    if !hit.is_hit() {
        return None;
    }

    let column_w = screen_width as f32 / num_rays as f32;
    let h = wall_height(hit.distance, hit.wall, screen_height);
    let dst = Rect::new(
        ray_index as f32 * column_w,
        (screen_height as f32 - h) / 2.0,
        column_w,
        h,
    );

    let tex_column = texture_column(hit.texture_frac(), texture_width);
    Some(DrawCommand {
        dst,
        src: Rect::new(tex_column as f32, 0.0, 1.0, texture_height as f32),
    })
}

/// Cast every ray for the current viewpoint and project the hits.
pub fn wall_commands(sim: &Simulation, texture: &Texture) -> Vec<DrawCommand> {
    let cfg = &sim.config;
    let hits = cast_rays(
        sim.camera.pos,
        sim.camera.angle,
        cfg.num_rays,
        cfg.fov,
        cfg.max_depth,
        cfg.steps_per_cell,
        &sim.grid,
    );

    hits.iter()
        .enumerate()
        .filter_map(|(i, hit)| {
            project(
                i,
                hit,
                cfg.screen_width,
                cfg.screen_height,
                cfg.num_rays,
                texture.width(),
                texture.height(),
            )
        })
        .collect()
}

/// Draw one complete frame: background, walls, minimap and HUD.
pub fn render_frame(buf: &mut Framebuffer, sim: &Simulation, texture: &Texture) {
    buf.clear(BACKGROUND);

    for cmd in wall_commands(sim, texture) {
        buf.blit_scaled(texture, cmd.src, cmd.dst);
    }

    let cfg: &Config = &sim.config;
    let [x, y] = sim.camera.pos;
    let prims = minimap::draw_minimap(&sim.grid, x, y, sim.camera.angle, cfg.minimap_scale);
    minimap::rasterize(buf, &prims);

    hud::draw_overlay(buf, x, y, sim.camera.angle);
}
