use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::world::Grid;

/// What a single ray found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Distance marched along the ray, `max_depth` when nothing was hit.
    pub distance: f32,
    /// Variant id of the hit cell, 0 for no hit.
    pub wall: u8,
    /// Position of the hit point inside its cell, each axis in `[0, 1)`.
    pub frac: [f32; 2],
}

impl RayHit {
    #[inline]
    fn miss(max_depth: f32) -> Self {
        Self {
            distance: max_depth,
            wall: 0,
            frac: [0.0, 0.0],
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.wall > 0
    }

    /// In-cell offset used as the texture coordinate.
    ///
    /// Whichever axis offset is larger wins, which picks the right face for
    /// most hits without tracking which grid line the ray crossed. Near cell
    /// corners it can choose the wrong face; that is the engine's look and
    /// is kept as is.
    #[inline]
    pub fn texture_frac(&self) -> f32 {
        let [fx, fy] = self.frac;
        if fx.abs() > fy.abs() { fx } else { fy }
    }
}

/// March one ray from `origin` at `angle` in steps of `1 / steps_per_cell`
/// cells until it enters a wall, leaves the grid or exceeds `max_depth`.
pub fn cast_ray(
    origin: [f32; 2],
    angle: f32,
    max_depth: f32,
    steps_per_cell: usize,
    grid: &Grid,
) -> RayHit {
    let (dx, dy) = (angle.cos(), angle.sin());
    let per_cell = steps_per_cell.max(1) as f32;
    let steps = (max_depth * per_cell).ceil() as usize;

    for step in 0..steps {
        // Divide instead of accumulating so that whole steps stay exact.
        let depth = step as f32 / per_cell;
        let x = origin[0] + dx * depth;
        let y = origin[1] + dy * depth;

        if !grid.contains(x, y) {
            break;
        }

        let (col, row) = (x as usize, y as usize);
        match grid.cell(col, row) {
            Some(code) if code > 0 => {
                return RayHit {
                    distance: depth,
                    wall: code,
                    frac: [x - col as f32, y - row as f32],
                };
            }
            _ => {}
        }
    }

    RayHit::miss(max_depth)
}

/// Angle of ray `index` in a sweep of `num_rays` across `fov` centred on
/// `angle`.
#[inline]
pub fn ray_angle(angle: f32, fov: f32, num_rays: usize, index: usize) -> f32 {
    let start = angle - fov / 2.0;
    let step = fov / num_rays as f32;
    start + index as f32 * step
}

/// Cast `num_rays` rays across the field of view, left to right.
///
/// Rays only read the grid, so they are cast in parallel; the returned vector
/// is in ray-index order.
pub fn cast_rays(
    origin: [f32; 2],
    angle: f32,
    num_rays: usize,
    fov: f32,
    max_depth: f32,
    steps_per_cell: usize,
    grid: &Grid,
) -> Vec<RayHit> {
    (0..num_rays)
        .into_par_iter()
        .map(|i| {
            cast_ray(
                origin,
                ray_angle(angle, fov, num_rays, i),
                max_depth,
                steps_per_cell,
                grid,
            )
        })
        .collect()
}
