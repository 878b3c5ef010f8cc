use crate::world::Grid;

/// Wall test for a single sample point. Anything outside the grid counts as
/// solid so the player can never leave the map.
#[inline]
fn solid(grid: &Grid, x: f32, y: f32) -> bool {
    match grid.cell_at(x, y) {
        Some(code) => code > 0,
        None => true,
    }
}

/// Whether a body centred at `(x, y)` overlaps a wall.
///
/// The body is sampled at its centre and at the four cardinal points
/// `radius` away; diagonal corners are not sampled, so this is a cross-shaped
/// approximation of a circle rather than an exact one.
pub fn blocked(x: f32, y: f32, grid: &Grid, radius: f32) -> bool {
    solid(grid, x, y)
        || solid(grid, x + radius, y)
        || solid(grid, x - radius, y)
        || solid(grid, x, y + radius)
        || solid(grid, x, y - radius)
}

/// First cell centre, in row-major order, where a body of `radius` fits.
pub fn find_spawn(grid: &Grid, radius: f32) -> Option<[f32; 2]> {
    grid.iter()
        .filter(|&(_, _, code)| code == 0)
        .map(|(col, row, _)| [col as f32 + 0.5, row as f32 + 0.5])
        .find(|&[x, y]| !blocked(x, y, grid, radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f32 = 0.2;

    #[test]
    fn open_floor_is_free() {
        let grid = Grid::default_room();
        assert!(!blocked(2.5, 2.5, &grid, R));
        assert!(!blocked(1.25, 1.25, &grid, R));
    }

    #[test]
    fn wall_cells_block() {
        let grid = Grid::default_room();
        assert!(blocked(2.5, 0.5, &grid, R));
        assert!(blocked(7.1, 3.0, &grid, R));
        // Corner variant 2 is a wall too.
        assert!(blocked(0.5, 0.5, &grid, R));
    }

    #[test]
    fn offsets_within_radius_block() {
        let grid = Grid::default_room();
        // 0.15 from the left wall along x.
        assert!(blocked(1.15, 3.0, &grid, R));
        // 0.15 from the bottom wall along y.
        assert!(blocked(3.0, 5.85, &grid, R));
        // Just outside the radius.
        assert!(!blocked(1.25, 3.0, &grid, R));
    }

    #[test]
    fn diagonal_corners_are_not_sampled() {
        let grid = Grid::from_rows(&[[0u8, 0, 0], [0, 0, 0], [0, 0, 1]]).unwrap();
        // 0.1 away from wall cell (2,2) on both axes, but no cardinal sample lands in it.
        assert!(!blocked(1.9, 1.9, &grid, R));
        assert!(blocked(1.9, 2.1, &grid, R));
    }

    #[test]
    fn outside_the_grid_is_solid() {
        let grid = Grid::from_rows(&[[0u8, 0], [0, 0]]).unwrap();
        assert!(blocked(-0.5, 1.0, &grid, R));
        assert!(blocked(1.0, 1.9, &grid, R));
        assert!(!blocked(1.0, 1.0, &grid, R));
    }

    #[test]
    fn spawn_is_first_free_cell_centre() {
        assert_eq!(find_spawn(&Grid::default_room(), R), Some([1.5, 1.5]));
        let grid = Grid::from_rows(&[[1u8, 0, 1], [1, 1, 1]]).unwrap();
        assert_eq!(find_spawn(&grid, R), Some([1.5, 0.5]));
        // The upward sample leaves the grid.
        assert_eq!(find_spawn(&grid, 0.6), None);
        let grid = Grid::from_rows(&[[1u8, 1, 1], [1, 0, 1], [1, 1, 1]]).unwrap();
        assert_eq!(find_spawn(&grid, 0.6), None);
        assert_eq!(find_spawn(&grid, R), Some([1.5, 1.5]));
    }
}
