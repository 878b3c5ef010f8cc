use crate::collision::blocked;
use crate::input::Controls;
use crate::world::Grid;

/// Player viewpoint on the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: [f32; 2], // (x, y) in cell units
    pub angle: f32,    // radians, 0 faces +x, grows towards +y; never wrapped
}

impl Camera {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            pos: [x, y],
            angle,
        }
    }

    /// Unit facing vector.
    #[inline]
    pub fn dir(&self) -> [f32; 2] {
        [self.angle.cos(), self.angle.sin()]
    }

    /// Move to `(x, y)` unless a body of `radius` there would overlap a wall.
    /// Returns whether the move was applied.
    pub fn try_move_to(&mut self, x: f32, y: f32, grid: &Grid, radius: f32) -> bool {
        if blocked(x, y, grid, radius) {
            log::trace!("move to ({x:.3}, {y:.3}) blocked");
            return false;
        }
        self.pos = [x, y];
        true
    }

    /// Apply one frame of controls.
    ///
    /// Forward then backward are each collision gated against the position
    /// left by the previous step. Rotation comes last and is never gated, so
    /// movement in this frame uses the facing angle from before the turn.
    pub fn update(
        &mut self,
        controls: &Controls,
        grid: &Grid,
        move_speed: f32,
        rotation_speed: f32,
        radius: f32,
    ) {
        if controls.forward {
            let [dx, dy] = self.dir();
            let (x, y) = (self.pos[0] + dx * move_speed, self.pos[1] + dy * move_speed);
            self.try_move_to(x, y, grid, radius);
        }
        if controls.backward {
            let [dx, dy] = self.dir();
            let (x, y) = (self.pos[0] - dx * move_speed, self.pos[1] - dy * move_speed);
            self.try_move_to(x, y, grid, radius);
        }

        if controls.rotate_left {
            self.angle -= rotation_speed;
        }
        if controls.rotate_right {
            self.angle += rotation_speed;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(2.5, 2.5, 0.0)
    }
}
