use crate::camera::Camera;
use crate::config::Config;
use crate::input::Controls;
use crate::world::Grid;

/// Everything that changes from frame to frame, plus the static map and
/// constants it is stepped against.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub grid: Grid,
    pub camera: Camera,
    pub config: Config,
    pub running: bool,
}

impl Simulation {
    pub fn new(grid: Grid, camera: Camera, config: Config) -> Self {
        Self {
            grid,
            camera,
            config,
            running: true,
        }
    }

    /// Advance one frame. A quit request stops the simulation before any
    /// movement is applied.
    pub fn step(&mut self, controls: &Controls) {
        if !self.running {
            return;
        }
        if controls.quit {
            log::info!("quit requested");
            self.running = false;
            return;
        }
        let cfg = &self.config;
        self.camera.update(
            controls,
            &self.grid,
            cfg.move_speed,
            cfg.rotation_speed,
            cfg.collision_radius,
        );
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(Grid::default_room(), Camera::default(), Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_stops_and_freezes_state() {
        let mut sim = Simulation::default();
        sim.step(&Controls {
            quit: true,
            forward: true,
            ..Controls::default()
        });
        assert!(!sim.running);
        assert_eq!(sim.camera, Camera::default());

        sim.step(&Controls {
            forward: true,
            ..Controls::default()
        });
        assert_eq!(sim.camera, Camera::default());
    }

    #[test]
    fn step_uses_configured_speeds() {
        let mut sim = Simulation::default();
        sim.config.move_speed = 0.5;
        sim.config.rotation_speed = 0.25;
        sim.step(&Controls {
            forward: true,
            rotate_right: true,
            ..Controls::default()
        });
        assert_eq!(sim.camera.pos, [3.0, 2.5]);
        assert_eq!(sim.camera.angle, 0.25);
    }
}
