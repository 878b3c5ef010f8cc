use std::f32::consts::PI;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Every tunable constant of the engine. Fixed once the window opens.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    // Screen
    pub screen_width: usize,
    pub screen_height: usize,

    // Rays
    pub fov: f32, // radians
    pub num_rays: usize,
    pub max_depth: f32,        // cells
    pub steps_per_cell: usize, // marching resolution

    // Player
    pub move_speed: f32,     // cells per frame
    pub rotation_speed: f32, // radians per frame
    pub collision_radius: f32,

    // Presentation
    pub target_fps: u32,
    pub minimap_scale: f32, // pixels per cell
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            fov: PI / 3.0,
            num_rays: 240,
            max_depth: 16.0,
            steps_per_cell: 10,
            move_speed: 0.05,
            rotation_speed: 0.05,
            collision_radius: 0.2,
            target_fps: 60,
            minimap_scale: 10.0,
        }
    }
}

impl Config {
    /// Wall time budget of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }
}

/// Command-line overrides, read once at start-up.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(version, about = "Textured raycaster over a tile grid")]
pub struct Args {
    /// Text map, one digit per cell (0 = floor, 1-9 = wall variant).
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Wall texture image; a brick pattern is generated when omitted.
    #[arg(long)]
    pub texture: Option<PathBuf>,

    /// Render width in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(16..=8192))]
    pub width: Option<u32>,

    /// Render height in pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(16..=8192))]
    pub height: Option<u32>,

    /// Rays cast per frame, one screen strip each.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=8192))]
    pub rays: Option<u32>,

    /// Horizontal field of view in degrees, exclusive range (0, 180).
    #[arg(long)]
    pub fov: Option<f32>,

    /// Frame rate cap.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub fps: Option<u32>,
}

impl Args {
    /// Defaults with every given flag applied on top.
    pub fn to_config(&self) -> anyhow::Result<Config> {
        let mut cfg = Config::default();
        if let Some(w) = self.width {
            cfg.screen_width = w as usize;
        }
        if let Some(h) = self.height {
            cfg.screen_height = h as usize;
        }
        if let Some(n) = self.rays {
            cfg.num_rays = n as usize;
        }
        if let Some(fov) = self.fov {
            anyhow::ensure!(
                fov > 0.0 && fov < 180.0,
                "field of view must be between 0 and 180 degrees, got {fov}"
            );
            cfg.fov = fov.to_radians();
        }
        if let Some(fps) = self.fps {
            cfg.target_fps = fps;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_keeps_defaults() {
        let args = Args::try_parse_from(["tile_raycaster"]).unwrap();
        assert_eq!(args.to_config().unwrap(), Config::default());
    }

    #[test]
    fn flags_override_fields() {
        let args = Args::try_parse_from([
            "tile_raycaster",
            "--width",
            "640",
            "--rays",
            "320",
            "--fov",
            "90",
            "--map",
            "level.txt",
        ])
        .unwrap();
        let cfg = args.to_config().unwrap();
        assert_eq!(cfg.screen_width, 640);
        assert_eq!(cfg.screen_height, 600);
        assert_eq!(cfg.num_rays, 320);
        assert!((cfg.fov - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(args.map, Some(PathBuf::from("level.txt")));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Args::try_parse_from(["tile_raycaster", "--rays", "0"]).is_err());
        let args = Args::try_parse_from(["tile_raycaster", "--fov", "200"]).unwrap();
        assert!(args.to_config().is_err());
    }

    #[test]
    fn defaults_match_reference_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.screen_width, 800);
        assert_eq!(cfg.num_rays, 240);
        assert!((cfg.fov - 60f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn frame_duration_never_divides_by_zero() {
        let cfg = Config {
            target_fps: 0,
            ..Config::default()
        };
        assert_eq!(cfg.frame_duration(), Duration::from_secs(1));
        assert_eq!(
            Config::default().frame_duration(),
            Duration::from_secs_f64(1.0 / 60.0)
        );
    }
}
