use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use tile_raycaster::camera::Camera;
use tile_raycaster::collision::{blocked, find_spawn};
use tile_raycaster::config::{Args, Config};
use tile_raycaster::framebuffer::Framebuffer;
use tile_raycaster::input::Controls;
use tile_raycaster::renderer;
use tile_raycaster::scaler::{ScaleLut, blit_nearest_stretch, build_scale_lut};
use tile_raycaster::sim::Simulation;
use tile_raycaster::texture::{TEXTURE_SIZE, Texture};
use tile_raycaster::world::Grid;

type WindowSurface = softbuffer::Surface<Rc<Window>, Rc<Window>>;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<WindowSurface>,
    sim: Simulation,
    texture: Texture,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Fixed-size render target, stretched onto the window
    framebuffer: Framebuffer,
    scale_lut: ScaleLut,

    // Input and pacing
    keys_down: HashSet<KeyCode>,
    frame_duration: Duration,
    next_frame: Instant,

    // First fatal error; handed back to main after the loop exits
    error: Option<anyhow::Error>,
}

impl App {
    fn new(sim: Simulation, texture: Texture) -> Self {
        let framebuffer = Framebuffer::new(sim.config.screen_width, sim.config.screen_height);
        let frame_duration = sim.config.frame_duration();
        Self {
            window: None,
            surface: None,
            sim,
            texture,
            frame_counter: 0,
            last_fps_print: Instant::now(),
            framebuffer,
            scale_lut: ScaleLut::empty(),
            keys_down: HashSet::new(),
            frame_duration,
            next_frame: Instant::now(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let cfg = &self.sim.config;
        let attributes = Window::default_attributes()
            .with_title("Raycast Engine")
            .with_inner_size(LogicalSize::new(
                cfg.screen_width as f64,
                cfg.screen_height as f64,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .context("create window")?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

        let size = window.inner_size();
        self.rebuild_lut(size.width as usize, size.height as usize);

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn rebuild_lut(&mut self, dst_w: usize, dst_h: usize) {
        self.scale_lut = build_scale_lut(
            dst_w,
            dst_h,
            self.framebuffer.width,
            self.framebuffer.height,
        );
        log::debug!(
            "present {}x{} -> {dst_w}x{dst_h}",
            self.framebuffer.width,
            self.framebuffer.height
        );
    }

    /// Step the simulation and draw one frame to the window.
    fn redraw(&mut self, event_loop: &ActiveEventLoop, id: WindowId) -> Result<()> {
        let controls = Controls::from_keys(&self.keys_down);
        self.sim.step(&controls);
        if !self.sim.running {
            event_loop.exit();
            return Ok(());
        }

        let Some(window) = self.window.as_ref().filter(|w| w.id() == id) else {
            return Ok(());
        };
        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(()); // Minimized window, skip drawing
        };
        let dst = (dw.get() as usize, dh.get() as usize);
        if self.scale_lut.dst_size() != dst {
            self.rebuild_lut(dst.0, dst.1);
        }

        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        surface
            .resize(dw, dh)
            .map_err(|e| anyhow::anyhow!("resize surface: {e}"))?;

        renderer::render_frame(&mut self.framebuffer, &self.sim, &self.texture);

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("surface buffer: {e}"))?;
        blit_nearest_stretch(&mut buf, &self.framebuffer.pixels, &self.scale_lut);
        buf.present()
            .map_err(|e| anyhow::anyhow!("present: {e}"))?;

        // Log FPS
        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            log::info!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_surface(event_loop) {
            self.fail(event_loop, err);
            return;
        }
        self.next_frame = Instant::now();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                self.sim.running = false;
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            // Drop held keys so nothing stays stuck after alt-tab.
            WindowEvent::Focused(false) => self.keys_down.clear(),

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw(event_loop, id) {
                    log::warn!("frame skipped: {err:#}");
                }
            }

            WindowEvent::Resized(new_size) => {
                self.rebuild_lut(new_size.width as usize, new_size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_frame {
            // Schedule from now rather than the missed deadline so a stall
            // does not trigger a burst of catch-up frames.
            self.next_frame = now + self.frame_duration;
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
    }
}

fn load_grid(args: &Args) -> Result<Grid> {
    match &args.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read map {}", path.display()))?;
            let grid =
                Grid::parse(&text).with_context(|| format!("parse map {}", path.display()))?;
            log::info!(
                "loaded {}x{} map from {}",
                grid.cols(),
                grid.rows(),
                path.display()
            );
            Ok(grid)
        }
        None => Ok(Grid::default_room()),
    }
}

fn load_texture(args: &Args) -> Result<Texture> {
    match &args.texture {
        Some(path) => {
            let img = image::open(path)
                .with_context(|| format!("decode texture {}", path.display()))?;
            let tex = Texture::from_image(&img, TEXTURE_SIZE)
                .with_context(|| format!("texture {}", path.display()))?;
            log::info!("loaded texture {}", path.display());
            Ok(tex)
        }
        None => Ok(Texture::bricks(TEXTURE_SIZE as usize, TEXTURE_SIZE as usize)?),
    }
}

/// The usual start point, or the first open cell when the map walls it off.
fn spawn_camera(grid: &Grid, cfg: &Config) -> Result<Camera> {
    let start = Camera::default();
    if !blocked(start.pos[0], start.pos[1], grid, cfg.collision_radius) {
        return Ok(start);
    }
    let [x, y] = find_spawn(grid, cfg.collision_radius)
        .context("map has no open cell large enough for the player")?;
    log::info!("default start is inside a wall; spawning at ({x:.2}, {y:.2})");
    Ok(Camera::new(x, y, start.angle))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.to_config()?;
    let grid = load_grid(&args)?;
    let texture = load_texture(&args)?;
    let camera = spawn_camera(&grid, &config)?;

    log::info!(
        "{}x{} screen, {} rays, fov {:.1} deg, {} fps cap",
        config.screen_width,
        config.screen_height,
        config.num_rays,
        config.fov.to_degrees(),
        config.target_fps
    );

    let event_loop = EventLoop::new().context("create event loop")?;

    // about_to_wait replaces this with a WaitUntil deadline every iteration,
    // which caps the frame rate.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(Simulation::new(grid, camera, config), texture);
    event_loop.run_app(&mut app).context("event loop")?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
