//! Software raycaster over a fixed tile grid.
//!
//! The per-frame pipeline is: [`input::Controls`] → [`sim::Simulation::step`]
//! → [`caster::cast_rays`] → [`renderer::project`] → [`framebuffer::Framebuffer`]
//! → [`scaler::blit_nearest_stretch`] onto the window surface.

pub mod camera;
pub mod caster;
pub mod collision;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod hud;
pub mod input;
pub mod minimap;
pub mod renderer;
pub mod scaler;
pub mod sim;
pub mod texture;
pub mod world;

pub use error::{MapError, TextureError};
