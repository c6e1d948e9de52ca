//! Frame-stepped 2D particle emitter
//!
//! See [`particles`] for the emitter and simulation.

pub mod color;
pub mod error;
pub mod particles;

// Re-export common types
pub use color::Color;
pub use error::{ParticleError, Result};
pub use particles::{EmitterConfig, Particle, ParticleSystem};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
