//! Particle emission and simulation
//!
//! A [`ParticleSystem`] spawns particles at an emitter location every tick,
//! advances them, and retires them when their TTL or opacity runs out.
//!
//! # Architecture
//!
//! - `Particle`: one simulated sprite with pose, motion, color and lifetime
//! - `ParticleSystem`: live particles, texture table, RNG and configuration
//! - `EmitterConfig`: spawn-time parameters, copied into each new particle
//! - `ParticleSink`: host-side receiver for the draw pass
//!
//! # Usage
//!
//! ```rust
//! use glam::Vec2;
//! use particle_fx::particles::{EmitterConfig, ParticleSample, ParticleSystem};
//!
//! let textures = vec!["circle", "star", "diamond"];
//! let mut system =
//!     ParticleSystem::seeded(textures, Vec2::new(400.0, 240.0), EmitterConfig::default(), 7)?;
//!
//! // Each host frame
//! system.set_emitter_location(Vec2::new(410.0, 250.0));
//! system.tick();
//!
//! let mut drawn = 0;
//! system.draw(&mut |_texture: &&str, _sample: &ParticleSample| drawn += 1);
//! assert_eq!(drawn, system.len());
//! # Ok::<(), particle_fx::ParticleError>(())
//! ```

mod config;
mod emission;
mod particle;
mod render;
mod system;

pub use config::{
    CapPolicy, DEFAULT_EMISSION_RATE, DEFAULT_TICKS_PER_SECOND, EmitterConfig, SizeRange,
};
pub use emission::{
    MAX_RANDOM_ANGULAR_VELOCITY, emission_direction, random_rotated_vector, rotate_vector,
};
pub use particle::Particle;
pub use render::{BlendMode, ParticleSample, ParticleSink};
pub use system::{MAX_SPAWN_PER_CALL, ParticleSystem};
