//! Particle system runtime state

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{CapPolicy, EmitterConfig};
use super::emission::{angular_velocity, emission_direction, lifetime_ticks};
use super::particle::Particle;
use super::render::{BlendMode, ParticleSample, ParticleSink};
use crate::color::Color;
use crate::error::{ParticleError, Result};

/// Most particles a single tick or emit call will create
pub const MAX_SPAWN_PER_CALL: usize = 65_536;

/// Runtime particle emitter
///
/// Owns the live particles, the texture table they index into, and the RNG
/// behind every randomized spawn decision. Seed it (or inject an RNG) to make
/// runs reproducible.
#[derive(Debug, Clone)]
pub struct ParticleSystem<T, R = StdRng> {
    /// Texture handles supplied by the host, never empty
    textures: Vec<T>,
    /// Live particles in draw order
    particles: Vec<Particle>,
    /// Random number generator
    rng: R,
    /// Where new particles appear
    emitter_location: Vec2,
    config: EmitterConfig,
}

impl<T> ParticleSystem<T> {
    /// Create a system with an OS-seeded generator
    pub fn new(textures: Vec<T>, location: Vec2, config: EmitterConfig) -> Result<Self> {
        Self::with_rng(textures, location, config, StdRng::from_os_rng())
    }

    /// Create a system whose spawns are reproducible from `seed`
    pub fn seeded(textures: Vec<T>, location: Vec2, config: EmitterConfig, seed: u64) -> Result<Self> {
        Self::with_rng(textures, location, config, StdRng::seed_from_u64(seed))
    }
}

impl<T, R: Rng> ParticleSystem<T, R> {
    /// Create a system drawing from a caller-supplied generator
    pub fn with_rng(
        textures: Vec<T>,
        location: Vec2,
        config: EmitterConfig,
        rng: R,
    ) -> Result<Self> {
        if textures.is_empty() {
            return Err(ParticleError::EmptyTextureTable);
        }
        log::debug!(
            "Created particle system with {} textures at ({}, {})",
            textures.len(),
            location.x,
            location.y
        );

        Ok(Self {
            textures,
            particles: Vec::new(),
            rng,
            emitter_location: location,
            config,
        })
    }

    /// Advance the simulation by one tick
    ///
    /// Spawns new particles if enabled, advances every live particle, then
    /// drops the expired ones without reordering the survivors.
    pub fn tick(&mut self) {
        let spawned = if self.config.enabled {
            self.spawn(self.config.spawn_count(), None)
        } else {
            0
        };

        let before = self.particles.len();
        self.particles.retain_mut(|particle| {
            particle.advance();
            !particle.is_expired()
        });

        log::trace!(
            "Tick: spawned {}, retired {}, live {}",
            spawned,
            before - self.particles.len(),
            self.particles.len()
        );
    }

    /// Spawn `count` particles now, whether or not the system is enabled
    ///
    /// Returns the number actually spawned, which is lower than `count` when
    /// an enforced cap is reached or `count` exceeds [`MAX_SPAWN_PER_CALL`].
    pub fn emit(&mut self, count: usize) -> usize {
        self.spawn(count, None)
    }

    /// Like [`emit`](Self::emit), with every particle using texture `index`
    pub fn emit_with_texture(&mut self, count: usize, index: usize) -> Result<usize> {
        if index >= self.textures.len() {
            return Err(ParticleError::InvalidTexture {
                index,
                len: self.textures.len(),
            });
        }
        Ok(self.spawn(count, Some(index)))
    }

    /// Remove every live particle
    pub fn clear(&mut self) {
        log::debug!("Clearing {} particles", self.particles.len());
        self.particles.clear();
    }

    /// Hand every live particle to `sink`, in draw order
    pub fn draw<S: ParticleSink<T>>(&self, sink: &mut S) {
        sink.begin(self.blend_mode());
        for particle in &self.particles {
            let sample = particle.sample();
            sink.draw(&self.textures[sample.texture], &sample);
        }
        sink.end();
    }

    /// Render samples of every live particle, in draw order
    pub fn samples(&self) -> impl Iterator<Item = ParticleSample> + '_ {
        self.particles.iter().map(Particle::sample)
    }

    fn spawn(&mut self, count: usize, texture: Option<usize>) -> usize {
        if count > MAX_SPAWN_PER_CALL {
            log::warn!(
                "Requested {} particles in one call, limiting to {}",
                count,
                MAX_SPAWN_PER_CALL
            );
        }
        let count = count.min(MAX_SPAWN_PER_CALL);
        let count = match self.config.cap_policy {
            CapPolicy::Advisory => count,
            CapPolicy::Enforced => {
                let room = self.config.max_particles.saturating_sub(self.particles.len());
                if room < count {
                    log::debug!(
                        "Particle cap {} reached, spawning {} of {}",
                        self.config.max_particles,
                        room,
                        count
                    );
                }
                count.min(room)
            }
        };

        for _ in 0..count {
            let particle = self.generate_particle(texture);
            self.particles.push(particle);
        }
        count
    }

    /// Create a new particle from the current configuration
    ///
    /// Random draws happen in a fixed order: texture, direction, angular
    /// velocity, color, size, lifetime.
    fn generate_particle(&mut self, texture: Option<usize>) -> Particle {
        let rng = &mut self.rng;
        let config = &self.config;

        let texture = match texture {
            Some(index) => index,
            None => rng.random_range(0..self.textures.len()),
        };
        let direction = emission_direction(config.direction, config.angle_spread, rng);
        let angular_velocity =
            angular_velocity(config.randomize_rotation, config.rotation_speed, rng);
        let color = if config.randomize_color {
            Color::random(rng)
        } else {
            config.color
        };
        let size = rng.random::<f32>();
        let ttl = lifetime_ticks(
            config.duration,
            config.ticks_per_second,
            config.ttl_jitter,
            rng,
        );

        Particle::new(
            texture,
            self.emitter_location,
            direction * config.particle_speed,
            ttl,
        )
        .with_rotation(0.0, angular_velocity)
        .with_color(color)
        .with_size(size)
        .with_fade_out(config.fade_out)
        .with_gravity(config.apply_gravity, config.gravity)
    }
}

impl<T, R> ParticleSystem<T, R> {
    /// Get the live particles in draw order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Get the current number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn textures(&self) -> &[T] {
        &self.textures
    }

    /// Blend mode the host should draw particles with
    pub fn blend_mode(&self) -> BlendMode {
        BlendMode::Additive
    }

    pub fn emitter_location(&self) -> Vec2 {
        self.emitter_location
    }

    pub fn set_emitter_location(&mut self, location: Vec2) {
        self.emitter_location = location;
    }

    pub fn direction(&self) -> Vec2 {
        self.config.direction
    }

    pub fn set_direction(&mut self, direction: Vec2) {
        self.config.direction = direction;
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn gravity(&self) -> f32 {
        self.config.gravity
    }

    /// Change gravity for particles spawned from now on
    pub fn set_gravity(&mut self, gravity: f32) {
        self.config.gravity = gravity;
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Mutable access to the configuration; takes effect on the next spawn
    pub fn config_mut(&mut self) -> &mut EmitterConfig {
        &mut self.config
    }

    /// Replace the whole configuration
    pub fn set_config(&mut self, config: EmitterConfig) {
        log::debug!("Replaced emitter config");
        self.config = config;
    }
}
