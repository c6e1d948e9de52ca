//! Emitter configuration

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use crate::color::Color;

/// Particles spawned per tick at a density of 1.0
pub const DEFAULT_EMISSION_RATE: u32 = 5;

/// Tick rate assumed when converting lifetimes from seconds
pub const DEFAULT_TICKS_PER_SECOND: f32 = 60.0;

/// How `max_particles` is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum CapPolicy {
    /// The cap is informational only; the live set grows until particles expire
    #[default]
    Advisory,
    /// No particles are spawned while the live set is at the cap
    Enforced,
}

/// Minimum and maximum particle size, always ordered `min <= max`
///
/// Writes that would cross the bounds are clamped to the other bound.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeRange {
    min: f32,
    max: f32,
}

impl SizeRange {
    /// Create a range; a `min` above `max` is clamped down to `max`
    pub fn new(min: f32, max: f32) -> Self {
        let mut range = Self { min, max };
        range.normalize();
        range
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Set the minimum, clamped to the current maximum
    pub fn set_min(&mut self, value: f32) {
        if value > self.max {
            log::debug!("Clamped min particle size {} to max {}", value, self.max);
            self.min = self.max;
        } else {
            self.min = value;
        }
    }

    /// Set the maximum, clamped to the current minimum
    pub fn set_max(&mut self, value: f32) {
        if value < self.min {
            log::debug!("Clamped max particle size {} to min {}", value, self.min);
            self.max = self.min;
        } else {
            self.max = value;
        }
    }

    /// Restore `min <= max` after deserialization
    pub(crate) fn normalize(&mut self) {
        if self.min > self.max {
            log::debug!(
                "Particle size range has min {} above max {}, clamping",
                self.min,
                self.max
            );
            self.min = self.max;
        }
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self { min: 1.0, max: 5.0 }
    }
}

/// Spawn-time parameters of a particle system
///
/// Particles copy what they need from here when they are created, so changes
/// only affect particles spawned afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct EmitterConfig {
    /// Emission axis, `Vec2::ZERO` emits in every direction
    pub direction: Vec2,
    /// Multiplier on the per-tick emission rate
    pub particle_density: f32,
    pub max_particles: usize,
    pub cap_policy: CapPolicy,
    /// Full cone width in radians around `direction`
    pub angle_spread: f32,
    /// Multiplier on each spawned particle's direction vector
    pub particle_speed: f32,
    /// Angular velocity used when `randomize_rotation` is off
    pub rotation_speed: f32,
    pub randomize_rotation: bool,
    /// Baseline particle lifetime in seconds
    pub duration: f32,
    /// Color used when `randomize_color` is off
    pub color: Color,
    pub randomize_color: bool,
    /// Currently has no effect: sizes are always drawn from `[0, 1)`
    pub randomize_particle_size: bool,
    /// Stored for hosts; spawning does not read it yet
    pub particle_size: SizeRange,
    pub fade_out: bool,
    pub apply_gravity: bool,
    /// Added to each particle's vertical velocity every tick when enabled
    pub gravity: f32,
    /// Spawning switch; live particles keep simulating when off
    pub enabled: bool,
    pub ticks_per_second: f32,
    /// Particles spawned per tick at a density of 1.0
    pub base_emission_rate: u32,
    /// Lifetime jitter in ticks, drawn from `[-ttl_jitter, ttl_jitter)`
    pub ttl_jitter: i32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            direction: Vec2::ZERO,
            particle_density: 1.0,
            max_particles: 500,
            cap_policy: CapPolicy::Advisory,
            angle_spread: FRAC_PI_2,
            particle_speed: 1.0,
            rotation_speed: 0.0,
            randomize_rotation: true,
            duration: 2.0,
            color: Color::WHITE,
            randomize_color: true,
            randomize_particle_size: true,
            particle_size: SizeRange::default(),
            fade_out: false,
            apply_gravity: false,
            gravity: 0.1,
            enabled: true,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            base_emission_rate: DEFAULT_EMISSION_RATE,
            ttl_jitter: 5,
        }
    }
}

impl EmitterConfig {
    /// Preset for a jet along `direction` with a fixed color
    pub fn directed(
        direction: Vec2,
        speed: f32,
        angle_spread: f32,
        duration: f32,
        color: Color,
    ) -> Self {
        Self {
            direction,
            particle_density: 0.2,
            angle_spread,
            particle_speed: speed,
            randomize_rotation: false,
            duration,
            color,
            randomize_color: false,
            ..Self::default()
        }
    }

    pub fn min_particle_size(&self) -> f32 {
        self.particle_size.min()
    }

    pub fn max_particle_size(&self) -> f32 {
        self.particle_size.max()
    }

    /// Set the minimum size, clamped to the current maximum
    pub fn set_min_particle_size(&mut self, value: f32) {
        self.particle_size.set_min(value);
    }

    /// Set the maximum size, clamped to the current minimum
    pub fn set_max_particle_size(&mut self, value: f32) {
        self.particle_size.set_max(value);
    }

    /// Particles to spawn this tick: `ceil(base_emission_rate * particle_density)`
    ///
    /// Negative or non-finite densities spawn nothing.
    pub fn spawn_count(&self) -> usize {
        let count = (self.base_emission_rate as f32 * self.particle_density).ceil();
        if count.is_finite() && count > 0.0 {
            count as usize
        } else {
            0
        }
    }
}

#[cfg(feature = "serde-support")]
impl EmitterConfig {
    /// Parse a JSON config; missing fields fall back to the defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.particle_size.normalize();
        Ok(config)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
