//! Individual particle representation

use glam::{Vec2, Vec4};

use super::render::ParticleSample;
use crate::color::Color;

/// A single particle in the system
///
/// Everything a particle needs is captured by value when it is spawned; it
/// never refers back to the system that created it.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Index into the owning system's texture table
    texture: usize,
    /// Current position in pixels
    position: Vec2,
    /// Velocity in pixels per tick
    velocity: Vec2,
    /// Rotation in radians
    angle: f32,
    /// Rotation speed in radians per tick
    angular_velocity: f32,
    color: Color,
    /// Uniform scale factor
    size: f32,
    /// Ticks remaining
    ttl: i32,
    /// 1.0 = fully opaque, 0.0 = fully transparent
    opacity: f32,
    /// Opacity lost per tick
    fade_rate: f32,
    apply_gravity: bool,
    gravity: f32,
}

impl Particle {
    /// Create a new, fully opaque particle with no rotation, fade or gravity
    pub fn new(texture: usize, position: Vec2, velocity: Vec2, ttl: i32) -> Self {
        Self {
            texture,
            position,
            velocity,
            angle: 0.0,
            angular_velocity: 0.0,
            color: Color::WHITE,
            size: 1.0,
            ttl,
            opacity: 1.0,
            fade_rate: 0.0,
            apply_gravity: false,
            gravity: 0.0,
        }
    }

    /// Set the initial angle and the per-tick angular velocity
    pub fn with_rotation(mut self, angle: f32, angular_velocity: f32) -> Self {
        self.angle = angle;
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Fade linearly to zero opacity over the particle's TTL
    ///
    /// A particle spawned with `ttl <= 0` gets no fade rate; it expires on its
    /// first advance anyway.
    pub fn with_fade_out(mut self, fade_out: bool) -> Self {
        self.fade_rate = if fade_out && self.ttl > 0 {
            1.0 / self.ttl as f32
        } else {
            0.0
        };
        self
    }

    /// Snapshot of the system's gravity settings at spawn time
    pub fn with_gravity(mut self, apply_gravity: bool, gravity: f32) -> Self {
        self.apply_gravity = apply_gravity;
        self.gravity = gravity;
        self
    }

    /// Advance the particle by one tick
    ///
    /// The step order is fixed: TTL, position, gravity, angle, opacity.
    pub fn advance(&mut self) {
        self.ttl -= 1;
        self.position += self.velocity;
        if self.apply_gravity {
            self.velocity.y += self.gravity;
        }
        self.angle += self.angular_velocity;
        self.opacity -= self.fade_rate;
    }

    /// Check whether the particle should be retired
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.ttl <= 0 || self.opacity <= 0.0
    }

    /// Everything the renderer needs to draw this particle
    pub fn sample(&self) -> ParticleSample {
        ParticleSample {
            texture: self.texture,
            position: self.position,
            angle: self.angle,
            tint: self.tint(),
            size: self.size,
        }
    }

    /// Color scaled by the current opacity
    pub fn tint(&self) -> Vec4 {
        self.color.with_opacity(self.opacity)
    }

    pub fn texture(&self) -> usize {
        self.texture
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn ttl(&self) -> i32 {
        self.ttl
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn fade_rate(&self) -> f32 {
        self.fade_rate
    }

    pub fn applies_gravity(&self) -> bool {
        self.apply_gravity
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }
}
