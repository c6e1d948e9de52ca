//! Direction, rotation and lifetime sampling used when spawning particles
//!
//! Every helper draws from the caller's RNG so a seeded system stays
//! reproducible end to end.

use glam::Vec2;
use rand::Rng;

/// Largest random angular velocity, in radians per tick
pub const MAX_RANDOM_ANGULAR_VELOCITY: f32 = 0.1;

/// Uniform f32 in `[-1, 1)`
#[inline]
pub fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * 2.0 - 1.0
}

/// Rotate a vector counter-clockwise by `angle` radians
pub fn rotate_vector(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Rotate `base` by a random offset in `[-max_offset, max_offset]`
pub fn random_rotated_vector<R: Rng + ?Sized>(base: Vec2, max_offset: f32, rng: &mut R) -> Vec2 {
    let offset = signed_unit(rng) * max_offset;
    rotate_vector(base, offset)
}

/// Random direction for an emitter without an axis
///
/// Each component is uniform in `[-1, 1)` and the result is not normalized, so
/// speeds vary and diagonals are slightly favoured.
pub fn omnidirectional<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let x = signed_unit(rng);
    let y = signed_unit(rng);
    Vec2::new(x, y)
}

/// Direction for a new particle
///
/// A zero `axis` emits in all directions. Any other axis is normalized and
/// jittered by up to half of `angle_spread` on either side.
pub fn emission_direction<R: Rng + ?Sized>(axis: Vec2, angle_spread: f32, rng: &mut R) -> Vec2 {
    if axis == Vec2::ZERO {
        omnidirectional(rng)
    } else {
        random_rotated_vector(axis.normalize_or_zero(), angle_spread / 2.0, rng)
    }
}

/// Angular velocity for a new particle
pub fn angular_velocity<R: Rng + ?Sized>(randomize: bool, fixed: f32, rng: &mut R) -> f32 {
    if randomize {
        MAX_RANDOM_ANGULAR_VELOCITY * signed_unit(rng)
    } else {
        fixed
    }
}

/// Lifetime in ticks: `round(ticks_per_second * seconds)` plus a jitter drawn
/// from `[-jitter, jitter)`
pub fn lifetime_ticks<R: Rng + ?Sized>(
    seconds: f32,
    ticks_per_second: f32,
    jitter: i32,
    rng: &mut R,
) -> i32 {
    let base = (ticks_per_second * seconds).round() as i32;
    let jitter = jitter.saturating_abs();
    if jitter == 0 {
        base
    } else {
        base.saturating_add(rng.random_range(-jitter..jitter))
    }
}
