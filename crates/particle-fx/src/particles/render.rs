//! Render-side contract between a particle system and its host
//!
//! The core never rasterizes. It hands the host one [`ParticleSample`] per live
//! particle, bracketed by [`ParticleSink::begin`] and [`ParticleSink::end`] so the
//! host can open and close a batch with the requested [`BlendMode`].

use glam::{Vec2, Vec4};

/// Blending mode for particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum BlendMode {
    /// Alpha blending (src * alpha + dst * (1-alpha))
    AlphaBlend,
    /// Additive blending (src + dst)
    #[default]
    Additive,
}

/// Per-particle draw data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    /// Index into the system's texture table
    pub texture: usize,
    /// Sprite center in pixels
    pub position: Vec2,
    /// Rotation in radians
    pub angle: f32,
    /// RGBA color premultiplied by opacity
    pub tint: Vec4,
    /// Uniform scale factor
    pub size: f32,
}

/// Receiver for a particle system's draw pass
///
/// Closures taking `(&T, &ParticleSample)` implement this trait directly when
/// the host has no batch to open or close.
pub trait ParticleSink<T> {
    /// Called once before the first sample
    fn begin(&mut self, _blend: BlendMode) {}

    /// Called for each live particle, in draw order
    fn draw(&mut self, texture: &T, sample: &ParticleSample);

    /// Called once after the last sample
    fn end(&mut self) {}
}

impl<T, F> ParticleSink<T> for F
where
    F: FnMut(&T, &ParticleSample),
{
    fn draw(&mut self, texture: &T, sample: &ParticleSample) {
        self(texture, sample);
    }
}
