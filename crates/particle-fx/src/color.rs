//! RGB particle colors

use glam::Vec4;
use rand::Rng;

/// Linear RGB color with components in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Draw each channel independently from `[0, 1)`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r = rng.random::<f32>();
        let g = rng.random::<f32>();
        let b = rng.random::<f32>();
        Self { r, g, b }
    }

    /// Scale every channel, alpha included, by `opacity`
    ///
    /// Alpha starts at 1.0, so the result is premultiplied RGBA.
    pub fn with_opacity(self, opacity: f32) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, 1.0) * opacity
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }
}
