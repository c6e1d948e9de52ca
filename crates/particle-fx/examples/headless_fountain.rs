//! Drive a directed emitter without a window and report what a renderer would draw
//!
//! Run with `RUST_LOG=particle_fx=trace` to see per-tick spawn/retire counts.

use glam::Vec2;
use particle_fx::particles::{BlendMode, EmitterConfig, ParticleSample, ParticleSink, ParticleSystem};
use particle_fx::Color;

/// Stand-in for a sprite batch: counts draws per texture
struct TallySink {
    counts: [usize; 3],
    blend: Option<BlendMode>,
}

impl ParticleSink<usize> for TallySink {
    fn begin(&mut self, blend: BlendMode) {
        self.blend = Some(blend);
    }

    fn draw(&mut self, texture: &usize, _sample: &ParticleSample) {
        self.counts[*texture] += 1;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = EmitterConfig::directed(
        Vec2::new(0.0, -1.0),
        4.0,
        std::f32::consts::FRAC_PI_4,
        1.5,
        Color::new(1.0, 0.6, 0.1),
    );
    config.particle_density = 1.0;
    config.apply_gravity = true;
    config.gravity = 0.08;
    config.fade_out = true;

    let mut system = ParticleSystem::seeded(vec![0usize, 1, 2], Vec2::new(400.0, 400.0), config, 2024)?;

    for frame in 0..180u32 {
        // Sweep the emitter left and right like a pointer would
        let x = 400.0 + 150.0 * (frame as f32 / 30.0).sin();
        system.set_emitter_location(Vec2::new(x, 400.0));
        system.tick();

        if frame % 30 == 0 {
            let mut sink = TallySink { counts: [0; 3], blend: None };
            system.draw(&mut sink);
            println!(
                "frame {frame:>3}: {:>4} live, per texture {:?}, blend {:?}",
                system.len(),
                sink.counts,
                sink.blend
            );
        }
    }

    Ok(())
}
