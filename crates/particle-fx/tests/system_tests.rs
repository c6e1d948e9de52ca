//! Integration tests for particle spawning, simulation and retirement

use glam::Vec2;
use particle_fx::particles::{
    BlendMode, CapPolicy, EmitterConfig, ParticleSample, ParticleSink, ParticleSystem, SizeRange,
};
use particle_fx::{Color, ParticleError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use test_case::test_case;

const TEXTURES: [&str; 3] = ["circle", "star", "diamond"];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn system_with(config: EmitterConfig) -> ParticleSystem<&'static str> {
    init_logger();
    ParticleSystem::seeded(TEXTURES.to_vec(), Vec2::new(400.0, 240.0), config, 1234)
        .expect("texture table is not empty")
}

#[rstest]
#[case(0.0, 0)]
#[case(0.5, 3)]
#[case(1.0, 5)]
#[case(1.5, 8)]
#[case(2.0, 10)]
#[case(-0.5, 0)]
fn test_spawn_count_from_density(#[case] density: f32, #[case] expected: usize) {
    let mut system = system_with(EmitterConfig {
        particle_density: density,
        ..EmitterConfig::default()
    });

    system.tick();

    assert_eq!(system.len(), expected);
}

#[test]
fn test_disabled_system_never_spawns() {
    let mut system = system_with(EmitterConfig {
        duration: 0.5,
        ..EmitterConfig::default()
    });
    system.tick();
    system.tick();
    let live = system.len();
    assert_eq!(live, 10);

    system.set_enabled(false);
    let ttl_before: Vec<i32> = system.particles().iter().map(|p| p.ttl()).collect();
    system.tick();

    assert_eq!(system.len(), live);
    let ttl_after: Vec<i32> = system.particles().iter().map(|p| p.ttl()).collect();
    for (before, after) in ttl_before.iter().zip(&ttl_after) {
        assert_eq!(*after, before - 1);
    }

    // Existing particles still expire: 0.5s is at most 35 ticks
    for _ in 0..40 {
        let count = system.len();
        system.tick();
        assert!(system.len() <= count);
    }
    assert!(system.is_empty());
}

#[test]
fn test_ttl_decreases_by_one_per_tick() {
    let mut system = system_with(EmitterConfig {
        enabled: false,
        ..EmitterConfig::default()
    });
    system.emit(5);

    let mut previous: Vec<i32> = system.particles().iter().map(|p| p.ttl()).collect();
    for _ in 0..20 {
        system.tick();
        let current: Vec<i32> = system.particles().iter().map(|p| p.ttl()).collect();
        assert_eq!(current.len(), previous.len());
        for (now, then) in current.iter().zip(&previous) {
            assert_eq!(*now, then - 1);
        }
        previous = current;
    }
}

#[test]
fn test_gravity_snapshot_isolation() {
    let mut system = system_with(EmitterConfig {
        apply_gravity: true,
        gravity: 0.1,
        enabled: false,
        ..EmitterConfig::default()
    });
    system.emit(3);
    let early_velocity: Vec<Vec2> = system.particles().iter().map(|p| p.velocity()).collect();

    system.set_gravity(2.0);
    system.emit(3);
    system.tick();

    let particles = system.particles();
    for (p, v0) in particles[..3].iter().zip(&early_velocity) {
        assert_eq!(p.gravity(), 0.1);
        assert!((p.velocity().y - (v0.y + 0.1)).abs() < 1e-6);
    }
    for p in &particles[3..] {
        assert_eq!(p.gravity(), 2.0);
    }
}

#[test]
fn test_gravity_disabled_keeps_velocity() {
    let mut system = system_with(EmitterConfig {
        apply_gravity: false,
        enabled: false,
        ..EmitterConfig::default()
    });
    system.emit(4);
    let before: Vec<Vec2> = system.particles().iter().map(|p| p.velocity()).collect();
    for _ in 0..10 {
        system.tick();
    }
    let after: Vec<Vec2> = system.particles().iter().map(|p| p.velocity()).collect();
    assert_eq!(before, after);
}

#[test_case(Vec2::X, 0.0 ; "laser along x")]
#[test_case(Vec2::new(0.0, -3.0), std::f32::consts::FRAC_PI_4 ; "narrow cone up")]
#[test_case(Vec2::new(1.0, 1.0), std::f32::consts::FRAC_PI_2 ; "diagonal quarter turn")]
#[test_case(Vec2::new(-2.0, 5.0), std::f32::consts::PI ; "half circle")]
fn test_angle_spread_bound(direction: Vec2, spread: f32) {
    let mut system = system_with(EmitterConfig {
        direction,
        angle_spread: spread,
        particle_speed: 2.5,
        enabled: false,
        ..EmitterConfig::default()
    });
    system.emit(200);

    let axis = direction.normalize();
    for p in system.particles() {
        let v = p.velocity();
        assert!((v.length() - 2.5).abs() < 1e-4);
        assert!(axis.angle_to(v).abs() <= spread / 2.0 + 1e-4);
    }
}

#[test]
fn test_omnidirectional_velocity_range() {
    let mut system = system_with(EmitterConfig {
        particle_speed: 3.0,
        enabled: false,
        ..EmitterConfig::default()
    });
    system.emit(200);

    for p in system.particles() {
        let v = p.velocity();
        assert!(v.x.abs() <= 3.0 && v.y.abs() <= 3.0);
    }
}

#[test]
fn test_size_ignores_randomize_flag() {
    let sizes = |randomize_particle_size: bool| -> Vec<f32> {
        let mut system = system_with(EmitterConfig {
            randomize_particle_size,
            particle_size: SizeRange::new(2.0, 4.0),
            enabled: false,
            ..EmitterConfig::default()
        });
        system.emit(50);
        system.particles().iter().map(|p| p.size()).collect()
    };

    let fixed = sizes(false);
    let randomized = sizes(true);

    assert_eq!(fixed, randomized);
    assert!(fixed.iter().all(|s| (0.0..1.0).contains(s)));
}

#[test]
fn test_directed_preset_spawns_fixed_color() {
    let config = EmitterConfig::directed(Vec2::Y, 4.0, 0.2, 1.0, Color::new(1.0, 0.5, 0.0));
    let mut system = system_with(config);
    system.tick();

    assert_eq!(system.len(), 1);
    let p = &system.particles()[0];
    assert_eq!(p.color(), Color::new(1.0, 0.5, 0.0));
    assert_eq!(p.angular_velocity(), 0.0);
}

#[test]
fn test_end_to_end_fade_scenario() {
    let mut system = system_with(EmitterConfig {
        particle_density: 1.0,
        fade_out: true,
        duration: 1.0,
        apply_gravity: false,
        ..EmitterConfig::default()
    });

    system.tick();
    assert_eq!(system.len(), 5);
    for p in system.particles() {
        assert!((54..=64).contains(&p.ttl()));
        assert!((p.opacity() - (1.0 - p.fade_rate())).abs() < 1e-6);
        // ttl after one advance is spawn ttl - 1
        assert!((p.fade_rate() - 1.0 / (p.ttl() + 1) as f32).abs() < 1e-6);
    }
    let mut first_wave = system.particles().to_vec();

    for tick in 2..=70 {
        system.tick();
        first_wave.retain_mut(|p| {
            p.advance();
            !p.is_expired()
        });
        // Survivors of the first wave stay at the front, in spawn order
        assert_eq!(&system.particles()[..first_wave.len()], first_wave.as_slice());
        if tick >= 65 {
            assert!(first_wave.is_empty(), "first wave survived tick {tick}");
        }
    }

    // Steady state: every live particle is younger than the longest lifetime
    assert!(system.particles().iter().all(|p| p.ttl() > 0 && p.opacity() > 0.0));
}

#[test]
fn test_fade_to_zero_matches_ttl() {
    let mut system = system_with(EmitterConfig {
        fade_out: true,
        duration: 0.25,
        enabled: false,
        ..EmitterConfig::default()
    });
    system.emit(1);
    let spawn_ttl = system.particles()[0].ttl();
    let fade_rate = system.particles()[0].fade_rate();
    assert!((fade_rate * spawn_ttl as f32 - 1.0).abs() < 1e-5);

    for _ in 0..spawn_ttl - 1 {
        system.tick();
    }
    assert_eq!(system.len(), 1);
    let p = &system.particles()[0];
    assert_eq!(p.ttl(), 1);
    assert!(p.opacity() > 0.0);

    system.tick();
    assert!(system.is_empty());
}

#[test]
fn test_removal_preserves_draw_order() {
    let mut system = system_with(EmitterConfig {
        enabled: false,
        ..EmitterConfig::default()
    });
    system.emit(50);

    for _ in 0..118 {
        system.tick();
    }
    // Durations of 2s jitter to 115..=124 ticks, so some have expired by now
    let survivors = system.particles().to_vec();
    assert!(!survivors.is_empty());

    let mut reference = system.clone();
    reference.tick();
    let expected: Vec<_> = survivors
        .into_iter()
        .map(|mut p| {
            p.advance();
            p
        })
        .filter(|p| !p.is_expired())
        .collect();
    assert_eq!(reference.particles(), expected.as_slice());
}

#[derive(Default)]
struct RecordingSink {
    blend: Option<BlendMode>,
    textures: Vec<&'static str>,
    samples: Vec<ParticleSample>,
    ended: bool,
}

impl ParticleSink<&'static str> for RecordingSink {
    fn begin(&mut self, blend: BlendMode) {
        self.blend = Some(blend);
    }

    fn draw(&mut self, texture: &&'static str, sample: &ParticleSample) {
        assert!(self.blend.is_some(), "draw called outside begin/end");
        self.textures.push(*texture);
        self.samples.push(*sample);
    }

    fn end(&mut self) {
        self.ended = true;
    }
}

#[test]
fn test_draw_yields_samples_in_order() {
    let mut system = system_with(EmitterConfig::default());
    system.tick();
    system.tick();

    let mut sink = RecordingSink::default();
    system.draw(&mut sink);

    assert_eq!(sink.blend, Some(BlendMode::Additive));
    assert!(sink.ended);
    let expected: Vec<ParticleSample> = system.samples().collect();
    assert_eq!(sink.samples, expected);
    for (texture, sample) in sink.textures.iter().zip(&sink.samples) {
        assert_eq!(*texture, TEXTURES[sample.texture]);
    }
}

#[test]
fn test_draw_with_closure() {
    let mut system = system_with(EmitterConfig::default());
    system.tick();

    let mut positions = Vec::new();
    system.draw(&mut |_texture: &&str, sample: &ParticleSample| positions.push(sample.position));

    assert_eq!(positions.len(), system.len());
}

#[test]
fn test_emitter_follows_host_location() {
    let mut system = system_with(EmitterConfig {
        particle_speed: 0.0,
        ..EmitterConfig::default()
    });
    system.set_emitter_location(Vec2::new(10.0, 20.0));
    system.tick();
    system.set_emitter_location(Vec2::new(-5.0, 7.0));
    system.tick();

    let positions: Vec<Vec2> = system.particles().iter().map(|p| p.position()).collect();
    assert!(positions[..5].iter().all(|p| *p == Vec2::new(10.0, 20.0)));
    assert!(positions[5..].iter().all(|p| *p == Vec2::new(-5.0, 7.0)));
}

#[test]
fn test_enforced_cap_resumes_after_expiry() {
    let mut system = system_with(EmitterConfig {
        max_particles: 12,
        cap_policy: CapPolicy::Enforced,
        duration: 0.2,
        ttl_jitter: 0,
        ..EmitterConfig::default()
    });

    for _ in 0..5 {
        system.tick();
        assert!(system.len() <= 12);
    }
    assert_eq!(system.len(), 12);

    // Lifetime is exactly 12 ticks; the first wave expires and frees room
    for _ in 0..20 {
        system.tick();
        assert!(system.len() <= 12);
    }
    assert!(!system.is_empty());
}

#[test]
fn test_empty_texture_table() {
    let result = ParticleSystem::<&str>::new(Vec::new(), Vec2::ZERO, EmitterConfig::default());
    assert!(matches!(result, Err(ParticleError::EmptyTextureTable)));
}

#[test]
fn test_ticks_per_second_scales_lifetime() {
    let mut system = system_with(EmitterConfig {
        duration: 1.0,
        ticks_per_second: 30.0,
        ttl_jitter: 0,
        enabled: false,
        ..EmitterConfig::default()
    });
    system.emit(3);
    assert!(system.particles().iter().all(|p| p.ttl() == 30));
}
