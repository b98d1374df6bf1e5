use assert_matches::assert_matches;
use pointer_particles::{
    InvalidConfig, ParticleField, PointerState, SimulationConfig, SizeRange, Viewport, FRICTION, WRAP_MARGIN,
};
use rand::{rngs::StdRng, SeedableRng};

const VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn single_particle_config() -> SimulationConfig {
    SimulationConfig {
        particle_count: 1,
        size_range: SizeRange { min: 4.0, max: 4.0 },
        base_speed: 1.0,
        attraction_strength: 1.0,
        attraction_range: 100.0,
        ..SimulationConfig::default()
    }
}

/// A one-particle field with the particle parked at `(x, y)` and at rest.
fn parked_at(x: f32, y: f32) -> ParticleField {
    let mut field = ParticleField::create_with_rng(single_particle_config(), VIEWPORT, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let particle = &mut field.particles_mut()[0];
    particle.position = cgmath::vec2(x, y);
    particle.velocity = cgmath::vec2(0.0, 0.0);
    field
}

#[test]
fn create_rejects_invalid_config() {
    let zero = SimulationConfig {
        particle_count: 0,
        ..SimulationConfig::default()
    };
    assert_matches!(
        ParticleField::create(zero, VIEWPORT),
        Err(InvalidConfig::ParticleCount)
    );

    let inverted = SimulationConfig {
        size_range: SizeRange { min: 5.0, max: 1.0 },
        ..SimulationConfig::default()
    };
    assert_matches!(
        ParticleField::create(inverted, VIEWPORT),
        Err(InvalidConfig::SizeRange { .. })
    );

    let no_range = SimulationConfig {
        attraction_range: -1.0,
        ..SimulationConfig::default()
    };
    assert_matches!(
        ParticleField::create(no_range, VIEWPORT),
        Err(InvalidConfig::AttractionRange(_))
    );
}

#[test]
fn pointer_on_the_range_edge_exerts_no_force() {
    let mut field = parked_at(0.0, 0.0);
    field.tick(PointerState::new(100.0, 0.0), VIEWPORT);

    let particle = field.particles()[0];
    assert_eq!(particle.velocity, cgmath::vec2(0.0, 0.0));
    assert_eq!(particle.position, cgmath::vec2(0.0, 0.0));
}

#[test]
fn pointer_inside_the_range_pulls_the_particle() {
    let mut field = parked_at(0.0, 0.0);
    assert_eq!(field.particles()[0].speed(), 0.5);

    field.tick(PointerState::new(50.0, 0.0), VIEWPORT);

    let particle = field.particles()[0];
    assert_close(particle.velocity.x, 0.475);
    assert_close(particle.velocity.y, 0.0);
    assert_close(particle.position.x, 0.2375);
    assert_close(particle.position.y, 0.0);
}

#[test]
fn pointer_on_the_particle_only_applies_friction() {
    let mut field = parked_at(200.0, 200.0);
    field.particles_mut()[0].velocity = cgmath::vec2(0.2, -0.4);

    field.tick(PointerState::new(200.0, 200.0), VIEWPORT);

    let particle = field.particles()[0];
    assert!(particle.velocity.x.is_finite() && particle.velocity.y.is_finite());
    assert_eq!(particle.velocity, cgmath::vec2(0.2 * FRICTION, -0.4 * FRICTION));
}

#[test]
fn out_of_range_particles_are_only_damped() {
    let config = SimulationConfig {
        attraction_range: 50.0,
        ..SimulationConfig::default()
    };
    let mut field = ParticleField::create_with_rng(config, VIEWPORT, &mut StdRng::seed_from_u64(3)).unwrap();
    let pointer = PointerState::new(-10_000.0, -10_000.0);
    let before = field.particles().to_vec();

    field.tick(pointer, VIEWPORT);

    for (after, before) in field.particles().iter().zip(&before) {
        assert_eq!(after.velocity.x, before.velocity.x * FRICTION);
        assert_eq!(after.velocity.y, before.velocity.y * FRICTION);
    }
}

#[test]
fn derived_fields_survive_ticks() {
    let mut field = ParticleField::create_with_rng(SimulationConfig::default(), VIEWPORT, &mut StdRng::seed_from_u64(5))
        .unwrap();
    let before = field.particles().to_vec();

    for frame in 0..120 {
        let angle = frame as f32 * 0.1;
        let pointer = PointerState::new(400.0 + 200.0 * angle.cos(), 300.0 + 200.0 * angle.sin());
        field.tick(pointer, VIEWPORT);
    }

    assert_eq!(field.len(), before.len());
    for (after, before) in field.particles().iter().zip(&before) {
        assert_eq!(after.size(), before.size());
        assert_eq!(after.speed(), before.speed());
        assert_eq!(after.color(), before.color());
    }
}

#[test]
fn particles_wrap_around_every_edge() {
    let far_pointer = PointerState::new(1e6, 1e6);
    let cases = [
        ((-51.0, 300.0), (VIEWPORT.width + WRAP_MARGIN, 300.0)),
        ((VIEWPORT.width + 51.0, 300.0), (-WRAP_MARGIN, 300.0)),
        ((400.0, -51.0), (400.0, VIEWPORT.height + WRAP_MARGIN)),
        ((400.0, VIEWPORT.height + 51.0), (400.0, -WRAP_MARGIN)),
    ];

    for ((x, y), (expected_x, expected_y)) in cases {
        let mut field = parked_at(x, y);
        field.tick(far_pointer, VIEWPORT);

        let particle = field.particles()[0];
        assert_eq!(particle.position, cgmath::vec2(expected_x, expected_y));
    }
}

#[test]
fn positions_stay_within_the_margin() {
    let config = SimulationConfig {
        base_speed: 40.0,
        ..SimulationConfig::default()
    };
    let mut field = ParticleField::create_with_rng(config, VIEWPORT, &mut StdRng::seed_from_u64(11)).unwrap();

    for frame in 0..500 {
        let pointer = PointerState::new((frame * 37 % 800) as f32, (frame * 53 % 600) as f32);
        field.tick(pointer, VIEWPORT);

        for particle in field.particles() {
            assert!((-WRAP_MARGIN..=VIEWPORT.width + WRAP_MARGIN).contains(&particle.position.x));
            assert!((-WRAP_MARGIN..=VIEWPORT.height + WRAP_MARGIN).contains(&particle.position.y));
        }
    }
}

#[test]
fn resize_regenerates_within_the_new_bounds() {
    let mut field = ParticleField::create(SimulationConfig::default(), VIEWPORT).unwrap();
    let count = field.len();
    let smaller = Viewport::new(320.0, 240.0);

    for _ in 0..2 {
        field.resize(smaller);

        assert_eq!(field.len(), count);
        assert_eq!(field.viewport(), smaller);
        for particle in field.particles() {
            assert!((0.0..320.0).contains(&particle.position.x));
            assert!((0.0..240.0).contains(&particle.position.y));
        }
    }
}

#[test]
fn resize_with_equal_dimensions_draws_a_new_set() {
    let mut field = ParticleField::create_with_rng(SimulationConfig::default(), VIEWPORT, &mut StdRng::seed_from_u64(21))
        .unwrap();
    let first = field.particles().to_vec();

    field.resize_with_rng(VIEWPORT, &mut StdRng::seed_from_u64(22));

    assert_eq!(field.len(), first.len());
    assert_ne!(field.particles(), first.as_slice());
}
