// Host-side tests for the particle field.

mod common;

use backdrop_core::{
    DrawCommand, FrameTime, Generator, ParticleConfig, ParticleField, PointerScope,
    PointerTracker, RecordingCanvas, Rgba,
};
use common::{approx, seeded};
use glam::Vec2;

const SIZE: Vec2 = Vec2::new(200.0, 100.0);

fn field(config: ParticleConfig) -> ParticleField {
    ParticleField::with_rng(config, seeded())
}

fn single(config: ParticleConfig, position: Vec2, velocity: Vec2) -> ParticleField {
    let mut f = field(ParticleConfig {
        particle_count: 1,
        ..config
    });
    f.scatter(SIZE);
    let p = &mut f.particles_mut()[0];
    p.position = position;
    p.velocity = velocity;
    f
}

#[test]
fn reflection_flips_only_the_offending_component() {
    let config = ParticleConfig {
        move_particles_on_hover: false,
        ..ParticleConfig::default()
    };
    let velocity = Vec2::new(0.1, 0.05);
    let mut f = single(config, Vec2::new(199.95, 50.0), velocity);

    f.step(SIZE, Vec2::ZERO, 1.0);

    let p = &f.particles()[0];
    assert_eq!(p.velocity, Vec2::new(-0.1, 0.05));
    assert_eq!(p.velocity.length(), velocity.length());
}

#[test]
fn hover_pulls_nearby_particles_toward_the_pointer() {
    let mut f = single(ParticleConfig::default(), Vec2::new(50.0, 50.0), Vec2::ZERO);
    f.step(SIZE, Vec2::new(60.0, 50.0), 1.0);
    let p = &f.particles()[0];
    assert!(approx(p.position.x, 50.1, 1e-4));
    assert!(approx(p.position.y, 50.0, 1e-6));
}

#[test]
fn hover_ignores_particles_beyond_reach() {
    let mut f = single(ParticleConfig::default(), Vec2::new(10.0, 10.0), Vec2::ZERO);
    f.step(SIZE, Vec2::new(190.0, 90.0), 1.0);
    assert_eq!(f.particles()[0].position, Vec2::new(10.0, 10.0));
}

#[test]
fn pointer_far_off_the_surface_leaves_edge_particles_alone() {
    let mut pointer = PointerTracker::default();
    pointer.on_move(Vec2::new(150.0, -500.0), SIZE);
    pointer.advance(1.0);
    let off_canvas = pointer.current_px(SIZE);
    assert!(off_canvas.y < -400.0);

    let mut f = single(ParticleConfig::default(), Vec2::new(150.0, 5.0), Vec2::ZERO);
    f.step(SIZE, off_canvas, 1.0);
    assert_eq!(f.particles()[0].position, Vec2::new(150.0, 5.0));
}

#[test]
fn disabled_pointer_stops_attraction() {
    let mut f = single(ParticleConfig::default(), Vec2::new(50.0, 50.0), Vec2::ZERO);
    assert_eq!(f.pointer_scope(), Some(PointerScope::Window));
    f.disable_pointer();
    assert_eq!(f.pointer_scope(), None);
    f.step(SIZE, Vec2::new(60.0, 50.0), 1.0);
    assert_eq!(f.particles()[0].position, Vec2::new(50.0, 50.0));
}

#[test]
fn every_frame_draws_exactly_particle_count_circles() {
    let config = ParticleConfig {
        particle_count: 37,
        ..ParticleConfig::default()
    };
    let mut f = field(config);
    let mut canvas = RecordingCanvas::new();
    for frame in 0..5 {
        f.tick(&FrameTime::nominal(frame), Vec2::splat(0.5), &mut canvas, SIZE)
            .unwrap();
        let circles = canvas
            .take_commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count();
        assert_eq!(circles, 37);
        assert_eq!(f.particles().len(), 37);
    }
    assert_eq!(canvas.stack_depth(), 0);
}

#[test]
fn first_drawable_frame_scatters_over_the_surface() {
    let mut f = field(ParticleConfig {
        speed: 0.0,
        ..ParticleConfig::default()
    });
    assert!(!f.is_scattered());
    let mut canvas = RecordingCanvas::new();
    f.tick(&FrameTime::nominal(0), Vec2::ZERO, &mut canvas, SIZE)
        .unwrap();
    assert!(f.is_scattered());
    assert!(f.particles().iter().all(|p| p.position.x >= 0.0
        && p.position.x <= SIZE.x
        && p.position.y >= 0.0
        && p.position.y <= SIZE.y));
}

#[test]
fn initial_values_follow_the_configuration() {
    let f = field(ParticleConfig {
        particle_colors: vec![Rgba::rgb(255, 0, 0)],
        particle_spread: 0.0,
        particle_base_size: 50.0,
        speed: 0.4,
        ..ParticleConfig::default()
    });
    for p in f.particles() {
        assert!(approx(p.radius, 1.0, 1e-6));
        assert_eq!(p.color, Rgba::rgb(255, 0, 0));
        assert!(p.velocity.x >= -0.2 && p.velocity.x < 0.2);
        assert!(p.velocity.y >= -0.2 && p.velocity.y < 0.2);
        assert!(p.rotation_rate.abs() <= 0.01);
    }
}

#[test]
fn rotation_can_be_disabled() {
    let mut f = field(ParticleConfig {
        disable_rotation: true,
        ..ParticleConfig::default()
    });
    f.scatter(SIZE);
    let before: Vec<f32> = f.particles().iter().map(|p| p.rotation).collect();
    for _ in 0..10 {
        f.step(SIZE, Vec2::ZERO, 1.0);
    }
    let after: Vec<f32> = f.particles().iter().map(|p| p.rotation).collect();
    assert_eq!(before, after);
}

#[test]
fn alpha_variation_stays_in_band() {
    let mut f = field(ParticleConfig {
        alpha_particles: true,
        ..ParticleConfig::default()
    });
    f.scatter(SIZE);
    let mut canvas = RecordingCanvas::new();
    f.draw(&mut canvas);
    for c in canvas.commands() {
        if let DrawCommand::FillCircle { alpha, .. } = c {
            assert!((0.3..0.8).contains(&alpha), "alpha {alpha} out of band");
        }
    }
}

#[test]
fn opaque_by_default() {
    let mut f = field(ParticleConfig::default());
    f.scatter(SIZE);
    let mut canvas = RecordingCanvas::new();
    f.draw(&mut canvas);
    assert!(canvas.commands().iter().all(|c| match c {
        DrawCommand::FillCircle { alpha, .. } => *alpha == 1.0,
        _ => true,
    }));
}
