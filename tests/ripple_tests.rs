// Host-side tests for the ripple grid.

mod common;

use backdrop_core::generators::ripple::{
    ambient_distortion, lattice, pointer_distortion, rainbow_hue,
};
use backdrop_core::{
    DrawCommand, FrameTime, Generator, PointerScope, RecordingCanvas, RippleConfig, RippleGrid,
};
use common::approx;
use glam::Vec2;
use std::f32::consts::PI;

fn ambient_config() -> RippleConfig {
    RippleConfig {
        grid_size: 10.0,
        mouse_interaction: false,
        enable_rainbow: false,
        ripple_intensity: 0.05,
        ..RippleConfig::default()
    }
}

#[test]
fn ambient_distortion_is_a_pure_function() {
    let node = Vec2::new(37.0, 81.0);
    let a = ambient_distortion(node, 1.25, 0.05);
    let b = ambient_distortion(node, 1.25, 0.05);
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn origin_node_at_time_zero_uses_the_exact_formula() {
    // sin(0) * cos(0) = 0, so the origin is undisplaced
    let grid = RippleGrid::new(ambient_config());
    assert_eq!(grid.time(), 0.0);
    assert_eq!(grid.distortion_at(Vec2::ZERO, Vec2::ZERO), 0.0);

    // where the sine term peaks the amplitude is intensity * 100
    let peak = Vec2::new(10.0 * PI, 0.0);
    assert!(approx(grid.distortion_at(peak, Vec2::ZERO), 5.0, 1e-4));
}

#[test]
fn pointer_ripple_vanishes_beyond_reach() {
    let config = RippleConfig::default();
    let reach = config.reach();
    assert!(approx(reach, 120.0, 1e-4));

    let pointer = Vec2::new(50.0, 50.0);
    let far = pointer + Vec2::new(reach + 1.0, 0.0);
    assert_eq!(pointer_distortion(far, pointer, 0.3, 0.05, reach), 0.0);

    // d * 0.1 = pi / 2 at t = 0
    let near = pointer + Vec2::new(5.0 * PI, 0.0);
    assert!(approx(pointer_distortion(near, pointer, 0.0, 0.05, reach), 5.0, 1e-4));
}

#[test]
fn rainbow_hue_stays_in_range() {
    for t in [0.0_f32, 0.016, 7.3, 1234.5] {
        for node in lattice(Vec2::new(400.0, 300.0), 13.0) {
            let hue = rainbow_hue(node, t);
            assert!((0.0..360.0).contains(&hue), "hue {hue} at {node:?}, t={t}");
        }
    }
    let hue = rainbow_hue(Vec2::new(-1e-6, 0.0), 0.0);
    assert!((0.0..360.0).contains(&hue));
}

#[test]
fn lattice_covers_the_far_edge() {
    let nodes: Vec<Vec2> = lattice(Vec2::new(95.0, 40.0), 10.0).collect();
    // columns 0..=10, rows 0..=4
    assert_eq!(nodes.len(), 11 * 5);
    assert!(nodes.iter().any(|n| *n == Vec2::new(100.0, 40.0)));
}

#[test]
fn each_node_draws_one_vertical_and_one_horizontal_line() {
    let mut grid = RippleGrid::new(ambient_config());
    let mut canvas = RecordingCanvas::new();
    let size = Vec2::new(100.0, 100.0);
    grid.tick(&FrameTime::nominal(0), Vec2::ZERO, &mut canvas, size)
        .unwrap();

    let lines: Vec<DrawCommand> = canvas
        .commands()
        .into_iter()
        .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
        .collect();
    assert_eq!(lines.len(), 2 * 11 * 11);
    for line in &lines {
        if let DrawCommand::StrokeLine {
            from,
            to,
            alpha,
            width,
            ..
        } = line
        {
            assert!(approx(*alpha, 0.8, 1e-6));
            assert!(approx(*width, 1.5, 1e-6));
            assert!(from.x == to.x || from.y == to.y);
        }
    }
    assert_eq!(canvas.stack_depth(), 0);
}

#[test]
fn time_advances_per_step() {
    let mut grid = RippleGrid::new(RippleConfig::default());
    grid.advance(1.0);
    grid.advance(2.0);
    assert!(approx(grid.time(), 0.048, 1e-6));
}

#[test]
fn disabling_the_pointer_falls_back_to_ambient_waves() {
    let mut grid = RippleGrid::new(RippleConfig::default());
    assert_eq!(grid.pointer_scope(), Some(PointerScope::Surface));
    grid.disable_pointer();
    assert!(!grid.is_interactive());
    assert_eq!(grid.pointer_scope(), None);
}

#[test]
fn rainbow_mode_colors_by_position() {
    let grid = RippleGrid::new(RippleConfig {
        enable_rainbow: true,
        ..RippleConfig::default()
    });
    assert_ne!(
        grid.color_at(Vec2::new(0.0, 0.0)),
        grid.color_at(Vec2::new(120.0, 0.0))
    );
}
