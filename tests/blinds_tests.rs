// Host-side tests for the gradient blinds field.

mod common;

use backdrop_core::generators::blinds::{distort_factor, BlindLayout};
use backdrop_core::{
    BlendMode, BlindsConfig, DrawCommand, FrameTime, Generator, GradientBlindsField, Paint,
    RecordingCanvas, Rgba, ShineDirection,
};
use common::{approx, fill_rects, seeded};
use glam::Vec2;

fn field(config: BlindsConfig) -> GradientBlindsField {
    GradientBlindsField::with_rng(config, seeded())
}

#[test]
fn blind_width_is_the_larger_of_share_and_minimum() {
    assert_eq!(
        BlindLayout::compute(1200.0, 12, 50.0),
        BlindLayout {
            width: 100.0,
            count: 12
        }
    );
    assert_eq!(
        BlindLayout::compute(300.0, 12, 50.0),
        BlindLayout {
            width: 50.0,
            count: 6
        }
    );
    assert_eq!(BlindLayout::compute(0.0, 12, 50.0).count, 0);
}

#[test]
fn strips_tile_the_width_without_gaps() {
    for (w, n, b) in [(1000.0, 7, 50.0), (333.0, 12, 50.0), (75.0, 3, 40.0), (1.0, 1, 0.0)] {
        let layout = BlindLayout::compute(w, n, b);
        assert!(layout.count >= 1);
        assert_eq!(layout.x(0), 0.0);
        for i in 1..layout.count {
            assert!(approx(layout.x(i), layout.x(i - 1) + layout.width, 1e-3));
        }
        let end = layout.x(layout.count - 1) + layout.width;
        assert!(end >= w - 1e-3, "gap at the right edge for {w}");
        assert!(end - w < layout.width + 1e-3, "more than one strip of overhang for {w}");
    }
}

#[test]
fn narrow_surface_gets_one_oversized_blind() {
    let mut f = field(BlindsConfig {
        blind_count: 1,
        blind_min_width: 50.0,
        ..BlindsConfig::default()
    });
    let size = Vec2::new(40.0, 30.0);
    let blinds: Vec<_> = f.blinds(size, 20.0).collect();
    assert_eq!(blinds.len(), 1);
    assert_eq!(blinds[0].width, 50.0);

    let mut canvas = RecordingCanvas::new();
    f.tick(&FrameTime::nominal(0), Vec2::splat(0.5), &mut canvas, size)
        .unwrap();
    let rects = fill_rects(&canvas);
    // one strip plus the spotlight
    assert_eq!(rects.len(), 2);
    match &rects[0] {
        DrawCommand::FillRect { size, paint, .. } => {
            assert_eq!(*size, Vec2::new(50.0, 30.0));
            assert!(matches!(paint, Paint::Linear { .. }));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn proximity_drives_opacity() {
    assert_eq!(distort_factor(50.0, 50.0, 100.0), 1.0);
    assert_eq!(distort_factor(0.0, 100.0, 100.0), 0.0);
    assert_eq!(distort_factor(10.0, 10.0, 0.0), 0.0);

    let f = field(BlindsConfig {
        blind_count: 4,
        blind_min_width: 0.0,
        spotlight_opacity: 0.5,
        ..BlindsConfig::default()
    });
    let size = Vec2::new(400.0, 100.0);
    let blinds: Vec<_> = f.blinds(size, 50.0).collect();
    assert!(approx(blinds[0].distort_factor, 1.0, 1e-6));
    assert!(approx(blinds[0].alpha, 0.5, 1e-6));
    // centre 350 is 300 px away, beyond half the width
    assert!(approx(blinds[3].alpha, 0.5 * 0.3, 1e-6));
}

#[test]
fn without_noise_strips_sit_exactly_on_the_grid() {
    let mut f = field(BlindsConfig {
        noise: 0.0,
        distort_amount: 0.0,
        ..BlindsConfig::default()
    });
    let size = Vec2::new(600.0, 200.0);
    let mut canvas = RecordingCanvas::new();
    f.draw(&mut canvas, size, Vec2::new(300.0, 100.0));
    let expected: Vec<f32> = f.blinds(size, 300.0).map(|b| b.x).collect();
    let drawn: Vec<f32> = fill_rects(&canvas)
        .iter()
        .take(expected.len())
        .map(|c| match c {
            DrawCommand::FillRect { origin, .. } => origin.x,
            _ => f32::NAN,
        })
        .collect();
    assert_eq!(drawn, expected);
}

#[test]
fn jitter_is_bounded_by_noise_and_proximity() {
    let mut f = field(BlindsConfig::default());
    let size = Vec2::new(600.0, 200.0);
    let pointer_x = 120.0;
    let blinds: Vec<_> = f.blinds(size, pointer_x).collect();
    let mut canvas = RecordingCanvas::new();
    f.draw(&mut canvas, size, Vec2::new(pointer_x, 100.0));
    for (blind, rect) in blinds.iter().zip(fill_rects(&canvas)) {
        if let DrawCommand::FillRect { origin, .. } = rect {
            let max = 0.3 * 20.0 * blind.distort_factor / 2.0;
            assert!((origin.x - blind.x).abs() <= max + 1e-4);
        }
    }
}

#[test]
fn distort_amount_is_the_displacement_in_pixels() {
    let mut f = field(BlindsConfig {
        noise: 0.0,
        distort_amount: 8.0,
        ..BlindsConfig::default()
    });
    let size = Vec2::new(600.0, 200.0);
    let pointer_x = 125.0;
    let centred = f
        .blinds(size, pointer_x)
        .find(|b| approx(b.distort_factor, 1.0, 1e-6))
        .expect("a strip centred under the pointer");

    let mut widest = 0.0f32;
    for _ in 0..64 {
        let mut canvas = RecordingCanvas::new();
        f.draw(&mut canvas, size, Vec2::new(pointer_x, 100.0));
        if let Some(DrawCommand::FillRect { origin, .. }) =
            fill_rects(&canvas).get(centred.index).cloned()
        {
            let offset = (origin.x - centred.x).abs();
            assert!(offset <= 8.0 + 1e-4, "offset {offset} exceeds distortAmount");
            widest = widest.max(offset);
        }
    }
    assert!(widest > 4.0, "offsets stayed within half of distortAmount");
}

#[test]
fn spotlight_uses_blend_mode_then_restores_state() {
    let mut f = field(BlindsConfig::default());
    let size = Vec2::new(300.0, 200.0);
    let mut canvas = RecordingCanvas::new();
    f.draw(&mut canvas, size, Vec2::new(150.0, 100.0));

    let rects = fill_rects(&canvas);
    match rects.last() {
        Some(DrawCommand::FillRect {
            origin,
            size: fill,
            paint: Paint::Radial {
                center,
                outer_radius,
                stops,
                ..
            },
            blend,
            alpha,
        }) => {
            assert_eq!(*origin, Vec2::ZERO);
            assert_eq!(*fill, size);
            assert_eq!(*center, Vec2::new(150.0, 100.0));
            assert!(approx(*outer_radius, 150.0, 1e-4));
            assert_eq!(stops[0].color, Rgba::rgba(255, 255, 255, 0.3));
            assert_eq!(stops[1].color.a, 0.0);
            assert_eq!(*blend, BlendMode::Lighten);
            assert_eq!(*alpha, 1.0);
        }
        other => panic!("expected a radial spotlight, got {other:?}"),
    }
    assert_eq!(canvas.state().blend, BlendMode::SourceOver);
    assert_eq!(canvas.state().alpha, 1.0);
}

#[test]
fn gradient_runs_corner_to_corner_at_zero_angle() {
    let f = field(BlindsConfig::default());
    let blind = f.blinds(Vec2::new(600.0, 200.0), 0.0).nth(2).unwrap();
    match f.gradient_for(&blind, 200.0) {
        Paint::Linear { from, to, stops } => {
            assert!(from.abs_diff_eq(Vec2::new(blind.x, 0.0), 1e-4));
            assert!(to.abs_diff_eq(Vec2::new(blind.x + blind.width, 200.0), 1e-4));
            assert_eq!(stops[0].color, Rgba::rgb(0xff, 0x9f, 0xfc));
            assert_eq!(stops[1].color, Rgba::rgb(0x52, 0x27, 0xff));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn single_color_is_used_for_both_stops() {
    let config = BlindsConfig {
        gradient_colors: vec![Rgba::rgb(10, 20, 30)],
        ..BlindsConfig::default()
    };
    assert_eq!(config.stop_colors(), (Rgba::rgb(10, 20, 30), Rgba::rgb(10, 20, 30)));
}

#[test]
fn shine_direction_right_swaps_the_stops() {
    let config = BlindsConfig {
        shine_direction: ShineDirection::Right,
        ..BlindsConfig::default()
    };
    assert_eq!(
        config.stop_colors(),
        (Rgba::rgb(0x52, 0x27, 0xff), Rgba::rgb(0xff, 0x9f, 0xfc))
    );
}

#[test]
fn pointer_is_heavily_damped() {
    let f = field(BlindsConfig::default());
    assert_eq!(f.pointer_dampening(), 0.15);
}
