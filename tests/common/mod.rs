// Shared helpers for the host-side integration tests.
#![allow(dead_code)]

use backdrop_core::{DrawCommand, RecordingCanvas};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn seeded() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

pub fn fill_rects(canvas: &RecordingCanvas) -> Vec<DrawCommand> {
    canvas
        .commands()
        .into_iter()
        .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
        .collect()
}
