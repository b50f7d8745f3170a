//! Headless backend: a canvas that records every call and a host whose
//! container size and context availability can be changed at will.
//!
//! Only compiled with the `testing` feature.

use crate::canvas::{Canvas, Paint};
use crate::color::{BlendMode, Rgba};
use crate::error::{BackdropError, Result};
use crate::surface::SurfaceHost;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize {
        width: u32,
        height: u32,
    },
    Clear {
        width: f32,
        height: f32,
    },
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    GlobalAlpha(f32),
    Blend(BlendMode),
    LineWidth(f32),
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        alpha: f32,
    },
    FillRect {
        origin: Vec2,
        size: Vec2,
        paint: Paint,
        alpha: f32,
        blend: BlendMode,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        alpha: f32,
        width: f32,
    },
    StrokeRect {
        origin: Vec2,
        size: Vec2,
        color: Rgba,
        width: f32,
    },
}

impl DrawCommand {
    /// True for commands that put pixels on the surface.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillCircle { .. }
                | DrawCommand::FillRect { .. }
                | DrawCommand::StrokeLine { .. }
                | DrawCommand::StrokeRect { .. }
        )
    }
}

/// The save/restore-able part of the context state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    pub alpha: f32,
    pub blend: BlendMode,
    pub line_width: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            blend: BlendMode::SourceOver,
            line_width: 1.0,
        }
    }
}

#[derive(Default)]
struct Recording {
    commands: Vec<DrawCommand>,
    state: DrawState,
    stack: Vec<DrawState>,
    size: (u32, u32),
}

/// Clones share one recording, so a test can keep a handle while the surface
/// owns another.
#[derive(Clone, Default)]
pub struct RecordingCanvas {
    inner: Rc<RefCell<Recording>>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.inner.borrow().commands.clone()
    }

    pub fn take_commands(&self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.inner.borrow_mut().commands)
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.inner.borrow().commands.iter().filter(|c| pred(c)).count()
    }

    pub fn draw_count(&self) -> usize {
        self.count(DrawCommand::is_draw)
    }

    pub fn state(&self) -> DrawState {
        self.inner.borrow().state
    }

    pub fn stack_depth(&self) -> usize {
        self.inner.borrow().stack.len()
    }

    pub fn size(&self) -> (u32, u32) {
        self.inner.borrow().size
    }

    fn push(&self, command: DrawCommand) {
        self.inner.borrow_mut().commands.push(command);
    }
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        let mut rec = self.inner.borrow_mut();
        rec.size = (width, height);
        // Resizing a real canvas resets its context state.
        rec.state = DrawState::default();
        rec.stack.clear();
        rec.commands.push(DrawCommand::Resize { width, height });
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.push(DrawCommand::Clear { width, height });
    }

    fn save(&mut self) {
        let mut rec = self.inner.borrow_mut();
        let state = rec.state;
        rec.stack.push(state);
        rec.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        let mut rec = self.inner.borrow_mut();
        if let Some(state) = rec.stack.pop() {
            rec.state = state;
        }
        rec.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.push(DrawCommand::Translate(offset));
    }

    fn rotate(&mut self, radians: f32) {
        self.push(DrawCommand::Rotate(radians));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        let mut rec = self.inner.borrow_mut();
        rec.state.alpha = alpha;
        rec.commands.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        let mut rec = self.inner.borrow_mut();
        rec.state.blend = mode;
        rec.commands.push(DrawCommand::Blend(mode));
    }

    fn set_line_width(&mut self, width: f32) {
        let mut rec = self.inner.borrow_mut();
        rec.state.line_width = width;
        rec.commands.push(DrawCommand::LineWidth(width));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let alpha = self.state().alpha;
        self.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        let DrawState { alpha, blend, .. } = self.state();
        self.push(DrawCommand::FillRect {
            origin,
            size,
            paint: paint.clone(),
            alpha,
            blend,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        let DrawState {
            alpha, line_width, ..
        } = self.state();
        self.push(DrawCommand::StrokeLine {
            from,
            to,
            color,
            alpha,
            width: line_width,
        });
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        let width = self.state().line_width;
        self.push(DrawCommand::StrokeRect {
            origin,
            size,
            color,
            width,
        });
    }
}

/// Host backed by shared cells: tests resize the "container", take it away,
/// or make context acquisition fail for a number of attempts.
#[derive(Clone)]
pub struct RecordingHost {
    size: Rc<Cell<Option<(u32, u32)>>>,
    canvas: RecordingCanvas,
    failures_left: Rc<Cell<u32>>,
    acquisitions: Rc<Cell<u32>>,
}

impl RecordingHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Rc::new(Cell::new(Some((width, height)))),
            canvas: RecordingCanvas::new(),
            failures_left: Rc::new(Cell::new(0)),
            acquisitions: Rc::new(Cell::new(0)),
        }
    }

    pub fn set_container_size(&self, width: u32, height: u32) {
        self.size.set(Some((width, height)));
    }

    /// Simulate the container leaving the document.
    pub fn remove_container(&self) {
        self.size.set(None);
    }

    pub fn fail_next_acquisitions(&self, count: u32) {
        self.failures_left.set(count);
    }

    pub fn canvas(&self) -> RecordingCanvas {
        self.canvas.clone()
    }

    pub fn acquisitions(&self) -> u32 {
        self.acquisitions.get()
    }
}

impl SurfaceHost for RecordingHost {
    type Canvas = RecordingCanvas;

    fn container_size(&self) -> Option<(u32, u32)> {
        self.size.get()
    }

    fn acquire_canvas(&mut self) -> Result<RecordingCanvas> {
        let left = self.failures_left.get();
        if left > 0 {
            self.failures_left.set(left - 1);
            return Err(BackdropError::SurfaceUnavailable(
                "2d context refused".to_string(),
            ));
        }
        self.acquisitions.set(self.acquisitions.get() + 1);
        Ok(self.canvas.clone())
    }
}
