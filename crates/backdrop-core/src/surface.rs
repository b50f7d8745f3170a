//! Surface ownership: sizing the backing buffer to its container, acquiring
//! the drawing context lazily, and clearing before each frame.

use crate::canvas::Canvas;
use crate::error::Result;
use glam::Vec2;

/// The environment a surface lives in (a DOM container, a test harness).
pub trait SurfaceHost {
    type Canvas: Canvas;

    /// Current layout box of the container in pixels, or `None` when the
    /// container has gone away.
    fn container_size(&self) -> Option<(u32, u32)>;

    /// Obtain a drawing context. May fail transiently; the manager retries
    /// on the next frame.
    fn acquire_canvas(&mut self) -> Result<Self::Canvas>;
}

/// One frame's worth of drawing access, handed out only when the surface has
/// a context and a non-zero area.
pub struct SurfaceFrame<'a, C> {
    pub canvas: &'a mut C,
    pub size: Vec2,
}

pub struct SurfaceManager<H: SurfaceHost> {
    host: H,
    canvas: Option<H::Canvas>,
    width: u32,
    height: u32,
    acquire_failing: bool,
}

impl<H: SurfaceHost> SurfaceManager<H> {
    /// Wrap `host` and size the surface to its container straight away.
    pub fn new(host: H) -> Self {
        let mut surface = Self {
            host,
            canvas: None,
            width: 0,
            height: 0,
            acquire_failing: false,
        };
        surface.resize();
        surface
    }

    /// Match the backing buffer to the container's current box.
    ///
    /// Idempotent; returns `true` only when the size actually changed. A
    /// missing container collapses the surface to zero area.
    pub fn resize(&mut self) -> bool {
        let (width, height) = self.host.container_size().unwrap_or((0, 0));
        if (width, height) == (self.width, self.height) {
            return false;
        }
        log::debug!(
            "[surface] resize {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        if let Some(canvas) = &mut self.canvas {
            canvas.resize(width, height);
        }
        true
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn canvas(&self) -> Option<&H::Canvas> {
        self.canvas.as_ref()
    }

    /// Clear the whole buffer and hand out the canvas for this frame.
    ///
    /// Returns `None` (draw nothing) while no context can be acquired or the
    /// surface has zero area.
    pub fn begin_frame(&mut self) -> Option<SurfaceFrame<'_, H::Canvas>> {
        if !self.ensure_canvas() || !self.has_area() {
            return None;
        }
        let size = self.size();
        let canvas = self.canvas.as_mut()?;
        canvas.clear(size.x, size.y);
        Some(SurfaceFrame { canvas, size })
    }

    /// Drop the drawing context. A later frame re-acquires it.
    pub fn release(&mut self) {
        self.canvas = None;
    }

    fn ensure_canvas(&mut self) -> bool {
        if self.canvas.is_some() {
            return true;
        }
        match self.host.acquire_canvas() {
            Ok(mut canvas) => {
                if self.acquire_failing {
                    log::info!("[surface] drawing context acquired after retry");
                }
                self.acquire_failing = false;
                canvas.resize(self.width, self.height);
                self.canvas = Some(canvas);
                true
            }
            Err(e) => {
                if !self.acquire_failing {
                    log::warn!("[surface] {e}; retrying every frame");
                }
                self.acquire_failing = true;
                false
            }
        }
    }
}
