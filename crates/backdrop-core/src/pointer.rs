//! Damped pointer tracking.
//!
//! Raw pointer events write `target` immediately; `current` chases it only
//! when a frame calls [`PointerTracker::advance`], which keeps the visuals
//! independent of event jitter and event rate.

use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// A tracker shared between an event listener and the frame loop of one
/// mounted instance.
pub type SharedPointer = Rc<RefCell<PointerTracker>>;

#[derive(Clone, Debug)]
pub struct PointerTracker {
    target: Vec2,
    current: Vec2,
    attached: bool,
}

impl PointerTracker {
    /// Start with both `target` and `current` at `initial` (normalized).
    pub fn new(initial: Vec2) -> Self {
        Self {
            target: initial,
            current: initial,
            attached: true,
        }
    }

    pub fn shared(initial: Vec2) -> SharedPointer {
        Rc::new(RefCell::new(Self::new(initial)))
    }

    /// Record a raw pointer position given in surface pixels.
    ///
    /// Normalized against `surface`, so the surface spans \[0, 1\]². A
    /// pointer outside the surface keeps its true position outside that
    /// range. Ignored while the surface has no area or after
    /// [`detach`](Self::detach).
    pub fn on_move(&mut self, raw: Vec2, surface: Vec2) {
        if surface.x <= 0.0 || surface.y <= 0.0 {
            return;
        }
        self.set_target(raw / surface);
    }

    /// Record an already-normalized position.
    pub fn set_target(&mut self, uv: Vec2) {
        if !self.attached || !uv.is_finite() {
            return;
        }
        self.target = uv;
    }

    /// Move `current` toward `target` by `dampening` of the remaining gap.
    /// `dampening` is clamped into (0, 1]; non-finite values snap.
    pub fn advance(&mut self, dampening: f32) {
        let k = if dampening.is_finite() {
            dampening.clamp(f32::MIN_POSITIVE, 1.0)
        } else {
            1.0
        };
        self.current += (self.target - self.current) * k;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// `current` in surface pixels.
    pub fn current_px(&self, surface: Vec2) -> Vec2 {
        self.current * surface
    }

    /// Stop accepting movement; used on teardown once listeners are gone.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}
