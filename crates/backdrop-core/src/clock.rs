//! Frame scheduling with race-free cancellation.
//!
//! The clock does not own a display loop. Whoever does (the browser's
//! `requestAnimationFrame`, a test) receives a [`FrameTicket`] from
//! [`FrameClock::start`] and hands it back to [`FrameClock::fire`] when the
//! frame comes due. `stop` invalidates every outstanding ticket, so a callback
//! that was already queued when the loop was stopped finds a stale ticket and
//! does nothing.

use crate::constants::{MAX_FRAME_DELTA_SECS, REFERENCE_FRAME_SECS};
use crate::error::Result;
use instant::Instant;
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// How per-frame increments relate to wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeStep {
    /// Scale increments by the measured frame delta (60 Hz = 1.0).
    #[default]
    Measured,
    /// One increment per tick regardless of refresh rate.
    Fixed,
}

impl TimeStep {
    pub fn step_for(self, delta_secs: f32) -> f32 {
        match self {
            TimeStep::Measured => delta_secs / REFERENCE_FRAME_SECS,
            TimeStep::Fixed => 1.0,
        }
    }
}

/// Timing handed to each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Zero-based index of this tick since `start`.
    pub frame: u64,
    /// Seconds since the first tick.
    pub elapsed: f32,
    /// Seconds since the previous tick, clamped to `MAX_FRAME_DELTA_SECS`.
    pub delta: f32,
    /// Multiplier for per-frame increments (see [`TimeStep`]).
    pub step: f32,
}

impl FrameTime {
    /// A nominal 60 Hz frame with `step == 1.0`.
    pub fn nominal(frame: u64) -> Self {
        Self {
            frame,
            elapsed: frame as f32 * REFERENCE_FRAME_SECS,
            delta: REFERENCE_FRAME_SECS,
            step: 1.0,
        }
    }
}

/// Permission to run one frame of a particular `start` generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

type TickFn = Box<dyn FnMut(&FrameTime) -> Result<()>>;

struct ClockInner {
    mode: TimeStep,
    live: Cell<bool>,
    generation: Cell<u64>,
    frames: Cell<u64>,
    first_at: Cell<Option<Instant>>,
    last_at: Cell<Option<Instant>>,
    tick: RefCell<Option<TickFn>>,
}

/// Cloning shares the same loop.
#[derive(Clone)]
pub struct FrameClock {
    inner: Rc<ClockInner>,
}

/// Non-owning view of a clock, for callbacks that must not keep it alive.
#[derive(Clone)]
pub struct ClockHandle {
    inner: Weak<ClockInner>,
}

impl ClockHandle {
    pub fn is_running(&self) -> bool {
        self.inner.upgrade().is_some_and(|c| c.live.get())
    }
}

impl FrameClock {
    pub fn new(mode: TimeStep) -> Self {
        Self {
            inner: Rc::new(ClockInner {
                mode,
                live: Cell::new(false),
                generation: Cell::new(0),
                frames: Cell::new(0),
                first_at: Cell::new(None),
                last_at: Cell::new(None),
                tick: RefCell::new(None),
            }),
        }
    }

    pub fn mode(&self) -> TimeStep {
        self.inner.mode
    }

    pub fn is_running(&self) -> bool {
        self.inner.live.get()
    }

    /// Frames executed since the last `start`.
    pub fn frames(&self) -> u64 {
        self.inner.frames.get()
    }

    pub fn handle(&self) -> ClockHandle {
        ClockHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Begin a loop driving `tick`, replacing any loop already running.
    /// Returns the ticket for the first frame.
    pub fn start(&self, tick: impl FnMut(&FrameTime) -> Result<()> + 'static) -> FrameTicket {
        let inner = &self.inner;
        if inner.live.get() {
            log::warn!("[clock] start while running; previous loop cancelled");
        }
        let generation = inner.generation.get() + 1;
        inner.generation.set(generation);
        inner.live.set(true);
        inner.frames.set(0);
        inner.first_at.set(None);
        inner.last_at.set(None);
        *inner.tick.borrow_mut() = Some(Box::new(tick));
        log::debug!("[clock] started generation {}", generation);
        FrameTicket { generation }
    }

    /// Stop the loop. No tick runs after this returns, including ones whose
    /// tickets were handed out before. Safe to call from inside a tick: the
    /// running tick completes and is then dropped.
    pub fn stop(&self) {
        let inner = &self.inner;
        if !inner.live.get() {
            return;
        }
        inner.live.set(false);
        inner.generation.set(inner.generation.get() + 1);
        // Busy only while the tick is checked out by `fire`, which drops it.
        if let Ok(mut slot) = inner.tick.try_borrow_mut() {
            slot.take();
        }
        log::debug!("[clock] stopped after {} frames", inner.frames.get());
    }

    /// Run one frame if `ticket` is still current.
    ///
    /// Returns the ticket to schedule the following frame with, or `None`
    /// when the loop has been stopped (the caller should stop rescheduling).
    /// An `Err` from the tick is logged and does not end the loop.
    pub fn fire(&self, ticket: FrameTicket, now: Instant) -> Option<FrameTicket> {
        if !self.accepts(ticket) {
            log::trace!("[clock] stale frame for generation {}", ticket.generation);
            return None;
        }
        let mut tick = self.inner.tick.borrow_mut().take()?;
        let time = self.advance_time(now);
        if let Err(e) = tick(&time) {
            log::error!("[clock] frame {} failed: {}", time.frame, e);
        }
        if !self.accepts(ticket) {
            return None;
        }
        *self.inner.tick.borrow_mut() = Some(tick);
        Some(ticket)
    }

    fn accepts(&self, ticket: FrameTicket) -> bool {
        self.inner.live.get() && self.inner.generation.get() == ticket.generation
    }

    fn advance_time(&self, now: Instant) -> FrameTime {
        let inner = &self.inner;
        let frame = inner.frames.get();
        inner.frames.set(frame + 1);

        let first = inner.first_at.get().unwrap_or(now);
        inner.first_at.set(Some(first));
        let delta = match inner.last_at.replace(Some(now)) {
            Some(prev) => secs_between(prev, now).min(MAX_FRAME_DELTA_SECS),
            None => REFERENCE_FRAME_SECS,
        };
        FrameTime {
            frame,
            elapsed: secs_between(first, now),
            delta,
            step: inner.mode.step_for(delta),
        }
    }
}

// `instant`'s wasm Instant has no saturating arithmetic.
#[inline]
fn secs_between(earlier: Instant, later: Instant) -> f32 {
    if later > earlier {
        (later - earlier).as_secs_f32()
    } else {
        0.0
    }
}
