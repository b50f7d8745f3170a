//! Wiring of one mounted instance: a surface, a generator, a damped pointer
//! and the clock that drives them.

use crate::clock::{FrameClock, FrameTicket, FrameTime, TimeStep};
use crate::constants::WIREFRAME_LAYER_OPACITY;
use crate::error::Result;
use crate::generators::{
    Generator, GeneratorConfig, GeneratorKind, PointerScope, RippleConfig,
};
use crate::pointer::{PointerTracker, SharedPointer};
use crate::surface::{SurfaceHost, SurfaceManager};
use instant::Instant;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;

/// Options shared by every generator kind.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CommonOptions {
    time_step: TimeStep,
}

#[derive(Clone, Debug)]
pub struct StageConfig {
    pub generator: GeneratorConfig,
    pub time_step: TimeStep,
}

impl StageConfig {
    pub fn new(generator: GeneratorConfig) -> Self {
        Self {
            generator,
            time_step: TimeStep::default(),
        }
    }

    pub fn with_time_step(mut self, time_step: TimeStep) -> Self {
        self.time_step = time_step;
        self
    }

    /// Parse a generator `kind` name plus its JSON options object.
    pub fn from_json(kind: &str, json: &str) -> Result<Self> {
        let kind: GeneratorKind = kind.parse()?;
        let common: CommonOptions = serde_json::from_str(json)?;
        let generator = GeneratorConfig::from_json(kind, json)?;
        Ok(Self {
            generator,
            time_step: common.time_step,
        })
    }

    pub fn kind(&self) -> GeneratorKind {
        self.generator.kind()
    }

    /// Whether the surface element must receive pointer events itself.
    pub fn claims_pointer(&self) -> bool {
        matches!(
            self.generator,
            GeneratorConfig::RippleGrid(RippleConfig {
                mouse_interaction: true,
                ..
            })
        )
    }

    /// Element opacity of the mounted surface.
    pub fn layer_opacity(&self) -> f32 {
        match self.generator {
            GeneratorConfig::Wireframe(_) => WIREFRAME_LAYER_OPACITY,
            _ => 1.0,
        }
    }
}

/// The per-frame part of a mount: everything a tick touches.
pub struct Stage<H: SurfaceHost> {
    surface: SurfaceManager<H>,
    generator: Option<Box<dyn Generator>>,
    pointer: SharedPointer,
}

impl<H: SurfaceHost> Stage<H> {
    pub fn new(host: H, generator: Box<dyn Generator>, pointer: SharedPointer) -> Self {
        Self {
            surface: SurfaceManager::new(host),
            generator: Some(generator),
            pointer,
        }
    }

    /// Advance the damped pointer and let the generator draw one frame.
    /// A frame without a drawable surface is skipped; the loop keeps going.
    pub fn frame(&mut self, time: &FrameTime) -> Result<()> {
        let Some(generator) = self.generator.as_mut() else {
            return Ok(());
        };
        let pointer = {
            let mut tracker = self.pointer.borrow_mut();
            tracker.advance(generator.pointer_dampening());
            tracker.current()
        };
        let Some(frame) = self.surface.begin_frame() else {
            return Ok(());
        };
        generator.tick(time, pointer, frame.canvas, frame.size)
    }

    pub fn resize(&mut self) -> bool {
        self.surface.resize()
    }

    pub fn surface(&self) -> &SurfaceManager<H> {
        &self.surface
    }

    pub fn generator_name(&self) -> Option<&'static str> {
        self.generator.as_ref().map(|g| g.name())
    }

    pub fn pointer_scope(&self) -> Option<PointerScope> {
        self.generator.as_ref().and_then(|g| g.pointer_scope())
    }

    pub fn disable_pointer(&mut self) {
        if let Some(generator) = self.generator.as_mut() {
            generator.disable_pointer();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.generator.is_none()
    }

    /// Drop the simulation and the drawing context. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(generator) = self.generator.take() {
            log::debug!("[mount] releasing {}", generator.name());
        }
        self.surface.release();
        if let Ok(mut tracker) = self.pointer.try_borrow_mut() {
            tracker.detach();
        }
    }
}

/// A mounted instance. Owns the clock; the display loop that feeds it frames
/// lives with the caller (see [`Mount::start`] and [`Mount::fire`]).
pub struct Mount<H: SurfaceHost + 'static> {
    clock: FrameClock,
    stage: Rc<RefCell<Stage<H>>>,
    pointer: SharedPointer,
    kind: GeneratorKind,
}

impl<H: SurfaceHost + 'static> Mount<H> {
    pub fn new(host: H, config: StageConfig) -> Self {
        let kind = config.kind();
        let pointer = PointerTracker::shared(config.generator.initial_pointer());
        let stage = Stage::new(host, config.generator.build(), Rc::clone(&pointer));
        log::info!(
            "[mount] {} ({:?} time step) at {:?}",
            kind,
            config.time_step,
            stage.surface().size()
        );
        Self {
            clock: FrameClock::new(config.time_step),
            stage: Rc::new(RefCell::new(stage)),
            pointer,
            kind,
        }
    }

    /// Start the loop and return the ticket for the first frame.
    pub fn start(&self) -> FrameTicket {
        let stage = Rc::clone(&self.stage);
        let clock = self.clock.handle();
        self.clock.start(move |time| {
            let mut stage = stage.borrow_mut();
            let result = stage.frame(time);
            // Stopped from inside the frame: nothing else will release it.
            if !clock.is_running() {
                stage.teardown();
            }
            result
        })
    }

    /// Run the frame for `ticket`; `None` means stop rescheduling.
    pub fn fire(&self, ticket: FrameTicket, now: Instant) -> Option<FrameTicket> {
        self.clock.fire(ticket, now)
    }

    /// Resize signal from the host.
    pub fn resize(&self) -> bool {
        match self.stage.try_borrow_mut() {
            Ok(mut stage) => stage.resize(),
            Err(_) => false,
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }

    pub fn pointer(&self) -> SharedPointer {
        Rc::clone(&self.pointer)
    }

    pub fn stage(&self) -> &Rc<RefCell<Stage<H>>> {
        &self.stage
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn pointer_scope(&self) -> Option<PointerScope> {
        self.stage.borrow().pointer_scope()
    }

    /// Fall back to pointer-free rendering, e.g. after a listener failed to
    /// register.
    pub fn disable_pointer(&self) {
        log::warn!("[pointer] {} continues without pointer interaction", self.kind);
        self.stage.borrow_mut().disable_pointer();
        self.pointer.borrow_mut().detach();
    }

    /// Stop the loop and release the simulation. Safe to call more than once
    /// and from inside a frame.
    pub fn teardown(&self) {
        let was_running = self.clock.is_running();
        self.clock.stop();
        if let Ok(mut tracker) = self.pointer.try_borrow_mut() {
            tracker.detach();
        }
        // Busy only when called from inside a frame, which tears down itself.
        if let Ok(mut stage) = self.stage.try_borrow_mut() {
            stage.teardown();
        }
        if was_running {
            log::info!("[mount] {} unmounted", self.kind);
        }
    }
}

impl<H: SurfaceHost + 'static> Drop for Mount<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
