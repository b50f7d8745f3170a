use crate::surface::CanvasHost;
use backdrop_core::{FrameTicket, Mount};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct LoopInner {
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
    request: Cell<Option<i32>>,
}

impl LoopInner {
    fn schedule(&self) {
        let Some(window) = web::window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.request.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}

/// `requestAnimationFrame` driver for one mount. Holds only weak references,
/// so dropping the mount ends the loop on the next callback.
pub struct AnimationLoop {
    inner: Rc<LoopInner>,
}

impl AnimationLoop {
    pub fn start(mount: &Rc<Mount<CanvasHost>>) -> anyhow::Result<Self> {
        web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let inner = Rc::new(LoopInner {
            callback: RefCell::new(None),
            request: Cell::new(None),
        });

        let ticket: Cell<Option<FrameTicket>> = Cell::new(Some(mount.start()));
        let mount_weak: Weak<Mount<CanvasHost>> = Rc::downgrade(mount);
        let inner_weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move || {
            let (Some(mount), Some(inner)) = (mount_weak.upgrade(), inner_weak.upgrade()) else {
                return;
            };
            inner.request.set(None);
            let Some(current) = ticket.take() else {
                return;
            };
            if let Some(next) = mount.fire(current, Instant::now()) {
                ticket.set(Some(next));
                inner.schedule();
            }
        }) as Box<dyn FnMut()>);

        *inner.callback.borrow_mut() = Some(closure);
        inner.schedule();
        Ok(Self { inner })
    }

    /// Cancel the pending frame and drop the callback. Idempotent.
    pub fn stop(&self) {
        if let (Some(id), Some(window)) = (self.inner.request.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
        if let Ok(mut callback) = self.inner.callback.try_borrow_mut() {
            callback.take();
        }
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
