use crate::constants::RESIZE_EVENT;
use crate::dom::EventListener;
use crate::surface::CanvasHost;
use backdrop_core::Mount;
use std::rc::{Rc, Weak};
use web_sys as web;

/// Re-measure the container on every window resize. The next frame draws at
/// the new size.
pub fn wire_resize(mount: &Rc<Mount<CanvasHost>>) -> anyhow::Result<EventListener> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let mount: Weak<Mount<CanvasHost>> = Rc::downgrade(mount);
    EventListener::new(window.as_ref(), RESIZE_EVENT, move |_ev: web::Event| {
        if let Some(mount) = mount.upgrade() {
            mount.resize();
        }
    })
}
