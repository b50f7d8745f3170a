#![cfg(target_arch = "wasm32")]
use backdrop_core::Mount;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod options;
mod surface;

use dom::EventListener;
use frame::AnimationLoop;
use surface::CanvasHost;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("backdrop-web ready");
    Ok(())
}

/// Handle to a mounted backdrop. Unmounts on `unmount()` or when freed.
#[wasm_bindgen]
pub struct Backdrop {
    mount: Option<Rc<Mount<CanvasHost>>>,
    animation: Option<AnimationLoop>,
    listeners: Vec<EventListener>,
    canvas: Option<web::HtmlCanvasElement>,
}

#[wasm_bindgen]
impl Backdrop {
    /// Stop the animation, remove every listener and the canvas. Calling it
    /// again does nothing.
    pub fn unmount(&mut self) {
        if let Some(animation) = self.animation.take() {
            animation.stop();
        }
        self.listeners.clear();
        if let Some(mount) = self.mount.take() {
            mount.teardown();
        }
        if let Some(canvas) = self.canvas.take() {
            canvas.remove();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> Option<String> {
        self.mount.as_ref().map(|m| m.kind().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.mount.is_some()
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mount a generator of `kind` as a full-size canvas inside `container`.
///
/// `options` is a plain object with camelCase option names; omitted fields
/// take their defaults. Invalid options are reported here, before anything
/// is added to the page.
#[wasm_bindgen]
pub fn mount(
    container: web::HtmlElement,
    kind: &str,
    options: JsValue,
) -> Result<Backdrop, JsValue> {
    mount_inner(container, kind, &options).map_err(|e| {
        log::error!("[mount] {:#}", e);
        JsValue::from_str(&format!("{:#}", e))
    })
}

fn mount_inner(
    container: web::HtmlElement,
    kind: &str,
    options: &JsValue,
) -> anyhow::Result<Backdrop> {
    let config = options::stage_config(kind, options)?;
    let canvas = dom::create_canvas(&container, &config)?;
    let mount = Rc::new(Mount::new(CanvasHost::new(canvas.clone()), config));

    let mut listeners = Vec::new();
    match events::resize::wire_resize(&mount) {
        Ok(listener) => listeners.push(listener),
        Err(e) => log::warn!("[mount] {:#}; surface keeps its initial size", e),
    }
    if let Some(scope) = mount.pointer_scope() {
        match events::pointer::wire_pointermove(scope, &canvas, mount.pointer()) {
            Ok(listener) => listeners.push(listener),
            Err(e) => {
                log::warn!("[pointer] {:#}", e);
                mount.disable_pointer();
            }
        }
    }

    let animation = match AnimationLoop::start(&mount) {
        Ok(animation) => animation,
        Err(e) => {
            mount.teardown();
            canvas.remove();
            return Err(e);
        }
    };

    Ok(Backdrop {
        mount: Some(mount),
        animation: Some(animation),
        listeners,
        canvas: Some(canvas),
    })
}
