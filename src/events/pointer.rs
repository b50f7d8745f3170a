use crate::constants::POINTER_MOVE_EVENT;
use crate::dom::EventListener;
use backdrop_core::{PointerScope, SharedPointer};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer position relative to `canvas`, plus the canvas box it is
/// measured against, both in CSS pixels.
fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let raw = Vec2::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
    );
    let surface = Vec2::new(rect.width() as f32, rect.height() as f32);
    (raw, surface)
}

/// Feed `pointermove` events into `pointer`. Window scope listens anywhere
/// on the page; surface scope only over the canvas.
pub fn wire_pointermove(
    scope: PointerScope,
    canvas: &web::HtmlCanvasElement,
    pointer: SharedPointer,
) -> anyhow::Result<EventListener> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let target: &web::EventTarget = match scope {
        PointerScope::Window => window.as_ref(),
        PointerScope::Surface => canvas.as_ref(),
    };
    let canvas = canvas.clone();
    EventListener::new(target, POINTER_MOVE_EVENT, move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let (raw, surface) = pointer_canvas_px(ev, &canvas);
        if let Ok(mut tracker) = pointer.try_borrow_mut() {
            tracker.on_move(raw, surface);
        }
    })
}
