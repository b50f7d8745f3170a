use crate::constants::CANVAS_LAYOUT_STYLE;
use backdrop_core::StageConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Inline style for a surface canvas.
pub fn canvas_style(claims_pointer: bool, opacity: f32) -> String {
    let pointer_events = if claims_pointer { "auto" } else { "none" };
    format!("{CANVAS_LAYOUT_STYLE};pointer-events:{pointer_events};opacity:{opacity}")
}

/// Create the surface canvas and append it to `container`.
pub fn create_canvas(
    container: &web::HtmlElement,
    config: &StageConfig,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let document = container
        .owner_document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas
        .set_attribute(
            "style",
            &canvas_style(config.claims_pointer(), config.layer_opacity()),
        )
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas
        .set_attribute("aria-hidden", "true")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Layout box of `element` in whole CSS pixels; `None` once it has left the
/// document.
pub fn layout_size(element: &web::Element) -> Option<(u32, u32)> {
    if !element.is_connected() {
        return None;
    }
    let rect = element.get_bounding_client_rect();
    Some((
        rect.width().max(0.0).round() as u32,
        rect.height().max(0.0).round() as u32,
    ))
}

/// A registered DOM listener, removed again when dropped.
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("{} listener: {:?}", kind, e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}
