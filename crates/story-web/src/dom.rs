use anyhow::anyhow;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// DOM event listener that detaches itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        mut handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(
            Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(web::Event)>
        );
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Append a `<tag class="...">` to `parent` and return it.
pub fn append(
    document: &web::Document,
    parent: &web::Element,
    tag: &str,
    class: &str,
) -> anyhow::Result<web::Element> {
    let el = document.create_element(tag).map_err(js_err)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    parent.append_child(&el).map_err(js_err)?;
    Ok(el)
}

#[inline]
pub fn set_text(el: &web::Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Match the canvas backing store to its CSS size and return it in pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
    Vec2::new(canvas.width() as f32, canvas.height() as f32)
}

/// All elements under `document` carrying `attr`.
pub fn elements_with_attr(
    document: &web::Document,
    attr: &str,
) -> anyhow::Result<Vec<web::Element>> {
    let list = document
        .query_selector_all(&format!("[{attr}]"))
        .map_err(js_err)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::Element>().ok())
        .collect())
}
