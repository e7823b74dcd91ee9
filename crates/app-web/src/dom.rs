use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Toggle an element through `data-visible`; the page stylesheet does the rest.
#[inline]
pub fn set_visible(document: &web::Document, element_id: &str, visible: bool) {
    set_data(document, element_id, "data-visible", if visible { "1" } else { "0" });
}

#[inline]
pub fn set_data(document: &web::Document, element_id: &str, attr: &str, value: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.set_attribute(attr, value);
    }
}

#[inline]
pub fn clear_data(document: &web::Document, element_id: &str, attr: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.remove_attribute(attr);
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

/// Clear `attr` on `element_id` after `delay_ms`.
pub fn clear_data_later(document: &web::Document, element_id: &str, attr: &str, delay_ms: i32) {
    let Some(window) = web::window() else {
        return;
    };
    let doc = document.clone();
    let id = element_id.to_owned();
    let attr = attr.to_owned();
    let cb = Closure::once_into_js(move || clear_data(&doc, &id, &attr));
    if let Err(e) =
        window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms)
    {
        log::warn!("[dom] setTimeout failed: {:?}", e);
    }
}
