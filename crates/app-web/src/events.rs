use crate::constants::CONTACT_MODAL_CLOSE_ID;
use crate::dom;
use crate::input::{self, InputAction};
use crate::overlay;
use crate::world::{JsTerrain, SharedSession, WebWorld};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub session: SharedSession,
    pub world: Rc<WebWorld>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_keydown(&w);
    wire_modal_close(&w);
}

fn dispatch(w: &InputWiring, action: InputAction) {
    let mut out = Vec::new();
    let (accepted, state) = {
        let mut s = w.session.borrow_mut();
        let accepted = match action {
            InputAction::Primary => s.on_cast_or_reel_or_dismiss(&JsTerrain, &mut out),
            InputAction::Dismiss => s.dismiss(&mut out),
        };
        (accepted, s.state())
    };
    if accepted {
        log::info!("[input] {:?} -> {:?}", action, state);
    }
    w.world.apply(&out);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if let Some(action) = input::action_for_pointer(ev.button(), ev.is_primary()) {
            dispatch(&w, action);
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_keydown(w: &InputWiring) {
    let Some(window) = web::window() else {
        return;
    };
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        let Some(action) = input::action_for_key(&ev.key(), ev.repeat()) else {
            return;
        };
        ev.prevent_default();
        // Escape closes the contact dialog before it dismisses anything
        if action == InputAction::Dismiss && !overlay::is_hidden(&w.document) {
            overlay::hide(&w.document);
            return;
        }
        dispatch(&w, action);
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_modal_close(w: &InputWiring) {
    let doc = w.document.clone();
    dom::add_click_listener(&w.document, CONTACT_MODAL_CLOSE_ID, move || {
        overlay::hide(&doc);
    });
}
