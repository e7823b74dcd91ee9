#![cfg(target_arch = "wasm32")]
mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod scheduler;
mod world;

use app_core::{FishingParams, FishingSession};
use constants::CANVAS_ID;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Keep the canvas backing store matched to CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas_resize);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())
            .ok();
        resize_closure.forget();
    }

    let session = Rc::new(RefCell::new(FishingSession::new(
        FishingParams::default(),
        scheduler::BrowserScheduler::new()?,
        StdRng::from_entropy(),
    )));
    let world = world::WebWorld::new(document.clone(), session.clone());
    world.render_ledger();
    overlay::hide(&document);
    {
        let s = session.borrow();
        let tip = s.start_position();
        log::info!(
            "[fishing] ready, rod tip=({:.2},{:.2},{:.2})",
            tip.x,
            tip.y,
            tip.z
        );
    }

    events::wire_input_handlers(events::InputWiring {
        canvas,
        document,
        session: session.clone(),
        world: world.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(session, world)));
    frame::start_loop(frame_ctx);
    Ok(())
}
