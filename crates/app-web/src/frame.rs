use crate::world::{SharedSession, WebWorld};
use app_core::WorldRequest;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub session: SharedSession,
    pub world: Rc<WebWorld>,
    pub started: Instant,
    pub out: Vec<WorldRequest>,
}

impl FrameContext {
    pub fn new(session: SharedSession, world: Rc<WebWorld>) -> Self {
        Self {
            session,
            world,
            started: Instant::now(),
            out: Vec::with_capacity(8),
        }
    }

    pub fn frame(&mut self) {
        let now = self.started.elapsed().as_secs_f64();
        self.out.clear();
        // alarms first, so this tick sees any transition they cause
        let (pose, spin) = {
            let mut s = self.session.borrow_mut();
            s.pump_timers(&mut self.out);
            s.on_tick(now, &mut self.out);
            (s.marker(), s.catch_spin(now))
        };
        self.world.apply(&self.out);
        self.world.publish_marker(pose, spin);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
