//! `setTimeout`-backed alarms.
//!
//! Timeout callbacks only queue the alarm; the frame loop polls the queue so
//! the session is never borrowed from inside a timer callback.

use app_core::{Alarm, Scheduler, TimerHandle};
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type FiredQueue = Rc<RefCell<SmallVec<[(TimerHandle, Alarm); 2]>>>;

pub struct BrowserScheduler {
    window: web::Window,
    next_id: u64,
    // timeout id plus the callback, kept alive until it runs or is cancelled
    pending: FnvHashMap<TimerHandle, (i32, Closure<dyn FnMut()>)>,
    fired: FiredQueue,
}

impl BrowserScheduler {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        Ok(Self {
            window,
            next_id: 0,
            pending: FnvHashMap::default(),
            fired: Rc::new(RefCell::new(SmallVec::new())),
        })
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule_once(&mut self, delay: Duration, alarm: Alarm) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let fired = self.fired.clone();
        let closure = Closure::wrap(Box::new(move || {
            fired.borrow_mut().push((handle, alarm));
        }) as Box<dyn FnMut()>);
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), ms)
        {
            Ok(id) => {
                self.pending.insert(handle, (id, closure));
            }
            Err(e) => log::error!("[timers] setTimeout for {:?} failed: {:?}", alarm, e),
        }
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some((id, _closure)) = self.pending.remove(&handle) {
            self.window.clear_timeout_with_handle(id);
        }
        self.fired.borrow_mut().retain(|(h, _)| *h != handle);
    }

    fn poll_fired(&mut self) -> Option<Alarm> {
        let (handle, alarm) = {
            let mut fired = self.fired.borrow_mut();
            if fired.is_empty() {
                return None;
            }
            fired.remove(0)
        };
        // the callback has run; its closure can go now
        self.pending.remove(&handle);
        Some(alarm)
    }
}
