use eunoia_core::{Scheduler, Task};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A queued `setTimeout`. The callback lives as long as the handle, so a
/// cancelled timeout frees its closure instead of leaking it.
pub struct Timeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

/// `setTimeout`-backed scheduler.
#[derive(Clone)]
pub struct BrowserScheduler {
    window: web::Window,
}

impl BrowserScheduler {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay: Duration, task: Task) -> Option<Timeout> {
        let callback = Closure::once(move || task());
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                ms,
            ) {
            Ok(id) => Some(Timeout {
                id,
                _callback: callback,
            }),
            Err(e) => {
                log::error!("[timers] setTimeout failed: {:?}", e);
                None
            }
        }
    }

    fn cancel(&self, handle: Timeout) {
        self.window.clear_timeout_with_handle(handle.id);
    }
}
