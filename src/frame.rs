use crate::WeakSlot;
use backdrop_core::{with_slot, LoopToken};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop driving `Backdrop::frame`.
pub struct FrameLoop {
    window: web::Window,
    tick: TickCell,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(window: web::Window, token: LoopToken, slot: WeakSlot) -> Self {
        let tick: TickCell = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let tick_weak = Rc::downgrade(&tick);
        let pending_in = pending.clone();
        let window_in = window.clone();
        let mut last_instant = Instant::now();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_in.set(None);
            if !token.is_active() {
                return;
            }
            let now = Instant::now();
            let dt = now - last_instant;
            last_instant = now;

            let keep_going = with_slot(&slot, |m| m.backdrop.frame(dt)).keep_running();
            if !keep_going || !token.is_active() {
                log::debug!("[frame] loop stopped");
                return;
            }
            if let Some(tick) = tick_weak.upgrade() {
                if let Some(cb) = tick.borrow().as_ref() {
                    schedule(&window_in, cb, &pending_in);
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = tick.borrow().as_ref() {
            schedule(&window, cb, &pending);
        }
        Self {
            window,
            tick,
            pending,
        }
    }

    /// Cancel the outstanding frame request and drop the callback.
    pub fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            _ = self.window.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn schedule(window: &web::Window, cb: &Closure<dyn FnMut()>, pending: &Cell<Option<i32>>) {
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => pending.set(Some(id)),
        Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
    }
}
