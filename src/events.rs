use crate::{dom, with_mounted, WeakSlot};
use backdrop_core::HostEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A window listener that stays registered until `remove` is called.
pub struct WebListener {
    event: HostEvent,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl WebListener {
    pub fn remove(self, window: &web::Window) {
        _ = window.remove_event_listener_with_callback(
            self.event.dom_name(),
            self.closure.as_ref().unchecked_ref(),
        );
        // closure dropped here
    }
}

/// Subscribe on the window; the canvas itself never receives pointer events.
pub fn listen(window: &web::Window, event: HostEvent, slot: WeakSlot) -> WebListener {
    let closure = match event {
        HostEvent::PointerMove => pointermove_closure(slot),
        HostEvent::Resize => resize_closure(slot),
    };
    if let Err(e) =
        window.add_event_listener_with_callback(event.dom_name(), closure.as_ref().unchecked_ref())
    {
        log::error!("[events] add {} failed: {:?}", event.dom_name(), e);
    }
    WebListener { event, closure }
}

fn pointermove_closure(slot: WeakSlot) -> Closure<dyn FnMut(web::Event)> {
    Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let (x, y) = (ev.client_x() as f32, ev.client_y() as f32);
        let hits = with_mounted(&slot, |m| m.backdrop.pointer_moved(x, y)).unwrap_or(0);
        if hits > 0 {
            log::trace!("[events] ripple hits={}", hits);
        }
    }) as Box<dyn FnMut(web::Event)>)
}

fn resize_closure(slot: WeakSlot) -> Closure<dyn FnMut(web::Event)> {
    Closure::wrap(Box::new(move |_ev: web::Event| {
        with_mounted(&slot, |m| {
            let viewport = dom::read_viewport(&m.host.window);
            m.backdrop.resized(viewport);
        });
    }) as Box<dyn FnMut(web::Event)>)
}
