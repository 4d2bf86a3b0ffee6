use crate::dom;
use crate::events::{self, WebListener};
use crate::surface::WebSurface;
use crate::WeakSlot;
use backdrop_core::{BackdropError, Host, HostEvent, Viewport};
use web_sys as web;

/// Browser window services backing the controller.
pub struct WebHost {
    pub window: web::Window,
    pub document: web::Document,
    slot: WeakSlot,
}

impl WebHost {
    pub fn new(window: web::Window, document: web::Document, slot: WeakSlot) -> Self {
        Self {
            window,
            document,
            slot,
        }
    }
}

impl Host for WebHost {
    type Target = web::Element;
    type Surface = WebSurface;
    type Listener = WebListener;

    fn viewport(&self) -> Viewport {
        dom::read_viewport(&self.window)
    }

    fn clock_sec(&self) -> f64 {
        js_sys::Date::now() / 1000.0
    }

    fn create_surface(
        &mut self,
        target: &web::Element,
        viewport: Viewport,
    ) -> Result<WebSurface, BackdropError> {
        WebSurface::attach(&self.document, target, viewport)
            .map_err(|e| BackdropError::SurfaceUnavailable(e.to_string()))
    }

    fn listen(&mut self, event: HostEvent) -> WebListener {
        events::listen(&self.window, event, self.slot.clone())
    }

    fn unlisten(&mut self, _event: HostEvent, listener: WebListener) {
        listener.remove(&self.window);
    }
}
