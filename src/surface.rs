use crate::dom;
use crate::render::GpuState;
use backdrop_core::{BackdropError, Camera, Scene, Surface, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Backdrop canvas plus the WebGPU state that draws into it.
///
/// The canvas is attached synchronously; the GPU state arrives later from an
/// async init task. Frames before that only advance the scene.
pub struct WebSurface {
    canvas: web::HtmlCanvasElement,
    gpu: Rc<RefCell<Option<GpuState>>>,
    released: Rc<Cell<bool>>,
}

impl WebSurface {
    pub fn attach(
        document: &web::Document,
        target: &web::Element,
        viewport: Viewport,
    ) -> anyhow::Result<Self> {
        let canvas = dom::create_backdrop_canvas(document, viewport)?;
        target
            .append_child(&canvas)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let gpu = Rc::new(RefCell::new(None));
        let released = Rc::new(Cell::new(false));
        {
            let canvas = canvas.clone();
            let gpu = gpu.clone();
            let released = released.clone();
            spawn_local(async move {
                match GpuState::new(canvas).await {
                    // Unmounted while the adapter was pending
                    Ok(state) if released.get() => state.destroy(),
                    Ok(state) => *gpu.borrow_mut() = Some(state),
                    Err(e) => log::error!("[gpu] init error: {:?}", e),
                }
            });
        }

        Ok(Self {
            canvas,
            gpu,
            released,
        })
    }
}

impl Surface for WebSurface {
    fn resize(&mut self, viewport: Viewport) {
        if self.released.get() {
            return;
        }
        dom::sync_canvas_backing_size(&self.canvas, viewport);
        if let Some(gpu) = self.gpu.borrow_mut().as_mut() {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn draw(&mut self, scene: &mut Scene, camera: &Camera) -> Result<(), BackdropError> {
        if self.released.get() {
            return Ok(());
        }
        let mut gpu = self.gpu.borrow_mut();
        let Some(gpu) = gpu.as_mut() else {
            return Ok(());
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        gpu.render(scene, camera)
            .map_err(|e| BackdropError::Render(e.to_string()))
    }

    fn release(&mut self) {
        if self.released.replace(true) {
            return;
        }
        if let Some(gpu) = self.gpu.borrow_mut().take() {
            gpu.destroy();
        }
        self.canvas.remove();
    }
}
