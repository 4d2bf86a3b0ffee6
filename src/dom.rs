use crate::constants::CANVAS_STYLE;
use backdrop_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// CSS viewport size and device pixel ratio.
pub fn read_viewport(window: &web::Window) -> Viewport {
    let css = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    Viewport::new(
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

pub fn create_backdrop_canvas(
    document: &web::Document,
    viewport: Viewport,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas
        .set_attribute("style", CANVAS_STYLE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    _ = canvas.set_attribute("aria-hidden", "true");
    sync_canvas_backing_size(&canvas, viewport);
    Ok(canvas)
}

/// Keep the drawing buffer at CSS size * devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    let (w_px, h_px) = viewport.physical_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
}
