use crate::constants::{CANVAS_FALLBACK_SELECTOR, CANVAS_SELECTOR};
use haunt_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The scene canvas, or the first canvas on the page.
pub fn find_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = [CANVAS_SELECTOR, CANVAS_FALLBACK_SELECTOR]
        .iter()
        .find_map(|sel| document.query_selector(sel).ok().flatten())
        .ok_or_else(|| anyhow::anyhow!("missing {}", CANVAS_SELECTOR))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

/// Viewport for the current window size and device pixel ratio.
pub fn window_viewport(window: &web::Window) -> Viewport {
    let css = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    Viewport::new(
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w_px, h_px) = viewport.drawing_buffer_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width()));
    _ = style.set_property("height", &format!("{}px", viewport.height()));
}
