mod pointer;

pub use pointer::{wire_orbit_input, OrbitWiring};

use crate::dom;
use haunt_core::{OrbitControls, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track window size and pixel ratio; the frame loop picks the change up.
pub fn wire_resize(
    canvas: web::HtmlCanvasElement,
    viewport: Rc<RefCell<Viewport>>,
    controls: Rc<RefCell<OrbitControls>>,
) {
    let resize_closure = Closure::wrap(Box::new(move || {
        let Some(window) = web::window() else {
            return;
        };
        let next = dom::window_viewport(&window);
        *viewport.borrow_mut() = next;
        controls.borrow_mut().apply_viewport(&next);
        dom::sync_canvas_backing_size(&canvas, &next);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
