use crate::audio;
use crate::constants::{PAN_BUTTON, ROTATE_BUTTON};
use haunt_core::OrbitControls;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragMode {
    Rotate,
    Pan,
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    pointer_id: i32,
    mode: DragMode,
    last: (f32, f32),
}

#[derive(Clone)]
pub struct OrbitWiring {
    pub canvas: web::HtmlCanvasElement,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub audio_ctx: web::AudioContext,
}

pub fn wire_orbit_input(w: OrbitWiring) {
    let drag: Rc<RefCell<Option<Drag>>> = Rc::new(RefCell::new(None));
    wire_pointerdown(&w, drag.clone());
    wire_pointermove(&w, drag.clone());
    wire_pointerup(&w, drag);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &OrbitWiring, drag: Rc<RefCell<Option<Drag>>>) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        audio::resume_if_suspended(&w2.audio_ctx);
        let mode = match ev.button() {
            PAN_BUTTON => DragMode::Pan,
            ROTATE_BUTTON if ev.shift_key() => DragMode::Pan,
            ROTATE_BUTTON => DragMode::Rotate,
            _ => return,
        };
        _ = w2.canvas.set_pointer_capture(ev.pointer_id());
        *drag.borrow_mut() = Some(Drag {
            pointer_id: ev.pointer_id(),
            mode,
            last: (ev.client_x() as f32, ev.client_y() as f32),
        });
    });
}

fn wire_pointermove(w: &OrbitWiring, drag: Rc<RefCell<Option<Drag>>>) {
    let w2 = w.clone();
    listen(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let mut drag = drag.borrow_mut();
        let Some(d) = drag.as_mut().filter(|d| d.pointer_id == ev.pointer_id()) else {
            return;
        };
        let pos = (ev.client_x() as f32, ev.client_y() as f32);
        let (dx, dy) = (pos.0 - d.last.0, pos.1 - d.last.1);
        d.last = pos;
        let h = w2.canvas.client_height() as f32;
        let mut controls = w2.controls.borrow_mut();
        match d.mode {
            DragMode::Rotate => controls.rotate(dx, dy, h),
            DragMode::Pan => controls.pan(dx, dy, h),
        }
    });
}

fn wire_pointerup(w: &OrbitWiring, drag: Rc<RefCell<Option<Drag>>>) {
    for name in ["pointerup", "pointercancel"] {
        let drag = drag.clone();
        let canvas = w.canvas.clone();
        listen(&w.canvas, name, move |ev: web::PointerEvent| {
            let mut drag = drag.borrow_mut();
            if drag.is_some_and(|d| d.pointer_id == ev.pointer_id()) {
                *drag = None;
                _ = canvas.release_pointer_capture(ev.pointer_id());
            }
        });
    }
}

fn wire_wheel(w: &OrbitWiring) {
    let controls = w.controls.clone();
    listen(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        controls.borrow_mut().dolly(ev.delta_y() as f32);
    });
}

fn wire_contextmenu(w: &OrbitWiring) {
    listen(&w.canvas, "contextmenu", move |ev: web::MouseEvent| {
        ev.prevent_default();
    });
}
