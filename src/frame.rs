use crate::render;
use crate::WebSequencer;
use haunt_core::{Cooldown, OrbitControls, SceneAnimator, Viewport};
use instant::Instant;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub gpu: Rc<RefCell<render::GpuState<'static>>>,
    pub controls: Rc<RefCell<OrbitControls>>,
    pub viewport: Rc<RefCell<Viewport>>,
    pub animator: SceneAnimator<StdRng>,
    pub sequencer: Rc<RefCell<WebSequencer>>,
    pub cooldown: Cooldown,
    pub cooldown_rng: StdRng,
    pub scares_enabled: bool,
    pub started: Instant,
}

impl FrameContext {
    /// One display frame. Returns false once the render target is gone.
    pub fn frame(&mut self) -> bool {
        let elapsed = self.started.elapsed().as_secs_f32();

        let (buffer_w, buffer_h) = self.viewport.borrow().drawing_buffer_size();
        self.controls.borrow_mut().update();
        let camera = self.controls.borrow().camera().clone();
        let ghost = self.sequencer.borrow().ghost_pose().copied();

        {
            let mut gpu = self.gpu.borrow_mut();
            gpu.resize_if_needed(buffer_w, buffer_h);
            if let Err(e) = self.animator.update(elapsed, &camera, ghost.as_ref(), &mut *gpu) {
                log::error!("[render] {}; stopping", e);
                self.sequencer.borrow_mut().abort();
                return false;
            }
        }

        if self.scares_enabled && self.cooldown.poll(elapsed, &mut self.cooldown_rng) {
            let started = self.sequencer.borrow_mut().trigger();
            log::debug!("[jumpscare] attempt at {:.1}s, started={}", elapsed, started);
        }
        true
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    layout: &haunt_core::scene::SceneLayout,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    Ok(render::GpuState::new(leaked_canvas, layout).await?)
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        // a failed frame ends the loop: nothing reschedules
        if frame_ctx_tick.borrow_mut().frame() {
            request_frame(&tick_clone);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
