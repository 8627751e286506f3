#![cfg(target_arch = "wasm32")]
use haunt_core::config::{HauntConfig, RngStream};
use haunt_core::constants::{AMBIENT_VOLUME, SCREAM_VOLUME};
use haunt_core::scene::haunted_house;
use haunt_core::{Cooldown, JumpscareSequencer, OrbitControls, PerspectiveCamera, SceneAnimator};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod timers;

type GpuHandle = Rc<RefCell<render::GpuState<'static>>>;

pub(crate) type WebSequencer =
    JumpscareSequencer<Rc<RefCell<OrbitControls>>, audio::ScreamVoice, overlay::FlashDiv, timers::WebTimers>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let query = web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let (config, warnings) = HauntConfig::from_query(&query);
    console_log::init_with_level(log::Level::Trace).ok();
    log::set_max_level(config.log_level);
    for w in &warnings {
        log::warn!("[config] {}", w);
    }
    log::info!("haunt-web starting ({:?})", config);

    spawn_local(async move {
        if let Err(e) = init(config).await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init(config: HauntConfig) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document)?;

    let viewport = dom::window_viewport(&window);
    dom::sync_canvas_backing_size(&canvas, &viewport);
    let viewport = Rc::new(RefCell::new(viewport));

    let layout = haunted_house(&mut config.rng(RngStream::Layout));
    log::info!(
        "[scene] {} nodes, {} textures",
        layout.nodes.len(),
        layout.texture_paths().len()
    );

    let gpu: GpuHandle = Rc::new(RefCell::new(frame::init_gpu(&canvas, &layout).await?));

    let aspect = viewport.borrow().aspect();
    let controls = Rc::new(RefCell::new(OrbitControls::new(PerspectiveCamera::new(aspect))));

    let audio_ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let scream = audio::ScreamVoice::new(&audio_ctx, SCREAM_VOLUME)
        .map_err(|_| anyhow::anyhow!("audio graph unavailable"))?;
    let flash = overlay::FlashDiv::mount(&document);

    let sequencer: Rc<RefCell<WebSequencer>> = Rc::new_cyclic(|weak| {
        RefCell::new(JumpscareSequencer::new(
            controls.clone(),
            scream,
            flash,
            timers::WebTimers::new(weak.clone()),
        ))
    });

    events::wire_resize(canvas.clone(), viewport.clone(), controls.clone());
    events::wire_orbit_input(events::OrbitWiring {
        canvas: canvas.clone(),
        controls: controls.clone(),
        audio_ctx: audio_ctx.clone(),
    });

    spawn_local(load_textures(gpu.clone(), layout.texture_paths()));
    spawn_local(load_ghost(gpu.clone(), sequencer.clone()));
    spawn_local(load_sounds(audio_ctx, sequencer.clone()));

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        gpu,
        controls,
        viewport,
        animator: SceneAnimator::new(layout.lights.clone(), config.rng(RngStream::Flicker)),
        sequencer,
        cooldown: Cooldown::new(),
        cooldown_rng: config.rng(RngStream::Cooldown),
        scares_enabled: config.scares_enabled,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Fetch maps one at a time; each lands on its materials as soon as it decodes.
async fn load_textures(gpu: GpuHandle, paths: Vec<&'static str>) {
    let mut loaded = 0usize;
    for path in &paths {
        match assets::load_texture(path).await {
            Ok(image) => {
                gpu.borrow_mut().install_texture(path, &image);
                loaded += 1;
            }
            Err(e) => log::warn!("[assets] {}; keeping fallback", e),
        }
    }
    log::info!("[assets] textures ready ({}/{})", loaded, paths.len());
}

async fn load_ghost(gpu: GpuHandle, sequencer: Rc<RefCell<WebSequencer>>) {
    match assets::load_model(constants::GHOST_MODEL_PATH).await {
        Ok(model) => {
            log::info!(
                "[assets] ghost model: {} parts, {} triangles",
                model.parts.len(),
                model.triangle_count()
            );
            gpu.borrow_mut().install_ghost(&model);
            sequencer.borrow_mut().attach_model();
        }
        Err(e) => log::error!("[assets] {}; jumpscares disabled", e),
    }
}

/// The scream clip doubles as a quiet ambient loop.
async fn load_sounds(audio_ctx: web::AudioContext, sequencer: Rc<RefCell<WebSequencer>>) {
    match audio::load_audio(&audio_ctx, constants::SCREAM_PATH).await {
        Ok(buffer) => {
            _ = audio::start_ambient_loop(&audio_ctx, &buffer, AMBIENT_VOLUME);
            sequencer.borrow_mut().audio_mut().set_buffer(buffer);
        }
        Err(e) => log::warn!("[audio] {}; running silent", e),
    }
}
