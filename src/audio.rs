use crate::assets::fetch_array_buffer;
use haunt_core::{AssetError, ScreamAudio};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("[audio] {} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

pub async fn load_audio(audio_ctx: &web::AudioContext, path: &str) -> Result<web::AudioBuffer, AssetError> {
    let audio_err = |e: wasm_bindgen::JsValue| AssetError::Audio {
        path: path.to_string(),
        reason: format!("{:?}", e),
    };
    let data = fetch_array_buffer(path).await?;
    let promise = audio_ctx.decode_audio_data(&data).map_err(audio_err)?;
    JsFuture::from(promise)
        .await
        .map_err(audio_err)?
        .dyn_into::<web::AudioBuffer>()
        .map_err(audio_err)
}

/// Browsers start contexts suspended until a user gesture.
pub fn resume_if_suspended(audio_ctx: &web::AudioContext) {
    if audio_ctx.state() != web::AudioContextState::Running {
        _ = audio_ctx.resume();
    }
}

#[allow(deprecated)]
fn start_source(
    audio_ctx: &web::AudioContext,
    buffer: &web::AudioBuffer,
    dest: &web::GainNode,
    looping: bool,
) -> Result<web::AudioBufferSourceNode, wasm_bindgen::JsValue> {
    let src = audio_ctx.create_buffer_source()?;
    src.set_buffer(Some(buffer));
    src.set_loop(looping);
    src.connect_with_audio_node(dest)?;
    src.start()?;
    Ok(src)
}

/// Loop `buffer` quietly for the rest of the session.
pub fn start_ambient_loop(audio_ctx: &web::AudioContext, buffer: &web::AudioBuffer, volume: f32) -> Result<(), ()> {
    let gain = create_gain(audio_ctx, volume, "ambient")?;
    _ = gain.connect_with_audio_node(&audio_ctx.destination());
    start_source(audio_ctx, buffer, &gain, true)
        .map(|_| log::info!("[audio] ambient loop started"))
        .map_err(|e| log::error!("[audio] ambient start error: {:?}", e))
}

/// One-shot scream. Each play starts a fresh source node and stops the previous one.
pub struct ScreamVoice {
    audio_ctx: web::AudioContext,
    gain: web::GainNode,
    buffer: Option<web::AudioBuffer>,
    source: Option<web::AudioBufferSourceNode>,
    started_at: f64,
}

impl ScreamVoice {
    pub fn new(audio_ctx: &web::AudioContext, volume: f32) -> Result<Self, ()> {
        let gain = create_gain(audio_ctx, volume, "scream")?;
        _ = gain.connect_with_audio_node(&audio_ctx.destination());
        Ok(Self {
            audio_ctx: audio_ctx.clone(),
            gain,
            buffer: None,
            source: None,
            started_at: 0.0,
        })
    }

    pub fn set_buffer(&mut self, buffer: web::AudioBuffer) {
        self.buffer = Some(buffer);
        log::info!("[audio] scream loaded");
    }
}

impl ScreamAudio for ScreamVoice {
    fn is_loaded(&self) -> bool {
        self.buffer.is_some()
    }

    fn play(&mut self) {
        let Some(buffer) = &self.buffer else {
            return;
        };
        self.stop();
        match start_source(&self.audio_ctx, buffer, &self.gain, false) {
            Ok(src) => {
                self.source = Some(src);
                self.started_at = self.audio_ctx.current_time();
            }
            Err(e) => log::error!("[audio] scream start error: {:?}", e),
        }
    }

    fn is_playing(&self) -> bool {
        match (&self.source, &self.buffer) {
            (Some(_), Some(buffer)) => self.audio_ctx.current_time() < self.started_at + buffer.duration(),
            _ => false,
        }
    }

    #[allow(deprecated)]
    fn stop(&mut self) {
        if let Some(src) = self.source.take() {
            _ = src.stop();
        }
    }
}
