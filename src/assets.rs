use haunt_core::assets::{decode_glb, decode_texture, ModelData, TextureImage};
use haunt_core::AssetError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn fetch_err(path: &str, reason: impl Into<String>) -> AssetError {
    AssetError::Fetch {
        path: path.to_string(),
        reason: reason.into(),
    }
}

pub(crate) async fn fetch_array_buffer(path: &str) -> Result<js_sys::ArrayBuffer, AssetError> {
    let window = web::window().ok_or_else(|| fetch_err(path, "no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| fetch_err(path, format!("{:?}", e)))?
        .dyn_into::<web::Response>()
        .map_err(|e| fetch_err(path, format!("{:?}", e)))?;
    if !resp.ok() {
        return Err(fetch_err(path, format!("HTTP {}", resp.status())));
    }
    let body = resp
        .array_buffer()
        .map_err(|e| fetch_err(path, format!("{:?}", e)))?;
    JsFuture::from(body)
        .await
        .map_err(|e| fetch_err(path, format!("{:?}", e)))?
        .dyn_into::<js_sys::ArrayBuffer>()
        .map_err(|e| fetch_err(path, format!("{:?}", e)))
}

pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>, AssetError> {
    let buf = fetch_array_buffer(path).await?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}

pub async fn load_texture(path: &str) -> Result<TextureImage, AssetError> {
    let bytes = fetch_bytes(path).await?;
    decode_texture(path, &bytes)
}

pub async fn load_model(path: &str) -> Result<ModelData, AssetError> {
    let bytes = fetch_bytes(path).await?;
    decode_glb(path, &bytes)
}
