//! Error types shared by the core and the web frontend.
//!
//! Asset failures are recoverable: the caller logs them and runs without the
//! feature. A missing render target is not.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("fetch {path} failed: {reason}")]
    Fetch { path: String, reason: String },
    #[error("decode {path} failed: {reason}")]
    Decode { path: String, reason: String },
    #[error("model {path} unusable: {reason}")]
    Model { path: String, reason: String },
    #[error("audio {path} failed: {reason}")]
    Audio { path: String, reason: String },
}

impl AssetError {
    pub fn path(&self) -> &str {
        match self {
            AssetError::Fetch { path, .. }
            | AssetError::Decode { path, .. }
            | AssetError::Model { path, .. }
            | AssetError::Audio { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render target unavailable: {0}")]
    TargetUnavailable(String),
}
