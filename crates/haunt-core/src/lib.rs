pub mod animator;
pub mod assets;
pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod jumpscare;
pub mod lights;
pub mod scene;
pub mod timers;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use animator::*;
pub use camera::*;
pub use error::*;
pub use jumpscare::*;
pub use lights::*;
pub use timers::*;
