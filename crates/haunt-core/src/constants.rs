use glam::Vec3;

// Shared scene/animation tuning constants used by the web frontend.

// Atmosphere
pub const FOG_COLOR: u32 = 0x262837;
pub const FOG_NEAR: f32 = 1.0;
pub const FOG_FAR: f32 = 15.0;

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START: Vec3 = Vec3::new(4.0, 2.0, 5.0);
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // dolly scale per wheel notch
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 40.0;

// Door light flicker
pub const DOOR_LIGHT_BASE: f32 = 1.0;
pub const DOOR_FLICKER_FREQ: f32 = 10.0;
pub const DOOR_FLICKER_AMPLITUDE: f32 = 0.1;
pub const DOOR_JITTER_SPAN: f32 = 0.1; // jitter is uniform in [-span/2, span/2)

// Moon drift
pub const MOON_ORBIT_RADIUS: f32 = 5.0;
pub const MOON_ANGULAR_SPEED: f32 = 0.1;
pub const MOON_START: Vec3 = Vec3::new(4.0, 5.0, -2.0);

// Lights
pub const AMBIENT_COLOR: u32 = 0xb9d5ff;
pub const AMBIENT_INTENSITY: f32 = 0.12;
pub const MOON_COLOR: u32 = 0xb9d5ff;
pub const MOON_INTENSITY: f32 = 0.12;
pub const DOOR_LIGHT_COLOR: u32 = 0xff7d46;
pub const DOOR_LIGHT_RANGE: f32 = 7.0;
pub const DOOR_LIGHT_POSITION: Vec3 = Vec3::new(0.0, 2.2, 2.7);
pub const GHOST_LIGHT_COLORS: [u32; 3] = [0xff00ff, 0x00ffff, 0xffff00];
pub const GHOST_LIGHT_INTENSITY: f32 = 2.0;
pub const GHOST_LIGHT_RANGE: f32 = 3.0;
pub const MAX_POINT_LIGHTS: usize = 8;

// Jumpscare model
pub const GHOST_MODEL_SCALE: f32 = 2.0;
pub const GHOST_MODEL_START: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const GHOST_MODEL_LIGHT_COLOR: u32 = 0xff0000;
pub const GHOST_MODEL_LIGHT_INTENSITY: f32 = 5.0;
pub const GHOST_MODEL_LIGHT_RANGE: f32 = 10.0;

// Jumpscare timing (milliseconds unless noted)
pub const SCARE_DISTANCE: f32 = 3.0; // world units in front of the camera
pub const SCARE_DURATION_MS: u32 = 1000;
pub const FLASH_OPACITY: f32 = 0.7;
pub const FLASH_DURATION_MS: u32 = 100;
pub const PULSE_PERIOD_MS: u32 = 16;
pub const PULSE_STEP: f32 = 0.1; // pulse phase advance per tick, not per second
pub const PULSE_FREQ: f32 = 10.0;
pub const PULSE_AMPLITUDE: f32 = 0.3;

// Cooldown window (seconds): next scare after min + U[0,1) * span
pub const COOLDOWN_MIN_SEC: f32 = 15.0;
pub const COOLDOWN_SPAN_SEC: f32 = 15.0;

// Graves
pub const GRAVE_COUNT: usize = 50;
pub const GRAVE_MIN_RADIUS: f32 = 3.0;
pub const GRAVE_RADIUS_SPAN: f32 = 6.0;
pub const GRAVE_HEIGHT: f32 = 0.3;
pub const GRAVE_TILT: f32 = 0.4;

// Materials
pub const ROOF_COLOR: u32 = 0xb35f45;
pub const BUSH_COLOR: u32 = 0x89c854;
pub const GRAVE_COLOR: u32 = 0xb2b6b1;
pub const GRASS_REPEAT: f32 = 8.0;
pub const DOOR_DISPLACEMENT_SCALE: f32 = 0.1;
pub const DOOR_SEGMENTS: u32 = 100;

// Audio
pub const AMBIENT_VOLUME: f32 = 0.1;
pub const SCREAM_VOLUME: f32 = 0.8;
