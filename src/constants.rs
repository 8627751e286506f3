/// DOM hooks and asset locations for the web front end.
///
/// Kept free of web-sys types so host tests can include this file directly.
// Canvas lookup: class selector first, then the first canvas on the page
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const CANVAS_FALLBACK_SELECTOR: &str = "canvas";

// Full-viewport red flash shown during a jumpscare
pub const FLASH_OVERLAY_ID: &str = "jumpscare-flash";
pub const FLASH_OVERLAY_CSS: &str = "position: fixed; top: 0; left: 0; width: 100vw; height: 100vh; \
background-color: red; opacity: 0; pointer-events: none; z-index: 9999; transition: opacity 0.1s;";

// Assets served next to the page
pub const GHOST_MODEL_PATH: &str = "/ghost.glb";
pub const SCREAM_PATH: &str = "/scream.mp3";

// Pointer buttons (MouseEvent.button)
pub const ROTATE_BUTTON: i16 = 0;
pub const PAN_BUTTON: i16 = 2;
