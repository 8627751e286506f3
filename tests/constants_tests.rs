// Host-side checks for the web front end's DOM hooks and asset paths.
// The main crate is wasm-only, so the constants file is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn canvas_selectors_target_a_canvas() {
    assert!(CANVAS_SELECTOR.starts_with("canvas"));
    assert_eq!(CANVAS_FALLBACK_SELECTOR, "canvas");
    assert_ne!(CANVAS_SELECTOR, CANVAS_FALLBACK_SELECTOR);
}

#[test]
fn flash_overlay_starts_invisible_and_ignores_input() {
    assert!(FLASH_OVERLAY_CSS.contains("opacity: 0;"));
    assert!(FLASH_OVERLAY_CSS.contains("pointer-events: none"));
    assert!(FLASH_OVERLAY_CSS.contains("background-color: red"));
    assert!(!FLASH_OVERLAY_ID.is_empty());
    assert!(!FLASH_OVERLAY_ID.contains(' '));
}

#[test]
fn assets_are_served_from_the_site_root() {
    for path in [GHOST_MODEL_PATH, SCREAM_PATH] {
        assert!(path.starts_with('/'), "{path}");
    }
    assert!(GHOST_MODEL_PATH.ends_with(".glb"));
}

#[test]
fn pointer_buttons_are_distinct() {
    assert_ne!(ROTATE_BUTTON, PAN_BUTTON);
}
