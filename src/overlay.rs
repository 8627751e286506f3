use crate::constants::{FLASH_OVERLAY_CSS, FLASH_OVERLAY_ID};
use haunt_core::FlashOverlay;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Red full-screen `<div>` whose opacity the jumpscare flashes.
pub struct FlashDiv {
    el: Option<web::HtmlElement>,
}

impl FlashDiv {
    /// Append the overlay to `<body>`. Without a body the flash is a no-op.
    pub fn mount(document: &web::Document) -> Self {
        let el = document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        let (Some(el), Some(body)) = (el, document.body()) else {
            log::warn!("[overlay] cannot create flash overlay");
            return Self { el: None };
        };
        el.set_id(FLASH_OVERLAY_ID);
        _ = el.set_attribute("style", FLASH_OVERLAY_CSS);
        _ = body.append_child(&el);
        Self { el: Some(el) }
    }
}

impl FlashOverlay for FlashDiv {
    fn set_opacity(&mut self, opacity: f32) {
        if let Some(el) = &self.el {
            _ = el.style().set_property("opacity", &opacity.to_string());
        }
    }
}
