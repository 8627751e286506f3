use glam::Vec3;

/// Split a packed `0xRRGGBB` value into sRGB components in \[0, 1\].
#[inline]
pub fn hex_srgb(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Packed sRGB hex converted to linear RGB, the space the shader lights in.
#[inline]
pub fn hex_linear(hex: u32) -> Vec3 {
    let c = hex_srgb(hex);
    Vec3::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z))
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

