//! Camera, orbit controls and viewport bookkeeping.
//!
//! These types avoid platform APIs; the web frontend feeds them pointer
//! deltas and window sizes and reads matrices back out.

use crate::constants::*;
use crate::jumpscare::CameraView;
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

/// Right-handed perspective camera.
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: CAMERA_START,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    fn camera_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(s * self.theta.sin(), self.phi.cos() * self.radius, s * self.theta.cos())
    }
}

/// Damped orbit around a target point.
///
/// Input handlers accumulate deltas; [`OrbitControls::update`] must run
/// once per frame to apply a damped share of them and move the camera.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    camera: PerspectiveCamera,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
    pub damping: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitControls {
    pub fn new(camera: PerspectiveCamera) -> Self {
        Self {
            camera,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            damping: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
        }
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Match the camera's aspect to a resized viewport.
    pub fn apply_viewport(&mut self, viewport: &Viewport) {
        self.camera.set_aspect(viewport.aspect());
    }

    /// Drag by `(dx, dy)` CSS pixels; a drag of the full viewport height
    /// is one full turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx / h * self.rotate_speed;
        self.delta_phi -= TAU * dy / h * self.rotate_speed;
    }

    /// Screen-space pan; content under the pointer follows the drag.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let distance = (self.camera.eye - self.camera.target).length()
            * (self.camera.fovy_radians * 0.5).tan();
        let left = self.camera.right() * (-2.0 * dx * distance / h);
        let up = self.camera.camera_up() * (2.0 * dy * distance / h);
        self.pan_offset += left + up;
    }

    /// Wheel input: negative `delta_y` moves toward the target.
    pub fn dolly(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.scale *= ORBIT_ZOOM_STEP;
        } else if delta_y > 0.0 {
            self.scale /= ORBIT_ZOOM_STEP;
        }
    }

    pub fn update(&mut self) {
        let target = self.camera.target;
        let mut spherical = Spherical::from_offset(self.camera.eye - target);
        spherical.theta += self.delta_theta * self.damping;
        spherical.phi += self.delta_phi * self.damping;
        spherical.phi = spherical.phi.clamp(1e-6, PI - 1e-6);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.camera.target = target + self.pan_offset * self.damping;
        self.camera.eye = self.camera.target + spherical.to_offset();

        let keep = 1.0 - self.damping;
        self.delta_theta *= keep;
        self.delta_phi *= keep;
        self.pan_offset *= keep;
        self.scale = 1.0;
    }
}

impl CameraView for OrbitControls {
    fn eye(&self) -> Vec3 {
        self.camera.eye
    }

    fn forward(&self) -> Vec3 {
        self.camera.forward()
    }
}

/// Drawing-surface size derived from the window's CSS size and pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f64,
}

impl Viewport {
    pub fn new(css_width: u32, css_height: u32, device_pixel_ratio: f64) -> Self {
        let mut vp = Self {
            width: 1,
            height: 1,
            pixel_ratio: 1.0,
        };
        vp.resize(css_width, css_height, device_pixel_ratio);
        vp
    }

    pub fn resize(&mut self, css_width: u32, css_height: u32, device_pixel_ratio: f64) {
        self.width = css_width.max(1);
        self.height = css_height.max(1);
        self.pixel_ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        };
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Backing-store size in physical pixels.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let w = (self.width as f64 * self.pixel_ratio).floor().max(1.0) as u32;
        let h = (self.height as f64 * self.pixel_ratio).floor().max(1.0) as u32;
        (w, h)
    }
}
