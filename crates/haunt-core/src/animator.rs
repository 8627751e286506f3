//! Per-frame light animation.
//!
//! Every animated value is a pure function of elapsed seconds, except the
//! door flicker which adds a uniform jitter drawn from the animator's RNG.

use crate::camera::PerspectiveCamera;
use crate::constants::*;
use crate::jumpscare::GhostPose;
use crate::lights::LightRig;
use glam::Vec3;
use rand::Rng;

/// Constants for one orbiting ghost light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostOrbit {
    /// Radians per second; negative orbits clockwise seen from above.
    pub angular_speed: f32,
    pub radius: f32,
    /// Frequency of a `sin` added to the x radius.
    pub radius_wobble_x: Option<f32>,
    /// Frequency of a `sin` added to the z radius.
    pub radius_wobble_z: Option<f32>,
    /// Height is the sum of `sin(t * f)` over these frequencies.
    pub bob_freqs: &'static [f32],
}

impl GhostOrbit {
    pub fn angle(&self, t: f32) -> f32 {
        t * self.angular_speed
    }

    pub fn position(&self, t: f32) -> Vec3 {
        let angle = self.angle(t);
        let wobble = |freq: Option<f32>| freq.map_or(0.0, |f| (t * f).sin());
        let rx = self.radius + wobble(self.radius_wobble_x);
        let rz = self.radius + wobble(self.radius_wobble_z);
        let y = self.bob_freqs.iter().map(|f| (t * f).sin()).sum();
        Vec3::new(angle.cos() * rx, y, angle.sin() * rz)
    }
}

pub const GHOST_ORBITS: [GhostOrbit; 3] = [
    GhostOrbit {
        angular_speed: 0.5,
        radius: 4.0,
        radius_wobble_x: None,
        radius_wobble_z: None,
        bob_freqs: &[3.0],
    },
    GhostOrbit {
        angular_speed: -0.32,
        radius: 5.0,
        radius_wobble_x: None,
        radius_wobble_z: None,
        bob_freqs: &[4.0, 2.5],
    },
    GhostOrbit {
        angular_speed: -0.18,
        radius: 7.0,
        radius_wobble_x: Some(0.32),
        radius_wobble_z: Some(0.5),
        bob_freqs: &[4.0, 2.5],
    },
];

/// Door light intensity. `jitter` must lie in `[-DOOR_JITTER_SPAN / 2, DOOR_JITTER_SPAN / 2)`.
pub fn door_light_intensity(t: f32, jitter: f32) -> f32 {
    DOOR_LIGHT_BASE + (t * DOOR_FLICKER_FREQ).sin() * DOOR_FLICKER_AMPLITUDE + jitter
}

/// Moonlight drifts on a horizontal circle; its height never changes.
pub fn moon_position(t: f32, height: f32) -> Vec3 {
    let a = t * MOON_ANGULAR_SPEED;
    Vec3::new(a.sin() * MOON_ORBIT_RADIUS, height, a.cos() * MOON_ORBIT_RADIUS)
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderFrame<'a> {
    pub elapsed: f32,
    pub camera: &'a PerspectiveCamera,
    pub lights: &'a LightRig,
    pub ghost: Option<&'a GhostPose>,
}

pub trait SceneRenderer {
    type Error;

    fn render(&mut self, frame: &RenderFrame<'_>) -> Result<(), Self::Error>;
}

pub struct SceneAnimator<R> {
    lights: LightRig,
    rng: R,
}

impl<R: Rng> SceneAnimator<R> {
    pub fn new(lights: LightRig, rng: R) -> Self {
        Self { lights, rng }
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    /// Recompute the animated lights for `elapsed` seconds.
    pub fn animate(&mut self, elapsed: f32) {
        let half = DOOR_JITTER_SPAN * 0.5;
        let jitter = self.rng.gen_range(-half..half);
        self.lights.door.intensity = door_light_intensity(elapsed, jitter);
        self.lights.moon.position = moon_position(elapsed, self.lights.moon.position.y);
        for (light, orbit) in self.lights.ghosts.iter_mut().zip(GHOST_ORBITS.iter()) {
            light.position = orbit.position(elapsed);
        }
    }

    /// Animate, then render exactly once.
    pub fn update<S: SceneRenderer>(
        &mut self,
        elapsed: f32,
        camera: &PerspectiveCamera,
        ghost: Option<&GhostPose>,
        renderer: &mut S,
    ) -> Result<(), S::Error> {
        self.animate(elapsed);
        renderer.render(&RenderFrame {
            elapsed,
            camera,
            lights: &self.lights,
            ghost,
        })
    }
}
