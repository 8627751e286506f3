//! Light rig: the fixed set of named lights the scene is lit by.

use crate::color::hex_linear;
use crate::constants::*;
use crate::jumpscare::GhostPose;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Distance at which the contribution reaches zero.
    pub range: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl DirectionalLight {
    /// Direction the light travels (from its position toward its target).
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Vec3,
    pub intensity: f32,
}

/// All lights in the scene. Field names are the light identities; the
/// animator mutates `door`, `moon` and `ghosts` every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub moon: DirectionalLight,
    pub door: PointLight,
    pub ghosts: [PointLight; 3],
}

impl LightRig {
    pub fn haunted() -> Self {
        let ghost = |hex: u32| PointLight {
            position: Vec3::ZERO,
            color: hex_linear(hex),
            intensity: GHOST_LIGHT_INTENSITY,
            range: GHOST_LIGHT_RANGE,
        };
        Self {
            ambient: AmbientLight {
                color: hex_linear(AMBIENT_COLOR),
                intensity: AMBIENT_INTENSITY,
            },
            moon: DirectionalLight {
                position: MOON_START,
                target: Vec3::ZERO,
                color: hex_linear(MOON_COLOR),
                intensity: MOON_INTENSITY,
            },
            door: PointLight {
                position: DOOR_LIGHT_POSITION,
                color: hex_linear(DOOR_LIGHT_COLOR),
                intensity: DOOR_LIGHT_BASE,
                range: DOOR_LIGHT_RANGE,
            },
            ghosts: [
                ghost(GHOST_LIGHT_COLORS[0]),
                ghost(GHOST_LIGHT_COLORS[1]),
                ghost(GHOST_LIGHT_COLORS[2]),
            ],
        }
    }

    /// Point lights to upload this frame. The red light parented to the
    /// jumpscare model only shines while the model is visible.
    pub fn point_lights(&self, ghost: Option<&GhostPose>) -> SmallVec<[PointLight; MAX_POINT_LIGHTS]> {
        let mut out: SmallVec<[PointLight; MAX_POINT_LIGHTS]> = SmallVec::new();
        out.push(self.door);
        out.extend(self.ghosts.iter().copied());
        if let Some(pose) = ghost.filter(|p| p.visible) {
            out.push(PointLight {
                position: pose.position,
                color: hex_linear(GHOST_MODEL_LIGHT_COLOR),
                intensity: GHOST_MODEL_LIGHT_INTENSITY,
                range: GHOST_MODEL_LIGHT_RANGE,
            });
        }
        out
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::haunted()
    }
}
