//! Timed jumpscare sequence.
//!
//! A trigger parks the ghost model in front of the camera, flashes the red
//! overlay, plays the scream and pulses the model's scale until a revert
//! timer hides it again. The sequencer never reads a clock itself; all
//! progress comes from [`TimerEvent`]s delivered by its [`TimerHost`].

use crate::constants::*;
use crate::timers::{TimerEvent, TimerHost, TimerId, VirtualTimers};
use glam::{Mat3, Mat4, Quat, Vec3};
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;

pub trait CameraView {
    fn eye(&self) -> Vec3;
    /// Unit view direction.
    fn forward(&self) -> Vec3;
}

impl<T: CameraView> CameraView for Rc<RefCell<T>> {
    fn eye(&self) -> Vec3 {
        self.borrow().eye()
    }

    fn forward(&self) -> Vec3 {
        self.borrow().forward()
    }
}

pub trait ScreamAudio {
    /// False until the clip has decoded; playback calls are skipped until then.
    fn is_loaded(&self) -> bool;
    /// Start the clip from its beginning, cutting off any earlier playback.
    fn play(&mut self);
    fn is_playing(&self) -> bool;
    fn stop(&mut self);
}

pub trait FlashOverlay {
    fn set_opacity(&mut self, opacity: f32);
}

/// World transform of the jumpscare model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostPose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub visible: bool,
}

impl GhostPose {
    pub fn hidden() -> Self {
        Self {
            position: GHOST_MODEL_START,
            rotation: Quat::IDENTITY,
            scale: GHOST_MODEL_SCALE,
            visible: false,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

impl Default for GhostPose {
    fn default() -> Self {
        Self::hidden()
    }
}

/// Rotation that turns an object's +Z axis from `from` toward `to`.
pub fn look_at_rotation(from: Vec3, to: Vec3, up: Vec3) -> Quat {
    let mut z = (to - from).normalize_or_zero();
    if z == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut x = up.cross(z);
    if x.length_squared() < 1e-12 {
        // looking straight along `up`
        if up.z.abs() > 0.999 {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JumpscareState {
    pub active: bool,
    pub model_loaded: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Idle,
    Active {
        pulse: TimerId,
        flash: TimerId,
        revert: TimerId,
        pulse_time: f32,
    },
}

pub struct JumpscareSequencer<C, A, O, T> {
    camera: C,
    audio: A,
    overlay: O,
    timers: T,
    pose: Option<GhostPose>,
    phase: Phase,
}

impl<C, A, O, T> JumpscareSequencer<C, A, O, T>
where
    C: CameraView,
    A: ScreamAudio,
    O: FlashOverlay,
    T: TimerHost,
{
    pub fn new(camera: C, audio: A, overlay: O, timers: T) -> Self {
        Self {
            camera,
            audio,
            overlay,
            timers,
            pose: None,
            phase: Phase::Idle,
        }
    }

    /// Mark the ghost model as loaded. Later calls are ignored.
    pub fn attach_model(&mut self) {
        if self.pose.is_none() {
            self.pose = Some(GhostPose::hidden());
            log::info!("[jumpscare] ghost model ready");
        }
    }

    pub fn state(&self) -> JumpscareState {
        JumpscareState {
            active: matches!(self.phase, Phase::Active { .. }),
            model_loaded: self.pose.is_some(),
        }
    }

    pub fn ghost_pose(&self) -> Option<&GhostPose> {
        self.pose.as_ref()
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Start a jumpscare. Returns false (and does nothing) while the model
    /// is missing or a jumpscare is already running.
    pub fn trigger(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        let Some(pose) = self.pose.as_mut() else {
            return false;
        };
        log::info!("[jumpscare] triggered");

        let eye = self.camera.eye();
        pose.position = eye + self.camera.forward() * SCARE_DISTANCE;
        pose.rotation = look_at_rotation(pose.position, eye, Vec3::Y);
        pose.visible = true;

        self.overlay.set_opacity(FLASH_OPACITY);
        let flash = self.timers.once(FLASH_DURATION_MS, TimerEvent::FlashRevert);

        if self.audio.is_loaded() {
            self.audio.play();
        }

        let pulse = self.timers.repeat(PULSE_PERIOD_MS, TimerEvent::PulseTick);
        let revert = self.timers.once(SCARE_DURATION_MS, TimerEvent::Revert);
        self.phase = Phase::Active {
            pulse,
            flash,
            revert,
            pulse_time: 0.0,
        };
        true
    }

    pub fn on_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::FlashRevert => self.overlay.set_opacity(0.0),
            TimerEvent::PulseTick => {
                let Phase::Active { pulse_time, .. } = &mut self.phase else {
                    return;
                };
                if let Some(pose) = self.pose.as_mut().filter(|p| p.visible) {
                    *pulse_time += PULSE_STEP;
                    pose.scale = GHOST_MODEL_SCALE + (*pulse_time * PULSE_FREQ).sin() * PULSE_AMPLITUDE;
                }
            }
            TimerEvent::Revert => self.revert(),
        }
    }

    /// Cancel everything in flight and return to idle.
    pub fn abort(&mut self) {
        if let Phase::Active { flash, .. } = self.phase {
            self.timers.cancel(flash);
            self.overlay.set_opacity(0.0);
        }
        self.revert();
    }

    fn revert(&mut self) {
        let Phase::Active { pulse, revert, .. } = self.phase else {
            return;
        };
        if let Some(pose) = self.pose.as_mut() {
            pose.visible = false;
            pose.scale = GHOST_MODEL_SCALE;
        }
        self.timers.cancel(pulse);
        self.timers.cancel(revert);
        if self.audio.is_loaded() && self.audio.is_playing() {
            self.audio.stop();
        }
        self.phase = Phase::Idle;
    }
}

impl<C, A, O> JumpscareSequencer<C, A, O, VirtualTimers>
where
    C: CameraView,
    A: ScreamAudio,
    O: FlashOverlay,
{
    /// Run every virtual timer due within the next `ms` milliseconds.
    pub fn advance_by(&mut self, ms: u64) {
        let until = self.timers.now_ms() + ms;
        while let Some(event) = self.timers.pop_due(until) {
            self.on_timer(event);
        }
        self.timers.set_now(until);
    }
}

/// Caller-side trigger window: fires once `elapsed` runs past a fresh
/// random threshold in `[15, 30)` seconds since the last attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cooldown {
    last_trigger_time: f32,
}

impl Cooldown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_trigger_time(&self) -> f32 {
        self.last_trigger_time
    }

    /// True when a trigger should be attempted. The window resets whether
    /// or not the attempt actually starts a jumpscare.
    pub fn poll<R: Rng>(&mut self, elapsed: f32, rng: &mut R) -> bool {
        let window = COOLDOWN_MIN_SEC + rng.gen::<f32>() * COOLDOWN_SPAN_SEC;
        if elapsed - self.last_trigger_time > window {
            self.last_trigger_time = elapsed;
            true
        } else {
            false
        }
    }
}
