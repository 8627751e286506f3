// Host-side tests for the jumpscare sequence, driven by virtual timers.

use glam::Vec3;
use haunt_core::constants::*;
use haunt_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

struct FixedCamera {
    eye: Vec3,
    target: Vec3,
}

impl CameraView for FixedCamera {
    fn eye(&self) -> Vec3 {
        self.eye
    }

    fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }
}

#[derive(Default)]
struct FakeAudio {
    loaded: bool,
    playing: bool,
    plays: u32,
    stops: u32,
}

impl ScreamAudio for FakeAudio {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn play(&mut self) {
        self.plays += 1;
        self.playing = true;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.playing = false;
    }
}

#[derive(Default)]
struct RecordingOverlay {
    history: Vec<f32>,
}

impl FlashOverlay for RecordingOverlay {
    fn set_opacity(&mut self, opacity: f32) {
        self.history.push(opacity);
    }
}

type TestSequencer = JumpscareSequencer<FixedCamera, FakeAudio, RecordingOverlay, VirtualTimers>;

fn make_sequencer(model: bool, audio_loaded: bool) -> TestSequencer {
    let camera = FixedCamera {
        eye: CAMERA_START,
        target: Vec3::ZERO,
    };
    let audio = FakeAudio {
        loaded: audio_loaded,
        ..Default::default()
    };
    let mut seq = JumpscareSequencer::new(camera, audio, RecordingOverlay::default(), VirtualTimers::new());
    if model {
        seq.attach_model();
    }
    seq
}

fn pose(seq: &TestSequencer) -> GhostPose {
    *seq.ghost_pose().expect("model attached")
}

fn expected_scale(ticks: u32) -> f32 {
    let mut t = 0.0_f32;
    for _ in 0..ticks {
        t += PULSE_STEP;
    }
    GHOST_MODEL_SCALE + (t * PULSE_FREQ).sin() * PULSE_AMPLITUDE
}

#[test]
fn trigger_without_model_does_nothing() {
    let mut seq = make_sequencer(false, true);
    assert!(!seq.trigger());
    assert_eq!(seq.state(), JumpscareState { active: false, model_loaded: false });
    assert!(seq.overlay().history.is_empty());
    assert_eq!(seq.timers().active_count(), 0);
}

#[test]
fn attached_model_starts_hidden_at_base_scale() {
    let seq = make_sequencer(true, false);
    let p = pose(&seq);
    assert!(!p.visible);
    assert_eq!(p.scale, GHOST_MODEL_SCALE);
    assert!(seq.state().model_loaded);
}

#[test]
fn trigger_places_ghost_in_front_of_camera_facing_it() {
    let mut seq = make_sequencer(true, true);
    assert!(seq.trigger());
    let p = pose(&seq);
    let forward = (Vec3::ZERO - CAMERA_START).normalize();
    let expected = CAMERA_START + forward * SCARE_DISTANCE;
    assert!(p.visible);
    assert!((p.position - expected).length() < 1e-5, "{:?}", p.position);
    // the model's +Z axis points back at the camera
    let facing = p.rotation * Vec3::Z;
    let to_eye = (CAMERA_START - p.position).normalize();
    assert!(facing.dot(to_eye) > 0.9999, "facing {facing:?}");
}

#[test]
fn trigger_flashes_plays_and_schedules_timers() {
    let mut seq = make_sequencer(true, true);
    assert!(seq.trigger());
    assert_eq!(seq.overlay().history, vec![FLASH_OPACITY]);
    assert_eq!(seq.audio_mut().plays, 1);
    // flash revert, pulse interval, sequence revert
    assert_eq!(seq.timers().active_count(), 3);
    assert!(seq.state().active);
}

#[test]
fn second_trigger_while_active_is_rejected() {
    let mut seq = make_sequencer(true, true);
    assert!(seq.trigger());
    seq.advance_by(200);
    assert!(!seq.trigger());
    assert_eq!(seq.audio_mut().plays, 1);
    assert_eq!(seq.overlay().history.len(), 2);
}

#[test]
fn full_sequence_pulses_then_reverts() {
    let mut seq = make_sequencer(true, true);
    assert!(seq.trigger());

    seq.advance_by(50);
    // ticks at 16, 32, 48
    assert!((pose(&seq).scale - expected_scale(3)).abs() < 1e-4);
    assert_eq!(seq.overlay().history, vec![FLASH_OPACITY]);

    seq.advance_by(60);
    assert_eq!(seq.overlay().history, vec![FLASH_OPACITY, 0.0]);
    assert!((pose(&seq).scale - expected_scale(6)).abs() < 1e-4);
    assert!(seq.state().active);

    seq.advance_by(900);
    let p = pose(&seq);
    assert!(!p.visible);
    assert_eq!(p.scale, GHOST_MODEL_SCALE);
    assert!(!seq.state().active);
    assert_eq!(seq.timers().active_count(), 0);
    assert_eq!(seq.audio_mut().stops, 1);
}

#[test]
fn revert_lands_exactly_at_scare_duration() {
    let mut seq = make_sequencer(true, false);
    seq.trigger();
    seq.advance_by(SCARE_DURATION_MS as u64 - 1);
    assert!(seq.state().active);
    assert!(pose(&seq).visible);
    seq.advance_by(1);
    assert!(!seq.state().active);
    assert!(!pose(&seq).visible);
}

#[test]
fn pulse_phase_restarts_on_each_trigger() {
    let mut seq = make_sequencer(true, false);
    seq.trigger();
    seq.advance_by(SCARE_DURATION_MS as u64 + 10);
    assert!(seq.trigger());
    seq.advance_by(16);
    assert!((pose(&seq).scale - expected_scale(1)).abs() < 1e-5);
}

#[test]
fn missing_audio_skips_playback_only() {
    let mut seq = make_sequencer(true, false);
    assert!(seq.trigger());
    assert_eq!(seq.audio_mut().plays, 0);
    assert!(pose(&seq).visible);
    seq.advance_by(2000);
    assert_eq!(seq.audio_mut().stops, 0);
}

#[test]
fn finished_scream_is_not_stopped_again() {
    let mut seq = make_sequencer(true, true);
    seq.trigger();
    seq.audio_mut().playing = false;
    seq.advance_by(1500);
    assert_eq!(seq.audio_mut().stops, 0);
}

#[test]
fn abort_cancels_everything() {
    let mut seq = make_sequencer(true, true);
    seq.trigger();
    seq.advance_by(40);
    seq.abort();
    assert_eq!(seq.overlay().history.last(), Some(&0.0));
    assert!(!pose(&seq).visible);
    assert_eq!(seq.timers().active_count(), 0);
    assert!(!seq.state().active);
    // idle abort is harmless
    seq.abort();
    assert_eq!(seq.timers().active_count(), 0);
}

#[test]
fn attach_model_twice_keeps_first_pose() {
    let mut seq = make_sequencer(true, false);
    seq.trigger();
    seq.attach_model();
    assert!(pose(&seq).visible);
}

#[test]
fn look_at_handles_vertical_direction() {
    let q = look_at_rotation(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
    let z = q * Vec3::Z;
    assert!(z.is_finite());
    assert!(z.dot(Vec3::Y) > 0.999);
    assert_eq!(look_at_rotation(Vec3::ONE, Vec3::ONE, Vec3::Y), glam::Quat::IDENTITY);
}

#[test]
fn hidden_pose_matrix_uses_base_scale() {
    let m = GhostPose::hidden().model_matrix();
    let (scale, _, translation) = m.to_scale_rotation_translation();
    assert!((scale - Vec3::splat(GHOST_MODEL_SCALE)).length() < 1e-6);
    assert_eq!(translation, GHOST_MODEL_START);
}

#[test]
fn cooldown_waits_at_least_minimum_window() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut cd = Cooldown::new();
    for t in [0.0, 5.0, 10.0, COOLDOWN_MIN_SEC] {
        assert!(!cd.poll(t, &mut rng), "fired at {t}");
    }
    assert!(cd.poll(COOLDOWN_MIN_SEC + COOLDOWN_SPAN_SEC + 0.1, &mut rng));
    assert_eq!(cd.last_trigger_time(), COOLDOWN_MIN_SEC + COOLDOWN_SPAN_SEC + 0.1);
    assert!(!cd.poll(COOLDOWN_MIN_SEC + COOLDOWN_SPAN_SEC + 5.0, &mut rng));
}

#[test]
fn cooldown_fires_within_maximum_window() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut cd = Cooldown::new();
    let mut fired_at = None;
    let mut t = 0.0_f32;
    while t < 40.0 {
        if cd.poll(t, &mut rng) {
            fired_at = Some(t);
            break;
        }
        t += 1.0 / 60.0;
    }
    let fired_at = fired_at.expect("cooldown never fired");
    assert!(fired_at > COOLDOWN_MIN_SEC);
    assert!(fired_at <= COOLDOWN_MIN_SEC + COOLDOWN_SPAN_SEC + 0.1);
}

#[test]
fn virtual_timers_fire_in_due_order_and_cancel() {
    let mut timers = VirtualTimers::new();
    let late = timers.once(30, TimerEvent::Revert);
    let early = timers.once(10, TimerEvent::FlashRevert);
    let tick = timers.repeat(0, TimerEvent::PulseTick);
    assert_eq!(timers.pop_due(1), Some(TimerEvent::PulseTick));
    assert_eq!(timers.now_ms(), 1);
    timers.cancel(tick);
    assert_eq!(timers.pop_due(20), Some(TimerEvent::FlashRevert));
    assert!(!timers.is_pending(early));
    assert_eq!(timers.pop_due(20), None);
    assert!(timers.is_pending(late));
    timers.cancel(late);
    timers.cancel(late);
    assert_eq!(timers.active_count(), 0);
}

#[test]
fn retrigger_while_active_leaves_pose_alone() {
    let camera = Rc::new(RefCell::new(FixedCamera {
        eye: CAMERA_START,
        target: Vec3::ZERO,
    }));
    let audio = FakeAudio {
        loaded: true,
        ..Default::default()
    };
    let mut seq = JumpscareSequencer::new(camera.clone(), audio, RecordingOverlay::default(), VirtualTimers::new());
    seq.attach_model();
    assert!(seq.trigger());
    let first = *seq.ghost_pose().unwrap();

    camera.borrow_mut().eye = Vec3::new(-9.0, 1.0, 0.0);
    seq.advance_by(500);
    assert!(!seq.trigger());

    let second = *seq.ghost_pose().unwrap();
    assert_eq!(second.position, first.position);
    assert_eq!(second.rotation, first.rotation);
    assert!(second.visible);
    assert_eq!(seq.audio_mut().plays, 1);
    assert_eq!(seq.overlay().history, vec![FLASH_OPACITY, 0.0]);

    seq.advance_by(600);
    let done = *seq.ghost_pose().unwrap();
    assert!(!done.visible);
    assert_eq!(done.scale, GHOST_MODEL_SCALE);
    assert!(!seq.state().active);
}

#[test]
fn cooldown_never_fires_inside_minimum_window() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cd = Cooldown::new();
        let mut t = 0.0_f32;
        while t <= COOLDOWN_MIN_SEC {
            assert!(!cd.poll(t, &mut rng), "seed {seed} fired at {t}");
            t += 1.0 / 60.0;
        }
        assert!(!cd.poll(COOLDOWN_MIN_SEC, &mut rng), "seed {seed} fired at the boundary");
        assert_eq!(cd.last_trigger_time(), 0.0);
    }
}
