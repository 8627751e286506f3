// Host-side tests for the orbit camera and viewport sizing.

use glam::Vec3;
use haunt_core::constants::*;
use haunt_core::*;

fn controls() -> OrbitControls {
    OrbitControls::new(PerspectiveCamera::new(4.0 / 3.0))
}

fn distance(c: &OrbitControls) -> f32 {
    (c.camera().eye - c.camera().target).length()
}

#[test]
fn camera_starts_looking_at_origin() {
    let cam = PerspectiveCamera::new(1.5);
    assert_eq!(cam.eye, CAMERA_START);
    assert_eq!(cam.target, Vec3::ZERO);
    assert!((cam.forward().length() - 1.0).abs() < 1e-6);
    assert!((cam.fovy_radians - CAMERA_FOV_DEG.to_radians()).abs() < 1e-6);
}

#[test]
fn invalid_aspect_is_ignored() {
    let mut cam = PerspectiveCamera::new(1.5);
    cam.set_aspect(0.0);
    cam.set_aspect(f32::NAN);
    assert_eq!(cam.aspect, 1.5);
    cam.set_aspect(2.0);
    assert_eq!(cam.aspect, 2.0);
}

#[test]
fn view_proj_maps_target_to_screen_center() {
    let cam = PerspectiveCamera::new(1.0);
    let clip = cam.view_proj() * cam.target.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn idle_update_keeps_camera_still() {
    let mut c = controls();
    for _ in 0..10 {
        c.update();
    }
    assert!((c.camera().eye - CAMERA_START).length() < 1e-4);
}

#[test]
fn rotation_preserves_distance_and_settles() {
    let mut c = controls();
    let d0 = distance(&c);
    c.rotate(120.0, -40.0, 800.0);
    let mut last = c.camera().eye;
    for _ in 0..300 {
        c.update();
        assert!((distance(&c) - d0).abs() < 1e-3);
        last = c.camera().eye;
    }
    assert!((last - CAMERA_START).length() > 0.5);
    c.update();
    assert!((c.camera().eye - last).length() < 1e-4);
}

#[test]
fn polar_angle_never_flips_over_the_top() {
    let mut c = controls();
    c.rotate(0.0, 100_000.0, 600.0);
    for _ in 0..200 {
        c.update();
        let f = c.camera().forward();
        assert!(f.is_finite());
        assert!(c.camera().eye.y.is_finite());
    }
}

#[test]
fn wheel_dolly_moves_in_and_out() {
    let mut c = controls();
    let d0 = distance(&c);
    c.dolly(-100.0);
    c.update();
    assert!((distance(&c) - d0 * ORBIT_ZOOM_STEP).abs() < 1e-4);
    c.dolly(100.0);
    c.update();
    assert!((distance(&c) - d0).abs() < 1e-4);
}

#[test]
fn dolly_is_clamped_to_distance_limits() {
    let mut c = controls();
    for _ in 0..500 {
        c.dolly(-1.0);
        c.update();
    }
    assert!((distance(&c) - c.min_distance).abs() < 1e-4);
    for _ in 0..500 {
        c.dolly(1.0);
        c.update();
    }
    assert!((distance(&c) - c.max_distance).abs() < 1e-3);
}

#[test]
fn pan_moves_target_and_eye_together() {
    let mut c = controls();
    let offset0 = c.camera().eye - c.camera().target;
    c.pan(50.0, 0.0, 600.0);
    for _ in 0..200 {
        c.update();
    }
    let cam = c.camera();
    assert!(cam.target.length() > 0.1);
    assert!((cam.eye - cam.target - offset0).length() < 1e-3);
}

#[test]
fn controls_expose_camera_view() {
    let c = controls();
    assert_eq!(CameraView::eye(&c), CAMERA_START);
    assert_eq!(CameraView::forward(&c), c.camera().forward());
}

#[test]
fn viewport_clamps_pixel_ratio() {
    let vp = Viewport::new(800, 600, 3.0);
    assert_eq!(vp.pixel_ratio(), MAX_PIXEL_RATIO);
    assert_eq!(vp.drawing_buffer_size(), (1600, 1200));
    assert!((vp.aspect() - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn viewport_rejects_bad_inputs() {
    let vp = Viewport::new(0, 0, f64::NAN);
    assert_eq!((vp.width(), vp.height()), (1, 1));
    assert_eq!(vp.pixel_ratio(), 1.0);
    assert_eq!(vp.drawing_buffer_size(), (1, 1));
}

#[test]
fn fractional_ratio_floors_buffer_size() {
    let mut vp = Viewport::new(100, 100, 1.0);
    vp.resize(333, 101, 1.5);
    assert_eq!(vp.drawing_buffer_size(), (499, 151));
}

#[test]
fn resize_updates_camera_aspect_and_buffer_size() {
    let mut vp = Viewport::new(800, 600, 1.0);
    let mut c = OrbitControls::new(PerspectiveCamera::new(vp.aspect()));
    assert!((c.camera().aspect - 800.0 / 600.0).abs() < 1e-6);

    vp.resize(1920, 1080, 1.0);
    c.apply_viewport(&vp);
    assert!((c.camera().aspect - 1920.0 / 1080.0).abs() < 1e-6);
    assert_eq!(vp.drawing_buffer_size(), (1920, 1080));
    assert_eq!((vp.width(), vp.height()), (1920, 1080));
}
