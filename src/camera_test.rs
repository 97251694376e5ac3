#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn new_camera_has_no_offset() {
    let cam = Camera::new(800.0, 600.0);
    assert_eq!((cam.offset_x, cam.offset_y), (0.0, 0.0));
    assert!(!cam.is_following());
}

#[test]
fn move_camera_accumulates() {
    let mut cam = Camera::new(800.0, 600.0);
    cam.move_camera(10.0, -5.0);
    cam.move_camera(2.0, 1.0);
    assert_eq!((cam.offset_x, cam.offset_y), (12.0, -4.0));
}

#[test]
fn focal_point_is_view_center() {
    let mut cam = Camera::new(800.0, 600.0);
    cam.move_camera(100.0, 50.0);
    assert_eq!(cam.focal_point(), Vector2::new(500.0, 350.0));
}

#[test]
fn update_without_follow_does_nothing() {
    let mut cam = Camera::new(800.0, 600.0);
    cam.update(Some(Vector2::new(5_000.0, 5_000.0)));
    assert_eq!((cam.offset_x, cam.offset_y), (0.0, 0.0));
}

#[test]
fn target_inside_wait_box_keeps_camera_still() {
    let mut cam = Camera::new(800.0, 600.0);
    cam.follow(100.0, 100.0);
    cam.update(Some(Vector2::new(450.0, 320.0)));
    assert_eq!((cam.offset_x, cam.offset_y), (0.0, 0.0));
}

#[test]
fn target_outside_wait_box_recenters() {
    let mut cam = Camera::new(800.0, 600.0);
    cam.follow(100.0, 100.0);
    cam.update(Some(Vector2::new(1_000.0, 300.0)));
    assert_eq!((cam.offset_x, cam.offset_y), (600.0, 0.0));
    assert_eq!(cam.focal_point(), Vector2::new(1_000.0, 300.0));
}

#[test]
fn zero_wait_box_tracks_every_move() {
    let mut cam = Camera::new(200.0, 100.0);
    cam.follow(0.0, 0.0);
    cam.update(Some(Vector2::new(150.0, 60.0)));
    assert_eq!((cam.offset_x, cam.offset_y), (50.0, 10.0));
}

#[test]
fn unfollow_stops_tracking() {
    let mut cam = Camera::new(200.0, 100.0);
    cam.follow(0.0, 0.0);
    cam.unfollow();
    cam.update(Some(Vector2::new(150.0, 60.0)));
    assert_eq!((cam.offset_x, cam.offset_y), (0.0, 0.0));
}

#[test]
fn screen_world_conversion_inverts() {
    let mut cam = Camera::new(800.0, 600.0);
    cam.move_camera(30.0, 40.0);
    let world = Vector2::new(100.0, 100.0);
    let screen = cam.world_to_screen(world);
    assert_eq!(screen, Vector2::new(70.0, 60.0));
    assert_eq!(cam.screen_to_world(screen), world);
}
