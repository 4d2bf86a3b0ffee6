// Host-side tests for pointer rays, star picking and the ripple displacement.

use backdrop_core::*;
use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0, 1.0)
}

fn make_scene() -> Scene {
    let mut rng = StdRng::seed_from_u64(42);
    Scene::build(SceneParams::default(), &mut rng, 1_000.0)
}

/// NDC of the first star that projects inside the view in front of the camera.
fn visible_star(scene: &Scene, camera: &Camera) -> (usize, Vec2) {
    let vp = camera.view_proj() * scene.model_matrix();
    for i in 0..scene.stars().len() {
        let p = scene.stars().position(i);
        let clip = vp * p.extend(1.0);
        if clip.w <= 0.5 {
            continue;
        }
        let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
        if ndc.x.abs() < 0.9 && ndc.y.abs() < 0.9 {
            return (i, ndc);
        }
    }
    panic!("no visible star");
}

#[test]
fn client_to_ndc_maps_corners() {
    let v = viewport();
    assert_eq!(v.client_to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
    assert_eq!(v.client_to_ndc(1280.0, 720.0), Vec2::new(1.0, -1.0));
    let mid = v.client_to_ndc(640.0, 360.0);
    assert!(mid.length() < 1e-6);
}

#[test]
fn center_ray_points_at_origin() {
    let camera = Camera::backdrop(&viewport());
    let ray = camera.ray_from_ndc(Vec2::ZERO);
    assert_eq!(ray.origin, Vec3::new(0.0, 0.0, CAMERA_Z));
    assert!((ray.dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4);
}

#[test]
fn ray_through_projected_point_passes_through_it() {
    let camera = Camera::backdrop(&viewport());
    let target = Vec3::new(1.5, -0.75, -2.0);
    let clip = camera.view_proj() * target.extend(1.0);
    let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
    let ray = camera.ray_from_ndc(ndc);
    let closest = ray.closest_point(target);
    assert!(closest.distance(target) < 1e-3);
}

#[test]
fn pick_points_respects_threshold_and_orders_hits() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
    let positions = [
        0.5, 0.0, -3.0, // near the ray, far away
        0.0, 0.2, 0.0, // near the ray, closer
        3.0, 0.0, 0.0, // off to the side
    ];
    let hits = pick_points(&ray, &positions, &Mat4::IDENTITY, 1.0);
    let indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
    assert_eq!(indices, vec![1, 0]);
    assert!((hits[0].distance - 5.0).abs() < 1e-4);
    assert!((hits[1].distance_to_ray - 0.5).abs() < 1e-4);
}

#[test]
fn pick_points_clamps_behind_origin() {
    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
    // Behind the origin: distance is measured to the origin itself.
    let near_behind = [0.0, 0.0, 0.5];
    let far_behind = [0.0, 0.0, 3.0];
    assert_eq!(pick_points(&ray, &near_behind, &Mat4::IDENTITY, 1.0).len(), 1);
    assert!(pick_points(&ray, &far_behind, &Mat4::IDENTITY, 1.0).is_empty());
}

#[test]
fn pick_points_uses_local_frame() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
    // A quarter turn about Y moves local +X onto world -Z, right under the ray.
    let model = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let positions = [4.0, 0.0, 0.0];
    assert!(pick_points(&ray, &positions, &Mat4::IDENTITY, 1.0).is_empty());
    let hits = pick_points(&ray, &positions, &model, 1.0);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].distance - 9.0).abs() < 1e-3);
}

#[test]
fn ripple_displaces_hit_stars_equally_on_each_axis() {
    let mut scene = make_scene();
    let camera = Camera::backdrop(&viewport());
    let (index, ndc) = visible_star(&scene, &camera);
    let offset = scene.ripple_offset();
    assert!(offset.abs() > 1e-3, "test clock lands on a ripple zero");

    let before = scene.stars().position(index);
    scene.stars_mut().take_dirty();
    let moved = scene.apply_ripple(&camera.ray_from_ndc(ndc));
    assert!(moved >= 1);
    assert_eq!(scene.stars().len(), 5000);
    assert!(scene.stars().is_dirty());

    let after = scene.stars().position(index);
    assert_ne!(before, after);
    let delta = after - before;
    assert!((delta.x - offset).abs() < 1e-5);
    assert!((delta.y - offset).abs() < 1e-5);
    assert!((delta.z - offset).abs() < 1e-5);
}

#[test]
fn ripple_compounds_on_current_position() {
    let mut scene = make_scene();
    let camera = Camera::backdrop(&viewport());
    let (index, ndc) = visible_star(&scene, &camera);
    let ray = camera.ray_from_ndc(ndc);
    let start = scene.stars().position(index);
    let offset = scene.ripple_offset();
    scene.apply_ripple(&ray);
    scene.apply_ripple(&ray);
    let drift = scene.stars().position(index) - start;
    assert!((drift.x - 2.0 * offset).abs() < 1e-4);
}

#[test]
fn ray_missing_every_star_leaves_buffer_clean() {
    let mut scene = make_scene();
    scene.stars_mut().take_dirty();
    // Pointing straight away from the cube.
    let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::Z);
    assert_eq!(scene.apply_ripple(&ray), 0);
    assert!(!scene.stars().is_dirty());
}
