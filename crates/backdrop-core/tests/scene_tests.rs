// Host-side tests for scene construction and per-frame animation.

use backdrop_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn make_scene(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    Scene::build(SceneParams::default(), &mut rng, 1_000.0)
}

#[test]
fn build_creates_fixed_counts() {
    let scene = make_scene(42);
    assert_eq!(scene.stars().len(), 5000);
    assert_eq!(scene.stars().as_flat().len(), 15000);
    assert_eq!(scene.nebulae().len(), 3);
}

#[test]
fn stars_fill_the_cube() {
    let scene = make_scene(7);
    for &c in scene.stars().as_flat() {
        assert!((-10.0..=10.0).contains(&c), "star coordinate out of range: {c}");
    }
    // Uniform sampling should reach well into every half of the cube.
    let max = scene
        .stars()
        .as_flat()
        .iter()
        .fold(0.0_f32, |m, c| m.max(c.abs()));
    assert!(max > 9.0);
}

#[test]
fn nebulae_within_random_ranges() {
    for seed in 0..20 {
        let scene = make_scene(seed);
        for n in scene.nebulae() {
            assert!((2.0..=3.0).contains(&n.radius), "radius {}", n.radius);
            assert!((0.1..=0.2).contains(&n.opacity), "opacity {}", n.opacity);
            for c in n.position.to_array() {
                assert!((-4.0..=4.0).contains(&c), "position {c}");
            }
            for s in n.scale.to_array() {
                assert!((1.0..=1.5).contains(&s), "scale {s}");
            }
            assert_eq!(n.rotation, glam::Vec3::ZERO);
        }
    }
}

#[test]
fn nebula_tints_follow_preset_order() {
    let scene = make_scene(3);
    let tints: Vec<Rgb> = scene.nebulae().iter().map(|n| n.tint).collect();
    assert_eq!(tints[0], Rgb::from_srgb_hex(0x8B5CF6));
    assert_eq!(tints[1], Rgb::from_srgb_hex(0xC084FC));
    assert_eq!(tints[2], Rgb::from_srgb_hex(0xF472B6));
}

#[test]
fn same_seed_builds_same_scene() {
    let a = make_scene(99);
    let b = make_scene(99);
    assert_eq!(a.stars().as_flat(), b.stars().as_flat());
    for (na, nb) in a.nebulae().iter().zip(b.nebulae()) {
        assert_eq!(na.position, nb.position);
        assert_eq!(na.radius, nb.radius);
    }
    let c = make_scene(100);
    assert_ne!(a.stars().as_flat(), c.stars().as_flat());
}

#[test]
fn advance_is_deterministic() {
    let mut a = make_scene(5);
    let mut b = a.clone();
    for _ in 0..30 {
        a.advance(FRAME);
        b.advance(FRAME);
    }
    assert_eq!(a.stars().as_flat(), b.stars().as_flat());
    assert_eq!(a.rotation_y(), b.rotation_y());
}

#[test]
fn rotation_advances_by_fixed_increments() {
    let mut scene = make_scene(11);
    let frames = 120;
    for k in 1..=frames {
        scene.advance(FRAME);
        let expected = SCENE_SPIN_PER_FRAME * k as f32;
        assert!((scene.rotation_y() - expected).abs() < 1e-5);
    }
    assert_eq!(scene.frames(), frames);

    let base = glam::Vec3::from(NEBULA_SPIN_PER_FRAME) * frames as f32;
    let n0 = scene.nebulae()[0].rotation;
    assert!((n0 - base).abs().max_element() < 1e-4);
    for (i, n) in scene.nebulae().iter().enumerate() {
        let ratio = (i + 1) as f32;
        assert!(
            (n.rotation - n0 * ratio).abs().max_element() < 1e-4,
            "nebula {i} is not {ratio}x nebula 0"
        );
    }
}

#[test]
fn rotation_ignores_frame_duration() {
    let mut fast = make_scene(12);
    let mut slow = make_scene(12);
    for _ in 0..10 {
        fast.advance(Duration::from_millis(4));
        slow.advance(Duration::from_millis(100));
    }
    assert_eq!(fast.rotation_y(), slow.rotation_y());
    assert_eq!(fast.nebulae()[2].rotation, slow.nebulae()[2].rotation);
}

#[test]
fn twinkle_moves_only_vertical_coordinates() {
    let mut scene = make_scene(21);
    let before = scene.stars().as_flat().to_vec();
    scene.stars_mut().take_dirty();
    scene.advance(FRAME);
    assert!(scene.stars().is_dirty());

    let after = scene.stars().as_flat();
    let clock = scene.clock_sec();
    for j in (0..before.len()).step_by(3) {
        assert_eq!(before[j], after[j]);
        assert_eq!(before[j + 2], after[j + 2]);
        let expected = before[j + 1] + ((clock + j as f64).sin() as f32) * TWINKLE_AMPLITUDE;
        assert!((after[j + 1] - expected).abs() < 1e-5);
    }
}

#[test]
fn clock_accumulates_frame_time() {
    let mut scene = make_scene(1);
    let start = scene.clock_sec();
    for _ in 0..4 {
        scene.advance(Duration::from_millis(250));
    }
    assert!((scene.clock_sec() - start - 1.0).abs() < 1e-9);
}

#[test]
fn take_dirty_clears_flag() {
    let mut scene = make_scene(2);
    assert!(scene.stars_mut().take_dirty(), "fresh stars need an upload");
    assert!(!scene.stars_mut().take_dirty());
}

#[test]
fn nebula_world_matrix_includes_scene_spin() {
    let mut scene = make_scene(8);
    for _ in 0..500 {
        scene.advance(FRAME);
    }
    let world: Vec<glam::Mat4> = scene.nebula_world_matrices().collect();
    assert_eq!(world.len(), 3);
    let n = &scene.nebulae()[0];
    let center = world[0].transform_point3(glam::Vec3::ZERO);
    let expected = glam::Mat4::from_rotation_y(scene.rotation_y()).transform_point3(n.position);
    assert!((center - expected).length() < 1e-4);
}

fn step(before: f32, after: f32) -> f32 {
    (after - before).rem_euclid(std::f32::consts::TAU)
}

#[test]
fn rotation_step_holds_after_a_day_of_frames() {
    let params = SceneParams {
        star_count: 0,
        ..SceneParams::default()
    };
    let mut scene = Scene::build(params, &mut StdRng::seed_from_u64(21), 0.0);
    // 24h at 60fps
    for _ in 0..5_184_000u32 {
        scene.advance(FRAME);
    }
    let scene_before = scene.rotation_y();
    let nebulae_before: Vec<glam::Vec3> = scene.nebulae().iter().map(|n| n.rotation).collect();
    scene.advance(FRAME);

    assert!((0.0..=std::f32::consts::TAU).contains(&scene.rotation_y()));
    let scene_step = step(scene_before, scene.rotation_y());
    assert!(
        (scene_step - SCENE_SPIN_PER_FRAME).abs() < 2e-6,
        "scene step {scene_step}"
    );

    let base = glam::Vec3::from(NEBULA_SPIN_PER_FRAME);
    for (i, (n, before)) in scene.nebulae().iter().zip(&nebulae_before).enumerate() {
        let expected = base * (i + 1) as f32;
        let got = glam::Vec3::new(
            step(before.x, n.rotation.x),
            step(before.y, n.rotation.y),
            step(before.z, n.rotation.z),
        );
        assert!(
            (got - expected).abs().max_element() < 2e-6,
            "nebula {i} step {got:?}, expected {expected:?}"
        );
    }
}

#[test]
fn nebula_instances_pack_world_matrix_and_tint() {
    let mut scene = make_scene(9);
    for _ in 0..30 {
        scene.advance(FRAME);
    }
    let instances = scene.nebula_instances();
    assert_eq!(instances.len(), 3);
    assert_eq!(std::mem::size_of::<NebulaInstance>(), 80);
    assert_eq!(bytemuck::cast_slice::<_, f32>(&instances).len(), 3 * 20);

    for ((inst, world), n) in instances
        .iter()
        .zip(scene.nebula_world_matrices())
        .zip(scene.nebulae())
    {
        assert_eq!(inst.model, world.to_cols_array_2d());
        assert_eq!(inst.color, n.tint.with_alpha(n.opacity));
        assert!((inst.color[3] - n.opacity).abs() < 1e-6);
    }
}
