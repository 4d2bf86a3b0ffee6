use crate::color::Rgb;
use crate::constants::*;
use crate::pick::{pick_points, PointHits, Ray};
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;
use std::time::Duration;

/// Scene tuning. `Default` gives the backdrop's stock look; the web mount never overrides it.
#[derive(Clone, Debug)]
pub struct SceneParams {
    pub star_count: usize,
    pub star_half_extent: f32,
    pub star_size: f32,
    pub star_opacity: f32,
    pub nebula_tints: Vec<u32>,
    pub nebula_base_radius: f32,
    pub nebula_radius_jitter: f32,
    pub nebula_opacity_min: f32,
    pub nebula_opacity_jitter: f32,
    pub nebula_half_extent: f32,
    pub nebula_scale_jitter: f32,
    pub nebula_segments: u32,
    pub scene_spin: f32,
    pub nebula_spin: Vec3,
    pub twinkle_amplitude: f32,
    pub ripple_frequency: f64,
    pub ripple_amplitude: f32,
    pub pick_threshold: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            star_half_extent: STAR_HALF_EXTENT,
            star_size: STAR_SIZE,
            star_opacity: STAR_OPACITY,
            nebula_tints: NEBULA_TINTS.to_vec(),
            nebula_base_radius: NEBULA_BASE_RADIUS,
            nebula_radius_jitter: NEBULA_RADIUS_JITTER,
            nebula_opacity_min: NEBULA_OPACITY_MIN,
            nebula_opacity_jitter: NEBULA_OPACITY_JITTER,
            nebula_half_extent: NEBULA_HALF_EXTENT,
            nebula_scale_jitter: NEBULA_SCALE_JITTER,
            nebula_segments: NEBULA_SEGMENTS,
            scene_spin: SCENE_SPIN_PER_FRAME,
            nebula_spin: Vec3::from(NEBULA_SPIN_PER_FRAME),
            twinkle_amplitude: TWINKLE_AMPLITUDE,
            ripple_frequency: RIPPLE_FREQUENCY,
            ripple_amplitude: RIPPLE_AMPLITUDE,
            pick_threshold: PICK_THRESHOLD,
        }
    }
}

/// Flat `xyz` star positions plus a "needs GPU upload" flag.
#[derive(Clone, Debug)]
pub struct StarField {
    positions: Vec<f32>,
    dirty: bool,
}

impl StarField {
    fn random<R: Rng + ?Sized>(count: usize, half_extent: f32, rng: &mut R) -> Self {
        let positions = (0..count * 3)
            .map(|_| (rng.gen::<f32>() - 0.5) * 2.0 * half_extent)
            .collect();
        Self {
            positions,
            dirty: true,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        let i = index * 3;
        Vec3::new(self.positions[i], self.positions[i + 1], self.positions[i + 2])
    }

    #[inline]
    pub fn as_flat(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the upload flag.
    #[inline]
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn twinkle(&mut self, clock_sec: f64, amplitude: f32) {
        for j in (0..self.positions.len()).step_by(3) {
            self.positions[j + 1] += ((clock_sec + j as f64).sin() as f32) * amplitude;
        }
        self.dirty = true;
    }

    fn displace(&mut self, index: usize, offset: f32) {
        let i = index * 3;
        for c in &mut self.positions[i..i + 3] {
            *c += offset;
        }
        self.dirty = true;
    }
}

/// One translucent spheroid cloud.
#[derive(Clone, Debug)]
pub struct Nebula {
    pub radius: f32,
    pub tint: Rgb,
    pub opacity: f32,
    pub position: Vec3,
    pub scale: Vec3,
    /// Euler angles (XYZ order) in radians.
    pub rotation: Vec3,
}

impl Nebula {
    fn random<R: Rng + ?Sized>(tint_hex: u32, p: &SceneParams, rng: &mut R) -> Self {
        let radius = p.nebula_base_radius + rng.gen::<f32>() * p.nebula_radius_jitter;
        let opacity = p.nebula_opacity_min + rng.gen::<f32>() * p.nebula_opacity_jitter;
        let span = 2.0 * p.nebula_half_extent;
        let position = Vec3::new(
            (rng.gen::<f32>() - 0.5) * span,
            (rng.gen::<f32>() - 0.5) * span,
            (rng.gen::<f32>() - 0.5) * span,
        );
        let scale = Vec3::new(
            1.0 + rng.gen::<f32>() * p.nebula_scale_jitter,
            1.0 + rng.gen::<f32>() * p.nebula_scale_jitter,
            1.0 + rng.gen::<f32>() * p.nebula_scale_jitter,
        );
        Self {
            radius,
            tint: Rgb::from_srgb_hex(tint_hex),
            opacity,
            position,
            scale,
            rotation: Vec3::ZERO,
        }
    }

    /// Local transform for a unit sphere: translate, rotate, then radius * scale.
    pub fn model_matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale * self.radius, rot, self.position)
    }
}

/// GPU instance record for one nebula: world matrix columns, then linear RGBA.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NebulaInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

#[inline]
fn wrap_angle(radians: f32) -> f32 {
    radians.rem_euclid(TAU)
}

/// Everything the backdrop animates. Randomness is consumed only in [`Scene::build`].
#[derive(Clone, Debug)]
pub struct Scene {
    params: SceneParams,
    stars: StarField,
    nebulae: Vec<Nebula>,
    rotation_y: f32,
    clock_sec: f64,
    frames: u64,
}

impl Scene {
    /// Generate stars and nebulae. `epoch_sec` seeds the animation clock with host wall time.
    pub fn build<R: Rng + ?Sized>(params: SceneParams, rng: &mut R, epoch_sec: f64) -> Self {
        let stars = StarField::random(params.star_count, params.star_half_extent, rng);
        let nebulae = params
            .nebula_tints
            .iter()
            .map(|&hex| Nebula::random(hex, &params, rng))
            .collect::<Vec<_>>();
        log::debug!(
            "[scene] built stars={} nebulae={} epoch={:.3}",
            stars.len(),
            nebulae.len(),
            epoch_sec
        );
        Self {
            params,
            stars,
            nebulae,
            rotation_y: 0.0,
            clock_sec: epoch_sec,
            frames: 0,
        }
    }

    /// Step one frame. Rotations advance by fixed per-frame increments; twinkle reads the clock.
    pub fn advance(&mut self, dt: Duration) {
        self.clock_sec += dt.as_secs_f64();
        self.frames += 1;

        // Angles stay in [0, TAU).
        self.rotation_y = wrap_angle(self.rotation_y + self.params.scene_spin);
        for (i, n) in self.nebulae.iter_mut().enumerate() {
            let r = n.rotation + self.params.nebula_spin * (i + 1) as f32;
            n.rotation = Vec3::new(wrap_angle(r.x), wrap_angle(r.y), wrap_angle(r.z));
        }

        self.stars.twinkle(self.clock_sec, self.params.twinkle_amplitude);
    }

    /// Ripple every star the ray passes near. Returns how many stars moved.
    ///
    /// The offset lands on the current position, so repeated hits keep drifting.
    pub fn apply_ripple(&mut self, ray: &Ray) -> usize {
        let hits = self.pick_stars(ray);
        if hits.is_empty() {
            return 0;
        }
        let offset = self.ripple_offset();
        for hit in &hits {
            self.stars.displace(hit.index, offset);
        }
        hits.len()
    }

    pub fn pick_stars(&self, ray: &Ray) -> PointHits {
        pick_points(
            ray,
            self.stars.as_flat(),
            &self.model_matrix(),
            self.params.pick_threshold,
        )
    }

    #[inline]
    pub fn ripple_offset(&self) -> f32 {
        ((self.clock_sec * self.params.ripple_frequency).sin() as f32) * self.params.ripple_amplitude
    }

    /// Whole-scene spin about +Y.
    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }

    /// Full world transform for each nebula, scene spin included.
    pub fn nebula_world_matrices(&self) -> impl Iterator<Item = Mat4> + '_ {
        let scene = self.model_matrix();
        self.nebulae.iter().map(move |n| scene * n.model_matrix())
    }

    /// Instance data for this frame, one record per nebula in tint order.
    pub fn nebula_instances(&self) -> Vec<NebulaInstance> {
        self.nebula_world_matrices()
            .zip(&self.nebulae)
            .map(|(model, n)| NebulaInstance {
                model: model.to_cols_array_2d(),
                color: n.tint.with_alpha(n.opacity),
            })
            .collect()
    }

    #[inline]
    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    #[inline]
    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    #[inline]
    pub fn stars_mut(&mut self) -> &mut StarField {
        &mut self.stars
    }

    #[inline]
    pub fn nebulae(&self) -> &[Nebula] {
        &self.nebulae
    }

    #[inline]
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    #[inline]
    pub fn clock_sec(&self) -> f64 {
        self.clock_sec
    }

    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
