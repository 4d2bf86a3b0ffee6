//! Viewport and camera types shared with the web frontend.
//!
//! Nothing here touches platform APIs. The web layer reads window metrics into
//! a [`Viewport`] and the renderer pulls matrices from the [`Camera`].

use crate::constants::{CAMERA_FOV_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, MIN_SURFACE_DIMENSION};
use crate::pick::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Visible area in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Backing-store size in device pixels, never smaller than 1x1.
    pub fn physical_size(&self) -> (u32, u32) {
        let ratio = if self.pixel_ratio > 0.0 {
            self.pixel_ratio
        } else {
            1.0
        };
        let w = (self.width * ratio).round().max(0.0) as u32;
        let h = (self.height * ratio).round().max(0.0) as u32;
        (w.max(MIN_SURFACE_DIMENSION), h.max(MIN_SURFACE_DIMENSION))
    }

    /// Map client coordinates to normalized device coordinates with +y up.
    #[inline]
    pub fn client_to_ndc(&self, x: f32, y: f32) -> Vec2 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Vec2::new((x / w) * 2.0 - 1.0, -(y / h) * 2.0 + 1.0)
    }
}

/// Right-handed perspective camera with a cached projection matrix.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, fovy_radians: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let mut cam = Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians,
            znear,
            zfar,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection();
        cam
    }

    /// The fixed backdrop camera: 75° on +Z looking at the origin.
    pub fn backdrop(viewport: &Viewport) -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, CAMERA_Z),
            Vec3::ZERO,
            CAMERA_FOV_DEG.to_radians(),
            viewport.aspect(),
            CAMERA_ZNEAR,
            CAMERA_ZFAR,
        )
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    /// Recompute the projection after changing any lens parameter.
    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    #[inline]
    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// World-space ray from the eye through an NDC point.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, (p1 - self.eye).normalize())
    }
}
