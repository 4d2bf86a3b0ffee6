use glam::{Mat4, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Same ray expressed in another frame (`m` maps world into that frame).
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray::new(
            m.transform_point3(self.origin),
            m.transform_vector3(self.dir).normalize_or_zero(),
        )
    }

    /// Closest point on the ray to `p`; points behind the origin clamp to it.
    #[inline]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        let t = (p - self.origin).dot(self.dir).max(0.0);
        self.at(t)
    }
}

/// A star picked by a ray.
#[derive(Clone, Copy, Debug)]
pub struct PointHit {
    /// Star index (not the flat buffer offset).
    pub index: usize,
    /// Distance from the ray origin to the closest point on the ray.
    pub distance: f32,
    /// Perpendicular distance between the star and the ray.
    pub distance_to_ray: f32,
}

pub type PointHits = SmallVec<[PointHit; 32]>;

/// Pick every point of a flat `xyz` buffer within `threshold` of `ray`.
///
/// `model` places the buffer in world space; the ray is tested in the buffer's
/// local frame. Hits come back ordered nearest first.
pub fn pick_points(ray: &Ray, positions: &[f32], model: &Mat4, threshold: f32) -> PointHits {
    let local_ray = ray.transformed(&model.inverse());
    let threshold_sq = threshold * threshold;
    let mut hits = PointHits::new();
    for (index, p) in positions.chunks_exact(3).enumerate() {
        let p = Vec3::new(p[0], p[1], p[2]);
        let closest = local_ray.closest_point(p);
        let dist_sq = closest.distance_squared(p);
        if dist_sq >= threshold_sq {
            continue;
        }
        let world = model.transform_point3(closest);
        hits.push(PointHit {
            index,
            distance: ray.origin.distance(world),
            distance_to_ray: dist_sq.sqrt(),
        });
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
