//! Spheres, stationary or moving linearly over the shutter interval.

use std::sync::Arc;

use glam::Vec3A;

use crate::{
    bounds::BoundingBox,
    hittables::{HitRecord, Hittable},
    interval::Interval,
    material::Material,
    ray::Ray,
};

/// A sphere whose center may move in a straight line while the shutter is open.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center at time 0, with the displacement to the time 1 center as its direction
    center: Ray,
    radius: f32,
    material: Arc<Material>,
    bbox: BoundingBox,
}

impl Sphere {
    /// Creates a stationary sphere. Negative radii clamp to zero.
    pub fn new(center: Vec3A, radius: f32, material: Arc<Material>) -> Self {
        Self::moving(center, center, radius, material)
    }

    /// Creates a sphere moving from `center0` at time 0 to `center1` at time 1.
    pub fn moving(center0: Vec3A, center1: Vec3A, radius: f32, material: Arc<Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3A::splat(radius);
        let box0 = BoundingBox::from_points(center0 - rvec, center0 + rvec);
        let box1 = BoundingBox::from_points(center1 - rvec, center1 + rvec);

        Self {
            center: Ray::new(center0, center1 - center0, 0.0),
            radius,
            material,
            bbox: BoundingBox::union(&box0, &box1),
        }
    }

    /// Returns the center position at the given shutter time.
    pub fn center_at(&self, time: f32) -> Vec3A {
        self.center.at(time)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let center = self.center_at(ray.time);
        let oc = center - ray.origin;
        let a = ray.direction.length_squared();
        // half of the usual `b` coefficient, with the sign folded in
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}
