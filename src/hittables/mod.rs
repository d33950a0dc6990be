//! The [Hittable] capability and the geometry implementing it.

use std::sync::Arc;

use glam::Vec3A;

use crate::{bounds::BoundingBox, interval::Interval, material::Material, ray::Ray};

mod sphere;

pub use crate::bvh::BvhNode;
pub use sphere::Sphere;

/// Information about a single ray intersection.
///
/// Borrowed from the geometry that produced it, so it lives no longer than one query.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Ray parameter of the intersection
    pub t: f32,
    /// World position of the intersection
    pub point: Vec3A,
    /// Unit surface normal, always facing against the incoming ray
    pub normal: Vec3A,
    /// Whether the ray arrived from outside the surface
    pub front_face: bool,
    /// The surface's material
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Creates a hit record, orienting `outward_normal` against `ray`.
    ///
    /// `outward_normal` is expected to have unit length.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3A, material: &'a Material) -> Self {
        let mut rec = Self {
            t,
            point: ray.at(t),
            normal: outward_normal,
            front_face: true,
            material,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Sets `front_face` and `normal` together from the geometric outward normal.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3A) {
        self.front_face = ray.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Anything a [Ray] can intersect.
///
/// Geometry is built once and then only read, so implementors must be shareable across threads.
pub trait Hittable: Send + Sync {
    /// Returns the nearest intersection with parameter strictly inside `ray_t`, if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;

    /// Returns a box enclosing the object over the whole shutter interval.
    fn bounding_box(&self) -> BoundingBox;

    /// Moves the object behind a shared handle.
    fn wrap(self) -> Arc<dyn Hittable>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl std::fmt::Debug for dyn Hittable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Hittable {{{}}}", self.bounding_box())
    }
}

/// An unordered collection of [Hittable]s, tested by linear scan.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: BoundingBox,
}

impl HittableList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object, growing the list's bounding box to enclose it.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox.union_in_place(&object.bounding_box());
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    /// Consumes the list, returning its objects.
    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }
}

impl FromIterator<Arc<dyn Hittable>> for HittableList {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Hittable>>>(iter: I) -> Self {
        let mut list = Self::new();
        for object in iter {
            list.add(object);
        }
        list
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest_so_far = ray_t.max;
        let mut result = None;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                result = Some(rec);
            }
        }

        result
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_at(z: f32, radius: f32) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            Vec3A::new(0.0, 0.0, z),
            radius,
            Arc::new(Material::lambertian(Vec3A::splat(0.5))),
        ))
    }

    #[test]
    fn front_and_back_face() {
        let mat = Material::dielectric(1.5);
        let ray = Ray::new(Vec3A::ZERO, -Vec3A::Z, 0.0);

        let entering = HitRecord::new(&ray, 1.0, Vec3A::Z, &mat);
        assert!(entering.front_face);
        assert_eq!(entering.normal, Vec3A::Z);

        let exiting = HitRecord::new(&ray, 1.0, -Vec3A::Z, &mat);
        assert!(!exiting.front_face);
        assert_eq!(exiting.normal, Vec3A::Z);
        assert!(exiting.normal.dot(ray.direction) < 0.0);
    }

    #[test]
    fn list_returns_nearest() {
        // inserted far-to-near so the scan has to replace its first hit
        let list: HittableList = [sphere_at(-10.0, 1.0), sphere_at(-4.0, 1.0), sphere_at(-7.0, 1.0)]
            .into_iter()
            .collect();
        let ray = Ray::new(Vec3A::ZERO, -Vec3A::Z, 0.0);
        let rec = list.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 3.0).abs() < 1e-5, "nearest hit was at t = {}", rec.t);
    }

    #[test]
    fn list_tracks_running_box() {
        let mut list = HittableList::new();
        assert!(list.bounding_box().x.is_empty());

        list.add(sphere_at(-4.0, 1.0));
        list.add(sphere_at(3.0, 2.0));
        let bbox = list.bounding_box();
        assert_eq!(bbox.z, Interval::new(-5.0, 5.0));
        assert_eq!(bbox.x, Interval::new(-2.0, 2.0));
    }

    #[test]
    fn empty_list_misses() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::X, 0.0);
        assert!(HittableList::new().hit(&ray, Interval::UNIVERSE).is_none());
    }
}
