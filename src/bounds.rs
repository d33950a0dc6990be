//! Implementation of bounding volumes

use glam::Vec3A;

use crate::{interval::Interval, ray::Ray};

/// An axis aligned bounding box, stored as one [Interval] per world axis.
///
/// The default box is empty on all three axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl BoundingBox {
    /// Creates a box directly from its three axis extents.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Creates the box spanned by two opposite corners, in any order.
    pub fn from_points(p0: Vec3A, p1: Vec3A) -> Self {
        let min = p0.min(p1);
        let max = p0.max(p1);
        Self {
            x: Interval::new(min.x, max.x),
            y: Interval::new(min.y, max.y),
            z: Interval::new(min.z, max.z),
        }
    }

    /// Returns a bounding box enclosing both boxes.
    ///
    /// In other words, takes the per-axis union of the two boxes' extents.
    pub fn union(a: &BoundingBox, b: &BoundingBox) -> Self {
        Self {
            x: Interval::union(a.x, b.x),
            y: Interval::union(a.y, b.y),
            z: Interval::union(a.z, b.z),
        }
    }

    /// Grows this box in place so that it also encloses `other`.
    pub fn union_in_place(&mut self, other: &BoundingBox) {
        self.x.union_in_place(other.x);
        self.y.union_in_place(other.y);
        self.z.union_in_place(other.z);
    }

    /// Returns the extent along axis `n` (0 = x, 1 = y, 2 = z).
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a valid axis index.
    pub fn axis_interval(&self, n: usize) -> &Interval {
        match n {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("axis index {n} out of range, expected 0, 1 or 2"),
        }
    }

    /// Intersects the ray with this box over the window `ray_t`.
    ///
    /// Checks for slab intersection in each of the 3 dimensions, narrowing the window as it goes.
    /// Returns the narrowed window, or `None` as soon as it closes.
    ///
    /// A ray parallel to a slab hits it only when its origin lies within the slab, faces
    /// included, so rays running along a face count as hits.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<Interval> {
        let mut result = ray_t;

        for axis_idx in 0..3 {
            let axis = self.axis_interval(axis_idx);
            let origin = ray.origin[axis_idx];
            let dir = ray.direction[axis_idx];

            if dir == 0.0 {
                // parallel: the slab either holds the whole ray or none of it
                if !axis.contains(origin) {
                    return None;
                }
                continue;
            }

            let t0 = (axis.min - origin) / dir;
            let t1 = (axis.max - origin) / dir;

            // order them, the direction component may be negative
            let lower = t0.min(t1);
            let higher = t0.max(t1);

            if lower > result.min {
                result.min = lower;
            }
            if higher < result.max {
                result.max = higher;
            }

            if result.min >= result.max {
                return None;
            }
        }

        Some(result)
    }

    /// Index of the axis with the widest extent.
    pub fn longest_axis(&self) -> usize {
        let (x, y, z) = (self.x.size(), self.y.size(), self.z.size());
        if x > y && x > z {
            0
        } else if y > z {
            1
        } else {
            2
        }
    }

    pub fn centroid(&self) -> Vec3A {
        Vec3A::new(
            0.5 * (self.x.min + self.x.max),
            0.5 * (self.y.min + self.y.max),
            0.5 * (self.z.min + self.z.max),
        )
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundingBox {{ x: {}, y: {}, z: {} }}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn unit_box() -> BoundingBox {
        BoundingBox::from_points(Vec3A::splat(-1.0), Vec3A::splat(1.0))
    }

    #[test]
    fn default_is_empty() {
        let bbox = BoundingBox::default();
        for n in 0..3 {
            assert!(bbox.axis_interval(n).is_empty());
        }
    }

    #[test]
    fn corners_in_any_order() {
        let a = BoundingBox::from_points(Vec3A::new(1.0, -2.0, 3.0), Vec3A::new(-1.0, 2.0, 0.0));
        assert_eq!(a.x, Interval::new(-1.0, 1.0));
        assert_eq!(a.y, Interval::new(-2.0, 2.0));
        assert_eq!(a.z, Interval::new(0.0, 3.0));
    }

    #[test]
    fn union_with_empty_box() {
        let bbox = unit_box();
        assert_eq!(BoundingBox::union(&bbox, &BoundingBox::default()), bbox);
    }

    #[test]
    #[should_panic]
    fn bad_axis_panics() {
        unit_box().axis_interval(3);
    }

    #[test]
    fn head_on_hit_narrows_window() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), -Vec3A::Z, 0.0);
        let window = unit_box().hit(&ray, Interval::new(0.0, f32::INFINITY)).unwrap();
        assert_eq!(window, Interval::new(4.0, 6.0));
    }

    #[test]
    fn negative_direction_is_ordered() {
        let ray = Ray::new(Vec3A::new(5.0, 0.5, 0.5), -Vec3A::X, 0.0);
        let window = unit_box().hit(&ray, Interval::UNIVERSE).unwrap();
        assert!(window.min < window.max);
        assert_eq!(window, Interval::new(4.0, 6.0));
    }

    #[test]
    fn parallel_ray_checks_origin() {
        // direction has zero y and z components
        let inside = Ray::new(Vec3A::new(-5.0, 0.5, 0.5), Vec3A::X, 0.0);
        assert!(unit_box().hit(&inside, Interval::UNIVERSE).is_some());

        let outside = Ray::new(Vec3A::new(-5.0, 1.5, 0.5), Vec3A::X, 0.0);
        assert!(unit_box().hit(&outside, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn ray_along_face_hits() {
        // in the plane of the y-min face, then of the y-max face
        for y in [-1.0, 1.0] {
            let ray = Ray::new(Vec3A::new(-5.0, y, 0.5), Vec3A::X, 0.0);
            let window = unit_box().hit(&ray, Interval::UNIVERSE).unwrap();
            assert!((window.min - 4.0).abs() < 1e-6 && (window.max - 6.0).abs() < 1e-6);
        }

        let off_face = Ray::new(Vec3A::new(-5.0, 1.0 + 1e-4, 0.5), Vec3A::X, 0.0);
        assert!(unit_box().hit(&off_face, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn window_before_box_misses() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), -Vec3A::Z, 0.0);
        assert!(unit_box().hit(&ray, Interval::new(0.0, 3.5)).is_none());
    }

    #[test]
    fn narrowed_window_stays_within_query() {
        let mut rng = SmallRng::seed_from_u64(7);
        let bbox = BoundingBox::from_points(Vec3A::new(-1.0, -2.0, -0.5), Vec3A::new(2.0, 1.0, 0.5));
        for _ in 0..1000 {
            let origin = Vec3A::new(
                rng.gen_range(-6.0..6.0),
                rng.gen_range(-6.0..6.0),
                rng.gen_range(-6.0..6.0),
            );
            let direction = Vec3A::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let query = Interval::new(rng.gen_range(0.0..2.0), rng.gen_range(2.0..20.0));
            let ray = Ray::new(origin, direction, 0.0);

            if let Some(window) = bbox.hit(&ray, query) {
                assert!(window.min >= query.min && window.max <= query.max);
                assert!(window.min < window.max);
                // the midpoint of the window is inside the box
                let p = ray.at(0.5 * (window.min + window.max));
                assert!(bbox.x.expand(1e-3).contains(p.x), "{p} outside {bbox}");
                assert!(bbox.y.expand(1e-3).contains(p.y), "{p} outside {bbox}");
                assert!(bbox.z.expand(1e-3).contains(p.z), "{p} outside {bbox}");
            }
        }
    }
}
