//! Implementation of a 3-dimensional Ray.

use glam::Vec3A;
use rand::Rng;

use crate::{
    color::{colors, Color},
    hittables::Hittable,
    interval::Interval,
    material::ScatterRecord,
};

/// Lower bound of the hit window for shading rays, keeps scattered rays off their own surface.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// A 3-dimensional Ray
///
/// The crucial parts of the Ray are its origin and direction;
/// these two members are the primary way to determine an intersection with a [`Hittable`].
/// `time` places the ray within the shutter interval, for moving geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ray {
    pub origin: Vec3A,
    pub direction: Vec3A,
    pub time: f32,
}

impl std::fmt::Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "({} -> {})@{}",
            self.origin, self.direction, self.time
        ))
    }
}

impl Ray {
    /// Creates a new Ray.
    pub fn new(origin: Vec3A, direction: Vec3A, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Returns a position in 3D space along the ray.
    ///
    /// Performs the following calculation: `position = origin + t * direction`
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }

    /// Returns a [`Color`] value based on the accumulated light and color at the initial intersection point.
    ///
    /// Uses `bounce_depth` to limit the amount of recursion when gathering contributions.
    pub fn shade(
        &self,
        hittable: &(impl Hittable + ?Sized),
        bounce_depth: u16,
        rng: &mut impl Rng,
    ) -> Color {
        // Limit recursion depth
        if bounce_depth == 0 {
            return colors::BLACK;
        }

        let window = Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY);
        match hittable.hit(self, window) {
            Some(hit_rec) => match hit_rec.material.scatter(self, &hit_rec, rng) {
                // A successful ray scatter leads to more contributions.
                Some(ScatterRecord { ray, attenuation }) => {
                    attenuation * ray.shade(hittable, bounce_depth - 1, rng)
                }
                // Otherwise, the ray was absorbed
                None => colors::BLACK,
            },
            // without a hit, functions like a miss shader
            None => self.sky(),
        }
    }

    /// Background color seen along this ray: a vertical blend from white to light blue.
    pub fn sky(&self) -> Color {
        let unit_direction = self.direction.normalize();
        let a = 0.5 * (unit_direction.y + 1.0);
        (1.0 - a) * colors::WHITE + a * colors::SKY_BLUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_distance() {
        let r = Ray::new(Vec3A::ZERO, Vec3A::Z, 0.0);
        let result = r.at(0.0);
        assert_eq!(
            r.origin, result,
            "Ray starting at {} did not return {} when computing .at(0.0), position was {}",
            r.origin, r.origin, result
        )
    }

    #[test]
    fn sky_blends_vertically() {
        let up = Ray::new(Vec3A::ZERO, Vec3A::Y * 3.0, 0.0).sky();
        let down = Ray::new(Vec3A::ZERO, -Vec3A::Y, 0.0).sky();
        assert!(up.abs_diff_eq(colors::SKY_BLUE, 1e-6));
        assert!(down.abs_diff_eq(colors::WHITE, 1e-6));
    }

    #[test]
    fn exhausted_depth_is_black() {
        use crate::hittables::HittableList;
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let r = Ray::new(Vec3A::ZERO, -Vec3A::Z, 0.0);
        assert_eq!(r.shade(&HittableList::new(), 0, &mut rng), colors::BLACK);
        // an empty world shows the sky
        assert_eq!(r.shade(&HittableList::new(), 1, &mut rng), r.sky());
    }
}
