//! Miscelleanous utilities related to random number generation and random sampling
//!
//! Relies on the [rand] and [rand_distr] crates

use glam::Vec3A;
use rand::Rng;
use rand_distr::{Distribution, UnitDisc, UnitSphere};

/// Generates a random unit [Vec3A], uniformly distributed over the sphere's surface.
///
/// wrapper function around [UnitSphere]'s `sample` method
pub fn rand_vec3_on_unit_sphere(rng: &mut impl Rng) -> Vec3A {
    Vec3A::from_array(UnitSphere.sample(rng))
}

/// Generates a random [Vec3A] within the unit disk (radius 1) in the xy-plane.
///
/// wrapper function around [UnitDisc]'s `sample` method.
pub fn rand_vec3_in_unit_disk(rng: &mut impl Rng) -> Vec3A {
    let [x, y]: [f32; 2] = UnitDisc.sample(rng);
    Vec3A::new(x, y, 0.0)
}
