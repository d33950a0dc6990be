//! Implementation of material types

use glam::Vec3A;
use rand::Rng;

use crate::{
    color::{colors, Color},
    hittables::HitRecord,
    ray::Ray,
    utils::random::rand_vec3_on_unit_sphere,
};

/// Components below this magnitude count as zero when checking scatter directions.
const NEAR_ZERO: f32 = 1e-8;

/// Returns a reflected ray direction based on the given normal
///
/// Performs the following computation: `v - 2 * v.dot(n) * n`
#[inline]
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - n * v.dot(n) * 2.0
}

/// Returns a refracted ray direction using the given normal
/// and the ratio between two refractive indices.
///
/// See [Shirley's RTiOW's section on Snell's Law](https://raytracing.github.io/books/RayTracingInOneWeekend.html#dielectrics/snell'slaw) for more information
#[inline]
pub fn refract(uv: Vec3A, n: Vec3A, eta_ratio: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_perp = eta_ratio * (uv + cos_theta * n);
    let r_para = (1.0 - r_perp.length_squared()).abs().sqrt() * -1.0 * n;
    r_perp + r_para
}

/// Computes reflectance using Schlick's approximation
#[inline]
pub fn reflectance(cosine: f32, refract_idx: f32) -> f32 {
    let r0 = (1.0 - refract_idx) / (1.0 + refract_idx);
    let r0_squared = r0 * r0;
    r0_squared + (1.0 - r0_squared) * (1.0 - cosine).powi(5)
}

/// Enumeration of possible material types.
///
/// Materials are immutable once built and shared between all the geometry using them.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// An approximation of a diffuse, or matte, material.
    ///
    /// See the [Wikipedia page on Lambertian reflectance](https://en.wikipedia.org/wiki/Lambertian_reflectance) for more information.
    Lambertian { albedo: Color },
    /// A metallic material that reflects rays, blurred by `fuzz` (at most 1).
    Metal { albedo: Color, fuzz: f32 },
    /// A glass material that scatters rays based on the given refractive index.
    Dielectric { refract_index: f32 },
}

/// Set of data returned on a [Material]'s scattering
#[derive(Debug)]
pub struct ScatterRecord {
    /// The resultant ray for subsequent intersections
    pub ray: Ray,
    /// The attenuation at the point of intersection
    pub attenuation: Color,
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Self::Lambertian { albedo }
    }

    /// Creates a metal, clamping `fuzz` to at most 1.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Self::Metal {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }

    pub fn dielectric(refract_index: f32) -> Self {
        Self::Dielectric { refract_index }
    }

    /// Returns a scattered ray and its attenuation based on the specific material type.
    ///
    /// Returns `None` if the material absorbs the ray.
    /// The scattered ray keeps the incoming ray's time.
    pub fn scatter(&self, ray: &Ray, rec: &HitRecord, rng: &mut impl Rng) -> Option<ScatterRecord> {
        match self {
            Material::Lambertian { albedo } => {
                let mut scatter_dir = rec.normal + rand_vec3_on_unit_sphere(rng);

                // If the scatter direction is close to zero in all dimensions
                if scatter_dir.abs().cmplt(Vec3A::splat(NEAR_ZERO)).all() {
                    scatter_dir = rec.normal;
                }

                Some(ScatterRecord {
                    ray: Ray::new(rec.point, scatter_dir, ray.time),
                    attenuation: *albedo,
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray.direction.normalize(), rec.normal);

                let scattered = Ray::new(
                    rec.point,
                    reflected + *fuzz * rand_vec3_on_unit_sphere(rng),
                    ray.time,
                );

                // fuzz may push the ray below the surface, where it is absorbed
                (scattered.direction.dot(rec.normal) > 0.0).then_some(ScatterRecord {
                    ray: scattered,
                    attenuation: *albedo,
                })
            }
            Material::Dielectric { refract_index } => {
                // the outside medium is assumed to be air
                let refract_ratio = if rec.front_face {
                    1.0 / refract_index
                } else {
                    *refract_index
                };

                let normed_dir = ray.direction.normalize();
                let cos_theta = (-normed_dir).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let no_refract = refract_ratio * sin_theta > 1.0;
                let direction =
                    if no_refract || reflectance(cos_theta, refract_ratio) > rng.gen::<f32>() {
                        // must reflect
                        reflect(normed_dir, rec.normal)
                    } else {
                        // can refract
                        refract(normed_dir, rec.normal, refract_ratio)
                    };

                Some(ScatterRecord {
                    ray: Ray::new(rec.point, direction, ray.time),
                    attenuation: colors::WHITE,
                })
            }
        }
    }
}
