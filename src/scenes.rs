//! Scene generation functionality

use std::sync::Arc;

use glam::Vec3A;
use rand::Rng;

use crate::{config::CameraConfig, hittables::*, material::Material};

/// Possible hard-coded scenes to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SceneType {
    /// Scene like the cover of "Ray Tracing in One Weekend".
    CoverPhoto,
    /// [SceneType::CoverPhoto] where the small diffuse spheres bounce upward while the shutter is open
    BouncingSpheres,
    /// Test scene for materials development
    MaterialDev,
    /// A single diffuse sphere straight ahead of the camera
    SingleSphere,
}

/// Returns the camera parameters and the list of objects for the chosen scene.
pub fn get_scene(
    scene_type: SceneType,
    image_width: u32,
    rng: &mut impl Rng,
) -> (CameraConfig, HittableList) {
    // Setup default camera properties
    let mut config = CameraConfig {
        image_width,
        ..Default::default()
    };

    // Grabs the scene and changes any cam params
    match scene_type {
        SceneType::CoverPhoto | SceneType::BouncingSpheres => {
            config.aspect_ratio = 16.0 / 9.0;
            config.look_from = Vec3A::new(13.0, 2.0, 3.0);
            config.look_at = Vec3A::ZERO;
            config.vertical_fov = 20.0;
            config.defocus_angle = 0.6;
            config.focus_dist = 10.0;
            config.samples_per_pixel = 500;
            config.max_depth = 50;
        }
        SceneType::MaterialDev => {
            config.look_from = Vec3A::new(-2.0, 2.0, 1.0);
            config.look_at = -Vec3A::Z;
            config.vertical_fov = 20.0;
            config.defocus_angle = 10.0;
            config.focus_dist = 3.4;
            config.samples_per_pixel = 100;
            config.max_depth = 50;
        }
        SceneType::SingleSphere => {
            config.aspect_ratio = 1.0;
            config.focus_dist = 1.0;
        }
    }

    let world = get_geometry(scene_type, rng);
    (config, world)
}

/// Returns only the objects making up the chosen scene.
pub fn get_geometry(scene_type: SceneType, rng: &mut impl Rng) -> HittableList {
    match scene_type {
        SceneType::CoverPhoto => gen_random_scene(rng, false),
        SceneType::BouncingSpheres => gen_random_scene(rng, true),
        SceneType::MaterialDev => get_mat_dev_scene(),
        SceneType::SingleSphere => gen_single_sphere(),
    }
}

/// Returns a [HittableList] containing a few spheres with unique materials
fn get_mat_dev_scene() -> HittableList {
    //  Create ground sphere
    let ground_material = Arc::new(Material::lambertian(Vec3A::new(0.8, 0.8, 0.0)));
    let ground_sph = Sphere::new(Vec3A::new(0.0, -100.5, -1.0), 100.0, ground_material);

    let mat_left = Arc::new(Material::dielectric(1.5));
    let mat_right = Arc::new(Material::metal(Vec3A::new(0.8, 0.6, 0.2), 1.0));
    let mat_center = Arc::new(Material::lambertian(Vec3A::new(0.1, 0.2, 0.5)));

    let left_sph = Sphere::new(Vec3A::new(-1.0, 0.0, -1.0), 0.5, mat_left);
    // air bubble inside the glass sphere
    let mat_bubble = Arc::new(Material::dielectric(1.0 / 1.5));
    let bubble_sph = Sphere::new(Vec3A::new(-1.0, 0.0, -1.0), 0.4, mat_bubble);
    let right_sph = Sphere::new(Vec3A::new(1.0, 0.0, -1.0), 0.5, mat_right);
    let center_sph = Sphere::new(Vec3A::new(0.0, 0.0, -1.2), 0.5, mat_center);

    [
        ground_sph.wrap(),
        left_sph.wrap(),
        bubble_sph.wrap(),
        right_sph.wrap(),
        center_sph.wrap(),
    ]
    .into_iter()
    .collect()
}

/// Returns a [HittableList] containing randomly-generated spheres
///
/// With `bouncing`, the small diffuse spheres move upward over the shutter interval.
fn gen_random_scene(rng: &mut impl Rng, bouncing: bool) -> HittableList {
    //  Create ground sphere
    let ground_material = Arc::new(Material::lambertian(Vec3A::splat(0.5)));
    let mut world = HittableList::new();
    world.add(Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0, ground_material).wrap());

    // The random generation part
    const ORIGIN: Vec3A = Vec3A::from_array([4.0, 0.2, 0.0]);
    for a in -11..11 {
        for b in -11..11 {
            let decide_mat = rng.gen::<f32>();
            let center = Vec3A::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            if (center - ORIGIN).length() > 0.9 {
                // pick a material by "rarity"
                let mat = if decide_mat < 0.8 {
                    // diffuse
                    let albedo = rng.gen::<Vec3A>() * rng.gen::<Vec3A>();
                    Arc::new(Material::lambertian(albedo))
                } else if decide_mat < 0.95 {
                    // metal
                    let albedo = Vec3A::splat(0.5) + rng.gen::<Vec3A>() * 0.5;
                    Arc::new(Material::metal(albedo, rng.gen_range(0.0..0.5)))
                } else {
                    // glass
                    Arc::new(Material::dielectric(1.5))
                };

                // make the diffuse spheres moveable
                let sph = if bouncing && matches!(mat.as_ref(), Material::Lambertian { .. }) {
                    let center2 = center + Vec3A::Y * rng.gen_range(0.0..0.5);
                    Sphere::moving(center, center2, 0.2, mat)
                } else {
                    Sphere::new(center, 0.2, mat)
                };
                world.add(sph.wrap());
            }
        }
    }

    // The signature central spheres
    let mat_1 = Arc::new(Material::dielectric(1.5));
    let mat_2 = Arc::new(Material::lambertian(Vec3A::new(0.4, 0.2, 0.1)));
    let mat_3 = Arc::new(Material::metal(Vec3A::new(0.7, 0.6, 0.5), 0.0));

    world.add(Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0, mat_1).wrap());
    world.add(Sphere::new(Vec3A::new(-4.0, 1.0, 0.0), 1.0, mat_2).wrap());
    world.add(Sphere::new(Vec3A::new(4.0, 1.0, 0.0), 1.0, mat_3).wrap());

    world
}

/// Returns a [HittableList] holding one diffuse sphere, one unit in front of the origin.
fn gen_single_sphere() -> HittableList {
    let mat = Arc::new(Material::lambertian(Vec3A::splat(0.5)));
    [Sphere::new(-Vec3A::Z, 0.5, mat).wrap()].into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn every_scene_is_valid() {
        use clap::ValueEnum;
        for scene in SceneType::value_variants() {
            let mut rng = SmallRng::seed_from_u64(0);
            let (config, world) = get_scene(*scene, 64, &mut rng);
            config.validate().unwrap();
            assert!(!world.is_empty(), "{scene:?} has no geometry");
        }
    }

    #[test]
    fn cover_photo_is_seeded() {
        let a = get_geometry(SceneType::CoverPhoto, &mut SmallRng::seed_from_u64(3));
        let b = get_geometry(SceneType::CoverPhoto, &mut SmallRng::seed_from_u64(3));
        assert_eq!(a.len(), b.len());
        assert_eq!(a.bounding_box(), b.bounding_box());
        // ground + field + three feature spheres
        assert!(a.len() > 4);
    }
}
