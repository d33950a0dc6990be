//! Camera setup and per-sample ray generation

use glam::Vec3A;
use rand::Rng;

use crate::{config::CameraConfig, ray::Ray, utils::random::rand_vec3_in_unit_disk};

/// A positionable camera with optional depth of field and motion blur.
///
/// All derived quantities are computed once, in [Camera::new].
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    /// Camera position in world space (same as `look_from`)
    center: Vec3A,
    /// World position of the center of the top-left pixel
    pixel00_loc: Vec3A,
    /// Offset from one pixel to the next one to the right
    pixel_delta_u: Vec3A,
    /// Offset from one pixel to the next one below
    pixel_delta_v: Vec3A,
    /// Defocus disk horizontal radius vector
    defocus_disk_u: Vec3A,
    /// Defocus disk vertical radius vector
    defocus_disk_v: Vec3A,
    defocus_angle: f32,
    motion_blur: bool,
}

impl Camera {
    /// Derives the viewing basis and pixel grid from `config`.
    pub fn new(config: &CameraConfig) -> Self {
        let image_width = config.image_width;
        let image_height = ((image_width as f32 / config.aspect_ratio) as u32).max(1);

        let center = config.look_from;

        // viewport dimensions, placed at the focus plane
        let h = (config.vertical_fov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        // orthonormal basis; `forward` points away from the scene
        let forward = (config.look_from - config.look_at).normalize();
        let right = config.view_up.cross(forward).normalize();
        let up = forward.cross(right);

        // across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * right;
        let viewport_v = viewport_height * -up;

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left =
            center - config.focus_dist * forward - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();

        Self {
            image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            defocus_disk_u: right * defocus_radius,
            defocus_disk_v: up * defocus_radius,
            defocus_angle: config.defocus_angle,
            motion_blur: config.motion_blur,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    /// Image height derived from the width and aspect ratio, at least 1.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Returns a ray through a random point of pixel (`i`, `j`), counted from the top-left.
    ///
    /// The origin is jittered over the defocus disk when depth of field is enabled,
    /// and the ray gets a random shutter time when motion blur is.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut impl Rng) -> Ray {
        let offset_u = rng.gen::<f32>() - 0.5;
        let offset_v = rng.gen::<f32>() - 0.5;
        let pixel_sample = self.pixel00_loc
            + (i as f32 + offset_u) * self.pixel_delta_u
            + (j as f32 + offset_v) * self.pixel_delta_v;

        let origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let time = if self.motion_blur { rng.gen() } else { 0.0 };

        Ray::new(origin, pixel_sample - origin, time)
    }

    /// Returns a random point on the camera's defocus disk
    fn defocus_disk_sample(&self, rng: &mut impl Rng) -> Vec3A {
        let p = rand_vec3_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn square_config() -> CameraConfig {
        CameraConfig {
            aspect_ratio: 1.0,
            image_width: 101,
            focus_dist: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn height_from_aspect_ratio() {
        let cam = Camera::new(&CameraConfig {
            image_width: 400,
            aspect_ratio: 2.0,
            ..Default::default()
        });
        assert_eq!(cam.image_height(), 200);

        // very wide images still get one row
        let wide = Camera::new(&CameraConfig {
            image_width: 10,
            aspect_ratio: 100.0,
            ..Default::default()
        });
        assert_eq!(wide.image_height(), 1);
    }

    #[test]
    fn center_pixel_looks_forward() {
        let cam = Camera::new(&square_config());
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..20 {
            let ray = cam.get_ray(50, 50, &mut rng);
            assert_eq!(ray.origin, Vec3A::ZERO);
            let dir = ray.direction.normalize();
            assert!(dir.dot(-Vec3A::Z) > 0.999, "center ray went {dir}");
        }
    }

    #[test]
    fn corners_follow_orientation() {
        let cam = Camera::new(&square_config());
        let mut rng = SmallRng::seed_from_u64(0);
        let top_left = cam.get_ray(0, 0, &mut rng).direction;
        assert!(top_left.x < 0.0 && top_left.y > 0.0);
        let bottom_right = cam.get_ray(100, 100, &mut rng).direction;
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
        // 90 degree fov puts the edge of the viewport at 45 degrees
        assert!((top_left.y / -top_left.z - 1.0).abs() < 0.03);
    }

    #[test]
    fn defocus_jitters_origin_within_disk() {
        let config = CameraConfig {
            defocus_angle: 10.0,
            focus_dist: 2.0,
            ..square_config()
        };
        let radius = 2.0 * (5.0f32).to_radians().tan();
        let cam = Camera::new(&config);
        let mut rng = SmallRng::seed_from_u64(1);

        let mut moved = false;
        for _ in 0..50 {
            let ray = cam.get_ray(50, 50, &mut rng);
            assert!(ray.origin.z.abs() < 1e-6);
            assert!(ray.origin.length() <= radius + 1e-5);
            moved |= ray.origin != Vec3A::ZERO;
        }
        assert!(moved);
    }

    #[test]
    fn shutter_time() {
        let mut rng = SmallRng::seed_from_u64(2);
        let blurred = Camera::new(&square_config());
        let times: Vec<f32> = (0..50).map(|_| blurred.get_ray(0, 0, &mut rng).time).collect();
        assert!(times.iter().all(|t| (0.0..1.0).contains(t)));
        assert!(times.iter().any(|&t| t > 0.0));

        let still = Camera::new(&CameraConfig {
            motion_blur: false,
            ..square_config()
        });
        assert!((0..50).all(|_| still.get_ray(0, 0, &mut rng).time == 0.0));
    }
}
