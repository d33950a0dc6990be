//! Render an image given a [Camera] and a [Hittable].

use glam::Vec3A;
use rand::{rngs::SmallRng, Rng, SeedableRng};

#[cfg(feature = "parallel")]
use {indicatif::ParallelProgressIterator, rayon::prelude::*};

#[cfg(not(feature = "parallel"))]
use indicatif::ProgressIterator;

use crate::{
    camera::Camera,
    color::{Color, VecExt},
    hittables::Hittable,
    utils::progress::get_progressbar,
};

/// Mixes a base seed with a pixel index, so each pixel gets its own stream.
#[inline]
fn pixel_seed(seed: u64, index: u64) -> u64 {
    seed ^ index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Image Renderer storing scene context values such as image dimensions and samples per pixel
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    image_width: u32,
    image_height: u32,
    samples_per_pixel: u32,
    bounce_depth: u16,
}

impl Renderer {
    /// Creates a new [Renderer].
    pub fn new(
        image_width: u32,
        image_height: u32,
        samples_per_pixel: u32,
        bounce_depth: u16,
    ) -> Self {
        Self {
            image_width,
            image_height,
            samples_per_pixel,
            bounce_depth,
        }
    }

    /// Number of pixels in the output image
    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    /// Calculates the averaged, linear color of the pixel at image coordinates (`x`, `y`)
    ///
    /// Uses the provided [Camera] to generate `samples_per_pixel` rays through the pixel,
    /// then averages their shaded colors.
    #[inline]
    fn compute_pixel_v(
        &self,
        cam: &Camera,
        world: &(impl Hittable + ?Sized),
        x: u32,
        y: u32,
        rng: &mut impl Rng,
    ) -> Color {
        let sum: Vec3A = (0..self.samples_per_pixel)
            .map(|_| cam.get_ray(x, y, rng).shade(world, self.bounce_depth, rng))
            .sum();

        // Account for number of samples
        sum * (self.samples_per_pixel as f32).recip()
    }

    /// Renders every pixel, drawing random numbers from a generator built per pixel by `make_rng`.
    ///
    /// `make_rng` receives the row-major pixel index. Returns `width * height` gamma corrected
    /// colors, top-to-bottom and left-to-right, whether or not pixels are rendered in parallel.
    pub fn render_pixels_with<R, F>(
        &self,
        cam: &Camera,
        world: &(impl Hittable + ?Sized),
        make_rng: F,
    ) -> Vec<[u8; 3]>
    where
        R: Rng,
        F: Fn(u64) -> R + Sync,
    {
        let progress_bar =
            get_progressbar(self.pixel_count() as u64).with_prefix("Generating pixels");
        let width = self.image_width as usize;

        let shade_pixel = |index: usize| {
            let x = (index % width) as u32;
            let y = (index / width) as u32;
            let mut rng = make_rng(index as u64);
            self.compute_pixel_v(cam, world, x, y, &mut rng).to_rgb8()
        };

        #[cfg(feature = "parallel")]
        let pixels = (0..self.pixel_count())
            .into_par_iter()
            .progress_with(progress_bar)
            .map(shade_pixel)
            .collect();

        #[cfg(not(feature = "parallel"))]
        let pixels = (0..self.pixel_count())
            .progress_with(progress_bar)
            .map(shade_pixel)
            .collect();

        pixels
    }

    /// Renders every pixel with a [SmallRng] per pixel, seeded from `seed` and the pixel's index.
    ///
    /// The same `seed` always produces the same bytes.
    pub fn render_pixels(
        &self,
        cam: &Camera,
        world: &(impl Hittable + ?Sized),
        seed: u64,
    ) -> Vec<[u8; 3]> {
        self.render_pixels_with(cam, world, |index| {
            SmallRng::seed_from_u64(pixel_seed(seed, index))
        })
    }

    /// Generates an image from the given scene.
    ///
    /// A scene consists of a [Camera] and some [Hittable].
    /// This functions outputs its progress to the commandline.
    pub fn render_scene(
        &self,
        cam: &Camera,
        world: &(impl Hittable + ?Sized),
        seed: u64,
    ) -> image::RgbImage {
        let start = std::time::Instant::now();
        let pixels = self.render_pixels(cam, world, seed);
        log::info!(
            "rendered {}x{} pixels at {} samples in {:.2?}",
            self.image_width,
            self.image_height,
            self.samples_per_pixel,
            start.elapsed()
        );

        // Allocate image buffer
        let mut img_buf: image::RgbImage =
            image::ImageBuffer::new(self.image_width, self.image_height);
        for (pixel, rgb) in img_buf.pixels_mut().zip(pixels) {
            *pixel = image::Rgb(rgb);
        }
        img_buf
    }
}
