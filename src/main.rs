use anyhow::Context;
use rand::{rngs::SmallRng, SeedableRng};

use glint::{
    bvh::BvhNode,
    camera::Camera,
    cli,
    config::CameraConfig,
    render::Renderer,
    scenes,
};

fn main() -> anyhow::Result<()> {
    // Parsing cli args
    let cli_args = cli::parse_args();

    env_logger::Builder::new()
        .filter_level(cli_args.verbosity.log_level_filter())
        .init();

    // set up enviroment
    let seed = if let Some(seed) = cli_args.seed {
        // use user-provided seed if available
        seed
    } else if cfg!(debug_assertions) {
        // if debugging, use deterministic seed
        0
    } else {
        // otherwise real psuedo-randomness
        rand::random()
    };
    log::info!("using seed {seed}");
    let mut rng = SmallRng::seed_from_u64(seed);

    // Get scene
    let (mut config, world) = scenes::get_scene(cli_args.scene, cli_args.image_width, &mut rng);
    if let Some(path) = &cli_args.camera_config {
        config = CameraConfig::from_path(path)
            .with_context(|| format!("failed to load camera from {path:?}"))?;
    }
    if let Some(samples) = cli_args.samples_per_pixel {
        config.samples_per_pixel = samples;
    }
    if let Some(depth) = cli_args.bounce_depth {
        config.max_depth = depth;
    }
    config.validate().context("invalid camera configuration")?;

    log::info!(
        "scene {:?}: {} objects, {} samples per pixel, {} bounces",
        cli_args.scene,
        world.len(),
        config.samples_per_pixel,
        config.max_depth
    );
    let world = BvhNode::with_split(world, cli_args.split, &mut rng);

    let cam = Camera::new(&config);
    let renderer = Renderer::new(
        cam.image_width(),
        cam.image_height(),
        config.samples_per_pixel,
        config.max_depth,
    );

    let img_buf = renderer.render_scene(&cam, &world, seed);

    // write image to file
    img_buf
        .save(&cli_args.output)
        .with_context(|| format!("failed to write {:?}", cli_args.output))?;
    log::info!("Image written to {:?}", cli_args.output);

    Ok(())
}
