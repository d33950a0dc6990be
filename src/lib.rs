mod utils;

// public: interval and bounding box math
pub mod bounds;
pub mod interval;
// public: acceleration structure
pub mod bvh;
// public: `Hittable` trait and geometry
pub mod hittables;
// public: materials and scattering
pub mod material;
// public: rays and shading
pub mod ray;
// public: camera setup and its configuration
pub mod camera;
pub mod config;
// public: color output
pub mod color;
// public: renderer functionality
pub mod render;
// public: commandline parser
pub mod cli;
// public: scene selection
pub mod scenes;
