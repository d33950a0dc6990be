//! Camera configuration and its validation

use std::path::{Path, PathBuf};

use glam::Vec3A;
use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a [CameraConfig]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid camera parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("failed to read camera config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse camera config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The recognized camera parameters, consumed once when a [crate::camera::Camera] is set up.
///
/// Missing fields in a config file take their [Default] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Image width over height
    pub aspect_ratio: f32,
    /// Image width in pixels
    pub image_width: u32,
    /// Rays traced per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per ray
    pub max_depth: u16,
    /// Vertical field of view, in degrees
    pub vertical_fov: f32,
    pub look_from: Vec3A,
    pub look_at: Vec3A,
    pub view_up: Vec3A,
    /// Aperture cone angle at the focus plane, in degrees; zero disables depth of field
    pub defocus_angle: f32,
    /// Distance from `look_from` to the plane of perfect focus
    pub focus_dist: f32,
    /// Whether rays carry a random shutter time; otherwise every ray is at time 0
    pub motion_blur: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 10,
            max_depth: 10,
            vertical_fov: 90.0,
            look_from: Vec3A::ZERO,
            look_at: -Vec3A::Z,
            view_up: Vec3A::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            motion_blur: true,
        }
    }
}

impl CameraConfig {
    /// Reads a JSON camera config from `path` and validates it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every parameter describes a usable camera.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(name: &'static str, reason: impl Into<String>) -> Result<(), ConfigError> {
            Err(ConfigError::InvalidParameter {
                name,
                reason: reason.into(),
            })
        }

        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return invalid("aspect_ratio", format!("{} is not positive", self.aspect_ratio));
        }
        if self.image_width == 0 {
            return invalid("image_width", "must be at least 1");
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel", "must be at least 1");
        }
        if self.max_depth == 0 {
            return invalid("max_depth", "must be at least 1");
        }
        if !(self.vertical_fov > 0.0 && self.vertical_fov < 180.0) {
            return invalid(
                "vertical_fov",
                format!("{} is outside (0, 180) degrees", self.vertical_fov),
            );
        }
        if !(self.focus_dist > 0.0) {
            return invalid("focus_dist", format!("{} is not positive", self.focus_dist));
        }
        if !(self.defocus_angle >= 0.0) {
            return invalid("defocus_angle", format!("{} is negative", self.defocus_angle));
        }
        if self.look_from == self.look_at {
            return invalid("look_at", "coincides with look_from");
        }
        if (self.look_from - self.look_at).cross(self.view_up) == Vec3A::ZERO {
            return invalid("view_up", "is parallel to the viewing direction");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        CameraConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_parameters() {
        let cases = [
            CameraConfig {
                aspect_ratio: 0.0,
                ..Default::default()
            },
            CameraConfig {
                samples_per_pixel: 0,
                ..Default::default()
            },
            CameraConfig {
                vertical_fov: 180.0,
                ..Default::default()
            },
            CameraConfig {
                focus_dist: -1.0,
                ..Default::default()
            },
            CameraConfig {
                view_up: Vec3A::Z,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidParameter { .. })),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: CameraConfig =
            serde_json::from_str(r#"{ "image_width": 64, "look_from": [13.0, 2.0, 3.0] }"#)
                .unwrap();
        assert_eq!(config.image_width, 64);
        assert_eq!(config.look_from, Vec3A::new(13.0, 2.0, 3.0));
        assert_eq!(config.vertical_fov, CameraConfig::default().vertical_fov);
    }

    #[test]
    fn unknown_fields_rejected() {
        let res = serde_json::from_str::<CameraConfig>(r#"{ "fov": 20.0 }"#);
        assert!(res.is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let res = CameraConfig::from_path("/nonexistent/camera.json");
        assert!(matches!(res, Err(ConfigError::Io { .. })));
    }
}
