//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`HS_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use hyperscope_core::Camera;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Camera lens overrides
    #[serde(default)]
    pub camera: CameraConfig,
    /// Which scene to run
    #[serde(default)]
    pub scene: SceneConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Frame loop configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`HS_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // User config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // HS_SCENE__PRESET=town -> scene.preset = "town"
        figment = figment.merge(Env::prefixed("HS_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Camera lens configuration
///
/// Presets bring their own camera; any field set here replaces the
/// preset's value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Aspect ratio of the output surface
    pub aspect: f32,
    /// Field of view in degrees
    pub fov: Option<f32>,
    /// Depth aspect of the fourth axis
    pub aspect_4: Option<f32>,
    /// Near clipping plane
    pub near: Option<f32>,
    /// Far clipping plane
    pub far: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect: 4.0 / 3.0,
            fov: None,
            aspect_4: None,
            near: None,
            far: None,
        }
    }
}

impl CameraConfig {
    /// Apply the configured lens settings to a camera
    pub fn apply(&self, camera: &mut Camera) {
        camera.aspect = self.aspect;
        if let Some(fov) = self.fov {
            camera.fov = fov.to_radians();
        }
        if let Some(aspect_4) = self.aspect_4 {
            camera.aspect_4 = aspect_4;
        }
        if let Some(near) = self.near {
            camera.near = near;
        }
        if let Some(far) = self.far {
            camera.far = far;
        }
    }
}

/// Scene selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Built-in preset name, used when `path` is unset
    pub preset: String,
    /// RON scene file
    pub path: Option<String>,
    /// Overrides the scene's depth color range
    pub color_max: Option<f32>,
    /// Attach a skybox to RON scenes that don't have one
    pub skybox: bool,
    /// Seed for presets with random terrain
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            preset: "world".to_string(),
            path: None,
            color_max: None,
            skybox: true,
            seed: 0,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Alpha of the depth color on every shape
    pub shape_opacity: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self { shape_opacity: 0.2 }
    }
}

/// Frame loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frames to run before exiting
    pub frames: u32,
    /// Log frame statistics every this many frames
    pub report_every: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            report_every: 120,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scene.preset, "world");
        assert_eq!(config.rendering.shape_opacity, 0.2);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("preset"));
        assert!(toml.contains("shape_opacity"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = toml::from_str("[simulation]\nframes = 3\n").unwrap();
        assert_eq!(config.simulation.frames, 3);
        assert_eq!(config.simulation.report_every, 120);
        assert!(config.scene.skybox);
    }

    #[test]
    fn test_camera_overrides() {
        let mut camera = Camera::default();
        let config = CameraConfig {
            aspect: 2.0,
            fov: Some(90.0),
            far: Some(50.0),
            ..CameraConfig::default()
        };
        config.apply(&mut camera);

        assert_eq!(camera.aspect, 2.0);
        assert!((camera.fov - std::f32::consts::FRAC_PI_2).abs() < 0.0001);
        assert_eq!(camera.far, 50.0);
        assert_eq!(camera.near, Camera::default().near);
    }
}
