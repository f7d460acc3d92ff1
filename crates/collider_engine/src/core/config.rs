//! # Unified Configuration
//!
//! Every tunable of the collision engine in one place: engine behaviour
//! (logging), the movement resolver, mesh decomposition, the authoring session
//! and the collider store. [`CollisionConfig`] is the top-level structure and
//! can be loaded from TOML or RON through the [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Engine**: logging
//! - **Resolver**: actor footprint, ground fallback, height easing
//! - **Decomposition**: layer count, normal thresholds, minimum sizes
//! - **Authoring**: surface resolution, thickness clamp, camera speed
//! - **Store**: where setups are written

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message()))
    }
}

/// # Engine Settings
///
/// Behaviour shared by every subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Log level filter handed to `env_logger` when `RUST_LOG` is unset
    pub log_level: String,
}

impl EngineSettings {
    /// Create engine settings with the default log level
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        ensure(LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()), || {
            format!("unknown log level '{}'", self.log_level)
        })
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// # Resolver Configuration
///
/// Actor footprint and ground-height behaviour of the movement resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Half-width of the actor's footprint
    pub actor_radius: f32,
    /// Added to every sampled floor height
    pub collision_height_offset: f32,
    /// Ground height used where no floor zone covers the actor
    pub default_ground_height: f32,
    /// Largest upward height change per step
    pub max_rise_per_step: f32,
    /// Largest downward height change per step
    pub max_fall_per_step: f32,
    /// Distance under which the height snaps to its target
    pub snap_threshold: f32,
    /// Also test a proxy box against registered scene meshes
    pub use_mesh_collision: bool,
    /// Height of the mesh proxy box
    pub proxy_height: f32,
}

impl ResolverConfig {
    /// Create the default resolver configuration
    pub fn new() -> Self {
        Self {
            actor_radius: 0.34,
            collision_height_offset: 0.0,
            default_ground_height: 0.0,
            max_rise_per_step: 0.3,
            max_fall_per_step: 0.2,
            snap_threshold: 0.01,
            use_mesh_collision: false,
            proxy_height: 1.0,
        }
    }

    /// Set the actor footprint half-width
    pub fn with_actor_radius(mut self, radius: f32) -> Self {
        self.actor_radius = radius;
        self
    }

    /// Set the offset added to sampled floor heights
    pub fn with_collision_height_offset(mut self, offset: f32) -> Self {
        self.collision_height_offset = offset;
        self
    }

    /// Set the fallback ground height
    pub fn with_default_ground_height(mut self, height: f32) -> Self {
        self.default_ground_height = height;
        self
    }

    /// Set the per-step easing limits
    pub fn with_easing(mut self, max_rise: f32, max_fall: f32) -> Self {
        self.max_rise_per_step = max_rise;
        self.max_fall_per_step = max_fall;
        self
    }

    /// Enable the mesh-precision path
    pub fn with_mesh_collision(mut self, enabled: bool) -> Self {
        self.use_mesh_collision = enabled;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.actor_radius > 0.0, || "actor radius must be positive".to_string())?;
        ensure(self.max_rise_per_step > 0.0 && self.max_fall_per_step > 0.0, || {
            "height easing steps must be positive".to_string()
        })?;
        ensure(self.snap_threshold >= 0.0, || "snap threshold cannot be negative".to_string())?;
        ensure(self.proxy_height > 0.0, || "proxy height must be positive".to_string())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Decomposition Configuration
///
/// Parameters of the layer-sliced mesh decomposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompositionConfig {
    /// Number of horizontal slabs the mesh height is cut into
    pub layer_count: usize,
    /// A face is horizontal when its rounded `|normal.y|` exceeds this
    pub horizontal_threshold: f32,
    /// A face is vertical when its rounded `|normal.y|` is below this
    pub vertical_threshold: f32,
    /// Both sides of a floor rectangle must exceed this
    pub min_floor_size: f32,
    /// Smallest number of faces that forms a wall
    pub min_wall_faces: usize,
    /// Walls must be taller than this
    pub min_wall_height: f32,
    /// One horizontal side of a wall must exceed this
    pub min_wall_width: f32,
    /// Cells per axis of sampled floor height maps
    pub height_map_resolution: usize,
    /// Thickness given to detected floors
    pub floor_thickness: f32,
}

impl DecompositionConfig {
    /// Create the default decomposition configuration
    pub fn new() -> Self {
        Self {
            layer_count: 10,
            horizontal_threshold: 0.7,
            vertical_threshold: 0.3,
            min_floor_size: 0.5,
            min_wall_faces: 3,
            min_wall_height: 0.5,
            min_wall_width: 0.3,
            height_map_resolution: 10,
            floor_thickness: 0.2,
        }
    }

    /// Set the number of layers
    pub fn with_layer_count(mut self, layers: usize) -> Self {
        self.layer_count = layers;
        self
    }

    /// Set the height map resolution of detected floors
    pub fn with_height_map_resolution(mut self, resolution: usize) -> Self {
        self.height_map_resolution = resolution;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.layer_count > 0, || "layer count must be at least 1".to_string())?;
        ensure(self.height_map_resolution > 0, || "height map resolution must be at least 1".to_string())?;
        ensure(self.vertical_threshold < self.horizontal_threshold, || {
            format!(
                "vertical threshold {} must be below horizontal threshold {}",
                self.vertical_threshold, self.horizontal_threshold
            )
        })?;
        ensure(self.min_wall_faces > 0, || "walls need at least one face".to_string())
    }
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Authoring Configuration
///
/// Behaviour of the interactive authoring session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoringConfig {
    /// Cells per axis of height maps generated for placed floors and ramps
    pub height_map_resolution: usize,
    /// Lower clamp of floor and ramp Y scale while resizing
    pub min_surface_scale_y: f32,
    /// Upper clamp of floor and ramp Y scale while resizing
    pub max_surface_scale_y: f32,
    /// Smallest scale any axis can be resized to
    pub min_scale: f32,
    /// Fly camera speed in units per second
    pub camera_speed: f32,
}

impl AuthoringConfig {
    /// Create the default authoring configuration
    pub fn new() -> Self {
        Self {
            height_map_resolution: 10,
            min_surface_scale_y: 0.1,
            max_surface_scale_y: 0.5,
            min_scale: 0.05,
            camera_speed: 10.0,
        }
    }

    /// Set the resolution of generated surfaces
    pub fn with_height_map_resolution(mut self, resolution: usize) -> Self {
        self.height_map_resolution = resolution;
        self
    }

    /// Set the fly camera speed
    pub fn with_camera_speed(mut self, speed: f32) -> Self {
        self.camera_speed = speed;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.height_map_resolution > 0, || "height map resolution must be at least 1".to_string())?;
        ensure(
            0.0 < self.min_surface_scale_y && self.min_surface_scale_y <= self.max_surface_scale_y,
            || "surface Y scale clamp must be positive and ordered".to_string(),
        )?;
        ensure(self.min_scale > 0.0, || "minimum scale must be positive".to_string())
    }
}

impl Default for AuthoringConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Store Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one JSON file per collision setup
    pub directory: String,
}

impl StoreConfig {
    /// Create the default store configuration
    pub fn new() -> Self {
        Self {
            directory: "collision_data".to_string(),
        }
    }

    /// Set the store directory
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(!self.directory.is_empty(), || "store directory cannot be empty".to_string())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Collision Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Engine behaviour
    pub engine: EngineSettings,
    /// Movement resolver
    pub resolver: ResolverConfig,
    /// Mesh decomposition
    pub decomposition: DecompositionConfig,
    /// Authoring session
    pub authoring: AuthoringConfig,
    /// Collider store
    pub store: StoreConfig,
}

impl CollisionConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.resolver.validate()?;
        self.decomposition.validate()?;
        self.authoring.validate()?;
        self.store.validate()
    }
}

impl Config for CollisionConfig {
    fn check(&self) -> Result<(), ConfigError> {
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults_are_valid() {
        let config = CollisionConfig::default();
        config.validate().unwrap();
        assert_eq!(config.resolver.actor_radius, 0.34);
        assert_eq!(config.decomposition.layer_count, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let text = "[resolver]\nactor_radius = 0.5\n\n[store]\ndirectory = \"data\"\n";
        let config = CollisionConfig::from_str_with(text, ConfigFormat::Toml).unwrap();
        assert_eq!(config.resolver.actor_radius, 0.5);
        assert_eq!(config.resolver.max_fall_per_step, 0.2);
        assert_eq!(config.store.directory, "data");
    }

    #[test]
    fn test_ron_round_trip() {
        let config = CollisionConfig {
            resolver: ResolverConfig::new().with_mesh_collision(true),
            ..Default::default()
        };
        let text = config.to_string_with(ConfigFormat::Ron).unwrap();
        let back = CollisionConfig::from_str_with(&text, ConfigFormat::Ron).unwrap();
        assert!(back.resolver.use_mesh_collision);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let text = "[decomposition]\nlayer_count = 0\n";
        assert!(matches!(
            CollisionConfig::from_str_with(text, ConfigFormat::Toml),
            Err(ConfigError::Invalid(_))
        ));
        let settings = EngineSettings::new().with_log_level("loud");
        assert!(settings.validate().is_err());
    }
}
