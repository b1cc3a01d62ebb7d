//! Configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. User config: `~/.config/codeweaver/config.toml` (XDG) or platform config dir
//! 2. Project config: `.codeweaver.toml`
//! 3. Environment variables: `CODEWEAVER_*`, nested keys separated by `__`
//!    (e.g. `CODEWEAVER_LAYOUT__ALGORITHM=hierarchical`)
//!
//! Every key is optional; omitted values take the documented defaults.
//!
//! ```toml
//! [layout]
//! algorithm = "force-directed"
//! node_spacing = 10.0
//! center_force = 0.01
//! repulsion = 20.0
//! attraction = 0.02
//! damping = 0.85
//! iterations = 300
//! seed = 42
//!
//! [encoding]
//! high_usage_threshold = 10
//!
//! [transition]
//! duration_secs = 1.2
//! ```
//!
//! Values are validated when turned into [`LayoutConfig`] (or checked with
//! [`Config::validate`]), so a bad file fails before any layout runs.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::InvalidConfig;
use crate::layout::{LayoutAlgorithm, DEFAULT_ENTRY_MARKER};

/// Project-level config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".codeweaver.toml";

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutSettings,
    pub encoding: EncodingConfig,
    pub transition: TransitionConfig,
}

/// Raw, unvalidated layout options as read from config sources.
///
/// Turn into a [`LayoutConfig`] with [`LayoutConfig::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Which layout strategy to run.
    pub algorithm: LayoutAlgorithm,
    /// Characteristic distance between nodes (force-directed).
    pub node_spacing: f32,
    /// Pull toward the origin per unit distance (force-directed).
    pub center_force: f32,
    /// Inverse-square repulsion constant (force-directed).
    pub repulsion: f32,
    /// Spring constant along edges (force-directed).
    pub attraction: f32,
    /// Fraction of velocity kept per iteration, in `(0, 1)` (force-directed).
    pub damping: f32,
    /// Relaxation iterations (force-directed).
    pub iterations: usize,
    /// RNG seed for initial placement and edge curves; random when absent.
    pub seed: Option<u64>,
    /// Name fragment marking call-graph entry points.
    pub entry_marker: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            algorithm: LayoutAlgorithm::ForceDirected,
            node_spacing: 10.0,
            center_force: 0.01,
            repulsion: 20.0,
            attraction: 0.02,
            damping: 0.85,
            iterations: 300,
            seed: None,
            entry_marker: DEFAULT_ENTRY_MARKER.to_string(),
        }
    }
}

/// Validated layout configuration. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutConfig {
    settings: LayoutSettings,
}

impl LayoutConfig {
    /// Validate raw settings.
    pub fn new(settings: LayoutSettings) -> Result<Self, InvalidConfig> {
        positive("node_spacing", settings.node_spacing)?;
        positive("center_force", settings.center_force)?;
        positive("repulsion", settings.repulsion)?;
        positive("attraction", settings.attraction)?;
        if !(settings.damping > 0.0 && settings.damping < 1.0) {
            return Err(InvalidConfig::new(
                "damping",
                format!("must be within (0, 1), got {}", settings.damping),
            ));
        }
        if settings.iterations == 0 {
            return Err(InvalidConfig::new("iterations", "must be at least 1"));
        }
        Ok(Self { settings })
    }

    /// Default settings with another algorithm.
    pub fn with_algorithm(algorithm: LayoutAlgorithm) -> Self {
        Self {
            settings: LayoutSettings {
                algorithm,
                ..LayoutSettings::default()
            },
        }
    }

    /// Same config with a fixed RNG seed.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self
    }

    pub fn algorithm(&self) -> LayoutAlgorithm {
        self.settings.algorithm
    }

    pub fn node_spacing(&self) -> f32 {
        self.settings.node_spacing
    }

    pub fn center_force(&self) -> f32 {
        self.settings.center_force
    }

    pub fn repulsion(&self) -> f32 {
        self.settings.repulsion
    }

    pub fn attraction(&self) -> f32 {
        self.settings.attraction
    }

    pub fn damping(&self) -> f32 {
        self.settings.damping
    }

    pub fn iterations(&self) -> usize {
        self.settings.iterations
    }

    pub fn seed(&self) -> Option<u64> {
        self.settings.seed
    }

    pub fn entry_marker(&self) -> &str {
        &self.settings.entry_marker
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }
}

impl TryFrom<LayoutSettings> for LayoutConfig {
    type Error = InvalidConfig;

    fn try_from(settings: LayoutSettings) -> Result<Self, Self::Error> {
        Self::new(settings)
    }
}

/// Thresholds and factors for node and edge styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Call counts strictly above this are styled as hot.
    pub high_usage_threshold: u64,
    /// Extra scale per unit of `ln(1 + calls)` for hot nodes.
    pub hot_scale_per_log: f32,
    /// Upper bound on any node scale.
    pub max_scale: f32,
    /// Hue rotation (degrees) approached as depth grows.
    pub depth_hue_shift: f32,
    /// Lightness reduction approached as depth grows.
    pub depth_lightness_drop: f32,
    /// Points sampled along each edge curve.
    pub curve_samples: usize,
    /// Midpoint offset bound, as a fraction of edge length.
    pub curve_bulge: f32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            high_usage_threshold: 10,
            hot_scale_per_log: 0.25,
            max_scale: 3.0,
            depth_hue_shift: 24.0,
            depth_lightness_drop: 0.2,
            curve_samples: 24,
            curve_bulge: 0.2,
        }
    }
}

impl EncodingConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        non_negative("hot_scale_per_log", self.hot_scale_per_log)?;
        positive("max_scale", self.max_scale)?;
        non_negative("depth_hue_shift", self.depth_hue_shift)?;
        if !(0.0..=1.0).contains(&self.depth_lightness_drop) {
            return Err(InvalidConfig::new(
                "depth_lightness_drop",
                format!("must be within [0, 1], got {}", self.depth_lightness_drop),
            ));
        }
        if self.curve_samples < 2 {
            return Err(InvalidConfig::new("curve_samples", "must be at least 2"));
        }
        non_negative("curve_bulge", self.curve_bulge)
    }
}

/// Animation timing between successive layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Seconds a layout transition lasts.
    pub duration_secs: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self { duration_secs: 1.2 }
    }
}

impl TransitionConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        positive("duration_secs", self.duration_secs)
    }
}

impl Config {
    /// Load config with layered resolution (user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::user_config_path(), PROJECT_CONFIG_FILE)
    }

    /// Load from explicit user and project files, then the environment.
    ///
    /// Missing files are skipped.
    pub fn load_from(user: impl AsRef<Path>, project: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Figment::new()
            // Layer 1: User config (lowest priority)
            .merge(Toml::file(user.as_ref()))
            // Layer 2: Project config
            .merge(Toml::file(project.as_ref()))
            // Layer 3: Environment variables (highest priority)
            .merge(Env::prefixed("CODEWEAVER_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        LayoutConfig::new(self.layout.clone())?;
        self.encoding.validate()?;
        self.transition.validate()
    }

    /// The validated layout section.
    pub fn layout_config(&self) -> Result<LayoutConfig, InvalidConfig> {
        LayoutConfig::new(self.layout.clone())
    }

    /// User config path: ~/.config/codeweaver/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("codeweaver").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("codeweaver").join("config.toml"))
            .unwrap_or_default()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), InvalidConfig> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InvalidConfig::new(
            field,
            format!("must be a positive finite number, got {value}"),
        ))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), InvalidConfig> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidConfig::new(
            field,
            format!("must be a non-negative finite number, got {value}"),
        ))
    }
}
