//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `render.link_rel`
//! - `render.link_target`
//! - `render.image_class`
//! - `render.embed_class`

mod expand;

use folio_renderer::RenderOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Upper bound accepted for `render.max_depth`.
pub const MAX_DEPTH_LIMIT: usize = 4096;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the nesting limit.
    pub max_depth: Option<usize>,
    /// Override the link target. An empty string disables the attribute.
    pub link_target: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// The `[render]` section.
///
/// Empty strings disable the corresponding attribute.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Subtrees nested deeper than this are dropped.
    pub max_depth: usize,
    /// `rel` attribute on links.
    pub link_rel: String,
    /// `target` attribute on links.
    pub link_target: String,
    /// Class attribute on images.
    pub image_class: Option<String>,
    /// Class attribute on the video embed wrapper.
    pub embed_class: Option<String>,
    /// Default embed frame width.
    pub embed_width: u32,
    /// Default embed frame height.
    pub embed_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let defaults = RenderOptions::default();
        Self {
            max_depth: defaults.max_depth,
            link_rel: defaults.link_rel.unwrap_or_default(),
            link_target: defaults.link_target.unwrap_or_default(),
            image_class: defaults.image_class,
            embed_class: defaults.embed_class,
            embed_width: defaults.embed_width,
            embed_height: defaults.embed_height,
        }
    }
}

impl RenderConfig {
    /// Convert into renderer options.
    #[must_use]
    pub fn to_options(&self) -> RenderOptions {
        RenderOptions {
            max_depth: self.max_depth,
            link_rel: non_empty(&self.link_rel),
            link_target: non_empty(&self.link_target),
            image_class: self.image_class.as_deref().and_then(non_empty),
            embed_class: self.embed_class.as_deref().and_then(non_empty),
            embed_width: self.embed_width,
            embed_height: self.embed_height,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`render.link_rel`").
        field: String,
        /// Error message (e.g., "${`FOLIO_REL`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values. The result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final values are out of range.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Renderer options derived from the `[render]` section.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        self.render.to_options()
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(max_depth) = settings.max_depth {
            self.render.max_depth = max_depth;
        }
        if let Some(link_target) = &settings.link_target {
            self.render.link_target.clone_from(link_target);
        }
    }

    /// Search for a config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically at the end of [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let render = &self.render;

        if render.max_depth == 0 {
            return Err(ConfigError::Validation(
                "render.max_depth must be greater than 0".to_owned(),
            ));
        }
        if render.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Validation(format!(
                "render.max_depth cannot exceed {MAX_DEPTH_LIMIT}"
            )));
        }
        if render.embed_width == 0 || render.embed_height == 0 {
            return Err(ConfigError::Validation(
                "render.embed_width and render.embed_height must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let render = &mut self.render;
        render.link_rel = expand::expand_env(&render.link_rel, "render.link_rel")?;
        render.link_target = expand::expand_env(&render.link_target, "render.link_target")?;
        expand::expand_env_opt(&mut render.image_class, "render.image_class")?;
        expand::expand_env_opt(&mut render.embed_class, "render.embed_class")?;
        Ok(())
    }
}
