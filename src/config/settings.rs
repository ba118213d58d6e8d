//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use gauges_core::{Size, Theme, ThemeResolver, DEFAULT_FRAME_RATE};
use gauges_types::DisplayConfig;

use super::defaults::default_displays;
use crate::core::AppOptions;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

/// Whole-dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Draw the frame-rate badge in the top-left corner
    #[serde(default)]
    pub show_fps: bool,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default = "default_displays")]
    pub displays: Vec<DisplayConfig>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_title() -> String {
    "Gauges Dashboard".to_string()
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            title: default_title(),
            frame_rate: default_frame_rate(),
            show_fps: false,
            window: WindowConfig::default(),
            theme: ThemeConfig::default(),
            displays: default_displays(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the per-user config directory.
    ///
    /// A missing file yields the default dashboard.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::info!(
                "No config at {}, using the default dashboard",
                config_path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Save configuration to the per-user config directory
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_path()?)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "gauges", "gauges")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        if config.version > CONFIG_VERSION {
            log::warn!(
                "Config {} has version {}, newer than supported version {}",
                path.display(),
                config.version,
                CONFIG_VERSION
            );
        }
        log::info!(
            "Loaded config {} with {} display(s)",
            path.display(),
            config.displays.len()
        );
        Ok(config)
    }

    /// Save configuration to a specific file path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {}", path.display()))?;
        Ok(())
    }

    /// Options for the application loop
    pub fn app_options(&self) -> AppOptions {
        AppOptions {
            title: self.title.clone(),
            size: self.window.size(),
            frame_rate: self.frame_rate,
            show_fps: self.show_fps,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    1024
}

impl WindowConfig {
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

/// Active theme: a built-in theme by name, or a custom role map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActiveTheme {
    Builtin(String),
    Custom(Theme),
}

/// Theme selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Built-in theme consulted for roles the active theme lacks.
    /// `None` disables the fallback.
    #[serde(default = "default_theme_name")]
    pub default: Option<String>,
    #[serde(default)]
    pub active: Option<ActiveTheme>,
}

fn default_theme_name() -> Option<String> {
    Some("solarized-dark".to_string())
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: default_theme_name(),
            active: None,
        }
    }
}

impl ThemeConfig {
    /// Build the resolver described by this config
    pub fn resolver(&self) -> Result<ThemeResolver> {
        let default = self
            .default
            .as_deref()
            .map(|name| builtin_theme(name).context("Invalid default theme"))
            .transpose()?;
        let resolver = ThemeResolver::with_default(default);

        match &self.active {
            Some(ActiveTheme::Builtin(name)) => {
                resolver.set_theme(builtin_theme(name).context("Invalid active theme")?)
            }
            Some(ActiveTheme::Custom(theme)) => resolver.set_theme(theme.clone()),
            None => {}
        }
        Ok(resolver)
    }
}

fn builtin_theme(name: &str) -> Result<Theme> {
    Theme::builtin(name).ok_or_else(|| anyhow::anyhow!("Unknown built-in theme '{}'", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauges_core::{Color, GaugeError};
    use gauges_types::roles;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.displays.len(), 3);
        assert_eq!(config.app_options().size, Size::new(1280.0, 1024.0));
        assert_eq!(config.app_options().frame_rate, 50);
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = std::env::temp_dir().join(format!("gauges-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.json");
        let config = AppConfig {
            title: "Cockpit".into(),
            frame_rate: 30,
            show_fps: true,
            ..Default::default()
        };
        config.save_to_path(&path).unwrap();
        assert_eq!(AppConfig::load_from_path(&path).unwrap(), config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_an_error_with_context() {
        let err = AppConfig::load_from_path(Path::new("/nonexistent/gauges.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/gauges.json"));
    }

    #[test]
    fn test_custom_theme_falls_back_to_default() {
        let config: ThemeConfig = serde_json::from_str(
            r##"{"active": {"name": "mine", "colors": {"needle": "#ff0000"}}}"##,
        )
        .unwrap();
        let resolver = config.resolver().unwrap();
        assert_eq!(
            resolver.resolve(roles::NEEDLE).unwrap(),
            Color::from_rgb8(255, 0, 0)
        );
        assert_eq!(
            resolver.resolve(roles::BACKGROUND).unwrap(),
            Theme::solarized_dark().get(roles::BACKGROUND).unwrap()
        );
    }

    #[test]
    fn test_theme_without_default_reports_unknown_role() {
        let config: ThemeConfig =
            serde_json::from_str(r#"{"default": null, "active": "solarized-light"}"#).unwrap();
        let resolver = config.resolver().unwrap();
        assert!(resolver.resolve(roles::BACKGROUND).is_ok());
        assert!(matches!(
            resolver.resolve("no-such-role"),
            Err(GaugeError::UnknownRole { .. })
        ));
    }

    #[test]
    fn test_unknown_builtin_is_rejected() {
        let config = ThemeConfig {
            default: Some("neon".into()),
            active: None,
        };
        assert!(config.resolver().is_err());
    }
}
