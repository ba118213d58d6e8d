//! Theme resolution: semantic role -> color
//!
//! [`ThemeResolver`] holds the active theme and swaps it atomically.
//! Each frame renders against a [`Palette`], an immutable snapshot, so a
//! theme change never shows up half-applied within a frame.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use gauges_types::{Color, Theme};
use once_cell::sync::Lazy;

use crate::error::{GaugeError, Result};

/// Process-wide default theme, used only when a resolver is created
/// without an explicit default.
pub static DEFAULT_THEME: Lazy<Arc<Theme>> = Lazy::new(|| Arc::new(Theme::solarized_dark()));

/// Frame-stable view of the active and default themes
#[derive(Debug, Clone)]
pub struct Palette {
    active: Option<Arc<Theme>>,
    default: Option<Arc<Theme>>,
}

impl Palette {
    /// Palette over a single theme with no fallback
    pub fn from_theme(theme: Theme) -> Self {
        Self {
            active: Some(Arc::new(theme)),
            default: None,
        }
    }

    /// Color for `role`: the active theme first, then the default theme.
    ///
    /// Fails with `UnknownRole` when neither defines it.
    pub fn resolve(&self, role: &str) -> Result<Color> {
        if let Some(color) = self.active.as_ref().and_then(|t| t.get(role)) {
            return Ok(color);
        }
        if let Some(default) = &self.default {
            if let Some(color) = default.get(role) {
                if let Some(active) = &self.active {
                    log::trace!(
                        "Role '{}' missing from theme '{}', using default theme '{}'",
                        role,
                        active.name,
                        default.name
                    );
                }
                return Ok(color);
            }
        }
        Err(GaugeError::UnknownRole {
            role: role.to_string(),
        })
    }

    /// Like [`Palette::resolve`] but never fails
    pub fn resolve_or(&self, role: &str, fallback: Color) -> Color {
        self.resolve(role).unwrap_or(fallback)
    }

    /// Name of the theme colors are primarily taken from
    pub fn name(&self) -> Option<&str> {
        self.active
            .as_ref()
            .or(self.default.as_ref())
            .map(|t| t.name.as_str())
    }
}

/// Holder for the active theme, shared by the application and its handles
#[derive(Debug)]
pub struct ThemeResolver {
    active: ArcSwapOption<Theme>,
    default: Option<Arc<Theme>>,
}

impl ThemeResolver {
    /// Resolver whose default is the process-wide [`DEFAULT_THEME`]
    pub fn new() -> Self {
        Self {
            active: ArcSwapOption::empty(),
            default: Some(Arc::clone(&DEFAULT_THEME)),
        }
    }

    /// Resolver with an explicit default theme, or none at all
    pub fn with_default(default: Option<Theme>) -> Self {
        Self {
            active: ArcSwapOption::empty(),
            default: default.map(Arc::new),
        }
    }

    /// Replace the active theme. Readers see either the old or the new
    /// theme in full, never a mix.
    pub fn set_theme(&self, theme: Theme) {
        log::info!("Switching to theme '{}'", theme.name);
        self.active.store(Some(Arc::new(theme)));
    }

    /// Drop the active theme so the default applies again
    pub fn clear_theme(&self) {
        self.active.store(None);
    }

    pub fn active(&self) -> Option<Arc<Theme>> {
        self.active.load_full()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Snapshot for one frame
    pub fn palette(&self) -> Palette {
        Palette {
            active: self.active.load_full(),
            default: self.default.clone(),
        }
    }

    pub fn resolve(&self, role: &str) -> Result<Color> {
        self.palette().resolve(role)
    }
}

impl Default for ThemeResolver {
    fn default() -> Self {
        Self::new()
    }
}
