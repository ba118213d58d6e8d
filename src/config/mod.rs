//! Configuration management

mod defaults;
mod settings;

pub use defaults::{default_displays, CLOCK_BOUNDS, HORIZON_BOUNDS, LINE_CHART_BOUNDS};
pub use settings::{ActiveTheme, AppConfig, ThemeConfig, WindowConfig, CONFIG_VERSION};
