//! Display configuration types for the built-in displays.

pub mod clock;
pub mod horizon;
pub mod line_chart;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::geometry::Rect;
use crate::source_configs::SourceConfig;

pub use clock::ClockConfig;
pub use horizon::HorizonConfig;
pub use line_chart::LineChartConfig;

/// Which display to build, tagged by `display_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "display_type", rename_all = "snake_case")]
pub enum DisplayKind {
    Clock(ClockConfig),
    Horizon(HorizonConfig),
    LineChart(LineChartConfig),
}

impl DisplayKind {
    pub fn display_type(&self) -> &'static str {
        match self {
            DisplayKind::Clock(_) => "clock",
            DisplayKind::Horizon(_) => "horizon",
            DisplayKind::LineChart(_) => "line_chart",
        }
    }
}

/// One display placed on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Optional label used in logs; defaults to the display type
    #[serde(default)]
    pub name: Option<String>,
    /// Position and size on the surface
    pub bounds: Rect,
    pub display: DisplayKind,
    /// Role name -> source. Unbound roles use the display's simulated data.
    #[serde(default)]
    pub bindings: BTreeMap<String, SourceConfig>,
}

impl DisplayConfig {
    pub fn new(bounds: Rect, display: DisplayKind) -> Self {
        Self {
            name: None,
            bounds,
            display,
            bindings: BTreeMap::new(),
        }
    }

    pub fn with_binding(mut self, role: impl Into<String>, source: SourceConfig) -> Self {
        self.bindings.insert(role.into(), source);
        self
    }

    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.display.display_type())
    }
}
