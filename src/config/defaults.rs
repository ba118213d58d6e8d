//! Default dashboard layout
//!
//! Used when no config file exists: an analog clock on local time, a virtual
//! horizon replaying its simulated attitude profile and an eight-series line
//! chart of demo waveforms.

use gauges_displayers::TIME_ROLE;
use gauges_types::{
    ClockConfig, DisplayConfig, DisplayKind, HorizonConfig, LineChartConfig, Rect, SourceConfig,
    WallClockSourceConfig,
};

pub const CLOCK_BOUNDS: Rect = Rect::new(10.0, 10.0, 300.0, 300.0);
pub const HORIZON_BOUNDS: Rect = Rect::new(340.0, 10.0, 300.0, 300.0);
pub const LINE_CHART_BOUNDS: Rect = Rect::new(10.0, 340.0, 800.0, 300.0);

/// The three-display demo layout
pub fn default_displays() -> Vec<DisplayConfig> {
    vec![
        DisplayConfig::new(CLOCK_BOUNDS, DisplayKind::Clock(ClockConfig::default())).with_binding(
            TIME_ROLE,
            SourceConfig::WallClock(WallClockSourceConfig::default()),
        ),
        DisplayConfig::new(
            HORIZON_BOUNDS,
            DisplayKind::Horizon(HorizonConfig::default()),
        ),
        DisplayConfig::new(
            LINE_CHART_BOUNDS,
            DisplayKind::LineChart(LineChartConfig::default()),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_does_not_overlap() {
        let displays = default_displays();
        assert_eq!(displays.len(), 3);
        for (i, a) in displays.iter().enumerate() {
            for b in &displays[i + 1..] {
                let (a, b) = (a.bounds, b.bounds);
                let disjoint = a.x + a.width <= b.x
                    || b.x + b.width <= a.x
                    || a.y + a.height <= b.y
                    || b.y + b.height <= a.y;
                assert!(disjoint, "{:?} overlaps {:?}", a, b);
            }
        }
    }
}
