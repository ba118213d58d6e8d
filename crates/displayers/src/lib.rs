//! gauges-displayers: Built-in displays for the gauges dashboard toolkit.
//!
//! Each display is a [`Display`] assembled from roles and layers: an analog
//! clock, a virtual horizon and a scrolling line chart. Unbound roles fall
//! back to built-in simulated data, so every display animates on its own.

mod clock;
mod horizon;
mod line_chart;

pub use clock::{clock, hand_tip, ClockDial, ClockHands, HandAngles, TIME_ROLE};
pub use horizon::{horizon, HorizonNeedles, NeedleGeometry, ATTITUDE_ROLE};
pub use line_chart::{
    chart_points, line_chart, series_role, ChartLines, DemoSeries, ValueRange,
};

use gauges_core::{Display, Result};
use gauges_types::{DisplayKind, Rect};

/// Build the display described by `kind`
pub fn build(name: impl Into<String>, bounds: Rect, kind: &DisplayKind) -> Result<Display> {
    let display = match kind {
        DisplayKind::Clock(config) => clock(name, bounds, config),
        DisplayKind::Horizon(config) => horizon(name, bounds, config),
        DisplayKind::LineChart(config) => line_chart(name, bounds, config)?,
    };
    log::debug!(
        "Built {} display '{}' with layers {:?}",
        kind.display_type(),
        display.name(),
        display.layer_names()
    );
    Ok(display)
}
