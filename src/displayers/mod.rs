//! Displays built from configuration, with their sources bound

use anyhow::{Context, Result};
use gauges_core::{Display, SharedClock};
use gauges_types::DisplayConfig;

use crate::sources::build_source;

/// Build one display and bind every configured role.
///
/// Roles without a binding keep their simulated data.
pub fn build_display(config: &DisplayConfig, clock: &SharedClock) -> gauges_core::Result<Display> {
    let mut display = gauges_displayers::build(config.label(), config.bounds, &config.display)?;
    for (role, source_config) in &config.bindings {
        let source = build_source(source_config, SharedClock::clone(clock))?;
        display.bind(role, source)?;
    }
    Ok(display)
}

/// Build every display of a dashboard, in drawing order
pub fn build_displays(configs: &[DisplayConfig], clock: &SharedClock) -> Result<Vec<Display>> {
    configs
        .iter()
        .enumerate()
        .map(|(index, config)| {
            build_display(config, clock).with_context(|| {
                format!("Failed to build display #{} '{}'", index, config.label())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_displays;
    use gauges_core::{GaugeError, ManualClock, Rect};
    use gauges_displayers::TIME_ROLE;
    use gauges_types::{
        DisplayKind, LineChartConfig, SourceConfig, SyntheticSourceConfig,
    };

    fn clock() -> SharedClock {
        ManualClock::shared()
    }

    #[test]
    fn test_default_dashboard_builds() {
        let displays = build_displays(&default_displays(), &clock()).unwrap();
        let names: Vec<&str> = displays.iter().map(Display::name).collect();
        assert_eq!(names, vec!["clock", "horizon", "line_chart"]);
        assert_eq!(displays[0].bound_source(TIME_ROLE), Some("wall_clock"));
        assert!(!displays[1].is_bound("attitude"));
    }

    #[test]
    fn test_pull_only_binding_to_chart_fails() {
        let config = DisplayConfig::new(
            Rect::new(0.0, 0.0, 400.0, 200.0),
            DisplayKind::LineChart(LineChartConfig::default()),
        )
        .with_binding(
            "series0",
            SourceConfig::Synthetic(SyntheticSourceConfig::default()),
        );
        let err = build_display(&config, &clock()).unwrap_err();
        assert!(matches!(err, GaugeError::IncompatibleSource { .. }));

        let err = build_displays(&[config], &clock()).unwrap_err();
        assert!(format!("{:#}", err).contains("line_chart"));
    }

    #[test]
    fn test_recorded_binding_to_chart_succeeds() {
        let config = DisplayConfig::new(
            Rect::new(0.0, 0.0, 400.0, 200.0),
            DisplayKind::LineChart(LineChartConfig::default()),
        )
        .with_binding(
            "series3",
            SourceConfig::Synthetic(SyntheticSourceConfig {
                history: Some(300),
                ..Default::default()
            }),
        );
        let display = build_display(&config, &clock()).unwrap();
        assert!(display.is_bound("series3"));
    }

    #[test]
    fn test_unknown_role_is_reported() {
        let config = DisplayConfig::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            DisplayKind::Clock(Default::default()),
        )
        .with_binding(
            "minutes",
            SourceConfig::Synthetic(SyntheticSourceConfig::default()),
        );
        assert!(matches!(
            build_display(&config, &clock()),
            Err(GaugeError::NoSuchRole { .. })
        ));
    }
}
