//! Scrolling multi-series line chart

use std::any::Any;
use std::num::NonZeroUsize;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gauges_core::{
    Backdrop, BackdropShape, Canvas, Display, EventResponse, GaugeError, InputEvent, Layer,
    LayerContext, Palette, Requirement, Result, RoleSpec, Simulator,
};
use gauges_types::{roles, EventKind, LineChartConfig, Point, Rect, SampleValue, Size};

const LINE_WIDTH: f64 = 1.0;
const NOISE_SEED: u64 = 0x6761_7567;

/// Role name of series `index`
pub fn series_role(index: usize) -> String {
    format!("series{}", index)
}

/// Built-in waveform for an unbound series.
///
/// Indices past the built-in set read a constant zero.
pub struct DemoSeries {
    index: usize,
    rng: StdRng,
}

impl DemoSeries {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            rng: StdRng::seed_from_u64(NOISE_SEED + index as u64),
        }
    }

    /// Beta(3, 5) as the third smallest of seven uniform draws
    fn beta_3_5(&mut self) -> f64 {
        let mut draws: [f64; 7] = std::array::from_fn(|_| self.rng.gen::<f64>());
        draws.sort_by(f64::total_cmp);
        draws[2]
    }

    pub fn value_at(&mut self, elapsed: Duration) -> f64 {
        let a = elapsed.as_secs_f64().to_radians();
        match self.index {
            0 => ((a * 20.0).sin() + (a * 667.0).cos() + (a * 1024.0).cos()) * 3.0 + 8.0,
            1 => self.beta_3_5() * 6.0 - 10.0,
            2 => (a * 60.0).sin() * 18.0,
            3 => (a * 60.0).cos() * 18.0,
            4 => (a * 240.0).sin() * 10.0,
            5 => (a * 240.0).cos() * 10.0,
            6 => 1.0,
            7 => ((a * 1000.0).cos() + (a * 300.0).cos()) * 4.0,
            _ => 0.0,
        }
    }
}

impl Simulator for DemoSeries {
    fn sample_at(&mut self, elapsed: Duration) -> SampleValue {
        SampleValue::Scalar(self.value_at(elapsed))
    }
}

/// Vertical value range mapped onto the chart height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Y coordinate of `value`: `min` maps to the bottom, `max` to the top
    pub fn rescale(&self, value: f64, height: f64) -> f64 {
        height - (value - self.min) / (self.max - self.min) * height
    }
}

/// Polyline points for one series, right aligned in a window of
/// `max_samples` slots
pub fn chart_points(values: &[f64], max_samples: usize, size: Size, range: ValueRange) -> Vec<Point> {
    let max_samples = max_samples.max(1);
    let x_units = size.width / max_samples as f64;
    let visible = &values[values.len().saturating_sub(max_samples)..];
    let start = (max_samples - visible.len()) as f64 * x_units;

    visible
        .iter()
        .enumerate()
        .map(|(i, v)| Point::new(start + i as f64 * x_units, range.rescale(*v, size.height)))
        .collect()
}

/// All series of the chart, redrawn from their history windows every frame
pub struct ChartLines {
    max_samples: usize,
    range: ValueRange,
    series: Vec<Vec<f64>>,
    held: bool,
}

impl ChartLines {
    pub fn new(series: usize, max_samples: usize, range: ValueRange) -> Self {
        Self {
            max_samples,
            range,
            series: vec![Vec::new(); series],
            held: false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Values currently drawn for series `index`, oldest first
    pub fn values(&self, index: usize) -> &[f64] {
        self.series.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Layer for ChartLines {
    fn name(&self) -> &str {
        "chart-lines"
    }

    fn update(&mut self, ctx: &LayerContext<'_>) -> Result<()> {
        if self.held {
            return Ok(());
        }
        for (index, values) in self.series.iter_mut().enumerate() {
            values.clear();
            values.extend(
                ctx.readings
                    .history(&series_role(index))
                    .iter()
                    .map(|sample| sample.scalar()),
            );
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas<'_>, palette: &Palette) -> Result<()> {
        let size = canvas.size();
        for (index, values) in self.series.iter().enumerate() {
            let color = palette.resolve(&roles::series(index))?;
            let points = chart_points(values, self.max_samples, size, self.range);
            canvas.polyline(points, color, LINE_WIDTH)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        match event.kind {
            EventKind::PointerPress { .. } => {
                self.held = !self.held;
                log::info!(
                    "Line chart {}",
                    if self.held { "held" } else { "resumed" }
                );
                EventResponse::Handled
            }
            _ => EventResponse::Ignored,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Build a line chart with `config.series` historical roles.
///
/// Unbound series plot the built-in demo waveforms.
pub fn line_chart(name: impl Into<String>, bounds: Rect, config: &LineChartConfig) -> Result<Display> {
    let window = NonZeroUsize::new(config.max_samples)
        .ok_or_else(|| GaugeError::invalid_config("line chart max_samples must be at least 1"))?;
    if config.series == 0 {
        return Err(GaugeError::invalid_config(
            "line chart needs at least one series",
        ));
    }
    if config.y_min.is_nan() || config.y_max.is_nan() || config.y_min >= config.y_max {
        return Err(GaugeError::invalid_config(format!(
            "line chart y range {}..{} is empty",
            config.y_min, config.y_max
        )));
    }

    let range = ValueRange {
        min: config.y_min,
        max: config.y_max,
    };
    let mut display = Display::new(name, bounds).with_layer(
        Backdrop::new(BackdropShape::Rect).border(roles::BORDER, config.border_width),
    );
    for index in 0..config.series {
        display.add_role(RoleSpec::new(
            series_role(index),
            Requirement::Historical { window },
            DemoSeries::new(index),
        ));
    }
    Ok(display.with_layer(ChartLines::new(config.series, config.max_samples, range)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauges_core::{ManualClock, Shape};
    use gauges_render::{DrawOp, RecordingSurface};
    use gauges_sources::{Recorded, SyntheticSource};
    use gauges_types::{PointerButton, SyntheticSourceConfig, Theme, Waveform};

    fn bounds() -> Rect {
        Rect::new(10.0, 340.0, 800.0, 300.0)
    }

    fn small_config() -> LineChartConfig {
        LineChartConfig {
            series: 2,
            max_samples: 4,
            ..Default::default()
        }
    }

    fn constant_source(value: f64) -> SyntheticSource {
        SyntheticSource::new(
            SyntheticSourceConfig {
                waveform: Waveform::Constant,
                constant_value: value,
                ..Default::default()
            },
            ManualClock::shared(),
        )
    }

    #[test]
    fn test_points_are_right_aligned() {
        let range = ValueRange {
            min: -20.0,
            max: 20.0,
        };
        let size = Size::new(100.0, 40.0);
        let points = chart_points(&[-20.0, 0.0, 20.0], 4, size, range);
        assert_eq!(
            points,
            vec![
                Point::new(25.0, 40.0),
                Point::new(50.0, 20.0),
                Point::new(75.0, 0.0),
            ]
        );

        // Older values than the window are dropped
        let points = chart_points(&[9.0, 0.0, 0.0, 0.0, 0.0], 4, size, range);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].x, 0.0);
        assert!(points.iter().all(|p| p.y == 20.0));
    }

    #[test]
    fn test_demo_series_values() {
        let t = Duration::from_secs(3);
        assert_eq!(DemoSeries::new(6).value_at(t), 1.0);
        assert_eq!(DemoSeries::new(9).value_at(t), 0.0);
        let sine = DemoSeries::new(2).value_at(t);
        assert!((sine - (3.0f64.to_radians() * 60.0).sin() * 18.0).abs() < 1e-12);

        let mut noise = DemoSeries::new(1);
        for _ in 0..100 {
            let v = noise.value_at(t);
            assert!((-10.0..=-4.0).contains(&v));
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let empty_window = LineChartConfig {
            max_samples: 0,
            ..Default::default()
        };
        let flat = LineChartConfig {
            y_min: 5.0,
            y_max: 5.0,
            ..Default::default()
        };
        for config in [empty_window, flat] {
            let err = line_chart("chart", bounds(), &config).err().unwrap();
            assert!(matches!(err, GaugeError::InvalidConfig { .. }));
        }
    }

    #[test]
    fn test_pull_only_source_is_incompatible() {
        let mut display = line_chart("chart", bounds(), &small_config()).unwrap();
        let err = display
            .bind("series0", Box::new(constant_source(3.0)))
            .unwrap_err();
        assert!(matches!(err, GaugeError::IncompatibleSource { .. }));
        assert!(!display.is_bound("series0"));
    }

    #[test]
    fn test_recorded_source_fills_history_and_renders() {
        let mut display = line_chart("chart", bounds(), &small_config()).unwrap();
        let recorded = Recorded::new(constant_source(3.0), NonZeroUsize::new(16).unwrap());
        display.bind("series0", Box::new(recorded)).unwrap();

        for _ in 0..6 {
            display.update(Duration::from_millis(20)).unwrap();
        }
        let lines = display.layer::<ChartLines>().unwrap();
        assert_eq!(lines.values(0), &[3.0; 4]);
        assert_eq!(lines.values(1).len(), 4);

        let mut surface = RecordingSurface::new(Size::new(1280.0, 1024.0));
        let palette = Palette::from_theme(Theme::solarized_dark());
        display.render(&mut surface, &palette).unwrap();

        let polylines: Vec<_> = surface
            .pending()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Primitive {
                    shape: Shape::Polyline { points, .. },
                    color,
                    ..
                } => Some((points.clone(), *color)),
                _ => None,
            })
            .collect();
        assert_eq!(polylines.len(), 2);
        assert_eq!(polylines[0].1, palette.resolve("series-0").unwrap());
        assert_eq!(polylines[1].1, palette.resolve("series-1").unwrap());
        assert_eq!(polylines[0].0.last().unwrap().x, 600.0);
    }

    #[test]
    fn test_pointer_press_toggles_hold() {
        let mut display = line_chart("chart", bounds(), &small_config()).unwrap();
        display.update(Duration::from_millis(20)).unwrap();

        let press = InputEvent::new(
            Duration::ZERO,
            EventKind::PointerPress {
                position: Point::new(100.0, 400.0),
                button: PointerButton::Primary,
            },
        );
        assert!(display.handle_event(&press).is_handled());
        display.update(Duration::from_millis(20)).unwrap();
        display.update(Duration::from_millis(20)).unwrap();

        let lines = display.layer::<ChartLines>().unwrap();
        assert!(lines.is_held());
        assert_eq!(lines.values(0).len(), 1);

        display.handle_event(&press);
        display.update(Duration::from_millis(20)).unwrap();
        assert_eq!(display.layer::<ChartLines>().unwrap().values(0).len(), 4);
    }
}
