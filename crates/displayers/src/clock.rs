//! Analog clock display

use std::any::Any;
use std::time::Duration;

use gauges_core::{
    Backdrop, BackdropShape, Canvas, Display, Layer, LayerContext, Palette, Requirement, Result,
    RoleSpec, Stroke,
};
use gauges_types::{roles, ClockConfig, Color, Point, Rect, SampleValue};

/// Role carrying the time of day in seconds since midnight
pub const TIME_ROLE: &str = "time";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Hand positions in degrees, clockwise from 12 o'clock
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    /// Angles for a time of day given in seconds since midnight
    pub fn from_seconds(seconds: f64) -> Self {
        let seconds = seconds.rem_euclid(SECONDS_PER_DAY);
        Self {
            hour: seconds.rem_euclid(43_200.0) / 43_200.0 * 360.0,
            minute: seconds.rem_euclid(3_600.0) / 3_600.0 * 360.0,
            second: seconds.rem_euclid(60.0) / 60.0 * 360.0,
        }
    }
}

/// Screen angle in radians (0 = +x, clockwise) for a clock angle in degrees
fn screen_radians(clock_degrees: f64) -> f64 {
    (clock_degrees - 90.0).to_radians()
}

/// Tick dots around the rim
pub struct ClockDial {
    tick_inset: f64,
}

impl ClockDial {
    pub fn new(tick_inset: f64) -> Self {
        Self { tick_inset }
    }
}

impl Layer for ClockDial {
    fn name(&self) -> &str {
        "clock-dial"
    }

    fn render(&self, canvas: &mut Canvas<'_>, palette: &Palette) -> Result<()> {
        let center = canvas.center();
        let radius = (canvas.radius() - self.tick_inset).max(0.0);
        let major = palette.resolve(roles::TICK_MAJOR)?;
        let minor = palette.resolve(roles::TICK_MINOR)?;

        for tick in 0..60 {
            let angle = f64::from(tick * 6).to_radians();
            let position = center.polar(radius, angle);
            if tick % 5 == 0 {
                canvas.circle(position, 3.0, major, Stroke::Fill)?;
            } else {
                canvas.circle(position, 1.0, minor, Stroke::Fill)?;
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Hour, minute and second hands driven by the `time` role
pub struct ClockHands {
    hour_length: f64,
    show_second_hand: bool,
    seconds: f64,
    angles: HandAngles,
}

impl ClockHands {
    pub fn new(hour_length: f64, show_second_hand: bool) -> Self {
        Self {
            hour_length,
            show_second_hand,
            seconds: 0.0,
            angles: HandAngles::default(),
        }
    }

    pub fn angles(&self) -> HandAngles {
        self.angles
    }

    /// Time of day currently shown, in seconds since midnight
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    fn hand(
        canvas: &mut Canvas<'_>,
        degrees: f64,
        length: f64,
        color: Color,
        width: f64,
    ) -> Result<()> {
        let center = canvas.center();
        let tip = center.polar(canvas.radius() * length, screen_radians(degrees));
        canvas.line(center, tip, color, width)
    }
}

impl Layer for ClockHands {
    fn name(&self) -> &str {
        "clock-hands"
    }

    fn update(&mut self, ctx: &LayerContext<'_>) -> Result<()> {
        if let Some(seconds) = ctx.readings.scalar(TIME_ROLE) {
            self.seconds = seconds.rem_euclid(SECONDS_PER_DAY);
            self.angles = HandAngles::from_seconds(self.seconds);
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas<'_>, palette: &Palette) -> Result<()> {
        let needle = palette.resolve(roles::NEEDLE)?;
        // Hour first, then minute, then second on top
        Self::hand(canvas, self.angles.hour, self.hour_length, needle, 3.0)?;
        Self::hand(canvas, self.angles.minute, 1.0, needle, 2.0)?;
        if self.show_second_hand {
            let second = palette.resolve(roles::NEEDLE_SECONDARY)?;
            Self::hand(canvas, self.angles.second, 1.0, second, 1.0)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Time of day at which an unbound clock starts
fn simulated_origin(config: &ClockConfig) -> f64 {
    config.simulated_start.unwrap_or_else(|| {
        gauges_sources::seconds_since_midnight(chrono::Local::now().time())
    })
}

/// Build an analog clock.
///
/// Without a bound `time` source the clock runs from its configured start
/// time, advanced by the display's accumulated update time.
pub fn clock(name: impl Into<String>, bounds: Rect, config: &ClockConfig) -> Display {
    let origin = simulated_origin(config);
    let simulator =
        move |elapsed: Duration| SampleValue::Scalar(origin + elapsed.as_secs_f64());

    Display::new(name, bounds)
        .with_role(RoleSpec::new(TIME_ROLE, Requirement::Live, simulator))
        .with_layer(Backdrop::new(BackdropShape::Rect))
        .with_layer(
            Backdrop::new(BackdropShape::Circle).border(roles::BORDER, config.border_width),
        )
        .with_layer(ClockDial::new(config.tick_inset))
        .with_layer(ClockHands::new(
            config.hour_hand_length,
            config.show_second_hand,
        ))
}

/// Tip of a hand of `length` (fraction of radius) at `degrees` inside `bounds`
pub fn hand_tip(bounds: Rect, degrees: f64, length: f64) -> Point {
    let local = Rect::from_size(bounds.size());
    local
        .local_center()
        .polar(local.inner_radius() * length, screen_radians(degrees))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauges_core::{Shape, Surface};
    use gauges_render::{DrawOp, RecordingSurface};
    use gauges_types::{Size, Theme};

    fn config(start: f64) -> ClockConfig {
        ClockConfig {
            simulated_start: Some(start),
            ..Default::default()
        }
    }

    fn bounds() -> Rect {
        Rect::new(10.0, 10.0, 300.0, 300.0)
    }

    fn angles(display: &Display) -> HandAngles {
        display.layer::<ClockHands>().unwrap().angles()
    }

    #[test]
    fn test_hand_angles() {
        let a = HandAngles::from_seconds(3.0 * 3600.0);
        assert_eq!(a, HandAngles { hour: 90.0, minute: 0.0, second: 0.0 });

        let b = HandAngles::from_seconds(15.0 * 3600.0 + 30.0 * 60.0 + 15.0);
        assert_eq!(b.hour, (3.0 * 3600.0 + 1815.0) / 43_200.0 * 360.0);
        assert_eq!(b.minute, 1815.0 / 3600.0 * 360.0);
        assert_eq!(b.second, 90.0);
    }

    #[test]
    fn test_split_updates_match_single_update() {
        let mut split = clock("split", bounds(), &config(36_000.0));
        let mut single = clock("single", bounds(), &config(36_000.0));

        let dt1 = Duration::from_millis(1_250);
        let dt2 = Duration::from_millis(3_400);
        split.update(dt1).unwrap();
        split.update(dt2).unwrap();
        single.update(dt1 + dt2).unwrap();

        assert_eq!(angles(&split), angles(&single));
        assert_eq!(
            split.layer::<ClockHands>().unwrap().seconds(),
            36_000.0 + (dt1 + dt2).as_secs_f64()
        );
    }

    #[test]
    fn test_render_draws_ticks_and_hands() {
        let mut display = clock("clock", bounds(), &config(0.0));
        display.update(Duration::from_secs(15)).unwrap();

        let mut surface = RecordingSurface::new(Size::new(400.0, 400.0));
        let recording = surface.recording();
        let palette = Palette::from_theme(Theme::solarized_dark());
        display.render(&mut surface, &palette).unwrap();
        surface.present().unwrap();

        let frame = recording.frame(0).unwrap();
        let dots = frame
            .iter()
            .filter(|op| {
                matches!(op, DrawOp::Primitive { shape: Shape::Circle { radius, .. }, .. } if *radius <= 3.0)
            })
            .count();
        let lines: Vec<&DrawOp> = frame
            .iter()
            .filter(|op| matches!(op, DrawOp::Primitive { shape: Shape::Line { .. }, .. }))
            .collect();
        assert_eq!(dots, 60);
        assert_eq!(lines.len(), 3);
        assert!(frame.iter().all(|op| op.bounds() == Some(bounds())));

        // Second hand at 15 s points at 3 o'clock
        let expected_tip = hand_tip(bounds(), 90.0, 1.0);
        match lines[2] {
            DrawOp::Primitive {
                shape: Shape::Line { to, .. },
                ..
            } => {
                assert!((to.x - expected_tip.x).abs() < 1e-9);
                assert!((to.y - expected_tip.y).abs() < 1e-9);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_second_hand_can_be_hidden() {
        let config = ClockConfig {
            show_second_hand: false,
            ..config(0.0)
        };
        let mut display = clock("clock", bounds(), &config);
        display.update(Duration::ZERO).unwrap();

        let mut surface = RecordingSurface::new(Size::new(400.0, 400.0));
        display
            .render(&mut surface, &Palette::from_theme(Theme::solarized_dark()))
            .unwrap();
        let lines = surface
            .pending()
            .iter()
            .filter(|op| matches!(op, DrawOp::Primitive { shape: Shape::Line { .. }, .. }))
            .count();
        assert_eq!(lines, 2);
    }
}
