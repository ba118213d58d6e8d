//! Virtual horizon display
//!
//! Pitch and roll are drawn as two independent needles: a horizontal bar
//! raised or lowered by pitch, and a bar through the center rotated by roll.

use std::any::Any;
use std::time::Duration;

use gauges_core::{
    Backdrop, BackdropShape, Canvas, Display, Layer, LayerContext, Palette, Requirement, Result,
    RoleSpec, ANIMATION_SNAP_THRESHOLD,
};
use gauges_sources::attitude_at;
use gauges_types::{roles, HorizonConfig, Point, Rect, SampleValue};

/// Role carrying `(pitch, roll)` in degrees
pub const ATTITUDE_ROLE: &str = "attitude";

/// Endpoints of the pitch and roll needles, local to the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeedleGeometry {
    pub pitch: (Point, Point),
    pub roll: (Point, Point),
}

impl NeedleGeometry {
    pub fn compute(center: Point, radius: f64, pitch_deg: f64, roll_deg: f64) -> Self {
        let pitch = pitch_deg.to_radians();
        let roll = roll_deg.to_radians();

        let horizon_y = center.y + pitch.sin() * radius;
        let half_width = pitch.cos() * radius;

        let roll_h = roll.cos() * radius;
        let roll_v = roll.sin() * radius;

        Self {
            pitch: (
                Point::new(center.x - half_width, horizon_y),
                Point::new(center.x + half_width, horizon_y),
            ),
            roll: (
                Point::new(center.x - roll_h, center.y - roll_v),
                Point::new(center.x + roll_h, center.y + roll_v),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct AnimatedValue {
    current: f64,
    target: f64,
}

impl AnimatedValue {
    /// Move toward the target by the fraction `k`, snapping when close
    fn step(&mut self, k: f64) {
        self.current += (self.target - self.current) * k;
        if (self.current - self.target).abs() < ANIMATION_SNAP_THRESHOLD {
            self.current = self.target;
        }
    }

    fn snap(&mut self) {
        self.current = self.target;
    }
}

/// Needles following the `attitude` role with exponential smoothing
pub struct HorizonNeedles {
    needle_width: f64,
    smoothing_rate: f64,
    pitch: AnimatedValue,
    roll: AnimatedValue,
    primed: bool,
}

impl HorizonNeedles {
    pub fn new(needle_width: f64, smoothing_rate: f64) -> Self {
        Self {
            needle_width,
            smoothing_rate,
            pitch: AnimatedValue::default(),
            roll: AnimatedValue::default(),
            primed: false,
        }
    }

    /// Currently drawn `(pitch, roll)` in degrees
    pub fn attitude(&self) -> (f64, f64) {
        (self.pitch.current, self.roll.current)
    }

    /// Latest `(pitch, roll)` sample the needles move toward
    pub fn target(&self) -> (f64, f64) {
        (self.pitch.target, self.roll.target)
    }

    /// Fraction of the remaining distance covered in `dt`
    fn smoothing_factor(&self, dt: Duration) -> f64 {
        if self.smoothing_rate <= 0.0 {
            1.0
        } else {
            1.0 - (-dt.as_secs_f64() * self.smoothing_rate).exp()
        }
    }
}

impl Layer for HorizonNeedles {
    fn name(&self) -> &str {
        "horizon-needles"
    }

    fn update(&mut self, ctx: &LayerContext<'_>) -> Result<()> {
        let Some((pitch, roll)) = ctx.readings.pair(ATTITUDE_ROLE) else {
            return Ok(());
        };
        self.pitch.target = pitch;
        self.roll.target = roll;
        // The first reading is shown as is
        if self.primed {
            let k = self.smoothing_factor(ctx.dt);
            self.pitch.step(k);
            self.roll.step(k);
        } else {
            self.pitch.snap();
            self.roll.snap();
            self.primed = true;
        }
        Ok(())
    }

    fn render(&self, canvas: &mut Canvas<'_>, palette: &Palette) -> Result<()> {
        let geometry = NeedleGeometry::compute(
            canvas.center(),
            canvas.radius(),
            self.pitch.current,
            self.roll.current,
        );
        let (from, to) = geometry.pitch;
        canvas.line(from, to, palette.resolve(roles::PITCH)?, self.needle_width)?;
        let (from, to) = geometry.roll;
        canvas.line(from, to, palette.resolve(roles::ROLL)?, self.needle_width)
    }

    fn refresh(&mut self) {
        self.primed = false;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Build a virtual horizon.
///
/// Without a bound `attitude` source it replays the built-in 60 second
/// pitch/roll profile.
pub fn horizon(name: impl Into<String>, bounds: Rect, config: &HorizonConfig) -> Display {
    let simulator = |elapsed: Duration| SampleValue::from(attitude_at(elapsed));

    Display::new(name, bounds)
        .with_role(RoleSpec::new(ATTITUDE_ROLE, Requirement::Live, simulator))
        .with_layer(Backdrop::new(BackdropShape::Rect))
        .with_layer(
            Backdrop::new(BackdropShape::Circle).border(roles::BORDER, config.border_width),
        )
        .with_layer(HorizonNeedles::new(
            config.needle_width,
            config.smoothing_rate,
        ))
}
