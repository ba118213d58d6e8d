//! Layer trait and the generic backdrop layer

use std::any::Any;
use std::time::Duration;

use gauges_types::{roles, InputEvent, Rect};

use crate::display::Readings;
use crate::error::Result;
use crate::surface::{Canvas, Stroke};
use crate::theme::Palette;

/// Per-frame input handed to every layer of a display
#[derive(Debug, Clone, Copy)]
pub struct LayerContext<'a> {
    /// Time since the previous frame
    pub dt: Duration,
    /// Accumulated time since the display started updating
    pub elapsed: Duration,
    /// Samples ingested for this frame
    pub readings: &'a Readings,
}

/// Whether a layer consumed an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Handled,
    Ignored,
}

impl EventResponse {
    pub fn is_handled(self) -> bool {
        self == EventResponse::Handled
    }
}

/// One renderable sub-element of a display.
///
/// Layers are composited back to front in the order they were added. Each
/// layer keeps its own animated state, advanced in `update` and read in
/// `render`.
pub trait Layer: Send {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Advance animated state for one frame
    fn update(&mut self, ctx: &LayerContext<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Draw into the display's canvas. Must not mutate state.
    fn render(&self, canvas: &mut Canvas<'_>, palette: &Palette) -> Result<()>;

    /// Pointer positions are already local to the display
    fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        let _ = event;
        EventResponse::Ignored
    }

    /// Drop cached state so the next frame is drawn from scratch
    fn refresh(&mut self) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Outline of a backdrop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropShape {
    /// Fills the whole display bounds
    Rect,
    /// Largest circle centered in the bounds
    Circle,
}

/// Static background layer: a filled shape with an optional border
#[derive(Debug, Clone)]
pub struct Backdrop {
    shape: BackdropShape,
    fill_role: String,
    border: Option<(String, f64)>,
}

impl Backdrop {
    pub fn new(shape: BackdropShape) -> Self {
        Self {
            shape,
            fill_role: roles::BACKGROUND.to_string(),
            border: None,
        }
    }

    pub fn fill(mut self, role: impl Into<String>) -> Self {
        self.fill_role = role.into();
        self
    }

    /// Border drawn inside the shape; a width of zero disables it
    pub fn border(mut self, role: impl Into<String>, width: f64) -> Self {
        self.border = (width > 0.0).then(|| (role.into(), width));
        self
    }

    pub fn shape(&self) -> BackdropShape {
        self.shape
    }
}

impl Layer for Backdrop {
    fn name(&self) -> &str {
        "backdrop"
    }

    fn render(&self, canvas: &mut Canvas<'_>, palette: &Palette) -> Result<()> {
        let fill = palette.resolve(&self.fill_role)?;
        match self.shape {
            BackdropShape::Rect => {
                canvas.fill(fill)?;
                if let Some((role, width)) = &self.border {
                    let size = canvas.size();
                    let inset = width / 2.0;
                    let rect = Rect::new(inset, inset, size.width - width, size.height - width);
                    canvas.rect(rect, palette.resolve(role)?, Stroke::Outline(*width))?;
                }
            }
            BackdropShape::Circle => {
                let center = canvas.center();
                let radius = canvas.radius();
                canvas.circle(center, radius, fill, Stroke::Fill)?;
                if let Some((role, width)) = &self.border {
                    canvas.circle(
                        center,
                        radius - width / 2.0,
                        palette.resolve(role)?,
                        Stroke::Outline(*width),
                    )?;
                }
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
