//! Drawing-surface capability consumed by the engine.
//!
//! The core never rasterizes anything itself. A backend supplies a
//! [`Surface`]; displays draw into their own bounds through a [`Canvas`].

use gauges_types::{Color, Point, Rect, Size};

use crate::error::Result;

/// How a closed shape is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stroke {
    Fill,
    Outline(f64),
}

/// Primitive shapes, in coordinates local to the bounds they are drawn into
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        width: f64,
    },
    Polyline {
        points: Vec<Point>,
        width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    Rect {
        rect: Rect,
        stroke: Stroke,
    },
}

/// Window parameters handed to a backend when acquiring a surface
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub title: String,
    pub size: Size,
}

/// A drawing target owned exclusively by the application loop
pub trait Surface {
    fn size(&self) -> Size;

    /// Fill the whole surface
    fn clear(&mut self, color: Color) -> Result<()>;

    /// Draw `shape` translated into and clipped to `bounds`
    fn draw_primitive(&mut self, shape: &Shape, color: Color, bounds: Rect) -> Result<()>;

    /// Draw `text` with its baseline-left corner at `position` (surface coordinates)
    fn draw_text(&mut self, text: &str, position: Point, color: Color) -> Result<()>;

    /// Approximate extent of `text` as drawn by [`Surface::draw_text`]
    fn measure_text(&self, text: &str) -> Size {
        Size::new(text.chars().count() as f64 * 12.0, 20.0)
    }

    /// Make the current frame visible
    fn present(&mut self) -> Result<()>;
}

/// Something that can open a drawing surface
pub trait SurfaceBackend {
    /// Fails with `GaugeError::SurfaceUnavailable` when the backend cannot start
    fn create_surface(&mut self, spec: &WindowSpec) -> Result<Box<dyn Surface>>;
}

/// One drawing call, as issued to a [`Surface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Primitive {
        shape: Shape,
        color: Color,
        bounds: Rect,
    },
    Text {
        text: String,
        position: Point,
        color: Color,
    },
}

impl DrawOp {
    /// Bounds a primitive was drawn into
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            DrawOp::Primitive { bounds, .. } => Some(*bounds),
            DrawOp::Clear(_) | DrawOp::Text { .. } => None,
        }
    }

    /// Issue this call on `surface`
    pub fn apply(&self, surface: &mut dyn Surface) -> Result<()> {
        match self {
            DrawOp::Clear(color) => surface.clear(*color),
            DrawOp::Primitive {
                shape,
                color,
                bounds,
            } => surface.draw_primitive(shape, *color, *bounds),
            DrawOp::Text {
                text,
                position,
                color,
            } => surface.draw_text(text, *position, *color),
        }
    }
}

/// Collects draw calls meant for `target` without touching it.
///
/// Size and text metrics come from the target. `present` is a no-op.
pub struct DrawList<'a> {
    target: &'a dyn Surface,
    ops: Vec<DrawOp>,
}

impl<'a> DrawList<'a> {
    pub fn new(target: &'a dyn Surface) -> Self {
        Self {
            target,
            ops: Vec::new(),
        }
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl Surface for DrawList<'_> {
    fn size(&self) -> Size {
        self.target.size()
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Clear(color));
        Ok(())
    }

    fn draw_primitive(&mut self, shape: &Shape, color: Color, bounds: Rect) -> Result<()> {
        self.ops.push(DrawOp::Primitive {
            shape: shape.clone(),
            color,
            bounds,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            position,
            color,
        });
        Ok(())
    }

    fn measure_text(&self, text: &str) -> Size {
        self.target.measure_text(text)
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A surface restricted to one display's bounds.
///
/// All coordinates are local: `(0, 0)` is the top-left corner of the bounds.
pub struct Canvas<'a> {
    surface: &'a mut dyn Surface,
    bounds: Rect,
}

impl<'a> Canvas<'a> {
    pub fn new(surface: &'a mut dyn Surface, bounds: Rect) -> Self {
        Self { surface, bounds }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    pub fn center(&self) -> Point {
        self.bounds.local_center()
    }

    pub fn radius(&self) -> f64 {
        self.bounds.inner_radius()
    }

    pub fn draw(&mut self, shape: &Shape, color: Color) -> Result<()> {
        self.surface.draw_primitive(shape, color, self.bounds)
    }

    /// Fill the whole canvas
    pub fn fill(&mut self, color: Color) -> Result<()> {
        self.rect(Rect::from_size(self.size()), color, Stroke::Fill)
    }

    pub fn line(&mut self, from: Point, to: Point, color: Color, width: f64) -> Result<()> {
        self.draw(&Shape::Line { from, to, width }, color)
    }

    pub fn polyline(&mut self, points: Vec<Point>, color: Color, width: f64) -> Result<()> {
        if points.len() < 2 {
            return Ok(());
        }
        self.draw(&Shape::Polyline { points, width }, color)
    }

    pub fn circle(&mut self, center: Point, radius: f64, color: Color, stroke: Stroke) -> Result<()> {
        self.draw(
            &Shape::Circle {
                center,
                radius,
                stroke,
            },
            color,
        )
    }

    pub fn rect(&mut self, rect: Rect, color: Color, stroke: Stroke) -> Result<()> {
        self.draw(&Shape::Rect { rect, stroke }, color)
    }

    /// Text at a local position
    pub fn text(&mut self, text: &str, position: Point, color: Color) -> Result<()> {
        let origin = self.bounds.origin();
        self.surface.draw_text(
            text,
            Point::new(origin.x + position.x, origin.y + position.y),
            color,
        )
    }

    pub fn measure_text(&self, text: &str) -> Size {
        self.surface.measure_text(text)
    }
}
