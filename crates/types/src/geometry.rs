//! Screen geometry in surface pixels (origin top-left, y grows downwards)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self` along `radians` (0 = +x, clockwise on screen)
    pub fn polar(self, radius: f64, radians: f64) -> Self {
        Self {
            x: self.x + radians.cos() * radius,
            y: self.y + radians.sin() * radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center in local coordinates (relative to the rectangle's origin)
    pub fn local_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Radius of the largest circle that fits inside
    pub fn inner_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    /// Half-open containment test: the right and bottom edges are outside
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }

    /// Convert a surface point into coordinates relative to this rectangle
    pub fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.x, p.y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 300.0, 300.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(309.9, 309.9)));
        assert!(!r.contains(Point::new(310.0, 50.0)));
        assert!(!r.contains(Point::new(9.0, 50.0)));
    }

    #[test]
    fn test_local_coordinates() {
        let r = Rect::new(340.0, 10.0, 300.0, 200.0);
        assert_eq!(r.to_local(Point::new(350.0, 20.0)), Point::new(10.0, 10.0));
        assert_eq!(r.local_center(), Point::new(150.0, 100.0));
        assert_eq!(r.inner_radius(), 100.0);
    }
}
