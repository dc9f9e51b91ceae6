//! Points and cubic Bezier curves.

use serde::Serialize;

/// A point in content space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Cubic Bezier from `start` to `end` through control points `c1` and `c2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CubicBezier {
    pub start: Point,
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

impl CubicBezier {
    /// Evaluate the curve at `t` (clamped to `[0, 1]`).
    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Point {
            x: a * self.start.x + b * self.c1.x + c * self.c2.x + d * self.end.x,
            y: a * self.start.y + b * self.c1.y + c * self.c2.y + d * self.end.y,
        }
    }

    /// Direction the curve travels as it arrives at `end`.
    pub fn end_direction(&self) -> Point {
        [self.c2, self.c1, self.start]
            .into_iter()
            .map(|p| Point::new(self.end.x - p.x, self.end.y - p.y))
            .find(|d| d.x.abs() > f64::EPSILON || d.y.abs() > f64::EPSILON)
            .unwrap_or(Point::new(1.0, 0.0))
    }

    /// Largest y over the control hull. The curve never goes below it.
    pub fn max_hull_y(&self) -> f64 {
        self.start
            .y
            .max(self.c1.y)
            .max(self.c2.y)
            .max(self.end.y)
    }
}

/// Triangle for an arrowhead whose tip sits at `tip`, pointing along
/// `direction`. Returns `[tip, left base, right base]`.
pub fn arrowhead(tip: Point, direction: Point, length: f64, width: f64) -> [Point; 3] {
    let norm = direction.x.hypot(direction.y);
    let (ux, uy) = if norm > f64::EPSILON {
        (direction.x / norm, direction.y / norm)
    } else {
        (1.0, 0.0)
    };
    let base = Point::new(tip.x - ux * length, tip.y - uy * length);
    let half = width / 2.0;
    [
        tip,
        Point::new(base.x - uy * half, base.y + ux * half),
        Point::new(base.x + uy * half, base.y - ux * half),
    ]
}
