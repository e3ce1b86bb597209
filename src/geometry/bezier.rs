//! Cubic Bezier curves from four control points.

use glam::DVec2;

use super::Transform;
use super::VectorExt;

/// Cubic curve with the polynomial coefficients cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bezier {
    pub start: DVec2,
    pub ctrl1: DVec2,
    pub ctrl2: DVec2,
    pub end: DVec2,
    a: DVec2,
    b: DVec2,
    c: DVec2,
}

impl Bezier {
    pub fn new(start: DVec2, ctrl1: DVec2, ctrl2: DVec2, end: DVec2) -> Self {
        let c = 3.0 * (ctrl1 - start);
        let b = 3.0 * (ctrl2 - ctrl1) - c;
        let a = end - start - c - b;
        Self {
            start,
            ctrl1,
            ctrl2,
            end,
            a,
            b,
            c,
        }
    }

    /// Curve starting at the origin.
    pub fn from_origin(ctrl1: DVec2, ctrl2: DVec2, end: DVec2) -> Self {
        Self::new(DVec2::ZERO, ctrl1, ctrl2, end)
    }

    /// Point on the curve, `t` in [0,1].
    pub fn position(&self, t: f64) -> DVec2 {
        self.start + t * (self.c + t * (self.b + t * self.a))
    }

    pub fn translate(&self, t: f64) -> Transform {
        let p = self.position(t);
        Transform::translation(p.x, p.y)
    }

    /// Heading of the tangent at `t`.
    pub fn heading(&self, t: f64) -> f64 {
        (self.c + t * (2.0 * self.b + t * 3.0 * self.a)).heading()
    }

    pub fn rotate(&self, t: f64) -> Transform {
        Transform::rotation(self.heading(t))
    }

    /// Heading of the second derivative at `t`.
    pub fn turn(&self, t: f64) -> f64 {
        (2.0 * self.b + t * 6.0 * self.a).heading()
    }

    /// Sign tells the turn direction at the end of the curve:
    /// positive for left (counter-clockwise), negative for right.
    pub fn rolling(&self) -> f64 {
        (self.end - self.ctrl1).cross_z(self.end - self.ctrl2)
    }
}
