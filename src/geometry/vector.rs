//! Turn-direction helpers on top of `glam::DVec2`.

use glam::DVec2;

pub trait VectorExt {
    /// Angle from the origin, `atan2(y, x)`.
    fn heading(self) -> f64;
    /// Rotate counter-clockwise about the origin.
    fn rotated(self, theta: f64) -> DVec2;
    /// z component of the 3-D cross product.
    fn cross_z(self, other: DVec2) -> f64;
    /// True if going along `self` then `other` turns clockwise.
    fn is_cw(self, other: DVec2) -> bool;
    fn is_ccw(self, other: DVec2) -> bool;
}

impl VectorExt for DVec2 {
    fn heading(self) -> f64 {
        self.y.atan2(self.x)
    }

    fn rotated(self, theta: f64) -> DVec2 {
        DVec2::from_angle(theta).rotate(self)
    }

    fn cross_z(self, other: DVec2) -> f64 {
        self.perp_dot(other)
    }

    fn is_cw(self, other: DVec2) -> bool {
        self.cross_z(other) < 0.0
    }

    fn is_ccw(self, other: DVec2) -> bool {
        self.cross_z(other) > 0.0
    }
}
