//! 2x3 affine transforms for dancer poses.

use glam::{DAffine2, DMat2, DVec2};

use crate::defaults::SINGULAR_EPSILON;
use crate::log::warn;

/// Rotation, scale and translation in the plane.
///
/// Element names follow the usual 2x3 layout:
///
/// ```text
/// | scale_x  shear_x  translate_x |
/// | shear_y  scale_y  translate_y |
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(pub DAffine2);

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform(DAffine2::IDENTITY);

    pub fn translation(x: f64, y: f64) -> Self {
        Transform(DAffine2::from_translation(DVec2::new(x, y)))
    }

    pub fn rotation(theta: f64) -> Self {
        Transform(DAffine2::from_angle(theta))
    }

    pub fn scaling(x: f64, y: f64) -> Self {
        Transform(DAffine2::from_scale(DVec2::new(x, y)))
    }

    /// Build from two rows `[scale_x, shear_x, translate_x]` and
    /// `[shear_y, scale_y, translate_y]`.
    pub fn from_rows(row0: [f64; 3], row1: [f64; 3]) -> Self {
        let matrix2 = DMat2::from_cols(
            DVec2::new(row0[0], row1[0]),
            DVec2::new(row0[1], row1[1]),
        );
        Transform(DAffine2::from_mat2_translation(
            matrix2,
            DVec2::new(row0[2], row1[2]),
        ))
    }

    pub fn scale_x(&self) -> f64 {
        self.0.matrix2.x_axis.x
    }

    pub fn shear_y(&self) -> f64 {
        self.0.matrix2.x_axis.y
    }

    pub fn shear_x(&self) -> f64 {
        self.0.matrix2.y_axis.x
    }

    pub fn scale_y(&self) -> f64 {
        self.0.matrix2.y_axis.y
    }

    pub fn translate_x(&self) -> f64 {
        self.0.translation.x
    }

    pub fn translate_y(&self) -> f64 {
        self.0.translation.y
    }

    pub fn location(&self) -> DVec2 {
        self.0.translation
    }

    /// Heading of the local x axis. Only meaningful while the linear part
    /// is a rotation (possibly with a reflection), never an arbitrary shear.
    pub fn angle(&self) -> f64 {
        self.shear_y().atan2(self.scale_y())
    }

    pub fn determinant(&self) -> f64 {
        self.0.matrix2.determinant()
    }

    /// `self · other`: `other` happens in the frame left by `self`.
    #[must_use]
    pub fn pre_concatenate(self, other: Transform) -> Transform {
        Transform(self.0 * other.0)
    }

    /// `other · self`: `self` happens in the frame left by `other`.
    #[must_use]
    pub fn concatenate(self, other: Transform) -> Transform {
        Transform(other.0 * self.0)
    }

    #[must_use]
    pub fn translate(self, x: f64, y: f64) -> Transform {
        self.pre_concatenate(Transform::translation(x, y))
    }

    #[must_use]
    pub fn rotate(self, theta: f64) -> Transform {
        self.pre_concatenate(Transform::rotation(theta))
    }

    #[must_use]
    pub fn scale(self, x: f64, y: f64) -> Transform {
        self.pre_concatenate(Transform::scaling(x, y))
    }

    /// Inverse transform. A singular transform has no inverse; it is
    /// returned unchanged so that callers keep a usable pose.
    pub fn inverse(&self) -> Transform {
        let det = self.determinant();
        if det.abs() < SINGULAR_EPSILON {
            warn!(det, "inverse of a singular transform requested");
            return *self;
        }
        Transform(self.0.inverse())
    }

    pub fn apply(&self, point: DVec2) -> DVec2 {
        self.0.transform_point2(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn translate_then_rotate_order() {
        // Move forward 1 then turn left: ends at (1,0) facing up.
        let tx = Transform::IDENTITY
            .pre_concatenate(Transform::translation(1.0, 0.0))
            .pre_concatenate(Transform::rotation(FRAC_PI_2));
        assert!(close(tx.location(), DVec2::new(1.0, 0.0)));
        assert!((tx.angle() - FRAC_PI_2).abs() < 1e-9);

        // Turn left then move forward 1: ends at (0,1).
        let tx = Transform::rotation(FRAC_PI_2).pre_concatenate(Transform::translation(1.0, 0.0));
        assert!(close(tx.location(), DVec2::new(0.0, 1.0)));
    }

    #[test]
    fn concatenate_is_mirror_of_pre_concatenate() {
        let a = Transform::translation(2.0, 1.0).rotate(0.3);
        let b = Transform::rotation(1.1).translate(-1.0, 0.5);
        assert_eq!(a.concatenate(b), b.pre_concatenate(a));
    }

    #[test]
    fn row_layout() {
        let tx = Transform::from_rows([1.0, 2.0, 3.0], [4.0, 5.0, 6.0]);
        assert_eq!(tx.scale_x(), 1.0);
        assert_eq!(tx.shear_x(), 2.0);
        assert_eq!(tx.translate_x(), 3.0);
        assert_eq!(tx.shear_y(), 4.0);
        assert_eq!(tx.scale_y(), 5.0);
        assert_eq!(tx.translate_y(), 6.0);
    }

    #[test]
    fn inverse_round_trip() {
        let tx = Transform::translation(3.0, -2.0).rotate(0.7).scale(2.0, 2.0);
        let p = DVec2::new(0.25, 4.0);
        assert!(close(tx.inverse().apply(tx.apply(p)), p));
    }

    #[test]
    fn singular_inverse_falls_back() {
        let tx = Transform::scaling(0.0, 1.0);
        assert_eq!(tx.inverse(), tx);
    }
}
