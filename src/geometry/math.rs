//! Angle arithmetic and a closed-form 2x2 SVD.

use std::f64::consts::PI;

use crate::defaults::{ANGLE_TOLERANCE, APPROX_DELTA, SVD_EPSILON};

pub fn is_approx(a: f64, b: f64) -> bool {
    is_approx_within(a, b, APPROX_DELTA)
}

pub fn is_approx_within(a: f64, b: f64, delta: f64) -> bool {
    (a - b).abs() < delta
}

/// Signed difference `a1 - a2` folded into [-π, π).
pub fn angle_diff(a1: f64, a2: f64) -> f64 {
    ((((a1 - a2) % (PI * 2.0)) + PI * 3.0) % (PI * 2.0)) - PI
}

pub fn angles_equal(a1: f64, a2: f64) -> bool {
    is_approx_within(angle_diff(a1, a2), 0.0, ANGLE_TOLERANCE)
}

/// Remainder of `d1 / d2` rounded to the nearest multiple.
pub fn ieee_remainder(d1: f64, d2: f64) -> f64 {
    let n = (d1 / d2).round();
    d1 - n * d2
}

/// -1, 0 or 1. Unlike `f64::signum`, zero maps to zero.
pub fn sign(a: f64) -> f64 {
    if a < 0.0 {
        -1.0
    } else if a > 0.0 {
        1.0
    } else {
        0.0
    }
}

pub type Matrix2 = [[f64; 2]; 2];

pub fn transpose(m: &Matrix2) -> Matrix2 {
    [[m[0][0], m[1][0]], [m[0][1], m[1][1]]]
}

pub fn multiply(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[0.0; 2]; 2];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = a[r][0] * b[0][c] + a[r][1] * b[1][c];
        }
    }
    out
}

/// `A = U · diag(s) · Vᵀ`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Svd22 {
    pub u: Matrix2,
    pub s: [f64; 2],
    pub v: Matrix2,
}

/// Singular value decomposition of a 2x2 matrix.
pub fn svd22(m: &Matrix2) -> Svd22 {
    let [[a, b], [c, d]] = *m;

    if b.abs() < SVD_EPSILON && c.abs() < SVD_EPSILON {
        return Svd22 {
            u: [[1.0, 0.0], [0.0, 1.0]],
            s: [a.abs(), d.abs()],
            v: [
                [if a < 0.0 { -1.0 } else { 1.0 }, 0.0],
                [0.0, if d < 0.0 { -1.0 } else { 1.0 }],
            ],
        };
    }

    let j = a * a + b * b;
    let k = c * c + d * d;
    let vc = a * c + b * d;

    // Rows already orthogonal
    if vc.abs() < SVD_EPSILON {
        let s1 = j.sqrt();
        let s2 = if (j - k).abs() < SVD_EPSILON { s1 } else { k.sqrt() };
        return Svd22 {
            u: [[a / s1, b / s1], [c / s2, d / s2]],
            s: [s1, s2],
            v: [[1.0, 0.0], [0.0, 1.0]],
        };
    }

    let theta = 0.5 * (2.0 * a * c + 2.0 * b * d).atan2(a * a + b * b - c * c - d * d);
    let (st, ct) = theta.sin_cos();
    let u = [[ct, -st], [st, ct]];

    let phi = 0.5 * (2.0 * a * b + 2.0 * c * d).atan2(a * a - b * b + c * c - d * d);
    let (sp, cp) = phi.sin_cos();
    let s11 = (a * ct + c * st) * cp + (b * ct + d * st) * sp;
    let s22 = (a * st - c * ct) * sp + (-b * st + d * ct) * cp;

    let s1 = a * a + b * b + c * c + d * d;
    let s2 = ((a * a + b * b - c * c - d * d).powi(2) + 4.0 * (a * c + b * d).powi(2)).sqrt();

    Svd22 {
        u,
        s: [((s1 + s2) / 2.0).sqrt(), ((s1 - s2) / 2.0).max(0.0).sqrt()],
        v: [
            [sign(s11) * cp, -sign(s22) * sp],
            [sign(s11) * sp, sign(s22) * cp],
        ],
    }
}
