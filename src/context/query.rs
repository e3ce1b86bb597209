//! Geometric questions calls ask about the formation.
//!
//! Dancers are referred to by index into [`CallContext::dancers`]. Every
//! relation is seen from the first dancer's own frame: angle 0 is straight
//! ahead, π/2 is to the left.

use std::f64::consts::{FRAC_PI_2, PI};

use glam::DVec2;

use super::CallContext;
use crate::dancer::Dancer;
use crate::geometry::{VectorExt, angles_equal, is_approx};

pub fn distance_between(a: &Dancer, b: &Dancer) -> f64 {
    (a.location() - b.location()).length()
}

/// Angle of `p` as seen by `d`, in [-π, π].
pub fn angle_to(d: &Dancer, p: DVec2) -> f64 {
    d.tx.inverse().apply(p).heading()
}

impl CallContext {
    pub fn distance(&self, d1: usize, d2: usize) -> f64 {
        distance_between(&self.dancers[d1], &self.dancers[d2])
    }

    pub fn distance_from_center(&self, d: usize) -> f64 {
        self.dancers[d].location().length()
    }

    /// Angle of `d2` as seen by `d1`.
    pub fn angle(&self, d1: usize, d2: usize) -> f64 {
        angle_to(&self.dancers[d1], self.dancers[d2].location())
    }

    /// Angle of the center of the floor as seen by `d`.
    pub fn angle_to_center(&self, d: usize) -> f64 {
        angle_to(&self.dancers[d], DVec2::ZERO)
    }

    pub fn is_facing_in(&self, d: usize) -> bool {
        let a = self.angle_to_center(d).abs();
        !is_approx(a, FRAC_PI_2) && a < FRAC_PI_2
    }

    pub fn is_facing_out(&self, d: usize) -> bool {
        let a = self.angle_to_center(d).abs();
        !is_approx(a, FRAC_PI_2) && a > FRAC_PI_2
    }

    pub fn is_in_front(&self, d1: usize, d2: usize) -> bool {
        d1 != d2 && angles_equal(self.angle(d1, d2), 0.0)
    }

    pub fn is_in_back(&self, d1: usize, d2: usize) -> bool {
        d1 != d2 && angles_equal(self.angle(d1, d2), PI)
    }

    pub fn is_left(&self, d1: usize, d2: usize) -> bool {
        d1 != d2 && angles_equal(self.angle(d1, d2), FRAC_PI_2)
    }

    pub fn is_right(&self, d1: usize, d2: usize) -> bool {
        d1 != d2 && angles_equal(self.angle(d1, d2), PI * 1.5)
    }

    /// Closest dancer to `d` among those passing `filter`.
    pub fn dancer_closest(&self, d: usize, filter: impl Fn(usize) -> bool) -> Option<usize> {
        (0..self.dancers.len())
            .filter(|&d2| filter(d2))
            .fold(None, |best, d2| match best {
                Some(b) if self.distance(b, d) <= self.distance(d2, d) => Some(b),
                _ => Some(d2),
            })
    }

    /// Dancers passing `filter`, nearest to `d` first.
    pub fn dancers_in_order(&self, d: usize, filter: impl Fn(usize) -> bool) -> Vec<usize> {
        let mut found: Vec<usize> = (0..self.dancers.len()).filter(|&d2| filter(d2)).collect();
        found.sort_by(|&a, &b| self.distance(d, a).total_cmp(&self.distance(d, b)));
        found
    }

    pub fn dancer_in_front(&self, d: usize) -> Option<usize> {
        self.dancer_closest(d, |d2| self.is_in_front(d, d2))
    }

    pub fn dancer_in_back(&self, d: usize) -> Option<usize> {
        self.dancer_closest(d, |d2| self.is_in_back(d, d2))
    }

    pub fn dancer_to_right(&self, d: usize) -> Option<usize> {
        self.dancer_closest(d, |d2| self.is_right(d, d2))
    }

    pub fn dancer_to_left(&self, d: usize) -> Option<usize> {
        self.dancer_closest(d, |d2| self.is_left(d, d2))
    }

    /// The dancer in front of `d`, if `d` is also the one in front of it.
    pub fn dancer_facing(&self, d: usize) -> Option<usize> {
        self.dancer_in_front(d)
            .filter(|&d2| self.dancer_in_front(d2) == Some(d))
    }

    /// Dancers standing on the straight line between `d1` and `d2`.
    pub fn in_between(&self, d1: usize, d2: usize) -> Vec<usize> {
        let span = self.distance(d1, d2);
        (0..self.dancers.len())
            .filter(|&d| {
                d != d1
                    && d != d2
                    && is_approx(self.distance(d, d1) + self.distance(d, d2), span)
            })
            .collect()
    }

    pub fn dancers_to_right(&self, d: usize) -> Vec<usize> {
        self.dancers_in_order(d, |d2| self.is_right(d, d2))
    }

    pub fn dancers_to_left(&self, d: usize) -> Vec<usize> {
        self.dancers_in_order(d, |d2| self.is_left(d, d2))
    }

    pub fn dancers_in_front(&self, d: usize) -> Vec<usize> {
        self.dancers_in_order(d, |d2| self.is_in_front(d, d2))
    }

    pub fn dancers_in_back(&self, d: usize) -> Vec<usize> {
        self.dancers_in_order(d, |d2| self.is_in_back(d, d2))
    }

    pub fn partner(&self, d: usize) -> Option<usize> {
        self.dancers[d].roles.partner
    }

    /// Partner faces the opposite way, as in a wave or mini-wave.
    pub fn is_in_wave(&self, d: usize) -> bool {
        self.partner(d)
            .is_some_and(|p| angles_equal(self.angle(d, p), self.angle(p, d)))
    }

    /// Partner faces the same way.
    pub fn is_in_couple(&self, d: usize) -> bool {
        self.partner(d)
            .is_some_and(|p| angles_equal(self.dancers[d].facing(), self.dancers[p].facing()))
    }

    /// Four dancers, each with a partner and someone directly in front or
    /// behind.
    pub fn is_box(&self) -> bool {
        self.dancers.len() == 4
            && self
                .dancers
                .iter()
                .all(|d| d.roles.partner.is_some() && (d.roles.leader || d.roles.trailer))
    }

    /// Four dancers in any kind of line along one axis, waves included.
    pub fn is_line(&self) -> bool {
        self.dancers.len() == 4
            && (0..4).all(|d| is_approx(self.angle_to_center(d).abs(), FRAC_PI_2))
            && (self.dancers.iter().all(|d| is_approx(d.location().x, 0.0))
                || self.dancers.iter().all(|d| is_approx(d.location().y, 0.0)))
    }

    /// Every dancer has three others beside it: two general lines.
    pub fn is_lines(&self) -> bool {
        (0..self.dancers.len())
            .all(|d| self.dancers_to_right(d).len() + self.dancers_to_left(d).len() == 3)
    }

    /// Every dancer has three others ahead or behind: two general columns.
    pub fn is_columns(&self) -> bool {
        (0..self.dancers.len())
            .all(|d| self.dancers_in_front(d).len() + self.dancers_in_back(d).len() == 3)
    }
}
