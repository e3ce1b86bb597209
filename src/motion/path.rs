//! A dancer's trajectory as a chain of movements.

use super::{Hands, Movement};
use crate::geometry::Transform;

/// Ordered movements plus the cumulative transform at the end of each.
///
/// `transforms()[i]` is the pose after movements `0..=i` starting from the
/// identity. It is rebuilt after every change to the movement list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    movelist: Vec<Movement>,
    transformlist: Vec<Transform>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_movement(m: Movement) -> Self {
        Self::from_movements(vec![m])
    }

    pub fn from_movements(movelist: Vec<Movement>) -> Self {
        let mut path = Self {
            movelist,
            transformlist: Vec::new(),
        };
        path.recalculate();
        path
    }

    fn recalculate(&mut self) {
        let mut tx = Transform::IDENTITY;
        self.transformlist = self
            .movelist
            .iter()
            .map(|m| {
                tx = tx
                    .pre_concatenate(m.final_translate())
                    .pre_concatenate(m.final_rotate());
                tx
            })
            .collect();
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movelist
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transformlist
    }

    pub fn len(&self) -> usize {
        self.movelist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movelist.is_empty()
    }

    /// Pose at the end of the whole path.
    pub fn end_transform(&self) -> Transform {
        self.transformlist.last().copied().unwrap_or(Transform::IDENTITY)
    }

    /// Sum of the beats of all movements.
    pub fn beats(&self) -> f64 {
        self.movelist.iter().map(Movement::beats).sum()
    }

    fn map_movements(mut self, f: impl Fn(&Movement) -> Movement) -> Self {
        for m in &mut self.movelist {
            *m = f(m);
        }
        self.recalculate();
        self
    }

    /// Re-time every movement proportionally so the total is `newbeats`.
    #[must_use]
    pub fn changebeats(self, newbeats: f64) -> Self {
        let total = self.beats();
        if total <= 0.0 {
            return self;
        }
        let factor = newbeats / total;
        self.map_movements(|m| m.stretch(factor))
    }

    #[must_use]
    pub fn changehands(self, hands: Hands) -> Self {
        self.map_movements(|m| m.use_hands(hands))
    }

    #[must_use]
    pub fn scale(self, x: f64, y: f64) -> Self {
        self.map_movements(|m| m.scale(x, y))
    }

    /// Mirror about the dancer's starting x axis.
    #[must_use]
    pub fn reflect(self) -> Self {
        self.map_movements(Movement::reflect)
    }

    /// Shift the final position by `(x, y)` in the frame of the last
    /// movement.
    #[must_use]
    pub fn skew(mut self, x: f64, y: f64) -> Self {
        if let Some(last) = self.movelist.last_mut() {
            *last = last.skew(x, y);
            self.recalculate();
        }
        self
    }

    /// Shift the end of the first movement by `(x, y)`.
    #[must_use]
    pub fn skew_first(mut self, x: f64, y: f64) -> Self {
        if let Some(first) = self.movelist.first_mut() {
            *first = first.skew(x, y);
            self.recalculate();
        }
        self
    }

    /// Append all movements of `other`.
    #[must_use]
    pub fn chain(mut self, other: &Path) -> Self {
        self.append(other);
        self
    }

    pub fn add(&mut self, m: Movement) {
        self.movelist.push(m);
        self.recalculate();
    }

    pub fn append(&mut self, other: &Path) {
        self.movelist.extend_from_slice(&other.movelist);
        self.recalculate();
    }

    pub fn pop(&mut self) -> Option<Movement> {
        let m = self.movelist.pop();
        self.recalculate();
        m
    }

    pub fn clear(&mut self) {
        self.movelist.clear();
        self.transformlist.clear();
    }
}

impl From<Movement> for Path {
    fn from(m: Movement) -> Self {
        Path::from_movement(m)
    }
}

impl From<Vec<Movement>> for Path {
    fn from(movelist: Vec<Movement>) -> Self {
        Path::from_movements(movelist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn forward(beats: f64) -> Movement {
        Movement::new(beats, Hands::NONE, [1.0 / 3.0, 0.0, 2.0 / 3.0, 0.0, 1.0, 0.0])
    }

    fn run_right() -> Movement {
        Movement::new(3.0, Hands::RIGHT, [1.33, 0.0, 1.33, -2.0, 0.0, -2.0])
    }

    #[test]
    fn transforms_track_movements() {
        let mut p = Path::from_movement(forward(1.0));
        p.add(run_right());
        p.add(forward(2.0));
        assert_eq!(p.transforms().len(), p.movements().len());
        // forward 1, run right to (1,-2) facing back, forward 1 to (0,-2)
        let end = p.end_transform().location();
        assert!((end - DVec2::new(0.0, -2.0)).length() < 1e-6);
        assert_eq!(p.pop(), Some(forward(2.0)));
        assert_eq!(p.transforms().len(), 2);
    }

    #[test]
    fn changebeats_conserves_total() {
        for target in [0.5, 3.0, 6.0, 17.25] {
            let p = Path::from_movements(vec![forward(1.0), run_right().clip(1.5), forward(2.0)]);
            let end = p.end_transform();
            let p = p.changebeats(target);
            assert!((p.beats() - target).abs() < 1e-9);
            assert!((p.end_transform().location() - end.location()).length() < 1e-9);
            assert!((p.end_transform().angle() - end.angle()).abs() < 1e-9);
        }
    }

    #[test]
    fn skew_moves_only_last() {
        let p = Path::from_movements(vec![forward(1.0), forward(1.0)]).skew(0.0, 1.0);
        assert_eq!(p.movements()[0], forward(1.0));
        assert!((p.end_transform().location() - DVec2::new(2.0, 1.0)).length() < 1e-9);
    }

    #[test]
    fn reflect_and_hands() {
        let p = Path::from_movement(run_right()).reflect();
        assert_eq!(p.movements()[0].hands(), Hands::LEFT);
        assert!((p.end_transform().location() - DVec2::new(0.0, 2.0)).length() < 1e-9);
        let p = p.changehands(Hands::GRIP_BOTH);
        assert_eq!(p.movements()[0].hands(), Hands::GRIP_BOTH);
    }

    #[test]
    fn empty_path() {
        let mut p = Path::new();
        assert_eq!(p.beats(), 0.0);
        assert_eq!(p.pop(), None);
        assert_eq!(p.clone().changebeats(4.0), p);
        assert_eq!(p.end_transform(), Transform::IDENTITY);
    }
}
