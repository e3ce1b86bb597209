//! One timed segment of a dancer's path.

use glam::DVec2;

use super::Hands;
use crate::defaults::{SKEW_MAX_ITERATIONS, SKEW_TOLERANCE};
use crate::geometry::{Bezier, Transform};
use crate::log::warn;

/// A translation curve plus an independent rotation curve, both starting
/// at the dancer's local origin and facing along +x.
///
/// The rotation curve only drives the heading: its tangent at time `t` is
/// the direction the dancer faces. It starts with a control point on the
/// x axis so every movement begins facing forward.
///
/// `beats` can be shorter than `fullbeats` when the movement is clipped;
/// the curves are still parameterized over `fullbeats`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement {
    translation: Bezier,
    rotation: Bezier,
    fullbeats: f64,
    beats: f64,
    hands: Hands,
}

impl Movement {
    /// Heading follows the translation curve.
    ///
    /// `points` is `[cx1, cy1, cx2, cy2, x2, y2]`.
    pub fn new(beats: f64, hands: Hands, points: [f64; 6]) -> Self {
        let [cx1, _, cx2, cy2, x2, y2] = points;
        Self::with_rotation(beats, hands, points, [cx1, cx2, cy2, x2, y2])
    }

    /// Independent heading curve.
    ///
    /// `rotation` is `[cx3, cx4, cy4, x4, y4]`.
    pub fn with_rotation(beats: f64, hands: Hands, points: [f64; 6], rotation: [f64; 5]) -> Self {
        let [cx1, cy1, cx2, cy2, x2, y2] = points;
        let [cx3, cx4, cy4, x4, y4] = rotation;
        Self {
            translation: Bezier::from_origin(
                DVec2::new(cx1, cy1),
                DVec2::new(cx2, cy2),
                DVec2::new(x2, y2),
            ),
            rotation: Bezier::from_origin(
                DVec2::new(cx3, 0.0),
                DVec2::new(cx4, cy4),
                DVec2::new(x4, y4),
            ),
            fullbeats: beats,
            beats,
            hands,
        }
    }

    fn from_curves(translation: Bezier, rotation: Bezier, fullbeats: f64, beats: f64, hands: Hands) -> Self {
        Self {
            translation,
            rotation,
            fullbeats,
            beats,
            hands,
        }
    }

    pub fn btranslate(&self) -> &Bezier {
        &self.translation
    }

    pub fn brotate(&self) -> &Bezier {
        &self.rotation
    }

    pub fn beats(&self) -> f64 {
        self.beats
    }

    pub fn fullbeats(&self) -> f64 {
        self.fullbeats
    }

    pub fn hands(&self) -> Hands {
        self.hands
    }

    /// Fraction of the curves reached at `beat`, clamped to the clip.
    fn fraction(&self, beat: f64) -> f64 {
        if self.fullbeats <= 0.0 {
            return 1.0;
        }
        beat.clamp(0.0, self.beats.max(0.0)) / self.fullbeats
    }

    /// Translation part at `beat`.
    pub fn translate(&self, beat: f64) -> Transform {
        self.translation.translate(self.fraction(beat))
    }

    /// Rotation part at `beat`.
    pub fn rotate(&self, beat: f64) -> Transform {
        self.rotation.rotate(self.fraction(beat))
    }

    pub fn final_translate(&self) -> Transform {
        self.translate(self.beats)
    }

    pub fn final_rotate(&self) -> Transform {
        self.rotate(self.beats)
    }

    /// Local pose at `beat`: translate, then turn.
    pub fn transform(&self, beat: f64) -> Transform {
        Transform::IDENTITY
            .pre_concatenate(self.translate(beat))
            .pre_concatenate(self.rotate(beat))
    }

    /// Same shape, new duration. Any clip is dropped.
    #[must_use]
    pub fn time(&self, beats: f64) -> Movement {
        Self::from_curves(self.translation, self.rotation, beats, beats, self.hands)
    }

    /// Same shape and clip, durations stretched by `factor`.
    #[must_use]
    pub fn stretch(&self, factor: f64) -> Movement {
        Self::from_curves(
            self.translation,
            self.rotation,
            self.fullbeats * factor,
            self.beats * factor,
            self.hands,
        )
    }

    #[must_use]
    pub fn use_hands(&self, hands: Hands) -> Movement {
        Self::from_curves(self.translation, self.rotation, self.fullbeats, self.beats, hands)
    }

    /// Scale both curves. A negative `y` mirrors the movement, so the hands
    /// swap sides too.
    #[must_use]
    pub fn scale(&self, x: f64, y: f64) -> Movement {
        let s = DVec2::new(x, y);
        let t = &self.translation;
        let r = &self.rotation;
        let hands = if y < 0.0 { self.hands.mirrored() } else { self.hands };
        Self::from_curves(
            Bezier::from_origin(t.ctrl1 * s, t.ctrl2 * s, t.end * s),
            Bezier::from_origin(r.ctrl1 * s, r.ctrl2 * s, r.end * s),
            self.fullbeats,
            self.beats,
            hands,
        )
    }

    /// Mirror about the local x axis.
    #[must_use]
    pub fn reflect(&self) -> Movement {
        self.scale(1.0, -1.0)
    }

    /// Shift the end point by `(x, y)`. For a clipped movement the shift is
    /// applied to the clip point instead.
    #[must_use]
    pub fn skew(&self, x: f64, y: f64) -> Movement {
        if self.beats < self.fullbeats {
            self.skew_clip(x, y)
        } else {
            self.skew_full(x, y)
        }
    }

    /// Shift the full-length end point and its nearest control point.
    #[must_use]
    pub fn skew_full(&self, x: f64, y: f64) -> Movement {
        let d = DVec2::new(x, y);
        let t = &self.translation;
        Self::from_curves(
            Bezier::from_origin(t.ctrl1, t.ctrl2 + d, t.end + d),
            self.rotation,
            self.fullbeats,
            self.beats,
            self.hands,
        )
    }

    /// Iteratively shift the full end point until the clip point has moved
    /// by `(x, y)`. Returns `self` unchanged if that does not converge.
    #[must_use]
    pub fn skew_clip(&self, x: f64, y: f64) -> Movement {
        let target = self.final_translate().location() + DVec2::new(x, y);
        let mut delta = DVec2::new(x, y);
        let mut m = *self;
        for _ in 0..SKEW_MAX_ITERATIONS {
            m = m.skew_full(delta.x, delta.y);
            delta = target - m.final_translate().location();
            if delta.length() <= SKEW_TOLERANCE {
                return m;
            }
        }
        warn!(x, y, "clipped skew did not converge");
        *self
    }

    /// Cut the movement short at `beats`. Out of range values leave it as is.
    #[must_use]
    pub fn clip(&self, beats: f64) -> Movement {
        if beats > 0.0 && beats < self.fullbeats {
            Self::from_curves(self.translation, self.rotation, self.fullbeats, beats, self.hands)
        } else {
            *self
        }
    }

    /// Neither moves nor turns.
    pub fn is_stand(&self) -> bool {
        self.translation.end == DVec2::ZERO && self.rotation.end == DVec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn run_right() -> Movement {
        Movement::new(3.0, Hands::RIGHT, [1.33, 0.0, 1.33, -2.0, 0.0, -2.0])
    }

    fn forward() -> Movement {
        Movement::new(1.0, Hands::NONE, [1.0 / 3.0, 0.0, 2.0 / 3.0, 0.0, 1.0, 0.0])
    }

    // ==================== Evaluation tests ====================

    #[test]
    fn run_ends_behind_facing_back() {
        let tx = run_right().transform(3.0);
        assert!((tx.location() - DVec2::new(0.0, -2.0)).length() < 1e-9);
        assert!((tx.angle().abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn beat_is_clamped() {
        let m = forward();
        assert_eq!(m.translate(5.0), m.translate(1.0));
        assert_eq!(m.translate(-1.0), m.translate(0.0));
    }

    #[test]
    fn zero_length_movement_is_at_end() {
        let m = forward().time(0.0);
        assert!((m.final_translate().location() - DVec2::X).length() < 1e-12);
    }

    // ==================== Clip tests ====================

    #[test]
    fn clip_in_range() {
        let m = run_right().clip(1.5);
        assert_eq!(m.beats(), 1.5);
        assert_eq!(m.fullbeats(), 3.0);
        assert_eq!(m.final_translate(), run_right().translate(1.5));
    }

    #[test]
    fn clip_out_of_range_is_identity() {
        let m = run_right();
        assert_eq!(m.clip(0.0), m);
        assert_eq!(m.clip(-1.0), m);
        assert_eq!(m.clip(3.0), m);
        assert_eq!(m.clip(7.0), m);
    }

    // ==================== Skew tests ====================

    #[test]
    fn skew_full_moves_endpoint() {
        let m = forward().skew(0.5, -1.0);
        assert!((m.final_translate().location() - DVec2::new(1.5, -1.0)).length() < 1e-12);
    }

    #[test]
    fn skew_clip_lands_clip_point() {
        for (dx, dy) in [(1.0, 0.0), (-2.0, 1.5), (0.5, -3.0), (4.0, 4.0)] {
            let m = run_right().clip(1.5);
            let before = m.final_translate().location();
            let skewed = m.skew(dx, dy);
            assert_eq!(skewed.beats(), 1.5);
            let after = skewed.final_translate().location();
            assert!(
                (after - before - DVec2::new(dx, dy)).length() < SKEW_TOLERANCE,
                "skew ({dx},{dy}) landed at {after:?}"
            );
        }
    }

    // ==================== Transform tests ====================

    #[test]
    fn reflect_swaps_hands() {
        let m = run_right().reflect();
        assert_eq!(m.hands(), Hands::LEFT);
        assert!((m.final_translate().location() - DVec2::new(0.0, 2.0)).length() < 1e-9);
        let grip = Movement::new(3.0, Hands::GRIP_LEFT, [1.33, 0.0, 1.33, 2.0, 0.0, 2.0]);
        assert_eq!(grip.reflect().hands(), Hands::GRIP_RIGHT);
    }

    #[test]
    fn scale_keeps_clip() {
        let m = run_right().clip(2.0).scale(2.0, 1.0);
        assert_eq!(m.beats(), 2.0);
        assert_eq!(m.fullbeats(), 3.0);
    }

    #[test]
    fn time_and_stretch() {
        let m = run_right().clip(1.5);
        let t = m.time(6.0);
        assert_eq!((t.beats(), t.fullbeats()), (6.0, 6.0));
        let s = m.stretch(2.0);
        assert_eq!((s.beats(), s.fullbeats()), (3.0, 6.0));
        assert_eq!(s.final_translate(), m.final_translate());
    }

    #[test]
    fn stand_detection() {
        let stand = Movement::with_rotation(2.0, Hands::BOTH, [0.0; 6], [0.0; 5]);
        assert!(stand.is_stand());
        assert!(!forward().is_stand());
        let uturn = Movement::with_rotation(2.0, Hands::NONE, [0.0; 6], [1.0, 1.0, 1.0, 0.0, 1.0]);
        assert!(!uturn.is_stand());
    }
}
