//! Per-frame hand grips between nearby dancers.
//!
//! Every unobstructed pair of dancers gets a candidate [`Handhold`] with a
//! score, lower is better. Candidates are then assigned greedily by score,
//! each hand of each dancer going to at most one other dancer. Grips from
//! the previous frame score zero so dancers keep holding on while the
//! current movement says they grip.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};

use crate::dancer::Dancer;
use crate::geometry::{ieee_remainder, is_approx};
use crate::log::trace;
use crate::motion::Hands;

/// Shape of the dance floor, which changes how far dancers can reach.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FloorGeometry {
    #[default]
    Square,
    Hexagon,
    Bigon,
}

impl FloorGeometry {
    /// Distance past which the score climbs steeply.
    pub fn cutover(self) -> f64 {
        match self {
            FloorGeometry::Square => 2.0,
            FloorGeometry::Hexagon => 2.5,
            FloorGeometry::Bigon => 3.7,
        }
    }

    /// Scale applied to raw distances before scoring.
    pub fn distance_factor(self) -> f64 {
        match self {
            FloorGeometry::Hexagon => 1.15,
            _ => 1.0,
        }
    }

    /// Penalty per radian outside the comfortable reaching cone.
    pub fn angle_factor(self) -> f64 {
        match self {
            FloorGeometry::Bigon => 0.6,
            _ => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandholdConfig {
    pub geometry: FloorGeometry,
    pub show_phantoms: bool,
}

// Score per unit of distance below and above the cutover
const NEAR_DISTANCE_FACTOR: f64 = 0.1;
const FAR_DISTANCE_FACTOR: f64 = 2.0;
// Score per radian inside the cone
const CONE_ANGLE_FACTOR: f64 = 0.2;
const IN_CENTER_RADIUS: f64 = 1.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handhold {
    pub d1: usize,
    pub d2: usize,
    /// `Hands::LEFT` or `Hands::RIGHT`.
    pub h1: Hands,
    pub h2: Hands,
    /// Angle each hand turns from straight out to reach the other dancer.
    pub ah1: f64,
    pub ah2: f64,
    pub distance: f64,
    pub score: f64,
    /// Both dancers stand in the middle of a hexagon and reach to the center.
    pub in_center: bool,
}

struct Reach {
    hand: Hands,
    angle: f64,
    score: f64,
}

/// Score for a hand that has to rotate `offset` radians from straight out.
fn angle_score(offset: f64, geometry: FloorGeometry) -> f64 {
    let a = ieee_remainder(offset.abs(), PI * 2.0).abs();
    if a > FRAC_PI_6 {
        (a - FRAC_PI_6) * geometry.angle_factor() + FRAC_PI_6 * CONE_ANGLE_FACTOR
    } else {
        a * CONE_ANGLE_FACTOR
    }
}

/// Pick the hand `dancer` reaches toward `other` with.
///
/// The right hand is tried first. `offsets` are the hand rotations for
/// (right, left). Fails with a score of 10.
fn reach(
    dancers: &[Dancer],
    dancer: usize,
    other: usize,
    base: f64,
    offsets: (f64, f64),
    geometry: FloorGeometry,
) -> Reach {
    let d = &dancers[dancer];
    let candidates = [
        (Hands::RIGHT, offsets.0, d.right_grip),
        (Hands::LEFT, offsets.1, d.left_grip),
    ];
    for (hand, offset, grip) in candidates {
        let score = base + angle_score(offset, geometry);
        let free = score < 1.0 && d.hands.intersects(hand) && grip.is_none();
        if grip == Some(other) {
            return Reach {
                hand,
                angle: offset,
                score: 0.0,
            };
        }
        if free {
            return Reach {
                hand,
                angle: offset,
                score,
            };
        }
    }
    Reach {
        hand: Hands::NONE,
        angle: 0.0,
        score: 10.0,
    }
}

impl Handhold {
    /// Candidate handhold between dancers `i1` and `i2`, if they can reach.
    pub fn between(dancers: &[Dancer], i1: usize, i2: usize, geometry: FloorGeometry) -> Option<Handhold> {
        let (d1, d2) = (&dancers[i1], &dancers[i2]);
        if d1.hidden || d2.hidden {
            return None;
        }
        let delta = d2.location() - d1.location();
        let distance = delta.length();
        let d0 = distance * geometry.distance_factor();
        let cutover = geometry.cutover();
        let base = if d0 > cutover {
            (d0 - cutover) * FAR_DISTANCE_FACTOR + 2.0 * NEAR_DISTANCE_FACTOR
        } else {
            d0 * NEAR_DISTANCE_FACTOR
        };
        // Direction from d1 to d2
        let a0 = delta.y.atan2(delta.x);
        let a1 = d1.facing();
        let a2 = d2.facing();
        // d1 reaches toward a0, d2 back toward a0 + π
        let r1 = reach(
            dancers,
            i1,
            i2,
            base,
            (a1 - a0 + PI * 1.5, a1 - a0 + FRAC_PI_2),
            geometry,
        );
        let r2 = reach(
            dancers,
            i2,
            i1,
            base,
            (a2 - a0 + FRAC_PI_2, a2 - a0 + PI * 1.5),
            geometry,
        );
        let held = |d: &Dancer, other: usize| {
            if d.right_grip == Some(other) {
                Some(Hands::RIGHT)
            } else if d.left_grip == Some(other) {
                Some(Hands::LEFT)
            } else {
                None
            }
        };
        let mut hh = Handhold {
            d1: i1,
            d2: i2,
            h1: r1.hand,
            h2: r2.hand,
            ah1: r1.angle,
            ah2: r2.angle,
            distance,
            score: r1.score + r2.score,
            in_center: false,
        };
        // Dancers already gripping each other stay together
        if let (Some(h1), Some(h2)) = (held(d1, i2), held(d2, i1)) {
            hh.h1 = h1;
            hh.h2 = h2;
            hh.score = 0.0;
            return Some(hh);
        }
        if r1.score > 1.0 || r2.score > 1.0 || hh.score > 1.2 {
            return None;
        }
        Some(hh)
    }

    /// Marks the handhold as reaching to the center of a hexagon floor when
    /// both dancers stand close to it.
    fn check_in_center(&mut self, dancers: &[Dancer]) -> bool {
        self.in_center = dancers[self.d1].location().length() < IN_CENTER_RADIUS
            && dancers[self.d2].location().length() < IN_CENTER_RADIUS;
        if self.in_center {
            self.ah1 = 0.0;
            self.ah2 = 0.0;
            self.distance = 2.0;
        }
        self.in_center
    }
}

/// Some third dancer stands on the segment between `i1` and `i2`.
fn obstructed(dancers: &[Dancer], i1: usize, i2: usize) -> bool {
    let p1 = dancers[i1].location();
    let p2 = dancers[i2].location();
    let d12 = p1.distance(p2);
    dancers.iter().enumerate().any(|(i3, d3)| {
        i3 != i1
            && i3 != i2
            && is_approx(d3.location().distance(p1) + d3.location().distance(p2), d12)
    })
}

/// Assign hands for the current poses of `dancers`.
///
/// Clears grips the current movements no longer hold, records new grips on
/// the dancers, and returns the handholds to draw, best first.
pub fn resolve_handholds(dancers: &mut [Dancer], config: &HandholdConfig) -> Vec<Handhold> {
    for d in dancers.iter_mut() {
        if !d.hands.contains(Hands::GRIP_RIGHT) {
            d.right_grip = None;
        }
        if !d.hands.contains(Hands::GRIP_LEFT) {
            d.left_grip = None;
        }
    }
    let visible = |d: &Dancer| config.show_phantoms || !d.is_phantom();
    let mut candidates = Vec::new();
    for i1 in 0..dancers.len() {
        if !visible(&dancers[i1]) {
            continue;
        }
        for i2 in i1 + 1..dancers.len() {
            if !visible(&dancers[i2]) || obstructed(dancers, i1, i2) {
                continue;
            }
            if let Some(hh) = Handhold::between(dancers, i1, i2, config.geometry) {
                candidates.push(hh);
            }
        }
    }
    candidates.sort_by(|a, b| a.score.total_cmp(&b.score));

    let mut right_dancer: Vec<Option<usize>> = vec![None; dancers.len()];
    let mut left_dancer: Vec<Option<usize>> = vec![None; dancers.len()];
    let mut accepted = Vec::new();
    for mut hh in candidates {
        let in_center = config.geometry == FloorGeometry::Hexagon && hh.check_in_center(dancers);
        let free = |d: usize, h: Hands| {
            (h == Hands::RIGHT && right_dancer[d].is_none())
                || (h == Hands::LEFT && left_dancer[d].is_none())
        };
        if !in_center && !(free(hh.d1, hh.h1) && free(hh.d2, hh.h2)) {
            continue;
        }
        trace!(d1 = hh.d1, d2 = hh.d2, score = hh.score, "handhold");
        accepted.push(hh);
        if in_center {
            continue;
        }
        for (d, h, other) in [(hh.d1, hh.h1, hh.d2), (hh.d2, hh.h2, hh.d1)] {
            let dancer = &mut dancers[d];
            if h == Hands::RIGHT {
                right_dancer[d] = Some(other);
                if dancer.hands.contains(Hands::GRIP_RIGHT) {
                    dancer.right_grip = Some(other);
                }
            } else {
                left_dancer[d] = Some(other);
                if dancer.hands.contains(Hands::GRIP_LEFT) {
                    dancer.left_grip = Some(other);
                }
            }
        }
    }
    accepted
}

/// Move every dancer to `beat`, warp to the floor shape and resolve hands.
pub fn animate_frame(dancers: &mut [Dancer], beat: f64, config: &HandholdConfig) -> Vec<Handhold> {
    for d in dancers.iter_mut() {
        d.animate(beat);
        match config.geometry {
            FloorGeometry::Square => {}
            FloorGeometry::Hexagon => d.hexagonify(beat),
            FloorGeometry::Bigon => d.bigonify(beat),
        }
    }
    resolve_handholds(dancers, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dancer::Gender;

    fn dancer(number: usize, x: f64, y: f64, angle: f64) -> Dancer {
        Dancer::new(number, Gender::Boy, x, y, angle)
    }

    fn square() -> FloorGeometry {
        FloorGeometry::Square
    }

    // ==================== Scoring tests ====================

    #[test]
    fn wave_holds_right_hands() {
        let dancers = vec![dancer(1, -1.0, 0.0, 90.0), dancer(2, 1.0, 0.0, -90.0)];
        let hh = Handhold::between(&dancers, 0, 1, square()).unwrap();
        assert_eq!(hh.h1, Hands::RIGHT);
        assert_eq!(hh.h2, Hands::RIGHT);
        assert!((hh.score - 0.4).abs() < 1e-9);
        assert!((hh.distance - 2.0).abs() < 1e-9);
    }

    #[test]
    fn couple_holds_inside_hands() {
        let dancers = vec![dancer(1, -1.0, 0.0, 90.0), dancer(2, 1.0, 0.0, 90.0)];
        let hh = Handhold::between(&dancers, 0, 1, square()).unwrap();
        assert_eq!((hh.h1, hh.h2), (Hands::RIGHT, Hands::LEFT));
    }

    #[test]
    fn too_far_apart() {
        let dancers = vec![dancer(1, -1.75, 0.0, 90.0), dancer(2, 1.75, 0.0, 90.0)];
        assert_eq!(Handhold::between(&dancers, 0, 1, square()), None);
        // A bigon floor reaches further
        assert!(Handhold::between(&dancers, 0, 1, FloorGeometry::Bigon).is_some());
    }

    #[test]
    fn back_to_back_cannot_reach() {
        let dancers = vec![dancer(1, 0.0, 0.0, 0.0), dancer(2, 2.0, 0.0, 0.0)];
        assert_eq!(Handhold::between(&dancers, 0, 1, square()), None);
    }

    #[test]
    fn existing_grip_scores_zero() {
        let mut dancers = vec![dancer(1, -1.5, 0.0, 90.0), dancer(2, 1.5, 0.0, -90.0)];
        for d in &mut dancers {
            d.hands = Hands::GRIP_RIGHT;
        }
        dancers[0].right_grip = Some(1);
        dancers[1].right_grip = Some(0);
        let hh = Handhold::between(&dancers, 0, 1, square()).unwrap();
        assert_eq!(hh.score, 0.0);
        assert_eq!((hh.h1, hh.h2), (Hands::RIGHT, Hands::RIGHT));
    }

    #[test]
    fn hidden_dancers_never_hold() {
        let mut dancers = vec![dancer(1, -1.0, 0.0, 90.0), dancer(2, 1.0, 0.0, -90.0)];
        dancers[1].hidden = true;
        assert_eq!(Handhold::between(&dancers, 0, 1, square()), None);
    }

    // ==================== Resolver tests ====================

    #[test]
    fn line_of_three_holds_neighbors_only() {
        let mut dancers = vec![
            dancer(1, -2.0, 0.0, 90.0),
            dancer(2, 0.0, 0.0, 90.0),
            dancer(3, 2.0, 0.0, 90.0),
        ];
        let hh = resolve_handholds(&mut dancers, &HandholdConfig::default());
        let pairs: Vec<(usize, usize)> = hh.iter().map(|h| (h.d1, h.d2)).collect();
        assert_eq!(hh.len(), 2);
        assert!(pairs.contains(&(0, 1)));
        assert!(pairs.contains(&(1, 2)));
    }

    #[test]
    fn better_score_takes_the_hand() {
        let mut dancers = vec![
            dancer(1, 0.0, 0.0, 90.0),
            dancer(2, 1.9, 0.0, 90.0),
            dancer(3, 2.0, 0.3, 90.0),
        ];
        let hh = resolve_handholds(&mut dancers, &HandholdConfig::default());
        assert_eq!(hh.len(), 1);
        assert_eq!((hh[0].d1, hh[0].d2), (0, 1));
    }

    #[test]
    fn phantoms_hidden_by_default() {
        let mut dancers = vec![
            dancer(1, -1.0, 0.0, 90.0),
            Dancer::new(2, Gender::Phantom, 1.0, 0.0, -90.0),
        ];
        assert!(resolve_handholds(&mut dancers, &HandholdConfig::default()).is_empty());
        let config = HandholdConfig {
            show_phantoms: true,
            ..Default::default()
        };
        assert_eq!(resolve_handholds(&mut dancers, &config).len(), 1);
    }

    #[test]
    fn gripping_movement_records_grip() {
        let mut dancers = vec![dancer(1, -1.0, 0.0, 90.0), dancer(2, 1.0, 0.0, -90.0)];
        dancers[0].hands = Hands::GRIP_RIGHT;
        dancers[1].hands = Hands::RIGHT;
        resolve_handholds(&mut dancers, &HandholdConfig::default());
        assert_eq!(dancers[0].right_grip, Some(1));
        assert_eq!(dancers[1].right_grip, None);
        // Letting go clears it on the next frame
        dancers[0].hands = Hands::RIGHT;
        resolve_handholds(&mut dancers, &HandholdConfig::default());
        assert_eq!(dancers[0].right_grip, None);
    }

    #[test]
    fn hexagon_center_handhold_keeps_hands_free() {
        let mut dancers = vec![
            dancer(1, -0.5, 0.0, 90.0),
            dancer(2, 0.5, 0.0, -90.0),
            dancer(3, 2.5, 0.0, 90.0),
        ];
        let config = HandholdConfig {
            geometry: FloorGeometry::Hexagon,
            ..Default::default()
        };
        let hh = resolve_handholds(&mut dancers, &config);
        let center = hh.iter().find(|h| h.in_center).unwrap();
        assert_eq!((center.d1, center.d2), (0, 1));
        assert_eq!(center.distance, 2.0);
    }
}
