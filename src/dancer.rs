//! Dancers: start pose, accumulated path and per-analysis roles.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use glam::DVec2;

use crate::errors::ParseError;
use crate::geometry::{Transform, VectorExt};
use crate::motion::{Hands, Movement, Path};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    Boy,
    Girl,
    Phantom,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Boy => "boy",
            Gender::Girl => "girl",
            Gender::Phantom => "phantom",
        })
    }
}

impl FromStr for Gender {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boy" => Ok(Gender::Boy),
            "girl" => Ok(Gender::Girl),
            "phantom" => Ok(Gender::Phantom),
            _ => Err(ParseError::UnknownGender { name: s.to_string() }),
        }
    }
}

/// Role flags assigned by formation analysis.
///
/// `partner` is an index into the same dancer list that was analyzed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Roles {
    pub beau: bool,
    pub belle: bool,
    pub leader: bool,
    pub trailer: bool,
    pub center: bool,
    pub very_center: bool,
    pub end: bool,
    pub partner: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct Dancer {
    pub number: usize,
    pub gender: Gender,
    /// Couple number, 1 and 3 are heads, 2 and 4 are sides, 0 if unset.
    pub couple: u8,
    start_x: f64,
    start_y: f64,
    /// Degrees, counter-clockwise from +x.
    start_angle: f64,
    start: Transform,
    /// Pose at the last animated beat.
    pub tx: Transform,
    pub path: Path,
    /// Hands held out at the last animated beat.
    pub hands: Hands,
    pub left_grip: Option<usize>,
    pub right_grip: Option<usize>,
    pub active: bool,
    pub hidden: bool,
    pub roles: Roles,
    /// Index of the dancer this one was snapshotted from.
    pub source: Option<usize>,
    prev_angle: f64,
}

impl Dancer {
    /// New dancer at `(x, y)` facing `angle` degrees.
    pub fn new(number: usize, gender: Gender, x: f64, y: f64, angle: f64) -> Self {
        let start = start_transform(x, y, angle);
        Self {
            number,
            gender,
            couple: 0,
            start_x: x,
            start_y: y,
            start_angle: angle,
            start,
            tx: start,
            path: Path::new(),
            hands: Hands::BOTH,
            left_grip: None,
            right_grip: None,
            active: true,
            hidden: false,
            roles: Roles::default(),
            source: None,
            prev_angle: 0.0,
        }
    }

    pub fn with_couple(mut self, couple: u8) -> Self {
        self.couple = couple;
        self
    }

    /// Copy standing where this dancer is now, with an empty path.
    pub fn snapshot(&self, source: usize) -> Dancer {
        let loc = self.location();
        let mut d = Dancer::new(self.number, self.gender, loc.x, loc.y, self.tx.angle().to_degrees());
        d.couple = self.couple;
        d.active = self.active;
        d.hidden = self.hidden;
        d.source = Some(source);
        d
    }

    pub fn start(&self) -> Transform {
        self.start
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn start_location(&self) -> DVec2 {
        DVec2::new(self.start_x, self.start_y)
    }

    fn compute_start(&mut self) {
        self.start = start_transform(self.start_x, self.start_y, self.start_angle);
        self.tx = self.start;
    }

    pub fn rotate_start_angle(&mut self, degrees: f64) {
        self.start_angle += degrees;
        self.compute_start();
    }

    pub fn shift_start(&mut self, dx: f64, dy: f64) {
        self.start_x += dx;
        self.start_y += dy;
        self.compute_start();
    }

    pub fn beats(&self) -> f64 {
        self.path.beats()
    }

    pub fn location(&self) -> DVec2 {
        self.tx.location()
    }

    /// Facing direction in radians.
    pub fn facing(&self) -> f64 {
        self.tx.angle()
    }

    pub fn is_phantom(&self) -> bool {
        self.gender == Gender::Phantom
    }

    /// Evaluate the path at `beat` and update `tx`, `hands` and grips.
    pub fn animate(&mut self, beat: f64) {
        if beat == 0.0 {
            self.left_grip = None;
            self.right_grip = None;
        }
        self.tx = self.start;
        let mut remaining = beat;
        let mut current: Option<Movement> = None;
        for (m, tx) in self.path.movements().iter().zip(self.path.transforms()) {
            if remaining >= m.beats() {
                self.tx = self.start.pre_concatenate(*tx);
                remaining -= m.beats();
            } else {
                current = Some(*m);
                break;
            }
        }
        match current {
            Some(m) => {
                self.tx = self
                    .tx
                    .pre_concatenate(m.translate(remaining))
                    .pre_concatenate(m.rotate(remaining));
                self.hands = if remaining < 0.0 { Hands::BOTH } else { m.hands() };
                if !m.hands().intersects(Hands::GRIP_LEFT) {
                    self.left_grip = None;
                }
                if !m.hands().intersects(Hands::GRIP_RIGHT) {
                    self.right_grip = None;
                }
            }
            // Hold hands in the ending formation
            None => self.hands = Hands::BOTH,
        }
    }

    pub fn animate_to_end(&mut self) {
        self.animate(self.beats());
    }

    /// Warp the current pose onto a six-couple hexagon floor.
    pub fn hexagonify(&mut self, beat: f64) {
        let a2 = -self.unwrapped_turn(beat) / 3.0;
        self.tx = self.tx.concatenate(Transform::rotation(a2));
    }

    /// Warp the current pose onto a two-couple floor.
    pub fn bigonify(&mut self, beat: f64) {
        let a2 = self.unwrapped_turn(beat);
        self.tx = self.tx.concatenate(Transform::rotation(a2));
    }

    /// Angle travelled around the center since the start, kept continuous
    /// across the ±π seam between successive frames.
    fn unwrapped_turn(&mut self, beat: f64) -> f64 {
        let a0 = self.start_y.atan2(self.start_x);
        let mut a1 = self.location().heading();
        if beat <= 0.0 {
            self.prev_angle = a1;
        }
        let wrap = ((a1 - self.prev_angle) / (PI * 2.0)).round();
        a1 -= wrap * PI * 2.0;
        self.prev_angle = a1;
        a1 - a0
    }
}

fn start_transform(x: f64, y: f64, angle: f64) -> Transform {
    Transform::IDENTITY.translate(x, y).rotate(angle.to_radians())
}

impl fmt::Display for Dancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)
    }
}
