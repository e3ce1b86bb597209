//! Formations: dancer layouts as reference data, the standard set used for
//! snapping, and the relative-angle matcher.

pub mod matcher;
pub mod standard;

pub use matcher::{angle_bin, match_formations};
pub use standard::{STANDARD_FORMATIONS, standard_formation};

use crate::dancer::{Dancer, Gender};

/// One entry of a formation. Every entry stands for a couple of dancers:
/// this one and its mirror image through the center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormationDancer {
    pub gender: Gender,
    pub x: f64,
    pub y: f64,
    /// Degrees, counter-clockwise from +x.
    pub angle: f64,
    pub couple: u8,
}

impl FormationDancer {
    pub fn new(gender: Gender, x: f64, y: f64, angle: f64) -> Self {
        Self {
            gender,
            x,
            y,
            angle,
            couple: 0,
        }
    }

    pub fn with_couple(mut self, couple: u8) -> Self {
        self.couple = couple;
        self
    }
}

/// A named arrangement of half the dancers; the other half is implied by
/// 180° symmetry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Formation {
    pub name: String,
    pub entries: Vec<FormationDancer>,
}

impl Formation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn dancer(mut self, gender: Gender, x: f64, y: f64, angle: f64) -> Self {
        self.entries.push(FormationDancer::new(gender, x, y, angle));
        self
    }

    pub fn couple(mut self, couple: u8, gender: Gender, x: f64, y: f64, angle: f64) -> Self {
        self.entries
            .push(FormationDancer::new(gender, x, y, angle).with_couple(couple));
        self
    }

    /// Number of dancers, counting the mirrored halves.
    pub fn len(&self) -> usize {
        self.entries.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expand into dancers numbered from 1. Dancers `2k` and `2k+1` (zero
    /// based) are always a mirrored pair, which the matcher relies on.
    pub fn dancers(&self) -> Vec<Dancer> {
        let mut dancers = Vec::with_capacity(self.len());
        for (k, e) in self.entries.iter().enumerate() {
            let mirror_couple = if e.couple == 0 { 0 } else { e.couple + 2 };
            dancers.push(Dancer::new(2 * k + 1, e.gender, e.x, e.y, e.angle).with_couple(e.couple));
            dancers.push(
                Dancer::new(2 * k + 2, e.gender, -e.x, -e.y, e.angle + 180.0)
                    .with_couple(mirror_couple),
            );
        }
        dancers
    }
}
