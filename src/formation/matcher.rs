//! Matching two sets of dancers by their relative positions.
//!
//! Absolute positions never enter the comparison: for every pair of dancers
//! the direction from one to the other, seen in the first dancer's own
//! frame, is sorted into one of eight sectors. Two formations match when a
//! permutation makes all those sectors agree, so a formation matches itself
//! at any rotation of the floor.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::context::query::{angle_to, distance_between};
use crate::dancer::Dancer;
use crate::defaults::HANDHOLD_DISTANCE;
use crate::geometry::{angle_diff, angles_equal};
use crate::log::trace;

/// Sector of a relative angle: 0, 2, 4, 6 for exactly ahead, left, behind,
/// right; odd numbers for the quadrants in between.
pub fn angle_bin(a: f64) -> u8 {
    let a = angle_diff(a, 0.0);
    if angles_equal(a, 0.0) {
        0
    } else if angles_equal(a, FRAC_PI_2) {
        2
    } else if angles_equal(a, PI) {
        4
    } else if angles_equal(a, -FRAC_PI_2) {
        6
    } else if a > 0.0 && a < FRAC_PI_2 {
        1
    } else if a > FRAC_PI_2 {
        3
    } else if a < 0.0 && a > -FRAC_PI_2 {
        7
    } else {
        5
    }
}

fn relation(dancers: &[Dancer], from: usize, to: usize) -> u8 {
    angle_bin(angle_to(&dancers[from], dancers[to].location()))
}

/// Find `mapping` so that `source[i]` plays the part of
/// `target[mapping[i]]`.
///
/// Dancers `2k` and `2k+1` are mirrored pairs on both sides and are always
/// mapped together. With `sexy`, genders have to agree. With `fuzzy`,
/// sectors may differ by one and a pair that cannot be placed is turned
/// around once before backtracking. Turned dancers stay turned, even when
/// the match fails.
pub fn match_formations(
    source: &mut [Dancer],
    target: &[Dancer],
    sexy: bool,
    fuzzy: bool,
) -> Option<Vec<usize>> {
    let n = source.len();
    if n != target.len() || n % 2 != 0 {
        return None;
    }
    let mut mapping: Vec<Option<usize>> = vec![None; n];
    let mut rotated = vec![false; n];
    let mut mapindex: isize = 0;
    while mapindex >= 0 && (mapindex as usize) < n {
        let i = mapindex as usize;
        let mut next = mapping[i].map_or(0, |m| m + 1);
        let mut found = false;
        while next < n {
            let taken = mapping[..i]
                .iter()
                .any(|m| *m == Some(next) || *m == Some(next ^ 1));
            if !taken {
                mapping[i] = Some(next);
                mapping[i + 1] = Some(next ^ 1);
                if test_mapping(source, target, &mapping, i, sexy, fuzzy) {
                    found = true;
                    break;
                }
            }
            next += 1;
        }
        if found {
            mapindex += 2;
            continue;
        }
        mapping[i] = None;
        mapping[i + 1] = None;
        if fuzzy && !rotated[i] {
            trace!(dancer = i, "turning pair around to retry match");
            source[i].rotate_start_angle(180.0);
            source[i + 1].rotate_start_angle(180.0);
            rotated[i] = true;
        } else {
            rotated[i] = false;
            mapindex -= 2;
        }
    }
    if mapindex < 0 {
        return None;
    }
    mapping.into_iter().collect()
}

/// Check the newly placed dancer `i` against every dancer already placed.
pub fn test_mapping(
    source: &[Dancer],
    target: &[Dancer],
    mapping: &[Option<usize>],
    i: usize,
    sexy: bool,
    fuzzy: bool,
) -> bool {
    let Some(mi) = mapping[i] else {
        return false;
    };
    if sexy && source[i].gender != target[mi].gender {
        return false;
    }
    mapping.iter().enumerate().all(|(j, m)| {
        let Some(mj) = *m else {
            return true;
        };
        if i == j {
            return true;
        }
        let relq1 = relation(source, i, j);
        let relt1 = relation(target, mi, mj);
        let relq2 = relation(source, j, i);
        let relt2 = relation(target, mj, mi);
        // Side by side: holding hands or not has to agree
        if !fuzzy && (relq1 == 2 || relq1 == 6) {
            let d1 = distance_between(&source[i], &source[j]);
            let d2 = distance_between(&target[mi], &target[mj]);
            if (d1 < HANDHOLD_DISTANCE) != (d2 < HANDHOLD_DISTANCE) {
                return false;
            }
        }
        if fuzzy {
            let close = |a: u8, b: u8| matches!(a.abs_diff(b), 0 | 1 | 7);
            close(relq1, relt1) && close(relq2, relt2)
        } else {
            relq1 == relt1 && relq2 == relt2
        }
    })
}
