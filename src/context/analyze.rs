use super::CallContext;
use crate::dancer::Roles;
use crate::defaults::{CENTER_GAP, PARTNER_DISTANCE};
use crate::geometry::is_approx_within;
use crate::log::trace;

impl CallContext {
    /// Move every dancer to the end of its path and assign roles.
    pub fn analyze(&mut self) {
        self.analyze_at(None);
    }

    /// Assign roles from where the dancers are at `beat`, or at the end of
    /// their paths.
    ///
    /// Left and right are counted before front and back, so a dancer seen
    /// exactly sideways is never also counted as ahead. Partners come from
    /// parity: an odd number of dancers on one side and an even number on
    /// the other means the nearest odd-side dancer is the partner.
    pub fn analyze_at(&mut self, beat: Option<f64>) {
        for d in &mut self.dancers {
            match beat {
                Some(b) => d.animate(b),
                None => d.animate_to_end(),
            }
            d.roles = Roles::default();
        }
        let n = self.dancers.len();
        let mut istidal = false;
        for d1 in 0..n {
            let mut bestleft: Option<usize> = None;
            let mut bestright: Option<usize> = None;
            let (mut leftcount, mut rightcount, mut frontcount, mut backcount) = (0, 0, 0, 0);
            for d2 in (0..n).filter(|&d2| d2 != d1) {
                if self.is_right(d1, d2) {
                    rightcount += 1;
                    if bestright.is_none_or(|b| self.distance(d1, d2) < self.distance(d1, b)) {
                        bestright = Some(d2);
                    }
                } else if self.is_left(d1, d2) {
                    leftcount += 1;
                    if bestleft.is_none_or(|b| self.distance(d1, d2) < self.distance(d1, b)) {
                        bestleft = Some(d2);
                    }
                } else if self.is_in_front(d1, d2) {
                    frontcount += 1;
                } else if self.is_in_back(d1, d2) {
                    backcount += 1;
                }
            }

            let near = |best: Option<usize>| {
                best.filter(|&b| self.distance(d1, b) < PARTNER_DISTANCE)
            };
            let mut roles = Roles::default();
            if leftcount % 2 == 1 && rightcount % 2 == 0 && near(bestleft).is_some() {
                roles.partner = bestleft;
                roles.belle = true;
            } else if rightcount % 2 == 1 && leftcount % 2 == 0 && near(bestright).is_some() {
                roles.partner = bestright;
                roles.beau = true;
            }
            if frontcount % 2 == 0 && backcount % 2 == 1 {
                roles.leader = true;
            } else if frontcount % 2 == 1 && backcount % 2 == 0 {
                roles.trailer = true;
            }
            if (rightcount == 0 && leftcount > 1) || (leftcount == 0 && rightcount > 1) {
                roles.end = true;
            }
            // The very centers of a tidal wave are ends too
            if (rightcount == 3 && leftcount == 4) || (rightcount == 4 && leftcount == 3) {
                roles.end = true;
                istidal = true;
            }
            self.dancers[d1].roles = roles;
        }

        // Centers by distance from the middle of the floor
        let mut dorder: Vec<usize> = (0..n).collect();
        dorder.sort_by(|&a, &b| {
            self.distance_from_center(a)
                .total_cmp(&self.distance_from_center(b))
        });
        let dist: Vec<f64> = dorder.iter().map(|&d| self.distance_from_center(d)).collect();
        let tied = |i: usize, j: usize| is_approx_within(dist[i], dist[j], CENTER_GAP);
        if n > 2 && !tied(1, 2) {
            for &d in &dorder[..2] {
                if n == 4 {
                    self.dancers[d].roles.center = true;
                } else {
                    self.dancers[d].roles.very_center = true;
                }
            }
        }
        if istidal && n >= 6 {
            for &d in &dorder[2..6] {
                self.dancers[d].roles.center = true;
            }
        } else if n > 4 && !tied(3, 4) {
            for &d in &dorder[..4] {
                self.dancers[d].roles.center = true;
            }
        }
        trace!(dancers = n, istidal, "analyzed formation");
    }
}
