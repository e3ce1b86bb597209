//! Fitting the dancers onto a reference formation.

use glam::DVec2;

use super::CallContext;
use crate::dancer::Dancer;
use crate::defaults::SNAP_THRESHOLD;
use crate::formation::{STANDARD_FORMATIONS, match_formations, standard_formation};
use crate::geometry::{Matrix2, Transform, VectorExt, multiply, svd22, transpose};
use crate::log::debug;

struct Fit {
    name: &'static str,
    offsets: Vec<DVec2>,
    total: f64,
}

impl CallContext {
    /// How far each active dancer is from its counterpart in `target`
    /// after `target` is rotated to fit best.
    ///
    /// `mapping[i]` is the index in `target` of the i-th active dancer. The
    /// rotation is the least-squares fit from the SVD of the
    /// cross-covariance of the two point sets.
    pub fn compute_formation_offsets(&self, target: &[Dancer], mapping: &[usize]) -> Vec<DVec2> {
        let actives = self.actives();
        let mut bxa: Matrix2 = [[0.0; 2]; 2];
        for (i, &d) in actives.iter().enumerate() {
            let v1 = self.dancers[d].location();
            let v2 = target[mapping[i]].location();
            bxa[0][0] += v1.x * v2.x;
            bxa[0][1] += v1.y * v2.x;
            bxa[1][0] += v1.x * v2.y;
            bxa[1][1] += v1.y * v2.y;
        }
        let svd = svd22(&bxa);
        let r = multiply(&svd.v, &transpose(&svd.u));
        let rotmat = Transform::from_rows([r[0][0], r[0][1], 0.0], [r[1][0], r[1][1], 0.0]);
        actives
            .iter()
            .enumerate()
            .map(|(j, &d)| self.dancers[d].location() - rotmat.apply(target[mapping[j]].location()))
            .collect()
    }

    /// If the dancers are close to one of the standard formations, nudge
    /// the end of each dancer's last movement so they land on it exactly.
    ///
    /// Every dancer takes part in the fit, active or not. Of all standard
    /// formations that match, the one with the smallest total offset wins.
    pub fn match_standard_formation(&mut self) {
        self.animate_to_end();
        let mut ctx1 = self.snapshot();
        for d in &mut ctx1.dancers {
            d.active = true;
        }
        let mut best: Option<Fit> = None;
        for name in STANDARD_FORMATIONS {
            let Some(formation) = self.library().formation(name).ok().or_else(|| standard_formation(name))
            else {
                continue;
            };
            let target = formation.dancers();
            let Some(mapping) = match_formations(&mut ctx1.dancers, &target, false, true) else {
                continue;
            };
            let offsets = ctx1.compute_formation_offsets(&target, &mapping);
            let total = offsets.iter().map(|v| v.length()).sum();
            if best.as_ref().is_none_or(|b| total < b.total) {
                best = Some(Fit {
                    name,
                    offsets,
                    total,
                });
            }
        }
        let Some(fit) = best else {
            return;
        };
        debug!(formation = fit.name, offset = fit.total, "snapping to standard formation");
        for (d, offset) in self.dancers.iter_mut().zip(&fit.offsets) {
            if offset.length() <= SNAP_THRESHOLD {
                continue;
            }
            let Some(m) = d.path.pop() else {
                continue;
            };
            d.animate_to_end();
            let vd = offset.rotated(-d.tx.angle());
            d.path.add(m.skew(-vd.x, -vd.y));
            d.animate_to_end();
        }
    }
}
