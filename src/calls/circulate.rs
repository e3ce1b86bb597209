use std::f64::consts::FRAC_PI_2;

use super::{Action, action_calls, dancer_label, perform_each};
use crate::context::CallContext;
use crate::errors::CallError;
use crate::geometry::{VectorExt, angle_diff};
use crate::log::debug;
use crate::motion::{Hands, Movement, Path};

/// Move along the circulate path to the next spot.
///
/// Uses the box, all 8 or column circulate definition when the library
/// has one for the formation, otherwise works out a path per dancer.
#[derive(Clone, Debug, Default)]
pub struct Circulate;

impl Action for Circulate {
    fn name(&self) -> &str {
        "Circulate"
    }

    fn perform(&mut self, ctx: &mut CallContext, index: usize) -> Result<(), CallError> {
        let defined = if ctx.actives().len() == 4 {
            "box circulate"
        } else if ctx.is_lines() {
            "all 8 circulate"
        } else if ctx.is_columns() {
            "column circulate"
        } else {
            return Err(CallError::illegal("Cannot figure out how to Circulate."));
        };
        match ctx.apply_calls(&[defined]) {
            // No definition for this formation. An illegal definition is a
            // real failure and must not be hidden by the per-dancer paths.
            Err(e) if e.is_not_found() => {
                debug!(call = defined, error = %e, "circulating dancer by dancer");
                perform_each(self, ctx, index)
            }
            other => other,
        }
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let roles = ctx.dancers[d].roles;
        if roles.leader {
            // Go around to the nearest active dancer in the same line
            let beside = ctx.dancer_closest(d, |d2| {
                ctx.dancers[d2].active && (ctx.is_right(d, d2) || ctx.is_left(d, d2))
            });
            if let Some(d2) = beside {
                let dist = ctx.distance(d, d2);
                let run = if ctx.is_right(d, d2) { "Run Right" } else { "Run Left" };
                return Ok(ctx
                    .get_move(run)?
                    .scale(dist / 3.0, dist / 2.0)
                    .changebeats(4.0));
            }
        } else if roles.trailer {
            // Take the place of the active dancer ahead
            if let Some(d2) = ctx.dancer_in_front(d).filter(|&d2| ctx.dancers[d2].active) {
                let dist = ctx.distance(d, d2);
                return Ok(ctx.get_move("Forward")?.scale(dist, 1.0).changebeats(4.0));
            }
        }
        Err(CallError::illegal("Cannot figure out how to Circulate."))
    }
}

/// Leaders roll back around the trailers, who step up.
#[derive(Clone, Debug, Default)]
pub struct Zoom;

impl Action for Zoom {
    fn name(&self) -> &str {
        "Zoom"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let n = dancer_label(ctx, d);
        let roles = ctx.dancers[d].roles;
        if roles.leader {
            let d2 = ctx
                .dancer_in_back(d)
                .filter(|&d2| ctx.dancers[d2].roles.trailer)
                .ok_or_else(|| CallError::illegal(format!("Dancer {n} is not in a tandem.")))?;
            if !ctx.dancers[d2].active {
                return Err(CallError::illegal(format!(
                    "Trailer of dancer {n} is not active."
                )));
            }
            // Turn away from the center
            let run = if ctx.angle_to_center(d) < 0.0 { "Run Left" } else { "Run Right" };
            let dist = ctx.distance(d, d2);
            let half = ctx.get_move(run)?.changebeats(2.0);
            Ok(half
                .clone()
                .skew(-dist / 2.0, 0.0)
                .chain(&half.skew(dist / 2.0, 0.0)))
        } else if roles.trailer {
            let d2 = ctx
                .dancer_in_front(d)
                .filter(|&d2| ctx.dancers[d2].roles.leader)
                .ok_or_else(|| CallError::illegal(format!("Dancer {n} is not in a tandem.")))?;
            if !ctx.dancers[d2].active {
                return Err(CallError::illegal(format!(
                    "Leader of dancer {n} is not active."
                )));
            }
            let dist = ctx.distance(d, d2);
            Ok(ctx.get_move("Forward")?.changebeats(4.0).scale(dist, 1.0))
        } else {
            Err(CallError::illegal(format!("Dancer {n} cannot Zoom.")))
        }
    }
}

/// Every dancer moves a quarter around the center of the set, turning
/// with it.
#[derive(Clone, Debug, Default)]
pub struct BoxCounterRotate;

impl Action for BoxCounterRotate {
    fn name(&self) -> &str {
        "Box Counter Rotate"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let dancer = &ctx.dancers[d];
        let v = dancer.location();
        let a1 = dancer.facing();
        let (v2, cy4, y4) = if angle_diff(v.heading(), a1) < 0.0 {
            (v.rotated(FRAC_PI_2), 0.45, 1.0)
        } else {
            (v.rotated(-FRAC_PI_2), -0.45, -1.0)
        };
        let dv = (v2 - v).rotated(-a1);
        let cv1 = (v2 * 0.5).rotated(-a1);
        let cv2 = (v * 0.5).rotated(-a1) + dv;
        Ok(Path::from_movement(Movement::with_rotation(
            2.0,
            Hands::NONE,
            [cv1.x, cv1.y, cv2.x, cv2.y, dv.x, dv.y],
            [0.55, 1.0, cy4, 1.0, y4],
        )))
    }
}

action_calls!(Circulate, Zoom, BoxCounterRotate);
