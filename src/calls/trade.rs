//! Trades, runs and hinges: calls danced around someone beside you.

use super::{Action, action_calls, dancer_label};
use crate::context::CallContext;
use crate::errors::CallError;
use crate::geometry::angles_equal;
use crate::motion::{Hands, Path};

/// Swap places with the dancer across an odd number of others.
#[derive(Clone, Debug, Default)]
pub struct Trade;

impl Action for Trade {
    fn name(&self) -> &str {
        "Trade"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let active = |d2: &usize| ctx.dancers[*d2].active;
        let right: Vec<usize> = ctx.dancers_to_right(d).into_iter().filter(active).collect();
        let left: Vec<usize> = ctx.dancers_to_left(d).into_iter().filter(active).collect();
        let (dtrade, mut call, samedir) = match (right.first(), left.first()) {
            (Some(&d2), _) if right.len() % 2 == 1 && left.len() % 2 == 0 => {
                (d2, "Run Right", ctx.is_left(d2, d))
            }
            (_, Some(&d2)) if right.len() % 2 == 0 && left.len() % 2 == 1 => {
                (d2, "Run Left", ctx.is_right(d2, d))
            }
            _ => {
                return Err(CallError::illegal(format!(
                    "Dancer {} has nobody to Trade with",
                    dancer_label(ctx, d)
                )));
            }
        };

        let dist = ctx.distance(d, dtrade);
        let mut hands = Hands::NONE;
        let mut scale_x = 1.0;
        if !ctx.in_between(d, dtrade).is_empty() {
            if call == "Run Right" && samedir {
                scale_x = 2.0;
            }
        } else {
            if call == "Run Left" && samedir {
                call = "Flip Left";
            } else {
                scale_x = dist / 2.0;
            }
            // Trading in a mini-wave is a hand turn
            if !samedir && dist < 2.1 {
                hands = if call == "Run Left" { Hands::LEFT } else { Hands::RIGHT };
            }
        }
        Ok(ctx
            .get_move(call)?
            .changehands(hands)
            .scale(scale_x, dist / 2.0))
    }
}

/// Centers of a wave trade by the hands they hold.
#[derive(Clone, Debug, Default)]
pub struct Slip;

impl Action for Slip {
    fn name(&self) -> &str {
        "Slip"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let active = |d2: &usize| ctx.dancers[*d2].active;
        // Facing opposite ways, each sees the other on the same side
        let partner = ctx
            .partner(d)
            .filter(active)
            .or_else(|| ctx.dancer_to_right(d).filter(active))
            .or_else(|| ctx.dancer_to_left(d).filter(active))
            .filter(|&p| angles_equal(ctx.angle(d, p), ctx.angle(p, d)));
        let Some(p) = partner else {
            return Err(CallError::illegal("Only dancers in a wave can Slip"));
        };
        let swing = if ctx.is_right(d, p) { "Swing Right" } else { "Swing Left" };
        Ok(ctx.get_move(swing)?.scale(1.0, ctx.distance(d, p) / 2.0))
    }
}

/// Path for an inactive dancer stepping into its running partner's spot.
fn dodge_to_partner(ctx: &CallContext, d: usize) -> Result<Option<Path>, CallError> {
    let Some(p) = ctx.partner(d).filter(|&p| ctx.dancers[p].active) else {
        return Ok(None);
    };
    let dodge = if ctx.dancers[d].roles.beau { "Dodge Right" } else { "Dodge Left" };
    Ok(Some(ctx.get_move(dodge)?.scale(1.0, ctx.distance(d, p) / 2.0)))
}

fn append_all(ctx: &mut CallContext, paths: Vec<(usize, Path)>) {
    for (d, path) in paths {
        ctx.dancers[d].path.append(&path);
    }
}

/// Run around your partner, who dodges into your place.
#[derive(Clone, Debug, Default)]
pub struct Run;

impl Action for Run {
    fn name(&self) -> &str {
        "Run"
    }

    /// Every dancer is looked at, since inactive partners of runners
    /// have to dodge.
    fn perform(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        let mut paths = Vec::new();
        for d in 0..ctx.dancers.len() {
            if ctx.dancers[d].active {
                let p = ctx
                    .partner(d)
                    .filter(|&p| !ctx.dancers[p].active)
                    .ok_or_else(|| {
                        CallError::illegal(format!(
                            "Dancer {} has nobody to Run around.",
                            dancer_label(ctx, d)
                        ))
                    })?;
                let run = if ctx.dancers[d].roles.beau { "Run Right" } else { "Run Left" };
                paths.push((d, ctx.get_move(run)?.scale(1.0, ctx.distance(d, p) / 2.0)));
            } else if let Some(path) = dodge_to_partner(ctx, d)? {
                paths.push((d, path));
            }
        }
        append_all(ctx, paths);
        Ok(())
    }
}

/// Run across the line to the far center or end spot.
#[derive(Clone, Debug, Default)]
pub struct CrossRun;

impl Action for CrossRun {
    fn name(&self) -> &str {
        "Cross Run"
    }

    fn perform(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        let any = |f: fn(&crate::dancer::Roles) -> bool| {
            ctx.dancers.iter().any(|d| d.active && f(&d.roles))
        };
        if any(|r| r.center) && any(|r| r.end) {
            return Err(CallError::illegal("Centers and ends cannot both Cross Run"));
        }
        let mut paths = Vec::new();
        for d in 0..ctx.dancers.len() {
            let roles = ctx.dancers[d].roles;
            if ctx.dancers[d].active {
                if !roles.center && !roles.end {
                    return Err(CallError::illegal("General line required for Cross Run"));
                }
                if ctx.partner(d).is_none_or(|p| ctx.dancers[p].active) {
                    return Err(CallError::illegal("Dancer and partner cannot both Cross Run"));
                }
                // Center beaus and end belles run left
                let run = if roles.beau ^ roles.center { "Run Right" } else { "Run Left" };
                paths.push((d, ctx.get_move(run)?.scale(1.0, 2.0)));
            } else if ctx.partner(d).is_some_and(|p| ctx.dancers[p].active) {
                let dodge = if roles.beau { "Dodge Right" } else { "Dodge Left" };
                paths.push((d, ctx.get_move(dodge)?));
            }
        }
        append_all(ctx, paths);
        Ok(())
    }
}

/// Quarter turn around the hand held with a neighbor.
#[derive(Clone, Debug, Default)]
pub struct Hinge;

impl Action for Hinge {
    fn name(&self) -> &str {
        "Hinge"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let active = |d2: &usize| ctx.dancers[*d2].active;
        let other = ctx
            .partner(d)
            .filter(active)
            .or_else(|| ctx.dancer_to_right(d).filter(active))
            .or_else(|| ctx.dancer_to_left(d).filter(active));
        let Some(d2) = other else {
            return Ok(Path::new());
        };
        let sf = ctx.distance(d, d2) / 2.0;
        let hinge = if ctx.is_right(d, d2) { "Hinge Right" } else { "Hinge Left" };
        Ok(ctx.get_move(hinge)?.scale(sf, sf))
    }
}

action_calls!(Trade, Slip, Run, CrossRun, Hinge);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dancer::Gender;
    use crate::formation::Formation;
    use crate::geometry::angle_diff;
    use crate::library::Library;
    use glam::DVec2;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn context(name: &str) -> CallContext {
        let lib = Library::standard();
        let f = lib.formation(name).unwrap_or_default();
        CallContext::from_formation(lib, &f)
    }

    /// Right hand ocean wave along the x axis, ends facing +y.
    fn wave() -> CallContext {
        let f = Formation::new("Ocean Wave RH")
            .dancer(Gender::Boy, -3.0, 0.0, 90.0)
            .dancer(Gender::Girl, -1.0, 0.0, -90.0);
        CallContext::from_formation(Library::standard(), &f)
    }

    fn facing_couples() -> CallContext {
        let f = Formation::new("Facing Couples")
            .dancer(Gender::Boy, -1.0, 1.0, 0.0)
            .dancer(Gender::Girl, -1.0, -1.0, 0.0);
        CallContext::from_formation(Library::standard(), &f)
    }

    /// Two-faced line along the y axis: the top pair faces +x.
    fn two_faced_line() -> CallContext {
        let f = Formation::new("Two-Faced Line")
            .dancer(Gender::Boy, 0.0, 3.0, 0.0)
            .dancer(Gender::Girl, 0.0, 1.0, 0.0);
        CallContext::from_formation(Library::standard(), &f)
    }

    fn perform(ctx: &mut CallContext, text: &str) -> Result<(), CallError> {
        ctx.interpret_call(text)?;
        ctx.perform_call()
    }

    fn at(ctx: &CallContext, d: usize, x: f64, y: f64) -> bool {
        (ctx.dancers[d].location() - DVec2::new(x, y)).length() < 1e-6
    }

    // ==================== Trade tests ====================

    #[test]
    fn wave_trades_by_mini_wave() {
        let mut ctx = wave();
        assert_eq!(perform(&mut ctx, "trade"), Ok(()));
        // End at -3 and center at -1 swap, each turning around
        assert!(at(&ctx, 0, -1.0, 0.0));
        assert!(at(&ctx, 2, -3.0, 0.0));
        assert!(angles_equal(ctx.dancers[0].facing(), -FRAC_PI_2));
        assert_eq!(ctx.dancers[0].path.movements()[0].hands(), Hands::RIGHT);
    }

    #[test]
    fn couples_trade_without_hands() {
        let mut ctx = facing_couples();
        assert_eq!(perform(&mut ctx, "trade"), Ok(()));
        // Beau at (-1,1) trades with its belle at (-1,-1)
        assert!(at(&ctx, 0, -1.0, -1.0));
        assert!(at(&ctx, 2, -1.0, 1.0));
        assert!(angles_equal(ctx.dancers[0].facing(), PI));
        assert_eq!(ctx.dancers[0].path.movements()[0].hands(), Hands::NONE);
    }

    #[test]
    fn trade_needs_someone_beside() {
        let f = Formation::new("Facing").dancer(Gender::Boy, -1.0, 0.0, 0.0);
        let mut ctx = CallContext::from_formation(Library::standard(), &f);
        assert_eq!(
            perform(&mut ctx, "trade"),
            Err(CallError::illegal("Dancer 1 has nobody to Trade with"))
        );
    }

    // ==================== Run tests ====================

    #[test]
    fn boys_run_around_girls() {
        let mut ctx = facing_couples();
        assert_eq!(perform(&mut ctx, "boys run"), Ok(()));
        assert!(at(&ctx, 0, -1.0, -1.0));
        assert!(angles_equal(ctx.dancers[0].facing(), PI));
        // The girl dodges into the boy's spot, still facing the same way
        assert!(at(&ctx, 2, -1.0, 1.0));
        assert!(angles_equal(ctx.dancers[2].facing(), 0.0));
    }

    #[test]
    fn everyone_cannot_run() {
        let mut ctx = context("Normal Lines");
        assert_eq!(
            perform(&mut ctx, "run"),
            Err(CallError::illegal("Dancer 1 has nobody to Run around."))
        );
    }

    // ==================== Cross run tests ====================

    #[test]
    fn ends_cross_run_to_far_center() {
        let mut ctx = two_faced_line();
        assert_eq!(perform(&mut ctx, "ends cross run"), Ok(()));
        // End at (0,3) runs to the far center spot, its partner dodges out
        assert!(at(&ctx, 0, 0.0, -1.0));
        assert!(at(&ctx, 2, 0.0, 3.0));
        assert!(at(&ctx, 1, 0.0, 1.0));
    }

    #[test]
    fn centers_and_ends_cannot_both_cross_run() {
        let mut ctx = two_faced_line();
        assert_eq!(
            perform(&mut ctx, "cross run"),
            Err(CallError::illegal("Centers and ends cannot both Cross Run"))
        );
    }

    // ==================== Hinge and slip tests ====================

    #[test]
    fn hinge_turns_a_quarter_around_partner() {
        let mut ctx = wave();
        let before: Vec<f64> = ctx.dancers.iter().map(|d| d.facing()).collect();
        assert_eq!(perform(&mut ctx, "hinge"), Ok(()));
        for (d, a) in ctx.dancers.iter().zip(before) {
            let turn = angle_diff(d.facing(), a).abs();
            assert!((turn - FRAC_PI_2).abs() < 1e-6, "dancer {d} turned {turn}");
        }
    }

    #[test]
    fn centers_of_wave_slip() {
        let mut ctx = wave();
        assert_eq!(perform(&mut ctx, "center two slip"), Ok(()));
        // Centers at -1 and 1 hold left hands and swap
        assert!(at(&ctx, 2, 1.0, 0.0));
        assert!(at(&ctx, 0, -3.0, 0.0));
    }

    #[test]
    fn couples_cannot_slip() {
        let mut ctx = context("Normal Lines");
        assert_eq!(
            perform(&mut ctx, "slip"),
            Err(CallError::illegal("Only dancers in a wave can Slip"))
        );
    }
}
