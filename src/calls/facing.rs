//! Calls for dancers facing each other.

use super::{Action, action_calls, dancer_label};
use crate::context::CallContext;
use crate::dancer::Gender;
use crate::errors::CallError;
use crate::motion::{Hands, Movement, Path};

/// The facing dancer and the distance to it, or `err`.
fn facing_dancer(
    ctx: &CallContext,
    d: usize,
    err: impl FnOnce(usize) -> String,
) -> Result<(usize, f64), CallError> {
    ctx.dancer_facing(d)
        .map(|d2| (d2, ctx.distance(d, d2)))
        .ok_or_else(|| CallError::illegal(err(dancer_label(ctx, d))))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnThruKind {
    AllemandeLeft,
    LeftTurnThru,
    TurnThru,
}

/// Arm turn half by the left or right with the facing dancer, then step
/// past them.
#[derive(Clone, Debug)]
pub struct AllemandeLeft {
    kind: TurnThruKind,
}

impl AllemandeLeft {
    pub fn new(kind: TurnThruKind) -> Self {
        Self { kind }
    }
}

impl Action for AllemandeLeft {
    fn name(&self) -> &str {
        match self.kind {
            TurnThruKind::AllemandeLeft => "Allemande Left",
            TurnThruKind::LeftTurnThru => "Left Turn Thru",
            TurnThruKind::TurnThru => "Turn Thru",
        }
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let (_, dist) =
            facing_dancer(ctx, d, |n| format!("Cannot find dancer to turn with {n}"))?;
        let (into, turn, out) = if self.kind == TurnThruKind::TurnThru {
            ("Extend Left", "Swing Right", "Extend Right")
        } else {
            ("Extend Right", "Swing Left", "Extend Left")
        };
        Ok(ctx
            .get_move(into)?
            .scale(dist / 2.0, 0.5)
            .chain(&ctx.get_move(turn)?.scale(0.5, 0.5))
            .chain(&ctx.get_move(out)?.scale(dist / 2.0, 0.5)))
    }
}

/// Right hands joined, the girl turns under the boy's arm.
#[derive(Clone, Debug, Default)]
pub struct BoxTheGnat;

impl Action for BoxTheGnat {
    fn name(&self) -> &str {
        "Box the Gnat"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let (_, dist) =
            facing_dancer(ctx, d, |n| format!("Dancer {n} cannot Box the Gnat"))?;
        let boy = ctx.dancers[d].gender == Gender::Boy;
        let (cy1, y4, hands) = if boy {
            (1.0, -2.0, Hands::GRIP_LEFT)
        } else {
            (0.1, 2.0, Hands::GRIP_RIGHT)
        };
        Ok(Path::from_movement(Movement::with_rotation(
            4.0,
            hands,
            [1.0, cy1, dist / 2.0, cy1, dist / 2.0 + 1.0, 0.0],
            [1.3, 1.3, y4, 0.0, y4],
        )))
    }
}

/// Pass, then boys turn right and girls turn left.
#[derive(Clone, Debug, Default)]
pub struct SlideThru;

impl Action for SlideThru {
    fn name(&self) -> &str {
        "Slide Thru"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let (_, dist) =
            facing_dancer(ctx, d, |n| format!("Dancer {n} cannot Slide Thru"))?;
        let pass = ctx.get_move("Extend Left")?.scale(dist / 2.0, 0.5);
        let turn = if ctx.dancers[d].gender == Gender::Boy {
            ctx.get_move("Lead Right")?.scale(dist / 2.0, 0.5)
        } else {
            ctx.get_move("Quarter Left")?.skew(dist / 2.0, -0.5)
        };
        Ok(pass.chain(&turn))
    }
}

/// A slide thru danced by a boy and a girl.
#[derive(Clone, Debug, Default)]
pub struct StarThru;

impl Action for StarThru {
    fn name(&self) -> &str {
        "Star Thru"
    }

    fn perform(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        for d in ctx.actives() {
            let (d2, _) = facing_dancer(ctx, d, |n| format!("Dancer {n} cannot Star Thru"))?;
            if ctx.dancers[d].gender == ctx.dancers[d2].gender {
                return Err(CallError::illegal("Star Thru needs a boy facing a girl"));
            }
        }
        ctx.apply_calls(&["slide thru"])
    }
}

/// Pass right shoulders with the facing dancer.
#[derive(Clone, Debug, Default)]
pub struct PassThru;

impl Action for PassThru {
    fn name(&self) -> &str {
        "Pass Thru"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let (_, dist) =
            facing_dancer(ctx, d, |n| format!("Dancer {n} cannot Pass Thru"))?;
        Ok(ctx
            .get_move("Extend Left")?
            .scale(dist / 2.0, 0.5)
            .chain(&ctx.get_move("Extend Right")?.scale(dist / 2.0, 0.5)))
    }
}

#[derive(Clone, Debug)]
pub struct TouchAQuarter {
    name: String,
    left: bool,
}

impl TouchAQuarter {
    pub fn new(name: impl Into<String>, left: bool) -> Self {
        Self {
            name: name.into(),
            left,
        }
    }
}

impl Action for TouchAQuarter {
    fn name(&self) -> &str {
        &self.name
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let (_, dist) =
            facing_dancer(ctx, d, |n| format!("Dancer {n} cannot Touch a Quarter"))?;
        let path = ctx
            .get_move("Extend Left")?
            .scale(dist / 2.0, 1.0)
            .chain(&ctx.get_move("Hinge Right")?);
        Ok(if self.left { path.reflect() } else { path })
    }
}

/// Facing dancers step to a right hand mini-wave. Dancers already in a
/// wave stay put.
#[derive(Clone, Debug, Default)]
pub struct MakeTightWave;

impl Action for MakeTightWave {
    fn name(&self) -> &str {
        "Make Tight Wave"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        if ctx.is_in_wave(d) {
            return Ok(Path::new());
        }
        let (_, dist) =
            facing_dancer(ctx, d, |n| format!("Dancer {n} cannot make a tight wave"))?;
        ctx.get_move("Extend Left").map(|p| p.scale(dist / 2.0, 0.5))
    }
}

action_calls!(
    AllemandeLeft,
    BoxTheGnat,
    SlideThru,
    StarThru,
    PassThru,
    TouchAQuarter,
    MakeTightWave,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::Formation;
    use crate::geometry::angles_equal;
    use crate::library::Library;
    use glam::DVec2;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn context(name: &str) -> CallContext {
        let lib = Library::standard();
        let f = lib.formation(name).unwrap_or_default();
        CallContext::from_formation(lib, &f)
    }

    fn facing_couples() -> CallContext {
        let f = Formation::new("Facing Couples")
            .dancer(Gender::Boy, -1.0, 1.0, 0.0)
            .dancer(Gender::Girl, -1.0, -1.0, 0.0);
        CallContext::from_formation(Library::standard(), &f)
    }

    fn perform(ctx: &mut CallContext, text: &str) -> Result<(), CallError> {
        ctx.interpret_call(text)?;
        ctx.perform_call()
    }

    fn ends_at(ctx: &CallContext, d: usize, x: f64, y: f64, angle: f64) {
        let dancer = &ctx.dancers[d];
        let loc = dancer.location();
        assert!((loc - DVec2::new(x, y)).length() < 1e-6, "dancer {dancer} at {loc:?}");
        assert!(angles_equal(dancer.facing(), angle), "dancer {dancer} facing {}", dancer.facing());
    }

    // ==================== Turn thru tests ====================

    #[test]
    fn turn_thru_back_to_place() {
        let mut ctx = facing_couples();
        assert_eq!(perform(&mut ctx, "turn thru"), Ok(()));
        // Dancer 0 faces dancer 3 two units ahead and ends facing out
        ends_at(&ctx, 0, -1.0, 1.0, PI);
        assert!((ctx.dancers[0].beats() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn centers_turn_thru_while_outsides_wait() {
        let mut ctx = context("Double Pass Thru");
        assert_eq!(perform(&mut ctx, "centers turn thru"), Ok(()));
        assert_eq!(ctx.callname(), "Centers Turn Thru");
        assert!(angles_equal(ctx.dancers[0].facing(), PI));
        // Outsides stand for the whole call
        assert!(angles_equal(ctx.dancers[4].facing(), 0.0));
        assert!(ctx.dancers.iter().all(|d| (d.beats() - 5.0).abs() < 1e-9));
    }

    #[test]
    fn turn_thru_needs_facing_dancer() {
        let mut ctx = context("Double Pass Thru");
        assert_eq!(
            perform(&mut ctx, "turn thru"),
            Err(CallError::illegal("Cannot find dancer to turn with 5"))
        );
    }

    // ==================== Slide thru and star thru tests ====================

    #[test]
    fn slide_thru_ends_in_couples() {
        let mut ctx = facing_couples();
        assert_eq!(perform(&mut ctx, "slide thru"), Ok(()));
        // Boy turns right, girl turns left, both face the same way
        ends_at(&ctx, 0, 1.0, 1.0, -FRAC_PI_2);
        ends_at(&ctx, 3, -1.0, 1.0, -FRAC_PI_2);
    }

    #[test]
    fn star_thru_from_facing_couples() {
        let mut ctx = facing_couples();
        assert_eq!(perform(&mut ctx, "star thru"), Ok(()));
        ends_at(&ctx, 0, 1.0, 1.0, -FRAC_PI_2);
        assert_eq!(ctx.callname(), "Star Thru");
    }

    #[test]
    fn star_thru_needs_boy_and_girl() {
        let f = Formation::new("Boys").dancer(Gender::Boy, -1.0, 0.0, 0.0);
        let mut ctx = CallContext::from_formation(Library::standard(), &f);
        assert_eq!(
            perform(&mut ctx, "star thru"),
            Err(CallError::illegal("Star Thru needs a boy facing a girl"))
        );
    }

    // ==================== Pass thru and touch tests ====================

    #[test]
    fn pass_thru_swaps_facing_dancers() {
        let mut ctx = facing_couples();
        assert_eq!(perform(&mut ctx, "pass thru"), Ok(()));
        ends_at(&ctx, 0, 1.0, 1.0, 0.0);
        ends_at(&ctx, 3, -1.0, 1.0, PI);
    }

    #[test]
    fn touch_a_quarter_by_the_right() {
        let mut ctx = context("Double Pass Thru");
        assert_eq!(perform(&mut ctx, "centers touch a quarter"), Ok(()));
        assert!(angles_equal(ctx.dancers[0].facing(), -FRAC_PI_2));
        assert!(angles_equal(ctx.dancers[3].facing(), FRAC_PI_2));
    }

    #[test]
    fn left_touch_a_quarter_mirrors() {
        let mut ctx = facing_couples();
        assert_eq!(perform(&mut ctx, "left touch a quarter"), Ok(()));
        // Step right to a left hand mini-wave, then turn left around it
        ends_at(&ctx, 0, 1.0, 1.0, FRAC_PI_2);
    }

    // ==================== Tight wave tests ====================

    #[test]
    fn facing_dancers_make_a_wave() {
        let mut ctx = facing_couples();
        assert_eq!(perform(&mut ctx, "make tight wave"), Ok(()));
        ctx.analyze();
        assert!((0..4).all(|d| ctx.is_in_wave(d)));
    }

    #[test]
    fn wave_stays_put() {
        let f = Formation::new("Ocean Wave RH")
            .dancer(Gender::Boy, -3.0, 0.0, 90.0)
            .dancer(Gender::Girl, -1.0, 0.0, -90.0);
        let mut ctx = CallContext::from_formation(Library::standard(), &f);
        assert_eq!(perform(&mut ctx, "make tight wave"), Ok(()));
        assert!(ctx.dancers.iter().all(|d| d.path.is_empty()));
    }
}
