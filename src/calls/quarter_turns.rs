//! Calls where each dancer turns a quarter in place.

use std::f64::consts::PI;

use super::{Action, action_calls};
use crate::context::CallContext;
use crate::errors::CallError;
use crate::geometry::angles_equal;
use crate::library::MoveRef;
use crate::motion::Path;

/// A quarter turn chosen per dancer by [`QuarterTurns::select`].
///
/// Dancers in tandem with someone more than two units away shift toward
/// them as they turn, so they end close enough to hold hands.
pub trait QuarterTurns {
    /// "Quarter Right", "Quarter Left" or "Stand".
    fn select(&self, ctx: &CallContext, index: usize, d: usize) -> &'static str;

    fn turn_one(&self, ctx: &CallContext, index: usize, d: usize) -> Result<Path, CallError> {
        let select = self.select(ctx, index, d);
        let mut offset_x = 0.0;
        if select != "Stand" {
            let roles = ctx.dancers[d].roles;
            let gap = |d2: Option<usize>| {
                d2.map(|d2| ctx.distance(d, d2))
                    .filter(|&dist| dist > 2.0 && dist < 4.1)
                    .map(|dist| (dist - 2.0) / 2.0)
            };
            if roles.leader {
                if let Some(g) = gap(ctx.dancer_in_back(d)) {
                    offset_x = -g;
                }
            }
            if roles.trailer {
                if let Some(g) = gap(ctx.dancer_in_front(d)) {
                    offset_x = g;
                }
            }
        }
        ctx.library()
            .resolve_path(&[MoveRef::new(select).offset(offset_x, 0.0).into()])
    }
}

/// Turn a quarter further in the direction the last movement turned.
#[derive(Clone, Debug, Default)]
pub struct Roll;

impl QuarterTurns for Roll {
    fn select(&self, ctx: &CallContext, _index: usize, d: usize) -> &'static str {
        let last = ctx.dancers[d]
            .path
            .movements()
            .iter()
            .rev()
            .find(|m| !m.is_stand());
        match last.map(|m| m.brotate().rolling()) {
            Some(roll) if roll < -0.1 => "Quarter Right",
            Some(roll) if roll > 0.1 => "Quarter Left",
            _ => "Stand",
        }
    }
}

/// "Quarter in" and "quarter out": turn toward or away from your partner.
#[derive(Clone, Debug)]
pub struct QuarterIn {
    name: String,
    out: bool,
}

impl QuarterIn {
    pub fn new(name: impl Into<String>, out: bool) -> Self {
        Self {
            name: name.into(),
            out,
        }
    }
}

impl QuarterTurns for QuarterIn {
    fn select(&self, ctx: &CallContext, _index: usize, d: usize) -> &'static str {
        if ctx.dancers[d].roles.beau ^ self.out {
            "Quarter Right"
        } else {
            "Quarter Left"
        }
    }
}

/// "Face in", "face out", "face left" and "face right".
#[derive(Clone, Debug)]
pub struct Face {
    name: String,
    direction: String,
}

impl Face {
    pub fn new(name: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: direction.into(),
        }
    }
}

impl QuarterTurns for Face {
    fn select(&self, ctx: &CallContext, _index: usize, d: usize) -> &'static str {
        let a = ctx.angle_to_center(d);
        match self.direction.as_str() {
            "left" => "Quarter Left",
            "right" => "Quarter Right",
            "in" if angles_equal(a, 0.0) => "Stand",
            "in" if a > 0.0 => "Quarter Left",
            "in" => "Quarter Right",
            _ if angles_equal(a, PI) => "Stand",
            _ if a > 0.0 => "Quarter Right",
            _ => "Quarter Left",
        }
    }
}

/// True when the call before `index` is a zig or a zag, so this one is
/// the second half of a "zig zag" style pair and belongs to the trailers.
fn follows_zig_or_zag(ctx: &CallContext, index: usize) -> bool {
    use super::Call;
    index
        .checked_sub(1)
        .and_then(|i| ctx.callstack.get(i))
        .is_some_and(|c| matches!(c.name(), "Zig" | "Zag"))
}

fn zig_zag_selector(ctx: &CallContext, index: usize, d: usize) -> bool {
    let roles = ctx.dancers[d].roles;
    if follows_zig_or_zag(ctx, index) {
        roles.trailer
    } else {
        roles.leader
    }
}

/// Leaders turn a quarter right.
#[derive(Clone, Debug, Default)]
pub struct Zig;

impl QuarterTurns for Zig {
    fn select(&self, ctx: &CallContext, index: usize, d: usize) -> &'static str {
        if zig_zag_selector(ctx, index, d) {
            "Quarter Right"
        } else {
            "Stand"
        }
    }
}

/// Leaders turn a quarter left.
#[derive(Clone, Debug, Default)]
pub struct Zag;

impl QuarterTurns for Zag {
    fn select(&self, ctx: &CallContext, index: usize, d: usize) -> &'static str {
        if zig_zag_selector(ctx, index, d) {
            "Quarter Left"
        } else {
            "Stand"
        }
    }
}

macro_rules! quarter_turn_actions {
    ($($ty:ty, |$s:ident| $name:expr;)*) => {
        $(
            impl Action for $ty {
                fn name(&self) -> &str {
                    let $s = self;
                    $name
                }

                fn perform_one(
                    &self,
                    ctx: &CallContext,
                    index: usize,
                    d: usize,
                ) -> Result<Path, CallError> {
                    self.turn_one(ctx, index, d)
                }
            }
        )*
        action_calls!($($ty),*);
    };
}

quarter_turn_actions! {
    Roll, |_c| "and Roll";
    QuarterIn, |c| c.name.as_str();
    Face, |c| c.name.as_str();
    Zig, |_c| "Zig";
    Zag, |_c| "Zag";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calls::Call;
    use crate::library::Library;

    fn context(name: &str) -> CallContext {
        let lib = Library::standard();
        let f = lib.formation(name).unwrap_or_default();
        let mut ctx = CallContext::from_formation(lib, &f);
        ctx.analyze();
        ctx
    }

    fn facing_after(ctx: &mut CallContext, text: &str) -> Vec<f64> {
        assert_eq!(ctx.interpret_call(text), Ok(()));
        assert_eq!(ctx.perform_call(), Ok(()));
        ctx.dancers.iter().map(|d| d.facing()).collect()
    }

    // ==================== Selection tests ====================

    #[test]
    fn quarter_in_and_out() {
        let ctx = context("Normal Lines");
        let qin = QuarterIn::new("Quarter In", false);
        let qout = QuarterIn::new("Quarter Out", true);
        // Dancer 0 is a beau, dancer 2 a belle
        assert_eq!(qin.select(&ctx, 0, 0), "Quarter Right");
        assert_eq!(qin.select(&ctx, 0, 2), "Quarter Left");
        assert_eq!(qout.select(&ctx, 0, 0), "Quarter Left");
    }

    #[test]
    fn roll_follows_last_turn() {
        let mut ctx = context("Normal Lines");
        let run = ctx.get_move("Run Right").unwrap_or_default();
        let stand = ctx.get_move("Stand").unwrap_or_default();
        ctx.dancers[0].path = run.chain(&stand);
        ctx.dancers[1].path = ctx.get_move("Run Left").unwrap_or_default();
        assert_eq!(Roll.select(&ctx, 1, 0), "Quarter Right");
        assert_eq!(Roll.select(&ctx, 1, 1), "Quarter Left");
        assert_eq!(Roll.select(&ctx, 1, 2), "Stand");
    }

    #[test]
    fn face_directions() {
        let ctx = context("Normal Lines");
        // Dancer 0 faces the center already, a little to its right
        let a = ctx.angle_to_center(0);
        assert!(a < 0.0);
        assert_eq!(Face::new("Face In", "in").select(&ctx, 0, 0), "Quarter Right");
        assert_eq!(Face::new("Face Out", "out").select(&ctx, 0, 0), "Quarter Left");
        assert_eq!(Face::new("Face Left", "left").select(&ctx, 0, 0), "Quarter Left");
    }

    // ==================== Performing tests ====================

    #[test]
    fn face_left_turns_everyone() {
        let mut ctx = context("Normal Lines");
        let before: Vec<f64> = ctx.dancers.iter().map(|d| d.facing()).collect();
        let after = facing_after(&mut ctx, "face left");
        for (b, a) in before.iter().zip(&after) {
            assert!(angles_equal(*a, b + PI / 2.0), "{b} -> {a}");
        }
        assert!(ctx.dancers.iter().all(|d| (d.beats() - 2.0).abs() < 1e-9));
    }

    #[test]
    fn zig_zag_splits_leaders_and_trailers() {
        // By count the center four of a double pass thru lead, the outsides trail
        let mut ctx = context("Double Pass Thru");
        assert_eq!(ctx.interpret_call("zig zag"), Ok(()));
        assert_eq!(ctx.callstack.len(), 2);
        assert!(ctx.callstack.iter().all(|c| c.is_action()));
        assert_eq!(ctx.perform_call(), Ok(()));
        assert!(ctx.dancers.iter().all(|d| (d.beats() - 4.0).abs() < 1e-9));
    }

    #[test]
    fn centers_zig_zag_pairs_with_the_call_before() {
        // Zig follows the designator, so the leading centers turn right.
        // Zag follows Zig and belongs to the trailers, and no center trails.
        let mut ctx = context("Double Pass Thru");
        let leaders: Vec<bool> = ctx.dancers.iter().map(|d| d.roles.leader).collect();
        let before: Vec<f64> = ctx.dancers.iter().map(|d| d.facing()).collect();
        let after = facing_after(&mut ctx, "centers zig zag");
        assert_eq!(ctx.callstack.len(), 3);
        for (d, ((lead, b), a)) in leaders.iter().zip(&before).zip(&after).enumerate() {
            let center = ctx.distance_from_center(d) < 2.0;
            assert_eq!(*lead, center, "dancer {d}");
            if center {
                assert!(angles_equal(*a, b - PI / 2.0), "dancer {d}: {b} -> {a}");
            } else {
                assert!(angles_equal(*a, *b), "dancer {d}: {b} -> {a}");
            }
        }
    }

    #[test]
    fn zig_alone_moves_only_leaders() {
        let mut ctx = context("Double Pass Thru");
        let leaders: Vec<bool> = ctx.dancers.iter().map(|d| d.roles.leader).collect();
        let before: Vec<f64> = ctx.dancers.iter().map(|d| d.facing()).collect();
        let after = facing_after(&mut ctx, "zig");
        for ((lead, b), a) in leaders.iter().zip(&before).zip(&after) {
            if *lead {
                assert!(angles_equal(*a, b - PI / 2.0));
            } else {
                assert!(angles_equal(*a, *b));
            }
        }
    }
}
