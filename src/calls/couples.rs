//! Calls danced by a couple or by each dancer next to a partner.

use super::{Action, action_calls, dancer_label};
use crate::context::CallContext;
use crate::errors::CallError;
use crate::motion::Path;

/// The couple turns half around as a unit, to the left, or to the right
/// when reversed.
#[derive(Clone, Debug, Default)]
pub struct WheelAround {
    reverse: bool,
}

impl WheelAround {
    pub fn new(reverse: bool) -> Self {
        Self { reverse }
    }
}

impl Action for WheelAround {
    fn name(&self) -> &str {
        if self.reverse {
            "Reverse Wheel Around"
        } else {
            "Wheel Around"
        }
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let n = dancer_label(ctx, d);
        let Some(p) = ctx.partner(d).filter(|&p| ctx.dancers[p].active) else {
            return Err(CallError::illegal(format!(
                "Dancer {n} must Wheel Around with partner."
            )));
        };
        let roles = ctx.dancers[d].roles;
        let partner = ctx.dancers[p].roles;
        let facing_couple = if roles.belle { partner.beau } else { partner.belle };
        if !facing_couple {
            return Err(CallError::illegal(format!(
                "Dancer {n} is not part of a Facing Couple."
            )));
        }
        // Reversed, each dancer does the other's part mirrored
        match (roles.belle, self.reverse) {
            (true, false) => ctx.get_move("Belle Wheel"),
            (false, false) => ctx.get_move("Beau Wheel"),
            (true, true) => ctx.get_move("Beau Wheel").map(Path::reflect),
            (false, true) => ctx.get_move("Belle Wheel").map(Path::reflect),
        }
    }
}

/// Partners change sides, the belle passing in front.
#[derive(Clone, Debug, Default)]
pub struct HalfSashay;

impl Action for HalfSashay {
    fn name(&self) -> &str {
        "Half Sashay"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        if !ctx.is_in_couple(d) {
            return Err(CallError::illegal("Only Couples can Half Sashay"));
        }
        if ctx.dancers[d].roles.beau {
            ctx.get_move("BackSashay Right")
        } else {
            ctx.get_move("Sashay Left")
        }
    }
}

/// U-turn toward the partner, or toward the center without one.
#[derive(Clone, Debug, Default)]
pub struct TurnBack;

impl Action for TurnBack {
    fn name(&self) -> &str {
        "Turn Back"
    }

    fn perform_one(&self, ctx: &CallContext, _index: usize, d: usize) -> Result<Path, CallError> {
        let roles = ctx.dancers[d].roles;
        let left = if roles.beau {
            false
        } else if roles.belle {
            true
        } else {
            ctx.angle_to_center(d) > 0.0
        };
        ctx.get_move(if left { "U-Turn Left" } else { "U-Turn Right" })
    }
}

action_calls!(WheelAround, HalfSashay, TurnBack);
