//! Calls: the things a caller says.
//!
//! Every call is a [`Call`] with three hooks run by
//! [`CallContext::perform_call`]: `pre_process` for all calls on the stack,
//! then `perform_call` for all, then `post_process` for all. Concepts do
//! their work in the outer hooks, base calls in `perform_call`.
//!
//! Most coded calls are an [`Action`]: each active dancer gets a path of
//! its own, everyone is padded to the same length, and the result is
//! snapped onto the nearest standard formation afterwards.

mod circulate;
mod concepts;
mod couples;
mod facing;
mod half;
mod quarter_turns;
mod registry;
mod trade;
mod xml;

use enum_dispatch::enum_dispatch;

pub use circulate::{BoxCounterRotate, Circulate, Zoom};
pub use concepts::{Centers, Designator, DesignatorKind, ExplodeAnd, Spread};
pub use couples::{HalfSashay, TurnBack, WheelAround};
pub use facing::{
    AllemandeLeft, BoxTheGnat, MakeTightWave, PassThru, SlideThru, StarThru, TouchAQuarter,
    TurnThruKind,
};
pub use half::{Half, OneAndAHalf};
pub use quarter_turns::{Face, QuarterIn, QuarterTurns, Roll, Zag, Zig};
pub use registry::coded_call;
pub use trade::{CrossRun, Hinge, Run, Slip, Trade};
pub use xml::XmlCall;

use crate::context::CallContext;
use crate::errors::CallError;
use crate::motion::Path;

#[enum_dispatch]
pub trait Call {
    /// Display name, as it appears in the context's call name.
    fn name(&self) -> &str;

    fn pre_process(&mut self, _ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        Ok(())
    }

    fn perform_call(&mut self, _ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        Ok(())
    }

    fn post_process(&mut self, _ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        Ok(())
    }

    /// Built from per-dancer paths rather than a definition.
    fn is_action(&self) -> bool {
        false
    }

    /// Beats of each part but the last, if the call has explicit parts.
    fn parts(&self) -> Option<&[f64]> {
        None
    }
}

#[enum_dispatch(Call)]
#[derive(Clone, Debug)]
pub enum CallEnum {
    XmlCall,
    Designator,
    Centers,
    Half,
    OneAndAHalf,
    ExplodeAnd,
    Spread,
    Roll,
    QuarterIn,
    Face,
    Zig,
    Zag,
    Circulate,
    Zoom,
    BoxCounterRotate,
    Trade,
    Slip,
    Run,
    CrossRun,
    Hinge,
    AllemandeLeft,
    BoxTheGnat,
    SlideThru,
    StarThru,
    PassThru,
    TouchAQuarter,
    MakeTightWave,
    WheelAround,
    HalfSashay,
    TurnBack,
}

/// A call that moves dancers one at a time.
pub trait Action {
    fn name(&self) -> &str;

    fn perform(&mut self, ctx: &mut CallContext, index: usize) -> Result<(), CallError> {
        perform_each(self, ctx, index)
    }

    /// Path for one dancer. Standing still by default.
    fn perform_one(&self, _ctx: &CallContext, _index: usize, _d: usize) -> Result<Path, CallError> {
        Ok(Path::new())
    }

    fn post_process(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        ctx.match_standard_formation();
        Ok(())
    }
}

/// Add the path from [`Action::perform_one`] to every active dancer.
pub fn perform_each<A: Action + ?Sized>(
    action: &A,
    ctx: &mut CallContext,
    index: usize,
) -> Result<(), CallError> {
    for d in ctx.actives() {
        let path = action.perform_one(ctx, index, d)?;
        ctx.dancers[d].path.append(&path);
    }
    Ok(())
}

/// Move everyone to the end of the new paths and level the beats.
pub fn finish_action(ctx: &mut CallContext) -> Result<(), CallError> {
    ctx.animate_to_end();
    ctx.level_beats()
}

/// Implement [`Call`] for types that are an [`Action`].
macro_rules! action_calls {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::calls::Call for $ty {
                fn name(&self) -> &str {
                    $crate::calls::Action::name(self)
                }

                fn perform_call(
                    &mut self,
                    ctx: &mut $crate::context::CallContext,
                    index: usize,
                ) -> Result<(), $crate::errors::CallError> {
                    $crate::calls::Action::perform(self, ctx, index)?;
                    $crate::calls::finish_action(ctx)
                }

                fn post_process(
                    &mut self,
                    ctx: &mut $crate::context::CallContext,
                    index: usize,
                ) -> Result<(), $crate::errors::CallError> {
                    $crate::calls::Action::post_process(self, ctx, index)
                }

                fn is_action(&self) -> bool {
                    true
                }
            }
        )*
    };
}
pub(crate) use action_calls;

/// "centers four" -> "Centers Four"
pub fn cap_case(text: &str) -> String {
    text.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Dancer number for messages.
pub(crate) fn dancer_label(ctx: &CallContext, d: usize) -> usize {
    ctx.dancers[d].number
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_case_words() {
        assert_eq!(cap_case("centers four"), "Centers Four");
        assert_eq!(cap_case("1-1/2"), "1-1/2");
        assert_eq!(cap_case(""), "");
    }
}
