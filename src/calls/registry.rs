//! Coded call lookup.

use pest::Parser;
use pest::iterators::Pair;

use super::*;
use crate::{CallParser, Rule};

/// The coded call whose name is exactly `text`, if there is one.
///
/// `text` should already be lowercase with single spaces, as
/// [`CallContext::interpret_call`] hands it over.
pub fn coded_call(text: &str) -> Option<CallEnum> {
    let pair = CallParser::parse(Rule::coded_call, text).ok()?.next()?;
    let call = pair.into_inner().next()?;
    build(call, text)
}

fn build(pair: Pair<Rule>, text: &str) -> Option<CallEnum> {
    let named = || cap_case(text);
    let call: CallEnum = match pair.as_rule() {
        Rule::allemande_left => AllemandeLeft::new(TurnThruKind::AllemandeLeft).into(),
        Rule::left_turn_thru => AllemandeLeft::new(TurnThruKind::LeftTurnThru).into(),
        Rule::turn_thru => AllemandeLeft::new(TurnThruKind::TurnThru).into(),
        Rule::turn_back => TurnBack.into(),
        Rule::box_the_gnat => BoxTheGnat.into(),
        Rule::box_counter_rotate => BoxCounterRotate.into(),
        Rule::beaus => Designator::new(DesignatorKind::Beaus, named()).into(),
        Rule::belles => Designator::new(DesignatorKind::Belles, named()).into(),
        Rule::boys => Designator::new(DesignatorKind::Boys, named()).into(),
        Rule::girls => Designator::new(DesignatorKind::Girls, named()).into(),
        Rule::heads => Designator::new(DesignatorKind::Heads, named()).into(),
        Rule::sides => Designator::new(DesignatorKind::Sides, named()).into(),
        Rule::leaders => Designator::new(DesignatorKind::Leaders, named()).into(),
        Rule::trailers => Designator::new(DesignatorKind::Trailers, named()).into(),
        Rule::ends => Designator::new(DesignatorKind::Ends, named()).into(),
        Rule::very_centers => Designator::new(DesignatorKind::VeryCenters, named()).into(),
        Rule::centers => {
            let count = pair
                .into_inner()
                .find(|p| p.as_rule() == Rule::center_count)
                .map_or(4, |p| match p.as_str() {
                    "2" | "two" => 2,
                    "6" | "six" => 6,
                    _ => 4,
                });
            Centers::new(named(), count).into()
        }
        Rule::circulate => Circulate.into(),
        Rule::cross_run => CrossRun.into(),
        Rule::explode_and => ExplodeAnd.into(),
        Rule::face => Face::new(named(), direction(pair)).into(),
        Rule::half_sashay => HalfSashay.into(),
        Rule::half => Half::default().into(),
        Rule::one_and_a_half => OneAndAHalf.into(),
        Rule::hinge => Hinge.into(),
        Rule::make_tight_wave => MakeTightWave.into(),
        Rule::pass_thru => PassThru.into(),
        Rule::quarter_in => QuarterIn::new(named(), direction(pair) == "out").into(),
        Rule::and_roll => Roll.into(),
        Rule::and_spread => Spread.into(),
        Rule::reverse_wheel_around => WheelAround::new(true).into(),
        Rule::wheel_around => WheelAround::new(false).into(),
        Rule::run => Run.into(),
        Rule::slide_thru => SlideThru.into(),
        Rule::slip => Slip.into(),
        Rule::star_thru => StarThru.into(),
        Rule::touch_a_quarter => {
            let left = pair.into_inner().any(|p| p.as_rule() == Rule::left_hand);
            TouchAQuarter::new(named(), left).into()
        }
        Rule::trade => Trade.into(),
        Rule::zig => Zig.into(),
        Rule::zag => Zag.into(),
        Rule::zoom => Zoom.into(),
        _ => return None,
    };
    Some(call)
}

/// Text of the direction word in "face in" or "quarter out".
fn direction(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .find(|p| matches!(p.as_rule(), Rule::face_direction | Rule::quarter_direction))
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}
