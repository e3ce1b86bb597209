//! Fractional calls: "half" and "one and a half".

use super::Call;
use crate::context::CallContext;
use crate::errors::CallError;
use crate::log::debug;

/// Dance only the first half of the next call on the stack.
///
/// The next call is performed in full, then every path is cut back to
/// half of what it added. Calls with explicit parts are halved at a part
/// boundary; others at half their beats.
#[derive(Clone, Debug, Default)]
pub struct Half {
    /// Set while a following call exists.
    target: Option<HalfTarget>,
}

#[derive(Clone, Copy, Debug)]
struct HalfTarget {
    prevbeats: f64,
    halfbeats: f64,
    is_action: bool,
}

impl Call for Half {
    fn name(&self) -> &str {
        "Half"
    }

    fn perform_call(&mut self, ctx: &mut CallContext, index: usize) -> Result<(), CallError> {
        let Some(next) = ctx.callstack.get(index + 1) else {
            self.target = None;
            return Ok(());
        };
        let halfbeats = match next.parts() {
            Some(parts) if !next.is_action() => {
                let n = (parts.len() + 1) / 2;
                parts[..n].iter().sum()
            }
            _ => 0.0,
        };
        self.target = Some(HalfTarget {
            prevbeats: ctx.max_beats(),
            halfbeats,
            is_action: next.is_action(),
        });
        Ok(())
    }

    fn post_process(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        let Some(target) = self.target else {
            return Ok(());
        };
        let halfbeats = if target.is_action || target.halfbeats == 0.0 {
            (ctx.max_beats() - target.prevbeats) / 2.0
        } else {
            target.halfbeats
        };
        let cut = target.prevbeats + halfbeats;
        debug!(cut, "halving call");
        for d in &mut ctx.dancers {
            let mut popped = None;
            while d.path.beats() > cut {
                popped = d.path.pop();
            }
            if let Some(m) = popped {
                let have = d.path.beats();
                if have < cut {
                    d.path.add(m.clip(cut - have));
                }
            }
        }
        ctx.animate_to_end();
        Ok(())
    }
}

/// Dance the previous calls once more, halved.
#[derive(Clone, Debug, Default)]
pub struct OneAndAHalf;

impl Call for OneAndAHalf {
    fn name(&self) -> &str {
        "Once and a Half"
    }

    fn pre_process(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        if ctx.callstack.len() < 2 {
            return Err(CallError::illegal("One and a half of what?"));
        }
        Ok(())
    }

    /// The calls before this one have been danced once already, so just
    /// add half of them again.
    ///
    /// Every call before this one is repeated, not only the first, so a
    /// designator in front of the call is halved along with it.
    fn perform_call(&mut self, ctx: &mut CallContext, index: usize) -> Result<(), CallError> {
        let calls_before = ctx.callstack[..index]
            .iter()
            .map(|c| c.name().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        let text = format!("half {calls_before}");
        ctx.apply_calls(&[text.as_str()])
    }
}
