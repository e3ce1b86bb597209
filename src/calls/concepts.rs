//! Concepts and designators: calls that change who dances or how.

use glam::DVec2;

use super::{Action, Call, action_calls};
use crate::context::CallContext;
use crate::defaults::CENTER_GAP;
use crate::errors::CallError;
use crate::motion::Hands;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DesignatorKind {
    Beaus,
    Belles,
    Boys,
    Girls,
    Heads,
    Sides,
    Leaders,
    Trailers,
    Ends,
    VeryCenters,
}

/// Only the named dancers take part in the rest of the call.
#[derive(Clone, Debug)]
pub struct Designator {
    kind: DesignatorKind,
    name: String,
}

impl Designator {
    pub fn new(kind: DesignatorKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> DesignatorKind {
        self.kind
    }

    fn selects(&self, ctx: &CallContext, d: usize) -> bool {
        use crate::dancer::Gender;
        let dancer = &ctx.dancers[d];
        let r = &dancer.roles;
        match self.kind {
            DesignatorKind::Beaus => r.beau,
            DesignatorKind::Belles => r.belle,
            DesignatorKind::Boys => dancer.gender == Gender::Boy,
            DesignatorKind::Girls => dancer.gender == Gender::Girl,
            DesignatorKind::Heads => matches!(dancer.couple, 1 | 3),
            DesignatorKind::Sides => matches!(dancer.couple, 2 | 4),
            DesignatorKind::Leaders => r.leader,
            DesignatorKind::Trailers => r.trailer,
            DesignatorKind::Ends => r.end,
            DesignatorKind::VeryCenters => r.very_center,
        }
    }
}

impl Call for Designator {
    fn name(&self) -> &str {
        &self.name
    }

    fn pre_process(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        let selected: Vec<bool> = (0..ctx.dancers.len()).map(|d| self.selects(ctx, d)).collect();
        if !ctx.dancers.iter().zip(&selected).any(|(d, &s)| d.active && s) {
            return Err(CallError::illegal(format!("No {} here", self.name)));
        }
        for (d, s) in ctx.dancers.iter_mut().zip(selected) {
            d.active = d.active && s;
        }
        Ok(())
    }
}

/// The two, four or six dancers nearest the center of the set.
#[derive(Clone, Debug)]
pub struct Centers {
    name: String,
    count: usize,
}

impl Centers {
    pub fn new(name: impl Into<String>, count: usize) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Call for Centers {
    fn name(&self) -> &str {
        &self.name
    }

    fn pre_process(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        let numc = self.count;
        let mut order: Vec<usize> = (0..ctx.dancers.len()).collect();
        order.sort_by(|&a, &b| ctx.distance_from_center(a).total_cmp(&ctx.distance_from_center(b)));
        let separated = numc > 0
            && numc < order.len()
            && ctx.distance_from_center(order[numc]) - ctx.distance_from_center(order[numc - 1])
                > CENTER_GAP;
        if !separated {
            return Err(CallError::illegal(format!("Cannot find {} dancers", self.name)));
        }
        for &d in &order[numc..] {
            ctx.dancers[d].active = false;
        }
        Ok(())
    }
}

/// Step forward out of a wave and face the dancer that was beside you.
#[derive(Clone, Debug, Default)]
pub struct ExplodeAnd;

impl Action for ExplodeAnd {
    fn name(&self) -> &str {
        "Explode and"
    }

    fn perform(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        ctx.apply_calls(&["extend", "quarter in"])
    }
}

/// Beaus and belles slide apart as they finish the previous call.
#[derive(Clone, Debug, Default)]
pub struct Spread;

impl Action for Spread {
    fn name(&self) -> &str {
        "and Spread"
    }

    fn perform(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        for d in ctx.actives() {
            let roles = ctx.dancers[d].roles;
            let v = if roles.belle {
                DVec2::new(0.0, 2.0)
            } else if roles.beau {
                DVec2::new(0.0, -2.0)
            } else {
                DVec2::ZERO
            };
            let path = &mut ctx.dancers[d].path;
            let Some(m) = path.pop() else {
                continue;
            };
            let v = m.final_rotate().apply(v);
            path.add(m.skew(v.x, v.y).use_hands(Hands::NONE));
        }
        Ok(())
    }
}

action_calls!(ExplodeAnd, Spread);
