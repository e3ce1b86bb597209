use super::Call;
use crate::context::CallContext;
use crate::dancer::Dancer;
use crate::defaults::SNAP_THRESHOLD;
use crate::errors::CallError;
use crate::geometry::VectorExt;
use crate::library::CallDefinition;

/// A call danced from a declarative definition.
///
/// Built once the definition's formation matched the active dancers:
/// `mapping[i]` is the formation dancer played by the i-th active dancer.
#[derive(Clone, Debug)]
pub struct XmlCall {
    definition: CallDefinition,
    mapping: Vec<usize>,
    target: Vec<Dancer>,
}

impl XmlCall {
    pub fn new(definition: CallDefinition, mapping: Vec<usize>, target: Vec<Dancer>) -> Self {
        Self {
            definition,
            mapping,
            target,
        }
    }

    pub fn definition(&self) -> &CallDefinition {
        &self.definition
    }
}

impl Call for XmlCall {
    fn name(&self) -> &str {
        &self.definition.title
    }

    /// Give each active dancer the path of its formation spot. Where the
    /// dancers stand a little off the definition's formation, the first
    /// movement absorbs the difference.
    fn perform_call(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        let vdif = ctx.compute_formation_offsets(&self.target, &self.mapping);
        let actives = ctx.actives();
        for ((&d, &spot), offset) in actives.iter().zip(&self.mapping).zip(&vdif) {
            let steps = self
                .definition
                .paths
                .get(spot >> 1)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let mut path = ctx.library().resolve_path(steps)?;
            let vd = offset.rotated(-ctx.dancers[d].tx.angle());
            if vd.length() > SNAP_THRESHOLD {
                if path.is_empty() {
                    path = ctx.get_move("Stand")?;
                }
                path = path.skew_first(-vd.x, -vd.y);
            }
            let dancer = &mut ctx.dancers[d];
            dancer.path.append(&path);
            dancer.animate_to_end();
        }
        ctx.level_beats()?;
        ctx.analyze();
        Ok(())
    }

    /// A definition knows its own ending formation. Only snap when other
    /// calls changed the result.
    fn post_process(&mut self, ctx: &mut CallContext, _index: usize) -> Result<(), CallError> {
        if ctx.callstack.len() > 1 {
            ctx.match_standard_formation();
        }
        Ok(())
    }

    fn parts(&self) -> Option<&[f64]> {
        self.definition.parts.as_deref()
    }
}
