//! The working set for interpreting one call.
//!
//! A [`CallContext`] owns snapshots of the dancers it works on, the stack
//! of calls parsed from the call text, and a handle on the reference data.
//! Contexts are cheap to derive from each other: a derived context starts
//! with every dancer standing where the parent's dancer currently is and
//! an empty path, and [`CallContext::append_to`] merges the computed paths
//! back once everything succeeded.

mod analyze;
pub mod query;
mod snap;

use glam::DVec2;

use crate::calls::{self, Call, CallEnum, XmlCall};
use crate::dancer::Dancer;
use crate::errors::CallError;
use crate::formation::{Formation, match_formations};
use crate::library::Library;
use crate::log::{debug, trace};
use crate::motion::Path;

#[derive(Clone, Debug)]
pub struct CallContext {
    pub dancers: Vec<Dancer>,
    pub callstack: Vec<CallEnum>,
    callname: String,
    library: Library,
}

impl CallContext {
    /// Context over copies of `dancers`, all active. Each copy remembers
    /// its index in `dancers`.
    pub fn from_dancers(library: Library, dancers: &[Dancer]) -> Self {
        let dancers = dancers
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let mut s = d.snapshot(i);
                s.active = true;
                s
            })
            .collect();
        Self::with_dancers(library, dancers)
    }

    /// Context over the dancers of a formation, standing at their start.
    pub fn from_formation(library: Library, formation: &Formation) -> Self {
        Self::with_dancers(library, formation.dancers())
    }

    fn with_dancers(library: Library, dancers: Vec<Dancer>) -> Self {
        Self {
            dancers,
            callstack: Vec::new(),
            callname: String::new(),
            library,
        }
    }

    /// Derived context: same dancers where they are now, same active
    /// flags, empty paths and no calls.
    pub fn snapshot(&self) -> Self {
        let dancers = self
            .dancers
            .iter()
            .enumerate()
            .map(|(i, d)| d.snapshot(i))
            .collect();
        Self::with_dancers(self.library.clone(), dancers)
    }

    /// Derived context holding only the active dancers.
    pub fn snapshot_actives(&self) -> Self {
        let dancers = self
            .dancers
            .iter()
            .enumerate()
            .filter(|(_, d)| d.active)
            .map(|(i, d)| d.snapshot(i))
            .collect();
        Self::with_dancers(self.library.clone(), dancers)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Titles of the calls on the stack, space separated.
    pub fn callname(&self) -> &str {
        &self.callname
    }

    /// Indices of the active dancers.
    pub fn actives(&self) -> Vec<usize> {
        self.dancers
            .iter()
            .enumerate()
            .filter(|(_, d)| d.active)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn all_active(&self) -> bool {
        self.dancers.iter().all(|d| d.active)
    }

    /// Add the paths computed here to the dancers this context was derived
    /// from, and move those dancers to the end of their new paths.
    pub fn append_to(&self, source: &mut CallContext) {
        self.append_to_dancers(&mut source.dancers);
    }

    pub fn append_to_dancers(&self, dancers: &mut [Dancer]) {
        for d in &self.dancers {
            if let Some(target) = d.source.and_then(|i| dancers.get_mut(i)) {
                target.path.append(&d.path);
                target.animate_to_end();
            }
        }
    }

    /// Interpret and perform each call in turn, each on a fresh snapshot,
    /// merging the result back before the next one starts.
    pub fn apply_calls(&mut self, calls: &[&str]) -> Result<(), CallError> {
        for text in calls {
            let mut ctx = self.snapshot();
            ctx.interpret_call(text)?;
            ctx.perform_call()?;
            ctx.append_to(self);
        }
        Ok(())
    }

    // ========================================================================
    // Interpretation
    // ========================================================================

    /// Parse `text` into calls on the stack.
    ///
    /// The longest known prefix of the remaining words is taken each time,
    /// so "boys run" becomes the designator "boys" followed by "run". If no
    /// prefix is known the last error seen is returned, which is more
    /// specific than not-found when a call matched by name but not by
    /// formation.
    pub fn interpret_call(&mut self, text: &str) -> Result<(), CallError> {
        for d in &mut self.dancers {
            d.path.clear();
        }
        self.callname.clear();
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        let mut err = CallError::not_found(normalized.clone());
        let mut words: Vec<&str> = normalized.split(' ').filter(|w| !w.is_empty()).collect();
        while !words.is_empty() {
            let mut matched = None;
            for n in (1..=words.len()).rev() {
                let callname = words[..n].join(" ");
                let mut success = match self.match_xml_call(&callname) {
                    Ok(found) => found,
                    Err(e) => {
                        err = e;
                        false
                    }
                };
                if !success {
                    success = self.match_coded_call(&callname);
                }
                if success {
                    matched = Some(n);
                    break;
                }
            }
            let Some(n) = matched else {
                return Err(err);
            };
            words.drain(..n);
        }
        Ok(())
    }

    fn push_call(&mut self, call: CallEnum) {
        debug!(call = call.name(), depth = self.callstack.len(), "matched call");
        if !self.callname.is_empty() {
            self.callname.push(' ');
        }
        self.callname.push_str(call.name());
        self.callstack.push(call);
    }

    /// Look for a declarative definition of `calltext` whose starting
    /// formation matches the active dancers.
    pub fn match_xml_call(&mut self, calltext: &str) -> Result<bool, CallError> {
        let definitions = self.library.call_definitions(calltext);
        if definitions.is_empty() {
            return Ok(false);
        }
        // Calls already on the stack run first, so a call after a concept
        // like "explode and" is matched against where the dancers end up
        let mut ctx = if self.callstack.is_empty() {
            self.snapshot_actives()
        } else {
            let mut ctx = self.snapshot();
            ctx.callstack = self.callstack.clone();
            ctx.perform_call()?;
            for d in &mut ctx.dancers {
                d.animate_to_end();
            }
            ctx.snapshot_actives()
        };
        for def in definitions {
            let formation = self.library.resolve_formation(&def.formation)?;
            let target = formation.dancers();
            if let Some(mapping) =
                match_formations(&mut ctx.dancers, &target, def.gender_specific, false)
            {
                trace!(call = def.title.as_str(), ?mapping, "formation matched");
                self.push_call(CallEnum::from(XmlCall::new(def, mapping, target)));
                return Ok(true);
            }
        }
        Err(CallError::FormationNotFound {
            call: calltext.to_string(),
        })
    }

    pub fn match_coded_call(&mut self, calltext: &str) -> bool {
        match calls::coded_call(calltext) {
            Some(call) => {
                self.push_call(call);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Performing
    // ========================================================================

    /// Run the stack: analyze, then every call's pre-process, then every
    /// call's perform, then every call's post-process. Each phase finishes
    /// for the whole stack before the next one starts.
    pub fn perform_call(&mut self) -> Result<(), CallError> {
        self.analyze();
        for i in 0..self.callstack.len() {
            let mut call = self.callstack[i].clone();
            call.pre_process(self, i)?;
            self.callstack[i] = call;
        }
        for i in 0..self.callstack.len() {
            let mut call = self.callstack[i].clone();
            call.perform_call(self, i)?;
            self.callstack[i] = call;
        }
        for i in 0..self.callstack.len() {
            let mut call = self.callstack[i].clone();
            call.post_process(self, i)?;
            self.callstack[i] = call;
        }
        Ok(())
    }

    pub fn max_beats(&self) -> f64 {
        self.dancers.iter().map(Dancer::beats).fold(0.0, f64::max)
    }

    /// Pad every path with standing so all dancers finish together.
    pub fn level_beats(&mut self) -> Result<(), CallError> {
        let maxbeats = self.max_beats();
        for i in 0..self.dancers.len() {
            let b = maxbeats - self.dancers[i].beats();
            if b > 0.0 {
                let stand = self.library.get_move("Stand")?.changebeats(b);
                self.dancers[i].path.append(&stand);
            }
        }
        Ok(())
    }

    /// Move every dancer to the end of its path.
    pub fn animate_to_end(&mut self) {
        for d in &mut self.dancers {
            d.animate_to_end();
        }
    }

    /// Upper right corner of the box around the dancers, assuming they are
    /// centered on the origin.
    pub fn bounds(&self) -> DVec2 {
        self.dancers
            .iter()
            .map(Dancer::location)
            .reduce(DVec2::max)
            .unwrap_or(DVec2::ZERO)
    }

    /// Shift the start positions so the dancers are centered on the origin.
    pub fn center(&mut self) {
        if self.dancers.is_empty() {
            return;
        }
        let n = self.dancers.len() as f64;
        let ave = self.dancers.iter().map(Dancer::start_location).sum::<DVec2>() / n;
        for d in &mut self.dancers {
            d.shift_start(-ave.x, -ave.y);
        }
    }

    /// A library move, for calls that build paths from primitives.
    pub fn get_move(&self, name: &str) -> Result<Path, CallError> {
        self.library.get_move(name)
    }
}
