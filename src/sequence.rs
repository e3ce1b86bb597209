//! Dancing a sequence of calls, one per line.

use miette::SourceSpan;
use pest::Parser;

use crate::context::CallContext;
use crate::dancer::Dancer;
use crate::errors::{CallError, SequenceError, SourceContext};
use crate::formation::Formation;
use crate::library::Library;
use crate::log::debug;
use crate::{CallParser, Rule};

/// Lowercase `line`, drop a `#` or `*` comment and collapse whitespace.
///
/// An empty result means the line has no call on it.
pub fn normalize_call(line: &str) -> String {
    let lower = line.to_lowercase();
    let Ok(mut pairs) = CallParser::parse(Rule::call_line, &lower) else {
        return String::new();
    };
    let Some(line) = pairs.next() else {
        return String::new();
    };
    line.into_inner()
        .filter(|p| p.as_rule() == Rule::word)
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One call of a sequence that was danced.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    /// One-based line number in the source.
    pub line: usize,
    /// Normalized call text.
    pub text: String,
    /// Titles of the calls the text was matched to.
    pub callname: String,
    pub beats: f64,
}

/// Dancers moving through successive calls from a starting formation.
#[derive(Clone, Debug)]
pub struct Sequence {
    library: Library,
    dancers: Vec<Dancer>,
    parts: Vec<Part>,
}

impl Sequence {
    pub fn new(library: Library, formation: &Formation) -> Self {
        Self {
            library,
            dancers: formation.dancers(),
            parts: Vec::new(),
        }
    }

    /// Dancers with every successful call appended to their paths.
    pub fn dancers(&self) -> &[Dancer] {
        &self.dancers
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Total length of the sequence.
    pub fn beats(&self) -> f64 {
        self.dancers.iter().map(Dancer::beats).fold(0.0, f64::max)
    }

    /// Beat at which each part starts, plus the end of the sequence.
    pub fn part_starts(&self) -> Vec<f64> {
        let mut starts = Vec::with_capacity(self.parts.len() + 1);
        let mut beat = 0.0;
        starts.push(beat);
        for p in &self.parts {
            beat += p.beats;
            starts.push(beat);
        }
        starts
    }

    /// Dance one call. Nothing changes if it fails.
    pub fn add_call(&mut self, line: usize, text: &str) -> Result<&Part, CallError> {
        let text = normalize_call(text);
        let mut ctx = CallContext::from_dancers(self.library.clone(), &self.dancers);
        ctx.interpret_call(&text)?;
        ctx.perform_call()?;
        // Dancers with nothing to do still stand through the call
        ctx.level_beats()?;
        let beats = ctx.max_beats();
        ctx.append_to_dancers(&mut self.dancers);
        debug!(line, call = %text, beats, "danced");
        self.parts.push(Part {
            line,
            callname: ctx.callname().to_string(),
            text,
            beats,
        });
        Ok(&self.parts[self.parts.len() - 1])
    }

    /// Dance every line of `source`, stopping at the first that fails.
    ///
    /// Lines before the failing one stay danced.
    pub fn run(&mut self, name: &str, source: &str) -> Result<(), SequenceError> {
        let mut offset = 0;
        for (i, raw) in source.split_inclusive('\n').enumerate() {
            let start = offset;
            offset += raw.len();
            let line = raw.trim_end_matches(['\n', '\r']);
            if normalize_call(line).is_empty() {
                continue;
            }
            if let Err(cause) = self.add_call(i + 1, line) {
                let ctx = SourceContext::new(name, source);
                let lead = line.len() - line.trim_start().len();
                return Err(SequenceError {
                    line: i + 1,
                    src: ctx.named_source(),
                    span: SourceSpan::new((start + lead).into(), line.trim().len()),
                    cause,
                });
            }
        }
        Ok(())
    }
}
