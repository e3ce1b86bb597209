//! Square-dance call interpretation and motion synthesis.
//!
//! Call text such as "heads star thru" is matched against call
//! definitions and coded calls, performed against a set of dancers, and
//! turned into a timed Bezier path for every dancer.

use pest_derive::Parser;

pub mod calls;
pub mod context;
pub mod dancer;
pub mod defaults;
pub mod errors;
pub mod formation;
pub mod geometry;
pub mod handhold;
pub mod library;
pub mod log;
pub mod motion;
pub mod sequence;

pub use calls::{Call, CallEnum};
pub use context::CallContext;
pub use dancer::{Dancer, Gender, Roles};
pub use errors::{CallError, ParseError, SequenceError};
pub use formation::Formation;
pub use handhold::{FloorGeometry, Handhold, HandholdConfig, resolve_handholds};
pub use library::{CallDefinition, Catalog, Library};
pub use motion::{Hands, Movement, Path};
pub use sequence::{Part, Sequence, normalize_call};

#[derive(Parser)]
#[grammar = "calls.pest"]
pub struct CallParser;

/// Dance `calls`, one per line, from the standard formation named
/// `formation`.
///
/// Returns the danced sequence on success, or an error with diagnostics
/// pointing at the line that could not be danced.
pub fn choreograph(formation: &str, calls: &str) -> Result<Sequence, miette::Report> {
    let library = Library::standard();
    let start = library.formation(formation)?;
    let mut sequence = Sequence::new(library, &start);
    sequence.run(formation, calls)?;
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_coded_call() {
        let result = CallParser::parse(Rule::coded_call, "left touch a quarter");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn coded_call_is_whole_text() {
        assert!(CallParser::parse(Rule::coded_call, "trade the wave").is_err());
        assert!(CallParser::parse(Rule::coded_call, "centers 6").is_ok());
    }

    #[test]
    fn parse_call_line_with_comment() {
        let result = CallParser::parse(Rule::call_line, "pass thru # to a wave");
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn choreograph_from_static_square() {
        let seq = choreograph("Static Square", "heads face left\nsides face right\n");
        let seq = seq.map_err(|e| format!("{e:?}"));
        assert_eq!(seq.as_ref().map(|s| s.parts().len()), Ok(2));
    }

    #[test]
    fn choreograph_unknown_formation() {
        let err = choreograph("Nowhere", "zoom").err().map(|e| e.to_string());
        assert!(err.is_some());
    }
}
