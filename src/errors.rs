//! Error types with rich diagnostics using miette
//!
//! Call failures are plain values so callers can branch on the kind;
//! sequence failures wrap them with the offending line for display.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (sequence name or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Call Errors
// ============================================================================

/// Why a call could not be interpreted or performed.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("call not found: {call}")]
    #[diagnostic(code(square_calls::call::not_found))]
    NotFound { call: String },

    #[error("formation not found for {call}")]
    #[diagnostic(
        code(square_calls::call::formation_not_found),
        help("the call is known but not from this formation")
    )]
    FormationNotFound { call: String },

    #[error("{0}")]
    #[diagnostic(code(square_calls::call::illegal))]
    Illegal(String),

    #[error("missing {kind} definition: {name}")]
    #[diagnostic(code(square_calls::library::missing_definition))]
    MissingDefinition { kind: &'static str, name: String },
}

impl CallError {
    pub fn illegal(message: impl Into<String>) -> Self {
        CallError::Illegal(message.into())
    }

    pub fn not_found(call: impl Into<String>) -> Self {
        CallError::NotFound { call: call.into() }
    }

    /// Not-found kinds are the ones a caller may recover from by trying
    /// something else.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CallError::NotFound { .. } | CallError::FormationNotFound { .. }
        )
    }
}

// ============================================================================
// Reference Data Errors
// ============================================================================

/// Errors parsing names that appear in definition data
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unknown hand usage: {name}")]
    #[diagnostic(
        code(square_calls::parse::unknown_hands),
        help("expected one of none, left, right, both, gripleft, gripright, gripboth, anygrip")
    )]
    UnknownHands { name: String },

    #[error("unknown gender: {name}")]
    #[diagnostic(
        code(square_calls::parse::unknown_gender),
        help("expected boy, girl or phantom")
    )]
    UnknownGender { name: String },
}

// ============================================================================
// Sequence Errors
// ============================================================================

/// A line of a sequence that could not be danced.
#[derive(Error, Diagnostic, Debug)]
#[error("line {line}: {cause}")]
#[diagnostic(code(square_calls::sequence::call_failed))]
pub struct SequenceError {
    /// One-based line number
    pub line: usize,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("this call")]
    pub span: SourceSpan,
    #[source]
    #[diagnostic_source]
    pub cause: CallError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_kinds() {
        assert!(CallError::not_found("zoom").is_not_found());
        assert!(
            CallError::FormationNotFound {
                call: "zoom".into()
            }
            .is_not_found()
        );
        assert!(!CallError::illegal("no").is_not_found());
    }

    #[test]
    fn messages() {
        assert_eq!(
            CallError::not_found("swing thru").to_string(),
            "call not found: swing thru"
        );
        assert_eq!(
            CallError::MissingDefinition {
                kind: "move",
                name: "Run Up".into()
            }
            .to_string(),
            "missing move definition: Run Up"
        );
    }
}
