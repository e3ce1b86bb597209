//! Reference data the engine reads but never owns: declarative call
//! definitions, named formations and primitive moves.
//!
//! Both sources sit behind traits so a host can load them from wherever it
//! keeps them. [`Library`] bundles the two and is handed to every
//! [`CallContext`](crate::context::CallContext).

pub mod moves;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub use moves::StandardMoves;

use crate::errors::CallError;
use crate::formation::{Formation, standard_formation, STANDARD_FORMATIONS};
use crate::motion::{Hands, Movement, Path};

/// Source of declarative call definitions and named formations.
pub trait DefinitionStore {
    /// All definitions whose title matches `title`, ignoring case.
    fn call_definitions(&self, title: &str) -> Vec<CallDefinition>;

    fn formation(&self, name: &str) -> Option<Formation>;
}

/// Source of primitive moves such as "Run Right" or "Hinge Left".
pub trait MoveLibrary {
    fn movements(&self, name: &str) -> Option<Vec<Movement>>;
}

/// Where a call definition starts from.
#[derive(Clone, Debug, PartialEq)]
pub enum FormationRef {
    Named(String),
    Inline(Formation),
}

impl FormationRef {
    pub fn named(name: impl Into<String>) -> Self {
        FormationRef::Named(name.into())
    }
}

/// A reference to a library move with optional modifications.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveRef {
    pub select: String,
    pub beats: Option<f64>,
    pub scale_x: f64,
    pub scale_y: f64,
    pub reflect: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub hands: Option<Hands>,
}

impl MoveRef {
    pub fn new(select: impl Into<String>) -> Self {
        Self {
            select: select.into(),
            beats: None,
            scale_x: 1.0,
            scale_y: 1.0,
            reflect: false,
            offset_x: 0.0,
            offset_y: 0.0,
            hands: None,
        }
    }

    pub fn beats(mut self, beats: f64) -> Self {
        self.beats = Some(beats);
        self
    }

    pub fn scale(mut self, x: f64, y: f64) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self
    }

    pub fn reflect(mut self) -> Self {
        self.reflect = true;
        self
    }

    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    pub fn hands(mut self, hands: Hands) -> Self {
        self.hands = Some(hands);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathStep {
    Move(MoveRef),
    Movement(Movement),
}

impl From<MoveRef> for PathStep {
    fn from(m: MoveRef) -> Self {
        PathStep::Move(m)
    }
}

impl From<Movement> for PathStep {
    fn from(m: Movement) -> Self {
        PathStep::Movement(m)
    }
}

/// One animation of a call from one starting formation.
///
/// `paths[k]` is danced by formation entry `k`, which is both dancers of
/// that mirrored pair.
#[derive(Clone, Debug, PartialEq)]
pub struct CallDefinition {
    pub title: String,
    pub formation: FormationRef,
    pub paths: Vec<Vec<PathStep>>,
    /// Beats of each part but the last.
    pub parts: Option<Vec<f64>>,
    pub gender_specific: bool,
}

impl CallDefinition {
    pub fn new(title: impl Into<String>, formation: FormationRef) -> Self {
        Self {
            title: title.into(),
            formation,
            paths: Vec::new(),
            parts: None,
            gender_specific: false,
        }
    }

    pub fn path(mut self, steps: impl IntoIterator<Item = PathStep>) -> Self {
        self.paths.push(steps.into_iter().collect());
        self
    }

    pub fn parts(mut self, parts: Vec<f64>) -> Self {
        self.parts = Some(parts);
        self
    }

    pub fn gender_specific(mut self) -> Self {
        self.gender_specific = true;
        self
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// In-memory definition store.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    formations: HashMap<String, Formation>,
    calls: Vec<CallDefinition>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard formations and no call definitions.
    pub fn standard() -> Self {
        STANDARD_FORMATIONS
            .iter()
            .filter_map(|name| standard_formation(name))
            .fold(Self::new(), Catalog::with_formation)
    }

    pub fn with_formation(mut self, formation: Formation) -> Self {
        self.formations.insert(formation.name.clone(), formation);
        self
    }

    pub fn with_call(mut self, call: CallDefinition) -> Self {
        self.calls.push(call);
        self
    }
}

impl DefinitionStore for Catalog {
    fn call_definitions(&self, title: &str) -> Vec<CallDefinition> {
        self.calls
            .iter()
            .filter(|c| c.title.eq_ignore_ascii_case(title))
            .cloned()
            .collect()
    }

    fn formation(&self, name: &str) -> Option<Formation> {
        self.formations.get(name).cloned()
    }
}

// ============================================================================
// Library
// ============================================================================

/// Shared handle on the reference data.
#[derive(Clone)]
pub struct Library {
    store: Rc<dyn DefinitionStore>,
    moves: Rc<dyn MoveLibrary>,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library").finish_non_exhaustive()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::standard()
    }
}

impl Library {
    pub fn new(store: impl DefinitionStore + 'static, moves: impl MoveLibrary + 'static) -> Self {
        Self {
            store: Rc::new(store),
            moves: Rc::new(moves),
        }
    }

    /// Built-in formations and moves, no declarative calls.
    pub fn standard() -> Self {
        Self::new(Catalog::standard(), StandardMoves)
    }

    /// Standard moves with a caller-supplied definition store.
    pub fn with_store(store: impl DefinitionStore + 'static) -> Self {
        Self::new(store, StandardMoves)
    }

    pub fn call_definitions(&self, title: &str) -> Vec<CallDefinition> {
        self.store.call_definitions(title)
    }

    pub fn formation(&self, name: &str) -> Result<Formation, CallError> {
        self.store
            .formation(name)
            .ok_or_else(|| CallError::MissingDefinition {
                kind: "formation",
                name: name.to_string(),
            })
    }

    pub fn resolve_formation(&self, formation: &FormationRef) -> Result<Formation, CallError> {
        match formation {
            FormationRef::Named(name) => self.formation(name),
            FormationRef::Inline(f) => Ok(f.clone()),
        }
    }

    fn movements(&self, name: &str) -> Result<Vec<Movement>, CallError> {
        self.moves
            .movements(name)
            .ok_or_else(|| CallError::MissingDefinition {
                kind: "move",
                name: name.to_string(),
            })
    }

    /// A library move as a path, unmodified.
    pub fn get_move(&self, name: &str) -> Result<Path, CallError> {
        self.movements(name).map(Path::from_movements)
    }

    /// A library move with the modifications of `m` applied to each of its
    /// movements: hands, then scale, then offset, then timing.
    pub fn translate_move(&self, m: &MoveRef) -> Result<Vec<Movement>, CallError> {
        let movements = self.movements(&m.select)?;
        let scale_y = if m.reflect { -m.scale_y } else { m.scale_y };
        let oldbeats: f64 = movements.iter().map(Movement::beats).sum();
        let factor = match m.beats {
            Some(b) if oldbeats > 0.0 => b / oldbeats,
            _ => 1.0,
        };
        Ok(movements
            .iter()
            .map(|mv| {
                mv.use_hands(m.hands.unwrap_or(mv.hands()))
                    .scale(m.scale_x, scale_y)
                    .skew(m.offset_x, m.offset_y)
                    .stretch(factor)
            })
            .collect())
    }

    pub fn resolve_path(&self, steps: &[PathStep]) -> Result<Path, CallError> {
        let mut movements = Vec::new();
        for step in steps {
            match step {
                PathStep::Move(m) => movements.extend(self.translate_move(m)?),
                PathStep::Movement(m) => movements.push(*m),
            }
        }
        Ok(Path::from_movements(movements))
    }
}
